//! Deterministic row-layout atlas packing.
//!
//! The packer is intentionally not an optimal bin packer: images are split
//! into `num_rows` consecutive groups in caller order and placed
//! left-to-right with no padding. Layout is computed (and bounds-checked)
//! before a single pixel is drawn, so an oversized atlas never allocates a
//! canvas.

use std::io::Cursor;

use anyhow::Context;
use image::RgbaImage;

use crate::foundation::error::{RelicError, RelicResult};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize,
)]
/// Integer pixel rect.
pub struct FrameRect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width.
    pub w: u32,
    /// Height.
    pub h: u32,
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize,
)]
/// Integer pixel size.
pub struct FrameSize {
    /// Width.
    pub w: u32,
    /// Height.
    pub h: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Normalized pivot point.
pub struct Pivot {
    /// Horizontal pivot in `[0, 1]`.
    pub x: f32,
    /// Vertical pivot in `[0, 1]`.
    pub y: f32,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Placement and source metadata for one packed image.
pub struct AtlasFrame {
    /// Placement rect within the atlas.
    pub rect: FrameRect,
    /// Sub-rect of the source sprite (always the full sprite; no trimming).
    pub sprite_source_size: FrameRect,
    /// Source sprite dimensions.
    pub source_size: FrameSize,
    /// Pivot, centered.
    pub pivot: Pivot,
}

#[derive(Clone, Debug)]
/// A packed atlas: encoded image plus per-key frame metadata.
pub struct Atlas {
    /// PNG-encoded atlas image bytes.
    pub image_png: Vec<u8>,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Frames keyed by canonical, alias-resolved name.
    pub frames: std::collections::BTreeMap<String, AtlasFrame>,
}

#[derive(Clone, Debug)]
/// One input bitmap with its canonical key.
pub struct InputImage {
    /// Canonical, alias-resolved key; becomes the frame key.
    pub key: String,
    /// Decoded bitmap.
    pub image: RgbaImage,
}

#[derive(Clone, Copy, Debug)]
/// Layout controls for [`pack_atlas`].
pub struct PackOptions {
    /// Number of rows the images are partitioned into.
    pub num_rows: u32,
    /// Maximum atlas width in pixels.
    pub max_width: u32,
    /// Maximum atlas height in pixels.
    pub max_height: u32,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self {
            num_rows: 10,
            max_width: 7500,
            max_height: 12500,
        }
    }
}

struct Placement {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
}

struct Layout {
    width: u32,
    height: u32,
    placements: Vec<Placement>,
}

/// Compute the row layout for the given image sizes, in order.
///
/// Fails with [`RelicError::PackingOverflow`] when the computed canvas
/// exceeds the configured maxima, before anything is drawn.
fn compute_layout(sizes: &[(u32, u32)], opts: &PackOptions) -> RelicResult<Layout> {
    if opts.num_rows == 0 {
        return Err(RelicError::validation("num_rows must be >= 1"));
    }
    if sizes.is_empty() {
        return Err(RelicError::validation("cannot pack an empty image set"));
    }

    let count = sizes.len();
    let images_per_row = count.div_ceil(opts.num_rows as usize);

    let mut placements = Vec::with_capacity(count);
    let mut total_width: u64 = 0;
    let mut total_height: u64 = 0;

    for row in sizes.chunks(images_per_row) {
        let row_height = row.iter().map(|&(_, h)| u64::from(h)).max().unwrap_or(0);
        let mut cursor_x: u64 = 0;
        for &(w, h) in row {
            placements.push(Placement {
                x: cursor_x as u32,
                y: total_height as u32,
                w,
                h,
            });
            cursor_x += u64::from(w);
        }
        total_width = total_width.max(cursor_x);
        total_height += row_height;
    }

    if total_width > u64::from(opts.max_width) || total_height > u64::from(opts.max_height) {
        return Err(RelicError::packing_overflow(format!(
            "atlas {total_width}x{total_height} exceeds maximum {}x{}",
            opts.max_width, opts.max_height
        )));
    }

    Ok(Layout {
        width: total_width as u32,
        height: total_height as u32,
        placements,
    })
}

/// Pack physical bitmaps into one atlas, in the caller-provided order.
///
/// The returned [`Atlas`] carries the PNG-encoded canvas and one
/// [`AtlasFrame`] per input. Keys are expected to be canonical and
/// alias-resolved, so several logical assets may reference one frame through
/// their `source` field.
pub fn pack_atlas(images: &[InputImage], opts: &PackOptions) -> RelicResult<Atlas> {
    let sizes: Vec<(u32, u32)> = images
        .iter()
        .map(|i| (i.image.width(), i.image.height()))
        .collect();
    let layout = compute_layout(&sizes, opts)?;

    // RgbaImage::new zero-fills, which is fully transparent RGBA.
    let mut canvas = RgbaImage::new(layout.width, layout.height);
    let mut frames = std::collections::BTreeMap::new();

    for (input, place) in images.iter().zip(&layout.placements) {
        image::imageops::replace(
            &mut canvas,
            &input.image,
            i64::from(place.x),
            i64::from(place.y),
        );
        frames.insert(
            input.key.clone(),
            AtlasFrame {
                rect: FrameRect {
                    x: place.x,
                    y: place.y,
                    w: place.w,
                    h: place.h,
                },
                sprite_source_size: FrameRect {
                    x: 0,
                    y: 0,
                    w: place.w,
                    h: place.h,
                },
                source_size: FrameSize {
                    w: place.w,
                    h: place.h,
                },
                pivot: Pivot { x: 0.5, y: 0.5 },
            },
        );
    }

    let mut image_png = Vec::new();
    canvas
        .write_to(&mut Cursor::new(&mut image_png), image::ImageFormat::Png)
        .context("encode atlas png")?;

    Ok(Atlas {
        image_png,
        width: layout.width,
        height: layout.height,
        frames,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/atlas/pack.rs"]
mod tests;
