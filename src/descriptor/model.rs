//! Serde data model for the output descriptor document.
//!
//! The descriptor is the single JSON entry of a compiled bundle. It combines
//! the externally-supplied logic/visualization metadata (opaque values in
//! core) with the resolved asset table and the spritesheet frame map.

use std::collections::BTreeMap;

use crate::atlas::pack::{Atlas, FrameRect, FrameSize, Pivot};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// One logical asset: placement offsets, render flags, and an optional weak
/// reference to the physical asset whose pixels it reuses.
pub struct AssetRecord {
    /// Canonical key of the physical asset backing this alias; absent for
    /// physical assets themselves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Horizontal placement offset.
    pub x: i32,
    /// Vertical placement offset.
    pub y: i32,
    /// Mirror horizontally when drawing.
    #[serde(default, rename = "flipH", skip_serializing_if = "is_false")]
    pub flip_h: bool,
    /// Mirror vertically when drawing.
    #[serde(default, rename = "flipV", skip_serializing_if = "is_false")]
    pub flip_v: bool,
    /// Recolor through the item palette when drawing.
    #[serde(default, rename = "usesPalette", skip_serializing_if = "is_false")]
    pub uses_palette: bool,
}

fn is_false(v: &bool) -> bool {
    !*v
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// One frame of the spritesheet block, in the downstream client's format.
pub struct SpritesheetFrame {
    /// Placement rect within the atlas image.
    pub frame: FrameRect,
    /// Always false; the packer never rotates.
    pub rotated: bool,
    /// Always false; the packer never trims.
    pub trimmed: bool,
    /// Sub-rect of the original sprite (always the full sprite).
    pub sprite_source_size: FrameRect,
    /// Original sprite dimensions.
    pub source_size: FrameSize,
    /// Normalized pivot point.
    pub pivot: Pivot,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Spritesheet meta block naming the atlas image.
pub struct SpritesheetMeta {
    /// Atlas image entry name within the bundle.
    pub image: String,
    /// Pixel format label.
    pub format: String,
    /// Atlas dimensions.
    pub size: FrameSize,
    /// Scale label (the client expects a string).
    pub scale: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Spritesheet block: frame map plus meta.
pub struct Spritesheet {
    /// Frames keyed by canonical, alias-resolved name.
    pub frames: BTreeMap<String, SpritesheetFrame>,
    /// Meta block naming the atlas image.
    pub meta: SpritesheetMeta,
}

impl Spritesheet {
    /// Build the spritesheet block from a packed atlas.
    pub fn from_atlas(atlas: &Atlas, image_name: impl Into<String>) -> Self {
        let frames = atlas
            .frames
            .iter()
            .map(|(key, f)| {
                (
                    key.clone(),
                    SpritesheetFrame {
                        frame: f.rect,
                        rotated: false,
                        trimmed: false,
                        sprite_source_size: f.sprite_source_size,
                        source_size: f.source_size,
                        pivot: f.pivot,
                    },
                )
            })
            .collect();
        Self {
            frames,
            meta: SpritesheetMeta {
                image: image_name.into(),
                format: "RGBA8888".to_string(),
                size: FrameSize {
                    w: atlas.width,
                    h: atlas.height,
                },
                scale: "1".to_string(),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// The complete descriptor document serialized into the bundle's JSON entry.
pub struct Descriptor {
    /// Item name.
    pub name: String,
    /// Logic type label copied from the item metadata.
    pub logic_type: String,
    /// Visualization type label copied from the item metadata.
    pub visualization_type: String,
    /// Resolved asset table keyed by canonical name.
    pub assets: BTreeMap<String, AssetRecord>,
    /// Opaque logic metadata document.
    #[serde(default)]
    pub logic: serde_json::Value,
    /// Opaque visualization metadata documents.
    #[serde(default)]
    pub visualizations: Vec<serde_json::Value>,
    /// Spritesheet block for the packed atlas.
    pub spritesheet: Spritesheet,
}

#[cfg(test)]
#[path = "../../tests/unit/descriptor/model.rs"]
mod tests;
