//! Convention layer over decoded bundles.
//!
//! The wire format places no limit on entries, but a compiled bundle holds
//! at most one `.json` entry (the asset descriptor) and at most one other
//! entry (the atlas image). A per-entry parse or image-decode failure is
//! logged and that entry skipped; the rest of the bundle still opens.

use tracing::warn;

use crate::bundle::codec;
use crate::descriptor::model::Descriptor;
use crate::foundation::error::RelicResult;

#[derive(Clone, Debug)]
/// The atlas image entry of a bundle, kept as raw decoded bytes.
pub struct RawImageEntry {
    /// Entry name within the bundle.
    pub name: String,
    /// Decoded (decompressed) image file bytes.
    pub bytes: Vec<u8>,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

#[derive(Clone, Debug, Default)]
/// Parsed contents of a bundle under the descriptor + atlas convention.
pub struct BundleContents {
    /// The parsed `.json` descriptor entry, if present and valid.
    pub descriptor: Option<Descriptor>,
    /// The atlas image entry, if present and valid.
    pub atlas_image: Option<RawImageEntry>,
}

/// Decode bundle bytes and split them into descriptor + atlas image.
///
/// Structural faults in the container itself still fail the call (see
/// [`codec::decode`]); failures inside individual entries are isolated.
pub fn open_bundle(bytes: &[u8]) -> RelicResult<BundleContents> {
    let entries = codec::decode(bytes)?;
    let mut contents = BundleContents::default();

    for entry in entries {
        if entry.name.ends_with(".json") {
            if contents.descriptor.is_some() {
                warn!(name = %entry.name, "ignoring extra descriptor entry");
                continue;
            }
            match serde_json::from_slice::<Descriptor>(&entry.payload) {
                Ok(descriptor) => contents.descriptor = Some(descriptor),
                Err(err) => {
                    warn!(name = %entry.name, %err, "skipping unparsable descriptor entry");
                }
            }
        } else {
            if contents.atlas_image.is_some() {
                warn!(name = %entry.name, "ignoring extra image entry");
                continue;
            }
            match image::load_from_memory(&entry.payload) {
                Ok(decoded) => {
                    contents.atlas_image = Some(RawImageEntry {
                        name: entry.name,
                        width: decoded.width(),
                        height: decoded.height(),
                        bytes: entry.payload,
                    });
                }
                Err(err) => {
                    warn!(name = %entry.name, %err, "skipping undecodable image entry");
                }
            }
        }
    }

    Ok(contents)
}

#[cfg(test)]
#[path = "../../tests/unit/bundle/open.rs"]
mod tests;
