//! Bit-exact encode/decode of the bundle container.
//!
//! Wire format, all integers big-endian:
//!
//! ```text
//! u16 entry count
//! per entry:
//!   u16 name byte length
//!   name bytes (UTF-8, no terminator)
//!   u32 compressed payload length
//!   compressed payload (independent zlib stream)
//! ```
//!
//! Every declared length is validated against the remaining buffer before it
//! is read, so truncated or corrupt input fails with
//! [`RelicError::MalformedBundle`] instead of reading out of bounds.

use std::io::{Read, Write};

use anyhow::Context;
use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use tracing::warn;

use crate::foundation::error::{RelicError, RelicResult};

#[derive(Clone, Debug, PartialEq, Eq)]
/// One named payload within a bundle.
pub struct BundleEntry {
    /// Entry name (by convention `<item>.json` or the atlas image name).
    pub name: String,
    /// Uncompressed payload bytes.
    pub payload: Vec<u8>,
}

/// Encode entries into bundle bytes, in the given order.
///
/// Bounds are validated before any bytes are written: the entry count must
/// fit `u16`, each name's UTF-8 byte length must fit `u16`, and each
/// compressed payload length must fit `u32`.
pub fn encode(entries: &[BundleEntry]) -> RelicResult<Vec<u8>> {
    let count = u16::try_from(entries.len()).map_err(|_| {
        RelicError::validation(format!("bundle entry count {} exceeds u16", entries.len()))
    })?;

    let mut compressed = Vec::with_capacity(entries.len());
    for entry in entries {
        if u16::try_from(entry.name.len()).is_err() {
            return Err(RelicError::validation(format!(
                "entry name length {} exceeds u16",
                entry.name.len()
            )));
        }
        let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
        enc.write_all(&entry.payload)
            .with_context(|| format!("compress bundle entry '{}'", entry.name))?;
        let bytes = enc
            .finish()
            .with_context(|| format!("finish compressing bundle entry '{}'", entry.name))?;
        if u32::try_from(bytes.len()).is_err() {
            return Err(RelicError::validation(format!(
                "compressed payload of '{}' exceeds u32",
                entry.name
            )));
        }
        compressed.push(bytes);
    }

    let mut out = Vec::new();
    out.extend_from_slice(&count.to_be_bytes());
    for (entry, bytes) in entries.iter().zip(&compressed) {
        out.extend_from_slice(&(entry.name.len() as u16).to_be_bytes());
        out.extend_from_slice(entry.name.as_bytes());
        out.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
        out.extend_from_slice(bytes);
    }
    Ok(out)
}

/// Decode bundle bytes back into entries.
///
/// Structural faults (length fields overrunning the buffer, non-UTF-8 names)
/// fail the whole decode with [`RelicError::MalformedBundle`]. An entry
/// whose payload fails to inflate is logged and skipped; the remaining
/// entries still decode.
pub fn decode(bytes: &[u8]) -> RelicResult<Vec<BundleEntry>> {
    let mut reader = Reader { buf: bytes, pos: 0 };
    let count = reader.u16_be("entry count")?;

    let mut entries = Vec::with_capacity(usize::from(count));
    for idx in 0..count {
        let name_len = reader.u16_be("name length")?;
        let name_bytes = reader.take(usize::from(name_len), "name bytes")?;
        let name = std::str::from_utf8(name_bytes)
            .map_err(|_| {
                RelicError::malformed_bundle(format!("entry {idx} name is not valid UTF-8"))
            })?
            .to_string();

        let payload_len = reader.u32_be("payload length")?;
        let compressed = reader.take(payload_len as usize, "payload bytes")?;

        let payload = if compressed.is_empty() {
            Vec::new()
        } else {
            let mut out = Vec::new();
            match ZlibDecoder::new(compressed).read_to_end(&mut out) {
                Ok(_) => out,
                Err(err) => {
                    warn!(%name, %err, "skipping bundle entry with bad payload stream");
                    continue;
                }
            }
        };

        entries.push(BundleEntry { name, payload });
    }

    Ok(entries)
}

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize, what: &str) -> RelicResult<&'a [u8]> {
        let remaining = self.buf.len() - self.pos;
        if n > remaining {
            return Err(RelicError::malformed_bundle(format!(
                "{what}: need {n} bytes, {remaining} remaining at offset {}",
                self.pos
            )));
        }
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    fn u16_be(&mut self, what: &str) -> RelicResult<u16> {
        let b = self.take(2, what)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn u32_be(&mut self, what: &str) -> RelicResult<u32> {
        let b = self.take(4, what)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bundle/codec.rs"]
mod tests;
