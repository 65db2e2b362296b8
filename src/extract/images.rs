//! Maps resolved physical assets to their raw bitmap bytes, entirely in
//! memory. The decompiler names image files `{id}.png` when one id carries
//! several names, and `{id}_{name}.png` for single-name ids; this module
//! owns that convention so nothing downstream stages files to resolve names.

use std::collections::BTreeMap;

use tracing::warn;

use crate::descriptor::model::AssetRecord;
use crate::symbols::canon;
use crate::symbols::table::SymbolTable;

/// Collect canonical-key -> bitmap bytes for every physical asset.
///
/// Only assets present in `assets` with an empty `source` (physical assets
/// after resolution) are returned; aliases reuse their physical asset's
/// pixels at the data level and are never duplicated. Assets whose pixels
/// are missing from `images` are logged and dropped.
pub fn physical_image_bytes(
    table: &SymbolTable,
    collapse: bool,
    assets: &BTreeMap<String, AssetRecord>,
    images: &BTreeMap<String, Vec<u8>>,
) -> BTreeMap<String, Vec<u8>> {
    let mut out = BTreeMap::new();

    for (id, names) in table.groups() {
        let physical = &names[SymbolTable::physical_index(names)];
        let key = canon::canonical_key(&physical.name, table.prefix(), collapse);

        let is_physical = assets
            .get(&key)
            .is_some_and(|record| record.source.is_none());
        if !is_physical {
            continue;
        }

        // Shared ids store pixels under the bare id; single-name ids carry
        // the name in the stem. Accept either so a one-name export that
        // still used the shared convention resolves.
        let shared_stem = id.as_str();
        let named_stem = format!("{id}_{}", physical.name);
        let bytes = if names.len() >= 2 {
            images
                .get(shared_stem)
                .or_else(|| images.get(&named_stem))
        } else {
            images
                .get(&named_stem)
                .or_else(|| images.get(shared_stem))
        };

        match bytes {
            Some(bytes) => {
                out.insert(key, bytes.clone());
            }
            None => {
                warn!(%id, %key, "no bitmap found for physical asset");
            }
        }
    }

    out
}

#[cfg(test)]
#[path = "../../tests/unit/extract/images.rs"]
mod tests;
