//! Assigns each logical asset its physical pixel source.
//!
//! Resolution runs in three passes over the item's asset table: alias
//! assignment from the symbol groups, self-reference repair by prefix
//! search, and visited-set chain collapse. The table is threaded through
//! explicitly; nothing here touches state outside the maps it is handed.

use std::collections::{BTreeMap, HashSet};

use crate::descriptor::model::AssetRecord;
use crate::symbols::table::{SymbolName, SymbolTable};

/// Resolve every asset's `source` to its terminal physical key.
///
/// `groups` must hold canonicalized names (same transform as the asset
/// keys). Postconditions: alias assets point directly at their physical
/// asset's key; physical assets carry no source; on a reference cycle the
/// entries involved keep their original source values (resolution still
/// terminates).
pub fn resolve_sources(
    assets: &mut BTreeMap<String, AssetRecord>,
    groups: &BTreeMap<String, Vec<SymbolName>>,
) {
    assign_alias_sources(assets, groups);
    repair_self_references(assets);
    collapse_chains(assets);
}

/// Pass 1: for each id exporting several names, point every alias at the
/// group's physical name.
fn assign_alias_sources(
    assets: &mut BTreeMap<String, AssetRecord>,
    groups: &BTreeMap<String, Vec<SymbolName>>,
) {
    for names in groups.values() {
        if names.len() < 2 {
            continue;
        }
        let physical = &names[SymbolTable::physical_index(names)].name;
        for alias in names.iter().filter(|n| &n.name != physical) {
            if let Some(record) = assets.get_mut(&alias.name) {
                record.source = Some(physical.clone());
            }
        }
    }
}

/// Pass 2: an asset whose source names itself is unresolved; retarget it to
/// the lexicographically smallest sibling sharing its prefix up to the last
/// `_` segment, when one exists.
fn repair_self_references(assets: &mut BTreeMap<String, AssetRecord>) {
    let self_referencing: Vec<String> = assets
        .iter()
        .filter(|(key, record)| record.source.as_deref() == Some(key.as_str()))
        .map(|(key, _)| key.clone())
        .collect();

    for key in self_referencing {
        let Some(cut) = key.rfind('_') else {
            continue;
        };
        let prefix = &key[..=cut];
        let candidate = assets
            .keys()
            .filter(|k| *k != &key && k.starts_with(prefix))
            .min()
            .cloned();
        if let Some(candidate) = candidate {
            if let Some(record) = assets.get_mut(&key) {
                record.source = Some(candidate);
            }
        }
    }
}

/// Pass 3: follow source pointers to a terminal asset and rewrite each entry
/// to point at it directly. A visited set bounds every walk; detecting a
/// cycle stops the walk and leaves that entry's value unchanged.
fn collapse_chains(assets: &mut BTreeMap<String, AssetRecord>) {
    let keys: Vec<String> = assets.keys().cloned().collect();

    for key in keys {
        let mut visited: HashSet<&str> = HashSet::new();
        visited.insert(key.as_str());

        let mut current = key.as_str();
        let terminal = loop {
            let next = assets.get(current).and_then(|r| r.source.as_deref());
            match next {
                None => break Some(current),
                Some(next) if next.is_empty() || next == current => break Some(current),
                Some(next) => {
                    if visited.contains(next) {
                        break None;
                    }
                    if !assets.contains_key(next) {
                        // Dangling reference; the pointee is the best
                        // terminal we can name.
                        break Some(next);
                    }
                    visited.insert(next);
                    current = next;
                }
            }
        };

        let Some(terminal) = terminal else {
            continue;
        };
        let terminal = terminal.to_string();
        if let Some(record) = assets.get_mut(&key) {
            record.source = if terminal == key { None } else { Some(terminal) };
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/resolve/sources.rs"]
mod tests;
