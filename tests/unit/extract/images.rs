use super::*;

use crate::descriptor::model::AssetRecord;

fn assets(entries: &[(&str, Option<&str>)]) -> BTreeMap<String, AssetRecord> {
    entries
        .iter()
        .map(|(key, source)| {
            (
                key.to_string(),
                AssetRecord {
                    source: source.map(str::to_string),
                    ..AssetRecord::default()
                },
            )
        })
        .collect()
}

#[test]
fn shared_id_reads_pixels_from_the_bare_id_stem() {
    let table = SymbolTable::parse(["0;mylib", "5;mylib_main_5 <= source", "5;mylib_alias_5"]);
    let assets = assets(&[("main_5", None), ("alias_5", Some("main_5"))]);

    let mut images = BTreeMap::new();
    images.insert("5".to_string(), vec![1u8, 2, 3]);

    let out = physical_image_bytes(&table, false, &assets, &images);
    assert_eq!(out.len(), 1);
    assert_eq!(out["main_5"], vec![1, 2, 3]);
}

#[test]
fn single_name_id_reads_pixels_from_the_named_stem() {
    let table = SymbolTable::parse(["0;mylib", "7;mylib_solo"]);
    let assets = assets(&[("solo", None)]);

    let mut images = BTreeMap::new();
    images.insert("7_mylib_solo".to_string(), vec![9u8]);

    let out = physical_image_bytes(&table, false, &assets, &images);
    assert_eq!(out["solo"], vec![9]);
}

#[test]
fn aliases_are_never_duplicated_as_pixels() {
    let table = SymbolTable::parse(["0;mylib", "5;mylib_main_5 <= source", "5;mylib_alias_5"]);
    let assets = assets(&[("main_5", None), ("alias_5", Some("main_5"))]);

    let mut images = BTreeMap::new();
    images.insert("5".to_string(), vec![1u8]);

    let out = physical_image_bytes(&table, false, &assets, &images);
    assert!(!out.contains_key("alias_5"));
}

#[test]
fn missing_bitmaps_are_dropped() {
    let table = SymbolTable::parse(["0;mylib", "7;mylib_solo"]);
    let assets = assets(&[("solo", None)]);

    let out = physical_image_bytes(&table, false, &assets, &BTreeMap::new());
    assert!(out.is_empty());
}

#[test]
fn assets_absent_from_the_descriptor_are_ignored() {
    let table = SymbolTable::parse(["0;mylib", "7;mylib_ghost"]);

    let mut images = BTreeMap::new();
    images.insert("7_mylib_ghost".to_string(), vec![1u8]);

    let out = physical_image_bytes(&table, false, &assets(&[]), &images);
    assert!(out.is_empty());
}
