use super::*;

#[test]
fn reserves_id_zero_as_library_prefix() {
    let table = SymbolTable::parse(["0;mylib", "1;mylib_chair"]);
    assert_eq!(table.prefix(), Some("mylib"));
    assert!(table.get("0").is_none());
    assert_eq!(table.get("1").unwrap().len(), 1);
}

#[test]
fn first_id_zero_name_wins() {
    let table = SymbolTable::parse(["0;mylib", "0;otherlib"]);
    assert_eq!(table.prefix(), Some("mylib"));
}

#[test]
fn skips_reduced_size_duplicates() {
    let table = SymbolTable::parse(["4;mylib_chair_64_a", "5;mylib_chair_32_a"]);
    assert!(table.get("4").is_some());
    assert!(table.get("5").is_none());
}

#[test]
fn skips_non_image_export_rows() {
    let lines = [
        "2;mylib_manifest <= manifest export",
        "3;mylib_idx <= index export",
        "4;mylib_logic <= logic export",
        "5;mylib_vis <= visualization export",
        "6;mylib_assets <= assets export",
        "7;mylib_chair <= image export",
    ];
    let table = SymbolTable::parse(lines);
    assert_eq!(table.groups().len(), 1);
    assert!(table.get("7").is_some());
}

#[test]
fn tags_source_rows() {
    let table = SymbolTable::parse(["5;main_5 <= source", "5;alias_5"]);
    let names = table.get("5").unwrap();
    assert_eq!(names[0].tag, SymbolTag::Source);
    assert_eq!(names[1].tag, SymbolTag::Main);
}

#[test]
fn preserves_first_seen_order_and_drops_duplicates() {
    let table = SymbolTable::parse(["9;b", "9;a", "9;b", "9;c"]);
    let names: Vec<&str> = table.get("9").unwrap().iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, ["b", "a", "c"]);
}

#[test]
fn skips_malformed_rows() {
    let table = SymbolTable::parse(["no separator", ";empty_id", "8;", "", "  ", "8;ok"]);
    assert_eq!(table.groups().len(), 1);
    assert_eq!(table.get("8").unwrap()[0].name, "ok");
}

#[test]
fn physical_index_prefers_source_tag() {
    let table = SymbolTable::parse(["5;alias_5", "5;main_5 <= source"]);
    let names = table.get("5").unwrap();
    assert_eq!(SymbolTable::physical_index(names), 1);

    let untagged = SymbolTable::parse(["6;first", "6;second"]);
    assert_eq!(SymbolTable::physical_index(untagged.get("6").unwrap()), 0);
}
