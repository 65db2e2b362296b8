use super::*;

#[test]
fn strips_exactly_one_prefix_occurrence() {
    assert_eq!(strip_library_prefix("lib_chair_a", "lib"), "chair_a");
    assert_eq!(strip_library_prefix("lib_lib_chair", "lib"), "lib_chair");
}

#[test]
fn prefix_strip_is_case_insensitive() {
    assert_eq!(strip_library_prefix("LIB_chair", "lib"), "chair");
    assert_eq!(strip_library_prefix("Lib_chair", "LIB"), "chair");
}

#[test]
fn unrelated_names_are_unchanged() {
    assert_eq!(strip_library_prefix("library_chair", "lib"), "library_chair");
    assert_eq!(strip_library_prefix("chair_lib", "lib"), "chair_lib");
    assert_eq!(strip_library_prefix("lib", "lib"), "lib");
    assert_eq!(strip_library_prefix("lib_", "lib"), "lib_");
    assert_eq!(strip_library_prefix("chair", ""), "chair");
}

#[test]
fn collapses_immediately_repeated_head_segment() {
    assert_eq!(collapse_repeated_prefix("a_a_b"), "a_b");
    assert_eq!(collapse_repeated_prefix("shirt_shirt_red"), "shirt_red");
}

#[test]
fn collapse_leaves_other_shapes_alone() {
    assert_eq!(collapse_repeated_prefix("a_b_a"), "a_b_a");
    assert_eq!(collapse_repeated_prefix("a_b"), "a_b");
    assert_eq!(collapse_repeated_prefix("a"), "a");
    assert_eq!(collapse_repeated_prefix("_a_b"), "_a_b");
}

#[test]
fn markers_uppercase_as_whole_segments_only() {
    assert_eq!(
        uppercase_markers("shirt_hc_red", &["hc", "ltd"]),
        "shirt_HC_red"
    );
    assert_eq!(uppercase_markers("ltd_shirt", &["hc", "ltd"]), "LTD_shirt");
    assert_eq!(
        uppercase_markers("chccoat_red", &["hc"]),
        "chccoat_red"
    );
}

#[test]
fn file_stem_is_lowercase_underscored() {
    assert_eq!(file_stem("My Item-Name"), "my_item_name");
    assert_eq!(file_stem("chair_A1"), "chair_a1");
    assert_eq!(file_stem("a  b"), "a_b");
    assert_eq!(file_stem("weird!name"), "weirdname");
    assert_eq!(file_stem("_pad_"), "pad");
}

#[test]
fn canonical_key_strips_and_lowercases() {
    assert_eq!(canonical_key("LIB_Chair_A", Some("lib"), false), "chair_a");
    assert_eq!(canonical_key("Chair_A", None, false), "chair_a");
}

#[test]
fn canonical_key_collapse_is_opt_in() {
    assert_eq!(canonical_key("lib_sh_sh_x", Some("lib"), true), "sh_x");
    assert_eq!(canonical_key("lib_sh_sh_x", Some("lib"), false), "sh_sh_x");
}
