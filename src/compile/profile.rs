//! Explicit per-category configuration.
//!
//! The asset categories share one compilation code path; everything that
//! historically diverged between them (atlas size budgets, row counts,
//! canonicalization flags, marker tokens) is data on this profile.

use crate::atlas::pack::PackOptions;

#[derive(Clone, Debug)]
/// Packing and canonicalization settings for one asset category.
pub struct CategoryProfile {
    /// Category label used in logs and CLI selection.
    pub name: String,
    /// Atlas row count.
    pub num_rows: u32,
    /// Maximum atlas width in pixels.
    pub max_width: u32,
    /// Maximum atlas height in pixels.
    pub max_height: u32,
    /// Collapse an immediately-repeated name prefix segment.
    pub collapse_repeated_prefix: bool,
    /// Club/variant marker tokens forced to uppercase in display names.
    pub uppercase_markers: Vec<String>,
}

impl CategoryProfile {
    /// Room furniture items: tall atlases, plain names.
    pub fn furniture() -> Self {
        Self {
            name: "furniture".to_string(),
            num_rows: 10,
            max_width: 7500,
            max_height: 12500,
            collapse_repeated_prefix: false,
            uppercase_markers: Vec::new(),
        }
    }

    /// Wardrobe/clothing items: wide atlases, doubled-prefix exports, and
    /// club/variant markers kept uppercase in display names.
    pub fn clothing() -> Self {
        Self {
            name: "clothing".to_string(),
            num_rows: 10,
            max_width: 10240,
            max_height: 7000,
            collapse_repeated_prefix: true,
            uppercase_markers: vec!["hc".to_string(), "ltd".to_string()],
        }
    }

    /// Pet items: wide atlases, doubled-prefix exports.
    pub fn pets() -> Self {
        Self {
            name: "pets".to_string(),
            num_rows: 10,
            max_width: 10240,
            max_height: 7000,
            collapse_repeated_prefix: true,
            uppercase_markers: Vec::new(),
        }
    }

    /// Avatar effect items: tall atlases, plain names.
    pub fn effects() -> Self {
        Self {
            name: "effects".to_string(),
            num_rows: 10,
            max_width: 7500,
            max_height: 12500,
            collapse_repeated_prefix: false,
            uppercase_markers: Vec::new(),
        }
    }

    /// Look up a built-in profile by category label.
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "furniture" => Some(Self::furniture()),
            "clothing" => Some(Self::clothing()),
            "pets" => Some(Self::pets()),
            "effects" => Some(Self::effects()),
            _ => None,
        }
    }

    /// Atlas layout options derived from this profile.
    pub fn pack_options(&self) -> PackOptions {
        PackOptions {
            num_rows: self.num_rows,
            max_width: self.max_width,
            max_height: self.max_height,
        }
    }

    /// Marker tokens as borrowed slices for the canonicalizer.
    pub fn marker_refs(&self) -> Vec<&str> {
        self.uppercase_markers.iter().map(String::as_str).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/profile.rs"]
mod tests;
