//! Parses the decompiler's symbol export into an id -> names multimap.
//!
//! The export is one row per exported symbol, `id;name[ <= comment]`. A
//! single id may carry several names when the decompiler found multiple
//! logical assets backed by the same pixels; the Source-tagged name (or the
//! first listed, absent one) identifies the physical image and the rest are
//! aliases.

use std::collections::BTreeMap;

use tracing::warn;

/// Separator between the exported name and its trailing comment.
const COMMENT_SEP: &str = " <= ";

/// Reserved id whose first name is the document/library prefix.
const PREFIX_ID: &str = "0";

/// Row-exclusion predicates, evaluated once per parsed row.
enum ExcludeRule {
    /// Skip rows whose name contains this infix.
    NameInfix(&'static str),
    /// Skip rows whose comment contains this word.
    CommentWord(&'static str),
}

/// Reduced-size duplicates and non-image export rows never become assets.
const EXCLUDE_RULES: &[ExcludeRule] = &[
    ExcludeRule::NameInfix("_32_"),
    ExcludeRule::CommentWord("manifest"),
    ExcludeRule::CommentWord("assets"),
    ExcludeRule::CommentWord("logic"),
    ExcludeRule::CommentWord("visualization"),
    ExcludeRule::CommentWord("index"),
];

impl ExcludeRule {
    fn matches(&self, name: &str, comment: &str) -> bool {
        match self {
            ExcludeRule::NameInfix(infix) => name.contains(infix),
            ExcludeRule::CommentWord(word) => comment.contains(word),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Role of an exported name within its id group.
pub enum SymbolTag {
    /// Ordinary export row; an alias when a Source-tagged sibling exists.
    #[default]
    Main,
    /// The row marked as the physical pixel source for its id.
    Source,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// One exported name with its role tag.
pub struct SymbolName {
    /// Raw exported name (canonicalization happens downstream).
    pub name: String,
    /// Role within the id group.
    pub tag: SymbolTag,
}

#[derive(Clone, Debug, Default)]
/// Immutable id -> names multimap built once per decompiled item.
pub struct SymbolTable {
    prefix: Option<String>,
    groups: BTreeMap<String, Vec<SymbolName>>,
}

impl SymbolTable {
    /// Parse symbol export lines into a table.
    ///
    /// Rows are filtered through the exclusion rules; malformed rows are
    /// skipped with a warning. The first name seen for id `"0"` is reserved
    /// as the library prefix and never becomes an image id. Within one id,
    /// first-seen name order is preserved and duplicate names are dropped.
    pub fn parse<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::default();

        for line in lines {
            let line = line.as_ref().trim();
            if line.is_empty() {
                continue;
            }

            let Some((id, rest)) = line.split_once(';') else {
                warn!(line, "skipping malformed symbol row (no separator)");
                continue;
            };
            let id = id.trim();
            let (name, comment) = match rest.split_once(COMMENT_SEP) {
                Some((name, comment)) => (name.trim(), comment.trim()),
                None => (rest.trim(), ""),
            };
            if id.is_empty() || name.is_empty() {
                warn!(line, "skipping malformed symbol row (empty id or name)");
                continue;
            }

            if id == PREFIX_ID {
                if table.prefix.is_none() {
                    table.prefix = Some(name.to_string());
                }
                continue;
            }

            if EXCLUDE_RULES.iter().any(|r| r.matches(name, comment)) {
                continue;
            }

            let tag = if comment.contains("source") {
                SymbolTag::Source
            } else {
                SymbolTag::Main
            };

            let group = table.groups.entry(id.to_string()).or_default();
            if group.iter().any(|n| n.name == name) {
                continue;
            }
            group.push(SymbolName {
                name: name.to_string(),
                tag,
            });
        }

        table
    }

    /// Document/library prefix taken from the reserved id `"0"` row, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// All id groups in id order.
    pub fn groups(&self) -> &BTreeMap<String, Vec<SymbolName>> {
        &self.groups
    }

    /// Names exported for one id, in first-seen order.
    pub fn get(&self, id: &str) -> Option<&[SymbolName]> {
        self.groups.get(id).map(Vec::as_slice)
    }

    /// Index of the physical name within a group: the Source-tagged entry,
    /// or the first listed when none is tagged.
    pub fn physical_index(names: &[SymbolName]) -> usize {
        names
            .iter()
            .position(|n| n.tag == SymbolTag::Source)
            .unwrap_or(0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/symbols/table.rs"]
mod tests;
