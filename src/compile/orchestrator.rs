//! Sequences the compilation pipeline per item and runs items in parallel.
//!
//! Within one item: extract, then symbol loading and metadata assembly
//! concurrently, then resolve -> load physical bitmaps -> pack -> assemble
//! descriptor -> encode bundle -> persist. Across items: a bounded rayon
//! pool (~80% of available parallelism) maps independent items; a failing
//! item is caught, logged, and excluded from the success count while the
//! batch continues. All per-item state lives in the item's own pipeline
//! context so concurrent items never share mutable state.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use rayon::prelude::*;
use tracing::{debug, error, info, warn};

use crate::atlas::pack::{InputImage, pack_atlas};
use crate::bundle::codec::{self, BundleEntry};
use crate::compile::profile::CategoryProfile;
use crate::descriptor::model::{AssetRecord, Descriptor, Spritesheet};
use crate::extract::images::physical_image_bytes;
use crate::extract::interface::{DescriptorDocs, Extractor};
use crate::foundation::error::{RelicError, RelicResult};
use crate::resolve::sources::resolve_sources;
use crate::symbols::canon;
use crate::symbols::table::{SymbolName, SymbolTable};

#[derive(Clone, Debug)]
/// One unit of compilation work.
pub struct CompileItem {
    /// Item name; also the stem of the output bundle file.
    pub name: String,
    /// Input for the extractor: the source animation file, or an
    /// already-extracted directory.
    pub source: PathBuf,
}

#[derive(Clone, Debug)]
/// Batch-level options.
pub struct CompileOptions {
    /// Directory receiving compiled bundles.
    pub out_dir: PathBuf,
    /// Category profile applied to every item in the batch.
    pub profile: CategoryProfile,
    /// Override worker thread count (defaults to ~80% of hardware
    /// parallelism, minimum 1).
    pub threads: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Why an item was skipped without error.
pub enum SkipReason {
    /// A bundle for this item already exists; recompilation is idempotent
    /// by skip, not overwrite.
    OutputExists,
    /// No usable images remained after exclusion filtering and resolution.
    NoUsableImages,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Result of compiling one item.
pub enum CompileOutcome {
    /// Bundle written to the given path.
    Written(PathBuf),
    /// Item skipped; see the reason.
    Skipped(SkipReason),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Aggregated batch counters.
pub struct CompileStats {
    /// Total items in the batch.
    pub items_total: u64,
    /// Items whose bundle was written.
    pub items_compiled: u64,
    /// Items skipped (pre-existing output, missing inputs, nothing to pack,
    /// or atlas overflow).
    pub items_skipped: u64,
    /// Items that failed with an unexpected error.
    pub items_failed: u64,
}

/// Default worker count: ~80% of available hardware parallelism, minimum 1.
pub fn default_worker_threads() -> usize {
    let available = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    (available * 4 / 5).max(1)
}

/// Compile every item with a bounded worker pool and report counters.
///
/// Item failures are isolated: a failure (or skip) in one item never blocks
/// the rest of the batch.
pub fn compile_batch(
    items: &[CompileItem],
    extractor: &(dyn Extractor + Sync),
    opts: &CompileOptions,
) -> RelicResult<CompileStats> {
    let pool = build_worker_pool(opts.threads)?;
    let results: Vec<RelicResult<CompileOutcome>> = pool.install(|| {
        items
            .par_iter()
            .map(|item| compile_item(item, extractor, &opts.profile, &opts.out_dir))
            .collect()
    });

    let mut stats = CompileStats {
        items_total: items.len() as u64,
        ..CompileStats::default()
    };
    for (item, result) in items.iter().zip(results) {
        match result {
            Ok(CompileOutcome::Written(path)) => {
                stats.items_compiled += 1;
                debug!(item = %item.name, path = %path.display(), "bundle written");
            }
            Ok(CompileOutcome::Skipped(reason)) => {
                stats.items_skipped += 1;
                info!(item = %item.name, ?reason, "item skipped");
            }
            Err(err @ (RelicError::MissingDescriptor(_) | RelicError::PackingOverflow(_))) => {
                stats.items_skipped += 1;
                warn!(item = %item.name, %err, "item skipped");
            }
            Err(err) => {
                stats.items_failed += 1;
                error!(item = %item.name, %err, "item failed");
            }
        }
    }

    info!(
        total = stats.items_total,
        compiled = stats.items_compiled,
        skipped = stats.items_skipped,
        failed = stats.items_failed,
        "batch finished"
    );
    Ok(stats)
}

/// Compile one item end to end.
#[tracing::instrument(skip_all, fields(item = %item.name))]
pub fn compile_item(
    item: &CompileItem,
    extractor: &dyn Extractor,
    profile: &CategoryProfile,
    out_dir: &Path,
) -> RelicResult<CompileOutcome> {
    let stem = canon::file_stem(&item.name);
    if stem.is_empty() {
        return Err(RelicError::validation(format!(
            "item name '{}' yields an empty file stem",
            item.name
        )));
    }
    let out_path = out_dir.join(format!("{stem}.rpk"));
    if out_path.exists() {
        return Ok(CompileOutcome::Skipped(SkipReason::OutputExists));
    }

    let work_dir = std::env::temp_dir().join(format!("relicpack_{}_{stem}", std::process::id()));
    let _work_guard = ScratchDirGuard(work_dir.clone());
    let extracted = extractor.extract(&item.source, &work_dir)?;

    // The descriptor needs both halves, so load symbols and assemble the
    // delegated metadata side by side and join before resolution.
    let (symbols, metadata) = rayon::join(
        || load_symbols(&extracted.symbol_lines, profile),
        || ItemMetadata::from_docs(&item.name, &extracted.documents),
    );
    let (table, groups) = symbols;

    let mut assets = canonicalize_asset_keys(&extracted.documents, &table, profile);
    resolve_sources(&mut assets, &groups);

    let bitmaps = physical_image_bytes(
        &table,
        profile.collapse_repeated_prefix,
        &assets,
        &extracted.images,
    );
    if bitmaps.is_empty() {
        return Ok(CompileOutcome::Skipped(SkipReason::NoUsableImages));
    }

    let mut inputs = Vec::with_capacity(bitmaps.len());
    for (key, bytes) in &bitmaps {
        let decoded = image::load_from_memory(bytes)
            .with_context(|| format!("decode bitmap for '{key}'"))?;
        inputs.push(InputImage {
            key: key.clone(),
            image: decoded.to_rgba8(),
        });
    }

    let atlas = pack_atlas(&inputs, &profile.pack_options())?;

    let image_name = format!("{stem}.png");
    let descriptor = Descriptor {
        name: canon::uppercase_markers(&metadata.name, &profile.marker_refs()),
        logic_type: metadata.logic_type,
        visualization_type: metadata.visualization_type,
        assets,
        logic: metadata.logic,
        visualizations: metadata.visualizations,
        spritesheet: Spritesheet::from_atlas(&atlas, &image_name),
    };

    let entries = vec![
        BundleEntry {
            name: format!("{stem}.json"),
            payload: serde_json::to_vec(&descriptor).context("serialize descriptor")?,
        },
        BundleEntry {
            name: image_name,
            payload: atlas.image_png,
        },
    ];
    let bytes = codec::encode(&entries)?;

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("create output dir '{}'", out_dir.display()))?;
    std::fs::write(&out_path, &bytes)
        .with_context(|| format!("write bundle '{}'", out_path.display()))?;

    info!(
        path = %out_path.display(),
        frames = descriptor.spritesheet.frames.len(),
        atlas_w = atlas.width,
        atlas_h = atlas.height,
        "compiled item"
    );
    Ok(CompileOutcome::Written(out_path))
}

/// Parse the symbol export and canonicalize every exported name.
fn load_symbols(
    lines: &[String],
    profile: &CategoryProfile,
) -> (SymbolTable, BTreeMap<String, Vec<SymbolName>>) {
    let table = SymbolTable::parse(lines);

    let mut groups = BTreeMap::new();
    for (id, names) in table.groups() {
        let mut canonical: Vec<SymbolName> = Vec::with_capacity(names.len());
        for n in names {
            let key =
                canon::canonical_key(&n.name, table.prefix(), profile.collapse_repeated_prefix);
            if canonical.iter().any(|c| c.name == key) {
                continue;
            }
            canonical.push(SymbolName { name: key, tag: n.tag });
        }
        groups.insert(id.clone(), canonical);
    }
    (table, groups)
}

/// Canonicalize descriptor asset keys (and their source references),
/// keeping the first record on a case-insensitive collision.
fn canonicalize_asset_keys(
    docs: &DescriptorDocs,
    table: &SymbolTable,
    profile: &CategoryProfile,
) -> BTreeMap<String, AssetRecord> {
    let mut assets = BTreeMap::new();
    for (raw, record) in &docs.assets {
        let key = canon::canonical_key(raw, table.prefix(), profile.collapse_repeated_prefix);
        let mut record = record.clone();
        record.source = record
            .source
            .take()
            .filter(|s| !s.is_empty())
            .map(|s| canon::canonical_key(&s, table.prefix(), profile.collapse_repeated_prefix));
        match assets.entry(key) {
            std::collections::btree_map::Entry::Vacant(e) => {
                e.insert(record);
            }
            std::collections::btree_map::Entry::Occupied(e) => {
                warn!(key = %e.key(), raw = %raw, "duplicate asset key after canonicalization");
            }
        }
    }
    assets
}

/// Metadata fields assembled from the delegated documents.
struct ItemMetadata {
    name: String,
    logic_type: String,
    visualization_type: String,
    logic: serde_json::Value,
    visualizations: Vec<serde_json::Value>,
}

impl ItemMetadata {
    fn from_docs(item_name: &str, docs: &DescriptorDocs) -> Self {
        let index = docs.index.as_ref();
        let str_field = |field: &str| {
            index
                .and_then(|v| v.get(field))
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };

        let name = match str_field("name") {
            n if n.is_empty() => item_name.to_string(),
            n => n,
        };
        let visualizations = match docs.visualization.clone() {
            Some(serde_json::Value::Array(items)) => items,
            Some(value) => vec![value],
            None => Vec::new(),
        };

        Self {
            name,
            logic_type: str_field("logicType"),
            visualization_type: str_field("visualizationType"),
            logic: docs.logic.clone().unwrap_or(serde_json::Value::Null),
            visualizations,
        }
    }
}

fn build_worker_pool(threads: Option<usize>) -> RelicResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(RelicError::validation(
            "compile 'threads' must be >= 1 when set",
        ));
    }

    rayon::ThreadPoolBuilder::new()
        .num_threads(threads.unwrap_or_else(default_worker_threads))
        .build()
        .map_err(|e| RelicError::validation(format!("failed to build worker pool: {e}")))
}

struct ScratchDirGuard(PathBuf);

impl Drop for ScratchDirGuard {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/orchestrator.rs"]
mod tests;
