//! Narrow interface to the decompiler collaborator.
//!
//! The decompiler itself is out of core scope: it is modeled as anything
//! that can produce symbol lines, raw images, and metadata documents for an
//! item. [`DirectoryExtractor`] consumes a directory that already holds that
//! layout; [`ProcessExtractor`] runs an external tool (with a forced-kill
//! timeout policy) and then reads what it wrote.
//!
//! Extracted directory layout:
//!
//! ```text
//! <dir>/symbols.csv          required  `id;name[ <= comment]` lines
//! <dir>/assets.json          required  map of raw name -> asset record
//! <dir>/index.json           optional  item metadata (name/logicType/...)
//! <dir>/logic.json           optional  opaque logic document
//! <dir>/visualization.json   optional  opaque visualization document(s)
//! <dir>/images/*.png         raw bitmaps, `{id}.png` or `{id}_{name}.png`
//! ```

use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::Context;
use tracing::debug;

use crate::descriptor::model::AssetRecord;
use crate::foundation::error::{RelicError, RelicResult};

#[derive(Clone, Debug, Default)]
/// Metadata documents extracted alongside the images.
///
/// Index/logic/visualization are opaque to the core pipeline (their
/// field mapping is a pure DTO concern of the collaborator); only the asset
/// records are interpreted.
pub struct DescriptorDocs {
    /// Item metadata document (name, logic/visualization type labels).
    pub index: Option<serde_json::Value>,
    /// Opaque logic document.
    pub logic: Option<serde_json::Value>,
    /// Opaque visualization document (object or array).
    pub visualization: Option<serde_json::Value>,
    /// Per-asset records keyed by raw exported name.
    pub assets: BTreeMap<String, AssetRecord>,
}

#[derive(Clone, Debug, Default)]
/// Everything the pipeline needs for one item, fully in memory.
pub struct ExtractOutput {
    /// Symbol export lines (`id;name[ <= comment]`).
    pub symbol_lines: Vec<String>,
    /// Raw image bytes keyed by file stem (`{id}` or `{id}_{name}`).
    pub images: BTreeMap<String, Vec<u8>>,
    /// Metadata documents.
    pub documents: DescriptorDocs,
}

/// The decompiler collaborator seam.
pub trait Extractor {
    /// Produce the extraction output for `source`, using `out_dir` for any
    /// intermediate files the implementation needs.
    fn extract(&self, source: &Path, out_dir: &Path) -> RelicResult<ExtractOutput>;
}

/// Read an already-extracted item directory into memory.
pub fn read_extracted_dir(dir: &Path) -> RelicResult<ExtractOutput> {
    let symbols_path = dir.join("symbols.csv");
    let symbol_text = std::fs::read_to_string(&symbols_path).map_err(|_| {
        RelicError::missing_descriptor(format!("symbol export '{}'", symbols_path.display()))
    })?;
    let symbol_lines: Vec<String> = symbol_text.lines().map(str::to_string).collect();

    let assets_path = dir.join("assets.json");
    let assets_text = std::fs::read(&assets_path).map_err(|_| {
        RelicError::missing_descriptor(format!("assets document '{}'", assets_path.display()))
    })?;
    let assets: BTreeMap<String, AssetRecord> = serde_json::from_slice(&assets_text)
        .map_err(|e| RelicError::decode_failure(format!("assets document: {e}")))?;

    let documents = DescriptorDocs {
        index: read_optional_json(&dir.join("index.json"))?,
        logic: read_optional_json(&dir.join("logic.json"))?,
        visualization: read_optional_json(&dir.join("visualization.json"))?,
        assets,
    };

    let mut images = BTreeMap::new();
    let images_dir = dir.join("images");
    if let Ok(rd) = std::fs::read_dir(&images_dir) {
        for entry in rd.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("png") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let bytes = std::fs::read(&path)
                .with_context(|| format!("read image '{}'", path.display()))?;
            images.insert(stem.to_string(), bytes);
        }
    }
    debug!(
        dir = %dir.display(),
        images = images.len(),
        symbols = symbol_lines.len(),
        "read extracted item"
    );

    Ok(ExtractOutput {
        symbol_lines,
        images,
        documents,
    })
}

fn read_optional_json(path: &Path) -> RelicResult<Option<serde_json::Value>> {
    match std::fs::read(path) {
        Ok(bytes) => {
            let value = serde_json::from_slice(&bytes)
                .map_err(|e| RelicError::decode_failure(format!("{}: {e}", path.display())))?;
            Ok(Some(value))
        }
        Err(_) => Ok(None),
    }
}

#[derive(Clone, Debug, Default)]
/// Extractor over items that are already decompiled on disk.
pub struct DirectoryExtractor;

impl Extractor for DirectoryExtractor {
    fn extract(&self, source: &Path, _out_dir: &Path) -> RelicResult<ExtractOutput> {
        read_extracted_dir(source)
    }
}

#[derive(Clone, Debug)]
/// Extractor that runs the external decompiler binary.
///
/// The tool is invoked as `program [args..] <source> <out_dir>` and must
/// populate `out_dir` with the extracted layout. A run exceeding `timeout`
/// is force-killed; failures surface as [`RelicError::ExternalTool`].
pub struct ProcessExtractor {
    /// Decompiler executable.
    pub program: PathBuf,
    /// Extra arguments placed before the source/out paths.
    pub args: Vec<String>,
    /// Wall-clock budget for one extraction.
    pub timeout: Duration,
}

impl ProcessExtractor {
    /// Extractor for `program` with a default 60 second budget.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: Duration::from_secs(60),
        }
    }

    fn run(&self, source: &Path, out_dir: &Path) -> RelicResult<()> {
        std::fs::create_dir_all(out_dir)
            .with_context(|| format!("create extraction dir '{}'", out_dir.display()))?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(source)
            .arg(out_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                RelicError::external_tool(format!(
                    "failed to spawn '{}': {e}",
                    self.program.display()
                ))
            })?;

        let mut stderr = child.stderr.take().ok_or_else(|| {
            RelicError::external_tool("failed to open decompiler stderr (unexpected)")
        })?;
        let stderr_drain = std::thread::spawn(move || {
            let mut bytes = Vec::new();
            let _ = stderr.read_to_end(&mut bytes);
            bytes
        });

        let started = Instant::now();
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if started.elapsed() > self.timeout {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(RelicError::external_tool(format!(
                            "'{}' timed out after {:?} on '{}'",
                            self.program.display(),
                            self.timeout,
                            source.display()
                        )));
                    }
                    std::thread::sleep(Duration::from_millis(50));
                }
                Err(e) => {
                    return Err(RelicError::external_tool(format!(
                        "failed to wait for '{}': {e}",
                        self.program.display()
                    )));
                }
            }
        };

        let stderr_bytes = stderr_drain.join().unwrap_or_default();
        if !status.success() {
            return Err(RelicError::external_tool(format!(
                "'{}' exited with {status} on '{}': {}",
                self.program.display(),
                source.display(),
                String::from_utf8_lossy(&stderr_bytes).trim()
            )));
        }
        Ok(())
    }
}

impl Extractor for ProcessExtractor {
    fn extract(&self, source: &Path, out_dir: &Path) -> RelicResult<ExtractOutput> {
        self.run(source, out_dir)?;
        read_extracted_dir(out_dir)
    }
}
