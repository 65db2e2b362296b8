//! Relicpack rebuilds compact, self-describing game-asset bundles from the
//! raw output of a legacy animation-file decompiler.
//!
//! The compiler reconciles inconsistent symbol/alias data describing which
//! raw image is the real pixel source for a logical asset, lays the surviving
//! unique images out into a texture atlas under strict size budgets, and
//! serializes the result (descriptor JSON + atlas image) into a compact
//! binary container consumed by a downstream game client.
//!
//! # Pipeline overview
//!
//! 1. **Extract**: `Extractor -> ExtractOutput` (symbol lines, raw images, metadata docs)
//! 2. **Load**: `SymbolTable` + name canonicalization (prefix stripping, filtering)
//! 3. **Resolve**: alias/source assignment and chain collapse over `AssetRecord`s
//! 4. **Pack**: physical bitmaps -> `Atlas` (deterministic row layout, frame metadata)
//! 5. **Encode**: descriptor + atlas image -> bundle bytes (`bundle::encode`)
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: layout and serialization are stable for a given input.
//! - **Item isolation**: no cross-item shared mutable state; a failing item never
//!   blocks or corrupts another item's compilation.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod atlas;
mod bundle;
mod compile;
mod descriptor;
mod extract;
mod foundation;
mod resolve;
mod symbols;

pub use atlas::pack::{
    Atlas, AtlasFrame, FrameRect, FrameSize, InputImage, PackOptions, Pivot, pack_atlas,
};
pub use bundle::codec::{BundleEntry, decode, encode};
pub use bundle::open::{BundleContents, RawImageEntry, open_bundle};
pub use compile::orchestrator::{
    CompileItem, CompileOptions, CompileOutcome, CompileStats, SkipReason, compile_batch,
    compile_item, default_worker_threads,
};
pub use compile::profile::CategoryProfile;
pub use descriptor::model::{
    AssetRecord, Descriptor, Spritesheet, SpritesheetFrame, SpritesheetMeta,
};
pub use extract::images::physical_image_bytes;
pub use extract::interface::{
    DescriptorDocs, DirectoryExtractor, ExtractOutput, Extractor, ProcessExtractor,
    read_extracted_dir,
};
pub use foundation::error::{RelicError, RelicResult};
pub use resolve::sources::resolve_sources;
pub use symbols::canon::{
    canonical_key, collapse_repeated_prefix, file_stem, strip_library_prefix, uppercase_markers,
};
pub use symbols::table::{SymbolName, SymbolTable, SymbolTag};
