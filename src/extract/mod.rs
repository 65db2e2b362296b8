//! Decompiler collaborator interface (out-of-core extraction).

/// Symbol-id to bitmap-byte resolution for physical assets.
pub mod images;
/// The narrow `Extractor` trait and its built-in implementations.
pub mod interface;
