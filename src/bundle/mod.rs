//! Binary bundle container codec and conventions.

/// Bit-exact encode/decode of the bundle wire format.
pub mod codec;
/// Convention layer: descriptor + atlas image entries of a decoded bundle.
pub mod open;
