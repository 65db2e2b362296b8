//! Alias/source resolution over parsed asset records.

pub mod sources;
