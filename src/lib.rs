//! clipsync: clipboard history with dedup, capacity bounds and
//! timestamp-based sync.
//!
//! The binary wires the `cs-*` crates together; see [`bootstrap`].

pub mod bootstrap;
pub mod console;
