// crates/trimwire-core/src/helpers/mod.rs
//
// Small shared utilities with no state of their own.

pub mod time;
