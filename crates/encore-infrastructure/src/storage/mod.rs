//! Low-level storage primitives.

pub mod atomic_json;
