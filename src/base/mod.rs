//! Base types for genome storage.
//!
//! This module provides the per-position `Symbol` and the arena-backed
//! circular sequence that the linked genome is built on.

pub mod arena;
mod symbol;

pub use arena::{Chain, NodeHandle, RingArena};
pub use symbol::{Symbol, SymbolClass};
