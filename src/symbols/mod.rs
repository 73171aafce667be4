//! Symbol table loading and address resolution.
//!
//! This module handles:
//! - Reading the `sym` table and naming anonymous symbols
//! - Keeping only global symbols, keyed by runtime address
//! - Resolving an address to the symbol at or nearest below it

pub mod index;
pub mod loader;

// Re-export main types
pub use index::{ResolvedSymbol, Symbol, SymbolIndex};
pub use loader::load_symbols;
