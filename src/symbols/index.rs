//! Address-ordered symbol index with nearest-below resolution.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A symbol from the trace's symbol table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    /// Module or file the symbol comes from
    pub path: String,

    /// Symbol name (synthesized as `unk_<n>` when the table has none)
    pub name: String,

    /// Link-time value
    pub value: u64,

    /// Declared size in bytes
    pub size: u64,

    /// Load-time base offset
    pub offset: u64,

    /// Visible beyond its defining module
    pub global: bool,

    /// Runtime address, `value + offset`
    pub addr: u64,
}

impl Symbol {
    /// Create a symbol, deriving its runtime address
    ///
    /// The address wraps on overflow, matching unsigned arithmetic in the
    /// tracer that produced `value` and `offset`.
    pub fn new(
        path: impl Into<String>,
        name: impl Into<String>,
        value: u64,
        size: u64,
        offset: u64,
        global: bool,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            value,
            size,
            offset,
            global,
            addr: value.wrapping_add(offset),
        }
    }
}

/// An address resolved against the index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSymbol<'a> {
    pub symbol: &'a Symbol,

    /// Distance from the symbol's address
    pub offset: u64,
}

impl fmt::Display for ResolvedSymbol<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + 0x{:x}", self.symbol.name, self.offset)
    }
}

/// Global symbols keyed by runtime address
///
/// Built once per trace and read-only afterwards. Only global symbols are
/// kept; on duplicate addresses the last symbol inserted wins.
#[derive(Debug, Clone, Default)]
pub struct SymbolIndex {
    by_addr: BTreeMap<u64, Symbol>,
}

impl SymbolIndex {
    /// Build an index from symbols in table order
    pub fn from_symbols(symbols: impl IntoIterator<Item = Symbol>) -> Self {
        let mut by_addr = BTreeMap::new();
        for symbol in symbols.into_iter().filter(|s| s.global) {
            by_addr.insert(symbol.addr, symbol);
        }
        Self { by_addr }
    }

    /// Resolve an address to the symbol at or nearest below it
    ///
    /// Returns `None` when the address is below every indexed symbol.
    pub fn resolve(&self, addr: u64) -> Option<ResolvedSymbol<'_>> {
        self.by_addr
            .range(..=addr)
            .next_back()
            .map(|(&base, symbol)| ResolvedSymbol {
                symbol,
                offset: addr - base,
            })
    }

    /// Exact lookup by runtime address
    pub fn get(&self, addr: u64) -> Option<&Symbol> {
        self.by_addr.get(&addr)
    }

    /// Symbols in ascending address order
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.by_addr.values()
    }

    pub fn len(&self) -> usize {
        self.by_addr.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_addr.is_empty()
    }
}

impl FromIterator<Symbol> for SymbolIndex {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        Self::from_symbols(iter)
    }
}
