//! Symbol table.
//!
//! Symbols are interned: each distinct name is stored once,
//! and expressions hold a small copyable handle to it.
//! Names are case-sensitive and stored verbatim.

use string_interner::{DefaultStringInterner, DefaultSymbol};

use super::Expr;

/// Handle to an interned symbol name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol(DefaultSymbol);

/// The table of all symbol names seen so far.
#[derive(Default)]
pub struct Symbols {
    table: DefaultStringInterner,
}

impl std::fmt::Debug for Symbols {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Symbols")
            .field("len", &self.table.len())
            .finish()
    }
}

impl Symbols {
    /// Add a name to the table, or find its existing handle.
    pub fn intern(&mut self, name: &str) -> Symbol {
        Symbol(self.table.get_or_intern(name))
    }

    /// Construct a symbol expression for the name.
    pub fn symbol(&mut self, name: &str) -> Expr {
        Expr::Symbol(self.intern(name))
    }

    /// Look up a name without interning it.
    pub fn get(&self, name: &str) -> Option<Symbol> {
        self.table.get(name).map(Symbol)
    }

    /// Resolve a handle to its name.
    pub fn resolve(&self, symbol: Symbol) -> Option<&str> {
        self.table.resolve(symbol.0)
    }

    /// True if `expr` is a symbol with the given name.
    pub fn is(&self, expr: &Expr, name: &str) -> bool {
        match (expr.as_symbol(), self.get(name)) {
            (Some(s), Some(want)) => s == want,
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
