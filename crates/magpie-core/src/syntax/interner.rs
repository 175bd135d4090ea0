//! String interning for identifiers and string literals.
//!
//! Property-name and receiver-type checks compare the same small set of
//! names over and over, so the lexer interns every identifier and string
//! once and the rest of the crate passes around copyable `Symbol` handles.

use rustc_hash::FxHashMap;
use std::num::NonZeroU32;

/// A handle to an interned string.
///
/// Wraps `NonZeroU32` so `Option<Symbol>` stays four bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol(NonZeroU32);

impl Symbol {
    fn new(index: u32) -> Self {
        // Index 0 is reserved so the stored value is index + 1.
        Symbol(NonZeroU32::new(index + 1).unwrap_or(NonZeroU32::MIN))
    }

    fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

/// Deduplicating string storage.
#[derive(Debug, Default, Clone)]
pub struct Interner {
    map: FxHashMap<Box<str>, Symbol>,
    strings: Vec<Box<str>>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            strings: Vec::with_capacity(capacity),
        }
    }

    /// Intern a string, returning its symbol. Repeated calls with the same
    /// string return the same symbol.
    pub fn intern(&mut self, text: &str) -> Symbol {
        if let Some(&sym) = self.map.get(text) {
            return sym;
        }
        let sym = Symbol::new(self.strings.len() as u32);
        let stored: Box<str> = text.into();
        self.map.insert(stored.clone(), sym);
        self.strings.push(stored);
        sym
    }

    /// Look up a string without interning it.
    pub fn get(&self, text: &str) -> Option<Symbol> {
        self.map.get(text).copied()
    }

    /// Resolve a symbol back to its string.
    pub fn resolve(&self, sym: Symbol) -> &str {
        &self.strings[sym.index()]
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}
