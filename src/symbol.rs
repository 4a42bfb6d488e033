//! Interned unit symbols
//!
//! Unit symbols are opaque tokens compared only for equality; `kg` and `ft`
//! carry no conversion relationship. Interning keeps signatures cheap to
//! copy and compare.

use std::fmt;
use std::sync::{OnceLock, RwLock};

use string_interner::backend::StringBackend;
use string_interner::symbol::SymbolU32;
use string_interner::{StringInterner, Symbol as SymbolTrait};

/// Interned unit symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitSymbol(u32);

static INTERNER: OnceLock<RwLock<StringInterner<StringBackend>>> = OnceLock::new();

fn interner() -> &'static RwLock<StringInterner<StringBackend>> {
    INTERNER.get_or_init(|| RwLock::new(StringInterner::new()))
}

impl UnitSymbol {
    /// Intern a symbol, returning the same token for the same spelling
    pub fn intern(name: &str) -> Self {
        let mut interner = interner().write().unwrap();
        Self(interner.get_or_intern(name).to_usize() as u32)
    }

    /// Look up a symbol without interning it
    pub fn get(name: &str) -> Option<Self> {
        let interner = interner().read().unwrap();
        interner.get(name).map(|s| Self(s.to_usize() as u32))
    }

    /// Resolve back to the symbol's spelling
    pub fn resolve(&self) -> Option<String> {
        let interner = interner().read().unwrap();
        SymbolU32::try_from_usize(self.0 as usize)
            .and_then(|s| interner.resolve(s))
            .map(str::to_string)
    }
}

impl fmt::Display for UnitSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.resolve() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "<sym{}>", self.0),
        }
    }
}
