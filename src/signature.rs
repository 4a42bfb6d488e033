//! Unit signature algebra
//!
//! A [`UnitSig`] maps unit symbols to powers. Signatures are immutable
//! value objects: every operation builds a fresh one. Two invariants hold
//! everywhere:
//!
//! - no entry ever has power exactly zero (filtered on every construction
//!   path, independent of the tolerance setting — tolerance governs
//!   comparison, never cancellation);
//! - key-set comparison is always exact, even when a power tolerance is
//!   active.
//!
//! Symbols are opaque: `ft` and `m` are simply unequal, no conversion is
//! attempted.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::config;
use crate::symbol::UnitSymbol;

/// An immutable mapping from unit symbol to power
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UnitSig {
    powers: BTreeMap<UnitSymbol, f64>,
}

impl UnitSig {
    /// The empty signature: a dimensionless scalar. Distinct from "no
    /// signature registered".
    pub fn dimensionless() -> Self {
        Self::default()
    }

    /// Build a signature from symbol/power pairs, eliding zero powers
    pub fn new(entries: impl IntoIterator<Item = (UnitSymbol, f64)>) -> Self {
        Self::filtered(entries.into_iter().collect())
    }

    /// Build from a raw map, enforcing the zero-power invariant
    fn filtered(mut powers: BTreeMap<UnitSymbol, f64>) -> Self {
        powers.retain(|_, p| *p != 0.0);
        Self { powers }
    }

    /// Whether this is the empty (scalar) signature
    pub fn is_dimensionless(&self) -> bool {
        self.powers.is_empty()
    }

    /// Number of distinct unit symbols
    pub fn len(&self) -> usize {
        self.powers.len()
    }

    /// The power of a symbol; absent symbols materialize as 0.0
    pub fn power_of(&self, sym: UnitSymbol) -> f64 {
        self.powers.get(&sym).copied().unwrap_or(0.0)
    }

    /// Iterate over symbols in a stable order
    pub fn symbols(&self) -> impl Iterator<Item = UnitSymbol> + '_ {
        self.powers.keys().copied()
    }

    /// Iterate over (symbol, power) pairs in a stable order
    pub fn iter(&self) -> impl Iterator<Item = (UnitSymbol, f64)> + '_ {
        self.powers.iter().map(|(s, p)| (*s, *p))
    }

    /// Negate all powers (the signature of a reciprocal)
    pub fn invert(&self) -> Self {
        // Negating a nonzero power cannot produce zero, so no re-filtering
        Self {
            powers: self.powers.iter().map(|(s, p)| (*s, -p)).collect(),
        }
    }

    fn key_set_matches(&self, other: &Self) -> bool {
        self.powers.keys().eq(other.powers.keys())
    }
}

/// True iff all signatures share an identical key set. Always exact; the
/// power tolerance never extends to key presence.
pub fn unit_types_equal(sigs: &[&UnitSig]) -> bool {
    match sigs.split_first() {
        None => true,
        Some((first, rest)) => rest.iter().all(|s| s.key_set_matches(first)),
    }
}

/// Given signatures already known to share a key set: true iff every key's
/// powers are mutually equal. Under an active tolerance the spread
/// (max minus min) must be strictly below it; otherwise equality is exact.
pub fn powers_equal(sigs: &[&UnitSig]) -> bool {
    let Some((first, rest)) = sigs.split_first() else {
        return true;
    };
    let tolerance = config::power_tolerance();
    first.symbols().all(|sym| {
        let mut min = first.power_of(sym);
        let mut max = min;
        for sig in rest {
            let p = sig.power_of(sym);
            min = min.min(p);
            max = max.max(p);
        }
        match tolerance {
            Some(t) => max - min < t,
            None => max == min,
        }
    })
}

/// Full signature equality: identical key sets and mutually equal powers.
/// Trivially true for zero or one signature.
pub fn units_equal(sigs: &[&UnitSig]) -> bool {
    unit_types_equal(sigs) && powers_equal(sigs)
}

/// Fold signatures together key by key.
///
/// Takes the union of all keys, materializing absent keys as 0.0, seeds
/// each key with the first signature's power, folds `combinator` over the
/// remaining signatures left to right, then elides zero powers.
/// Multiplication combines with `+`, division with `-`.
pub fn combine(sigs: &[&UnitSig], combinator: impl Fn(f64, f64) -> f64) -> UnitSig {
    let Some((first, rest)) = sigs.split_first() else {
        return UnitSig::dimensionless();
    };
    let keys: BTreeSet<UnitSymbol> = sigs.iter().flat_map(|s| s.symbols()).collect();
    let mut powers = BTreeMap::new();
    for sym in keys {
        let mut acc = first.power_of(sym);
        for sig in rest {
            acc = combinator(acc, sig.power_of(sym));
        }
        powers.insert(sym, acc);
    }
    UnitSig::filtered(powers)
}

// ============================================================================
// DISPLAY
// ============================================================================

impl fmt::Display for UnitSig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return write!(f, "1");
        }

        // Symbol tokens order by intern index; sort by spelling so output
        // does not depend on interning order
        let mut entries: Vec<(String, f64)> = self
            .iter()
            .map(|(s, p)| (s.resolve().unwrap_or_else(|| format!("{}", s)), p))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        let mut num: Vec<String> = Vec::new();
        let mut den: Vec<String> = Vec::new();
        for (name, power) in entries {
            if power > 0.0 {
                num.push(factor(&name, power));
            } else {
                den.push(factor(&name, -power));
            }
        }

        let num_str = if num.is_empty() {
            "1".to_string()
        } else {
            num.join("·")
        };

        if den.is_empty() {
            write!(f, "{}", num_str)
        } else {
            write!(f, "{} / {}", num_str, den.join("·"))
        }
    }
}

/// Render one `symbol^power` factor, using superscripts for whole powers
fn factor(name: &str, power: f64) -> String {
    if power == 1.0 {
        name.to_string()
    } else if power.fract() == 0.0 {
        format!("{}{}", name, superscript(power as i64))
    } else {
        format!("{}^{}", name, power)
    }
}

/// Convert an integer to a superscript string
fn superscript(n: i64) -> String {
    let mut result = String::new();
    if n < 0 {
        result.push('⁻');
    }
    for d in n.abs().to_string().chars() {
        result.push(match d {
            '0' => '⁰',
            '1' => '¹',
            '2' => '²',
            '3' => '³',
            '4' => '⁴',
            '5' => '⁵',
            '6' => '⁶',
            '7' => '⁷',
            '8' => '⁸',
            '9' => '⁹',
            _ => d,
        });
    }
    result
}

/// Build a [`UnitSig`] from a literal list of `symbol: power` pairs
///
/// # Example
///
/// ```
/// use tagged_units::units;
///
/// let sig = units! { kg: 3.0, m: 2.0 };
/// assert_eq!(sig.len(), 2);
///
/// let scalar = units! {};
/// assert!(scalar.is_dimensionless());
/// ```
#[macro_export]
macro_rules! units {
    () => {
        $crate::signature::UnitSig::dimensionless()
    };
    ($($name:ident : $power:expr),+ $(,)?) => {
        $crate::signature::UnitSig::new([
            $(($crate::symbol::UnitSymbol::intern(stringify!($name)), $power as f64)),+
        ])
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::with_power_tolerance;

    #[test]
    fn test_zero_powers_elided_on_construction() {
        let sig = units! { kg: 1.0, m: 0.0 };
        assert_eq!(sig.len(), 1);
        assert_eq!(sig, units! { kg: 1.0 });
    }

    #[test]
    fn test_explicit_zero_indistinguishable_from_absent() {
        assert_eq!(units! { s: 0.0 }, units! {});
        assert!(units! { s: 0.0 }.is_dimensionless());
    }

    #[test]
    fn test_unit_types_equal() {
        let a = units! { kg: 1.0, m: 2.0 };
        let b = units! { kg: 5.0, m: -1.0 };
        let c = units! { kg: 1.0 };
        assert!(unit_types_equal(&[&a, &b]));
        assert!(!unit_types_equal(&[&a, &c]));
        assert!(unit_types_equal(&[&a]));
        assert!(unit_types_equal(&[]));
    }

    #[test]
    fn test_powers_equal_exact() {
        let a = units! { ft: 1.0 };
        let b = units! { ft: 1.0 };
        let c = units! { ft: 1.01 };
        assert!(powers_equal(&[&a, &b]));
        assert!(!powers_equal(&[&a, &c]));
    }

    #[test]
    fn test_powers_equal_with_tolerance() {
        let a = units! { ft: 1.0 };
        let close = units! { ft: 1.01 };
        let far = units! { ft: 1.1 };
        with_power_tolerance(0.03, || {
            assert!(units_equal(&[&a, &close]));
            assert!(!units_equal(&[&a, &far]));
        });
        // Exact comparison once the scope exits
        assert!(!units_equal(&[&a, &close]));
    }

    #[test]
    fn test_tolerance_never_extends_to_key_presence() {
        let a = units! { ft: 0.01 };
        let b = units! {};
        with_power_tolerance(0.03, || {
            assert!(!units_equal(&[&a, &b]));
        });
    }

    #[test]
    fn test_combine_multiplicative() {
        let a = units! { m: 1.0, s: 1.0 };
        let b = units! { m: -1.0, s: 1.0 };
        let product = combine(&[&a, &b], |x, y| x + y);
        assert_eq!(product, units! { s: 2.0 });
    }

    #[test]
    fn test_combine_missing_keys_as_zero() {
        let a = units! { kg: 7.0 };
        let b = units! { kg: 3.0, m: 2.0 };
        let quotient = combine(&[&a, &b], |x, y| x - y);
        assert_eq!(quotient, units! { kg: 4.0, m: -2.0 });
    }

    #[test]
    fn test_combine_folds_left_to_right() {
        let a = units! { s: 8.0 };
        let b = units! { s: 2.0 };
        let c = units! { s: 1.0 };
        // (8 - 2) - 1, not 8 - (2 - 1)
        let out = combine(&[&a, &b, &c], |x, y| x - y);
        assert_eq!(out, units! { s: 5.0 });
    }

    #[test]
    fn test_combine_empty_is_dimensionless() {
        let out = combine(&[], |x: f64, y| x + y);
        assert!(out.is_dimensionless());
    }

    #[test]
    fn test_invert() {
        let sig = units! { ft: 5.0 };
        assert_eq!(sig.invert(), units! { ft: -5.0 });
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", units! {}), "1");
        assert_eq!(format!("{}", units! { kg: 1.0 }), "kg");
        assert_eq!(format!("{}", units! { kg: 10.0, m: 2.0 }), "kg¹⁰·m²");
        assert_eq!(format!("{}", units! { kg: 4.0, m: -2.0 }), "kg⁴ / m²");
        assert_eq!(format!("{}", units! { s: -2.0 }), "1 / s²");
    }
}
