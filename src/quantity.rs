//! Quantity construction
//!
//! Building a quantity clones the magnitude into a fresh handle and
//! registers that handle's identity in the association table. The caller's
//! original value is never mutated, wrapped, or registered.

use std::sync::Arc;

use crate::config::checking_enabled;
use crate::errors::{Result, UnitError};
use crate::magnitude::{num, Magnitude, Num};
use crate::registry::clone_magnitude;
use crate::signature::UnitSig;
use crate::table;

/// Build a quantity: a fresh clone of `magnitude` registered with `sig`.
///
/// When effective checking is off this is the identity function — the
/// input handle comes straight back, unregistered.
///
/// Fails with [`UnitError::UnsupportedType`] when the representation has
/// no cloning adapter, and with [`UnitError::ContractViolation`] when an
/// adapter hands back the original instance.
pub fn build_quantity(magnitude: &Num, sig: UnitSig) -> Result<Num> {
    if !checking_enabled() {
        return Ok(magnitude.clone());
    }
    let clone = clone_magnitude(magnitude)?;
    if Arc::ptr_eq(magnitude, &clone) {
        return Err(UnitError::ContractViolation {
            type_name: magnitude.type_name().to_string(),
        });
    }
    // UnitSig filters zero powers on every construction path, so `sig`
    // already satisfies the invariant
    table::register(&clone, sig);
    Ok(clone)
}

/// Build a quantity from a raw value
pub fn quantity(value: impl Magnitude, sig: UnitSig) -> Result<Num> {
    build_quantity(&num(value), sig)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::without_checks;
    use crate::units;

    #[test]
    fn test_build_registers_filtered_signature() {
        let raw = num(7.0_f64);
        let q = build_quantity(&raw, units! { kg: 7.0, m: 0.0 }).unwrap();
        assert!(!Arc::ptr_eq(&raw, &q));
        assert_eq!(table::units_of(&q), Some(units! { kg: 7.0 }));
        // The original stays untagged
        assert!(!table::is_quantity(&raw));
    }

    #[test]
    fn test_empty_signature_is_a_real_registration() {
        let q = quantity(2.0_f64, units! {}).unwrap();
        assert_eq!(table::units_of(&q), Some(units! {}));
        assert!(table::is_quantity(&q));
    }

    #[test]
    fn test_disabled_gate_returns_input_unchanged() {
        let raw = num(7.0_f64);
        without_checks(|| {
            let q = build_quantity(&raw, units! { kg: 1.0 }).unwrap();
            assert!(Arc::ptr_eq(&raw, &q));
            assert!(!table::is_quantity(&q));
        });
    }
}
