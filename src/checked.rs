//! Prebuilt checked operations
//!
//! The standard arithmetic and comparison set, wired through the builders
//! in [`crate::builders`]. Each function here has a raw twin in
//! [`crate::ops`]; a build-time rewriter picks between the two surfaces
//! through [`crate::auto`].

use crate::builders::{comparison_apply, equal_units_apply, propagating_apply};
use crate::config::checking_enabled;
use crate::errors::Result;
use crate::magnitude::{num, Num};
use crate::ops;
use crate::quantity::build_quantity;
use crate::signature::UnitSig;

/// Checked multiplication: signatures combine by adding powers
pub fn mul(args: &[Num]) -> Result<Num> {
    propagating_apply(&ops::mul_raw, &|a, b| a + b, args)
}

/// Checked division: signatures combine by subtracting powers.
///
/// A lone argument is treated as the divisor of a dimensionless `1`, so
/// its signature inverts and its magnitude becomes a reciprocal.
pub fn div(args: &[Num]) -> Result<Num> {
    if checking_enabled() && args.len() == 1 {
        let one = build_quantity(&num(1.0_f64), UnitSig::dimensionless())?;
        let padded = [one, args[0].clone()];
        return propagating_apply(&ops::div_raw, &|a, b| a - b, &padded);
    }
    propagating_apply(&ops::div_raw, &|a, b| a - b, args)
}

/// Checked addition: all operands must share one signature
pub fn add(args: &[Num]) -> Result<Num> {
    equal_units_apply(&ops::add_raw, "addition", args)
}

/// Checked subtraction: all operands must share one signature
pub fn sub(args: &[Num]) -> Result<Num> {
    equal_units_apply(&ops::sub_raw, "subtraction", args)
}

/// Checked minimum: all operands must share one signature
pub fn min(args: &[Num]) -> Result<Num> {
    equal_units_apply(&ops::min_raw, "min", args)
}

/// Checked maximum: all operands must share one signature
pub fn max(args: &[Num]) -> Result<Num> {
    equal_units_apply(&ops::max_raw, "max", args)
}

/// Checked numeric equality over same-unit operands
pub fn eq(args: &[Num]) -> Result<bool> {
    comparison_apply(&ops::eq_raw, "equality comparison", args)
}

/// Checked numeric inequality over same-unit operands
pub fn ne(args: &[Num]) -> Result<bool> {
    comparison_apply(&ops::ne_raw, "inequality comparison", args)
}

/// Checked strictly-increasing comparison over same-unit operands
pub fn lt(args: &[Num]) -> Result<bool> {
    comparison_apply(&ops::lt_raw, "less-than comparison", args)
}

/// Checked non-decreasing comparison over same-unit operands
pub fn le(args: &[Num]) -> Result<bool> {
    comparison_apply(&ops::le_raw, "less-or-equal comparison", args)
}

/// Checked strictly-decreasing comparison over same-unit operands
pub fn gt(args: &[Num]) -> Result<bool> {
    comparison_apply(&ops::gt_raw, "greater-than comparison", args)
}

/// Checked non-increasing comparison over same-unit operands
pub fn ge(args: &[Num]) -> Result<bool> {
    comparison_apply(&ops::ge_raw, "greater-or-equal comparison", args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::UnitError;
    use crate::quantity::quantity;
    use crate::table;
    use crate::units;

    #[test]
    fn test_multiplication_scenario() {
        let a = quantity(7.0_f64, units! { kg: 7.0 }).unwrap();
        let b = quantity(3.0_f64, units! { kg: 3.0, m: 2.0 }).unwrap();
        let product = mul(&[a, b]).unwrap();
        assert_eq!(product.as_f64(), Some(21.0));
        assert_eq!(table::units_of(&product), Some(units! { kg: 10.0, m: 2.0 }));
    }

    #[test]
    fn test_division_scenario() {
        let a = quantity(6.0_f64, units! { kg: 7.0 }).unwrap();
        let b = quantity(3.0_f64, units! { kg: 3.0, m: 2.0 }).unwrap();
        let quotient = div(&[a, b]).unwrap();
        assert_eq!(quotient.as_f64(), Some(2.0));
        assert_eq!(
            table::units_of(&quotient),
            Some(units! { kg: 4.0, m: -2.0 })
        );
    }

    #[test]
    fn test_single_argument_division_inverts() {
        let a = quantity(4.0_f64, units! { ft: 5.0 }).unwrap();
        let inverse = div(&[a]).unwrap();
        assert_eq!(inverse.as_f64(), Some(0.25));
        assert_eq!(table::units_of(&inverse), Some(units! { ft: -5.0 }));
    }

    #[test]
    fn test_multiplication_cancels_to_dimensionless_entries() {
        let a = quantity(2.0_f64, units! { m: 1.0, s: 1.0 }).unwrap();
        let b = quantity(3.0_f64, units! { m: -1.0, s: 1.0 }).unwrap();
        let product = mul(&[a, b]).unwrap();
        assert_eq!(table::units_of(&product), Some(units! { s: 2.0 }));
    }

    #[test]
    fn test_comparison_unit_mismatch() {
        let a = quantity(1.0_f64, units! { ft: 1.0 }).unwrap();
        let b = quantity(1.0_f64, units! { ft: 2.0 }).unwrap();
        assert!(matches!(
            eq(&[a, b]),
            Err(UnitError::UnitMismatch { .. })
        ));
    }

    #[test]
    fn test_comparison_same_units() {
        let a = quantity(1.0_f64, units! { ft: 1.0 }).unwrap();
        let b = quantity(1.0_f64, units! { ft: 1.0 }).unwrap();
        assert!(eq(&[a, b]).unwrap());
    }

    #[test]
    fn test_subtraction_keeps_units() {
        let a = quantity(5.0_f64, units! { s: 1.0 }).unwrap();
        let b = quantity(3.0_f64, units! { s: 1.0 }).unwrap();
        let diff = sub(&[a, b]).unwrap();
        assert_eq!(diff.as_f64(), Some(2.0));
        assert_eq!(table::units_of(&diff), Some(units! { s: 1.0 }));
    }

    #[test]
    fn test_min_max() {
        let a = quantity(5.0_f64, units! { kg: 1.0 }).unwrap();
        let b = quantity(3.0_f64, units! { kg: 1.0 }).unwrap();
        assert_eq!(min(&[a.clone(), b.clone()]).unwrap().as_f64(), Some(3.0));
        let largest = max(&[a, b]).unwrap();
        assert_eq!(largest.as_f64(), Some(5.0));
        assert_eq!(table::units_of(&largest), Some(units! { kg: 1.0 }));
    }
}
