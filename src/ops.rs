//! Raw numeric kernels
//!
//! Variadic arithmetic and comparison over [`Num`] handles, with no unit
//! awareness. These are the unchecked entry points a build-time rewriter
//! targets when the compile-time gate is off, and the math functions the
//! checked builders wrap when it is on.
//!
//! Mixed representations promote to `f64`; all-integral argument lists
//! stay integral except for division, which is always carried out in
//! floating point so a lone argument can become its reciprocal.

use crate::errors::{Result, UnitError};
use crate::magnitude::{num, Num};

enum Promoted {
    Ints(Vec<i64>),
    Floats(Vec<f64>),
}

fn promote(args: &[Num]) -> Result<Promoted> {
    if args.iter().all(|a| a.as_i64().is_some()) {
        return Ok(Promoted::Ints(
            args.iter().filter_map(|a| a.as_i64()).collect(),
        ));
    }
    args.iter()
        .map(|a| {
            a.as_f64().ok_or_else(|| UnitError::UnsupportedType {
                type_name: a.type_name().to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()
        .map(Promoted::Floats)
}

fn floats(args: &[Num]) -> Result<Vec<f64>> {
    match promote(args)? {
        Promoted::Ints(v) => Ok(v.into_iter().map(|n| n as f64).collect()),
        Promoted::Floats(v) => Ok(v),
    }
}

fn require_args(args: &[Num], what: &str) -> Result<()> {
    if args.is_empty() {
        return Err(UnitError::InvalidArgument {
            what: format!("{} requires at least one argument", what),
        });
    }
    Ok(())
}

/// Sum of the arguments; the empty sum is `0`
pub fn add_raw(args: &[Num]) -> Result<Num> {
    match promote(args)? {
        Promoted::Ints(v) => Ok(num(v.into_iter().sum::<i64>())),
        Promoted::Floats(v) => Ok(num(v.into_iter().sum::<f64>())),
    }
}

/// Product of the arguments; the empty product is `1`
pub fn mul_raw(args: &[Num]) -> Result<Num> {
    match promote(args)? {
        Promoted::Ints(v) => Ok(num(v.into_iter().product::<i64>())),
        Promoted::Floats(v) => Ok(num(v.into_iter().product::<f64>())),
    }
}

/// First argument minus the rest; a lone argument negates
pub fn sub_raw(args: &[Num]) -> Result<Num> {
    require_args(args, "subtraction")?;
    match promote(args)? {
        Promoted::Ints(v) => Ok(num(match v.split_first() {
            Some((first, [])) => -first,
            Some((first, rest)) => rest.iter().fold(*first, |acc, n| acc - n),
            None => unreachable!(),
        })),
        Promoted::Floats(v) => Ok(num(match v.split_first() {
            Some((first, [])) => -first,
            Some((first, rest)) => rest.iter().fold(*first, |acc, n| acc - n),
            None => unreachable!(),
        })),
    }
}

/// First argument divided by the rest; a lone argument becomes its
/// reciprocal. Always floating point.
pub fn div_raw(args: &[Num]) -> Result<Num> {
    require_args(args, "division")?;
    let values = floats(args)?;
    let quotient = match values.split_first() {
        Some((first, [])) => 1.0 / first,
        Some((first, rest)) => rest.iter().fold(*first, |acc, n| acc / n),
        None => unreachable!(),
    };
    Ok(num(quotient))
}

/// Smallest argument
pub fn min_raw(args: &[Num]) -> Result<Num> {
    require_args(args, "min")?;
    match promote(args)? {
        Promoted::Ints(v) => Ok(num(v.into_iter().min().unwrap_or(i64::MAX))),
        Promoted::Floats(v) => Ok(num(v.into_iter().fold(f64::INFINITY, f64::min))),
    }
}

/// Largest argument
pub fn max_raw(args: &[Num]) -> Result<Num> {
    require_args(args, "max")?;
    match promote(args)? {
        Promoted::Ints(v) => Ok(num(v.into_iter().max().unwrap_or(i64::MIN))),
        Promoted::Floats(v) => Ok(num(v.into_iter().fold(f64::NEG_INFINITY, f64::max))),
    }
}

fn chained(args: &[Num], what: &str, ok: impl Fn(f64, f64) -> bool) -> Result<bool> {
    require_args(args, what)?;
    let values = floats(args)?;
    Ok(values.windows(2).all(|w| ok(w[0], w[1])))
}

/// Numeric equality, chained pairwise
pub fn eq_raw(args: &[Num]) -> Result<bool> {
    chained(args, "equality comparison", |a, b| a == b)
}

/// True iff no two adjacent arguments are numerically equal
pub fn ne_raw(args: &[Num]) -> Result<bool> {
    chained(args, "inequality comparison", |a, b| a != b)
}

/// Strictly increasing
pub fn lt_raw(args: &[Num]) -> Result<bool> {
    chained(args, "less-than comparison", |a, b| a < b)
}

/// Non-decreasing
pub fn le_raw(args: &[Num]) -> Result<bool> {
    chained(args, "less-or-equal comparison", |a, b| a <= b)
}

/// Strictly decreasing
pub fn gt_raw(args: &[Num]) -> Result<bool> {
    chained(args, "greater-than comparison", |a, b| a > b)
}

/// Non-increasing
pub fn ge_raw(args: &[Num]) -> Result<bool> {
    chained(args, "greater-or-equal comparison", |a, b| a >= b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identities() {
        assert_eq!(add_raw(&[]).unwrap().as_i64(), Some(0));
        assert_eq!(mul_raw(&[]).unwrap().as_i64(), Some(1));
    }

    #[test]
    fn test_integer_paths_stay_integral() {
        let args = vec![num(6_i64), num(7_i64)];
        assert_eq!(mul_raw(&args).unwrap().as_i64(), Some(42));
    }

    #[test]
    fn test_mixed_promotes_to_float() {
        let args = vec![num(6_i64), num(0.5_f64)];
        let out = mul_raw(&args).unwrap();
        assert_eq!(out.as_i64(), None);
        assert_eq!(out.as_f64(), Some(3.0));
    }

    #[test]
    fn test_single_argument_division_is_reciprocal() {
        let out = div_raw(&[num(4.0_f64)]).unwrap();
        assert_eq!(out.as_f64(), Some(0.25));
    }

    #[test]
    fn test_division_folds_left() {
        let args = vec![num(24.0_f64), num(2.0_f64), num(3.0_f64)];
        assert_eq!(div_raw(&args).unwrap().as_f64(), Some(4.0));
    }

    #[test]
    fn test_zero_argument_division_rejected() {
        assert!(matches!(
            div_raw(&[]),
            Err(UnitError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_single_argument_subtraction_negates() {
        assert_eq!(sub_raw(&[num(3_i64)]).unwrap().as_i64(), Some(-3));
    }

    #[test]
    fn test_chained_comparisons() {
        assert!(lt_raw(&[num(1.0_f64), num(2.0_f64), num(3.0_f64)]).unwrap());
        assert!(!lt_raw(&[num(1.0_f64), num(3.0_f64), num(2.0_f64)]).unwrap());
        assert!(eq_raw(&[num(2_i64), num(2.0_f64)]).unwrap());
        assert!(lt_raw(&[num(1.0_f64)]).unwrap());
    }
}
