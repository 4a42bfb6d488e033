//! Operation-function builders
//!
//! Higher-order constructors that wrap an arbitrary-arity numeric function
//! with unit logic, producing a new checked operation:
//!
//! - [`propagating_op`]: combine operand signatures through a combinator
//!   (multiplication adds powers, division subtracts them);
//! - [`equal_units_op`]: require every operand to share one signature and
//!   tag the result with it;
//! - [`comparison_op`]: require shared signatures, return a plain `bool`.
//!
//! When effective checking is off every assertion, lookup, and
//! registration is bypassed and the wrapped function runs directly on the
//! raw arguments. That silent skip is the point: disabling checking must
//! leave arithmetic untouched.

use std::sync::Arc;

use tracing::debug;

use crate::config::checking_enabled;
use crate::errors::{Result, UnitError};
use crate::magnitude::Num;
use crate::quantity::build_quantity;
use crate::signature::{combine, units_equal, UnitSig};
use crate::table;

/// An arbitrary-arity numeric function over raw magnitudes
pub type MathFn = Arc<dyn Fn(&[Num]) -> Result<Num> + Send + Sync>;

/// An arbitrary-arity numeric predicate over raw magnitudes
pub type CmpFn = Arc<dyn Fn(&[Num]) -> Result<bool> + Send + Sync>;

/// A pairwise power combinator
pub type Combinator = Arc<dyn Fn(f64, f64) -> f64 + Send + Sync>;

/// A checked operation produced by a builder
pub type CheckedOp = Box<dyn Fn(&[Num]) -> Result<Num> + Send + Sync>;

/// A checked comparison produced by a builder
pub type CheckedCmp = Box<dyn Fn(&[Num]) -> Result<bool> + Send + Sync>;

/// Look up every operand's signature, failing on the first unregistered one
fn collect_sigs(args: &[Num], operation: &str) -> Result<Vec<UnitSig>> {
    args.iter()
        .map(|a| {
            table::units_of(a).ok_or_else(|| UnitError::AssertionFailure {
                what: format!("operand {} of {} is not a registered quantity", a, operation),
            })
        })
        .collect()
}

fn mismatch(operation: &str, args: &[Num], sigs: &[UnitSig]) -> UnitError {
    let expected = sigs[0].clone();
    let found = sigs
        .iter()
        .find(|s| !units_equal(&[&expected, s]))
        .cloned()
        .unwrap_or_else(|| expected.clone());
    UnitError::UnitMismatch {
        operation: operation.to_string(),
        expected,
        found,
        operands: args
            .iter()
            .zip(sigs)
            .map(|(a, s)| format!("{} {}", a, s))
            .collect(),
    }
}

pub(crate) fn propagating_apply(
    math: &dyn Fn(&[Num]) -> Result<Num>,
    combinator: &dyn Fn(f64, f64) -> f64,
    args: &[Num],
) -> Result<Num> {
    if !checking_enabled() {
        return math(args);
    }
    let sigs = collect_sigs(args, "a unit-propagating operation")?;
    let raw = math(args)?;
    let sig_refs: Vec<&UnitSig> = sigs.iter().collect();
    build_quantity(&raw, combine(&sig_refs, combinator))
}

pub(crate) fn equal_units_apply(
    math: &dyn Fn(&[Num]) -> Result<Num>,
    description: &str,
    args: &[Num],
) -> Result<Num> {
    if !checking_enabled() {
        return math(args);
    }
    if args.is_empty() {
        return Err(UnitError::InvalidArgument {
            what: format!("{} requires at least one argument", description),
        });
    }
    let sigs = collect_sigs(args, description)?;
    let sig_refs: Vec<&UnitSig> = sigs.iter().collect();
    if !units_equal(&sig_refs) {
        debug!(operation = description, "unit mismatch");
        return Err(mismatch(description, args, &sigs));
    }
    let raw = math(args)?;
    build_quantity(&raw, sigs[0].clone())
}

pub(crate) fn comparison_apply(
    cmp: &dyn Fn(&[Num]) -> Result<bool>,
    description: &str,
    args: &[Num],
) -> Result<bool> {
    if !checking_enabled() {
        return cmp(args);
    }
    if args.is_empty() {
        return Err(UnitError::InvalidArgument {
            what: format!("{} requires at least one argument", description),
        });
    }
    let sigs = collect_sigs(args, description)?;
    let sig_refs: Vec<&UnitSig> = sigs.iter().collect();
    if !units_equal(&sig_refs) {
        debug!(operation = description, "unit mismatch");
        return Err(mismatch(description, args, &sigs));
    }
    cmp(args)
}

/// Wrap `math` so operand signatures flow through `combinator` into the
/// result's signature. Accepts zero or more arguments; the zero-argument
/// case is whatever identity `math` defines, tagged dimensionless.
pub fn propagating_op(math: MathFn, combinator: Combinator) -> CheckedOp {
    Box::new(move |args| propagating_apply(&*math, &*combinator, args))
}

/// Wrap `math` so every operand must carry one shared signature, which the
/// result inherits. At least one argument is required; `description` names
/// the operation in errors.
pub fn equal_units_op(math: MathFn, description: impl Into<String>) -> CheckedOp {
    let description = description.into();
    Box::new(move |args| equal_units_apply(&*math, &description, args))
}

/// Wrap `cmp` so every operand must carry one shared signature. The result
/// is a plain boolean, never a tagged quantity.
pub fn comparison_op(cmp: CmpFn, description: impl Into<String>) -> CheckedCmp {
    let description = description.into();
    Box::new(move |args| comparison_apply(&*cmp, &description, args))
}
