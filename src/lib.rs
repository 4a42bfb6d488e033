//! Runtime unit tagging and checking for bare numeric values
//!
//! Validates that arithmetic combines compatible physical units without
//! introducing a quantity wrapper type that has to be threaded through
//! consumer code. A numeric value is "tagged" by associating its identity
//! with a unit signature in a weak, concurrent side table; checked
//! operations look signatures up, combine them, and tag their results.
//!
//! Units are opaque symbols compared only for equality — no `ft` to `m`
//! conversion is ever performed.
//!
//! # Key Features
//!
//! - **Side-table tagging**: quantities are plain [`Num`] handles, not a
//!   reified type; the association is by identity, weakly held
//! - **Signature algebra**: powers merge under multiplication/division and
//!   must match under addition/subtraction/comparison, with an optional
//!   comparison tolerance
//! - **Operation builders**: wrap any arbitrary-arity numeric function
//!   with unit propagation, unit-equality enforcement, or checked
//!   comparison
//! - **Dual gating**: a compile-time feature (`check-units`) and a scoped
//!   runtime flag compose by AND; with either off, operations degrade to
//!   the raw kernels with no table traffic
//!
//! # Example
//!
//! ```
//! use tagged_units::prelude::*;
//! use tagged_units::{checked, units};
//!
//! let dose = quantity(500.0, units! { mg: 1.0 })?;
//! let volume = quantity(10.0, units! { mL: 1.0 })?;
//!
//! let concentration = checked::div(&[dose.clone(), volume])?;
//! assert_eq!(units_of(&concentration), Some(units! { mg: 1.0, mL: -1.0 }));
//!
//! // Mismatched units abort the expression
//! let time = quantity(2.0, units! { h: 1.0 })?;
//! assert!(checked::add(&[dose, time]).is_err());
//! # Ok::<(), tagged_units::UnitError>(())
//! ```

pub mod builders;
pub mod checked;
pub mod config;
pub mod errors;
pub mod magnitude;
pub mod ops;
pub mod quantity;
pub mod registry;
pub mod signature;
pub mod symbol;
pub mod table;

// Re-exports
pub use builders::{comparison_op, equal_units_op, propagating_op};
pub use config::{
    checking_enabled, set_power_tolerance, with_power_tolerance, without_checks, ScopedCheckGate,
};
pub use errors::{Result, UnitError};
pub use magnitude::{num, Magnitude, Num};
pub use quantity::{build_quantity, quantity};
pub use registry::{register_clone_adapter, register_clone_adapter_fn, CloneFn};
pub use signature::{combine, powers_equal, unit_types_equal, units_equal, UnitSig};
pub use symbol::UnitSymbol;
pub use table::{is_quantity, units_of};

/// Entry points resolved by the compile-time gate.
///
/// With the `check-units` feature on (the default), these are the checked
/// operations; with it off, they alias the raw kernels and carry zero
/// table or signature overhead. A build-time rewriter targets this module
/// so call sites need no per-site `cfg`.
pub mod auto {
    #[cfg(feature = "check-units")]
    pub use crate::checked::{add, div, eq, ge, gt, le, lt, max, min, mul, ne, sub};

    #[cfg(not(feature = "check-units"))]
    pub use crate::ops::{
        add_raw as add, div_raw as div, eq_raw as eq, ge_raw as ge, gt_raw as gt, le_raw as le,
        lt_raw as lt, max_raw as max, min_raw as min, mul_raw as mul, ne_raw as ne, sub_raw as sub,
    };
}

/// Prelude for common imports
pub mod prelude {
    pub use crate::config::{with_power_tolerance, without_checks};
    pub use crate::magnitude::{num, Magnitude, Num};
    pub use crate::quantity::{build_quantity, quantity};
    pub use crate::signature::{units_equal, UnitSig};
    pub use crate::symbol::UnitSymbol;
    pub use crate::table::{is_quantity, units_of};
    pub use crate::units;
}
