//! Dynamic numeric values
//!
//! A quantity is not a wrapper type: it is a bare numeric value whose unit
//! signature lives in a side table, keyed by the value's identity. [`Num`]
//! is the handle this crate passes around — a shared pointer whose
//! allocation address is the identity token. Two value-equal but separately
//! constructed numbers are distinct quantities.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Capability interface for a concrete numeric representation
///
/// Implementations must be plain value types; `eq_value` compares payloads
/// across handles without regard to identity.
pub trait Magnitude: Any + Send + Sync + fmt::Debug + fmt::Display {
    /// Upcast for representation-tag dispatch
    fn as_any(&self) -> &dyn Any;

    /// Stable name used in diagnostics
    fn type_name(&self) -> &'static str;

    /// Value equality against another magnitude of any representation
    fn eq_value(&self, other: &dyn Magnitude) -> bool;

    /// Lossy view as a float, for promoting mixed-representation arithmetic
    fn as_f64(&self) -> Option<f64>;

    /// Exact view as an integer, when the representation is integral
    fn as_i64(&self) -> Option<i64>;
}

/// Shared handle to a magnitude; the allocation address is the quantity's
/// identity token
pub type Num = Arc<dyn Magnitude>;

/// Wrap a raw value into a fresh [`Num`] handle
pub fn num(value: impl Magnitude) -> Num {
    Arc::new(value)
}

impl Magnitude for f64 {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        "f64"
    }

    fn eq_value(&self, other: &dyn Magnitude) -> bool {
        other.as_any().downcast_ref::<f64>() == Some(self)
    }

    fn as_f64(&self) -> Option<f64> {
        Some(*self)
    }

    fn as_i64(&self) -> Option<i64> {
        None
    }
}

impl Magnitude for f32 {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        "f32"
    }

    fn eq_value(&self, other: &dyn Magnitude) -> bool {
        other.as_any().downcast_ref::<f32>() == Some(self)
    }

    fn as_f64(&self) -> Option<f64> {
        Some(f64::from(*self))
    }

    fn as_i64(&self) -> Option<i64> {
        None
    }
}

impl Magnitude for i64 {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        "i64"
    }

    fn eq_value(&self, other: &dyn Magnitude) -> bool {
        other.as_any().downcast_ref::<i64>() == Some(self)
    }

    fn as_f64(&self) -> Option<f64> {
        Some(*self as f64)
    }

    fn as_i64(&self) -> Option<i64> {
        Some(*self)
    }
}

impl Magnitude for i32 {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        "i32"
    }

    fn eq_value(&self, other: &dyn Magnitude) -> bool {
        other.as_any().downcast_ref::<i32>() == Some(self)
    }

    fn as_f64(&self) -> Option<f64> {
        Some(f64::from(*self))
    }

    fn as_i64(&self) -> Option<i64> {
        Some(i64::from(*self))
    }
}
