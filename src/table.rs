//! Identity-keyed unit association table
//!
//! One process-lifetime table maps numeric value identity (allocation
//! address) to a unit signature. Keys are held weakly: registering a value
//! never extends its lifetime, and entries whose value has been dropped
//! read as absent. A single `RwLock` guards the table — all registrations
//! funnel through it, an accepted throughput cost of checking mode.
//!
//! Dead entries are swept when the entry count crosses a doubling
//! watermark, so a reused allocation address can never surface a stale
//! signature: lookups only honor entries whose weak key is still alive.

use std::sync::{Arc, OnceLock, RwLock, Weak};

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::magnitude::{Magnitude, Num};
use crate::signature::UnitSig;

struct Entry {
    key: Weak<dyn Magnitude>,
    sig: UnitSig,
}

struct Inner {
    entries: FxHashMap<usize, Entry>,
    prune_watermark: usize,
}

/// The association table; the process-wide instance sits behind the
/// module-level free functions
struct UnitTable {
    inner: RwLock<Inner>,
}

const INITIAL_WATERMARK: usize = 64;

impl UnitTable {
    fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                entries: FxHashMap::default(),
                prune_watermark: INITIAL_WATERMARK,
            }),
        }
    }

    /// Insert or overwrite the signature for a value, keyed by identity
    fn register(&self, value: &Num, sig: UnitSig) {
        let mut inner = self.inner.write().unwrap();
        if inner.entries.len() >= inner.prune_watermark {
            inner.entries.retain(|_, e| e.key.strong_count() > 0);
            inner.prune_watermark = (inner.entries.len() * 2).max(INITIAL_WATERMARK);
            trace!(
                live = inner.entries.len(),
                watermark = inner.prune_watermark,
                "swept dead unit table entries"
            );
        }
        inner.entries.insert(
            identity(value),
            Entry {
                key: Arc::downgrade(value),
                sig,
            },
        );
    }

    /// The registered signature for a value, or `None` if unregistered
    fn lookup(&self, value: &Num) -> Option<UnitSig> {
        let inner = self.inner.read().unwrap();
        let entry = inner.entries.get(&identity(value))?;
        // An un-upgradable key means the entry belongs to a dead value
        // whose address this one happens to reuse
        entry.key.upgrade()?;
        Some(entry.sig.clone())
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.inner.read().unwrap().entries.len()
    }
}

/// Identity token: the handle's allocation address
fn identity(value: &Num) -> usize {
    Arc::as_ptr(value) as *const () as usize
}

static TABLE: OnceLock<UnitTable> = OnceLock::new();

fn table() -> &'static UnitTable {
    TABLE.get_or_init(UnitTable::new)
}

/// Register `value` with `sig` in the process-wide table
pub fn register(value: &Num, sig: UnitSig) {
    trace!(value = %value, sig = %sig, "registering quantity");
    table().register(value, sig);
}

/// The signature registered for `value`, or `None`
pub fn units_of(value: &Num) -> Option<UnitSig> {
    table().lookup(value)
}

/// Whether `value` is currently a registered quantity
pub fn is_quantity(value: &Num) -> bool {
    units_of(value).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::magnitude::num;
    use crate::units;

    #[test]
    fn test_register_and_lookup() {
        let value = num(4.0_f64);
        register(&value, units! { m: 1.0 });
        assert!(is_quantity(&value));
        assert_eq!(units_of(&value), Some(units! { m: 1.0 }));
    }

    #[test]
    fn test_value_equal_handles_are_independent() {
        let a = num(4.0_f64);
        let b = num(4.0_f64);
        register(&a, units! { ft: 1.0 });
        assert!(is_quantity(&a));
        assert!(!is_quantity(&b));
    }

    #[test]
    fn test_overwrite() {
        let value = num(9_i64);
        register(&value, units! { s: 1.0 });
        register(&value, units! { s: 2.0 });
        assert_eq!(units_of(&value), Some(units! { s: 2.0 }));
    }

    #[test]
    fn test_registration_does_not_extend_lifetime() {
        let value = num(3.0_f64);
        let weak = Arc::downgrade(&value);
        register(&value, units! { kg: 1.0 });
        drop(value);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_prune_reclaims_dead_entries() {
        let table = UnitTable::new();
        let keeper = num(1.0_f64);
        table.register(&keeper, units! { kg: 1.0 });
        for i in 0..(INITIAL_WATERMARK * 4) {
            let short_lived = num(i as f64);
            table.register(&short_lived, units! { s: 1.0 });
        }
        // Sweeps keep the table proportional to the live population
        assert!(table.len() < INITIAL_WATERMARK * 4);
        assert_eq!(table.lookup(&keeper), Some(units! { kg: 1.0 }));
    }

    #[test]
    fn test_concurrent_registration() {
        let handles: Vec<_> = (0..8)
            .map(|t| {
                std::thread::spawn(move || {
                    for i in 0..200 {
                        let value = num((t * 1000 + i) as f64);
                        register(&value, units! { s: 1.0 });
                        assert!(is_quantity(&value));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    }
}
