//! Gates and tolerance configuration
//!
//! Two independent toggles compose into the effective checking state:
//!
//! - the compile-time gate, the `check-units` cargo feature, resolved once
//!   per build;
//! - the runtime gate, a thread-local flag with scoped save/restore.
//!
//! Checking happens only when both are on. The power tolerance is a
//! thread-local `Option<f64>` consulted by signature power comparison.

use std::cell::Cell;

thread_local! {
    static RUNTIME_GATE: Cell<bool> = Cell::new(true);
    static POWER_TOLERANCE: Cell<Option<f64>> = Cell::new(None);
}

/// Compile-time gate, fixed per build by the `check-units` feature
pub const COMPILE_TIME_GATE: bool = cfg!(feature = "check-units");

/// Whether the runtime gate is currently on for this thread
pub fn runtime_checks_enabled() -> bool {
    RUNTIME_GATE.with(|g| g.get())
}

/// Set the runtime gate for this thread
pub fn set_runtime_checks(enabled: bool) {
    RUNTIME_GATE.with(|g| g.set(enabled));
}

/// Effective checking state: compile-time gate AND runtime gate
pub fn checking_enabled() -> bool {
    COMPILE_TIME_GATE && runtime_checks_enabled()
}

/// RAII override of the runtime gate; restores the prior value on drop,
/// including drops during unwinding
pub struct ScopedCheckGate {
    previous: bool,
}

impl ScopedCheckGate {
    /// Force checking off until the guard is dropped
    pub fn disable() -> Self {
        let previous = runtime_checks_enabled();
        set_runtime_checks(false);
        Self { previous }
    }

    /// Force checking on until the guard is dropped
    pub fn enable() -> Self {
        let previous = runtime_checks_enabled();
        set_runtime_checks(true);
        Self { previous }
    }
}

impl Drop for ScopedCheckGate {
    fn drop(&mut self) {
        set_runtime_checks(self.previous);
    }
}

/// Run `f` with unit checking disabled, restoring the prior gate state on
/// every exit path
pub fn without_checks<T>(f: impl FnOnce() -> T) -> T {
    let _gate = ScopedCheckGate::disable();
    f()
}

/// The active power comparison tolerance, if any
pub fn power_tolerance() -> Option<f64> {
    POWER_TOLERANCE.with(|t| t.get())
}

/// Set the power comparison tolerance for this thread. `None` restores
/// exact comparison.
pub fn set_power_tolerance(tolerance: Option<f64>) {
    POWER_TOLERANCE.with(|t| t.set(tolerance));
}

struct ToleranceGuard {
    previous: Option<f64>,
}

impl Drop for ToleranceGuard {
    fn drop(&mut self) {
        set_power_tolerance(self.previous);
    }
}

/// Run `f` with the given power tolerance, restoring the prior value on
/// every exit path
pub fn with_power_tolerance<T>(tolerance: f64, f: impl FnOnce() -> T) -> T {
    let _guard = ToleranceGuard {
        previous: power_tolerance(),
    };
    set_power_tolerance(Some(tolerance));
    f()
}
