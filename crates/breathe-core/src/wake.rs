//! Keep-awake seam.
//!
//! Mirrors a screen wake lock: acquired when a run starts, held for the
//! whole run, released when the run ends however it ends. Acquisition is
//! best-effort; `None` means the platform refused, and the run proceeds
//! without a lock.

/// An acquired wake lock. Dropping the guard releases it.
pub trait WakeGuard: Send {}

pub trait KeepAwake: Send {
    /// Try to acquire a wake lock. `None` is not an error.
    fn acquire(&self) -> Option<Box<dyn WakeGuard>>;
}

/// Provider for platforms with nothing to hold.
pub struct NoKeepAwake;

impl KeepAwake for NoKeepAwake {
    fn acquire(&self) -> Option<Box<dyn WakeGuard>> {
        None
    }
}
