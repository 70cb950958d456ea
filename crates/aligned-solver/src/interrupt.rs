use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// A shared cancellation flag.
///
/// Clones share the same flag, so a caller can keep one handle and set it from
/// another thread while a search runs. Searches poll the flag once per outer
/// iteration and stop with [`SearchOutcome::Interrupted`]. The caller clears
/// it before starting a fresh search.
///
/// [`SearchOutcome::Interrupted`]: crate::SearchOutcome::Interrupted
///
/// # Examples
///
/// ```
/// use aligned_solver::Interrupt;
///
/// let interrupt = Interrupt::new();
/// let handle = interrupt.clone();
/// handle.set();
/// assert!(interrupt.is_set());
/// interrupt.clear();
/// assert!(!handle.is_set());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    flag: Arc<AtomicBool>,
}

impl Interrupt {
    /// Creates a cleared flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that running searches stop.
    pub fn set(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Clears a previous request.
    pub fn clear(&self) {
        self.flag.store(false, Ordering::Relaxed);
    }

    /// Returns `true` if a stop has been requested.
    #[must_use]
    #[inline]
    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
