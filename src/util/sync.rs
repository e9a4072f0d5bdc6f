use std::sync::{Mutex, MutexGuard, PoisonError};

/// Coarse-grained lock guarding an entire value.
///
/// A poisoned lock is recovered rather than propagated;
/// every guarded mutation is applied as a whole or not at all.
pub(crate) struct Lock<T>(Mutex<T>);

impl<T> Lock<T> {
    pub(crate) fn new(t: T) -> Self {
        Self(Mutex::new(t))
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, T> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Default> Default for Lock<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
