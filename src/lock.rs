use core::ops::DerefMut;

/// The mutex guarding a spy's ledger.
///
/// `std::sync::Mutex` by default, `spin::Mutex` with the `spin-lock` feature.
#[derive(Default)]
pub(crate) struct Mutex<T> {
    #[cfg(not(feature = "spin-lock"))]
    inner: std::sync::Mutex<T>,
    #[cfg(feature = "spin-lock")]
    inner: spin::Mutex<T>,
}

impl<T> Mutex<T> {
    /// A panicking user matcher may poison the lock; the ledger stays consistent, so poisoning is ignored.
    #[cfg(not(feature = "spin-lock"))]
    pub fn lock(&self) -> impl DerefMut<Target = T> + '_ {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    #[cfg(feature = "spin-lock")]
    pub fn lock(&self) -> impl DerefMut<Target = T> + '_ {
        self.inner.lock()
    }
}
