//! Time abstraction for the orientation filter
//!
//! The complementary filter integrates angular rate over the time elapsed
//! between reads. The driver owns a [`TimeSource`] so the clock can be a
//! hardware timer on target and a controllable fake in tests.

/// Monotonic time source.
///
/// # Example
///
/// ```ignore
/// #[derive(Clone, Copy)]
/// struct EmbassyClock;
///
/// impl TimeSource for EmbassyClock {
///     fn now_us(&self) -> u64 {
///         embassy_time::Instant::now().as_micros()
///     }
/// }
/// ```
pub trait TimeSource {
    /// Returns current time in microseconds since an arbitrary fixed epoch.
    fn now_us(&self) -> u64;

    /// Returns elapsed time in microseconds since a reference point.
    ///
    /// Saturates to zero if the reference lies in the future.
    fn elapsed_since(&self, reference_us: u64) -> u64 {
        self.now_us().saturating_sub(reference_us)
    }
}

impl<T: TimeSource> TimeSource for &T {
    fn now_us(&self) -> u64 {
        (**self).now_us()
    }
}
