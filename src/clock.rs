/// Source of timestamps for [`Measurement::measured_at`](crate::Measurement).
///
/// The epoch and resolution are up to the implementation; the driver only
/// copies the value into results.
pub trait Clock {
    /// Current time in milliseconds.
    fn now(&mut self) -> u64;
}

/// Clock for setups without a time source. Always reports 0.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoClock;

impl Clock for NoClock {
    fn now(&mut self) -> u64 {
        0
    }
}

impl<T: Clock + ?Sized> Clock for &mut T {
    fn now(&mut self) -> u64 {
        T::now(self)
    }
}
