use chrono::{DateTime, Utc};

/// Source of "now" for every phase computation
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

#[cfg(test)]
pub use manual::ManualClock;

#[cfg(test)]
mod manual {
    use super::Clock;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use std::cell::Cell;

    /// Clock that only moves when told to
    #[derive(Debug)]
    pub struct ManualClock(Cell<DateTime<Utc>>);

    impl ManualClock {
        pub fn new() -> Self {
            Self(Cell::new(Utc.with_ymd_and_hms(2024, 1, 8, 9, 0, 0).unwrap()))
        }

        pub fn advance(&self, by: Duration) {
            self.0.set(self.0.get() + by);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            self.0.get()
        }
    }
}
