use time::OffsetDateTime;

pub trait Clock: 'static + Sync + Send {
    fn current_year(&self) -> i32;
}

pub trait DependOnClock: 'static + Sync + Send {
    type Clock: Clock;
    fn clock(&self) -> &Self::Clock;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_year(&self) -> i32 {
        OffsetDateTime::now_utc().year()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(i32);

impl FixedClock {
    pub fn new(year: impl Into<i32>) -> Self {
        Self(year.into())
    }
}

impl Clock for FixedClock {
    fn current_year(&self) -> i32 {
        self.0
    }
}
