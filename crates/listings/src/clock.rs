use chrono::{DateTime, NaiveDate, Utc};

/// Source of creation timestamps for stored entities.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall-clock time in UTC.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Advances a fixed step on every reading so creation order is observable.
#[cfg(test)]
pub(crate) struct SteppingClock {
    start: DateTime<Utc>,
    step: chrono::Duration,
    ticks: std::sync::atomic::AtomicI32,
}

#[cfg(test)]
impl SteppingClock {
    pub(crate) fn new(start: DateTime<Utc>, step: chrono::Duration) -> Self {
        Self {
            start,
            step,
            ticks: std::sync::atomic::AtomicI32::new(0),
        }
    }

    /// Starts at 2024-03-01T09:00:00Z and moves one minute per reading.
    pub(crate) fn per_minute() -> Self {
        use chrono::TimeZone;
        Self::new(
            Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0)
                .single()
                .expect("valid start"),
            chrono::Duration::minutes(1),
        )
    }
}

#[cfg(test)]
impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let tick = self
            .ticks
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.start + self.step * tick
    }
}

/// Always reports the same instant.
#[cfg(test)]
pub(crate) struct FixedClock(pub(crate) DateTime<Utc>);

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
