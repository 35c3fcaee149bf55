use chrono::{DateTime, NaiveDate, Utc};

/// Represents an entity responsible for providing dates across application. This can allow it to
/// be used for testing
pub trait Clock: Sync + Send {
    fn time(&self) -> DateTime<Utc>;

    /// The UTC calendar date everything in the ledger is keyed by.
    fn today(&self) -> NaiveDate {
        self.time().date_naive()
    }
}

pub struct DefaultClock;

impl Clock for DefaultClock {
    fn time(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a single moment.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn at_date(date: NaiveDate) -> Self {
        Self(date.and_time(chrono::NaiveTime::MIN).and_utc())
    }
}

impl Clock for FixedClock {
    fn time(&self) -> DateTime<Utc> {
        self.0
    }
}
