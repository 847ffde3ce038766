use std::{fmt, ops};

use time::{Duration, OffsetDateTime};

/// A timestamp with second precision, stored as unix time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc().unix_timestamp())
    }

    pub const fn from_secs(secs: i64) -> Self {
        Self(secs)
    }

    pub const fn as_secs(self) -> i64 {
        self.0
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(from: OffsetDateTime) -> Self {
        Self(from.unix_timestamp())
    }
}

impl ops::Add<Duration> for Timestamp {
    type Output = Self;
    fn add(self, rhs: Duration) -> Self {
        Self(self.0 + rhs.whole_seconds())
    }
}

impl ops::Sub<Duration> for Timestamp {
    type Output = Self;
    fn sub(self, rhs: Duration) -> Self {
        Self(self.0 - rhs.whole_seconds())
    }
}

impl ops::Sub for Timestamp {
    type Output = Duration;
    fn sub(self, rhs: Self) -> Duration {
        Duration::seconds(self.0 - rhs.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match OffsetDateTime::from_unix_timestamp(self.0) {
            Ok(dt) => write!(f, "{dt}"),
            Err(_) => write!(f, "{}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_from_into_secs() {
        let t1 = Timestamp::now();
        let t2 = Timestamp::from_secs(t1.as_secs());
        assert_eq!(t1, t2);
    }

    #[test]
    fn add_and_subtract_durations() {
        let t = Timestamp::from_secs(1_000);
        assert_eq!(Timestamp::from_secs(1_060), t + Duration::minutes(1));
        assert_eq!(Timestamp::from_secs(940), t - Duration::minutes(1));
        assert_eq!(Duration::seconds(60), (t + Duration::minutes(1)) - t);
    }
}
