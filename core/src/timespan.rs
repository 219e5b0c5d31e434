use chrono::{DateTime, Utc};
use std::fmt::Display;
use std::str::FromStr;

/// Both endpoints of the timespan of an empty collection.
pub const EPOCH: DateTime<Utc> = DateTime::<Utc>::UNIX_EPOCH;

#[derive(thiserror::Error, Debug, Eq, PartialEq)]
pub enum Error {
    #[error("Timespan ends before it starts")]
    Reversed {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    #[error("Invalid timespan format")]
    InvalidFormat(String),
    #[error("Invalid timespan endpoint")]
    InvalidDateTime(#[from] chrono::format::ParseError),
}

/// A closed interval of time, with `start <= end`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "TimespanParts")]
pub struct Timespan {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Timespan {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, Error> {
        if start <= end {
            Ok(Self { start, end })
        } else {
            Err(Error::Reversed { start, end })
        }
    }

    pub fn instant(timestamp: DateTime<Utc>) -> Self {
        Self {
            start: timestamp,
            end: timestamp,
        }
    }

    /// The smallest timespan containing every timestamp, or `None` if there are none.
    pub fn covering<I: IntoIterator<Item = DateTime<Utc>>>(timestamps: I) -> Option<Self> {
        timestamps.into_iter().fold(None, |span, timestamp| {
            Some(match span {
                Some(Self { start, end }) => Self {
                    start: start.min(timestamp),
                    end: end.max(timestamp),
                },
                None => Self::instant(timestamp),
            })
        })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }

    pub fn duration(&self) -> chrono::TimeDelta {
        self.end - self.start
    }
}

impl Default for Timespan {
    fn default() -> Self {
        Self::instant(EPOCH)
    }
}

impl Display for Timespan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}

impl FromStr for Timespan {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once('/')
            .ok_or_else(|| Error::InvalidFormat(s.to_string()))?;

        Self::new(
            DateTime::parse_from_rfc3339(start)?.to_utc(),
            DateTime::parse_from_rfc3339(end)?.to_utc(),
        )
    }
}

#[derive(serde::Deserialize)]
struct TimespanParts {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<TimespanParts> for Timespan {
    type Error = Error;

    fn try_from(value: TimespanParts) -> Result<Self, Self::Error> {
        Self::new(value.start, value.end)
    }
}
