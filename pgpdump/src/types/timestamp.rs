use std::fmt;

use chrono::{Local, SecondsFormat, TimeZone, Utc};

/// A timestamp representable by OpenPGP.
///
/// OpenPGP stores times as unsigned 32-bit UNIX seconds.  A value of
/// zero means that no time was recorded.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(u32);

impl From<Timestamp> for u32 {
    fn from(t: Timestamp) -> Self {
        t.0
    }
}

impl From<u32> for Timestamp {
    fn from(t: u32) -> Self {
        Timestamp(t)
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_rfc3339(true))
    }
}

impl Timestamp {
    /// Returns whether this is the distinguished "no time recorded"
    /// value.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Adds a duration to this timestamp.
    ///
    /// The result is not limited to the 32-bit range, an expiration
    /// may well end after 2106.
    pub fn add(&self, d: Duration) -> i64 {
        self.0 as i64 + d.0 as i64
    }

    /// Formats the timestamp as RFC 3339 date.
    ///
    /// If `utc` is set, the time is rendered in UTC with a `Z`
    /// suffix, otherwise in the local time zone.
    pub fn to_rfc3339(&self, utc: bool) -> String {
        format_seconds(self.0 as i64, utc)
    }
}

/// Formats UNIX seconds as RFC 3339 date.
pub(crate) fn format_seconds(secs: i64, utc: bool) -> String {
    if utc {
        match Utc.timestamp_opt(secs, 0).single() {
            Some(t) => t.to_rfc3339_opts(SecondsFormat::Secs, true),
            None => secs.to_string(),
        }
    } else {
        match Local.timestamp_opt(secs, 0).single() {
            Some(t) => t.to_rfc3339_opts(SecondsFormat::Secs, false),
            None => secs.to_string(),
        }
    }
}

/// A duration representable by OpenPGP.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duration(u32);

impl From<Duration> for u32 {
    fn from(d: Duration) -> Self {
        d.0
    }
}

impl From<u32> for Duration {
    fn from(d: u32) -> Self {
        Duration(d)
    }
}

impl fmt::Debug for Duration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

impl Duration {
    /// Returns the duration in seconds.
    pub fn as_secs(&self) -> u64 {
        self.0 as u64
    }

    /// Returns the duration in days.
    pub fn days(&self) -> f64 {
        self.0 as f64 / 86400.0
    }

    /// Describes the duration relative to an unknown start, e.g.
    /// `"30.0 days after"`.
    pub fn relative(&self) -> String {
        format!("{:.1} days after", self.days())
    }
}
