use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
/// Unix timestamp (seconds) used as the `from_date` lower bound of the next fetch.
///
/// Only ever replaced by the server-supplied `current_date`; never derived
/// from the local clock once the loop is running.
pub struct Cursor(i64);

impl Cursor {
    /// Requests the full submission history.
    pub const START: Cursor = Cursor(0);

    pub const fn new(unix_seconds: i64) -> Self {
        Self(unix_seconds)
    }

    /// Startup cursor `seconds` before `now_unix`, clamped at zero.
    pub fn lookback_from(now_unix: u64, seconds: u64) -> Self {
        let start = now_unix.saturating_sub(seconds);
        Self(i64::try_from(start).unwrap_or(i64::MAX))
    }

    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
