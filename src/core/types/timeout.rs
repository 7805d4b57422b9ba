//! Wait timeout expressed the way native wait calls expect it

use std::fmt;
use std::time::Duration;

/// Raw millisecond value meaning "wait forever"
pub const INFINITE: u32 = 0xFFFF_FFFF;

/// Timeout for a blocking wait.
///
/// The raw value is private: bounded timeouts only come from
/// [`Timeout::from_millis`] and the `From` impls, which never produce the
/// infinite sentinel. `Timeout::INFINITE` is the only unbounded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timeout {
    raw: u32,
}

impl Timeout {
    /// Wait forever
    pub const INFINITE: Self = Timeout { raw: INFINITE };

    /// Poll without blocking
    pub const IMMEDIATE: Self = Timeout { raw: 0 };

    /// Creates a bounded timeout.
    ///
    /// The raw infinite sentinel is clamped to the largest finite value.
    pub const fn from_millis(ms: u32) -> Self {
        if ms == INFINITE {
            Timeout { raw: INFINITE - 1 }
        } else {
            Timeout { raw: ms }
        }
    }

    /// Returns the value handed to the native wait call
    pub const fn as_raw(&self) -> u32 {
        self.raw
    }

    /// Checks if this is the infinite sentinel
    pub const fn is_infinite(&self) -> bool {
        self.raw == INFINITE
    }

    /// The bound in milliseconds, `None` when infinite
    pub const fn millis(&self) -> Option<u32> {
        if self.is_infinite() {
            None
        } else {
            Some(self.raw)
        }
    }
}

impl Default for Timeout {
    fn default() -> Self {
        Timeout::INFINITE
    }
}

impl From<Duration> for Timeout {
    fn from(duration: Duration) -> Self {
        let ms = u32::try_from(duration.as_millis()).unwrap_or(INFINITE - 1);
        Timeout::from_millis(ms)
    }
}

impl From<Option<u32>> for Timeout {
    fn from(ms: Option<u32>) -> Self {
        ms.map_or(Timeout::INFINITE, Timeout::from_millis)
    }
}

impl fmt::Display for Timeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.millis() {
            None => write!(f, "infinite"),
            Some(ms) => write!(f, "{}ms", ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_values() {
        assert_eq!(Timeout::INFINITE.as_raw(), 0xFFFF_FFFF);
        assert_eq!(Timeout::IMMEDIATE.as_raw(), 0);
        assert_eq!(Timeout::from_millis(1500).as_raw(), 1500);
    }

    #[test]
    fn test_bounded_never_becomes_infinite() {
        let t = Timeout::from_millis(u32::MAX);
        assert!(!t.is_infinite());
        assert_eq!(t.as_raw(), INFINITE - 1);
        assert_eq!(t.millis(), Some(u32::MAX - 1));

        let t = Timeout::from(Duration::from_secs(u64::MAX / 1000));
        assert!(!t.is_infinite());
        assert_ne!(t.as_raw(), INFINITE);

        let t = Timeout::from(Some(u32::MAX));
        assert!(!t.is_infinite());
        assert_ne!(t.as_raw(), INFINITE);
    }

    #[test]
    fn test_raw_matches_infinite_flag() {
        for t in [
            Timeout::INFINITE,
            Timeout::IMMEDIATE,
            Timeout::from_millis(u32::MAX),
            Timeout::from_millis(u32::MAX - 1),
            Timeout::from(Duration::MAX),
        ] {
            assert_eq!(t.is_infinite(), t.as_raw() == INFINITE);
        }
    }

    #[test]
    fn test_from_duration() {
        assert_eq!(
            Timeout::from(Duration::from_millis(750)),
            Timeout::from_millis(750)
        );
        assert_eq!(Timeout::from(Duration::ZERO), Timeout::IMMEDIATE);
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Timeout::from(None), Timeout::INFINITE);
        assert_eq!(Timeout::from(Some(10)).millis(), Some(10));
    }

    #[test]
    fn test_display() {
        assert_eq!(Timeout::INFINITE.to_string(), "infinite");
        assert_eq!(Timeout::from_millis(42).to_string(), "42ms");
        assert_eq!(Timeout::default(), Timeout::INFINITE);
    }
}
