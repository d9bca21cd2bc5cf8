//! Environment collaborators for message generation.
//!
//! Date and Message-Id generation read the wall clock, a random source, and
//! the local hostname. Each is a trait so tests can substitute fixed values.
//!
//! # Example
//!
//! ```
//! use quillmail_message::env::{Clock, FixedClock};
//! use chrono::DateTime;
//!
//! let at = DateTime::parse_from_rfc3339("2024-01-02T03:04:05+00:00").unwrap();
//! let clock = FixedClock::new(at);
//! assert_eq!(clock.now(), at);
//! ```

use chrono::{DateTime, FixedOffset, Local};

/// Abstraction over the wall clock.
pub trait Clock: Send + Sync {
    /// Returns the current time with its UTC offset.
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Source of random numbers for message identifiers.
///
/// Values need to be unpredictable enough to avoid collisions, not
/// cryptographically secure.
pub trait Entropy: Send + Sync {
    /// Returns a random 32-bit value.
    fn next_u32(&self) -> u32;
}

/// Provider of the local host name.
pub trait Hostname: Send + Sync {
    /// Returns the host name used in message identifiers.
    fn hostname(&self) -> String;
}

/// System clock in the local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Thread-local random number generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadEntropy;

impl Entropy for ThreadEntropy {
    fn next_u32(&self) -> u32 {
        rand::random()
    }
}

/// Host name reported by the operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHostname;

impl Hostname for SystemHostname {
    fn hostname(&self) -> String {
        let name = gethostname::gethostname().to_string_lossy().into_owned();
        if name.is_empty() {
            "localhost".to_string()
        } else {
            name
        }
    }
}

/// A clock that always reports the same time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<FixedOffset>);

impl FixedClock {
    /// Creates a clock frozen at `at`.
    #[must_use]
    pub const fn new(at: DateTime<FixedOffset>) -> Self {
        Self(at)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// An entropy source that always returns the same value.
#[derive(Debug, Clone, Copy)]
pub struct FixedEntropy(pub u32);

impl Entropy for FixedEntropy {
    fn next_u32(&self) -> u32 {
        self.0
    }
}

/// A fixed host name.
#[derive(Debug, Clone)]
pub struct StaticHostname(String);

impl StaticHostname {
    /// Creates a provider returning `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl Hostname for StaticHostname {
    fn hostname(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_collaborators() {
        let at = DateTime::parse_from_rfc3339("2024-01-02T03:04:05+02:00").unwrap();
        assert_eq!(FixedClock::new(at).now(), at);
        assert_eq!(FixedEntropy(7).next_u32(), 7);
        assert_eq!(StaticHostname::new("mx.example.com").hostname(), "mx.example.com");
    }

    #[test]
    fn test_system_hostname_not_empty() {
        assert!(!SystemHostname.hostname().is_empty());
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let first = SystemClock.now();
        let second = SystemClock.now();
        assert!(second >= first);
    }
}
