//! Message identifier generation.

use crate::env::{Clock, Entropy, Hostname, SystemClock, SystemHostname, ThreadEntropy};
use std::fmt;
use std::sync::Arc;

/// Generates unique message identifiers.
///
/// Identifiers have the form `<seconds>.<micros>.<random>@<hostname>`, built
/// from the wall clock, a 31-bit random number, and the host name. The angle
/// brackets are added when the `Message-Id` header is encoded.
#[derive(Clone)]
pub struct MessageIdGenerator {
    clock: Arc<dyn Clock>,
    entropy: Arc<dyn Entropy>,
    hostname: Arc<dyn Hostname>,
}

impl MessageIdGenerator {
    /// Creates a generator from explicit collaborators.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        entropy: Arc<dyn Entropy>,
        hostname: Arc<dyn Hostname>,
    ) -> Self {
        Self {
            clock,
            entropy,
            hostname,
        }
    }

    /// Replaces the clock.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the entropy source.
    #[must_use]
    pub fn with_entropy(mut self, entropy: Arc<dyn Entropy>) -> Self {
        self.entropy = entropy;
        self
    }

    /// Replaces the host name provider.
    #[must_use]
    pub fn with_hostname(mut self, hostname: Arc<dyn Hostname>) -> Self {
        self.hostname = hostname;
        self
    }

    /// Generates a new identifier.
    #[must_use]
    pub fn generate(&self) -> String {
        let now = self.clock.now();
        let nonce = self.entropy.next_u32() & 0x7fff_ffff;
        format!(
            "{}.{:06}.{}@{}",
            now.timestamp(),
            now.timestamp_subsec_micros(),
            nonce,
            self.hostname.hostname()
        )
    }
}

impl Default for MessageIdGenerator {
    fn default() -> Self {
        Self::new(
            Arc::new(SystemClock),
            Arc::new(ThreadEntropy),
            Arc::new(SystemHostname),
        )
    }
}

impl fmt::Debug for MessageIdGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageIdGenerator").finish_non_exhaustive()
    }
}
