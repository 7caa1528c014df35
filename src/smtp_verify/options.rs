use std::time::Duration;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// Configuration knobs for [`BannerProber`](super::BannerProber).
///
/// The three timeouts are independent: `connect_timeout` bounds the TCP
/// handshake, `greeting_timeout` the whole banner, `idle_timeout` any single
/// read or write once connected.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpProbeOptions {
    pub port: u16,
    pub connect_timeout: Duration,
    pub greeting_timeout: Duration,
    pub idle_timeout: Duration,
    pub ipv6: bool,
}

impl Default for SmtpProbeOptions {
    fn default() -> Self {
        Self {
            port: 25,
            connect_timeout: Duration::from_secs(5),
            greeting_timeout: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(5),
            ipv6: false,
        }
    }
}

impl SmtpProbeOptions {
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_timeouts(mut self, connect: Duration, greeting: Duration, idle: Duration) -> Self {
        self.connect_timeout = connect;
        self.greeting_timeout = greeting;
        self.idle_timeout = idle;
        self
    }

    /// Upper bound of a whole probe: resolve + connect + greeting + QUIT.
    pub fn session_budget(&self) -> Duration {
        self.connect_timeout * 2 + self.greeting_timeout + self.idle_timeout * 2
    }
}
