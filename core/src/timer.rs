use web_time::{Duration, Instant};

/// What the countdown looks like at a given instant.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CountdownStatus {
    Idle,
    Running { remaining: Duration },
    Expired,
    Cancelled,
}

impl CountdownStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Expired | Self::Cancelled)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Running { deadline: Instant },
    Expired,
    Cancelled,
}

/// Countdown driven by the host's periodic tick.
///
/// Nothing runs in the background: the host passes the current instant to [`Countdown::poll`], and
/// [`Countdown::cancel`] is the single teardown call. Once expired or cancelled the countdown stays that way
/// until started again.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Countdown {
    phase: Phase,
}

impl Default for Countdown {
    fn default() -> Self {
        Self { phase: Phase::Idle }
    }
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts (or restarts) the countdown so that it expires `duration` after `now`.
    pub fn start(&mut self, duration: Duration, now: Instant) {
        log::debug!("Countdown started for {}s", duration.as_secs());
        self.phase = Phase::Running {
            deadline: now + duration,
        };
    }

    pub fn poll(&mut self, now: Instant) -> CountdownStatus {
        match self.phase {
            Phase::Idle => CountdownStatus::Idle,
            Phase::Running { deadline } if now >= deadline => {
                log::debug!("Countdown expired");
                self.phase = Phase::Expired;
                CountdownStatus::Expired
            }
            Phase::Running { deadline } => CountdownStatus::Running {
                remaining: deadline - now,
            },
            Phase::Expired => CountdownStatus::Expired,
            Phase::Cancelled => CountdownStatus::Cancelled,
        }
    }

    /// Stops a running countdown. Returns `true` only for the call that actually stopped it.
    pub fn cancel(&mut self) -> bool {
        if self.is_running() {
            log::debug!("Countdown cancelled");
            self.phase = Phase::Cancelled;
            true
        } else {
            false
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    pub fn is_expired(&self) -> bool {
        matches!(self.phase, Phase::Expired)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.phase, Phase::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_until_started() {
        let mut countdown = Countdown::new();

        assert_eq!(countdown.poll(Instant::now()), CountdownStatus::Idle);
        assert!(!countdown.cancel());
    }

    #[test]
    fn counts_down_then_expires() {
        let start = Instant::now();
        let mut countdown = Countdown::new();
        countdown.start(Duration::from_secs(30), start);

        assert_eq!(
            countdown.poll(start + Duration::from_secs(12)),
            CountdownStatus::Running {
                remaining: Duration::from_secs(18)
            }
        );
        assert_eq!(countdown.poll(start + Duration::from_secs(31)), CountdownStatus::Expired);
        assert!(countdown.is_expired());
        // earlier instants cannot bring it back
        assert_eq!(countdown.poll(start), CountdownStatus::Expired);
    }

    #[test]
    fn cancel_happens_once() {
        let start = Instant::now();
        let mut countdown = Countdown::new();
        countdown.start(Duration::from_secs(30), start);

        assert!(countdown.cancel());
        assert!(!countdown.cancel());
        assert_eq!(countdown.poll(start + Duration::from_secs(60)), CountdownStatus::Cancelled);
        assert!(CountdownStatus::Cancelled.is_terminal());
    }

    #[test]
    fn expired_countdown_cannot_be_cancelled() {
        let start = Instant::now();
        let mut countdown = Countdown::new();
        countdown.start(Duration::from_secs(1), start);
        countdown.poll(start + Duration::from_secs(1));

        assert!(!countdown.cancel());
        assert!(countdown.is_expired());
    }

    #[test]
    fn restart_resets_deadline() {
        let start = Instant::now();
        let mut countdown = Countdown::new();
        countdown.start(Duration::from_secs(5), start);
        countdown.cancel();

        countdown.start(Duration::from_secs(5), start + Duration::from_secs(10));

        assert!(countdown.is_running());
        assert_eq!(
            countdown.poll(start + Duration::from_secs(12)),
            CountdownStatus::Running {
                remaining: Duration::from_secs(3)
            }
        );
    }
}
