use chrono::{ DateTime, Duration, Utc };

/// Post-execution quiet period.
///
/// After any tick that executed at least one path, evaluation is skipped
/// entirely until the suppress-until timestamp: ticks inside
/// `[armed_at, armed_at + cooldown)` are gated out, and the tick whose
/// timestamp reaches the boundary evaluates again. Bounds trade frequency
/// and avoids re-trading the same transient mispricing.
#[derive(Debug, Clone, Copy)]
pub struct CooldownScheduler {
    cooldown: Duration,
    suppress_until: Option<DateTime<Utc>>,
}

impl CooldownScheduler {
    pub fn new(cooldown_secs: i64) -> Self {
        Self {
            cooldown: Duration::seconds(cooldown_secs),
            suppress_until: None,
        }
    }

    /// True when a tick at `now` must skip evaluation.
    #[inline]
    pub fn is_suppressed(&self, now: DateTime<Utc>) -> bool {
        match self.suppress_until {
            Some(until) => now < until,
            None => false,
        }
    }

    /// Arm the quiet period off a tick that just executed.
    pub fn arm(&mut self, executed_at: DateTime<Utc>) {
        self.suppress_until = Some(executed_at + self.cooldown);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, secs).unwrap()
    }

    #[test]
    fn inactive_until_armed() {
        let scheduler = CooldownScheduler::new(3);
        assert!(!scheduler.is_suppressed(at(0)));
    }

    #[test]
    fn suppresses_the_half_open_window() {
        let mut scheduler = CooldownScheduler::new(3);
        scheduler.arm(at(10));

        assert!(scheduler.is_suppressed(at(10)));
        assert!(scheduler.is_suppressed(at(11)));
        assert!(scheduler.is_suppressed(at(12)));
        // Resumes exactly at the boundary.
        assert!(!scheduler.is_suppressed(at(13)));
        assert!(!scheduler.is_suppressed(at(14)));
    }

    #[test]
    fn rearming_extends_the_window() {
        let mut scheduler = CooldownScheduler::new(3);
        scheduler.arm(at(10));
        scheduler.arm(at(13));
        assert!(scheduler.is_suppressed(at(15)));
        assert!(!scheduler.is_suppressed(at(16)));
    }
}
