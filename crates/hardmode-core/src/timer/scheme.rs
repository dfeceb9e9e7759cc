use serde::{Deserialize, Serialize};

/// Work and break durations plus the long-break cadence.
///
/// The core does not validate bounds; hosts are expected to feed sane values
/// (positive work minutes and cadence).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheme {
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u32,
    #[serde(default = "default_short_break_minutes")]
    pub short_break_minutes: u32,
    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: u32,
    /// Completed focus blocks after which a long break is granted.
    #[serde(default = "default_cadence")]
    pub cadence: u32,
}

fn default_work_minutes() -> u32 {
    25
}
fn default_short_break_minutes() -> u32 {
    5
}
fn default_long_break_minutes() -> u32 {
    15
}
fn default_cadence() -> u32 {
    4
}

impl Scheme {
    pub fn new(
        work_minutes: u32,
        short_break_minutes: u32,
        long_break_minutes: u32,
        cadence: u32,
    ) -> Self {
        Self {
            work_minutes,
            short_break_minutes,
            long_break_minutes,
            cadence,
        }
    }

    /// Length of one focus block in seconds.
    ///
    /// Uses saturating arithmetic to prevent overflow with large values.
    pub fn work_secs(&self) -> u32 {
        self.work_minutes.saturating_mul(60)
    }

    pub fn short_break_secs(&self) -> u32 {
        self.short_break_minutes.saturating_mul(60)
    }

    pub fn long_break_secs(&self) -> u32 {
        self.long_break_minutes.saturating_mul(60)
    }
}

impl Default for Scheme {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            short_break_minutes: default_short_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
            cadence: default_cadence(),
        }
    }
}
