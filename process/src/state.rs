use core::fmt;
use num_enum::TryFromPrimitive;

/// Run state as reported by the `State:` line of `/proc/<pid>/status`.
#[repr(u8)]
#[derive(TryFromPrimitive, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Running = b'R',
    Sleeping = b'S',
    /// Uninterruptible sleep, usually I/O.
    DiskSleep = b'D',
    /// Terminated, status not yet consumed by the parent.
    Zombie = b'Z',
    Stopped = b'T',
    TracingStop = b't',
    Dead = b'X',
    /// Idle kernel thread.
    Idle = b'I',
}

impl RunState {
    /// Decodes the state letter at the start of a status value such as `Z (zombie)`.
    pub fn from_status(value: &str) -> Option<Self> {
        let letter = value.trim_start().bytes().next()?;
        Self::try_from(letter).ok()
    }

    pub fn letter(self) -> char {
        self as u8 as char
    }

    pub fn is_zombie(self) -> bool {
        self == RunState::Zombie
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Running => "running",
            RunState::Sleeping => "sleeping",
            RunState::DiskSleep => "disk sleep",
            RunState::Zombie => "zombie",
            RunState::Stopped => "stopped",
            RunState::TracingStop => "tracing stop",
            RunState::Dead => "dead",
            RunState::Idle => "idle",
        };
        write!(f, "{} ({})", self.letter(), name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_status_values() {
        assert_eq!(RunState::from_status("Z (zombie)"), Some(RunState::Zombie));
        assert_eq!(RunState::from_status("  S (sleeping)"), Some(RunState::Sleeping));
        assert_eq!(RunState::from_status("t (tracing stop)"), Some(RunState::TracingStop));
        assert_eq!(RunState::from_status("Q"), None);
        assert_eq!(RunState::from_status(""), None);
    }

    #[test]
    fn display_matches_proc() {
        assert_eq!(RunState::Zombie.to_string(), "Z (zombie)");
        assert_eq!(RunState::Running.letter(), 'R');
    }
}
