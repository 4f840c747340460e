use core::fmt;

/// Decoded wait status of a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// The child called exit with this code (low 8 bits).
    Exited(i32),
    /// The child was terminated by a signal.
    Signaled { signal: i32, core_dumped: bool },
    Stopped(i32),
    Continued,
}

impl ExitStatus {
    /// Decodes the status word filled in by `wait4`.
    ///
    /// Layout: bits 0..7 hold the terminating signal (0 for a normal exit,
    /// 0x7f for a stop), bit 7 the core-dump flag, bits 8..15 the exit code
    /// or stop signal. `0xffff` means continued.
    pub fn from_raw(raw: i32) -> Self {
        let low = raw & 0x7f;
        if raw == 0xffff {
            ExitStatus::Continued
        } else if raw & 0xff == 0x7f {
            ExitStatus::Stopped((raw >> 8) & 0xff)
        } else if low == 0 {
            ExitStatus::Exited((raw >> 8) & 0xff)
        } else {
            ExitStatus::Signaled {
                signal: low,
                core_dumped: raw & 0x80 != 0,
            }
        }
    }

    pub fn success(&self) -> bool {
        *self == ExitStatus::Exited(0)
    }

    pub fn code(&self) -> Option<i32> {
        match self {
            ExitStatus::Exited(code) => Some(*code),
            _ => None,
        }
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitStatus::Exited(code) => write!(f, "exited with code {code}"),
            ExitStatus::Signaled {
                signal,
                core_dumped: true,
            } => write!(f, "killed by signal {signal} (core dumped)"),
            ExitStatus::Signaled { signal, .. } => write!(f, "killed by signal {signal}"),
            ExitStatus::Stopped(signal) => write!(f, "stopped by signal {signal}"),
            ExitStatus::Continued => f.write_str("continued"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_normal_exit() {
        assert_eq!(ExitStatus::from_raw(0), ExitStatus::Exited(0));
        assert_eq!(ExitStatus::from_raw(127 << 8), ExitStatus::Exited(127));
        assert!(ExitStatus::from_raw(0).success());
        assert_eq!(ExitStatus::from_raw(3 << 8).code(), Some(3));
    }

    #[test]
    fn decodes_signals() {
        // SIGKILL
        assert_eq!(
            ExitStatus::from_raw(9),
            ExitStatus::Signaled {
                signal: 9,
                core_dumped: false
            }
        );
        // SIGSEGV with core
        assert_eq!(
            ExitStatus::from_raw(11 | 0x80),
            ExitStatus::Signaled {
                signal: 11,
                core_dumped: true
            }
        );
        assert_eq!(ExitStatus::from_raw(9).code(), None);
    }

    #[test]
    fn decodes_stop_and_continue() {
        // SIGSTOP = 19
        assert_eq!(ExitStatus::from_raw((19 << 8) | 0x7f), ExitStatus::Stopped(19));
        assert_eq!(ExitStatus::from_raw(0xffff), ExitStatus::Continued);
    }
}
