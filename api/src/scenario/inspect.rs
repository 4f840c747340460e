use crate::imp::proc::{ProcessReport, inspect};
use proclab_process::{Pid, ProcResult, parse_pid};
use std::io::{BufRead, Write};

/// Inspects `pid`, or a PID read from `input` when none is given, and
/// prints the report.
pub fn run(pid: Option<Pid>, mut input: impl BufRead) -> ProcResult<ProcessReport> {
    let pid = match pid {
        Some(pid) => pid,
        None => {
            print!("Enter PID to inspect: ");
            std::io::stdout().flush()?;
            let mut line = String::new();
            input.read_line(&mut line)?;
            parse_pid(&line)?
        }
    };
    let report = inspect(pid)?;
    println!("{report}");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proclab_process::ProcError;

    #[test]
    fn reads_the_pid_from_input() {
        let me = std::process::id();
        let report = run(None, format!("{me}\n").as_bytes()).unwrap();
        assert_eq!(report.pid, me);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            run(None, "twelve\n".as_bytes()),
            Err(ProcError::InvalidInput(_))
        ));
        assert!(matches!(
            run(None, "".as_bytes()),
            Err(ProcError::InvalidInput(_))
        ));
    }
}
