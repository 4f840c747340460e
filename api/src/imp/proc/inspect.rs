use axerrno::LinuxError;
use core::fmt;
use proclab_core::procfs::{ProcSource, parse_kb, parse_stat_nice};
use proclab_core::sys::io_errno;
use proclab_process::{
    FdEntry, Field, NiceValue, Pid, ProcError, ProcResult, RunState, Unavailable,
};
use std::io;
use std::path::PathBuf;
use syscall_trace::syscall_trace;

/// Snapshot of one process as the kernel exposes it.
///
/// Every field is read independently; a process that terminates halfway
/// through leaves the later fields [`Unavailable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessReport {
    pub pid: Pid,
    pub name: Field<String>,
    pub state: Field<RunState>,
    pub parent: Field<Pid>,
    /// Virtual memory size in kB. Absent for zombies and kernel threads.
    pub vm_size_kb: Field<u64>,
    pub nice: Field<NiceValue>,
    pub exe: Field<PathBuf>,
    pub fds: Field<Vec<FdEntry>>,
}

impl ProcessReport {
    pub fn is_zombie(&self) -> bool {
        matches!(self.state, Field::Available(RunState::Zombie))
    }

    /// Open descriptors, treating an unreadable set as empty.
    pub fn open_fds(&self) -> &[FdEntry] {
        match &self.fds {
            Field::Available(fds) => fds.as_slice(),
            Field::Unavailable(_) => &[],
        }
    }
}

fn is_denied(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::PermissionDenied || io_errno(err) == Some(LinuxError::EPERM)
}

/// Classifies a failed read of a best-effort field.
fn degrade(err: &io::Error) -> Unavailable {
    if is_denied(err) {
        Unavailable::Denied
    } else {
        Unavailable::Missing
    }
}

/// Classifies a failed `status` read, which decides whether the process exists.
fn first_read_error(pid: Pid, err: io::Error) -> ProcError {
    match (err.kind(), io_errno(&err)) {
        (io::ErrorKind::NotFound, _) | (_, Some(LinuxError::ESRCH)) => {
            ProcError::ProcessNotFound(pid)
        }
        _ if is_denied(&err) => ProcError::AccessDenied(pid),
        _ => ProcError::Io(err),
    }
}

/// Classifies the `exe` read, the first one gated on the caller's right to
/// inspect the process. A refusal there fails the whole query; a missing link
/// (zombie, kernel thread) does not.
fn exe_field(pid: Pid, result: io::Result<PathBuf>) -> ProcResult<Field<PathBuf>> {
    match result {
        Err(err) if is_denied(&err) => {
            debug!("[inspect] exe of {} refused: {}", pid, err);
            Err(ProcError::AccessDenied(pid))
        }
        result => Ok(read_field(pid, "exe", result)),
    }
}

fn read_field<T>(pid: Pid, what: &str, result: io::Result<T>) -> Field<T> {
    match result {
        Ok(value) => Field::Available(value),
        Err(err) => {
            debug!("[inspect] {} of {} unavailable: {}", what, pid, err);
            Field::Unavailable(degrade(&err))
        }
    }
}

/// Decodes an optional raw value; a value that is present but unparsable is `Malformed`.
fn decode<T>(raw: Option<&str>, parse: impl FnOnce(&str) -> Option<T>) -> Field<T> {
    match raw {
        None => Field::Unavailable(Unavailable::Missing),
        Some(raw) => parse(raw).map_or(Field::Unavailable(Unavailable::Malformed), Field::Available),
    }
}

/// Read-only observer of live processes.
#[derive(Debug, Clone, Default)]
pub struct Inspector {
    source: ProcSource,
}

impl Inspector {
    pub fn new(source: ProcSource) -> Self {
        Self { source }
    }

    /// Reads name, state, parent, VmSize, nice value, executable path and
    /// open descriptors of `pid`.
    ///
    /// # Errors
    /// The `status` read decides whether the process exists
    /// ([`ProcError::ProcessNotFound`]). The `exe` read decides whether the
    /// caller may inspect it: a refusal there, as for a process owned by
    /// another user, is [`ProcError::AccessDenied`]. Any other failure only
    /// marks its own field.
    #[syscall_trace]
    pub fn inspect(&self, pid: Pid) -> ProcResult<ProcessReport> {
        let status = self
            .source
            .read_status(pid)
            .map_err(|err| first_read_error(pid, err))?;
        let exe = exe_field(pid, self.source.read_exe(pid))?;

        let nice = read_field(pid, "stat", self.source.read_stat(pid))
            .and_then(|stat| decode(Some(stat.as_str()), parse_stat_nice).map(NiceValue::new));

        Ok(ProcessReport {
            pid,
            name: decode(status.get("Name"), |name| Some(name.to_string())),
            state: decode(status.get("State"), RunState::from_status),
            parent: decode(status.get("PPid"), |ppid| ppid.parse().ok()),
            vm_size_kb: decode(status.get("VmSize"), parse_kb),
            nice,
            exe,
            fds: read_field(pid, "fd", self.source.read_fds(pid)),
        })
    }
}

/// Inspects `pid` through `/proc`.
pub fn inspect(pid: Pid) -> ProcResult<ProcessReport> {
    Inspector::default().inspect(pid)
}

impl fmt::Display for ProcessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PID: {}", self.pid)?;
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "State: {}", self.state)?;
        writeln!(f, "PPid: {}", self.parent)?;
        writeln!(
            f,
            "VmSize: {}",
            self.vm_size_kb.as_ref().map(|kb| format!("{kb} kB"))
        )?;
        writeln!(f, "Nice: {}", self.nice)?;
        writeln!(
            f,
            "Executable Path: {}",
            self.exe.as_ref().map(|exe| exe.display().to_string())
        )?;
        match &self.fds {
            Field::Available(fds) => {
                let list = fds.iter().map(ToString::to_string).collect::<Vec<_>>();
                write!(f, "Open File Descriptors: {} [{}]", fds.len(), list.join(", "))
            }
            Field::Unavailable(why) => write!(f, "Open File Descriptors: unavailable ({why})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::symlink;

    fn fabricate(root: &std::path::Path, pid: Pid, status: &str) -> PathBuf {
        let dir = root.join(pid.to_string());
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("status"), status).unwrap();
        dir
    }

    #[test]
    fn missing_process_fails_wholesale() {
        let root = tempfile::tempdir().unwrap();
        let inspector = Inspector::new(ProcSource::new(root.path()));
        assert!(matches!(
            inspector.inspect(31337),
            Err(ProcError::ProcessNotFound(31337))
        ));
    }

    #[test]
    fn zombie_entry_degrades_per_field() {
        let root = tempfile::tempdir().unwrap();
        let dir = fabricate(
            root.path(),
            500,
            "Name:\tdefunct-kid\nState:\tZ (zombie)\nPPid:\t499\n",
        );
        fs::create_dir(dir.join("fd")).unwrap();
        fs::write(dir.join("stat"), "500 (defunct-kid) Z 499 500 500 0 -1 0 0 0 0 0 0 0 0 0 20 0 1 0 1 0 0").unwrap();

        let report = Inspector::new(ProcSource::new(root.path()))
            .inspect(500)
            .unwrap();
        assert!(report.is_zombie());
        assert_eq!(report.name, Field::Available("defunct-kid".to_string()));
        assert_eq!(report.parent, Field::Available(499));
        assert_eq!(report.vm_size_kb, Field::Unavailable(Unavailable::Missing));
        assert_eq!(report.exe, Field::Unavailable(Unavailable::Missing));
        assert_eq!(report.fds, Field::Available(Vec::new()));
        assert_eq!(report.nice, Field::Available(NiceValue::new(0)));
    }

    #[test]
    fn garbage_values_are_malformed() {
        let root = tempfile::tempdir().unwrap();
        let dir = fabricate(
            root.path(),
            600,
            "Name:\tweird\nState:\t?? (unknown)\nPPid:\tnope\nVmSize:\tlots\n",
        );
        symlink("/bin/true", dir.join("exe")).unwrap();

        let report = Inspector::new(ProcSource::new(root.path()))
            .inspect(600)
            .unwrap();
        assert_eq!(report.state, Field::Unavailable(Unavailable::Malformed));
        assert_eq!(report.parent, Field::Unavailable(Unavailable::Malformed));
        assert_eq!(report.vm_size_kb, Field::Unavailable(Unavailable::Malformed));
        assert_eq!(report.exe, Field::Available(PathBuf::from("/bin/true")));
        // no stat file, no fd directory
        assert_eq!(report.nice, Field::Unavailable(Unavailable::Missing));
        assert!(report.open_fds().is_empty());
    }

    #[test]
    fn error_classification() {
        let denied = io::Error::from(io::ErrorKind::PermissionDenied);
        assert!(matches!(first_read_error(9, denied), ProcError::AccessDenied(9)));
        let gone = io::Error::from_raw_os_error(LinuxError::ESRCH.code());
        assert!(matches!(first_read_error(9, gone), ProcError::ProcessNotFound(9)));
        let eperm = io::Error::from_raw_os_error(LinuxError::EPERM.code());
        assert_eq!(degrade(&eperm), Unavailable::Denied);
        assert_eq!(
            degrade(&io::Error::from(io::ErrorKind::NotFound)),
            Unavailable::Missing
        );
    }

    #[test]
    fn refused_exe_denies_the_whole_query() {
        let denied = io::Error::from(io::ErrorKind::PermissionDenied);
        assert!(matches!(exe_field(42, Err(denied)), Err(ProcError::AccessDenied(42))));
        let eperm = io::Error::from_raw_os_error(LinuxError::EPERM.code());
        assert!(matches!(exe_field(42, Err(eperm)), Err(ProcError::AccessDenied(42))));
        let gone = io::Error::from(io::ErrorKind::NotFound);
        assert_eq!(
            exe_field(42, Err(gone)).unwrap(),
            Field::Unavailable(Unavailable::Missing)
        );
        assert_eq!(
            exe_field(42, Ok(PathBuf::from("/bin/sh"))).unwrap(),
            Field::Available(PathBuf::from("/bin/sh"))
        );
    }

    #[test]
    fn inspects_itself() {
        let pid = std::process::id();
        let report = inspect(pid).unwrap();
        assert_eq!(report.pid, pid);
        assert!(matches!(
            report.state,
            Field::Available(RunState::Running | RunState::Sleeping)
        ));
        assert!(report.vm_size_kb.is_available());
        assert_eq!(
            report.exe.clone().ok(),
            std::env::current_exe().ok().and_then(|exe| fs::canonicalize(exe).ok())
        );
        assert!(!report.open_fds().is_empty());
        let text = report.to_string();
        assert!(text.contains("Open File Descriptors:"));
        assert!(text.contains(&format!("PID: {pid}")));
    }

    #[test]
    fn nonexistent_pid_is_not_found() {
        // above any configurable pid_max (2^22)
        assert!(matches!(
            inspect(999_999_999),
            Err(ProcError::ProcessNotFound(999_999_999))
        ));
    }
}
