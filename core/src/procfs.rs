//! Read-only access to the kernel's per-process metadata under `/proc/<pid>`.
//!
//! This layer only reads and parses; it reports raw I/O errors and leaves the
//! decision of what a failure means to the caller.

use proclab_process::{FdEntry, Pid};
use std::fs;
use std::io;
use std::path::PathBuf;

const DEFAULT_ROOT: &str = "/proc";

/// Parsed `/proc/<pid>/status`: one `Key:\tvalue` pair per line.
#[derive(Debug, Clone, Default)]
pub struct StatusFile {
    entries: Vec<(String, String)>,
}

impl StatusFile {
    pub fn parse(content: &str) -> Self {
        let entries = content
            .lines()
            .filter_map(|line| line.split_once(':'))
            .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
            .collect();
        Self { entries }
    }

    /// Value of the first line named `key`, without the key or surrounding whitespace.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

/// Parses a size line value such as `12345 kB` into kilobytes.
pub fn parse_kb(value: &str) -> Option<u64> {
    let mut parts = value.split_whitespace();
    let amount = parts.next()?.parse().ok()?;
    match parts.next() {
        None | Some("kB") => Some(amount),
        Some(_) => None,
    }
}

/// Extracts the nice value (field 19) from a `/proc/<pid>/stat` line.
///
/// The command name in field 2 is parenthesised and may itself contain
/// spaces and parentheses, so counting starts after the last `)`.
pub fn parse_stat_nice(stat: &str) -> Option<i32> {
    let (_, rest) = stat.rsplit_once(')')?;
    // rest starts at field 3 (state)
    rest.split_whitespace().nth(19 - 3)?.parse().ok()
}

/// Where process metadata is read from.
#[derive(Debug, Clone)]
pub struct ProcSource {
    root: PathBuf,
}

impl Default for ProcSource {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT)
    }
}

impl ProcSource {
    /// A source rooted somewhere other than `/proc`, e.g. a fabricated tree.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn process_dir(&self, pid: Pid) -> PathBuf {
        self.root.join(pid.to_string())
    }

    pub fn read_status(&self, pid: Pid) -> io::Result<StatusFile> {
        let path = self.process_dir(pid).join("status");
        trace!("[procfs] reading {}", path.display());
        fs::read_to_string(path).map(|content| StatusFile::parse(&content))
    }

    pub fn read_stat(&self, pid: Pid) -> io::Result<String> {
        fs::read_to_string(self.process_dir(pid).join("stat"))
    }

    /// Resolves the `exe` link. A process without an address space (zombie,
    /// kernel thread) has no target and yields `NotFound`.
    pub fn read_exe(&self, pid: Pid) -> io::Result<PathBuf> {
        fs::read_link(self.process_dir(pid).join("exe"))
    }

    /// Lists open descriptors, sorted by number. Entries that disappear while
    /// listing keep their number and lose their target.
    pub fn read_fds(&self, pid: Pid) -> io::Result<Vec<FdEntry>> {
        let dir = self.process_dir(pid).join("fd");
        let mut fds = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let Some(fd) = entry.file_name().to_str().and_then(|name| name.parse().ok()) else {
                continue;
            };
            fds.push(FdEntry {
                fd,
                target: fs::read_link(entry.path()).ok(),
            });
        }
        fds.sort_by_key(|entry| entry.fd);
        Ok(fds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::symlink;
    use std::path::Path;

    const STATUS: &str = "Name:\tsleep\nUmask:\t0022\nState:\tS (sleeping)\nTgid:\t4242\nPid:\t4242\nPPid:\t1\nVmSize:\t    8192 kB\n";

    #[test]
    fn status_lines_are_keyed() {
        let status = StatusFile::parse(STATUS);
        assert_eq!(status.get("Name"), Some("sleep"));
        assert_eq!(status.get("State"), Some("S (sleeping)"));
        assert_eq!(status.get("PPid"), Some("1"));
        assert_eq!(status.get("VmSize").and_then(parse_kb), Some(8192));
        assert_eq!(status.get("VmRSS"), None);
    }

    #[test]
    fn kb_values() {
        assert_eq!(parse_kb("0 kB"), Some(0));
        assert_eq!(parse_kb("17"), Some(17));
        assert_eq!(parse_kb("x kB"), None);
        assert_eq!(parse_kb("12 MB"), None);
    }

    #[test]
    fn stat_nice_survives_odd_names() {
        let stat = "77 (a b) c)) S 1 77 77 0 -1 4194560 100 0 0 0 1 2 0 0 20 5 1 0 12345 8388608 200";
        assert_eq!(parse_stat_nice(stat), Some(5));
        assert_eq!(parse_stat_nice("77 (x) S 1"), None);
        assert_eq!(parse_stat_nice("garbage"), None);
    }

    #[test]
    fn reads_fabricated_tree() {
        let root = tempfile::tempdir().unwrap();
        let source = ProcSource::new(root.path());
        let dir = source.process_dir(4242);
        fs::create_dir_all(dir.join("fd")).unwrap();
        fs::write(dir.join("status"), STATUS).unwrap();
        symlink("/usr/bin/sleep", dir.join("exe")).unwrap();
        symlink("/dev/null", dir.join("fd").join("1")).unwrap();
        symlink("/dev/pts/0", dir.join("fd").join("0")).unwrap();
        fs::write(dir.join("fd").join("not-a-number"), "").unwrap();

        assert_eq!(source.read_status(4242).unwrap().get("Name"), Some("sleep"));
        assert_eq!(source.read_exe(4242).unwrap(), PathBuf::from("/usr/bin/sleep"));
        let fds = source.read_fds(4242).unwrap();
        assert_eq!(
            fds.iter().map(|entry| entry.fd).collect::<Vec<_>>(),
            vec![0, 1]
        );
        assert_eq!(fds[1].target.as_deref(), Some(Path::new("/dev/null")));

        let missing = source.read_status(1).unwrap_err();
        assert_eq!(missing.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn reads_own_process() {
        let source = ProcSource::default();
        let pid = std::process::id();
        let status = source.read_status(pid).unwrap();
        assert_eq!(status.get("Pid"), Some(pid.to_string().as_str()));
        assert!(source.read_stat(pid).ok().as_deref().and_then(parse_stat_nice).is_some());
    }
}
