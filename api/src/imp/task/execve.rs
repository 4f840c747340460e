use axerrno::LinuxError;
use core::ffi::c_char;
use core::fmt;
use core::ptr;
use proclab_core::sys::linux_error;
use proclab_process::{ProcError, ProcResult};
use std::env;
use std::ffi::{CString, OsStr, OsString};
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use syscall_trace::syscall_trace;
use syscalls::{Sysno, syscall};

/// Search path used when `PATH` is unset.
const DEFAULT_PATH: &str = "/usr/local/bin:/usr/bin:/bin";

/// A fully prepared image replacement.
///
/// Everything the kernel needs (candidate paths, argv, envp) is built here,
/// in the process that creates the image, so that [`ExecImage::replace`] does
/// no allocation and no environment lookup between fork and execve.
pub struct ExecImage {
    program: String,
    candidates: Vec<CString>,
    _args: Vec<CString>,
    _envs: Vec<CString>,
    argv: Vec<*const c_char>,
    envp: Vec<*const c_char>,
}

fn to_cstring(bytes: impl Into<Vec<u8>>, what: &str) -> ProcResult<CString> {
    CString::new(bytes).map_err(|_| ProcError::invalid(format!("{what} contains a NUL byte")))
}

fn null_terminated(strings: &[CString]) -> Vec<*const c_char> {
    strings
        .iter()
        .map(|s| s.as_ptr())
        .chain(core::iter::once(ptr::null()))
        .collect()
}

impl ExecImage {
    /// Prepares `program` with `args` (not including `argv[0]`, which is the
    /// program name) and the current environment.
    ///
    /// A program name containing `/` is used as-is; otherwise every directory
    /// of `PATH` is a candidate, in order.
    pub fn new<S: AsRef<str>>(program: &str, args: &[S]) -> ProcResult<Self> {
        let path = env::var_os("PATH").unwrap_or_else(|| DEFAULT_PATH.into());
        let envs = env::vars_os().map(|(key, value)| {
            let mut pair = key.into_vec();
            pair.push(b'=');
            pair.extend(value.into_vec());
            pair
        });
        Self::with_env(program, args, &path, envs)
    }

    /// Like [`ExecImage::new`], with an explicit search path and environment.
    pub fn with_env<S: AsRef<str>>(
        program: &str,
        args: &[S],
        search_path: &OsStr,
        envs: impl IntoIterator<Item = Vec<u8>>,
    ) -> ProcResult<Self> {
        if program.is_empty() {
            return Err(ProcError::invalid("empty program name"));
        }
        let candidates = if program.contains('/') {
            vec![to_cstring(program, "program name")?]
        } else {
            search_path
                .as_bytes()
                .split(|&b| b == b':')
                .map(|dir| {
                    // an empty PATH element means the current directory
                    let dir: &[u8] = if dir.is_empty() { b"." } else { dir };
                    let mut full = dir.to_vec();
                    full.push(b'/');
                    full.extend_from_slice(program.as_bytes());
                    to_cstring(full, "program name")
                })
                .collect::<ProcResult<Vec<_>>>()?
        };

        let args = core::iter::once(program)
            .chain(args.iter().map(|arg| arg.as_ref()))
            .map(|arg| to_cstring(arg, "argument"))
            .collect::<ProcResult<Vec<_>>>()?;
        let envs = envs
            .into_iter()
            .map(|pair| to_cstring(pair, "environment entry"))
            .collect::<ProcResult<Vec<_>>>()?;
        let argv = null_terminated(&args);
        let envp = null_terminated(&envs);

        Ok(Self {
            program: program.to_string(),
            candidates,
            _args: args,
            _envs: envs,
            argv,
            envp,
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Paths that will be tried, in order.
    pub fn candidates(&self) -> impl Iterator<Item = OsString> + '_ {
        self.candidates
            .iter()
            .map(|c| OsString::from_vec(c.as_bytes().to_vec()))
    }

    /// Replaces the calling process's image. Returns only on failure.
    ///
    /// The PID and open descriptors survive a successful replacement. On
    /// failure the caller is still running the old program and must terminate
    /// (see [`ProcError::exec_exit_code`]) rather than carry on.
    ///
    /// Candidates are tried in order. `EACCES` from an earlier candidate is
    /// reported in preference to a later "not found", as `execvp` does.
    #[syscall_trace]
    pub fn replace(&self) -> ProcError {
        let mut errno = LinuxError::ENOENT;
        let mut denied = false;
        for path in &self.candidates {
            let result = unsafe {
                syscall!(
                    Sysno::execve,
                    path.as_ptr() as usize,
                    self.argv.as_ptr() as usize,
                    self.envp.as_ptr() as usize
                )
            };
            // execve only comes back on failure
            let Err(err) = result else { continue };
            match linux_error(err) {
                LinuxError::EACCES => denied = true,
                LinuxError::ENOENT | LinuxError::ENOTDIR | LinuxError::ESTALE => {}
                other => {
                    errno = other;
                    break;
                }
            }
        }
        if denied && errno == LinuxError::ENOENT {
            errno = LinuxError::EACCES;
        }
        ProcError::ExecFailure {
            program: self.program.clone(),
            errno,
        }
    }
}

impl fmt::Debug for ExecImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecImage")
            .field("program", &self.program)
            .field("args", &self._args)
            .field("candidates", &self.candidates.len())
            .finish()
    }
}
