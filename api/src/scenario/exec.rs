use crate::imp::task::{ExecImage, Reaped, WaitPid, exit, reap, spawn};
use proclab_core::task::current_pid;
use proclab_process::{Fork, ProcResult};

#[derive(Debug, Clone)]
pub struct ExecConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            program: "ls".to_string(),
            args: vec!["-l".to_string()],
        }
    }
}

impl ExecConfig {
    pub fn command_line(&self) -> String {
        core::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Spawns a child that replaces its image with the configured command and
/// reaps it.
///
/// If the replacement fails the child reports why and exits with 127 (not
/// found) or 126 (not executable), so the returned status tells "ran and
/// exited" apart from "never started".
pub fn run(config: &ExecConfig) -> ProcResult<Reaped> {
    // prepared before the fork so the child only has to call execve
    let image = ExecImage::new(&config.program, &config.args)?;
    match spawn()? {
        Fork::Child => {
            println!(
                "Child (PID: {}) is executing the '{}' command.",
                current_pid(),
                config.command_line()
            );
            let err = image.replace();
            eprintln!("Error: {err}");
            exit(err.exec_exit_code())
        }
        Fork::Parent(pid) => reap(WaitPid::Pid(pid)),
    }
}
