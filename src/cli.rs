use clap::Parser;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "proclab")]
#[command(about = "Walks through the lifecycle of Linux processes")]
#[command(
    after_help = "Tasks: 1|create, 2|exec, 3a|zombie, 3b|orphan, 4|inspect, 5|priority"
)]
pub struct Cli {
    /// Task to run, by number or by name.
    pub task: String,

    /// Children to create (create, priority).
    #[arg(long, value_name = "N")]
    pub children: Option<usize>,

    /// Seconds a zombie stays unreaped.
    #[arg(long, value_name = "SECS", value_parser = parse_secs)]
    pub window: Option<Duration>,

    /// Seconds the orphan sleeps before checking its parent.
    #[arg(long, value_name = "SECS", value_parser = parse_secs)]
    pub sleep: Option<Duration>,

    /// Adopt the orphan as a subreaper and reap it.
    #[arg(long)]
    pub adopt: bool,

    /// Process to inspect. Prompted for when absent.
    #[arg(long, value_name = "PID")]
    pub pid: Option<String>,

    /// Iterations of the priority workload.
    #[arg(long, value_name = "ITERATIONS")]
    pub work: Option<u64>,

    /// CPU the priority children share.
    #[arg(long, value_name = "N", conflicts_with = "no_pin")]
    pub cpu: Option<usize>,

    /// Let the scheduler place the priority children freely.
    #[arg(long)]
    pub no_pin: bool,

    /// error, warn, info, debug or trace. Defaults to $PROCLAB_LOG, then warn.
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Command for the exec task.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

/// Parses a non-negative, possibly fractional, number of seconds.
pub fn parse_secs(value: &str) -> Result<Duration, String> {
    let secs: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("`{value}` is not a number of seconds"))?;
    Duration::try_from_secs_f64(secs).map_err(|_| format!("`{value}` is out of range"))
}
