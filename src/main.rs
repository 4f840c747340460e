#[macro_use]
extern crate log;

mod cli;
mod logger;
mod task;

use clap::Parser;
use cli::Cli;
use proclab_api::scenario::exec::ExecConfig;
use proclab_api::scenario::orphan::OrphanOutcome;
use proclab_api::scenario::{create, exec, inspect, orphan, priority, zombie};
use proclab_process::{ProcError, ProcResult, parse_pid};
use std::io;
use std::process::ExitCode;
use task::Task;

fn run(cli: Cli) -> ProcResult<()> {
    let task: Task = cli.task.parse()?;
    println!("--- Running {task} ---");
    info!("[main] starting {}", task.name());

    match task {
        Task::Create => {
            let mut config = create::CreateConfig::default();
            if let Some(children) = cli.children {
                config.children = children;
            }
            for reaped in create::run(&config)? {
                println!("Parent reaped {reaped}.");
            }
        }
        Task::Exec => {
            let config = match cli.command.split_first() {
                Some((program, args)) => ExecConfig {
                    program: program.clone(),
                    args: args.to_vec(),
                },
                None => ExecConfig::default(),
            };
            let reaped = exec::run(&config)?;
            println!("Parent: child {reaped}.");
        }
        Task::Zombie => {
            let mut config = zombie::ZombieConfig::default();
            if let Some(window) = cli.window {
                config.window = window;
            }
            zombie::run(&config)?;
        }
        Task::Orphan => {
            let mut config = orphan::OrphanConfig {
                adopt: cli.adopt,
                ..Default::default()
            };
            if let Some(sleep) = cli.sleep {
                config.child_sleep = sleep;
            }
            if let OrphanOutcome::Adopted { orphan, .. } = orphan::run(&config)? {
                if !orphan.status.success() {
                    warn!("[main] orphan {} was not re-parented as expected", orphan.pid);
                }
            }
        }
        Task::Inspect => {
            let pid = cli.pid.as_deref().map(parse_pid).transpose()?;
            inspect::run(pid, io::stdin().lock())?;
        }
        Task::Priority => {
            let mut config = match cli.children {
                Some(children) => priority::PriorityConfig::with_children(children),
                None => priority::PriorityConfig::default(),
            };
            if let Some(work) = cli.work {
                config.iterations = work;
            }
            if cli.no_pin {
                config.cpu = None;
            } else if let Some(cpu) = cli.cpu {
                config.cpu = Some(cpu);
            }
            priority::run(&config)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = logger::init(logger::resolve_level(cli.log_level.as_deref())) {
        eprintln!("warning: {err}");
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            match err {
                ProcError::InvalidInput(_) => {
                    eprintln!("Run `proclab --help` for usage.");
                    ExitCode::from(2)
                }
                _ => ExitCode::FAILURE,
            }
        }
    }
}
