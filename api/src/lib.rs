//! Process lifecycle primitives and the demonstrations composed from them.
//!
//! [`imp`] holds the primitives: spawning, image replacement, reaping, exit,
//! scheduling knobs and inspection. [`scenario`] composes them into the
//! lifecycle demonstrations (creation, exec, zombie, orphan, priority).

#[macro_use]
extern crate log;

pub mod imp;
pub mod scenario;
pub mod utils;
