//! Host glue for the process lifecycle model.
//! Everything that touches the running kernel but is not itself a lifecycle
//! primitive lives here: errno mapping, the identity of the current process,
//! scheduling resources, and the `/proc` metadata source.

#[macro_use]
extern crate log;

pub mod procfs;
pub mod resource;
pub mod sys;
pub mod task;
