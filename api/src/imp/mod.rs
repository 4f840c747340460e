pub mod proc;
pub mod task;
