mod clone;
mod execve;
mod exit;
mod schedule;
mod wait;

pub use self::clone::*;
pub use self::execve::*;
pub use self::exit::*;
pub use self::schedule::*;
pub use self::wait::*;

use std::io::{self, Write};

/// Pushes buffered console output to the kernel before the process is
/// duplicated or ends.
pub(crate) fn flush_console() {
    let _ = io::stdout().flush();
    let _ = io::stderr().flush();
}
