mod inspect;

pub use self::inspect::*;
