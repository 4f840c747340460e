use core::fmt;

/// Why a single inspected field could not be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unavailable {
    /// The process vanished mid-query, or the kernel does not expose the
    /// field for it (a zombie has no `VmSize` and no executable link).
    Missing,
    /// The kernel refused the read.
    Denied,
    /// The value was present but could not be parsed.
    Malformed,
}

impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Unavailable::Missing => "missing",
            Unavailable::Denied => "denied",
            Unavailable::Malformed => "malformed",
        })
    }
}

/// A best-effort inspected value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    Available(T),
    Unavailable(Unavailable),
}

impl<T> Field<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Field::Available(_))
    }

    pub fn as_ref(&self) -> Field<&T> {
        match self {
            Field::Available(value) => Field::Available(value),
            Field::Unavailable(why) => Field::Unavailable(*why),
        }
    }

    pub fn ok(self) -> Option<T> {
        match self {
            Field::Available(value) => Some(value),
            Field::Unavailable(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Field<U> {
        match self {
            Field::Available(value) => Field::Available(f(value)),
            Field::Unavailable(why) => Field::Unavailable(why),
        }
    }

    pub fn and_then<U>(self, f: impl FnOnce(T) -> Field<U>) -> Field<U> {
        match self {
            Field::Available(value) => f(value),
            Field::Unavailable(why) => Field::Unavailable(why),
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    /// `None` means the source did not carry the value at all.
    fn from(value: Option<T>) -> Self {
        value.map_or(Field::Unavailable(Unavailable::Missing), Field::Available)
    }
}

impl<T: fmt::Display> fmt::Display for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Available(value) => value.fmt(f),
            Field::Unavailable(why) => write!(f, "unavailable ({why})"),
        }
    }
}
