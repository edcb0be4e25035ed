/// The result of asking the user for something: either a value or a cancellation.
///
/// Cancellation is a regular outcome, not an error. Every caller must hand a
/// `Cancelled` straight back to its own caller without asking anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome<T> {
    /// The user provided (or accepted) a value.
    Value(T),

    /// The user backed out.
    Cancelled,
}

impl<T> Outcome<T> {
    /// Check if this outcome is a cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Get the value, if any.
    pub fn value(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Cancelled => None,
        }
    }

    /// Borrow the value, if any.
    pub fn as_ref(&self) -> Outcome<&T> {
        match self {
            Self::Value(value) => Outcome::Value(value),
            Self::Cancelled => Outcome::Cancelled,
        }
    }

    /// Map the value, keeping a cancellation as is.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Value(value) => Outcome::Value(f(value)),
            Self::Cancelled => Outcome::Cancelled,
        }
    }
}

impl<T> From<Option<T>> for Outcome<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Cancelled, Self::Value)
    }
}

/// Unwrap an `Outcome` inside a function returning `Result<Outcome<_>, _>`,
/// returning `Ok(Outcome::Cancelled)` early on cancellation.
///
/// ```
/// use item_input_types::{Outcome, proceed};
///
/// fn double(input: Outcome<i64>) -> Result<Outcome<i64>, ()> {
///     let value = proceed!(input);
///     Ok(Outcome::Value(value * 2))
/// }
///
/// assert_eq!(double(Outcome::Value(2)), Ok(Outcome::Value(4)));
/// assert_eq!(double(Outcome::Cancelled), Ok(Outcome::Cancelled));
/// ```
#[macro_export]
macro_rules! proceed {
    ($outcome:expr) => {
        match $outcome {
            $crate::Outcome::Value(value) => value,
            $crate::Outcome::Cancelled => return Ok($crate::Outcome::Cancelled),
        }
    };
}

/// How an edit loop (object or list menu) ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// The user chose Finish; the accumulated value is returned.
    Finish,

    /// The user chose Cancel; the accumulated value is discarded.
    Cancel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_conversion() {
        assert_eq!(Outcome::from(Some(3)), Outcome::Value(3));
        assert_eq!(Outcome::<i32>::from(None), Outcome::Cancelled);
    }

    #[test]
    fn map_keeps_cancellation() {
        assert_eq!(Outcome::Value(2).map(|v| v + 1), Outcome::Value(3));
        assert!(Outcome::<i32>::Cancelled.map(|v| v + 1).is_cancelled());
    }
}
