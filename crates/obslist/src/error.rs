#![forbid(unsafe_code)]

//! Error taxonomy for list construction, positional access, and copy-out.

/// Errors from [`ObservableList`](crate::ObservableList) operations.
///
/// Mutation never fails: `push` and `clear` are infallible, and a `remove`
/// with no matching element is a normal `false` result. Errors occur only
/// at guarded preconditions (absent construction source, out-of-range
/// index, undersized copy-out destination) and leave the list untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    /// A required argument was absent or unusable.
    InvalidArgument(&'static str),
    /// A positional index fell outside `[0, len)`.
    IndexOutOfRange { index: usize, len: usize },
}

impl std::fmt::Display for ListError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(what) => write!(f, "invalid argument: {what}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
        }
    }
}

impl std::error::Error for ListError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = ListError::InvalidArgument("source sequence is absent");
        assert_eq!(err.to_string(), "invalid argument: source sequence is absent");

        let err = ListError::IndexOutOfRange { index: 3, len: 2 };
        assert_eq!(err.to_string(), "index 3 out of range for length 2");
    }
}
