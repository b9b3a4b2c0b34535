//! One-line rendering of error source chains.

use std::error::Error as StdError;

const SEPARATOR: &str = " >>> ";

/// Renders `err` and every error beneath it.
///
/// ```
/// use isostamp::support::error_chain;
///
/// let err = std::io::Error::other("disk full");
/// assert_eq!(error_chain(&err), "error(0): disk full");
/// ```
#[must_use]
pub fn error_chain(err: &dyn StdError) -> String {
    error_chain_depth(err, usize::MAX)
}

/// Renders at most `max` levels of the chain under `err`, numbered from
/// the outermost error.
#[must_use]
pub fn error_chain_depth(err: &dyn StdError, max: usize) -> String {
    std::iter::successors(Some(err), |&e| e.source())
        .take(max)
        .enumerate()
        .map(|(depth, e)| format!("error({depth}): {e}"))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use thiserror::Error;

    #[derive(Error, Debug)]
    #[error("outer failure")]
    struct Outer(#[source] Middle);

    #[derive(Error, Debug)]
    #[error("middle failure")]
    struct Middle(#[source] std::io::Error);

    fn nested() -> Outer {
        Outer(Middle(std::io::Error::other("root cause")))
    }

    #[test]
    fn test_full_chain() {
        assert_eq!(
            error_chain(&nested()),
            "error(0): outer failure >>> error(1): middle failure >>> error(2): root cause"
        );
    }

    #[test]
    fn test_depth_limit() {
        assert_eq!(
            error_chain_depth(&nested(), 2),
            "error(0): outer failure >>> error(1): middle failure"
        );
        assert_eq!(error_chain_depth(&nested(), 0), "");
    }

    #[test]
    fn test_crate_errors() {
        let err: crate::Error = crate::error::TimeError::range("invalid unit: 'days'").into();
        assert_eq!(error_chain(&err), "error(0): invalid unit: 'days'");
    }
}
