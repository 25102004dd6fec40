//! Errors returned by the grid and rebalancing engines.

/// Errors raised while building or mutating a grid ladder.
///
/// The rebalancer never fails: an empty or zero-valued portfolio is an
/// expected state and yields neutral results instead of an error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Grid or scaling parameters are out of range. Nothing was built.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// No level with this number exists in the current ladder.
    #[error("unknown grid level {0}")]
    UnknownLevel(i32),

    /// The level has already been marked filled.
    #[error("grid level {0} is already filled")]
    AlreadyFilled(i32),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            format!("{}", Error::InvalidConfig("base_price must be > 0".into())),
            "invalid config: base_price must be > 0"
        );
        assert_eq!(format!("{}", Error::UnknownLevel(-3)), "unknown grid level -3");
        assert_eq!(
            format!("{}", Error::AlreadyFilled(2)),
            "grid level 2 is already filled"
        );
    }

    #[test]
    fn is_error() {
        let err: Box<dyn std::error::Error> = Box::new(Error::UnknownLevel(1));
        assert!(err.to_string().contains("level"));
    }
}
