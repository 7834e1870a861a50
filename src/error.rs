use thiserror::Error;

/// Errors returned by the fallible constructors and setters of [`crate::Cache`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A generation must be able to hold at least one key.
    #[error("cache capacity must be greater than zero")]
    ZeroCapacity,
}
