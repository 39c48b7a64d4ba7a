use thiserror::Error;

/// Library error type for hero gallery operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A gallery was constructed with no image references at all.
    #[error("gallery requires at least one image reference")]
    EmptyGallery,

    /// Underlying IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// YAML/serde configuration error.
    #[error(transparent)]
    Config(#[from] serde_yaml::Error),
}
