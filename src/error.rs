use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Construction-time errors.
///
/// Per-frame operations (surface queries, particle updates, performance
/// estimates) never fail; they clamp or saturate instead. Only building a
/// track or loading configuration can return one of these.
#[derive(Debug, Error)]
pub enum Error {
    /// Catmull-Rom needs a 4-point window, so a closed track needs at least 4 control points.
    #[error("degenerate track: {points} control points, at least 4 required")]
    DegenerateTrack { points: usize },

    /// A configuration value is out of its valid range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
