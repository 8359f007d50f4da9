use std::fmt;

/// A rejected gradient layer configuration change.
///
/// Returned synchronously by the mutating call; the layer keeps its previous
/// configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Explicit locations do not pair up with the colors.
    StopCountMismatch { colors: usize, locations: usize },
    /// A location is outside [0, 1] or not finite.
    LocationOutOfRange { index: usize, value: f32 },
    /// `locations[index]` is smaller than the location before it.
    LocationsNotMonotonic { index: usize },
    /// A color has a non-finite channel.
    NonFiniteColor { index: usize },
    /// A radius is negative or not finite.
    InvalidRadius { name: &'static str, value: f32 },
    /// The inner radius exceeds the outer radius.
    InvertedRadii { inner: f32, outer: f32 },
    /// An explicit center has a non-finite coordinate.
    NonFiniteCenter,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::StopCountMismatch { colors, locations } => {
                write!(f, "{colors} colors but {locations} locations")
            }
            ConfigError::LocationOutOfRange { index, value } => {
                write!(f, "location {index} is {value}, expected a value in [0, 1]")
            }
            ConfigError::LocationsNotMonotonic { index } => {
                write!(f, "location {index} is smaller than the location before it")
            }
            ConfigError::NonFiniteColor { index } => {
                write!(f, "color {index} has a non-finite channel")
            }
            ConfigError::InvalidRadius { name, value } => {
                write!(f, "{name} is {value}, expected a finite value >= 0")
            }
            ConfigError::InvertedRadii { inner, outer } => {
                write!(f, "inner radius {inner} exceeds outer radius {outer}")
            }
            ConfigError::NonFiniteCenter => write!(f, "center has a non-finite coordinate"),
        }
    }
}

impl std::error::Error for ConfigError {}
