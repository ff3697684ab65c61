use thiserror::Error;

/// Failures reported by an [`Ephemeris`](crate::Ephemeris) implementation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EphemerisError {
    #[error("calculation did not converge: {0}")]
    NonConvergence(String),

    #[error("input out of range: {0}")]
    OutOfRange(String),

    #[error("unsupported request: {0}")]
    Unsupported(String),
}

/// A house system name that is not one of `placidus`, `equal` or `whole-sign`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown house system `{0}`, expected placidus, equal or whole-sign")]
pub struct ParseHouseSystemError(pub String);

/// Chart-level failures. Anything here aborts the chart; per-body ephemeris
/// failures are recovered and surface as `BirthChart::missing_bodies` instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("invalid birth date/time: {0}")]
    InvalidTimeInput(String),

    #[error("invalid location: latitude {latitude}, longitude {longitude}")]
    InvalidLocation { latitude: f64, longitude: f64 },

    #[error("house system failure: {0}")]
    HouseSystemFailure(#[source] EphemerisError),

    #[error("no celestial body could be resolved")]
    NoBodiesResolved,

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type ChartResult<T> = Result<T, ChartError>;
