//! Natal chart computation.
//!
//! A chart is computed in one pass from a [`BirthData`] and an injected
//! [`Ephemeris`]: the birth instant becomes a Julian Day, the ephemeris
//! supplies body longitudes and the house frame, and the assembler places each
//! body in its sign and house before scanning the bodies for aspects.
//!
//! ```no_run
//! use natal_core::{compute_chart, AnalyticEphemeris, BirthData, ChartSummary};
//!
//! let birth = BirthData::parse("1991-06-18", "07:10", 10.522, 76.172)?;
//! let chart = compute_chart(&AnalyticEphemeris, &birth)?;
//! println!("{}", ChartSummary::from_chart(&chart));
//! # Ok::<(), natal_core::ChartError>(())
//! ```

pub mod analytic;
pub mod aspects;
pub mod body;
pub mod chart;
pub mod config;
pub mod ephemeris;
pub mod error;
pub mod houses;
pub mod summary;
pub mod time;
pub mod zodiac;

pub use analytic::AnalyticEphemeris;
pub use aspects::{Aspect, AspectDefinition, AspectKind, DEFAULT_ASPECTS};
pub use body::CelestialBody;
pub use chart::{compute_chart, AngularPoint, BirthChart, ChartAssembler, HouseCusp, PlacedBody};
pub use config::ChartConfig;
pub use ephemeris::{Ephemeris, HouseFrame, HouseSystem};
pub use error::{ChartError, ChartResult, EphemerisError, ParseHouseSystemError};
pub use houses::{assign_house, House};
pub use summary::{interpretation, ChartSummary};
pub use time::{BirthData, JulianDay};
pub use zodiac::{format_position, normalize_longitude, sign_position, SignPosition, ZodiacSign};
