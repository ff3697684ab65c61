//! The ephemeris boundary.
//!
//! Chart assembly never computes positions itself; it asks an [`Ephemeris`]
//! for body longitudes and for the house frame of an observer. Swap in any
//! implementation (the bundled [`AnalyticEphemeris`](crate::AnalyticEphemeris),
//! Swiss Ephemeris bindings, a remote service) without touching the core.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::body::CelestialBody;
use crate::error::{EphemerisError, ParseHouseSystemError};
use crate::time::JulianDay;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HouseSystem {
    #[default]
    Placidus,
    Equal,
    WholeSign,
}

impl HouseSystem {
    /// Single-letter house system code as used by Swiss Ephemeris.
    pub fn code(self) -> char {
        match self {
            HouseSystem::Placidus => 'P',
            HouseSystem::Equal => 'E',
            HouseSystem::WholeSign => 'W',
        }
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HouseSystem::Placidus => "placidus",
            HouseSystem::Equal => "equal",
            HouseSystem::WholeSign => "whole-sign",
        };
        f.write_str(name)
    }
}

impl FromStr for HouseSystem {
    type Err = ParseHouseSystemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "placidus" | "p" => Ok(HouseSystem::Placidus),
            "equal" | "e" => Ok(HouseSystem::Equal),
            "whole-sign" | "whole_sign" | "wholesign" | "w" => Ok(HouseSystem::WholeSign),
            _ => Err(ParseHouseSystemError(s.to_string())),
        }
    }
}

/// House cusps (houses 1..=12 in order) plus the two angles, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HouseFrame {
    pub cusps: [f64; 12],
    pub ascendant: f64,
    pub midheaven: f64,
}

pub trait Ephemeris: Send + Sync {
    /// Geocentric ecliptic longitude of `body` at `julian_day`, in degrees.
    fn body_longitude(
        &self,
        body: CelestialBody,
        julian_day: JulianDay,
    ) -> Result<f64, EphemerisError>;

    /// House cusps, ascendant and midheaven for an observer at the given
    /// geographic latitude/longitude (east positive).
    fn house_frame(
        &self,
        julian_day: JulianDay,
        latitude: f64,
        longitude: f64,
        system: HouseSystem,
    ) -> Result<HouseFrame, EphemerisError>;
}

impl<E: Ephemeris + ?Sized> Ephemeris for &E {
    fn body_longitude(
        &self,
        body: CelestialBody,
        julian_day: JulianDay,
    ) -> Result<f64, EphemerisError> {
        (**self).body_longitude(body, julian_day)
    }

    fn house_frame(
        &self,
        julian_day: JulianDay,
        latitude: f64,
        longitude: f64,
        system: HouseSystem,
    ) -> Result<HouseFrame, EphemerisError> {
        (**self).house_frame(julian_day, latitude, longitude, system)
    }
}
