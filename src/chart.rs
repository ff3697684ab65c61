use std::collections::BTreeMap;

use serde::Serialize;

use crate::aspects::{detect_aspects, Aspect};
use crate::body::CelestialBody;
use crate::config::ChartConfig;
use crate::ephemeris::{Ephemeris, HouseFrame, HouseSystem};
use crate::error::{ChartError, ChartResult, EphemerisError};
use crate::houses::{assign_house, House};
use crate::time::{BirthData, JulianDay};
use crate::zodiac::{normalize_longitude, SignPosition, ZodiacSign};

/// Ascendant or midheaven. Angles carry a sign but no house; they bound the houses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AngularPoint {
    pub name: &'static str,
    pub symbol: &'static str,
    pub longitude: f64,
    pub sign: ZodiacSign,
    pub sign_symbol: char,
    pub sign_degree: f64,
    pub formatted: String,
}

impl AngularPoint {
    fn new(name: &'static str, symbol: &'static str, longitude: f64) -> Self {
        let position = SignPosition::from_longitude(longitude);
        AngularPoint {
            name,
            symbol,
            longitude: position.longitude,
            sign: position.sign,
            sign_symbol: position.sign.symbol(),
            sign_degree: position.sign_degree,
            formatted: position.to_string(),
        }
    }

    pub fn ascendant(longitude: f64) -> Self {
        Self::new("Ascendant", "AC", longitude)
    }

    pub fn midheaven(longitude: f64) -> Self {
        Self::new("Midheaven", "MC", longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedBody {
    pub body: CelestialBody,
    pub symbol: char,
    pub longitude: f64,
    pub sign: ZodiacSign,
    pub sign_symbol: char,
    pub sign_degree: f64,
    /// Position in zodiac notation, e.g. `12.3° Leo`.
    pub formatted: String,
    pub house: House,
}

impl PlacedBody {
    pub fn new(body: CelestialBody, longitude: f64, house: House) -> Self {
        let position = SignPosition::from_longitude(longitude);
        PlacedBody {
            body,
            symbol: body.symbol(),
            longitude: position.longitude,
            sign: position.sign,
            sign_symbol: position.sign.symbol(),
            sign_degree: position.sign_degree,
            formatted: position.to_string(),
            house,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HouseCusp {
    pub house: House,
    pub longitude: f64,
    pub sign: ZodiacSign,
    pub sign_symbol: char,
    pub sign_degree: f64,
    pub formatted: String,
}

impl HouseCusp {
    pub fn new(house: House, longitude: f64) -> Self {
        let position = SignPosition::from_longitude(longitude);
        HouseCusp {
            house,
            longitude: position.longitude,
            sign: position.sign,
            sign_symbol: position.sign.symbol(),
            sign_degree: position.sign_degree,
            formatted: position.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BirthChart {
    birth_data: BirthData,
    julian_day: JulianDay,
    house_system: HouseSystem,
    bodies: BTreeMap<CelestialBody, PlacedBody>,
    missing_bodies: Vec<CelestialBody>,
    ascendant: AngularPoint,
    midheaven: AngularPoint,
    house_cusps: Vec<HouseCusp>,
    aspects: Vec<Aspect>,
}

impl BirthChart {
    pub fn birth_data(&self) -> &BirthData {
        &self.birth_data
    }

    pub fn julian_day(&self) -> JulianDay {
        self.julian_day
    }

    pub fn house_system(&self) -> HouseSystem {
        self.house_system
    }

    /// Resolved bodies keyed in canonical order.
    pub fn bodies(&self) -> &BTreeMap<CelestialBody, PlacedBody> {
        &self.bodies
    }

    pub fn body(&self, body: CelestialBody) -> Option<&PlacedBody> {
        self.bodies.get(&body)
    }

    /// Bodies the ephemeris could not resolve, in canonical order.
    pub fn missing_bodies(&self) -> &[CelestialBody] {
        &self.missing_bodies
    }

    pub fn is_complete(&self) -> bool {
        self.missing_bodies.is_empty()
    }

    pub fn ascendant(&self) -> &AngularPoint {
        &self.ascendant
    }

    pub fn midheaven(&self) -> &AngularPoint {
        &self.midheaven
    }

    /// Twelve cusps, house 1 first.
    pub fn house_cusps(&self) -> &[HouseCusp] {
        &self.house_cusps
    }

    pub fn aspects(&self) -> &[Aspect] {
        &self.aspects
    }

    pub fn aspects_of(&self, body: CelestialBody) -> impl Iterator<Item = &Aspect> {
        self.aspects
            .iter()
            .filter(move |aspect| aspect.body_a == body || aspect.body_b == body)
    }

    /// Bodies occupying `house`, in canonical order.
    pub fn occupants(&self, house: House) -> Vec<CelestialBody> {
        self.bodies
            .values()
            .filter(|placed| placed.house == house)
            .map(|placed| placed.body)
            .collect()
    }
}

/// Builds a [`BirthChart`] in one pass against an injected ephemeris.
pub struct ChartAssembler<'a> {
    ephemeris: &'a dyn Ephemeris,
    config: ChartConfig,
}

impl<'a> ChartAssembler<'a> {
    pub fn new(ephemeris: &'a dyn Ephemeris) -> Self {
        ChartAssembler {
            ephemeris,
            config: ChartConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ChartConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn assemble(&self, birth: &BirthData) -> ChartResult<BirthChart> {
        self.config.validate()?;

        let julian_day = birth.julian_day();
        let system = self.config.house_system;
        tracing::debug!(
            julian_day,
            latitude = birth.latitude(),
            longitude = birth.longitude(),
            %system,
            "assembling chart"
        );

        let frame = self.house_frame(birth, julian_day)?;

        let mut resolved = Vec::with_capacity(CelestialBody::ALL.len());
        let mut missing_bodies = Vec::new();
        for body in CelestialBody::iter() {
            match self.body_longitude(body, julian_day) {
                Ok(longitude) => resolved.push((body, longitude)),
                Err(error) => {
                    tracing::warn!(
                        %body,
                        %error,
                        julian_day,
                        "could not resolve body, omitting it from the chart"
                    );
                    missing_bodies.push(body);
                }
            }
        }

        if resolved.is_empty() {
            return Err(ChartError::NoBodiesResolved);
        }

        let bodies = resolved
            .iter()
            .map(|&(body, longitude)| {
                let house = assign_house(longitude, &frame.cusps);
                (body, PlacedBody::new(body, longitude, house))
            })
            .collect();

        let house_cusps = House::all()
            .zip(frame.cusps.iter())
            .map(|(house, &cusp)| HouseCusp::new(house, cusp))
            .collect();

        let aspects = detect_aspects(&resolved, &self.config.aspects);

        tracing::debug!(
            resolved = resolved.len(),
            missing = missing_bodies.len(),
            aspects = aspects.len(),
            "chart assembled"
        );

        Ok(BirthChart {
            birth_data: *birth,
            julian_day,
            house_system: system,
            bodies,
            missing_bodies,
            ascendant: AngularPoint::ascendant(frame.ascendant),
            midheaven: AngularPoint::midheaven(frame.midheaven),
            house_cusps,
            aspects,
        })
    }

    fn body_longitude(
        &self,
        body: CelestialBody,
        julian_day: JulianDay,
    ) -> Result<f64, EphemerisError> {
        let longitude = self.ephemeris.body_longitude(body, julian_day)?;
        if longitude.is_finite() {
            Ok(normalize_longitude(longitude))
        } else {
            Err(EphemerisError::OutOfRange(format!("{} longitude is {}", body, longitude)))
        }
    }

    fn house_frame(&self, birth: &BirthData, julian_day: JulianDay) -> ChartResult<HouseFrame> {
        let frame = self
            .ephemeris
            .house_frame(julian_day, birth.latitude(), birth.longitude(), self.config.house_system)
            .map_err(ChartError::HouseSystemFailure)?;

        let all_finite = frame
            .cusps
            .iter()
            .chain([&frame.ascendant, &frame.midheaven])
            .all(|value| value.is_finite());
        if !all_finite {
            return Err(ChartError::HouseSystemFailure(EphemerisError::OutOfRange(
                "house frame contains non-finite values".to_string(),
            )));
        }

        Ok(HouseFrame {
            cusps: frame.cusps.map(normalize_longitude),
            ascendant: normalize_longitude(frame.ascendant),
            midheaven: normalize_longitude(frame.midheaven),
        })
    }
}

/// Computes a chart with the default configuration.
pub fn compute_chart(ephemeris: &dyn Ephemeris, birth: &BirthData) -> ChartResult<BirthChart> {
    ChartAssembler::new(ephemeris).assemble(birth)
}
