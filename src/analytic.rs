//! Low-precision analytic ephemeris.
//!
//! Sun and Moon follow the truncated series of Meeus, *Astronomical
//! Algorithms* (ch. 25 and 47); the planets use the JPL approximate Keplerian
//! elements fitted for 1800–2050, reduced to geocentric longitudes and
//! precessed to the equinox of date. Expect errors around a few arcminutes for
//! the luminaries and well under a degree for the planets; good enough for
//! sign and house placement, not for timing exact aspects.
//!
//! Times are taken as Universal Time; the difference to dynamical time is
//! ignored.

use crate::body::CelestialBody;
use crate::ephemeris::{Ephemeris, HouseFrame, HouseSystem};
use crate::error::EphemerisError;
use crate::time::{julian_centuries_since_j2000, JulianDay, J2000};
use crate::zodiac::normalize_longitude;

/// 1800-01-01 00:00, start of the planetary element fit.
pub const PLANET_RANGE_START: JulianDay = 2_378_496.5;
/// 2051-01-01 00:00, end of the planetary element fit.
pub const PLANET_RANGE_END: JulianDay = 2_470_172.5;

/// General precession in longitude, degrees per Julian century.
const PRECESSION_PER_CENTURY: f64 = 1.396_971;

const KEPLER_MAX_ITERATIONS: usize = 30;
const KEPLER_TOLERANCE: f64 = 1e-12;
const PLACIDUS_MAX_ITERATIONS: usize = 100;
const PLACIDUS_TOLERANCE: f64 = 1e-10;

#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticEphemeris;

impl AnalyticEphemeris {
    pub fn new() -> Self {
        AnalyticEphemeris
    }
}

impl Ephemeris for AnalyticEphemeris {
    fn body_longitude(
        &self,
        body: CelestialBody,
        julian_day: JulianDay,
    ) -> Result<f64, EphemerisError> {
        if !julian_day.is_finite() {
            return Err(EphemerisError::OutOfRange(format!("julian day {}", julian_day)));
        }
        let t = julian_centuries_since_j2000(julian_day);
        match body {
            CelestialBody::Sun => Ok(sun_longitude(t)),
            CelestialBody::Moon => Ok(moon_longitude(t)),
            planet => {
                if !(PLANET_RANGE_START..PLANET_RANGE_END).contains(&julian_day) {
                    return Err(EphemerisError::OutOfRange(format!(
                        "{} elements only cover 1800-2050, got julian day {}",
                        planet, julian_day
                    )));
                }
                planet_longitude(planet, t)
            }
        }
    }

    fn house_frame(
        &self,
        julian_day: JulianDay,
        latitude: f64,
        longitude: f64,
        system: HouseSystem,
    ) -> Result<HouseFrame, EphemerisError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(EphemerisError::OutOfRange(format!(
                "observer at latitude {}, longitude {}",
                latitude, longitude
            )));
        }
        let sky = LocalSky::new(julian_day, latitude, longitude);
        let ascendant = sky.ascendant();
        let midheaven = sky.midheaven();

        let cusps = match system {
            HouseSystem::Placidus => sky.placidus_cusps(ascendant, midheaven)?,
            HouseSystem::Equal => offsets_from(ascendant),
            HouseSystem::WholeSign => offsets_from((ascendant / 30.0).floor() * 30.0),
        };

        Ok(HouseFrame {
            cusps,
            ascendant,
            midheaven,
        })
    }
}

fn offsets_from(first: f64) -> [f64; 12] {
    std::array::from_fn(|i| normalize_longitude(first + 30.0 * i as f64))
}

fn sin_deg(x: f64) -> f64 {
    x.to_radians().sin()
}

fn cos_deg(x: f64) -> f64 {
    x.to_radians().cos()
}

fn nutation_in_longitude(t: f64) -> f64 {
    -0.00478 * sin_deg(125.04 - 1934.136 * t)
}

/// Apparent geocentric longitude of the Sun.
fn sun_longitude(t: f64) -> f64 {
    let mean_longitude = 280.46646 + 36_000.76983 * t + 0.000_303_2 * t * t;
    let anomaly = 357.52911 + 35_999.05029 * t - 0.000_153_7 * t * t;
    let center = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * sin_deg(anomaly)
        + (0.019_993 - 0.000_101 * t) * sin_deg(2.0 * anomaly)
        + 0.000_289 * sin_deg(3.0 * anomaly);
    // 0.00569 is the aberration constant
    normalize_longitude(mean_longitude + center - 0.00569 + nutation_in_longitude(t))
}

/// Periodic terms for the lunar longitude: multiples of D, M, M', F and the
/// coefficient in millionths of a degree.
const MOON_TERMS: [(f64, f64, f64, f64, f64); 24] = [
    (0.0, 0.0, 1.0, 0.0, 6_288_774.0),
    (2.0, 0.0, -1.0, 0.0, 1_274_027.0),
    (2.0, 0.0, 0.0, 0.0, 658_314.0),
    (0.0, 0.0, 2.0, 0.0, 213_618.0),
    (0.0, 1.0, 0.0, 0.0, -185_116.0),
    (0.0, 0.0, 0.0, 2.0, -114_332.0),
    (2.0, 0.0, -2.0, 0.0, 58_793.0),
    (2.0, -1.0, -1.0, 0.0, 57_066.0),
    (2.0, 0.0, 1.0, 0.0, 53_322.0),
    (2.0, -1.0, 0.0, 0.0, 45_758.0),
    (0.0, 1.0, -1.0, 0.0, -40_923.0),
    (1.0, 0.0, 0.0, 0.0, -34_720.0),
    (0.0, 1.0, 1.0, 0.0, -30_383.0),
    (2.0, 0.0, 0.0, -2.0, 15_327.0),
    (0.0, 0.0, 1.0, 2.0, -12_528.0),
    (0.0, 0.0, 1.0, -2.0, 10_980.0),
    (4.0, 0.0, -1.0, 0.0, 10_675.0),
    (0.0, 0.0, 3.0, 0.0, 10_034.0),
    (4.0, 0.0, -2.0, 0.0, 8_548.0),
    (2.0, 1.0, -1.0, 0.0, -7_888.0),
    (2.0, 1.0, 0.0, 0.0, -6_766.0),
    (1.0, 0.0, -1.0, 0.0, -5_163.0),
    (1.0, 1.0, 0.0, 0.0, 4_987.0),
    (2.0, -1.0, 1.0, 0.0, 4_036.0),
];

/// Apparent geocentric longitude of the Moon.
fn moon_longitude(t: f64) -> f64 {
    let mean_longitude = 218.316_447_7 + 481_267.881_234_21 * t;
    let elongation = 297.850_192_1 + 445_267.111_403_4 * t;
    let sun_anomaly = 357.529_109_2 + 35_999.050_290_9 * t;
    let moon_anomaly = 134.963_396_4 + 477_198.867_505_5 * t;
    let latitude_argument = 93.272_095_0 + 483_202.017_523_3 * t;
    // Earth orbit eccentricity correction for terms involving M
    let eccentricity = 1.0 - 0.002_516 * t;

    let sum: f64 = MOON_TERMS
        .iter()
        .map(|&(d, m, mp, f, coefficient)| {
            let argument =
                d * elongation + m * sun_anomaly + mp * moon_anomaly + f * latitude_argument;
            coefficient * sin_deg(argument) * eccentricity.powi(m.abs() as i32)
        })
        .sum();

    normalize_longitude(mean_longitude + sum / 1e6 + nutation_in_longitude(t))
}

/// Keplerian elements at J2000 and their rates per Julian century:
/// semi-major axis (au), eccentricity, inclination, mean longitude,
/// longitude of perihelion and longitude of the ascending node (degrees).
#[derive(Debug, Clone, Copy)]
struct OrbitalElements {
    a: (f64, f64),
    e: (f64, f64),
    inclination: (f64, f64),
    mean_longitude: (f64, f64),
    perihelion: (f64, f64),
    node: (f64, f64),
}

const EARTH_MOON_BARYCENTER: OrbitalElements = OrbitalElements {
    a: (1.000_002_61, 0.000_005_62),
    e: (0.016_711_23, -0.000_043_92),
    inclination: (-0.000_015_31, -0.012_946_68),
    mean_longitude: (100.464_571_66, 35_999.372_449_81),
    perihelion: (102.937_681_93, 0.323_273_64),
    node: (0.0, 0.0),
};

fn elements(body: CelestialBody) -> Option<OrbitalElements> {
    let elements = match body {
        CelestialBody::Mercury => OrbitalElements {
            a: (0.387_099_27, 0.000_000_37),
            e: (0.205_635_93, 0.000_019_06),
            inclination: (7.004_979_02, -0.005_947_49),
            mean_longitude: (252.250_323_50, 149_472.674_111_75),
            perihelion: (77.457_796_28, 0.160_476_89),
            node: (48.330_765_93, -0.125_340_81),
        },
        CelestialBody::Venus => OrbitalElements {
            a: (0.723_335_66, 0.000_003_90),
            e: (0.006_776_72, -0.000_041_07),
            inclination: (3.394_676_05, -0.000_788_90),
            mean_longitude: (181.979_099_50, 58_517.815_387_29),
            perihelion: (131.602_467_18, 0.002_683_29),
            node: (76.679_842_55, -0.277_694_18),
        },
        CelestialBody::Mars => OrbitalElements {
            a: (1.523_710_34, 0.000_018_47),
            e: (0.093_394_10, 0.000_078_82),
            inclination: (1.849_691_42, -0.008_131_31),
            mean_longitude: (-4.553_432_05, 19_140.302_684_99),
            perihelion: (-23.943_629_59, 0.444_410_88),
            node: (49.559_538_91, -0.292_573_43),
        },
        CelestialBody::Jupiter => OrbitalElements {
            a: (5.202_887_00, -0.000_116_07),
            e: (0.048_386_24, -0.000_132_53),
            inclination: (1.304_396_95, -0.001_837_14),
            mean_longitude: (34.396_440_51, 3_034.746_127_75),
            perihelion: (14.728_479_83, 0.212_526_68),
            node: (100.473_909_09, 0.204_691_06),
        },
        CelestialBody::Saturn => OrbitalElements {
            a: (9.536_675_94, -0.001_250_60),
            e: (0.053_861_79, -0.000_509_91),
            inclination: (2.485_991_87, 0.001_936_09),
            mean_longitude: (49.954_244_23, 1_222.493_622_01),
            perihelion: (92.598_878_31, -0.418_972_16),
            node: (113.662_424_48, -0.288_677_94),
        },
        CelestialBody::Uranus => OrbitalElements {
            a: (19.189_164_64, -0.001_961_76),
            e: (0.047_257_44, -0.000_043_97),
            inclination: (0.772_637_83, -0.002_429_39),
            mean_longitude: (313.238_104_51, 428.482_027_85),
            perihelion: (170.954_276_30, 0.408_052_81),
            node: (74.016_925_03, 0.042_405_89),
        },
        CelestialBody::Neptune => OrbitalElements {
            a: (30.069_922_76, 0.000_262_91),
            e: (0.008_590_48, 0.000_051_05),
            inclination: (1.770_043_47, 0.000_353_72),
            mean_longitude: (-55.120_029_69, 218.459_453_25),
            perihelion: (44.964_762_27, -0.322_414_64),
            node: (131.784_225_74, -0.005_086_64),
        },
        CelestialBody::Pluto => OrbitalElements {
            a: (39.482_116_75, -0.000_315_96),
            e: (0.248_827_30, 0.000_051_70),
            inclination: (17.140_012_06, 0.000_048_18),
            mean_longitude: (238.929_038_33, 145.207_805_15),
            perihelion: (224.068_916_29, -0.040_629_42),
            node: (110.303_936_84, -0.011_834_82),
        },
        CelestialBody::Sun | CelestialBody::Moon => return None,
    };
    Some(elements)
}

impl OrbitalElements {
    /// Heliocentric ecliptic x, y (au, J2000 frame) at `t` centuries.
    fn heliocentric_xy(&self, t: f64) -> Result<(f64, f64), EphemerisError> {
        let at = |(value, rate): (f64, f64)| value + rate * t;
        let a = at(self.a);
        let e = at(self.e);
        let inclination = at(self.inclination).to_radians();
        let perihelion = at(self.perihelion);
        let node = at(self.node);

        let argument_of_perihelion = (perihelion - node).to_radians();
        // reduced to (-180, 180] for faster convergence
        let mean_longitude = at(self.mean_longitude);
        let mean_anomaly = normalize_longitude(mean_longitude - perihelion + 180.0) - 180.0;
        let mean_anomaly = mean_anomaly.to_radians();
        let eccentric_anomaly = solve_kepler(mean_anomaly, e)?;

        let x_orbit = a * (eccentric_anomaly.cos() - e);
        let y_orbit = a * (1.0 - e * e).sqrt() * eccentric_anomaly.sin();

        let (sin_w, cos_w) = argument_of_perihelion.sin_cos();
        let (sin_n, cos_n) = node.to_radians().sin_cos();
        let cos_i = inclination.cos();

        let x = (cos_w * cos_n - sin_w * sin_n * cos_i) * x_orbit
            + (-sin_w * cos_n - cos_w * sin_n * cos_i) * y_orbit;
        let y = (cos_w * sin_n + sin_w * cos_n * cos_i) * x_orbit
            + (-sin_w * sin_n + cos_w * cos_n * cos_i) * y_orbit;
        Ok((x, y))
    }
}

/// Eccentric anomaly for mean anomaly `m` (radians) by Newton iteration.
fn solve_kepler(m: f64, e: f64) -> Result<f64, EphemerisError> {
    let mut eccentric = m + e * m.sin();
    for _ in 0..KEPLER_MAX_ITERATIONS {
        let delta = (eccentric - e * eccentric.sin() - m) / (1.0 - e * eccentric.cos());
        eccentric -= delta;
        if delta.abs() < KEPLER_TOLERANCE {
            return Ok(eccentric);
        }
    }
    Err(EphemerisError::NonConvergence(format!(
        "Kepler's equation for M = {} rad, e = {}",
        m, e
    )))
}

/// Geocentric ecliptic longitude of a planet, equinox of date.
fn planet_longitude(body: CelestialBody, t: f64) -> Result<f64, EphemerisError> {
    let elements = elements(body)
        .ok_or_else(|| EphemerisError::Unsupported(format!("{} has no orbital elements", body)))?;
    let (px, py) = elements.heliocentric_xy(t)?;
    let (ex, ey) = EARTH_MOON_BARYCENTER.heliocentric_xy(t)?;
    let longitude = (py - ey).atan2(px - ex).to_degrees();
    Ok(normalize_longitude(longitude + PRECESSION_PER_CENTURY * t))
}

/// Local sidereal frame of an observer.
struct LocalSky {
    /// Right ascension of the meridian, degrees.
    armc: f64,
    /// Mean obliquity of the ecliptic, degrees.
    obliquity: f64,
    latitude: f64,
}

impl LocalSky {
    fn new(julian_day: JulianDay, latitude: f64, longitude: f64) -> Self {
        let t = julian_centuries_since_j2000(julian_day);
        let gmst = 280.460_618_37
            + 360.985_647_366_29 * (julian_day - J2000)
            + 0.000_387_933 * t * t
            - t * t * t / 38_710_000.0;
        LocalSky {
            armc: normalize_longitude(gmst + longitude),
            obliquity: 23.439_291 - 0.013_004_2 * t,
            latitude,
        }
    }

    /// Ecliptic longitude of the point with right ascension `ra`.
    fn ecliptic_from_ra(&self, ra: f64) -> f64 {
        normalize_longitude(sin_deg(ra).atan2(cos_deg(ra) * cos_deg(self.obliquity)).to_degrees())
    }

    fn midheaven(&self) -> f64 {
        self.ecliptic_from_ra(self.armc)
    }

    fn ascendant(&self) -> f64 {
        let y = cos_deg(self.armc);
        let x = -(sin_deg(self.obliquity) * self.latitude.to_radians().tan()
            + cos_deg(self.obliquity) * sin_deg(self.armc));
        normalize_longitude(y.atan2(x).to_degrees())
    }

    /// Placidus cusps by semi-arc trisection. Undefined inside the polar
    /// circles, where some ecliptic degrees never rise or set.
    fn placidus_cusps(&self, ascendant: f64, midheaven: f64) -> Result<[f64; 12], EphemerisError> {
        if self.latitude.abs() + self.obliquity >= 90.0 {
            return Err(EphemerisError::OutOfRange(format!(
                "Placidus houses are undefined at latitude {}",
                self.latitude
            )));
        }

        let eleventh = self.placidus_cusp(30.0, 1.0 / 3.0, true)?;
        let twelfth = self.placidus_cusp(60.0, 2.0 / 3.0, true)?;
        let second = self.placidus_cusp(120.0, 2.0 / 3.0, false)?;
        let third = self.placidus_cusp(150.0, 1.0 / 3.0, false)?;

        let opposite = |longitude: f64| normalize_longitude(longitude + 180.0);
        Ok([
            ascendant,
            second,
            third,
            opposite(midheaven),
            opposite(eleventh),
            opposite(twelfth),
            opposite(ascendant),
            opposite(second),
            opposite(third),
            midheaven,
            eleventh,
            twelfth,
        ])
    }

    /// Iterates the right ascension of a cusp lying `fraction` of its diurnal
    /// semi-arc east of the meridian (`above` the horizon) or `fraction` of
    /// its nocturnal semi-arc west of the lower meridian.
    fn placidus_cusp(
        &self,
        start_offset: f64,
        fraction: f64,
        above: bool,
    ) -> Result<f64, EphemerisError> {
        let tan_latitude = self.latitude.to_radians().tan();
        let mut ra = normalize_longitude(self.armc + start_offset);

        for _ in 0..PLACIDUS_MAX_ITERATIONS {
            let longitude = self.ecliptic_from_ra(ra);
            let declination = (sin_deg(self.obliquity) * sin_deg(longitude)).asin();
            let product = tan_latitude * declination.tan();
            if product.abs() > 1.0 {
                return Err(EphemerisError::OutOfRange(format!(
                    "ecliptic point {:.3} never rises at latitude {}",
                    longitude, self.latitude
                )));
            }
            let ascensional_difference = product.asin().to_degrees();
            let next = if above {
                normalize_longitude(self.armc + fraction * (90.0 + ascensional_difference))
            } else {
                normalize_longitude(self.armc + 180.0 - fraction * (90.0 - ascensional_difference))
            };
            let delta = (normalize_longitude(next - ra + 180.0) - 180.0).abs();
            ra = next;
            if delta < PLACIDUS_TOLERANCE {
                return Ok(self.ecliptic_from_ra(ra));
            }
        }

        Err(EphemerisError::NonConvergence(format!(
            "Placidus cusp at offset {} from ARMC {}",
            start_offset, self.armc
        )))
    }
}
