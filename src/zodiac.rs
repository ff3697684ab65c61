use std::fmt;

use serde::Serialize;

use crate::body::CelestialBody;

/// Width of one zodiac sign in degrees.
pub const SIGN_WIDTH: f64 = 30.0;

/// Adjusts longitude values to fit the [0, 360) degree range.
pub fn normalize_longitude(longitude: f64) -> f64 {
    let normalized = longitude.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ZodiacSign {
    Aries = 0,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Modality {
    Cardinal,
    Fixed,
    Mutable,
}

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    pub fn from_index(index: usize) -> Option<ZodiacSign> {
        Self::ALL.get(index).copied()
    }

    pub fn from_longitude(longitude: f64) -> Self {
        let longitude = normalize_longitude(longitude);
        // fmod is exact, so the segment start is an exact multiple of 30
        let start = longitude - longitude % SIGN_WIDTH;
        let index = (start / SIGN_WIDTH).round() as usize;
        Self::from_index(index).unwrap_or(ZodiacSign::Aries)
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Longitude where this sign's segment begins.
    pub fn start_longitude(self) -> f64 {
        self.index() as f64 * SIGN_WIDTH
    }

    pub fn symbol(self) -> char {
        match self {
            ZodiacSign::Aries => '♈',
            ZodiacSign::Taurus => '♉',
            ZodiacSign::Gemini => '♊',
            ZodiacSign::Cancer => '♋',
            ZodiacSign::Leo => '♌',
            ZodiacSign::Virgo => '♍',
            ZodiacSign::Libra => '♎',
            ZodiacSign::Scorpio => '♏',
            ZodiacSign::Sagittarius => '♐',
            ZodiacSign::Capricorn => '♑',
            ZodiacSign::Aquarius => '♒',
            ZodiacSign::Pisces => '♓',
        }
    }

    pub fn element(self) -> Element {
        match self.index() % 4 {
            0 => Element::Fire,
            1 => Element::Earth,
            2 => Element::Air,
            _ => Element::Water,
        }
    }

    pub fn modality(self) -> Modality {
        match self.index() % 3 {
            0 => Modality::Cardinal,
            1 => Modality::Fixed,
            _ => Modality::Mutable,
        }
    }

    /// Modern ruling body.
    pub fn ruler(self) -> CelestialBody {
        match self {
            ZodiacSign::Aries => CelestialBody::Mars,
            ZodiacSign::Taurus => CelestialBody::Venus,
            ZodiacSign::Gemini => CelestialBody::Mercury,
            ZodiacSign::Cancer => CelestialBody::Moon,
            ZodiacSign::Leo => CelestialBody::Sun,
            ZodiacSign::Virgo => CelestialBody::Mercury,
            ZodiacSign::Libra => CelestialBody::Venus,
            ZodiacSign::Scorpio => CelestialBody::Pluto,
            ZodiacSign::Sagittarius => CelestialBody::Jupiter,
            ZodiacSign::Capricorn => CelestialBody::Saturn,
            ZodiacSign::Aquarius => CelestialBody::Uranus,
            ZodiacSign::Pisces => CelestialBody::Neptune,
        }
    }

    /// Conventional tropical sun sign for a calendar day, ignoring the year.
    pub fn for_calendar_day(month: u32, day: u32) -> Option<ZodiacSign> {
        // leap-year February so the 29th is accepted
        chrono::NaiveDate::from_ymd_opt(2000, month, day)?;
        let sign = match (month, day) {
            (3, 21..=31) | (4, 1..=19) => ZodiacSign::Aries,
            (4, _) | (5, 1..=20) => ZodiacSign::Taurus,
            (5, _) | (6, 1..=20) => ZodiacSign::Gemini,
            (6, _) | (7, 1..=22) => ZodiacSign::Cancer,
            (7, _) | (8, 1..=22) => ZodiacSign::Leo,
            (8, _) | (9, 1..=22) => ZodiacSign::Virgo,
            (9, _) | (10, 1..=22) => ZodiacSign::Libra,
            (10, _) | (11, 1..=21) => ZodiacSign::Scorpio,
            (11, _) | (12, 1..=21) => ZodiacSign::Sagittarius,
            (12, _) | (1, 1..=19) => ZodiacSign::Capricorn,
            (1, _) | (2, 1..=18) => ZodiacSign::Aquarius,
            _ => ZodiacSign::Pisces,
        };
        Some(sign)
    }

    /// Calendar span covered by [`ZodiacSign::for_calendar_day`].
    pub fn date_range(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "March 21 - April 19",
            ZodiacSign::Taurus => "April 20 - May 20",
            ZodiacSign::Gemini => "May 21 - June 20",
            ZodiacSign::Cancer => "June 21 - July 22",
            ZodiacSign::Leo => "July 23 - August 22",
            ZodiacSign::Virgo => "August 23 - September 22",
            ZodiacSign::Libra => "September 23 - October 22",
            ZodiacSign::Scorpio => "October 23 - November 21",
            ZodiacSign::Sagittarius => "November 22 - December 21",
            ZodiacSign::Capricorn => "December 22 - January 19",
            ZodiacSign::Aquarius => "January 20 - February 18",
            ZodiacSign::Pisces => "February 19 - March 20",
        }
    }

    pub fn traits(self) -> &'static [&'static str] {
        match self {
            ZodiacSign::Aries => {
                &["Courageous", "Energetic", "Willful", "Pioneering", "Independent"]
            }
            ZodiacSign::Taurus => &["Patient", "Reliable", "Devoted", "Persistent", "Determined"],
            ZodiacSign::Gemini => {
                &["Adaptable", "Versatile", "Communicative", "Witty", "Intellectual"]
            }
            ZodiacSign::Cancer => &["Nurturing", "Protective", "Sympathetic", "Moody", "Homebody"],
            ZodiacSign::Leo => &["Creative", "Passionate", "Generous", "Warm-hearted", "Cheerful"],
            ZodiacSign::Virgo => &["Loyal", "Analytical", "Kind", "Hardworking", "Practical"],
            ZodiacSign::Libra => {
                &["Diplomatic", "Gracious", "Fair-minded", "Peaceful", "Idealistic"]
            }
            ZodiacSign::Scorpio => {
                &["Passionate", "Stubborn", "Resourceful", "Brave", "A true friend"]
            }
            ZodiacSign::Sagittarius => {
                &["Optimistic", "Loves freedom", "Jovial", "Good-humored", "Honest"]
            }
            ZodiacSign::Capricorn => {
                &["Responsible", "Disciplined", "Self-controlled", "Good managers"]
            }
            ZodiacSign::Aquarius => &["Progressive", "Original", "Independent", "Humanitarian"],
            ZodiacSign::Pisces => &["Compassionate", "Artistic", "Intuitive", "Gentle", "Wise"],
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let sign_str = match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        };
        write!(f, "{}", sign_str)
    }
}

/// A longitude resolved to its sign and the offset inside that sign.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignPosition {
    pub longitude: f64,
    pub sign: ZodiacSign,
    pub sign_degree: f64,
}

impl SignPosition {
    pub fn from_longitude(longitude: f64) -> Self {
        let longitude = normalize_longitude(longitude);
        let sign = ZodiacSign::from_longitude(longitude);
        let sign_degree = longitude % SIGN_WIDTH;
        SignPosition {
            longitude,
            sign,
            sign_degree,
        }
    }
}

impl fmt::Display for SignPosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.1}° {}", self.sign_degree, self.sign)
    }
}

pub fn sign_position(longitude: f64) -> SignPosition {
    SignPosition::from_longitude(longitude)
}

/// Formats a longitude in zodiac notation, e.g. `12.3° Leo`.
pub fn format_position(longitude: f64) -> String {
    sign_position(longitude).to_string()
}
