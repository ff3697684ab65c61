use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

use crate::body::CelestialBody;
use crate::chart::BirthChart;
use crate::zodiac::ZodiacSign;

/// Short digest of the dominant placements, ready for text generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSummary {
    pub sun: Option<ZodiacSign>,
    pub moon: Option<ZodiacSign>,
    pub rising: ZodiacSign,
    /// Personal bodies present in the chart, in canonical order.
    pub personal: Vec<(CelestialBody, ZodiacSign)>,
}

impl ChartSummary {
    pub fn from_chart(chart: &BirthChart) -> Self {
        let sign_of = |body| chart.body(body).map(|placed| placed.sign);
        ChartSummary {
            sun: sign_of(CelestialBody::Sun),
            moon: sign_of(CelestialBody::Moon),
            rising: chart.ascendant().sign,
            personal: CelestialBody::PERSONAL
                .iter()
                .filter_map(|&body| sign_of(body).map(|sign| (body, sign)))
                .collect(),
        }
    }

    pub fn render(&self) -> String {
        self.to_string()
    }

    pub fn sun_reading(&self) -> Option<Cow<'static, str>> {
        self.sun.map(|sign| interpretation(CelestialBody::Sun, sign))
    }

    pub fn moon_reading(&self) -> Option<Cow<'static, str>> {
        self.moon.map(|sign| interpretation(CelestialBody::Moon, sign))
    }
}

/// One-line reading of a body in a sign. Only the luminaries have dedicated
/// text; other bodies get a generic line.
pub fn interpretation(body: CelestialBody, sign: ZodiacSign) -> Cow<'static, str> {
    let text = match body {
        CelestialBody::Sun => sun_in(sign),
        CelestialBody::Moon => moon_in(sign),
        _ => {
            return Cow::Owned(format!(
                "{} in {} indicates unique personality traits",
                body, sign
            ))
        }
    };
    Cow::Borrowed(text)
}

fn sun_in(sign: ZodiacSign) -> &'static str {
    match sign {
        ZodiacSign::Aries => "Bold, energetic, and natural leader",
        ZodiacSign::Taurus => "Stable, determined, and practical",
        ZodiacSign::Gemini => "Versatile, curious, and communicative",
        ZodiacSign::Cancer => "Emotional, nurturing, and protective",
        ZodiacSign::Leo => "Charismatic, generous, and dramatic",
        ZodiacSign::Virgo => "Analytical, practical, and perfectionist",
        ZodiacSign::Libra => "Diplomatic, fair, and relationship-oriented",
        ZodiacSign::Scorpio => "Intense, passionate, and mysterious",
        ZodiacSign::Sagittarius => "Optimistic, adventurous, and philosophical",
        ZodiacSign::Capricorn => "Ambitious, disciplined, and responsible",
        ZodiacSign::Aquarius => "Original, independent, and humanitarian",
        ZodiacSign::Pisces => "Compassionate, artistic, and intuitive",
    }
}

fn moon_in(sign: ZodiacSign) -> &'static str {
    match sign {
        ZodiacSign::Aries => "Emotionally impulsive and quick to react",
        ZodiacSign::Taurus => "Emotionally stable and security-seeking",
        ZodiacSign::Gemini => "Emotionally curious and changeable",
        ZodiacSign::Cancer => "Deeply emotional and nurturing",
        ZodiacSign::Leo => "Emotionally expressive and dramatic",
        ZodiacSign::Virgo => "Emotionally analytical and practical",
        ZodiacSign::Libra => "Emotionally balanced and relationship-focused",
        ZodiacSign::Scorpio => "Emotionally intense and transformative",
        ZodiacSign::Sagittarius => "Emotionally optimistic and adventurous",
        ZodiacSign::Capricorn => "Emotionally reserved and responsible",
        ZodiacSign::Aquarius => "Emotionally independent and unconventional",
        ZodiacSign::Pisces => "Emotionally sensitive and compassionate",
    }
}

struct SignOrUnknown(Option<ZodiacSign>);

impl fmt::Display for SignOrUnknown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(sign) => write!(f, "{}", sign),
            None => f.write_str("Unknown"),
        }
    }
}

impl fmt::Display for ChartSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Your birth chart shows a Sun in {}, Moon in {}, and Rising sign in {}. ",
            SignOrUnknown(self.sun),
            SignOrUnknown(self.moon),
            self.rising
        )?;

        if !self.personal.is_empty() {
            let placements = self
                .personal
                .iter()
                .map(|(body, sign)| format!("{} in {}", body, sign))
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, "Key placements include: {}. ", placements)?;
        }

        f.write_str(
            "This cosmic fingerprint reveals the unique blend of energies \
             that make you... well, you.",
        )
    }
}
