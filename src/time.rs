use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;

use crate::error::{ChartError, ChartResult};

pub type JulianDay = f64;

/// Julian Day of the J2000.0 epoch (2000-01-01 12:00).
pub const J2000: JulianDay = 2_451_545.0;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// Validated birth instant and observer location.
///
/// The time is taken as-is in whatever reference the ephemeris expects; no
/// timezone conversion happens here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BirthData {
    date: NaiveDate,
    #[serde(serialize_with = "serialize_hhmm")]
    time: NaiveTime,
    latitude: f64,
    longitude: f64,
}

impl BirthData {
    pub fn new(
        date: NaiveDate,
        time: NaiveTime,
        latitude: f64,
        longitude: f64,
    ) -> ChartResult<Self> {
        validate_location(latitude, longitude)?;
        Ok(BirthData {
            date,
            time,
            latitude,
            longitude,
        })
    }

    /// Parses `YYYY-MM-DD` and 24h `HH:MM`.
    pub fn parse(date: &str, time: &str, latitude: f64, longitude: f64) -> ChartResult<Self> {
        let date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
            .map_err(|e| ChartError::InvalidTimeInput(format!("date {:?}: {}", date, e)))?;
        let time = NaiveTime::parse_from_str(time.trim(), TIME_FORMAT)
            .map_err(|e| ChartError::InvalidTimeInput(format!("time {:?}: {}", time, e)))?;
        Self::new(date, time, latitude, longitude)
    }

    pub fn from_components(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        latitude: f64,
        longitude: f64,
    ) -> ChartResult<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            ChartError::InvalidTimeInput(format!(
                "{:04}-{:02}-{:02} is not a calendar date",
                year, month, day
            ))
        })?;
        let time = NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| {
            ChartError::InvalidTimeInput(format!("{:02}:{:02} is not a time of day", hour, minute))
        })?;
        Self::new(date, time, latitude, longitude)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn julian_day(&self) -> JulianDay {
        julian_day(self.date, self.time)
    }
}

fn serialize_hhmm<S: serde::Serializer>(
    time: &NaiveTime,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&time.format(TIME_FORMAT))
}

fn validate_location(latitude: f64, longitude: f64) -> ChartResult<()> {
    let valid = latitude.is_finite()
        && longitude.is_finite()
        && (-90.0..=90.0).contains(&latitude)
        && (-180.0..=180.0).contains(&longitude);
    if valid {
        Ok(())
    } else {
        Err(ChartError::InvalidLocation { latitude, longitude })
    }
}

/// Proleptic Gregorian calendar date and time to Julian Day (Meeus, ch. 7).
/// Hours, minutes and seconds fold into the fractional day.
pub fn julian_day(date: NaiveDate, time: NaiveTime) -> JulianDay {
    let mut year = date.year() as f64;
    let mut month = date.month() as f64;
    let hours = time.hour() as f64 + time.minute() as f64 / 60.0 + time.second() as f64 / 3600.0;
    let day = date.day() as f64 + hours / 24.0;

    if month <= 2.0 {
        year -= 1.0;
        month += 12.0;
    }
    let a = (year / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    (365.25 * (year + 4716.0)).floor() + (30.6001 * (month + 1.0)).floor() + day + b - 1524.5
}

/// Inverse of [`julian_day`], rounded to the nearest second.
pub fn julian_day_to_datetime(jd: JulianDay) -> Option<NaiveDateTime> {
    if !jd.is_finite() || jd < 0.0 {
        return None;
    }
    let shifted = jd + 0.5;
    let z = shifted.floor();
    let fraction = shifted - z;

    let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
    let a = z + 1.0 + alpha - (alpha / 4.0).floor();
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = (b - d - (30.6001 * e).floor()) as u32;
    let month = (if e < 14.0 { e - 1.0 } else { e - 13.0 }) as u32;
    let year = (if month > 2 { c - 4716.0 } else { c - 4715.0 }) as i32;

    let midnight = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)?;
    Some(midnight + Duration::seconds((fraction * 86_400.0).round() as i64))
}

/// Julian centuries elapsed since J2000.0.
pub fn julian_centuries_since_j2000(jd: JulianDay) -> f64 {
    (jd - J2000) / 36_525.0
}
