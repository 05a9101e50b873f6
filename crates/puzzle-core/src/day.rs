//! Day index: the integer identifying "today's" puzzle.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// One day in milliseconds
pub const DAY_MILLIS: i64 = 1000 * 60 * 60 * 24;
/// Puzzles roll over one hour early, at midnight Western Europe winter time
pub const UPDATE_OFFSET_MILLIS: i64 = 1000 * 60 * 60;
/// Days since the Unix epoch of puzzle 0
pub const START_DAY: i64 = 20104;

/// Day of the week a puzzle index falls on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Weekday for a residue of the day index modulo 7 (0 is a Thursday)
    pub fn from_residue(residue: u32) -> Self {
        match residue % 7 {
            0 => Weekday::Thursday,
            1 => Weekday::Friday,
            2 => Weekday::Saturday,
            3 => Weekday::Sunday,
            4 => Weekday::Monday,
            5 => Weekday::Tuesday,
            _ => Weekday::Wednesday,
        }
    }

    /// Bit used by weekday sets
    pub fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        };
        write!(f, "{}", name)
    }
}

/// Puzzle number, also the RNG seed for that day's puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DayIndex(u32);

impl DayIndex {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Seed for the day's random stream
    pub fn seed(self) -> u64 {
        u64::from(self.0)
    }

    pub fn weekday(self) -> Weekday {
        Weekday::from_residue(self.0 % 7)
    }

    /// Day index for a wall-clock time in Unix milliseconds. Times before
    /// puzzle 0 map to day 0.
    pub fn from_unix_millis(millis: i64) -> Self {
        let day = (millis + UPDATE_OFFSET_MILLIS).div_euclid(DAY_MILLIS) - START_DAY;
        Self(day.clamp(0, i64::from(u32::MAX)) as u32)
    }

    /// Today's day index from the system clock
    pub fn today() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);
        Self::from_unix_millis(millis)
    }

    /// Resolve a requested historical day, bounded to `[1, today]`
    pub fn resolve(requested: Option<i64>, today: DayIndex) -> Self {
        match requested {
            Some(day) => Self(day.clamp(1, i64::from(today.0.max(1))) as u32),
            None => today,
        }
    }

    /// Resolve the `p` parameter of a query string such as `?p=120`.
    /// Missing or malformed values fall back to today.
    pub fn from_query(query: &str, today: DayIndex) -> Self {
        let requested = query
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "p")
            .and_then(|(_, value)| value.parse::<i64>().ok());
        Self::resolve(requested, today)
    }

    /// The day before, saturating at zero
    pub fn previous(self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

impl std::fmt::Display for DayIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
