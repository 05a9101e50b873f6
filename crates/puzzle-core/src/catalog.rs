//! Puzzle catalog: which puzzle is played on which day.

use serde::{Deserialize, Serialize};

use crate::day::{DayIndex, Weekday};
use crate::error::{Error, Result};

/// Every puzzle kind the engine can generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PuzzleKind {
    Operator,
    Slide,
    Switch,
    Salesman,
    Light,
    Colors,
    Spread,
}

impl PuzzleKind {
    /// All kinds, in catalog order
    pub fn all() -> &'static [PuzzleKind] {
        &[
            PuzzleKind::Switch,
            PuzzleKind::Salesman,
            PuzzleKind::Spread,
            PuzzleKind::Light,
            PuzzleKind::Slide,
            PuzzleKind::Colors,
            PuzzleKind::Operator,
        ]
    }

    /// Lowercase name, also the content directory name
    pub fn name(self) -> &'static str {
        match self {
            PuzzleKind::Operator => "operator",
            PuzzleKind::Slide => "slide",
            PuzzleKind::Switch => "switch",
            PuzzleKind::Salesman => "salesman",
            PuzzleKind::Light => "light",
            PuzzleKind::Colors => "colors",
            PuzzleKind::Spread => "spread",
        }
    }

    /// Look a kind up by name, case-insensitively
    pub fn from_name(name: &str) -> Result<Self> {
        let lowered = name.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.name() == lowered)
            .ok_or_else(|| Error::UnknownPuzzle(name.to_string()))
    }

    /// Catalog descriptor for this kind
    pub fn descriptor(self) -> &'static PuzzleDescriptor {
        CATALOG
            .iter()
            .find(|d| d.kind == self)
            .unwrap_or(&CATALOG[CATALOG.len() - 1])
    }

    pub fn accent(self) -> AccentColor {
        self.descriptor().accent
    }
}

impl std::fmt::Display for PuzzleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for PuzzleKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

/// Accent colour tag of a puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccentColor {
    Blue,
    Green,
    Orange,
    Brown,
    Pink,
    Cyan,
    Purple,
}

impl AccentColor {
    /// Square used for the move boxes in share text
    pub fn emoji(self) -> &'static str {
        match self {
            AccentColor::Blue => "🟦",
            AccentColor::Green => "🟩",
            AccentColor::Orange => "🟧",
            AccentColor::Brown => "🟫",
            AccentColor::Pink => "🟥",
            AccentColor::Cyan => "⬜",
            AccentColor::Purple => "🟪",
        }
    }

    /// RGB values for terminal rendering
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            AccentColor::Blue => (66, 135, 245),
            AccentColor::Green => (76, 175, 80),
            AccentColor::Orange => (255, 152, 0),
            AccentColor::Brown => (141, 110, 99),
            AccentColor::Pink => (236, 64, 122),
            AccentColor::Cyan => (0, 188, 212),
            AccentColor::Purple => (156, 39, 176),
        }
    }
}

/// When a puzzle is eligible to be played
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Accepts every day
    Always,
    /// Accepts days falling on one of the given weekdays (a bitset of
    /// [`Weekday::bit`])
    OnDays(u8),
}

impl Schedule {
    /// Schedule for a single weekday
    pub const fn on(day: Weekday) -> Self {
        Schedule::OnDays(1 << (day as u8))
    }

    /// Schedule that never accepts a day; the puzzle is only reachable by name
    pub const fn by_name_only() -> Self {
        Schedule::OnDays(0)
    }

    pub fn accepts(self, day: DayIndex) -> bool {
        match self {
            Schedule::Always => true,
            Schedule::OnDays(set) => set & day.weekday().bit() != 0,
        }
    }
}

/// One entry of the selection table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PuzzleDescriptor {
    pub kind: PuzzleKind,
    pub accent: AccentColor,
    pub schedule: Schedule,
}

/// Selection table. The first descriptor accepting a day wins; the last entry
/// is the default and accepts every day.
pub const CATALOG: [PuzzleDescriptor; 7] = [
    PuzzleDescriptor {
        kind: PuzzleKind::Switch,
        accent: AccentColor::Blue,
        schedule: Schedule::on(Weekday::Tuesday),
    },
    PuzzleDescriptor {
        kind: PuzzleKind::Salesman,
        accent: AccentColor::Green,
        schedule: Schedule::on(Weekday::Wednesday),
    },
    PuzzleDescriptor {
        kind: PuzzleKind::Spread,
        accent: AccentColor::Orange,
        schedule: Schedule::on(Weekday::Thursday),
    },
    PuzzleDescriptor {
        kind: PuzzleKind::Light,
        accent: AccentColor::Brown,
        schedule: Schedule::on(Weekday::Friday),
    },
    PuzzleDescriptor {
        kind: PuzzleKind::Slide,
        accent: AccentColor::Pink,
        schedule: Schedule::on(Weekday::Saturday),
    },
    PuzzleDescriptor {
        kind: PuzzleKind::Colors,
        accent: AccentColor::Cyan,
        schedule: Schedule::by_name_only(),
    },
    PuzzleDescriptor {
        kind: PuzzleKind::Operator,
        accent: AccentColor::Purple,
        schedule: Schedule::Always,
    },
];

/// Descriptor of the puzzle played on `day`
pub fn select(day: DayIndex) -> &'static PuzzleDescriptor {
    CATALOG
        .iter()
        .find(|d| d.schedule.accepts(day))
        .unwrap_or(&CATALOG[CATALOG.len() - 1])
}

/// Maximum number of days in the history listing
pub const HISTORY_DAY_COUNT: u32 = 28;
/// Earliest day shown in the history listing
pub const HISTORY_FIRST_DAY: u32 = 47;

/// One row of the history listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub day: DayIndex,
    pub kind: PuzzleKind,
    pub accent: AccentColor,
}

/// Recent puzzles, newest first, never earlier than [`HISTORY_FIRST_DAY`]
pub fn history(today: DayIndex) -> Vec<HistoryEntry> {
    (0..HISTORY_DAY_COUNT)
        .map_while(|offset| today.get().checked_sub(offset))
        .take_while(|&day| day >= HISTORY_FIRST_DAY)
        .map(|day| {
            let day = DayIndex::new(day);
            let descriptor = select(day);
            HistoryEntry {
                day,
                kind: descriptor.kind,
                accent: descriptor.accent,
            }
        })
        .collect()
}
