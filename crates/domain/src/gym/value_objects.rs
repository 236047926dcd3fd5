//! Value objects for the gym registration domain.

use serde::{Deserialize, Serialize};

use crate::gym::validation::{self, ValidationError};

/// Canonical weekday identifiers, in week order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
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
    /// All seven days in week order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Returns the day name as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Weekday {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monday" => Ok(Weekday::Monday),
            "tuesday" => Ok(Weekday::Tuesday),
            "wednesday" => Ok(Weekday::Wednesday),
            "thursday" => Ok(Weekday::Thursday),
            "friday" => Ok(Weekday::Friday),
            "saturday" => Ok(Weekday::Saturday),
            "sunday" => Ok(Weekday::Sunday),
            _ => Err(ValidationError::InvalidWeekday),
        }
    }
}

/// The four selectable gym theme colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeColor {
    Blue,
    Red,
    Orange,
    Yellow,
}

impl ThemeColor {
    /// Returns the theme name as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeColor::Blue => "blue",
            ThemeColor::Red => "red",
            ThemeColor::Orange => "orange",
            ThemeColor::Yellow => "yellow",
        }
    }
}

impl std::fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ThemeColor {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blue" => Ok(ThemeColor::Blue),
            "red" => Ok(ThemeColor::Red),
            "orange" => Ok(ThemeColor::Orange),
            "yellow" => Ok(ThemeColor::Yellow),
            _ => Err(ValidationError::InvalidTheme),
        }
    }
}

/// A gym's short unique code, used as its public slug.
///
/// 3–10 characters, uppercase letters and digits only. The uniqueness
/// of a code across gyms is enforced by the gym directory, not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GymCode(String);

impl GymCode {
    /// Parses and validates a gym code.
    pub fn parse(code: impl Into<String>) -> Result<Self, ValidationError> {
        let code = code.into();
        validation::validate_code(&code)?;
        Ok(Self(code))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GymCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for GymCode {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<GymCode> for String {
    fn from(code: GymCode) -> Self {
        code.0
    }
}

impl AsRef<str> for GymCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A time of day on a 24-hour clock, minute granularity.
///
/// Parses from and serializes to the `"HH:MM"` wire form used by the
/// schedule picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Creates a time of day, rejecting out-of-range components.
    pub fn new(hour: u8, minute: u8) -> Result<Self, ValidationError> {
        if hour > 23 || minute > 59 {
            return Err(ValidationError::InvalidTimeFormat);
        }
        Ok(Self { hour, minute })
    }

    /// Parses the `"HH:MM"` form, hours 0–23 and minutes 0–59.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let (h, m) = s.split_once(':').ok_or(ValidationError::InvalidTimeFormat)?;
        if h.len() != 2 || m.len() != 2 {
            return Err(ValidationError::InvalidTimeFormat);
        }
        let hour: u8 = h.parse().map_err(|_| ValidationError::InvalidTimeFormat)?;
        let minute: u8 = m.parse().map_err(|_| ValidationError::InvalidTimeFormat)?;
        Self::new(hour, minute)
    }

    /// Returns the hour component (0–23).
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Returns the minute component (0–59).
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Returns the time as minutes since midnight.
    pub fn minutes_from_midnight(&self) -> u16 {
        u16::from(self.hour) * 60 + u16::from(self.minute)
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl std::str::FromStr for TimeOfDay {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<TimeOfDay> for String {
    fn from(t: TimeOfDay) -> Self {
        t.to_string()
    }
}

/// An opening interval within a day.
///
/// The end must be strictly later than the start; the invariant is
/// checked by [`validation::validate_time_range`], not at construction,
/// so candidate input can be carried through the form unvalidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl TimeRange {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }
}

/// Opening hours for one day of the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub day: Weekday,
    pub is_open: bool,
    pub time_ranges: Vec<TimeRange>,
}

impl DaySchedule {
    /// A closed day with no opening hours.
    pub fn closed(day: Weekday) -> Self {
        Self {
            day,
            is_open: false,
            time_ranges: Vec::new(),
        }
    }

    /// An open day with the given opening hours.
    pub fn open(day: Weekday, time_ranges: Vec<TimeRange>) -> Self {
        Self {
            day,
            is_open: true,
            time_ranges,
        }
    }

    /// A full week of closed days, in week order.
    pub fn closed_week() -> Vec<DaySchedule> {
        Weekday::ALL.into_iter().map(DaySchedule::closed).collect()
    }
}

/// The gym information collected by the first registration step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GymInformation {
    pub name: String,
    pub address: String,
    pub email: String,
    pub theme: ThemeColor,
    /// Empty or absent means no logo.
    pub logo_url: Option<String>,
    pub code: GymCode,
    pub schedule: Vec<DaySchedule>,
}

/// The confirmation flag collected by the final registration step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipAcknowledgement {
    pub acknowledged: bool,
}

/// A fully assembled registration submission.
///
/// Lives for the duration of one registration attempt and is discarded
/// once the saga reaches a terminal state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GymRegistrationData {
    pub gym: GymInformation,
    pub membership: MembershipAcknowledgement,
}
