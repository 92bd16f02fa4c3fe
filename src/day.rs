use crate::error::ValidationError;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// A weekday. The derived ordering follows `WEEK`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

/// Canonical Mon -> Sun order, used for tie-breaks and day-grouped output.
pub const WEEK: [Day; 7] = [
    Day::Mon,
    Day::Tue,
    Day::Wed,
    Day::Thu,
    Day::Fri,
    Day::Sat,
    Day::Sun,
];

impl Day {
    /// The short label used on the wire and in slot labels
    ///
    /// # Examples
    /// ```
    /// use practiceplan_libs::day::Day;
    ///
    /// assert_eq!(Day::Thu.label(), "Thu");
    /// ```
    pub fn label(self) -> &'static str {
        match self {
            Day::Mon => "Mon",
            Day::Tue => "Tue",
            Day::Wed => "Wed",
            Day::Thu => "Thu",
            Day::Fri => "Fri",
            Day::Sat => "Sat",
            Day::Sun => "Sun",
        }
    }
}

impl Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Day {
    type Err = ValidationError;

    /// Only the exact three letter labels are accepted.
    ///
    /// # Examples
    /// ```
    /// use practiceplan_libs::day::Day;
    /// use practiceplan_libs::error::ValidationError;
    ///
    /// assert_eq!("Sat".parse::<Day>(), Ok(Day::Sat));
    /// assert_eq!(
    ///     "saturday".parse::<Day>(),
    ///     Err(ValidationError::UnknownDay("saturday".to_string()))
    /// );
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WEEK.iter()
            .copied()
            .find(|day| day.label() == s)
            .ok_or_else(|| ValidationError::UnknownDay(s.to_string()))
    }
}
