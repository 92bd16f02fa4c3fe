use crate::day::Day;
use num::Integer;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Width of one scheduling window
pub const SLOT_MINUTES: u16 = 30;
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A half-hour window within a weekday, identified by its start
/// <day>: the weekday
/// <minute>: minutes after midnight, in [0, 1440)
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot {
    pub day: Day,
    #[cfg_attr(feature = "serde", serde(rename = "slot_min"))]
    pub minute: u16,
}

impl Slot {
    /// Construct a new Slot
    /// # Examples
    /// ```
    /// use practiceplan_libs::day::Day;
    /// use practiceplan_libs::slot::Slot;
    ///
    /// let slot = Slot::new(Day::Mon, 1080);
    ///
    /// assert_eq!(slot.day, Day::Mon);
    /// assert_eq!(slot.minute, 1080);
    /// ```
    pub fn new(day: Day, minute: u16) -> Slot {
        Slot { day, minute }
    }

    /// Human label of the slot, `"{Day} {ClockTime}"`
    ///
    /// # Examples
    /// ```
    /// use practiceplan_libs::day::Day;
    /// use practiceplan_libs::slot::Slot;
    ///
    /// assert_eq!(Slot::new(Day::Mon, 1110).label(), "Mon 6:30 PM");
    /// ```
    pub fn label(self) -> String {
        self.to_string()
    }
}

impl Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.day, clock_label(self.minute))
    }
}

/// 12-hour clock time for a minute offset. Midnight and noon read as 12.
///
/// # Examples
/// ```
/// use practiceplan_libs::slot::clock_label;
///
/// assert_eq!(clock_label(0), "12:00 AM");
/// assert_eq!(clock_label(750), "12:30 PM");
/// assert_eq!(clock_label(1110), "6:30 PM");
/// ```
pub fn clock_label(minute: u16) -> String {
    let (hour, minute) = minute.div_rem(&60);
    let meridiem = if hour >= 12 { "PM" } else { "AM" };
    let hour = match hour % 12 {
        0 => 12,
        h => h,
    };

    format!("{}:{:02} {}", hour, minute, meridiem)
}
