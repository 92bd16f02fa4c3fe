use crate::day::Day;
use crate::error::ValidationError;
use crate::slot::{Slot, MINUTES_PER_DAY, SLOT_MINUTES};
use itertools::Itertools;
use log::debug;
use num::Integer;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 6:00 AM
pub const DEFAULT_START_MIN: u16 = 6 * 60;
/// 10:00 PM
pub const DEFAULT_END_MIN: u16 = 22 * 60;

/// Half-open [start, end) minute range within a day
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: u16,
    pub end: u16,
}

impl Default for TimeWindow {
    fn default() -> Self {
        TimeWindow {
            start: DEFAULT_START_MIN,
            end: DEFAULT_END_MIN,
        }
    }
}

impl TimeWindow {
    pub fn new(start: u16, end: u16) -> TimeWindow {
        TimeWindow { start, end }
    }

    /// A slot belongs to the window iff its start falls in [start, end)
    ///
    /// # Examples
    /// ```
    /// use practiceplan_libs::grid::TimeWindow;
    ///
    /// let evening = TimeWindow::new(1080, 1140);
    /// assert!(evening.contains(1080));
    /// assert!(evening.contains(1110));
    /// assert!(!evening.contains(1140));
    /// ```
    pub fn contains(self, minute: u16) -> bool {
        self.start <= minute && minute < self.end
    }

    /// Checks the window is non-empty and lies within a single day.
    pub fn validate(self) -> Result<(), ValidationError> {
        if self.end <= self.start || self.end > MINUTES_PER_DAY {
            Err(ValidationError::InvalidRange {
                start: self.start,
                end: self.end,
            })
        } else {
            Ok(())
        }
    }
}

/// Enumerates every slot of `days` whose start lies in [start, end), stepping
/// by `resolution`. Days are emitted in the order given; repeated days are
/// only emitted once.
///
/// Slots nobody marked busy are still part of the grid, so the returned
/// sequence is the universe ranking operates on.
///
/// # Errors
/// * `InvalidResolution` when `resolution` is zero
/// * `InvalidRange` when `end <= start` or `end > 1440`
/// * `MisalignedRange` when `start` is not a multiple of `resolution`
/// * `EmptyDays` when no day is requested
///
/// # Examples
/// ```
/// use practiceplan_libs::day::Day;
/// use practiceplan_libs::grid::build_grid;
/// use practiceplan_libs::slot::Slot;
///
/// let grid = build_grid(&[Day::Mon], 1080, 1140, 30).unwrap();
///
/// assert_eq!(grid, vec![Slot::new(Day::Mon, 1080), Slot::new(Day::Mon, 1110)]);
/// assert_eq!(grid[1].label(), "Mon 6:30 PM");
/// ```
pub fn build_grid(
    days: &[Day],
    start: u16,
    end: u16,
    resolution: u16,
) -> Result<Vec<Slot>, ValidationError> {
    if resolution == 0 {
        return Err(ValidationError::InvalidResolution);
    }

    TimeWindow::new(start, end).validate()?;

    if !Integer::is_multiple_of(&start, &resolution) {
        return Err(ValidationError::MisalignedRange {
            value: start,
            resolution,
        });
    }

    if days.is_empty() {
        return Err(ValidationError::EmptyDays);
    }

    let grid = days
        .iter()
        .unique()
        .cartesian_product((start..end).step_by(resolution.into()))
        .map(|(&day, minute)| Slot::new(day, minute))
        .collect_vec();

    debug!(slots = grid.len(), start = start, end = end; "built slot grid");

    Ok(grid)
}

/// `build_grid` over a `TimeWindow` at the fixed half-hour resolution
pub fn build_window(days: &[Day], window: TimeWindow) -> Result<Vec<Slot>, ValidationError> {
    build_grid(days, window.start, window.end, SLOT_MINUTES)
}
