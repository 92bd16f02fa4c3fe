use crate::busy::BusyCounts;
use crate::day::{Day, WEEK};
use crate::error::ValidationError;
use crate::grid::{build_window, TimeWindow, DEFAULT_END_MIN, DEFAULT_START_MIN};
use crate::rank::{rank, ByDay, SlotResult};
use crate::roster::Roster;
use log::info;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Supplies a consistent snapshot of participants and their busy slots.
/// The participant count and the busy counts must describe the same roster.
pub trait AvailabilitySource {
    fn participant_count(&self) -> usize;

    /// Distinct participants busy per slot, limited to `days` and `window`
    fn busy_counts(&self, days: &[Day], window: TimeWindow) -> BusyCounts;
}

impl AvailabilitySource for Roster {
    fn participant_count(&self) -> usize {
        Roster::participant_count(self)
    }

    fn busy_counts(&self, days: &[Day], window: TimeWindow) -> BusyCounts {
        Roster::busy_counts(self, days, window)
    }
}

/// Counts already aggregated elsewhere, e.g. by a group-by query
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub total: usize,
    pub busy: BusyCounts,
}

impl AvailabilitySource for Snapshot {
    fn participant_count(&self) -> usize {
        self.total
    }

    fn busy_counts(&self, days: &[Day], window: TimeWindow) -> BusyCounts {
        self.busy
            .iter()
            .filter(|(slot, _)| days.contains(&slot.day) && window.contains(slot.minute))
            .collect()
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptimizeRequest {
    pub start_min: Option<u16>,
    pub end_min: Option<u16>,
    pub days: Option<Vec<Day>>,
}

impl OptimizeRequest {
    /// Requested days, or the whole week when none are given
    pub fn days(&self) -> Vec<Day> {
        match &self.days {
            Some(days) if !days.is_empty() => days.clone(),
            _ => WEEK.to_vec(),
        }
    }

    /// Requested window, defaulting to 6:00 AM - 10:00 PM
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(
            self.start_min.unwrap_or(DEFAULT_START_MIN),
            self.end_min.unwrap_or(DEFAULT_END_MIN),
        )
    }
}

#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizeResponse {
    #[cfg_attr(feature = "serde", serde(rename = "totalAthletes"))]
    pub total_athletes: usize,
    pub results_by_percent: Vec<SlotResult>,
    pub results_by_day: ByDay,
}

/// Ranks the requested slots against the participants in `source`.
///
/// The window is validated before `source` is consulted. Days in the response
/// are always grouped in `WEEK` order, whatever order they were requested in.
///
/// # Examples
/// ```
/// use practiceplan_libs::day::Day;
/// use practiceplan_libs::optimize::{optimize, OptimizeRequest};
/// use practiceplan_libs::roster::Roster;
///
/// let mut roster = Roster::new();
/// let ada = roster.add_participant("Ada").unwrap();
/// roster.add_participant("Bo").unwrap();
/// roster.mark_unavailable(ada, Day::Mon, 360, 1320).unwrap();
///
/// let request = OptimizeRequest {
///     days: Some(vec![Day::Mon, Day::Tue]),
///     ..OptimizeRequest::default()
/// };
/// let response = optimize(&request, &roster).unwrap();
///
/// assert_eq!(response.total_athletes, 2);
/// assert_eq!(response.results_by_percent[0].label, "Tue 6:00 AM");
/// assert_eq!(response.results_by_percent.last().unwrap().percentage, 50.0);
/// assert_eq!(response.results_by_day.len(), 7);
/// ```
pub fn optimize<S>(request: &OptimizeRequest, source: &S) -> Result<OptimizeResponse, ValidationError>
where
    S: AvailabilitySource + ?Sized,
{
    let days = request.days();
    let window = request.window();
    let grid = build_window(&days, window)?;

    let total = source.participant_count();
    if total == 0 {
        return Err(ValidationError::NoParticipants);
    }

    let busy = source.busy_counts(&days, window);
    let ranking = rank(&grid, &busy, total, &WEEK)?;

    info!(total = total, slots = grid.len(); "optimized practice slots");

    Ok(OptimizeResponse {
        total_athletes: total,
        results_by_percent: ranking.by_percentage,
        results_by_day: ranking.by_day,
    })
}
