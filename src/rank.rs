use crate::busy::BusyCounts;
use crate::day::Day;
use crate::error::ValidationError;
use crate::slot::Slot;
use itertools::Itertools;
use log::{debug, trace, warn};
#[cfg(feature = "rayon")]
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::cmp::Ordering;

/// Availability of a single slot, derived from the busy count and the
/// number of registered participants.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SlotResult {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub slot: Slot,
    pub label: String,
    pub available_count: usize,
    /// Percent of participants free, rounded half-up to two decimals
    pub percentage: f64,
    #[cfg_attr(feature = "serde", serde(skip))]
    hundredths: u32,
}

impl SlotResult {
    /// Availability of `slot` when `busy` of `total` participants cannot make it.
    ///
    /// # Errors
    /// * `NoParticipants` when `total` is zero
    /// * `DataConsistency` when `busy` exceeds `total`
    ///
    /// # Examples
    /// ```
    /// use practiceplan_libs::day::Day;
    /// use practiceplan_libs::error::ValidationError;
    /// use practiceplan_libs::rank::SlotResult;
    /// use practiceplan_libs::slot::Slot;
    ///
    /// let result = SlotResult::new(Slot::new(Day::Wed, 1080), 1, 4).unwrap();
    ///
    /// assert_eq!(result.available_count, 3);
    /// assert_eq!(result.percentage, 75.0);
    /// assert_eq!(result.label, "Wed 6:00 PM");
    ///
    /// assert_eq!(
    ///     SlotResult::new(Slot::new(Day::Wed, 1080), 0, 0),
    ///     Err(ValidationError::NoParticipants)
    /// );
    /// ```
    pub fn new(slot: Slot, busy: usize, total: usize) -> Result<SlotResult, ValidationError> {
        if total == 0 {
            return Err(ValidationError::NoParticipants);
        }

        if busy > total {
            return Err(ValidationError::DataConsistency {
                day: slot.day,
                slot_min: slot.minute,
                busy,
                total,
            });
        }

        Ok(SlotResult::from_available(slot, total - busy, total))
    }

    /// `available <= total` and `total > 0` must already hold
    fn from_available(slot: Slot, available_count: usize, total: usize) -> SlotResult {
        let hundredths = percentage_hundredths(available_count, total);
        SlotResult {
            slot,
            label: slot.label(),
            available_count,
            percentage: f64::from(hundredths) / 100.0,
            hundredths,
        }
    }

    /// The percentage scaled by 100, exact
    pub fn hundredths(&self) -> u32 {
        self.hundredths
    }
}

/// `round(available / total * 100, 2)` with halves rounded up, computed in
/// integers so equal ratios always compare equal. `total` must be non-zero.
fn percentage_hundredths(available: usize, total: usize) -> u32 {
    let available = available as u64;
    let total = total as u64;
    ((available * 20_000 + total) / (2 * total)) as u32
}

/// Per-day rankings, keyed in canonical day order. Every day of the order is
/// present, possibly with no slots.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ByDay(Vec<(Day, Vec<SlotResult>)>);

impl ByDay {
    pub fn get(&self, day: Day) -> Option<&[SlotResult]> {
        self.0
            .iter()
            .find(|(d, _)| *d == day)
            .map(|(_, results)| results.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Day, &[SlotResult])> + '_ {
        self.0.iter().map(|(day, results)| (*day, results.as_slice()))
    }

    pub fn days(&self) -> impl Iterator<Item = Day> + '_ {
        self.0.iter().map(|(day, _)| *day)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(feature = "serde")]
impl Serialize for ByDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (day, results) in self.0.iter() {
            map.serialize_entry(day, results)?;
        }
        map.end()
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    pub by_percentage: Vec<SlotResult>,
    pub by_day: ByDay,
}

/// Position of each day within a caller supplied canonical order
struct DayOrder([Option<usize>; 7]);

impl DayOrder {
    fn new(order: &[Day]) -> Self {
        let mut positions = [None; 7];
        for (position, &day) in order.iter().enumerate() {
            positions[day as usize].get_or_insert(position);
        }
        DayOrder(positions)
    }

    fn position(&self, day: Day) -> Option<usize> {
        self.0[day as usize]
    }
}

/// Ranks every slot of `grid` by the share of `total` participants not busy
/// in it.
///
/// `by_percentage` orders by percentage descending, then available count
/// descending, then day in `order`, then minute ascending. `by_day` holds one
/// entry per day of `order`, each sorted by percentage descending then minute
/// ascending.
///
/// # Errors
/// * `NoParticipants` when `total` is zero
/// * `DayNotInOrder` when a grid day is missing from `order`
/// * `DataConsistency` when a busy count exceeds `total`. Counts are never
///   clamped.
///
/// # Examples
/// ```
/// use practiceplan_libs::busy::BusyCounts;
/// use practiceplan_libs::day::{Day, WEEK};
/// use practiceplan_libs::grid::build_grid;
/// use practiceplan_libs::rank::rank;
/// use practiceplan_libs::slot::Slot;
///
/// let grid = build_grid(&[Day::Tue, Day::Mon], 1080, 1140, 30).unwrap();
/// let busy: BusyCounts = vec![(Slot::new(Day::Mon, 1080), 1)].into_iter().collect();
///
/// let ranking = rank(&grid, &busy, 4, &WEEK).unwrap();
///
/// assert_eq!(ranking.by_percentage[0].label, "Mon 6:30 PM");
/// assert_eq!(ranking.by_percentage[3].percentage, 75.0);
/// assert!(ranking.by_day.get(Day::Sun).unwrap().is_empty());
/// ```
pub fn rank(
    grid: &[Slot],
    busy: &BusyCounts,
    total: usize,
    order: &[Day],
) -> Result<Ranking, ValidationError> {
    if total == 0 {
        return Err(ValidationError::NoParticipants);
    }

    if let Some(&slot) = grid.iter().find(|slot| !order.contains(&slot.day)) {
        return Err(ValidationError::DayNotInOrder(slot.day));
    }

    if let Some((slot, count)) = grid
        .iter()
        .map(|&slot| (slot, busy.get(slot)))
        .find(|&(_, count)| count > total)
    {
        warn!(busy = count, total = total; "busy count exceeds participant total at {}", slot);
        return Err(ValidationError::DataConsistency {
            day: slot.day,
            slot_min: slot.minute,
            busy: count,
            total,
        });
    }

    let ranking = order_results(slot_results(grid, busy, total), order)?;

    debug!(slots = ranking.by_percentage.len(), total = total; "ranked slots");
    if let Some(best) = ranking.by_percentage.first() {
        trace!("best slot {} at {}%", best.label, best.percentage);
    }

    Ok(ranking)
}

/// Orders results built with `SlotResult::new` into both views. Results may
/// come from different totals, in which case equal percentages are broken by
/// the larger available count.
///
/// # Errors
/// `DayNotInOrder` when a result's day is missing from `order`
pub fn order_results(results: Vec<SlotResult>, order: &[Day]) -> Result<Ranking, ValidationError> {
    let day_order = DayOrder::new(order);

    if let Some(result) = results
        .iter()
        .find(|r| day_order.position(r.slot.day).is_none())
    {
        return Err(ValidationError::DayNotInOrder(result.slot.day));
    }

    let mut by_percentage = results.clone();
    let global = |a: &SlotResult, b: &SlotResult| {
        b.hundredths
            .cmp(&a.hundredths)
            .then_with(|| b.available_count.cmp(&a.available_count))
            .then_with(|| {
                day_order
                    .position(a.slot.day)
                    .cmp(&day_order.position(b.slot.day))
            })
            .then_with(|| a.slot.minute.cmp(&b.slot.minute))
    };

    #[cfg(feature = "rayon")]
    by_percentage.par_sort_unstable_by(global);
    #[cfg(not(feature = "rayon"))]
    by_percentage.sort_unstable_by(global);

    let mut grouped = results.into_iter().into_group_map_by(|r| r.slot.day);
    let by_day = ByDay(
        order
            .iter()
            .unique()
            .map(|&day| {
                let mut results = grouped.remove(&day).unwrap_or_default();
                results.sort_by(within_day);
                (day, results)
            })
            .collect(),
    );

    Ok(Ranking {
        by_percentage,
        by_day,
    })
}

fn within_day(a: &SlotResult, b: &SlotResult) -> Ordering {
    b.hundredths
        .cmp(&a.hundredths)
        .then_with(|| a.slot.minute.cmp(&b.slot.minute))
}

#[cfg(feature = "rayon")]
fn slot_results(grid: &[Slot], busy: &BusyCounts, total: usize) -> Vec<SlotResult> {
    grid.par_iter()
        .map(|&slot| SlotResult::from_available(slot, total - busy.get(slot), total))
        .collect()
}

#[cfg(not(feature = "rayon"))]
fn slot_results(grid: &[Slot], busy: &BusyCounts, total: usize) -> Vec<SlotResult> {
    grid.iter()
        .map(|&slot| SlotResult::from_available(slot, total - busy.get(slot), total))
        .collect_vec()
}
