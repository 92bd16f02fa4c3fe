use crate::slot::Slot;
use std::collections::HashMap;
use std::iter::FromIterator;

/// Number of participants busy in each slot. Absent slots count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusyCounts(HashMap<Slot, usize>);

impl BusyCounts {
    pub fn new() -> Self {
        BusyCounts(HashMap::new())
    }

    /// # Examples
    /// ```
    /// use practiceplan_libs::busy::BusyCounts;
    /// use practiceplan_libs::day::Day;
    /// use practiceplan_libs::slot::Slot;
    ///
    /// let mut busy = BusyCounts::new();
    /// busy.insert(Slot::new(Day::Tue, 600), 2);
    ///
    /// assert_eq!(busy.get(Slot::new(Day::Tue, 600)), 2);
    /// assert_eq!(busy.get(Slot::new(Day::Tue, 630)), 0);
    /// ```
    pub fn get(&self, slot: Slot) -> usize {
        self.0.get(&slot).copied().unwrap_or(0)
    }

    /// Overwrites the count for `slot`
    pub fn insert(&mut self, slot: Slot, count: usize) {
        self.0.insert(slot, count);
    }

    pub fn add(&mut self, slot: Slot, count: usize) {
        *self.0.entry(slot).or_insert(0) += count;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Slot, usize)> + '_ {
        self.0.iter().map(|(&slot, &count)| (slot, count))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Repeated slots are summed.
impl FromIterator<(Slot, usize)> for BusyCounts {
    fn from_iter<T: IntoIterator<Item = (Slot, usize)>>(iter: T) -> Self {
        let mut busy = BusyCounts::new();
        iter.into_iter().for_each(|(slot, count)| busy.add(slot, count));
        busy
    }
}
