use crate::busy::BusyCounts;
use crate::day::Day;
use crate::error::ValidationError;
use crate::grid::TimeWindow;
use crate::slot::{Slot, SLOT_MINUTES};
use itertools::Itertools;
use log::{debug, trace};
use num::Integer;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type ParticipantId = u32;
pub type EntryId = u32;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
}

/// One stored busy slot of a participant
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct UnavailableEntry {
    pub id: EntryId,
    pub day: Day,
    pub slot_min: u16,
}

/// In-memory registry of participants and the slots each of them cannot make.
///
/// A participant holds each (day, slot) at most once, so busy counts derived
/// from the roster count distinct participants.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    participants: BTreeMap<ParticipantId, Participant>,
    blocked: BTreeMap<ParticipantId, BTreeMap<Slot, EntryId>>,
    last_participant: ParticipantId,
    last_entry: EntryId,
}

impl Roster {
    pub fn new() -> Self {
        Roster::default()
    }

    /// Registers a participant, returning its id. Ids start at 1.
    pub fn add_participant(&mut self, name: &str) -> Result<ParticipantId, ValidationError> {
        let name = checked_name(name)?;

        self.last_participant += 1;
        let id = self.last_participant;
        self.participants.insert(id, Participant { id, name });
        self.blocked.insert(id, BTreeMap::new());

        debug!(participant = id; "added participant");
        Ok(id)
    }

    pub fn rename_participant(
        &mut self,
        id: ParticipantId,
        name: &str,
    ) -> Result<&Participant, ValidationError> {
        let name = checked_name(name)?;
        let participant = self
            .participants
            .get_mut(&id)
            .ok_or(ValidationError::UnknownParticipant(id))?;
        participant.name = name;

        Ok(&*participant)
    }

    /// Removes the participant together with all of its unavailability
    pub fn remove_participant(&mut self, id: ParticipantId) -> Result<Participant, ValidationError> {
        let participant = self
            .participants
            .remove(&id)
            .ok_or(ValidationError::UnknownParticipant(id))?;
        self.blocked.remove(&id);

        debug!(participant = id; "removed participant");
        Ok(participant)
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.get(&id)
    }

    /// All participants, ordered by id
    pub fn participants(&self) -> impl Iterator<Item = &Participant> {
        self.participants.values()
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Marks `[from_min, to_min)` on `day` as busy for the participant.
    ///
    /// `from_min` must fall on a half-hour boundary. Slots already stored for
    /// that day whose start lies in the range are replaced, then one slot is
    /// stored every 30 minutes from `from_min`.
    /// Returns the number of slots stored.
    ///
    /// # Examples
    /// ```
    /// use practiceplan_libs::day::Day;
    /// use practiceplan_libs::roster::Roster;
    ///
    /// let mut roster = Roster::new();
    /// let id = roster.add_participant("Ada").unwrap();
    ///
    /// assert_eq!(roster.mark_unavailable(id, Day::Fri, 1020, 1110), Ok(3));
    ///
    /// let minutes: Vec<u16> = roster
    ///     .unavailability(id)
    ///     .unwrap()
    ///     .iter()
    ///     .map(|entry| entry.slot_min)
    ///     .collect();
    /// assert_eq!(minutes, vec![1020, 1050, 1080]);
    /// ```
    pub fn mark_unavailable(
        &mut self,
        id: ParticipantId,
        day: Day,
        from_min: u16,
        to_min: u16,
    ) -> Result<usize, ValidationError> {
        let window = TimeWindow::new(from_min, to_min);
        window.validate()?;

        if !Integer::is_multiple_of(&from_min, &SLOT_MINUTES) {
            return Err(ValidationError::MisalignedRange {
                value: from_min,
                resolution: SLOT_MINUTES,
            });
        }

        let blocked = self
            .blocked
            .get_mut(&id)
            .ok_or(ValidationError::UnknownParticipant(id))?;

        blocked.retain(|slot, _| !(slot.day == day && window.contains(slot.minute)));

        let mut stored = 0;
        for minute in (from_min..to_min).step_by(SLOT_MINUTES.into()) {
            self.last_entry += 1;
            blocked.insert(Slot::new(day, minute), self.last_entry);
            stored += 1;
        }

        trace!(participant = id, slots = stored; "marked unavailable on {}", day);
        Ok(stored)
    }

    /// Stored entries of a participant, ordered by day then minute
    pub fn unavailability(&self, id: ParticipantId) -> Result<Vec<UnavailableEntry>, ValidationError> {
        let blocked = self
            .blocked
            .get(&id)
            .ok_or(ValidationError::UnknownParticipant(id))?;

        Ok(blocked
            .iter()
            .map(|(slot, &entry)| UnavailableEntry {
                id: entry,
                day: slot.day,
                slot_min: slot.minute,
            })
            .collect_vec())
    }

    pub fn remove_unavailability(
        &mut self,
        id: ParticipantId,
        entry: EntryId,
    ) -> Result<UnavailableEntry, ValidationError> {
        let blocked = self
            .blocked
            .get_mut(&id)
            .ok_or(ValidationError::UnknownParticipant(id))?;

        let slot = blocked
            .iter()
            .find(|&(_, &e)| e == entry)
            .map(|(&slot, _)| slot)
            .ok_or(ValidationError::UnknownEntry(entry))?;
        blocked.remove(&slot);

        Ok(UnavailableEntry {
            id: entry,
            day: slot.day,
            slot_min: slot.minute,
        })
    }

    /// Clears every stored entry of a participant, returning how many were removed
    pub fn clear_unavailability(&mut self, id: ParticipantId) -> Result<usize, ValidationError> {
        let blocked = self
            .blocked
            .get_mut(&id)
            .ok_or(ValidationError::UnknownParticipant(id))?;
        let cleared = blocked.len();
        blocked.clear();

        Ok(cleared)
    }

    /// Counts the distinct participants busy in each slot of `days` whose
    /// start lies within `window`.
    pub fn busy_counts(&self, days: &[Day], window: TimeWindow) -> BusyCounts {
        self.blocked
            .values()
            .flat_map(|blocked| blocked.keys())
            .filter(|slot| days.contains(&slot.day) && window.contains(slot.minute))
            .map(|&slot| (slot, 1))
            .collect()
    }
}

fn checked_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        Err(ValidationError::MissingName)
    } else {
        Ok(name.to_string())
    }
}
