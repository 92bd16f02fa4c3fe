use crate::day::Day;
#[cfg(feature = "serde")]
use serde::Serialize;
use thiserror::Error;

#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Error, Debug, Eq, PartialEq, Clone)]
pub enum ValidationError {
    #[error("Invalid time range. Expected start < end <= 1440, got [{start}, {end})")]
    InvalidRange { start: u16, end: u16 },
    #[error("Start of range {value} is not a multiple of the {resolution} minute resolution")]
    MisalignedRange { value: u16, resolution: u16 },
    #[error("Slot resolution must be greater than zero")]
    InvalidResolution,
    #[error("At least one day must be requested")]
    EmptyDays,
    #[error("No participants registered")]
    NoParticipants,
    #[error("{busy} participants busy on {day} at minute {slot_min}, but only {total} registered")]
    DataConsistency {
        day: Day,
        slot_min: u16,
        busy: usize,
        total: usize,
    },
    #[error("{0} is missing from the canonical day order")]
    DayNotInOrder(Day),
    #[error("Unknown day label: {0}")]
    UnknownDay(String),
    #[error("No participant with id {0}")]
    UnknownParticipant(u32),
    #[error("No unavailability entry with id {0}")]
    UnknownEntry(u32),
    #[error("Participant name required")]
    MissingName,
}
