//! Surgery requests and operating rooms.

use std::collections::BTreeSet;

use crate::error::ScheduleError;

/// One surgical case waiting to be assigned to a room.
///
/// Requests are immutable once built. Schedules hold their own copies,
/// so a request is never observed changing underneath a running search.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurgeryRequest {
    id: String,
    initial_room: String,
    duration_minutes: u32,
    requires_special_room: bool,
}

impl SurgeryRequest {
    /// Creates a request.
    ///
    /// `initial_room` is informational only; the scheduler is free to
    /// move the case anywhere its special-room requirement allows.
    pub fn new(
        id: impl Into<String>,
        initial_room: impl Into<String>,
        duration_minutes: u32,
        requires_special_room: bool,
    ) -> Self {
        Self {
            id: id.into(),
            initial_room: initial_room.into(),
            duration_minutes,
            requires_special_room,
        }
    }

    /// Application identifier, unique within one problem instance.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Room the case was booked in before optimization.
    pub fn initial_room(&self) -> &str {
        &self.initial_room
    }

    /// Operating time in minutes, excluding changeover.
    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    /// Whether the case may only run in a special room.
    pub fn requires_special_room(&self) -> bool {
        self.requires_special_room
    }
}

/// The operating rooms available over the horizon.
///
/// Both sets iterate in lexicographic order so that every traversal
/// (round-robin construction, cost accumulation, random room picks) is
/// reproducible for a given seed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomSet {
    all: BTreeSet<String>,
    special: BTreeSet<String>,
}

impl RoomSet {
    /// Builds a room set.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::UnknownSpecialRoom`] if a special room is
    /// not also listed among all rooms.
    pub fn new<A, S>(all: A, special: S) -> Result<Self, ScheduleError>
    where
        A: IntoIterator,
        A::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        let all: BTreeSet<String> = all.into_iter().map(Into::into).collect();
        let special: BTreeSet<String> = special.into_iter().map(Into::into).collect();

        if let Some(room) = special.iter().find(|room| !all.contains(*room)) {
            return Err(ScheduleError::UnknownSpecialRoom(room.clone()));
        }

        Ok(Self { all, special })
    }

    /// All room names in lexicographic order.
    pub fn all(&self) -> &BTreeSet<String> {
        &self.all
    }

    /// Rooms eligible for special-requirement requests.
    pub fn special(&self) -> &BTreeSet<String> {
        &self.special
    }

    /// Rooms that are not special, in lexicographic order.
    pub fn general(&self) -> Vec<&str> {
        self.all
            .difference(&self.special)
            .map(String::as_str)
            .collect()
    }

    pub fn is_special(&self, room: &str) -> bool {
        self.special.contains(room)
    }

    pub fn contains(&self, room: &str) -> bool {
        self.all.contains(room)
    }

    /// Number of rooms.
    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}
