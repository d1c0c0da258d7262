//! The schedule representation.

use std::collections::BTreeMap;

use crate::model::{RoomSet, SurgeryRequest};

/// An assignment of surgery requests to ordered per-room sequences.
///
/// The order inside a room is the execution order. Rooms are kept in a
/// `BTreeMap` so that iteration, and therefore every cost sum and
/// every random pick by position, is reproducible.
///
/// `Clone` is a full deep copy costing O(total requests): a clone owns
/// its own sequences and can be mutated without affecting the source.
///
/// The cached [`cost`](Schedule::cost) is only as fresh as the last
/// evaluation; any mutation makes it stale until re-evaluated.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schedule {
    rooms: BTreeMap<String, Vec<SurgeryRequest>>,
    cost: f64,
}

impl Schedule {
    /// Creates a schedule with one empty sequence per room.
    pub fn empty(rooms: &RoomSet) -> Self {
        Self {
            rooms: rooms
                .all()
                .iter()
                .map(|room| (room.clone(), Vec::new()))
                .collect(),
            cost: 0.0,
        }
    }

    /// Creates a schedule from explicit room sequences. The cost is 0
    /// until evaluated.
    pub fn from_rooms(rooms: BTreeMap<String, Vec<SurgeryRequest>>) -> Self {
        Self { rooms, cost: 0.0 }
    }

    /// Cost recorded by the most recent evaluation.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub(crate) fn set_cost(&mut self, cost: f64) {
        self.cost = cost;
    }

    /// All room sequences, ordered by room name.
    pub fn rooms(&self) -> &BTreeMap<String, Vec<SurgeryRequest>> {
        &self.rooms
    }

    /// Requests assigned to `room`, in execution order.
    pub fn room(&self, room: &str) -> Option<&[SurgeryRequest]> {
        self.rooms.get(room).map(Vec::as_slice)
    }

    pub(crate) fn room_mut(&mut self, room: &str) -> Option<&mut Vec<SurgeryRequest>> {
        self.rooms.get_mut(room)
    }

    /// Appends `request` to the end of `room`, creating the room if absent.
    pub fn push(&mut self, room: &str, request: SurgeryRequest) {
        self.rooms.entry(room.to_string()).or_default().push(request);
    }

    /// Room names in order.
    pub fn room_names(&self) -> impl Iterator<Item = &str> {
        self.rooms.keys().map(String::as_str)
    }

    /// Total number of placed requests across all rooms.
    pub fn request_count(&self) -> usize {
        self.rooms.values().map(Vec::len).sum()
    }

    /// Room currently holding the request with `id`.
    pub fn room_of(&self, id: &str) -> Option<&str> {
        self.rooms
            .iter()
            .find(|(_, seq)| seq.iter().any(|r| r.id() == id))
            .map(|(room, _)| room.as_str())
    }

    /// Iterates `(room, request)` pairs in room order, then execution order.
    pub fn assignments(&self) -> impl Iterator<Item = (&str, &SurgeryRequest)> {
        self.rooms
            .iter()
            .flat_map(|(room, seq)| seq.iter().map(move |r| (room.as_str(), r)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_rooms() -> RoomSet {
        RoomSet::new(["A", "B"], Vec::<String>::new()).unwrap()
    }

    #[test]
    fn test_empty_has_all_rooms() {
        let s = Schedule::empty(&two_rooms());
        assert_eq!(s.room_names().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(s.request_count(), 0);
        assert_eq!(s.cost(), 0.0);
    }

    #[test]
    fn test_push_and_lookup() {
        let mut s = Schedule::empty(&two_rooms());
        s.push("A", SurgeryRequest::new("r1", "A", 60, false));
        s.push("B", SurgeryRequest::new("r2", "A", 30, false));
        s.push("A", SurgeryRequest::new("r3", "B", 90, false));

        assert_eq!(s.request_count(), 3);
        assert_eq!(s.room_of("r2"), Some("B"));
        assert_eq!(s.room_of("zz"), None);
        let ids: Vec<&str> = s.room("A").unwrap().iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["r1", "r3"]);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = Schedule::empty(&two_rooms());
        original.push("A", SurgeryRequest::new("r1", "A", 60, false));
        original.set_cost(12.5);

        let mut copy = original.clone();
        let moved = copy.room_mut("A").unwrap().pop().unwrap();
        copy.room_mut("B").unwrap().push(moved);
        copy.set_cost(99.0);

        assert_eq!(original.room("A").unwrap().len(), 1);
        assert!(original.room("B").unwrap().is_empty());
        assert_eq!(original.cost(), 12.5);
        assert_eq!(copy.room_of("r1"), Some("B"));
    }

    #[test]
    fn test_assignments_order() {
        let mut s = Schedule::empty(&two_rooms());
        s.push("B", SurgeryRequest::new("b1", "B", 10, false));
        s.push("A", SurgeryRequest::new("a1", "A", 10, false));
        s.push("A", SurgeryRequest::new("a2", "A", 10, false));

        let pairs: Vec<(&str, &str)> = s.assignments().map(|(room, r)| (room, r.id())).collect();
        assert_eq!(pairs, vec![("A", "a1"), ("A", "a2"), ("B", "b1")]);
    }
}
