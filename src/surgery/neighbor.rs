//! Temperature-phased relocation moves.
//!
//! A move takes one case out of a source room and either inserts it into
//! a target room or swaps it with a case there. While hot, the longest
//! case of the source room is moved; while cold, the shortest.

use rand::Rng;

use super::problem::SurgeryProblem;
use crate::model::SurgeryRequest;
use crate::sa::Temperature;
use crate::schedule::Schedule;

impl SurgeryProblem {
    /// Returns a feasible schedule one relocation away from `schedule`.
    ///
    /// Up to `max_attempts` random moves are tried, each on a fresh copy
    /// of `schedule`. A move that leaves a special-requirement case in a
    /// general room is discarded. If every attempt fails, or there are
    /// fewer than two rooms, an unchanged copy is returned.
    ///
    /// `schedule` itself is never modified.
    pub fn perturb<R: Rng>(
        &self,
        schedule: &Schedule,
        temperature: &Temperature,
        rng: &mut R,
    ) -> Schedule {
        let rooms: Vec<&str> = schedule.room_names().collect();
        if rooms.len() < 2 {
            return schedule.clone();
        }

        let coarse = temperature.normalized() > self.high_phase_threshold;

        for _ in 0..self.max_attempts {
            let (source, target) = pick_room_pair(&rooms, rng);

            let Some(index) = schedule
                .room(source)
                .and_then(|seq| pick_request(seq, coarse))
            else {
                continue;
            };

            let mut neighbor = schedule.clone();
            if relocate(&mut neighbor, source, target, index, rng).is_some()
                && self.is_valid(&neighbor)
            {
                return neighbor;
            }
        }

        schedule.clone()
    }
}

/// Two distinct rooms, uniformly at random. `rooms` must hold at least two.
fn pick_room_pair<'a, R: Rng>(rooms: &[&'a str], rng: &mut R) -> (&'a str, &'a str) {
    let source = rng.random_range(0..rooms.len());
    let mut target = rng.random_range(0..rooms.len() - 1);
    if target >= source {
        target += 1;
    }
    (rooms[source], rooms[target])
}

/// Position of the longest (`coarse`) or shortest case, first one on ties.
fn pick_request(seq: &[SurgeryRequest], coarse: bool) -> Option<usize> {
    let mut picked: Option<(usize, u32)> = None;
    for (i, request) in seq.iter().enumerate() {
        let minutes = request.duration_minutes();
        let better = match picked {
            None => true,
            Some((_, best)) if coarse => minutes > best,
            Some((_, best)) => minutes < best,
        };
        if better {
            picked = Some((i, minutes));
        }
    }
    picked.map(|(i, _)| i)
}

/// Moves the case at `index` of `source` into `target`.
///
/// With probability 1/2 it swaps with a random case of a non-empty
/// target, and the displaced case is appended to `source`. Otherwise it
/// is inserted at a random position of `target`, ends included.
fn relocate<R: Rng>(
    schedule: &mut Schedule,
    source: &str,
    target: &str,
    index: usize,
    rng: &mut R,
) -> Option<()> {
    let request = schedule.room_mut(source)?.remove(index);
    let swap = rng.random_bool(0.5);

    let target_seq = schedule.room_mut(target)?;
    let displaced = if swap && !target_seq.is_empty() {
        let position = rng.random_range(0..target_seq.len());
        Some(std::mem::replace(&mut target_seq[position], request))
    } else {
        let position = rng.random_range(0..=target_seq.len());
        target_seq.insert(position, request);
        None
    };

    if let Some(displaced) = displaced {
        schedule.room_mut(source)?.push(displaced);
    }
    Some(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RoomSet, TuningParameters};
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeMap;

    const HOT: Temperature = Temperature {
        current: 100.0,
        initial: 100.0,
        final_: 0.01,
    };
    const COLD: Temperature = Temperature {
        current: 0.02,
        initial: 100.0,
        final_: 0.01,
    };

    fn req(id: &str, minutes: u32, special: bool) -> SurgeryRequest {
        SurgeryRequest::new(id, "", minutes, special)
    }

    fn problem(rooms: &[&str], special: &[&str], requests: Vec<SurgeryRequest>) -> SurgeryProblem {
        let rooms = RoomSet::new(rooms.iter().copied(), special.iter().copied()).unwrap();
        SurgeryProblem::new(rooms, requests, TuningParameters::default()).unwrap()
    }

    fn sorted_ids(schedule: &Schedule) -> Vec<String> {
        let mut ids: Vec<String> = schedule
            .assignments()
            .map(|(_, r)| r.id().to_string())
            .collect();
        ids.sort();
        ids
    }

    #[test]
    fn test_pick_request_ties_first() {
        let seq = vec![req("a", 30, false), req("b", 90, false), req("c", 90, false), req("d", 30, false)];
        assert_eq!(pick_request(&seq, true), Some(1));
        assert_eq!(pick_request(&seq, false), Some(0));
        assert_eq!(pick_request(&[], true), None);
    }

    #[test]
    fn test_pick_room_pair_distinct() {
        let rooms = ["A", "B", "C"];
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..200 {
            let (s, t) = pick_room_pair(&rooms, &mut rng);
            assert_ne!(s, t);
        }
    }

    #[test]
    fn test_hot_moves_longest_case() {
        // A holds one long and one short case; B is empty, so every move
        // is an insert from A into B.
        let p = problem(&["A", "B"], &[], vec![]);
        let mut schedule = Schedule::empty(p.rooms());
        schedule.push("A", req("long", 300, false));
        schedule.push("A", req("short", 20, false));

        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            let neighbor = p.perturb(&schedule, &HOT, &mut rng);
            assert_eq!(neighbor.room_of("long"), Some("B"));
            assert_eq!(neighbor.room_of("short"), Some("A"));
        }
    }

    #[test]
    fn test_cold_moves_shortest_case() {
        let p = problem(&["A", "B"], &[], vec![]);
        let mut schedule = Schedule::empty(p.rooms());
        schedule.push("A", req("long", 300, false));
        schedule.push("A", req("short", 20, false));

        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            let neighbor = p.perturb(&schedule, &COLD, &mut rng);
            assert_eq!(neighbor.room_of("short"), Some("B"));
            assert_eq!(neighbor.room_of("long"), Some("A"));
        }
    }

    #[test]
    fn test_single_room_returns_unchanged_copy() {
        let p = problem(&["A"], &[], vec![req("x", 60, false)]);
        let schedule = p.initial_schedule();
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(p.perturb(&schedule, &HOT, &mut rng), schedule);
    }

    #[test]
    fn test_no_feasible_move_returns_input() {
        // The only case is special and the only other room is general.
        let p = problem(&["G", "S"], &["S"], vec![req("s", 60, true)]);
        let schedule = p.initial_schedule();
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..10 {
            assert_eq!(p.perturb(&schedule, &COLD, &mut rng), schedule);
        }
    }

    #[test]
    fn test_input_not_mutated() {
        let p = problem(
            &["A", "B", "C"],
            &[],
            (0..9).map(|i| req(&i.to_string(), 30 + 10 * i, false)).collect(),
        );
        let schedule = p.initial_schedule();
        let snapshot = schedule.clone();
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..50 {
            let _ = p.perturb(&schedule, &HOT, &mut rng);
        }
        assert_eq!(schedule, snapshot);
    }

    #[test]
    fn test_swap_appends_displaced_to_source() {
        let mut rooms = BTreeMap::new();
        rooms.insert("A".to_string(), vec![req("a", 10, false)]);
        rooms.insert("B".to_string(), vec![req("b", 20, false)]);
        let base = Schedule::from_rooms(rooms);

        // Either outcome is a swap (A=[b], B=[a]) or an insert (A=[], B has 2).
        let mut rng = StdRng::seed_from_u64(4);
        let mut saw_swap = false;
        let mut saw_insert = false;
        for _ in 0..50 {
            let mut s = base.clone();
            relocate(&mut s, "A", "B", 0, &mut rng).unwrap();
            match s.room("A").unwrap().len() {
                1 => {
                    assert_eq!(s.room_of("b"), Some("A"));
                    assert_eq!(s.room_of("a"), Some("B"));
                    saw_swap = true;
                }
                0 => {
                    assert_eq!(s.room("B").unwrap().len(), 2);
                    saw_insert = true;
                }
                n => panic!("unexpected source length {n}"),
            }
        }
        assert!(saw_swap && saw_insert);
    }

    fn instance() -> impl Strategy<Value = (usize, usize, Vec<(u32, bool)>, u64)> {
        (
            2usize..6,
            1usize..3,
            prop::collection::vec((1u32..400, prop::bool::weighted(0.3)), 1..20),
            any::<u64>(),
        )
    }

    proptest! {
        #[test]
        fn prop_neighbors_conserve_and_stay_feasible(
            (room_count, special_count, cases, seed) in instance()
        ) {
            let special_count = special_count.min(room_count - 1);
            let names: Vec<String> = (0..room_count).map(|i| format!("R{i}")).collect();
            let special: Vec<String> = names[..special_count].to_vec();
            let requests: Vec<SurgeryRequest> = cases
                .iter()
                .enumerate()
                .map(|(i, &(d, s))| SurgeryRequest::new(format!("c{i}"), "", d, s))
                .collect();
            let rooms = RoomSet::new(names.clone(), special).unwrap();
            let p = SurgeryProblem::new(rooms, requests, TuningParameters::default()).unwrap();

            let mut rng = StdRng::seed_from_u64(seed);
            let mut current = p.initial_schedule();
            let expected = sorted_ids(&current);
            prop_assert!(p.is_valid(&current));

            for step in 0..30 {
                let t = Temperature::new(100.0 - step as f64 * 3.0, 100.0, 0.01);
                let before = current.clone();
                let next = p.perturb(&current, &t, &mut rng);
                prop_assert_eq!(&current, &before);
                prop_assert!(p.is_valid(&next));
                prop_assert_eq!(next.request_count(), expected.len());
                prop_assert_eq!(sorted_ids(&next), expected.clone());
                current = next;
            }
        }
    }
}
