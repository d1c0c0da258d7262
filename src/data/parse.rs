//! Parsers for the delimited input files.

use std::path::Path;

use tracing::warn;

use crate::error::{DataError, ScheduleError};
use crate::model::{RoomSet, SurgeryRequest, TuningParameters};
use crate::schedule::Schedule;

const BOM: char = '\u{feff}';

/// Column holding the application id.
pub const ID_COLUMN: usize = 1;
/// Column holding the booked room; rewritten with the final assignment.
pub const ROOM_COLUMN: usize = 5;
/// Column holding the operating time in minutes.
pub const DURATION_COLUMN: usize = 7;
/// Column holding the special-room flag (`Y` means required).
pub const SPECIAL_COLUMN: usize = 8;

fn strip_bom(line: &str) -> &str {
    line.strip_prefix(BOM).unwrap_or(line)
}

fn split_room_list(line: &str) -> impl Iterator<Item = String> + '_ {
    line.split(',')
        .map(|room| room.trim().trim_matches('"').trim())
        .filter(|room| !room.is_empty())
        .map(str::to_string)
}

#[derive(Clone, Copy)]
enum RoomSection {
    All,
    Special,
}

/// Parses a room file.
///
/// A comment line containing `roomNamesOfAll` or `roomNames4Orth`
/// announces that the next non-empty line lists all rooms or the special
/// rooms, comma separated and optionally quoted.
pub fn parse_rooms(content: &str) -> Result<RoomSet, ScheduleError> {
    let mut all = Vec::new();
    let mut special = Vec::new();
    let mut section = None;

    for line in content.lines() {
        let line = strip_bom(line).trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('#') {
            section = if line.contains("roomNamesOfAll") {
                Some(RoomSection::All)
            } else if line.contains("roomNames4Orth") {
                Some(RoomSection::Special)
            } else {
                None
            };
            continue;
        }
        match section.take() {
            Some(RoomSection::All) => all.extend(split_room_list(line)),
            Some(RoomSection::Special) => special.extend(split_room_list(line)),
            None => {}
        }
    }

    RoomSet::new(all, special)
}

/// Derives the room set from the requests themselves: every booked room
/// is a room, and every room booked for a special-requirement request is
/// special.
pub fn infer_rooms(requests: &[SurgeryRequest]) -> Result<RoomSet, ScheduleError> {
    let booked = |r: &&SurgeryRequest| !r.initial_room().trim().is_empty();
    RoomSet::new(
        requests
            .iter()
            .filter(booked)
            .map(|r| r.initial_room().trim().to_string()),
        requests
            .iter()
            .filter(booked)
            .filter(|r| r.requires_special_room())
            .map(|r| r.initial_room().trim().to_string()),
    )
}

/// Parses the argument file.
///
/// Comment and blank lines are skipped. The first four remaining lines
/// are start time, maximum regular time, maximum overtime and transition
/// time. Missing or malformed values keep their defaults.
pub fn parse_arguments(content: &str) -> TuningParameters {
    let mut params = TuningParameters::default();
    let values = content
        .lines()
        .map(|line| strip_bom(line).trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'));

    let fields: [(&str, &mut u32); 4] = [
        ("start_time", &mut params.start_time),
        ("max_regular_minutes", &mut params.max_regular_minutes),
        ("max_overtime_minutes", &mut params.max_overtime_minutes),
        ("transition_minutes", &mut params.transition_minutes),
    ];

    for ((name, field), raw) in fields.into_iter().zip(values) {
        match raw.parse::<u32>() {
            Ok(value) => *field = value,
            Err(_) => warn!(
                argument = name,
                raw,
                default = *field,
                "malformed argument, using default"
            ),
        }
    }

    params
}

/// A timetable: the raw rows, kept for writing back, and the requests
/// extracted from them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timetable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    requests: Vec<SurgeryRequest>,
}

impl Timetable {
    /// Parses timetable text. The first non-empty row is the header.
    ///
    /// Rows with fewer than nine columns are kept but yield no request;
    /// rows whose duration is not a number are kept and skipped with a
    /// warning.
    pub fn parse(content: &str) -> Result<Self, DataError> {
        let content = content.strip_prefix(BOM).unwrap_or(content);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut timetable = Self::default();
        let mut header_seen = false;

        for record in reader.records() {
            let record = record?;
            let row: Vec<String> = record.iter().map(str::to_string).collect();
            if row.iter().all(|field| field.trim().is_empty()) {
                continue;
            }
            if !header_seen {
                timetable.header = row;
                header_seen = true;
                continue;
            }

            if row.len() > SPECIAL_COLUMN {
                match row[DURATION_COLUMN].trim().parse::<u32>() {
                    Ok(minutes) => timetable.requests.push(SurgeryRequest::new(
                        row[ID_COLUMN].trim(),
                        row[ROOM_COLUMN].trim(),
                        minutes,
                        row[SPECIAL_COLUMN].trim().eq_ignore_ascii_case("Y"),
                    )),
                    Err(_) => warn!(
                        id = row[ID_COLUMN].as_str(),
                        duration = row[DURATION_COLUMN].as_str(),
                        "invalid duration, row skipped"
                    ),
                }
            }
            timetable.rows.push(row);
        }

        Ok(timetable)
    }

    /// Reads and parses a timetable file.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, DataError> {
        Self::parse(&std::fs::read_to_string(path)?)
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Data rows, without the header.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn requests(&self) -> &[SurgeryRequest] {
        &self.requests
    }

    /// Rebuilds the rows from `schedule`: rooms in name order, cases in
    /// execution order, each row's room column set to its assigned room.
    ///
    /// Rows whose id does not appear in the schedule are dropped.
    pub fn reassign(&mut self, schedule: &Schedule) {
        let rows = schedule
            .assignments()
            .filter_map(|(room, request)| {
                let mut row = self
                    .rows
                    .iter()
                    .rev()
                    .find(|row| row.get(ID_COLUMN).map(|id| id.trim()) == Some(request.id()))?
                    .clone();
                if row.len() <= ROOM_COLUMN {
                    row.resize(ROOM_COLUMN + 1, String::new());
                }
                row[ROOM_COLUMN] = room.to_string();
                Some(row)
            })
            .collect();
        self.rows = rows;
    }
}
