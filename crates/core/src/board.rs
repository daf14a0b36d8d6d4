//! Read model: projection from stored slots to the full board.
//!
//! Only `sold` and `drawn` numbers are persisted. [`build_board`] fills in
//! every other number as `available` and derives the winner history from
//! the drawn slots, so display code never touches raw rows.

use serde::Serialize;

use crate::slot::{all_numbers, SlotStatus, BOARD_SIZE, MAX_NUMBER, MIN_NUMBER};
use crate::types::{SlotNumber, Timestamp};

/// Minimal view of a stored slot, as read from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotSnapshot {
    pub number: SlotNumber,
    pub holder_name: String,
    pub status: SlotStatus,
    pub drawn_at: Option<Timestamp>,
}

/// One cell of the 100-number grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub number: SlotNumber,
    pub status: SlotStatus,
    pub holder_name: Option<String>,
}

/// A past winner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub number: SlotNumber,
    pub holder_name: String,
    pub drawn_at: Timestamp,
}

/// Per-status counts across the whole board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BoardSummary {
    pub available: usize,
    pub sold: usize,
    pub drawn: usize,
}

/// Full read model: grid in ascending number order, history newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RaffleBoard {
    pub grid: Vec<GridCell>,
    pub history: Vec<HistoryEntry>,
    pub summary: BoardSummary,
}

impl RaffleBoard {
    /// Look up the cell for `number`, `None` if it is off the board.
    pub fn cell(&self, number: SlotNumber) -> Option<&GridCell> {
        if !(MIN_NUMBER..=MAX_NUMBER).contains(&number) {
            return None;
        }
        self.grid.get((number - MIN_NUMBER) as usize)
    }
}

/// Project stored slots onto the board.
///
/// Snapshots with an off-board number or an `Available` status are ignored;
/// neither can come out of a well-formed store.
pub fn build_board<I>(slots: I) -> RaffleBoard
where
    I: IntoIterator<Item = SlotSnapshot>,
{
    let mut grid: Vec<GridCell> = all_numbers()
        .map(|number| GridCell {
            number,
            status: SlotStatus::Available,
            holder_name: None,
        })
        .collect();
    let mut drawn = Vec::new();

    for slot in slots {
        if slot.status == SlotStatus::Available || !(MIN_NUMBER..=MAX_NUMBER).contains(&slot.number)
        {
            continue;
        }
        let cell = &mut grid[(slot.number - MIN_NUMBER) as usize];
        cell.status = slot.status;
        cell.holder_name = Some(slot.holder_name.clone());

        if slot.status == SlotStatus::Drawn {
            drawn.push(slot);
        }
    }

    let mut summary = BoardSummary::default();
    for cell in &grid {
        match cell.status {
            SlotStatus::Available => summary.available += 1,
            SlotStatus::Sold => summary.sold += 1,
            SlotStatus::Drawn => summary.drawn += 1,
        }
    }
    debug_assert_eq!(summary.available + summary.sold + summary.drawn, BOARD_SIZE);

    RaffleBoard {
        grid,
        history: build_history(drawn),
        summary,
    }
}

/// Winner history: drawn slots, most recent first, ties by number.
///
/// Slots that are not drawn, or lack a draw time, are skipped.
pub fn build_history<I>(slots: I) -> Vec<HistoryEntry>
where
    I: IntoIterator<Item = SlotSnapshot>,
{
    let mut history: Vec<HistoryEntry> = slots
        .into_iter()
        .filter(|slot| slot.status == SlotStatus::Drawn)
        .filter_map(|slot| {
            slot.drawn_at.map(|drawn_at| HistoryEntry {
                number: slot.number,
                holder_name: slot.holder_name,
                drawn_at,
            })
        })
        .collect();
    history.sort_by(|a, b| {
        b.drawn_at
            .cmp(&a.drawn_at)
            .then_with(|| a.number.cmp(&b.number))
    });
    history
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn sold(number: SlotNumber, name: &str) -> SlotSnapshot {
        SlotSnapshot {
            number,
            holder_name: name.to_string(),
            status: SlotStatus::Sold,
            drawn_at: None,
        }
    }

    fn drawn(number: SlotNumber, name: &str, minutes: i64) -> SlotSnapshot {
        let base = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        SlotSnapshot {
            number,
            holder_name: name.to_string(),
            status: SlotStatus::Drawn,
            drawn_at: Some(base + Duration::minutes(minutes)),
        }
    }

    #[test]
    fn empty_store_gives_all_available() {
        let board = build_board(Vec::new());
        assert_eq!(board.grid.len(), BOARD_SIZE);
        assert!(board
            .grid
            .iter()
            .all(|c| c.status == SlotStatus::Available && c.holder_name.is_none()));
        assert!(board.history.is_empty());
        assert_eq!(
            board.summary,
            BoardSummary {
                available: 100,
                sold: 0,
                drawn: 0
            }
        );
    }

    #[test]
    fn grid_is_ordered_by_number() {
        let board = build_board(vec![sold(50, "X")]);
        for (index, cell) in board.grid.iter().enumerate() {
            assert_eq!(cell.number, index as SlotNumber + 1);
        }
    }

    #[test]
    fn sold_and_drawn_cells_carry_holder() {
        let board = build_board(vec![drawn(5, "Ana", 0), sold(12, "Bruno")]);

        let five = board.cell(5).unwrap();
        assert_eq!(five.status, SlotStatus::Drawn);
        assert_eq!(five.holder_name.as_deref(), Some("Ana"));

        let twelve = board.cell(12).unwrap();
        assert_eq!(twelve.status, SlotStatus::Sold);
        assert_eq!(twelve.holder_name.as_deref(), Some("Bruno"));

        assert_eq!(board.history.len(), 1);
        assert_eq!(board.history[0].number, 5);
        assert_eq!(board.history[0].holder_name, "Ana");
        assert_eq!(
            board.summary,
            BoardSummary {
                available: 98,
                sold: 1,
                drawn: 1
            }
        );
    }

    #[test]
    fn history_is_newest_first() {
        let history = build_history(vec![
            drawn(1, "first", 0),
            drawn(2, "third", 20),
            sold(3, "not a winner"),
            drawn(4, "second", 10),
        ]);
        let numbers: Vec<SlotNumber> = history.iter().map(|h| h.number).collect();
        assert_eq!(numbers, vec![2, 4, 1]);
    }

    #[test]
    fn history_ties_break_by_number() {
        let history = build_history(vec![drawn(9, "b", 5), drawn(3, "a", 5)]);
        let numbers: Vec<SlotNumber> = history.iter().map(|h| h.number).collect();
        assert_eq!(numbers, vec![3, 9]);
    }

    #[test]
    fn drawn_without_timestamp_is_left_out_of_history() {
        let mut slot = drawn(8, "Caio", 0);
        slot.drawn_at = None;
        let board = build_board(vec![slot]);
        assert_eq!(board.cell(8).unwrap().status, SlotStatus::Drawn);
        assert!(board.history.is_empty());
    }

    #[test]
    fn off_board_rows_are_ignored() {
        let board = build_board(vec![sold(0, "zero"), sold(101, "over")]);
        assert_eq!(board.summary.available, BOARD_SIZE);
    }

    #[test]
    fn cell_lookup_outside_board_is_none() {
        let board = build_board(Vec::new());
        assert!(board.cell(0).is_none());
        assert!(board.cell(101).is_none());
        assert_eq!(board.cell(100).unwrap().number, 100);
    }

    #[test]
    fn board_serializes_statuses_as_strings() {
        let board = build_board(vec![sold(1, "Ana")]);
        let json = serde_json::to_value(&board).unwrap();
        assert_eq!(json["grid"][0]["status"], "sold");
        assert_eq!(json["grid"][1]["status"], "available");
        assert!(json["grid"][1]["holder_name"].is_null());
        assert_eq!(json["summary"]["sold"], 1);
    }
}
