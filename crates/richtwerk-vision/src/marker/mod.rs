// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Corner-tag fiducial markers.
//
// A corner tag is an 8x8-cell square: a one-cell black border around a 6x6
// payload. The payload's four corner cells are orientation anchors (top-left
// white, the other three black); the remaining 32 cells carry the 8-bit tag
// ID cyclically, MSB first, giving four redundant copies of every bit. Bits
// are recovered by per-bit majority vote, so a single damaged cell never
// flips an ID.
//
// Cell convention throughout: `true` is a white cell, `false` a black one.

pub mod detector;
pub(crate) mod quad;
pub mod renderer;

/// Cells per tag side, border included.
pub const GRID: usize = 8;

/// Cells per payload side.
pub const PAYLOAD: usize = 6;

/// Payload cell grid, indexed `[row][column]`.
pub type PayloadCells = [[bool; PAYLOAD]; PAYLOAD];

/// Whether a payload cell is one of the four orientation anchors.
fn is_anchor(row: usize, col: usize) -> bool {
    (row == 0 || row == PAYLOAD - 1) && (col == 0 || col == PAYLOAD - 1)
}

/// Expected value of an anchor cell: only the payload top-left is white.
fn anchor_value(row: usize, col: usize) -> bool {
    row == 0 && col == 0
}

/// Encode a tag ID into its canonical payload grid.
pub fn encode_payload(id: u8) -> PayloadCells {
    let mut cells = [[false; PAYLOAD]; PAYLOAD];
    let mut data_index = 0usize;
    for (row, row_cells) in cells.iter_mut().enumerate() {
        for (col, cell) in row_cells.iter_mut().enumerate() {
            if is_anchor(row, col) {
                *cell = anchor_value(row, col);
            } else {
                let bit = 7 - (data_index % 8);
                *cell = (id >> bit) & 1 == 1;
                data_index += 1;
            }
        }
    }
    cells
}

/// Decode a payload grid in its canonical orientation.
///
/// Returns `None` if any orientation anchor mismatches or any bit fails to
/// reach a 3-of-4 majority across its redundant copies.
pub fn decode_payload(cells: &PayloadCells) -> Option<u8> {
    let mut ones = [0u8; 8];
    let mut data_index = 0usize;
    for (row, row_cells) in cells.iter().enumerate() {
        for (col, &cell) in row_cells.iter().enumerate() {
            if is_anchor(row, col) {
                if cell != anchor_value(row, col) {
                    return None;
                }
            } else {
                if cell {
                    ones[data_index % 8] += 1;
                }
                data_index += 1;
            }
        }
    }

    let mut id = 0u8;
    for (slot, &count) in ones.iter().enumerate() {
        let bit = match count {
            0 | 1 => 0u8,
            3 | 4 => 1u8,
            // A 2-2 split means the copies disagree beyond repair.
            _ => return None,
        };
        id |= bit << (7 - slot);
    }
    Some(id)
}

/// Rotate a payload grid a quarter turn clockwise.
pub fn rotate_payload_cw(cells: &PayloadCells) -> PayloadCells {
    let mut rotated = [[false; PAYLOAD]; PAYLOAD];
    for (row, row_cells) in rotated.iter_mut().enumerate() {
        for (col, cell) in row_cells.iter_mut().enumerate() {
            *cell = cells[PAYLOAD - 1 - col][row];
        }
    }
    rotated
}

/// Decode a payload grid in whichever of the four orientations matches.
///
/// Returns the tag ID and the number of clockwise quarter turns that were
/// applied to reach the canonical orientation. Anchors make the match
/// unambiguous: at most one rotation can carry the white corner.
pub fn decode_any_rotation(cells: &PayloadCells) -> Option<(u8, usize)> {
    let mut grid = *cells;
    for turns in 0..4 {
        if let Some(id) = decode_payload(&grid) {
            return Some((id, turns));
        }
        grid = rotate_payload_cw(&grid);
    }
    None
}

// -- Tests --------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_round_trips_reserved_ids() {
        for id in [0u8, 20, 21, 22, 23, 127, 255] {
            let cells = encode_payload(id);
            assert_eq!(decode_payload(&cells), Some(id), "id {id}");
        }
    }

    #[test]
    fn anchors_are_fixed_regardless_of_id() {
        for id in [0u8, 20, 255] {
            let cells = encode_payload(id);
            assert!(cells[0][0]);
            assert!(!cells[0][PAYLOAD - 1]);
            assert!(!cells[PAYLOAD - 1][0]);
            assert!(!cells[PAYLOAD - 1][PAYLOAD - 1]);
        }
    }

    #[test]
    fn rotation_moves_white_anchor() {
        let cells = encode_payload(22);
        let rotated = rotate_payload_cw(&cells);
        // One clockwise turn carries the payload top-left to the top-right.
        assert!(rotated[0][PAYLOAD - 1]);
        assert!(!rotated[0][0]);
    }

    #[test]
    fn rotated_grids_decode_with_turn_count() {
        let canonical = encode_payload(21);
        let mut grid = canonical;
        for physical_turns in 0..4 {
            let (id, turns) = decode_any_rotation(&grid).expect("decodable");
            assert_eq!(id, 21);
            assert_eq!(turns, (4 - physical_turns) % 4);
            grid = rotate_payload_cw(&grid);
        }
    }

    #[test]
    fn corrupted_anchor_is_rejected() {
        let mut cells = encode_payload(20);
        cells[0][0] = false;
        assert_eq!(decode_any_rotation(&cells), None);
    }

    #[test]
    fn single_damaged_data_cell_is_repaired() {
        let mut cells = encode_payload(23);
        // Flip one non-anchor data cell; the 3-of-4 majority absorbs it.
        cells[2][3] = !cells[2][3];
        assert_eq!(decode_payload(&cells), Some(23));
    }

    #[test]
    fn two_conflicting_copies_are_rejected() {
        let mut cells = encode_payload(23);
        // Damage two copies of the same bit slot. Data cells are laid out
        // cyclically over the 32 non-anchor cells, so cells 8 apart share a
        // slot: data index 0 is (0,1), data index 8 is (1,4).
        cells[0][1] = !cells[0][1];
        cells[1][4] = !cells[1][4];
        assert_eq!(decode_payload(&cells), None);
    }
}
