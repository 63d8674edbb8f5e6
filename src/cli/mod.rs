//! Command-line front end: input parsing and board rendering.

pub mod interface;

pub use interface::*;

use crate::core::{Coordinate, Orientation, BOARD_SIZE};
use crate::session::Command;

/// Format a coordinate as a column letter and 1-based row, e.g. `E5`.
pub fn coord_to_string(at: Coordinate) -> String {
    format!("{}{}", (b'A' + at.x) as char, at.y + 1)
}

/// Parse a coordinate such as `A1` or `j10`.
pub fn parse_coord(input: &str) -> Result<Coordinate, String> {
    let input = input.trim();
    if input.len() < 2 {
        return Err("Too short - need column letter and row number (e.g., A5)".to_string());
    }
    let mut chars = input.chars();
    let col_ch = chars.next().ok_or("No column letter")?.to_ascii_uppercase();
    if !col_ch.is_ascii_alphabetic() {
        return Err(format!("Invalid column '{}' - must be a letter A-J", col_ch));
    }
    let col = (col_ch as u8).wrapping_sub(b'A');
    if col >= BOARD_SIZE {
        return Err(format!("Column '{}' out of bounds - must be A-J", col_ch));
    }
    let row_str: String = chars.collect();
    let row: u8 = row_str
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number 1-10", row_str))?;
    if row == 0 || row > BOARD_SIZE {
        return Err(format!("Row {} out of bounds - must be 1-10", row));
    }
    Ok(Coordinate::new(col, row - 1))
}

/// Parse one line of player input.
///
/// ```text
/// place A1 h|v   random   ready   E5   again   quit
/// ```
pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let head = words.next().ok_or("Empty input")?;
    let cmd = match head.to_ascii_lowercase().as_str() {
        "place" | "p" => {
            let at = parse_coord(words.next().ok_or("place needs a coordinate")?)?;
            let orientation = match words.next().map(|w| w.to_ascii_lowercase()) {
                None => Orientation::Horizontal,
                Some(w) if w == "h" => Orientation::Horizontal,
                Some(w) if w == "v" => Orientation::Vertical,
                Some(w) => return Err(format!("Unknown orientation '{}' - use h or v", w)),
            };
            Command::Place { at, orientation }
        }
        "random" | "r" => Command::Randomize,
        "ready" => Command::Ready,
        "again" => Command::PlayAgain,
        "quit" | "q" => Command::Quit,
        _ => Command::Fire(parse_coord(head)?),
    };
    match words.next() {
        Some(extra) => Err(format!("Unexpected '{}'", extra)),
        None => Ok(cmd),
    }
}
