//! Text rendering of match snapshots.

use std::fmt::Write;

use crate::core::{Board, CellStatus, Coordinate, Match, MatchResult, Phase, Side, BOARD_SIZE};

/// Render one board. `reveal` shows intact ship cells; without it they
/// render as water, which is how an opponent's board is shown.
pub fn render_board(board: &Board, reveal: bool) -> String {
    let mut out = String::new();
    out.push_str("    ");
    for x in 0..BOARD_SIZE {
        let _ = write!(out, " {}", (b'A' + x) as char);
    }
    out.push('\n');
    for y in 0..BOARD_SIZE {
        let _ = write!(out, " {:2} ", y + 1);
        for x in 0..BOARD_SIZE {
            let ch = match board.status(Coordinate::new(x, y)) {
                Some(CellStatus::Ship) if reveal => 'S',
                Some(CellStatus::Hit) => 'X',
                Some(CellStatus::Sunk) => '#',
                Some(CellStatus::Miss) => 'o',
                _ => '.',
            };
            let _ = write!(out, " {}", ch);
        }
        out.push('\n');
    }
    out
}

/// Render both boards and a status line.
pub fn render_match(game: &Match) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Your fleet ({}/20 damaged)",
        game.local_board().damaged_cells()
    );
    out.push_str(&render_board(game.local_board(), true));
    let _ = writeln!(
        out,
        "\nEnemy waters ({}/20 damaged)",
        game.opponent_board().damaged_cells()
    );
    out.push_str(&render_board(game.opponent_board(), false));
    out.push_str("    Legend: S=Ship  X=Hit  #=Sunk  o=Miss  .=Water\n\n");
    out.push_str(&status_line(game));
    out.push('\n');
    out
}

/// One-line summary of what the player should do next.
pub fn status_line(game: &Match) -> String {
    match game.phase() {
        Phase::Placement => match game.next_ship_size() {
            Some(size) => format!(
                "Place a ship of size {} (`place A1 h`) or `random` for the whole fleet.",
                size
            ),
            None if game.is_ready(Side::Local) => "Waiting for the opponent...".to_string(),
            None => "Fleet ready. Type `ready` to start.".to_string(),
        },
        Phase::Playing => match game.turn() {
            Side::Local => "Your turn. Fire with a coordinate, e.g. `E5`.".to_string(),
            Side::Opponent => "Opponent's turn...".to_string(),
        },
        Phase::GameOver => match game.result() {
            Some(MatchResult::Winner(Side::Local)) => {
                "VICTORY! The enemy fleet is destroyed. `again` to replay.".to_string()
            }
            Some(MatchResult::Winner(Side::Opponent)) => {
                "DEFEAT. Your fleet went down. `again` to replay.".to_string()
            }
            _ => "Match aborted: connection lost.".to_string(),
        },
    }
}
