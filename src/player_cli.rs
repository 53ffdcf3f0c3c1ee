#![cfg(feature = "std")]

//! Plain-text front end: board rendering, coordinate parsing and an
//! interactive match loop over any line-based input.

use std::fmt::Write as _;
use std::io::{BufRead, Write};
use std::string::String;
use std::vec::Vec;

use anyhow::{anyhow, Context};

use crate::common::{AttackOutcome, CellState, Coord};
use crate::game::{Match, MatchError, MatchStatus};
use crate::grid::Grid;
use crate::ship::Orientation;

/// Spreadsheet-style column name: `A`..`Z`, then `AA`, `AB`, ...
pub fn column_label(x: usize) -> String {
    let mut letters = Vec::new();
    let mut n = x + 1;
    while n > 0 {
        n -= 1;
        letters.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    letters.iter().rev().map(|&b| b as char).collect()
}

/// Format a coordinate as column label and 1-based row, e.g. `(1, 6)` -> `B7`.
pub fn coord_to_string(at: Coord) -> String {
    std::format!("{}{}", column_label(at.x), at.y + 1)
}

/// Parse `B7`-style input into `(x, y)`. Bounds are not checked.
pub fn parse_coord(input: &str) -> Option<Coord> {
    let input = input.trim();
    let split = input
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(input.len());
    let (letters, digits) = input.split_at(split);
    if letters.is_empty() {
        return None;
    }
    let mut col: usize = 0;
    for b in letters.bytes() {
        let digit = (b.to_ascii_uppercase() - b'A') as usize + 1;
        col = col.checked_mul(26)?.checked_add(digit)?;
    }
    let row: usize = digits.parse().ok()?;
    if row == 0 {
        return None;
    }
    Some(Coord::new(col - 1, row - 1))
}

/// Parse `A5 H` / `A5 v` placement input. Orientation defaults to horizontal.
pub fn parse_placement(input: &str) -> Option<(Coord, Orientation)> {
    let mut parts = input.split_whitespace();
    let at = parse_coord(parts.next()?)?;
    let orientation = match parts.next().and_then(|p| p.chars().next()) {
        Some('v') | Some('V') => Orientation::Vertical,
        Some('h') | Some('H') | None => Orientation::Horizontal,
        Some(_) => return None,
    };
    Some((at, orientation))
}

/// Render a board. With `reveal` unset, intact ship cells look like water.
pub fn render_grid(grid: &Grid, reveal: bool) -> String {
    let size = grid.size();
    let width = column_label(size.saturating_sub(1)).len();
    let mut out = String::from("   ");
    for c in 0..size {
        let _ = write!(out, " {:>width$}", column_label(c));
    }
    out.push('\n');
    for y in 0..size {
        let _ = write!(out, "{:2} ", y + 1);
        for x in 0..size {
            let ch = match grid.cell(x, y) {
                Some(CellState::Hit) => 'X',
                Some(CellState::Miss) => 'o',
                Some(CellState::ShipPresent) if reveal => 'S',
                _ => '.',
            };
            let _ = write!(out, " {:>width$}", ch);
        }
        out.push('\n');
    }
    out
}

fn describe(outcome: &AttackOutcome) -> &'static str {
    match outcome {
        AttackOutcome::Miss => "miss",
        AttackOutcome::Hit(_) => "hit",
        AttackOutcome::Sunk(_) => "hit and sunk",
    }
}

fn read_line<R: BufRead>(input: &mut R) -> anyhow::Result<String> {
    let mut line = String::new();
    let n = input.read_line(&mut line).context("failed to read input")?;
    if n == 0 {
        return Err(anyhow!("input closed"));
    }
    Ok(line.trim().to_string())
}

/// Drive a whole match from `input`, writing the game to `output`.
/// Returns the final status; `q` abandons the match early.
pub fn run_terminal_match<R: BufRead, W: Write>(
    game: &mut Match,
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<MatchStatus> {
    writeln!(output, "Place your ships (e.g. A5 H). Press enter for random placement.")?;
    while let Some(length) = game.next_ship_length() {
        write!(
            output,
            "{}Place ship of length {}: ",
            render_grid(game.player_grid(), true),
            length
        )?;
        output.flush()?;
        let line = read_line(input)?;
        if line.is_empty() {
            game.place_player_fleet_randomly()?;
            break;
        }
        match parse_placement(&line) {
            Some((at, o)) => {
                if let Err(e) = game.place_player_ship(at.x, at.y, o) {
                    writeln!(output, "Error: {}", e)?;
                }
            }
            None => writeln!(output, "Invalid input")?,
        }
    }
    game.start()?;
    writeln!(output, "All ships placed. Fire away!")?;

    while game.status() == MatchStatus::InProgress {
        write!(
            output,
            "Opponent board:\n{}\nYour board:\n{}\nFire at: ",
            render_grid(game.opponent_grid(), false),
            render_grid(game.player_grid(), true)
        )?;
        output.flush()?;
        let line = read_line(input)?;
        if line.eq_ignore_ascii_case("q") {
            writeln!(output, "Match abandoned.")?;
            return Ok(game.status());
        }
        let Some(at) = parse_coord(&line) else {
            writeln!(output, "Invalid coordinate")?;
            continue;
        };
        let outcome = match game.player_fire(at.x, at.y) {
            Ok(outcome) => outcome,
            Err(e @ (MatchError::OutOfBounds(_) | MatchError::AlreadyRevealed(_))) => {
                writeln!(output, "{}", e)?;
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        writeln!(output, "You fired at {} -> {}", coord_to_string(at), describe(&outcome))?;
        if outcome.is_hit() || game.status() != MatchStatus::InProgress {
            continue;
        }
        for (shot, outcome) in game.opponent_turn()? {
            writeln!(
                output,
                "Opponent fired at {} -> {}",
                coord_to_string(shot),
                describe(&outcome)
            )?;
        }
    }

    let stats = game.stats();
    let verdict = match game.status() {
        MatchStatus::Won => "You won!",
        _ => "You lost.",
    };
    writeln!(
        output,
        "{}\nOpponent fleet:\n{}Your accuracy: {:.1}% | Opponent accuracy: {:.1}%",
        verdict,
        render_grid(game.opponent_grid(), true),
        stats.player_accuracy(),
        stats.opponent_accuracy()
    )?;
    Ok(game.status())
}
