//! Text rendering of boards for terminal output.
//!
//! Rendering only reads the board. Colors come from a fixed table keyed by
//! vehicle id, using ANSI escape codes.

use std::fmt;

use crate::board::Board;

/// ANSI foreground codes for well-known vehicle ids
const VEHICLE_COLORS: &[(&str, u8)] = &[
    ("green", 32),
    ("red", 31),
    ("blue", 34),
    ("yellow", 33),
    ("purple", 35),
    ("cyan", 36),
    ("light-green", 92),
    ("light-blue", 94),
    ("pink", 91),
    ("orange", 95),
    ("dark", 30),
    ("grey", 90),
    ("gray", 90),
    ("magenta", 35),
];

/// Cycled for ids missing from the table
const FALLBACK_COLORS: [u8; 6] = [31, 32, 33, 34, 35, 36];

/// Plain-mode symbols for vehicles whose first letter is already taken
const FALLBACK_SYMBOLS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz123456789";

const EMPTY_CELL: char = '0';
const EXIT_MARKER: &str = " => EXIT";

#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Paint vehicles with ANSI colors; otherwise show a one-character symbol
    pub color: bool,
    pub title: Option<String>,
    /// Prefix for every grid line
    pub padding: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            color: true,
            title: None,
            padding: String::new(),
        }
    }
}

impl RenderOptions {
    pub fn plain() -> Self {
        Self {
            color: false,
            ..Self::default()
        }
    }
}

/// ANSI color code for a vehicle, given its id and insertion index
pub fn color_code(id: &str, index: usize) -> u8 {
    VEHICLE_COLORS
        .iter()
        .find(|(name, _)| *name == id)
        .map(|&(_, code)| code)
        .unwrap_or(FALLBACK_COLORS[index % FALLBACK_COLORS.len()])
}

/// One plain-mode symbol per vehicle, in insertion order.
///
/// A vehicle shows the first character of its id unless an earlier vehicle
/// or the empty-cell marker already uses it; then it takes the first unused
/// fallback symbol.
pub fn plain_symbols(board: &Board) -> Vec<char> {
    let mut taken = vec![EMPTY_CELL];
    board
        .vehicles()
        .iter()
        .map(|vehicle| {
            let symbol = vehicle
                .id()
                .chars()
                .next()
                .filter(|first| !taken.contains(first))
                .or_else(|| FALLBACK_SYMBOLS.chars().find(|c| !taken.contains(c)))
                .unwrap_or('?');
            taken.push(symbol);
            symbol
        })
        .collect()
}

/// Render a board as `|c|c|..|` lines, marking the exit row
pub fn render(board: &Board, options: &RenderOptions) -> String {
    let mut output = String::new();
    if let Some(title) = &options.title {
        output.push_str(title);
        output.push('\n');
    }

    let symbols = plain_symbols(board);
    for row in 0..board.size() {
        let cells: Vec<String> = (0..board.size())
            .map(|col| {
                let index = board.occupant(row, col).and_then(|vehicle| {
                    board.vehicles().iter().position(|v| v.id() == vehicle.id())
                });
                match index {
                    None => EMPTY_CELL.to_string(),
                    Some(index) if options.color => format!(
                        "\x1b[1;{}mX\x1b[0m",
                        color_code(board.vehicles()[index].id(), index)
                    ),
                    Some(index) => symbols[index].to_string(),
                }
            })
            .collect();

        output.push_str(&format!(
            "{}|{}|{}\n",
            options.padding,
            cells.join("|"),
            if row == board.exit_row() { EXIT_MARKER } else { "" }
        ));
    }

    output
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", render(self, &RenderOptions::plain()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::{Cell, Orientation};

    fn create_small_board() -> Board {
        let mut board = Board::new(3, 1).unwrap();
        board
            .insert("red", Cell::new(1, 0), 2, Orientation::Horizontal)
            .unwrap();
        board
            .insert("blue", Cell::new(0, 2), 2, Orientation::Vertical)
            .unwrap();
        board
    }

    #[test]
    fn test_plain_render() {
        let board = create_small_board();
        let output = render(&board, &RenderOptions::plain());
        assert_eq!(output, "|0|0|b|\n|r|r|b| => EXIT\n|0|0|0|\n");
        assert_eq!(board.to_string(), output);
    }

    #[test]
    fn test_plain_symbols_stay_distinct() {
        let mut board = Board::new(3, 1).unwrap();
        board
            .insert("red", Cell::new(1, 0), 2, Orientation::Horizontal)
            .unwrap();
        board
            .insert("r2", Cell::new(0, 0), 2, Orientation::Horizontal)
            .unwrap();
        board
            .insert("0x", Cell::new(2, 0), 2, Orientation::Horizontal)
            .unwrap();
        board
            .insert("A", Cell::new(0, 2), 3, Orientation::Vertical)
            .unwrap();

        assert_eq!(plain_symbols(&board), vec!['r', 'A', 'B', 'C']);
        assert_eq!(
            render(&board, &RenderOptions::plain()),
            "|A|A|C|\n|r|r|C| => EXIT\n|B|B|C|\n"
        );
    }

    #[test]
    fn test_title_and_padding() {
        let board = create_small_board();
        let options = RenderOptions {
            color: false,
            title: Some("Start".to_string()),
            padding: "  ".to_string(),
        };
        let output = render(&board, &options);
        assert!(output.starts_with("Start\n  |0|0|b|\n"));
    }

    #[test]
    fn test_colored_render_uses_table() {
        let board = create_small_board();
        let output = render(&board, &RenderOptions::default());
        assert!(output.contains("\x1b[1;31mX\x1b[0m"));
        assert!(output.contains("\x1b[1;34mX\x1b[0m"));
        assert!(output.contains(EXIT_MARKER));
    }

    #[test]
    fn test_color_code_fallback() {
        assert_eq!(color_code("orange", 7), 95);
        assert_eq!(color_code("truck-1", 0), 31);
        assert_eq!(color_code("truck-2", 7), 32);
    }

    #[test]
    fn test_render_does_not_mutate() {
        let board = create_small_board();
        let before = board.to_state();
        let _ = render(&board, &RenderOptions::default());
        assert_eq!(board.to_state(), before);
    }
}
