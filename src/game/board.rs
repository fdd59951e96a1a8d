//! Text rendering of both boards.
//!
//! The left board shows own ships and the opponent's shots, the right board
//! shows our shots at the opponent.

use log::warn;

use crate::{
    game::coordinate::{BOARD_SIZE, Coordinate},
    warships::ShotResult,
};

/// State of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Ship,
    Hit,
    Miss,
}

impl Cell {
    fn symbol(self) -> char {
        match self {
            Cell::Empty => '~',
            Cell::Ship => 'O',
            Cell::Hit => '#',
            Cell::Miss => '.',
        }
    }
}

type Grid = [[Cell; BOARD_SIZE]; BOARD_SIZE];

/// Own board and target board of one game.
#[derive(Debug, Clone)]
pub struct BoardView {
    own: Grid,
    target: Grid,
    /// Number of opponent shots already applied to the own board
    applied_opponent_shots: usize,
}

impl Default for BoardView {
    fn default() -> Self {
        BoardView {
            own: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
            target: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
            applied_opponent_shots: 0,
        }
    }
}

/// Parses a coordinate coming from the server, logging unexpected values.
fn server_coordinate(text: &str) -> Option<Coordinate> {
    match text.parse() {
        Ok(coordinate) => Some(coordinate),
        Err(e) => {
            warn!("ignoring cell sent by the server: {}", e);
            None
        }
    }
}

impl BoardView {
    /// Places own ships, replacing any previous layout.
    pub fn import_ships(&mut self, ships: &[String]) {
        *self = BoardView::default();
        for coordinate in ships.iter().filter_map(|s| server_coordinate(s)) {
            self.own[coordinate.row()][coordinate.column()] = Cell::Ship;
        }
    }

    /// Applies the opponent shots not seen yet.
    ///
    /// The server always sends the full ordered shot list, so only the tail
    /// beyond what was already applied is processed. Returns whether the own
    /// board changed.
    pub fn apply_opponent_shots(&mut self, shots: &[String]) -> bool {
        if shots.len() <= self.applied_opponent_shots {
            return false;
        }

        for coordinate in shots[self.applied_opponent_shots..]
            .iter()
            .filter_map(|s| server_coordinate(s))
        {
            let cell = &mut self.own[coordinate.row()][coordinate.column()];
            *cell = match *cell {
                Cell::Ship | Cell::Hit => Cell::Hit,
                Cell::Empty | Cell::Miss => Cell::Miss,
            };
        }
        self.applied_opponent_shots = shots.len();
        true
    }

    /// Marks the result of one of our shots on the target board.
    pub fn mark_shot(&mut self, coordinate: &Coordinate, result: ShotResult) {
        self.target[coordinate.row()][coordinate.column()] = match result {
            ShotResult::Hit | ShotResult::Sunk => Cell::Hit,
            ShotResult::Miss => Cell::Miss,
        };
    }

    /// Cell of the own board.
    #[cfg(test)]
    pub fn own_cell(&self, coordinate: &Coordinate) -> Cell {
        self.own[coordinate.row()][coordinate.column()]
    }

    /// Cell of the target board.
    #[cfg(test)]
    pub fn target_cell(&self, coordinate: &Coordinate) -> Cell {
        self.target[coordinate.row()][coordinate.column()]
    }

    /// Renders both boards side by side.
    pub fn render(&self) -> String {
        let header: String = (1..=BOARD_SIZE).map(|c| format!("{:>3}", c)).collect();
        let mut lines = vec![format!("  {}      {}", header, header)];

        for row in 0..BOARD_SIZE {
            let letter = (b'A' + row as u8) as char;
            let own: String = self.own[row]
                .iter()
                .map(|cell| format!("  {}", cell.symbol()))
                .collect();
            let target: String = self.target[row]
                .iter()
                .map(|cell| format!("  {}", cell.symbol()))
                .collect();
            lines.push(format!("{} {}    {} {}", letter, own, letter, target));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinate(text: &str) -> Coordinate {
        text.parse().unwrap()
    }

    fn ships(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_import_ships() {
        let mut board = BoardView::default();
        board.import_ships(&ships(&["A1", "A2", "J10", "bogus"]));

        assert_eq!(board.own_cell(&coordinate("A1")), Cell::Ship);
        assert_eq!(board.own_cell(&coordinate("J10")), Cell::Ship);
        assert_eq!(board.own_cell(&coordinate("B1")), Cell::Empty);
    }

    #[test]
    fn test_apply_opponent_shots_only_once() {
        let mut board = BoardView::default();
        board.import_ships(&ships(&["A1"]));

        assert!(board.apply_opponent_shots(&ships(&["A1", "B1"])));
        assert_eq!(board.own_cell(&coordinate("A1")), Cell::Hit);
        assert_eq!(board.own_cell(&coordinate("B1")), Cell::Miss);

        // Same list on the next poll leaves the board untouched
        assert!(!board.apply_opponent_shots(&ships(&["A1", "B1"])));
        assert!(board.apply_opponent_shots(&ships(&["A1", "B1", "C1"])));
        assert_eq!(board.own_cell(&coordinate("C1")), Cell::Miss);
    }

    #[test]
    fn test_mark_shot() {
        let mut board = BoardView::default();
        board.mark_shot(&coordinate("D4"), ShotResult::Sunk);
        board.mark_shot(&coordinate("D5"), ShotResult::Miss);

        assert_eq!(board.target_cell(&coordinate("D4")), Cell::Hit);
        assert_eq!(board.target_cell(&coordinate("D5")), Cell::Miss);
    }

    #[test]
    fn test_render() {
        let mut board = BoardView::default();
        board.import_ships(&ships(&["A1"]));
        board.mark_shot(&coordinate("A2"), ShotResult::Hit);

        let rendered = board.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), BOARD_SIZE + 1);
        assert!(lines[0].contains("10"));
        assert!(lines[1].starts_with("A   O  ~"));
        assert!(lines[1].ends_with("A   ~  #  ~  ~  ~  ~  ~  ~  ~  ~"));
        assert!(lines[10].starts_with('J'));
    }
}
