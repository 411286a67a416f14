//! Generate braided rectangular mazes and draw them as ASCII art
//!
//! Passages are carved with a randomized depth-first traversal, which gives
//! a perfect maze (exactly one route between any two cells). Braiding then
//! knocks out random inner walls, adding loops and removing dead ends.
//!
//! # Examples
//! ```
//! use braided_maze::maze_generator::MazeGenerator;
//!
//! let mut gen = MazeGenerator::new(Some(1));
//! let maze = gen.generate_maze(4, 3, 5).unwrap();
//! let lines: Vec<String> = maze.render().collect();
//!
//! assert_eq!(lines.len(), 2 * 3 + 1);
//! assert!(lines.iter().all(|line| line.len() == 4 * 4 + 1));
//! println!("{}", maze);
//! ```
//!
//! Mazes without an explicit random source draw from system entropy:
//! ```
//! use braided_maze::Maze;
//!
//! let maze = Maze::new(10, 10, 5).unwrap();
//! assert_eq!(maze.render().count(), 21);
//! ```

use std::{error::Error, fmt, iter};

use itertools::Itertools;

use crate::maze_generator::MazeGenerator;

pub mod maze_generator;

/// Errors of maze construction and manipulation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// Width or height is zero
    InvalidDimension { width: usize, height: usize },
    /// Cell coordinate outside the grid
    OutOfBounds { x: usize, y: usize },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MazeError::InvalidDimension { width, height } => write!(
                f,
                "Invalid maze dimensions {}x{}, width and height must be positive",
                width, height
            ),
            MazeError::OutOfBounds { x, y } => {
                write!(f, "Cell x={}, y={} is outside the maze", x, y)
            }
        }
    }
}

impl Error for MazeError {}

/// Rectangular maze
///
/// Walls are stored in two grids of `height` rows and `width` columns. The
/// last column of [Self::vertical_walls] is the right border and the last
/// row of [Self::horizontal_walls] is the bottom border.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    width: usize,
    height: usize,
    /// Probability weight (out of 10) of knocking out an inner wall
    braidiness: u32,

    /// Entry column, on the top row
    start_x: usize,
    /// Exit column, on the bottom row
    end_x: usize,

    /// `vertical_walls[y][x]`: wall between (x, y) and (x + 1, y)
    pub(crate) vertical_walls: Vec<Vec<bool>>,
    /// `horizontal_walls[y][x]`: wall between (x, y) and (x, y + 1)
    pub(crate) horizontal_walls: Vec<Vec<bool>>,

    /// Cells on a marked route through the maze
    ///
    /// Generation leaves this empty; see [Self::mark_path].
    path: Vec<Vec<bool>>,
}

impl Maze {
    const S_WALL: char = '#';
    const S_OPEN: char = ' ';
    const S_CELL: &'static str = "   ";
    const S_PATH: &'static str = " o ";
    const S_FLOOR: &'static str = "####";
    const S_PASSAGE: &'static str = "   #";

    /// Generate maze with randomness from system entropy
    ///
    /// Returns error, if `width` or `height` is zero. See
    /// [MazeGenerator::generate_maze] for seeded generation.
    pub fn new(width: usize, height: usize, braidiness: u32) -> Result<Self, MazeError> {
        MazeGenerator::new(None).generate_maze(width, height, braidiness)
    }

    /// Fully walled grid, no passages carved yet
    pub(crate) fn walled(
        width: usize,
        height: usize,
        braidiness: u32,
        start_x: usize,
        end_x: usize,
    ) -> Self {
        let grid = |value: bool| -> Vec<Vec<bool>> { vec![vec![value; width]; height] };
        Self {
            width,
            height,
            braidiness,
            start_x,
            end_x,
            vertical_walls: grid(true),
            horizontal_walls: grid(true),
            path: grid(false),
        }
    }

    /// Remove the wall between two adjacent cells
    pub(crate) fn connect(&mut self, x1: usize, y1: usize, x2: usize, y2: usize) {
        if x1 == x2 {
            // Cells above each other
            self.horizontal_walls[y1.min(y2)][x1] = false;
        } else {
            self.vertical_walls[y1][x1.min(x2)] = false;
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn braidiness(&self) -> u32 {
        self.braidiness
    }

    /// Entry cell `(x, y)`, on the top row
    pub fn start(&self) -> (usize, usize) {
        (self.start_x, 0)
    }

    /// Exit cell `(x, y)`, on the bottom row
    pub fn exit(&self) -> (usize, usize) {
        (self.end_x, self.height - 1)
    }

    /// Is there a wall on the right side of cell (x, y)
    ///
    /// Coordinates outside the maze are reported as walls.
    pub fn has_vertical_wall(&self, x: usize, y: usize) -> bool {
        Self::lookup(&self.vertical_walls, x, y).unwrap_or(true)
    }

    /// Is there a wall below cell (x, y)
    ///
    /// Coordinates outside the maze are reported as walls.
    pub fn has_horizontal_wall(&self, x: usize, y: usize) -> bool {
        Self::lookup(&self.horizontal_walls, x, y).unwrap_or(true)
    }

    fn lookup(grid: &[Vec<bool>], x: usize, y: usize) -> Option<bool> {
        grid.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Mark cell (x, y) as part of a route, drawn as `o` when rendering
    ///
    /// Returns error, if the cell is outside the maze.
    pub fn mark_path(&mut self, x: usize, y: usize) -> Result<(), MazeError> {
        let cell = self
            .path
            .get_mut(y)
            .and_then(|row| row.get_mut(x))
            .ok_or(MazeError::OutOfBounds { x, y })?;
        *cell = true;
        Ok(())
    }

    pub fn is_on_path(&self, x: usize, y: usize) -> bool {
        Self::lookup(&self.path, x, y).unwrap_or(false)
    }

    /// Draw the maze as lines of ASCII art
    ///
    /// Output has `2 * height + 1` lines of `4 * width + 1` characters: the
    /// top border with a gap at the entry, then a cell line and a floor line
    /// for every row. Call again (or clone the iterator) to draw anew.
    pub fn render(&self) -> impl Iterator<Item = String> + Clone + '_ {
        iter::once(self.top_line()).chain(
            (0..self.height).flat_map(move |y| [self.cell_line(y), self.floor_line(y)]),
        )
    }

    /// Draw the maze at half width, keeping every other character
    ///
    /// Every cell takes two characters instead of four; lines are
    /// `2 * width + 1` characters long.
    pub fn render_compact(&self) -> impl Iterator<Item = String> + Clone + '_ {
        self.render().map(|line| compact_line(&line))
    }

    fn top_line(&self) -> String {
        let border = (0..self.width)
            .map(|x| {
                if x == self.start_x {
                    Self::S_PASSAGE
                } else {
                    Self::S_FLOOR
                }
            })
            .join("");
        format!("{}{}", Self::S_WALL, border)
    }

    fn cell_line(&self, y: usize) -> String {
        let cells = (0..self.width)
            .map(|x| {
                let interior = if self.path[y][x] {
                    Self::S_PATH
                } else {
                    Self::S_CELL
                };
                let wall = if self.vertical_walls[y][x] {
                    Self::S_WALL
                } else {
                    Self::S_OPEN
                };
                format!("{}{}", interior, wall)
            })
            .join("");
        format!("{}{}", Self::S_WALL, cells)
    }

    fn floor_line(&self, y: usize) -> String {
        let floor = self.horizontal_walls[y]
            .iter()
            .map(|wall| if *wall { Self::S_FLOOR } else { Self::S_PASSAGE })
            .join("");
        format!("{}{}", Self::S_WALL, floor)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render().join("\n"))
    }
}

/// Keep every other character of a rendered line, starting from the first
///
/// # Examples
/// ```
/// use braided_maze::compact_line;
///
/// assert_eq!(compact_line("#   #####"), "# ###");
/// ```
pub fn compact_line(line: &str) -> String {
    line.chars().step_by(2).collect()
}

#[cfg(test)]
mod tests {
    use crate::{compact_line, maze_generator::MazeGenerator, Maze, MazeError};

    /// 2x2 maze with a fixed layout
    ///
    /// ```text
    /// #   #####
    /// #       #
    /// #####   #
    /// #       #
    /// #####   #
    /// ```
    fn fixed_maze() -> Maze {
        let mut maze = Maze::walled(2, 2, 0, 0, 1);
        maze.horizontal_walls[1][1] = false;
        maze.connect(0, 0, 1, 0);
        maze.connect(1, 0, 1, 1);
        maze.connect(1, 1, 0, 1);
        maze
    }

    #[test]
    fn render_fixed_layout() {
        let maze = fixed_maze();
        let lines: Vec<String> = maze.render().collect();
        assert_eq!(
            lines,
            vec![
                "#   #####",
                "#       #",
                "#####   #",
                "#       #",
                "#####   #",
            ]
        );
    }

    #[test]
    fn render_dimensions() {
        for (width, height) in [(1, 1), (3, 8), (10, 10), (17, 2)] {
            let mut gen = MazeGenerator::new(Some(width as u64));
            let maze = gen.generate_maze(width, height, 5).unwrap();
            let lines: Vec<String> = maze.render().collect();

            assert_eq!(lines.len(), 2 * height + 1);
            for line in &lines {
                assert_eq!(line.chars().count(), 4 * width + 1);
            }
        }
    }

    #[test]
    fn render_single_cell() {
        let mut gen = MazeGenerator::new(Some(0));
        let maze = gen.generate_maze(1, 1, 0).unwrap();
        let lines: Vec<String> = maze.render().collect();
        assert_eq!(lines, vec!["#   #", "#   #", "#   #"]);
    }

    #[test]
    fn render_is_restartable() {
        let maze = fixed_maze();
        let lines = maze.render();
        let first: Vec<String> = lines.clone().collect();
        let second: Vec<String> = lines.collect();
        assert_eq!(first, second);
        assert_eq!(first, maze.render().collect::<Vec<_>>());
    }

    #[test]
    fn render_marks_path() {
        let mut maze = fixed_maze();
        maze.mark_path(0, 0).unwrap();
        maze.mark_path(1, 1).unwrap();

        let lines: Vec<String> = maze.render().collect();
        assert_eq!(lines[1], "# o     #");
        assert_eq!(lines[3], "#     o #");
        assert!(maze.is_on_path(1, 1));
        assert!(!maze.is_on_path(1, 0));
    }

    #[test]
    fn generated_maze_has_empty_path() {
        let maze = Maze::new(6, 6, 5).unwrap();
        assert!(maze.render().all(|line| !line.contains('o')));
    }

    #[test]
    fn mark_path_outside_maze() {
        let mut maze = fixed_maze();
        assert_eq!(
            maze.mark_path(2, 0),
            Err(MazeError::OutOfBounds { x: 2, y: 0 })
        );
    }

    #[test]
    fn wall_accessors() {
        let maze = fixed_maze();
        assert!(!maze.has_vertical_wall(0, 0));
        assert!(maze.has_vertical_wall(1, 0));
        assert!(maze.has_horizontal_wall(0, 0));
        assert!(!maze.has_horizontal_wall(1, 0));
        assert!(!maze.has_horizontal_wall(1, 1));
        assert!(maze.has_vertical_wall(5, 5));
        assert_eq!(maze.start(), (0, 0));
        assert_eq!(maze.exit(), (1, 1));
    }

    #[test]
    fn display_joins_lines() {
        let maze = fixed_maze();
        assert_eq!(
            maze.to_string(),
            "#   #####\n#       #\n#####   #\n#       #\n#####   #"
        );
    }

    #[test]
    fn compact_rendering() {
        let maze = fixed_maze();
        let lines: Vec<String> = maze.render_compact().collect();
        assert_eq!(lines, vec!["# ###", "#   #", "### #", "#   #", "### #"]);
        assert_eq!(compact_line(""), "");
    }

    #[test]
    fn invalid_dimension_message() {
        let err = Maze::new(0, 3, 5).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid maze dimensions 0x3, width and height must be positive"
        );
    }
}
