//! Maze generation

use log::{debug, trace};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::{Maze, MazeError};

/// Maze generator: depth-first carving, followed by optional braiding.
pub struct MazeGenerator<R = StdRng> {
    random: R,
}

/// Cell on the carving stack, with its neighbour offsets in shuffled order
/// and the index of the next offset to try.
struct Frame {
    x: usize,
    y: usize,
    directions: [(isize, isize); 4],
    next: usize,
}

impl MazeGenerator<StdRng> {
    /// Create generator, seeded from `seed` or from system entropy
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            random: if let Some(state) = seed {
                StdRng::seed_from_u64(state)
            } else {
                StdRng::from_entropy()
            },
        }
    }
}

impl<R: Rng> MazeGenerator<R> {
    const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
    /// Braidiness is a weight out of this many
    const BRAID_SCALE: u32 = 10;

    /// Create generator drawing from an existing random source
    pub fn from_rng(random: R) -> Self {
        Self { random }
    }

    /// Generate a maze of `width` x `height` cells
    ///
    /// Entry is on the top row and exit on the bottom row, both in random
    /// columns. The passages form a spanning tree rooted at the entry; with
    /// `braidiness` >= 1 additional walls are then knocked out to create
    /// loops.
    ///
    /// Returns error, if either dimension is zero.
    ///
    /// # Examples
    /// ```
    /// use braided_maze::maze_generator::MazeGenerator;
    ///
    /// let mut gen = MazeGenerator::new(Some(7));
    /// let maze = gen.generate_maze(6, 4, 0).unwrap();
    /// assert_eq!(maze.exit().1, 3);
    /// ```
    pub fn generate_maze(
        &mut self,
        width: usize,
        height: usize,
        braidiness: u32,
    ) -> Result<Maze, MazeError> {
        if width == 0 || height == 0 {
            return Err(MazeError::InvalidDimension { width, height });
        }

        let start_x = self.random.gen_range(0..width);
        let end_x = self.random.gen_range(0..width);
        let mut maze = Maze::walled(width, height, braidiness, start_x, end_x);
        debug!(
            "Generating {}x{} maze, entry at x={}, exit at x={}",
            width, height, start_x, end_x
        );

        // Exit opening in the bottom border
        maze.horizontal_walls[height - 1][end_x] = false;

        let passages = self.carve(&mut maze);
        debug!("Carved {} passages", passages);

        if braidiness >= 1 {
            let opened = self.braid(&mut maze);
            debug!("Braiding opened {} additional walls", opened);
        }
        Ok(maze)
    }

    /// Carve a spanning tree with a randomized depth-first traversal
    ///
    /// Each cell shuffles its four neighbour offsets when it is entered; the
    /// first unvisited neighbour is connected and fully explored before the
    /// next offset is tried. The pending offsets live on an explicit stack,
    /// so grid size is not bounded by call stack depth.
    ///
    /// Returns the number of passages opened, which is always
    /// `width * height - 1`.
    fn carve(&mut self, maze: &mut Maze) -> usize {
        let (width, height) = (maze.width, maze.height);
        let mut visited = vec![vec![false; width]; height];
        let (x, y) = maze.start();

        visited[y][x] = true;
        let mut stack = vec![self.frame(x, y)];
        let mut passages = 0;

        while let Some(top) = stack.last_mut() {
            let Some(&(dx, dy)) = top.directions.get(top.next) else {
                stack.pop();
                continue;
            };
            top.next += 1;
            let (x, y) = (top.x, top.y);

            let Some((nx, ny)) = Self::neighbour(x, y, dx, dy, width, height) else {
                continue;
            };
            if visited[ny][nx] {
                continue;
            }

            trace!("Connect ({}, {}) -> ({}, {})", x, y, nx, ny);
            maze.connect(x, y, nx, ny);
            visited[ny][nx] = true;
            passages += 1;
            stack.push(self.frame(nx, ny));
        }
        passages
    }

    fn frame(&mut self, x: usize, y: usize) -> Frame {
        let mut directions = Self::DIRECTIONS;
        directions.shuffle(&mut self.random);
        Frame {
            x,
            y,
            directions,
            next: 0,
        }
    }

    /// Cell at offset (dx, dy) from (x, y), if it is inside the grid
    fn neighbour(
        x: usize,
        y: usize,
        dx: isize,
        dy: isize,
        width: usize,
        height: usize,
    ) -> Option<(usize, usize)> {
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        (nx < width && ny < height).then_some((nx, ny))
    }

    /// Randomly open walls to add loops to the maze
    ///
    /// A wall is eligible, if it is neither the first nor the last entry of
    /// its row. The bottom border row of horizontal walls is never touched.
    ///
    /// Returns the number of walls that were closed before being opened.
    fn braid(&mut self, maze: &mut Maze) -> usize {
        let braidiness = maze.braidiness;
        let border = maze.height - 1;
        let mut opened = 0;

        for row in maze.vertical_walls.iter_mut() {
            opened += self.braid_row(row, braidiness);
        }
        for row in maze.horizontal_walls[..border].iter_mut() {
            opened += self.braid_row(row, braidiness);
        }
        opened
    }

    fn braid_row(&mut self, row: &mut [bool], braidiness: u32) -> usize {
        let last = row.len() - 1;
        let mut opened = 0;
        for (x, wall) in row.iter_mut().enumerate() {
            let draw = self.random.gen_range(0..Self::BRAID_SCALE);
            if draw < braidiness && x != 0 && x != last {
                if *wall {
                    opened += 1;
                }
                *wall = false;
            }
        }
        opened
    }
}
