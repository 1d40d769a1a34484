//! 2-D cell grid for pathfinding visualizers.
//!
//! Cells are empty or walled; one start and one end position sit on empty
//! cells. Movement is 4-directional, so Manhattan distance is the natural
//! (and admissible) heuristic between positions.

use rand::Rng;

use crate::DatasetError;

/// A position in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

impl GridPos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance between two positions.
    pub fn manhattan(&self, other: &Self) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

/// What occupies a cell. Start/end are positions, not cell kinds, so moving
/// an endpoint never destroys the cell underneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CellKind {
    #[default]
    Empty,
    Wall,
}

/// A rectangular grid of cells with designated start and end positions.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellKind>,
    start: GridPos,
    end: GridPos,
}

impl Grid {
    /// Create an all-empty grid with the given endpoints.
    pub fn new(rows: usize, cols: usize, start: GridPos, end: GridPos) -> Result<Self, DatasetError> {
        if start == end {
            return Err(DatasetError::EndpointsCoincide);
        }
        let grid = Self {
            rows,
            cols,
            cells: vec![CellKind::Empty; rows * cols],
            start,
            end,
        };
        grid.check_bounds(start)?;
        grid.check_bounds(end)?;
        Ok(grid)
    }

    /// Generate a grid with random walls. Endpoints sit on the middle row at
    /// the quarter and three-quarter columns and are never walled.
    pub fn random<R: Rng>(rows: usize, cols: usize, wall_density: f64, rng: &mut R) -> Self {
        let start = GridPos::new(rows / 2, cols / 4);
        let end = GridPos::new(rows / 2, (cols * 3) / 4);

        let cells = (0..rows * cols)
            .map(|i| {
                let pos = GridPos::new(i / cols.max(1), i % cols.max(1));
                if pos == start || pos == end {
                    CellKind::Empty
                } else if rng.gen_bool(wall_density.clamp(0.0, 1.0)) {
                    CellKind::Wall
                } else {
                    CellKind::Empty
                }
            })
            .collect();

        Self {
            rows,
            cols,
            cells,
            start,
            end,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn start(&self) -> GridPos {
        self.start
    }

    pub fn end(&self) -> GridPos {
        self.end
    }

    /// Flat index of a position (row-major).
    pub fn index(&self, pos: GridPos) -> usize {
        pos.row * self.cols + pos.col
    }

    pub fn kind(&self, pos: GridPos) -> Option<CellKind> {
        self.contains(pos).then(|| self.cells[self.index(pos)])
    }

    pub fn is_wall(&self, pos: GridPos) -> bool {
        self.kind(pos) == Some(CellKind::Wall)
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// In-bounds 4-neighbors of a position, walls included.
    pub fn neighbors(&self, pos: GridPos) -> Vec<GridPos> {
        let mut out = Vec::with_capacity(4);
        if pos.row > 0 {
            out.push(GridPos::new(pos.row - 1, pos.col));
        }
        if pos.row + 1 < self.rows {
            out.push(GridPos::new(pos.row + 1, pos.col));
        }
        if pos.col > 0 {
            out.push(GridPos::new(pos.row, pos.col - 1));
        }
        if pos.col + 1 < self.cols {
            out.push(GridPos::new(pos.row, pos.col + 1));
        }
        out
    }

    /// Flip a cell between empty and wall. Endpoints cannot be walled.
    pub fn toggle_wall(&mut self, pos: GridPos) -> Result<(), DatasetError> {
        self.check_bounds(pos)?;
        if pos == self.start || pos == self.end {
            return Err(DatasetError::Endpoint {
                row: pos.row,
                col: pos.col,
            });
        }
        let idx = self.index(pos);
        self.cells[idx] = match self.cells[idx] {
            CellKind::Empty => CellKind::Wall,
            CellKind::Wall => CellKind::Empty,
        };
        Ok(())
    }

    /// Move the start position onto an empty, non-end cell.
    pub fn move_start(&mut self, pos: GridPos) -> Result<(), DatasetError> {
        self.check_endpoint_target(pos, self.end)?;
        self.start = pos;
        Ok(())
    }

    /// Move the end position onto an empty, non-start cell.
    pub fn move_end(&mut self, pos: GridPos) -> Result<(), DatasetError> {
        self.check_endpoint_target(pos, self.start)?;
        self.end = pos;
        Ok(())
    }

    fn check_endpoint_target(&self, pos: GridPos, other: GridPos) -> Result<(), DatasetError> {
        self.check_bounds(pos)?;
        if pos == other {
            return Err(DatasetError::EndpointsCoincide);
        }
        if self.is_wall(pos) {
            return Err(DatasetError::Walled {
                row: pos.row,
                col: pos.col,
            });
        }
        Ok(())
    }

    fn check_bounds(&self, pos: GridPos) -> Result<(), DatasetError> {
        if self.contains(pos) {
            Ok(())
        } else {
            Err(DatasetError::OutOfBounds {
                row: pos.row,
                col: pos.col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn empty_grid() -> Grid {
        Grid::new(5, 8, GridPos::new(2, 1), GridPos::new(2, 6)).unwrap()
    }

    #[test]
    fn manhattan_distance() {
        let a = GridPos::new(1, 2);
        let b = GridPos::new(4, 0);
        assert_eq!(a.manhattan(&b), 5);
        assert_eq!(b.manhattan(&a), 5);
        assert_eq!(a.manhattan(&a), 0);
    }

    #[test]
    fn random_endpoints_never_walled() {
        let mut rng = StdRng::seed_from_u64(11);
        let grid = Grid::random(20, 40, 0.9, &mut rng);

        assert!(!grid.is_wall(grid.start()));
        assert!(!grid.is_wall(grid.end()));
    }

    #[test]
    fn neighbors_respect_bounds() {
        let grid = empty_grid();

        assert_eq!(grid.neighbors(GridPos::new(0, 0)).len(), 2);
        assert_eq!(grid.neighbors(GridPos::new(0, 3)).len(), 3);
        assert_eq!(grid.neighbors(GridPos::new(2, 3)).len(), 4);
    }

    #[test]
    fn toggle_wall_flips() {
        let mut grid = empty_grid();
        let pos = GridPos::new(0, 0);

        grid.toggle_wall(pos).unwrap();
        assert!(grid.is_wall(pos));
        grid.toggle_wall(pos).unwrap();
        assert!(!grid.is_wall(pos));
    }

    #[test]
    fn endpoints_cannot_be_walled() {
        let mut grid = empty_grid();
        let start = grid.start();

        assert!(matches!(
            grid.toggle_wall(start),
            Err(DatasetError::Endpoint { .. })
        ));
    }

    #[test]
    fn endpoint_cannot_move_onto_wall() {
        let mut grid = empty_grid();
        let pos = GridPos::new(1, 1);
        grid.toggle_wall(pos).unwrap();

        assert!(matches!(grid.move_start(pos), Err(DatasetError::Walled { .. })));
    }

    #[test]
    fn endpoints_stay_distinct() {
        let mut grid = empty_grid();
        let end = grid.end();

        assert_eq!(grid.move_start(end), Err(DatasetError::EndpointsCoincide));
    }

    #[test]
    fn out_of_bounds_rejected() {
        let mut grid = empty_grid();

        assert!(matches!(
            grid.toggle_wall(GridPos::new(99, 0)),
            Err(DatasetError::OutOfBounds { .. })
        ));
    }

    proptest::proptest! {
        #[test]
        fn manhattan_is_symmetric(r1 in 0usize..100, c1 in 0usize..100,
                                  r2 in 0usize..100, c2 in 0usize..100) {
            let a = GridPos::new(r1, c1);
            let b = GridPos::new(r2, c2);
            proptest::prop_assert_eq!(a.manhattan(&b), b.manhattan(&a));
        }

        #[test]
        fn manhattan_triangle_inequality(r1 in 0usize..50, c1 in 0usize..50,
                                         r2 in 0usize..50, c2 in 0usize..50,
                                         r3 in 0usize..50, c3 in 0usize..50) {
            let a = GridPos::new(r1, c1);
            let b = GridPos::new(r2, c2);
            let c = GridPos::new(r3, c3);
            proptest::prop_assert!(a.manhattan(&c) <= a.manhattan(&b) + b.manhattan(&c));
        }
    }
}
