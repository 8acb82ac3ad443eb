//! Dense cell storage for the arena.

use torus_snake_core::{CellCoord, CellKind, GridError};

/// Square arena of tagged cells addressed by column and row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: u32,
    cells: Vec<CellKind>,
}

impl Grid {
    /// Creates an empty grid with the provided side length.
    #[must_use]
    pub fn new(size: u32) -> Self {
        let capacity_u64 = u64::from(size) * u64::from(size);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            size,
            cells: vec![CellKind::Empty; capacity],
        }
    }

    /// Side length of the grid.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Marks every cell as empty.
    pub fn reset(&mut self) {
        self.cells.fill(CellKind::Empty);
    }

    /// Returns the kind stored at the provided cell.
    pub fn get(&self, cell: CellCoord) -> Result<CellKind, GridError> {
        let index = self.index(cell)?;
        Ok(self.cells[index])
    }

    /// Stores a kind at the provided cell. Out-of-range cells leave the grid untouched.
    pub fn set(&mut self, cell: CellCoord, kind: CellKind) -> Result<(), GridError> {
        let index = self.index(cell)?;
        self.cells[index] = kind;
        Ok(())
    }

    /// Number of cells currently tagged with the provided kind.
    #[must_use]
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|stored| **stored == kind).count()
    }

    /// Iterates over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (CellCoord, CellKind)> + '_ {
        let size = u64::from(self.size);
        self.cells.iter().enumerate().map(move |(index, kind)| {
            let index = index as u64;
            let cell = CellCoord::new((index % size) as u32, (index / size) as u32);
            (cell, *kind)
        })
    }

    /// Iterates over the cells tagged with the provided kind in row-major order.
    pub fn cells_of(&self, kind: CellKind) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells()
            .filter(move |(_, stored)| *stored == kind)
            .map(|(cell, _)| cell)
    }

    fn index(&self, cell: CellCoord) -> Result<usize, GridError> {
        let out_of_range = GridError::OutOfRange {
            x: cell.x(),
            y: cell.y(),
            size: self.size,
        };
        if !cell.within(self.size) {
            return Err(out_of_range);
        }

        let row = usize::try_from(cell.y()).map_err(|_| out_of_range)?;
        let column = usize::try_from(cell.x()).map_err(|_| out_of_range)?;
        let width = usize::try_from(self.size).map_err(|_| out_of_range)?;
        Ok(row * width + column)
    }
}
