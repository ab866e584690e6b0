use super::grid::{CellIndex, GridDimensions};

/// One scalar value per grid cell, stored contiguously.
///
/// The buffer length always equals the cell count of its dimensions.
/// Fields are owned by a single solver and are never resized.
#[derive(Debug, Clone, PartialEq)]
pub struct Field3 {
    dims: GridDimensions,
    values: Vec<f64>,
}

impl Field3 {
    pub(crate) fn filled(dims: GridDimensions, value: f64) -> Self {
        Self {
            dims,
            values: vec![value; dims.cell_count()],
        }
    }

    #[must_use]
    pub fn dimensions(&self) -> GridDimensions {
        self.dims
    }

    /// Values in flat storage order (see [`GridDimensions::offset`]).
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Value at `cell`, or `None` if the cell lies outside the grid.
    #[must_use]
    pub fn get(&self, cell: CellIndex) -> Option<f64> {
        self.dims.offset(cell).map(|n| self.values[n])
    }

    pub(crate) fn at(&self, offset: usize) -> f64 {
        self.values[offset]
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// Copies `values` into this field.
    ///
    /// Callers check the length first; the buffer is never replaced.
    pub(crate) fn copy_from(&mut self, values: &[f64]) {
        debug_assert_eq!(
            values.len(),
            self.values.len(),
            "bulk copy length must match the cell count"
        );
        self.values.copy_from_slice(values);
    }
}
