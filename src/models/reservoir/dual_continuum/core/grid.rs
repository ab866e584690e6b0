use std::fmt;

/// Largest cell count a solver accepts: one `f64` field must fit in an allocation.
pub const MAX_CELLS: usize = isize::MAX as usize / size_of::<f64>();

/// Source of cylindrical grid dimensions.
///
/// Mesh construction lives outside this crate. Anything that can report the
/// radial, angular and axial cell counts of a mesh can size a solver.
pub trait GridDescriptor {
    /// Returns the cell counts of the grid.
    fn dimensions(&self) -> GridDimensions;
}

/// Cell counts of a cylindrical `(r, θ, z)` grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridDimensions {
    pub radial: usize,
    pub angular: usize,
    pub axial: usize,
}

impl GridDimensions {
    #[must_use]
    pub fn new(radial: usize, angular: usize, axial: usize) -> Self {
        Self {
            radial,
            angular,
            axial,
        }
    }

    /// Total number of cells.
    ///
    /// # Panics
    ///
    /// Panics on overflow in debug builds. Grids accepted by a solver never
    /// overflow; use [`checked_cell_count`](Self::checked_cell_count) otherwise.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.radial * self.angular * self.axial
    }

    /// Total number of cells, or `None` if the product overflows `usize`.
    #[must_use]
    pub fn checked_cell_count(&self) -> Option<usize> {
        self.radial
            .checked_mul(self.angular)?
            .checked_mul(self.axial)
    }

    /// Returns `true` if any axis has zero cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.radial == 0 || self.angular == 0 || self.axial == 0
    }

    /// Number of cells in one axial plane.
    pub(crate) fn plane_len(&self) -> usize {
        self.radial * self.angular
    }

    /// Flat storage offset of `cell`, or `None` if it lies outside the grid.
    ///
    /// Storage is radial-fastest: `i + Nr * (j + Nθ * k)`.
    #[must_use]
    pub fn offset(&self, cell: CellIndex) -> Option<usize> {
        let CellIndex {
            radial: i,
            angular: j,
            axial: k,
        } = cell;
        if i < self.radial && j < self.angular && k < self.axial {
            Some(i + self.radial * (j + self.angular * k))
        } else {
            None
        }
    }

    /// Returns `true` if the integrator updates `cell`.
    ///
    /// Interior cells exclude the first and last radial and axial layers.
    /// Every angular slice is interior.
    #[must_use]
    pub fn is_interior(&self, cell: CellIndex) -> bool {
        self.offset(cell).is_some()
            && cell.radial > 0
            && cell.radial + 1 < self.radial
            && cell.axial > 0
            && cell.axial + 1 < self.axial
    }
}

impl GridDescriptor for GridDimensions {
    fn dimensions(&self) -> GridDimensions {
        *self
    }
}

impl fmt::Display for GridDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.radial, self.angular, self.axial)
    }
}

/// Address of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellIndex {
    pub radial: usize,
    pub angular: usize,
    pub axial: usize,
}

impl CellIndex {
    #[must_use]
    pub fn new(radial: usize, angular: usize, axial: usize) -> Self {
        Self {
            radial,
            angular,
            axial,
        }
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.radial, self.angular, self.axial)
    }
}
