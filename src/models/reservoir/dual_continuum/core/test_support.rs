use uom::si::{f64::Time, time::second};

use super::{CellIndex, DualContinuumSolver, GridDimensions, SolverOptions};

/// A 5x4x5 solver with default options.
pub(crate) fn scenario_solver() -> DualContinuumSolver {
    DualContinuumSolver::new(&GridDimensions::new(5, 4, 5), SolverOptions::default())
        .expect("default options are valid")
}

pub(crate) fn seconds(value: f64) -> Time {
    Time::new::<second>(value)
}

/// Every cell in the first or last radial or axial layer.
pub(crate) fn boundary_cells(dims: GridDimensions) -> impl Iterator<Item = CellIndex> {
    (0..dims.axial).flat_map(move |k| {
        (0..dims.angular).flat_map(move |j| {
            (0..dims.radial)
                .map(move |i| CellIndex::new(i, j, k))
                .filter(move |&cell| !dims.is_interior(cell))
        })
    })
}
