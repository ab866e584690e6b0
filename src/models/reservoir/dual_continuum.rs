//! Dual-continuum (matrix/fracture) geothermal reservoir model.
//!
//! [`DualContinuumSolver`] owns the reservoir fields and advances them in place.
//! [`DualContinuumStep`] exposes a single explicit step as a [`twine_core::Model`]:
//! it borrows the solver's fracture geometry and options and maps a state plus
//! time step to the advanced state, leaving its input untouched.
//!
//! # Example
//!
//! ```
//! use twine_geothermal::models::reservoir::dual_continuum::{
//!     CellIndex, DualContinuumSolver, GridDimensions, SolverOptions,
//! };
//! use uom::si::{f64::Time, time::second};
//!
//! let grid = GridDimensions::new(5, 4, 5);
//! let mut solver = DualContinuumSolver::new(&grid, SolverOptions::default()).unwrap();
//!
//! let hot = grid.offset(CellIndex::new(2, 0, 2)).unwrap();
//! let mut fracture_t = solver.fracture_temperature().to_vec();
//! fracture_t[hot] = 200.0;
//! solver.set_fracture_temperature(&fracture_t).unwrap();
//!
//! solver.update_dual_continuum(Time::new::<second>(10.0)).unwrap();
//! assert!(solver.matrix_temperature()[hot] > 20.0);
//! ```

pub(crate) mod core;

pub use self::core::{
    CellCoefficients, CellIndex, Continuum, ContinuumState, DualContinuumError,
    DualContinuumSolver, DualContinuumState, EffectivePermeability, FRACTURE_SETS, Field3,
    FieldName, FractureGeometry, FractureNetwork, GeometryProperty, GridDescriptor,
    GridDimensions, MAX_CELLS, MAX_FRACTURE_POROSITY, NEGLIGIBLE, OptionsError, SolverOptions,
    StateProperty, StepReport, TransferCoefficients, cubic_law_permeability, fracture_porosity,
    shape_factor,
};

use twine_core::Model;
use uom::si::{f64::Time, time::second};

use crate::support::constraint::{Constrained, NonNegative};

use self::core::Resolved;

/// Input to [`DualContinuumStep`].
#[derive(Debug, Clone, PartialEq)]
pub struct StepInput {
    pub state: DualContinuumState,
    pub dt: Constrained<Time, NonNegative>,
}

/// Output of [`DualContinuumStep`].
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutput {
    pub state: DualContinuumState,
    pub report: StepReport,
}

/// One explicit exchange step as a [`twine_core::Model`].
///
/// Geometry and coefficients are borrowed from the solver that created the
/// model, so the network can't change while the model is alive.
#[derive(Debug, Clone, Copy)]
pub struct DualContinuumStep<'a> {
    dims: GridDimensions,
    geometry: &'a FractureGeometry,
    coefficients: &'a TransferCoefficients,
    params: &'a Resolved,
}

impl DualContinuumSolver {
    /// Returns a model that steps states on this solver's fracture network.
    #[must_use]
    pub fn step_model(&self) -> DualContinuumStep<'_> {
        DualContinuumStep {
            dims: self.dimensions(),
            geometry: self.geometry(),
            coefficients: self.transfer_coefficients(),
            params: self.params(),
        }
    }
}

impl Model for DualContinuumStep<'_> {
    type Input = StepInput;
    type Output = StepOutput;
    type Error = DualContinuumError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let actual = input.state.dimensions();
        if actual != self.dims {
            return Err(DualContinuumError::DimensionMismatch {
                expected: self.dims,
                actual,
            });
        }

        let mut state = input.state.clone();
        let dt = input.dt.as_ref().get::<second>();
        let report = self::core::advance(
            &mut state,
            self.geometry,
            self.coefficients,
            self.params,
            dt,
        );

        Ok(StepOutput { state, report })
    }
}
