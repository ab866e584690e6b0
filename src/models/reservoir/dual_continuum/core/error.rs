use std::fmt;

use thiserror::Error;
use uom::si::f64::Time;

use crate::support::constraint::ConstraintError;

use super::{
    geometry::GeometryProperty,
    grid::{CellIndex, GridDimensions},
    options::OptionsError,
    state::{Continuum, StateProperty},
};

/// Names a per-cell field that a caller can overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    State(Continuum, StateProperty),
    Geometry(GeometryProperty),
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::State(continuum, property) => write!(f, "{continuum} {property}"),
            Self::Geometry(property) => write!(f, "{property}"),
        }
    }
}

/// Errors returned by dual-continuum solver operations.
///
/// Degenerate fracture geometry is never an error: cells with negligible
/// spacing or density simply do not exchange heat or fluid.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DualContinuumError {
    /// The grid has no cells along at least one axis.
    #[error("grid must have at least one cell along every axis, got {dimensions}")]
    EmptyGrid { dimensions: GridDimensions },

    /// The grid holds more cells than a field buffer can store.
    #[error("{dimensions} grid has too many cells")]
    GridTooLarge { dimensions: GridDimensions },

    /// The solver options are non-physical.
    #[error("invalid solver options")]
    Options(#[from] OptionsError),

    /// A bulk array does not hold one value per cell.
    #[error("{field} needs {expected} values, got {actual}")]
    LengthMismatch {
        field: FieldName,
        expected: usize,
        actual: usize,
    },

    /// A fracture geometry value is negative or not a number.
    #[error("invalid {property} at offset {offset}")]
    InvalidGeometry {
        property: GeometryProperty,
        offset: usize,
        #[source]
        source: ConstraintError,
    },

    /// A cell index lies outside the grid.
    #[error("cell {cell} is outside the {dimensions} grid")]
    CellOutOfRange {
        cell: CellIndex,
        dimensions: GridDimensions,
    },

    /// The time step is negative or not a number.
    #[error("invalid time step: {dt:?}")]
    InvalidTimeStep {
        dt: Time,
        #[source]
        source: ConstraintError,
    },

    /// A state does not match the grid of the model advancing it.
    #[error("state grid {actual} does not match model grid {expected}")]
    DimensionMismatch {
        expected: GridDimensions,
        actual: GridDimensions,
    },
}
