//! Dual-continuum matrix/fracture reservoir solver.
//!
//! A fractured rock volume is represented as two co-located continua, the
//! rock matrix and the fracture network, each carrying its own temperature,
//! pressure and saturation. Heat and fluid cross between them through a
//! Warren-Root shape-factor transfer term.

mod error;
mod field;
mod geometry;
mod grid;
mod integrate;
mod options;
mod state;
mod transfer;
mod water;

#[cfg(test)]
mod test_support;

pub use error::{DualContinuumError, FieldName};
pub use field::Field3;
pub use geometry::{
    FractureGeometry, FractureNetwork, GeometryProperty, MAX_FRACTURE_POROSITY, NEGLIGIBLE,
    cubic_law_permeability, fracture_porosity,
};
pub use grid::{CellIndex, GridDescriptor, GridDimensions, MAX_CELLS};
pub use integrate::StepReport;
pub use options::{OptionsError, SolverOptions};
pub use state::{Continuum, ContinuumState, DualContinuumState, StateProperty};
pub use transfer::{CellCoefficients, FRACTURE_SETS, TransferCoefficients, shape_factor};

pub(crate) use integrate::advance;
pub(crate) use options::Resolved;

use uom::si::{
    area::square_meter,
    f64::{Area, Ratio, Time},
    ratio::ratio,
    time::second,
};

use crate::support::constraint::{Constraint, NonNegative};

/// Homogenized permeability of a cell, as seen by a single-continuum flow model.
///
/// The model is isotropic, so all three components are equal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectivePermeability {
    pub radial: Area,
    pub angular: Area,
    pub axial: Area,
}

/// Stateful dual-continuum solver.
///
/// Owns every field it works on. Callers set boundary values and fracture
/// geometry through bulk copies, advance with
/// [`update_dual_continuum`](Self::update_dual_continuum), and read results back.
#[derive(Debug, Clone)]
pub struct DualContinuumSolver {
    dims: GridDimensions,
    options: SolverOptions,
    params: Resolved,
    geometry: FractureGeometry,
    coefficients: TransferCoefficients,
    state: DualContinuumState,
}

impl DualContinuumSolver {
    /// Builds a solver at the initial conditions of `options`.
    ///
    /// Every cell starts with the default fracture network, and transfer
    /// coefficients are computed immediately.
    ///
    /// # Errors
    ///
    /// Returns [`DualContinuumError::EmptyGrid`] if any axis has no cells,
    /// [`DualContinuumError::GridTooLarge`] if the cell count can't be stored,
    /// or [`DualContinuumError::Options`] if an option is non-physical.
    pub fn new(
        grid: &impl GridDescriptor,
        options: SolverOptions,
    ) -> Result<Self, DualContinuumError> {
        let dims = grid.dimensions();
        if dims.is_empty() {
            return Err(DualContinuumError::EmptyGrid { dimensions: dims });
        }
        match dims.checked_cell_count() {
            Some(cells) if cells <= MAX_CELLS => {}
            _ => return Err(DualContinuumError::GridTooLarge { dimensions: dims }),
        }

        let params = options.resolve()?;
        let geometry = FractureGeometry::uniform(
            dims,
            params.fracture_aperture,
            params.fracture_spacing,
            params.fracture_density,
        );
        let coefficients = TransferCoefficients::compute(&geometry, &params);
        let state = DualContinuumState::initial(dims, &params);

        log::debug!(
            "dual-continuum solver on {dims} grid, multiphase {}",
            if params.enable_multiphase { "on" } else { "off" }
        );

        Ok(Self {
            dims,
            options,
            params,
            geometry,
            coefficients,
            state,
        })
    }

    #[must_use]
    pub fn dimensions(&self) -> GridDimensions {
        self.dims
    }

    #[must_use]
    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    #[must_use]
    pub fn state(&self) -> &DualContinuumState {
        &self.state
    }

    #[must_use]
    pub fn geometry(&self) -> &FractureGeometry {
        &self.geometry
    }

    #[must_use]
    pub fn transfer_coefficients(&self) -> &TransferCoefficients {
        &self.coefficients
    }

    /// Values of one state field in flat storage order.
    #[must_use]
    pub fn field(&self, continuum: Continuum, property: StateProperty) -> &[f64] {
        self.state
            .continuum(continuum)
            .field(property)
            .as_slice()
    }

    /// Copies `values` into one state field.
    ///
    /// # Errors
    ///
    /// Returns [`DualContinuumError::LengthMismatch`] if `values` doesn't hold
    /// exactly one value per cell. The field is left unchanged.
    pub fn set_field(
        &mut self,
        continuum: Continuum,
        property: StateProperty,
        values: &[f64],
    ) -> Result<(), DualContinuumError> {
        self.state.set_field(continuum, property, values)
    }

    /// Matrix temperature in °C.
    #[must_use]
    pub fn matrix_temperature(&self) -> &[f64] {
        self.field(Continuum::Matrix, StateProperty::Temperature)
    }

    /// Fracture temperature in °C.
    #[must_use]
    pub fn fracture_temperature(&self) -> &[f64] {
        self.field(Continuum::Fracture, StateProperty::Temperature)
    }

    /// Matrix pressure in Pa.
    #[must_use]
    pub fn matrix_pressure(&self) -> &[f64] {
        self.field(Continuum::Matrix, StateProperty::Pressure)
    }

    /// Fracture pressure in Pa.
    #[must_use]
    pub fn fracture_pressure(&self) -> &[f64] {
        self.field(Continuum::Fracture, StateProperty::Pressure)
    }

    /// Sets matrix temperature in °C.
    ///
    /// # Errors
    ///
    /// See [`set_field`](Self::set_field).
    pub fn set_matrix_temperature(&mut self, values: &[f64]) -> Result<(), DualContinuumError> {
        self.set_field(Continuum::Matrix, StateProperty::Temperature, values)
    }

    /// Sets fracture temperature in °C.
    ///
    /// # Errors
    ///
    /// See [`set_field`](Self::set_field).
    pub fn set_fracture_temperature(&mut self, values: &[f64]) -> Result<(), DualContinuumError> {
        self.set_field(Continuum::Fracture, StateProperty::Temperature, values)
    }

    /// Sets matrix pressure in Pa.
    ///
    /// # Errors
    ///
    /// See [`set_field`](Self::set_field).
    pub fn set_matrix_pressure(&mut self, values: &[f64]) -> Result<(), DualContinuumError> {
        self.set_field(Continuum::Matrix, StateProperty::Pressure, values)
    }

    /// Sets fracture pressure in Pa.
    ///
    /// # Errors
    ///
    /// See [`set_field`](Self::set_field).
    pub fn set_fracture_pressure(&mut self, values: &[f64]) -> Result<(), DualContinuumError> {
        self.set_field(Continuum::Fracture, StateProperty::Pressure, values)
    }

    /// Replaces some or all of the fracture network.
    ///
    /// Unsupplied properties keep their values. Fracture permeability and
    /// both transfer coefficients are recomputed for every cell.
    ///
    /// # Errors
    ///
    /// Returns [`DualContinuumError::LengthMismatch`] for a slice of the wrong
    /// length, or [`DualContinuumError::InvalidGeometry`] for a negative or
    /// `NaN` entry. Every supplied slice is checked before any is applied, so
    /// an error leaves the network unchanged.
    pub fn set_fracture_network(
        &mut self,
        network: FractureNetwork<'_>,
    ) -> Result<(), DualContinuumError> {
        for (property, values) in network.supplied() {
            self.check_len(FieldName::Geometry(property), values)?;
            if let Some((offset, source)) = values
                .iter()
                .enumerate()
                .find_map(|(n, v)| NonNegative::check(v).err().map(|e| (n, e)))
            {
                return Err(DualContinuumError::InvalidGeometry {
                    property,
                    offset,
                    source,
                });
            }
        }

        self.geometry.overwrite(&network);
        self.coefficients.refresh(&self.geometry, &self.params);

        log::debug!(
            "fracture network updated (aperture: {}, spacing: {}, density: {})",
            network.aperture.is_some(),
            network.spacing.is_some(),
            network.density.is_some(),
        );
        Ok(())
    }

    /// Advances both continua by `dt`.
    ///
    /// Only interior cells change; boundary layers hold whatever the caller
    /// set. Pressures change only when multiphase exchange is enabled.
    /// No stability limit is enforced, so `dt` must be chosen by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`DualContinuumError::InvalidTimeStep`] if `dt` is negative or
    /// `NaN`. A zero step is accepted and changes nothing.
    pub fn update_dual_continuum(&mut self, dt: Time) -> Result<StepReport, DualContinuumError> {
        NonNegative::check(&dt).map_err(|source| DualContinuumError::InvalidTimeStep { dt, source })?;

        let dt = dt.get::<second>();
        let report = integrate::advance(
            &mut self.state,
            &self.geometry,
            &self.coefficients,
            &self.params,
            dt,
        );

        log::trace!(
            "advanced {} cells by {dt} s (max dT {:.3e} K, max dP {:.3e} Pa)",
            report.cells_updated,
            report.max_temperature_change,
            report.max_pressure_change,
        );
        Ok(report)
    }

    /// Fracture porosity of `cell`.
    ///
    /// # Errors
    ///
    /// Returns [`DualContinuumError::CellOutOfRange`] if the cell is outside the grid.
    pub fn fracture_porosity(&self, cell: CellIndex) -> Result<Ratio, DualContinuumError> {
        let offset = self.offset(cell)?;
        Ok(Ratio::new::<ratio>(self.geometry.porosity_at(offset)))
    }

    /// Porosity-weighted blend of matrix and fracture permeability at `cell`.
    ///
    /// `k = φm · km + φf · kf`, the same in every direction.
    ///
    /// # Errors
    ///
    /// Returns [`DualContinuumError::CellOutOfRange`] if the cell is outside the grid.
    pub fn effective_permeability(
        &self,
        cell: CellIndex,
    ) -> Result<EffectivePermeability, DualContinuumError> {
        let offset = self.offset(cell)?;
        let matrix = self.params.matrix_porosity * self.params.matrix_permeability;
        let fracture =
            self.geometry.porosity_at(offset) * self.geometry.permeability().at(offset);
        let k = Area::new::<square_meter>(matrix + fracture);

        Ok(EffectivePermeability {
            radial: k,
            angular: k,
            axial: k,
        })
    }

    pub(crate) fn params(&self) -> &Resolved {
        &self.params
    }

    fn offset(&self, cell: CellIndex) -> Result<usize, DualContinuumError> {
        self.dims
            .offset(cell)
            .ok_or(DualContinuumError::CellOutOfRange {
                cell,
                dimensions: self.dims,
            })
    }

    fn check_len(&self, field: FieldName, values: &[f64]) -> Result<(), DualContinuumError> {
        let expected = self.dims.cell_count();
        if values.len() == expected {
            Ok(())
        } else {
            Err(DualContinuumError::LengthMismatch {
                field,
                expected,
                actual: values.len(),
            })
        }
    }
}
