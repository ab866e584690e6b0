//! Warren-Root matrix/fracture exchange coefficients.

use super::{
    field::Field3,
    geometry::{FractureGeometry, NEGLIGIBLE},
    options::Resolved,
    water,
};

/// Number of mutually orthogonal fracture sets assumed around each matrix block.
pub const FRACTURE_SETS: f64 = 3.0;

/// Warren-Root shape factor `σ = 4n(n + 2) / L²` in 1/m².
#[must_use]
pub fn shape_factor(spacing: f64) -> f64 {
    4.0 * FRACTURE_SETS * (FRACTURE_SETS + 2.0) / (spacing * spacing)
}

/// Exchange coefficients of a single cell.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CellCoefficients {
    /// Heat exchange per unit volume and temperature difference, W/(m³·K).
    pub heat: f64,
    /// Fluid mass exchange per unit volume and pressure difference, kg/(m³·Pa·s).
    pub mass: f64,
}

impl CellCoefficients {
    /// Coefficients for a cell with the given spacing and fracture density.
    ///
    /// Negligible spacing or density isolates the matrix block and both
    /// coefficients are zero.
    #[must_use]
    pub fn new(
        spacing: f64,
        density: f64,
        matrix_thermal_conductivity: f64,
        matrix_permeability: f64,
    ) -> Self {
        if spacing < NEGLIGIBLE || density < NEGLIGIBLE {
            return Self::default();
        }

        let sigma = shape_factor(spacing);
        Self {
            heat: sigma * matrix_thermal_conductivity,
            mass: sigma * matrix_permeability * water::DENSITY / water::VISCOSITY,
        }
    }

    /// Returns `true` if this cell exchanges nothing between continua.
    #[must_use]
    pub fn is_isolated(&self) -> bool {
        self.heat == 0.0 && self.mass == 0.0
    }
}

/// Cached per-cell exchange coefficients.
///
/// Always consistent with the geometry they were computed from; the solver
/// refreshes them whenever the fracture network changes.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferCoefficients {
    heat: Field3,
    mass: Field3,
}

impl TransferCoefficients {
    pub(crate) fn compute(geometry: &FractureGeometry, params: &Resolved) -> Self {
        let dims = geometry.spacing().dimensions();
        let mut coefficients = Self {
            heat: Field3::filled(dims, 0.0),
            mass: Field3::filled(dims, 0.0),
        };
        coefficients.refresh(geometry, params);
        coefficients
    }

    pub(crate) fn refresh(&mut self, geometry: &FractureGeometry, params: &Resolved) {
        let cells = geometry
            .spacing()
            .as_slice()
            .iter()
            .zip(geometry.density().as_slice());
        let heat = self.heat.as_mut_slice().iter_mut();
        let mass = self.mass.as_mut_slice().iter_mut();

        for ((h, m), (&spacing, &density)) in heat.zip(mass).zip(cells) {
            let cell = CellCoefficients::new(
                spacing,
                density,
                params.matrix_thermal_conductivity,
                params.matrix_permeability,
            );
            *h = cell.heat;
            *m = cell.mass;
        }
    }

    /// Heat transfer coefficients in W/(m³·K).
    #[must_use]
    pub fn heat(&self) -> &Field3 {
        &self.heat
    }

    /// Mass transfer coefficients in kg/(m³·Pa·s).
    #[must_use]
    pub fn mass(&self) -> &Field3 {
        &self.mass
    }

    pub(crate) fn at(&self, offset: usize) -> CellCoefficients {
        CellCoefficients {
            heat: self.heat.at(offset),
            mass: self.mass.at(offset),
        }
    }
}
