//! Explicit matrix/fracture exchange over one time step.
//!
//! Each interior cell exchanges heat (and, with multiphase enabled, fluid)
//! between its two continua using only its own state and coefficients.
//! No neighbor coupling exists, so axial planes are swept in parallel.
//!
//! No stability limit is applied to `dt`.

use rayon::prelude::*;

use super::{
    geometry::FractureGeometry, options::Resolved, state::DualContinuumState,
    transfer::TransferCoefficients, water,
};

/// Summary of one integrator step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepReport {
    /// Interior cells visited by the sweep.
    pub cells_updated: usize,
    /// Largest absolute temperature change in either continuum, in K.
    pub max_temperature_change: f64,
    /// Largest absolute pressure change in either continuum, in Pa.
    pub max_pressure_change: f64,
}

impl StepReport {
    fn merge(self, other: Self) -> Self {
        Self {
            cells_updated: self.cells_updated + other.cells_updated,
            max_temperature_change: self.max_temperature_change.max(other.max_temperature_change),
            max_pressure_change: self.max_pressure_change.max(other.max_pressure_change),
        }
    }
}

/// Changes applied to the matrix and fracture values of one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Exchange {
    pub(crate) matrix: f64,
    pub(crate) fracture: f64,
}

impl Exchange {
    fn magnitude(&self) -> f64 {
        self.matrix.abs().max(self.fracture.abs())
    }
}

/// Temperature changes from heat flowing between continua over `dt`.
///
/// Returns `None` when the cell can't exchange heat: a zero coefficient, or
/// a fracture continuum with no pore volume to store heat.
pub(crate) fn heat_exchange(
    params: &Resolved,
    coefficient: f64,
    t_matrix: f64,
    t_fracture: f64,
    fracture_porosity: f64,
    dt: f64,
) -> Option<Exchange> {
    if coefficient == 0.0 || fracture_porosity <= 0.0 {
        return None;
    }

    let flux = coefficient * (t_fracture - t_matrix);
    let fracture_capacity = water::DENSITY * params.fluid_specific_heat * fracture_porosity;
    Some(Exchange {
        matrix: flux * dt / params.matrix_heat_capacity(),
        fracture: -flux * dt / fracture_capacity,
    })
}

/// Pressure changes from fluid flowing between continua over `dt`.
///
/// Returns `None` under the same conditions as [`heat_exchange`].
pub(crate) fn mass_exchange(
    params: &Resolved,
    coefficient: f64,
    p_matrix: f64,
    p_fracture: f64,
    fracture_porosity: f64,
    dt: f64,
) -> Option<Exchange> {
    if coefficient == 0.0 || fracture_porosity <= 0.0 {
        return None;
    }

    let flux = coefficient * (p_fracture - p_matrix);
    Some(Exchange {
        matrix: flux * dt / (params.matrix_porosity * water::COMPRESSIBILITY),
        fracture: -flux * dt / (fracture_porosity * water::COMPRESSIBILITY),
    })
}

/// Advances `state` by `dt` seconds in place.
///
/// Cells in the first and last radial and axial layers are left untouched.
/// A grid thinner than three cells radially or axially has no interior and
/// the step does nothing.
pub(crate) fn advance(
    state: &mut DualContinuumState,
    geometry: &FractureGeometry,
    coefficients: &TransferCoefficients,
    params: &Resolved,
    dt: f64,
) -> StepReport {
    let dims = state.dimensions();
    if dims.radial < 3 || dims.axial < 3 || dims.angular == 0 {
        return StepReport::default();
    }

    let sweep = Sweep {
        radial: dims.radial,
        angular: dims.angular,
        geometry,
        coefficients,
        params,
        dt,
    };
    let plane = dims.plane_len();
    let last_axial = dims.axial - 1;

    let DualContinuumState { matrix, fracture } = state;
    matrix
        .temperature
        .as_mut_slice()
        .par_chunks_mut(plane)
        .zip(fracture.temperature.as_mut_slice().par_chunks_mut(plane))
        .zip(matrix.pressure.as_mut_slice().par_chunks_mut(plane))
        .zip(fracture.pressure.as_mut_slice().par_chunks_mut(plane))
        .enumerate()
        .filter(|(k, _)| *k > 0 && *k < last_axial)
        .map(|(k, (((t_m, t_f), p_m), p_f))| {
            sweep.plane(
                k,
                Plane {
                    t_m,
                    t_f,
                    p_m,
                    p_f,
                },
            )
        })
        .reduce(StepReport::default, StepReport::merge)
}

/// Mutable state of one axial plane.
struct Plane<'a> {
    t_m: &'a mut [f64],
    t_f: &'a mut [f64],
    p_m: &'a mut [f64],
    p_f: &'a mut [f64],
}

/// Read-only inputs shared by every plane of a step.
struct Sweep<'a> {
    radial: usize,
    angular: usize,
    geometry: &'a FractureGeometry,
    coefficients: &'a TransferCoefficients,
    params: &'a Resolved,
    dt: f64,
}

impl Sweep<'_> {
    fn plane(&self, k: usize, fields: Plane<'_>) -> StepReport {
        let Plane { t_m, t_f, p_m, p_f } = fields;
        let base = k * self.radial * self.angular;
        let mut report = StepReport::default();

        for j in 0..self.angular {
            for i in 1..self.radial - 1 {
                let local = i + self.radial * j;
                let offset = base + local;
                report.cells_updated += 1;

                let coefficients = self.coefficients.at(offset);
                let phi_f = self.geometry.porosity_at(offset);

                if let Some(change) = heat_exchange(
                    self.params,
                    coefficients.heat,
                    t_m[local],
                    t_f[local],
                    phi_f,
                    self.dt,
                ) {
                    t_m[local] += change.matrix;
                    t_f[local] += change.fracture;
                    report.max_temperature_change =
                        report.max_temperature_change.max(change.magnitude());
                }

                if !self.params.enable_multiphase {
                    continue;
                }

                if let Some(change) = mass_exchange(
                    self.params,
                    coefficients.mass,
                    p_m[local],
                    p_f[local],
                    phi_f,
                    self.dt,
                ) {
                    p_m[local] += change.matrix;
                    p_f[local] += change.fracture;
                    report.max_pressure_change = report.max_pressure_change.max(change.magnitude());
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::reservoir::dual_continuum::core::options::SolverOptions;

    fn params() -> Resolved {
        SolverOptions::default().resolve().unwrap()
    }

    #[test]
    fn heat_flows_from_warm_fracture_into_matrix() {
        let params = params();
        let change = heat_exchange(&params, 1.0, 20.0, 50.0, 3e-4, 1.0).unwrap();

        assert!(change.matrix > 0.0);
        assert!(change.fracture < 0.0);
        assert_relative_eq!(change.matrix, 30.0 / (2650.0 * 1000.0 * 0.9));
        assert_relative_eq!(change.fracture, -30.0 / (1000.0 * 4186.0 * 3e-4));
    }

    #[test]
    fn heat_flows_from_warm_matrix_into_fracture() {
        let params = params();
        let change = heat_exchange(&params, 1.0, 80.0, 50.0, 3e-4, 1.0).unwrap();

        assert!(change.matrix < 0.0);
        assert!(change.fracture > 0.0);
    }

    #[test]
    fn equal_temperatures_exchange_nothing() {
        let params = params();
        let change = heat_exchange(&params, 150.0, 20.0, 20.0, 3e-4, 10.0).unwrap();

        assert_eq!(change.matrix, 0.0);
        assert_eq!(change.fracture, 0.0);
    }

    #[test]
    fn closed_fractures_exchange_nothing() {
        let params = params();

        assert!(heat_exchange(&params, 0.0, 20.0, 50.0, 3e-4, 1.0).is_none());
        assert!(heat_exchange(&params, 150.0, 20.0, 50.0, 0.0, 1.0).is_none());
        assert!(mass_exchange(&params, 0.0, 1e7, 2e7, 3e-4, 1.0).is_none());
        assert!(mass_exchange(&params, 6e-11, 1e7, 2e7, 0.0, 1.0).is_none());
    }

    #[test]
    fn fluid_flows_toward_lower_pressure() {
        let params = params();
        let change = mass_exchange(&params, 6e-11, 1e7, 1.1e7, 3e-4, 1.0).unwrap();

        assert!(change.matrix > 0.0);
        assert!(change.fracture < 0.0);
        assert_relative_eq!(change.matrix, 6e-11 * 1e6 / (0.1 * 4.5e-10));
        assert_relative_eq!(change.fracture, -6e-11 * 1e6 / (3e-4 * 4.5e-10));
    }

    #[test]
    fn merged_reports_keep_largest_changes() {
        let a = StepReport {
            cells_updated: 3,
            max_temperature_change: 0.5,
            max_pressure_change: 10.0,
        };
        let b = StepReport {
            cells_updated: 4,
            max_temperature_change: 1.5,
            max_pressure_change: 2.0,
        };

        assert_eq!(
            a.merge(b),
            StepReport {
                cells_updated: 7,
                max_temperature_change: 1.5,
                max_pressure_change: 10.0,
            }
        );
    }
}
