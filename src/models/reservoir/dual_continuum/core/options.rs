use thiserror::Error;
use uom::si::{
    area::square_meter,
    f64::{
        Area, Length, MassDensity, Pressure, Ratio, SpecificHeatCapacity, ThermalConductivity,
        ThermodynamicTemperature,
    },
    length::meter,
    mass_density::kilogram_per_cubic_meter,
    pressure::pascal,
    ratio::ratio,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::degree_celsius,
};

use crate::support::constraint::{
    Constraint, NonNegative, StrictlyPositive, UnitInterval, UnitIntervalOpen,
};

/// Errors returned when [`SolverOptions`] hold non-physical values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OptionsError {
    #[error("invalid matrix permeability: {value:?}")]
    MatrixPermeability { value: Area },
    #[error("matrix porosity must lie strictly between 0 and 1: {value:?}")]
    MatrixPorosity { value: Ratio },
    #[error("invalid matrix thermal conductivity: {value:?}")]
    MatrixThermalConductivity { value: ThermalConductivity },
    #[error("invalid matrix specific heat: {value:?}")]
    MatrixSpecificHeat { value: SpecificHeatCapacity },
    #[error("invalid matrix density: {value:?}")]
    MatrixDensity { value: MassDensity },
    #[error("invalid fracture aperture: {value:?}")]
    FractureAperture { value: Length },
    #[error("invalid fracture spacing: {value:?}")]
    FractureSpacing { value: Length },
    #[error("invalid fracture density: {value} per meter")]
    FractureDensity { value: f64 },
    #[error("invalid fluid specific heat: {value:?}")]
    FluidSpecificHeat { value: SpecificHeatCapacity },
    #[error("initial temperature must be finite: {value:?}")]
    InitialTemperature { value: ThermodynamicTemperature },
    #[error("initial pressure must be finite: {value:?}")]
    InitialPressure { value: Pressure },
    #[error("initial saturation must lie in [0, 1]: {value:?}")]
    InitialSaturation { value: Ratio },
}

/// Construction-time configuration of a dual-continuum solver.
///
/// Every field is fixed once the solver is built.
/// Fracture values seed the initial network, which can be replaced later
/// cell by cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverOptions {
    pub matrix_permeability: Area,
    pub matrix_porosity: Ratio,
    pub matrix_thermal_conductivity: ThermalConductivity,
    pub matrix_specific_heat: SpecificHeatCapacity,
    pub matrix_density: MassDensity,
    pub fracture_aperture: Length,
    pub fracture_spacing: Length,
    /// Fractures per meter.
    pub fracture_density: f64,
    pub fluid_specific_heat: SpecificHeatCapacity,
    pub initial_temperature: ThermodynamicTemperature,
    pub initial_pressure: Pressure,
    pub initial_saturation: Ratio,
    /// Enables pressure exchange between the continua.
    pub enable_multiphase: bool,
}

impl Default for SolverOptions {
    /// Crystalline rock with a sparse, water-filled fracture network at 20 °C and 10 MPa.
    fn default() -> Self {
        Self {
            matrix_permeability: Area::new::<square_meter>(1e-18),
            matrix_porosity: Ratio::new::<ratio>(0.1),
            matrix_thermal_conductivity: ThermalConductivity::new::<watt_per_meter_kelvin>(2.5),
            matrix_specific_heat: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(1000.0),
            matrix_density: MassDensity::new::<kilogram_per_cubic_meter>(2650.0),
            fracture_aperture: Length::new::<meter>(1e-4),
            fracture_spacing: Length::new::<meter>(1.0),
            fracture_density: 3.0,
            fluid_specific_heat: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(4186.0),
            initial_temperature: ThermodynamicTemperature::new::<degree_celsius>(20.0),
            initial_pressure: Pressure::new::<pascal>(1e7),
            initial_saturation: Ratio::new::<ratio>(1.0),
            enable_multiphase: false,
        }
    }
}

impl SolverOptions {
    #[must_use]
    pub fn with_initial_temperature(mut self, temperature: ThermodynamicTemperature) -> Self {
        self.initial_temperature = temperature;
        self
    }

    #[must_use]
    pub fn with_initial_pressure(mut self, pressure: Pressure) -> Self {
        self.initial_pressure = pressure;
        self
    }

    /// Sets the initial fracture network applied uniformly to every cell.
    #[must_use]
    pub fn with_fractures(mut self, aperture: Length, spacing: Length, density: f64) -> Self {
        self.fracture_aperture = aperture;
        self.fracture_spacing = spacing;
        self.fracture_density = density;
        self
    }

    #[must_use]
    pub fn with_multiphase(mut self, enabled: bool) -> Self {
        self.enable_multiphase = enabled;
        self
    }

    /// Checks every field and converts to plain SI values.
    ///
    /// Temperatures are kept in degrees Celsius.
    ///
    /// # Errors
    ///
    /// Returns the [`OptionsError`] for the first non-physical field found.
    pub(crate) fn resolve(&self) -> Result<Resolved, OptionsError> {
        let k = self.matrix_permeability;
        if NonNegative::check(&k.value).is_err() {
            return Err(OptionsError::MatrixPermeability { value: k });
        }

        let phi = self.matrix_porosity;
        if UnitIntervalOpen::check(&phi).is_err() {
            return Err(OptionsError::MatrixPorosity { value: phi });
        }

        let lambda = self.matrix_thermal_conductivity;
        if NonNegative::check(&lambda.value).is_err() {
            return Err(OptionsError::MatrixThermalConductivity { value: lambda });
        }

        let cp = self.matrix_specific_heat;
        if StrictlyPositive::check(&cp.value).is_err() {
            return Err(OptionsError::MatrixSpecificHeat { value: cp });
        }

        let rho = self.matrix_density;
        if StrictlyPositive::check(&rho.value).is_err() {
            return Err(OptionsError::MatrixDensity { value: rho });
        }

        let aperture = self.fracture_aperture;
        if NonNegative::check(&aperture.value).is_err() {
            return Err(OptionsError::FractureAperture { value: aperture });
        }

        let spacing = self.fracture_spacing;
        if NonNegative::check(&spacing.value).is_err() {
            return Err(OptionsError::FractureSpacing { value: spacing });
        }

        let density = self.fracture_density;
        if NonNegative::check(&density).is_err() {
            return Err(OptionsError::FractureDensity { value: density });
        }

        let cp_fluid = self.fluid_specific_heat;
        if StrictlyPositive::check(&cp_fluid.value).is_err() {
            return Err(OptionsError::FluidSpecificHeat { value: cp_fluid });
        }

        let t0 = self.initial_temperature;
        if !t0.value.is_finite() {
            return Err(OptionsError::InitialTemperature { value: t0 });
        }

        let p0 = self.initial_pressure;
        if !p0.value.is_finite() {
            return Err(OptionsError::InitialPressure { value: p0 });
        }

        let s0 = self.initial_saturation;
        if UnitInterval::check(&s0).is_err() {
            return Err(OptionsError::InitialSaturation { value: s0 });
        }

        Ok(Resolved {
            matrix_permeability: k.get::<square_meter>(),
            matrix_porosity: phi.get::<ratio>(),
            matrix_thermal_conductivity: lambda.get::<watt_per_meter_kelvin>(),
            matrix_specific_heat: cp.get::<joule_per_kilogram_kelvin>(),
            matrix_density: rho.get::<kilogram_per_cubic_meter>(),
            fracture_aperture: aperture.get::<meter>(),
            fracture_spacing: spacing.get::<meter>(),
            fracture_density: density,
            fluid_specific_heat: cp_fluid.get::<joule_per_kilogram_kelvin>(),
            initial_temperature: t0.get::<degree_celsius>(),
            initial_pressure: p0.get::<pascal>(),
            initial_saturation: s0.get::<ratio>(),
            enable_multiphase: self.enable_multiphase,
        })
    }
}

/// Validated options as plain SI values (temperatures in °C).
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Resolved {
    pub(crate) matrix_permeability: f64,
    pub(crate) matrix_porosity: f64,
    pub(crate) matrix_thermal_conductivity: f64,
    pub(crate) matrix_specific_heat: f64,
    pub(crate) matrix_density: f64,
    pub(crate) fracture_aperture: f64,
    pub(crate) fracture_spacing: f64,
    pub(crate) fracture_density: f64,
    pub(crate) fluid_specific_heat: f64,
    pub(crate) initial_temperature: f64,
    pub(crate) initial_pressure: f64,
    pub(crate) initial_saturation: f64,
    pub(crate) enable_multiphase: bool,
}

impl Resolved {
    /// Volumetric heat capacity of the solid part of the matrix, in J/(m³·K).
    pub(crate) fn matrix_heat_capacity(&self) -> f64 {
        self.matrix_density * self.matrix_specific_heat * (1.0 - self.matrix_porosity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn defaults_resolve_to_si() {
        let resolved = SolverOptions::default().resolve().unwrap();

        assert_relative_eq!(resolved.initial_temperature, 20.0, epsilon = 1e-9);
        assert_relative_eq!(resolved.initial_pressure, 1e7);
        assert_relative_eq!(resolved.fracture_aperture, 1e-4);
        assert_relative_eq!(resolved.fracture_spacing, 1.0);
        assert_relative_eq!(resolved.fracture_density, 3.0);
        assert_relative_eq!(resolved.matrix_heat_capacity(), 2650.0 * 1000.0 * 0.9);
        assert!(!resolved.enable_multiphase);
    }

    #[test]
    fn builder_methods_override_defaults() {
        let options = SolverOptions::default()
            .with_initial_temperature(ThermodynamicTemperature::new::<degree_celsius>(150.0))
            .with_fractures(Length::new::<meter>(5e-4), Length::new::<meter>(0.5), 2.0)
            .with_multiphase(true);
        let resolved = options.resolve().unwrap();

        assert_relative_eq!(resolved.initial_temperature, 150.0, epsilon = 1e-9);
        assert_relative_eq!(resolved.fracture_aperture, 5e-4);
        assert_relative_eq!(resolved.fracture_spacing, 0.5);
        assert!(resolved.enable_multiphase);
    }

    #[test]
    fn rejects_porosity_at_bounds() {
        for phi in [0.0, 1.0, -0.2, f64::NAN] {
            let options = SolverOptions {
                matrix_porosity: Ratio::new::<ratio>(phi),
                ..SolverOptions::default()
            };
            assert!(matches!(
                options.resolve(),
                Err(OptionsError::MatrixPorosity { .. })
            ));
        }
    }

    #[test]
    fn rejects_negative_fracture_values() {
        let options = SolverOptions::default().with_fractures(
            Length::new::<meter>(1e-4),
            Length::new::<meter>(-1.0),
            3.0,
        );
        assert!(matches!(
            options.resolve(),
            Err(OptionsError::FractureSpacing { .. })
        ));

        let options = SolverOptions {
            fracture_density: -0.5,
            ..SolverOptions::default()
        };
        assert!(matches!(
            options.resolve(),
            Err(OptionsError::FractureDensity { .. })
        ));
    }

    #[test]
    fn accepts_unfractured_rock() {
        let options = SolverOptions::default().with_fractures(
            Length::new::<meter>(0.0),
            Length::new::<meter>(0.0),
            0.0,
        );
        assert!(options.resolve().is_ok());
    }

    #[test]
    fn rejects_zero_heat_capacity() {
        let options = SolverOptions {
            fluid_specific_heat: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(0.0),
            ..SolverOptions::default()
        };
        assert!(matches!(
            options.resolve(),
            Err(OptionsError::FluidSpecificHeat { .. })
        ));
    }

    #[test]
    fn rejects_saturation_above_one() {
        let options = SolverOptions {
            initial_saturation: Ratio::new::<ratio>(1.5),
            ..SolverOptions::default()
        };
        assert!(matches!(
            options.resolve(),
            Err(OptionsError::InitialSaturation { .. })
        ));
    }
}
