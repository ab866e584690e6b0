use std::fmt;

use super::{
    error::{DualContinuumError, FieldName},
    field::Field3,
    grid::GridDimensions,
    options::Resolved,
};

/// One of the two co-located continua.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Continuum {
    /// Low-permeability rock between fractures.
    Matrix,
    /// Interconnected fracture network.
    Fracture,
}

/// A state variable tracked in each continuum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateProperty {
    /// Temperature in °C.
    Temperature,
    /// Pressure in Pa.
    Pressure,
    /// Liquid saturation, nominally in `[0, 1]`.
    Saturation,
}

impl fmt::Display for Continuum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Matrix => "matrix",
            Self::Fracture => "fracture",
        })
    }
}

impl fmt::Display for StateProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Temperature => "temperature",
            Self::Pressure => "pressure",
            Self::Saturation => "saturation",
        })
    }
}

/// Temperature, pressure and saturation fields of one continuum.
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuumState {
    pub(crate) temperature: Field3,
    pub(crate) pressure: Field3,
    pub(crate) saturation: Field3,
}

impl ContinuumState {
    fn uniform(dims: GridDimensions, temperature: f64, pressure: f64, saturation: f64) -> Self {
        Self {
            temperature: Field3::filled(dims, temperature),
            pressure: Field3::filled(dims, pressure),
            saturation: Field3::filled(dims, saturation),
        }
    }

    /// Temperature in °C.
    #[must_use]
    pub fn temperature(&self) -> &Field3 {
        &self.temperature
    }

    /// Pressure in Pa.
    #[must_use]
    pub fn pressure(&self) -> &Field3 {
        &self.pressure
    }

    #[must_use]
    pub fn saturation(&self) -> &Field3 {
        &self.saturation
    }

    #[must_use]
    pub fn field(&self, property: StateProperty) -> &Field3 {
        match property {
            StateProperty::Temperature => &self.temperature,
            StateProperty::Pressure => &self.pressure,
            StateProperty::Saturation => &self.saturation,
        }
    }

    pub(crate) fn field_mut(&mut self, property: StateProperty) -> &mut Field3 {
        match property {
            StateProperty::Temperature => &mut self.temperature,
            StateProperty::Pressure => &mut self.pressure,
            StateProperty::Saturation => &mut self.saturation,
        }
    }
}

/// Coupled state of the matrix and fracture continua.
///
/// All six fields share the same dimensions for the life of the state.
#[derive(Debug, Clone, PartialEq)]
pub struct DualContinuumState {
    pub(crate) matrix: ContinuumState,
    pub(crate) fracture: ContinuumState,
}

impl DualContinuumState {
    /// Both continua at the initial conditions in `params`.
    pub(crate) fn initial(dims: GridDimensions, params: &Resolved) -> Self {
        let continuum = ContinuumState::uniform(
            dims,
            params.initial_temperature,
            params.initial_pressure,
            params.initial_saturation,
        );
        Self {
            matrix: continuum.clone(),
            fracture: continuum,
        }
    }

    #[must_use]
    pub fn dimensions(&self) -> GridDimensions {
        self.matrix.temperature.dimensions()
    }

    #[must_use]
    pub fn matrix(&self) -> &ContinuumState {
        &self.matrix
    }

    #[must_use]
    pub fn fracture(&self) -> &ContinuumState {
        &self.fracture
    }

    #[must_use]
    pub fn continuum(&self, continuum: Continuum) -> &ContinuumState {
        match continuum {
            Continuum::Matrix => &self.matrix,
            Continuum::Fracture => &self.fracture,
        }
    }

    /// Copies `values` into one field.
    ///
    /// This is how boundary layers are set on a state passed to a step model.
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
        let field = self.continuum_mut(continuum).field_mut(property);
        let expected = field.as_slice().len();
        if values.len() != expected {
            return Err(DualContinuumError::LengthMismatch {
                field: FieldName::State(continuum, property),
                expected,
                actual: values.len(),
            });
        }

        field.copy_from(values);
        Ok(())
    }

    pub(crate) fn continuum_mut(&mut self, continuum: Continuum) -> &mut ContinuumState {
        match continuum {
            Continuum::Matrix => &mut self.matrix,
            Continuum::Fracture => &mut self.fracture,
        }
    }
}
