use std::fmt;

use super::{field::Field3, grid::GridDimensions};

/// Spacing or density below this is treated as absent fracturing.
pub const NEGLIGIBLE: f64 = 1e-6;

/// Upper bound on derived fracture porosity.
pub const MAX_FRACTURE_POROSITY: f64 = 0.5;

/// Permeability of a smooth parallel-plate fracture, in m².
///
/// Cubic law: `k = b² / 12` for aperture `b` in meters.
#[must_use]
pub fn cubic_law_permeability(aperture: f64) -> f64 {
    aperture * aperture / 12.0
}

/// Volume fraction of a cell occupied by fractures.
///
/// Computed as `density · aperture / spacing`, capped at
/// [`MAX_FRACTURE_POROSITY`]. Returns zero when spacing is negligible.
#[must_use]
pub fn fracture_porosity(aperture: f64, spacing: f64, density: f64) -> f64 {
    if spacing < NEGLIGIBLE {
        return 0.0;
    }
    (density * aperture / spacing).min(MAX_FRACTURE_POROSITY)
}

/// A per-cell geometric property of the fracture network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryProperty {
    Aperture,
    Spacing,
    Density,
}

impl fmt::Display for GeometryProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Aperture => "fracture aperture",
            Self::Spacing => "fracture spacing",
            Self::Density => "fracture density",
        })
    }
}

/// Replacement values for some or all of the fracture network.
///
/// A property left as `None` keeps its current values.
/// Each supplied slice holds one value per cell in flat storage order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FractureNetwork<'a> {
    /// Aperture in meters.
    pub aperture: Option<&'a [f64]>,
    /// Average distance between parallel fractures, in meters.
    pub spacing: Option<&'a [f64]>,
    /// Fractures per meter.
    pub density: Option<&'a [f64]>,
}

impl<'a> FractureNetwork<'a> {
    #[must_use]
    pub fn with_aperture(mut self, aperture: &'a [f64]) -> Self {
        self.aperture = Some(aperture);
        self
    }

    #[must_use]
    pub fn with_spacing(mut self, spacing: &'a [f64]) -> Self {
        self.spacing = Some(spacing);
        self
    }

    #[must_use]
    pub fn with_density(mut self, density: &'a [f64]) -> Self {
        self.density = Some(density);
        self
    }

    /// Supplied slices paired with the property they replace.
    pub(crate) fn supplied(&self) -> impl Iterator<Item = (GeometryProperty, &'a [f64])> {
        [
            (GeometryProperty::Aperture, self.aperture),
            (GeometryProperty::Spacing, self.spacing),
            (GeometryProperty::Density, self.density),
        ]
        .into_iter()
        .filter_map(|(property, values)| values.map(|v| (property, v)))
    }
}

/// Per-cell fracture geometry and its derived permeability.
#[derive(Debug, Clone, PartialEq)]
pub struct FractureGeometry {
    aperture: Field3,
    spacing: Field3,
    density: Field3,
    permeability: Field3,
}

impl FractureGeometry {
    pub(crate) fn uniform(dims: GridDimensions, aperture: f64, spacing: f64, density: f64) -> Self {
        Self {
            aperture: Field3::filled(dims, aperture),
            spacing: Field3::filled(dims, spacing),
            density: Field3::filled(dims, density),
            permeability: Field3::filled(dims, cubic_law_permeability(aperture)),
        }
    }

    #[must_use]
    pub fn aperture(&self) -> &Field3 {
        &self.aperture
    }

    #[must_use]
    pub fn spacing(&self) -> &Field3 {
        &self.spacing
    }

    #[must_use]
    pub fn density(&self) -> &Field3 {
        &self.density
    }

    /// Cubic-law fracture permeability in m².
    #[must_use]
    pub fn permeability(&self) -> &Field3 {
        &self.permeability
    }

    /// Fracture porosity of the cell at flat `offset`.
    pub(crate) fn porosity_at(&self, offset: usize) -> f64 {
        fracture_porosity(
            self.aperture.at(offset),
            self.spacing.at(offset),
            self.density.at(offset),
        )
    }

    /// Overwrites the supplied properties and refreshes permeability.
    ///
    /// Slices must already be checked for length and sign.
    pub(crate) fn overwrite(&mut self, network: &FractureNetwork<'_>) {
        for (property, values) in network.supplied() {
            match property {
                GeometryProperty::Aperture => self.aperture.copy_from(values),
                GeometryProperty::Spacing => self.spacing.copy_from(values),
                GeometryProperty::Density => self.density.copy_from(values),
            }
        }

        let aperture = self.aperture.as_slice();
        for (k, &b) in self.permeability.as_mut_slice().iter_mut().zip(aperture) {
            *k = cubic_law_permeability(b);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::reservoir::dual_continuum::core::grid::CellIndex;

    #[test]
    fn cubic_law() {
        for b in [0.0, 1e-5, 1e-4, 2.5e-3] {
            assert_relative_eq!(cubic_law_permeability(b), b * b / 12.0);
        }
        assert_relative_eq!(cubic_law_permeability(1e-4), 8.333_333_333_333_334e-10);
    }

    #[test]
    fn porosity_is_capped() {
        let cases = [
            (1e-4, 1.0, 3.0),
            (0.1, 0.01, 50.0),
            (1.0, 1e-5, 1e6),
            (5e-3, 2.0, 1000.0),
        ];
        for (aperture, spacing, density) in cases {
            let phi = fracture_porosity(aperture, spacing, density);
            assert!(phi <= MAX_FRACTURE_POROSITY, "porosity {phi} exceeds cap");
        }
        assert_relative_eq!(fracture_porosity(0.1, 0.01, 50.0), 0.5);
        assert_relative_eq!(fracture_porosity(1e-4, 1.0, 3.0), 3e-4);
    }

    #[test]
    fn porosity_vanishes_for_negligible_spacing() {
        assert_eq!(fracture_porosity(1e-4, 0.0, 3.0), 0.0);
        assert_eq!(fracture_porosity(1e-4, 5e-7, 3.0), 0.0);
    }

    #[test]
    fn overwrite_keeps_unsupplied_properties() {
        let dims = GridDimensions::new(2, 1, 1);
        let mut geometry = FractureGeometry::uniform(dims, 1e-4, 1.0, 3.0);

        let aperture = [2e-4, 3e-4];
        geometry.overwrite(&FractureNetwork::default().with_aperture(&aperture));

        assert_eq!(geometry.aperture().as_slice(), &aperture);
        assert_eq!(geometry.spacing().as_slice(), &[1.0, 1.0]);
        assert_eq!(geometry.density().as_slice(), &[3.0, 3.0]);

        let cell = CellIndex::new(1, 0, 0);
        assert_relative_eq!(
            geometry.permeability().get(cell).unwrap(),
            3e-4 * 3e-4 / 12.0
        );
    }

    #[test]
    fn permeability_ignores_spacing_and_density() {
        let dims = GridDimensions::new(3, 1, 1);
        let mut geometry = FractureGeometry::uniform(dims, 1e-3, 1.0, 3.0);

        let spacing = [0.0, 0.5, 10.0];
        let density = [0.0, 8.0, 0.1];
        geometry.overwrite(
            &FractureNetwork::default()
                .with_spacing(&spacing)
                .with_density(&density),
        );

        for &k in geometry.permeability().as_slice() {
            assert_relative_eq!(k, 1e-6 / 12.0);
        }
    }
}
