//! Pore fluid properties, fixed at liquid water near standard conditions.

/// Density in kg/m³.
pub const DENSITY: f64 = 1000.0;

/// Dynamic viscosity in Pa·s.
pub const VISCOSITY: f64 = 0.001;

/// Isothermal compressibility in 1/Pa.
pub const COMPRESSIBILITY: f64 = 4.5e-10;
