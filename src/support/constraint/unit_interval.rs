use uom::si::{f64::Ratio, ratio::ratio};

use super::{Constrained, Constraint, ConstraintError};

/// Supplies 0 and 1 for types that can be checked against the unit interval.
pub trait UnitBounds: PartialOrd {
    fn zero() -> Self;
    fn one() -> Self;
}

impl UnitBounds for f64 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
}

impl UnitBounds for Ratio {
    fn zero() -> Self {
        Ratio::new::<ratio>(0.0)
    }
    fn one() -> Self {
        Ratio::new::<ratio>(1.0)
    }
}

/// Marker type enforcing that a value lies in the closed unit interval: `0 ≤ x ≤ 1`.
///
/// Saturations are bounded this way.
///
/// ```
/// use twine_geothermal::support::constraint::UnitInterval;
/// use uom::si::{f64::Ratio, ratio::ratio};
///
/// assert!(UnitInterval::new(Ratio::new::<ratio>(1.0)).is_ok());
/// assert!(UnitInterval::new(Ratio::new::<ratio>(1.2)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UnitInterval;

impl UnitInterval {
    /// Constructs `Constrained<T, UnitInterval>` if `0 ≤ value ≤ 1`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is outside the interval or not a number.
    pub fn new<T: UnitBounds>(value: T) -> Result<Constrained<T, UnitInterval>, ConstraintError> {
        Constrained::<T, UnitInterval>::new(value)
    }
}

impl<T: UnitBounds> Constraint<T> for UnitInterval {
    fn check(value: &T) -> Result<(), ConstraintError> {
        let zero = T::zero();
        let one = T::one();
        match (value.partial_cmp(&zero), value.partial_cmp(&one)) {
            (None, _) | (_, None) => Err(ConstraintError::NotANumber),
            (Some(std::cmp::Ordering::Less), _) => Err(ConstraintError::BelowMinimum),
            (_, Some(std::cmp::Ordering::Greater)) => Err(ConstraintError::AboveMaximum),
            _ => Ok(()),
        }
    }
}

/// Marker type enforcing that a value lies in the open unit interval: `0 < x < 1`.
///
/// Matrix porosity is bounded this way, since both `φ` and `1 - φ` appear
/// as divisors in the storage terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UnitIntervalOpen;

impl UnitIntervalOpen {
    /// Constructs `Constrained<T, UnitIntervalOpen>` if `0 < value < 1`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is outside the interval or not a number.
    pub fn new<T: UnitBounds>(
        value: T,
    ) -> Result<Constrained<T, UnitIntervalOpen>, ConstraintError> {
        Constrained::<T, UnitIntervalOpen>::new(value)
    }
}

impl<T: UnitBounds> Constraint<T> for UnitIntervalOpen {
    fn check(value: &T) -> Result<(), ConstraintError> {
        let zero = T::zero();
        let one = T::one();
        match (value.partial_cmp(&zero), value.partial_cmp(&one)) {
            (None, _) | (_, None) => Err(ConstraintError::NotANumber),
            (Some(std::cmp::Ordering::Less | std::cmp::Ordering::Equal), _) => {
                Err(ConstraintError::BelowMinimum)
            }
            (_, Some(std::cmp::Ordering::Greater | std::cmp::Ordering::Equal)) => {
                Err(ConstraintError::AboveMaximum)
            }
            _ => Ok(()),
        }
    }
}
