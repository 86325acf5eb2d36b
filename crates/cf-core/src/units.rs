// cf-core/src/units.rs

use uom::si::f64::Mass as UomMass;
use uom::si::mass::{gram, kilogram, ton};

// Public canonical unit types (SI, f64)
pub type Mass = UomMass;

#[inline]
pub fn kg(v: f64) -> Mass {
    Mass::new::<kilogram>(v)
}

#[inline]
pub fn g(v: f64) -> Mass {
    Mass::new::<gram>(v)
}

#[inline]
pub fn as_kg(m: Mass) -> f64 {
    m.get::<kilogram>()
}

/// Metric tonnes (uom's `ton` is the 1000 kg tonne).
#[inline]
pub fn as_tonnes(m: Mass) -> f64 {
    m.get::<ton>()
}

/// Mass unit a factor column is expressed in, per unit of activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MassBasis {
    Gram,
    Kilogram,
}

impl MassBasis {
    /// Multiplier that turns one factor unit into kilograms.
    pub fn kg_multiplier(self) -> f64 {
        let one = match self {
            Self::Gram => g(1.0),
            Self::Kilogram => kg(1.0),
        };
        as_kg(one)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _m = kg(1.0);
        let _g = g(10.0);
    }

    #[test]
    fn mass_basis_multipliers() {
        assert!((MassBasis::Gram.kg_multiplier() - 1e-3).abs() < 1e-15);
        assert!((MassBasis::Kilogram.kg_multiplier() - 1.0).abs() < 1e-15);
    }

    #[test]
    fn kg_to_tonnes() {
        assert!((as_tonnes(kg(2500.0)) - 2.5).abs() < 1e-12);
    }
}
