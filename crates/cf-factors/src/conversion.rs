//! CO2-equivalent conversion using global-warming potentials.
//!
//! Factor columns are named `<mass><gas>_<unit>`, e.g. `kgCO2_litre` or `gCH4_kwh`.
//! The factor database stores CO2 factors in kilograms and CH4/N2O factors in grams,
//! so the gas decides the mass basis, not the column prefix.

use crate::row::FactorRow;
use cf_core::units::MassBasis;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Greenhouse gases tracked by the factor tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Gas {
    Co2,
    Ch4,
    N2o,
}

impl Gas {
    pub const ALL: [Gas; 3] = [Gas::Co2, Gas::Ch4, Gas::N2o];

    pub fn token(self) -> &'static str {
        match self {
            Self::Co2 => "co2",
            Self::Ch4 => "ch4",
            Self::N2o => "n2o",
        }
    }

    /// Mass unit the factor database uses for this gas.
    pub fn mass_basis(self) -> MassBasis {
        match self {
            Self::Co2 => MassBasis::Kilogram,
            Self::Ch4 | Self::N2o => MassBasis::Gram,
        }
    }

    /// The gas named in a column, taking the left-most token when several appear.
    pub fn detect(column: &str) -> Option<Gas> {
        let lower = column.to_ascii_lowercase();
        Self::ALL
            .iter()
            .filter_map(|gas| lower.find(gas.token()).map(|pos| (pos, *gas)))
            .min_by_key(|(pos, _)| *pos)
            .map(|(_, gas)| gas)
    }
}

/// 100-year global warming potentials (CO2 = 1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GwpTable {
    pub co2: f64,
    pub ch4: f64,
    pub n2o: f64,
}

impl Default for GwpTable {
    fn default() -> Self {
        Self {
            co2: 1.0,
            ch4: 25.0,
            n2o: 298.0,
        }
    }
}

impl GwpTable {
    pub fn get(&self, gas: Gas) -> f64 {
        match gas {
            Gas::Co2 => self.co2,
            Gas::Ch4 => self.ch4,
            Gas::N2o => self.n2o,
        }
    }
}

/// Unit part of a factor column: everything after the first underscore.
fn column_unit(column: &str) -> Option<&str> {
    let (_, unit) = column.split_once('_')?;
    let is_word = !unit.is_empty() && unit.chars().all(|c| c.is_alphanumeric() || c == '_');
    is_word.then_some(unit)
}

fn ends_with_unit(column: &str, unit: &str) -> bool {
    let suffix_len = unit.len() + 1;
    if column.len() < suffix_len || !column.is_char_boundary(column.len() - suffix_len) {
        return false;
    }
    let suffix = &column[column.len() - suffix_len..];
    suffix.starts_with('_') && suffix[1..].eq_ignore_ascii_case(unit)
}

/// Keep the numeric gas columns of `row` expressed per `unit`.
///
/// Columns without a recognized gas, with another unit, or without a numeric value are
/// dropped silently; absent data is not an error here.
pub fn get_relevant_factors(row: &FactorRow, unit: &str) -> BTreeMap<String, f64> {
    row.columns()
        .filter(|(name, _)| ends_with_unit(name, unit) && Gas::detect(name).is_some())
        .filter_map(|(name, value)| value.as_number().map(|v| (name.to_string(), v)))
        .collect()
}

/// Sum the CO2e of `unit_value` units of activity over every gas factor.
///
/// Only factors whose unit equals `unit_of_interest` count when it is set. CH4 and N2O
/// factors are converted from grams before the GWP multiplier applies. Returns `0.0`
/// for empty input.
pub fn calculate_co2e(
    relevant_factors: &BTreeMap<String, f64>,
    unit_value: f64,
    unit_of_interest: Option<&str>,
    gwp: Option<&GwpTable>,
) -> f64 {
    let default_gwp = GwpTable::default();
    let gwp = gwp.unwrap_or(&default_gwp);

    relevant_factors
        .iter()
        .filter(|(_, factor)| factor.is_finite())
        .filter_map(|(column, factor)| {
            let gas = Gas::detect(column)?;
            let unit = column_unit(column)?;
            if let Some(wanted) = unit_of_interest
                && !unit.eq_ignore_ascii_case(wanted)
            {
                return None;
            }
            let mass = unit_value * factor * gas.mass_basis().kg_multiplier();
            Some(mass * gwp.get(gas))
        })
        .sum()
}

/// `get_relevant_factors` followed by `calculate_co2e` restricted to `unit`.
pub fn co2e_for_unit(row: &FactorRow, unit: &str, unit_value: f64, gwp: &GwpTable) -> f64 {
    let relevant = get_relevant_factors(row, unit);
    calculate_co2e(&relevant, unit_value, Some(unit), Some(gwp))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn co2e_scales_linearly(co2 in 0.0_f64..10.0, ch4 in 0.0_f64..100.0, qty in 0.0_f64..1.0e4) {
            let f: BTreeMap<String, f64> =
                [("kgCO2_unit".to_string(), co2), ("gCH4_unit".to_string(), ch4)].into();
            let one = calculate_co2e(&f, 1.0, None, None);
            let many = calculate_co2e(&f, qty, None, None);
            prop_assert!((many - one * qty).abs() <= 1e-9 * many.abs().max(1.0));
        }
    }
}
