//! Factor source plus configuration: everything needed to start calculating.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use cf_calc::Accumulator;
use cf_factors::{FactorSource, FactorTables, InMemorySource, LookupCache};
use cf_records::FuelState;
use tracing::info;

use crate::config::EngineConfig;
use crate::error::{AppError, AppResult};

/// Shared, read-only calculation setup.
///
/// Cheap to share across threads: every run builds its own cache and accumulator
/// over the same source.
#[derive(Clone)]
pub struct Engine {
    source: Arc<dyn FactorSource>,
    config: EngineConfig,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("source", &self.source.name())
            .field("config", &self.config)
            .finish()
    }
}

impl Engine {
    pub fn new(source: Arc<dyn FactorSource>, config: EngineConfig) -> Self {
        Self { source, config }
    }

    /// Engine over factor tables loaded from a YAML or JSON file.
    pub fn from_factor_file(path: &Path, config: EngineConfig) -> AppResult<Self> {
        let tables = FactorTables::load(path)?;
        info!(path = %path.display(), tables = tables.0.len(), "loaded factor tables");
        Ok(Self::new(Arc::new(InMemorySource::new(tables)), config))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn source(&self) -> &Arc<dyn FactorSource> {
        &self.source
    }

    /// A fresh cache over the shared source.
    pub fn cache(&self) -> LookupCache {
        LookupCache::with_tables(self.source.clone(), self.config.tables.clone())
    }

    /// A fresh accumulator, restricted to the configured scope if there is one.
    pub fn accumulator(&self) -> Accumulator {
        let acc = match self.config.scope {
            Some(scope) => Accumulator::for_scope(self.cache(), scope),
            None => Accumulator::new(self.cache()),
        };
        acc.with_gwp(self.config.gwp)
    }

    /// Values accepted for a dropdown-style field.
    ///
    /// `filter` narrows lists that depend on another field: the fuel state for fuel
    /// types, the vehicle table for vehicle types, the waste type for treatment
    /// methods and the country for states.
    pub fn allowed(&self, list: AllowList, filter: Option<&str>) -> AppResult<Option<Vec<String>>> {
        let mut cache = self.cache();
        let values = match list {
            AllowList::FuelTypes => {
                let state = match filter {
                    Some(s) => s.parse::<FuelState>().map_err(AppError::InvalidInput)?,
                    None => FuelState::default(),
                };
                cache.allowed_fuel_types(state.as_str())?
            }
            AllowList::VehicleTypes => cache.allowed_vehicle_types(filter)?,
            AllowList::FreightTypes => cache.allowed_freight_types()?,
            AllowList::WasteTypes => cache.allowed_waste_types()?,
            AllowList::WasteTreatmentMethods => cache.allowed_waste_treatment_methods(filter)?,
            AllowList::Refrigerants => cache.allowed_refrigerants()?,
            AllowList::Countries => cache.allowed_countries()?,
            AllowList::States => cache.allowed_states(filter)?,
        };
        Ok(values)
    }
}

/// The allowlists the factor database can answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowList {
    FuelTypes,
    VehicleTypes,
    FreightTypes,
    WasteTypes,
    WasteTreatmentMethods,
    Refrigerants,
    Countries,
    States,
}

impl AllowList {
    pub const ALL: [AllowList; 8] = [
        AllowList::FuelTypes,
        AllowList::VehicleTypes,
        AllowList::FreightTypes,
        AllowList::WasteTypes,
        AllowList::WasteTreatmentMethods,
        AllowList::Refrigerants,
        AllowList::Countries,
        AllowList::States,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AllowList::FuelTypes => "fuel-types",
            AllowList::VehicleTypes => "vehicle-types",
            AllowList::FreightTypes => "freight-types",
            AllowList::WasteTypes => "waste-types",
            AllowList::WasteTreatmentMethods => "waste-treatment-methods",
            AllowList::Refrigerants => "refrigerants",
            AllowList::Countries => "countries",
            AllowList::States => "states",
        }
    }
}

impl fmt::Display for AllowList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AllowList {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|list| list.name().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| {
                let names: Vec<_> = Self::ALL.iter().map(|l| l.name()).collect();
                format!("unknown list '{}', expected one of: {}", s, names.join(", "))
            })
    }
}
