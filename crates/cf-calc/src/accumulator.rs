//! Per-record results and running totals.

use std::collections::{BTreeMap, HashMap};

use cf_core::{RecordId, ResultIndex};
use cf_factors::{CacheStats, GwpTable, LookupCache};
use cf_records::{ActivityRecord, Category, Scope};
use serde::Serialize;
use tracing::{debug, warn};

use crate::context::CalcContext;
use crate::dispatch;
use crate::error::CalcResult;
use crate::method::{Method, MetadataEntry, MethodSet, ResultKind, WORST_QUALITY};

/// Every method outcome for one record, plus the selected best entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculatedEmission {
    pub index: ResultIndex,
    pub record: ActivityRecord,
    pub kind: ResultKind,
    pub emission_result: BTreeMap<Method, f64>,
    /// Score of the best entry; [`WORST_QUALITY`] when no method could be evaluated.
    pub data_quality: f64,
    /// Running score after the last evaluated method.
    pub last_quality: f64,
    pub metadata: Vec<MetadataEntry>,
    pub best: Option<usize>,
}

impl CalculatedEmission {
    fn new(index: ResultIndex, record: ActivityRecord, set: MethodSet) -> Self {
        let best = set.best();
        let data_quality = best
            .map(|i| set.metadata[i].data_quality)
            .unwrap_or(WORST_QUALITY);
        Self {
            index,
            record,
            kind: set.kind,
            emission_result: set.amounts,
            data_quality,
            last_quality: set.data_quality,
            metadata: set.metadata,
            best,
        }
    }

    pub fn best_entry(&self) -> Option<&MetadataEntry> {
        self.best.and_then(|i| self.metadata.get(i))
    }

    /// Amount this result adds to its ledger (kg CO2e).
    pub fn contribution(&self) -> Option<f64> {
        self.best_entry()
            .map(|e| e.amount)
            .filter(|amount| amount.is_finite())
    }
}

/// A record the accumulator refused to calculate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejection {
    pub record_id: RecordId,
    pub category: Category,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added(ResultIndex),
    Rejected,
}

#[derive(Debug, Clone)]
enum Slot {
    Live(Box<CalculatedEmission>),
    Tombstone,
}

/// Totals per record id and overall, kept separately for emissions and removals.
#[derive(Debug, Clone, Default)]
struct Ledger {
    by_record: HashMap<RecordId, f64>,
    total: f64,
}

impl Ledger {
    fn add(&mut self, id: RecordId, amount: f64) {
        *self.by_record.entry(id).or_insert(0.0) += amount;
        self.total += amount;
    }
}

/// Turns records into results one at a time and keeps the running totals.
///
/// Owns the lookup cache it lends to calculators. Indices are handed out in
/// insertion order and never reused, including after [`Accumulator::tombstone`].
#[derive(Debug)]
pub struct Accumulator {
    cache: LookupCache,
    gwp: GwpTable,
    scope: Option<Scope>,
    slots: Vec<Slot>,
    emissions: Ledger,
    removals: Ledger,
    rejections: Vec<Rejection>,
}

impl Accumulator {
    pub fn new(cache: LookupCache) -> Self {
        Self {
            cache,
            gwp: GwpTable::default(),
            scope: None,
            slots: Vec::new(),
            emissions: Ledger::default(),
            removals: Ledger::default(),
            rejections: Vec::new(),
        }
    }

    /// Accept only records from `scope`; others are rejected.
    pub fn for_scope(cache: LookupCache, scope: Scope) -> Self {
        Self {
            scope: Some(scope),
            ..Self::new(cache)
        }
    }

    pub fn with_gwp(mut self, gwp: GwpTable) -> Self {
        self.gwp = gwp;
        self
    }

    pub fn scope(&self) -> Option<Scope> {
        self.scope
    }

    pub fn gwp(&self) -> &GwpTable {
        &self.gwp
    }

    pub fn cache(&self) -> &LookupCache {
        &self.cache
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Calculate `record` and fold its best result into the totals.
    ///
    /// A lookup error leaves every result and total untouched.
    pub fn add_data(&mut self, record: ActivityRecord) -> CalcResult<AddOutcome> {
        let id = record.id();
        let category = record.category();

        if let Some(scope) = self.scope
            && record.scope() != scope
        {
            let reason = format!("{category} belongs to {}, expected {scope}", record.scope());
            warn!(record_id = %id, %category, %reason, "rejecting record");
            self.rejections.push(Rejection {
                record_id: id,
                category,
                reason,
            });
            return Ok(AddOutcome::Rejected);
        }

        let set = {
            let mut ctx = CalcContext::new(&mut self.cache, &self.gwp);
            dispatch::evaluate(&record, &mut ctx)?
        };

        let index = ResultIndex::from_position(self.slots.len())?;
        let result = CalculatedEmission::new(index, record, set);

        match result.contribution() {
            Some(amount) => {
                debug!(
                    record_id = %id,
                    %category,
                    amount,
                    data_quality = result.data_quality,
                    "record calculated"
                );
                self.ledger_mut(result.kind).add(id, amount);
            }
            None => debug!(record_id = %id, %category, "no method could be evaluated"),
        }

        self.slots.push(Slot::Live(Box::new(result)));
        Ok(AddOutcome::Added(index))
    }

    /// Remove a result and its contribution. The index stays retired.
    pub fn tombstone(&mut self, index: ResultIndex) -> Option<CalculatedEmission> {
        let slot = self.slots.get_mut(index.position())?;
        let Slot::Live(result) = std::mem::replace(slot, Slot::Tombstone) else {
            return None;
        };
        if result.contribution().is_some() {
            self.rebuild_ledger(result.kind);
        }
        debug!(%index, record_id = %result.record.id(), "result tombstoned");
        Some(*result)
    }

    /// Best emission per record id (kg CO2e).
    pub fn get_emissions(&self) -> &HashMap<RecordId, f64> {
        &self.emissions.by_record
    }

    pub fn get_total_emissions(&self) -> f64 {
        self.emissions.total
    }

    /// Best removal per record id (kg CO2e).
    pub fn get_removals(&self) -> &HashMap<RecordId, f64> {
        &self.removals.by_record
    }

    pub fn get_total_removals(&self) -> f64 {
        self.removals.total
    }

    pub fn net_emissions(&self) -> f64 {
        self.emissions.total - self.removals.total
    }

    /// Live results in insertion order.
    pub fn calculated_emissions(&self) -> impl Iterator<Item = &CalculatedEmission> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Live(result) => Some(result.as_ref()),
            Slot::Tombstone => None,
        })
    }

    pub fn get(&self, index: ResultIndex) -> Option<&CalculatedEmission> {
        match self.slots.get(index.position())? {
            Slot::Live(result) => Some(result.as_ref()),
            Slot::Tombstone => None,
        }
    }

    pub fn rejections(&self) -> &[Rejection] {
        &self.rejections
    }

    /// Live result count.
    pub fn len(&self) -> usize {
        self.calculated_emissions().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True until the first record is calculated.
    pub fn is_idle(&self) -> bool {
        self.slots.is_empty()
    }

    fn ledger_mut(&mut self, kind: ResultKind) -> &mut Ledger {
        match kind {
            ResultKind::Emission => &mut self.emissions,
            ResultKind::Removal => &mut self.removals,
        }
    }

    /// Re-sum one ledger from the live slots, in insertion order.
    fn rebuild_ledger(&mut self, kind: ResultKind) {
        let mut ledger = Ledger::default();
        for slot in &self.slots {
            if let Slot::Live(result) = slot
                && result.kind == kind
                && let Some(amount) = result.contribution()
            {
                ledger.add(result.record.id(), amount);
            }
        }
        *self.ledger_mut(kind) = ledger;
    }
}
