// Greedy storage allocation - one facility per request, best score wins
use crate::facility::{FacilityId, FacilityRegistry, StorageFacility};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Ideal cold-chain temperature in degrees
pub const IDEAL_TEMPERATURE: f64 = 4.0;

/// Capacity units charged per degree away from [`IDEAL_TEMPERATURE`]
pub const TEMPERATURE_PENALTY: f64 = 10.0;

/// Scores are kept in thousandths of a capacity unit
const SCORE_SCALE: i64 = 1000;

/// Snapshot of the facility chosen by [`Allocator::allocate`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    pub id: FacilityId,
    pub name: String,
    pub temperature: f64,
    /// Available capacity after the reservation
    pub available_capacity: u64,
}

impl From<&StorageFacility> for AllocationResult {
    fn from(facility: &StorageFacility) -> Self {
        Self {
            id: facility.id,
            name: facility.name.clone(),
            temperature: facility.temperature,
            available_capacity: facility.available_capacity,
        }
    }
}

/// Fixed-point score: `available - 10 * |temperature - 4.0|`.
///
/// Rounded to thousandths so that comparisons between facilities are exact
/// integer comparisons on every platform.
#[inline]
pub fn score(facility: &StorageFacility) -> i64 {
    let capacity = i64::try_from(facility.available_capacity)
        .unwrap_or(i64::MAX)
        .saturating_mul(SCORE_SCALE);
    let penalty = ((facility.temperature - IDEAL_TEMPERATURE).abs()
        * TEMPERATURE_PENALTY
        * SCORE_SCALE as f64)
        .round() as i64;
    capacity.saturating_sub(penalty)
}

/// Greedy, score-based allocator.
///
/// This is a heuristic: it picks the single best facility for each request
/// in isolation and makes no attempt at globally optimal packing.
#[derive(Debug, Clone)]
pub struct Allocator {
    registry: Arc<FacilityRegistry>,
}

impl Allocator {
    pub fn new(registry: Arc<FacilityRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &FacilityRegistry {
        &self.registry
    }

    /// Reserve `quantity` units in the best eligible facility.
    ///
    /// A facility is eligible when its available capacity is at least
    /// `quantity`. Among eligible facilities the highest [`score`] wins and
    /// ties go to the lowest id. Returns `None` when nothing is eligible.
    /// A zero quantity selects the best facility without changing it.
    pub fn allocate(&self, quantity: u64) -> Option<AllocationResult> {
        let mut facilities = self.registry.lock();

        let mut best: Option<(i64, FacilityId)> = None;
        for facility in facilities.values() {
            if facility.available_capacity < quantity {
                continue;
            }
            let candidate = score(facility);
            // strict comparison keeps the earliest (lowest id) facility on ties
            if best.map_or(true, |(top, _)| candidate > top) {
                best = Some((candidate, facility.id));
            }
        }

        let Some((best_score, id)) = best else {
            debug!(quantity, "no facility can hold requested quantity");
            return None;
        };

        let facility = facilities.get_mut(&id)?;
        facility.available_capacity -= quantity;
        info!(
            facility = id,
            quantity,
            score = best_score as f64 / SCORE_SCALE as f64,
            remaining = facility.available_capacity,
            "storage allocated"
        );
        Some(AllocationResult::from(&*facility))
    }
}
