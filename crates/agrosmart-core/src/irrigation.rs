//! Irrigation activation and status reporting.
//!
//! Activations are never marked complete, so the active count reported by
//! [`summarize`] only grows for the lifetime of the process.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::info;

use agrosmart_types::{IrrigationCommand, IrrigationRecord};

use crate::error::Result;
use crate::sampler::Sampler;
use crate::util::round_to;

/// Number of irrigation zones on the farm.
pub const TOTAL_ZONES: u32 = 5;

/// Maximum number of records listed in [`IrrigationSummary::active_systems`].
pub const RECENT_ACTIVE_LIMIT: usize = 3;

pub const WATER_USAGE: (f64, f64) = (100.0, 500.0);
pub const EFFICIENCY: (f64, f64) = (80.0, 95.0);

/// Irrigation status overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrigationSummary {
    pub active_zones: usize,
    pub total_zones: u32,
    /// Water used today, in cubic metres.
    pub water_usage_today: f64,
    pub efficiency_score: f64,
    pub active_systems: Vec<IrrigationRecord>,
}

/// Validate `command` and build the record for an activation at `now`.
pub fn activate(command: &IrrigationCommand, now: OffsetDateTime) -> Result<IrrigationRecord> {
    command.validate()?;
    let record = IrrigationRecord::start(command, now);
    info!(
        zone = %record.zone_id,
        duration_minutes = record.duration_minutes,
        auto_mode = record.auto_mode,
        "Irrigation activated"
    );
    Ok(record)
}

/// Confirmation message for an activation in `zone_id`.
pub fn activation_message(zone_id: &str) -> String {
    format!("Irrigation activated in zone {}", zone_id)
}

/// Build the status overview.
///
/// `recent` should hold at most [`RECENT_ACTIVE_LIMIT`] of the most recent
/// active records; water usage and efficiency are drawn fresh on each call.
pub fn summarize(
    active_count: usize,
    recent: Vec<IrrigationRecord>,
    sampler: &mut dyn Sampler,
) -> IrrigationSummary {
    let water_usage_today = round_to(sampler.uniform(WATER_USAGE.0, WATER_USAGE.1), 1);
    let efficiency_score = round_to(sampler.uniform(EFFICIENCY.0, EFFICIENCY.1), 1);
    IrrigationSummary {
        active_zones: active_count,
        total_zones: TOTAL_ZONES,
        water_usage_today,
        efficiency_score,
        active_systems: recent,
    }
}
