//! Append-only log of irrigation activations.

use tracing::debug;

use agrosmart_types::IrrigationRecord;

/// In-memory irrigation activation log.
///
/// Nothing ever transitions a record out of `active`, so [`active_count`]
/// only grows over the life of the process and includes runs whose
/// estimated completion has long passed.
///
/// [`active_count`]: IrrigationLog::active_count
#[derive(Debug, Default)]
pub struct IrrigationLog {
    records: Vec<IrrigationRecord>,
}

impl IrrigationLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an activation record.
    pub fn append(&mut self, record: IrrigationRecord) {
        debug!(
            "Logged irrigation for zone {} ({} min)",
            record.zone_id, record.duration_minutes
        );
        self.records.push(record);
    }

    /// Total number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records still marked active, oldest first.
    pub fn active(&self) -> impl Iterator<Item = &IrrigationRecord> {
        self.records.iter().filter(|r| r.is_active())
    }

    /// Number of records marked active.
    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// The last `n` active records, oldest first.
    pub fn recent_active(&self, n: usize) -> Vec<IrrigationRecord> {
        let active: Vec<&IrrigationRecord> = self.active().collect();
        let start = active.len().saturating_sub(n);
        active[start..].iter().map(|r| (*r).clone()).collect()
    }
}
