//! Repository trait definitions for reference data

use crate::model::{MidMarkRow, PoleResistanceRow, ReferenceTables};
use vaultcoach_types::Result;

/// Source of the two static reference tables
///
/// Implementations fail with `Error::ReferenceDataUnavailable` when a
/// table is missing or unreadable. Rows whose numeric fields do not parse
/// are dropped, not corrected.
pub trait ReferenceDataRepository {
    /// Load the pole resistance table (length, weight, resistance index)
    fn load_pole_resistance(&self) -> Result<Vec<PoleResistanceRow>>;

    /// Load the mid-mark chart (grip, takeoff, mid-mark)
    fn load_mid_mark_chart(&self) -> Result<Vec<MidMarkRow>>;

    /// Load both tables
    fn load_tables(&self) -> Result<ReferenceTables> {
        let mid_marks = self.load_mid_mark_chart()?;
        let poles = self.load_pole_resistance()?;
        Ok(ReferenceTables::new(poles, mid_marks))
    }
}

/// Tables already in memory (tests, embedding callers)
impl ReferenceDataRepository for ReferenceTables {
    fn load_pole_resistance(&self) -> Result<Vec<PoleResistanceRow>> {
        Ok(self.poles.clone())
    }

    fn load_mid_mark_chart(&self) -> Result<Vec<MidMarkRow>> {
        Ok(self.mid_marks.clone())
    }
}
