//! Report generation port trait.

use crate::domain::error::PropdeskError;
use crate::domain::performance::{EquityPoint, PerformanceSummary};

/// Everything a report renderer needs for one analysis run.
pub struct ReportContext<'a> {
    pub summary: &'a PerformanceSummary,
    pub score: f64,
    pub grade: &'static str,
    pub curve: &'a [EquityPoint],
}

pub trait ReportPort {
    fn write(&self, ctx: &ReportContext<'_>, output_path: &str) -> Result<(), PropdeskError>;
}
