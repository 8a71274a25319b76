use thiserror::Error;

use crate::data::model::CleanTable;
use crate::store::{Store, StoreError};

use super::catalog::{entry, Computation, ReportId, Shape};
use super::result::QueryResult;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report query failed: {0}")]
    Store(#[from] StoreError),
    #[error("the database connection is already closed")]
    StoreClosed,
}

/// A report's rows tagged with the shape they should be drawn in.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderableResult {
    pub report: ReportId,
    pub shape: Shape,
    pub result: QueryResult,
}

/// Execute one report against the store or the clean table. Read-only.
pub fn run(
    id: ReportId,
    store: &Store,
    table: &CleanTable,
) -> Result<RenderableResult, ReportError> {
    let spec = entry(id);
    let result = match &spec.computation {
        Computation::Relational(query) => store.query(query)?,
        Computation::InMemory(compute) => compute(table),
    };
    Ok(RenderableResult {
        report: id,
        shape: spec.shape,
        result,
    })
}
