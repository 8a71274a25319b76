/// Reports: the fixed catalog of ten analyses and the dispatcher that runs
/// them.
///
/// ```text
///   ReportId ──▶ catalog::entry ──▶ Relational(Query) ──▶ Store::query ──┐
///                                └▶ InMemory(fn)     ──▶ CleanTable   ──┴▶ RenderableResult
/// ```

pub mod catalog;
pub mod dispatcher;
pub mod result;
