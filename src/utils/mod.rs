// Reporting helpers over the normalized table: CSV export and the
// console summary.

pub mod export;
pub mod summary;
