// Metric deriver: turns one raw benchmark CSV into the normalized table
// with speedup/efficiency and their propagated uncertainty.

pub mod record;
pub mod propagation;
pub mod baseline;
pub mod table;

pub use table::{
    COLUMNS, DeriveOptions, NormalizedRow, NormalizedTable, ScalingFamily, UnsortedRow,
    normalize, normalize_reader, normalize_with,
};
