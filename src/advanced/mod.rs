// Optional outputs beyond the four static charts.

pub mod report;
