//! Serial baselines: one `(time, std)` pair per problem size, averaged over
//! every single-thread row of that size.

use average::{Estimate, Mean};
use std::collections::BTreeMap;

use crate::deriver::propagation::Measurement;
use crate::deriver::record::RawRecord;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Baselines {
    by_size: BTreeMap<u64, Measurement>,
}

impl Baselines {
    /// Averages `t` and `std` over `th == 1` rows, keyed by `n`.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a RawRecord>,
    {
        let mut acc: BTreeMap<u64, (Mean, Mean)> = BTreeMap::new();
        for r in records.into_iter().filter(|r| r.threads == 1) {
            let (time, std) = acc.entry(r.elements).or_default();
            time.add(r.time);
            std.add(r.std);
        }

        let by_size = acc
            .into_iter()
            .map(|(n, (time, std))| (n, Measurement::new(time.mean(), std.mean())))
            .collect();
        Self { by_size }
    }

    pub fn get(&self, n: u64) -> Option<Measurement> {
        self.by_size.get(&n).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, Measurement)> + '_ {
        self.by_size.iter().map(|(n, m)| (*n, *m))
    }

    pub fn len(&self) -> usize {
        self.by_size.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_size.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(method: &str, threads: u32, elements: u64, time: f64, std: f64) -> RawRecord {
        RawRecord {
            sorted: "Yes".into(),
            threads,
            elements,
            elements_sci: elements,
            time,
            std,
            min: time,
            max: time,
            method: method.into(),
        }
    }

    #[test]
    fn averages_every_single_thread_row_of_a_size() {
        let rows = vec![
            rec("serial", 1, 100, 10.0, 1.0),
            rec("task", 1, 100, 12.0, 3.0),
            rec("task", 2, 100, 6.0, 0.5),
            rec("serial", 1, 200, 20.0, 2.0),
        ];
        let b = Baselines::from_records(&rows);
        assert_eq!(b.len(), 2);
        assert_eq!(b.get(100), Some(Measurement::new(11.0, 2.0)));
        assert_eq!(b.get(200), Some(Measurement::new(20.0, 2.0)));
    }

    #[test]
    fn size_without_single_thread_rows_has_no_baseline() {
        let rows = vec![rec("task", 8, 800, 3.0, 0.1)];
        let b = Baselines::from_records(&rows);
        assert!(b.is_empty());
        assert_eq!(b.get(800), None);
    }
}
