use std::collections::{HashMap, HashSet};

use crate::data::model::CorrelationEntry;

/// Square lookup grid over the columns named in a correlation entry list.
///
/// Absent pairs read as `0.0`. That conflates "no data" with "no
/// correlation"; [`CorrelationMatrix::get`] keeps the distinction for callers
/// that need it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorrelationMatrix {
    columns: Vec<String>,
    values: HashMap<(String, String), f64>,
}

impl CorrelationMatrix {
    pub fn build(entries: &[CorrelationEntry]) -> Self {
        let mut seen = HashSet::new();
        let mut columns = Vec::new();
        let mut values = HashMap::with_capacity(entries.len());
        for e in entries {
            if seen.insert(e.x.as_str()) {
                columns.push(e.x.clone());
            }
            // first entry for a pair wins
            values
                .entry((e.x.clone(), e.y.clone()))
                .or_insert(e.value);
        }
        CorrelationMatrix { columns, values }
    }

    /// Distinct `x` columns in order of first appearance.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn lookup(&self, x: &str, y: &str) -> f64 {
        self.get(x, y).unwrap_or(0.0)
    }

    pub fn get(&self, x: &str, y: &str) -> Option<f64> {
        self.values.get(&(x.to_string(), y.to_string())).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Grid rows in column order; absent pairs read as `0.0`.
    pub fn grid(&self) -> Vec<Vec<f64>> {
        self.columns
            .iter()
            .map(|x| self.columns.iter().map(|y| self.lookup(x, y)).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(x: &str, y: &str, value: f64) -> CorrelationEntry {
        CorrelationEntry {
            x: x.into(),
            y: y.into(),
            value,
        }
    }

    #[test]
    fn columns_are_deduplicated_in_first_appearance_order() {
        let m = CorrelationMatrix::build(&[
            entry("b", "b", 1.0),
            entry("b", "a", 0.3),
            entry("a", "b", 0.3),
            entry("a", "a", 1.0),
        ]);
        assert_eq!(m.columns(), &["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn missing_pair_reads_zero() {
        let m = CorrelationMatrix::build(&[entry("a", "b", 0.8)]);
        assert_eq!(m.lookup("a", "b"), 0.8);
        assert_eq!(m.lookup("a", "c"), 0.0);
        assert_eq!(m.get("a", "c"), None);
    }

    #[test]
    fn asymmetric_input_is_shown_as_supplied() {
        let m = CorrelationMatrix::build(&[entry("a", "b", 0.5), entry("b", "a", -0.2)]);
        assert_eq!(m.lookup("a", "b"), 0.5);
        assert_eq!(m.lookup("b", "a"), -0.2);
        assert_eq!(m.grid(), vec![vec![0.0, 0.5], vec![-0.2, 0.0]]);
    }

    #[test]
    fn grid_agrees_with_lookup_cell_by_cell() {
        let m = CorrelationMatrix::build(&[
            entry("x", "x", 1.0),
            entry("x", "y", -0.4),
            entry("y", "y", 1.0),
        ]);
        let grid = m.grid();
        for (i, row) in m.columns().iter().enumerate() {
            for (j, col) in m.columns().iter().enumerate() {
                assert_eq!(grid[i][j], m.lookup(row, col));
            }
        }
        assert_eq!(grid[1][0], 0.0);
    }

    #[test]
    fn first_duplicate_wins() {
        let m = CorrelationMatrix::build(&[entry("a", "b", 0.5), entry("a", "b", 0.9)]);
        assert_eq!(m.lookup("a", "b"), 0.5);
    }
}
