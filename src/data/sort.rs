use std::cmp::Ordering;

use super::model::{CellValue, Dataset, Row};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "⏶",
            SortDirection::Descending => "⏷",
        }
    }
}

/// Active sort: one column and a direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub column: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(column: impl Into<String>) -> Self {
        SortSpec {
            column: column.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(column: impl Into<String>) -> Self {
        SortSpec {
            column: column.into(),
            direction: SortDirection::Descending,
        }
    }

    /// Next sort after a sort request on `column`: a new column starts
    /// ascending, the same column flips Ascending → Descending → Ascending.
    pub fn toggle(current: Option<&SortSpec>, column: &str) -> SortSpec {
        match current {
            Some(spec) if spec.column == column => SortSpec {
                column: spec.column.clone(),
                direction: match spec.direction {
                    SortDirection::Ascending => SortDirection::Descending,
                    SortDirection::Descending => SortDirection::Ascending,
                },
            },
            _ => SortSpec::ascending(column),
        }
    }
}

/// Position of a cell's type in the cross-type order:
/// numbers < strings < booleans < null (NaN sits with null).
fn type_rank(value: &CellValue) -> u8 {
    match value {
        CellValue::Number(n) if !n.is_nan() => 0,
        CellValue::String(_) => 1,
        CellValue::Bool(_) => 2,
        CellValue::Number(_) | CellValue::Null => 3,
    }
}

/// Total order over cells. Same-typed cells use their natural ordering
/// without coercion; different types order by [`type_rank`].
pub fn compare_cells(a: &CellValue, b: &CellValue) -> Ordering {
    match (a, b) {
        (CellValue::Number(x), CellValue::Number(y)) if !x.is_nan() && !y.is_nan() => {
            x.partial_cmp(y).unwrap_or(Ordering::Equal)
        }
        (CellValue::String(x), CellValue::String(y)) => x.cmp(y),
        (CellValue::Bool(x), CellValue::Bool(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn compare_rows(a: &Row, b: &Row, spec: &SortSpec) -> Ordering {
    let ord = match (a.get(&spec.column), b.get(&spec.column)) {
        (Some(x), Some(y)) => compare_cells(x, y),
        _ => Ordering::Equal,
    };
    match spec.direction {
        SortDirection::Ascending => ord,
        SortDirection::Descending => ord.reverse(),
    }
}

/// Stable sort of owned rows. `None` leaves the input untouched.
pub fn sort(mut rows: Vec<Row>, spec: Option<&SortSpec>) -> Vec<Row> {
    if let Some(spec) = spec {
        rows.sort_by(|a, b| compare_rows(a, b, spec));
    }
    rows
}

/// Stable sort of a view (row indices into `dataset`).
pub fn sort_indices(dataset: &Dataset, mut indices: Vec<usize>, spec: Option<&SortSpec>) -> Vec<usize> {
    if let Some(spec) = spec {
        indices.sort_by(|&a, &b| compare_rows(&dataset.rows[a], &dataset.rows[b], spec));
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn kv(k: CellValue, v: &str) -> Row {
        Row::from([
            ("k".to_string(), k),
            ("v".to_string(), CellValue::String(v.to_string())),
        ])
    }

    fn labels(rows: &[Row]) -> Vec<String> {
        rows.iter().map(|r| r["v"].to_string()).collect()
    }

    #[test]
    fn none_keeps_input_order() {
        let rows = vec![kv(CellValue::Number(2.0), "a"), kv(CellValue::Number(1.0), "b")];
        assert_eq!(labels(&sort(rows, None)), vec!["a", "b"]);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let rows = vec![
            kv(CellValue::Number(1.0), "a"),
            kv(CellValue::Number(1.0), "b"),
            kv(CellValue::Number(2.0), "c"),
        ];
        let spec = SortSpec::ascending("k");
        assert_eq!(labels(&sort(rows.clone(), Some(&spec))), vec!["a", "b", "c"]);

        let spec = SortSpec::descending("k");
        assert_eq!(labels(&sort(rows, Some(&spec))), vec!["c", "a", "b"]);
    }

    #[test]
    fn descending_reverses_distinct_keys() {
        let rows = vec![
            kv(CellValue::Number(3.0), "c"),
            kv(CellValue::Number(1.0), "a"),
            kv(CellValue::Number(2.0), "b"),
        ];
        let asc = sort(rows.clone(), Some(&SortSpec::ascending("k")));
        let mut desc = sort(asc.clone(), Some(&SortSpec::descending("k")));
        desc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn strings_sort_lexicographically() {
        let rows = vec![
            kv(CellValue::String("pear".into()), "1"),
            kv(CellValue::String("apple".into()), "2"),
            kv(CellValue::String("fig".into()), "3"),
        ];
        let out = sort(rows, Some(&SortSpec::ascending("k")));
        assert_eq!(labels(&out), vec!["2", "3", "1"]);
    }

    #[test]
    fn mixed_types_are_ranked_not_coerced() {
        // "0" is a string, so it ranks after every number
        assert_eq!(
            compare_cells(&CellValue::Number(1.0), &CellValue::String("0".into())),
            Ordering::Less
        );
        assert_eq!(compare_cells(&CellValue::Null, &CellValue::Number(1.0)), Ordering::Greater);
        assert_eq!(
            compare_cells(&CellValue::Bool(true), &CellValue::String("z".into())),
            Ordering::Greater
        );
        assert_eq!(
            compare_cells(&CellValue::Bool(false), &CellValue::Bool(true)),
            Ordering::Less
        );
        assert_eq!(
            compare_cells(&CellValue::Number(f64::NAN), &CellValue::Null),
            Ordering::Equal
        );
        assert_eq!(
            compare_cells(&CellValue::Number(f64::NAN), &CellValue::Number(-1.0)),
            Ordering::Greater
        );
    }

    #[test]
    fn nulls_do_not_break_numeric_order() {
        let rows = vec![
            kv(CellValue::Number(3.0), "a"),
            kv(CellValue::Null, "b"),
            kv(CellValue::Number(1.0), "c"),
        ];
        let out = sort(rows, Some(&SortSpec::ascending("k")));
        let keys: Vec<Option<f64>> = out.iter().map(|r| r["k"].as_number()).collect();
        assert_eq!(keys, vec![Some(1.0), Some(3.0), None]);
        assert_eq!(labels(&out), vec!["c", "a", "b"]);
    }

    #[test]
    fn dirty_column_sorts_by_type_then_value() {
        let rows = vec![
            kv(CellValue::String("N/A".into()), "a"),
            kv(CellValue::Number(20.0), "b"),
            kv(CellValue::Null, "c"),
            kv(CellValue::Number(5.0), "d"),
            kv(CellValue::String("N/A".into()), "e"),
            kv(CellValue::Number(12.5), "f"),
        ];
        let asc = sort(rows.clone(), Some(&SortSpec::ascending("k")));
        assert_eq!(labels(&asc), vec!["d", "f", "b", "a", "e", "c"]);
        let desc = sort(rows, Some(&SortSpec::descending("k")));
        assert_eq!(labels(&desc), vec!["c", "a", "e", "b", "f", "d"]);
    }

    #[test]
    fn toggle_cycles_direction() {
        let first = SortSpec::toggle(None, "k");
        assert_eq!(first, SortSpec::ascending("k"));
        let second = SortSpec::toggle(Some(&first), "k");
        assert_eq!(second, SortSpec::descending("k"));
        let other = SortSpec::toggle(Some(&second), "v");
        assert_eq!(other, SortSpec::ascending("v"));
    }

    #[test]
    fn sort_indices_sorts_a_filtered_view() {
        let ds = Dataset::from_rows(vec![
            kv(CellValue::Number(5.0), "a"),
            kv(CellValue::Number(1.0), "b"),
            kv(CellValue::Number(3.0), "c"),
        ]);
        let view = sort_indices(&ds, vec![0, 2], Some(&SortSpec::ascending("k")));
        assert_eq!(view, vec![2, 0]);
    }

    proptest! {
        #[test]
        fn prop_ascending_sort_is_stable(keys in prop::collection::vec(0u8..4, 0..24)) {
            let rows: Vec<Row> = keys
                .iter()
                .enumerate()
                .map(|(i, k)| kv(CellValue::Number(*k as f64), &format!("{i:03}")))
                .collect();
            let out = sort(rows, Some(&SortSpec::ascending("k")));
            for pair in out.windows(2) {
                let (ka, kb) = (pair[0]["k"].as_number(), pair[1]["k"].as_number());
                prop_assert!(ka <= kb);
                if ka == kb {
                    prop_assert!(pair[0]["v"].to_string() < pair[1]["v"].to_string());
                }
            }
        }

        #[test]
        fn prop_mixed_column_sort_is_total_and_stable(keys in prop::collection::vec(mixed_cell(), 0..40)) {
            let rows: Vec<Row> = keys
                .into_iter()
                .enumerate()
                .map(|(i, k)| kv(k, &format!("{i:03}")))
                .collect();
            let out = sort(rows, Some(&SortSpec::ascending("k")));
            for pair in out.windows(2) {
                let ord = compare_cells(&pair[0]["k"], &pair[1]["k"]);
                prop_assert_ne!(ord, Ordering::Greater);
                if ord == Ordering::Equal {
                    prop_assert!(pair[0]["v"].to_string() < pair[1]["v"].to_string());
                }
            }
            let numbers: Vec<f64> = out.iter().filter_map(|r| r["k"].as_number()).collect();
            prop_assert!(numbers.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    fn mixed_cell() -> impl Strategy<Value = CellValue> {
        prop_oneof![
            (-5i8..5).prop_map(|n| CellValue::Number(n as f64)),
            Just(CellValue::Number(f64::NAN)),
            Just(CellValue::Null),
            Just(CellValue::String("N/A".into())),
            "[a-c]{1,2}".prop_map(CellValue::String),
            any::<bool>().prop_map(CellValue::Bool),
        ]
    }
}
