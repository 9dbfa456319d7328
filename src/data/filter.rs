use super::model::{parse_number, CellValue, Dataset, Row};
use super::query::{CompareOp, FilterExpression};

// ---------------------------------------------------------------------------
// Compiled predicate: a FilterExpression resolved against one dataset
// ---------------------------------------------------------------------------

/// A filter expression bound to a dataset's columns.
#[derive(Debug, Clone, PartialEq)]
pub enum CompiledFilter {
    All,
    /// Lowercased needle.
    Substring(String),
    Comparison {
        column: String,
        op: CompareOp,
        literal: String,
        /// Pre-parsed literal, `None` when it is not a finite number.
        number: Option<f64>,
    },
    /// The comparison named a column the dataset does not have.
    UnknownColumn(String),
}

impl CompiledFilter {
    pub fn compile(expr: &FilterExpression, dataset: &Dataset) -> Self {
        match expr {
            FilterExpression::All => CompiledFilter::All,
            FilterExpression::Substring(text) => CompiledFilter::Substring(text.to_lowercase()),
            FilterExpression::Comparison {
                column,
                op,
                literal,
            } => match dataset.resolve_column(column) {
                Some(resolved) => CompiledFilter::Comparison {
                    column: resolved.to_string(),
                    op: *op,
                    literal: literal.clone(),
                    number: parse_number(literal),
                },
                None => {
                    log::debug!("filter references unknown column '{column}', excluding all rows");
                    CompiledFilter::UnknownColumn(column.clone())
                }
            },
        }
    }

    /// Whether a single row passes.
    pub fn matches(&self, row: &Row) -> bool {
        match self {
            CompiledFilter::All => true,
            CompiledFilter::Substring(needle) => row
                .values()
                .any(|v| v.search_text().to_lowercase().contains(needle.as_str())),
            CompiledFilter::Comparison {
                column,
                op,
                literal,
                number,
            } => row
                .get(column)
                .is_some_and(|cell| compare_cell(cell, *op, literal, *number)),
            CompiledFilter::UnknownColumn(_) => false,
        }
    }
}

/// Numeric comparison when both sides are numbers, else case-insensitive
/// equality for `=` only.
fn compare_cell(cell: &CellValue, op: CompareOp, literal: &str, number: Option<f64>) -> bool {
    if let (Some(lhs), Some(rhs)) = (cell.as_number(), number) {
        return match op {
            CompareOp::Greater => lhs > rhs,
            CompareOp::Less => lhs < rhs,
            CompareOp::Equal => lhs == rhs,
        };
    }
    match op {
        CompareOp::Equal => cell.search_text().to_lowercase() == literal.to_lowercase(),
        CompareOp::Greater | CompareOp::Less => false,
    }
}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Return indices of rows that pass `query`, in dataset order.
pub fn filtered_indices(dataset: &Dataset, query: &str) -> Vec<usize> {
    let expr = FilterExpression::parse(query);
    let filter = CompiledFilter::compile(&expr, dataset);
    if filter == CompiledFilter::All {
        return (0..dataset.len()).collect();
    }
    dataset
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| filter.matches(row))
        .map(|(i, _)| i)
        .collect()
}

/// Filter a dataset into a new one holding the matching rows.
pub fn filter(dataset: &Dataset, query: &str) -> Dataset {
    dataset.select(&filtered_indices(dataset, query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn people() -> Dataset {
        let rows = [
            (18.0, "Ann", true),
            (25.0, "Bob", false),
            (40.0, "Cara", true),
        ]
        .into_iter()
        .map(|(age, name, active)| {
            Row::from([
                ("age".to_string(), CellValue::Number(age)),
                ("name".to_string(), CellValue::String(name.to_string())),
                ("active".to_string(), CellValue::Bool(active)),
            ])
        })
        .collect();
        Dataset::from_rows(rows)
    }

    fn names(ds: &Dataset) -> Vec<String> {
        ds.rows.iter().map(|r| r["name"].to_string()).collect()
    }

    #[test]
    fn empty_query_is_identity() {
        let ds = people();
        assert_eq!(filter(&ds, ""), ds);
        assert_eq!(filter(&ds, "   "), ds);
    }

    #[test]
    fn numeric_comparisons() {
        let ds = people();
        assert_eq!(names(&filter(&ds, "age>30")), vec!["Cara"]);
        assert_eq!(names(&filter(&ds, "age<20")), vec!["Ann"]);
        assert_eq!(names(&filter(&ds, "age=25")), vec!["Bob"]);
    }

    #[test]
    fn column_name_is_case_insensitive() {
        let ds = people();
        assert_eq!(names(&filter(&ds, "AGE > 30")), vec!["Cara"]);
    }

    #[test]
    fn unknown_column_fails_closed() {
        let ds = people();
        assert!(filter(&ds, "salary9>10").is_empty());
        // would have matched as text, but must not fall back
        assert!(filter(&ds, "nam=Bob").is_empty());
    }

    #[test]
    fn string_equality_ignores_case() {
        let ds = people();
        assert_eq!(names(&filter(&ds, "name=bob")), vec!["Bob"]);
        assert_eq!(names(&filter(&ds, "active=TRUE")), vec!["Ann", "Cara"]);
    }

    #[test]
    fn ordering_on_text_excludes_rows() {
        let ds = people();
        assert!(filter(&ds, "name>A").is_empty());
        assert!(filter(&ds, "age>abc").is_empty());
    }

    #[test]
    fn numeric_strings_compare_numerically() {
        let ds = Dataset::from_rows(vec![
            Row::from([("qty".to_string(), CellValue::String("9".into()))]),
            Row::from([("qty".to_string(), CellValue::String("10".into()))]),
        ]);
        let out = filter(&ds, "qty>9");
        assert_eq!(out.rows.len(), 1);
        assert_eq!(out.rows[0]["qty"], CellValue::String("10".into()));
    }

    #[test]
    fn substring_matches_any_cell_case_insensitively() {
        let ds = people();
        assert_eq!(names(&filter(&ds, "AR")), vec!["Cara"]);
        assert_eq!(names(&filter(&ds, "false")), vec!["Bob"]);
        assert_eq!(names(&filter(&ds, "4")), vec!["Cara"]);
        assert!(filter(&ds, "zzz").is_empty());
    }

    #[test]
    fn null_cells_never_match_text() {
        let ds = Dataset::from_rows(vec![
            Row::from([("note".to_string(), CellValue::Null)]),
            Row::from([("note".to_string(), CellValue::String("null".into()))]),
        ]);
        assert_eq!(filtered_indices(&ds, "null"), vec![1]);
        assert_eq!(filtered_indices(&ds, "note=null"), vec![1]);
    }

    #[test]
    fn preserves_relative_order() {
        let ds = people();
        assert_eq!(filtered_indices(&ds, "true"), vec![0, 2]);
    }

    fn arb_dataset() -> impl Strategy<Value = Dataset> {
        prop::collection::vec(("[a-z ]{0,8}", -50i32..50), 0..20).prop_map(|cells| {
            let rows = cells
                .into_iter()
                .map(|(text, n)| {
                    Row::from([
                        ("text".to_string(), CellValue::String(text)),
                        ("n".to_string(), CellValue::Number(n as f64)),
                    ])
                })
                .collect();
            Dataset::from_rows(rows)
        })
    }

    proptest! {
        #[test]
        fn prop_blank_query_is_identity(ds in arb_dataset(), blank in "[ \t]{0,4}") {
            prop_assert_eq!(filter(&ds, &blank), ds);
        }

        #[test]
        fn prop_refining_text_never_adds_rows(
            ds in arb_dataset(),
            q1 in "[a-z ]{0,6}",
            suffix in "[a-z ]{1,4}",
        ) {
            let broad = filtered_indices(&ds, &q1);
            let narrow = filtered_indices(&ds, &format!("{q1}{suffix}"));
            prop_assert!(narrow.iter().all(|i| broad.contains(i)));
        }

        #[test]
        fn prop_result_is_ordered_subsequence(ds in arb_dataset(), q in "[a-z0-9<>= ]{0,6}") {
            let idx = filtered_indices(&ds, &q);
            prop_assert!(idx.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(idx.iter().all(|&i| i < ds.len()));
        }
    }
}
