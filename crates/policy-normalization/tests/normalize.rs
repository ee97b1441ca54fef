//! Integration tests for funding derivation and row filtering.

use polars::prelude::{AnyValue, Column, DataFrame, IntoColumn, NamedFrom, Series};
use proptest::prelude::*;

use policy_ingest::any_to_text;
use policy_map::standardize;
use policy_model::{CanonicalColumn, ColumnMapping, MappingRule};
use policy_normalization::{
    FundingCounts, drop_empty_rows, normalize_funding_indicator, normalize_table,
};

fn test_df(columns: Vec<(&str, Vec<Option<&str>>)>) -> DataFrame {
    let cols: Vec<Column> = columns
        .into_iter()
        .map(|(name, values)| Series::new(name.into(), values).into_column())
        .collect();
    DataFrame::new(cols).unwrap()
}

fn budget_mapping() -> ColumnMapping {
    ColumnMapping::new("budget")
        .with_rule(CanonicalColumn::Title, MappingRule::single("Policy"))
        .with_rule(CanonicalColumn::Country, MappingRule::single("Country"))
        .with_rule(
            CanonicalColumn::FundingIndicator,
            MappingRule::candidates(["Budget", "Funding"]),
        )
}

fn funding_values(df: &DataFrame) -> Vec<String> {
    let column = df.column(CanonicalColumn::FUNDING.name()).unwrap();
    (0..df.height())
        .map(|idx| any_to_text(column.get(idx).unwrap()).unwrap_or_default())
        .collect()
}

#[test]
fn funding_is_derived_from_the_first_present_candidate() {
    let source = test_df(vec![
        ("Policy", vec![Some("A"), Some("B"), Some("C"), Some("D")]),
        (
            "Funding",
            vec![
                Some("No dedicated budget"),
                Some("USD 2M allocated"),
                None,
                Some(""),
            ],
        ),
    ]);
    let mapping = budget_mapping();
    let mut table = standardize(&source, &mapping).unwrap();

    let counts = normalize_funding_indicator(&mut table, &source, &mapping).unwrap();

    assert_eq!(counts, Some(FundingCounts { yes: 1, no: 3 }));
    assert_eq!(funding_values(&table.data), vec!["No", "Yes", "No", "No"]);
}

#[test]
fn single_row_source_is_classified() {
    let source = test_df(vec![
        ("Policy", vec![Some("A")]),
        ("Budget", vec![Some("NOT SPECIFIED")]),
    ]);
    let mapping = budget_mapping();
    let mut table = standardize(&source, &mapping).unwrap();

    let counts = normalize_funding_indicator(&mut table, &source, &mapping).unwrap();

    assert_eq!(counts, Some(FundingCounts { yes: 0, no: 1 }));
    assert_eq!(funding_values(&table.data), vec!["No"]);
}

#[test]
fn funding_untouched_without_source_column() {
    let source = test_df(vec![("Policy", vec![Some("A")])]);
    let mapping = budget_mapping();
    let mut table = standardize(&source, &mapping).unwrap();

    let counts = normalize_funding_indicator(&mut table, &source, &mapping).unwrap();

    assert_eq!(counts, None);
    let funding = table.data.column(CanonicalColumn::FUNDING.name()).unwrap();
    assert_eq!(funding.null_count(), 1);
}

#[test]
fn numeric_budget_cells_are_yes() {
    let source = DataFrame::new(vec![
        Series::new("Budget".into(), vec![Some(50000i64), None]).into_column(),
    ])
    .unwrap();
    let mapping = budget_mapping();
    let mut table = standardize(&source, &mapping).unwrap();

    normalize_funding_indicator(&mut table, &source, &mapping).unwrap();

    assert_eq!(funding_values(&table.data), vec!["Yes", "No"]);
}

#[test]
fn row_with_single_present_cell_is_kept() {
    let source = test_df(vec![
        ("Policy", vec![None, None]),
        ("Country", vec![Some("Nigeria"), None]),
    ]);
    let mapping = ColumnMapping::new("t")
        .with_rule(CanonicalColumn::Title, MappingRule::single("Policy"))
        .with_rule(CanonicalColumn::Country, MappingRule::single("Country"));
    let mut table = standardize(&source, &mapping).unwrap();

    let dropped = drop_empty_rows(&mut table.data).unwrap();

    assert_eq!(dropped, 1);
    assert_eq!(table.height(), 1);
    assert_eq!(
        table.data.column("Country").unwrap().get(0).unwrap(),
        AnyValue::String("Nigeria")
    );
}

#[test]
fn derived_funding_keeps_otherwise_empty_rows() {
    let source = test_df(vec![
        ("Policy", vec![None, Some("Water Act")]),
        ("Budget", vec![None, Some("not specified")]),
    ]);
    let mapping = budget_mapping();
    let mut table = standardize(&source, &mapping).unwrap();

    let summary = normalize_table(&mut table, &source, &mapping).unwrap();

    assert_eq!(summary.dropped_rows, 0);
    assert_eq!(summary.funding, Some(FundingCounts { yes: 0, no: 2 }));
    assert_eq!(table.height(), 2);
}

#[test]
fn all_missing_rows_dropped_when_no_funding_source() {
    let source = test_df(vec![
        ("Policy", vec![None, Some("Water Act"), None]),
        ("Country", vec![None, None, None]),
    ]);
    let mapping = budget_mapping();
    let mut table = standardize(&source, &mapping).unwrap();

    let summary = normalize_table(&mut table, &source, &mapping).unwrap();

    assert_eq!(summary.dropped_rows, 2);
    assert_eq!(summary.funding, None);
    assert_eq!(table.height(), 1);
}

fn rows_strategy() -> impl Strategy<Value = Vec<(Option<String>, Option<String>, Option<i64>)>> {
    prop::collection::vec(
        (
            prop::option::of("[a-z]{0,3}"),
            prop::option::of("[A-Z]{1,3}"),
            prop::option::of(0i64..100),
        ),
        0..24,
    )
}

proptest! {
    #[test]
    fn row_filter_is_idempotent(rows in rows_strategy()) {
        let titles: Vec<Option<String>> = rows.iter().map(|r| r.0.clone()).collect();
        let countries: Vec<Option<String>> = rows.iter().map(|r| r.1.clone()).collect();
        let numbers: Vec<Option<i64>> = rows.iter().map(|r| r.2).collect();
        let mut df = DataFrame::new(vec![
            Series::new("Title".into(), titles).into_column(),
            Series::new("Country".into(), countries).into_column(),
            Series::new("Sl No".into(), numbers).into_column(),
        ])
        .unwrap();

        let first = drop_empty_rows(&mut df).unwrap();
        let after_first = df.clone();
        let second = drop_empty_rows(&mut df).unwrap();

        let expected_dropped = rows
            .iter()
            .filter(|r| r.0.is_none() && r.1.is_none() && r.2.is_none())
            .count();
        prop_assert_eq!(first, expected_dropped);
        prop_assert_eq!(second, 0);
        prop_assert!(df.equals_missing(&after_first));
    }

    #[test]
    fn negative_phrases_are_no_in_any_case(
        idx in 0usize..5,
        mask in prop::collection::vec(any::<bool>(), 32),
    ) {
        let phrase = policy_normalization::NEGATIVE_FUNDING_PHRASES[idx];
        let mixed: String = phrase
            .chars()
            .zip(mask.iter().cycle())
            .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
            .collect();
        prop_assert_eq!(
            policy_normalization::classify_funding(Some(&mixed)),
            policy_normalization::FundingIndicator::No
        );
    }
}
