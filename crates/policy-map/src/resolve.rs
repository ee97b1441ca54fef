//! Mapping rule resolution against a source table's columns.

use polars::prelude::DataFrame;

use policy_model::{CanonicalColumn, ColumnMapping, MappingRule};

/// Outcome of resolving one canonical column's rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The rule is [`MappingRule::Absent`].
    Absent,
    /// The named source column feeds the canonical column.
    Matched(String),
    /// The rule names sources but none exist in this table.
    Unmatched,
}

impl Resolution {
    pub fn source(&self) -> Option<&str> {
        match self {
            Self::Matched(name) => Some(name),
            Self::Absent | Self::Unmatched => None,
        }
    }
}

/// Picks the first source name accepted by `has_column`, scanning in rule order.
pub fn resolve_source<F>(rule: &MappingRule, has_column: F) -> Option<&str>
where
    F: Fn(&str) -> bool,
{
    rule.source_names()
        .iter()
        .map(String::as_str)
        .find(|name| has_column(name))
}

/// Resolves a rule against the columns of `df`.
pub fn resolve_rule(rule: &MappingRule, df: &DataFrame) -> Resolution {
    if rule.is_absent() {
        return Resolution::Absent;
    }
    match resolve_source(rule, |name| df.column(name).is_ok()) {
        Some(name) => Resolution::Matched(name.to_string()),
        None => Resolution::Unmatched,
    }
}

/// Resolves the rule of one canonical column.
pub fn resolve_column(mapping: &ColumnMapping, column: CanonicalColumn, df: &DataFrame) -> Resolution {
    resolve_rule(mapping.rule(column), df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{Column, IntoColumn, NamedFrom, Series};

    fn frame(names: &[&str]) -> DataFrame {
        let cols: Vec<Column> = names
            .iter()
            .map(|name| Series::new((*name).into(), vec!["x"]).into_column())
            .collect();
        DataFrame::new(cols).unwrap()
    }

    #[test]
    fn first_present_candidate_wins() {
        let rule = MappingRule::candidates(["Type of document", "Policy", "Title"]);
        let df = frame(&["Title", "Policy"]);
        assert_eq!(resolve_rule(&rule, &df), Resolution::Matched("Policy".to_string()));
    }

    #[test]
    fn single_rule_matches_exact_name_only() {
        let rule = MappingRule::single("Country");
        assert_eq!(
            resolve_rule(&rule, &frame(&["Country"])),
            Resolution::Matched("Country".to_string())
        );
        assert_eq!(resolve_rule(&rule, &frame(&["country"])), Resolution::Unmatched);
        assert_eq!(resolve_rule(&rule, &frame(&["Country "])), Resolution::Unmatched);
    }

    #[test]
    fn absent_rule_never_resolves() {
        let df = frame(&["Type of demand"]);
        assert_eq!(resolve_rule(&MappingRule::Absent, &df), Resolution::Absent);
        assert_eq!(Resolution::Absent.source(), None);
    }

    #[test]
    fn resolve_source_uses_predicate_order() {
        let rule = MappingRule::candidates(["URL", "Link to Full Document"]);
        assert_eq!(resolve_source(&rule, |_| true), Some("URL"));
        assert_eq!(
            resolve_source(&rule, |name| name.starts_with("Link")),
            Some("Link to Full Document")
        );
        assert_eq!(resolve_source(&rule, |_| false), None);
    }
}
