//! Column mapping rules from source headers to canonical columns.
//!
//! A [`ColumnMapping`] holds exactly one [`MappingRule`] per canonical column.
//! Columns without an explicit rule are [`MappingRule::Absent`].

use crate::error::Result;
use crate::schema::CanonicalColumn;

/// How a canonical column finds its values in a source table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingRule {
    /// Copy the named source column if present.
    Single(String),
    /// Copy the first candidate present in the source, scanning left to right.
    Candidates(Vec<String>),
    /// Never sourced; always missing.
    Absent,
}

impl MappingRule {
    pub fn single(name: impl Into<String>) -> Self {
        Self::Single(name.into())
    }

    /// Builds a candidate list. An empty list is [`MappingRule::Absent`].
    pub fn candidates<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            Self::Absent
        } else {
            Self::Candidates(names)
        }
    }

    /// Source header names in priority order.
    pub fn source_names(&self) -> &[String] {
        match self {
            Self::Single(name) => std::slice::from_ref(name),
            Self::Candidates(names) => names,
            Self::Absent => &[],
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

/// A named, immutable set of rules covering every canonical column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    name: String,
    rules: [MappingRule; 18],
}

impl ColumnMapping {
    /// Creates a mapping where every column is [`MappingRule::Absent`].
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: std::array::from_fn(|_| MappingRule::Absent),
        }
    }

    /// Builds a mapping from header-named rules.
    ///
    /// Fails when a target name is not a canonical column. Later entries for
    /// the same column replace earlier ones.
    pub fn from_named_rules<I, S>(name: impl Into<String>, rules: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, MappingRule)>,
        S: AsRef<str>,
    {
        let mut mapping = Self::new(name);
        for (target, rule) in rules {
            let column = target.as_ref().parse::<CanonicalColumn>()?;
            mapping.set_rule(column, rule);
        }
        Ok(mapping)
    }

    #[must_use]
    pub fn with_rule(mut self, column: CanonicalColumn, rule: MappingRule) -> Self {
        self.set_rule(column, rule);
        self
    }

    pub fn set_rule(&mut self, column: CanonicalColumn, rule: MappingRule) {
        self.rules[column.position()] = rule;
    }

    pub fn rule(&self, column: CanonicalColumn) -> &MappingRule {
        &self.rules[column.position()]
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rules in canonical column order.
    pub fn rules(&self) -> impl Iterator<Item = (CanonicalColumn, &MappingRule)> {
        CanonicalColumn::ALL.into_iter().zip(self.rules.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_mapping_is_all_absent() {
        let mapping = ColumnMapping::new("empty");
        assert_eq!(mapping.rules().count(), 18);
        assert!(mapping.rules().all(|(_, rule)| rule.is_absent()));
    }

    #[test]
    fn empty_candidate_list_is_absent() {
        assert_eq!(MappingRule::candidates(Vec::<String>::new()), MappingRule::Absent);
        assert_eq!(
            MappingRule::candidates(["A", "B"]).source_names(),
            &["A".to_string(), "B".to_string()]
        );
    }

    #[test]
    fn from_named_rules_rejects_unknown_target() {
        let result = ColumnMapping::from_named_rules(
            "custom",
            [("Implementation Agency", MappingRule::single("Agency"))],
        );
        assert!(result.is_err());
    }

    #[test]
    fn from_named_rules_sets_rules_by_header() {
        let mapping = ColumnMapping::from_named_rules(
            "custom",
            [
                ("Country", MappingRule::single("Nation")),
                ("URL", MappingRule::candidates(["Link", "URL"])),
            ],
        )
        .unwrap();
        assert_eq!(mapping.name(), "custom");
        assert_eq!(
            mapping.rule(CanonicalColumn::Country),
            &MappingRule::single("Nation")
        );
        assert_eq!(mapping.rule(CanonicalColumn::Url).source_names().len(), 2);
        assert!(mapping.rule(CanonicalColumn::Title).is_absent());
    }
}
