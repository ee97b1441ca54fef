//! Canonical master-table schema.
//!
//! Every standardized table carries exactly these 18 columns, in this order.
//! The enum's declaration order is the output order, so `Ord` on
//! [`CanonicalColumn`] sorts columns the way they are written.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A column of the canonical master schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CanonicalColumn {
    SlNo,
    Title,
    DocumentType,
    AdoptionDate,
    Country,
    Goals,
    Problems,
    CallsForAction,
    FundingIndicator,
    UrgencyIndicators,
    DemandType,
    InnovationDescription,
    InnovationType,
    ImpactAreas,
    SdgContribution,
    Stakeholders,
    StakeholderNeeds,
    Url,
}

impl CanonicalColumn {
    /// All canonical columns in output order.
    pub const ALL: [CanonicalColumn; 18] = [
        Self::SlNo,
        Self::Title,
        Self::DocumentType,
        Self::AdoptionDate,
        Self::Country,
        Self::Goals,
        Self::Problems,
        Self::CallsForAction,
        Self::FundingIndicator,
        Self::UrgencyIndicators,
        Self::DemandType,
        Self::InnovationDescription,
        Self::InnovationType,
        Self::ImpactAreas,
        Self::SdgContribution,
        Self::Stakeholders,
        Self::StakeholderNeeds,
        Self::Url,
    ];

    /// Column renumbered 1..N after aggregation.
    pub const IDENTIFIER: CanonicalColumn = Self::SlNo;

    /// Column derived from free-text budget descriptions.
    pub const FUNDING: CanonicalColumn = Self::FundingIndicator;

    /// Header text written to the master table.
    pub const fn name(self) -> &'static str {
        match self {
            Self::SlNo => "Sl No",
            Self::Title => "Title",
            Self::DocumentType => "Type of document",
            Self::AdoptionDate => "Publication/Adoption Date",
            Self::Country => "Country",
            Self::Goals => "Goals/objectives/vision statements",
            Self::Problems => "Problems/challenges identified",
            Self::CallsForAction => "Calls for action/intervention",
            Self::FundingIndicator => "Demands with pledges, commitment, or funding (Yes/No)",
            Self::UrgencyIndicators => "Indicators of urgency/priority",
            Self::DemandType => "Type of demand",
            Self::InnovationDescription => "Description of the specific Innovation(s)",
            Self::InnovationType => "Type of Innovation",
            Self::ImpactAreas => "CGIAR Impact Area(s)",
            Self::SdgContribution => "SDG Contribution",
            Self::Stakeholders => "Stakeholder groups involved",
            Self::StakeholderNeeds => "Stakeholder group needs/demand/effective demand",
            Self::Url => "URL",
        }
    }

    /// Looks up a column by its exact header text.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|column| column.name() == name)
    }

    /// Zero-based position in the output order.
    pub fn position(self) -> usize {
        self as usize
    }
}

impl fmt::Display for CanonicalColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CanonicalColumn {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ModelError::UnknownColumn {
            name: s.to_string(),
        })
    }
}

/// Header names of the canonical schema, in output order.
pub fn canonical_column_names() -> Vec<&'static str> {
    CanonicalColumn::ALL.iter().map(|c| c.name()).collect()
}
