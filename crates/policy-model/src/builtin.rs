//! Built-in mappings and the default inventory file list.

use crate::mapping::{ColumnMapping, MappingRule};
use crate::schema::CanonicalColumn;

/// Name of the mapping shared by the country policy inventories.
pub const CLIMATE_MAPPING: &str = "climate";

/// Mapping used by the climate/diet/gender/nutrition/poverty inventories.
pub fn climate_mapping() -> ColumnMapping {
    ColumnMapping::new(CLIMATE_MAPPING)
        .with_rule(CanonicalColumn::SlNo, MappingRule::single("Sl No"))
        .with_rule(CanonicalColumn::Country, MappingRule::single("Country"))
        .with_rule(
            CanonicalColumn::Title,
            MappingRule::candidates([
                "Type of document (Policy; Program; Implementation plans; strategic plans, etc)",
                "Policy",
            ]),
        )
        .with_rule(
            CanonicalColumn::DocumentType,
            MappingRule::single("Policy Type \n(e.g., Policy, Strategy, Action Plan.)"),
        )
        .with_rule(
            CanonicalColumn::AdoptionDate,
            MappingRule::candidates(["Publication/Adoption Date", "Year of adoption"]),
        )
        .with_rule(
            CanonicalColumn::Goals,
            MappingRule::single(
                "Objectives/Goals (Short summary of the stated aims or goals of the policy).",
            ),
        )
        .with_rule(
            CanonicalColumn::Problems,
            MappingRule::single(
                "Remarks \n(Additional notes, such as challenges, reforms in progress, \
                 or relevance to global frameworks (e.g., SDGs).)",
            ),
        )
        .with_rule(
            CanonicalColumn::CallsForAction,
            MappingRule::single(
                "Key Provisions or Measures\nSummary of major policy actions or mechanisms introduced.",
            ),
        )
        .with_rule(
            CanonicalColumn::FundingIndicator,
            MappingRule::single(
                "Budget Allocation (if any) Indicate if there is any budget attached \
                 and its size or source.",
            ),
        )
        .with_rule(
            CanonicalColumn::InnovationDescription,
            MappingRule::single(
                "Implementation Mechanism (Description of how the policy is implemented \
                 (e.g., through specific programs, agencies, funding mechanisms).)",
            ),
        )
        .with_rule(
            CanonicalColumn::SdgContribution,
            MappingRule::single(
                "Policy Linkages\nRelated policies or alignment with international \
                 frameworks (e.g., SDGs, UNFCCC).",
            ),
        )
        .with_rule(
            CanonicalColumn::Stakeholders,
            MappingRule::single("Implementation Agency \n(Ministry/departments/boards, etc..)"),
        )
        .with_rule(
            CanonicalColumn::Url,
            MappingRule::candidates(["URL", "Link to Full Document"]),
        )
}

/// Looks up a built-in mapping by name.
pub fn builtin_mapping(name: &str) -> Option<ColumnMapping> {
    match name {
        CLIMATE_MAPPING => Some(climate_mapping()),
        _ => None,
    }
}

/// Names of all built-in mappings.
pub fn builtin_mapping_names() -> &'static [&'static str] {
    &[CLIMATE_MAPPING]
}

/// Inventory workbooks processed when no manifest is given, in output order.
pub const DEFAULT_INVENTORY_FILES: [&str; 17] = [
    "PolicyInventory_COL_CLIM_202507.xlsx",
    "PolicyInventory_COL_DIET_202507.xlsx",
    "PolicyInventory_COL_GEND_202507.xlsx",
    "PolicyInventory_COL_NTRL_202507.xlsx",
    "PolicyInventory_COL_POVT_202507.xlsx",
    "Policies Inventory_Nigeria.xlsx",
    "PolicyInventory_Bangladesh_CLIM.xlsx",
    "PolicyInventory_Bangladesh_GEND.xlsx",
    "PolicyInventory_Bangladesh_NTRL.xlsx",
    "4. PolicyInventory_Bangladesh_DIET.xlsx",
    "5. PolicyInventory_Bangladesh_POVT_20250713.xlsx",
    "Policy Inventory_Ethiopia_CLIM.xlsx",
    "Base de datos de políticas y programas COL.xlsx",
    "Policies Inventory_Nigeria_by CG impact areas_Charity_Mesay.xlsx",
    "Policy Inventory_Ethiopia_NHFS.xlsx",
    "Inventory_IND_GEND b.xlsx",
    "Inventory_IND_GEND a.xlsx",
];
