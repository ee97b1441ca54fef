//! Input manifests: the ordered list of files and the mapping for each.
//!
//! The built-in manifest covers the known inventory workbooks. A JSON
//! manifest replaces it and may declare its own mappings:
//!
//! ```json
//! {
//!   "mappings": { "custom": { "Title": ["Name", "Policy"], "URL": null } },
//!   "files": [{ "path": "a.xlsx", "mapping": "custom", "sheet": "2024" }]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::builtin::{CLIMATE_MAPPING, DEFAULT_INVENTORY_FILES, builtin_mapping, climate_mapping};
use crate::error::{ModelError, Result};
use crate::mapping::{ColumnMapping, MappingRule};

/// One file to process and the mapping that standardizes it.
#[derive(Debug, Clone)]
pub struct InputFile {
    pub path: PathBuf,
    pub mapping: ColumnMapping,
    /// Worksheet to read; the first sheet when `None`.
    pub sheet: Option<String>,
}

/// Ordered list of input files.
#[derive(Debug, Clone)]
pub struct Manifest {
    pub files: Vec<InputFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawManifest {
    #[serde(default)]
    mappings: BTreeMap<String, BTreeMap<String, Option<RawRule>>>,
    files: Vec<RawEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawRule {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEntry {
    path: PathBuf,
    #[serde(default = "default_mapping_name")]
    mapping: String,
    #[serde(default)]
    sheet: Option<String>,
}

fn default_mapping_name() -> String {
    CLIMATE_MAPPING.to_string()
}

impl From<Option<RawRule>> for MappingRule {
    fn from(raw: Option<RawRule>) -> Self {
        match raw {
            None => MappingRule::Absent,
            Some(RawRule::One(name)) => MappingRule::Single(name),
            Some(RawRule::Many(names)) => MappingRule::candidates(names),
        }
    }
}

impl Manifest {
    /// The default inventory list, resolved against `input_dir`.
    pub fn builtin(input_dir: &Path) -> Self {
        let mapping = climate_mapping();
        let files = DEFAULT_INVENTORY_FILES
            .iter()
            .map(|name| InputFile {
                path: input_dir.join(name),
                mapping: mapping.clone(),
                sheet: None,
            })
            .collect();
        Self { files }
    }

    /// Reads a JSON manifest from disk.
    pub fn load(path: &Path, input_dir: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ModelError::ManifestRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&contents, path, input_dir)
    }

    /// Parses manifest JSON. `origin` is only used in error messages.
    pub fn parse(json: &str, origin: &Path, input_dir: &Path) -> Result<Self> {
        let raw: RawManifest =
            serde_json::from_str(json).map_err(|e| ModelError::ManifestParse {
                path: origin.to_path_buf(),
                source: e,
            })?;
        if raw.files.is_empty() {
            return Err(ModelError::EmptyManifest {
                path: origin.to_path_buf(),
            });
        }

        let mut declared = BTreeMap::new();
        for (name, rules) in raw.mappings {
            let mapping = ColumnMapping::from_named_rules(
                name.clone(),
                rules.into_iter().map(|(target, rule)| (target, rule.into())),
            )?;
            declared.insert(name, mapping);
        }

        let mut files = Vec::with_capacity(raw.files.len());
        for entry in raw.files {
            let mapping = match declared.get(&entry.mapping) {
                Some(mapping) => mapping.clone(),
                None => builtin_mapping(&entry.mapping).ok_or_else(|| {
                    ModelError::UnknownMapping {
                        name: entry.mapping.clone(),
                    }
                })?,
            };
            files.push(InputFile {
                path: input_dir.join(&entry.path),
                mapping,
                sheet: entry.sheet,
            });
        }
        Ok(Self { files })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
