use crate::builtin::builtin_defs;
use figment::{
    providers::{Format, Toml},
    Figment,
};
use placelens_core::error::{Error, Result};
use placelens_core::types::{FacetClass, FacetDefinition};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Static lookup table of facet definitions.
///
/// Insertion order is preserved so that equal-priority matches resolve
/// deterministically. No mutation after construction.
pub struct FacetDictionary {
    defs: Vec<FacetDefinition>,
    by_id: HashMap<String, usize>,
}

/// On-disk shape of a facet table file: a list of `[[facet]]` entries.
#[derive(Deserialize)]
struct FacetTableFile {
    #[serde(default)]
    facet: Vec<FacetDefinition>,
}

impl FacetDictionary {
    /// Build a dictionary from definitions, failing fast on duplicate
    /// ids. Duplicates are a data-integrity bug in the source table,
    /// never something the rule engine should paper over.
    pub fn new(defs: Vec<FacetDefinition>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(defs.len());
        for (index, def) in defs.iter().enumerate() {
            if def.id.is_empty() {
                return Err(Error::InvalidFacetTable("empty facet id".to_string()));
            }
            if by_id.insert(def.id.clone(), index).is_some() {
                return Err(Error::DuplicateFacet(def.id.clone()));
            }
        }
        Ok(Self { defs, by_id })
    }

    /// The fixed production table.
    pub fn builtin() -> Self {
        match Self::new(builtin_defs()) {
            Ok(dict) => dict,
            Err(e) => unreachable!("builtin facet table is statically unique: {}", e),
        }
    }

    /// Load a dictionary from a TOML file of `[[facet]]` entries.
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let table: FacetTableFile = Figment::new().merge(Toml::file(path)).extract()?;
        if table.facet.is_empty() {
            anyhow::bail!("no [[facet]] entries in {}", path.display());
        }
        Ok(Self::new(table.facet)?)
    }

    pub fn lookup(&self, id: &str) -> Option<&FacetDefinition> {
        self.by_id.get(id).map(|&index| &self.defs[index])
    }

    /// True iff the facet exists and is unrestricted or lists the slug.
    /// Unknown ids are never allowed.
    pub fn is_allowed_for_category(&self, id: &str, category_slug: &str) -> bool {
        self.lookup(id)
            .map(|def| def.allows_category(category_slug))
            .unwrap_or(false)
    }

    /// All facets of one class, in insertion order.
    pub fn facets_of_class(&self, class: FacetClass) -> impl Iterator<Item = &FacetDefinition> {
        self.defs.iter().filter(move |def| def.class == class)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}
