//! Machine classification: categories, subcategories, work phases and the
//! per-category detail map.
//!
//! [`Taxonomy`] keeps the plural lists as the only stored truth. The legacy
//! singular fields (`category`, `subcategory`, `workPhase`) are projections of
//! the first list element and are written out together with the lists when
//! the value is serialized, so older readers keep working.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryName, SubcategoryName, WorkPhaseName};

/// Domain tag every machine carries.
pub const CONSTRUCTION_TAG: &str = "construction";

/// Value stored inside an open info bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InfoValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<InfoValue>),
    Map(InfoBag),
}

impl From<&str> for InfoValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for InfoValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for InfoValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for InfoValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

/// String-keyed bag of free-form values.
pub type InfoBag = BTreeMap<String, InfoValue>;

/// Metadata kept for one category (or work phase) a machine belongs to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryDetail {
    pub primary_category: bool,
    pub additional_info: InfoBag,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: InfoBag,
    pub subcategories: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CategoryDetail {
    /// Entry marked as the primary category with nothing else attached.
    pub fn primary() -> Self {
        Self {
            primary_category: true,
            ..Self::default()
        }
    }
}

/// Detail entries keyed by category or work phase name.
pub type CategoryDetails = BTreeMap<String, CategoryDetail>;

/// Normalized classification block of a machine.
///
/// Values are only produced by [`crate::normalizer`], which guarantees that
/// `categories` is non-empty and contains [`CONSTRUCTION_TAG`], that the
/// lists hold no duplicates and that exactly one detail entry, keyed by
/// [`Taxonomy::category`], is primary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "TaxonomyRecord")]
pub struct Taxonomy {
    categories: Vec<CategoryName>,
    subcategories: Vec<SubcategoryName>,
    work_phases: Vec<WorkPhaseName>,
    category_details: CategoryDetails,
}

impl Taxonomy {
    pub(crate) fn from_parts(
        categories: Vec<CategoryName>,
        subcategories: Vec<SubcategoryName>,
        work_phases: Vec<WorkPhaseName>,
        category_details: CategoryDetails,
    ) -> Self {
        Self {
            categories,
            subcategories,
            work_phases,
            category_details,
        }
    }

    pub fn categories(&self) -> &[CategoryName] {
        &self.categories
    }

    pub fn subcategories(&self) -> &[SubcategoryName] {
        &self.subcategories
    }

    pub fn work_phases(&self) -> &[WorkPhaseName] {
        &self.work_phases
    }

    pub fn category_details(&self) -> &CategoryDetails {
        &self.category_details
    }

    /// Primary category, i.e. the first element of `categories`.
    pub fn category(&self) -> &str {
        self.categories.first().map(|c| c.as_str()).unwrap_or_default()
    }

    /// First subcategory or an empty string.
    pub fn subcategory(&self) -> &str {
        self.subcategories
            .first()
            .map(|s| s.as_str())
            .unwrap_or_default()
    }

    /// First work phase or an empty string.
    pub fn work_phase(&self) -> &str {
        self.work_phases
            .first()
            .map(|p| p.as_str())
            .unwrap_or_default()
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.as_str() == name)
    }

    pub fn has_work_phase(&self, name: &str) -> bool {
        self.work_phases.iter().any(|p| p.as_str() == name)
    }
}

/// Wire shape of a [`Taxonomy`]: the six fields plus the detail map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonomyRecord {
    pub categories: Vec<String>,
    pub category: String,
    pub subcategories: Vec<String>,
    pub subcategory: String,
    pub work_phases: Vec<String>,
    pub work_phase: String,
    pub category_details: CategoryDetails,
}

impl From<Taxonomy> for TaxonomyRecord {
    fn from(value: Taxonomy) -> Self {
        let category = value.category().to_string();
        let subcategory = value.subcategory().to_string();
        let work_phase = value.work_phase().to_string();
        Self {
            categories: value.categories.into_iter().map(String::from).collect(),
            category,
            subcategories: value.subcategories.into_iter().map(String::from).collect(),
            subcategory,
            work_phases: value.work_phases.into_iter().map(String::from).collect(),
            work_phase,
            category_details: value.category_details,
        }
    }
}
