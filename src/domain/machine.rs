use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::taxonomy::{CategoryDetails, Taxonomy};
use crate::domain::types::{ImageUrl, MachineId, MachineName, OwnerId};

/// Rental machine with a normalized taxonomy.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Machine {
    pub id: MachineId,
    pub name: MachineName,
    #[serde(flatten)]
    pub taxonomy: Taxonomy,
    pub description: Option<String>,
    pub owner_id: Option<OwnerId>,
    pub image_url: Option<ImageUrl>,
    pub active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert a new [`Machine`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewMachine {
    pub name: MachineName,
    pub taxonomy: Taxonomy,
    pub description: Option<String>,
    pub owner_id: Option<OwnerId>,
    pub image_url: Option<ImageUrl>,
    pub active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Caller supplied data for machine creation.
///
/// Legacy singular fields and plural lists may be mixed in any combination;
/// [`crate::normalizer::normalize_for_create`] reconciles them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MachineInput {
    pub name: Option<String>,
    pub category: Option<String>,
    pub categories: Option<Vec<String>>,
    pub subcategory: Option<String>,
    pub subcategories: Option<Vec<String>>,
    pub work_phase: Option<String>,
    pub work_phases: Option<Vec<String>>,
    pub category_details: Option<CategoryDetails>,
    pub description: Option<String>,
    pub owner_id: Option<OwnerId>,
    pub image_url: Option<ImageUrl>,
    pub active: Option<bool>,
}

/// Classification part of a machine update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaxonomyPatch {
    pub categories: Option<Vec<String>>,
    pub subcategories: Option<Vec<String>>,
    pub work_phase: Option<String>,
    pub work_phases: Option<Vec<String>>,
    pub category_details: Option<CategoryDetails>,
}

/// Partial machine update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MachinePatch {
    pub name: Option<MachineName>,
    #[serde(flatten)]
    pub taxonomy: TaxonomyPatch,
    pub description: Option<String>,
    pub owner_id: Option<OwnerId>,
    pub image_url: Option<ImageUrl>,
    pub active: Option<bool>,
}

impl Machine {
    /// Apply the non-taxonomy part of `patch` and install `taxonomy`.
    pub fn apply(
        mut self,
        patch: MachinePatch,
        taxonomy: Taxonomy,
        updated_at: NaiveDateTime,
    ) -> Self {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(owner_id) = patch.owner_id {
            self.owner_id = Some(owner_id);
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = Some(image_url);
        }
        if let Some(active) = patch.active {
            self.active = active;
        }
        self.taxonomy = taxonomy;
        self.updated_at = updated_at;
        self
    }
}

/// Machine exactly as stored, possibly written before the plural lists
/// existed. Every taxonomy field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MachineDocument {
    pub id: Option<MachineId>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub categories: Option<Vec<String>>,
    pub subcategory: Option<String>,
    pub subcategories: Option<Vec<String>>,
    pub work_phase: Option<String>,
    pub work_phases: Option<Vec<String>>,
    pub category_details: Option<CategoryDetails>,
    pub description: Option<String>,
    pub owner_id: Option<OwnerId>,
    pub image_url: Option<ImageUrl>,
    pub active: Option<bool>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl MachineDocument {
    /// Display label used in migration reports.
    pub fn label(&self) -> String {
        let name = self.name.as_deref().unwrap_or("<unnamed>");
        match &self.id {
            Some(id) => format!("{name} ({id})"),
            None => name.to_string(),
        }
    }
}

impl From<Machine> for MachineDocument {
    fn from(machine: Machine) -> Self {
        let legacy_category = machine.taxonomy.category().to_string();
        let legacy_subcategory = machine.taxonomy.subcategory().to_string();
        let legacy_work_phase = machine.taxonomy.work_phase().to_string();
        Self {
            id: Some(machine.id),
            name: Some(machine.name.into_inner()),
            category: Some(legacy_category),
            categories: Some(
                machine
                    .taxonomy
                    .categories()
                    .iter()
                    .map(|c| c.to_string())
                    .collect(),
            ),
            subcategory: Some(legacy_subcategory),
            subcategories: Some(
                machine
                    .taxonomy
                    .subcategories()
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            ),
            work_phase: Some(legacy_work_phase),
            work_phases: Some(
                machine
                    .taxonomy
                    .work_phases()
                    .iter()
                    .map(|p| p.to_string())
                    .collect(),
            ),
            category_details: Some(machine.taxonomy.category_details().clone()),
            description: machine.description,
            owner_id: machine.owner_id,
            image_url: machine.image_url,
            active: Some(machine.active),
            created_at: Some(machine.created_at),
            updated_at: Some(machine.updated_at),
        }
    }
}
