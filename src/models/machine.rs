use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::machine::{Machine as DomainMachine, MachineDocument, NewMachine};
use crate::domain::taxonomy::Taxonomy;
use crate::domain::types::{ImageUrl, MachineId, OwnerId};
use crate::models::stored_optional;
use crate::repository::errors::RepositoryError;

/// Diesel model representing the `machines` table.
///
/// Every taxonomy column is nullable because rows written before the plural
/// lists existed only carry the singular columns.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::machines)]
pub struct Machine {
    pub id: String,
    pub name: Option<String>,
    pub category: Option<String>,
    pub categories: Option<String>,
    pub subcategory: Option<String>,
    pub subcategories: Option<String>,
    pub work_phase: Option<String>,
    pub work_phases: Option<String>,
    pub category_details: Option<String>,
    pub description: Option<String>,
    pub owner_id: Option<String>,
    pub image_url: Option<String>,
    pub active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable/patchable form of [`Machine`]. Always writes the full
/// taxonomy block.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::machines, treat_none_as_null = true)]
pub struct MachineRow {
    pub id: String,
    pub name: Option<String>,
    pub category: Option<String>,
    pub categories: Option<String>,
    pub subcategory: Option<String>,
    pub subcategories: Option<String>,
    pub work_phase: Option<String>,
    pub work_phases: Option<String>,
    pub category_details: Option<String>,
    pub description: Option<String>,
    pub owner_id: Option<String>,
    pub image_url: Option<String>,
    pub active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

fn decode<T: serde::de::DeserializeOwned>(
    value: Option<String>,
) -> Result<Option<T>, RepositoryError> {
    value
        .map(|raw| serde_json::from_str(&raw))
        .transpose()
        .map_err(RepositoryError::from)
}

impl TryFrom<Machine> for MachineDocument {
    type Error = RepositoryError;

    fn try_from(machine: Machine) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(MachineId::new(machine.id)?),
            name: machine.name,
            category: machine.category,
            categories: decode(machine.categories)?,
            subcategory: machine.subcategory,
            subcategories: decode(machine.subcategories)?,
            work_phase: machine.work_phase,
            work_phases: decode(machine.work_phases)?,
            category_details: decode(machine.category_details)?,
            description: machine.description,
            owner_id: stored_optional::<OwnerId>(machine.owner_id)?,
            image_url: stored_optional::<ImageUrl>(machine.image_url)?,
            active: Some(machine.active),
            created_at: Some(machine.created_at),
            updated_at: Some(machine.updated_at),
        })
    }
}

impl MachineRow {
    #[allow(clippy::too_many_arguments)]
    fn build(
        id: String,
        name: String,
        taxonomy: &Taxonomy,
        description: Option<String>,
        owner_id: Option<OwnerId>,
        image_url: Option<ImageUrl>,
        active: bool,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    ) -> Result<Self, RepositoryError> {
        Ok(Self {
            id,
            name: Some(name),
            category: Some(taxonomy.category().to_string()),
            categories: Some(serde_json::to_string(taxonomy.categories())?),
            subcategory: Some(taxonomy.subcategory().to_string()),
            subcategories: Some(serde_json::to_string(taxonomy.subcategories())?),
            work_phase: Some(taxonomy.work_phase().to_string()),
            work_phases: Some(serde_json::to_string(taxonomy.work_phases())?),
            category_details: Some(serde_json::to_string(taxonomy.category_details())?),
            description,
            owner_id: owner_id.map(String::from),
            image_url: image_url.map(String::from),
            active,
            created_at,
            updated_at,
        })
    }

    pub fn from_new(id: &MachineId, machine: &NewMachine) -> Result<Self, RepositoryError> {
        Self::build(
            id.to_string(),
            machine.name.to_string(),
            &machine.taxonomy,
            machine.description.clone(),
            machine.owner_id.clone(),
            machine.image_url.clone(),
            machine.active,
            machine.created_at,
            machine.updated_at,
        )
    }

    pub fn from_machine(machine: &DomainMachine) -> Result<Self, RepositoryError> {
        Self::build(
            machine.id.to_string(),
            machine.name.to_string(),
            &machine.taxonomy,
            machine.description.clone(),
            machine.owner_id.clone(),
            machine.image_url.clone(),
            machine.active,
            machine.created_at,
            machine.updated_at,
        )
    }
}
