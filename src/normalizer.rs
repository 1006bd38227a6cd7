//! Taxonomy normalization for machines.
//!
//! Every path that writes a machine (creation, update and the one-shot
//! backfill) goes through this module so that the plural lists, the derived
//! singular fields and the `categoryDetails` map always agree. All functions
//! are pure: they read their arguments and return a new value.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::domain::machine::{Machine, MachineDocument, MachineInput, TaxonomyPatch};
use crate::domain::taxonomy::{
    CONSTRUCTION_TAG, CategoryDetail, CategoryDetails, Taxonomy,
};
use crate::domain::types::{CategoryName, MachineName, SubcategoryName, WorkPhaseName};

/// Invariant violations reported by the normalizer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("machine name is required")]
    MissingName,
    #[error("machine must belong to at least one category")]
    EmptyCategories,
    #[error("stored machine has no id")]
    MissingId,
}

/// Validated name and taxonomy of a machine about to be created.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedMachine {
    pub name: MachineName,
    pub taxonomy: Taxonomy,
}

/// Normalize caller supplied data for a new machine.
pub fn normalize_for_create(input: &MachineInput) -> Result<NormalizedMachine, ValidationError> {
    let name = input
        .name
        .as_deref()
        .and_then(|name| MachineName::new(name).ok())
        .ok_or(ValidationError::MissingName)?;

    let categories = category_set(
        input
            .categories
            .iter()
            .flatten()
            .map(String::as_str)
            .chain(input.category.as_deref()),
    );
    let subcategories =
        plural_or_singular(input.subcategories.as_deref(), input.subcategory.as_deref());
    let work_phases = plural_or_singular(input.work_phases.as_deref(), input.work_phase.as_deref());

    let mut seed = CategoryDetail::primary();
    if let Some(category) = non_blank(input.category.as_deref()) {
        seed.additional_info
            .insert("originalCategory".to_string(), category.into());
    }
    if let Some(subcategory) = non_blank(input.subcategory.as_deref()) {
        seed.additional_info
            .insert("originalSubcategory".to_string(), subcategory.into());
    }

    let taxonomy = assemble(
        categories,
        subcategories,
        work_phases,
        input.category_details.clone().unwrap_or_default(),
        seed,
    )?;

    Ok(NormalizedMachine { name, taxonomy })
}

/// Merge `patch` over an already normalized taxonomy.
///
/// List fields in the patch replace the stored lists. A singular
/// `work_phase` collapses `work_phases` to that single phase.
pub fn normalize_for_update(
    existing: &Taxonomy,
    patch: &TaxonomyPatch,
) -> Result<Taxonomy, ValidationError> {
    merge(existing, patch, CategoryDetail::primary())
}

/// Rewrite a stored, possibly legacy-shaped record into a normalized
/// taxonomy. Running it on its own output yields the same value.
pub fn migrate_legacy_record(record: &MachineDocument) -> Result<Taxonomy, ValidationError> {
    let categories = record
        .categories
        .iter()
        .flatten()
        .map(String::as_str)
        .chain(record.category.as_deref())
        .map(str::to_string)
        .collect();

    let subcategories = plural_or_singular::<SubcategoryName>(
        record.subcategories.as_deref(),
        record.subcategory.as_deref(),
    );
    let work_phases = clean_list::<WorkPhaseName>(record.work_phases.iter().flatten());

    let patch = TaxonomyPatch {
        categories: Some(categories),
        subcategories: Some(subcategories.iter().map(|s| s.to_string()).collect()),
        work_phase: if work_phases.is_empty() {
            record.work_phase.clone()
        } else {
            None
        },
        work_phases: (!work_phases.is_empty())
            .then(|| work_phases.iter().map(|p| p.to_string()).collect()),
        category_details: record.category_details.clone(),
    };

    let seed = CategoryDetail {
        primary_category: true,
        subcategories: patch.subcategories.clone().unwrap_or_default(),
        ..CategoryDetail::default()
    };

    merge(&empty_defaults(), &patch, seed)
}

/// Hydrate a stored record into a [`Machine`], migrating its taxonomy.
pub fn machine_from_document(
    record: MachineDocument,
    now: NaiveDateTime,
) -> Result<Machine, ValidationError> {
    let taxonomy = migrate_legacy_record(&record)?;
    let id = record.id.ok_or(ValidationError::MissingId)?;
    let name = record
        .name
        .as_deref()
        .and_then(|name| MachineName::new(name).ok())
        .ok_or(ValidationError::MissingName)?;

    let created_at = record.created_at.unwrap_or(now);
    Ok(Machine {
        id,
        name,
        taxonomy,
        description: record.description,
        owner_id: record.owner_id,
        image_url: record.image_url,
        active: record.active.unwrap_or(true),
        created_at,
        updated_at: record.updated_at.unwrap_or(created_at),
    })
}

fn merge(
    existing: &Taxonomy,
    patch: &TaxonomyPatch,
    seed: CategoryDetail,
) -> Result<Taxonomy, ValidationError> {
    let categories = match &patch.categories {
        Some(categories) => category_set(categories.iter().map(String::as_str)),
        None => existing.categories().to_vec(),
    };

    let mut details = existing.category_details().clone();
    if let Some(patch_details) = &patch.category_details {
        for (key, detail) in patch_details {
            details.insert(key.clone(), detail.clone());
        }
    }

    let work_phases = if let Some(phase) = non_blank(patch.work_phase.as_deref()) {
        // Singular updates collapse the list to one phase.
        details.entry(phase.to_string()).or_default();
        clean_list::<WorkPhaseName>([phase])
    } else if let Some(phases) = &patch.work_phases {
        clean_list(phases)
    } else {
        existing.work_phases().to_vec()
    };

    let subcategories = match &patch.subcategories {
        Some(subcategories) => clean_list(subcategories),
        None => existing.subcategories().to_vec(),
    };

    assemble(categories, subcategories, work_phases, details, seed)
}

/// Enforce the detail map invariants and build the final value.
///
/// Entries keyed by something that is neither a category nor a work phase are
/// dropped, the primary category gets `seed` when it has no entry yet and only
/// that entry keeps `primary_category` set.
fn assemble(
    categories: Vec<CategoryName>,
    subcategories: Vec<SubcategoryName>,
    work_phases: Vec<WorkPhaseName>,
    mut details: CategoryDetails,
    seed: CategoryDetail,
) -> Result<Taxonomy, ValidationError> {
    let primary = categories
        .first()
        .ok_or(ValidationError::EmptyCategories)?
        .to_string();

    details.retain(|key, _| {
        categories.iter().any(|c| c.as_str() == key.as_str())
            || work_phases.iter().any(|p| p.as_str() == key.as_str())
    });
    details.entry(primary.clone()).or_insert(seed);
    for (key, detail) in details.iter_mut() {
        detail.primary_category = *key == primary;
    }

    Ok(Taxonomy::from_parts(
        categories,
        subcategories,
        work_phases,
        details,
    ))
}

fn empty_defaults() -> Taxonomy {
    Taxonomy::from_parts(
        category_set(std::iter::empty()),
        Vec::new(),
        Vec::new(),
        CategoryDetails::new(),
    )
}

/// Literal tag first, then `values` in first-seen order.
fn category_set<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<CategoryName> {
    clean_list(std::iter::once(CONSTRUCTION_TAG).chain(values))
}

/// Trim, drop blanks and duplicates, keep first-seen order.
fn clean_list<T>(values: impl IntoIterator<Item = impl AsRef<str>>) -> Vec<T>
where
    T: for<'s> TryFrom<&'s str> + PartialEq,
{
    let mut out: Vec<T> = Vec::new();
    for value in values {
        if let Ok(item) = T::try_from(value.as_ref()) {
            if !out.contains(&item) {
                out.push(item);
            }
        }
    }
    out
}

/// The cleaned list when it has entries, else the singular value, else empty.
fn plural_or_singular<T>(plural: Option<&[String]>, singular: Option<&str>) -> Vec<T>
where
    T: for<'s> TryFrom<&'s str> + PartialEq,
{
    let list = clean_list::<T>(plural.into_iter().flatten());
    if !list.is_empty() {
        return list;
    }
    clean_list(singular)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::taxonomy::InfoValue;

    fn names<T: AsRef<str>>(values: &[T]) -> Vec<&str> {
        values.iter().map(AsRef::as_ref).collect()
    }

    fn input(name: &str) -> MachineInput {
        MachineInput {
            name: Some(name.to_string()),
            ..MachineInput::default()
        }
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn primaries(taxonomy: &Taxonomy) -> Vec<&str> {
        taxonomy
            .category_details()
            .iter()
            .filter(|(_, detail)| detail.primary_category)
            .map(|(key, _)| key.as_str())
            .collect()
    }

    #[test]
    fn create_from_legacy_fields() {
        let mut data = input("Escavadeira X");
        data.category = Some("earth-moving".into());
        data.subcategory = Some("excavators".into());

        let normalized = normalize_for_create(&data).unwrap();
        let taxonomy = &normalized.taxonomy;

        assert_eq!(normalized.name, "Escavadeira X");
        assert_eq!(names(taxonomy.categories()), ["construction", "earth-moving"]);
        assert_eq!(taxonomy.category(), "construction");
        assert_eq!(names(taxonomy.subcategories()), ["excavators"]);
        assert_eq!(taxonomy.subcategory(), "excavators");
        assert!(taxonomy.work_phases().is_empty());
        assert_eq!(taxonomy.work_phase(), "");

        let primary = &taxonomy.category_details()["construction"];
        assert!(primary.primary_category);
        assert_eq!(
            primary.additional_info["originalCategory"],
            InfoValue::from("earth-moving")
        );
        assert_eq!(
            primary.additional_info["originalSubcategory"],
            InfoValue::from("excavators")
        );
    }

    #[test]
    fn create_requires_name() {
        assert_eq!(
            normalize_for_create(&MachineInput::default()).unwrap_err(),
            ValidationError::MissingName
        );
        assert_eq!(
            normalize_for_create(&input("   ")).unwrap_err(),
            ValidationError::MissingName
        );
    }

    #[test]
    fn create_deduplicates_categories_in_first_seen_order() {
        let mut data = input("Rolo");
        data.categories = Some(strings(&["compaction", "construction", " compaction ", ""]));
        data.category = Some("paving".into());

        let taxonomy = normalize_for_create(&data).unwrap().taxonomy;
        assert_eq!(
            names(taxonomy.categories()),
            ["construction", "compaction", "paving"]
        );
    }

    #[test]
    fn create_prefers_plural_work_phases() {
        let mut data = input("Betoneira");
        data.work_phases = Some(strings(&["Fundação", "Estrutura e alvenaria"]));
        data.work_phase = Some("Acabamento".into());

        let taxonomy = normalize_for_create(&data).unwrap().taxonomy;
        assert_eq!(
            names(taxonomy.work_phases()),
            ["Fundação", "Estrutura e alvenaria"]
        );
        assert_eq!(taxonomy.work_phase(), "Fundação");
    }

    #[test]
    fn create_falls_back_to_singular_when_plural_is_empty() {
        let mut data = input("Betoneira");
        data.work_phases = Some(vec![]);
        data.work_phase = Some("Acabamento".into());

        let taxonomy = normalize_for_create(&data).unwrap().taxonomy;
        assert_eq!(names(taxonomy.work_phases()), ["Acabamento"]);
    }

    #[test]
    fn create_keeps_supplied_details_and_clears_stale_primaries() {
        let mut data = input("Escavadeira");
        data.categories = Some(strings(&["construction", "excavation"]));
        let mut details = CategoryDetails::new();
        let mut construction = CategoryDetail::primary();
        construction
            .additional_info
            .insert("specialization".into(), "Heavy Machinery".into());
        details.insert("construction".into(), construction);
        details.insert("excavation".into(), CategoryDetail::primary());
        details.insert("unrelated".into(), CategoryDetail::default());
        data.category_details = Some(details);

        let taxonomy = normalize_for_create(&data).unwrap().taxonomy;
        assert_eq!(primaries(&taxonomy), ["construction"]);
        assert_eq!(
            taxonomy.category_details()["construction"].additional_info["specialization"],
            InfoValue::from("Heavy Machinery")
        );
        assert!(!taxonomy.category_details().contains_key("unrelated"));
        assert!(taxonomy.category_details().contains_key("excavation"));
    }

    #[test]
    fn update_replaces_categories() {
        let mut data = input("Escavadeira");
        data.categories = Some(strings(&["construction", "mining"]));
        let existing = normalize_for_create(&data).unwrap().taxonomy;

        let patch = TaxonomyPatch {
            categories: Some(strings(&["forestry"])),
            ..TaxonomyPatch::default()
        };
        let updated = normalize_for_update(&existing, &patch).unwrap();

        assert_eq!(names(updated.categories()), ["construction", "forestry"]);
    }

    #[test]
    fn update_collapses_phases_on_singular_work_phase() {
        let mut data = input("Escavadeira");
        data.work_phases = Some(strings(&["foundation", "earthwork"]));
        let existing = normalize_for_create(&data).unwrap().taxonomy;

        let patch = TaxonomyPatch {
            work_phase: Some("finishing".into()),
            ..TaxonomyPatch::default()
        };
        let updated = normalize_for_update(&existing, &patch).unwrap();

        assert_eq!(names(updated.work_phases()), ["finishing"]);
        assert_eq!(updated.work_phase(), "finishing");
        let phase_entry = &updated.category_details()["finishing"];
        assert!(phase_entry.additional_info.is_empty());
        assert!(!phase_entry.primary_category);
    }

    #[test]
    fn update_keeps_absent_fields() {
        let mut data = input("Gerador");
        data.subcategories = Some(strings(&["Geradores"]));
        data.work_phase = Some("Canteiro de obras".into());
        let existing = normalize_for_create(&data).unwrap().taxonomy;

        let updated = normalize_for_update(&existing, &TaxonomyPatch::default()).unwrap();
        assert_eq!(updated, existing);
    }

    #[test]
    fn update_merges_details_and_reasserts_primary() {
        let existing = normalize_for_create(&input("Guincho")).unwrap().taxonomy;

        let mut details = CategoryDetails::new();
        details.insert(
            "construction".into(),
            CategoryDetail {
                description: Some("Obras civis".into()),
                ..CategoryDetail::default()
            },
        );
        details.insert("elevation".into(), CategoryDetail::primary());
        let patch = TaxonomyPatch {
            categories: Some(strings(&["elevation"])),
            category_details: Some(details),
            ..TaxonomyPatch::default()
        };
        let updated = normalize_for_update(&existing, &patch).unwrap();

        assert_eq!(primaries(&updated), ["construction"]);
        assert_eq!(
            updated.category_details()["construction"].description.as_deref(),
            Some("Obras civis")
        );
    }

    #[test]
    fn migrates_singular_only_record() {
        let record = MachineDocument {
            name: Some("Compactador".into()),
            category: Some("compaction".into()),
            subcategory: Some("Placas Vibratórias".into()),
            work_phase: Some("Fundação".into()),
            ..MachineDocument::default()
        };

        let taxonomy = migrate_legacy_record(&record).unwrap();
        assert_eq!(names(taxonomy.categories()), ["construction", "compaction"]);
        assert_eq!(names(taxonomy.subcategories()), ["Placas Vibratórias"]);
        assert_eq!(names(taxonomy.work_phases()), ["Fundação"]);

        let primary = &taxonomy.category_details()["construction"];
        assert!(primary.primary_category);
        assert_eq!(primary.subcategories, ["Placas Vibratórias"]);
        assert!(primary.additional_info.is_empty());
    }

    #[test]
    fn migration_is_idempotent_for_multi_phase_record() {
        let record = MachineDocument {
            id: Some("m-1".try_into().unwrap()),
            name: Some("Betoneira".into()),
            categories: Some(strings(&["concrete"])),
            work_phases: Some(strings(&["Fundação", "Estrutura e alvenaria"])),
            ..MachineDocument::default()
        };
        let now = chrono::DateTime::from_timestamp(0, 0).unwrap().naive_utc();

        let first = machine_from_document(record, now).unwrap();
        let second = machine_from_document(MachineDocument::from(first.clone()), now).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            names(second.taxonomy.work_phases()),
            ["Fundação", "Estrutura e alvenaria"]
        );
    }

    #[test]
    fn hydration_requires_id_and_name() {
        let now = chrono::DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        let record = MachineDocument {
            name: Some("Serra".into()),
            ..MachineDocument::default()
        };
        assert_eq!(
            machine_from_document(record, now).unwrap_err(),
            ValidationError::MissingId
        );

        let record = MachineDocument {
            id: Some("m-2".try_into().unwrap()),
            ..MachineDocument::default()
        };
        assert_eq!(
            machine_from_document(record, now).unwrap_err(),
            ValidationError::MissingName
        );
    }
}
