use chrono::Utc;

use crate::domain::machine::{Machine, MachineInput, MachinePatch, NewMachine};
use crate::domain::types::{CategoryName, MachineId, OwnerId, WorkPhaseName};
use crate::normalizer::{normalize_for_create, normalize_for_update};
use crate::repository::{MachineListQuery, MachineReader, MachineWriter};
use crate::services::storage::ImageStore;

use super::{ServiceError, ServiceResult};

/// Normalize and persist a new machine.
pub fn create_machine<R>(input: MachineInput, repo: &R) -> ServiceResult<MachineId>
where
    R: MachineWriter,
{
    let normalized = normalize_for_create(&input)?;

    let now = Utc::now().naive_utc();
    let machine = NewMachine {
        name: normalized.name,
        taxonomy: normalized.taxonomy,
        description: input.description,
        owner_id: input.owner_id,
        image_url: input.image_url,
        active: input.active.unwrap_or(true),
        created_at: now,
        updated_at: now,
    };

    match repo.create_machine(&machine) {
        Ok(id) => {
            log::info!("Created machine {id}");
            Ok(id)
        }
        Err(e) => {
            log::error!("Failed to create machine: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Merge `patch` into the stored machine and write the result back.
pub fn update_machine<R>(id: &MachineId, patch: MachinePatch, repo: &R) -> ServiceResult<Machine>
where
    R: MachineReader + MachineWriter,
{
    let existing = match repo.get_machine_by_id(id) {
        Ok(Some(machine)) => machine,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get machine {id}: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let taxonomy = normalize_for_update(&existing.taxonomy, &patch.taxonomy)?;
    let machine = existing.apply(patch, taxonomy, Utc::now().naive_utc());

    match repo.update_machine(&machine) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => Ok(machine),
        Err(e) => {
            log::error!("Failed to update machine {id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn get_machine<R>(id: &MachineId, repo: &R) -> ServiceResult<Machine>
where
    R: MachineReader,
{
    match repo.get_machine_by_id(id) {
        Ok(Some(machine)) => Ok(machine),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get machine {id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

fn list_machines<R>(query: MachineListQuery, repo: &R) -> ServiceResult<Vec<Machine>>
where
    R: MachineReader,
{
    repo.list_machines(query).map_err(|e| {
        log::error!("Failed to list machines: {e}");
        ServiceError::Internal
    })
}

pub fn list_machines_by_owner<R>(owner_id: OwnerId, repo: &R) -> ServiceResult<Vec<Machine>>
where
    R: MachineReader,
{
    list_machines(MachineListQuery::default().owner(owner_id), repo)
}

/// Machines whose `categories` list contains `category`.
pub fn list_machines_by_category<R>(
    category: CategoryName,
    repo: &R,
) -> ServiceResult<Vec<Machine>>
where
    R: MachineReader,
{
    list_machines(MachineListQuery::default().category(category), repo)
}

/// Machines whose `work_phases` list contains `work_phase`.
pub fn list_machines_by_work_phase<R>(
    work_phase: WorkPhaseName,
    repo: &R,
) -> ServiceResult<Vec<Machine>>
where
    R: MachineReader,
{
    list_machines(MachineListQuery::default().work_phase(work_phase), repo)
}

/// Delete a machine and then, best effort, its images under `machines/{id}`.
pub fn delete_machine<R, S>(id: &MachineId, repo: &R, images: &S) -> ServiceResult<()>
where
    R: MachineWriter,
    S: ImageStore,
{
    match repo.delete_machine(id) {
        Ok(0) => return Err(ServiceError::NotFound),
        Ok(_) => {}
        Err(e) => {
            log::error!("Failed to delete machine {id}: {e}");
            return Err(ServiceError::Internal);
        }
    }

    let folder = format!("machines/{id}");
    if let Err(e) = images.delete_object(&folder) {
        log::warn!("Failed to delete images in {folder}: {e}");
    }

    Ok(())
}
