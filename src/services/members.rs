use thiserror::Error;
use uuid::Uuid;

use crate::{
    models::{
        member::{
            MemberValidationError, ProductivityPeak, TeamMember, validate_location, validate_name,
            validate_time,
        },
        store::Store,
    },
    storage::{Storage, StorageError},
};

#[derive(Debug, Error)]
pub enum AddMemberError {
    #[error(transparent)]
    Invalid(#[from] MemberValidationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub struct AddMemberParameters {
    pub name: String,
    pub location: String,
    pub start: String,
    pub end: String,
    pub productivity_peak: ProductivityPeak,
}

pub fn add_member(
    store: &mut Store,
    storage: &impl Storage,
    parameters: AddMemberParameters,
) -> Result<TeamMember, AddMemberError> {
    let member = TeamMember::from_input(
        &parameters.name,
        &parameters.location,
        &parameters.start,
        &parameters.end,
        parameters.productivity_peak,
    )?;
    warn_if_inverted(&member);

    store.add_member(member.clone());
    storage.save(store)?;

    tracing::info!(id = %member.id, name = %member.name, "added team member");
    Ok(member)
}

#[derive(Debug, Error)]
pub enum UpdateMemberError {
    #[error("Member '{0}' not found")]
    MemberNotFound(String),

    #[error("Member name is ambiguous. Multiple members found: {}", .0.join(", "))]
    AmbiguousMemberName(Vec<String>),

    #[error(transparent)]
    Invalid(#[from] MemberValidationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Fields left as `None` keep their current value.
#[derive(Default)]
pub struct UpdateMemberParameters {
    pub id_or_name: String,
    pub name: Option<String>,
    pub location: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub productivity_peak: Option<ProductivityPeak>,
}

pub fn update_member(
    store: &mut Store,
    storage: &impl Storage,
    parameters: UpdateMemberParameters,
) -> Result<TeamMember, UpdateMemberError> {
    let id = match resolve_member(store, &parameters.id_or_name) {
        Ok(id) => id,
        Err(LookupFailure::NotFound) => {
            return Err(UpdateMemberError::MemberNotFound(parameters.id_or_name));
        }
        Err(LookupFailure::Ambiguous(names)) => {
            return Err(UpdateMemberError::AmbiguousMemberName(names));
        }
    };

    let mut updated = store
        .get_member(id)
        .cloned()
        .ok_or_else(|| UpdateMemberError::MemberNotFound(parameters.id_or_name.clone()))?;

    if let Some(name) = parameters.name {
        updated.name = validate_name(&name)?;
    }
    if let Some(location) = parameters.location {
        updated.location = validate_location(&location)?;
    }
    if let Some(start) = parameters.start {
        updated.working_hours.start = validate_time(&start)?;
    }
    if let Some(end) = parameters.end {
        updated.working_hours.end = validate_time(&end)?;
    }
    if let Some(peak) = parameters.productivity_peak {
        updated.productivity_peak = peak;
    }
    warn_if_inverted(&updated);

    store.replace_member(updated.clone());
    storage.save(store)?;

    tracing::info!(id = %updated.id, name = %updated.name, "updated team member");
    Ok(updated)
}

#[derive(Debug, Error)]
pub enum DeleteMemberError {
    #[error("Member '{0}' not found")]
    MemberNotFound(String),

    #[error("Member name is ambiguous. Multiple members found: {}", .0.join(", "))]
    AmbiguousMemberName(Vec<String>),

    #[error("Deletion of '{0}' was not confirmed")]
    NotConfirmed(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub struct DeleteMemberParameters {
    pub id_or_name: String,
}

/// Removes the member matching `id_or_name` once `confirm` accepts it.
/// Nothing is saved when confirmation is refused.
pub fn delete_member(
    store: &mut Store,
    storage: &impl Storage,
    parameters: DeleteMemberParameters,
    confirm: impl FnOnce(&TeamMember) -> bool,
) -> Result<TeamMember, DeleteMemberError> {
    let id = match resolve_member(store, &parameters.id_or_name) {
        Ok(id) => id,
        Err(LookupFailure::NotFound) => {
            return Err(DeleteMemberError::MemberNotFound(parameters.id_or_name));
        }
        Err(LookupFailure::Ambiguous(names)) => {
            return Err(DeleteMemberError::AmbiguousMemberName(names));
        }
    };

    let member = store
        .get_member(id)
        .ok_or_else(|| DeleteMemberError::MemberNotFound(parameters.id_or_name.clone()))?;
    if !confirm(member) {
        return Err(DeleteMemberError::NotConfirmed(member.name.clone()));
    }

    let removed = store
        .remove_member(id)
        .ok_or(DeleteMemberError::MemberNotFound(parameters.id_or_name))?;
    storage.save(store)?;

    tracing::info!(id = %removed.id, name = %removed.name, "deleted team member");
    Ok(removed)
}

enum LookupFailure {
    NotFound,
    Ambiguous(Vec<String>),
}

fn resolve_member(store: &Store, id_or_name: &str) -> Result<Uuid, LookupFailure> {
    let matching_members = store.find_members(id_or_name);

    match matching_members.len() {
        0 => Err(LookupFailure::NotFound),
        1 => Ok(matching_members[0].id),
        _ => {
            // An exact (case-insensitive) name wins over partial matches
            let exact: Vec<_> = matching_members
                .iter()
                .filter(|m| m.name.eq_ignore_ascii_case(id_or_name))
                .collect();
            if exact.len() == 1 {
                return Ok(exact[0].id);
            }
            Err(LookupFailure::Ambiguous(
                matching_members.iter().map(|m| m.name.clone()).collect(),
            ))
        }
    }
}

fn warn_if_inverted(member: &TeamMember) {
    if member.working_hours.is_inverted() {
        tracing::warn!(
            name = %member.name,
            hours = %member.working_hours,
            "working hours end before they start; this member will never be available"
        );
    }
}
