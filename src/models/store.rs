use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::member::TeamMember;

/// Current schema version
pub const CURRENT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Store {
    pub version: u32,
    pub members: Vec<TeamMember>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            members: vec![],
        }
    }
}

impl Store {
    pub fn add_member(&mut self, member: TeamMember) {
        self.members.push(member);
    }

    pub fn get_member(&self, id: Uuid) -> Option<&TeamMember> {
        self.members.iter().find(|m| m.id == id)
    }

    /// Replaces the member with the same id, keeping its position.
    /// Returns false when no member has that id.
    pub fn replace_member(&mut self, member: TeamMember) -> bool {
        match self.members.iter_mut().find(|m| m.id == member.id) {
            Some(slot) => {
                *slot = member;
                true
            }
            None => false,
        }
    }

    pub fn remove_member(&mut self, id: Uuid) -> Option<TeamMember> {
        let index = self.members.iter().position(|m| m.id == id)?;
        Some(self.members.remove(index))
    }

    /// Exact id match first, then case-insensitive substring match on name.
    pub fn find_members<'a>(&'a self, id_or_name: &str) -> Vec<&'a TeamMember> {
        if let Ok(id) = id_or_name.parse::<Uuid>() {
            return self.get_member(id).into_iter().collect();
        }

        let needle = id_or_name.to_lowercase();
        self.members
            .iter()
            .filter(|m| m.name.to_lowercase().contains(&needle))
            .collect()
    }
}
