use chrono::Utc;
use stayguard_common::types::{GroupDraft, GroupUpdate, Property, PropertyGroup, RuleScope};

use crate::error::{Result, StorageError};
use crate::store::RuleStore;

fn not_found(id: &str) -> StorageError {
    StorageError::NotFound {
        entity: "property_group",
        id: id.to_string(),
    }
}

fn check_group(group: &PropertyGroup) -> Result<()> {
    if group.name.trim().is_empty() {
        return Err(StorageError::InvalidGroup("name must not be empty".into()));
    }
    if let Some(criteria) = &group.criteria {
        if let (Some(min), Some(max)) = (criteria.min_capacity, criteria.max_capacity) {
            if min > max {
                return Err(StorageError::InvalidGroup(format!(
                    "min_capacity {min} exceeds max_capacity {max}"
                )));
            }
        }
    }
    Ok(())
}

impl RuleStore {
    /// Creates a group, keeping the draft's id when it provides one.
    pub fn create_group(&mut self, draft: GroupDraft) -> Result<PropertyGroup> {
        let id = match draft.id {
            Some(id) if !id.trim().is_empty() => id,
            _ => self.ids.next_id(),
        };
        if self.get_group(&id).is_some() {
            return Err(StorageError::AlreadyExists {
                entity: "property_group",
                id,
            });
        }

        let now = Utc::now();
        let group = PropertyGroup {
            id,
            name: draft.name,
            description: draft.description,
            entity_ids: draft.entity_ids,
            criteria: draft.criteria,
            created_at: now,
            updated_at: now,
        };
        check_group(&group)?;
        tracing::info!(group_id = %group.id, group_name = %group.name, "Property group created");
        self.groups.push(group.clone());
        Ok(group)
    }

    pub fn get_group(&self, id: &str) -> Option<&PropertyGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Groups whose name contains `search`, case-insensitively.
    pub fn list_groups(&self, search: Option<&str>) -> Vec<&PropertyGroup> {
        let needle = search.map(|s| s.trim().to_lowercase()).unwrap_or_default();
        self.groups
            .iter()
            .filter(|g| needle.is_empty() || g.name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn update_group(&mut self, id: &str, update: GroupUpdate) -> Result<PropertyGroup> {
        let mut candidate = self.get_group(id).cloned().ok_or_else(|| not_found(id))?;
        if let Some(v) = update.name {
            candidate.name = v;
        }
        if let Some(v) = update.description {
            candidate.description = v;
        }
        if let Some(v) = update.entity_ids {
            candidate.entity_ids = v;
        }
        if let Some(v) = update.criteria {
            candidate.criteria = v;
        }
        check_group(&candidate)?;
        candidate.updated_at = Utc::now();

        let slot = self
            .groups
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| not_found(id))?;
        *slot = candidate.clone();
        Ok(candidate)
    }

    /// Deletes a group that no rule is scoped to.
    pub fn delete_group(&mut self, id: &str) -> Result<PropertyGroup> {
        let pos = self
            .groups
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| not_found(id))?;

        let rule_ids = self.rules_in_group(id);
        if !rule_ids.is_empty() {
            tracing::warn!(group_id = %id, rules = ?rule_ids, "Refusing to delete referenced group");
            return Err(StorageError::GroupInUse {
                id: id.to_string(),
                rule_ids,
            });
        }

        Ok(self.groups.remove(pos))
    }

    /// Ids of the rules scoped to the group.
    pub fn rules_in_group(&self, group_id: &str) -> Vec<String> {
        self.rules
            .iter()
            .filter(|r| matches!(&r.scope, RuleScope::Group { group_id: g } if g == group_id))
            .map(|r| r.id.clone())
            .collect()
    }

    /// Properties belonging to the group: explicit members plus criteria matches.
    pub fn group_members<'p>(
        &self,
        group_id: &str,
        properties: &'p [Property],
    ) -> Result<Vec<&'p Property>> {
        let group = self.get_group(group_id).ok_or_else(|| not_found(group_id))?;
        Ok(properties.iter().filter(|p| group.contains(p)).collect())
    }
}
