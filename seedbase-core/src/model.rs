// seedbase-core/src/model.rs
//! Typed record shapes for the three fixture collections.
//!
//! The interesting shape is [`ConfigRecord`]: a versioned configuration
//! resource holding a two-level hierarchy of named groups, items and
//! parameters. At every level an ordered keys list indexes its sibling
//! map; the mutators here keep list and map in sync so a record built
//! through them always validates.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Invariant violations on a configuration resource record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("key list out of sync at {context}: listed but absent {missing:?}, present but unlisted {unexpected:?}")]
    KeyListMismatch {
        context: String,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("modified timestamp {modified} precedes created timestamp {created}")]
    ModifiedBeforeCreated {
        created: DateTime<Utc>,
        modified: DateTime<Utc>,
    },

    #[error("duplicate guid across records: {0}")]
    DuplicateGuid(Uuid),
}

/// Flat sample record (`simple_records` collection).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleRecord {
    pub key: String,
    pub number: i64,
    /// Absent (not null) in documents that never set it.
    #[serde(rename = "bool", skip_serializing_if = "Option::is_none")]
    pub flag: Option<bool>,
}

/// Nested sample record (`nested_records` collection).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestedRecord {
    pub complex: Complex,
    #[serde(rename = "bool")]
    pub flag: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Complex {
    pub name: String,
    pub array: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hobbies: Option<BTreeMap<String, bool>>,
}

/// Versioned hierarchical configuration resource
/// (`config_resources` collection).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigRecord {
    pub metadata: Metadata,
    pub resource: Resource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    /// Starts at 0 on creation, bumped on every in-place modification.
    pub revision: u64,
    pub schema_version: String,
    /// State code. Only 0 (active/draft) has been observed; the full
    /// enumeration is unknown, so this stays a plain integer.
    pub state: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Ordered index over the keys of `groups`.
    pub identity_keys: Vec<String>,
    pub groups: BTreeMap<String, Group>,
    pub description: String,
    /// Unique per record across the whole dataset.
    pub guid: Uuid,
    pub is_template: bool,
    pub name: String,
    /// Owning organization; shared by records of the same tenant.
    pub org_id: Uuid,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Ordered index over the keys of `items_map`.
    pub item_keys: Vec<String>,
    pub items_map: BTreeMap<String, Item>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Ordered index over the keys of `parameters_map`.
    pub parameter_keys: Vec<String>,
    /// Parameter values are strings even when they look numeric.
    pub parameters_map: BTreeMap<String, String>,
}

impl ConfigRecord {
    /// Record an in-place modification of `resource`: bump the revision
    /// and move the modified timestamp.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.metadata.revision += 1;
        self.metadata.modified = now;
    }

    /// Check every record-level invariant, reporting the first
    /// violation with its location.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.metadata.modified < self.metadata.created {
            return Err(ValidationError::ModifiedBeforeCreated {
                created: self.metadata.created,
                modified: self.metadata.modified,
            });
        }

        check_key_list(
            "resource.groups",
            &self.resource.identity_keys,
            self.resource.groups.keys(),
        )?;
        for (group_name, group) in &self.resource.groups {
            check_key_list(
                &format!("resource.groups.{group_name}.itemsMap"),
                &group.item_keys,
                group.items_map.keys(),
            )?;
            for (item_name, item) in &group.items_map {
                check_key_list(
                    &format!("resource.groups.{group_name}.itemsMap.{item_name}.parametersMap"),
                    &item.parameter_keys,
                    item.parameters_map.keys(),
                )?;
            }
        }
        Ok(())
    }
}

impl Resource {
    /// Add or replace a group, keeping `identity_keys` in sync.
    pub fn insert_group(&mut self, name: impl Into<String>, group: Group) {
        let name = name.into();
        if !self.groups.contains_key(&name) {
            self.identity_keys.push(name.clone());
        }
        self.groups.insert(name, group);
    }
}

impl Group {
    /// Add or replace an item, keeping `item_keys` in sync.
    pub fn insert_item(&mut self, name: impl Into<String>, item: Item) {
        let name = name.into();
        if !self.items_map.contains_key(&name) {
            self.item_keys.push(name.clone());
        }
        self.items_map.insert(name, item);
    }
}

impl Item {
    /// Set a parameter value, keeping `parameter_keys` in sync.
    pub fn set_parameter(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        if !self.parameters_map.contains_key(&name) {
            self.parameter_keys.push(name.clone());
        }
        self.parameters_map.insert(name, value.into());
    }
}

/// Check that GUIDs are pairwise distinct across a set of records.
pub fn validate_dataset(records: &[ConfigRecord]) -> Result<(), ValidationError> {
    let mut seen = BTreeSet::new();
    for record in records {
        if !seen.insert(record.resource.guid) {
            return Err(ValidationError::DuplicateGuid(record.resource.guid));
        }
    }
    Ok(())
}

fn check_key_list<'a>(
    context: &str,
    keys: &[String],
    map_keys: impl Iterator<Item = &'a String>,
) -> Result<(), ValidationError> {
    let listed: BTreeSet<&str> = keys.iter().map(String::as_str).collect();
    let present: BTreeSet<&str> = map_keys.map(String::as_str).collect();

    // a duplicate list entry is a mismatch even when the sets agree
    if listed.len() != keys.len() || listed != present {
        let missing = listed
            .difference(&present)
            .map(|s| s.to_string())
            .collect();
        let unexpected = present
            .difference(&listed)
            .map(|s| s.to_string())
            .collect();
        return Err(ValidationError::KeyListMismatch {
            context: context.to_string(),
            missing,
            unexpected,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_record() -> ConfigRecord {
        let mut item = Item::default();
        item.set_parameter("value", "1");

        let mut group = Group::default();
        group.insert_item("yyy_localStrategy", item);

        let mut resource = Resource {
            identity_keys: Vec::new(),
            groups: BTreeMap::new(),
            description: String::new(),
            guid: Uuid::new_v4(),
            is_template: true,
            name: "sample".to_string(),
            org_id: Uuid::new_v4(),
        };
        resource.insert_group("yyy", group);

        ConfigRecord {
            metadata: Metadata {
                created: Utc.with_ymd_and_hms(2024, 1, 9, 8, 0, 0).unwrap(),
                modified: Utc.with_ymd_and_hms(2024, 1, 9, 9, 0, 0).unwrap(),
                revision: 0,
                schema_version: "1".to_string(),
                state: 0,
            },
            resource,
        }
    }

    #[test]
    fn test_record_built_through_mutators_validates() {
        sample_record().validate().unwrap();
    }

    #[test]
    fn test_unlisted_group_fails_validation() {
        let mut record = sample_record();
        // bypass insert_group: map gains a key the list never saw
        record
            .resource
            .groups
            .insert("zzz".to_string(), Group::default());

        match record.validate().unwrap_err() {
            ValidationError::KeyListMismatch {
                context,
                missing,
                unexpected,
            } => {
                assert_eq!(context, "resource.groups");
                assert!(missing.is_empty());
                assert_eq!(unexpected, vec!["zzz".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_listed_but_absent_group_fails_validation() {
        let mut record = sample_record();
        record.resource.identity_keys.push("www".to_string());

        match record.validate().unwrap_err() {
            ValidationError::KeyListMismatch { missing, .. } => {
                assert_eq!(missing, vec!["www".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_item_key_drift_fails_validation() {
        let mut record = sample_record();
        record
            .resource
            .groups
            .get_mut("yyy")
            .unwrap()
            .item_keys
            .push("ghost".to_string());

        match record.validate().unwrap_err() {
            ValidationError::KeyListMismatch { context, .. } => {
                assert_eq!(context, "resource.groups.yyy.itemsMap");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parameter_key_drift_fails_validation() {
        let mut record = sample_record();
        record
            .resource
            .groups
            .get_mut("yyy")
            .unwrap()
            .items_map
            .get_mut("yyy_localStrategy")
            .unwrap()
            .parameters_map
            .insert("extra".to_string(), "x".to_string());

        match record.validate().unwrap_err() {
            ValidationError::KeyListMismatch { context, unexpected, .. } => {
                assert_eq!(
                    context,
                    "resource.groups.yyy.itemsMap.yyy_localStrategy.parametersMap"
                );
                assert_eq!(unexpected, vec!["extra".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_key_list_entry_fails_validation() {
        let mut record = sample_record();
        record.resource.identity_keys.push("yyy".to_string());
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_modified_before_created_fails_validation() {
        let mut record = sample_record();
        record.metadata.modified = record.metadata.created - chrono::Duration::seconds(1);
        assert!(matches!(
            record.validate().unwrap_err(),
            ValidationError::ModifiedBeforeCreated { .. }
        ));
    }

    #[test]
    fn test_touch_bumps_revision_and_modified() {
        let mut record = sample_record();
        let later = record.metadata.modified + chrono::Duration::hours(2);

        record.touch(later);

        assert_eq!(record.metadata.revision, 1);
        assert_eq!(record.metadata.modified, later);
        record.validate().unwrap();
    }

    #[test]
    fn test_insert_group_twice_keeps_single_key() {
        let mut record = sample_record();
        record.resource.insert_group("yyy", Group::default());

        assert_eq!(record.resource.identity_keys, vec!["yyy".to_string()]);
        record.validate().unwrap();
    }

    #[test]
    fn test_set_parameter_overwrites_without_duplicating_key() {
        let mut item = Item::default();
        item.set_parameter("value", "1");
        item.set_parameter("value", "2");

        assert_eq!(item.parameter_keys, vec!["value".to_string()]);
        assert_eq!(item.parameters_map.get("value"), Some(&"2".to_string()));
    }

    #[test]
    fn test_validate_dataset_rejects_shared_guid() {
        let first = sample_record();
        let mut second = sample_record();
        second.resource.guid = first.resource.guid;

        let err = validate_dataset(&[first, second]).unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateGuid(_)));
    }

    #[test]
    fn test_validate_dataset_allows_shared_org_id() {
        let first = sample_record();
        let mut second = sample_record();
        second.resource.org_id = first.resource.org_id;

        validate_dataset(&[first, second]).unwrap();
    }

    #[test]
    fn test_simple_record_omits_unset_flag() {
        let record = SimpleRecord {
            key: "value3".to_string(),
            number: 14,
            flag: None,
        };
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("bool").is_none());

        let record = SimpleRecord {
            key: "value1".to_string(),
            number: 12,
            flag: Some(true),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["bool"], serde_json::json!(true));
    }

    #[test]
    fn test_config_record_wire_field_names() {
        let record = sample_record();
        let value = serde_json::to_value(&record).unwrap();

        assert!(value["metadata"].get("schemaVersion").is_some());
        assert!(value["resource"].get("identityKeys").is_some());
        assert!(value["resource"].get("isTemplate").is_some());
        assert!(value["resource"].get("orgId").is_some());
        let group = &value["resource"]["groups"]["yyy"];
        assert!(group.get("itemKeys").is_some());
        assert!(group["itemsMap"]["yyy_localStrategy"].get("parameterKeys").is_some());
        assert_eq!(
            group["itemsMap"]["yyy_localStrategy"]["parametersMap"]["value"],
            serde_json::json!("1")
        );
    }
}
