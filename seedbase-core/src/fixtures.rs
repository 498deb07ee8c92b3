// seedbase-core/src/fixtures.rs
//! The literal fixture dataset.
//!
//! Three collections of sample documents for bootstrapping a local
//! development or test database. Values are fixed; the dataset is the
//! same on every run. Hierarchical records are assembled through the
//! sync-preserving model API, so every record satisfies
//! [`ConfigRecord::validate`](crate::model::ConfigRecord::validate).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::model::{
    Complex, ConfigRecord, Group, Item, Metadata, NestedRecord, Resource, SimpleRecord,
};

pub const SIMPLE_COLLECTION: &str = "simple_records";
pub const NESTED_COLLECTION: &str = "nested_records";
pub const CONFIG_COLLECTION: &str = "config_resources";

/// Flat sample documents (4).
pub fn simple_records() -> Vec<SimpleRecord> {
    vec![
        SimpleRecord {
            key: "value1".to_string(),
            number: 12,
            flag: Some(true),
        },
        SimpleRecord {
            key: "value2".to_string(),
            number: 13,
            flag: Some(true),
        },
        SimpleRecord {
            key: "value3".to_string(),
            number: 14,
            flag: None,
        },
        SimpleRecord {
            key: "value4".to_string(),
            number: 15,
            flag: Some(true),
        },
    ]
}

/// Nested sample documents (3).
pub fn nested_records() -> Vec<NestedRecord> {
    vec![
        NestedRecord {
            complex: Complex {
                name: "homer".to_string(),
                array: vec![1, 2, 3, 4],
                hobbies: None,
            },
            flag: false,
        },
        NestedRecord {
            complex: Complex {
                name: "marge".to_string(),
                array: vec![1, 2, 3],
                hobbies: None,
            },
            flag: true,
        },
        NestedRecord {
            complex: Complex {
                name: "maggy".to_string(),
                array: vec![1, 2, 3],
                hobbies: Some(BTreeMap::from([
                    ("saxophon".to_string(), true),
                    ("skating".to_string(), false),
                ])),
            },
            flag: true,
        },
    ]
}

/// Hierarchical configuration resource documents (15).
pub fn config_records() -> Vec<ConfigRecord> {
    vec![
        config_record(
            "2024-01-09T08:17:15.831Z",
            "2024-02-08T13:09:47.559Z",
            3,
            &[
                (
                    "yyy",
                    &[
                        ("yyy_category", "2"),
                        ("yyy_situation", "1"),
                        ("yyy_localStrategy", "3"),
                    ][..],
                ),
                (
                    "xxx",
                    &[
                        ("xxx_schnulli", "1"),
                        ("xxx_nodeState", "1"),
                        ("xxx_individualTrafficDependentModification", "3"),
                    ][..],
                ),
            ],
            "fasfasöf asöd fasöldfösadfösdf",
            "5c46d5a7f28e45578c3e6221d08552b6",
            "a name",
            "48d387c4f3c14b308dc1a91dec1fe7e5",
        ),
        config_record(
            "2024-01-09T16:00:02.55Z",
            "2024-01-09T16:00:02.569Z",
            0,
            &[("yyy", &[("yyy_localStrategy", "2")][..])],
            "",
            "ace326c30361464b8c682ec694acb516",
            "Local2",
            "233b364b677e4f6dafcea43b53bdb126",
        ),
        config_record(
            "2024-01-09T16:00:15.551Z",
            "2024-01-09T16:00:15.569Z",
            0,
            &[("yyy", &[("yyy_local", "3")][..])],
            "",
            "07bfbe1aa8bf42c2bea246df94b5ad87",
            "Local3",
            "233b364b677e4f6dafcea43b53bdb126",
        ),
        config_record(
            "2024-01-10T08:58:22.139Z",
            "2024-01-10T08:58:22.158Z",
            0,
            &[("yyy", &[("yyy_localStrategy", "4")][..])],
            "",
            "853644d0a9f044ad8cdfb6dc9a7845ed",
            "Local4",
            "233b364b677e4f6dafcea43b53bdb126",
        ),
        config_record(
            "2024-01-10T09:47:00.599Z",
            "2024-01-23T15:04:25.812Z",
            2,
            &[("yyy", &[("yyy_category", "1")][..])],
            "Test command",
            "0b7835117bd840a6b9e6cf34a4607885",
            "Test name",
            "a5dddb893b9d4ae58340888f2d9e2dc8",
        ),
        config_record(
            "2024-01-11T07:38:00.397Z",
            "2024-01-11T07:38:01.071Z",
            0,
            &[("xxx", &[("xxx_nodeState", "enabled")][..])],
            "NodeState Enabled",
            "ce523ea0-f45b-438a-b135-199530eef6ee",
            "NS_Enabled",
            "48d387c4-f3c1-4b30-8dc1-a91dec1fe7e5",
        ),
        config_record(
            "2024-01-11T13:08:32.982Z",
            "2024-02-02T17:07:58.461Z",
            3,
            &[(
                "xxx",
                &[
                    ("xxx_schnulli", "1"),
                    ("xxx_nodeState", "ENABLED"),
                    ("xxx_intervention", "0"),
                ][..],
            )],
            "ThingXXXX",
            "718981e4-e0f1-4433-99bf-d9d924dccf7a",
            "P1, Enabled",
            "a5dddb89-3b9d-4ae5-8340-888f2d9e2dc8",
        ),
        config_record(
            "2024-01-15T08:55:39.733Z",
            "2024-01-15T12:23:00.649Z",
            1,
            &[
                ("xxx", &[("xxx_schnulli", "1")][..]),
                ("yyy", &[("yyy_localStrategy", "1")][..]),
            ],
            "",
            "a20a1055-8beb-447a-9746-9a8afde87fb4",
            "S01",
            "a5dddb89-3b9d-4ae5-8340-888f2d9e2dc8",
        ),
        config_record(
            "2024-01-15T08:55:52.092Z",
            "2024-01-15T12:23:13.663Z",
            1,
            &[
                ("xxx", &[("xxx_schnulli", "2")][..]),
                ("yyy", &[("yyy_localStrategy", "2")][..]),
            ],
            "",
            "69101d92-4b16-49b8-bc7a-410dd33c3cee",
            "S02",
            "a5dddb89-3b9d-4ae5-8340-888f2d9e2dc8",
        ),
        config_record(
            "2024-01-15T12:17:35.166Z",
            "2024-02-05T10:34:12.848Z",
            3,
            &[
                (
                    "yyy",
                    &[("yyy_localStrategy", "12"), ("yyy_busPriority", "12")][..],
                ),
                (
                    "xxx",
                    &[("xxx_schnulli", "3"), ("xxx_publicTransport", "21")][..],
                ),
            ],
            "S03",
            "be783abf-413c-4c2c-a80c-8752f0436f90",
            "S03",
            "a5dddb89-3b9d-4ae5-8340-888f2d9e2dc8",
        ),
        config_record(
            "2024-01-22T10:25:54.166Z",
            "2024-01-23T15:43:08.959Z",
            4,
            &[(
                "xxx",
                &[
                    ("xxx_schnulli", "1"),
                    ("xxx_nodeState", "ENABLED"),
                    ("xxx_subNodeState", "ENABLED"),
                ][..],
            )],
            "",
            "ac7e7a94-165b-4d80-a5c6-365e3b294c0e",
            "test P1",
            "a5dddb89-3b9d-4ae5-8340-888f2d9e2dc8",
        ),
        config_record(
            "2024-01-22T10:30:11.81Z",
            "2024-02-06T13:04:17.801Z",
            4,
            &[(
                "xxx",
                &[("xxx_schnulli", "2"), ("xxx_nodeState", "ENABLED")][..],
            )],
            "",
            "150aba60-869a-4d05-9cd1-fcf396d055b6",
            "P2",
            "a5dddb89-3b9d-4ae5-8340-888f2d9e2dc8",
        ),
        config_record(
            "2024-01-22T11:13:47.859Z",
            "2024-01-22T11:13:47.939Z",
            0,
            &[(
                "xxx",
                &[("xxx_schnulli", "8"), ("xxx_nodeState", "ENABLED")][..],
            )],
            "",
            "2ed9fac2-dd63-44d3-9807-1aad6c69fc64",
            "p8",
            "a5dddb89-3b9d-4ae5-8340-888f2d9e2dc8",
        ),
        config_record(
            "2024-01-22T13:01:28.836Z",
            "2024-01-22T13:01:28.899Z",
            0,
            &[("yyy", &[("yyy_localStrategy", "12")][..])],
            "Globa Thing C",
            "ae4f5010-f315-48fb-8a47-18bbc42f0984",
            "Global afasdfa",
            "a5dddb89-3b9d-4ae5-8340-888f2d9e2dc8",
        ),
        config_record(
            "2024-01-22T17:50:12.508Z",
            "2024-02-16T08:54:18.055Z",
            3,
            &[(
                "xxx",
                &[("xxx_schnulli", "1"), ("xxx_projectModification0", "2")][..],
            )],
            "test",
            "275a96a9-27f7-4c2d-83b9-34162a112d31",
            "test-command",
            "48d387c4-f3c1-4b30-8dc1-a91dec1fe7e5",
        ),
    ]
}

// Every fixture resource is a template on schema version "1" in state 0;
// only the hierarchy, timestamps, identity and naming vary.
fn config_record(
    created: &str,
    modified: &str,
    revision: u64,
    groups: &[(&str, &[(&str, &str)])],
    description: &str,
    guid: &str,
    name: &str,
    org_id: &str,
) -> ConfigRecord {
    let mut resource = Resource {
        identity_keys: Vec::new(),
        groups: BTreeMap::new(),
        description: description.to_string(),
        guid: id(guid),
        is_template: true,
        name: name.to_string(),
        org_id: id(org_id),
    };
    for (group_name, items) in groups {
        resource.insert_group(*group_name, group(items));
    }

    ConfigRecord {
        metadata: Metadata {
            created: ts(created),
            modified: ts(modified),
            revision,
            schema_version: "1".to_string(),
            state: 0,
        },
        resource,
    }
}

fn group(items: &[(&str, &str)]) -> Group {
    let mut group = Group::default();
    for (name, value) in items {
        let mut item = Item::default();
        item.set_parameter("value", *value);
        group.insert_item(*name, item);
    }
    group
}

fn ts(value: &str) -> DateTime<Utc> {
    value.parse().expect("fixture timestamp is valid RFC 3339")
}

fn id(value: &str) -> Uuid {
    Uuid::parse_str(value).expect("fixture identifier is a valid UUID")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::validate_dataset;
    use std::collections::BTreeSet;

    #[test]
    fn test_fixture_counts() {
        assert_eq!(simple_records().len(), 4);
        assert_eq!(nested_records().len(), 3);
        assert_eq!(config_records().len(), 15);
    }

    #[test]
    fn test_simple_record_literals() {
        let records = simple_records();
        assert_eq!(records[0].key, "value1");
        assert_eq!(records[0].number, 12);
        assert_eq!(records[0].flag, Some(true));
        // the one document that never set its flag
        assert_eq!(records[2].key, "value3");
        assert_eq!(records[2].flag, None);
    }

    #[test]
    fn test_nested_record_literals() {
        let records = nested_records();
        assert_eq!(records[0].complex.name, "homer");
        assert_eq!(records[0].complex.array, vec![1, 2, 3, 4]);
        assert!(records[0].complex.hobbies.is_none());
        assert!(!records[0].flag);

        let hobbies = records[2].complex.hobbies.as_ref().unwrap();
        assert_eq!(hobbies.get("saxophon"), Some(&true));
        assert_eq!(hobbies.get("skating"), Some(&false));
    }

    #[test]
    fn test_config_records_validate() {
        let records = config_records();
        for record in &records {
            record.validate().unwrap();
        }
        validate_dataset(&records).unwrap();
    }

    #[test]
    fn test_modified_never_precedes_created() {
        for record in config_records() {
            assert!(record.metadata.modified >= record.metadata.created);
        }
    }

    #[test]
    fn test_identity_keys_preserve_authoring_order() {
        let records = config_records();
        // first record lists yyy before xxx even though the map sorts them
        assert_eq!(
            records[0].resource.identity_keys,
            vec!["yyy".to_string(), "xxx".to_string()]
        );
        // S01 lists xxx first
        assert_eq!(
            records[7].resource.identity_keys,
            vec!["xxx".to_string(), "yyy".to_string()]
        );

        let yyy = &records[0].resource.groups["yyy"];
        assert_eq!(
            yyy.item_keys,
            vec![
                "yyy_category".to_string(),
                "yyy_situation".to_string(),
                "yyy_localStrategy".to_string(),
            ]
        );
    }

    #[test]
    fn test_org_ids_repeat_but_guids_do_not() {
        let records = config_records();
        let guids: BTreeSet<_> = records.iter().map(|r| r.resource.guid).collect();
        let orgs: BTreeSet<_> = records.iter().map(|r| r.resource.org_id).collect();
        assert_eq!(guids.len(), records.len());
        assert!(orgs.len() < records.len());
    }

    #[test]
    fn test_revisions_match_source_dataset() {
        let records = config_records();
        assert_eq!(records[0].metadata.revision, 3);
        assert_eq!(records[1].metadata.revision, 0);
        assert_eq!(records[10].metadata.revision, 4);
    }
}
