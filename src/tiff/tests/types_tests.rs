//! Tests for tag values and directories

extern crate std;

use crate::tiff::types::{TagDirectory, TagValue};

fn directory(names: &[&str]) -> TagDirectory {
    let mut tags = TagDirectory::new();
    for (i, name) in names.iter().enumerate() {
        tags.insert(*name, TagValue::Integer(i as i64));
    }
    tags
}

#[test]
fn test_insert_replaces_in_place() {
    let mut tags = directory(&["Make", "Model", "Orientation"]);
    let previous = tags.insert("Model", TagValue::Text("X-T2".to_string()));

    std::assert_eq!(previous, Some(TagValue::Integer(1)));
    std::assert_eq!(tags.names().collect::<Vec<_>>(), vec!["Make", "Model", "Orientation"]);
}

#[test]
fn test_remove_keeps_order() {
    let mut tags = directory(&["Make", "Model", "Orientation", "Software"]);

    std::assert_eq!(tags.remove("Model"), Some(TagValue::Integer(1)));
    std::assert_eq!(tags.remove("Model"), None);
    std::assert_eq!(tags.names().collect::<Vec<_>>(), vec!["Make", "Orientation", "Software"]);
    std::assert_eq!(tags.get_integer("Software"), Some(3));
}

#[test]
fn test_directory_equality_follows_order() {
    let forward = directory(&["Make", "Model"]);
    let mut backward = TagDirectory::new();
    backward.insert("Model", TagValue::Integer(1));
    backward.insert("Make", TagValue::Integer(0));

    std::assert_eq!(forward, directory(&["Make", "Model"]));
    std::assert_ne!(forward, backward);
}

#[test]
fn test_nan_reals_compare_equal() {
    std::assert_eq!(TagValue::Real(f64::NAN), TagValue::Real(f64::NAN));
    std::assert_eq!(TagValue::RealList(vec![1.0, f64::NAN]), TagValue::RealList(vec![1.0, f64::NAN]));
    std::assert_ne!(TagValue::Real(0.0), TagValue::Real(-0.0));
    std::assert_ne!(TagValue::RealList(vec![1.0]), TagValue::RealList(vec![1.0, 2.0]));
    std::assert_ne!(TagValue::Integer(1), TagValue::Real(1.0));
}
