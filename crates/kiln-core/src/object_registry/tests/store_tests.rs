use std::sync::Arc;

use crate::object_registry::lifecycle::Phase;
use crate::object_registry::store::ObjectStore;
use crate::object_registry::traits::RegistryObject;

#[derive(Debug)]
struct Alpha(u32);

impl RegistryObject for Alpha {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

#[derive(Debug)]
struct Beta;

impl RegistryObject for Beta {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

#[test]
fn put_then_get_returns_instance() {
    let store = ObjectStore::new();
    let displaced = store.put("alpha", Arc::new(Alpha(1)), None);
    assert!(displaced.is_none());

    let found = store.get("alpha").expect("entry should exist");
    assert_eq!(found.type_name(), std::any::type_name::<Alpha>());
    assert!(store.contains("alpha"));
    assert_eq!(store.len(), 1);
}

#[test]
fn get_missing_key_returns_none() {
    let store = ObjectStore::new();
    assert!(store.get("missing").is_none());
    assert!(!store.contains("missing"));
    assert!(store.is_empty());
}

#[test]
fn put_replaces_existing_entry_and_returns_displaced() {
    let store = ObjectStore::new();
    store.put("alpha", Arc::new(Alpha(1)), None);
    let displaced = store.put("alpha", Arc::new(Alpha(2)), None);

    assert!(displaced.is_some());
    assert_eq!(store.len(), 1);

    let current = store.lookup_by_type::<Alpha>().expect("alpha should exist");
    assert_eq!(current.0, 2);
}

#[test]
fn replacement_resets_phase_reached() {
    let store = ObjectStore::new();
    store.put("alpha", Arc::new(Alpha(1)), None);
    store.set_phase_reached("alpha", Phase::Start);
    assert_eq!(store.phase_reached("alpha"), Some(Phase::Start));

    store.put("alpha", Arc::new(Alpha(2)), None);
    assert_eq!(store.phase_reached("alpha"), Some(Phase::NotInLifecycle));
}

#[test]
fn lookup_by_type_returns_first_in_insertion_order() {
    let store = ObjectStore::new();
    store.put("beta", Arc::new(Beta), None);
    store.put("first", Arc::new(Alpha(1)), None);
    store.put("second", Arc::new(Alpha(2)), None);

    let found = store.lookup_by_type::<Alpha>().expect("alpha should exist");
    assert_eq!(found.0, 1);
}

#[test]
fn lookup_all_by_type_preserves_insertion_order() {
    let store = ObjectStore::new();
    store.put("c", Arc::new(Alpha(3)), None);
    store.put("a", Arc::new(Alpha(1)), None);
    store.put("beta", Arc::new(Beta), None);
    store.put("b", Arc::new(Alpha(2)), None);

    let all = store.lookup_all_by_type::<Alpha>();
    let values: Vec<u32> = all.iter().map(|a| a.0).collect();
    assert_eq!(values, vec![3, 1, 2]);
}

#[test]
fn lookup_by_type_with_no_match_returns_none() {
    let store = ObjectStore::new();
    store.put("beta", Arc::new(Beta), None);
    assert!(store.lookup_by_type::<Alpha>().is_none());
    assert!(store.lookup_all_by_type::<Alpha>().is_empty());
}

#[test]
fn remove_detaches_entry() {
    let store = ObjectStore::new();
    store.put("alpha", Arc::new(Alpha(1)), None);
    store.put("beta", Arc::new(Beta), None);

    let removed = store.remove("alpha");
    assert!(removed.is_some());
    assert!(!store.contains("alpha"));
    assert_eq!(store.keys(), vec!["beta".to_string()]);

    assert!(store.remove("alpha").is_none());
}

#[test]
fn keys_follow_insertion_order() {
    let store = ObjectStore::new();
    store.put("z", Arc::new(Alpha(1)), None);
    store.put("a", Arc::new(Alpha(2)), None);
    store.put("m", Arc::new(Beta), None);

    assert_eq!(
        store.keys(),
        vec!["z".to_string(), "a".to_string(), "m".to_string()]
    );
}

#[test]
fn metadata_round_trips() {
    let store = ObjectStore::new();
    store.put("alpha", Arc::new(Alpha(1)), Some(Arc::new("bootstrap")));

    let metadata = store.metadata("alpha").expect("metadata should exist");
    let tag = metadata.downcast_ref::<&str>().expect("tag should be a &str");
    assert_eq!(*tag, "bootstrap");

    assert!(store.metadata("missing").is_none());
}
