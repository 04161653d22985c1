use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::thread;
use stencil_model::{ContentType, DocumentType, Resource, TemplateEntity};
use stencil_storage::{MemoryTemplateStore, StorageError, TemplateRepository};
use stencil_types::TemplateId;

fn make_entity(name: &str, summary: &str) -> TemplateEntity {
    TemplateEntity {
        id: None,
        name: name.to_string(),
        summary: summary.to_string(),
        doc_type: DocumentType::Template,
        content: ContentType::PlainText,
        resource: Resource {
            text: Some("Hi {{name}}".to_string()),
            url: None,
            variables: vec!["name".to_string()],
        },
    }
}

// ── Error type coverage ─────────────────────────────────────────

#[test]
fn error_display() {
    let err = StorageError::NotFound("id=abc".to_string());
    assert!(err.to_string().contains("id=abc"));
    assert!(format!("{err:?}").contains("NotFound"));
}

// ── Insert / find ───────────────────────────────────────────────

#[test]
fn insert_mints_identity() {
    let store = MemoryTemplateStore::new();
    let id = store.insert(make_entity("welcome", "Welcome mail")).unwrap();
    let found = store.find_by_id(id).unwrap();
    assert_eq!(found.id, Some(id));
    assert_eq!(found.name, "welcome");
    assert_eq!(store.len().unwrap(), 1);
}

#[test]
fn insert_ignores_caller_identity() {
    let store = MemoryTemplateStore::new();
    let forged = TemplateId::new();
    let mut entity = make_entity("x", "y");
    entity.id = Some(forged);
    let id = store.insert(entity).unwrap();
    assert_ne!(id, forged);
    assert!(matches!(store.find_by_id(forged), Err(StorageError::NotFound(_))));
}

#[test]
fn find_missing_id_is_not_found() {
    let store = MemoryTemplateStore::new();
    assert!(store.is_empty().unwrap());
    assert!(matches!(
        store.find_by_id(TemplateId::new()),
        Err(StorageError::NotFound(_))
    ));
}

#[test]
fn find_by_name_is_exact() {
    let store = MemoryTemplateStore::new();
    store.insert(make_entity("welcome", "a")).unwrap();
    assert!(store.find_by_name("welcome").is_ok());
    assert!(store.find_by_name("Welcome").is_err());
    assert!(store.find_by_name("welc").is_err());
}

#[test]
fn find_by_summary_is_case_insensitive_regex() {
    let store = MemoryTemplateStore::new();
    store.insert(make_entity("a", "Monthly INVOICE for customers")).unwrap();
    let found = store.find_by_summary("invoice").unwrap();
    assert_eq!(found.name, "a");
    assert!(store.find_by_summary("^monthly .* customers$").is_ok());
    assert!(store.find_by_summary("receipt").is_err());
}

#[test]
fn find_by_summary_returns_first_inserted_match() {
    let store = MemoryTemplateStore::new();
    store.insert(make_entity("first", "order shipped")).unwrap();
    store.insert(make_entity("second", "order delivered")).unwrap();
    assert_eq!(store.find_by_summary("order").unwrap().name, "first");
}

#[test]
fn find_by_summary_rejects_bad_pattern() {
    let store = MemoryTemplateStore::new();
    assert!(matches!(
        store.find_by_summary("(unclosed"),
        Err(StorageError::InvalidPattern(_))
    ));
}

// ── Update / delete ─────────────────────────────────────────────

#[test]
fn update_overwrites_everything_but_identity() {
    let store = MemoryTemplateStore::new();
    let id = store.insert(make_entity("old", "old summary")).unwrap();

    let mut replacement = make_entity("new", "new summary");
    replacement.resource.variables.clear();
    replacement.id = Some(TemplateId::new());
    store.update_by_id(id, replacement).unwrap();

    let found = store.find_by_id(id).unwrap();
    assert_eq!(found.id, Some(id));
    assert_eq!(found.name, "new");
    assert_eq!(found.summary, "new summary");
    assert!(found.resource.variables.is_empty());
}

#[test]
fn update_missing_is_not_found() {
    let store = MemoryTemplateStore::new();
    let err = store
        .update_by_id(TemplateId::new(), make_entity("a", "b"))
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound(_)));
}

#[test]
fn delete_removes() {
    let store = MemoryTemplateStore::new();
    let id = store.insert(make_entity("a", "b")).unwrap();
    store.delete_by_id(id).unwrap();
    assert!(store.find_by_id(id).is_err());
    assert!(matches!(store.delete_by_id(id), Err(StorageError::NotFound(_))));
}

// ── Sharing ─────────────────────────────────────────────────────

#[test]
fn concurrent_inserts_all_land() {
    let store: Arc<dyn TemplateRepository> = Arc::new(MemoryTemplateStore::new());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || store.insert(make_entity(&format!("t{i}"), "s")).unwrap())
        })
        .collect();
    let ids: Vec<TemplateId> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for id in ids {
        assert!(store.find_by_id(id).is_ok());
    }
}
