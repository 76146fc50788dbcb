//! End-to-end tests for the full flow pipeline.
//!
//! Each test exercises: fetch -> classify -> normalize -> diagram against a
//! `MemoryBackend` (or a wrapper around it) through `FlowLoader`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use pretty_assertions::assert_eq;
use tokio::sync::Notify;

use material_flow::model::ObjectRelationships;
use material_flow::{
    Error, FetchScope, FlowBackend, FlowConfig, FlowLoader, LoadOutcome, MemoryBackend, ObjectId,
    ParticipatingObject, RelationshipRecord, Result, Role, SankeyData,
};

// ============================================================================
// Helpers
// ============================================================================

fn edge(s: &str, o: &str, process: &str, qty: f64, unit: &str) -> RelationshipRecord {
    RelationshipRecord::new(s, o)
        .with_property("processName", process)
        .with_property("quantity", qty)
        .with_property("unit", unit)
}

/// Concrete production line: sand + cement + water -> mortar -> wall.
fn mortar_plant() -> MemoryBackend {
    let backend = MemoryBackend::new();
    for (id, name) in [
        ("sand", "Sand"),
        ("cement", "Cement"),
        ("water", "Water"),
        ("mortar", "Mortar"),
        ("wall", "Wall"),
    ] {
        backend.insert_object(ParticipatingObject::new(id).with_name(name));
    }
    backend.insert_relationship(edge("sand", "mortar", "Mix", 3.0, "kg"));
    backend.insert_relationship(edge("cement", "mortar", "Mix", 1.0, "kg"));
    backend.insert_relationship(edge("water", "mortar", "Mix", 0.5, "l"));
    backend.insert_relationship(edge("mortar", "wall", "Lay", 4.0, "kg"));
    backend
}

fn roles(outcome: LoadOutcome) -> Vec<(String, Role)> {
    outcome
        .ready()
        .expect("load was superseded")
        .diagram
        .nodes
        .into_iter()
        .map(|n| (n.id.0, n.role))
        .collect()
}

// ============================================================================
// 1. Global scope builds the whole diagram
// ============================================================================

#[tokio::test]
async fn test_global_flow() {
    let loader = FlowLoader::with_defaults(Arc::new(mortar_plant()));
    let outcome = loader.load(&FetchScope::Global).await.unwrap();

    assert_eq!(
        roles(outcome.clone()),
        vec![
            ("sand".to_string(), Role::Input),
            ("mortar".to_string(), Role::Intermediate),
            ("cement".to_string(), Role::Input),
            ("water".to_string(), Role::Input),
            ("wall".to_string(), Role::Output),
        ]
    );

    let flow = outcome.ready().unwrap();
    assert_eq!(flow.diagram.edges.len(), 4);
    assert_eq!(flow.diagram.edges[3].subject_name, "Mortar");
    assert_eq!(flow.diagram.edges[3].object_name, "Wall");
    assert_eq!(flow.skipped.total(), 0);
}

// ============================================================================
// 2. Object scope only sees the object's neighbourhood
// ============================================================================

#[tokio::test]
async fn test_object_scope() {
    let loader = FlowLoader::with_defaults(Arc::new(mortar_plant()));
    let outcome = loader.load(&FetchScope::object("wall")).await.unwrap();

    // Seen from the wall alone, the mortar is only ever an input.
    assert_eq!(
        roles(outcome),
        vec![("mortar".to_string(), Role::Input), ("wall".to_string(), Role::Output)]
    );
}

// ============================================================================
// 3. Deleted relationships are hidden unless requested
// ============================================================================

#[tokio::test]
async fn test_include_deleted() {
    let backend = mortar_plant();
    let id = backend.insert_relationship(edge("wall", "house", "Build", 1.0, "pcs"));
    backend.insert_object(ParticipatingObject::new("house").with_name("House"));
    backend.soft_delete_relationship(&id, Utc::now()).unwrap();
    let loader = FlowLoader::with_defaults(Arc::new(backend));

    let live = loader.load(&FetchScope::object("wall")).await.unwrap().ready().unwrap();
    assert!(live.diagram.node("house").is_none());
    assert_eq!(live.diagram.node("wall").map(|n| n.role), Some(Role::Output));

    let scope = FetchScope::Object { id: ObjectId::from("wall"), include_deleted: true };
    let all = loader.load(&scope).await.unwrap().ready().unwrap();
    assert_eq!(all.diagram.node("house").map(|n| n.role), Some(Role::Output));
    assert_eq!(all.diagram.node("wall").map(|n| n.role), Some(Role::Intermediate));

    // The global listing never shows deleted records.
    let global = loader.load(&FetchScope::Global).await.unwrap().ready().unwrap();
    assert!(global.diagram.node("house").is_none());
}

// ============================================================================
// 4. Malformed records are excluded, not fatal
// ============================================================================

#[tokio::test]
async fn test_malformed_records_are_skipped() {
    let backend = mortar_plant();
    backend.insert_relationship(edge("sand", "mortar", "  ", 1.0, "kg"));
    backend.insert_relationship(edge("ghost", "mortar", "Mix", 1.0, "kg"));
    backend.insert_relationship(edge("sand", "mortar", "Mix", 3.0, "kg"));
    backend.insert_relationship(
        RelationshipRecord::new("mortar", "wall")
            .with_property("processName", "Patch")
            .with_property("quantity", "lots")
            .with_property("unit", "kg"),
    );
    let loader = FlowLoader::with_defaults(Arc::new(backend));

    let flow = loader.load(&FetchScope::Global).await.unwrap().ready().unwrap();
    assert_eq!(flow.diagram.edges.len(), 5);
    assert_eq!(flow.diagram.edges[4].process_name, "Patch");
    assert_eq!(flow.diagram.edges[4].quantity, 0.0);
    assert!(flow.diagram.node("ghost").is_none());
    assert_eq!(flow.skipped.invalid_process_label, 1);
    assert_eq!(flow.skipped.unresolved_subject, 1);
    assert_eq!(flow.skipped.duplicate, 1);
}

// ============================================================================
// 5. Custom predicate and palette
// ============================================================================

#[tokio::test]
async fn test_custom_config() {
    let backend = MemoryBackend::new();
    backend.insert_object(ParticipatingObject::new("ore").with_name("Ore"));
    backend.insert_object(ParticipatingObject::new("ingot"));
    backend.insert_relationship(edge("ore", "ingot", "Smelt", 10.0, "t").with_predicate("FEEDS"));
    backend.insert_relationship(edge("ingot", "ore", "Ignored", 1.0, "t"));

    let config = FlowConfig::from_json_str(
        r#"{"predicate": "FEEDS", "unnamedLabel": "n/a", "palette": {"input": "gold"}}"#,
    )
    .unwrap();
    let loader = FlowLoader::new(Arc::new(backend), config).unwrap();

    let flow = loader.load(&FetchScope::Global).await.unwrap().ready().unwrap();
    assert_eq!(flow.diagram.node("ore").map(|n| n.color.as_str()), Some("gold"));
    assert_eq!(flow.diagram.node("ingot").map(|n| n.name.as_str()), Some("n/a"));
    assert_eq!(flow.diagram.edges.len(), 1);

    let sankey = SankeyData::from_diagram(&flow.diagram);
    assert_eq!(sankey.links.len(), 1);
    assert_eq!(sankey.links[0].value, 10.0);
}

#[test]
fn test_invalid_config_rejected() {
    let config = FlowConfig { predicate: String::new(), ..FlowConfig::default() };
    assert!(matches!(
        FlowLoader::new(Arc::new(MemoryBackend::new()), config),
        Err(Error::Config(_))
    ));
}

// ============================================================================
// 6. Upstream failures propagate
// ============================================================================

struct Unreachable;

#[async_trait]
impl FlowBackend for Unreachable {
    async fn relationships_by_predicate(&self, _predicate: &str) -> Result<Vec<RelationshipRecord>> {
        Err(Error::Backend("connection refused".into()))
    }

    async fn relationships_for_object(
        &self,
        _object_id: &ObjectId,
        _predicate: &str,
        _include_deleted: bool,
    ) -> Result<ObjectRelationships> {
        Err(Error::Backend("connection refused".into()))
    }

    async fn objects_by_ids(&self, _ids: &[ObjectId]) -> Result<Vec<ParticipatingObject>> {
        Err(Error::Backend("connection refused".into()))
    }
}

#[tokio::test]
async fn test_backend_failure_propagates() {
    let loader = FlowLoader::with_defaults(Arc::new(Unreachable));
    let err = loader.load(&FetchScope::Global).await.unwrap_err();
    assert!(err.is_upstream());
    assert!(loader.shutdown().await.is_ok());
}

// ============================================================================
// 7. Last request wins
// ============================================================================

/// Holds the first global relationship query until released.
struct Gated {
    inner: MemoryBackend,
    entered: Notify,
    release: Notify,
    calls: AtomicUsize,
}

#[async_trait]
impl FlowBackend for Gated {
    async fn relationships_by_predicate(&self, predicate: &str) -> Result<Vec<RelationshipRecord>> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            self.entered.notify_one();
            self.release.notified().await;
        }
        self.inner.relationships_by_predicate(predicate).await
    }

    async fn relationships_for_object(
        &self,
        object_id: &ObjectId,
        predicate: &str,
        include_deleted: bool,
    ) -> Result<ObjectRelationships> {
        self.inner.relationships_for_object(object_id, predicate, include_deleted).await
    }

    async fn objects_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<ParticipatingObject>> {
        self.inner.objects_by_ids(ids).await
    }
}

#[tokio::test]
async fn test_superseded_load_is_discarded() {
    let backend = Arc::new(Gated {
        inner: mortar_plant(),
        entered: Notify::new(),
        release: Notify::new(),
        calls: AtomicUsize::new(0),
    });
    let loader = Arc::new(FlowLoader::with_defaults(backend.clone()));

    let stale = tokio::spawn({
        let loader = loader.clone();
        async move { loader.load(&FetchScope::Global).await }
    });
    backend.entered.notified().await;

    let fresh = loader.load(&FetchScope::object("wall")).await.unwrap();
    backend.release.notify_one();
    let stale = stale.await.unwrap().unwrap();

    assert_eq!(stale, LoadOutcome::Superseded { generation: 1, latest: 2 });
    assert!(stale.is_superseded());

    let fresh = fresh.ready().unwrap();
    assert_eq!(fresh.diagram.nodes.len(), 2);
    assert_eq!(loader.latest_generation(), 2);
}

#[tokio::test]
async fn test_sequential_loads_are_never_superseded() {
    let loader = FlowLoader::with_defaults(Arc::new(mortar_plant()));
    for _ in 0..3 {
        assert!(!loader.load(&FetchScope::Global).await.unwrap().is_superseded());
    }
    assert_eq!(loader.latest_generation(), 3);
}
