use portal_app::cli::Action;
use portal_app::domain::types::{DATASET_SLOT, PanelView};
use portal_app::infra::memory_store::MemorySlotStore;
use portal_app::render::MISSING_DEPARTMENT;
use portal_app::state::Portal;
use portal_app::usecase::store::LoadDatasetUseCase;
use portal_domain::account::Role;
use portal_domain::dataset::{Dataset, SEED_ADMIN_EMAIL, SEED_ADMIN_PASSWORD};
use portal_domain::request::RequestStatus;
use portal_testing::fixture::Fixture;

use crate::helpers::{RecordingSurface, login, stored_dataset};

const LEGACY: &str = "fixtures/legacy_dataset.json";

#[tokio::test]
async fn should_load_document_written_by_legacy_page() {
    let store = MemorySlotStore::new();
    store.insert(DATASET_SLOT, &Fixture::text(LEGACY));

    let dataset = LoadDatasetUseCase { store: &store }.execute().await;
    assert_eq!(dataset.accounts.len(), 3);
    assert_eq!(dataset.accounts[0].role, Role::Admin);
    assert!(!dataset.accounts[2].verified);
    assert_eq!(dataset.requests[1].status, RequestStatus::Approved);
    assert_eq!(dataset.requests[0].kind, "Equipment");
}

#[tokio::test]
async fn should_keep_legacy_field_names_when_saving() {
    let store = MemorySlotStore::new();
    store.insert(DATASET_SLOT, &Fixture::text(LEGACY));
    let mut portal = Portal::start(store, RecordingSurface::default(), "/").await;
    login(&mut portal, SEED_ADMIN_EMAIL, SEED_ADMIN_PASSWORD).await;
    assert!(portal.persist().await);

    let written: serde_json::Value =
        serde_json::from_str(&portal.store.peek(DATASET_SLOT).unwrap()).unwrap();
    let legacy = Fixture::load(LEGACY);
    assert_eq!(written, legacy);
}

#[tokio::test]
async fn should_render_dangling_references_in_legacy_data() {
    let store = MemorySlotStore::new();
    store.insert(DATASET_SLOT, &Fixture::text(LEGACY));
    let mut portal = Portal::start(store, RecordingSurface::default(), "/").await;
    login(&mut portal, SEED_ADMIN_EMAIL, SEED_ADMIN_PASSWORD).await;

    portal.apply(Action::Go("#/employees".into())).await;
    let (_, PanelView::Employees(rows)) = portal.surface.last_panel() else {
        panic!("expected employees panel");
    };
    assert_eq!(rows[0].name, "Jamie Cruz");
    assert_eq!(rows[0].department, "Engineering");
    assert_eq!(rows[1].name, "former@example.com");
    assert_eq!(rows[1].department, MISSING_DEPARTMENT);
}

#[tokio::test]
async fn should_load_document_with_blank_hire_date() {
    let document = Fixture::text(LEGACY).replace("\"2023-06-01\"", "\"\"");
    let store = MemorySlotStore::new();
    store.insert(DATASET_SLOT, &document);

    let mut portal = Portal::start(store, RecordingSurface::default(), "/").await;
    assert_eq!(portal.state.dataset.accounts.len(), 3);
    assert_eq!(portal.state.dataset.employees[1].hire_date.as_str(), "");
    assert_eq!(portal.store.peek(DATASET_SLOT), Some(document));

    login(&mut portal, "jamie@example.com", "jamie123").await;
    assert_eq!(portal.identity().unwrap().first_name, "Jamie");
}

#[tokio::test]
async fn should_reseed_corrupt_document_on_start() {
    let store = MemorySlotStore::new();
    store.insert(DATASET_SLOT, "{\"accounts\": [");

    let portal = Portal::start(store, RecordingSurface::default(), "/").await;
    let seeded = stored_dataset(&portal.store);
    assert_eq!(seeded, portal.state.dataset);
    assert_eq!(seeded.accounts[0].email, SEED_ADMIN_EMAIL);
    assert_eq!(seeded.departments.len(), Dataset::seed().departments.len());
}
