use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet, VecDeque};

use portal_app::cli::Action;
use portal_app::domain::repository::{SlotStore, Surface};
use portal_app::domain::types::{
    Container, DATASET_SLOT, FormValues, PanelView, SessionFlags, Severity,
};
use portal_app::error::StorageError;
use portal_app::infra::memory_store::MemorySlotStore;
use portal_app::router::Location;
use portal_app::state::Portal;
use portal_domain::dataset::{Dataset, SEED_ADMIN_EMAIL, SEED_ADMIN_PASSWORD};
use portal_testing::builders::TEST_PASSWORD;

// ── RecordingSurface ─────────────────────────────────────────────────────────

/// Headless surface that records everything shown and answers
/// confirmations and prompts from scripted queues.
#[derive(Default)]
pub struct RecordingSurface {
    pub panels: RefCell<Vec<(Location, PanelView)>>,
    pub notices: RefCell<Vec<(String, Severity)>>,
    pub flags: RefCell<SessionFlags>,
    pub forms: RefCell<HashMap<Container, FormValues>>,
    pub visible: RefCell<HashSet<Container>>,
    pub choices: RefCell<HashMap<String, Vec<(String, String)>>>,
    pub asked: RefCell<Vec<String>>,
    confirms: RefCell<VecDeque<bool>>,
    prompts: RefCell<VecDeque<Option<String>>>,
}

impl RecordingSurface {
    pub fn answer_confirm(&self, answer: bool) {
        self.confirms.borrow_mut().push_back(answer);
    }

    pub fn answer_prompt(&self, answer: Option<&str>) {
        self.prompts
            .borrow_mut()
            .push_back(answer.map(str::to_owned));
    }

    pub fn last_notice(&self) -> Option<(String, Severity)> {
        self.notices.borrow().last().cloned()
    }

    pub fn notice_texts(&self) -> Vec<String> {
        self.notices.borrow().iter().map(|(m, _)| m.clone()).collect()
    }

    pub fn clear_notices(&self) {
        self.notices.borrow_mut().clear();
    }

    pub fn last_panel(&self) -> (Location, PanelView) {
        self.panels
            .borrow()
            .last()
            .cloned()
            .expect("no panel shown yet")
    }

    pub fn is_visible(&self, container: Container) -> bool {
        self.visible.borrow().contains(&container)
    }

    pub fn flags(&self) -> SessionFlags {
        self.flags.borrow().clone()
    }
}

impl Surface for RecordingSurface {
    fn show_panel(&self, location: Location, view: &PanelView) {
        self.panels.borrow_mut().push((location, view.clone()));
    }

    fn set_session_flags(&self, flags: &SessionFlags) {
        *self.flags.borrow_mut() = flags.clone();
    }

    fn set_visible(&self, container: Container, visible: bool) {
        let mut shown = self.visible.borrow_mut();
        if visible {
            shown.insert(container);
        } else {
            shown.remove(&container);
        }
    }

    fn fill_form(&self, container: Container, values: &FormValues) {
        self.forms.borrow_mut().insert(container, values.clone());
    }

    fn read_form(&self, container: Container) -> FormValues {
        self.forms
            .borrow()
            .get(&container)
            .cloned()
            .unwrap_or_default()
    }

    fn set_choices(&self, field: &str, choices: &[(String, String)]) {
        self.choices
            .borrow_mut()
            .insert(field.to_owned(), choices.to_vec());
    }

    fn notify(&self, message: &str, severity: Severity) {
        self.notices
            .borrow_mut()
            .push((message.to_owned(), severity));
    }

    async fn confirm(&self, message: &str) -> bool {
        self.asked.borrow_mut().push(message.to_owned());
        self.confirms.borrow_mut().pop_front().unwrap_or(false)
    }

    async fn prompt(&self, message: &str) -> Option<String> {
        self.asked.borrow_mut().push(message.to_owned());
        self.prompts.borrow_mut().pop_front().flatten()
    }
}

// ── FlakyStore ───────────────────────────────────────────────────────────────

/// Memory store whose dataset writes can be switched to fail.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemorySlotStore,
    pub fail_dataset_writes: Cell<bool>,
}

impl SlotStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if key == DATASET_SLOT && self.fail_dataset_writes.get() {
            return Err(StorageError::QuotaExceeded {
                needed: value.len(),
                quota: 0,
            });
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key).await
    }
}

// ── builders ─────────────────────────────────────────────────────────────────

pub type TestPortal = Portal<MemorySlotStore, RecordingSurface>;

pub fn fields(pairs: &[(&str, &str)]) -> FormValues {
    pairs.iter().copied().collect()
}

/// Portal started on `/` over a store already holding `dataset`.
pub async fn portal_with(dataset: &Dataset) -> TestPortal {
    let store = MemorySlotStore::new();
    store.insert(DATASET_SLOT, &serde_json::to_string(dataset).unwrap());
    Portal::start(store, RecordingSurface::default(), "/").await
}

pub async fn login<S: SlotStore>(portal: &mut Portal<S, RecordingSurface>, email: &str, password: &str) {
    portal
        .apply(Action::Login(fields(&[("email", email), ("password", password)])))
        .await;
}

/// Seeded portal with the admin signed in and notices cleared.
pub async fn admin_portal(dataset: &Dataset) -> TestPortal {
    let mut portal = portal_with(dataset).await;
    login(&mut portal, SEED_ADMIN_EMAIL, SEED_ADMIN_PASSWORD).await;
    assert!(portal.identity().is_some(), "admin login failed");
    portal.surface.clear_notices();
    portal
}

/// Portal with the verified user `email` (password [`TEST_PASSWORD`]) signed in.
pub async fn user_portal(dataset: &Dataset, email: &str) -> TestPortal {
    let mut portal = portal_with(dataset).await;
    login(&mut portal, email, TEST_PASSWORD).await;
    assert!(portal.identity().is_some(), "user login failed");
    portal.surface.clear_notices();
    portal
}

/// Dataset as last written to the store.
pub fn stored_dataset(store: &MemorySlotStore) -> Dataset {
    serde_json::from_str(&store.peek(DATASET_SLOT).expect("dataset slot empty")).unwrap()
}
