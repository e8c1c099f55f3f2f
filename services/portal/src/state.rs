use tracing::{info, warn};

use portal_domain::account::Account;
use portal_domain::dataset::Dataset;
use portal_domain::id::{AccountId, EmployeeId};

use crate::domain::repository::{SlotStore, Surface};
use crate::domain::types::{FormValues, SessionFlags, Severity};
use crate::error::PortalError;
use crate::router::Location;
use crate::usecase::request::ItemRow;
use crate::usecase::session::RestoreSessionUseCase;
use crate::usecase::store::{LoadDatasetUseCase, SaveDatasetUseCase};

/// Identity of the signed-in account, if any.
///
/// Only the id is held; the account itself is looked up on every use so
/// admin edits to it take effect immediately.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    identity: Option<AccountId>,
}

impl Session {
    pub fn establish(&mut self, id: AccountId) {
        self.identity = Some(id);
    }

    pub fn clear(&mut self) {
        self.identity = None;
    }

    pub fn identity_id(&self) -> Option<&AccountId> {
        self.identity.as_ref()
    }

    pub fn current<'a>(&self, dataset: &'a Dataset) -> Option<&'a Account> {
        self.identity.as_ref().and_then(|id| dataset.account(id))
    }
}

/// Item rows of the open request modal. Row 0 always exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDraft {
    rows: Vec<ItemRow>,
}

impl Default for RequestDraft {
    fn default() -> Self {
        Self {
            rows: vec![ItemRow::default()],
        }
    }
}

impl RequestDraft {
    pub fn rows(&self) -> &[ItemRow] {
        &self.rows
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn add_row(&mut self) -> usize {
        self.rows.push(ItemRow::default());
        self.rows.len() - 1
    }

    /// Row 0 is never removable. Returns `false` when nothing was removed.
    pub fn remove_row(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.rows.len() {
            return false;
        }
        self.rows.remove(index);
        true
    }

    pub fn set_row(&mut self, index: usize, name: Option<&str>, qty: Option<&str>) -> bool {
        let Some(row) = self.rows.get_mut(index) else {
            return false;
        };
        if let Some(name) = name {
            row.name = name.to_owned();
        }
        if let Some(qty) = qty {
            row.qty = qty.to_owned();
        }
        true
    }

    /// Rows flattened as `item{n}.name` / `item{n}.qty` for display.
    pub fn to_form(&self, kind: &str) -> FormValues {
        let mut form = FormValues::new().with("type", kind);
        for (n, row) in self.rows.iter().enumerate() {
            form.set(&format!("item{n}.name"), row.name.as_str());
            form.set(&format!("item{n}.qty"), row.qty.as_str());
        }
        form
    }
}

/// Per-form state that outlives a single command: which record is being
/// edited and the request draft.
#[derive(Debug, Clone, Default)]
pub struct Forms {
    pub employee_edit: Option<EmployeeId>,
    pub account_edit: Option<AccountId>,
    pub request: RequestDraft,
}

/// Everything the portal mutates, owned in one place.
#[derive(Debug, Clone)]
pub struct AppState {
    pub dataset: Dataset,
    pub session: Session,
    pub forms: Forms,
    pub location: Location,
}

impl AppState {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            session: Session::default(),
            forms: Forms::default(),
            location: Location::Home,
        }
    }
}

/// The running portal: state plus its storage and presentation ports.
pub struct Portal<S, U> {
    pub state: AppState,
    pub store: S,
    pub surface: U,
}

impl<S: SlotStore, U: Surface> Portal<S, U> {
    /// Load (or seed) the dataset, restore any stored session, then show
    /// `initial_route`.
    pub async fn start(store: S, surface: U, initial_route: &str) -> Self {
        let dataset = LoadDatasetUseCase { store: &store }.execute().await;
        let restored = RestoreSessionUseCase {
            store: &store,
            dataset: &dataset,
        }
        .execute()
        .await;

        let mut portal = Self {
            state: AppState::new(dataset),
            store,
            surface,
        };
        if let Some(id) = restored {
            portal.state.session.establish(id);
        }
        portal.push_session_flags();
        portal.navigate(initial_route).await;
        info!(location = %portal.state.location, "portal started");
        portal
    }

    pub fn identity(&self) -> Option<&Account> {
        self.state.session.current(&self.state.dataset)
    }

    /// Signed-in identity, which must be an Admin when `admin_only` is set.
    pub fn authorize(&self, admin_only: bool) -> Result<&Account, PortalError> {
        let account = self.identity().ok_or(PortalError::NotAuthenticated)?;
        if admin_only && !account.is_admin() {
            return Err(PortalError::Forbidden);
        }
        Ok(account)
    }

    pub fn push_session_flags(&self) {
        let flags = match self.identity() {
            Some(account) => SessionFlags {
                authenticated: true,
                admin: account.is_admin(),
                display_name: Some(account.full_name()),
            },
            None => SessionFlags::default(),
        };
        self.surface.set_session_flags(&flags);
    }

    /// Write the whole dataset. On failure the in-memory copy is kept and the
    /// user is told; returns whether the write succeeded.
    pub async fn persist(&self) -> bool {
        match (SaveDatasetUseCase { store: &self.store })
            .execute(&self.state.dataset)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                self.report(e.into());
                false
            }
        }
    }

    /// Log `err` and turn it into a toast.
    pub fn report(&self, err: PortalError) {
        err.trace();
        self.surface.notify(&err.to_string(), err.severity());
    }

    pub fn notify(&self, message: &str, severity: Severity) {
        self.surface.notify(message, severity);
    }

    /// Slot value, treating a read failure like an absent slot.
    pub async fn read_slot(&self, key: &str) -> Option<String> {
        match self.store.get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(slot = key, error = %e, "slot unreadable");
                None
            }
        }
    }

    pub async fn write_slot(&self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value).await {
            warn!(slot = key, error = %e, "slot not written");
        }
    }

    pub async fn clear_slot(&self, key: &str) {
        if let Err(e) = self.store.remove(key).await {
            warn!(slot = key, error = %e, "slot not cleared");
        }
    }
}
