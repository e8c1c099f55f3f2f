use chrono::Utc;

use crate::domain::repository::{SlotStore, Surface};
use crate::domain::types::{Container, Severity};
use crate::error::PortalError;
use crate::router::Location;
use crate::state::Portal;
use crate::usecase::request::{SubmitRequestInput, SubmitRequestUseCase};

pub const REQUEST_SUBMITTED: &str = "Request submitted successfully";

impl<S: SlotStore, U: Surface> Portal<S, U> {
    /// Open the modal with a fresh draft: one empty row, quantity 1.
    pub fn open_request_modal(&mut self) -> Result<(), PortalError> {
        self.authorize(false)?;
        self.state.forms.request.reset();
        self.redraw_request_modal("");
        self.surface.set_visible(Container::RequestModal, true);
        Ok(())
    }

    pub fn close_request_modal(&mut self) {
        self.surface.set_visible(Container::RequestModal, false);
        self.state.forms.request.reset();
    }

    pub fn add_request_item(&mut self) -> usize {
        let kind = self.current_request_kind();
        let index = self.state.forms.request.add_row();
        self.redraw_request_modal(&kind);
        index
    }

    /// Row 0 is never removed.
    pub fn remove_request_item(&mut self, index: usize) -> bool {
        let kind = self.current_request_kind();
        let removed = self.state.forms.request.remove_row(index);
        if removed {
            self.redraw_request_modal(&kind);
        }
        removed
    }

    pub fn set_request_item(&mut self, index: usize, name: Option<&str>, qty: Option<&str>) -> bool {
        let kind = self.current_request_kind();
        let updated = self.state.forms.request.set_row(index, name, qty);
        if updated {
            self.redraw_request_modal(&kind);
        }
        updated
    }

    pub async fn submit_request(&mut self) -> Result<(), PortalError> {
        let requester = self.authorize(false)?.email.clone();
        let kind = self.current_request_kind();

        SubmitRequestUseCase {
            dataset: &mut self.state.dataset,
        }
        .execute(SubmitRequestInput {
            kind: &kind,
            rows: self.state.forms.request.rows(),
            requester: &requester,
            today: Utc::now().date_naive(),
        })?;

        self.persist().await;
        self.notify(REQUEST_SUBMITTED, Severity::Success);
        self.close_request_modal();
        self.refresh(Location::Requests);
        Ok(())
    }

    fn current_request_kind(&self) -> String {
        self.surface
            .read_form(Container::RequestModal)
            .trimmed("type")
            .to_owned()
    }

    fn redraw_request_modal(&self, kind: &str) {
        let values = self.state.forms.request.to_form(kind);
        self.surface.fill_form(Container::RequestModal, &values);
    }
}
