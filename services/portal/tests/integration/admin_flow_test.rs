use portal_app::cli::Action;
use portal_app::domain::repository::Surface;
use portal_app::domain::types::{AUTH_TOKEN_SLOT, Container, DATASET_SLOT, PanelView, Severity};
use portal_app::router::{ACCESS_DENIED, Location};
use portal_app::state::Portal;
use portal_domain::account::Role;
use portal_domain::dataset::{Dataset, SEED_ADMIN_EMAIL, SEED_ADMIN_PASSWORD};
use portal_domain::id::{AccountId, DepartmentId};
use portal_testing::builders::DatasetBuilder;

use crate::helpers::{
    FlakyStore, RecordingSurface, admin_portal, fields, login, stored_dataset, user_portal,
};

fn employee_fields(dataset: &Dataset, email: &str) -> Action {
    Action::EmployeeSave(fields(&[
        ("employeeId", "EMP-010"),
        ("userEmail", email),
        ("position", "Developer"),
        ("departmentId", dataset.departments[0].id.as_str()),
        ("hireDate", "2024-05-20"),
    ]))
}

fn account_fields(email: &str) -> Action {
    Action::AccountSave(fields(&[
        ("firstName", "Jordan"),
        ("lastName", "Kim"),
        ("email", email),
        ("password", "jordan1"),
        ("role", "User"),
        ("verified", "true"),
    ]))
}

fn account_id(portal: &crate::helpers::TestPortal, email: &str) -> AccountId {
    portal
        .state
        .dataset
        .account_by_email(email)
        .unwrap()
        .id
        .clone()
}

// ── employees ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_add_employee_linked_to_existing_account() {
    let dataset = Dataset::seed();
    let mut portal = admin_portal(&dataset).await;
    portal.apply(Action::Go("#/employees".into())).await;

    portal.apply(Action::EmployeeNew).await;
    assert!(portal.surface.is_visible(Container::EmployeeForm));
    let choices = portal.surface.choices.borrow()["departmentId"].clone();
    assert_eq!(choices.len(), 2);
    assert_eq!(choices[0].1, "Engineering");

    let dataset = portal.state.dataset.clone();
    portal
        .apply(employee_fields(&dataset, "Admin@Example.com"))
        .await;

    assert_eq!(
        portal.surface.last_notice(),
        Some(("Employee added".into(), Severity::Success))
    );
    assert!(!portal.surface.is_visible(Container::EmployeeForm));
    let (location, PanelView::Employees(rows)) = portal.surface.last_panel() else {
        panic!("expected employees panel");
    };
    assert_eq!(location, Location::Employees);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Admin User");
    assert_eq!(rows[0].department, "Engineering");
    assert_eq!(stored_dataset(&portal.store).employees[0].user_email, SEED_ADMIN_EMAIL);
}

#[tokio::test]
async fn should_reject_employee_with_unknown_account_email() {
    let mut portal = admin_portal(&Dataset::seed()).await;
    portal.apply(Action::EmployeeNew).await;
    let before = portal.state.dataset.clone();

    portal
        .apply(employee_fields(&before, "stranger@example.com"))
        .await;
    assert_eq!(
        portal.surface.last_notice(),
        Some(("User email not found in accounts".into(), Severity::Danger))
    );
    assert_eq!(portal.state.dataset, before);
    assert!(portal.surface.is_visible(Container::EmployeeForm));
}

#[tokio::test]
async fn should_edit_employee_from_prefilled_form() {
    let dataset = DatasetBuilder::seeded()
        .with_user("jamie@example.com")
        .with_employee("EMP-001", "jamie@example.com")
        .build();
    let mut portal = admin_portal(&dataset).await;
    let id = portal.state.dataset.employees[0].id.clone();

    portal.apply(Action::EmployeeEdit(id.clone())).await;
    assert_eq!(
        portal.surface.read_form(Container::EmployeeForm).raw("employeeId"),
        "EMP-001"
    );

    portal
        .apply(Action::EmployeeSave(fields(&[("position", "Team Lead")])))
        .await;
    assert_eq!(
        portal.surface.last_notice(),
        Some(("Employee updated".into(), Severity::Success))
    );
    assert_eq!(portal.state.dataset.employees.len(), 1);
    assert_eq!(portal.state.dataset.employee(&id).unwrap().position, "Team Lead");
    assert_eq!(portal.state.forms.employee_edit, None);
}

#[tokio::test]
async fn should_delete_employee_only_after_confirmation() {
    let dataset = DatasetBuilder::seeded()
        .with_employee("EMP-001", SEED_ADMIN_EMAIL)
        .build();
    let mut portal = admin_portal(&dataset).await;
    let id = portal.state.dataset.employees[0].id.clone();

    portal.surface.answer_confirm(false);
    portal.apply(Action::EmployeeDelete(id.clone())).await;
    assert_eq!(portal.state.dataset.employees.len(), 1);
    assert!(portal.surface.notices.borrow().is_empty());

    portal.surface.answer_confirm(true);
    portal.apply(Action::EmployeeDelete(id)).await;
    assert!(portal.state.dataset.employees.is_empty());
    assert_eq!(
        portal.surface.last_notice(),
        Some(("Employee deleted".into(), Severity::Info))
    );
    assert_eq!(
        *portal.surface.asked.borrow(),
        ["Delete this employee?", "Delete this employee?"]
    );
}

#[tokio::test]
async fn should_silently_skip_edit_of_vanished_employee() {
    let dataset = DatasetBuilder::seeded()
        .with_employee("EMP-001", SEED_ADMIN_EMAIL)
        .build();
    let mut portal = admin_portal(&dataset).await;
    portal.apply(Action::Go("#/employees".into())).await;
    let id = portal.state.dataset.employees[0].id.clone();

    portal.apply(Action::EmployeeEdit(id.clone())).await;
    portal.state.dataset.remove_employee(&id);
    let panels_before = portal.surface.panels.borrow().len();

    portal
        .apply(Action::EmployeeSave(fields(&[("position", "Ghost")])))
        .await;
    assert!(portal.surface.notices.borrow().is_empty());
    assert!(portal.state.dataset.employees.is_empty());
    assert_eq!(stored_dataset(&portal.store).employees.len(), 1, "nothing persisted");
    assert!(!portal.surface.is_visible(Container::EmployeeForm));
    assert_eq!(portal.surface.panels.borrow().len(), panels_before + 1);
}

// ── accounts ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_account_and_reject_duplicate() {
    let mut portal = admin_portal(&Dataset::seed()).await;
    portal.apply(Action::Go("#/accounts".into())).await;

    portal.apply(Action::AccountNew).await;
    portal.apply(account_fields("jordan@example.com")).await;
    assert_eq!(
        portal.surface.last_notice(),
        Some(("Account created".into(), Severity::Success))
    );
    let created = portal
        .state
        .dataset
        .account_by_email("jordan@example.com")
        .unwrap();
    assert!(created.verified);
    assert_eq!(created.role, Role::User);

    portal.apply(Action::AccountNew).await;
    portal.apply(account_fields("JORDAN@example.com")).await;
    assert_eq!(
        portal.surface.last_notice(),
        Some(("Email already exists".into(), Severity::Danger))
    );
    assert_eq!(portal.state.dataset.accounts.len(), 2);
}

#[tokio::test]
async fn should_reject_taking_another_accounts_email_on_edit() {
    let dataset = DatasetBuilder::seeded().with_user("jamie@example.com").build();
    let mut portal = admin_portal(&dataset).await;
    let jamie = account_id(&portal, "jamie@example.com");

    portal.apply(Action::AccountEdit(jamie)).await;
    portal
        .apply(Action::AccountSave(fields(&[("email", SEED_ADMIN_EMAIL)])))
        .await;
    assert_eq!(
        portal.surface.last_notice(),
        Some(("Email already in use".into(), Severity::Danger))
    );
    assert!(portal.state.dataset.account_by_email("jamie@example.com").is_some());
}

#[tokio::test]
async fn should_refuse_self_delete_before_confirming() {
    let mut portal = admin_portal(&Dataset::seed()).await;
    let admin = account_id(&portal, SEED_ADMIN_EMAIL);
    portal.surface.answer_confirm(true);

    portal.apply(Action::AccountDelete(admin)).await;
    assert_eq!(
        portal.surface.last_notice(),
        Some(("Cannot delete your own account".into(), Severity::Danger))
    );
    assert!(portal.surface.asked.borrow().is_empty());
    assert_eq!(portal.state.dataset.accounts.len(), 1);
}

#[tokio::test]
async fn should_delete_account_without_cascading() {
    let dataset = DatasetBuilder::seeded()
        .with_user("jamie@example.com")
        .with_employee("EMP-001", "jamie@example.com")
        .build();
    let mut portal = admin_portal(&dataset).await;
    let jamie = account_id(&portal, "jamie@example.com");

    portal.surface.answer_confirm(true);
    portal.apply(Action::AccountDelete(jamie)).await;
    assert_eq!(
        portal.surface.last_notice(),
        Some(("Account deleted".into(), Severity::Info))
    );
    assert_eq!(
        *portal.surface.asked.borrow(),
        ["Delete this account? This cannot be undone."]
    );
    assert_eq!(portal.state.dataset.employees.len(), 1);

    portal.apply(Action::Go("#/employees".into())).await;
    let (_, PanelView::Employees(rows)) = portal.surface.last_panel() else {
        panic!("expected employees panel");
    };
    assert_eq!(rows[0].name, "jamie@example.com");
}

#[tokio::test]
async fn should_reset_password_through_prompt() {
    let dataset = DatasetBuilder::seeded().with_user("jamie@example.com").build();
    let mut portal = admin_portal(&dataset).await;
    let jamie = account_id(&portal, "jamie@example.com");

    portal.surface.answer_prompt(None);
    portal.apply(Action::AccountResetPassword(jamie.clone())).await;
    assert!(portal.surface.notices.borrow().is_empty(), "cancel is silent");

    for short in ["abc", ""] {
        portal.surface.answer_prompt(Some(short));
        portal.apply(Action::AccountResetPassword(jamie.clone())).await;
        assert_eq!(
            portal.surface.last_notice(),
            Some((
                "Password must be at least 6 characters".into(),
                Severity::Danger
            )),
            "{short:?}"
        );
    }

    portal.surface.answer_prompt(Some("fresh-pass"));
    portal.apply(Action::AccountResetPassword(jamie.clone())).await;
    assert_eq!(
        portal.surface.last_notice(),
        Some(("Password reset successfully".into(), Severity::Success))
    );
    let stored = stored_dataset(&portal.store);
    assert_eq!(stored.account(&jamie).unwrap().password, "fresh-pass");
}

#[tokio::test]
async fn should_rewrite_token_when_admin_changes_own_email() {
    let mut portal = admin_portal(&Dataset::seed()).await;
    let admin = account_id(&portal, SEED_ADMIN_EMAIL);

    portal.apply(Action::AccountEdit(admin)).await;
    portal
        .apply(Action::AccountSave(fields(&[
            ("email", "boss@example.com"),
            ("firstName", "Boss"),
        ])))
        .await;

    assert_eq!(
        portal.store.peek(AUTH_TOKEN_SLOT).as_deref(),
        Some("boss@example.com")
    );
    assert_eq!(
        portal.surface.flags().display_name.as_deref(),
        Some("Boss User")
    );

    let store = std::mem::take(&mut portal.store);
    let restarted = Portal::start(store, RecordingSurface::default(), "/").await;
    assert_eq!(restarted.identity().unwrap().email, "boss@example.com");
}

#[tokio::test]
async fn should_leave_accounts_panel_when_admin_drops_own_role() {
    let mut portal = admin_portal(&Dataset::seed()).await;
    let admin = account_id(&portal, SEED_ADMIN_EMAIL);
    portal.apply(Action::Go("#/accounts".into())).await;

    portal.apply(Action::AccountEdit(admin)).await;
    portal
        .apply(Action::AccountSave(fields(&[("role", "User")])))
        .await;

    assert_eq!(
        portal.surface.notice_texts(),
        ["Account updated", ACCESS_DENIED]
    );
    assert_eq!(portal.state.location, Location::Home);
    assert_eq!(portal.surface.last_panel(), (Location::Home, PanelView::Home));
    assert!(!portal.surface.flags().admin);
    assert_eq!(
        stored_dataset(&portal.store).accounts[0].role,
        Role::User
    );
}

// ── departments and guards ───────────────────────────────────────────────────

#[tokio::test]
async fn should_answer_department_changes_with_info_notice() {
    let mut portal = admin_portal(&Dataset::seed()).await;
    portal.apply(Action::DepartmentNew).await;
    portal
        .apply(Action::DepartmentDelete(DepartmentId::from("any")))
        .await;

    let notices = portal.surface.notices.borrow().clone();
    assert_eq!(notices.len(), 2);
    assert!(notices.iter().all(|(_, severity)| *severity == Severity::Info));
    assert_eq!(portal.state.dataset.departments.len(), 2);
}

#[tokio::test]
async fn should_forbid_account_commands_to_regular_user() {
    let dataset = DatasetBuilder::seeded().with_user("jamie@example.com").build();
    let mut portal = user_portal(&dataset, "jamie@example.com").await;

    portal.apply(account_fields("sneaky@example.com")).await;
    assert_eq!(
        portal.surface.last_notice(),
        Some(("Access denied. Admin only.".into(), Severity::Danger))
    );
    assert_eq!(portal.state.dataset.accounts.len(), 2);
}

// ── storage failure ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_keep_change_in_memory_when_save_fails() {
    let mut portal = Portal::start(FlakyStore::default(), RecordingSurface::default(), "/").await;
    login(&mut portal, SEED_ADMIN_EMAIL, SEED_ADMIN_PASSWORD).await;
    portal.surface.clear_notices();
    portal.store.fail_dataset_writes.set(true);

    portal.apply(Action::AccountNew).await;
    portal.apply(account_fields("jordan@example.com")).await;

    assert_eq!(
        portal.surface.notice_texts(),
        ["Error saving data", "Account created"]
    );
    assert_eq!(portal.state.dataset.accounts.len(), 2);
    let stored = portal.store.inner.peek(DATASET_SLOT).unwrap();
    assert!(!stored.contains("jordan@example.com"));
}
