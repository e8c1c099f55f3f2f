//! Command language of the terminal front end.
//!
//! One command per line, `name [sub] [args] [field=value ...]`. Values with
//! spaces are double-quoted: `register firstName="Mary Ann"`.

use tracing::debug;

use portal_domain::id::{AccountId, DepartmentId, EmployeeId};

use crate::domain::repository::{SlotStore, Surface};
use crate::domain::types::{Container, FormValues};
use crate::error::PortalError;
use crate::state::Portal;

pub const HELP: &str = "\
go <location>                       show a panel (/, register, verify-email, login, profile,
                                    employees, departments, accounts, requests)
register firstName= lastName= email= password=
verify                              simulate the email verification link
login email= password=
logout
employee new | edit <ref> | save field=.. | cancel | delete <ref>
account new | edit <ref> | save field=.. | cancel | delete <ref> | reset-password <ref>
department new | edit <ref> | delete <ref>
request new | add-item | remove-item <n> | item <n> name= qty= | submit type= | cancel
toasts                              list toasts still on screen
help
quit";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unterminated quote")]
    UnterminatedQuote,
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("missing {0}")]
    MissingArgument(&'static str),
    #[error("expected field=value, got {0}")]
    BadField(String),
    #[error("not a row number: {0}")]
    BadIndex(String),
}

/// Something the portal itself does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Go(String),
    Register(FormValues),
    Verify,
    Login(FormValues),
    Logout,
    EmployeeNew,
    EmployeeEdit(EmployeeId),
    EmployeeSave(FormValues),
    EmployeeCancel,
    EmployeeDelete(EmployeeId),
    AccountNew,
    AccountEdit(AccountId),
    AccountSave(FormValues),
    AccountCancel,
    AccountDelete(AccountId),
    AccountResetPassword(AccountId),
    DepartmentNew,
    DepartmentEdit(DepartmentId),
    DepartmentDelete(DepartmentId),
    RequestNew,
    RequestAddItem,
    RequestRemoveItem(usize),
    RequestItem {
        index: usize,
        name: Option<String>,
        qty: Option<String>,
    },
    RequestSubmit(FormValues),
    RequestCancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Action(Action),
    Toasts,
    Help,
    Quit,
}

/// Split on whitespace, keeping double-quoted runs together.
pub fn tokenize(line: &str) -> Result<Vec<String>, CommandError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quoted = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                in_token = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }
    if quoted {
        return Err(CommandError::UnterminatedQuote);
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

fn fields(tokens: &[String]) -> Result<FormValues, CommandError> {
    tokens
        .iter()
        .map(|token| {
            token
                .split_once('=')
                .ok_or_else(|| CommandError::BadField(token.clone()))
        })
        .collect()
}

fn argument<'a>(tokens: &'a [String], what: &'static str) -> Result<&'a str, CommandError> {
    tokens
        .first()
        .map(String::as_str)
        .ok_or(CommandError::MissingArgument(what))
}

fn index(tokens: &[String]) -> Result<usize, CommandError> {
    let raw = argument(tokens, "row number")?;
    raw.parse()
        .map_err(|_| CommandError::BadIndex(raw.to_owned()))
}

/// `Ok(None)` for a blank line.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let tokens = tokenize(line)?;
    let Some((name, rest)) = tokens.split_first() else {
        return Ok(None);
    };
    let sub = rest.first().map(String::as_str).unwrap_or("");
    let args = rest.get(1..).unwrap_or(&[]);

    let action = match (name.as_str(), sub) {
        ("toasts", _) => return Ok(Some(Command::Toasts)),
        ("help", _) => return Ok(Some(Command::Help)),
        ("quit" | "exit", _) => return Ok(Some(Command::Quit)),

        ("go", _) => Action::Go(argument(rest, "location")?.to_owned()),
        ("register", _) => Action::Register(fields(rest)?),
        ("verify", _) => Action::Verify,
        ("login", _) => Action::Login(fields(rest)?),
        ("logout", _) => Action::Logout,

        ("employee", "new") => Action::EmployeeNew,
        ("employee", "edit") => Action::EmployeeEdit(argument(args, "employee ref")?.into()),
        ("employee", "save") => Action::EmployeeSave(fields(args)?),
        ("employee", "cancel") => Action::EmployeeCancel,
        ("employee", "delete") => Action::EmployeeDelete(argument(args, "employee ref")?.into()),

        ("account", "new") => Action::AccountNew,
        ("account", "edit") => Action::AccountEdit(argument(args, "account ref")?.into()),
        ("account", "save") => Action::AccountSave(fields(args)?),
        ("account", "cancel") => Action::AccountCancel,
        ("account", "delete") => Action::AccountDelete(argument(args, "account ref")?.into()),
        ("account", "reset-password") => {
            Action::AccountResetPassword(argument(args, "account ref")?.into())
        }

        ("department", "new") => Action::DepartmentNew,
        ("department", "edit") => {
            Action::DepartmentEdit(argument(args, "department ref")?.into())
        }
        ("department", "delete") => {
            Action::DepartmentDelete(argument(args, "department ref")?.into())
        }

        ("request", "new") => Action::RequestNew,
        ("request", "add-item") => Action::RequestAddItem,
        ("request", "remove-item") => Action::RequestRemoveItem(index(args)?),
        ("request", "item") => {
            let row = index(args)?;
            let values = fields(&args[1..])?;
            Action::RequestItem {
                index: row,
                name: has_field(&values, "name").then(|| values.raw("name").to_owned()),
                qty: has_field(&values, "qty").then(|| values.raw("qty").to_owned()),
            }
        }
        ("request", "submit") => Action::RequestSubmit(fields(args)?),
        ("request", "cancel") => Action::RequestCancel,

        _ => return Err(CommandError::Unknown(line.trim().to_owned())),
    };
    Ok(Some(Command::Action(action)))
}

fn has_field(values: &FormValues, name: &str) -> bool {
    values.iter().any(|(field, _)| field == name)
}

impl<S: SlotStore, U: Surface> Portal<S, U> {
    /// Run one action. Failures become toasts; nothing here is fatal.
    pub async fn apply(&mut self, action: Action) {
        if let Err(err) = self.run(action).await {
            self.report(err);
        }
    }

    async fn run(&mut self, action: Action) -> Result<(), PortalError> {
        match action {
            Action::Go(location) => {
                self.navigate(&location).await;
                Ok(())
            }
            Action::Register(values) => {
                self.merge_form(Container::RegisterForm, values);
                self.register().await
            }
            Action::Verify => self.verify_email().await,
            Action::Login(values) => {
                self.merge_form(Container::LoginForm, values);
                self.login().await
            }
            Action::Logout => self.logout().await,

            Action::EmployeeNew => self.open_employee_form(None),
            Action::EmployeeEdit(id) => self.open_employee_form(Some(id)),
            Action::EmployeeSave(values) => {
                self.merge_form(Container::EmployeeForm, values);
                self.submit_employee_form().await
            }
            Action::EmployeeCancel => {
                self.close_employee_form();
                Ok(())
            }
            Action::EmployeeDelete(id) => self.delete_employee(id).await,

            Action::AccountNew => self.open_account_form(None),
            Action::AccountEdit(id) => self.open_account_form(Some(id)),
            Action::AccountSave(values) => {
                self.merge_form(Container::AccountForm, values);
                self.submit_account_form().await
            }
            Action::AccountCancel => {
                self.close_account_form();
                Ok(())
            }
            Action::AccountDelete(id) => self.delete_account(id).await,
            Action::AccountResetPassword(id) => self.reset_password(id).await,

            Action::DepartmentNew => self.add_department(),
            Action::DepartmentEdit(id) => self.edit_department(id),
            Action::DepartmentDelete(id) => self.delete_department(id),

            Action::RequestNew => self.open_request_modal(),
            Action::RequestAddItem => {
                self.add_request_item();
                Ok(())
            }
            Action::RequestRemoveItem(index) => {
                if !self.remove_request_item(index) {
                    debug!(index, "request row not removable");
                }
                Ok(())
            }
            Action::RequestItem { index, name, qty } => {
                if !self.set_request_item(index, name.as_deref(), qty.as_deref()) {
                    debug!(index, "no such request row");
                }
                Ok(())
            }
            Action::RequestSubmit(values) => {
                self.merge_form(Container::RequestModal, values);
                self.submit_request().await
            }
            Action::RequestCancel => {
                self.close_request_modal();
                Ok(())
            }
        }
    }

    /// Overlay typed field values on what the form already holds.
    fn merge_form(&self, container: Container, values: FormValues) {
        let mut form = self.surface.read_form(container);
        for (name, value) in values.iter() {
            form.set(name, value);
        }
        self.surface.fill_form(container, &form);
    }
}
