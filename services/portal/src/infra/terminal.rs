use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;
use std::io::Write as _;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;
use tracing::warn;

use crate::domain::repository::Surface;
use crate::domain::types::{Container, FormValues, PanelView, SessionFlags, Severity};
use crate::notify::{Toast, ToastTray};
use crate::router::Location;

/// Line-oriented presentation surface: panels are printed as text tables on
/// stdout and confirmations are answered on stdin.
pub struct TerminalSurface {
    toasts: ToastTray,
    forms: RefCell<HashMap<Container, FormValues>>,
    visible: RefCell<HashSet<Container>>,
    input: Mutex<Lines<BufReader<Stdin>>>,
}

impl TerminalSurface {
    pub fn new(toasts: ToastTray) -> Self {
        Self {
            toasts,
            forms: RefCell::default(),
            visible: RefCell::default(),
            input: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }

    /// Next input line, `None` at end of input.
    pub async fn next_line(&self) -> Option<String> {
        match self.input.lock().await.next_line().await {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "stdin unreadable");
                None
            }
        }
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.active()
    }

    fn ask(message: &str) {
        print!("{message} ");
        let _ = std::io::stdout().flush();
    }
}

impl Surface for TerminalSurface {
    fn show_panel(&self, location: Location, view: &PanelView) {
        println!("{}", format_panel(location, view));
    }

    fn set_session_flags(&self, flags: &SessionFlags) {
        match &flags.display_name {
            Some(name) if flags.admin => println!("[signed in: {name} (admin)]"),
            Some(name) => println!("[signed in: {name}]"),
            None => println!("[not signed in]"),
        }
    }

    fn set_visible(&self, container: Container, visible: bool) {
        let mut shown = self.visible.borrow_mut();
        let changed = if visible {
            shown.insert(container)
        } else {
            shown.remove(&container)
        };
        if changed {
            let state = if visible { "open" } else { "closed" };
            println!("[{container:?} {state}]");
        }
    }

    fn fill_form(&self, container: Container, values: &FormValues) {
        self.forms.borrow_mut().insert(container, values.clone());
        if self.visible.borrow().contains(&container) {
            println!("{}", format_form(container, values));
        }
    }

    fn read_form(&self, container: Container) -> FormValues {
        self.forms
            .borrow()
            .get(&container)
            .cloned()
            .unwrap_or_default()
    }

    fn set_choices(&self, field: &str, choices: &[(String, String)]) {
        let listed = choices
            .iter()
            .map(|(value, label)| format!("{label}={value}"))
            .collect::<Vec<_>>()
            .join(", ");
        println!("[{field} choices: {listed}]");
    }

    fn notify(&self, message: &str, severity: Severity) {
        self.toasts.push(message, severity);
        println!("({}) {message}", severity.as_str());
    }

    async fn confirm(&self, message: &str) -> bool {
        Self::ask(&format!("{message} [y/N]"));
        self.next_line()
            .await
            .is_some_and(|answer| matches!(answer.trim(), "y" | "Y" | "yes"))
    }

    async fn prompt(&self, message: &str) -> Option<String> {
        Self::ask(&format!("{message} ({CANCEL_ANSWER} to cancel)"));
        prompt_answer(self.next_line().await)
    }
}

/// Typed at a prompt to back out of it.
pub const CANCEL_ANSWER: &str = ":cancel";

/// End of input or [`CANCEL_ANSWER`] cancels. Anything else, an empty line
/// included, is the answer.
pub fn prompt_answer(line: Option<String>) -> Option<String> {
    line.filter(|answer| answer.trim() != CANCEL_ANSWER)
}

pub fn format_form(container: Container, values: &FormValues) -> String {
    let mut out = format!("  {container:?}:");
    for (name, value) in values.iter() {
        let shown = if name == "password" && !value.is_empty() {
            "******"
        } else {
            value
        };
        let _ = write!(out, " {name}={shown:?}");
    }
    out
}

pub fn format_panel(location: Location, view: &PanelView) -> String {
    let mut out = format!("== {location} ==\n");
    if let Some(notice) = view.empty_notice() {
        out.push_str(notice);
        if matches!(view, PanelView::Requests(_)) {
            out.push_str(" Create one with `request new`.");
        }
        return out;
    }

    let _ = match view {
        PanelView::Home => write!(out, "Welcome. Use `go register` or `go login`."),
        PanelView::Register => write!(
            out,
            "register firstName=.. lastName=.. email=.. password=.."
        ),
        PanelView::VerifyEmail { pending_email } => match pending_email {
            Some(email) => write!(out, "A verification link was sent to {email}. Type `verify`."),
            None => write!(out, "Type `verify` to simulate the verification link."),
        },
        PanelView::Login { verified_banner } => {
            if *verified_banner {
                let _ = writeln!(out, "Email verified! You may now log in.");
            }
            write!(out, "login email=.. password=..")
        }
        PanelView::Profile(Some(profile)) => write!(
            out,
            "{}\nEmail: {}\nRole: {}",
            profile.name, profile.email, profile.role
        ),
        PanelView::Profile(None) => Ok(()),
        PanelView::Employees(rows) => {
            let _ = writeln!(out, "ID | Name | Position | Dept | ref");
            rows.iter().try_for_each(|row| {
                writeln!(
                    out,
                    "{} | {} | {} | {} | {}",
                    row.employee_code, row.name, row.position, row.department, row.id
                )
            })
        }
        PanelView::Departments(rows) => {
            let _ = writeln!(out, "Name | Description | ref");
            rows.iter().try_for_each(|row| {
                writeln!(out, "{} | {} | {}", row.name, row.description, row.id)
            })
        }
        PanelView::Accounts(rows) => {
            let _ = writeln!(out, "Name | Email | Role | Verified | ref");
            rows.iter().try_for_each(|row| {
                let verified = if row.verified { "yes" } else { "-" };
                writeln!(
                    out,
                    "{} | {} | {} | {} | {}",
                    row.name, row.email, row.role, verified, row.id
                )
            })
        }
        PanelView::Requests(rows) => {
            let _ = writeln!(out, "Date | Type | Items | Status");
            rows.iter().try_for_each(|row| {
                writeln!(
                    out,
                    "{} | {} | {} | {} ({})",
                    row.date,
                    row.kind,
                    row.items,
                    row.status.as_str(),
                    row.badge.as_str()
                )
            })
        }
    };
    out.trim_end().to_owned()
}
