//! Auto-dismissing toast notifications.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::debug;

use crate::domain::types::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Visible,
    Fading,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub phase: ToastPhase,
}

#[derive(Debug, Default)]
struct Tray {
    /// The container is created on the first toast and then kept.
    container: bool,
    next_id: u64,
    toasts: Vec<Toast>,
}

/// Stack of toasts. Each one stays visible, fades, then removes itself.
/// No dedup, no cap and no early dismissal.
#[derive(Debug, Clone)]
pub struct ToastTray {
    tray: Arc<Mutex<Tray>>,
    visible: Duration,
    fade: Duration,
}

impl ToastTray {
    pub fn new(visible: Duration, fade: Duration) -> Self {
        Self {
            tray: Arc::default(),
            visible,
            fade,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Tray> {
        self.tray.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a toast and schedule its removal. Must be called inside a
    /// tokio runtime.
    pub fn push(&self, message: &str, severity: Severity) -> u64 {
        let id = {
            let mut tray = self.lock();
            if !tray.container {
                debug!("toast container created");
                tray.container = true;
            }
            let id = tray.next_id;
            tray.next_id += 1;
            tray.toasts.push(Toast {
                id,
                message: message.to_owned(),
                severity,
                phase: ToastPhase::Visible,
            });
            id
        };

        let tray = Arc::clone(&self.tray);
        let (visible, fade) = (self.visible, self.fade);
        tokio::spawn(async move {
            tokio::time::sleep(visible).await;
            set_phase(&tray, id, ToastPhase::Fading);
            tokio::time::sleep(fade).await;
            tray.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .toasts
                .retain(|toast| toast.id != id);
        });
        id
    }

    /// Toasts currently on screen, oldest first.
    pub fn active(&self) -> Vec<Toast> {
        self.lock().toasts.clone()
    }

    pub fn has_container(&self) -> bool {
        self.lock().container
    }
}

fn set_phase(tray: &Mutex<Tray>, id: u64, phase: ToastPhase) {
    let mut tray = tray.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(toast) = tray.toasts.iter_mut().find(|toast| toast.id == id) {
        toast.phase = phase;
    }
}
