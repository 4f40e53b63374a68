//! Add-to-cart confirmations.
//!
//! Two strategies, picked by [`NotificationStrategy`]:
//!
//! - `Dialog` hands the message to the host's blocking `alert`.
//! - `Toast` appends a message to a toast host that is created on first use.
//!
//! # Toast lifecycle
//!
//! ```text
//! Created --(entrance)--> Visible --(display timer)--> Fading --(animation end)--> Removed
//! ```
//!
//! Timers run on tokio and only enqueue a [`NotificationTask`]; the page
//! session drains the queue and calls [`Notifier::handle`], so all document
//! mutation stays on the one owner. Every toast runs to completion. The host
//! container is removed when its last toast goes.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::config::{NotificationConfig, NotificationStrategy};
use crate::dom::{Document, Element, NodeId};

/// Class on every toast message.
pub const TOAST_CLASS: &str = "toast";
/// Class that plays the entrance state.
pub const TOAST_SHOW_CLASS: &str = "show";
/// Class that plays the exit animation.
pub const TOAST_HIDE_CLASS: &str = "hide";

/// Identifies one toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

/// Where a toast is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Created,
    Visible,
    Fading,
    Removed,
}

/// A follow-up transition queued by a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationTask {
    /// Display time is over; start the exit animation.
    BeginFade(ToastId),
    /// The exit animation finished.
    AnimationEnd(ToastId),
}

#[derive(Debug)]
struct Toast {
    id: ToastId,
    node: NodeId,
    phase: ToastPhase,
}

/// Shows confirmations and drives toast lifecycles.
#[derive(Debug)]
pub struct Notifier {
    config: NotificationConfig,
    host_id: String,
    toasts: Vec<Toast>,
    next_id: u64,
    tasks: UnboundedSender<NotificationTask>,
}

impl Notifier {
    /// Create a notifier whose timers report to `tasks`.
    pub fn new(
        config: NotificationConfig,
        host_id: impl Into<String>,
        tasks: UnboundedSender<NotificationTask>,
    ) -> Self {
        Self {
            config,
            host_id: host_id.into(),
            toasts: Vec::new(),
            next_id: 0,
            tasks,
        }
    }

    /// Show a confirmation.
    ///
    /// Returns the toast's id under the toast strategy, `None` for dialogs.
    pub fn notify(&mut self, document: &mut Document, message: &str) -> Option<ToastId> {
        match self.config.strategy {
            NotificationStrategy::Dialog => {
                document.alert(message);
                None
            }
            NotificationStrategy::Toast => Some(self.show_toast(document, message)),
        }
    }

    /// Apply a queued transition. Returns the toast's phase afterwards.
    ///
    /// Stale tasks (for toasts already past that point) are ignored.
    pub fn handle(&mut self, document: &mut Document, task: NotificationTask) -> ToastPhase {
        match task {
            NotificationTask::BeginFade(id) => self.begin_fade(document, id),
            NotificationTask::AnimationEnd(id) => self.finish(document, id),
        }
    }

    /// The toast rendered as `node`, if it is still live.
    #[must_use]
    pub fn toast_for_node(&self, node: NodeId) -> Option<ToastId> {
        self.toasts
            .iter()
            .find(|toast| toast.node == node)
            .map(|toast| toast.id)
    }

    /// Current phase of a toast. Unknown ids are `Removed`.
    #[must_use]
    pub fn phase(&self, id: ToastId) -> ToastPhase {
        self.toasts
            .iter()
            .find(|toast| toast.id == id)
            .map_or(ToastPhase::Removed, |toast| toast.phase)
    }

    /// Element showing a live toast.
    #[must_use]
    pub fn node(&self, id: ToastId) -> Option<NodeId> {
        self.toasts
            .iter()
            .find(|toast| toast.id == id)
            .map(|toast| toast.node)
    }

    /// Number of toasts not yet removed.
    #[must_use]
    pub fn active(&self) -> usize {
        self.toasts.len()
    }

    fn show_toast(&mut self, document: &mut Document, message: &str) -> ToastId {
        let host = self.ensure_host(document);
        let id = ToastId(self.next_id);
        self.next_id += 1;

        let node = document.append_child(
            host,
            Element::new("div").with_class(TOAST_CLASS).with_text(message),
        );
        self.toasts.push(Toast {
            id,
            node,
            phase: ToastPhase::Created,
        });

        if let Some(el) = document.get_mut(node) {
            el.add_class(TOAST_SHOW_CLASS);
        }
        self.set_phase(id, ToastPhase::Visible);
        self.schedule(self.config.display_duration(), NotificationTask::BeginFade(id));

        debug!(?id, "toast shown");
        id
    }

    fn begin_fade(&mut self, document: &mut Document, id: ToastId) -> ToastPhase {
        let Some(toast) = self.toasts.iter_mut().find(|toast| toast.id == id) else {
            return ToastPhase::Removed;
        };
        if toast.phase != ToastPhase::Visible {
            return toast.phase;
        }

        toast.phase = ToastPhase::Fading;
        if let Some(el) = document.get_mut(toast.node) {
            el.remove_class(TOAST_SHOW_CLASS);
            el.add_class(TOAST_HIDE_CLASS);
        }
        self.schedule(self.config.exit_animation(), NotificationTask::AnimationEnd(id));
        ToastPhase::Fading
    }

    fn finish(&mut self, document: &mut Document, id: ToastId) -> ToastPhase {
        let Some(index) = self.toasts.iter().position(|toast| toast.id == id) else {
            return ToastPhase::Removed;
        };
        let Some(toast) = self.toasts.get(index) else {
            return ToastPhase::Removed;
        };
        if toast.phase != ToastPhase::Fading {
            return toast.phase;
        }

        document.remove(toast.node);
        self.toasts.remove(index);
        debug!(?id, "toast removed");

        if self.toasts.is_empty() {
            if let Some(host) = document.get_element_by_id(&self.host_id) {
                document.remove(host);
            }
        }
        ToastPhase::Removed
    }

    fn ensure_host(&self, document: &mut Document) -> NodeId {
        document.get_element_by_id(&self.host_id).unwrap_or_else(|| {
            document.append(Element::new("div").with_id(self.host_id.clone()))
        })
    }

    fn set_phase(&mut self, id: ToastId, phase: ToastPhase) {
        if let Some(toast) = self.toasts.iter_mut().find(|toast| toast.id == id) {
            toast.phase = phase;
        }
    }

    /// Enqueue `task` after `delay` without blocking the caller.
    fn schedule(&self, delay: Duration, task: NotificationTask) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!(?task, "No tokio runtime; toast transition will not fire");
            return;
        };
        let tasks = self.tasks.clone();
        runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            // The page session may be gone; nothing left to update then.
            let _ = tasks.send(task);
        });
    }
}
