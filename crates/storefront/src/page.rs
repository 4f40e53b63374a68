//! Page session.
//!
//! One [`PageSession`] lives for one page view. [`PageSession::load`] is the
//! `DOMContentLoaded` hook: it opens the cart from storage, refreshes the
//! badge, binds the page's controls, and renders the cart on the cart page.
//! Afterwards the host feeds it clicks and drives toast timers through
//! [`PageSession::next_task`] or [`PageSession::drain_ready_tasks`].
//!
//! Every handler runs to completion on the session's owner, so there is
//! exactly one writer for the cart and the document.

use cartkeeper_core::{CartChange, CartCommand};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, info, instrument, warn};

use crate::config::{NotificationStrategy, StorefrontConfig};
use crate::controller::{AddSource, ClickOutcome, Controller, Interaction, PageKind};
use crate::dom::{Document, EventTarget, NodeId};
use crate::persistence::CartPersistence;
use crate::presenters::{
    CartPageTargets, NotificationTask, Notifier, ToastId, ToastPhase, command_for_target,
    refresh_badge, render_cart,
};
use crate::storage::KeyValueStore;
use crate::store::CartStore;

/// Cart runtime for one page view.
#[derive(Debug)]
pub struct PageSession<S> {
    document: Document,
    store: CartStore<S>,
    config: StorefrontConfig,
    kind: PageKind,
    controller: Controller,
    cart_container: Option<NodeId>,
    notifier: Notifier,
    tasks: UnboundedReceiver<NotificationTask>,
}

impl<S: KeyValueStore> PageSession<S> {
    /// Initialize the cart runtime on a loaded page.
    ///
    /// Toast timers run on tokio. Loaded outside a runtime, the session
    /// shows confirmations as dialogs instead.
    #[instrument(skip_all, fields(storage_key = %config.storage_key))]
    pub fn load(document: Document, storage: S, mut config: StorefrontConfig) -> Self {
        if config.notifications.strategy == NotificationStrategy::Toast
            && Handle::try_current().is_err()
        {
            warn!("No tokio runtime for toast timers; using dialog notifications");
            config.notifications.strategy = NotificationStrategy::Dialog;
        }

        let store = CartStore::open(CartPersistence::new(storage, config.storage_key.clone()));
        let kind = PageKind::detect(&document, &config.selectors);
        let controller = Controller::bind(&document, &config.selectors, kind);
        let cart_container = if kind.cart {
            document.get_element_by_id(&config.selectors.cart_items_container)
        } else {
            None
        };

        let (tx, tasks) = mpsc::unbounded_channel();
        let notifier = Notifier::new(
            config.notifications.clone(),
            config.selectors.toast_container.clone(),
            tx,
        );

        let mut session = Self {
            document,
            store,
            config,
            kind,
            controller,
            cart_container,
            notifier,
            tasks,
        };

        session.refresh_badge();
        if kind.cart {
            session.render_cart();
        }

        info!(
            detail = kind.detail,
            cart = kind.cart,
            items = session.store.total_item_count(),
            "Cart runtime loaded"
        );
        session
    }

    /// Handle a click on an element.
    #[instrument(skip(self))]
    pub fn click(&mut self, node: NodeId) -> ClickOutcome {
        let outcome = self.controller.click(&mut self.document, node);

        match &outcome.interaction {
            Interaction::AddToCart {
                command,
                name,
                quantity,
                source,
            } => {
                let change = self.dispatch(command.clone());
                if change.is_mutation() {
                    let message = match source {
                        AddSource::Catalog => self.config.messages.added(name),
                        AddSource::Detail => self
                            .config
                            .messages
                            .added_with_quantity(name, quantity.get()),
                    };
                    self.notify(&message);
                }
            }
            Interaction::Rejected(e) => {
                warn!("Ignoring add-to-cart click: {e}");
            }
            Interaction::QuantitySelected(quantity) => {
                debug!(quantity = quantity.get(), "quantity selected");
            }
            Interaction::Unbound => {}
        }

        outcome
    }

    /// Handle a click that bubbled up to `container` from `target`.
    ///
    /// Only the cart page's line-item container listens. Returns the change
    /// applied, or `None` if the click meant nothing.
    #[instrument(skip(self, target))]
    pub fn click_within(&mut self, container: NodeId, target: &EventTarget) -> Option<CartChange> {
        if self.cart_container != Some(container) {
            return None;
        }
        let command = command_for_target(target)?;
        Some(self.dispatch(command))
    }

    /// Apply a cart command and refresh the page.
    ///
    /// The badge is refreshed after every mutation. On the cart page,
    /// quantity changes and removals also re-render the line items.
    pub fn dispatch(&mut self, command: CartCommand) -> CartChange {
        let rerender = self.kind.cart && !matches!(command, CartCommand::AddItem { .. });
        let change = self.store.apply(command);

        if change.is_mutation() {
            self.refresh_badge();
        }
        if rerender {
            self.render_cart();
        }
        change
    }

    /// Show a confirmation using the configured strategy.
    pub fn notify(&mut self, message: &str) -> Option<ToastId> {
        self.notifier.notify(&mut self.document, message)
    }

    /// Wait for the next toast timer and apply it.
    ///
    /// Returns `None` at once when no toast is live.
    pub async fn next_task(&mut self) -> Option<(NotificationTask, ToastPhase)> {
        if self.notifier.active() == 0 {
            return None;
        }
        let task = self.tasks.recv().await?;
        let phase = self.notifier.handle(&mut self.document, task);
        Some((task, phase))
    }

    /// Apply every timer that has already fired. Returns how many ran.
    pub fn drain_ready_tasks(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(task) = self.tasks.try_recv() {
            self.notifier.handle(&mut self.document, task);
            handled += 1;
        }
        handled
    }

    /// The host reports that a toast's exit animation finished.
    ///
    /// Returns `None` if `node` is not a live toast.
    pub fn animation_end(&mut self, node: NodeId) -> Option<ToastPhase> {
        let id = self.notifier.toast_for_node(node)?;
        Some(
            self.notifier
                .handle(&mut self.document, NotificationTask::AnimationEnd(id)),
        )
    }

    /// The page.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// The page, for host-side changes.
    pub const fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// The cart store.
    #[must_use]
    pub const fn store(&self) -> &CartStore<S> {
        &self.store
    }

    /// The notifier.
    #[must_use]
    pub const fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Detected page kind.
    #[must_use]
    pub const fn kind(&self) -> PageKind {
        self.kind
    }

    /// Bound controls.
    #[must_use]
    pub const fn controller(&self) -> &Controller {
        &self.controller
    }

    /// End the session, handing back the page and the storage backend.
    pub fn close(self) -> (Document, S) {
        (self.document, self.store.into_persistence().into_storage())
    }

    fn refresh_badge(&mut self) {
        refresh_badge(
            &mut self.document,
            &self.config.selectors.cart_count,
            self.store.total_item_count(),
        );
    }

    fn render_cart(&mut self) {
        let targets = CartPageTargets {
            container_id: &self.config.selectors.cart_items_container,
            total_id: &self.config.selectors.cart_total_price,
        };
        if let Err(e) = render_cart(
            &mut self.document,
            targets,
            self.store.cart(),
            &self.config.price_format,
            &self.config.messages.empty_cart,
        ) {
            e.report("Failed to render cart");
        }
    }
}
