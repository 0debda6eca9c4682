use crate::app::display::display_images;
use crate::config::toml_config::StorefrontConfig;
use crate::core::catalog::{Catalog, CatalogLoader};
use crate::core::ledger::CartLedger;
use crate::core::submitter::OrderSubmitter;
use crate::domain::model::{CartSnapshot, Confirmation, CustomerFields};
use crate::domain::ports::{Notice, OrderTransport, Renderer};
use crate::utils::error::StorefrontError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// User intents raised by a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SelectService(usize),
    AddToCart(usize),
    RemoveFromCart(usize),
    OpenCart,
    CloseCart,
    StartCheckout,
    SubmitOrder(CustomerFields),
}

#[derive(Debug)]
pub enum Outcome {
    Rendered,
    Confirmed(Confirmation),
    Rejected(StorefrontError),
    /// Nothing happened: unknown index, or a submission is already in flight.
    Ignored,
}

/// Busy flag shared with whoever drives the submit trigger.
#[derive(Debug, Clone, Default)]
pub struct SubmitLock {
    busy: Arc<AtomicBool>,
}

impl SubmitLock {
    pub fn try_acquire(&self) -> Option<SubmitPermit> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmitPermit {
                busy: Arc::clone(&self.busy),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Held for the duration of one submission; releases the flag on drop.
#[derive(Debug)]
pub struct SubmitPermit {
    busy: Arc<AtomicBool>,
}

impl Drop for SubmitPermit {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// Owns the session state and routes every intent.
pub struct Storefront<T: OrderTransport, R: Renderer> {
    endpoint: String,
    placeholder_image: String,
    catalog: Catalog,
    ledger: CartLedger,
    submitter: OrderSubmitter<T>,
    view: R,
    lock: SubmitLock,
    pending_fields: Option<CustomerFields>,
}

impl<T: OrderTransport, R: Renderer> Storefront<T, R> {
    /// Loads the catalog, then performs the first render.
    pub async fn start(config: &StorefrontConfig, transport: T, view: R) -> Self {
        tracing::info!("🚀 Loading catalog from: {}", config.endpoint());
        let loader = CatalogLoader::new(config.checkout.placeholder_marker.clone());
        let catalog = loader
            .load(config.endpoint(), config.catalog_timeout())
            .await;

        let submitter = OrderSubmitter::new(transport, config.submitter_settings());
        Self::new(config, catalog, submitter, view)
    }

    pub fn new(
        config: &StorefrontConfig,
        catalog: Catalog,
        submitter: OrderSubmitter<T>,
        mut view: R,
    ) -> Self {
        let ledger = CartLedger::new();
        view.render_catalog(&catalog.services);
        view.render_cart(&ledger.snapshot());

        Self {
            endpoint: config.endpoint().to_string(),
            placeholder_image: config.display.placeholder_image.clone(),
            catalog,
            ledger,
            submitter,
            view,
            lock: SubmitLock::default(),
            pending_fields: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn snapshot(&self) -> CartSnapshot {
        self.ledger.snapshot()
    }

    pub fn submit_lock(&self) -> SubmitLock {
        self.lock.clone()
    }

    /// Customer fields kept from a failed submission.
    pub fn pending_fields(&self) -> Option<&CustomerFields> {
        self.pending_fields.as_ref()
    }

    pub fn view(&self) -> &R {
        &self.view
    }

    /// Re-renders the catalog, e.g. after the display was cleared.
    pub fn render_catalog(&mut self) {
        self.view.render_catalog(&self.catalog.services);
    }

    pub async fn dispatch(&mut self, intent: Intent) -> Outcome {
        tracing::debug!("Dispatching intent: {:?}", intent);

        match intent {
            Intent::SelectService(index) => match self.catalog.get(index) {
                Some(service) => {
                    let images = display_images(service, &self.placeholder_image);
                    self.view.render_service_detail(service, &images);
                    Outcome::Rendered
                }
                None => Outcome::Ignored,
            },
            Intent::AddToCart(index) => match self.catalog.get(index) {
                Some(service) => {
                    let snapshot = self.ledger.add(service);
                    self.view.render_cart(&snapshot);
                    self.view.set_cart_open(true);
                    Outcome::Rendered
                }
                None => Outcome::Ignored,
            },
            Intent::RemoveFromCart(position) => {
                let snapshot = self.ledger.remove(position);
                self.view.render_cart(&snapshot);
                Outcome::Rendered
            }
            Intent::OpenCart => {
                self.view.render_cart(&self.ledger.snapshot());
                self.view.set_cart_open(true);
                Outcome::Rendered
            }
            Intent::CloseCart => {
                self.view.set_cart_open(false);
                Outcome::Rendered
            }
            Intent::StartCheckout => {
                if self.ledger.is_empty() {
                    return self.reject(StorefrontError::EmptyCart);
                }
                self.view.show_checkout_form(self.pending_fields.as_ref());
                Outcome::Rendered
            }
            Intent::SubmitOrder(fields) => self.submit_order(fields).await,
        }
    }

    async fn submit_order(&mut self, fields: CustomerFields) -> Outcome {
        if self.ledger.is_empty() {
            return self.reject(StorefrontError::EmptyCart);
        }

        let Some(_permit) = self.lock.try_acquire() else {
            tracing::debug!("Submission already in flight; ignoring");
            return Outcome::Ignored;
        };

        self.view.set_busy(true);
        let snapshot = self.ledger.snapshot();
        let result = self
            .submitter
            .submit(&snapshot, fields.clone(), &self.endpoint)
            .await;
        self.view.set_busy(false);

        match result {
            Ok(confirmation) => {
                tracing::info!("✅ Order dispatched (total {})", confirmation.order.total);
                self.ledger.clear();
                self.pending_fields = None;
                self.view.render_cart(&self.ledger.snapshot());
                self.view.set_cart_open(false);
                self.view.hide_checkout_form();
                self.view
                    .notify(Notice::OrderConfirmed(confirmation.clone()));
                Outcome::Confirmed(confirmation)
            }
            Err(e) => {
                // 保留購物車與表單內容以便重試
                self.pending_fields = Some(fields);
                let outcome = self.reject(e);
                self.view.show_checkout_form(self.pending_fields.as_ref());
                outcome
            }
        }
    }

    fn reject(&mut self, error: StorefrontError) -> Outcome {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            error,
            error.category(),
            error.severity()
        );
        self.view.notify(Notice::Error(error.user_friendly_message()));
        Outcome::Rejected(error)
    }
}
