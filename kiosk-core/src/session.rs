//! The single coordinating context that owns every state container.
//!
//! All event-handler entry points live here; nothing in the crate is a
//! module-level global, so the whole widget can be driven headless.
use thiserror::Error;

use crate::HostChrome;
use crate::cart::Cart;
use crate::catalog::{Catalog, CatalogIndex};
use crate::gallery::GalleryController;
use crate::nav::{NavigationController, ViewState};
use crate::search::{SearchFilter, search};
use crate::summary::{CheckoutPayload, DEFAULT_CURRENCY_UNIT, Summary};

/// Session-level knobs fixed per deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Unit suffix for the checkout label; the widget is single-currency.
    pub currency_unit: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            currency_unit: DEFAULT_CURRENCY_UNIT.to_string(),
        }
    }
}

/// Why a checkout request was not handed to the host.
#[derive(Debug, Error)]
pub enum CheckoutError<E: std::error::Error + 'static> {
    /// Confirm arrived with nothing in the cart. The host button is
    /// hidden in that state, so this only happens on a host-side race.
    #[error("cart is empty")]
    EmptyCart,
    #[error("payload serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("host delivery failed: {0}")]
    Host(#[source] E),
}

/// A running widget session: catalog, cart, gallery, and navigation
/// state behind event-handler methods, with summary pushes and haptics
/// routed to the host chrome.
#[derive(Debug)]
pub struct ShopSession<H: HostChrome> {
    catalog: Catalog,
    index: CatalogIndex,
    cart: Cart,
    gallery: GalleryController,
    nav: NavigationController,
    host: H,
    config: SessionConfig,
}

impl<H: HostChrome> ShopSession<H> {
    /// Wire up a session over an already-indexed catalog. Pushes the
    /// initial (hidden) summary so the host chrome starts consistent.
    #[must_use]
    pub fn new(catalog: Catalog, index: CatalogIndex, host: H, config: SessionConfig) -> Self {
        let mut session = Self {
            catalog,
            index,
            cart: Cart::new(),
            gallery: GalleryController::new(),
            nav: NavigationController::new(),
            host,
            config,
        };
        session.push_summary();
        session
    }

    /// Handle an add-to-cart tap. A successful add pulses the host
    /// haptics and pushes the refreshed summary; an unknown identifier
    /// is rejected without touching any state.
    pub fn add_to_cart(&mut self, id: &str) -> bool {
        let added = self.cart.add(id, &self.index);
        if added {
            self.host.haptic_pulse();
            self.push_summary();
        }
        added
    }

    /// Handle a remove tap. Unknown identifiers fall through without a
    /// summary push since nothing changed.
    pub fn remove_from_cart(&mut self, id: &str) -> u32 {
        let had_entry = self.cart.quantity(id) > 0;
        let remaining = self.cart.remove(id);
        if had_entry {
            self.push_summary();
        }
        remaining
    }

    /// Open the image carousel for a product.
    pub fn open_gallery(&mut self, id: &str) -> bool {
        self.gallery.open(id, &self.index)
    }

    pub fn gallery_next(&mut self) {
        self.gallery.next();
    }

    pub fn gallery_previous(&mut self) {
        self.gallery.previous();
    }

    pub fn close_gallery(&mut self) {
        self.gallery.close();
    }

    pub fn select_category(&mut self, name: &str) {
        self.nav.select_category(name, &self.index);
    }

    pub fn go_back(&mut self) {
        self.nav.back();
    }

    /// Live search box update. Drives the navigation overlay and returns
    /// the filter result for the renderer.
    pub fn set_search_query(&mut self, query: &str) -> SearchFilter<'_> {
        self.nav.set_query(query);
        search(query, &self.index)
    }

    /// Host confirm action: snapshot the cart into a payload and hand
    /// the serialized text to the host for fire-and-forget delivery.
    ///
    /// # Errors
    ///
    /// Refuses an empty cart; propagates serialization and host
    /// delivery failures.
    pub fn checkout(&mut self, promocode: Option<&str>) -> Result<(), CheckoutError<H::Error>> {
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let payload = CheckoutPayload::from_cart(&self.cart, promocode);
        let text = payload.to_json()?;
        self.host.send_checkout(&text).map_err(CheckoutError::Host)
    }

    fn push_summary(&mut self) {
        let summary = Summary::derive(&self.cart, &self.index, &self.config.currency_unit);
        self.host.update_summary(&summary);
    }

    /// The unmodified category tree, for navigation rendering.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn gallery(&self) -> &GalleryController {
        &self.gallery
    }

    #[must_use]
    pub fn view(&self) -> ViewState {
        self.nav.view()
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.cart.total(&self.index)
    }

    #[must_use]
    pub fn summary(&self) -> Summary {
        Summary::derive(&self.cart, &self.index, &self.config.currency_unit)
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }
}
