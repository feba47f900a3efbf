//! Kiosk Widget Engine
//!
//! Platform-agnostic state core for the Kiosk embedded storefront widget.
//! This crate provides catalog indexing, cart accounting, gallery
//! stepping, search filtering, and view navigation without UI or
//! host-platform dependencies.

pub mod cart;
pub mod catalog;
pub mod gallery;
pub mod nav;
pub mod search;
pub mod session;
pub mod summary;

// Re-export commonly used types
pub use cart::{Cart, CartLine};
pub use catalog::{
    Catalog, CatalogError, CatalogIndex, Category, ImageList, Indexed, Product, Subcategory,
};
pub use gallery::{GalleryController, GalleryState};
pub use nav::{NavigationController, ViewState};
pub use search::{SearchFilter, search};
pub use session::{CheckoutError, SessionConfig, ShopSession};
pub use summary::{CHECKOUT_ACTION, CheckoutPayload, DEFAULT_CURRENCY_UNIT, Summary};

/// Trait for abstracting the catalog fetch
/// Platform-specific implementations should provide this
pub trait CatalogSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Retrieve the raw category tree from the platform-specific source
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be retrieved or parsed.
    fn load_catalog(&self) -> Result<Catalog, Self::Error>;
}

/// Trait for abstracting the host mini-app chrome
/// Platform-specific implementations should provide this
pub trait HostChrome {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Push the action-button label and visibility to the host chrome.
    fn update_summary(&mut self, summary: &Summary);

    /// Tactile feedback pulse after a successful cart addition.
    fn haptic_pulse(&mut self);

    /// Deliver the serialized checkout payload. Fire-and-forget: the
    /// host owns confirmation and retry.
    ///
    /// # Errors
    ///
    /// Returns an error if the handoff to the host fails.
    fn send_checkout(&mut self, payload: &str) -> Result<(), Self::Error>;
}

/// A ready session plus load diagnostics.
pub struct StartedSession<H: HostChrome> {
    pub session: ShopSession<H>,
    /// Data-integrity collisions found while flattening the catalog;
    /// for each, the first occurrence was kept.
    pub duplicates: Vec<String>,
}

/// Main engine for starting widget sessions over a catalog source.
pub struct WidgetEngine<C>
where
    C: CatalogSource,
{
    source: C,
}

impl<C> WidgetEngine<C>
where
    C: CatalogSource,
{
    /// Create a new engine over the provided catalog source.
    pub const fn new(source: C) -> Self {
        Self { source }
    }

    /// Fetch the catalog once, build the index, and hand back a ready
    /// session. Duplicate identifiers are kept-first and reported in
    /// the outcome.
    ///
    /// # Errors
    ///
    /// A fetch or parse failure is terminal for this attempt; a fresh
    /// load must be re-triggered explicitly by the caller.
    pub fn start<H: HostChrome>(
        &self,
        host: H,
        config: SessionConfig,
    ) -> Result<StartedSession<H>, CatalogError>
    where
        C::Error: Into<anyhow::Error>,
    {
        let catalog = self
            .source
            .load_catalog()
            .map_err(|e| CatalogError::Fetch(e.into()))?;
        let Indexed { index, duplicates } = CatalogIndex::build(&catalog);
        Ok(StartedSession {
            session: ShopSession::new(catalog, index, host, config),
            duplicates,
        })
    }
}
