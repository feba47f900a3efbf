//! Per-product image carousel with wrap-around stepping.
use crate::catalog::{CatalogIndex, ImageList};

/// An open carousel: a non-empty image sequence and a cursor into it.
///
/// Built fresh on every open; nothing carries over between products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryState {
    images: ImageList,
    current: usize,
}

impl GalleryState {
    #[must_use]
    pub fn images(&self) -> &[String] {
        &self.images
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Carousel cursor for the currently viewed product, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryController {
    state: Option<GalleryState>,
}

impl GalleryController {
    /// Create a controller with no open gallery.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the carousel for a product: primary image first, then the
    /// detail images, with blank references dropped. A product with no
    /// usable image leaves the gallery closed and returns false.
    pub fn open(&mut self, id: &str, index: &CatalogIndex) -> bool {
        let Some(product) = index.get(id) else {
            return false;
        };
        let images: ImageList = std::iter::once(product.image_url.as_str())
            .chain(product.detail_images.iter().map(String::as_str))
            .filter(|image| !image.trim().is_empty())
            .map(str::to_string)
            .collect();
        if images.is_empty() {
            return false;
        }
        self.state = Some(GalleryState { images, current: 0 });
        true
    }

    /// Step forward, wrapping from the last image to the first.
    /// No-op while closed; a single-image sequence stays at 0.
    pub fn next(&mut self) {
        if let Some(state) = &mut self.state {
            state.current = (state.current + 1) % state.images.len();
        }
    }

    /// Step backward, wrapping from the first image to the last.
    pub fn previous(&mut self) {
        if let Some(state) = &mut self.state {
            let len = state.images.len();
            state.current = (state.current + len - 1) % len;
        }
    }

    /// Discard the open gallery. Stepping afterwards is a no-op until
    /// the next open.
    pub fn close(&mut self) {
        self.state = None;
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.is_some()
    }

    #[must_use]
    pub fn state(&self) -> Option<&GalleryState> {
        self.state.as_ref()
    }

    #[must_use]
    pub fn current_image(&self) -> Option<&str> {
        self.state
            .as_ref()
            .map(|state| state.images[state.current].as_str())
    }

    /// 1-based position indicator: (current + 1, length).
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        self.state
            .as_ref()
            .map(|state| (state.current + 1, state.images.len()))
    }
}
