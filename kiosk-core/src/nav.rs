//! View navigation: the menu/category base machine plus the search
//! overlay layered on top of it.
use crate::catalog::CatalogIndex;

/// The view the renderer should present. Exactly one is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Menu,
    Category(String),
    SearchResults(String),
}

/// Browsing state underneath the search overlay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum BaseView {
    #[default]
    Menu,
    Category(String),
}

/// Tracks which catalog view is active.
///
/// Search results are an overlay: they suppress the base view while a
/// non-empty query is live but never destroy it, so clearing the query
/// resumes browsing exactly where it left off.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationController {
    base: BaseView,
    query: Option<String>,
}

impl NavigationController {
    /// Start at the top-level menu.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter a category. Names not present in the catalog fall back to
    /// the menu instead of entering a dangling category view.
    pub fn select_category(&mut self, name: &str, index: &CatalogIndex) {
        self.base = if index.has_category(name) {
            BaseView::Category(name.to_string())
        } else {
            BaseView::Menu
        };
    }

    /// Category -> menu; no-op when already on the menu.
    pub fn back(&mut self) {
        self.base = BaseView::Menu;
    }

    /// Track the live search box. A non-empty trimmed query activates
    /// the results overlay; an empty one resumes the base view.
    pub fn set_query(&mut self, query: &str) {
        let trimmed = query.trim();
        self.query = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_lowercase())
        };
    }

    pub fn clear_query(&mut self) {
        self.query = None;
    }

    #[must_use]
    pub fn search_active(&self) -> bool {
        self.query.is_some()
    }

    /// Resolve the effective view.
    #[must_use]
    pub fn view(&self) -> ViewState {
        if let Some(query) = &self.query {
            return ViewState::SearchResults(query.clone());
        }
        match &self.base {
            BaseView::Menu => ViewState::Menu,
            BaseView::Category(name) => ViewState::Category(name.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, CatalogIndex};

    fn nav_index() -> CatalogIndex {
        let catalog = Catalog::from_json(
            r#"[
            { "name": "Care", "subcategories": [] },
            { "name": "Accessories", "subcategories": [] }
        ]"#,
        )
        .unwrap();
        CatalogIndex::build(&catalog).index
    }

    #[test]
    fn starts_on_menu() {
        assert_eq!(NavigationController::new().view(), ViewState::Menu);
    }

    #[test]
    fn select_and_back_round_trip() {
        let index = nav_index();
        let mut nav = NavigationController::new();
        nav.select_category("Care", &index);
        assert_eq!(nav.view(), ViewState::Category("Care".into()));
        nav.back();
        assert_eq!(nav.view(), ViewState::Menu);
        // back from the menu stays on the menu
        nav.back();
        assert_eq!(nav.view(), ViewState::Menu);
    }

    #[test]
    fn unknown_category_falls_back_to_menu() {
        let index = nav_index();
        let mut nav = NavigationController::new();
        nav.select_category("Nonexistent", &index);
        assert_eq!(nav.view(), ViewState::Menu);

        nav.select_category("Care", &index);
        nav.select_category("Nonexistent", &index);
        assert_eq!(nav.view(), ViewState::Menu);
    }

    #[test]
    fn search_overlay_preserves_base_view() {
        let index = nav_index();
        let mut nav = NavigationController::new();
        nav.select_category("Care", &index);

        nav.set_query("shampoo");
        assert_eq!(nav.view(), ViewState::SearchResults("shampoo".into()));
        assert!(nav.search_active());

        // Clearing the query resumes the category underneath.
        nav.set_query("   ");
        assert_eq!(nav.view(), ViewState::Category("Care".into()));
        assert!(!nav.search_active());
    }

    #[test]
    fn query_is_trimmed_and_lowercased() {
        let mut nav = NavigationController::new();
        nav.set_query("  ShAmPoO  ");
        assert_eq!(nav.view(), ViewState::SearchResults("shampoo".into()));
        nav.clear_query();
        assert_eq!(nav.view(), ViewState::Menu);
    }
}
