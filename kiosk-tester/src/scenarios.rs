//! Scripted shopping scenarios driven through the public session API.
use anyhow::{Result, ensure};
use std::convert::Infallible;

use kiosk_core::{
    Catalog, CatalogError, CatalogSource, HostChrome, SessionConfig, ShopSession, Summary,
    ViewState, WidgetEngine,
};

/// Default catalog fixture embedded in the binary.
pub const FIXTURE_CATALOG: &str = include_str!("../fixtures/catalog.json");

/// Host double that records every push so scenarios can assert on the
/// host-visible side effects.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub summaries: Vec<Summary>,
    pub pulses: usize,
    pub sent: Vec<String>,
}

impl HostChrome for RecordingHost {
    type Error = Infallible;

    fn update_summary(&mut self, summary: &Summary) {
        self.summaries.push(summary.clone());
    }

    fn haptic_pulse(&mut self) {
        self.pulses += 1;
    }

    fn send_checkout(&mut self, payload: &str) -> Result<(), Self::Error> {
        self.sent.push(payload.to_string());
        Ok(())
    }
}

pub struct TestScenario {
    pub name: &'static str,
    pub desc: &'static str,
    pub test_fn: fn(&mut ShopSession<RecordingHost>) -> Result<()>,
}

pub fn get_all_scenarios() -> Vec<TestScenario> {
    vec![
        TestScenario {
            name: "smoke",
            desc: "Add/remove flow with total and summary checks",
            test_fn: smoke,
        },
        TestScenario {
            name: "cart-churn",
            desc: "Repeated add/remove never leaves zero-quantity entries",
            test_fn: cart_churn,
        },
        TestScenario {
            name: "gallery-wrap",
            desc: "Carousel wraps in both directions and resets on reopen",
            test_fn: gallery_wrap,
        },
        TestScenario {
            name: "search-sweep",
            desc: "Case folding, substring matching, and the inactive filter",
            test_fn: search_sweep,
        },
        TestScenario {
            name: "navigation",
            desc: "Category fallback and the search overlay",
            test_fn: navigation,
        },
        TestScenario {
            name: "checkout",
            desc: "Payload handoff including the promocode passthrough",
            test_fn: checkout,
        },
    ]
}

pub fn get_scenarios_by_names(names: &[String]) -> Vec<TestScenario> {
    get_all_scenarios()
        .into_iter()
        .filter(|scenario| {
            names
                .iter()
                .any(|name| scenario.name.contains(&name.to_lowercase()))
        })
        .collect()
}

/// In-memory catalog source over an already-fetched feed string.
struct FeedSource<'a>(&'a str);

impl CatalogSource for FeedSource<'_> {
    type Error = CatalogError;

    fn load_catalog(&self) -> Result<Catalog, Self::Error> {
        Catalog::from_json(self.0).map_err(CatalogError::Parse)
    }
}

/// Build a session over a catalog feed with a recording host.
pub fn session_from_feed(feed: &str) -> Result<ShopSession<RecordingHost>> {
    let engine = WidgetEngine::new(FeedSource(feed));
    let started = engine.start(RecordingHost::default(), SessionConfig::default())?;
    ensure!(
        started.duplicates.is_empty(),
        "catalog feed has duplicate ids: {:?}",
        started.duplicates
    );
    Ok(started.session)
}

fn smoke(session: &mut ShopSession<RecordingHost>) -> Result<()> {
    ensure!(session.cart().is_empty(), "cart should start empty");
    ensure!(!session.summary().visible, "summary visible on empty cart");

    session.add_to_cart("shampoo_500");
    session.add_to_cart("shampoo_500");
    session.add_to_cart("microfiber_250");
    ensure!(session.total() == 1250, "total {} != 1250", session.total());
    ensure!(session.summary().visible, "summary hidden with items");
    ensure!(
        session.summary().label == "Checkout for 1250 RUB",
        "unexpected label {:?}",
        session.summary().label
    );
    ensure!(session.host().pulses == 3, "expected one pulse per add");

    session.remove_from_cart("microfiber_250");
    ensure!(session.total() == 1000, "total {} != 1000", session.total());
    ensure!(
        session.cart().quantity("microfiber_250") == 0,
        "microfiber entry should be gone"
    );

    session.remove_from_cart("shampoo_500");
    session.remove_from_cart("shampoo_500");
    ensure!(session.cart().is_empty(), "cart should be empty again");
    ensure!(!session.summary().visible, "summary should hide at zero");
    Ok(())
}

fn cart_churn(session: &mut ShopSession<RecordingHost>) -> Result<()> {
    let ids = ["shampoo_500", "microfiber_250", "wax_900", "mat_1200"];
    for round in 0..8 {
        for (position, id) in ids.iter().enumerate() {
            if (round + position) % 3 == 0 {
                session.remove_from_cart(id);
            } else {
                session.add_to_cart(id);
            }
            ensure!(
                session.cart().entries().all(|(_, quantity)| quantity >= 1),
                "zero-quantity entry after round {round}"
            );
            let fresh: u64 = session
                .cart()
                .lines(session.index())
                .map(|line| line.line_total)
                .sum();
            ensure!(
                fresh == session.total(),
                "total drifted from line sums in round {round}"
            );
        }
    }
    ensure!(
        !session.add_to_cart("ghost_item"),
        "unknown id must be rejected"
    );
    Ok(())
}

fn gallery_wrap(session: &mut ShopSession<RecordingHost>) -> Result<()> {
    ensure!(
        session.open_gallery("shampoo_500"),
        "shampoo gallery should open"
    );
    ensure!(
        session.gallery().position() == Some((1, 3)),
        "gallery should open at the first image"
    );
    session.gallery_previous();
    ensure!(
        session.gallery().position() == Some((3, 3)),
        "previous from 0 should wrap to the end"
    );
    session.gallery_next();
    ensure!(
        session.gallery().position() == Some((1, 3)),
        "next from the end should wrap to 0"
    );

    ensure!(
        session.open_gallery("microfiber_250"),
        "single-image gallery should open"
    );
    session.gallery_next();
    ensure!(
        session.gallery().position() == Some((1, 1)),
        "single image must stay put"
    );

    session.close_gallery();
    session.gallery_next();
    ensure!(
        session.gallery().position().is_none(),
        "stepping while closed must be a no-op"
    );
    Ok(())
}

fn search_sweep(session: &mut ShopSession<RecordingHost>) -> Result<()> {
    for query in ["shampoo", "SHAMPOO", "per sha"] {
        let filter = session.set_search_query(query);
        ensure!(
            filter.hits().len() == 1,
            "query {query:?} should hit exactly the shampoo"
        );
    }

    let filter = session.set_search_query("wash");
    ensure!(
        filter.hits().len() == 2,
        "description matches should count"
    );

    let filter = session.set_search_query("zzz_no_match");
    ensure!(
        filter.is_active() && filter.hits().is_empty(),
        "no-match must stay an active filter"
    );

    let filter = session.set_search_query("   ");
    ensure!(!filter.is_active(), "whitespace query must deactivate");
    Ok(())
}

fn navigation(session: &mut ShopSession<RecordingHost>) -> Result<()> {
    session.select_category("Care");
    ensure!(
        session.view() == ViewState::Category("Care".into()),
        "category selection failed"
    );
    session.go_back();
    ensure!(session.view() == ViewState::Menu, "back should reach menu");

    session.select_category("Nonexistent");
    ensure!(
        session.view() == ViewState::Menu,
        "unknown category must fall back to menu"
    );

    session.select_category("Accessories");
    session.set_search_query("wax");
    ensure!(
        matches!(session.view(), ViewState::SearchResults(_)),
        "active query should overlay"
    );
    session.set_search_query("");
    ensure!(
        session.view() == ViewState::Category("Accessories".into()),
        "clearing the query must resume the category"
    );
    Ok(())
}

fn checkout(session: &mut ShopSession<RecordingHost>) -> Result<()> {
    ensure!(
        session.checkout(None).is_err(),
        "empty-cart checkout must be refused"
    );

    session.add_to_cart("wax_900");
    session.add_to_cart("mat_1200");
    session.checkout(Some("SPRING10"))?;
    ensure!(session.host().sent.len() == 1, "expected one delivery");

    let sent: serde_json::Value = serde_json::from_str(&session.host().sent[0])?;
    ensure!(sent["action"] == "checkout", "wrong action field");
    ensure!(sent["cart"]["wax_900"] == 1, "wax line missing");
    ensure!(sent["promocode"] == "SPRING10", "promocode lost in transit");
    Ok(())
}
