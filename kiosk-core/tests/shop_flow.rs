use std::convert::Infallible;

use kiosk_core::{
    Catalog, CatalogIndex, HostChrome, SessionConfig, ShopSession, Summary, ViewState,
};

const CARE_FEED: &str = r#"[
    {
        "name": "Care",
        "subcategories": [
            {
                "name": "Exterior",
                "products": [
                    {
                        "id": "shampoo_500",
                        "name": "Super Shampoo",
                        "price": 500,
                        "imageUrl": "img/shampoo.jpg",
                        "detailImages": ["img/shampoo_2.jpg", "img/shampoo_3.jpg"],
                        "description": "Foaming exterior wash"
                    },
                    {
                        "id": "microfiber_250",
                        "name": "Magic Microfiber",
                        "price": 250,
                        "imageUrl": "img/microfiber.jpg"
                    }
                ]
            }
        ]
    }
]"#;

#[derive(Debug, Default)]
struct RecordingHost {
    summaries: Vec<Summary>,
    pulses: usize,
    sent: Vec<String>,
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

fn care_session() -> ShopSession<RecordingHost> {
    let catalog = Catalog::from_json(CARE_FEED).unwrap();
    let indexed = CatalogIndex::build(&catalog);
    assert!(indexed.duplicates.is_empty());
    ShopSession::new(
        catalog,
        indexed.index,
        RecordingHost::default(),
        SessionConfig::default(),
    )
}

#[test]
fn cart_accounting_drives_summary_visibility() {
    let mut session = care_session();

    session.add_to_cart("shampoo_500");
    session.add_to_cart("shampoo_500");
    session.add_to_cart("microfiber_250");
    assert_eq!(session.total(), 1250);
    let summary = session.summary();
    assert!(summary.visible);
    assert_eq!(summary.label, "Checkout for 1250 RUB");
    assert_eq!(session.host().pulses, 3);

    session.remove_from_cart("microfiber_250");
    assert_eq!(session.total(), 1000);
    assert_eq!(session.cart().quantity("microfiber_250"), 0);

    session.remove_from_cart("shampoo_500");
    session.remove_from_cart("shampoo_500");
    assert!(session.cart().is_empty());
    assert!(!session.summary().visible);

    // One initial push plus one per effective mutation.
    assert_eq!(session.host().summaries.len(), 7);
    assert!(!session.host().summaries.last().unwrap().visible);
}

#[test]
fn rejected_add_neither_pulses_nor_pushes() {
    let mut session = care_session();
    let pushes_before = session.host().summaries.len();

    assert!(!session.add_to_cart("ghost_item"));
    assert!(session.cart().is_empty());
    assert_eq!(session.host().pulses, 0);
    assert_eq!(session.host().summaries.len(), pushes_before);

    // Removing something never added changes nothing either.
    session.remove_from_cart("shampoo_500");
    assert_eq!(session.host().summaries.len(), pushes_before);
}

#[test]
fn navigation_falls_back_and_resumes_under_search() {
    let mut session = care_session();
    assert_eq!(session.view(), ViewState::Menu);

    session.select_category("Care");
    assert_eq!(session.view(), ViewState::Category("Care".into()));
    session.go_back();
    assert_eq!(session.view(), ViewState::Menu);

    session.select_category("Nonexistent");
    assert_eq!(session.view(), ViewState::Menu);

    // Search overlays the category without destroying it.
    session.select_category("Care");
    {
        let filter = session.set_search_query("shampoo");
        assert_eq!(filter.hits().len(), 1);
    }
    assert_eq!(session.view(), ViewState::SearchResults("shampoo".into()));

    let filter = session.set_search_query("");
    assert!(!filter.is_active());
    assert_eq!(session.view(), ViewState::Category("Care".into()));
}

#[test]
fn gallery_round_trip_through_session() {
    let mut session = care_session();

    assert!(session.open_gallery("shampoo_500"));
    assert_eq!(session.gallery().position(), Some((1, 3)));
    session.gallery_previous();
    assert_eq!(session.gallery().position(), Some((3, 3)));
    session.gallery_next();
    assert_eq!(session.gallery().position(), Some((1, 3)));

    session.close_gallery();
    session.gallery_next();
    assert_eq!(session.gallery().position(), None);
}

#[test]
fn checkout_hands_payload_to_host() {
    let mut session = care_session();
    session.add_to_cart("shampoo_500");
    session.add_to_cart("microfiber_250");

    session.checkout(Some("SPRING10")).unwrap();
    assert_eq!(session.host().sent.len(), 1);

    let sent: serde_json::Value = serde_json::from_str(&session.host().sent[0]).unwrap();
    assert_eq!(sent["action"], "checkout");
    assert_eq!(sent["cart"]["shampoo_500"], 1);
    assert_eq!(sent["promocode"], "SPRING10");

    // Delivery is fire-and-forget; the cart survives for the host to
    // keep rendering.
    assert!(!session.cart().is_empty());
}

#[test]
fn checkout_refuses_empty_cart() {
    let mut session = care_session();
    assert!(session.checkout(None).is_err());
    assert!(session.host().sent.is_empty());
}
