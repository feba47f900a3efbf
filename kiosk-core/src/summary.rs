//! Derived checkout summary and the outbound checkout payload.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::cart::Cart;
use crate::catalog::CatalogIndex;

/// Action discriminator the host bot matches on.
pub const CHECKOUT_ACTION: &str = "checkout";

/// Label unit for single-currency deployments that configure nothing.
pub const DEFAULT_CURRENCY_UNIT: &str = "RUB";

/// What the host chrome shows on its main action button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub label: String,
    pub visible: bool,
}

impl Summary {
    /// Derive the button state from the live cart. A zero total hides
    /// the button entirely; otherwise the label carries the fresh total.
    #[must_use]
    pub fn derive(cart: &Cart, index: &CatalogIndex, currency_unit: &str) -> Self {
        let total = cart.total(index);
        if total == 0 {
            Self {
                label: String::new(),
                visible: false,
            }
        } else {
            Self {
                label: format!("Checkout for {total} {currency_unit}"),
                visible: true,
            }
        }
    }
}

/// The message handed to the host platform when the user confirms an
/// order. Serialized as text; the host owns delivery and confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutPayload {
    pub action: String,
    pub cart: BTreeMap<String, u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promocode: Option<String>,
}

impl CheckoutPayload {
    /// Snapshot the cart into an outbound payload. A blank promocode
    /// collapses to an absent field.
    #[must_use]
    pub fn from_cart(cart: &Cart, promocode: Option<&str>) -> Self {
        Self {
            action: CHECKOUT_ACTION.to_string(),
            cart: cart
                .entries()
                .map(|(id, quantity)| (id.to_string(), quantity))
                .collect(),
            promocode: promocode
                .map(str::trim)
                .filter(|code| !code.is_empty())
                .map(str::to_string),
        }
    }

    /// Serialized text form delivered to the host.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be serialized.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
