//! Order receipt written when checkout is confirmed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Cart, CartLineItem};

/// A confirmed order.
///
/// Created from the cart at confirmation time and persisted as a JSON
/// receipt under the orders directory. The receipt is a frozen copy: line
/// items and the total are captured as they were at confirmation, so later
/// catalog changes cannot alter it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier
    pub id: Uuid,
    /// Confirmation timestamp (UTC)
    pub created: DateTime<Utc>,
    /// Line items as they were at confirmation
    pub items: Vec<CartLineItem>,
    /// Order total at confirmation
    pub total: f64,
}

impl Order {
    /// Creates an order from the current cart contents.
    pub fn from_cart(cart: &Cart) -> Self {
        Self {
            id: Uuid::new_v4(),
            created: Utc::now(),
            items: cart.items().to_vec(),
            total: cart.total(),
        }
    }

    /// File name for the persisted receipt (`<uuid>.json`).
    pub fn file_name(&self) -> String {
        format!("{}.json", self.id)
    }
}
