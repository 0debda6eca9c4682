use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A bookable service as published by the catalog endpoint.
///
/// The endpoint may send either an `images` array or a single `image`
/// string; both end up in `images`. Null entries are dropped here, blank
/// ones are left for the view to filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawService")]
pub struct Service {
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub images: Vec<String>,
}

#[derive(Deserialize)]
struct RawService {
    title: String,
    #[serde(default)]
    description: String,
    price: Decimal,
    #[serde(default)]
    images: Option<ImageField>,
    #[serde(default)]
    image: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ImageField {
    Many(Vec<Option<String>>),
    One(String),
}

impl From<RawService> for Service {
    fn from(raw: RawService) -> Self {
        let images = match (raw.images, raw.image) {
            (Some(ImageField::Many(list)), _) => list.into_iter().flatten().collect(),
            (Some(ImageField::One(single)), _) => vec![single],
            (None, Some(single)) => vec![single],
            (None, None) => Vec::new(),
        };

        Self {
            title: raw.title,
            description: raw.description,
            price: raw.price,
            images,
        }
    }
}

/// One entry of the cart. Title and price are copied from the service when
/// the line is created so later catalog changes don't reprice the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    pub title: String,
    pub price: Decimal,
    #[serde(rename = "qty")]
    pub quantity: u32,
}

impl CartLine {
    pub fn subtotal(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// Immutable read of the cart with freshly derived totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub item_count: u32,
    pub total: Decimal,
}

impl CartSnapshot {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: String,
}

/// 送出時的訂單快照，建立後與購物車狀態無關
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub cart: Vec<CartLine>,
    pub total: Decimal,
    pub customer: CustomerFields,
}

#[derive(Serialize)]
struct OrderPayload<'a> {
    op: &'static str,
    cart: &'a [CartLine],
    total: Decimal,
    customer: &'a CustomerFields,
}

impl Order {
    pub fn from_snapshot(snapshot: &CartSnapshot, customer: CustomerFields) -> Self {
        Self {
            cart: snapshot.lines.clone(),
            total: snapshot.total,
            customer,
        }
    }

    /// JSON body posted to the order endpoint.
    pub fn to_request_body(&self) -> serde_json::Result<String> {
        serde_json::to_string(&OrderPayload {
            op: "order",
            cart: &self.cart,
            total: self.total,
            customer: &self.customer,
        })
    }
}

/// Returned when an order was dispatched. Dispatch is not an
/// acknowledgement from the remote side.
#[derive(Debug, Clone, PartialEq)]
pub struct Confirmation {
    pub order: Order,
    pub dispatched_at: DateTime<Utc>,
    pub simulated: bool,
}
