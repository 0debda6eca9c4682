use crate::domain::model::{CartLine, CartSnapshot, Service};
use rust_decimal::Decimal;

/// In-memory record of the cart for one session.
///
/// Lines keep insertion order and titles are unique: adding a title that is
/// already present bumps its quantity. Totals are derived on every snapshot
/// and saturate at `Decimal::MAX` instead of overflowing.
#[derive(Debug, Clone, Default)]
pub struct CartLedger {
    lines: Vec<CartLine>,
}

impl CartLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, service: &Service) -> CartSnapshot {
        match self.lines.iter_mut().find(|line| line.title == service.title) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine {
                title: service.title.clone(),
                price: service.price,
                quantity: 1,
            }),
        }

        tracing::debug!("🛒 Added '{}' to cart", service.title);
        self.snapshot()
    }

    /// Removes the line at `position`. Out-of-range positions are ignored.
    pub fn remove(&mut self, position: usize) -> CartSnapshot {
        if position < self.lines.len() {
            let removed = self.lines.remove(position);
            tracing::debug!("🗑️ Removed '{}' from cart", removed.title);
        } else {
            tracing::debug!(
                "Ignoring remove at position {} (cart has {} lines)",
                position,
                self.lines.len()
            );
        }
        self.snapshot()
    }

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            lines: self.lines.clone(),
            item_count: self.lines.iter().map(|line| line.quantity).sum(),
            total: self
                .lines
                .iter()
                .map(CartLine::subtotal)
                .fold(Decimal::ZERO, Decimal::saturating_add),
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
