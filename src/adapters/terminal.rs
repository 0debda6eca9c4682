use crate::app::display::format_price;
use crate::domain::model::{CartSnapshot, CustomerFields, Service};
use crate::domain::ports::{Notice, Renderer};
use std::io::Write;

/// Line-oriented renderer for terminals. Positions are printed 1-based.
pub struct TerminalView<W: Write> {
    out: W,
    currency_symbol: String,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, currency_symbol: impl Into<String>) -> Self {
        Self {
            out,
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: impl AsRef<str>) {
        if let Err(e) = writeln!(self.out, "{}", text.as_ref()) {
            tracing::warn!("Failed to write to terminal: {}", e);
        }
    }

    fn price(&self, amount: rust_decimal::Decimal) -> String {
        format_price(&self.currency_symbol, amount)
    }
}

impl<W: Write> Renderer for TerminalView<W> {
    fn render_catalog(&mut self, services: &[Service]) {
        self.line("== Tours ==");
        for (index, service) in services.iter().enumerate() {
            let price = self.price(service.price);
            self.line(format!("{:>2}. {} - {}", index + 1, service.title, price));
            if !service.description.is_empty() {
                self.line(format!("    {}", service.description));
            }
        }
    }

    fn render_service_detail(&mut self, service: &Service, images: &[String]) {
        self.line(format!("== {} ==", service.title));
        self.line(service.description.clone());
        for url in images {
            self.line(format!("  [img] {}", url));
        }
    }

    fn render_cart(&mut self, snapshot: &CartSnapshot) {
        self.line(format!("Cart ({} items)", snapshot.item_count));
        if snapshot.is_empty() {
            self.line("  Your cart is empty.");
        } else {
            for (position, line) in snapshot.lines.iter().enumerate() {
                let price = self.price(line.price);
                self.line(format!(
                    "  {}. {} {} x {}",
                    position + 1,
                    line.title,
                    price,
                    line.quantity
                ));
            }
        }
        let total = self.price(snapshot.total);
        self.line(format!("Total: {}", total));
    }

    fn set_cart_open(&mut self, open: bool) {
        tracing::debug!("Cart panel {}", if open { "opened" } else { "closed" });
    }

    fn show_checkout_form(&mut self, prefill: Option<&CustomerFields>) {
        self.line("Checkout: type `submit` to enter name, email, phone and date.");
        if let Some(fields) = prefill {
            self.line(format!(
                "  Previous details kept: {} <{}> {} on {}",
                fields.name, fields.email, fields.phone, fields.date
            ));
        }
    }

    fn hide_checkout_form(&mut self) {
        tracing::debug!("Checkout form hidden");
    }

    fn set_busy(&mut self, busy: bool) {
        if busy {
            self.line("Sending...");
        }
    }

    fn notify(&mut self, notice: Notice) {
        match notice {
            Notice::OrderConfirmed(confirmation) => {
                let total = self.price(confirmation.order.total);
                self.line(format!(
                    "Booking sent! Total {}. Check your email.",
                    total
                ));
                if confirmation.simulated {
                    self.line("(backend not configured: order was simulated)");
                }
            }
            Notice::Error(message) => self.line(message),
        }
    }
}
