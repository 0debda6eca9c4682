use crate::domain::model::Service;
use rust_decimal::Decimal;

/// Images to show for a service: blank entries dropped, and the placeholder
/// when nothing is left.
pub fn display_images(service: &Service, placeholder: &str) -> Vec<String> {
    let images: Vec<String> = service
        .images
        .iter()
        .map(|url| url.trim())
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect();

    if images.is_empty() {
        vec![placeholder.to_string()]
    } else {
        images
    }
}

pub fn format_price(currency_symbol: &str, amount: Decimal) -> String {
    format!("{} {:.2}", currency_symbol, amount)
}
