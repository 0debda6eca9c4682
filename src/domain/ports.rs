use crate::domain::model::{CartSnapshot, Confirmation, CustomerFields, Service};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Sends an encoded order to the remote endpoint.
///
/// `Ok(())` only means the request left without a transport error; the
/// endpoint is an opaque gateway and its response is never read.
#[async_trait]
pub trait OrderTransport: Send + Sync {
    async fn dispatch(&self, endpoint: &str, body: String, timeout: Option<Duration>)
        -> Result<()>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    OrderConfirmed(Confirmation),
    Error(String),
}

/// Display surface driven by the storefront. It is the only writer of
/// display state and never mutates the cart itself.
pub trait Renderer {
    fn render_catalog(&mut self, services: &[Service]);
    fn render_service_detail(&mut self, service: &Service, images: &[String]);
    fn render_cart(&mut self, snapshot: &CartSnapshot);
    fn set_cart_open(&mut self, open: bool);
    fn show_checkout_form(&mut self, prefill: Option<&CustomerFields>);
    fn hide_checkout_form(&mut self);
    fn set_busy(&mut self, busy: bool);
    fn notify(&mut self, notice: Notice);
}
