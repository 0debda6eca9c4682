pub mod catalog;
pub mod ledger;
pub mod submitter;

pub use crate::domain::model::{CartLine, CartSnapshot, Confirmation, CustomerFields, Order, Service};
pub use crate::domain::ports::{Notice, OrderTransport, Renderer};
pub use crate::utils::error::Result;
