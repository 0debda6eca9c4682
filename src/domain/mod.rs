// Domain layer: plain storefront data and the ports the core talks through.

pub mod model;
pub mod ports;
