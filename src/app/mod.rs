// Application layer: the storefront controller and presentation helpers
// shared by every renderer.

pub mod display;
pub mod storefront;
