//! HTTP handlers.

mod banner;
mod lookup;

pub use banner::banner_handler;
pub use lookup::lookup_handler;
