//! Catalog access - everything that talks to or reads from the app catalog
//!
//! - Browser-like HTTP session with randomized pauses
//! - Listing URL guessing
//! - Ordered download link patterns

mod listing;
mod patterns;
mod session;

pub use listing::*;
pub use patterns::*;
pub use session::*;
