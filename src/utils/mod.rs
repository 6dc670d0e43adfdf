// Utility functions
pub mod cache;
pub mod display;
pub mod error;
pub mod slug;

pub use cache::*;
pub use error::*;
pub use slug::*;
