pub mod jargon;
pub mod system;
pub mod test_helpers;

// Re-export all handlers for easier imports
pub use jargon::*;
pub use system::*;
