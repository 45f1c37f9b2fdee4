pub mod jargon;

// Re-export all models for easier imports
pub use jargon::*;
pub use medjargon_core::service::ServiceInfo;
