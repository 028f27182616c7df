//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the catalog and assistant logic so route handlers
//! can stay focused on request parsing and status-code mapping.

pub mod assistant;
pub mod catalog;
pub mod filter;
