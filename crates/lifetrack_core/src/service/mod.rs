//! Use-case services spanning more than one collection.
//!
//! # Responsibility
//! - Backup export/import over the raw store entries.
//! - User preferences that live next to the collections.

pub mod preference_service;
pub mod transfer_service;
