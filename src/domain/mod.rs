//! Core domain types and logic.

pub mod config_validation;
pub mod convert;
pub mod error;
pub mod exchange;
pub mod layout;
pub mod merge;
pub mod processor;
pub mod record;
pub mod section;
pub mod settings;
