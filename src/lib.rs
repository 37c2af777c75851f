//! Multilingual content authoring support.
//!
//! - [`i18n`]: language registry and the pluralized message codec
//! - [`translatable`]: translatable attribute resolution and the validation
//!   rules behind translation workflow forms and progress
//! - [`config`]: environment-based configuration

pub mod config;
pub mod error;
pub mod i18n;
pub mod translatable;

pub use error::{I18nError, Result};
