//! amz-paapi - Amazon Product Advertising API 5.0 client
//!
//! Signed SearchItems / GetItems / GetVariations calls with typed responses,
//! plus parsers for the legacy XML API's response documents.

pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod legacy;
pub mod paapi;

pub use config::Config;
pub use error::{PaapiError, Result};
pub use paapi::{ClientOptions, Credentials, Endpoint, PaapiClient};
