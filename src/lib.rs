pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::storage::LocalStorage;
pub use app::Session;
pub use config::{toml_config::TomlConfig, Settings};
pub use core::{address_book::AddressBook, codec::CsvCodec, store::ContactStore};
pub use domain::model::{Contact, ContactUpdate, Modification, ParseWarning, SearchField};
pub use domain::ports::{ConfigProvider, ContactRepository, Storage};
pub use utils::error::{ContactError, Result};
