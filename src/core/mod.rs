pub mod address_book;
pub mod codec;
pub mod store;

pub use crate::domain::model::{
    render_header, Contact, ContactUpdate, Decoded, LoadReport, Modification, ParseWarning,
    SearchField, HEADER_LABELS,
};
pub use crate::domain::ports::{ConfigProvider, ContactRepository, Storage};
pub use crate::utils::error::Result;
