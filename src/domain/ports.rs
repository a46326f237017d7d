use crate::domain::model::{Contact, ContactUpdate, Modification};
use crate::utils::error::Result;

/// Where saved address books live.
pub trait Storage {
    fn read_to_string(&self, path: &str) -> Result<String>;
    /// Returns the full path that was written.
    fn write(&self, path: &str, data: &[u8]) -> Result<String>;
}

pub trait ConfigProvider {
    fn data_dir(&self) -> &str;
    fn default_file(&self) -> &str;
    fn quote_special(&self) -> bool;
}

/// Capability interface over the record store.
///
/// `field` is a search token (`name`, `n`, `phone`, ...). When several
/// records match, `choose` receives them in store order and returns the
/// index of the one to act on; it is not called for a single match.
pub trait ContactRepository {
    fn add(&mut self, contact: Contact);

    fn find_all(&self, field: &str, value: &str) -> Result<Vec<Contact>>;

    fn delete_matching<C>(&mut self, field: &str, value: &str, choose: C) -> Result<Contact>
    where
        C: FnOnce(&[&Contact]) -> Result<usize>;

    fn modify_matching<C, U>(
        &mut self,
        field: &str,
        value: &str,
        choose: C,
        update: U,
    ) -> Result<Modification>
    where
        C: FnOnce(&[&Contact]) -> Result<usize>,
        U: FnOnce(&Contact) -> Result<ContactUpdate>;

    /// Snapshot of every record, or `None` when there are none.
    fn all(&self) -> Option<Vec<Contact>>;
}
