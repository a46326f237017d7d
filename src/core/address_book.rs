use crate::adapters::storage::LocalStorage;
use crate::core::codec::{normalize_save_name, CsvCodec};
use crate::core::store::ContactStore;
use crate::core::{
    ConfigProvider, Contact, ContactRepository, ContactUpdate, LoadReport, Modification, Storage,
};
use crate::utils::error::Result;

/// The entry points the console front end drives: an in-memory store plus
/// the codec and storage used to save and load it.
pub struct AddressBook<S: Storage> {
    store: ContactStore,
    codec: CsvCodec,
    storage: S,
}

impl AddressBook<LocalStorage> {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(
            LocalStorage::new(config.data_dir().to_string()),
            CsvCodec::new(config.quote_special()),
        )
    }
}

impl<S: Storage> AddressBook<S> {
    pub fn new(storage: S, codec: CsvCodec) -> Self {
        Self {
            store: ContactStore::new(),
            codec,
            storage,
        }
    }

    pub fn store(&self) -> &ContactStore {
        &self.store
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn add(&mut self, contact: Contact) {
        tracing::info!("Adding contact {}", contact.name);
        self.store.add(contact);
    }

    pub fn find(&self, field: &str, value: &str) -> Result<Vec<Contact>> {
        self.store.find_all(field, value)
    }

    pub fn delete<C>(&mut self, field: &str, value: &str, choose: C) -> Result<Contact>
    where
        C: FnOnce(&[&Contact]) -> Result<usize>,
    {
        let removed = self.store.delete_matching(field, value, choose)?;
        tracing::info!("Deleted contact {} ({})", removed.name, removed.phone);
        Ok(removed)
    }

    pub fn modify<C, U>(
        &mut self,
        field: &str,
        value: &str,
        choose: C,
        update: U,
    ) -> Result<Modification>
    where
        C: FnOnce(&[&Contact]) -> Result<usize>,
        U: FnOnce(&Contact) -> Result<ContactUpdate>,
    {
        let outcome = self.store.modify_matching(field, value, choose, update)?;
        match &outcome {
            Modification::Updated(contact) => tracing::info!("Updated contact {}", contact.name),
            Modification::Unchanged => tracing::debug!("Modification cancelled"),
        }
        Ok(outcome)
    }

    pub fn all(&self) -> Option<Vec<Contact>> {
        self.store.all()
    }

    /// Writes the book to `name`, adding a `.csv` suffix when needed.
    /// Nothing is written if the book is empty or cannot be encoded.
    pub fn save(&self, name: &str) -> Result<String> {
        let text = self.codec.encode(self.store.contacts())?;
        let file_name = normalize_save_name(name);
        let path = self.storage.write(&file_name, text.as_bytes())?;
        tracing::info!("Saved {} contacts to {}", self.store.len(), path);
        Ok(path)
    }

    /// Replaces the book with the contents of `name`. On read failure the
    /// current contents are kept.
    pub fn load(&mut self, name: &str) -> Result<LoadReport> {
        let text = self.storage.read_to_string(name)?;
        let decoded = self.codec.decode(&text);

        for warning in &decoded.warnings {
            tracing::warn!("Skipped {}: {}", name, warning);
        }

        let loaded = decoded.contacts.len();
        self.store.replace_all(decoded.contacts);
        tracing::info!("Loaded {} contacts from {}", loaded, name);

        Ok(LoadReport {
            path: name.to_string(),
            loaded,
            warnings: decoded.warnings,
        })
    }
}
