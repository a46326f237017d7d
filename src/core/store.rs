use crate::core::{Contact, ContactRepository, ContactUpdate, Modification, SearchField};
use crate::utils::error::{ContactError, Result};

/// Ordered, in-memory list of contacts. Duplicates are allowed and identity is positional.
#[derive(Debug, Clone, Default)]
pub struct ContactStore {
    contacts: Vec<Contact>,
}

impl ContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn replace_all(&mut self, contacts: Vec<Contact>) {
        self.contacts = contacts;
    }

    /// Resolves `field = value` to a single position in the store.
    fn resolve<C>(&self, field: SearchField, value: &str, choose: C) -> Result<usize>
    where
        C: FnOnce(&[&Contact]) -> Result<usize>,
    {
        let accessor = field.accessor();
        let positions: Vec<usize> = self
            .contacts
            .iter()
            .enumerate()
            .filter(|&(_, c)| accessor(c) == value)
            .map(|(i, _)| i)
            .collect();

        match positions.len() {
            0 => Err(ContactError::NotFound {
                field: field.label().to_string(),
                value: value.to_string(),
            }),
            1 => Ok(positions[0]),
            count => {
                let candidates: Vec<&Contact> =
                    positions.iter().map(|&i| &self.contacts[i]).collect();
                let index = choose(&candidates)?;
                tracing::debug!("{} candidates for {} = {}, picked {}", count, field, value, index);
                positions
                    .get(index)
                    .copied()
                    .ok_or(ContactError::InvalidSelection {
                        index,
                        candidates: count,
                    })
            }
        }
    }
}

impl ContactRepository for ContactStore {
    fn add(&mut self, contact: Contact) {
        self.contacts.push(contact);
    }

    fn find_all(&self, field: &str, value: &str) -> Result<Vec<Contact>> {
        let field: SearchField = field.parse()?;
        let accessor = field.accessor();
        let found: Vec<Contact> = self
            .contacts
            .iter()
            .filter(|c| accessor(*c) == value)
            .cloned()
            .collect();
        tracing::debug!("find {} = {}: {} match(es)", field, value, found.len());
        Ok(found)
    }

    fn delete_matching<C>(&mut self, field: &str, value: &str, choose: C) -> Result<Contact>
    where
        C: FnOnce(&[&Contact]) -> Result<usize>,
    {
        let field: SearchField = field.parse()?;
        let position = self.resolve(field, value, choose)?;
        Ok(self.contacts.remove(position))
    }

    fn modify_matching<C, U>(
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
        let field: SearchField = field.parse()?;
        let position = self.resolve(field, value, choose)?;
        let change = update(&self.contacts[position])?;

        let contact = &mut self.contacts[position];
        if contact.apply(change) {
            Ok(Modification::Updated(contact.clone()))
        } else {
            Ok(Modification::Unchanged)
        }
    }

    fn all(&self) -> Option<Vec<Contact>> {
        if self.contacts.is_empty() {
            None
        } else {
            Some(self.contacts.clone())
        }
    }
}
