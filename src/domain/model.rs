use crate::utils::error::ContactError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Column labels written as the first line of every saved file.
pub const HEADER_LABELS: [&str; 5] = ["姓名", "性别", "电话", "班级", "备注"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub gender: String,
    pub phone: String,
    pub class_name: String,
    pub note: String,
}

impl Contact {
    pub fn new(
        name: impl Into<String>,
        gender: impl Into<String>,
        phone: impl Into<String>,
        class_name: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            gender: gender.into(),
            phone: phone.into(),
            class_name: class_name.into(),
            note: note.into(),
        }
    }

    /// Fields in file column order.
    pub fn fields(&self) -> [&str; 5] {
        [
            &self.name,
            &self.gender,
            &self.phone,
            &self.class_name,
            &self.note,
        ]
    }

    pub fn apply(&mut self, update: ContactUpdate) -> bool {
        match update {
            ContactUpdate::Name(v) => self.name = v,
            ContactUpdate::Gender(v) => self.gender = v,
            ContactUpdate::Phone(v) => self.phone = v,
            ContactUpdate::Class(v) => self.class_name = v,
            ContactUpdate::Note(v) => self.note = v,
            ContactUpdate::All(contact) => *self = contact,
            ContactUpdate::Cancel => return false,
        }
        true
    }
}

// 固定欄寬輸出
impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<20}{:<10}{:<20}{:<20}{:<20}",
            self.name, self.gender, self.phone, self.class_name, self.note
        )
    }
}

/// Header row for `Contact`'s table output. The labels are double-width
/// glyphs, so each column is padded two cells wider than the data rows.
pub fn render_header() -> String {
    format!(
        "{:<22}{:<12}{:<22}{:<22}{:<22}",
        HEADER_LABELS[0], HEADER_LABELS[1], HEADER_LABELS[2], HEADER_LABELS[3], HEADER_LABELS[4]
    )
}

/// Fields that can be used as a lookup key. The note is deliberately not one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Name,
    Gender,
    Phone,
    Class,
}

impl SearchField {
    pub fn accessor(self) -> fn(&Contact) -> &str {
        fn name(c: &Contact) -> &str {
            &c.name
        }
        fn gender(c: &Contact) -> &str {
            &c.gender
        }
        fn phone(c: &Contact) -> &str {
            &c.phone
        }
        fn class_name(c: &Contact) -> &str {
            &c.class_name
        }

        match self {
            SearchField::Name => name,
            SearchField::Gender => gender,
            SearchField::Phone => phone,
            SearchField::Class => class_name,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SearchField::Name => "name",
            SearchField::Gender => "gender",
            SearchField::Phone => "phone",
            SearchField::Class => "class",
        }
    }
}

impl FromStr for SearchField {
    type Err = ContactError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_lowercase().as_str() {
            "name" | "n" => Ok(SearchField::Name),
            "gender" | "g" => Ok(SearchField::Gender),
            "phone" | "p" => Ok(SearchField::Phone),
            "class" | "c" => Ok(SearchField::Class),
            _ => Err(ContactError::InvalidField {
                token: token.to_string(),
            }),
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A field-level change picked by the caller once a record is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactUpdate {
    Name(String),
    Gender(String),
    Phone(String),
    Class(String),
    Note(String),
    All(Contact),
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modification {
    Updated(Contact),
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// 1-based line number, header included.
    pub line: usize,
    pub raw: String,
    pub reason: String,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {} ({})", self.line, self.raw, self.reason)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoded {
    pub contacts: Vec<Contact>,
    pub warnings: Vec<ParseWarning>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub path: String,
    pub loaded: usize,
    pub warnings: Vec<ParseWarning>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_field_tokens() {
        assert_eq!("name".parse::<SearchField>().unwrap(), SearchField::Name);
        assert_eq!("N".parse::<SearchField>().unwrap(), SearchField::Name);
        assert_eq!("Gender".parse::<SearchField>().unwrap(), SearchField::Gender);
        assert_eq!("p".parse::<SearchField>().unwrap(), SearchField::Phone);
        assert_eq!(" CLASS ".parse::<SearchField>().unwrap(), SearchField::Class);
    }

    #[test]
    fn test_note_is_not_a_search_field() {
        let err = "note".parse::<SearchField>().unwrap_err();
        assert!(matches!(err, ContactError::InvalidField { token } if token == "note"));
        assert!("".parse::<SearchField>().is_err());
        assert!("phones".parse::<SearchField>().is_err());
    }

    #[test]
    fn test_accessor_reads_the_right_field() {
        let contact = Contact::new("Alice", "F", "111", "C1", "memo");
        assert_eq!(SearchField::Name.accessor()(&contact), "Alice");
        assert_eq!(SearchField::Gender.accessor()(&contact), "F");
        assert_eq!(SearchField::Phone.accessor()(&contact), "111");
        assert_eq!(SearchField::Class.accessor()(&contact), "C1");
    }

    #[test]
    fn test_apply_updates() {
        let mut contact = Contact::new("Alice", "F", "111", "C1", "");
        assert!(contact.apply(ContactUpdate::Phone("222".into())));
        assert_eq!(contact.phone, "222");

        assert!(!contact.apply(ContactUpdate::Cancel));
        assert_eq!(contact, Contact::new("Alice", "F", "222", "C1", ""));

        let replacement = Contact::new("Bob", "M", "333", "C2", "x");
        assert!(contact.apply(ContactUpdate::All(replacement.clone())));
        assert_eq!(contact, replacement);
    }

    #[test]
    fn test_display_pads_columns() {
        let line = Contact::new("Al", "F", "1", "C", "n").to_string();
        assert_eq!(line.len(), 90);
        assert!(line.starts_with("Al                  F         1"));
    }

    #[test]
    fn test_header_leaves_room_for_wide_labels() {
        let header = render_header();
        assert_eq!(header.chars().count(), 100);
        assert!(header.starts_with(&format!("姓名{}性别{}电话", " ".repeat(20), " ".repeat(10))));
    }
}
