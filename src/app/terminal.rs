use crate::core::{render_header, Contact, ContactUpdate};
use crate::utils::error::{ContactError, Result};
use std::io::{BufRead, Write};

/// Line-oriented prompts over a pair of streams. One value per line, trimmed.
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    pub fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ContactError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    pub fn prompt(&mut self, label: &str) -> Result<String> {
        write!(self.output, "[+] {}: ", label)?;
        self.output.flush()?;
        self.read_line()
    }

    pub fn show_contacts(&mut self, contacts: &[Contact]) -> Result<()> {
        self.say(&render_header())?;
        for contact in contacts {
            self.say(&contact.to_string())?;
        }
        Ok(())
    }

    pub fn read_contact(&mut self) -> Result<Contact> {
        Ok(Contact {
            name: self.prompt("Name")?,
            gender: self.prompt("Gender")?,
            phone: self.prompt("Phone")?,
            class_name: self.prompt("Class")?,
            note: self.prompt("Note")?,
        })
    }

    /// Lists the candidates with their index and reads the caller's pick.
    pub fn choose(&mut self, candidates: &[&Contact]) -> Result<usize> {
        self.say("[!] Several contacts match, pick one by index:")?;
        for (i, contact) in candidates.iter().enumerate() {
            self.say(&format!("[{}] {}", i, contact))?;
        }
        let input = self.prompt("Index")?;
        input
            .parse::<usize>()
            .map_err(|_| ContactError::InvalidChoice { input })
    }

    pub fn read_update(&mut self, current: &Contact) -> Result<ContactUpdate> {
        self.say(&format!("[INFO] Editing: {}", current))?;
        self.say("[1] Name\n[2] Gender\n[3] Phone\n[4] Class\n[5] Note\n[6] All\n[7] Cancel")?;
        let choice = self.prompt("Field to change")?;

        let update = match choice.as_str() {
            "1" => ContactUpdate::Name(self.prompt("New name")?),
            "2" => ContactUpdate::Gender(self.prompt("New gender")?),
            "3" => ContactUpdate::Phone(self.prompt("New phone")?),
            "4" => ContactUpdate::Class(self.prompt("New class")?),
            "5" => ContactUpdate::Note(self.prompt("New note")?),
            "6" => ContactUpdate::All(self.read_contact()?),
            "7" => ContactUpdate::Cancel,
            _ => return Err(ContactError::InvalidChoice { input: choice }),
        };
        Ok(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn terminal(input: &str) -> Terminal<Cursor<Vec<u8>>, Vec<u8>> {
        Terminal::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_prompt_trims_and_detects_eof() {
        let mut term = terminal("  Alice Smith \r\n");
        assert_eq!(term.prompt("Name").unwrap(), "Alice Smith");
        assert!(matches!(term.prompt("Name"), Err(ContactError::InputClosed)));
    }

    #[test]
    fn test_choose_lists_candidates() {
        let a = Contact::new("A", "F", "1", "C", "");
        let b = Contact::new("B", "F", "2", "C", "");
        let mut term = terminal("1\n");
        assert_eq!(term.choose(&[&a, &b]).unwrap(), 1);

        let output = String::from_utf8(term.into_output()).unwrap();
        assert!(output.contains("[0] A"));
        assert!(output.contains("[1] B"));
    }

    #[test]
    fn test_choose_rejects_non_numbers() {
        let a = Contact::default();
        let mut term = terminal("first\n");
        assert!(matches!(
            term.choose(&[&a, &a]),
            Err(ContactError::InvalidChoice { .. })
        ));
    }

    #[test]
    fn test_read_update_choices() {
        let current = Contact::default();
        assert_eq!(
            terminal("3\n999\n").read_update(&current).unwrap(),
            ContactUpdate::Phone("999".into())
        );
        assert_eq!(
            terminal("7\n").read_update(&current).unwrap(),
            ContactUpdate::Cancel
        );
        assert_eq!(
            terminal("6\nEve\nF\n5\nC3\nhi\n").read_update(&current).unwrap(),
            ContactUpdate::All(Contact::new("Eve", "F", "5", "C3", "hi"))
        );
        assert!(terminal("8\n").read_update(&current).is_err());
    }
}
