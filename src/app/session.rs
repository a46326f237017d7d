use crate::app::terminal::Terminal;
use crate::core::address_book::AddressBook;
use crate::core::{Modification, Storage};
use crate::utils::error::{ContactError, ErrorCategory, Result};
use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::str::FromStr;

const MENU: &str = "\n[1] Add contact\n[2] Delete contact\n[3] Modify contact\n[4] Find contacts\n\
[5] Show all contacts\n[6] Save to file\n[7] Load from file\n[8] Exit";

const FIELD_HINT: &str = "Field to match (name/gender/phone/class)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Delete,
    Modify,
    Find,
    Display,
    Save,
    Load,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = ContactError;

    fn from_str(input: &str) -> std::result::Result<Self, Self::Err> {
        let choice = match input.trim() {
            "1" => MenuChoice::Add,
            "2" => MenuChoice::Delete,
            "3" => MenuChoice::Modify,
            "4" => MenuChoice::Find,
            "5" => MenuChoice::Display,
            "6" => MenuChoice::Save,
            "7" => MenuChoice::Load,
            "8" => MenuChoice::Exit,
            other => {
                return Err(ContactError::InvalidChoice {
                    input: other.to_string(),
                })
            }
        };
        Ok(choice)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Running,
    Exited,
}

/// One interactive run: the address book, the terminal it talks to and the
/// menu state. Domain errors are reported and the loop carries on; only a
/// broken terminal ends it early.
pub struct Session<R, W, S: Storage> {
    book: AddressBook<S>,
    term: Terminal<R, W>,
    default_file: String,
    state: MenuState,
}

impl<R: BufRead, W: Write, S: Storage> Session<R, W, S> {
    pub fn new(book: AddressBook<S>, input: R, output: W, default_file: impl Into<String>) -> Self {
        Self {
            book,
            term: Terminal::new(input, output),
            default_file: default_file.into(),
            state: MenuState::Running,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn into_parts(self) -> (AddressBook<S>, W) {
        (self.book, self.term.into_output())
    }

    pub fn run(&mut self) -> Result<()> {
        while self.state == MenuState::Running {
            self.term.say(MENU)?;
            let outcome = self
                .term
                .prompt("Your choice")
                .and_then(|input| input.parse::<MenuChoice>())
                .and_then(|choice| self.dispatch(choice));
            self.settle(outcome)?;
        }
        Ok(())
    }

    /// Loads a file before the menu starts, reporting failures like any other command.
    pub fn preload(&mut self, name: &str) -> Result<()> {
        let outcome = self.load_file(name);
        self.settle(outcome)
    }

    fn settle(&mut self, outcome: Result<()>) -> Result<()> {
        match outcome {
            Ok(()) => Ok(()),
            Err(ContactError::InputClosed) => {
                tracing::debug!("Input closed, leaving the menu");
                self.state = MenuState::Exited;
                Ok(())
            }
            Err(e) if e.category() == ErrorCategory::Terminal => Err(e),
            Err(e) => self.report(&e),
        }
    }

    fn report(&mut self, error: &ContactError) -> Result<()> {
        tracing::debug!("{} (suggestion: {})", error, error.recovery_suggestion());
        self.term
            .say(&format!("[ERROR] {}", error.user_friendly_message()))
    }

    pub fn dispatch(&mut self, choice: MenuChoice) -> Result<()> {
        match choice {
            MenuChoice::Add => self.add(),
            MenuChoice::Delete => self.delete(),
            MenuChoice::Modify => self.modify(),
            MenuChoice::Find => self.find(),
            MenuChoice::Display => self.display(),
            MenuChoice::Save => self.save(),
            MenuChoice::Load => {
                let name = self.term.prompt("File name")?;
                let name = self.or_default(name);
                self.load_file(&name)
            }
            MenuChoice::Exit => {
                self.state = MenuState::Exited;
                self.term.say("[-] Bye")
            }
        }
    }

    fn or_default(&self, name: String) -> String {
        if name.is_empty() {
            self.default_file.clone()
        } else {
            name
        }
    }

    fn add(&mut self) -> Result<()> {
        let contact = self.term.read_contact()?;
        self.book.add(contact);
        self.term.say("[INFO] Contact added")
    }

    fn delete(&mut self) -> Result<()> {
        let field = self.term.prompt(FIELD_HINT)?;
        let value = self.term.prompt("Value")?;

        let term = &mut self.term;
        let removed = self
            .book
            .delete(&field, &value, |candidates| term.choose(candidates))?;
        term.say(&format!("[INFO] Contact deleted: {}", removed))
    }

    fn modify(&mut self) -> Result<()> {
        let field = self.term.prompt(FIELD_HINT)?;
        let value = self.term.prompt("Value")?;

        // 兩個回呼都要用終端
        let term = RefCell::new(&mut self.term);
        let outcome = self.book.modify(
            &field,
            &value,
            |candidates| term.borrow_mut().choose(candidates),
            |current| term.borrow_mut().read_update(current),
        )?;

        let term = term.into_inner();
        match outcome {
            Modification::Updated(contact) => {
                term.say(&format!("[INFO] Contact updated: {}", contact))
            }
            Modification::Unchanged => term.say("[INFO] No changes made"),
        }
    }

    fn find(&mut self) -> Result<()> {
        let field = self.term.prompt(FIELD_HINT)?;
        let value = self.term.prompt("Value")?;

        let found = self.book.find(&field, &value)?;
        if found.is_empty() {
            return Err(ContactError::NotFound { field, value });
        }
        self.term
            .say(&format!("[INFO] Found {} contact(s):", found.len()))?;
        self.term.show_contacts(&found)
    }

    fn display(&mut self) -> Result<()> {
        let contacts = self.book.all().ok_or(ContactError::EmptyStore)?;
        self.term.say("[INFO] All contacts:")?;
        self.term.show_contacts(&contacts)
    }

    fn save(&mut self) -> Result<()> {
        let name = self.term.prompt("File name")?;
        let name = self.or_default(name);
        let path = self.book.save(&name)?;
        self.term.say(&format!(
            "[INFO] Saved {} contact(s) to {}",
            self.book.len(),
            path
        ))
    }

    fn load_file(&mut self, name: &str) -> Result<()> {
        let report = self.book.load(name)?;
        for warning in &report.warnings {
            self.term.say(&format!(
                "[WARN] Skipped line {}: {}",
                warning.line, warning.raw
            ))?;
        }
        self.term.say(&format!(
            "[INFO] Loaded {} contact(s) from {}",
            report.loaded, report.path
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_choice_parsing() {
        assert_eq!("1".parse::<MenuChoice>().unwrap(), MenuChoice::Add);
        assert_eq!(" 8 ".parse::<MenuChoice>().unwrap(), MenuChoice::Exit);
        assert!(matches!(
            "9".parse::<MenuChoice>(),
            Err(ContactError::InvalidChoice { .. })
        ));
        assert!("add".parse::<MenuChoice>().is_err());
    }
}
