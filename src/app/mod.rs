// Console front end: menu loop and prompts around the address book.

pub mod session;
pub mod terminal;

pub use session::{MenuChoice, MenuState, Session};
