use anyhow::Result;
use contact_book::{AddressBook, Contact, ContactError, CsvCodec, LocalStorage, Settings};
use tempfile::TempDir;

fn book_in(dir: &TempDir) -> AddressBook<LocalStorage> {
    let settings = Settings {
        data_dir: dir.path().to_str().unwrap().to_string(),
        ..Settings::default()
    };
    AddressBook::from_config(&settings)
}

fn no_choice(_: &[&Contact]) -> contact_book::Result<usize> {
    panic!("chooser must not be called");
}

#[test]
fn test_save_and_load_round_trip() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut book = book_in(&temp_dir);
    book.add(Contact::new("Alice", "F", "111", "C1", ""));
    book.add(Contact::new("Bob", "M", "222", "C2", "x"));

    let path = book.save("class")?;
    assert!(path.ends_with("class.csv"));

    let content = std::fs::read_to_string(temp_dir.path().join("class.csv"))?;
    assert_eq!(content, "姓名,性别,电话,班级,备注\nAlice,F,111,C1,\nBob,M,222,C2,x\n");

    let mut restored = book_in(&temp_dir);
    let report = restored.load("class.csv")?;
    assert_eq!(report.loaded, 2);
    assert!(report.warnings.is_empty());
    assert_eq!(restored.all(), book.all());
    Ok(())
}

#[test]
fn test_load_uses_name_as_given() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("plain"), "header\nA,B,C,D,E\n")?;

    let mut book = book_in(&temp_dir);
    assert_eq!(book.load("plain")?.loaded, 1);

    let err = book.load("plain.csv").unwrap_err();
    assert!(matches!(err, ContactError::IoUnavailable { .. }));
    Ok(())
}

#[test]
fn test_load_replaces_contents_and_reports_bad_lines() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(
        temp_dir.path().join("mixed.csv"),
        "姓名,性别,电话,班级,备注\nBob,M,222,C2,x\nbad,line\n",
    )?;

    let mut book = book_in(&temp_dir);
    book.add(Contact::new("Old", "F", "000", "C0", ""));

    let report = book.load("mixed.csv")?;
    assert_eq!(report.loaded, 1);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].raw, "bad,line");
    assert_eq!(book.all(), Some(vec![Contact::new("Bob", "M", "222", "C2", "x")]));
    Ok(())
}

#[test]
fn test_failed_load_keeps_store() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut book = book_in(&temp_dir);
    book.add(Contact::new("Alice", "F", "111", "C1", ""));

    let err = book.load("missing.csv").unwrap_err();
    assert!(matches!(err, ContactError::IoUnavailable { .. }));
    assert_eq!(book.len(), 1);
    Ok(())
}

#[test]
fn test_empty_book_is_not_saved() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let book = book_in(&temp_dir);

    let err = book.save("empty.csv").unwrap_err();
    assert!(matches!(err, ContactError::EmptyStore));
    assert!(!temp_dir.path().join("empty.csv").exists());
    Ok(())
}

#[test]
fn test_strict_codec_writes_nothing_on_refusal() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let mut book = AddressBook::new(storage, CsvCodec::new(false));
    book.add(Contact::new("Lee, Ann", "F", "1", "C1", ""));

    let err = book.save("strict").unwrap_err();
    assert!(matches!(err, ContactError::UnencodableField { .. }));
    assert!(!temp_dir.path().join("strict.csv").exists());
    Ok(())
}

#[test]
fn test_quoted_fields_survive_save_and_load() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut book = book_in(&temp_dir);
    let tricky = Contact::new("Lee, Ann", "F", "1", "C1", "says \"hi\"");
    book.add(tricky.clone());
    book.save("tricky.csv")?;

    let mut restored = book_in(&temp_dir);
    restored.load("tricky.csv")?;
    assert_eq!(restored.all(), Some(vec![tricky]));
    Ok(())
}

#[test]
fn test_crud_through_the_book() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut book = book_in(&temp_dir);
    book.add(Contact::new("Alice", "F", "111", "C1", ""));
    book.add(Contact::new("Bob", "M", "222", "C2", "x"));

    assert_eq!(book.find("P", "111")?.len(), 1);
    assert!(book.find("phone", "999")?.is_empty());

    book.modify("name", "Bob", no_choice, |_| {
        Ok(contact_book::ContactUpdate::Phone("333".into()))
    })?;
    assert_eq!(book.find("phone", "333")?[0].name, "Bob");

    let removed = book.delete("n", "Alice", no_choice)?;
    assert_eq!(removed.phone, "111");
    assert_eq!(book.len(), 1);
    Ok(())
}
