use crate::core::{Contact, Decoded, ParseWarning, HEADER_LABELS};
use crate::utils::error::{ContactError, Result};
use std::borrow::Cow;
use std::path::Path;

const DELIMITER: char = ',';
const FIELD_COUNT: usize = 5;

/// Reads and writes the flat comma-separated address book format.
///
/// Plain fields are written verbatim. A field containing a comma, a double
/// quote or a line break is quoted when `quote_special` is on; otherwise the
/// record is refused, since the unquoted format cannot represent it.
#[derive(Debug, Clone, Copy)]
pub struct CsvCodec {
    quote_special: bool,
}

impl Default for CsvCodec {
    fn default() -> Self {
        Self::new(true)
    }
}

impl CsvCodec {
    pub fn new(quote_special: bool) -> Self {
        Self { quote_special }
    }

    pub fn encode(&self, contacts: &[Contact]) -> Result<String> {
        if contacts.is_empty() {
            return Err(ContactError::EmptyStore);
        }

        let mut lines = Vec::with_capacity(contacts.len() + 1);
        lines.push(HEADER_LABELS.join(","));

        for (record, contact) in contacts.iter().enumerate() {
            let mut fields = Vec::with_capacity(FIELD_COUNT);
            for field in contact.fields() {
                fields.push(self.encode_field(record, field)?);
            }
            lines.push(fields.join(","));
        }

        let mut text = lines.join("\n");
        text.push('\n');
        Ok(text)
    }

    fn encode_field<'a>(&self, record: usize, field: &'a str) -> Result<Cow<'a, str>> {
        if !needs_quoting(field) {
            return Ok(Cow::Borrowed(field));
        }
        if !self.quote_special {
            return Err(ContactError::UnencodableField {
                record,
                field: field.to_string(),
            });
        }
        Ok(Cow::Owned(format!("\"{}\"", field.replace('"', "\"\""))))
    }

    /// Decodes a saved file. The first line is skipped without looking at it.
    /// Every other line must hold exactly five fields; blank or malformed
    /// lines are reported as warnings and decoding carries on.
    ///
    /// With `quote_special` on, a field opened with `"` may span several
    /// lines. A quote that is never closed is taken literally and only its
    /// own line is used.
    pub fn decode(&self, text: &str) -> Decoded {
        let body = match text.split_once('\n') {
            Some((_, rest)) => rest,
            None => "",
        };

        let mut lines: Vec<&str> = body.split('\n').collect();
        if lines.last() == Some(&"") {
            lines.pop();
        }

        let mut decoded = Decoded::default();
        let mut next = 0;

        while next < lines.len() {
            // 表頭佔第一行
            let line = next + 2;
            let (chunk, quoting, consumed) = self.next_chunk(&lines[next..]);
            next += consumed;

            let warning = |reason: String| ParseWarning {
                line,
                raw: chunk.clone(),
                reason,
            };

            if chunk.is_empty() {
                decoded.warnings.push(warning("empty line".to_string()));
                continue;
            }

            match parse_record(&chunk, quoting) {
                Ok(record) if record.len() == FIELD_COUNT => {
                    decoded.contacts.push(Contact::new(
                        &record[0], &record[1], &record[2], &record[3], &record[4],
                    ));
                }
                Ok(record) => decoded.warnings.push(warning(format!(
                    "expected {} fields, found {}",
                    FIELD_COUNT,
                    record.len()
                ))),
                Err(e) => decoded.warnings.push(warning(e.to_string())),
            }
        }

        decoded
    }

    /// Text of the record starting at `lines[0]`, whether quotes are
    /// interpreted in it, and how many physical lines it covers.
    fn next_chunk(&self, lines: &[&str]) -> (String, bool, usize) {
        let first = lines[0].trim_end_matches('\r');
        let mut quotes = QuoteState::default();
        quotes.feed(lines[0]);
        if !self.quote_special || !quotes.in_quotes {
            return (first.to_string(), self.quote_special, 1);
        }

        let mut chunk = lines[0].to_string();
        for (i, line) in lines.iter().enumerate().skip(1) {
            chunk.push('\n');
            chunk.push_str(line);
            quotes.feed("\n");
            quotes.feed(line);
            if !quotes.in_quotes {
                let chunk = chunk.trim_end_matches('\r').to_string();
                let fits = parse_record(&chunk, true)
                    .map(|record| record.len() == FIELD_COUNT)
                    .unwrap_or(false);
                if fits {
                    return (chunk, true, i + 1);
                }
                break;
            }
        }

        (first.to_string(), false, 1)
    }
}

fn parse_record(chunk: &str, quoting: bool) -> Result<csv::StringRecord> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(quoting)
        .buffer_capacity(chunk.len().max(64))
        .from_reader(chunk.as_bytes());

    let mut record = csv::StringRecord::new();
    reader.read_record(&mut record)?;
    Ok(record)
}

fn needs_quoting(field: &str) -> bool {
    field.contains([DELIMITER, '"', '\r', '\n'])
}

/// Tracks whether text fed so far stops inside a quoted field. A quote only
/// opens a field when it is the field's first character; `""` inside quotes
/// is an escape.
#[derive(Debug, Default)]
struct QuoteState {
    in_quotes: bool,
    mid_field: bool,
}

impl QuoteState {
    fn feed(&mut self, text: &str) {
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            if self.in_quotes {
                if c == '"' {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                    } else {
                        self.in_quotes = false;
                    }
                }
            } else if c == DELIMITER || c == '\n' {
                self.mid_field = false;
                continue;
            } else if c == '"' && !self.mid_field {
                self.in_quotes = true;
            }
            self.mid_field = true;
        }
    }
}

/// Appends `.csv` unless the name already has exactly that extension.
pub fn normalize_save_name(name: &str) -> String {
    match Path::new(name).extension().and_then(|ext| ext.to_str()) {
        Some("csv") => name.to_string(),
        _ => format!("{}.csv", name),
    }
}
