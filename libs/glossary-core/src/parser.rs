//! Markdown parser for glossary files.
//!
//! # Format
//! ```markdown
//! T: Ontology
//! D: Assumptions about the nature of reality.
//!
//! T: Triangulation
//! D: Using multiple methods or data sources
//! to strengthen findings.
//! ```

use crate::error::ParseError;
use crate::types::GlossaryEntry;

/// Parse markdown content into glossary entries, in file order.
pub fn parse_glossary(content: &str) -> Result<Vec<GlossaryEntry>, ParseError> {
    if content.trim().is_empty() {
        return Ok(vec![]);
    }

    let mut entries = Vec::new();
    let mut parser = Parser::new();

    for (idx, line) in content.lines().enumerate() {
        parser.process_line(line, idx + 1, &mut entries)?;
    }

    parser.finalize(&mut entries)?;
    Ok(entries)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Term,
    Definition,
}

struct EntryBuilder {
    term: Option<String>,
    definition: Option<String>,
    start_line: usize,
}

impl EntryBuilder {
    fn new(start_line: usize) -> Self {
        Self {
            term: None,
            definition: None,
            start_line,
        }
    }

    /// Blank fields count as missing.
    fn build(self) -> Result<GlossaryEntry, ParseError> {
        let term = non_blank(self.term).ok_or(ParseError::MissingTerm {
            line: self.start_line,
        })?;
        let definition = non_blank(self.definition).ok_or(ParseError::MissingDefinition {
            line: self.start_line,
        })?;

        Ok(GlossaryEntry::new(term, definition))
    }
}

fn non_blank(field: Option<String>) -> Option<String> {
    field
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

struct Parser {
    current: Option<EntryBuilder>,
    current_field: Option<Field>,
    buffer: Vec<String>,
}

impl Parser {
    fn new() -> Self {
        Self {
            current: None,
            current_field: None,
            buffer: Vec::new(),
        }
    }

    fn process_line(
        &mut self,
        line: &str,
        line_num: usize,
        entries: &mut Vec<GlossaryEntry>,
    ) -> Result<(), ParseError> {
        match Self::parse_line(line) {
            LineType::Term(text) => self.handle_term(text, line_num, entries)?,
            LineType::Definition(text) => self.handle_definition(text, line_num),
            LineType::Text(text) => self.buffer.push(text.to_string()),
            LineType::Empty => self.handle_blank(entries)?,
        }
        Ok(())
    }

    fn parse_line(line: &str) -> LineType<'_> {
        let trimmed = line.trim();

        if let Some(rest) = trimmed.strip_prefix("T:") {
            LineType::Term(rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("D:") {
            LineType::Definition(rest.trim())
        } else if trimmed.is_empty() {
            LineType::Empty
        } else {
            LineType::Text(trimmed)
        }
    }

    fn handle_term(
        &mut self,
        text: &str,
        line_num: usize,
        entries: &mut Vec<GlossaryEntry>,
    ) -> Result<(), ParseError> {
        self.close_entry(entries)?;
        self.current = Some(EntryBuilder::new(line_num));
        self.current_field = Some(Field::Term);
        self.buffer.push(text.to_string());
        Ok(())
    }

    fn handle_definition(&mut self, text: &str, line_num: usize) {
        self.flush_buffer();
        if self.current.is_none() {
            // definition without a term; reported when the entry closes
            self.current = Some(EntryBuilder::new(line_num));
        }
        self.current_field = Some(Field::Definition);
        self.buffer.push(text.to_string());
    }

    /// Blank lines end an entry once it has a definition.
    fn handle_blank(&mut self, entries: &mut Vec<GlossaryEntry>) -> Result<(), ParseError> {
        if self.current_field == Some(Field::Definition) {
            self.close_entry(entries)?;
        }
        Ok(())
    }

    fn flush_buffer(&mut self) {
        if self.buffer.is_empty() {
            return;
        }

        let content = self.buffer.join(" ");
        self.buffer.clear();

        if let Some(ref mut entry) = self.current {
            match self.current_field {
                Some(Field::Term) => entry.term = Some(content),
                Some(Field::Definition) => entry.definition = Some(content),
                None => {}
            }
        }
    }

    fn close_entry(&mut self, entries: &mut Vec<GlossaryEntry>) -> Result<(), ParseError> {
        self.flush_buffer();
        self.current_field = None;

        if let Some(entry) = self.current.take() {
            entries.push(entry.build()?);
        }
        Ok(())
    }

    fn finalize(mut self, entries: &mut Vec<GlossaryEntry>) -> Result<(), ParseError> {
        self.close_entry(entries)
    }
}

enum LineType<'a> {
    Term(&'a str),
    Definition(&'a str),
    Text(&'a str),
    Empty,
}
