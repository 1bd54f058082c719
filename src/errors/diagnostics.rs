use std::{collections::HashMap, fs, path::Path, rc::Rc};

use thiserror::Error as ThisError;
use tracing::debug;

use crate::{get_line_at_position, Span};

use super::errors::{Error, ErrorImpl};

/// Collects every diagnostic recorded during one compile invocation.
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: Vec<Error>,
    sources: HashMap<Rc<String>, String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics::default()
    }

    /// Registers the text of a file so its diagnostics can be rendered
    /// without touching the filesystem. Returns the shared file name used
    /// by every span in that file.
    pub fn add_source(&mut self, name: &str, contents: &str) -> Rc<String> {
        let file = Rc::new(String::from(name));
        self.sources.insert(Rc::clone(&file), String::from(contents));
        file
    }

    pub fn record(&mut self, error: Error) {
        self.errors.push(error);
    }

    pub fn add(&mut self, error: ErrorImpl, span: &Span) {
        self.record(Error::new(error, span.clone()));
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Consumes the sink. Fails with every recorded error rendered in
    /// recording order.
    pub fn validate(self) -> Result<(), AggregatedErrors> {
        if self.errors.is_empty() {
            return Ok(());
        }

        debug!(count = self.errors.len(), "compilation failed");
        let messages = self.errors.iter().map(|error| self.render(error)).collect();
        Err(AggregatedErrors { messages })
    }

    fn render(&self, error: &Error) -> String {
        let span = error.get_span();
        let file = span.file();

        let contents = match self.sources.get(file) {
            Some(contents) => contents.clone(),
            None => fs::read_to_string(file.as_str()).unwrap_or_default(),
        };

        let (line_number, line, column) = get_line_at_position(&contents, span.start.0);
        let width = contents
            .get(span.start.0..span.end.0)
            .map_or(0, |text| text.chars().count())
            .max(1);

        format!(
            "{}:{}:{}: {}\n{}\n{}{}",
            descriptor(file),
            line_number,
            column + 1,
            error,
            line,
            " ".repeat(column),
            "^".repeat(width)
        )
    }
}

fn descriptor(file: &str) -> String {
    Path::new(file)
        .file_name()
        .map_or_else(|| String::from(file), |name| name.to_string_lossy().into_owned())
}

/// The failure produced by [`Diagnostics::validate`].
#[derive(ThisError, Debug, Clone)]
#[error("{}", .messages.join("\n\n"))]
pub struct AggregatedErrors {
    pub messages: Vec<String>,
}
