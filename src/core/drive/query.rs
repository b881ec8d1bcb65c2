use std::fmt;

use crate::core::drive::drive_models::SearchFilter;

/// One predicate of a Drive search expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    MimeType(String),
    NameContains(String),
}

/// A Drive search query, held as a predicate list and rendered to the
/// provider's query grammar only at the transport boundary.
///
/// Values are kept raw here; `render` escapes them, so a file name filter
/// containing `'` cannot break out of the quoted literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveQuery {
    predicates: Vec<Predicate>,
}

const PDF_MIME_TYPE: &str = "application/pdf";

impl DriveQuery {
    /// Composes the query for a search filter. The PDF restriction is always
    /// present; non-empty filter fields append name-contains predicates in
    /// free-text, key, artist order. Pure, no failure modes.
    pub fn build(filter: &SearchFilter) -> Self {
        let mut predicates = vec![Predicate::MimeType(PDF_MIME_TYPE.to_string())];

        for value in [&filter.query, &filter.key, &filter.artist] {
            if let Some(value) = value {
                if !value.is_empty() {
                    predicates.push(Predicate::NameContains(value.clone()));
                }
            }
        }

        Self { predicates }
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Renders the conjunction in the Drive query grammar.
    pub fn render(&self) -> String {
        self.predicates
            .iter()
            .map(|predicate| match predicate {
                Predicate::MimeType(mime) => format!("mimeType='{}'", escape(mime)),
                Predicate::NameContains(value) => {
                    format!("name contains '{}'", escape(value))
                }
            })
            .collect::<Vec<_>>()
            .join(" and ")
    }
}

impl fmt::Display for DriveQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Escapes a value for a single-quoted Drive query literal.
fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
