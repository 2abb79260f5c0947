//! The comparison-ready title record.

use crate::normalize::normalize;
use compact_str::CompactString;
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

/// One citation title together with its normalized comparison key.
///
/// Equality and hashing look only at the normalized title, so two records
/// whose raw titles differ in case, accents, entities or markup are the same
/// record as far as sets and maps are concerned. The raw title and the source
/// label are carried along for display and export.
///
/// # Examples
///
/// ```
/// use bibcompare::Record;
///
/// let a = Record::new("Café <i>Study</i>", Some("Title"));
/// let b = Record::from("cafe study");
///
/// assert_eq!(a, b);
/// assert_eq!(a.title(), "Café <i>Study</i>");
/// assert_eq!(a.normalized_title(), "cafe study");
/// assert_eq!(a.source(), Some("Title"));
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    title: String,
    normalized_title: String,
    source: Option<CompactString>,
}

impl Record {
    /// Create a record from a raw title and an optional source label (the
    /// column or element the title was read from).
    #[must_use]
    pub fn new<T, S>(title: T, source: Option<S>) -> Self
    where
        T: Into<String>,
        S: Into<CompactString>,
    {
        let title = title.into();
        let normalized_title = normalize(&title);
        Self {
            title,
            normalized_title,
            source: source.map(Into::into),
        }
    }

    /// The title exactly as it appeared in the source.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The comparison key derived from [`Record::title`].
    pub fn normalized_title(&self) -> &str {
        &self.normalized_title
    }

    /// Where the title came from, if known.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.normalized_title == other.normalized_title
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized_title.hash(state);
    }
}

impl From<&str> for Record {
    fn from(title: &str) -> Self {
        Self::new(title, None::<CompactString>)
    }
}

impl From<String> for Record {
    fn from(title: String) -> Self {
        Self::new(title, None::<CompactString>)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}
