//! EndNote XML title collections.
//!
//! EndNote exports its library as XML with one `<record>` per reference.
//! Only the primary title of each record is read.
//!
//! # Example
//!
//! ```
//! use bibcompare::{EndNoteXmlLoader, TitleLoader};
//!
//! let xml_content = r#"
//! <?xml version="1.0" encoding="UTF-8"?>
//! <xml>
//!   <records>
//!     <record>
//!       <ref-type name="Journal Article">17</ref-type>
//!       <contributors>
//!         <authors>
//!           <author>Doe, John</author>
//!         </authors>
//!       </contributors>
//!       <titles>
//!         <title><style face="normal" font="default" size="100%">Sample Research Article</style></title>
//!         <secondary-title><style face="normal" font="default" size="100%">Journal of Science</style></secondary-title>
//!       </titles>
//!     </record>
//!   </records>
//! </xml>
//! "#;
//!
//! let records = EndNoteXmlLoader::new().parse(xml_content).unwrap();
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].title(), "Sample Research Article");
//! ```

mod parse;

use crate::error::ParseError;
use crate::{Record, TitleLoader};
use parse::parse_endnote_xml;

/// Loader for EndNote XML exports.
#[derive(Debug, Clone, Default)]
pub struct EndNoteXmlLoader;

impl EndNoteXmlLoader {
    /// Creates a new EndNote XML loader instance.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TitleLoader for EndNoteXmlLoader {
    /// Extract titles from EndNote XML.
    ///
    /// # Examples
    ///
    /// ```
    /// use bibcompare::{EndNoteXmlLoader, TitleLoader};
    ///
    /// let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
    /// <xml><records><record>
    /// <titles><title>Test Title</title></titles>
    /// </record></records></xml>"#;
    ///
    /// let records = EndNoteXmlLoader::new().parse(xml).unwrap();
    /// assert_eq!(records[0].title(), "Test Title");
    /// ```
    fn parse(&self, input: &str) -> Result<Vec<Record>, ParseError> {
        parse_endnote_xml(input.trim_start_matches('\u{feff}'))
    }
}
