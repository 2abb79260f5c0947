//! EndNote XML title extraction.
//!
//! Titles live at `<xml>/records/record/titles/title`. EndNote wraps the text
//! in a `<style>` element carrying font information, so the text of the first
//! child element is taken as the title; a bare `<title>` contributes its own
//! text instead.

use crate::error::{ParseError, SourceSpan, ValueError};
use crate::{CollectionFormat, Record};
use quick_xml::Reader;
use quick_xml::escape::resolve_html5_entity;
use quick_xml::events::Event;

/// Element names from the document root down to a title's parent.
const TITLES_PATH: [&[u8]; 3] = [b"records", b"record", b"titles"];

/// 1-based line number of byte offset `pos` in `content`.
fn buffer_position_to_line_number(content: &str, pos: usize) -> usize {
    let pos = pos.min(content.len());
    content.as_bytes()[..pos]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}

fn syntax_error(content: &str, pos: usize, message: String) -> ParseError {
    ParseError::at_line(
        buffer_position_to_line_number(content, pos),
        CollectionFormat::EndNoteXml,
        ValueError::Syntax(message),
    )
}

/// Text gathered for one `<title>` element while it is open.
#[derive(Debug)]
struct TitleCapture {
    /// Depth of the `<title>` element in the open-element stack.
    depth: usize,
    /// Text directly inside `<title>`, before its first child element.
    own_text: String,
    /// Text directly inside the first child, before any grandchild.
    first_child: Option<String>,
    in_first_child: bool,
    /// Set once the first child has an element of its own; later text in it
    /// belongs to that element's tail and is ignored.
    first_child_nested: bool,
}

impl TitleCapture {
    fn new(depth: usize) -> Self {
        Self {
            depth,
            own_text: String::new(),
            first_child: None,
            in_first_child: false,
            first_child_nested: false,
        }
    }

    /// An element opened, becoming the `depth`-th open element. `empty` marks
    /// a self-closing tag.
    fn open(&mut self, depth: usize, empty: bool) {
        if depth == self.depth + 1 && self.first_child.is_none() {
            self.first_child = Some(String::new());
            self.in_first_child = !empty;
        } else if self.in_first_child && depth == self.depth + 2 {
            self.first_child_nested = true;
        }
    }

    /// An element closed, leaving `depth` elements open.
    fn close(&mut self, depth: usize) {
        if depth == self.depth {
            self.in_first_child = false;
        }
    }

    /// Text seen with `depth` elements open.
    fn text(&mut self, depth: usize, text: &str) {
        if depth == self.depth && self.first_child.is_none() {
            self.own_text.push_str(text);
        } else if depth == self.depth + 1 && self.in_first_child && !self.first_child_nested {
            if let Some(child) = self.first_child.as_mut() {
                child.push_str(text);
            }
        }
    }

    fn finish(self) -> String {
        self.first_child.unwrap_or(self.own_text)
    }
}

fn is_title_path(stack: &[Vec<u8>], name: &[u8]) -> bool {
    name == b"title"
        && stack.len() == TITLES_PATH.len() + 1
        && stack[1..]
            .iter()
            .zip(TITLES_PATH)
            .all(|(open, wanted)| open.as_slice() == wanted)
}

/// Extract one [`Record`] per EndNote title, in document order.
///
/// Text is kept as the XML layer delivers it: entities and character
/// references are decoded, whitespace is untouched.
pub(crate) fn parse_endnote_xml(content: &str) -> Result<Vec<Record>, ParseError> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(false);

    let mut records = Vec::new();
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut capture: Option<TitleCapture> = None;
    let mut buf = Vec::new();

    loop {
        let pos = reader.buffer_position() as usize;
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = e.name().as_ref().to_vec();
                if let Some(capture) = capture.as_mut() {
                    capture.open(stack.len() + 1, false);
                } else if is_title_path(&stack, &name) {
                    capture = Some(TitleCapture::new(stack.len() + 1));
                }
                stack.push(name);
            }
            Ok(Event::Empty(e)) => {
                if let Some(capture) = capture.as_mut() {
                    capture.open(stack.len() + 1, true);
                } else if is_title_path(&stack, e.name().as_ref()) {
                    records.push(Record::new(String::new(), None::<&str>));
                }
            }
            Ok(Event::End(_)) => {
                stack.pop();
                if capture.as_ref().is_some_and(|c| c.depth > stack.len()) {
                    if let Some(done) = capture.take() {
                        records.push(Record::new(done.finish(), None::<&str>));
                    }
                } else if let Some(capture) = capture.as_mut() {
                    capture.close(stack.len());
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(capture) = capture.as_mut() {
                    let text = e.unescape_with(resolve_html5_entity).map_err(|err| {
                        syntax_error(content, pos, format!("Invalid XML text content: {}", err))
                    })?;
                    capture.text(stack.len(), &text);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(capture) = capture.as_mut() {
                    capture.text(stack.len(), &String::from_utf8_lossy(&e));
                }
            }
            Ok(Event::Eof) => {
                if let Some(open) = stack.last() {
                    let end = reader.buffer_position() as usize;
                    return Err(syntax_error(
                        content,
                        end,
                        format!(
                            "Unexpected EOF while looking for closing tag '{}'",
                            String::from_utf8_lossy(open)
                        ),
                    )
                    .with_span(SourceSpan::new(pos, end)));
                }
                break;
            }
            Err(e) => {
                let pos = reader.buffer_position() as usize;
                return Err(syntax_error(content, pos, format!("XML parsing error: {}", e)));
            }
            _ => (),
        }
        buf.clear();
    }

    Ok(records)
}
