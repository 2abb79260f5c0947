//! Title normalization.
//!
//! Citation exports disagree on capitalization, accents, entity encoding and
//! inline formatting markup. [`normalize`] reduces a title to a canonical
//! comparison key so that those differences disappear while the actual wording
//! and spacing of the title are preserved.
//!
//! # Example
//!
//! ```
//! use bibcompare::normalize;
//!
//! assert_eq!(normalize("Café <i>Study</i>"), "cafe study");
//! assert_eq!(normalize("A &amp; B"), normalize("a & b"));
//! assert_ne!(normalize("a  b"), normalize("ab"));
//! ```

use crate::regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Anything between `<` and the nearest `>`, e.g. `<i>`, `</sup>`.
static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<.*?>").unwrap());

static ENTITY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[A-Za-z][A-Za-z0-9]*)(;?)").unwrap()
});

/// Named references that browsers resolve without a trailing `;`.
const LEGACY_ENTITIES: &[&str] = &[
    "AElig", "AMP", "Aacute", "Acirc", "Agrave", "Aring", "Atilde", "Auml", "COPY", "Ccedil",
    "ETH", "Eacute", "Ecirc", "Egrave", "Euml", "GT", "Iacute", "Icirc", "Igrave", "Iuml", "LT",
    "Ntilde", "Oacute", "Ocirc", "Ograve", "Oslash", "Otilde", "Ouml", "QUOT", "REG", "THORN",
    "Uacute", "Ucirc", "Ugrave", "Uuml", "Yacute", "aacute", "acirc", "acute", "aelig", "agrave",
    "amp", "aring", "atilde", "auml", "brvbar", "ccedil", "cedil", "cent", "copy", "curren",
    "deg", "divide", "eacute", "ecirc", "egrave", "eth", "euml", "frac12", "frac14", "frac34",
    "gt", "iacute", "icirc", "iexcl", "igrave", "iquest", "iuml", "laquo", "lt", "macr",
    "micro", "middot", "nbsp", "not", "ntilde", "oacute", "ocirc", "ograve", "ordf", "ordm",
    "oslash", "otilde", "ouml", "para", "plusmn", "pound", "quot", "raquo", "reg", "sect",
    "shy", "sup1", "sup2", "sup3", "szlig", "thorn", "times", "uacute", "ucirc", "ugrave", "uml",
    "uuml", "yacute", "yen", "yuml",
];

/// Characters removed from every title: ASCII punctuation plus the typographic
/// dashes and curly quotes common in database exports.
pub const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~—–“’”";

/// Normalize a citation title into its comparison key.
///
/// Steps, in order:
///
/// 1. Canonical (NFD) decomposition, keeping only ASCII characters. Accented
///    letters fold to their base letter; characters with no ASCII base are
///    dropped.
/// 2. HTML/XML character references are decoded (`&amp;`, `&#233;`, `&eacute;`).
///    The `;` is optional for numeric references and for the legacy names
///    browsers accept without it (`&amp`, `&eacute`). `&#0;` and invalid code
///    points become U+FFFD. Unknown references are left untouched. Decoded
///    characters are folded to ASCII as in step 1.
/// 3. Lowercasing.
/// 4. Removal of tag-shaped substrings (`<` up to the nearest `>`). This is a
///    lexical strip: nested or malformed markup is not balanced, and literal
///    `<...>` text is removed too.
/// 5. Removal of every character in [`PUNCTUATION`].
///
/// Whitespace is neither removed nor collapsed. The function is total and
/// idempotent.
pub fn normalize(input: &str) -> String {
    let mut text = fold_to_ascii(input);
    if let Some(decoded) = decode_entities(&text) {
        text = fold_to_ascii(&decoded);
    }
    text.make_ascii_lowercase();

    let mut cleaned = TAG_REGEX.replace_all(&text, "").into_owned();
    cleaned.retain(|c| !PUNCTUATION.contains(c));
    cleaned
}

/// NFD-decompose and drop everything outside ASCII.
fn fold_to_ascii(input: &str) -> String {
    if input.is_ascii() {
        return input.to_string();
    }
    input.nfd().filter(|c| c.is_ascii()).collect()
}

/// Decode character references, or `None` when the text has none.
fn decode_entities(text: &str) -> Option<String> {
    if !text.contains('&') {
        return None;
    }
    match ENTITY_REGEX.replace_all(text, |caps: &Captures| resolve_entity(caps)) {
        Cow::Borrowed(_) => None,
        Cow::Owned(decoded) => Some(decoded),
    }
}

fn resolve_entity(caps: &Captures) -> String {
    let whole = &caps[0];
    let name = &caps[1];
    let terminated = !caps[2].is_empty();

    if let Some(number) = name.strip_prefix('#') {
        let code = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16),
            None => number.parse::<u32>(),
        };
        let decoded = code
            .ok()
            .filter(|&code| code != 0)
            .and_then(char::from_u32)
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        return decoded.to_string();
    }

    resolve_named(name, terminated).unwrap_or_else(|| whole.to_string())
}

/// Resolve a named reference. Without a `;` only the legacy names apply, and
/// the longest legacy prefix wins (`&copyright` reads as `©right`).
fn resolve_named(name: &str, terminated: bool) -> Option<String> {
    use quick_xml::escape::resolve_html5_entity;

    if terminated || LEGACY_ENTITIES.contains(&name) {
        if let Some(value) = resolve_html5_entity(name) {
            return Some(value.to_string());
        }
    }

    let longest = if terminated { name.len() } else { name.len() - 1 };
    (2..=longest).rev().find_map(|end| {
        let prefix = &name[..end];
        if !LEGACY_ENTITIES.contains(&prefix) {
            return None;
        }
        let value = resolve_html5_entity(prefix)?;
        let semicolon = if terminated { ";" } else { "" };
        Some(format!("{value}{}{semicolon}", &name[end..]))
    })
}
