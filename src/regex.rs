//! Regex backend selection.
//!
//! The `regex` feature (default) uses the full `regex` crate; `lite` swaps in
//! `regex-lite` for smaller binaries. Both expose the same subset used here.

#[cfg(feature = "regex")]
pub(crate) use regex::{Captures, Regex};

#[cfg(all(feature = "lite", not(feature = "regex")))]
pub(crate) use regex_lite::{Captures, Regex};

#[cfg(not(any(feature = "regex", feature = "lite")))]
compile_error!("either the `regex` or the `lite` feature must be enabled");
