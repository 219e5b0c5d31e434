//! Recognition of `@username` mentions in tweet text.
//!
//! A mention is an `@` followed by one to fifteen username characters. The mention cannot be
//! immediately preceded or followed by a username character, which means that an email address
//! like `bitdiddle@mit.edu` does not mention `mit`, and an overlong name is rejected rather than
//! truncated.

use crate::username::{Username, is_username_char};
use regex::{Matches, Regex};
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// The longest name that can be mentioned.
pub const MAX_MENTION_LEN: usize = 15;

// Each match is a maximal run of username characters, so the right boundary always holds and only
// the length and the character before the `@` need to be checked.
const MENTION_CANDIDATE_PATTERN: &str = r"@[A-Za-z0-9_-]+";

static MENTION_CANDIDATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(MENTION_CANDIDATE_PATTERN).unwrap());

/// The distinct users mentioned in the text.
///
/// Names are compared case-insensitively, and the first spelling found is the one kept.
pub fn mentions(text: &str) -> BTreeSet<Username> {
    Mentions::new(text).map(Username::new_unchecked).collect()
}

/// Iterator over the names (without the `@`) of valid mentions, in the order they appear.
///
/// Repeated mentions are not removed.
pub struct Mentions<'a> {
    text: &'a str,
    candidates: Matches<'static, 'a>,
}

impl<'a> Mentions<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            candidates: MENTION_CANDIDATE_RE.find_iter(text),
        }
    }
}

impl<'a> Iterator for Mentions<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        for candidate in self.candidates.by_ref() {
            let attached = self.text[..candidate.start()]
                .chars()
                .next_back()
                .is_some_and(is_username_char);

            // Skip the `@`, which is a single byte.
            let name = &candidate.as_str()[1..];

            if !attached && name.len() <= MAX_MENTION_LEN {
                return Some(name);
            }
        }

        None
    }
}
