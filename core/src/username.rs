use serde::{
    de::{Deserialize, Deserializer, Unexpected, Visitor},
    ser::{Serialize, Serializer},
};
use std::cmp::Ordering;
use std::fmt::Display;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Eq, PartialEq)]
pub enum Error {
    #[error("Empty username")]
    Empty,
    #[error("Invalid username character")]
    InvalidChar(String),
}

/// Characters allowed in a username: ASCII letters, digits, underscore, and hyphen.
pub fn is_username_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '-'
}

/// A case-insensitive username.
///
/// The original spelling is kept for display, while equality, ordering, and hashing all use a
/// lower-cased key, so "ernie" and "ERNie" are the same user. Ordered collections keyed by
/// `Username` keep whichever spelling was inserted first.
#[derive(Clone, Debug)]
pub struct Username {
    name: String,
    key: String,
}

impl Username {
    pub(crate) fn new_unchecked<S: Into<String>>(name: S) -> Self {
        let name = name.into();
        let key = name.to_ascii_lowercase();

        Self { name, key }
    }

    pub fn parse(input: &str) -> Result<Self, Error> {
        if input.is_empty() {
            Err(Error::Empty)
        } else if input.chars().all(is_username_char) {
            Ok(Self::new_unchecked(input))
        } else {
            Err(Error::InvalidChar(input.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// The lower-cased form used for comparison.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn matches(&self, other: &str) -> bool {
        self.name.eq_ignore_ascii_case(other)
    }
}

impl PartialEq for Username {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Username {}

impl Hash for Username {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for Username {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Username {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

impl FromStr for Username {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'de> Deserialize<'de> for Username {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct UsernameVisitor;

        impl Visitor<'_> for UsernameVisitor {
            type Value = Username;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("struct Username")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse()
                    .map_err(|_| serde::de::Error::invalid_value(Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_str(UsernameVisitor)
    }
}

impl Serialize for Username {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
