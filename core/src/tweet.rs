use crate::username::Username;
use chrono::{DateTime, Utc};

/// Read-only access to the fields of a tweet.
///
/// Records read from archives may be missing their author or text (for example when a tweet was
/// withheld), so these accessors are optional. Operations that need a missing field fail with
/// [`crate::Error`].
pub trait TweetRecord {
    fn id(&self) -> u64;
    fn author(&self) -> Option<&Username>;
    fn text(&self) -> Option<&str>;
    fn timestamp(&self) -> DateTime<Utc>;
}

/// A complete tweet.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Tweet {
    id: u64,
    author: Username,
    text: String,
    timestamp: DateTime<Utc>,
}

impl Tweet {
    pub fn new<S: Into<String>>(
        id: u64,
        author: Username,
        text: S,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            author,
            text: text.into(),
            timestamp,
        }
    }
}

impl TweetRecord for Tweet {
    fn id(&self) -> u64 {
        self.id
    }

    fn author(&self) -> Option<&Username> {
        Some(&self.author)
    }

    fn text(&self) -> Option<&str> {
        Some(&self.text)
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// A tweet as found in an archive, where the author or text may be absent.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ArchivedTweet {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Username>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl TweetRecord for ArchivedTweet {
    fn id(&self) -> u64 {
        self.id
    }

    fn author(&self) -> Option<&Username> {
        self.author.as_ref()
    }

    fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl From<Tweet> for ArchivedTweet {
    fn from(value: Tweet) -> Self {
        Self {
            id: value.id,
            author: Some(value.author),
            text: Some(value.text),
            timestamp: value.timestamp,
        }
    }
}

impl TryFrom<ArchivedTweet> for Tweet {
    type Error = crate::Error;

    fn try_from(value: ArchivedTweet) -> Result<Self, Self::Error> {
        let author = value.author.ok_or(crate::Error::MissingAuthor(value.id))?;
        let text = value.text.ok_or(crate::Error::MissingText(value.id))?;

        Ok(Self::new(value.id, author, text, value.timestamp))
    }
}
