//! Filters that select tweets from a list, preserving the order of the list.

use crate::{Error, timespan::Timespan, tweet::TweetRecord, username::Username};

/// The tweets written by the user.
///
/// Tweets without an author are never included.
pub fn written_by<'a, T: TweetRecord>(tweets: &'a [T], username: &Username) -> Vec<&'a T> {
    tweets
        .iter()
        .filter(|tweet| tweet.author() == Some(username))
        .collect()
}

/// The tweets sent during the timespan, including its endpoints.
pub fn in_timespan<'a, T: TweetRecord>(tweets: &'a [T], timespan: &Timespan) -> Vec<&'a T> {
    tweets
        .iter()
        .filter(|tweet| timespan.contains(tweet.timestamp()))
        .collect()
}

/// The tweets containing at least one of the words.
///
/// Words are compared case-insensitively, and only whole words in the text match. The text is
/// split on whitespace, and a piece also matches after any leading or trailing punctuation is
/// removed, so `rivest?` contains `rivest`. Empty words match nothing.
pub fn containing<'a, T: TweetRecord, S: AsRef<str>>(
    tweets: &'a [T],
    words: &[S],
) -> Result<Vec<&'a T>, Error> {
    let words = words
        .iter()
        .map(|word| word.as_ref().to_lowercase())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>();

    let mut matched = vec![];

    for tweet in tweets {
        let text = tweet.text().ok_or(Error::MissingText(tweet.id()))?;

        if text_contains_any(text, &words) {
            matched.push(tweet);
        }
    }

    Ok(matched)
}

fn text_contains_any(text: &str, lowercase_words: &[String]) -> bool {
    text.split_whitespace().any(|piece| {
        let piece = piece.to_lowercase();
        let trimmed = piece.trim_matches(|ch: char| ch.is_ascii_punctuation());

        lowercase_words
            .iter()
            .any(|word| *word == piece || *word == trimmed)
    })
}
