use crate::{
    Error,
    mention::mentions,
    timespan::Timespan,
    tweet::TweetRecord,
    username::Username,
};
use std::collections::BTreeSet;

/// The smallest timespan containing the timestamp of every tweet.
///
/// An empty list of tweets gives the degenerate timespan at [`crate::timespan::EPOCH`].
pub fn timespan<T: TweetRecord>(tweets: &[T]) -> Timespan {
    Timespan::covering(tweets.iter().map(|tweet| tweet.timestamp())).unwrap_or_default()
}

/// The users mentioned in a single tweet.
pub fn mentioned_in<T: TweetRecord>(tweet: &T) -> Result<BTreeSet<Username>, Error> {
    tweet
        .text()
        .map(mentions)
        .ok_or(Error::MissingText(tweet.id()))
}

/// The users mentioned anywhere in the tweets.
pub fn mentioned_users<T: TweetRecord>(tweets: &[T]) -> Result<BTreeSet<Username>, Error> {
    let mut users = BTreeSet::new();

    for tweet in tweets {
        users.extend(mentioned_in(tweet)?);
    }

    Ok(users)
}
