pub mod extract;
pub mod filter;
pub mod mention;
pub mod social;
pub mod timespan;
pub mod tweet;
pub mod username;

pub use extract::{mentioned_users, timespan};
pub use social::{FollowsGraph, guess_follows_graph, influencers};
pub use timespan::Timespan;
pub use tweet::{ArchivedTweet, Tweet, TweetRecord};
pub use username::Username;

/// A tweet is missing a field that the operation needs.
#[derive(thiserror::Error, Debug, Eq, PartialEq)]
pub enum Error {
    #[error("Missing tweet author")]
    MissingAuthor(u64),
    #[error("Missing tweet text")]
    MissingText(u64),
}
