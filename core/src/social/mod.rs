//! Inferring who follows whom from the mentions in a list of tweets.

use crate::{Error, extract::mentioned_in, tweet::TweetRecord, username::Username};
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use std::collections::{BTreeMap, BTreeSet, btree_map};

pub mod influence;

pub use influence::{Influence, follower_counts, influencers, ranking};

/// A directed graph in which each user maps to the set of users they follow.
///
/// Users never follow themselves. A user who follows nobody may be missing as a key or may map to
/// an empty set, and a followed user does not need to be a key.
///
/// Every spelling of a username in the graph is the first one it was added with, so a user never
/// appears with two different casings.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Serialize)]
#[serde(into = "BTreeMap<Username, BTreeSet<Username>>")]
pub struct FollowsGraph {
    follows: BTreeMap<Username, BTreeSet<Username>>,
    // Every user that is a key or a followee.
    names: BTreeSet<Username>,
}

impl FollowsGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn intern(&mut self, user: Username) -> Username {
        match self.names.get(&user) {
            Some(existing) => existing.clone(),
            None => {
                self.names.insert(user.clone());
                user
            }
        }
    }

    /// Adds the user as a key, with no followees if it was not already present.
    pub fn add_user(&mut self, user: Username) {
        let user = self.intern(user);

        self.follows.entry(user).or_default();
    }

    /// Adds the followees to the follower's set, ignoring the follower itself.
    pub fn add_follows<I: IntoIterator<Item = Username>>(
        &mut self,
        follower: Username,
        followees: I,
    ) {
        let follower = self.intern(follower);
        let followees = followees
            .into_iter()
            .filter(|followee| *followee != follower)
            .map(|followee| self.intern(followee))
            .collect::<Vec<_>>();

        self.follows.entry(follower).or_default().extend(followees);
    }

    pub fn follows(&self, follower: &Username, followee: &Username) -> bool {
        self.follows
            .get(follower)
            .is_some_and(|followees| followees.contains(followee))
    }

    /// The users followed by the given user (empty if the user is not a key).
    pub fn followees(&self, user: &Username) -> impl Iterator<Item = &Username> {
        self.follows.get(user).into_iter().flatten()
    }

    /// All users appearing in the graph, either as a key or as a followee.
    pub fn users(&self) -> impl Iterator<Item = &Username> {
        self.names.iter()
    }

    pub fn contains(&self, user: &Username) -> bool {
        self.names.contains(user)
    }

    /// The number of keys.
    pub fn len(&self) -> usize {
        self.follows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.follows.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Username, BTreeSet<Username>> {
        self.follows.iter()
    }
}

impl<'a> IntoIterator for &'a FollowsGraph {
    type Item = (&'a Username, &'a BTreeSet<Username>);
    type IntoIter = btree_map::Iter<'a, Username, BTreeSet<Username>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<I: IntoIterator<Item = Username>> FromIterator<(Username, I)> for FollowsGraph {
    fn from_iter<T: IntoIterator<Item = (Username, I)>>(iter: T) -> Self {
        let mut graph = Self::new();

        for (follower, followees) in iter {
            graph.add_follows(follower, followees);
        }

        graph
    }
}

impl From<BTreeMap<Username, BTreeSet<Username>>> for FollowsGraph {
    fn from(value: BTreeMap<Username, BTreeSet<Username>>) -> Self {
        value.into_iter().collect()
    }
}

// Keys that differ only in case are merged rather than replacing each other.
impl<'de> Deserialize<'de> for FollowsGraph {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FollowsGraphVisitor;

        impl<'de> Visitor<'de> for FollowsGraphVisitor {
            type Value = FollowsGraph;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("map from usernames to lists of usernames")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut graph = FollowsGraph::new();

                while let Some((follower, followees)) =
                    map.next_entry::<Username, Vec<Username>>()?
                {
                    graph.add_follows(follower, followees);
                }

                Ok(graph)
            }
        }

        deserializer.deserialize_map(FollowsGraphVisitor)
    }
}

impl From<FollowsGraph> for BTreeMap<Username, BTreeSet<Username>> {
    fn from(value: FollowsGraph) -> Self {
        value.follows
    }
}

/// Guesses who follows whom, from evidence found in the tweets.
///
/// The author of a tweet is taken to follow every user they mention in it, except themselves.
/// Every mentioned user also appears as a key, even if they never wrote one of the tweets.
pub fn guess_follows_graph<T: TweetRecord>(tweets: &[T]) -> Result<FollowsGraph, Error> {
    let mut graph = FollowsGraph::new();

    for tweet in tweets {
        let author = tweet.author().ok_or(Error::MissingAuthor(tweet.id()))?;
        let mut mentioned = mentioned_in(tweet)?;

        if mentioned.remove(author) {
            log::debug!("Ignoring self-mention by {} in tweet {}", author, tweet.id());
        }

        log::trace!(
            "Tweet {} by {} mentions {} users",
            tweet.id(),
            author,
            mentioned.len()
        );

        graph.add_user(author.clone());

        for user in &mentioned {
            graph.add_user(user.clone());
        }

        graph.add_follows(author.clone(), mentioned);
    }

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tweet::{ArchivedTweet, Tweet, tests::tweet};

    const D1: &str = "2016-02-17T10:00:00Z";
    const D2: &str = "2016-02-17T11:00:00Z";

    fn user(name: &str) -> Username {
        Username::parse(name).unwrap()
    }

    fn followees(graph: &FollowsGraph, name: &str) -> Vec<String> {
        graph
            .followees(&user(name))
            .map(|username| username.key().to_string())
            .collect()
    }

    #[test]
    fn empty() {
        let graph = guess_follows_graph::<Tweet>(&[]).unwrap();

        assert!(graph.is_empty());
        assert_eq!(graph.users().count(), 0);
    }

    #[test]
    fn no_mentions() {
        let tweets = vec![tweet(1, "alyssa", "rivest talk in 30 minutes #hype", D1)];
        let graph = guess_follows_graph(&tweets).unwrap();

        assert!(graph.iter().all(|(_, followees)| followees.is_empty()));
        assert_eq!(followees(&graph, "alyssa"), Vec::<String>::new());
    }

    #[test]
    fn mentions_are_follows() {
        let tweets = vec![
            tweet(1, "alyssa", "@bbitdiddle @Ben_B talk in 30 minutes", D1),
            tweet(2, "bbitdiddle", "no mentions here", D2),
        ];
        let graph = guess_follows_graph(&tweets).unwrap();

        assert_eq!(followees(&graph, "ALYSSA"), vec!["bbitdiddle", "ben_b"]);
        assert!(graph.follows(&user("alyssa"), &user("BBITDIDDLE")));
        assert!(!graph.follows(&user("bbitdiddle"), &user("alyssa")));

        // Mentioned users are keys even if they never wrote a tweet.
        assert!(graph.iter().any(|(key, _)| key.matches("ben_b")));
        assert_eq!(followees(&graph, "ben_b"), Vec::<String>::new());
    }

    #[test]
    fn evidence_accumulates() {
        let tweets = vec![
            tweet(1, "alyssa", "hello @bbitdiddle", D1),
            tweet(2, "Alyssa", "hello @eva", D2),
            tweet(3, "ALYSSA", "hello again @BBitdiddle", D2),
        ];
        let graph = guess_follows_graph(&tweets).unwrap();

        assert_eq!(followees(&graph, "alyssa"), vec!["bbitdiddle", "eva"]);
        assert_eq!(graph.len(), 3);
    }

    #[test]
    fn single_spelling() {
        let tweets = vec![
            tweet(1, "bbitdiddle", "hi @Alyssa", D1),
            tweet(2, "alyssa", "hi @BBITDIDDLE", D2),
        ];
        let graph = guess_follows_graph(&tweets).unwrap();

        let spellings = graph
            .iter()
            .flat_map(|(key, followees)| std::iter::once(key).chain(followees))
            .map(|username| username.as_str())
            .collect::<BTreeSet<_>>();

        assert_eq!(spellings, BTreeSet::from(["Alyssa", "bbitdiddle"]));
    }

    #[test]
    fn self_mention() {
        let tweets = vec![tweet(8, "playboy", "hi my name is @PlayBoy! cc @bunny", D1)];
        let graph = guess_follows_graph(&tweets).unwrap();

        assert!(!graph.follows(&user("playboy"), &user("playboy")));
        assert_eq!(followees(&graph, "playboy"), vec!["bunny"]);
    }

    #[test]
    fn missing_fields() {
        let mut tweets = vec![
            ArchivedTweet::from(tweet(1, "alyssa", "hello @bbitdiddle", D1)),
            ArchivedTweet::from(tweet(2, "bbitdiddle", "hello @alyssa", D2)),
        ];

        tweets[1].author = None;
        assert_eq!(guess_follows_graph(&tweets), Err(Error::MissingAuthor(2)));

        tweets[1].author = Some(user("bbitdiddle"));
        tweets[0].text = None;
        assert_eq!(guess_follows_graph(&tweets), Err(Error::MissingText(1)));
    }

    #[test]
    fn from_map_drops_self_loops() {
        let graph = FollowsGraph::from(BTreeMap::from([
            (user("a"), BTreeSet::from([user("A"), user("b")])),
            (user("c"), BTreeSet::new()),
        ]));

        assert!(!graph.follows(&user("a"), &user("a")));
        assert!(graph.follows(&user("a"), &user("b")));
        assert!(graph.contains(&user("C")));
        assert!(!graph.contains(&user("d")));
        assert_eq!(graph.users().count(), 3);
    }

    #[test]
    fn json() {
        let graph: FollowsGraph =
            serde_json::from_str(r#"{"C":["A","D"],"D":["a","C","d"]}"#).unwrap();

        assert_eq!(followees(&graph, "d"), vec!["a", "c"]);
        assert_eq!(
            serde_json::to_string(&graph).unwrap(),
            r#"{"C":["A","D"],"D":["A","C"]}"#
        );
    }

    #[test]
    fn json_merges_case_variant_keys() {
        let graph: FollowsGraph = serde_json::from_str(r#"{"a":["b"],"A":["c","a"]}"#).unwrap();

        assert_eq!(followees(&graph, "a"), vec!["b", "c"]);
        assert!(graph.follows(&user("A"), &user("B")));
        assert_eq!(graph.len(), 1);
        assert_eq!(
            graph.users().map(|username| username.as_str()).collect::<Vec<_>>(),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn graph_properties() {
        fn prop(tweets: Vec<Tweet>) -> bool {
            let Ok(graph) = guess_follows_graph(&tweets) else {
                return false;
            };

            let authors = tweets
                .iter()
                .map(|tweet| tweet.author().cloned())
                .collect::<Option<BTreeSet<_>>>()
                .unwrap_or_default();
            let mentioned = crate::extract::mentioned_users(&tweets).unwrap_or_default();

            graph.iter().all(|(key, followees)| !followees.contains(key))
                && graph
                    .users()
                    .all(|user| authors.contains(user) || mentioned.contains(user))
                && Ok(&graph) == guess_follows_graph(&tweets).as_ref()
        }

        quickcheck::quickcheck(prop as fn(Vec<Tweet>) -> bool);
    }
}
