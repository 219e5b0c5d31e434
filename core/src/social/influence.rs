use super::FollowsGraph;
use crate::username::Username;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Influence {
    pub username: Username,
    pub followers: usize,
}

/// The number of users following each user in the graph.
///
/// Every user in the graph is included, with a count of zero if nobody follows them.
pub fn follower_counts(graph: &FollowsGraph) -> BTreeMap<Username, usize> {
    let mut counts = graph
        .users()
        .map(|user| (user.clone(), 0))
        .collect::<BTreeMap<_, _>>();

    for (_, followees) in graph {
        for followee in followees {
            if let Some(count) = counts.get_mut(followee) {
                *count += 1;
            }
        }
    }

    counts
}

/// Every user in the graph, in descending order of follower count.
///
/// Users with the same number of followers are ordered by their case-insensitive name.
pub fn ranking(graph: &FollowsGraph) -> Vec<Influence> {
    let mut ranking = follower_counts(graph)
        .into_iter()
        .map(|(username, followers)| Influence {
            username,
            followers,
        })
        .collect::<Vec<_>>();

    ranking.sort_by(|a, b| {
        b.followers
            .cmp(&a.followers)
            .then_with(|| a.username.cmp(&b.username))
    });

    ranking
}

/// The users in the graph, most influential first.
pub fn influencers(graph: &FollowsGraph) -> Vec<Username> {
    ranking(graph)
        .into_iter()
        .map(|influence| influence.username)
        .collect()
}
