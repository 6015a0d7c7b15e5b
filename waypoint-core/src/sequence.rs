//! Co-visitation graph: "people who went to A went to B next".
//!
//! Built from raw visit records. Each user's visits are ordered by time and every
//! consecutive pair adds one to the edge `A -> B`. Edges seen fewer than
//! `min_weight` times are dropped. Small histories (under `MIN_VISITS` records)
//! give an empty graph.
//!
//! Algorithm for `complete_day` (deterministic):
//! 1) start from the given place
//! 2) rank successors of the current place, skipping places already in the day
//! 3) if preferred categories are given and any candidate matches, keep only those
//! 4) take the top candidate, repeat until `max_places` or no successor is left

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::advisor::DestinationLookup;
use crate::category;

pub const DEFAULT_MIN_WEIGHT: u32 = 2;
pub const MIN_VISITS: usize = 10;
pub const DEFAULT_SUGGESTIONS: usize = 5;
pub const DEFAULT_DAY_PLACES: usize = 5;

/// Candidates considered per step of `complete_day`.
const DAY_STEP_CANDIDATES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    pub user_id: String,
    pub destination_id: String,
    pub visited_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextPlace {
    pub destination_id: String,
    /// Edge weight relative to the strongest edge out of the current place (0..=1).
    pub score: f64,
    pub weight: u32,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoVisitGraph {
    edges: HashMap<String, HashMap<String, u32>>,
    sequences: usize,
}

impl CoVisitGraph {
    pub fn build(visits: &[Visit], min_weight: u32) -> Self {
        if visits.len() < MIN_VISITS {
            tracing::warn!(visits = visits.len(), "not enough visit history for a graph");
            return Self::default();
        }

        let mut by_user: BTreeMap<&str, Vec<&Visit>> = BTreeMap::new();
        for v in visits {
            by_user.entry(v.user_id.as_str()).or_default().push(v);
        }

        let mut counts: HashMap<(&str, &str), u32> = HashMap::new();
        let mut sequences = 0;
        for user_visits in by_user.values_mut() {
            // Stable: same-time visits keep input order.
            user_visits.sort_by_key(|v| v.visited_at);
            for pair in user_visits.windows(2) {
                let (src, dst) = (pair[0].destination_id.as_str(), pair[1].destination_id.as_str());
                if src == dst {
                    continue;
                }
                *counts.entry((src, dst)).or_default() += 1;
                sequences += 1;
            }
        }

        let mut edges: HashMap<String, HashMap<String, u32>> = HashMap::new();
        for ((src, dst), weight) in counts {
            if weight >= min_weight {
                edges.entry(src.to_string()).or_default().insert(dst.to_string(), weight);
            }
        }

        let graph = Self { edges, sequences };
        tracing::info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            sequences,
            "built co-visitation graph"
        );
        graph
    }

    /// A place is in the graph if any kept edge starts or ends at it.
    pub fn contains(&self, destination_id: &str) -> bool {
        self.edges.contains_key(destination_id)
            || self.edges.values().any(|out| out.contains_key(destination_id))
    }

    pub fn weight(&self, from: &str, to: &str) -> Option<u32> {
        self.edges.get(from)?.get(to).copied()
    }

    pub fn node_count(&self) -> usize {
        let mut nodes: HashSet<&str> = HashSet::new();
        for (src, out) in &self.edges {
            nodes.insert(src);
            nodes.extend(out.keys().map(String::as_str));
        }
        nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(HashMap::len).sum()
    }

    /// Consecutive visit pairs counted while building, before the weight cut.
    pub fn sequences(&self) -> usize {
        self.sequences
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Places most often visited right after `current`, strongest first.
    /// Ties are ordered by destination id.
    pub fn suggest_next(&self, current: &str, limit: usize, exclude: &HashSet<String>) -> Vec<NextPlace> {
        let Some(out) = self.edges.get(current) else {
            return Vec::new();
        };
        let max_weight = out.values().copied().max().unwrap_or(1).max(1);

        let mut ranked: Vec<(&String, u32)> = out
            .iter()
            .filter(|(id, _)| !exclude.contains(id.as_str()))
            .map(|(id, w)| (id, *w))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        ranked
            .into_iter()
            .take(limit)
            .map(|(id, weight)| NextPlace {
                destination_id: id.clone(),
                score: f64::from(weight) / f64::from(max_weight),
                weight,
                reason: format!("Visited next {weight} times after this place"),
            })
            .collect()
    }
}

/// Build a day outward from `start` by following the strongest edges.
///
/// Returns the place ids in visiting order, `start` first. A start the graph has
/// never seen gives an empty list. Category preferences narrow a step only when
/// at least one candidate matches; otherwise the strongest edge wins anyway.
pub fn complete_day<L: DestinationLookup>(
    graph: &CoVisitGraph,
    lookup: &L,
    start: &str,
    preferred: &[String],
    max_places: usize,
) -> Vec<String> {
    if !graph.contains(start) {
        tracing::debug!(start, "start place not in co-visitation graph");
        return Vec::new();
    }

    let preferred: Vec<String> = preferred
        .iter()
        .map(|c| category::normalize(c))
        .filter(|c| !c.is_empty())
        .collect();

    let mut day = vec![start.to_string()];
    let mut seen: HashSet<String> = HashSet::from([start.to_string()]);

    while day.len() < max_places {
        let current = &day[day.len() - 1];
        let candidates = graph.suggest_next(current, DAY_STEP_CANDIDATES, &seen);

        let matching = candidates.iter().find(|p| matches_preferred(lookup, &p.destination_id, &preferred));
        let Some(next) = matching.or(candidates.first()) else {
            break;
        };

        let id = next.destination_id.clone();
        seen.insert(id.clone());
        day.push(id);
    }

    day
}

fn matches_preferred<L: DestinationLookup>(lookup: &L, destination_id: &str, preferred: &[String]) -> bool {
    if preferred.is_empty() {
        return false;
    }
    let Some(cat) = lookup.category_of(destination_id) else {
        return false;
    };
    let cat = category::normalize(&cat);
    preferred.iter().any(|p| cat.contains(p.as_str()))
}
