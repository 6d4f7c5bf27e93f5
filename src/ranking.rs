//! Ranked views over metric mappings.

use std::{cmp::Ordering, fmt, fmt::Debug, hash::Hash};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::graph::Graph;

/// The direction values are ranked in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    /// Highest values first.
    Descending,
    /// Lowest values first.
    Ascending,
}

/// A vertex and its metric value.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Ranked<T> {
    pub node: T,
    pub value: f64,
}

/// Returns the first `k` entries of `metric` sorted by value in the given `order`.
///
/// Ties are broken by the vertices' first-seen position in `graph`, so the result is the same
/// whatever the iteration order of `metric`. Vertices unknown to the graph rank after every tied
/// known vertex.
///
/// # Examples
///
/// ```
/// use sociogram::graph::Graph;
/// use sociogram::ranking::{top_k, Order, Ranked};
/// use sociogram::record::Record;
///
/// let graph = Graph::build(vec![
///     Record::new("a", "b", "Friend", 1.0),
///     Record::new("c", "b", "Friend", 1.0),
/// ])
/// .unwrap();
///
/// let degree_centrality = graph.degree_centrality();
/// let top = top_k(&graph, &degree_centrality, 2, Order::Descending);
///
/// assert_eq!(
///     top,
///     vec![
///         Ranked { node: "b", value: 1.0 },
///         Ranked { node: "a", value: 0.5 },
///     ]
/// );
/// ```
pub fn top_k<'a, T, M>(graph: &Graph<T>, metric: M, k: usize, order: Order) -> Vec<Ranked<T>>
where
    T: Clone + Eq + Hash + Debug + 'a,
    M: IntoIterator<Item = (&'a T, &'a f64)>,
{
    metric
        .into_iter()
        .map(|(node, &value)| (graph.position(node).unwrap_or(usize::MAX), node, value))
        .sorted_by(|(a_pos, _, a), (b_pos, _, b)| {
            compare(*a, *b, order).then_with(|| a_pos.cmp(b_pos))
        })
        .take(k)
        .map(|(_, node, value)| Ranked {
            node: node.clone(),
            value,
        })
        .collect()
}

fn compare(a: f64, b: f64, order: Order) -> Ordering {
    match order {
        Order::Descending => b.total_cmp(&a),
        Order::Ascending => a.total_cmp(&b),
    }
}

/// Prints `node: value`, whole values keep their fractional part (`1.0`, not `1`).
impl<T: fmt::Display> fmt::Display for Ranked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:?}", self.node, self.value)
    }
}
