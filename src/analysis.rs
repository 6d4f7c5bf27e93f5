//! Runs every metric over a graph and collects the extremal vertices of each.

use std::{fmt, fmt::Debug, hash::Hash};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
    graph::Graph,
    ranking::{top_k, Order, Ranked},
};

/// Tunables for [`Analysis::run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// How many vertices to keep per ranking.
    pub top_k: usize,
    /// Worker threads for the betweenness computation, clamped to
    /// `[MIN_NUM_THREADS, MAX_NUM_THREADS]`.
    pub threads: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            threads: 1,
        }
    }
}

/// The density of a graph along with its highest degree, lowest in-degree and highest
/// betweenness vertices.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Analysis<T> {
    pub top_k: usize,
    pub density: f64,
    pub highest_degree_centrality: Vec<Ranked<T>>,
    pub lowest_in_degree_centrality: Vec<Ranked<T>>,
    pub highest_betweenness_centrality: Vec<Ranked<T>>,
}

impl<T> Analysis<T>
where
    T: Clone + Eq + Hash + Debug,
{
    /// Computes every metric over `graph`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sociogram::analysis::{Analysis, AnalysisConfig};
    /// use sociogram::graph::Graph;
    /// use sociogram::record::Record;
    ///
    /// let graph = Graph::build(vec![
    ///     Record::new("a", "b", "Friend", 1.0),
    ///     Record::new("b", "c", "Family", 2.0),
    /// ])
    /// .unwrap();
    ///
    /// let analysis = Analysis::run(&graph, &AnalysisConfig::default());
    ///
    /// assert_eq!(analysis.highest_betweenness_centrality[0].node, "b");
    /// println!("{analysis}");
    /// ```
    #[instrument(skip(graph))]
    pub fn run(graph: &Graph<T>, config: &AnalysisConfig) -> Self {
        let density = graph.density();

        let degree_centrality = graph.degree_centrality();
        let in_degree_centrality = graph.in_degree_centrality();
        let betweenness_centrality = graph.betweenness_centrality_with_threads(config.threads);

        let analysis = Self {
            top_k: config.top_k,
            density,
            highest_degree_centrality: top_k(
                graph,
                &degree_centrality,
                config.top_k,
                Order::Descending,
            ),
            lowest_in_degree_centrality: top_k(
                graph,
                &in_degree_centrality,
                config.top_k,
                Order::Ascending,
            ),
            highest_betweenness_centrality: top_k(
                graph,
                &betweenness_centrality,
                config.top_k,
                Order::Descending,
            ),
        };

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            density,
            "analysed graph"
        );

        analysis
    }
}

impl<T: fmt::Display> fmt::Display for Analysis<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Network Density: {:?}", self.density)?;

        let sections = [
            ("Highest Degree Centrality", &self.highest_degree_centrality),
            ("Lowest In-Degree Centrality", &self.lowest_in_degree_centrality),
            (
                "Highest Betweenness Centrality",
                &self.highest_betweenness_centrality,
            ),
        ];

        for (title, ranking) in sections {
            writeln!(f)?;
            writeln!(f, "Top {} Nodes with {title}:", self.top_k)?;
            for ranked in ranking {
                writeln!(f, "{ranked}")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    fn line() -> Graph<&'static str> {
        Graph::build(vec![
            Record::new("A", "B", "Friend", 1.0),
            Record::new("B", "C", "Colleague", 2.0),
        ])
        .unwrap()
    }

    #[test]
    fn run() {
        let analysis = Analysis::run(&line(), &AnalysisConfig::default());

        assert_eq!(analysis.density, 2.0 / 6.0);
        assert_eq!(
            analysis.highest_degree_centrality,
            vec![
                Ranked {
                    node: "B",
                    value: 1.0
                },
                Ranked {
                    node: "A",
                    value: 0.5
                },
                Ranked {
                    node: "C",
                    value: 0.5
                },
            ]
        );
        assert_eq!(
            analysis.lowest_in_degree_centrality,
            vec![
                Ranked {
                    node: "A",
                    value: 0.0
                },
                Ranked {
                    node: "B",
                    value: 0.5
                },
                Ranked {
                    node: "C",
                    value: 0.5
                },
            ]
        );
        assert_eq!(
            analysis.highest_betweenness_centrality[0],
            Ranked {
                node: "B",
                value: 1.0
            }
        );
    }

    #[test]
    fn run_top_k() {
        let config = AnalysisConfig {
            top_k: 1,
            threads: 2,
        };
        let analysis = Analysis::run(&line(), &config);

        assert_eq!(analysis.highest_degree_centrality.len(), 1);
        assert_eq!(analysis.lowest_in_degree_centrality.len(), 1);
        assert_eq!(analysis.highest_betweenness_centrality.len(), 1);
    }

    #[test]
    fn run_empty() {
        let graph: Graph<&str> = Graph::new();
        let analysis = Analysis::run(&graph, &AnalysisConfig::default());

        assert_eq!(analysis.density, 0.0);
        assert!(analysis.highest_degree_centrality.is_empty());
        assert!(analysis.lowest_in_degree_centrality.is_empty());
        assert!(analysis.highest_betweenness_centrality.is_empty());
    }

    #[test]
    fn display() {
        let config = AnalysisConfig {
            top_k: 2,
            threads: 1,
        };
        let analysis = Analysis::run(&line(), &config);

        let expected = "\
Network Density: 0.3333333333333333

Top 2 Nodes with Highest Degree Centrality:
B: 1.0
A: 0.5

Top 2 Nodes with Lowest In-Degree Centrality:
A: 0.0
B: 0.5

Top 2 Nodes with Highest Betweenness Centrality:
B: 1.0
A: 0.0
";

        assert_eq!(analysis.to_string(), expected);
    }

    #[test]
    fn config_defaults() {
        let config: AnalysisConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AnalysisConfig::default());

        let config: AnalysisConfig = serde_json::from_str(r#"{"top_k": 3}"#).unwrap();
        assert_eq!(config.top_k, 3);
        assert_eq!(config.threads, 1);
    }

    #[test]
    fn serialize() {
        let config = AnalysisConfig {
            top_k: 1,
            threads: 1,
        };
        let value = serde_json::to_value(Analysis::run(&line(), &config)).unwrap();

        assert_eq!(
            value["highest_betweenness_centrality"],
            serde_json::json!([{"node": "B", "value": 1.0}])
        );
    }
}
