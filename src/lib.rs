//! Sociogram is a small toolkit for analysing directed relationship networks, where every edge
//! carries a relationship type and a strength.
//!
//! # Basic usage
//!
//! The library is centered around the [`Graph`](graph::Graph) structure which is built from a
//! sequence of [`Record`](record::Record) instances. Once constructed, various measurements can
//! be computed and ranked.
//!
//! ```rust
//! use sociogram::analysis::{Analysis, AnalysisConfig};
//! use sociogram::graph::Graph;
//! use sociogram::ranking::{top_k, Order};
//! use sociogram::record::Record;
//!
//! // Records usually come from a tabular loader, IDs can be any `Clone + Eq + Hash + Debug` type.
//! let records = vec![
//!     Record::new("alice", "bob", "Friend", 3.0),
//!     Record::new("bob", "carol", "Colleague", 2.0),
//!     Record::new("carol", "alice", "Family", 5.0),
//!     Record::new("dave", "bob", "Acquaintance", 1.0),
//! ];
//!
//! // Construct the graph instance, this fails on the first malformed record.
//! let graph = Graph::build(records).unwrap();
//!
//! // Compute some metrics on the graph.
//! let density = graph.density();
//! let betweenness = graph.betweenness_centrality();
//! let bridges = top_k(&graph, &betweenness, 2, Order::Descending);
//! assert_eq!(bridges[0].node, "bob");
//!
//! // Or compute everything at once, the report can be printed...
//! let analysis = Analysis::run(&graph, &AnalysisConfig::default());
//! println!("{analysis}");
//! // ...outputs:
//! // Network Density: 0.3333333333333333
//! //
//! // Top 5 Nodes with Highest Degree Centrality:
//! // bob: 1.0
//! // ...
//! ```

pub mod analysis;
mod betweenness;
pub mod edge;
pub mod error;
pub mod graph;
pub mod ranking;
pub mod record;
pub mod render;
