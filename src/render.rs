//! Inputs for drawing a graph.
//!
//! Nothing is drawn here, this only derives the per-edge styling a renderer needs: a color from
//! the relationship type and a width from the relationship strength.

use std::{fmt::Debug, hash::Hash};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{edge::RelationshipType, graph::Graph};

/// A mapping of relationship types to display colors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(IndexMap<RelationshipType, String>);

impl Palette {
    /// Creates a palette without any colors.
    pub fn empty() -> Self {
        Self(IndexMap::new())
    }

    /// Returns the color assigned to a relationship type.
    pub fn color(&self, kind: &RelationshipType) -> Option<&str> {
        self.0.get(kind).map(String::as_str)
    }

    /// Assigns a color to a relationship type, returning the color it replaced.
    pub fn set(&mut self, kind: RelationshipType, color: impl Into<String>) -> Option<String> {
        self.0.insert(kind, color.into())
    }
}

impl Default for Palette {
    fn default() -> Self {
        use RelationshipType::*;

        Self(
            [
                (Family, "blue"),
                (Spouse, "red"),
                (InLaw, "green"),
                (Acquaintance, "orange"),
                (Friend, "purple"),
                (Colleague, "brown"),
                (Stranger, "gray"),
            ]
            .into_iter()
            .map(|(kind, color)| (kind, color.to_string()))
            .collect(),
        )
    }
}

/// How a single edge should be drawn.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EdgeStyle<'a, T> {
    pub source: &'a T,
    pub target: &'a T,
    /// `None` when the palette has no color for the edge's relationship type.
    pub color: Option<&'a str>,
    pub width: f64,
}

/// Derives the style of every edge, in edge order. An edge's width is half its own relationship
/// strength.
///
/// # Examples
///
/// ```
/// use sociogram::graph::Graph;
/// use sociogram::record::Record;
/// use sociogram::render::{edge_styles, Palette};
///
/// let graph = Graph::build(vec![Record::new("a", "b", "Spouse", 5.0)]).unwrap();
/// let palette = Palette::default();
/// let styles = edge_styles(&graph, &palette);
///
/// assert_eq!(styles[0].color, Some("red"));
/// assert_eq!(styles[0].width, 2.5);
/// ```
pub fn edge_styles<'a, T>(graph: &'a Graph<T>, palette: &'a Palette) -> Vec<EdgeStyle<'a, T>>
where
    T: Clone + Eq + Hash + Debug,
{
    graph
        .edges()
        .map(|(source, target, relationship)| EdgeStyle {
            source,
            target,
            color: palette.color(relationship.kind()),
            width: relationship.strength() / 2.0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    #[test]
    fn default_palette() {
        let palette = Palette::default();

        assert_eq!(palette.color(&RelationshipType::Family), Some("blue"));
        assert_eq!(palette.color(&RelationshipType::InLaw), Some("green"));
        assert_eq!(palette.color(&RelationshipType::Stranger), Some("gray"));
        assert_eq!(
            palette.color(&RelationshipType::Other("Rival".to_string())),
            None
        );
    }

    #[test]
    fn set() {
        let mut palette = Palette::empty();
        assert_eq!(palette.color(&RelationshipType::Friend), None);

        assert_eq!(palette.set(RelationshipType::Friend, "pink"), None);
        assert_eq!(
            palette.set(RelationshipType::Friend, "teal"),
            Some("pink".to_string())
        );
        assert_eq!(palette.color(&RelationshipType::Friend), Some("teal"));
    }

    #[test]
    fn edge_styles_per_edge() {
        let graph = Graph::build(vec![
            Record::new("a", "b", "Friend", 4.0),
            Record::new("b", "c", "Rival", 1.0),
            Record::new("a", "b", "Colleague", 3.0),
        ])
        .unwrap();
        let palette = Palette::default();

        let styles = edge_styles(&graph, &palette);

        assert_eq!(
            styles,
            vec![
                EdgeStyle {
                    source: &"a",
                    target: &"b",
                    color: Some("brown"),
                    width: 1.5,
                },
                EdgeStyle {
                    source: &"b",
                    target: &"c",
                    color: None,
                    width: 0.5,
                },
            ]
        );
    }

    #[test]
    fn palette_serde() {
        let palette: Palette =
            serde_json::from_str(r#"{"Friend": "pink", "In-law": "olive", "Rival": "black"}"#)
                .unwrap();

        assert_eq!(palette.color(&RelationshipType::Friend), Some("pink"));
        assert_eq!(palette.color(&RelationshipType::InLaw), Some("olive"));
        assert_eq!(
            palette.color(&RelationshipType::Other("Rival".to_string())),
            Some("black")
        );
        assert_eq!(palette.color(&RelationshipType::Family), None);
    }
}
