//! A module for working with edges and the relationships they carry.

use std::{convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The kind of relationship an edge represents.
///
/// The well-known labels get their own variant, anything else is kept verbatim in
/// [`RelationshipType::Other`], so parsing a label never fails.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RelationshipType {
    Family,
    Spouse,
    InLaw,
    Acquaintance,
    Friend,
    Colleague,
    Stranger,
    Other(String),
}

impl RelationshipType {
    /// Returns the label of the relationship type.
    ///
    /// # Examples
    ///
    /// ```
    /// use sociogram::edge::RelationshipType;
    ///
    /// assert_eq!(RelationshipType::InLaw.as_str(), "In-law");
    /// assert_eq!(RelationshipType::from("Rival").as_str(), "Rival");
    /// ```
    pub fn as_str(&self) -> &str {
        match self {
            Self::Family => "Family",
            Self::Spouse => "Spouse",
            Self::InLaw => "In-law",
            Self::Acquaintance => "Acquaintance",
            Self::Friend => "Friend",
            Self::Colleague => "Colleague",
            Self::Stranger => "Stranger",
            Self::Other(label) => label,
        }
    }
}

/// The attributes attached to a directed edge.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Relationship {
    #[serde(rename = "relationship_type")]
    kind: RelationshipType,
    #[serde(rename = "relationship_strength")]
    strength: f64,
}

impl Relationship {
    /// Creates a relationship, returns `None` if the strength isn't a finite positive number.
    ///
    /// # Examples
    ///
    /// ```
    /// use sociogram::edge::{Relationship, RelationshipType};
    ///
    /// assert!(Relationship::new(RelationshipType::Friend, 2.5).is_some());
    /// assert!(Relationship::new(RelationshipType::Friend, 0.0).is_none());
    /// assert!(Relationship::new(RelationshipType::Friend, f64::NAN).is_none());
    /// ```
    pub fn new(kind: RelationshipType, strength: f64) -> Option<Self> {
        (strength.is_finite() && strength > 0.0).then_some(Self { kind, strength })
    }

    pub fn kind(&self) -> &RelationshipType {
        &self.kind
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }
}

/// A directed edge from `source` to `target`.
///
/// Unlike an undirected pair, `(a, b)` and `(b, a)` are distinct edges.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge<T> {
    source: T,
    target: T,
    relationship: Relationship,
}

impl<T> Edge<T> {
    /// Creates a new edge between two vertices.
    ///
    /// # Examples
    ///
    /// ```
    /// use sociogram::edge::{Edge, Relationship, RelationshipType};
    ///
    /// let friend = Relationship::new(RelationshipType::Friend, 1.0).unwrap();
    /// let edge = Edge::new("a", "b", friend.clone());
    ///
    /// assert_ne!(edge, Edge::new("b", "a", friend));
    /// ```
    pub fn new(source: T, target: T, relationship: Relationship) -> Self {
        Self {
            source,
            target,
            relationship,
        }
    }

    /// Returns the vertex the edge starts from.
    pub fn source(&self) -> &T {
        &self.source
    }

    /// Returns the vertex the edge points to.
    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn relationship(&self) -> &Relationship {
        &self.relationship
    }

    /// Splits the edge into its endpoints and attributes.
    pub fn into_parts(self) -> (T, T, Relationship) {
        (self.source, self.target, self.relationship)
    }
}

//
// Trait implementations
//

impl From<&str> for RelationshipType {
    fn from(label: &str) -> Self {
        match label {
            "Family" => Self::Family,
            "Spouse" => Self::Spouse,
            "In-law" => Self::InLaw,
            "Acquaintance" => Self::Acquaintance,
            "Friend" => Self::Friend,
            "Colleague" => Self::Colleague,
            "Stranger" => Self::Stranger,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for RelationshipType {
    fn from(label: String) -> Self {
        match Self::from(label.as_str()) {
            Self::Other(_) => Self::Other(label),
            known => known,
        }
    }
}

impl From<RelationshipType> for String {
    fn from(kind: RelationshipType) -> Self {
        match kind {
            RelationshipType::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for RelationshipType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn friend() -> Relationship {
        Relationship::new(RelationshipType::Friend, 1.0).unwrap()
    }

    #[test]
    fn new() {
        let (source, target) = ("a", "b");

        assert_eq!(
            Edge::new(source, target, friend()),
            Edge {
                source,
                target,
                relationship: friend()
            }
        )
    }

    #[test]
    fn source() {
        let (a, b) = ("a", "b");
        let edge = Edge::new(a, b, friend());

        assert_eq!(edge.source(), &a);
    }

    #[test]
    fn target() {
        let (a, b) = ("a", "b");
        let edge = Edge::new(a, b, friend());

        assert_eq!(edge.target(), &b);
    }

    #[test]
    fn into_parts() {
        let edge = Edge::new("a", "b", friend());

        assert_eq!(edge.into_parts(), ("a", "b", friend()));
    }

    #[test]
    fn relationship_rejects_bad_strengths() {
        for strength in [0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(Relationship::new(RelationshipType::Family, strength).is_none());
        }

        let relationship = Relationship::new(RelationshipType::Family, 0.5).unwrap();
        assert_eq!(relationship.kind(), &RelationshipType::Family);
        assert_eq!(relationship.strength(), 0.5);
    }

    #[test]
    fn relationship_type_labels() {
        let labels = [
            "Family",
            "Spouse",
            "In-law",
            "Acquaintance",
            "Friend",
            "Colleague",
            "Stranger",
        ];

        for label in labels {
            let kind = RelationshipType::from(label);
            assert!(!matches!(kind, RelationshipType::Other(_)));
            assert_eq!(kind.to_string(), label);
        }

        assert_eq!(
            "Mentor".parse::<RelationshipType>(),
            Ok(RelationshipType::Other("Mentor".to_string()))
        );
        // Labels are case sensitive.
        assert_eq!(
            RelationshipType::from("friend".to_string()),
            RelationshipType::Other("friend".to_string())
        );
    }

    //
    // Trait implementations
    //

    #[test]
    fn partial_eq() {
        let (a, b) = ("a", "b");

        assert_eq!(Edge::new(a, b, friend()), Edge::new(a, b, friend()));
        assert_ne!(Edge::new(a, b, friend()), Edge::new(b, a, friend()));
    }

    #[test]
    fn relationship_serialize() {
        let relationship = Relationship::new(RelationshipType::InLaw, 2.0).unwrap();

        assert_eq!(
            serde_json::to_value(relationship).unwrap(),
            serde_json::json!({"relationship_type": "In-law", "relationship_strength": 2.0})
        );
    }

    #[test]
    fn relationship_type_serde() {
        let kind: RelationshipType = serde_json::from_str("\"In-law\"").unwrap();
        assert_eq!(kind, RelationshipType::InLaw);

        assert_eq!(
            serde_json::to_string(&RelationshipType::Other("Rival".to_string())).unwrap(),
            "\"Rival\""
        );
    }
}
