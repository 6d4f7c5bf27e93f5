//! Raw relationship records, as supplied by whatever loads the tabular input.
//!
//! Every field is optional at this boundary so a loader can hand over rows as-is; validation
//! happens once, when a record is turned into an [`Edge`].

use serde::Deserialize;

use crate::{
    edge::{Edge, Relationship, RelationshipType},
    error::ValidationError,
};

/// A relationship strength as it appears in the input, either a number or numeric text.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Strength {
    Number(f64),
    Text(String),
}

impl From<f64> for Strength {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Strength {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A single unvalidated relationship record.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Record<T> {
    pub source: Option<T>,
    pub target: Option<T>,
    pub relationship_type: Option<String>,
    pub relationship_strength: Option<Strength>,
}

impl<T> Record<T> {
    /// Creates a record with every field present.
    ///
    /// # Examples
    ///
    /// ```
    /// use sociogram::record::Record;
    ///
    /// let record = Record::new("a", "b", "Friend", 2.0);
    /// let edge = record.validate(0).unwrap();
    ///
    /// assert_eq!(edge.source(), &"a");
    /// assert_eq!(edge.relationship().strength(), 2.0);
    /// ```
    pub fn new(
        source: T,
        target: T,
        relationship_type: impl Into<String>,
        relationship_strength: impl Into<Strength>,
    ) -> Self {
        Self {
            source: Some(source),
            target: Some(target),
            relationship_type: Some(relationship_type.into()),
            relationship_strength: Some(relationship_strength.into()),
        }
    }

    /// Checks the record and converts it into an edge.
    ///
    /// `position` is the index of the record in its input sequence and is only used to report
    /// errors.
    pub fn validate(self, position: usize) -> Result<Edge<T>, ValidationError> {
        let missing = |field| ValidationError::MissingField {
            record: position,
            field,
        };

        let source = self.source.ok_or_else(|| missing("source"))?;
        let target = self.target.ok_or_else(|| missing("target"))?;
        let kind = self
            .relationship_type
            .ok_or_else(|| missing("relationship_type"))?;
        let strength = match self
            .relationship_strength
            .ok_or_else(|| missing("relationship_strength"))?
        {
            Strength::Number(value) => value,
            Strength::Text(text) => {
                text.trim()
                    .parse::<f64>()
                    .map_err(|_| ValidationError::NonNumericStrength {
                        record: position,
                        value: text.clone(),
                    })?
            }
        };

        let relationship = Relationship::new(RelationshipType::from(kind), strength).ok_or(
            ValidationError::InvalidStrength {
                record: position,
                value: strength,
            },
        )?;

        Ok(Edge::new(source, target, relationship))
    }
}
