//! Prediction value types

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A single prediction value or class label.
///
/// Human-readable formats see the bare value, so a class stored as `1` in an
/// artifact is returned to the caller as `1`, not `1.0` or `"1"`. Binary
/// formats cannot decode untagged values and get an explicit tag instead.
#[derive(Debug, Clone, PartialEq)]
pub enum Label {
    Int(i64),
    Float(f64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BareLabel {
    Int(i64),
    Float(f64),
    Text(String),
}

#[derive(Serialize, Deserialize)]
enum TaggedLabel {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            match self {
                Self::Int(v) => serializer.serialize_i64(*v),
                Self::Float(v) => serializer.serialize_f64(*v),
                Self::Text(v) => serializer.serialize_str(v),
            }
        } else {
            let tagged = match self {
                Self::Int(v) => TaggedLabel::Int(*v),
                Self::Float(v) => TaggedLabel::Float(*v),
                Self::Text(v) => TaggedLabel::Text(v.clone()),
            };
            tagged.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Label {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            Ok(match BareLabel::deserialize(deserializer)? {
                BareLabel::Int(v) => Self::Int(v),
                BareLabel::Float(v) => Self::Float(v),
                BareLabel::Text(v) => Self::Text(v),
            })
        } else {
            Ok(match TaggedLabel::deserialize(deserializer)? {
                TaggedLabel::Int(v) => Self::Int(v),
                TaggedLabel::Float(v) => Self::Float(v),
                TaggedLabel::Text(v) => Self::Text(v),
            })
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

impl From<i64> for Label {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Label {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Label {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

/// Result of running the prediction adapter against a model
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    /// The model produced predictions, one per input row
    Success {
        prediction: Vec<Label>,
        /// One probability row per input row, present only when the model
        /// exposes a probability capability
        probabilities: Option<Vec<Vec<f64>>>,
    },

    /// The model exposes no prediction capability
    Unrecognized,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_keeps_json_number_kind() {
        let labels: Vec<Label> = serde_json::from_str(r#"[1, 2.5, "high"]"#).unwrap();
        assert_eq!(
            labels,
            vec![Label::Int(1), Label::Float(2.5), Label::Text("high".into())]
        );
        assert_eq!(serde_json::to_string(&labels).unwrap(), r#"[1,2.5,"high"]"#);
    }

    #[test]
    fn test_label_display() {
        assert_eq!(Label::Int(3).to_string(), "3");
        assert_eq!(Label::from("normal").to_string(), "normal");
    }
}
