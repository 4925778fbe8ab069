//! Newline policy: what the rule expects before and after the directive
//!
//! Options arrive in one of two shapes, a bare mode or a `{before, after}`
//! pair, and are resolved once into a [`Policy`] the checker reads.

use crate::error::{Error, Result};
use schemars::{json_schema, JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::borrow::Cow;

/// Whether a blank line is required or forbidden
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Always,
    Never,
}

impl Mode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "always" => Some(Mode::Always),
            "never" => Some(Mode::Never),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Always => "always",
            Mode::Never => "never",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rule options as written in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Value")]
pub enum PolicyOption {
    /// `"always"` / `"never"` for both sides
    Uniform(Mode),
    /// `{ before: .., after: .. }`
    Split { before: Mode, after: Mode },
}

impl PolicyOption {
    /// Validate a raw option value
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Mode::parse(s)
                .map(PolicyOption::Uniform)
                .ok_or_else(|| Error::Config(format!("expected \"always\" or \"never\", got \"{}\"", s))),
            Value::Object(map) => {
                if let Some(key) = map.keys().find(|k| *k != "before" && *k != "after") {
                    return Err(Error::Config(format!("unknown option key '{}'", key)));
                }
                let before = map
                    .get("before")
                    .ok_or_else(|| Error::Config("missing required key 'before'".into()))?;
                let after = map
                    .get("after")
                    .ok_or_else(|| Error::Config("missing required key 'after'".into()))?;
                Ok(PolicyOption::Split {
                    before: mode_field("before", before)?,
                    after: mode_field("after", after)?,
                })
            }
            other => Err(Error::Config(format!(
                "expected \"always\", \"never\" or {{before, after}}, got {}",
                other
            ))),
        }
    }
}

fn mode_field(key: &str, value: &Value) -> Result<Mode> {
    value
        .as_str()
        .and_then(Mode::parse)
        .ok_or_else(|| Error::Config(format!("'{}' must be \"always\" or \"never\", got {}", key, value)))
}

impl TryFrom<Value> for PolicyOption {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        PolicyOption::from_value(&value)
    }
}

impl From<Mode> for PolicyOption {
    fn from(mode: Mode) -> Self {
        PolicyOption::Uniform(mode)
    }
}

impl Serialize for PolicyOption {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            PolicyOption::Uniform(mode) => mode.serialize(serializer),
            PolicyOption::Split { before, after } => Policy {
                before: *before,
                after: *after,
            }
            .serialize(serializer),
        }
    }
}

impl JsonSchema for PolicyOption {
    fn schema_name() -> Cow<'static, str> {
        "PolicyOption".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "description": "\"always\" or \"never\" for both sides, or a {before, after} pair",
            "oneOf": [
                { "type": "string", "enum": ["always", "never"] },
                {
                    "type": "object",
                    "properties": {
                        "before": { "type": "string", "enum": ["always", "never"] },
                        "after": { "type": "string", "enum": ["always", "never"] }
                    },
                    "required": ["before", "after"],
                    "additionalProperties": false
                }
            ]
        })
    }
}

/// Resolved policy for both sides of the directive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    pub before: Mode,
    pub after: Mode,
}

impl Policy {
    /// Resolve options; no options means `always` on both sides
    pub fn resolve(option: Option<&PolicyOption>) -> Self {
        match option {
            None => Policy::default(),
            Some(PolicyOption::Uniform(mode)) => Policy {
                before: *mode,
                after: *mode,
            },
            Some(PolicyOption::Split { before, after }) => Policy {
                before: *before,
                after: *after,
            },
        }
    }

    pub fn uniform(mode: Mode) -> Self {
        Policy::resolve(Some(&PolicyOption::Uniform(mode)))
    }
}

impl From<PolicyOption> for Policy {
    fn from(option: PolicyOption) -> Self {
        Policy::resolve(Some(&option))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_is_always() {
        let policy = Policy::resolve(None);
        assert_eq!(policy.before, Mode::Always);
        assert_eq!(policy.after, Mode::Always);
    }

    #[test]
    fn test_uniform_fills_both_sides() {
        let policy = Policy::resolve(Some(&PolicyOption::Uniform(Mode::Never)));
        assert_eq!(
            policy,
            Policy {
                before: Mode::Never,
                after: Mode::Never
            }
        );
    }

    #[test]
    fn test_split_keeps_sides_independent() {
        let option = PolicyOption::Split {
            before: Mode::Never,
            after: Mode::Always,
        };
        let policy = Policy::from(option);
        assert_eq!(policy.before, Mode::Never);
        assert_eq!(policy.after, Mode::Always);
    }

    #[test]
    fn test_deserialize_both_shapes() {
        let uniform: PolicyOption = serde_json::from_value(json!("never")).unwrap();
        assert_eq!(uniform, PolicyOption::Uniform(Mode::Never));

        let split: PolicyOption =
            serde_json::from_value(json!({"before": "always", "after": "never"})).unwrap();
        assert_eq!(
            split,
            PolicyOption::Split {
                before: Mode::Always,
                after: Mode::Never
            }
        );
    }

    #[test]
    fn test_rejects_half_specified_object() {
        let err = PolicyOption::from_value(&json!({"before": "always"})).unwrap_err();
        assert!(err.to_string().contains("'after'"));
    }

    #[test]
    fn test_rejects_unknown_mode_and_keys() {
        assert!(PolicyOption::from_value(&json!("sometimes")).is_err());
        assert!(PolicyOption::from_value(&json!({"before": "always", "after": "never", "x": 1})).is_err());
        assert!(PolicyOption::from_value(&json!({"before": "always", "after": 3})).is_err());
        assert!(PolicyOption::from_value(&json!(true)).is_err());
    }

    #[test]
    fn test_serialize_round_shape() {
        assert_eq!(
            serde_json::to_value(PolicyOption::Uniform(Mode::Always)).unwrap(),
            json!("always")
        );
        assert_eq!(
            serde_json::to_value(PolicyOption::Split {
                before: Mode::Never,
                after: Mode::Always
            })
            .unwrap(),
            json!({"before": "never", "after": "always"})
        );
    }
}
