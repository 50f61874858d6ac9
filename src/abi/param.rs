//! Function and event arguments.

use super::{Error, ParamType, Reader};
use serde::{Deserialize, Deserializer};

/// A named function or event argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Argument name; may be empty, e.g. for unnamed outputs.
    pub name: String,
    /// Parsed ABI type.
    pub kind: ParamType,
    /// Whether an event input is carried as a topic. Meaningless for
    /// function arguments, where it is always false.
    pub indexed: bool,
}

impl<'de> Deserialize<'de> for Param {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(default)]
            name: String,
            #[serde(rename = "type")]
            kind: String,
            #[serde(default)]
            indexed: bool,
        }

        let raw = Raw::deserialize(deserializer)?;
        let kind = Reader::read(&raw.kind).map_err(serde::de::Error::custom)?;
        Ok(Param { name: raw.name, kind, indexed: raw.indexed })
    }
}

/// Rejects duplicate argument names within a single schema. Unnamed
/// arguments may repeat.
pub(crate) fn check_names(params: &[Param]) -> Result<(), Error> {
    for (i, param) in params.iter().enumerate() {
        if !param.name.is_empty() && params[i + 1..].iter().any(|other| other.name == param.name) {
            return Err(Error::InvalidType(format!("duplicate argument name `{}`", param.name)));
        }
    }
    Ok(())
}
