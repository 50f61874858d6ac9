//! The ABI bundle: methods, events and the constructor, loaded once from
//! a JSON interface description and read-only afterwards.

use super::function::kinds;
use super::{decode, dest, param, Constructor, Dest, Error, Event, Function, Param};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

/// A parsed contract interface.
#[derive(Debug, Clone, Default)]
pub struct Abi {
    /// The deployment argument schema, if declared.
    pub constructor: Option<Constructor>,
    /// Methods, keyed by name.
    pub functions: BTreeMap<String, Function>,
    /// Events, keyed by name.
    pub events: BTreeMap<String, Event>,
}

impl Abi {
    /// Loads an interface from its JSON description.
    pub fn load(data: &[u8]) -> Result<Self, Error> {
        serde_json::from_slice(data).map_err(Into::into)
    }

    /// Looks up a method by name.
    pub fn function(&self, name: &str) -> Result<&Function, Error> {
        self.functions.get(name).ok_or_else(|| Error::NotFound(name.to_owned()))
    }

    /// Looks up an event by name.
    pub fn event(&self, name: &str) -> Result<&Event, Error> {
        self.events.get(name).ok_or_else(|| Error::NotFound(name.to_owned()))
    }

    /// Decodes `data` into `dest` for the named interface item: a
    /// method's return values, or the non-indexed inputs of an event.
    pub fn unpack(&self, name: &str, data: &[u8], dest: Dest<'_>) -> Result<(), Error> {
        if let Some(function) = self.functions.get(name) {
            return function.unpack_output(data, dest);
        }
        if let Some(event) = self.events.get(name) {
            let params: Vec<Param> =
                event.inputs.iter().filter(|param| !param.indexed).cloned().collect();
            let tokens = decode(&kinds(&params), data)?;
            return dest::assign(&params, tokens, dest);
        }
        Err(Error::NotFound(name.to_owned()))
    }
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Entry {
    Function(Function),
    Constructor(Constructor),
    Event(Event),
    Fallback {},
}

impl<'de> Deserialize<'de> for Abi {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error as _;

        let entries = Vec::<Entry>::deserialize(deserializer)?;
        let mut abi = Abi::default();
        for entry in entries {
            match entry {
                Entry::Function(function) => {
                    param::check_names(&function.inputs)
                        .and_then(|_| param::check_names(&function.outputs))
                        .map_err(D::Error::custom)?;
                    abi.functions.insert(function.name.clone(), function);
                }
                Entry::Constructor(constructor) => {
                    param::check_names(&constructor.inputs).map_err(D::Error::custom)?;
                    abi.constructor = Some(constructor);
                }
                Entry::Event(event) => {
                    param::check_names(&event.inputs).map_err(D::Error::custom)?;
                    abi.events.insert(event.name.clone(), event);
                }
                Entry::Fallback {} => {}
            }
        }
        Ok(abi)
    }
}
