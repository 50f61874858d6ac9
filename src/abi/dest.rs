//! Decode destinations.
//!
//! The decoder produces [`Token`]s; a [`Dest`] describes the shape of the
//! host location they land in. The shape is dispatched explicitly instead
//! of being discovered by reflection: a single slot, a positional
//! sequence, or a named record.

use super::{Error, InvalidOutputType, Param, Token, Tokenizable};
use std::collections::HashMap;

/// A single mutable location a decoded token can be written into.
///
/// Implemented for every [`Tokenizable`] type, and used object-safely so
/// one destination can mix differently typed slots.
pub trait Slot {
    /// Overwrites `self` with the decoded value.
    fn fill(&mut self, token: Token) -> Result<(), InvalidOutputType>;
}

impl<T: Tokenizable> Slot for T {
    fn fill(&mut self, token: Token) -> Result<(), InvalidOutputType> {
        *self = T::from_token(token)?;
        Ok(())
    }
}

/// A named-record destination.
pub trait Record {
    /// Writes `token` into the field called `name`.
    ///
    /// Returns `Ok(false)` when the record has no such field; the value is
    /// dropped silently in that case.
    fn set(&mut self, name: &str, token: Token) -> Result<bool, InvalidOutputType>;
}

/// Where unpacked values land, dispatched by shape.
pub enum Dest<'a> {
    /// A single value; only valid for one-element schemas.
    Single(&'a mut dyn Slot),
    /// Positional slots; at least as many slots as the schema has
    /// arguments must be supplied.
    Sequence(Vec<&'a mut dyn Slot>),
    /// A named record. Argument names are matched against field names
    /// with their first character upper-cased, a compatibility rule
    /// inherited from schemas written for the original library.
    Record(&'a mut dyn Record),
    /// Key/value mappings are rejected with a dedicated error.
    Map(&'a mut HashMap<String, Token>),
}

/// Capitalizes the first character of an argument name, leaving the rest
/// untouched.
fn field_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Writes schema-ordered `tokens` into `dest`, stopping at the first
/// failure. Slots already written before an error keep their values;
/// nothing else is touched.
pub(crate) fn assign(params: &[Param], tokens: Vec<Token>, dest: Dest<'_>) -> Result<(), Error> {
    match dest {
        Dest::Single(slot) => match <[Token; 1]>::try_from(tokens) {
            Ok([token]) => Ok(slot.fill(token)?),
            Err(tokens) => Err(Error::SingleDestination(tokens.len())),
        },
        Dest::Sequence(mut slots) => {
            if slots.len() < tokens.len() {
                return Err(Error::InsufficientElements { want: tokens.len(), got: slots.len() });
            }
            for (slot, token) in slots.iter_mut().zip(tokens) {
                slot.fill(token)?;
            }
            Ok(())
        }
        Dest::Record(record) => {
            for (param, token) in params.iter().zip(tokens) {
                record.set(&field_name(&param.name), token)?;
            }
            Ok(())
        }
        Dest::Map(_) => Err(Error::MapDestination),
    }
}
