//! Method model: canonical signatures, selectors and call data packing.

use super::{decode, dest, encode, Bytes, Dest, Error, Param, ParamType, Token};
use crate::{types::Selector, utils};
use serde::Deserialize;
use std::fmt;

/// A callable contract method.
///
/// `constant` methods only read state and can be evaluated locally
/// without submitting a transaction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Function {
    /// Method name.
    pub name: String,
    /// Whether the method mutates no state.
    #[serde(default)]
    pub constant: bool,
    /// Input arguments, in declaration order.
    #[serde(default)]
    pub inputs: Vec<Param>,
    /// Return values, in declaration order.
    #[serde(default)]
    pub outputs: Vec<Param>,
}

impl Function {
    /// Canonical signature according to the ABI spec, e.g.
    /// `foo(uint32,int256)`.
    ///
    /// Bare `uint`/`int` in the schema have already been canonicalized to
    /// their 256-bit forms by the type parser.
    pub fn abi_signature(&self) -> String {
        let types =
            self.inputs.iter().map(|param| param.kind.to_string()).collect::<Vec<_>>().join(",");
        format!("{}({})", self.name, types)
    }

    /// Method identifier: the first four bytes of the Keccak-256 of the
    /// canonical signature.
    pub fn selector(&self) -> Selector {
        utils::id(self.abi_signature())
    }

    /// Encodes call data: the selector followed by the packed arguments.
    pub fn encode_input(&self, tokens: &[Token]) -> Result<Bytes, Error> {
        let mut data = self.selector().to_vec();
        data.extend(self.encode_args(tokens)?);
        Ok(data)
    }

    /// Packs arguments without the selector prefix.
    pub fn encode_args(&self, tokens: &[Token]) -> Result<Bytes, Error> {
        check_args(&self.inputs, tokens)?;
        Ok(encode(tokens))
    }

    /// Decodes the argument tuple of a call; `data` excludes the selector.
    pub fn decode_input(&self, data: &[u8]) -> Result<Vec<Token>, Error> {
        decode(&kinds(&self.inputs), data)
    }

    /// Decodes a return buffer into tokens.
    pub fn decode_output(&self, data: &[u8]) -> Result<Vec<Token>, Error> {
        decode(&kinds(&self.outputs), data)
    }

    /// Decodes a return buffer straight into a destination.
    ///
    /// A [`Dest::Single`] is accepted when there is exactly one output;
    /// otherwise the destination must be a sequence or a record.
    pub fn unpack_output(&self, data: &[u8], dest: Dest<'_>) -> Result<(), Error> {
        let tokens = self.decode_output(data)?;
        dest::assign(&self.outputs, tokens, dest)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "function {}({})", self.name, declarations(&self.inputs))?;
        if self.constant {
            f.write_str(" constant")?;
        }
        // the returns clause is always present, even with no outputs
        write!(f, " returns ({})", declarations(&self.outputs))
    }
}

fn declarations(params: &[Param]) -> String {
    params
        .iter()
        .map(|param| {
            if param.name.is_empty() {
                param.kind.to_string()
            } else {
                format!("{} {}", param.kind, param.name)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// The deployment argument list; packed without a selector and appended
/// to the contract creation code.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Constructor {
    /// Input arguments, in declaration order.
    #[serde(default)]
    pub inputs: Vec<Param>,
}

impl Constructor {
    /// Packs constructor arguments.
    pub fn encode_input(&self, tokens: &[Token]) -> Result<Bytes, Error> {
        check_args(&self.inputs, tokens)?;
        Ok(encode(tokens))
    }
}

pub(crate) fn kinds(params: &[Param]) -> Vec<ParamType> {
    params.iter().map(|param| param.kind.clone()).collect()
}

/// Checks arity and per-position schema conformance.
pub(crate) fn check_args(params: &[Param], tokens: &[Token]) -> Result<(), Error> {
    if params.len() != tokens.len() {
        return Err(Error::ArgumentCount { got: tokens.len(), expected: params.len() });
    }
    for (param, token) in params.iter().zip(tokens) {
        token.check(&param.kind)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::U256;
    use crate::utils::keccak256;

    fn function(definition: &str) -> Function {
        serde_json::from_str(definition).unwrap()
    }

    #[test]
    fn signature_uses_canonical_type_names() {
        let f = function(
            r#"{"name":"foo","inputs":[{"name":"a","type":"uint32"},{"name":"b","type":"int"}]}"#,
        );
        assert_eq!(f.abi_signature(), "foo(uint32,int256)");
    }

    #[test]
    fn selector_is_keccak_prefix() {
        for signature in ["balance(uint256)", "check(address,uint256)"] {
            let name = signature.split('(').next().unwrap();
            let inputs = match name {
                "balance" => r#"[{"name":"in","type":"uint256"}]"#,
                _ => r#"[{"name":"t","type":"address"},{"name":"b","type":"uint256"}]"#,
            };
            let f = function(&format!(r#"{{"name":"{name}","inputs":{inputs}}}"#));
            assert_eq!(f.abi_signature(), signature);
            assert_eq!(f.selector(), keccak256(signature)[..4]);
        }
    }

    #[test]
    fn encode_input_is_selector_prefixed() {
        let f = function(
            r#"{"name":"baz","inputs":[{"name":"a","type":"uint32"},{"name":"b","type":"bool"}]}"#,
        );
        let encoded = f
            .encode_input(&[Token::Uint(U256::from(69u8)), Token::Bool(true)])
            .unwrap();
        let expected = hex::decode(
            "cdcd77c0\
             0000000000000000000000000000000000000000000000000000000000000045\
             0000000000000000000000000000000000000000000000000000000000000001",
        )
        .unwrap();
        assert_eq!(encoded, expected);

        // and the raw argument packing drops the selector
        let raw = f.encode_args(&[Token::Uint(U256::from(69u8)), Token::Bool(true)]).unwrap();
        assert_eq!(raw, expected[4..]);
    }

    #[test]
    fn pack_checks_arity_and_types() {
        let f = function(r#"{"name":"bar","inputs":[{"name":"a","type":"uint8"}]}"#);

        assert!(matches!(
            f.encode_input(&[]),
            Err(Error::ArgumentCount { got: 0, expected: 1 })
        ));
        assert!(matches!(
            f.encode_input(&[Token::Bool(true)]),
            Err(Error::TypeMismatch { .. })
        ));
        assert!(matches!(
            f.encode_input(&[Token::Uint(U256::from(300u16))]),
            Err(Error::OutOfRange(_))
        ));
    }

    #[test]
    fn decode_output_roundtrip() {
        let f = function(
            r#"{"name":"get","outputs":[{"name":"value","type":"uint256"},{"name":"ok","type":"bool"}]}"#,
        );
        let tokens = vec![Token::Uint(U256::from(7u8)), Token::Bool(true)];
        let decoded = f.decode_output(&encode(&tokens)).unwrap();
        assert_eq!(decoded, tokens);
    }

    #[test]
    fn display_declaration() {
        let f = function(
            r#"{"name":"baz","constant":true,"inputs":[{"name":"a","type":"uint32"}],"outputs":[{"name":"","type":"bool"}]}"#,
        );
        assert_eq!(f.to_string(), "function baz(uint32 a) constant returns (bool)");

        let f = function(r#"{"name":"ping","inputs":[]}"#);
        assert_eq!(f.to_string(), "function ping() returns ()");
    }

    #[test]
    fn constructor_packs_without_selector() {
        let constructor: Constructor =
            serde_json::from_str(r#"{"inputs":[{"name":"a","type":"uint256"}]}"#).unwrap();
        let encoded = constructor.encode_input(&[Token::Uint(U256::from(1u8))]).unwrap();
        assert_eq!(encoded.len(), 32);
        assert_eq!(encoded[31], 1);
    }
}
