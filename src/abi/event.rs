//! Event model: topic identifiers and log decoding.

use super::{decode, dest, Dest, Error, Param, ParamType, Token};
use crate::types::H256;
use crate::utils;
use serde::Deserialize;

/// An unparsed log record: its topics and data payload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawLog {
    /// Indexed topics, the event id first for non-anonymous events.
    pub topics: Vec<H256>,
    /// ABI-encoded non-indexed values.
    pub data: Vec<u8>,
}

impl From<(Vec<H256>, Vec<u8>)> for RawLog {
    fn from((topics, data): (Vec<H256>, Vec<u8>)) -> Self {
        RawLog { topics, data }
    }
}

/// A contract event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Event {
    /// Event name.
    pub name: String,
    /// Anonymous events carry no identifying first topic.
    #[serde(default)]
    pub anonymous: bool,
    /// Inputs, in declaration order; `indexed` ones live in the topics.
    #[serde(default)]
    pub inputs: Vec<Param>,
}

impl Event {
    /// Canonical signature text, e.g. `Transfer(address,address,uint256)`.
    pub fn abi_signature(&self) -> String {
        let types =
            self.inputs.iter().map(|param| param.kind.to_string()).collect::<Vec<_>>().join(",");
        format!("{}({})", self.name, types)
    }

    /// Event identifier: the full Keccak-256 of the canonical signature,
    /// used as topic 0 of non-anonymous logs.
    pub fn signature(&self) -> H256 {
        H256::from(utils::keccak256(self.abi_signature()))
    }

    /// Decodes a raw log into tokens ordered as the inputs are declared.
    ///
    /// Indexed inputs of value type are recovered from their topic word.
    /// Indexed strings, byte sequences and arrays are stored in the log as
    /// the hash of their encoding and surface as [`Token::Hash`]; the
    /// original value is not recoverable. Non-indexed inputs are decoded
    /// from the data payload.
    pub fn decode_log(&self, log: &RawLog) -> Result<Vec<Token>, Error> {
        let topics = if self.anonymous {
            &log.topics[..]
        } else {
            match log.topics.first() {
                Some(first) if *first == self.signature() => &log.topics[1..],
                _ => return Err(Error::TopicMismatch(self.name.clone())),
            }
        };

        let indexed_count = self.inputs.iter().filter(|param| param.indexed).count();
        if topics.len() < indexed_count {
            return Err(Error::InvalidData("log carries fewer topics than indexed inputs"));
        }

        let data_kinds: Vec<ParamType> = self
            .inputs
            .iter()
            .filter(|param| !param.indexed)
            .map(|param| param.kind.clone())
            .collect();
        let mut data_tokens = decode(&data_kinds, &log.data)?.into_iter();
        let mut topic_words = topics.iter();

        let mut tokens = Vec::with_capacity(self.inputs.len());
        for param in &self.inputs {
            let token = if param.indexed {
                let topic =
                    topic_words.next().ok_or(Error::InvalidData("missing indexed topic"))?;
                decode_topic(&param.kind, topic)?
            } else {
                data_tokens.next().ok_or(Error::InvalidData("missing data value"))?
            };
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Decodes a raw log straight into a destination, inputs merged in
    /// declaration order.
    pub fn unpack_log(&self, log: &RawLog, dest: Dest<'_>) -> Result<(), Error> {
        let tokens = self.decode_log(log)?;
        dest::assign(&self.inputs, tokens, dest)
    }
}

/// Indexed values of static type live in their topic word; everything
/// else was hashed when the log was emitted.
fn decode_topic(kind: &ParamType, topic: &H256) -> Result<Token, Error> {
    match kind {
        ParamType::Bytes
        | ParamType::String
        | ParamType::Array(_)
        | ParamType::FixedArray(..) => Ok(Token::Hash(*topic)),
        _ => {
            let mut tokens = decode(&[kind.clone()], topic.as_bytes())?;
            tokens.pop().ok_or(Error::InvalidData("empty topic decode"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::encode;
    use crate::types::{Address, U256};
    use crate::utils::keccak256;
    use hex_literal::hex;

    fn event(definition: &str) -> Event {
        serde_json::from_str(definition).unwrap()
    }

    fn transfer_event() -> Event {
        event(
            r#"{
              "anonymous": false,
              "inputs": [
                {"indexed": true, "name": "from", "type": "address"},
                {"indexed": true, "name": "to", "type": "address"},
                {"indexed": false, "name": "value", "type": "uint256"}
              ],
              "name": "Transfer",
              "type": "event"
            }"#,
        )
    }

    #[test]
    fn signature_hash() {
        let balance = event(r#"{"name":"balance","inputs":[{"name":"in","type":"uint256"}]}"#);
        assert_eq!(balance.abi_signature(), "balance(uint256)");
        assert_eq!(balance.signature(), H256::from(keccak256("balance(uint256)")));

        let check = event(
            r#"{"name":"check","inputs":[{"name":"t","type":"address"},{"name":"b","type":"uint256"}]}"#,
        );
        assert_eq!(check.signature(), H256::from(keccak256("check(address,uint256)")));
    }

    #[test]
    fn erc20_transfer_topic() {
        // the well-known ERC-20 Transfer topic id
        assert_eq!(
            transfer_event().signature(),
            H256::from(hex!("ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"))
        );
    }

    #[test]
    fn decode_transfer_log() {
        let event = transfer_event();
        let from = Address::from(hex!("1111111111111111111111111111111111111111"));
        let to = Address::from(hex!("2222222222222222222222222222222222222222"));

        let log = RawLog {
            topics: vec![
                event.signature(),
                H256::from(from),
                H256::from(to),
            ],
            data: hex!("00000000000000000000000000000000000000000000000000000000000f4240")
                .to_vec(),
        };
        let tokens = event.decode_log(&log).unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Address(from),
                Token::Address(to),
                Token::Uint(U256::from(1_000_000u64)),
            ]
        );
    }

    #[test]
    fn topic_mismatch_is_rejected() {
        let event = transfer_event();

        let log = RawLog { topics: vec![H256::zero()], data: vec![] };
        assert!(matches!(event.decode_log(&log), Err(Error::TopicMismatch(_))));

        let log = RawLog { topics: vec![], data: vec![] };
        assert!(matches!(event.decode_log(&log), Err(Error::TopicMismatch(_))));
    }

    #[test]
    fn anonymous_event_skips_no_topic() {
        let event = event(
            r#"{"name":"Ping","anonymous":true,"inputs":[{"indexed":true,"name":"who","type":"address"}]}"#,
        );
        let who = Address::from([0x42; 20]);
        let log = RawLog { topics: vec![H256::from(who)], data: vec![] };
        assert_eq!(event.decode_log(&log).unwrap(), vec![Token::Address(who)]);
    }

    #[test]
    fn indexed_static_array_surfaces_as_hash() {
        // LogStaticArray(uint256[3] indexed a, uint256[3] b, string c)
        let event = event(
            r#"{
              "anonymous": false,
              "inputs": [
                {"indexed": true, "name": "a", "type": "uint256[3]"},
                {"indexed": false, "name": "b", "type": "uint256[3]"},
                {"indexed": false, "name": "c", "type": "string"}
              ],
              "name": "LogStaticArray",
              "type": "event"
            }"#,
        );

        // the topic is the hash of the encoding of [1, 2, 3]
        let a_topic = H256::from(keccak256(encode(&[
            Token::Uint(U256::from(1u8)),
            Token::Uint(U256::from(2u8)),
            Token::Uint(U256::from(3u8)),
        ])));
        let data = hex!(
            "0000000000000000000000000000000000000000000000000000000000000004"
            "0000000000000000000000000000000000000000000000000000000000000005"
            "0000000000000000000000000000000000000000000000000000000000000006"
            "0000000000000000000000000000000000000000000000000000000000000080"
            "0000000000000000000000000000000000000000000000000000000000000003"
            "6162630000000000000000000000000000000000000000000000000000000000"
        );
        let log = RawLog { topics: vec![event.signature(), a_topic], data: data.to_vec() };

        let tokens = event.decode_log(&log).unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Hash(a_topic),
                Token::FixedArray(vec![
                    Token::Uint(U256::from(4u8)),
                    Token::Uint(U256::from(5u8)),
                    Token::Uint(U256::from(6u8)),
                ]),
                Token::String("abc".to_owned()),
            ]
        );
    }

    #[test]
    fn missing_topics_fail() {
        let event = transfer_event();
        let log = RawLog {
            topics: vec![event.signature()],
            data: hex!("0000000000000000000000000000000000000000000000000000000000000001")
                .to_vec(),
        };
        assert!(matches!(event.decode_log(&log), Err(Error::InvalidData(_))));
    }
}
