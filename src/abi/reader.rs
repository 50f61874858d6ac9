//! Parsing of ABI type strings into [`ParamType`]s.

use super::{Error, ParamType};

/// Parser for canonical ABI type strings such as `uint256`, `bytes3` or
/// `int128[3][]`.
pub struct Reader;

impl Reader {
    /// Parses a type string into its descriptor.
    ///
    /// Bare `uint`, `int` and `hash` canonicalize to their 256-bit forms;
    /// the [`std::fmt::Display`] form of the result round-trips through
    /// this parser.
    pub fn read(name: &str) -> Result<ParamType, Error> {
        // Trailing `[..]` groups wrap the type to their left, outermost
        // group last.
        if let Some(stripped) = name.strip_suffix(']') {
            let open = stripped
                .rfind('[')
                .ok_or_else(|| Error::InvalidType(name.into()))?;
            let (prefix, count) = stripped.split_at(open);
            let elem = Box::new(Self::read(prefix)?);
            return match &count[1..] {
                "" => Ok(ParamType::Array(elem)),
                digits => {
                    let len = digits
                        .parse::<usize>()
                        .map_err(|_| Error::InvalidType(name.into()))?;
                    if len == 0 {
                        return Err(Error::InvalidType(name.into()));
                    }
                    Ok(ParamType::FixedArray(elem, len))
                }
            };
        }

        let param_type = match name {
            "address" => ParamType::Address,
            "bytes" => ParamType::Bytes,
            "bool" => ParamType::Bool,
            "string" => ParamType::String,
            "int" => ParamType::Int(256),
            "uint" => ParamType::Uint(256),
            "hash" => ParamType::Hash(32),
            "function" => ParamType::Function,
            s if s.starts_with("int") => ParamType::Int(bit_width(name, &s[3..])?),
            s if s.starts_with("uint") => ParamType::Uint(bit_width(name, &s[4..])?),
            s if s.starts_with("bytes") => {
                let len = s[5..]
                    .parse::<usize>()
                    .map_err(|_| Error::InvalidType(name.into()))?;
                if len == 0 || len > 32 {
                    return Err(Error::InvalidType(name.into()));
                }
                ParamType::FixedBytes(len)
            }
            s if s.starts_with("hash") => ParamType::Hash(bit_width(name, &s[4..])? / 8),
            _ => return Err(Error::InvalidType(name.into())),
        };
        Ok(param_type)
    }
}

/// Parses an integer bit width: a multiple of 8 between 8 and 256.
fn bit_width(whole: &str, digits: &str) -> Result<usize, Error> {
    let width = digits
        .parse::<usize>()
        .map_err(|_| Error::InvalidType(whole.into()))?;
    if width == 0 || width > 256 || width % 8 != 0 {
        return Err(Error::InvalidType(whole.into()));
    }
    Ok(width)
}

#[cfg(test)]
mod tests {
    use super::{ParamType, Reader};

    #[test]
    fn read_basic_types() {
        assert_eq!(Reader::read("address").unwrap(), ParamType::Address);
        assert_eq!(Reader::read("bytes").unwrap(), ParamType::Bytes);
        assert_eq!(Reader::read("bytes3").unwrap(), ParamType::FixedBytes(3));
        assert_eq!(Reader::read("bool").unwrap(), ParamType::Bool);
        assert_eq!(Reader::read("string").unwrap(), ParamType::String);
        assert_eq!(Reader::read("int128").unwrap(), ParamType::Int(128));
        assert_eq!(Reader::read("uint8").unwrap(), ParamType::Uint(8));
        assert_eq!(Reader::read("hash128").unwrap(), ParamType::Hash(16));
        assert_eq!(Reader::read("function").unwrap(), ParamType::Function);
    }

    #[test]
    fn bare_integers_canonicalize_to_256() {
        assert_eq!(Reader::read("uint").unwrap(), ParamType::Uint(256));
        assert_eq!(Reader::read("int").unwrap(), ParamType::Int(256));
        assert_eq!(Reader::read("hash").unwrap(), ParamType::Hash(32));
    }

    #[test]
    fn read_array_suffixes() {
        assert_eq!(
            Reader::read("uint256[]").unwrap(),
            ParamType::Array(Box::new(ParamType::Uint(256)))
        );
        assert_eq!(
            Reader::read("int128[3]").unwrap(),
            ParamType::FixedArray(Box::new(ParamType::Int(128)), 3)
        );
        assert_eq!(
            Reader::read("string[]").unwrap(),
            ParamType::Array(Box::new(ParamType::String))
        );
        // innermost type leftmost, brackets applied left to right
        assert_eq!(
            Reader::read("bytes32[2][]").unwrap(),
            ParamType::Array(Box::new(ParamType::FixedArray(
                Box::new(ParamType::FixedBytes(32)),
                2
            )))
        );
        assert_eq!(
            Reader::read("uint8[][3]").unwrap(),
            ParamType::FixedArray(Box::new(ParamType::Array(Box::new(ParamType::Uint(8)))), 3)
        );
    }

    #[test]
    fn display_round_trips() {
        for name in [
            "address",
            "bytes",
            "bytes7",
            "bool",
            "string",
            "int64",
            "uint256",
            "hash256",
            "function",
            "uint256[]",
            "int128[3]",
            "bytes32[2][4]",
            "string[][]",
        ] {
            let parsed = Reader::read(name).unwrap();
            assert_eq!(parsed.to_string(), name);
            assert_eq!(Reader::read(&parsed.to_string()).unwrap(), parsed);
        }
    }

    #[test]
    fn rejects_malformed_types() {
        for name in [
            "",
            "intx",
            "int0",
            "int7",
            "int264",
            "uint0",
            "uint42",
            "uint512",
            "bytes0",
            "bytes33",
            "hash9",
            "hash512",
            "gas",
            "uint256[",
            "uint256[3",
            "[3]uint256",
            "uint256[0]",
            "uint256[-1]",
            "uint256[a]",
        ] {
            assert!(Reader::read(name).is_err(), "`{name}` should not parse");
        }
    }
}
