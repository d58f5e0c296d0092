//! Hex quantity codec.
//!
//! Quantities travel as `0x`-prefixed hex strings. Small counts decode to
//! `u64`; balances and prices decode to `BigUint`, which never overflows.
//! The `serde_*` submodules plug the codec into record fields via
//! `#[serde(with = "...")]`.

use num_bigint::BigUint;

use crate::error::QuantityError;

/// Wei in one ether.
pub const WEI_PER_ETHER: u64 = 1_000_000_000_000_000_000;

/// One ether (10^18 wei).
pub fn eth1() -> BigUint {
    BigUint::from(WEI_PER_ETHER)
}

/// Strip the `0x` prefix and check that only hex digits remain.
fn digits(s: &str) -> Result<&str, QuantityError> {
    let digits = s
        .strip_prefix("0x")
        .ok_or_else(|| QuantityError::Parse(s.to_string()))?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(QuantityError::Parse(s.to_string()));
    }
    Ok(digits)
}

/// Decode a quantity that must fit in a `u64`.
///
/// `"0x"` decodes to zero. Leading zeros are accepted.
pub fn hex_to_int(s: &str) -> Result<u64, QuantityError> {
    let significant = digits(s)?.trim_start_matches('0');
    if significant.is_empty() {
        return Ok(0);
    }
    if significant.len() > 16 {
        return Err(QuantityError::Overflow(s.to_string()));
    }
    u64::from_str_radix(significant, 16).map_err(|_| QuantityError::Parse(s.to_string()))
}

/// Decode a quantity of any magnitude.
pub fn hex_to_big_int(s: &str) -> Result<BigUint, QuantityError> {
    let digits = digits(s)?;
    if digits.is_empty() {
        return Ok(BigUint::default());
    }
    BigUint::parse_bytes(digits.as_bytes(), 16).ok_or_else(|| QuantityError::Parse(s.to_string()))
}

/// Encode as lower-case `0x` hex with no leading zeros (`0x0` for zero).
pub fn int_to_hex(n: u64) -> String {
    format!("{n:#x}")
}

/// Encode as lower-case `0x` hex with no leading zeros (`0x0` for zero).
pub fn big_int_to_hex(n: &BigUint) -> String {
    format!("{n:#x}")
}

pub mod serde_u64 {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::int_to_hex(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::hex_to_int(&s).map_err(D::Error::custom)
    }
}

pub mod serde_opt_u64 {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(n) => serializer.serialize_str(&super::int_to_hex(*n)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<u64>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|s| super::hex_to_int(&s).map_err(D::Error::custom))
            .transpose()
    }
}

pub mod serde_big {
    use num_bigint::BigUint;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::big_int_to_hex(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::hex_to_big_int(&s).map_err(D::Error::custom)
    }
}

pub mod serde_opt_big {
    use num_bigint::BigUint;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<BigUint>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(n) => serializer.serialize_str(&super::big_int_to_hex(n)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<BigUint>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|s| super::hex_to_big_int(&s).map_err(D::Error::custom))
            .transpose()
    }
}
