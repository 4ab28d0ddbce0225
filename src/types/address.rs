//! Owner and recipient identities
//!
//! An [`Address`] is an opaque, fixed-width identifier supplied by the host
//! environment. The all-zero value is the null identity and is never a valid
//! owner at construction time or a valid send recipient.

use super::error::WalletError;
use std::fmt;
use std::str::FromStr;

/// Width of an identity in bytes
pub const ADDRESS_LEN: usize = 20;

/// Fixed-width identity
///
/// Parsed from and displayed as `0x`-prefixed lowercase hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// The null identity
    pub const ZERO: Address = Address([0u8; ADDRESS_LEN]);

    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Address(bytes)
    }

    /// Build an identity whose trailing eight bytes hold `value` (big-endian)
    ///
    /// Handy for fixtures and benchmarks where readable identities matter
    /// more than realistic ones.
    pub fn from_low_u64(value: u64) -> Self {
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes[ADDRESS_LEN - 8..].copy_from_slice(&value.to_be_bytes());
        Address(bytes)
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl FromStr for Address {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        let mut bytes = [0u8; ADDRESS_LEN];
        hex::decode_to_slice(digits, &mut bytes).map_err(|_| WalletError::invalid_address(s))?;

        Ok(Address(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::prefixed("0x00000000000000000000000000000000000000a1")]
    #[case::upper_prefix("0X00000000000000000000000000000000000000A1")]
    #[case::bare("00000000000000000000000000000000000000a1")]
    #[case::padded("  0x00000000000000000000000000000000000000a1  ")]
    fn test_parse_valid(#[case] input: &str) {
        let address: Address = input.parse().unwrap();
        assert_eq!(address, Address::from_low_u64(0xa1));
    }

    #[rstest]
    #[case::too_short("0x1234")]
    #[case::too_long("0x00000000000000000000000000000000000000a1ff")]
    #[case::not_hex("0xzz000000000000000000000000000000000000a1")]
    #[case::empty("")]
    fn test_parse_invalid(#[case] input: &str) {
        let result = input.parse::<Address>();
        assert!(matches!(result, Err(WalletError::InvalidAddress { .. })));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let address = Address::from_low_u64(0xdead_beef);
        let text = address.to_string();
        assert_eq!(text, "0x00000000000000000000000000000000deadbeef");
        assert_eq!(text.parse::<Address>().unwrap(), address);
    }

    #[test]
    fn test_zero_identity() {
        assert!(Address::ZERO.is_zero());
        assert!(Address::default().is_zero());
        assert!(!Address::from_low_u64(1).is_zero());
    }
}
