// Fixed-width unsigned integer encoding for on-chain delivery
// Width and byte order come from configuration and never change between runs.

use crate::errors::ExecutionError;
use serde::{Deserialize, Serialize};

pub use ethers_core::types::U256;

/// Width of an EVM word in bytes
pub const WORD_BYTES: usize = 32;

/// Byte order of the encoded integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    #[default]
    Big,
    Little,
}

/// The job's only successful output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedResult {
    bytes: Vec<u8>,
    byte_order: ByteOrder,
}

impl EncodedResult {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn width(&self) -> usize {
        self.bytes.len()
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// `0x`-prefixed lowercase hex, as handed back to the host
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.bytes))
    }

    /// Decode the bytes back into the integer they represent
    pub fn value(&self) -> U256 {
        let mut be = self.bytes.clone();
        if self.byte_order == ByteOrder::Little {
            be.reverse();
        }
        U256::from_big_endian(&be)
    }
}

/// Encodes extracted values into fixed-width unsigned integers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultEncoder {
    width_bytes: usize,
    byte_order: ByteOrder,
}

impl Default for ResultEncoder {
    fn default() -> Self {
        Self::uint256()
    }
}

impl ResultEncoder {
    pub fn new(width_bytes: usize, byte_order: ByteOrder) -> Result<Self, ExecutionError> {
        if width_bytes == 0 || width_bytes > WORD_BYTES {
            return Err(ExecutionError::InvalidConfiguration(format!(
                "encoding width must be between 1 and {} bytes, got {}",
                WORD_BYTES, width_bytes
            )));
        }
        Ok(Self {
            width_bytes,
            byte_order,
        })
    }

    /// 32-byte big-endian, the EVM `uint256` ABI layout
    pub fn uint256() -> Self {
        Self {
            width_bytes: WORD_BYTES,
            byte_order: ByteOrder::Big,
        }
    }

    pub fn width_bytes(&self) -> usize {
        self.width_bytes
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    pub fn encode(&self, value: &U256) -> Result<EncodedResult, ExecutionError> {
        if (value.bits() + 7) / 8 > self.width_bytes {
            return Err(ExecutionError::Overflow(format!(
                "{} does not fit in {} bytes",
                value, self.width_bytes
            )));
        }

        let mut word = [0u8; WORD_BYTES];
        value.to_big_endian(&mut word);
        let mut bytes = word[WORD_BYTES - self.width_bytes..].to_vec();
        if self.byte_order == ByteOrder::Little {
            bytes.reverse();
        }

        Ok(EncodedResult {
            bytes,
            byte_order: self.byte_order,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_uint256_big_endian() {
        let encoded = ResultEncoder::uint256()
            .encode(&U256::from(1_000_000u64))
            .unwrap();
        let mut expected = [0u8; 32];
        expected[29] = 0x0f;
        expected[30] = 0x42;
        expected[31] = 0x40;
        assert_eq!(encoded.as_bytes(), &expected);
        assert_eq!(
            encoded.to_hex(),
            "0x00000000000000000000000000000000000000000000000000000000000f4240"
        );
    }

    #[test]
    fn test_encode_max_value() {
        let encoded = ResultEncoder::uint256().encode(&U256::MAX).unwrap();
        assert!(encoded.as_bytes().iter().all(|b| *b == 0xff));
        assert_eq!(encoded.value(), U256::MAX);
    }

    #[test]
    fn test_encode_little_endian_narrow_width() {
        let encoder = ResultEncoder::new(4, ByteOrder::Little).unwrap();
        let encoded = encoder.encode(&U256::from(0x0102_0304u64)).unwrap();
        assert_eq!(encoded.as_bytes(), &[0x04, 0x03, 0x02, 0x01]);
        assert_eq!(encoded.byte_order(), ByteOrder::Little);
        assert_eq!(encoded.value(), U256::from(0x0102_0304u64));
    }

    #[test]
    fn test_encode_overflow_for_narrow_width() {
        let encoder = ResultEncoder::new(2, ByteOrder::Big).unwrap();
        assert!(encoder.encode(&U256::from(65_535u64)).is_ok());
        assert!(matches!(
            encoder.encode(&U256::from(65_536u64)),
            Err(ExecutionError::Overflow(_))
        ));
    }

    #[test]
    fn test_invalid_width_rejected() {
        assert!(ResultEncoder::new(0, ByteOrder::Big).is_err());
        assert!(ResultEncoder::new(33, ByteOrder::Big).is_err());
        let encoder = ResultEncoder::new(32, ByteOrder::Little).unwrap();
        assert_eq!(encoder.width_bytes(), 32);
        assert_eq!(encoder.byte_order(), ByteOrder::Little);
    }

    #[test]
    fn test_zero_encodes_to_all_zero_bytes() {
        let encoded = ResultEncoder::default().encode(&U256::zero()).unwrap();
        assert!(encoded.as_bytes().iter().all(|b| *b == 0));
        assert_eq!(encoded.width(), 32);
    }
}
