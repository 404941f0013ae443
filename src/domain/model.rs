use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Keccak256};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use primitive_types::U256;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("address must start with 0x")]
    MissingPrefix,
    #[error("address must have 40 hex digits, got {0}")]
    InvalidLength(usize),
    #[error("address contains non-hex characters")]
    InvalidHex,
    #[error("address has an invalid EIP-55 checksum")]
    BadChecksum,
}

/// 20 位元組的帳戶地址。
///
/// 全小寫或全大寫的輸入直接接受；大小寫混合時必須符合 EIP-55 校驗。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; 20]);

impl Address {
    pub fn parse(input: &str) -> Result<Self, AddressError> {
        let digits = input
            .strip_prefix("0x")
            .or_else(|| input.strip_prefix("0X"))
            .ok_or(AddressError::MissingPrefix)?;
        if digits.len() != 40 {
            return Err(AddressError::InvalidLength(digits.len()));
        }

        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits, &mut bytes).map_err(|_| AddressError::InvalidHex)?;
        let address = Self(bytes);

        let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
        if has_lower && has_upper && address.to_checksum()[2..] != *digits {
            return Err(AddressError::BadChecksum);
        }

        Ok(address)
    }

    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(self.0);
        let hash = Keccak256::digest(lower.as_bytes());

        let mut out = String::with_capacity(42);
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = (hash[i / 2] >> (if i % 2 == 0 { 4 } else { 0 })) & 0x0f;
            if c.is_ascii_alphabetic() && nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_checksum())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Address::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// 節點回傳的交易 hash，原樣回傳給呼叫端
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TxHash(String);

impl TxHash {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateGroupRequest {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContributeRequest {
    #[serde(deserialize_with = "lenient::uint")]
    pub group_id: U256,
    #[serde(deserialize_with = "lenient::uint")]
    pub amount: U256,
    pub from: Address,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProposeRequest {
    #[serde(deserialize_with = "lenient::uint")]
    pub group_id: U256,
    pub description: String,
    #[serde(deserialize_with = "lenient::uint")]
    pub amount: U256,
    pub from: Address,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VoteRequest {
    #[serde(deserialize_with = "lenient::uint")]
    pub proposal_id: U256,
    pub from: Address,
    pub support: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExecuteRequest {
    #[serde(deserialize_with = "lenient::uint")]
    pub proposal_id: U256,
}

/// 成功回應：`{"status": ..., "tx": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxAck {
    pub status: String,
    pub tx: String,
}

impl TxAck {
    pub fn new(status: &str, tx: &TxHash) -> Self {
        Self {
            status: status.to_string(),
            tx: tx.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NetworkStatus {
    pub chain_id: u64,
    pub block_number: u64,
}

/// 治理合約上可呼叫的函式與其參數
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractCall {
    CreateGroup {
        name: String,
    },
    Contribute {
        group_id: U256,
    },
    ProposeInvestment {
        group_id: U256,
        description: String,
        amount: U256,
    },
    Vote {
        proposal_id: U256,
        support: bool,
    },
    ExecuteProposal {
        proposal_id: U256,
    },
}

impl ContractCall {
    pub fn function_name(&self) -> &'static str {
        match self {
            Self::CreateGroup { .. } => "createGroup",
            Self::Contribute { .. } => "contribute",
            Self::ProposeInvestment { .. } => "proposeInvestment",
            Self::Vote { .. } => "vote",
            Self::ExecuteProposal { .. } => "executeProposal",
        }
    }
}

mod lenient {
    use super::U256;
    use serde::de::{self, Deserialize, Deserializer};
    use serde_json::Value;

    /// 接受非負整數或十進位字串（例如 `5` 或 `"5"`），上限為 uint256
    pub fn uint<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let raw = match Value::deserialize(deserializer)? {
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.trim().to_string(),
            other => {
                return Err(de::Error::custom(format!(
                    "expected a non-negative integer or a decimal string, got {}",
                    other
                )))
            }
        };

        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(de::Error::custom(format!(
                "expected a non-negative integer, got {}",
                raw
            )));
        }
        U256::from_dec_str(&raw)
            .map_err(|_| de::Error::custom(format!("{} does not fit in 256 bits", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_checksum_address_roundtrip() {
        // EIP-55 reference vectors
        for addr in [
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
            "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
        ] {
            let parsed = Address::parse(addr).unwrap();
            assert_eq!(parsed.to_checksum(), addr);
        }
    }

    #[test]
    fn test_address_case_rules() {
        assert!(Address::parse("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").is_ok());
        assert!(Address::parse("0x5AAEB6053F3E94C9B9A09F33669435E7EF1BEAED").is_ok());
        assert_eq!(
            Address::parse("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAeD"),
            Err(AddressError::BadChecksum)
        );
        assert_eq!(
            Address::parse("5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"),
            Err(AddressError::MissingPrefix)
        );
        assert_eq!(Address::parse("0x1234"), Err(AddressError::InvalidLength(4)));
        assert_eq!(
            Address::parse("0xYourWalletAddressHere0000000000000000000"),
            Err(AddressError::InvalidHex)
        );
    }

    #[test]
    fn test_integer_fields_accept_numbers_and_strings() {
        let req: ContributeRequest = serde_json::from_value(json!({
            "group_id": "7",
            "amount": 2,
            "from": "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"
        }))
        .unwrap();
        assert_eq!(req.group_id, U256::from(7));
        assert_eq!(req.amount, U256::from(2));
    }

    #[test]
    fn test_integer_fields_accept_values_beyond_u64_and_u128() {
        let above_u64: ExecuteRequest =
            serde_json::from_str(r#"{"proposal_id": 18446744073709551616}"#).unwrap();
        assert_eq!(above_u64.proposal_id, U256::from(u64::MAX) + 1);

        let above_u128: ExecuteRequest =
            serde_json::from_str(r#"{"proposal_id": "340282366920938463463374607431768211456"}"#)
                .unwrap();
        assert_eq!(above_u128.proposal_id, U256::from(u128::MAX) + 1);

        let max = U256::MAX.to_string();
        let at_max: ExecuteRequest =
            serde_json::from_str(&format!(r#"{{"proposal_id": {}}}"#, max)).unwrap();
        assert_eq!(at_max.proposal_id, U256::MAX);

        let beyond_max = serde_json::from_str::<ExecuteRequest>(&format!(
            r#"{{"proposal_id": "{}0"}}"#,
            max
        ));
        assert!(beyond_max.is_err());
    }

    #[test]
    fn test_integer_fields_reject_negative_and_fractional() {
        let negative = serde_json::from_value::<ExecuteRequest>(json!({"proposal_id": -1}));
        assert!(negative.is_err());

        let fractional = serde_json::from_value::<ExecuteRequest>(json!({"proposal_id": 1.5}));
        assert!(fractional.is_err());

        let garbage = serde_json::from_value::<ExecuteRequest>(json!({"proposal_id": "one"}));
        assert!(garbage.is_err());

        let exponent = serde_json::from_str::<ExecuteRequest>(r#"{"proposal_id": 1e3}"#);
        assert!(exponent.is_err());
    }

    #[test]
    fn test_vote_support_must_be_boolean() {
        let ok: VoteRequest = serde_json::from_value(json!({
            "proposal_id": 1,
            "from": "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed",
            "support": false
        }))
        .unwrap();
        assert!(!ok.support);

        let missing = serde_json::from_value::<VoteRequest>(json!({
            "proposal_id": 1,
            "from": "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"
        }));
        assert!(missing.is_err());
    }
}
