use crate::domain::model::{ContractCall, U256};
use crate::utils::error::{GatewayError, Result};
use serde::Deserialize;
use sha3::{Digest, Keccak256};
use std::collections::HashMap;
use std::path::Path;

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Keccak256::digest(data));
    out
}

/// 函式簽名的前 4 個位元組，例如 `transfer(address,uint256)` -> `a9059cbb`
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Uint(U256),
    Bool(bool),
    String(String),
}

fn uint_word(value: U256) -> [u8; 32] {
    let mut word = [0u8; 32];
    value.to_big_endian(&mut word);
    word
}

/// 標準 head/tail 編碼
pub fn encode_tokens(tokens: &[Token]) -> Vec<u8> {
    let head_size = 32 * tokens.len();
    let mut head = Vec::with_capacity(head_size);
    let mut tail = Vec::new();

    for token in tokens {
        match token {
            Token::Uint(v) => head.extend_from_slice(&uint_word(*v)),
            Token::Bool(b) => head.extend_from_slice(&uint_word(U256::from(u8::from(*b)))),
            Token::String(s) => {
                head.extend_from_slice(&uint_word(U256::from(head_size + tail.len())));
                let bytes = s.as_bytes();
                tail.extend_from_slice(&uint_word(U256::from(bytes.len())));
                tail.extend_from_slice(bytes);
                let padding = (32 - bytes.len() % 32) % 32;
                tail.extend(std::iter::repeat(0u8).take(padding));
            }
        }
    }

    head.extend_from_slice(&tail);
    head
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Uint(u16),
    Bool,
    String,
}

impl ParamType {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "bool" => Some(Self::Bool),
            "string" => Some(Self::String),
            "uint" => Some(Self::Uint(256)),
            _ => {
                let bits: u16 = raw.strip_prefix("uint")?.parse().ok()?;
                (bits % 8 == 0 && (8..=256).contains(&bits)).then_some(Self::Uint(bits))
            }
        }
    }

    fn canonical(&self) -> String {
        match self {
            Self::Uint(bits) => format!("uint{}", bits),
            Self::Bool => "bool".to_string(),
            Self::String => "string".to_string(),
        }
    }

    fn same_kind(&self, other: &ParamType) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    fn accepts(&self, token: &Token) -> bool {
        match (self, token) {
            (Self::Uint(bits), Token::Uint(v)) => v.bits() <= usize::from(*bits),
            (Self::Bool, Token::Bool(_)) => true,
            (Self::String, Token::String(_)) => true,
            _ => false,
        }
    }
}

const UINT256: ParamType = ParamType::Uint(256);

/// 閘道會呼叫的合約函式與預期參數
const REQUIRED_FUNCTIONS: [(&str, &[ParamType]); 5] = [
    ("createGroup", &[ParamType::String]),
    ("contribute", &[UINT256]),
    ("proposeInvestment", &[UINT256, ParamType::String, UINT256]),
    ("vote", &[UINT256, ParamType::Bool]),
    ("executeProposal", &[UINT256]),
];

#[derive(Debug, Clone)]
pub struct AbiFunction {
    name: String,
    inputs: Vec<ParamType>,
    selector: [u8; 4],
}

impl AbiFunction {
    fn new(name: &str, inputs: Vec<ParamType>) -> Self {
        let mut function = Self {
            name: name.to_string(),
            inputs,
            selector: [0u8; 4],
        };
        function.selector = selector(&function.signature());
        function
    }

    pub fn signature(&self) -> String {
        let params: Vec<String> = self.inputs.iter().map(ParamType::canonical).collect();
        format!("{}({})", self.name, params.join(","))
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Artifact {
    Compiled { abi: Vec<AbiEntry> },
    Bare(Vec<AbiEntry>),
}

#[derive(Debug, Deserialize)]
struct AbiEntry {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    inputs: Vec<AbiParam>,
}

#[derive(Debug, Deserialize)]
struct AbiParam {
    #[serde(rename = "type")]
    kind: String,
}

/// 治理合約的介面描述：函式名稱 -> 簽名與 selector
#[derive(Debug, Clone)]
pub struct ContractInterface {
    functions: HashMap<&'static str, AbiFunction>,
}

impl ContractInterface {
    /// 未提供 artifact 時使用的標準簽名
    pub fn standard() -> Self {
        let functions = REQUIRED_FUNCTIONS
            .iter()
            .map(|(name, params)| (*name, AbiFunction::new(name, params.to_vec())))
            .collect();
        Self { functions }
    }

    pub fn from_artifact_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_artifact_json(&content)
    }

    /// 解析 truffle/hardhat 編譯輸出（含 `abi` 欄位）或純 ABI 陣列，
    /// 並確認五個必要函式都存在且參數型別相符
    pub fn from_artifact_json(content: &str) -> Result<Self> {
        let artifact: Artifact =
            serde_json::from_str(content).map_err(|e| GatewayError::AbiError {
                message: format!("Unreadable contract artifact: {}", e),
            })?;
        let entries = match artifact {
            Artifact::Compiled { abi } => abi,
            Artifact::Bare(abi) => abi,
        };

        let mut functions = HashMap::new();
        for (name, expected) in REQUIRED_FUNCTIONS.iter() {
            let found = entries
                .iter()
                .filter(|e| e.kind.as_deref().unwrap_or("function") == "function")
                .filter(|e| e.name.as_deref() == Some(*name))
                .find_map(|e| {
                    let inputs: Option<Vec<ParamType>> =
                        e.inputs.iter().map(|p| ParamType::parse(&p.kind)).collect();
                    let inputs = inputs?;
                    let matches = inputs.len() == expected.len()
                        && inputs.iter().zip(expected.iter()).all(|(a, b)| a.same_kind(b));
                    matches.then_some(inputs)
                })
                .ok_or_else(|| GatewayError::AbiError {
                    message: format!(
                        "Contract artifact has no function {} compatible with {}",
                        name,
                        AbiFunction::new(name, expected.to_vec()).signature()
                    ),
                })?;

            functions.insert(*name, AbiFunction::new(name, found));
        }

        Ok(Self { functions })
    }

    pub fn function(&self, name: &str) -> Option<&AbiFunction> {
        self.functions.get(name)
    }

    /// 產生交易的 calldata（selector + 編碼後參數）
    pub fn encode_call(&self, call: &ContractCall) -> Result<Vec<u8>> {
        let function = self
            .function(call.function_name())
            .ok_or_else(|| GatewayError::AbiError {
                message: format!("Unknown contract function {}", call.function_name()),
            })?;

        let tokens = call_tokens(call);
        for (param, token) in function.inputs.iter().zip(tokens.iter()) {
            if !param.accepts(token) {
                return Err(GatewayError::validation(
                    call.function_name(),
                    format!(
                        "{:?} does not fit parameter type {} of {}",
                        token,
                        param.canonical(),
                        function.signature()
                    ),
                ));
            }
        }

        let mut data = function.selector.to_vec();
        data.extend(encode_tokens(&tokens));
        Ok(data)
    }
}

fn call_tokens(call: &ContractCall) -> Vec<Token> {
    match call {
        ContractCall::CreateGroup { name } => vec![Token::String(name.clone())],
        ContractCall::Contribute { group_id } => vec![Token::Uint(*group_id)],
        ContractCall::ProposeInvestment {
            group_id,
            description,
            amount,
        } => vec![
            Token::Uint(*group_id),
            Token::String(description.clone()),
            Token::Uint(*amount),
        ],
        ContractCall::Vote {
            proposal_id,
            support,
        } => vec![Token::Uint(*proposal_id), Token::Bool(*support)],
        ContractCall::ExecuteProposal { proposal_id } => vec![Token::Uint(*proposal_id)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(v: impl Into<U256>) -> String {
        hex::encode(uint_word(v.into()))
    }

    #[test]
    fn test_known_selectors() {
        assert_eq!(hex::encode(selector("transfer(address,uint256)")), "a9059cbb");
        assert_eq!(hex::encode(selector("balanceOf(address)")), "70a08231");
    }

    #[test]
    fn test_standard_signatures() {
        let iface = ContractInterface::standard();
        assert_eq!(
            iface.function("proposeInvestment").unwrap().signature(),
            "proposeInvestment(uint256,string,uint256)"
        );
        assert_eq!(iface.function("vote").unwrap().signature(), "vote(uint256,bool)");
        assert_eq!(
            iface.function("createGroup").unwrap().signature(),
            "createGroup(string)"
        );
    }

    #[test]
    fn test_encode_vote_false() {
        let iface = ContractInterface::standard();
        let data = iface
            .encode_call(&ContractCall::Vote {
                proposal_id: U256::from(3),
                support: false,
            })
            .unwrap();

        assert_eq!(data.len(), 4 + 64);
        assert_eq!(data[..4], selector("vote(uint256,bool)"));
        assert_eq!(hex::encode(&data[4..]), format!("{}{}", word(3), word(0)));
    }

    #[test]
    fn test_encode_propose_with_dynamic_string() {
        let iface = ContractInterface::standard();
        let amount = U256::from(2) * U256::exp10(18);
        let data = iface
            .encode_call(&ContractCall::ProposeInvestment {
                group_id: U256::one(),
                description: "buy seeds".to_string(),
                amount,
            })
            .unwrap();

        let mut padded = b"buy seeds".to_vec();
        padded.resize(32, 0);
        let expected = format!(
            "{}{}{}{}{}",
            word(1),
            word(0x60),
            word(amount),
            word(9),
            hex::encode(padded)
        );
        assert_eq!(hex::encode(&data[4..]), expected);
    }

    #[test]
    fn test_encode_empty_string() {
        let encoded = encode_tokens(&[Token::String(String::new())]);
        assert_eq!(hex::encode(encoded), format!("{}{}", word(0x20), word(0)));
    }

    #[test]
    fn test_encode_long_string_spans_multiple_words() {
        let description = "a".repeat(33) + &"b".repeat(32);
        let encoded = encode_tokens(&[Token::String(description.clone())]);

        // offset + length + 65 位元組補齊到 96
        assert_eq!(encoded.len(), 32 + 32 + 96);
        assert_eq!(hex::encode(&encoded[..64]), format!("{}{}", word(0x20), word(65)));
        assert_eq!(&encoded[64..129], description.as_bytes());
        assert!(encoded[129..].iter().all(|b| *b == 0));

        let exact = encode_tokens(&[Token::String("c".repeat(32))]);
        assert_eq!(exact.len(), 32 + 32 + 32);
    }

    #[test]
    fn test_encode_full_width_uint() {
        let data = ContractInterface::standard()
            .encode_call(&ContractCall::ExecuteProposal {
                proposal_id: U256::MAX,
            })
            .unwrap();
        assert_eq!(hex::encode(&data[4..]), "f".repeat(64));

        let above_u128 = U256::from(u128::MAX) + 1;
        assert_eq!(
            word(above_u128),
            format!("{}1{}", "0".repeat(31), "0".repeat(32))
        );
    }

    #[test]
    fn test_artifact_with_narrow_uint() {
        let artifact = r#"{
            "contractName": "DAOContract",
            "abi": [
                {"type": "constructor", "inputs": []},
                {"type": "function", "name": "createGroup", "inputs": [{"name": "name", "type": "string"}]},
                {"type": "function", "name": "contribute", "inputs": [{"name": "groupId", "type": "uint64"}], "stateMutability": "payable"},
                {"type": "function", "name": "proposeInvestment", "inputs": [
                    {"name": "groupId", "type": "uint64"},
                    {"name": "description", "type": "string"},
                    {"name": "amount", "type": "uint256"}
                ]},
                {"type": "function", "name": "vote", "inputs": [{"name": "proposalId", "type": "uint256"}, {"name": "support", "type": "bool"}]},
                {"type": "function", "name": "executeProposal", "inputs": [{"name": "proposalId", "type": "uint256"}]},
                {"type": "event", "name": "GroupCreated", "inputs": [{"name": "id", "type": "uint256"}]}
            ]
        }"#;

        let iface = ContractInterface::from_artifact_json(artifact).unwrap();
        assert_eq!(
            iface.function("contribute").unwrap().signature(),
            "contribute(uint64)"
        );

        let too_big = iface.encode_call(&ContractCall::Contribute {
            group_id: U256::from(u64::MAX) + 1,
        });
        assert!(matches!(too_big, Err(GatewayError::ValidationError { .. })));
    }

    #[test]
    fn test_artifact_missing_function() {
        let artifact = r#"[
            {"type": "function", "name": "createGroup", "inputs": [{"name": "name", "type": "string"}]}
        ]"#;
        let err = ContractInterface::from_artifact_json(artifact).unwrap_err();
        assert!(err.to_string().contains("contribute"));
    }
}
