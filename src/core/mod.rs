pub mod abi;
pub mod forwarder;
pub mod units;

pub use crate::domain::model::{Address, ContractCall, TxAck, TxHash, U256};
pub use crate::domain::ports::{ConfigProvider, GovernanceContract};
pub use crate::utils::error::Result;
