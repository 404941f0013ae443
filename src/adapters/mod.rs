// Adapters layer: concrete implementations of the domain ports for the ledger node.

pub mod contract;
pub mod rpc;

pub use contract::RpcGovernanceContract;
pub use rpc::JsonRpcClient;
