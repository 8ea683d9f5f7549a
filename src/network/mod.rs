pub mod rpc_oracle;

pub use rpc_oracle::RpcBalanceOracle;
