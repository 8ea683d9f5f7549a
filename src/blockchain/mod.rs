pub mod traits;

pub use traits::{BalanceOracle, Chain, Network};
