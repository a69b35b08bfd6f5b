use serde::{Deserialize, Serialize};
use types::{
    primitives::{
        ExecutionAddress, ExecutionBlockHash, ExecutionBlockNumber, Gas, UnixSeconds, H256, U256,
    },
    serde_utils::prefixed_hex_quantity,
};

/// Execution block header fields as returned by `eth_getBlockByHash` without full transactions.
#[derive(Clone, PartialEq, Eq, Default, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionBlock {
    pub hash: ExecutionBlockHash,
    pub parent_hash: ExecutionBlockHash,
    #[serde(with = "prefixed_hex_quantity")]
    pub number: ExecutionBlockNumber,
    #[serde(with = "prefixed_hex_quantity")]
    pub timestamp: UnixSeconds,
    pub miner: ExecutionAddress,
    #[serde(with = "prefixed_hex_quantity")]
    pub gas_limit: Gas,
    #[serde(with = "prefixed_hex_quantity")]
    pub gas_used: Gas,
    #[serde(default)]
    pub base_fee_per_gas: Option<U256>,
    /// RLP-encoded size of the block in bytes.
    #[serde(with = "prefixed_hex_quantity")]
    pub size: u64,
    #[serde(default)]
    pub transactions: Vec<H256>,
}
