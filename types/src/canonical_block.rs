use core::time::Duration;

use serde::Serialize;

use crate::{
    containers::{
        Attestation, AttesterSlashing, BlockReward, Deposit, ProposerSlashing, SignedVoluntaryExit,
        Withdrawal,
    },
    primitives::{
        ExecutionAddress, ExecutionBlockHash, ExecutionBlockNumber, Gas, SignatureBytes, Slot,
        UnixSeconds, ValidatorIndex, Wei, H256, SYNC_COMMITTEE_BITS_SIZE,
    },
};

/// Fork-independent view of a slot.
///
/// Every instance has the same shape whether or not a block was proposed in the slot.
/// Placeholders for missed slots have `proposed` set to `false`, empty lists and zeroed
/// substructures. Consumers should branch on `proposed` rather than on the contents of
/// individual fields.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct CanonicalBlock {
    pub slot: Slot,
    pub proposed: bool,
    /// `None` if the proposer of a missed slot could not be determined.
    pub proposer_index: Option<ValidatorIndex>,
    pub state_root: H256,
    pub graffiti: H256,
    pub attestations: Vec<Attestation>,
    pub deposits: Vec<Deposit>,
    pub proposer_slashings: Vec<ProposerSlashing>,
    pub attester_slashings: Vec<AttesterSlashing>,
    pub voluntary_exits: Vec<SignedVoluntaryExit>,
    pub sync_aggregate: SyncAggregateSummary,
    pub execution_payload: ExecutionPayloadSummary,
    /// Length of the JSON encoding of the block message. This is not the SSZ size.
    pub json_size: u64,
    /// Length of the JSON encoding after Snappy compression.
    pub snappy_size: u64,
    pub compression_time: Duration,
    pub decompression_time: Duration,
    pub reward: Option<BlockReward>,
}

impl CanonicalBlock {
    /// Placeholder for a slot in which no block was proposed.
    #[must_use]
    pub fn missed(slot: Slot, proposer_index: Option<ValidatorIndex>, state_root: H256) -> Self {
        Self {
            slot,
            proposed: false,
            proposer_index,
            state_root,
            graffiti: H256::zero(),
            attestations: vec![],
            deposits: vec![],
            proposer_slashings: vec![],
            attester_slashings: vec![],
            voluntary_exits: vec![],
            sync_aggregate: SyncAggregateSummary::default(),
            execution_payload: ExecutionPayloadSummary::default(),
            json_size: 0,
            snappy_size: 0,
            compression_time: Duration::ZERO,
            decompression_time: Duration::ZERO,
            reward: None,
        }
    }

    /// Proposer index with unresolved proposers reported as validator 0.
    ///
    /// Validator 0 is a real validator. Prefer [`CanonicalBlock::proposer_index`] where the
    /// distinction matters.
    #[must_use]
    pub fn proposer_index_or_default(&self) -> ValidatorIndex {
        self.proposer_index.unwrap_or_default()
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct SyncAggregateSummary {
    pub sync_committee_bits: Vec<u8>,
    pub sync_committee_signature: SignatureBytes,
}

impl Default for SyncAggregateSummary {
    fn default() -> Self {
        Self {
            sync_committee_bits: vec![0; SYNC_COMMITTEE_BITS_SIZE],
            sync_committee_signature: SignatureBytes::zero(),
        }
    }
}

impl SyncAggregateSummary {
    #[must_use]
    pub fn participant_count(&self) -> u32 {
        self.sync_committee_bits
            .iter()
            .map(|byte| byte.count_ones())
            .sum()
    }
}

#[derive(Clone, PartialEq, Eq, Default, Debug, Serialize)]
pub struct ExecutionPayloadSummary {
    pub fee_recipient: ExecutionAddress,
    pub block_number: ExecutionBlockNumber,
    pub gas_limit: Gas,
    pub gas_used: Gas,
    pub timestamp: UnixSeconds,
    pub base_fee_per_gas: Wei,
    pub block_hash: ExecutionBlockHash,
    pub transactions: Vec<Vec<u8>>,
    pub withdrawals: Vec<Withdrawal>,
    /// Size of the execution block as reported by the execution client.
    pub payload_size: u64,
}
