//! Beacon Node API representations of the objects embedded in a signed beacon block.
//!
//! A single set of containers covers every fork. Fields introduced by later forks are optional
//! and default to `None`, so a Phase 0 block and an Electra block decode into the same types.
//! Unknown fields (BLS-to-execution changes, blob commitments, execution requests) are ignored.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::{
    primitives::{
        Epoch, ExecutionAddress, ExecutionBlockHash, ExecutionBlockNumber, Gas, Gwei,
        PublicKeyBytes, SignatureBytes, Slot, UnixSeconds, ValidatorIndex, Wei, H256,
    },
    serde_utils::{decimal_u256, prefixed_hex_bytes, string_or_native},
};

#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Default,
    Debug,
    AsRefStr,
    Display,
    EnumString,
    Deserialize,
    Serialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    #[default]
    Phase0,
    Altair,
    Bellatrix,
    Capella,
    Deneb,
    Electra,
    Fulu,
}

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Deserialize, Serialize)]
pub struct Checkpoint {
    #[serde(with = "string_or_native")]
    pub epoch: Epoch,
    pub root: H256,
}

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Deserialize, Serialize)]
pub struct FinalityCheckpoints {
    pub previous_justified: Checkpoint,
    pub current_justified: Checkpoint,
    pub finalized: Checkpoint,
}

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Deserialize, Serialize)]
pub struct Eth1Data {
    pub deposit_root: H256,
    #[serde(with = "string_or_native")]
    pub deposit_count: u64,
    pub block_hash: H256,
}

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Deserialize, Serialize)]
pub struct BeaconBlockHeader {
    #[serde(with = "string_or_native")]
    pub slot: Slot,
    #[serde(with = "string_or_native")]
    pub proposer_index: ValidatorIndex,
    pub parent_root: H256,
    pub state_root: H256,
    pub body_root: H256,
}

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Deserialize, Serialize)]
pub struct SignedBeaconBlockHeader {
    pub message: BeaconBlockHeader,
    pub signature: SignatureBytes,
}

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Deserialize, Serialize)]
pub struct ProposerSlashing {
    pub signed_header_1: SignedBeaconBlockHeader,
    pub signed_header_2: SignedBeaconBlockHeader,
}

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Deserialize, Serialize)]
pub struct AttestationData {
    #[serde(with = "string_or_native")]
    pub slot: Slot,
    #[serde(with = "string_or_native")]
    pub index: u64,
    pub beacon_block_root: H256,
    pub source: Checkpoint,
    pub target: Checkpoint,
}

#[derive(Clone, PartialEq, Eq, Default, Debug, Deserialize, Serialize)]
pub struct Attestation {
    #[serde(with = "prefixed_hex_bytes")]
    pub aggregation_bits: Vec<u8>,
    pub data: AttestationData,
    pub signature: SignatureBytes,
    // Electra moved the committee index out of `AttestationData` into this bitvector.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "optional_hex_bytes"
    )]
    pub committee_bits: Option<Vec<u8>>,
}

#[derive(Clone, PartialEq, Eq, Default, Debug, Deserialize, Serialize)]
pub struct IndexedAttestation {
    #[serde(with = "string_or_native_sequence")]
    pub attesting_indices: Vec<ValidatorIndex>,
    pub data: AttestationData,
    pub signature: SignatureBytes,
}

#[derive(Clone, PartialEq, Eq, Default, Debug, Deserialize, Serialize)]
pub struct AttesterSlashing {
    pub attestation_1: IndexedAttestation,
    pub attestation_2: IndexedAttestation,
}

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Deserialize, Serialize)]
pub struct DepositData {
    pub pubkey: PublicKeyBytes,
    pub withdrawal_credentials: H256,
    #[serde(with = "string_or_native")]
    pub amount: Gwei,
    pub signature: SignatureBytes,
}

#[derive(Clone, PartialEq, Eq, Default, Debug, Deserialize, Serialize)]
pub struct Deposit {
    pub proof: Vec<H256>,
    pub data: DepositData,
}

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Deserialize, Serialize)]
pub struct VoluntaryExit {
    #[serde(with = "string_or_native")]
    pub epoch: Epoch,
    #[serde(with = "string_or_native")]
    pub validator_index: ValidatorIndex,
}

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Deserialize, Serialize)]
pub struct SignedVoluntaryExit {
    pub message: VoluntaryExit,
    pub signature: SignatureBytes,
}

#[derive(Clone, PartialEq, Eq, Default, Debug, Deserialize, Serialize)]
pub struct SyncAggregate {
    #[serde(with = "prefixed_hex_bytes")]
    pub sync_committee_bits: Vec<u8>,
    pub sync_committee_signature: SignatureBytes,
}

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Deserialize, Serialize)]
pub struct Withdrawal {
    #[serde(with = "string_or_native")]
    pub index: u64,
    #[serde(with = "string_or_native")]
    pub validator_index: ValidatorIndex,
    pub address: ExecutionAddress,
    #[serde(with = "string_or_native")]
    pub amount: Gwei,
}

#[derive(Clone, PartialEq, Eq, Default, Debug, Deserialize, Serialize)]
pub struct ExecutionPayload {
    pub parent_hash: ExecutionBlockHash,
    pub fee_recipient: ExecutionAddress,
    pub state_root: H256,
    pub receipts_root: H256,
    #[serde(with = "prefixed_hex_bytes")]
    pub logs_bloom: Vec<u8>,
    pub prev_randao: H256,
    #[serde(with = "string_or_native")]
    pub block_number: ExecutionBlockNumber,
    #[serde(with = "string_or_native")]
    pub gas_limit: Gas,
    #[serde(with = "string_or_native")]
    pub gas_used: Gas,
    #[serde(with = "string_or_native")]
    pub timestamp: UnixSeconds,
    #[serde(with = "prefixed_hex_bytes")]
    pub extra_data: Vec<u8>,
    #[serde(with = "decimal_u256")]
    pub base_fee_per_gas: Wei,
    pub block_hash: ExecutionBlockHash,
    #[serde(with = "prefixed_hex_bytes::sequence")]
    pub transactions: Vec<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub withdrawals: Option<Vec<Withdrawal>>,
}

#[derive(Clone, PartialEq, Eq, Default, Debug, Deserialize, Serialize)]
pub struct BeaconBlockBody {
    pub randao_reveal: SignatureBytes,
    pub eth1_data: Eth1Data,
    pub graffiti: H256,
    pub proposer_slashings: Vec<ProposerSlashing>,
    pub attester_slashings: Vec<AttesterSlashing>,
    pub attestations: Vec<Attestation>,
    pub deposits: Vec<Deposit>,
    pub voluntary_exits: Vec<SignedVoluntaryExit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_aggregate: Option<SyncAggregate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_payload: Option<ExecutionPayload>,
}

#[derive(Clone, PartialEq, Eq, Default, Debug, Deserialize, Serialize)]
pub struct BeaconBlock {
    #[serde(with = "string_or_native")]
    pub slot: Slot,
    #[serde(with = "string_or_native")]
    pub proposer_index: ValidatorIndex,
    pub parent_root: H256,
    pub state_root: H256,
    pub body: BeaconBlockBody,
}

#[derive(Clone, PartialEq, Eq, Default, Debug, Deserialize, Serialize)]
pub struct SignedBeaconBlock {
    pub message: BeaconBlock,
    pub signature: SignatureBytes,
}

/// A signed block together with the fork it belongs to, as returned by
/// `GET /eth/v2/beacon/blocks/{block_id}`.
#[derive(Clone, PartialEq, Eq, Default, Debug, Deserialize, Serialize)]
pub struct VersionedSignedBeaconBlock {
    pub version: Phase,
    pub data: SignedBeaconBlock,
}

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Deserialize, Serialize)]
pub struct ProposerDuty {
    pub pubkey: PublicKeyBytes,
    #[serde(with = "string_or_native")]
    pub validator_index: ValidatorIndex,
    #[serde(with = "string_or_native")]
    pub slot: Slot,
}

/// Rewards earned by the proposer of a block, in Gwei.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Deserialize, Serialize)]
pub struct BlockReward {
    #[serde(with = "string_or_native")]
    pub proposer_index: ValidatorIndex,
    #[serde(with = "string_or_native")]
    pub total: Gwei,
    #[serde(with = "string_or_native")]
    pub attestations: Gwei,
    #[serde(with = "string_or_native")]
    pub sync_aggregate: Gwei,
    #[serde(with = "string_or_native")]
    pub proposer_slashings: Gwei,
    #[serde(with = "string_or_native")]
    pub attester_slashings: Gwei,
}

mod optional_hex_bytes {
    use serde::{Deserialize as _, Deserializer, Serializer};

    use crate::serde_utils::prefixed_hex_bytes;

    #[derive(serde::Deserialize)]
    #[serde(transparent)]
    struct Wrapped(#[serde(with = "prefixed_hex_bytes")] Vec<u8>);

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<u8>>, D::Error> {
        Option::<Wrapped>::deserialize(deserializer).map(|wrapped| wrapped.map(|Wrapped(bytes)| bytes))
    }

    pub fn serialize<S: Serializer>(
        bytes: &Option<Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match bytes {
            Some(bytes) => prefixed_hex_bytes::serialize(bytes, serializer),
            None => serializer.serialize_none(),
        }
    }
}

mod string_or_native_sequence {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::serde_utils::string_or_native;

    #[derive(Clone, Copy, Deserialize, Serialize)]
    #[serde(transparent)]
    struct Wrapped(#[serde(with = "string_or_native")] u64);

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u64>, D::Error> {
        Vec::<Wrapped>::deserialize(deserializer)
            .map(|wrapped| wrapped.into_iter().map(|Wrapped(number)| number).collect())
    }

    pub fn serialize<S: Serializer>(numbers: &[u64], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(numbers.iter().copied().map(Wrapped))
    }
}
