use std::time::Instant;

use anyhow::Result;
use snap::raw::{Decoder, Encoder};
use types::{
    containers::{ExecutionPayload, SyncAggregate, VersionedSignedBeaconBlock},
    CanonicalBlock,
    ExecutionPayloadSummary,
    SyncAggregateSummary,
};

/// Converts a block returned by a beacon node into a [`CanonicalBlock`].
///
/// Substructures missing in earlier forks are zero-valued. The state root is taken from the
/// block itself and the execution payload size is left at zero. Both are filled in later by
/// [`BlockFetcher`](crate::BlockFetcher).
pub fn normalize(block: &VersionedSignedBeaconBlock) -> Result<CanonicalBlock> {
    let message = &block.data.message;
    let body = &message.body;

    let serialized = serde_json::to_vec(message)?;

    let compression_start = Instant::now();
    let compressed = Encoder::new().compress_vec(&serialized)?;
    let compression_time = compression_start.elapsed();

    let decompression_start = Instant::now();
    Decoder::new().decompress_vec(&compressed)?;
    let decompression_time = decompression_start.elapsed();

    Ok(CanonicalBlock {
        slot: message.slot,
        proposed: true,
        proposer_index: Some(message.proposer_index),
        state_root: message.state_root,
        graffiti: body.graffiti,
        attestations: body.attestations.clone(),
        deposits: body.deposits.clone(),
        proposer_slashings: body.proposer_slashings.clone(),
        attester_slashings: body.attester_slashings.clone(),
        voluntary_exits: body.voluntary_exits.clone(),
        sync_aggregate: body
            .sync_aggregate
            .as_ref()
            .map(summarize_sync_aggregate)
            .unwrap_or_default(),
        execution_payload: body
            .execution_payload
            .as_ref()
            .map(summarize_execution_payload)
            .unwrap_or_default(),
        json_size: serialized.len().try_into()?,
        snappy_size: compressed.len().try_into()?,
        compression_time,
        decompression_time,
        reward: None,
    })
}

fn summarize_sync_aggregate(sync_aggregate: &SyncAggregate) -> SyncAggregateSummary {
    SyncAggregateSummary {
        sync_committee_bits: sync_aggregate.sync_committee_bits.clone(),
        sync_committee_signature: sync_aggregate.sync_committee_signature,
    }
}

fn summarize_execution_payload(payload: &ExecutionPayload) -> ExecutionPayloadSummary {
    ExecutionPayloadSummary {
        fee_recipient: payload.fee_recipient,
        block_number: payload.block_number,
        gas_limit: payload.gas_limit,
        gas_used: payload.gas_used,
        timestamp: payload.timestamp,
        base_fee_per_gas: payload.base_fee_per_gas,
        block_hash: payload.block_hash,
        transactions: payload.transactions.clone(),
        withdrawals: payload.withdrawals.clone().unwrap_or_default(),
        payload_size: 0,
    }
}
