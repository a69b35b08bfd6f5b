use anyhow::Result;
use beacon_api::BeaconNode;
use block_fetcher::BlockFetcher;
use eth1_api::ExecutionNode;
use futures::{stream, StreamExt as _, TryStreamExt as _};
use tokio::time::{self, MissedTickBehavior};
use tracing::info;
use types::{primitives::Slot, CanonicalBlock};

use crate::analyzer_config::DownloadMode;

/// Fetches blocks according to `mode` and passes them to `on_block` in slot order.
///
/// A slot that cannot be fetched stops the download. In head mode so does a failure to
/// determine the head slot.
pub async fn run<B: BeaconNode, E: ExecutionNode>(
    fetcher: &BlockFetcher<B, E>,
    mode: DownloadMode,
    worker_num: usize,
    mut on_block: impl FnMut(CanonicalBlock),
) -> Result<()> {
    match mode {
        DownloadMode::Historical {
            init_slot,
            final_slot,
        } => {
            info!("downloading slots {init_slot}..={final_slot} with {worker_num} workers");

            stream::iter(init_slot..=final_slot)
                .map(|slot| fetcher.fetch_block(slot))
                .buffered(worker_num)
                .try_for_each(|block| {
                    on_block(block);
                    futures::future::ok(())
                })
                .await
        }
        DownloadMode::Finalized => {
            on_block(fetcher.fetch_finalized_block().await?);
            Ok(())
        }
        DownloadMode::Head => follow_head(fetcher, on_block).await,
    }
}

async fn follow_head<B: BeaconNode, E: ExecutionNode>(
    fetcher: &BlockFetcher<B, E>,
    mut on_block: impl FnMut(CanonicalBlock),
) -> Result<()> {
    let mut interval = time::interval(fetcher.config().chain_spec.slot_duration());
    let mut next_slot = None::<Slot>;

    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            result = tokio::signal::ctrl_c() => {
                result?;
                info!("received interrupt, stopping");
                return Ok(());
            }
        }

        let head_slot = fetcher.current_head_slot().await?;
        let first_slot = next_slot.unwrap_or(head_slot);

        for slot in first_slot..=head_slot {
            on_block(fetcher.fetch_block(slot).await?);
        }

        next_slot = Some(first_slot.max(head_slot.saturating_add(1)));
    }
}
