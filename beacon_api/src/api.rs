use core::time::Duration;

use anyhow::{bail, Result};
use async_trait::async_trait;
use mime::APPLICATION_JSON;
use reqwest::{header::ACCEPT, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;
use types::{
    containers::{
        BeaconBlockHeader, BlockReward, FinalityCheckpoints, ProposerDuty,
        VersionedSignedBeaconBlock,
    },
    primitives::{Epoch, Slot, H256},
    redacting_url::RedactingUrl,
};

use crate::{
    responses::{DataResponse, HeaderData, RootData},
    BeaconNode,
    BlockId,
    StateId,
};

#[derive(Debug, Error)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub enum BeaconApiError {
    #[error("bad request to Beacon API (status: {status}, beacon node response: {message})")]
    BadRequest { status: StatusCode, message: String },
    #[error("beacon node internal error (status: {status}, beacon node response: {message})")]
    BeaconNodeInternalError { status: StatusCode, message: String },
}

/// Client for the standard Beacon API of a single consensus-layer node.
pub struct Api {
    client: Client,
    url: RedactingUrl,
    timeout: Duration,
}

impl Api {
    #[must_use]
    pub const fn new(client: Client, url: RedactingUrl, timeout: Duration) -> Self {
        Self {
            client,
            url,
            timeout,
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        match self.get_optional(path).await? {
            Some(value) => Ok(value),
            None => bail!(BeaconApiError::BadRequest {
                status: StatusCode::NOT_FOUND,
                message: format!("{path} not found"),
            }),
        }
    }

    async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let url = self.url(path)?;

        debug!("requesting {url}");

        let response = self
            .client
            .get(url.into_url())
            .timeout(self.timeout)
            .header(ACCEPT, APPLICATION_JSON.as_ref())
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = handle_error(response).await?;

        response.json().await.map(Some).map_err(Into::into)
    }

    fn url(&self, path: &str) -> Result<RedactingUrl> {
        self.url.join(path).map_err(Into::into)
    }
}

#[async_trait]
impl BeaconNode for Api {
    async fn block(&self, slot: Slot) -> Result<Option<VersionedSignedBeaconBlock>> {
        let block = self
            .get_optional::<VersionedSignedBeaconBlock>(&format!("/eth/v2/beacon/blocks/{slot}"))
            .await?;

        if block.is_none() {
            debug!("beacon node has no block at slot {slot}");
        }

        Ok(block)
    }

    async fn proposer_duties(&self, epoch: Epoch) -> Result<Vec<ProposerDuty>> {
        self.get::<DataResponse<_>>(&format!("/eth/v1/validator/duties/proposer/{epoch}"))
            .await
            .map(|response| response.data)
    }

    async fn finality_checkpoints(&self, state_id: StateId) -> Result<FinalityCheckpoints> {
        self.get::<DataResponse<_>>(&format!(
            "/eth/v1/beacon/states/{state_id}/finality_checkpoints"
        ))
        .await
        .map(|response| response.data)
    }

    async fn block_header(&self, block_id: BlockId) -> Result<BeaconBlockHeader> {
        self.get::<DataResponse<HeaderData>>(&format!("/eth/v1/beacon/headers/{block_id}"))
            .await
            .map(|response| response.data.header.message)
    }

    async fn state_root(&self, slot: Slot) -> Result<H256> {
        self.get::<DataResponse<RootData>>(&format!("/eth/v1/beacon/states/{slot}/root"))
            .await
            .map(|response| response.data.root)
    }

    async fn block_reward(&self, slot: Slot) -> Result<BlockReward> {
        self.get::<DataResponse<_>>(&format!("/eth/v1/beacon/rewards/blocks/{slot}"))
            .await
            .map(|response| response.data)
    }
}

async fn handle_error(response: Response) -> Result<Response> {
    let status = response.status();

    if status.is_client_error() {
        let message = response.text().await?;
        bail!(BeaconApiError::BadRequest { status, message });
    }

    if status.is_server_error() {
        let message = response.text().await?;
        bail!(BeaconApiError::BeaconNodeInternalError { status, message });
    }

    Ok(response)
}
