use core::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use anyhow::{bail, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;
use types::{primitives::ExecutionBlockHash, redacting_url::RedactingUrl};

use crate::{
    json_rpc::{Request, Response},
    ExecutionBlock,
    ExecutionNode,
};

#[derive(Debug, Error)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub enum Error {
    #[error("execution client {url} returned JSON-RPC error {code}: {message}")]
    Rpc {
        url: RedactingUrl,
        code: i64,
        message: String,
    },
}

/// JSON-RPC client for a single execution-layer node.
pub struct Eth1Api {
    client: Client,
    url: RedactingUrl,
    timeout: Duration,
    next_request_id: AtomicU64,
}

impl Eth1Api {
    #[must_use]
    pub const fn new(client: Client, url: RedactingUrl, timeout: Duration) -> Self {
        Self {
            client,
            url,
            timeout,
            next_request_id: AtomicU64::new(1),
        }
    }

    #[must_use]
    pub const fn url(&self) -> &RedactingUrl {
        &self.url
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<Option<T>> {
        let id = self.next_request_id.fetch_add(1, Ordering::Relaxed);

        debug!("calling {method} on {} (request id: {id})", self.url);

        let response = self
            .client
            .post(self.url.clone().into_url())
            .timeout(self.timeout)
            .json(&Request::new(id, method, params))
            .send()
            .await?
            .error_for_status()?
            .json::<Response<T>>()
            .await?;

        if let Some(error) = response.error {
            bail!(Error::Rpc {
                url: self.url.clone(),
                code: error.code,
                message: error.message,
            });
        }

        Ok(response.result)
    }
}

#[async_trait]
impl ExecutionNode for Eth1Api {
    async fn block_by_hash(
        &self,
        block_hash: ExecutionBlockHash,
    ) -> Result<Option<ExecutionBlock>> {
        self.execute("eth_getBlockByHash", vec![json!(block_hash), json!(false)])
            .await
    }
}
