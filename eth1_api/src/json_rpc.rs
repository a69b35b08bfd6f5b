use serde::{Deserialize, Serialize};
use serde_json::Value;

const JSON_RPC_VERSION: &str = "2.0";

#[derive(Serialize)]
pub struct Request<'method> {
    jsonrpc: &'static str,
    id: u64,
    method: &'method str,
    params: Vec<Value>,
}

impl<'method> Request<'method> {
    pub const fn new(id: u64, method: &'method str, params: Vec<Value>) -> Self {
        Self {
            jsonrpc: JSON_RPC_VERSION,
            id,
            method,
            params,
        }
    }
}

#[derive(Deserialize)]
pub struct Response<T> {
    pub result: Option<T>,
    pub error: Option<ErrorObject>,
}

#[derive(Deserialize)]
pub struct ErrorObject {
    pub code: i64,
    pub message: String,
}
