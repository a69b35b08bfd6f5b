use serde::Deserialize;
use types::{containers::SignedBeaconBlockHeader, primitives::H256};

#[derive(Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

#[derive(Deserialize)]
pub struct HeaderData {
    pub header: SignedBeaconBlockHeader,
}

#[derive(Deserialize)]
pub struct RootData {
    pub root: H256,
}
