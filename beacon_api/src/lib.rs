pub use crate::{
    api::{Api as BeaconApi, BeaconApiError},
    beacon_node::BeaconNode,
    block_id::{BlockId, StateId},
};

mod api;
mod beacon_node;
mod block_id;
mod responses;
