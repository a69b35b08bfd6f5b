pub use crate::{
    eth1_api::{Error as Eth1ApiError, Eth1Api},
    execution_block::ExecutionBlock,
    execution_node::ExecutionNode,
};

mod eth1_api;
mod execution_block;
mod execution_node;
mod json_rpc;
