//! Grouping of validators into named pools and splitting of validator indices into batches.

pub use crate::{
    partition::{attach_others, batch, complement, PartitionError, OTHERS_POOL},
    pool_file::{parse_pool_file, parse_pool_str, write_pool_file, PoolFileError, POOL_FILE_HEADER},
    pool_keys::PoolKeys,
    validator_indices::read_validator_indices,
};

mod partition;
mod pool_file;
mod pool_keys;
mod validator_indices;
