use serde::Serialize;
use types::primitives::ValidatorIndex;

/// A named group of validators.
///
/// Groups read from a pool file have one public key per validator index.
/// Groups computed by partitioning have no public keys.
#[derive(Clone, PartialEq, Eq, Default, Debug, Serialize)]
pub struct PoolKeys {
    pub pool_name: String,
    pub validator_indices: Vec<ValidatorIndex>,
    pub pubkeys: Vec<String>,
}

impl PoolKeys {
    #[must_use]
    pub fn new(pool_name: impl Into<String>) -> Self {
        Self {
            pool_name: pool_name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn without_pubkeys(
        pool_name: impl Into<String>,
        validator_indices: Vec<ValidatorIndex>,
    ) -> Self {
        Self {
            pool_name: pool_name.into(),
            validator_indices,
            pubkeys: vec![],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.validator_indices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.validator_indices.is_empty()
    }

    #[must_use]
    pub fn has_pubkeys(&self) -> bool {
        self.pubkeys.len() == self.validator_indices.len()
    }

    pub(crate) fn push(&mut self, validator_index: ValidatorIndex, pubkey: String) {
        self.validator_indices.push(validator_index);
        self.pubkeys.push(pubkey);
    }
}
