use anyhow::{bail, ensure, Result};
use thiserror::Error;
use types::primitives::ValidatorIndex;

use crate::PoolKeys;

/// Name of the pool holding validators not claimed by any other pool.
pub const OTHERS_POOL: &str = "others";

#[derive(Debug, Error)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub enum PartitionError {
    #[error("validator index {validator_index} is out of range for {total_count} validators")]
    IndexOutOfRange {
        validator_index: ValidatorIndex,
        total_count: u64,
    },
    #[error("cannot allocate a bitmap for {total_count} validators")]
    TooManyValidators { total_count: u64 },
    #[error("validators cannot be split into zero batches")]
    ZeroWorkers,
}

/// Returns indices in `0..total_count` that do not appear in any of `groups`, in ascending order.
pub fn complement(
    total_count: u64,
    groups: impl IntoIterator<Item = impl AsRef<[ValidatorIndex]>>,
) -> Result<Vec<ValidatorIndex>> {
    let too_many = || PartitionError::TooManyValidators { total_count };

    let length = usize::try_from(total_count).map_err(|_| too_many())?;
    let mut claimed = Vec::<bool>::new();

    claimed.try_reserve_exact(length).map_err(|_| too_many())?;

    claimed.resize(length, false);

    for group in groups {
        for &validator_index in group.as_ref() {
            let Some(entry) = usize::try_from(validator_index)
                .ok()
                .and_then(|position| claimed.get_mut(position))
            else {
                bail!(PartitionError::IndexOutOfRange {
                    validator_index,
                    total_count,
                });
            };

            *entry = true;
        }
    }

    Ok((0..total_count)
        .zip(claimed)
        .filter(|(_, claimed)| !claimed)
        .map(|(validator_index, _)| validator_index)
        .collect())
}

/// Adds `others` to the existing [`OTHERS_POOL`] or appends a new one.
pub fn attach_others(pools: &mut Vec<PoolKeys>, others: Vec<ValidatorIndex>) {
    match pools.iter_mut().find(|pool| pool.pool_name == OTHERS_POOL) {
        Some(pool) => pool.validator_indices.extend(others),
        None => pools.push(PoolKeys::without_pubkeys(OTHERS_POOL, others)),
    }
}

/// Splits `validator_indices` into exactly `worker_count` contiguous unnamed batches.
///
/// Every batch but the last holds `validator_indices.len() / worker_count` indices.
/// The last one also takes the remainder.
pub fn batch(validator_indices: &[ValidatorIndex], worker_count: usize) -> Result<Vec<PoolKeys>> {
    ensure!(worker_count > 0, PartitionError::ZeroWorkers);

    let step = validator_indices.len() / worker_count;

    let batches = (0..worker_count)
        .map(|worker| {
            let start = worker * step;

            let end = if worker + 1 == worker_count {
                validator_indices.len()
            } else {
                start + step
            };

            PoolKeys::without_pubkeys("", validator_indices[start..end].to_vec())
        })
        .collect();

    Ok(batches)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use itertools::Itertools as _;
    use test_case::test_case;

    use super::*;

    fn indices(batches: &[PoolKeys]) -> Vec<Vec<ValidatorIndex>> {
        batches
            .iter()
            .map(|batch| batch.validator_indices.clone())
            .collect()
    }

    #[test_case(5, vec![vec![0, 2, 4]] => vec![1, 3]; "single group")]
    #[test_case(6, vec![vec![5, 1], vec![1, 3]] => vec![0, 2, 4]; "overlapping groups")]
    #[test_case(3, vec![] => vec![0, 1, 2]; "no groups")]
    #[test_case(3, vec![vec![0, 1, 2]] => Vec::<ValidatorIndex>::new(); "all claimed")]
    #[test_case(0, vec![] => Vec::<ValidatorIndex>::new(); "no validators")]
    fn complement_of_groups(
        total_count: u64,
        groups: Vec<Vec<ValidatorIndex>>,
    ) -> Vec<ValidatorIndex> {
        complement(total_count, groups).expect("all indices are in range")
    }

    #[test]
    fn complement_and_groups_cover_all_indices() -> Result<()> {
        let groups: [Vec<ValidatorIndex>; 2] = [vec![3, 9, 0], vec![4, 4, 17]];
        let others = complement(20, &groups)?;

        let claimed = groups.iter().flatten().copied().collect::<BTreeSet<_>>();
        let unclaimed = others.iter().copied().collect::<BTreeSet<_>>();

        assert!(claimed.is_disjoint(&unclaimed));
        assert_eq!(
            claimed.union(&unclaimed).copied().collect_vec(),
            (0..20).collect_vec(),
        );

        Ok(())
    }

    #[test]
    fn complement_rejects_out_of_range_index() {
        let error = complement(5, [[0_u64, 5]])
            .expect_err("index 5 is out of range")
            .downcast::<PartitionError>()
            .expect("error should be a PartitionError");

        assert_eq!(
            error,
            PartitionError::IndexOutOfRange {
                validator_index: 5,
                total_count: 5,
            },
        );
    }

    #[test]
    fn complement_rejects_validator_count_that_cannot_be_allocated() {
        let error = complement(u64::MAX, [[0_u64]])
            .expect_err("bitmap for u64::MAX validators cannot be allocated")
            .downcast::<PartitionError>()
            .expect("error should be a PartitionError");

        assert_eq!(
            error,
            PartitionError::TooManyValidators {
                total_count: u64::MAX,
            },
        );
    }

    #[test]
    fn others_are_appended_as_new_pool() {
        let mut pools = vec![PoolKeys::without_pubkeys("poolA", vec![0, 2])];

        attach_others(&mut pools, vec![1, 3]);

        assert_eq!(
            pools,
            [
                PoolKeys::without_pubkeys("poolA", vec![0, 2]),
                PoolKeys::without_pubkeys(OTHERS_POOL, vec![1, 3]),
            ],
        );
    }

    #[test]
    fn others_extend_existing_pool() {
        let mut pools = vec![
            PoolKeys::without_pubkeys(OTHERS_POOL, vec![8]),
            PoolKeys::without_pubkeys("poolA", vec![0]),
        ];

        attach_others(&mut pools, vec![1, 3]);

        assert_eq!(pools.len(), 2);
        assert_eq!(pools[0].validator_indices, [8, 1, 3]);
        assert!(pools[0].pubkeys.is_empty());
    }

    #[test_case(&[0, 1, 2, 3, 4, 5, 6], 3 => vec![vec![0, 1], vec![2, 3], vec![4, 5, 6]]; "remainder goes to last batch")]
    #[test_case(&[0, 1, 2, 3, 4, 5], 3 => vec![vec![0, 1], vec![2, 3], vec![4, 5]]; "even split")]
    #[test_case(&[0, 1], 4 => vec![Vec::<ValidatorIndex>::new(), Vec::<ValidatorIndex>::new(), Vec::<ValidatorIndex>::new(), vec![0, 1]]; "fewer indices than workers")]
    #[test_case(&[], 2 => vec![Vec::<ValidatorIndex>::new(), Vec::<ValidatorIndex>::new()]; "no indices")]
    #[test_case(&[9, 4, 7], 1 => vec![vec![9, 4, 7]]; "single worker keeps order")]
    fn batches(
        validator_indices: &[ValidatorIndex],
        worker_count: usize,
    ) -> Vec<Vec<ValidatorIndex>> {
        let batches = batch(validator_indices, worker_count).expect("worker count is nonzero");

        assert!(batches.iter().all(|batch| batch.pool_name.is_empty()));

        indices(&batches)
    }

    #[test]
    fn batches_reconstruct_input() -> Result<()> {
        let validator_indices = (100..1_103).collect_vec();
        let batches = batch(&validator_indices, 8)?;

        assert_eq!(batches.len(), 8);
        assert_eq!(
            batches
                .iter()
                .flat_map(|batch| batch.validator_indices.iter().copied())
                .collect_vec(),
            validator_indices,
        );
        assert!(batches[..7].iter().all(|batch| batch.len() == 125));
        assert_eq!(batches[7].len(), 128);

        Ok(())
    }

    #[test]
    fn zero_workers_are_rejected() {
        let error = batch(&[1, 2, 3], 0)
            .expect_err("zero workers should be rejected")
            .downcast::<PartitionError>()
            .expect("error should be a PartitionError");

        assert_eq!(error, PartitionError::ZeroWorkers);
    }
}
