use core::fmt::Write as _;
use std::path::Path;

use anyhow::{bail, ensure, Context as _, Result};
use itertools::Itertools as _;
use thiserror::Error;
use tracing::info;
use types::primitives::ValidatorIndex;

use crate::PoolKeys;

pub const POOL_FILE_HEADER: &str = "val_idx,pubkey,custom_pool";

// A 0x-prefixed hex-encoded BLS public key.
const PUBKEY_LENGTH: usize = 98;

#[derive(Debug, Error)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub enum PoolFileError {
    #[error(
        "line {line}: expected 3 fields in the format \
         val_idx,pubkey,custom_pool but found {fields}"
    )]
    FieldCount { line: usize, fields: usize },
    #[error("line {line}: could not parse validator index {value:?}")]
    InvalidIndex { line: usize, value: String },
    #[error("length of public key for validator {validator_index} is incorrect: {length}")]
    PubkeyLength {
        validator_index: ValidatorIndex,
        length: usize,
    },
    #[error("pool {pool_name:?} has {indices} validator indices but {pubkeys} public keys")]
    MissingPubkeys {
        pool_name: String,
        indices: usize,
        pubkeys: usize,
    },
}

/// Reads validators grouped by pool from a `val_idx,pubkey,custom_pool` file.
///
/// Any malformed line fails the whole read.
pub fn parse_pool_file(path: impl AsRef<Path>) -> Result<Vec<PoolKeys>> {
    let path = path.as_ref();

    info!("reading validator pools from {}", path.display());

    let contents = fs_err::read_to_string(path)?;
    let pools = parse_pool_str(&contents)?;

    info!(
        "read {} validators in {} pools",
        pools.iter().map(PoolKeys::len).sum::<usize>(),
        pools.len(),
    );

    Ok(pools)
}

/// Pools are returned in the order they first appear in. Validators within a pool keep file order.
pub fn parse_pool_str(contents: &str) -> Result<Vec<PoolKeys>> {
    let mut pools = Vec::<PoolKeys>::new();

    for (index, line) in contents.lines().enumerate() {
        if index == 0 && line == POOL_FILE_HEADER {
            continue;
        }

        let line_number = index + 1;
        let fields = line.split(',').collect_vec();

        let [validator_index, pubkey, pool_name] = fields[..] else {
            bail!(PoolFileError::FieldCount {
                line: line_number,
                fields: fields.len(),
            });
        };

        let validator_index = validator_index.parse::<ValidatorIndex>().with_context(|| {
            PoolFileError::InvalidIndex {
                line: line_number,
                value: validator_index.to_owned(),
            }
        })?;

        let pubkey = normalize_pubkey(pubkey);

        ensure!(
            pubkey.len() == PUBKEY_LENGTH,
            PoolFileError::PubkeyLength {
                validator_index,
                length: pubkey.len(),
            },
        );

        match pools.iter_mut().find(|pool| pool.pool_name == pool_name) {
            Some(pool) => pool.push(validator_index, pubkey),
            None => {
                let mut pool = PoolKeys::new(pool_name);
                pool.push(validator_index, pubkey);
                pools.push(pool);
            }
        }
    }

    Ok(pools)
}

/// Formats pools in the format read by [`parse_pool_str`], header included.
///
/// Fails for pools without a public key for every validator, such as computed "others" pools.
pub fn write_pool_file(pools: &[PoolKeys]) -> Result<String> {
    let mut contents = format!("{POOL_FILE_HEADER}\n");

    for pool in pools {
        ensure!(
            pool.has_pubkeys(),
            PoolFileError::MissingPubkeys {
                pool_name: pool.pool_name.clone(),
                indices: pool.validator_indices.len(),
                pubkeys: pool.pubkeys.len(),
            },
        );

        for (validator_index, pubkey) in pool.validator_indices.iter().zip_eq(&pool.pubkeys) {
            writeln!(contents, "{validator_index},{pubkey},{}", pool.pool_name)?;
        }
    }

    Ok(contents)
}

fn normalize_pubkey(field: &str) -> String {
    let pubkey = field.trim_matches('"').replace("\\x", "");

    if pubkey.starts_with("0x") {
        pubkey
    } else {
        format!("0x{pubkey}")
    }
}

#[cfg(test)]
mod tests {
    use tempfile::NamedTempFile;
    use test_case::test_case;

    use super::*;

    fn pubkey(byte: &str) -> String {
        format!("0x{}", byte.repeat(48))
    }

    #[test]
    fn parses_file_with_header() -> Result<()> {
        let file = NamedTempFile::new()?;

        fs_err::write(
            file.path(),
            format!(
                "{POOL_FILE_HEADER}\n1,{},poolA\n2,{},poolA\n",
                pubkey("ab"),
                pubkey("de"),
            ),
        )?;

        assert_eq!(
            parse_pool_file(file.path())?,
            [PoolKeys {
                pool_name: "poolA".to_owned(),
                validator_indices: vec![1, 2],
                pubkeys: vec![pubkey("ab"), pubkey("de")],
            }],
        );

        Ok(())
    }

    #[test]
    fn groups_keep_first_seen_order() -> Result<()> {
        let contents = format!(
            "7,{a},poolB\n3,{b},poolA\n5,{c},poolB\n3,{b},poolA\n",
            a = pubkey("01"),
            b = pubkey("02"),
            c = pubkey("03"),
        );

        let pools = parse_pool_str(&contents)?;

        assert_eq!(
            pools
                .iter()
                .map(|pool| (pool.pool_name.as_str(), pool.validator_indices.clone()))
                .collect_vec(),
            [("poolB", vec![7, 5]), ("poolA", vec![3, 3])],
        );
        assert!(pools.iter().all(PoolKeys::has_pubkeys));

        Ok(())
    }

    #[test_case("\"\\xabababababababababababababababababababababababababababababababababababababababababababababababab\"" ; "quoted with escape")]
    #[test_case("abababababababababababababababababababababababababababababababababababababababababababababababab" ; "without prefix")]
    #[test_case("0xabababababababababababababababababababababababababababababababababababababababababababababababab" ; "already prefixed")]
    fn pubkeys_are_normalized(field: &str) -> Result<()> {
        let pools = parse_pool_str(&format!("4,{field},lido"))?;

        assert_eq!(pools[0].pubkeys, [pubkey("ab")]);

        Ok(())
    }

    #[test]
    fn short_pubkey_is_rejected() {
        let contents = format!("{POOL_FILE_HEADER}\n12,{},poolA\n", "ab".repeat(47));

        let error = parse_pool_str(&contents)
            .expect_err("96-character public key should be rejected")
            .downcast::<PoolFileError>()
            .expect("error should be a PoolFileError");

        assert_eq!(
            error,
            PoolFileError::PubkeyLength {
                validator_index: 12,
                length: 96,
            },
        );
    }

    #[test_case("1,0xab" => PoolFileError::FieldCount { line: 2, fields: 2 } ; "too few fields")]
    #[test_case("1,0xab,pool,extra" => PoolFileError::FieldCount { line: 2, fields: 4 } ; "too many fields")]
    #[test_case("" => PoolFileError::FieldCount { line: 2, fields: 1 } ; "blank line")]
    #[test_case("x1,0xab,pool" => PoolFileError::InvalidIndex { line: 2, value: "x1".to_owned() } ; "non-numeric index")]
    #[test_case("-1,0xab,pool" => PoolFileError::InvalidIndex { line: 2, value: "-1".to_owned() } ; "negative index")]
    fn malformed_line_is_rejected(line: &str) -> PoolFileError {
        let contents = format!("{POOL_FILE_HEADER}\n{line}\n");

        parse_pool_str(&contents)
            .expect_err("malformed line should fail the whole parse")
            .downcast::<PoolFileError>()
            .expect("error should be a PoolFileError")
    }

    #[test]
    fn malformed_line_after_valid_lines_fails_whole_parse() {
        let contents = format!("{POOL_FILE_HEADER}\n1,{},poolA\n2,poolA\n", pubkey("ab"));

        assert!(parse_pool_str(&contents).is_err());
    }

    #[test]
    fn header_is_only_skipped_on_first_line() {
        let contents = format!("1,{},poolA\n{POOL_FILE_HEADER}\n", pubkey("ab"));

        let error = parse_pool_str(&contents)
            .expect_err("header in the middle of the file is not a valid line")
            .downcast::<PoolFileError>()
            .expect("error should be a PoolFileError");

        assert_eq!(
            error,
            PoolFileError::InvalidIndex {
                line: 2,
                value: "val_idx".to_owned(),
            },
        );
    }

    #[test]
    fn written_file_parses_to_same_pools() -> Result<()> {
        let contents = format!(
            "{POOL_FILE_HEADER}\n9,{a},poolB\n1,{b},poolA\n4,{c},poolB\n",
            a = pubkey("0a"),
            b = pubkey("0b"),
            c = pubkey("0c"),
        );

        let pools = parse_pool_str(&contents)?;
        let written = write_pool_file(&pools)?;

        assert_eq!(parse_pool_str(&written)?, pools);
        assert!(written.starts_with(POOL_FILE_HEADER));

        Ok(())
    }

    #[test]
    fn pools_without_pubkeys_cannot_be_written() {
        let pools = [PoolKeys::without_pubkeys("others", vec![1, 2])];

        let error = write_pool_file(&pools)
            .expect_err("pool without public keys should not be written")
            .downcast::<PoolFileError>()
            .expect("error should be a PoolFileError");

        assert_eq!(
            error,
            PoolFileError::MissingPubkeys {
                pool_name: "others".to_owned(),
                indices: 2,
                pubkeys: 0,
            },
        );
    }
}
