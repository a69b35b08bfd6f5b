use std::path::Path;

use anyhow::{Context as _, Result};
use tracing::info;
use types::primitives::ValidatorIndex;

/// Reads a JSON array of validator indices.
pub fn read_validator_indices(path: impl AsRef<Path>) -> Result<Vec<ValidatorIndex>> {
    let path = path.as_ref();
    let bytes = fs_err::read(path)?;

    let validator_indices = serde_json::from_slice::<Vec<ValidatorIndex>>(&bytes)
        .with_context(|| format!("failed to parse validator indices from {}", path.display()))?;

    info!("read {} validator indices", validator_indices.len());

    Ok(validator_indices)
}

#[cfg(test)]
mod tests {
    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn reads_json_array() -> Result<()> {
        let file = NamedTempFile::new()?;
        fs_err::write(file.path(), "[5, 0, 12, 7]")?;

        assert_eq!(read_validator_indices(file.path())?, [5, 0, 12, 7]);

        Ok(())
    }

    #[test]
    fn malformed_json_is_an_error() -> Result<()> {
        let file = NamedTempFile::new()?;
        fs_err::write(file.path(), "[5, 0,")?;

        assert!(read_validator_indices(file.path()).is_err());

        Ok(())
    }

    #[test]
    fn missing_file_is_an_error() -> Result<()> {
        let directory = tempfile::tempdir()?;

        assert!(read_validator_indices(directory.path().join("indices.json")).is_err());

        Ok(())
    }
}
