use std::env::consts::{ARCH, OS};

use const_format::concatcp;

pub const APPLICATION_NAME: &str = "SlotAnalyzer";
pub const APPLICATION_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APPLICATION_NAME_AND_VERSION: &str =
    concatcp!(APPLICATION_NAME, "/", APPLICATION_VERSION);

/// Sent as the `User-Agent` of requests to beacon and execution nodes.
#[must_use]
pub fn version_with_platform() -> String {
    format!("{APPLICATION_NAME_AND_VERSION}/{ARCH}-{OS}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_with_platform_has_slash_separated_parts() {
        let version = version_with_platform();
        let parts = version.split('/').collect::<Vec<_>>();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], APPLICATION_NAME);
        assert_eq!(parts[1], APPLICATION_VERSION);
        assert_eq!(parts[2], format!("{ARCH}-{OS}"));
    }
}
