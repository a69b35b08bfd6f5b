use core::{
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use url::{ParseError, Url};

const MASK: &str = "*";

/// A [`Url`] that hides credentials when formatted.
///
/// Node endpoints are commonly configured with basic-auth credentials embedded in the URL.
/// Endpoints end up in log messages and error chains, so they are wrapped in this type.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RedactingUrl {
    url: Url,
}

impl FromStr for RedactingUrl {
    type Err = ParseError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        string.parse().map(|url| Self { url })
    }
}

impl From<Url> for RedactingUrl {
    fn from(url: Url) -> Self {
        Self { url }
    }
}

impl Display for RedactingUrl {
    fn fmt(&self, formatter: &mut Formatter) -> FmtResult {
        Display::fmt(&self.redacted(), formatter)
    }
}

impl Debug for RedactingUrl {
    fn fmt(&self, formatter: &mut Formatter) -> FmtResult {
        Debug::fmt(self.redacted().as_str(), formatter)
    }
}

impl RedactingUrl {
    #[must_use]
    pub fn into_url(self) -> Url {
        self.url
    }

    pub fn join(&self, path: &str) -> Result<Self, ParseError> {
        self.url.join(path).map(Self::from)
    }

    fn redacted(&self) -> Url {
        let mut url = self.url.clone();

        // Both setters fail only for URLs that cannot have credentials in the first place.
        if !url.username().is_empty() {
            url.set_username(MASK).ok();
        }

        if url.password().is_some() {
            url.set_password(Some(MASK)).ok();
        }

        url
    }
}
