//! Href parsing backed by the `url` crate.

use url::Url;

use crate::navigation::{ParsedUrl, UrlParser};

/// Resolves hrefs, relative or absolute, against a base URL.
#[derive(Debug, Clone)]
pub struct StdUrlParser {
    base: Url,
}

impl StdUrlParser {
    pub fn new(base: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            base: Url::parse(base)?,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }
}

impl UrlParser for StdUrlParser {
    fn parse(&self, href: &str) -> ParsedUrl {
        match self.base.join(href) {
            Ok(resolved) => ParsedUrl {
                pathname: resolved.path().to_string(),
                search: resolved
                    .query()
                    .map(|q| format!("?{}", q))
                    .unwrap_or_default(),
            },
            Err(e) => {
                tracing::warn!(href = %href, error = %e, "Unparsable href, using it verbatim");
                let without_fragment = href.split('#').next().unwrap_or_default();
                match without_fragment.split_once('?') {
                    Some((pathname, query)) => ParsedUrl {
                        pathname: pathname.to_string(),
                        search: format!("?{}", query),
                    },
                    None => ParsedUrl {
                        pathname: without_fragment.to_string(),
                        search: String::new(),
                    },
                }
            }
        }
    }
}
