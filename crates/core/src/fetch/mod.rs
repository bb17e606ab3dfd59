//! Symbol-listing retrieval from the remote symbol store.
//!
//! Listings are addressed by the debug identifier of a module and served as
//! newline-delimited text, optionally gzip-compressed on the wire. This
//! layer does no retrying and no caching; failures surface to the caller.

use std::io::Read;

use flate2::read::GzDecoder;
use thiserror::Error;

/// Error type for symbol-listing retrieval.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, connect, read, TLS).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("Symbol store returned {status} for {url}")]
    Status { status: u16, url: String },

    /// The response declared gzip encoding but did not decompress.
    #[error("Failed to decompress symbol listing: {0}")]
    Decompress(#[source] std::io::Error),

    /// The (decompressed) body was not valid UTF-8.
    #[error("Symbol listing is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Convenience result type for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// Source of symbol listings, keyed by debug identifier.
///
/// Implementations return the listing as trimmed lines in original file
/// order. The HTTP implementation performs a network round-trip per call;
/// callers that evaluate the same build repeatedly must cache externally.
pub trait SymbolSource {
    fn fetch(&self, debug_id: &str) -> FetchResult<Vec<String>>;
}

/// Decode a raw response body into trimmed listing lines.
///
/// `gzipped` reflects the response's `Content-Encoding` header. A trailing
/// newline does not produce a trailing empty line.
pub fn decode_listing(body: &[u8], gzipped: bool) -> FetchResult<Vec<String>> {
    let text = if gzipped {
        let mut decoder = GzDecoder::new(body);
        let mut buf = Vec::new();
        decoder.read_to_end(&mut buf).map_err(FetchError::Decompress)?;
        String::from_utf8(buf)?
    } else {
        String::from_utf8(body.to_vec())?
    };
    Ok(text.lines().map(|line| line.trim().to_string()).collect())
}

/// Blocking HTTP implementation of [`SymbolSource`].
///
/// Listings are addressed as `<base>/<debug_file>/<debug_id>/<sym_file>`,
/// where `<sym_file>` is the debug file name with its extension replaced by
/// `.sym` (`xul.pdb` -> `xul.sym`).
pub struct HttpSymbolSource {
    client: reqwest::blocking::Client,
    base_url: String,
    debug_file: String,
}

impl HttpSymbolSource {
    pub fn new(base_url: &str, debug_file: &str) -> FetchResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("sleuth-core/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            debug_file: debug_file.to_string(),
        })
    }

    /// Remote listing URL for a debug identifier.
    pub fn listing_url(&self, debug_id: &str) -> String {
        let sym_file = match self.debug_file.rsplit_once('.') {
            Some((stem, _)) => format!("{stem}.sym"),
            None => format!("{}.sym", self.debug_file),
        };
        format!("{}/{}/{}/{}", self.base_url, self.debug_file, debug_id, sym_file)
    }
}

impl SymbolSource for HttpSymbolSource {
    fn fetch(&self, debug_id: &str) -> FetchResult<Vec<String>> {
        let url = self.listing_url(debug_id);
        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT_ENCODING, "gzip")
            .send()?;
        if !response.status().is_success() {
            return Err(FetchError::Status { status: response.status().as_u16(), url });
        }
        let gzipped = response
            .headers()
            .get(reqwest::header::CONTENT_ENCODING)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.eq_ignore_ascii_case("gzip"))
            .unwrap_or(false);
        let body = response.bytes()?;
        decode_listing(&body, gzipped)
    }
}
