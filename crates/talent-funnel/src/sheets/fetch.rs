use std::fmt::Debug;
use std::time::Duration;

/// The upstream export is expected to answer within this budget; anything
/// slower aborts the whole evaluation pass.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum SheetFetchError {
    #[error("sheet source returned status {status}")]
    Unavailable { status: u16 },
    #[error("could not reach sheet source: {0}")]
    Transport(String),
    #[error("sheet payload is not valid UTF-8")]
    Encoding,
}

/// Boundary for retrieving the sheet's CSV export, so reports can be driven
/// from canned payloads in tests and from HTTP in production.
pub trait SheetGateway: Debug {
    fn fetch_csv(&self, url: &str) -> Result<String, SheetFetchError>;
}

/// Blocking HTTP client for the published CSV export.
pub struct HttpSheetClient {
    client: reqwest::blocking::Client,
}

impl HttpSheetClient {
    pub fn new() -> Result<Self, SheetFetchError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, SheetFetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| SheetFetchError::Transport(err.to_string()))?;
        Ok(Self { client })
    }
}

impl Debug for HttpSheetClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSheetClient").finish_non_exhaustive()
    }
}

impl SheetGateway for HttpSheetClient {
    fn fetch_csv(&self, url: &str) -> Result<String, SheetFetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| SheetFetchError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SheetFetchError::Unavailable {
                status: status.as_u16(),
            });
        }

        // The export declares charset=latin-1 while shipping UTF-8 bytes.
        // Decode the raw body ourselves; trusting the declared charset would
        // silently mangle accented names instead of failing.
        let bytes = response
            .bytes()
            .map_err(|err| SheetFetchError::Transport(err.to_string()))?;
        String::from_utf8(bytes.to_vec()).map_err(|_| SheetFetchError::Encoding)
    }
}
