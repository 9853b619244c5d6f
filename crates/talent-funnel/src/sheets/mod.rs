mod fetch;
mod parser;

pub use fetch::{HttpSheetClient, SheetFetchError, SheetGateway, DEFAULT_TIMEOUT};

use crate::funnel::domain::EventRow;
use crate::funnel::normalizer;
use std::io::{Cursor, Read};
use std::path::Path;

#[derive(Debug)]
pub enum SheetImportError {
    Fetch(SheetFetchError),
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for SheetImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetImportError::Fetch(err) => write!(f, "failed to fetch sheet export: {}", err),
            SheetImportError::Io(err) => write!(f, "failed to read sheet export: {}", err),
            SheetImportError::Csv(err) => write!(f, "invalid sheet CSV data: {}", err),
        }
    }
}

impl std::error::Error for SheetImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SheetImportError::Fetch(err) => Some(err),
            SheetImportError::Io(err) => Some(err),
            SheetImportError::Csv(err) => Some(err),
        }
    }
}

impl From<SheetFetchError> for SheetImportError {
    fn from(err: SheetFetchError) -> Self {
        Self::Fetch(err)
    }
}

impl From<std::io::Error> for SheetImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for SheetImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl SheetImportError {
    /// True when the failure means the source was unreachable rather than the
    /// payload being malformed.
    pub fn is_source_unavailable(&self) -> bool {
        matches!(
            self,
            SheetImportError::Fetch(
                SheetFetchError::Unavailable { .. } | SheetFetchError::Transport(_)
            )
        )
    }
}

/// Composes gateway, CSV parsing, and normalization into one entry point.
pub struct SheetImporter;

impl SheetImporter {
    pub fn from_url(
        gateway: &dyn SheetGateway,
        url: &str,
    ) -> Result<Vec<EventRow>, SheetImportError> {
        let payload = gateway.fetch_csv(url)?;
        Self::from_reader(Cursor::new(payload))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<EventRow>, SheetImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<EventRow>, SheetImportError> {
        let table = parser::parse_table(reader)?;
        let rows = normalizer::normalize(&table);
        tracing::debug!(rows = rows.len(), "normalized sheet export");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[derive(Debug)]
    struct CannedGateway {
        payload: Result<&'static str, SheetFetchError>,
    }

    impl SheetGateway for CannedGateway {
        fn fetch_csv(&self, _url: &str) -> Result<String, SheetFetchError> {
            match &self.payload {
                Ok(payload) => Ok(payload.to_string()),
                Err(SheetFetchError::Unavailable { status }) => {
                    Err(SheetFetchError::Unavailable { status: *status })
                }
                Err(SheetFetchError::Transport(message)) => {
                    Err(SheetFetchError::Transport(message.clone()))
                }
                Err(SheetFetchError::Encoding) => Err(SheetFetchError::Encoding),
            }
        }
    }

    #[test]
    fn imports_rows_through_a_gateway() {
        let gateway = CannedGateway {
            payload: Ok("Fecha,Posicion,Candidatos contratados\n01/03/2024,Backend,2\n"),
        };

        let rows = SheetImporter::from_url(&gateway, "https://example.test/export")
            .expect("import succeeds");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].counters.hired, 2);
    }

    #[test]
    fn gateway_failures_surface_as_source_unavailable() {
        let gateway = CannedGateway {
            payload: Err(SheetFetchError::Unavailable { status: 500 }),
        };

        let error = SheetImporter::from_url(&gateway, "https://example.test/export")
            .expect_err("expected fetch error");
        assert!(error.is_source_unavailable());
        assert!(error.to_string().contains("status 500"));
    }

    #[test]
    fn importer_from_path_propagates_io_errors() {
        let error =
            SheetImporter::from_path("./does-not-exist.csv").expect_err("expected io error");
        match error {
            SheetImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn sentinel_tokens_resolve_to_zero_counts() {
        let csv = "Fecha,Posicion,Recruitment. Candidatos nuevos,Candidatos contratados\n\
01/03/2024,Backend,<5,N/A\n\
02/03/2024,Backend,7,1\n";

        let rows = SheetImporter::from_reader(Cursor::new(csv)).expect("import succeeds");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].counters.new_candidates, 0);
        assert_eq!(rows[0].counters.hired, 0);
        assert_eq!(rows[1].counters.new_candidates, 7);
    }
}
