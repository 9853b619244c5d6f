use std::io::Cursor;
use talent_funnel::funnel::OpenState;
use talent_funnel::sheets::{SheetFetchError, SheetGateway, SheetImportError, SheetImporter};

#[derive(Debug)]
struct StaticGateway(&'static str);

impl SheetGateway for StaticGateway {
    fn fetch_csv(&self, _url: &str) -> Result<String, SheetFetchError> {
        Ok(self.0.to_string())
    }
}

#[derive(Debug)]
struct DownGateway;

impl SheetGateway for DownGateway {
    fn fetch_csv(&self, _url: &str) -> Result<String, SheetFetchError> {
        Err(SheetFetchError::Unavailable { status: 404 })
    }
}

#[test]
fn url_import_normalizes_accented_text_and_sentinels() {
    let gateway = StaticGateway(
        "Fecha,Posicion,Nombre reclutador,¿Posicion abierta?,Recruitment. Candidatos nuevos\n\
15/04/2024,Ingeniería de Datos,José Núñez,sí,<5\n\
16/04/2024,Ingeniería de Datos,José Núñez,sí,12\n",
    );

    let rows = SheetImporter::from_url(&gateway, "https://example.test/export?format=csv")
        .expect("import succeeds");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].position, "Ingeniería de Datos");
    assert_eq!(rows[0].recruiter, "José Núñez");
    assert_eq!(rows[0].open_state, OpenState::Open);
    assert_eq!(rows[0].counters.new_candidates, 0);
    assert_eq!(rows[1].counters.new_candidates, 12);
}

#[test]
fn source_unavailable_aborts_the_import() {
    let error = SheetImporter::from_url(&DownGateway, "https://example.test/missing")
        .expect_err("expected unavailable source");

    assert!(error.is_source_unavailable());
    match error {
        SheetImportError::Fetch(SheetFetchError::Unavailable { status }) => {
            assert_eq!(status, 404)
        }
        other => panic!("expected fetch error, got {other:?}"),
    }
}

#[test]
fn absent_counter_columns_never_fail_the_import() {
    let csv = "Fecha,Posicion\n01/04/2024,Backend\n";
    let rows = SheetImporter::from_reader(Cursor::new(csv)).expect("import succeeds");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].counters.indeed_candidates, 0);
    assert_eq!(rows[0].recruiter, "");
    assert_eq!(rows[0].open_state, OpenState::Unknown);
}

#[test]
fn every_imported_row_has_a_valid_date() {
    let csv = "Fecha,Posicion\n01/04/2024,Backend\n32/04/2024,Backend\n,Backend\nmañana,Backend\n";
    let rows = SheetImporter::from_reader(Cursor::new(csv)).expect("import succeeds");
    assert_eq!(rows.len(), 1);
}
