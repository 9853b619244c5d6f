use super::domain::{CounterColumn, Counters, EventRow, OpenState};
use chrono::NaiveDate;

pub const DATE_HEADER: &str = "Fecha";
pub const POSITION_HEADER: &str = "Posicion";
pub const RECRUITER_HEADER: &str = "Nombre reclutador";
pub const OPEN_STATE_HEADER: &str = "¿Posicion abierta?";

/// Tokens the sheet uses for "no value" or "too few to disclose"; all of them
/// resolve to zero in counter columns.
const MISSING_TOKENS: [&str; 5] = ["<5", "N/A", "—", "-", ""];

/// Dates arrive day-first; the ISO form shows up when the sheet has been
/// re-exported, so it is accepted as a fallback.
const DATE_FORMATS: [&str; 4] = ["%d/%m/%Y", "%d-%m-%Y", "%d/%m/%y", "%Y-%m-%d"];

/// Raw sheet contents: one trimmed header per column, one cell vector per row.
/// Produced by `sheets::parser`, consumed only here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let headers = headers
            .into_iter()
            .map(|header| header.trim().to_string())
            .collect();
        Self { headers, rows }
    }

    fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|name| name == header)
    }

    fn cell<'a>(&self, row: &'a [String], header: &str) -> Option<&'a str> {
        self.column_index(header)
            .and_then(|index| row.get(index))
            .map(String::as_str)
    }
}

/// Turns raw sheet rows into typed event rows. Rows without a parseable date
/// are dropped and never reconsidered; missing counter columns contribute
/// zero for every row.
pub fn normalize(table: &RawTable) -> Vec<EventRow> {
    let counter_indices: Vec<(CounterColumn, Option<usize>)> = CounterColumn::ordered()
        .into_iter()
        .map(|column| (column, table.column_index(column.header())))
        .collect();

    let mut rows = Vec::new();
    for raw in &table.rows {
        let Some(date) = table.cell(raw, DATE_HEADER).and_then(parse_date) else {
            continue;
        };

        let mut counters = Counters::default();
        for (column, index) in &counter_indices {
            let value = index
                .and_then(|i| raw.get(i))
                .map(|cell| parse_count(cell))
                .unwrap_or(0);
            counters.set(*column, value);
        }

        rows.push(EventRow {
            date,
            position: table
                .cell(raw, POSITION_HEADER)
                .unwrap_or_default()
                .trim()
                .to_string(),
            recruiter: table
                .cell(raw, RECRUITER_HEADER)
                .unwrap_or_default()
                .trim()
                .to_string(),
            open_state: OpenState::from_raw(table.cell(raw, OPEN_STATE_HEADER).unwrap_or_default()),
            counters,
        });
    }

    rows
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

/// Sheet counters occasionally arrive as floats ("3.0"); anything that fails
/// to parse, including the missing-value tokens, counts as zero.
fn parse_count(value: &str) -> u32 {
    let trimmed = value.trim();
    if MISSING_TOKENS.contains(&trimmed) {
        return 0;
    }

    if let Ok(count) = trimmed.parse::<u32>() {
        return count;
    }

    trimmed
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite() && *number > 0.0)
        .map(|number| number as u32)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn parses_day_first_dates() {
        assert_eq!(
            parse_date("13/05/2024"),
            NaiveDate::from_ymd_opt(2024, 5, 13)
        );
        assert_eq!(
            parse_date("13-05-2024"),
            NaiveDate::from_ymd_opt(2024, 5, 13)
        );
        assert_eq!(
            parse_date("2024-05-13"),
            NaiveDate::from_ymd_opt(2024, 5, 13)
        );
        assert_eq!(parse_date("13/25/2024"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn missing_tokens_and_garbage_become_zero() {
        assert_eq!(parse_count("<5"), 0);
        assert_eq!(parse_count("N/A"), 0);
        assert_eq!(parse_count("—"), 0);
        assert_eq!(parse_count("-"), 0);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("pendiente"), 0);
        assert_eq!(parse_count("-3"), 0);
    }

    #[test]
    fn numeric_cells_parse_including_float_exports() {
        assert_eq!(parse_count("7"), 7);
        assert_eq!(parse_count(" 12 "), 12);
        assert_eq!(parse_count("3.0"), 3);
    }

    #[test]
    fn rows_without_valid_dates_are_dropped() {
        let table = table(
            &["Fecha", "Posicion", "Candidatos contratados"],
            &[
                &["01/03/2024", "Backend", "1"],
                &["not a date", "Backend", "2"],
                &["", "Backend", "3"],
            ],
        );

        let rows = normalize(&table);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].counters.hired, 1);
    }

    #[test]
    fn missing_counter_columns_resolve_to_zero() {
        let table = table(
            &["Fecha", "Posicion", "Recruitment. Candidatos Indeed"],
            &[&["01/03/2024", "Backend", "40"]],
        );

        let rows = normalize(&table);
        assert_eq!(rows[0].counters.indeed_candidates, 40);
        assert_eq!(rows[0].counters.new_candidates, 0);
        assert_eq!(rows[0].counters.hired, 0);
    }

    #[test]
    fn headers_are_trimmed_before_matching() {
        let table = table(
            &["  Fecha ", " Posicion", "Candidatos contratados "],
            &[&["02/03/2024", "QA Lead", "2"]],
        );

        let rows = normalize(&table);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].position, "QA Lead");
        assert_eq!(rows[0].counters.hired, 2);
    }

    #[test]
    fn open_state_and_names_are_normalized() {
        let table = table(
            &["Fecha", "Posicion", "Nombre reclutador", "¿Posicion abierta?"],
            &[&["03/03/2024", " Backend ", "  Laura Vega ", " NO "]],
        );

        let rows = normalize(&table);
        assert_eq!(rows[0].position, "Backend");
        assert_eq!(rows[0].recruiter, "Laura Vega");
        assert_eq!(rows[0].open_state, OpenState::Closed);
    }
}
