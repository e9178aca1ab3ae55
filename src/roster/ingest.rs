//! Loading the extracted squad-list table.
//!
//! The table comes from the PDF extraction step as CSV. Malformed roster
//! numbers and dates are coerced to `None` here so nothing downstream has to
//! deal with them. Dates are read day-first only; month-first is never
//! guessed.

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use super::models::PlayerRecord;

/// Day-first formats tried in order. ISO and `Month D, YYYY` are included
/// since neither can be confused with a numeric month-first layout.
/// Two-digit years go first so that `%Y` never reads "93" as the year 93.
const DATE_FORMATS: &[&str] = &[
    "%d/%m/%y",
    "%d.%m.%y",
    "%d-%m-%y",
    "%d %b %y",
    "%d %B %y",
    "%d-%b-%y",
    "%d-%B-%y",
    "%d/%m/%Y",
    "%d.%m.%Y",
    "%d-%m-%Y",
    "%Y-%m-%d",
    "%d %B %Y",
    "%d %b %Y",
    "%d-%B-%Y",
    "%d-%b-%Y",
    "%B %d, %Y",
];

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to open roster file {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed roster CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("roster table has no '{0}' column")]
    MissingColumn(String),
}

/// Header names of the columns the analysis reads
#[derive(Debug, Clone)]
pub struct RosterColumns {
    pub group: String,
    pub number: String,
    pub date_of_birth: String,
    pub name: String,
}

impl Default for RosterColumns {
    fn default() -> Self {
        Self {
            group: "src_page".into(),
            number: "#".into(),
            date_of_birth: "DOB".into(),
            name: "PLAYER NAME".into(),
        }
    }
}

/// Row counts gathered while loading
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub rows: usize,
    pub invalid_roster_numbers: usize,
    pub unparseable_dates: usize,
}

#[derive(Debug, Clone)]
pub struct RosterTable {
    pub records: Vec<PlayerRecord>,
    pub stats: IngestStats,
}

struct ColumnIndex {
    group: usize,
    number: usize,
    date_of_birth: usize,
    name: usize,
}

fn find_column(headers: &StringRecord, wanted: &str) -> Result<usize, IngestError> {
    let wanted = wanted.trim();
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(wanted))
        .ok_or_else(|| IngestError::MissingColumn(wanted.to_string()))
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord, columns: &RosterColumns) -> Result<Self, IngestError> {
        Ok(Self {
            group: find_column(headers, &columns.group)?,
            number: find_column(headers, &columns.number)?,
            date_of_birth: find_column(headers, &columns.date_of_birth)?,
            name: find_column(headers, &columns.name)?,
        })
    }
}

/// Parse a roster number. Accepts plain integers and integral decimals
/// such as `"7.0"`; everything else is absent.
pub fn parse_roster_number(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(n) = raw.parse::<u32>() {
        return Some(n);
    }
    let value = raw.parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
        Some(value as u32)
    } else {
        None
    }
}

/// Parse a date of birth with day-first conventions.
pub fn parse_date_of_birth(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let raw = strip_time_of_day(raw);
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// Drop a trailing clock time (`1993-03-07 00:00:00`, `07/03/1993 00:00`,
/// `1993-03-07T00:00:00`). Datetime columns round-trip through CSV this way.
fn strip_time_of_day(raw: &str) -> &str {
    let split = raw
        .rfind(' ')
        .or_else(|| raw.find('T').filter(|&i| raw[..i].contains('-')));
    match split {
        Some(i) if raw[i + 1..].contains(':') => raw[..i].trim_end(),
        _ => raw,
    }
}

/// Read a roster table from any CSV source.
pub fn read_roster<R: Read>(source: R, columns: &RosterColumns) -> Result<RosterTable, IngestError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(source);

    let index = ColumnIndex::resolve(reader.headers()?, columns)?;

    let mut records = Vec::new();
    let mut stats = IngestStats::default();

    for (line, row) in reader.records().enumerate() {
        let row = row?;
        let field = |i: usize| row.get(i).unwrap_or("");
        stats.rows += 1;

        let raw_number = field(index.number);
        let roster_number = parse_roster_number(raw_number);
        if roster_number.is_none() {
            stats.invalid_roster_numbers += 1;
            debug!("Row {}: roster number '{}' treated as absent", line + 1, raw_number);
        }

        let raw_dob = field(index.date_of_birth);
        let date_of_birth = parse_date_of_birth(raw_dob);
        if date_of_birth.is_none() {
            stats.unparseable_dates += 1;
            debug!("Row {}: date of birth '{}' treated as absent", line + 1, raw_dob);
        }

        records.push(PlayerRecord {
            source_group_id: field(index.group).to_string(),
            roster_number,
            name: field(index.name).to_string(),
            date_of_birth,
        });
    }

    Ok(RosterTable { records, stats })
}

/// Open `path` and read it as a roster table.
pub fn load_roster(path: &Path, columns: &RosterColumns) -> Result<RosterTable, IngestError> {
    let file = File::open(path).map_err(|source| IngestError::Open {
        path: path.display().to_string(),
        source,
    })?;
    read_roster(file, columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
src_page,#,PLAYER NAME,DOB,CLUB
4,1,Mary Earps,07/03/1993,Manchester United
4,2,Lucy Bronze,28.10.1991,Barcelona
4,n/a,Coach,,
5,7.0,Sam Kerr,10/09/1993,Chelsea
5,3,Unknown,not a date,
";

    #[test]
    fn reads_rows_and_coerces_malformed_fields() {
        let table = read_roster(SAMPLE.as_bytes(), &RosterColumns::default()).unwrap();
        assert_eq!(table.records.len(), 5);
        assert_eq!(
            table.stats,
            IngestStats {
                rows: 5,
                invalid_roster_numbers: 1,
                unparseable_dates: 2,
            }
        );

        let earps = &table.records[0];
        assert_eq!(earps.source_group_id, "4");
        assert_eq!(earps.roster_number, Some(1));
        assert_eq!(earps.date_of_birth, NaiveDate::from_ymd_opt(1993, 3, 7));

        assert_eq!(table.records[2].roster_number, None);
        assert_eq!(table.records[3].roster_number, Some(7));
        assert_eq!(table.records[4].date_of_birth, None);
    }

    #[test]
    fn header_match_ignores_case_and_padding() {
        let csv = " SRC_PAGE , # , player name , dob \n1,1,A,01/02/2000\n";
        let table = read_roster(csv.as_bytes(), &RosterColumns::default()).unwrap();
        assert_eq!(table.records[0].name, "A");
    }

    #[test]
    fn missing_column_is_an_error() {
        let csv = "src_page,#,PLAYER NAME\n1,1,A\n";
        let err = read_roster(csv.as_bytes(), &RosterColumns::default()).unwrap_err();
        assert!(matches!(err, IngestError::MissingColumn(ref c) if c == "DOB"));
    }

    #[test]
    fn short_rows_read_as_absent_fields() {
        let csv = "src_page,#,PLAYER NAME,DOB\n1,5\n";
        let table = read_roster(csv.as_bytes(), &RosterColumns::default()).unwrap();
        assert_eq!(table.records[0].roster_number, Some(5));
        assert_eq!(table.records[0].date_of_birth, None);
        assert_eq!(table.records[0].name, "");
    }

    #[test]
    fn dates_are_day_first() {
        assert_eq!(parse_date_of_birth("03/04/1995"), NaiveDate::from_ymd_opt(1995, 4, 3));
        assert_eq!(parse_date_of_birth("1995-04-03"), NaiveDate::from_ymd_opt(1995, 4, 3));
        assert_eq!(parse_date_of_birth("3 April 1995"), NaiveDate::from_ymd_opt(1995, 4, 3));
        assert_eq!(parse_date_of_birth("29/02/1996"), NaiveDate::from_ymd_opt(1996, 2, 29));
        assert_eq!(parse_date_of_birth("7/3/93"), NaiveDate::from_ymd_opt(1993, 3, 7));
        assert_eq!(parse_date_of_birth("07-Mar-1993"), NaiveDate::from_ymd_opt(1993, 3, 7));
        assert_eq!(parse_date_of_birth("07-March-1993"), NaiveDate::from_ymd_opt(1993, 3, 7));
        assert_eq!(parse_date_of_birth("March 7, 1993"), NaiveDate::from_ymd_opt(1993, 3, 7));
        assert_eq!(parse_date_of_birth("7 Mar 1993"), NaiveDate::from_ymd_opt(1993, 3, 7));
        // timestamps written out by datetime-typed columns
        assert_eq!(parse_date_of_birth("1993-03-07 00:00:00"), NaiveDate::from_ymd_opt(1993, 3, 7));
        assert_eq!(parse_date_of_birth("1993-03-07T00:00:00"), NaiveDate::from_ymd_opt(1993, 3, 7));
        assert_eq!(parse_date_of_birth("07/03/1993 00:00"), NaiveDate::from_ymd_opt(1993, 3, 7));
        // 13th month does not exist, and month-first is never tried
        assert_eq!(parse_date_of_birth("04/13/1995"), None);
        assert_eq!(parse_date_of_birth(""), None);
    }

    #[test]
    fn two_digit_years_agree_across_layouts() {
        let expected = NaiveDate::from_ymd_opt(1993, 3, 7);
        for raw in ["7/3/93", "7 March 93", "7 Mar 93", "07-Mar-93", "07.03.93", "07-03-93", "7-March-93"] {
            assert_eq!(parse_date_of_birth(raw), expected, "{raw}");
        }
        assert_eq!(parse_date_of_birth("29 Feb 96"), NaiveDate::from_ymd_opt(1996, 2, 29));
    }

    #[test]
    fn roster_number_coercion() {
        assert_eq!(parse_roster_number("23"), Some(23));
        assert_eq!(parse_roster_number(" 9 "), Some(9));
        assert_eq!(parse_roster_number("12.0"), Some(12));
        assert_eq!(parse_roster_number("7.5"), None);
        assert_eq!(parse_roster_number("-3"), None);
        assert_eq!(parse_roster_number("GK"), None);
        assert_eq!(parse_roster_number(""), None);
    }

    #[test]
    fn load_roster_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let table = load_roster(file.path(), &RosterColumns::default()).unwrap();
        assert_eq!(table.stats.rows, 5);
    }

    #[test]
    fn load_roster_missing_file() {
        let err = load_roster(Path::new("/definitely/not/here.csv"), &RosterColumns::default())
            .unwrap_err();
        assert!(matches!(err, IngestError::Open { .. }));
    }
}
