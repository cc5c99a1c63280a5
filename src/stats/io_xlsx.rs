use calamine::{open_workbook, DataType, Reader, Xlsx};

use crate::stats::io_common::*;
use crate::stats::*;

pub fn read_excel_file(path: &str, worksheet_name: &Option<String>) -> BStatsResult<Vec<Record>> {
    let wrange = get_range(path, worksheet_name)?;

    let mut iter = wrange.rows();
    let header = iter.next().context(EmptyExcelSnafu { path })?;
    debug!("read_excel_file: header: {:?}", header);
    let header: Vec<Option<String>> = header.iter().map(read_text_cell).collect();
    let columns = get_column_index(&header, path)?;
    debug!("read_excel_file: columns: {:?}", columns);

    let mut res: Vec<Record> = Vec::new();
    for (idx, row) in iter.enumerate() {
        // The header is on line 1.
        let lineno = idx + 2;
        debug!("read_excel_file: line {:?}: {:?}", lineno, row);
        if row.iter().all(|c| *c == DataType::Empty) {
            continue;
        }
        let text = |col: usize| row.get(col).and_then(read_text_cell);
        let number = |col: usize| row.get(col).and_then(|c| read_number_cell(c, lineno));
        let record = Record {
            row: idx + 1,
            name: text(columns.name),
            author_login: text(columns.author_login),
            author_nickname: text(columns.author_nickname),
            average_karma: number(columns.average_karma),
            number_of_votes: number(columns.number_of_votes)
                .and_then(|x| float_to_votes(x, lineno)),
        };
        res.push(record);
    }
    Ok(res)
}

fn read_text_cell(cell: &DataType) -> Option<String> {
    match cell {
        DataType::String(s) => parse_text(s),
        DataType::Int(i) => Some(i.to_string()),
        DataType::Float(f) => Some(f.to_string()),
        DataType::Bool(b) => Some(b.to_string()),
        DataType::Empty => None,
        _ => {
            warn!("read_text_cell: could not understand cell {:?}", cell);
            None
        }
    }
}

fn read_number_cell(cell: &DataType, lineno: usize) -> Option<f64> {
    match cell {
        DataType::Float(f) if f.is_finite() => Some(*f),
        DataType::Int(i) => Some(*i as f64),
        DataType::String(s) => parse_karma(s, lineno),
        DataType::Empty => None,
        _ => {
            warn!(
                "read_number_cell: line {}: could not understand cell {:?}",
                lineno, cell
            );
            None
        }
    }
}

fn get_range(path: &str, worksheet_name: &Option<String>) -> BStatsResult<calamine::Range<DataType>> {
    debug!(
        "read_excel_file: path: {:?} worksheet: {:?}",
        path, worksheet_name
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    let wrange = match worksheet_name {
        // A worksheet name was provided, use it.
        Some(name) => workbook
            .worksheet_range(name)
            .context(EmptyExcelSnafu { path })?
            .context(OpeningExcelSnafu { path })?,
        None => workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu { path })?
            .context(OpeningExcelSnafu { path })?,
    };
    Ok(wrange)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_cells() {
        assert_eq!(
            read_text_cell(&DataType::String("Castle".to_string())),
            Some("Castle".to_string())
        );
        assert_eq!(read_text_cell(&DataType::String("".to_string())), None);
        assert_eq!(read_text_cell(&DataType::Int(1234)), Some("1234".to_string()));
        assert_eq!(read_text_cell(&DataType::Empty), None);
    }

    #[test]
    fn number_cells() {
        assert_eq!(read_number_cell(&DataType::Float(-0.5), 2), Some(-0.5));
        assert_eq!(read_number_cell(&DataType::Int(7), 2), Some(7.0));
        assert_eq!(
            read_number_cell(&DataType::String("0.25".to_string()), 2),
            Some(0.25)
        );
        assert_eq!(read_number_cell(&DataType::Bool(true), 2), None);
        assert_eq!(read_number_cell(&DataType::Empty, 2), None);
    }

    fn fixture() -> String {
        format!("{}/testdata/karma.xlsx", env!("CARGO_MANIFEST_DIR"))
    }

    #[test]
    fn read_workbook() {
        let _ = env_logger::builder().is_test(true).try_init();
        let records = read_excel_file(&fixture(), &None).unwrap();
        // The blank third line of the sheet is skipped.
        assert_eq!(records.len(), 3);
        assert_eq!(
            records[0],
            Record {
                row: 1,
                ..Record::new("Castle", "speq-1", "eLconn15", 0.5, 12)
            }
        );

        // Vote count stored as text, no nickname.
        assert_eq!(records[1].name.as_deref(), Some("Tower"));
        assert_eq!(records[1].author_nickname, None);
        assert_eq!(records[1].average_karma, Some(-0.25));
        assert_eq!(records[1].number_of_votes, Some(7));

        // 2.5 is not a vote count.
        assert_eq!(records[2].author_nickname.as_deref(), Some("Bob"));
        assert_eq!(records[2].average_karma, Some(1.0));
        assert_eq!(records[2].number_of_votes, None);
    }

    #[test]
    fn read_named_worksheet() {
        let records = read_excel_file(&fixture(), &Some("Karma".to_string())).unwrap();
        assert_eq!(records.len(), 3);
        let err = read_excel_file(&fixture(), &Some("Results".to_string())).unwrap_err();
        assert!(matches!(*err, StatsError::EmptyExcel { .. }));
    }

    #[test]
    fn missing_file() {
        let err = read_excel_file("does/not/exist.xlsx", &None).unwrap_err();
        assert!(matches!(*err, StatsError::OpeningExcel { .. }));
    }
}
