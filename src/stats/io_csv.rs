// Primitives for reading CSV files.

use crate::stats::io_common::*;
use crate::stats::*;

pub fn read_csv_file(path: &str) -> BStatsResult<Vec<Record>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;

    let header: Vec<Option<String>> = rdr
        .headers()
        .context(CsvLineParseSnafu { lineno: 1_usize })?
        .iter()
        .map(parse_text)
        .collect();
    let columns = get_column_index(&header, path)?;
    debug!("read_csv_file: columns: {:?}", columns);

    let mut res: Vec<Record> = Vec::new();
    for (idx, line_r) in rdr.records().enumerate() {
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        debug!("read_csv_file: line {:?}: {:?}", lineno, line);
        if line.iter().all(|s| s.trim().is_empty()) {
            continue;
        }
        let field = |col: usize| line.get(col).unwrap_or("");
        res.push(Record {
            row: idx + 1,
            name: parse_text(field(columns.name)),
            author_login: parse_text(field(columns.author_login)),
            author_nickname: parse_text(field(columns.author_nickname)),
            average_karma: parse_karma(field(columns.average_karma), lineno),
            number_of_votes: parse_votes(field(columns.number_of_votes), lineno),
        });
    }
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_with_missing_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("karma.csv");
        fs::write(
            &path,
            "number_of_votes,name,author_login,author_nickname,average_karma,extra\n\
             12,Castle,a-1,Anna,0.5,x\n\
             ,Tower,a-1,,0.1\n\
             \n\
             3,,b-2,Bob,abc,y\n",
        )
        .unwrap();
        let records = read_csv_file(&path.display().to_string()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(
            records[0],
            Record {
                row: 1,
                ..Record::new("Castle", "a-1", "Anna", 0.5, 12)
            }
        );
        assert_eq!(records[1].number_of_votes, None);
        assert_eq!(records[1].author_nickname, None);
        assert_eq!(records[1].average_karma, Some(0.1));
        assert_eq!(records[2].name, None);
        assert_eq!(records[2].average_karma, None);
        assert_eq!(records[2].number_of_votes, Some(3));
    }

    #[test]
    fn missing_file() {
        let err = read_csv_file("does/not/exist.csv").unwrap_err();
        assert!(matches!(*err, StatsError::CsvOpen { .. }));
    }
}
