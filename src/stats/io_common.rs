use std::collections::HashMap;
use std::path::Path;

use crate::stats::*;

pub const NAME_COLUMN: &str = "name";
pub const LOGIN_COLUMN: &str = "author_login";
pub const NICKNAME_COLUMN: &str = "author_nickname";
pub const KARMA_COLUMN: &str = "average_karma";
pub const VOTES_COLUMN: &str = "number_of_votes";

/// Positions of the columns of interest in a row.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct ColumnIndex {
    pub name: usize,
    pub author_login: usize,
    pub author_nickname: usize,
    pub average_karma: usize,
    pub number_of_votes: usize,
}

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Given the header of a file (names of each of the columns), finds the position of each of
/// the required columns.
pub fn get_column_index(header: &[Option<String>], path: &str) -> BStatsResult<ColumnIndex> {
    let col_names: HashMap<String, usize> = header
        .iter()
        .enumerate()
        .rev()
        .filter_map(|(idx, x)| x.as_ref().map(|s| (s.trim().to_string(), idx)))
        .collect();

    debug!("get_column_index: col_names: {:?}", col_names);

    let find = |cname: &str| -> BStatsResult<usize> {
        let idx = col_names.get(cname).context(MissingColumnSnafu {
            column: cname,
            path,
        })?;
        Ok(*idx)
    };

    Ok(ColumnIndex {
        name: find(NAME_COLUMN)?,
        author_login: find(LOGIN_COLUMN)?,
        author_nickname: find(NICKNAME_COLUMN)?,
        average_karma: find(KARMA_COLUMN)?,
        number_of_votes: find(VOTES_COLUMN)?,
    })
}

/// A text cell. Empty content is a missing value.
pub fn parse_text(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

pub fn parse_karma(s: &str, lineno: usize) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(x) if x.is_finite() => Some(x),
        _ => {
            warn!("line {}: cannot read the karma {:?}", lineno, s);
            None
        }
    }
}

pub fn parse_votes(s: &str, lineno: usize) -> Option<u64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(x) => float_to_votes(x, lineno),
        _ => {
            warn!("line {}: cannot read the number of votes {:?}", lineno, s);
            None
        }
    }
}

/// Spreadsheets often store counts as floats.
pub fn float_to_votes(x: f64, lineno: usize) -> Option<u64> {
    if x.is_finite() && x >= 0.0 && x.fract() == 0.0 {
        Some(x as u64)
    } else {
        warn!("line {}: {} is not a number of votes", lineno, x);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> Vec<Option<String>> {
        names
            .iter()
            .map(|s| if s.is_empty() { None } else { Some(s.to_string()) })
            .collect()
    }

    #[test]
    fn columns_are_found_by_name() {
        let h = header(&[
            "id",
            "number_of_votes",
            "",
            "name",
            "author_nickname",
            "average_karma",
            "author_login",
        ]);
        let idx = get_column_index(&h, "karma.xlsx").unwrap();
        assert_eq!(
            idx,
            ColumnIndex {
                name: 3,
                author_login: 6,
                author_nickname: 4,
                average_karma: 5,
                number_of_votes: 1,
            }
        );
    }

    #[test]
    fn missing_column() {
        let h = header(&["name", "author_login", "author_nickname", "average_karma"]);
        let err = get_column_index(&h, "karma.xlsx").unwrap_err();
        assert!(matches!(*err, StatsError::MissingColumn { ref column, .. } if column == "number_of_votes"));
    }

    #[test]
    fn numbers() {
        assert_eq!(parse_karma(" -0.25 ", 1), Some(-0.25));
        assert_eq!(parse_karma("", 1), None);
        assert_eq!(parse_karma("abc", 1), None);
        assert_eq!(parse_votes("12", 1), Some(12));
        assert_eq!(parse_votes("12.0", 1), Some(12));
        assert_eq!(parse_votes("-3", 1), None);
        assert_eq!(parse_votes("2.5", 1), None);
        assert_eq!(simplify_file_name("/data/Karma.xlsx"), "Karma.xlsx");
    }
}
