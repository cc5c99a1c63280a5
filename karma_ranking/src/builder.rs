use log::warn;

pub use crate::config::*;

/// A builder for collecting the records of an analysis.
///
/// ```
/// pub use karma_ranking::builder::Builder;
/// pub use karma_ranking::AnalysisRules;
/// # use karma_ranking::AnalysisErrors;
///
/// let mut builder = Builder::new(&AnalysisRules::default())?;
///
/// builder.add_map_simple("Castle", "anna-1", "Anna", 0.4, 12)?;
/// builder.add_map_simple("Castle by Bob", "anna-1", "Anna", 0.9, 30)?;
///
/// let analysis = builder.analyze()?;
/// assert_eq!(analysis.count_ranking[0].count, 1);
///
/// # Ok::<(), AnalysisErrors>(())
/// ```
pub struct Builder {
    pub(crate) _rules: AnalysisRules,
    pub(crate) _records: Vec<Record>,
}

impl Builder {
    pub fn new(rules: &AnalysisRules) -> Result<Builder, AnalysisErrors> {
        crate::check_rules(rules)?;
        Ok(Builder {
            _rules: rules.clone(),
            _records: Vec::new(),
        })
    }

    /// Adds a map for which every field is known.
    pub fn add_map_simple(
        &mut self,
        name: &str,
        author_login: &str,
        author_nickname: &str,
        average_karma: f64,
        number_of_votes: u64,
    ) -> Result<(), AnalysisErrors> {
        self.add_record(Record::new(
            name,
            author_login,
            author_nickname,
            average_karma,
            number_of_votes,
        ))
    }

    /// Adds a record. Records without a row number are numbered in insertion order.
    pub fn add_record(&mut self, record: Record) -> Result<(), AnalysisErrors> {
        let row = if record.row == 0 {
            self._records.len() + 1
        } else {
            record.row
        };
        if let Some(karma) = record.average_karma {
            if !(-1.0..=1.0).contains(&karma) {
                warn!(
                    "add_record: row {}: karma {} is outside of [-1, 1]",
                    row, karma
                );
            }
        }
        self._records.push(Record { row, ..record });
        Ok(())
    }

    pub fn records(&self) -> &[Record] {
        &self._records
    }

    pub fn analyze(&self) -> Result<Analysis, AnalysisErrors> {
        crate::run_analysis(&self._records, &self._rules)
    }
}
