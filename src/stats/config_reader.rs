use crate::stats::*;

use serde::{Deserialize, Serialize};

/// The settings of an analysis, as read from a JSON file. Every option is optional.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisSettings {
    #[serde(rename = "inputPath")]
    pub input_path: Option<String>,
    #[serde(rename = "inputType")]
    pub input_type: Option<String>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
    #[serde(rename = "minMapsPerAuthor")]
    pub min_maps_per_author: Option<u64>,
    #[serde(rename = "minVotesPerMap")]
    pub min_votes_per_map: Option<u64>,
    #[serde(rename = "topN")]
    pub top_n: Option<usize>,
    #[serde(rename = "competitionPrefix")]
    pub competition_prefix: Option<String>,
    #[serde(rename = "packPrefix")]
    pub pack_prefix: Option<String>,
    #[serde(rename = "categoryPrefix")]
    pub category_prefix: Option<String>,
    /// An empty string disables the exclusion of an author.
    #[serde(rename = "excludedLogin")]
    pub excluded_login: Option<String>,
    #[serde(rename = "nicknamePolicy")]
    pub nickname_policy: Option<String>,
}

impl AnalysisSettings {
    pub fn nickname_policy(&self) -> StatsResult<NicknamePolicy> {
        match self.nickname_policy.as_deref() {
            None | Some("first") => Ok(NicknamePolicy::First),
            Some("mostFrequent") => Ok(NicknamePolicy::MostFrequent),
            Some("last") => Ok(NicknamePolicy::Last),
            Some(x) => {
                whatever!(
                    "unknown nickname policy: {} (use first, mostFrequent or last)",
                    x
                );
            }
        }
    }

    /// The rules of the analysis: the default rules, updated with the options of this file.
    pub fn analysis_rules(&self) -> StatsResult<AnalysisRules> {
        let default_rules = AnalysisRules::default();
        Ok(AnalysisRules {
            min_maps_per_author: self
                .min_maps_per_author
                .unwrap_or(default_rules.min_maps_per_author),
            min_votes_per_map: self
                .min_votes_per_map
                .unwrap_or(default_rules.min_votes_per_map),
            top_n: self.top_n.unwrap_or(default_rules.top_n),
            competition_prefix: self
                .competition_prefix
                .clone()
                .unwrap_or(default_rules.competition_prefix),
            pack_prefix: self
                .pack_prefix
                .clone()
                .unwrap_or(default_rules.pack_prefix),
            category_prefix: self
                .category_prefix
                .clone()
                .unwrap_or(default_rules.category_prefix),
            excluded_login: match self.excluded_login.as_deref() {
                Some("") => None,
                Some(login) => Some(login.to_string()),
                None => default_rules.excluded_login,
            },
            nickname_policy: self.nickname_policy()?,
        })
    }
}

pub fn read_settings(path: &str) -> BStatsResult<AnalysisSettings> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_settings: content: {:?}", contents);
    let settings: AnalysisSettings =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(settings)
}

pub fn read_summary(path: &str) -> BStatsResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_settings_give_the_default_rules() {
        let settings: AnalysisSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.analysis_rules().unwrap(), AnalysisRules::default());
    }

    #[test]
    fn settings_override_the_rules() {
        let settings: AnalysisSettings = serde_json::from_str(
            r#"{"minMapsPerAuthor": 3, "minVotesPerMap": 10, "excludedLogin": "", "nicknamePolicy": "mostFrequent"}"#,
        )
        .unwrap();
        let rules = settings.analysis_rules().unwrap();
        assert_eq!(rules.min_maps_per_author, 3);
        assert_eq!(rules.min_votes_per_map, 10);
        assert_eq!(rules.excluded_login, None);
        assert_eq!(rules.nickname_policy, NicknamePolicy::MostFrequent);
        assert_eq!(rules.top_n, 10);
    }

    #[test]
    fn unknown_policy_is_rejected() {
        let settings = AnalysisSettings {
            nickname_policy: Some("random".to_string()),
            ..Default::default()
        };
        assert!(settings.analysis_rules().is_err());
    }
}
