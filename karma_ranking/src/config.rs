// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// One map submission, as read from the karma spreadsheet.
///
/// All the fields are optional because the cells of the spreadsheet may be empty.
/// Missing text fields never match an exclusion rule. Missing numeric fields keep
/// the map out of the rating aggregation and of the search for the best and worst maps.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct Record {
    /// Position of the row in the source (1-based, header excluded).
    pub row: usize,
    pub name: Option<String>,
    /// Stable identifier of the account.
    pub author_login: Option<String>,
    /// Display name of the account, which may change between submissions.
    pub author_nickname: Option<String>,
    /// Raw score, nominally in [-1, 1].
    pub average_karma: Option<f64>,
    pub number_of_votes: Option<u64>,
}

impl Record {
    pub fn new(
        name: &str,
        author_login: &str,
        author_nickname: &str,
        average_karma: f64,
        number_of_votes: u64,
    ) -> Record {
        Record {
            row: 0,
            name: Some(name.to_string()),
            author_login: Some(author_login.to_string()),
            author_nickname: Some(author_nickname.to_string()),
            average_karma: Some(average_karma),
            number_of_votes: Some(number_of_votes),
        }
    }

    /// True if both the karma and the number of votes are known, and the karma is a finite
    /// number.
    pub fn is_complete(&self) -> bool {
        matches!(self.average_karma, Some(k) if k.is_finite()) && self.number_of_votes.is_some()
    }
}

// ******** Output data structures *********

/// The kind of exclusion applied by the filter stage, in the order in which they are checked.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum ExclusionKind {
    /// The competition's own versus maps ("RHQ BONK CUP - VS ...").
    CompetitionVersus,
    /// Maps from a disallowed map pack.
    MapPack,
    /// Maps attributed to someone else ("... by ...").
    Attribution,
    /// Maps from a disallowed map category.
    MapCategory,
    /// Maps from an author whose submissions belong to another event.
    ExcludedAuthor,
}

impl ExclusionKind {
    pub fn label(&self) -> &'static str {
        match self {
            ExclusionKind::CompetitionVersus => "competition versus map",
            ExclusionKind::MapPack => "map pack",
            ExclusionKind::Attribution => "made by someone else",
            ExclusionKind::MapCategory => "map category",
            ExclusionKind::ExcludedAuthor => "excluded author",
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct FilterStats {
    pub input_rows: usize,
    pub kept_rows: usize,
    /// Rows removed, attributed to the first rule that matched them.
    pub removed: Vec<(ExclusionKind, usize)>,
    /// Kept rows that have no karma or no vote count.
    pub incomplete_rows: usize,
    /// Kept rows that have no nickname, even after canonicalization.
    pub anonymous_rows: usize,
}

/// Number of maps submitted by one author.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct AuthorCount {
    pub author: String,
    pub count: u64,
}

/// Mean rescaled rating of one author, over the maps with enough votes.
#[derive(PartialEq, Debug, Clone)]
pub struct AuthorRating {
    pub author: String,
    pub rating: f64,
    /// The number of maps that contributed to the mean.
    pub rated_maps: u64,
}

/// An author of the top of the count ranking, with their rating.
#[derive(PartialEq, Debug, Clone)]
pub struct RatingOfTopMapper {
    pub author: String,
    pub count: u64,
    /// Fails with `MissingData` if the author has no rating.
    pub rating: Result<f64, AnalysisErrors>,
}

/// An author of the top of the rating ranking, with their map count.
#[derive(PartialEq, Debug, Clone)]
pub struct CountOfTopRatedMapper {
    pub author: String,
    pub rating: f64,
    pub count: u64,
}

#[derive(PartialEq, Debug, Clone)]
pub struct MapEntry {
    pub row: usize,
    pub name: Option<String>,
    pub author: Option<String>,
    pub average_karma: f64,
    pub number_of_votes: u64,
}

/// All the maps that share the lowest (or highest) raw karma.
#[derive(PartialEq, Debug, Clone)]
pub struct ExtremeMaps {
    pub average_karma: f64,
    pub maps: Vec<MapEntry>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct Analysis {
    pub filter_stats: FilterStats,
    /// Every author with at least one kept map, by decreasing count.
    pub count_ranking: Vec<AuthorCount>,
    /// Every author meeting the volume thresholds, by decreasing rating.
    pub rating_ranking: Vec<AuthorRating>,
    pub rating_of_top_mappers: Vec<RatingOfTopMapper>,
    pub count_of_top_rated_mappers: Vec<CountOfTopRatedMapper>,
    pub worst_maps: Result<ExtremeMaps, AnalysisErrors>,
    pub best_maps: Result<ExtremeMaps, AnalysisErrors>,
}

/// Errors reported by the analysis.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum AnalysisErrors {
    /// An author of one ranking has no entry in another ranking.
    MissingData { author: String, ranking: String },
    /// No record is left where a minimum or a maximum is required.
    EmptyResult { what: String },
    /// The rules cannot be used (bad pattern, zero threshold).
    InvalidRules(String),
}

impl Error for AnalysisErrors {}

impl Display for AnalysisErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisErrors::MissingData { author, ranking } => {
                write!(f, "no data for {} in the {} ranking", author, ranking)
            }
            AnalysisErrors::EmptyResult { what } => write!(f, "no record left for {}", what),
            AnalysisErrors::InvalidRules(msg) => write!(f, "invalid rules: {}", msg),
        }
    }
}

// ********* Configuration **********

/// How the display name of an account is picked when it changed over time.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum NicknamePolicy {
    /// The first nickname found in the order of the source.
    First,
    /// The nickname used on the most maps. Ties go to the first one found.
    MostFrequent,
    /// The last nickname found in the order of the source.
    Last,
}

#[derive(PartialEq, Debug, Clone)]
pub struct AnalysisRules {
    /// Authors with fewer maps are left out of the rating ranking.
    pub min_maps_per_author: u64,
    /// Maps with fewer votes are left out of the ratings and of the best/worst maps.
    pub min_votes_per_map: u64,
    /// Size of the reported top rankings.
    pub top_n: usize,
    /// Title prefix of the competition's own maps.
    pub competition_prefix: String,
    /// Title prefix of the disallowed map pack (case sensitive).
    pub pack_prefix: String,
    /// Title prefix of the disallowed map category (case insensitive).
    pub category_prefix: String,
    /// Login whose maps belong to another event.
    pub excluded_login: Option<String>,
    pub nickname_policy: NicknamePolicy,
}

impl Default for AnalysisRules {
    fn default() -> Self {
        AnalysisRules {
            min_maps_per_author: 5,
            min_votes_per_map: 5,
            top_n: 10,
            competition_prefix: "RHQ BONK CUP".to_string(),
            pack_prefix: "SNEKULA".to_string(),
            category_prefix: "snekeground".to_string(),
            excluded_login: Some("Phil-622".to_string()),
            nickname_policy: NicknamePolicy::First,
        }
    }
}
