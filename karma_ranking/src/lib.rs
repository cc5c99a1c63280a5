mod aggregate;
pub mod builder;
mod config;
mod cross_reference;
mod extremum;
mod filter;
pub mod manual;

use log::{debug, info, warn};

pub use crate::aggregate::{count_by_author, rating_by_author, rescale_karma};
pub use crate::config::*;
pub use crate::cross_reference::{count_of_top_rated_mappers, rating_of_top_mappers};
pub use crate::extremum::{best_maps, worst_maps};
pub use crate::filter::{canonicalize_nicknames, exclusion_rules, filter_records, ExclusionRule};

/// Checks that the rules can be used, and compiles the exclusion rules.
pub fn check_rules(rules: &AnalysisRules) -> Result<Vec<ExclusionRule>, AnalysisErrors> {
    if rules.min_maps_per_author == 0 {
        return Err(AnalysisErrors::InvalidRules(
            "min_maps_per_author must be at least 1".to_string(),
        ));
    }
    if rules.top_n == 0 {
        return Err(AnalysisErrors::InvalidRules(
            "top_n must be at least 1".to_string(),
        ));
    }
    exclusion_rules(rules)
}

/// Runs the whole analysis on the given records.
///
/// Arguments:
/// * `records` the map submissions, in the order of the source. The order matters for the
/// choice of the nickname of each author.
/// * `rules` the thresholds and exclusion rules of the analysis
///
/// Missing cross references and empty extremum searches are reported inside the returned
/// `Analysis`: the caller decides if they are fatal.
pub fn run_analysis(records: &[Record], rules: &AnalysisRules) -> Result<Analysis, AnalysisErrors> {
    info!(
        "run_analysis: processing {:?} records, rules: {:?}",
        records.len(),
        rules
    );
    let exclusion_rules = check_rules(rules)?;

    let (filtered, filter_stats) = filter_records(records, &exclusion_rules, rules.nickname_policy);
    info!(
        "run_analysis: kept {} of {} records",
        filter_stats.kept_rows, filter_stats.input_rows
    );
    for (kind, count) in filter_stats.removed.iter() {
        info!("run_analysis: removed {} records: {}", count, kind.label());
    }
    for r in filtered.iter() {
        if !r.is_complete() {
            warn!(
                "run_analysis: row {} ({:?}) has no karma or vote count, it is not rated",
                r.row, r.name
            );
        }
        if r.author_nickname.is_none() {
            warn!(
                "run_analysis: row {} ({:?}) has no author nickname, it is not counted",
                r.row, r.name
            );
        }
    }

    let count_ranking = count_by_author(&filtered);
    debug!("run_analysis: count ranking: {:?}", count_ranking);
    let rating_ranking = rating_by_author(&filtered, &count_ranking, rules);
    debug!("run_analysis: rating ranking: {:?}", rating_ranking);

    let rating_of_top_mappers = rating_of_top_mappers(&count_ranking, &rating_ranking, rules.top_n);
    let count_of_top_rated_mappers =
        count_of_top_rated_mappers(&count_ranking, &rating_ranking, rules.top_n)?;

    let worst_maps = worst_maps(&filtered, rules.min_votes_per_map);
    let best_maps = best_maps(&filtered, rules.min_votes_per_map);
    if let Err(e) = &worst_maps {
        warn!("run_analysis: {}", e);
    }

    Ok(Analysis {
        filter_stats,
        count_ranking,
        rating_ranking,
        rating_of_top_mappers,
        count_of_top_rated_mappers,
        worst_maps,
        best_maps,
    })
}
