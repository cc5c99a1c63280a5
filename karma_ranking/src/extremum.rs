use log::debug;

use crate::config::*;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
enum Extremum {
    Min,
    Max,
}

/// All the maps sharing the lowest raw karma among the maps with at least `min_votes` votes.
pub fn worst_maps(records: &[Record], min_votes: u64) -> Result<ExtremeMaps, AnalysisErrors> {
    extreme_maps(records, min_votes, Extremum::Min)
}

/// All the maps sharing the highest raw karma among the maps with at least `min_votes` votes.
pub fn best_maps(records: &[Record], min_votes: u64) -> Result<ExtremeMaps, AnalysisErrors> {
    extreme_maps(records, min_votes, Extremum::Max)
}

fn extreme_maps(
    records: &[Record],
    min_votes: u64,
    extremum: Extremum,
) -> Result<ExtremeMaps, AnalysisErrors> {
    let voted: Vec<MapEntry> = records
        .iter()
        .filter_map(|r| match (r.average_karma, r.number_of_votes) {
            (Some(karma), Some(votes)) if votes >= min_votes && karma.is_finite() => Some(MapEntry {
                row: r.row,
                name: r.name.clone(),
                author: r.author_nickname.clone(),
                average_karma: karma,
                number_of_votes: votes,
            }),
            _ => None,
        })
        .collect();

    let karmas = voted.iter().map(|m| m.average_karma);
    let target = match extremum {
        Extremum::Min => karmas.reduce(f64::min),
        Extremum::Max => karmas.reduce(f64::max),
    }
    .ok_or(AnalysisErrors::EmptyResult {
        what: format!("{:?} karma of the maps with {}+ votes", extremum, min_votes),
    })?;

    let maps: Vec<MapEntry> = voted
        .into_iter()
        .filter(|m| m.average_karma == target)
        .collect();
    debug!(
        "extreme_maps: {:?}: karma {} shared by {} maps",
        extremum,
        target,
        maps.len()
    );
    Ok(ExtremeMaps {
        average_karma: target,
        maps,
    })
}
