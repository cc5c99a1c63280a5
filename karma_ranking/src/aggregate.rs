use log::debug;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::config::*;

/// Maps the nominal [-1, 1] karma to a [0, 10] rating.
pub fn rescale_karma(average_karma: f64) -> f64 {
    (average_karma + 1.0) * 5.0
}

/// Number of maps per author, by decreasing count.
///
/// Authors with the same count stay in the order in which they first appear in the records.
/// Records without a nickname are not counted.
pub fn count_by_author(records: &[Record]) -> Vec<AuthorCount> {
    // author -> (first position, count)
    let mut counts: HashMap<&str, (usize, u64)> = HashMap::new();
    for (idx, r) in records.iter().enumerate() {
        if let Some(author) = r.author_nickname.as_deref() {
            counts.entry(author).or_insert((idx, 0)).1 += 1;
        }
    }

    let mut res: Vec<(usize, AuthorCount)> = counts
        .into_iter()
        .map(|(author, (first, count))| {
            (
                first,
                AuthorCount {
                    author: author.to_string(),
                    count,
                },
            )
        })
        .collect();
    res.sort_by_key(|(first, _)| *first);
    // Stable: keeps the first appearance order for the ties.
    res.sort_by(|(_, a), (_, b)| b.count.cmp(&a.count));
    res.into_iter().map(|(_, ac)| ac).collect()
}

/// Mean rescaled rating per author, by decreasing rating.
///
/// Only the authors with at least `min_maps_per_author` maps in `counts` are rated, and only
/// their maps with at least `min_votes_per_map` votes and a known karma contribute.
/// An author left with no contributing map is absent from the result.
/// Authors with the same rating are sorted by name.
pub fn rating_by_author(
    records: &[Record],
    counts: &[AuthorCount],
    rules: &AnalysisRules,
) -> Vec<AuthorRating> {
    let valid_authors: HashSet<&str> = counts
        .iter()
        .filter(|ac| ac.count >= rules.min_maps_per_author)
        .map(|ac| ac.author.as_str())
        .collect();
    debug!(
        "rating_by_author: {} authors with {}+ maps",
        valid_authors.len(),
        rules.min_maps_per_author
    );

    let mut sums: BTreeMap<&str, (f64, u64)> = BTreeMap::new();
    for r in records.iter() {
        let author = match r.author_nickname.as_deref() {
            Some(a) if valid_authors.contains(a) => a,
            _ => continue,
        };
        match (r.average_karma, r.number_of_votes) {
            (Some(karma), Some(votes))
                if votes >= rules.min_votes_per_map && karma.is_finite() =>
            {
                let e = sums.entry(author).or_insert((0.0, 0));
                e.0 += rescale_karma(karma);
                e.1 += 1;
            }
            _ => {}
        }
    }

    for author in valid_authors.iter() {
        if !sums.contains_key(author) {
            debug!(
                "rating_by_author: {} has no map with {}+ votes",
                author, rules.min_votes_per_map
            );
        }
    }

    let mut res: Vec<AuthorRating> = sums
        .into_iter()
        .map(|(author, (sum, n))| AuthorRating {
            author: author.to_string(),
            rating: sum / n as f64,
            rated_maps: n,
        })
        .collect();
    res.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    res
}

pub fn find_count(counts: &[AuthorCount], author: &str) -> Option<u64> {
    counts.iter().find(|ac| ac.author == author).map(|ac| ac.count)
}

pub fn find_rating(ratings: &[AuthorRating], author: &str) -> Option<f64> {
    ratings
        .iter()
        .find(|ar| ar.author == author)
        .map(|ar| ar.rating)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maps(author: &str, karmas: &[(f64, u64)]) -> Vec<Record> {
        karmas
            .iter()
            .enumerate()
            .map(|(idx, (k, v))| Record::new(&format!("{} {}", author, idx), author, author, *k, *v))
            .collect()
    }

    #[test]
    fn rescale() {
        assert_eq!(rescale_karma(0.0), 5.0);
        assert_eq!(rescale_karma(-1.0), 0.0);
        assert_eq!(rescale_karma(1.0), 10.0);
    }

    #[test]
    fn counts_are_sorted_and_stable() {
        let mut records = maps("b", &[(0.0, 5)]);
        records.extend(maps("a", &[(0.0, 5), (0.0, 5)]));
        records.extend(maps("c", &[(0.0, 5)]));
        let counts = count_by_author(&records);
        let names: Vec<(&str, u64)> = counts.iter().map(|c| (c.author.as_str(), c.count)).collect();
        assert_eq!(names, vec![("a", 2), ("b", 1), ("c", 1)]);
        assert_eq!(counts.iter().map(|c| c.count).sum::<u64>(), records.len() as u64);
    }

    #[test]
    fn anonymous_records_are_not_counted() {
        let mut r = Record::new("x", "l", "", 0.0, 5);
        r.author_nickname = None;
        assert!(count_by_author(&[r]).is_empty());
    }

    #[test]
    fn rating_thresholds() {
        let rules = AnalysisRules::default();
        // Enough maps, all voted.
        let mut records = maps("good", &[(0.0, 5), (0.2, 9), (0.4, 6), (0.6, 10), (0.8, 5)]);
        // Too few maps.
        records.extend(maps("few", &[(1.0, 50), (1.0, 50)]));
        // Enough maps, but only 3 with enough votes.
        records.extend(maps(
            "sparse",
            &[(1.0, 5), (1.0, 5), (1.0, 5), (-1.0, 4), (-1.0, 0), (-1.0, 1)],
        ));
        // Enough maps, none voted.
        records.extend(maps("silent", &[(0.0, 1); 5]));
        let counts = count_by_author(&records);
        let ratings = rating_by_author(&records, &counts, &rules);

        let names: Vec<&str> = ratings.iter().map(|r| r.author.as_str()).collect();
        assert_eq!(names, vec!["sparse", "good"]);
        assert!((ratings[0].rating - 10.0).abs() < 1e-9);
        assert_eq!(ratings[0].rated_maps, 3);
        assert!((ratings[1].rating - 7.0).abs() < 1e-9);
        assert_eq!(find_rating(&ratings, "silent"), None);
        assert_eq!(find_count(&counts, "silent"), Some(5));
    }

    #[test]
    fn rating_ties_are_sorted_by_name() {
        let mut records = maps("zed", &[(0.0, 5); 5]);
        records.extend(maps("amy", &[(0.0, 5); 5]));
        let counts = count_by_author(&records);
        let ratings = rating_by_author(&records, &counts, &AnalysisRules::default());
        let names: Vec<&str> = ratings.iter().map(|r| r.author.as_str()).collect();
        assert_eq!(names, vec!["amy", "zed"]);
    }

    #[test]
    fn incomplete_records_do_not_contribute_to_ratings() {
        let mut records = maps("a", &[(1.0, 5); 5]);
        records[0].average_karma = None;
        records[1].number_of_votes = None;
        let counts = count_by_author(&records);
        let ratings = rating_by_author(&records, &counts, &AnalysisRules::default());
        assert_eq!(ratings[0].rated_maps, 3);
    }

    #[test]
    fn non_finite_karma_does_not_contribute_to_ratings() {
        let mut records = maps("n", &[(0.0, 5); 5]);
        records[0].average_karma = Some(f64::NAN);
        records[1].average_karma = Some(f64::INFINITY);
        assert!(!records[0].is_complete());
        let counts = count_by_author(&records);
        assert_eq!(counts[0].count, 5);
        let ratings = rating_by_author(&records, &counts, &AnalysisRules::default());
        assert_eq!(ratings[0].rated_maps, 3);
        assert_eq!(ratings[0].rating, 5.0);
    }
}
