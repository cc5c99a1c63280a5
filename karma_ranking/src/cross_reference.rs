use log::{debug, warn};

use crate::aggregate::{find_count, find_rating};
use crate::config::*;

/// The rating of each of the `top_n` authors with the most maps, in count order.
///
/// Authors without a rating get a `MissingData` entry instead of a default value.
pub fn rating_of_top_mappers(
    counts: &[AuthorCount],
    ratings: &[AuthorRating],
    top_n: usize,
) -> Vec<RatingOfTopMapper> {
    counts
        .iter()
        .take(top_n)
        .map(|ac| {
            let rating = find_rating(ratings, &ac.author).ok_or_else(|| {
                warn!(
                    "rating_of_top_mappers: {} ({} maps) has no rating",
                    ac.author, ac.count
                );
                AnalysisErrors::MissingData {
                    author: ac.author.clone(),
                    ranking: "rating".to_string(),
                }
            });
            RatingOfTopMapper {
                author: ac.author.clone(),
                count: ac.count,
                rating,
            }
        })
        .collect()
}

/// The map count of each of the `top_n` best rated authors, in rating order.
///
/// Every rated author has a count, the error is a programming error.
pub fn count_of_top_rated_mappers(
    counts: &[AuthorCount],
    ratings: &[AuthorRating],
    top_n: usize,
) -> Result<Vec<CountOfTopRatedMapper>, AnalysisErrors> {
    let mut res: Vec<CountOfTopRatedMapper> = Vec::new();
    for ar in ratings.iter().take(top_n) {
        let count = find_count(counts, &ar.author).ok_or(AnalysisErrors::MissingData {
            author: ar.author.clone(),
            ranking: "count".to_string(),
        })?;
        debug!(
            "count_of_top_rated_mappers: {}: {} -> {}",
            ar.author, ar.rating, count
        );
        res.push(CountOfTopRatedMapper {
            author: ar.author.clone(),
            rating: ar.rating,
            count,
        });
    }
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(author: &str, count: u64) -> AuthorCount {
        AuthorCount {
            author: author.to_string(),
            count,
        }
    }

    fn rating(author: &str, rating: f64) -> AuthorRating {
        AuthorRating {
            author: author.to_string(),
            rating,
            rated_maps: 5,
        }
    }

    #[test]
    fn missing_rating_is_reported() {
        let counts = vec![count("a", 9), count("b", 6), count("c", 5)];
        let ratings = vec![rating("c", 8.0), rating("a", 6.5)];
        let res = rating_of_top_mappers(&counts, &ratings, 10);
        assert_eq!(res.len(), 3);
        assert_eq!(res[0].rating, Ok(6.5));
        assert_eq!(
            res[1].rating,
            Err(AnalysisErrors::MissingData {
                author: "b".to_string(),
                ranking: "rating".to_string()
            })
        );
        assert_eq!(res[2].rating, Ok(8.0));
    }

    #[test]
    fn reports_follow_the_primary_ranking() {
        let counts = vec![count("a", 9), count("b", 6), count("c", 5)];
        let ratings = vec![rating("c", 8.0), rating("b", 7.0), rating("a", 6.5)];
        let res = count_of_top_rated_mappers(&counts, &ratings, 2).unwrap();
        let got: Vec<(&str, u64)> = res.iter().map(|r| (r.author.as_str(), r.count)).collect();
        assert_eq!(got, vec![("c", 5), ("b", 6)]);
        assert_eq!(rating_of_top_mappers(&counts, &ratings, 1).len(), 1);
    }
}
