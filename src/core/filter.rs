//! Local filter evaluation.
//!
//! Only the rating threshold is evaluated here. Genre and year narrow the
//! result set through discovery queries issued by the catalog core.

use crate::models::{FilterCriteria, MovieSummary};

/// Apply the locally evaluable criteria to a result set.
///
/// Keeps items rated at or above `minimum_rating`, in their original order.
/// Without a rating threshold the base set is returned unchanged.
pub fn evaluate(base: &[MovieSummary], criteria: &FilterCriteria) -> Vec<MovieSummary> {
    match criteria.minimum_rating {
        Some(threshold) => base
            .iter()
            .filter(|m| m.vote_average >= threshold)
            .cloned()
            .collect(),
        None => base.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rated(id: u64, rating: f32) -> MovieSummary {
        MovieSummary {
            id,
            title: format!("Movie {}", id),
            poster_path: None,
            release_date: None,
            vote_average: rating,
            genre_ids: Vec::new(),
        }
    }

    #[test]
    fn test_threshold_is_inclusive_and_order_preserving() {
        let base = vec![rated(1, 8.0), rated(2, 6.0), rated(3, 7.0)];
        let result = evaluate(&base, &FilterCriteria::minimum_rating(7.0));
        let ids: Vec<u64> = result.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_no_threshold_returns_base() {
        let base = vec![rated(1, 2.0), rated(2, 9.5)];
        assert_eq!(evaluate(&base, &FilterCriteria::default()), base);
    }

    #[test]
    fn test_genre_and_year_are_not_evaluated_locally() {
        let base = vec![rated(1, 5.0)];
        let criteria = FilterCriteria {
            genre_id: Some(99),
            year: Some(1900),
            minimum_rating: None,
        };
        assert_eq!(evaluate(&base, &criteria), base);
    }

    #[test]
    fn test_repeated_evaluation_is_stable() {
        let base = vec![rated(1, 9.0), rated(2, 4.0)];
        let criteria = FilterCriteria::minimum_rating(5.0);
        let once = evaluate(&base, &criteria);
        assert_eq!(evaluate(&once, &criteria), once);
    }
}
