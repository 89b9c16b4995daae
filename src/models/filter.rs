//! Filter criteria applied to the browse view.

use serde::{Deserialize, Serialize};

/// Attribute filter chosen by the user. All fields optional; all absent
/// means no filter is active.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub genre_id: Option<u64>,
    pub year: Option<u16>,
    /// Inclusive lower bound on the average rating.
    pub minimum_rating: Option<f32>,
}

/// Remote discovery query implied by a set of criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RemoteFilter {
    Genre(u64),
    Year(u16),
}

impl FilterCriteria {
    /// Criteria with only a genre set.
    pub fn genre(genre_id: u64) -> Self {
        Self {
            genre_id: Some(genre_id),
            ..Self::default()
        }
    }

    /// Criteria with only a release year set.
    pub fn year(year: u16) -> Self {
        Self {
            year: Some(year),
            ..Self::default()
        }
    }

    /// Criteria with only a minimum rating set.
    pub fn minimum_rating(rating: f32) -> Self {
        Self {
            minimum_rating: Some(rating),
            ..Self::default()
        }
    }

    /// Add a minimum rating to these criteria.
    pub fn with_minimum_rating(mut self, rating: f32) -> Self {
        self.minimum_rating = Some(rating);
        self
    }

    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.genre_id.is_none() && self.year.is_none() && self.minimum_rating.is_none()
    }

    /// The remote query these criteria require, if any. Genre wins over year.
    pub fn remote_query(&self) -> Option<RemoteFilter> {
        match (self.genre_id, self.year) {
            (Some(genre_id), _) => Some(RemoteFilter::Genre(genre_id)),
            (None, Some(year)) => Some(RemoteFilter::Year(year)),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_criteria() {
        assert!(FilterCriteria::default().is_empty());
        assert!(!FilterCriteria::minimum_rating(7.0).is_empty());
        assert_eq!(FilterCriteria::default().remote_query(), None);
    }

    #[test]
    fn test_genre_wins_over_year() {
        let criteria = FilterCriteria {
            genre_id: Some(28),
            year: Some(2020),
            minimum_rating: None,
        };
        assert_eq!(criteria.remote_query(), Some(RemoteFilter::Genre(28)));
        assert_eq!(
            FilterCriteria::year(2020).remote_query(),
            Some(RemoteFilter::Year(2020))
        );
    }

    #[test]
    fn test_rating_only_needs_no_remote_query() {
        assert_eq!(FilterCriteria::minimum_rating(5.0).remote_query(), None);
        assert_eq!(
            FilterCriteria::genre(12).with_minimum_rating(6.0).remote_query(),
            Some(RemoteFilter::Genre(12))
        );
    }
}
