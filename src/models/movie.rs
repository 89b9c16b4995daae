//! Movie catalog data model.

use serde::{Deserialize, Deserializer, Serialize};

/// Movie as it appears in list endpoints (trending, search, discover).
///
/// Field names follow the catalog's wire format so that persisted
/// favorites stay readable by any client of the same store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Release date, possibly partial ("2024", "2024-05") or absent.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub release_date: Option<String>,
    /// Average rating (0.0-10.0).
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
}

impl MovieSummary {
    /// Release year parsed from the (possibly partial) release date.
    pub fn release_year(&self) -> Option<u16> {
        release_year(self.release_date.as_deref())
    }
}

/// Genre reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// Genre list response.
#[derive(Debug, Deserialize)]
pub struct GenreList {
    pub genres: Vec<Genre>,
}

/// One page of a paginated list endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MoviePage {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(rename = "results")]
    pub items: Vec<MovieSummary>,
    #[serde(default)]
    pub total_pages: u32,
}

fn first_page() -> u32 {
    1
}

/// Movie details with credits and videos appended.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieDetail {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub vote_count: Option<u32>,
    pub runtime: Option<u32>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub credits: Option<Credits>,
    #[serde(default)]
    pub videos: Option<VideoList>,
}

impl MovieDetail {
    /// Reduce the detail to the summary shape stored in favorites.
    pub fn summary(&self) -> MovieSummary {
        MovieSummary {
            id: self.id,
            title: self.title.clone(),
            poster_path: self.poster_path.clone(),
            release_date: self.release_date.clone(),
            vote_average: self.vote_average,
            genre_ids: self.genres.iter().map(|g| g.id).collect(),
        }
    }

    /// Release year parsed from the (possibly partial) release date.
    pub fn release_year(&self) -> Option<u16> {
        release_year(self.release_date.as_deref())
    }

    /// Embedded video list, empty when the response carried none.
    pub fn video_list(&self) -> &[Video] {
        self.videos
            .as_ref()
            .map(|v| v.results.as_slice())
            .unwrap_or(&[])
    }

    /// Names of the crew members credited as director.
    pub fn directors(&self) -> Vec<&str> {
        self.credits
            .as_ref()
            .map(|c| {
                c.crew
                    .iter()
                    .filter(|m| m.job == "Director")
                    .map(|m| m.name.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Top-billed cast members, in billing order.
    pub fn top_cast(&self, limit: usize) -> Vec<&CastMember> {
        let Some(credits) = self.credits.as_ref() else {
            return Vec::new();
        };
        let mut cast: Vec<&CastMember> = credits.cast.iter().collect();
        cast.sort_by_key(|m| m.order.unwrap_or(u32::MAX));
        cast.truncate(limit);
        cast
    }
}

/// Movie credits.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

/// Cast member.
#[derive(Debug, Clone, Deserialize)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    pub character: Option<String>,
    pub order: Option<u32>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// Crew member.
#[derive(Debug, Clone, Deserialize)]
pub struct CrewMember {
    pub id: u64,
    pub name: String,
    pub job: String,
    pub department: String,
}

/// Embedded video list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoList {
    #[serde(default)]
    pub results: Vec<Video>,
}

/// Video attached to a movie (trailer, teaser, clip...).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Video {
    pub key: String,
    #[serde(default)]
    pub name: String,
    pub site: String,
    #[serde(rename = "type")]
    pub video_type: String,
}

/// Year prefix of a full or partial ISO date.
fn release_year(date: Option<&str>) -> Option<u16> {
    date?.split('-').next()?.parse().ok()
}

/// The catalog sends `""` for unknown release dates.
fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_tolerates_missing_fields() {
        let json = r#"{"id": 42, "title": "Heat", "release_date": ""}"#;
        let movie: MovieSummary = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, 42);
        assert_eq!(movie.release_date, None);
        assert_eq!(movie.vote_average, 0.0);
        assert!(movie.genre_ids.is_empty());
    }

    #[test]
    fn test_release_year_partial_dates() {
        assert_eq!(release_year(Some("1995-12-15")), Some(1995));
        assert_eq!(release_year(Some("2024-05")), Some(2024));
        assert_eq!(release_year(Some("2024")), Some(2024));
        assert_eq!(release_year(Some("unknown")), None);
        assert_eq!(release_year(None), None);
    }

    #[test]
    fn test_page_parses_results_and_total() {
        let json = r#"{
            "page": 2,
            "results": [{"id": 1, "title": "A", "vote_average": 7.1, "genre_ids": [28, 12]}],
            "total_pages": 5,
            "total_results": 100
        }"#;
        let page: MoviePage = serde_json::from_str(json).unwrap();
        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 5);
        assert_eq!(page.items[0].genre_ids, vec![28, 12]);
    }

    #[test]
    fn test_detail_summary_and_credits() {
        let json = r#"{
            "id": 949,
            "title": "Heat",
            "release_date": "1995-12-15",
            "vote_average": 7.9,
            "runtime": 170,
            "overview": "Obsessive master thief...",
            "genres": [{"id": 80, "name": "Crime"}, {"id": 18, "name": "Drama"}],
            "credits": {
                "cast": [
                    {"id": 2, "name": "Robert De Niro", "character": "Neil", "order": 1},
                    {"id": 1, "name": "Al Pacino", "character": "Vincent", "order": 0}
                ],
                "crew": [
                    {"id": 3, "name": "Michael Mann", "job": "Director", "department": "Directing"},
                    {"id": 4, "name": "Dante Spinotti", "job": "Director of Photography", "department": "Camera"}
                ]
            },
            "videos": {"results": [{"key": "abc", "name": "Trailer", "site": "YouTube", "type": "Trailer"}]}
        }"#;
        let detail: MovieDetail = serde_json::from_str(json).unwrap();
        let summary = detail.summary();
        assert_eq!(summary.genre_ids, vec![80, 18]);
        assert_eq!(detail.release_year(), Some(1995));
        assert_eq!(detail.directors(), vec!["Michael Mann"]);
        let cast: Vec<&str> = detail.top_cast(5).iter().map(|m| m.name.as_str()).collect();
        assert_eq!(cast, vec!["Al Pacino", "Robert De Niro"]);
        assert_eq!(detail.video_list().len(), 1);
    }
}
