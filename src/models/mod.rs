//! Data models.

pub mod config;
pub mod filter;
pub mod movie;
pub mod session;

pub use filter::{FilterCriteria, RemoteFilter};
pub use movie::{
    CastMember, Credits, CrewMember, Genre, GenreList, MovieDetail, MoviePage, MovieSummary,
    Video, VideoList,
};
pub use session::{Theme, UserProfile};
