mod credential;
mod ids;
mod playlist;
mod track;
mod user;

pub use credential::Credential;
pub use ids::{PlaylistId, TrackId};
pub use playlist::{Playlist, PlaylistDetails};
pub use track::Track;
pub use user::User;
