pub mod prelude;

pub mod film_genre;
pub mod films;
pub mod friendships;
pub mod genres;
pub mod likes;
pub mod mpa_ratings;
pub mod user_friends;
pub mod users;
