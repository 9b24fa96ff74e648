pub use super::film_genre::Entity as FilmGenre;
pub use super::films::Entity as Films;
pub use super::friendships::Entity as Friendships;
pub use super::genres::Entity as Genres;
pub use super::likes::Entity as Likes;
pub use super::mpa_ratings::Entity as MpaRatings;
pub use super::user_friends::Entity as UserFriends;
pub use super::users::Entity as Users;
