pub mod film;
pub mod friendship;
pub mod user;

pub use film::{Film, Genre, Mpa, NewFilm};
pub use friendship::{Friendship, FriendshipStatus};
pub use user::{NewUser, User};

/// Genre reference data, seeded into every backend at initialization.
pub const GENRE_SEED: &[(i64, &str)] = &[
    (1, "Comedy"),
    (2, "Drama"),
    (3, "Cartoon"),
    (4, "Thriller"),
    (5, "Documentary"),
    (6, "Action"),
];

/// MPA rating reference data, seeded into every backend at initialization.
pub const MPA_SEED: &[(i64, &str)] = &[
    (1, "G"),
    (2, "PG"),
    (3, "PG-13"),
    (4, "R"),
    (5, "NC-17"),
];
