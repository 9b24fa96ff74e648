pub mod film_service;
pub use film_service::{FilmError, FilmService};

pub mod film_service_impl;
pub use film_service_impl::DefaultFilmService;

pub mod user_service;
pub use user_service::{UserError, UserService};

pub mod user_service_impl;
pub use user_service_impl::DefaultUserService;
