pub mod media_repo;
pub mod screen_repo;

pub use media_repo::MediaRepo;
pub use screen_repo::ScreenRepo;
