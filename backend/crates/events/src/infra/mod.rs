//! Infrastructure Layer

pub mod fs;
pub mod postgres;

pub use fs::FsPhotoStore;
pub use postgres::PgEventsRepository;
