pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod seed;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryRepository;
pub use models::{Department, Student};
pub use postgres::PgRepository;
pub use repository::{Entity, Repository, SqlValue, StudentRepository};
