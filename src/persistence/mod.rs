pub mod db;
pub mod error;
pub mod metadata;
pub mod paths;
pub mod repository;

pub use db::Database;
pub use error::StoreError;
pub use metadata::{load_metadata, save_metadata, AppMetadata};
pub use paths::{atomic_write, db_file, ensure_data_dir, get_data_dir, init_local_slate, meta_file};
pub use repository::TaskRepository;
