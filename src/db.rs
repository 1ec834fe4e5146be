pub mod document_store;
pub use document_store::{DocumentStore, Filter};
pub mod memory_store;
pub use memory_store::MemoryDocumentStore;
pub mod pg_store;
pub use pg_store::PgDocumentStore;

pub mod user_repo;
pub use user_repo::UserRepository;
pub mod complaint_repo;
pub use complaint_repo::ComplaintRepository;
pub mod content_repo;
pub use content_repo::ContentRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
