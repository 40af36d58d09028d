//! Storage layer

pub mod credential_store;
pub mod memory;
pub mod task_repo;
pub mod user_repo;

pub use credential_store::CredentialStore;
pub use memory::InMemoryCredentialStore;
pub use task_repo::TaskStore;
pub use user_repo::PgCredentialStore;
