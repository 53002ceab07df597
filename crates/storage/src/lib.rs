#![forbid(unsafe_code)]

pub mod auth;
pub mod demo;
pub mod repository;
pub mod rest;

pub use auth::{AuthError, AuthGateway, AuthSession, InMemoryAuth, SignUpOutcome};
pub use repository::{
    CatalogRepository, InMemoryRepository, ProfileRepository, ProgressRepository, Storage,
    StorageError,
};
pub use rest::{SupabaseAuth, SupabaseClient, SupabaseConfig};
