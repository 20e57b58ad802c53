//! HTTP layer for the interview question bank.
//!
//! One route group per resource, all under the API root:
//!
//! | Method           | Path                                | Notes                       |
//! |------------------|-------------------------------------|-----------------------------|
//! | GET/POST         | `/topics`, `/techstacks`, `/questions` | list (paginated) / create |
//! | GET/PUT/PATCH    | `/<resource>/{id}`                  | retrieve / update           |
//! | DELETE           | `/<resource>/{id}`                  | soft delete                 |
//! | POST             | `/<resource>/{id}/restore`          | restore a soft-deleted row  |
//! | POST             | `/questions/{id}/increment-usage`   | bump the usage counter      |
//!
//! List endpoints accept `search`, `is_active`, `ordering`, `page` and
//! `page_size`; questions additionally accept `topic_name`, `difficulty`
//! and `source`. Destroy and restore on topics and tech stacks require an
//! admin bearer token.

pub mod auth;
pub mod config;
pub mod error;
pub mod pagination;
pub mod question;
pub mod router;
pub mod state;
pub mod techstack;
pub mod topic;
pub mod tracing;

pub use config::ApiConfig;
pub use state::{ApiState, AuthConfig};
