pub mod backend;
pub mod catalog;
pub mod config;
pub mod extraction;
pub mod fallback;
pub mod models;
pub mod prompt;
pub mod reading_lists;
pub mod recommender;
pub mod service;
pub mod tasks;
pub mod workflow;

pub use backend::{BackendError, GenerativeBackend};
pub use catalog::{Book, BookDetails, Catalog};
pub use config::{FallbackMarkerPolicy, RecommenderOptions, ServiceConfig};
pub use models::*;
pub use recommender::Recommender;
pub use service::{AppState, build_router, create_app};
