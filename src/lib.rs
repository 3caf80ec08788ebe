//! Deck planning core
//!
//! Lays out a schematic top-down preview of a residential deck and drives
//! the request/response cycle with the generative service that produces its
//! bill of materials.

pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod layout;
pub mod models;
pub mod request;
pub mod response;
pub mod svg;

pub use app::{AppState, Completion, PendingRequest, Planner, RequestStatus};
pub use client::{GeminiClient, MaterialModel};
pub use config::PlannerConfig;
pub use error::{PlannerError, Result};
pub use layout::{DEFAULT_PADDING, LayoutGeometry, compute_layout, preview_area};
pub use models::{DeckDimensions, DeckMaterial, MaterialCatalog, MaterialCategory, MaterialItem};
pub use request::{MaterialRequest, build_request};
pub use response::{parse_response, render_catalog};
