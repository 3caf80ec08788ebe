//! Application state and the material generation cycle
//!
//! `AppState` is the single owner of the deck dimensions and the current
//! bill of materials. Every change is a whole-value replacement made through
//! one of its transition methods.

use tracing::{error, info, warn};

use crate::client::MaterialModel;
use crate::error::Result;
use crate::layout::{LayoutGeometry, compute_layout};
use crate::models::{DeckDimensions, MaterialCatalog};
use crate::request::{MaterialRequest, build_request};
use crate::response::{CatalogSummary, parse_response};

/// Where the material request cycle stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Failed,
}

/// A generation that has been started and awaits its response.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub seq: u64,
    pub request: MaterialRequest,
}

/// What happened to a response handed back to the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The catalog was replaced.
    Applied,
    /// The request failed; the previous catalog was kept.
    Failed,
    /// The response was for a request that is no longer current.
    Discarded,
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    dimensions: DeckDimensions,
    catalog: Option<MaterialCatalog>,
    catalog_dimensions: Option<DeckDimensions>,
    status: RequestStatus,
    error: Option<String>,
    latest_seq: u64,
    pending_dimensions: Option<DeckDimensions>,
}

impl AppState {
    pub fn new(dimensions: DeckDimensions) -> Self {
        Self {
            dimensions: dimensions.clamp_to_ranges(),
            ..Self::default()
        }
    }

    pub fn dimensions(&self) -> &DeckDimensions {
        &self.dimensions
    }

    pub fn catalog(&self) -> Option<&MaterialCatalog> {
        self.catalog.as_ref()
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    /// Banner text, if an error is showing.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.status == RequestStatus::Loading
    }

    /// True when the catalog was generated for different dimensions than the
    /// ones currently entered.
    pub fn catalog_is_stale(&self) -> bool {
        match &self.catalog_dimensions {
            Some(generated_for) => *generated_for != self.dimensions,
            None => false,
        }
    }

    /// Replace the dimensions. Allowed in every state; values are clamped
    /// into the practical ranges.
    pub fn set_dimensions(&mut self, dimensions: DeckDimensions) {
        self.dimensions = dimensions.clamp_to_ranges();
    }

    /// Geometry for the current dimensions in the given drawing area.
    pub fn layout(&self, area_width: f64, area_height: f64, padding: f64) -> LayoutGeometry {
        compute_layout(&self.dimensions, area_width, area_height, padding)
    }

    /// Start a generation. Returns `None` while another one is outstanding.
    pub fn begin_generate(&mut self) -> Option<PendingRequest> {
        if self.is_loading() {
            warn!(seq = self.latest_seq, "Generation already in flight, ignoring");
            return None;
        }

        self.latest_seq += 1;
        self.status = RequestStatus::Loading;
        self.error = None;
        self.pending_dimensions = Some(self.dimensions.clone());

        info!(seq = self.latest_seq, "Generating material list");
        Some(PendingRequest {
            seq: self.latest_seq,
            request: build_request(&self.dimensions),
        })
    }

    /// Hand back the outcome of request `seq`.
    ///
    /// Only the latest issued request, while still loading, may change state.
    /// On failure the previous catalog stays exactly as it was.
    pub fn complete(&mut self, seq: u64, outcome: Result<MaterialCatalog>) -> Completion {
        if seq != self.latest_seq || !self.is_loading() {
            warn!(
                seq,
                latest = self.latest_seq,
                status = ?self.status,
                "Discarding stale material response"
            );
            return Completion::Discarded;
        }

        let generated_for = self.pending_dimensions.take();
        match outcome {
            Ok(catalog) => {
                let summary = CatalogSummary::of(&catalog);
                info!(
                    seq,
                    categories = summary.categories,
                    items = summary.items,
                    "Material list ready"
                );
                self.catalog = Some(catalog);
                self.catalog_dimensions = generated_for;
                self.status = RequestStatus::Success;
                self.error = None;
                Completion::Applied
            }
            Err(err) => {
                error!(
                    seq,
                    retryable = err.is_retryable(),
                    "Material generation failed: {err}"
                );
                self.status = RequestStatus::Failed;
                self.error = Some(err.user_message());
                Completion::Failed
            }
        }
    }

    /// Like [`complete`](Self::complete), but parses raw response text first.
    pub fn resolve_raw(&mut self, seq: u64, raw: Result<String>) -> Completion {
        let outcome = raw.and_then(|text| parse_response(&text));
        self.complete(seq, outcome)
    }

    /// Clear the error banner. A catalog from an earlier success stays.
    pub fn dismiss_error(&mut self) {
        if self.status == RequestStatus::Failed {
            self.status = RequestStatus::Idle;
        }
        self.error = None;
    }
}

/// Runs generation cycles against a material model.
pub struct Planner<M: MaterialModel> {
    state: AppState,
    model: M,
}

impl<M: MaterialModel> Planner<M> {
    pub fn new(model: M, dimensions: DeckDimensions) -> Self {
        Self {
            state: AppState::new(dimensions),
            model,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn into_model(self) -> M {
        self.model
    }

    /// Run one full generation: build the request, call the model and apply
    /// the result.
    pub fn generate(&mut self) -> Completion {
        let Some(pending) = self.state.begin_generate() else {
            return Completion::Discarded;
        };

        let raw = self.model.generate(&pending.request);
        self.state.resolve_raw(pending.seq, raw)
    }
}
