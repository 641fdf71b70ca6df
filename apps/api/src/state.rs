use crate::letters::generator::CoverLetterGenerator;
use crate::letters::reviser::Reviser;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub generator: CoverLetterGenerator,
    /// Shares the generator's provider chain; only the token cap differs.
    pub reviser: Reviser,
}
