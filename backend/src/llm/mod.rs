//! Boundary to the external plan-generation service.
//!
//! The routine workflow only sees the [`GenerationService`] trait; the
//! concrete Gemini client lives behind it so tests can substitute a stub.

mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;

use wellspace_common::RoutineDay;

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Generation service error: {0}")]
    Service(String),
}

#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Request a routine plan sized to `free_minutes` of free time per
    /// day. The returned days are well-formed and ordered, but the count
    /// is whatever the service produced.
    async fn generate_routine_plan(
        &self,
        free_minutes: u32,
    ) -> Result<Vec<RoutineDay>, GenerationError>;
}
