//! Generation Session — runs composed instructions against the text backend and owns
//! the two-call refinement protocol.
//!
//! Flow: generate_initial(jd, not_filters) → (result, Session)
//!       generate_refined(&Session, context) → refined result
//!
//! The refined call has no JD or NOT-filter parameters of its own; it reads them from
//! the Session captured by the initiating call.

use std::sync::Arc;

use tracing::info;

use crate::boolean::composer::GenerationRequest;
use crate::boolean::session::Session;
use crate::errors::AppError;
use crate::llm_client::TextBackend;

/// Fixed sampling temperature for both passes. Non-zero for phrasing variety.
pub const SAMPLING_TEMPERATURE: f32 = 0.4;

/// Output of a successful first pass: the raw backend text and the captured session.
#[derive(Debug, Clone)]
pub struct InitialGeneration {
    pub session: Session,
    pub result: String,
}

#[derive(Clone)]
pub struct BooleanGenerator {
    backend: Arc<dyn TextBackend>,
}

impl BooleanGenerator {
    pub fn new(backend: Arc<dyn TextBackend>) -> Self {
        Self { backend }
    }

    /// First pass: buckets come from the JD.
    ///
    /// Returns `EmptyInput` without touching the backend when `jd` is blank. The
    /// session is only created after the backend succeeds.
    pub async fn generate_initial(
        &self,
        jd: &str,
        not_filters: &str,
    ) -> Result<InitialGeneration, AppError> {
        if jd.trim().is_empty() {
            return Err(AppError::EmptyInput("jd_text cannot be empty".to_string()));
        }

        let request = GenerationRequest::compose(jd, not_filters, None);
        let result = self.run(&request).await?;

        let session = Session::capture(jd, not_filters);
        info!("Initial Boolean generated, session {} opened", session.id);

        Ok(InitialGeneration { session, result })
    }

    /// Refinement: buckets come strictly from `context`; the session's JD only
    /// supplies synonyms. The result replaces the earlier one, it is not merged.
    pub async fn generate_refined(
        &self,
        session: &Session,
        context: &str,
    ) -> Result<String, AppError> {
        if context.trim().is_empty() {
            return Err(AppError::EmptyInput("context cannot be empty".to_string()));
        }

        let request =
            GenerationRequest::compose(&session.jd_text, &session.not_filters, Some(context));
        let result = self.run(&request).await?;

        info!("Refined Boolean generated for session {}", session.id);
        Ok(result)
    }

    async fn run(&self, request: &GenerationRequest) -> Result<String, AppError> {
        info!(
            "Calling backend: mode={:?}, instruction_len={}",
            request.mode,
            request.instruction.len()
        );
        let text = self
            .backend
            .complete(&request.instruction, SAMPLING_TEMPERATURE)
            .await?;
        Ok(text)
    }
}
