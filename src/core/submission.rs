use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::{
    error::{Result, TripError},
    services::itinerary_client::ItineraryService,
    types::{ItineraryRequest, ItineraryResponse},
};

/// Sequence number identifying one submission of a form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubmissionTicket(u64);

impl SubmissionTicket {
    pub(crate) fn new(sequence: u64) -> Self {
        Self(sequence)
    }

    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// A started submission: the ticket to settle with and the payload to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub ticket: SubmissionTicket,
    pub request: ItineraryRequest,
}

/// An in-flight request running on the tokio runtime.
///
/// Dropping the handle aborts the request.
#[derive(Debug)]
pub struct PendingRequest {
    ticket: SubmissionTicket,
    handle: JoinHandle<Result<ItineraryResponse>>,
}

impl PendingRequest {
    /// Spawn the service call for `submission`. Must be called from within a
    /// tokio runtime.
    pub fn spawn(service: Arc<dyn ItineraryService>, submission: Submission) -> Self {
        let Submission { ticket, request } = submission;
        let handle = tokio::spawn(async move { service.generate(&request).await });

        Self { ticket, handle }
    }

    pub fn ticket(&self) -> SubmissionTicket {
        self.ticket
    }

    /// True once the request has settled or been aborted
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn abort(&self) {
        debug!(ticket = self.ticket.sequence(), "Aborting pending request");
        self.handle.abort();
    }

    /// Wait for settlement. A cancelled task settles as
    /// [`TripError::Aborted`].
    pub async fn wait(mut self) -> (SubmissionTicket, Result<ItineraryResponse>) {
        let outcome = match (&mut self.handle).await {
            Ok(outcome) => outcome,
            Err(err) if err.is_cancelled() => Err(TripError::Aborted),
            Err(err) => std::panic::resume_unwind(err.into_panic()),
        };

        (self.ticket, outcome)
    }
}

impl Drop for PendingRequest {
    fn drop(&mut self) {
        if !self.is_finished() {
            self.abort();
        }
    }
}
