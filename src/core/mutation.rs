use crate::domain::model::{MutationKind, MutationOutcome, MutationRequest, Severity};
use crate::domain::ports::{ClaimsApi, InputProvider, Notifier, PageController};
use std::time::Duration;

pub const DEFAULT_RELOAD_DELAY: Duration = Duration::from_millis(1000);

pub const FLAG_PROMPT: &str = "Enter reason for flagging this claim:";

struct Messages {
    applied: &'static str,
    rejected: &'static str,
    failed: &'static str,
    blank: &'static str,
}

fn messages(kind: MutationKind) -> Messages {
    match kind {
        MutationKind::Flag => Messages {
            applied: "Claim flagged successfully!",
            rejected: "Failed to flag claim. Please try again.",
            failed: "An error occurred while flagging the claim.",
            blank: "Please enter a reason before flagging.",
        },
        MutationKind::Note => Messages {
            applied: "Note added successfully!",
            rejected: "Failed to add note. Please try again.",
            failed: "An error occurred while adding the note.",
            blank: "Please enter a note before submitting.",
        },
    }
}

/// Flags and annotates claims, reporting every outcome as a notification.
///
/// A confirmed success schedules a page reload; nothing else changes the page.
pub struct ClaimMutations<A, N, P> {
    api: A,
    notifier: N,
    page: P,
    user_id: String,
    reload_delay: Duration,
}

impl<A: ClaimsApi, N: Notifier, P: PageController> ClaimMutations<A, N, P> {
    pub fn new(api: A, notifier: N, page: P, user_id: impl Into<String>) -> Self {
        Self {
            api,
            notifier,
            page,
            user_id: user_id.into(),
            reload_delay: DEFAULT_RELOAD_DELAY,
        }
    }

    pub fn with_reload_delay(mut self, delay: Duration) -> Self {
        self.reload_delay = delay;
        self
    }

    /// Prompts for a reason and flags the claim. A dismissed prompt does nothing.
    pub async fn flag_claim(&self, claim_id: &str, input: &dyn InputProvider) -> MutationOutcome {
        let Some(reason) = input.get_user_input(FLAG_PROMPT) else {
            tracing::debug!(claim_id, "flag prompt dismissed");
            return MutationOutcome::Skipped;
        };
        self.submit(self.request(claim_id, MutationKind::Flag, reason))
            .await
    }

    pub async fn add_note(&self, claim_id: &str, content: &str) -> MutationOutcome {
        self.submit(self.request(claim_id, MutationKind::Note, content.to_string()))
            .await
    }

    pub fn request(&self, claim_id: &str, kind: MutationKind, text: String) -> MutationRequest {
        MutationRequest {
            target_id: claim_id.to_string(),
            kind,
            text,
            user_id: self.user_id.clone(),
        }
    }

    /// Sends one mutation. Never fails: every path ends in a notification.
    pub async fn submit(&self, request: MutationRequest) -> MutationOutcome {
        let messages = messages(request.kind);

        if request.text.trim().is_empty() {
            self.notifier.notify(messages.blank, Severity::Warning);
            return MutationOutcome::Skipped;
        }

        tracing::debug!("POST {}", request.endpoint());

        match self.api.post_mutation(&request).await {
            Ok(response) if response.success => {
                tracing::info!(
                    claim_id = %request.target_id,
                    "{} accepted",
                    request.kind.action()
                );
                self.notifier.notify(messages.applied, Severity::Success);
                self.page.schedule_reload(self.reload_delay);
                MutationOutcome::Applied
            }
            Ok(response) => {
                let detail = response.error.or(response.message);
                tracing::warn!(
                    claim_id = %request.target_id,
                    detail = ?detail,
                    "{} rejected by server",
                    request.kind.action()
                );
                self.notifier.notify(messages.rejected, Severity::Error);
                MutationOutcome::Rejected { detail }
            }
            Err(e) => {
                tracing::error!(
                    claim_id = %request.target_id,
                    category = ?e.category(),
                    "{} request failed: {}",
                    request.kind.action(),
                    e
                );
                self.notifier.notify(messages.failed, Severity::Error);
                MutationOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }
}
