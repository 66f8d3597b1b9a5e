use claims_client::core::{MutationOutcome, Severity};
use claims_client::{CannedInput, ClaimMutations, HttpClaimsApi, ScheduledReload, ToastChannel};
use httpmock::prelude::*;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn mutations(
    server: &MockServer,
) -> (
    ClaimMutations<HttpClaimsApi, ToastChannel, Arc<ScheduledReload>>,
    ToastChannel,
    Arc<ScheduledReload>,
) {
    let api = HttpClaimsApi::new(&server.base_url()).unwrap();
    let toasts = ToastChannel::new(Duration::from_secs(60));
    let page = Arc::new(ScheduledReload::new());
    let service = ClaimMutations::new(api, toasts.clone(), page.clone(), "admin")
        .with_reload_delay(Duration::from_millis(10));
    (service, toasts, page)
}

#[tokio::test]
async fn test_flag_claim_round_trip() {
    let server = MockServer::start();
    let flag = server.mock(|when, then| {
        when.method(POST)
            .path("/claim/CLM-1001/flag")
            .json_body(json!({"reason": "billed twice", "user_id": "admin"}));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"success": true, "message": "Claim flagged successfully"}));
    });

    let (service, toasts, page) = mutations(&server);
    let input = CannedInput::new(["billed twice"]);

    let outcome = service.flag_claim("CLM-1001", &input).await;

    assert_eq!(outcome, MutationOutcome::Applied);
    flag.assert_hits(1);
    let visible = toasts.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].message, "Claim flagged successfully!");
    assert_eq!(visible[0].severity, Severity::Success);

    assert_eq!(page.scheduled(), 1);
    page.wait().await;
    assert_eq!(page.reloads(), 1);
}

#[tokio::test]
async fn test_blank_note_issues_no_request() {
    let server = MockServer::start();
    let note = server.mock(|when, then| {
        when.method(POST).path("/claim/CLM-1001/note");
        then.status(200).json_body(json!({"success": true}));
    });

    let (service, toasts, page) = mutations(&server);

    let outcome = service.add_note("CLM-1001", "   ").await;

    assert_eq!(outcome, MutationOutcome::Skipped);
    assert_eq!(note.hits(), 0);
    let visible = toasts.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].severity, Severity::Warning);
    assert_eq!(page.scheduled(), 0);
}

#[tokio::test]
async fn test_note_rejected_by_server() {
    let server = MockServer::start();
    let note = server.mock(|when, then| {
        when.method(POST)
            .path("/claim/CLM-1001/note")
            .json_body(json!({"content": "called insurer", "user_id": "admin"}));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"success": false, "error": "claim archived"}));
    });

    let (service, toasts, page) = mutations(&server);

    let outcome = service.add_note("CLM-1001", "called insurer").await;

    note.assert();
    assert_eq!(
        outcome,
        MutationOutcome::Rejected {
            detail: Some("claim archived".to_string())
        }
    );
    let visible = toasts.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].message, "Failed to add note. Please try again.");
    assert_eq!(visible[0].severity, Severity::Error);
    assert_eq!(page.scheduled(), 0);
}

#[tokio::test]
async fn test_unknown_claim_is_a_failure_not_a_panic() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/claim/NOPE/flag");
        then.status(404).body("<h1>Not Found</h1>");
    });

    let (service, toasts, page) = mutations(&server);
    let input = CannedInput::new(["typo"]);

    let outcome = service.flag_claim("NOPE", &input).await;

    assert!(matches!(outcome, MutationOutcome::Failed { .. }));
    let visible = toasts.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].message, "An error occurred while flagging the claim.");
    assert_eq!(page.scheduled(), 0);
}

#[tokio::test]
async fn test_concurrent_mutations_are_independent() {
    let server = MockServer::start();
    let note = server.mock(|when, then| {
        when.method(POST).path("/claim/CLM-1/note");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"success": true}));
    });
    let flag = server.mock(|when, then| {
        when.method(POST).path("/claim/CLM-2/flag");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"success": false}));
    });

    let (service, toasts, page) = mutations(&server);
    let input = CannedInput::new(["suspicious"]);

    let (noted, flagged) = tokio::join!(
        service.add_note("CLM-1", "follow up"),
        service.flag_claim("CLM-2", &input)
    );

    note.assert();
    flag.assert();
    assert_eq!(noted, MutationOutcome::Applied);
    assert_eq!(flagged, MutationOutcome::Rejected { detail: None });

    let mut severities: Vec<Severity> = toasts.visible().into_iter().map(|n| n.severity).collect();
    severities.sort_by_key(|s| s.as_str());
    assert_eq!(severities, vec![Severity::Error, Severity::Success]);
    assert_eq!(page.scheduled(), 1);
}

#[tokio::test]
async fn test_note_with_path_characters_in_id_cannot_reach_another_claim() {
    let server = MockServer::start();
    let other_claim = server.mock(|when, then| {
        when.method(POST).path("/claim/CLM-A/note");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"success": true}));
    });

    let (service, toasts, page) = mutations(&server);

    let outcome = service.add_note("CLM-B/../../claim/CLM-A", "hi").await;

    other_claim.assert_hits(0);
    assert!(matches!(outcome, MutationOutcome::Failed { .. }));
    assert_eq!(toasts.visible().len(), 1);
    assert_eq!(page.scheduled(), 0);
}

#[tokio::test]
async fn test_response_without_success_flag_is_a_rejection() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/claim/CLM-1001/note");
        then.status(200)
            .header("Content-Type", "application/json")
            .body("{}");
    });

    let (service, toasts, page) = mutations(&server);

    let outcome = service.add_note("CLM-1001", "called insurer").await;

    assert_eq!(outcome, MutationOutcome::Rejected { detail: None });
    let visible = toasts.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].message, "Failed to add note. Please try again.");
    assert_eq!(page.scheduled(), 0);
}
