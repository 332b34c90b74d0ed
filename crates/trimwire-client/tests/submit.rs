// crates/trimwire-client/tests/submit.rs
//
// End-to-end submission tests against an httpmock server. Each mock's
// `when` encodes the exact multipart fields a submission must carry, so a
// malformed request matches nothing and settles as a failure, and hit
// counts pin down how many requests left the client. Transport-failure
// cases use a bound-then-dropped port instead, since no HTTP is spoken
// at all.

use std::net::TcpListener;
use std::thread;
use std::time::{Duration, Instant};

use httpmock::prelude::*;

use trimwire_client::{Selection, ServerConfig, SubmissionController, SubmitOutcome};
use trimwire_core::clip::{media_type_for, SourceClip};
use trimwire_core::error::ProcessError;
use trimwire_core::state::{ActionKind, EditorState, OutputFormat, SubmissionState, TrimBound};

// ── Test plumbing ────────────────────────────────────────────────────────────

/// One multipart text field exactly as the client frames it, down to the
/// blank line and terminator, so `body_contains` checks the value and not
/// just the field name.
fn text_field(name: &str, value: &str) -> String {
    format!("name=\"{name}\"\r\n\r\n{value}\r\n")
}

fn audio_selection(name: &str, payload: &[u8]) -> Selection {
    let mut selection = Selection::default();
    selection
        .select(SourceClip::new(
            name.to_string(),
            media_type_for(name).to_string(),
            payload.to_vec(),
        ))
        .expect("test clip should select");
    selection
}

/// Ingest until the in-flight submission settles; returns how many times
/// the success callback fired.
fn settle(controller: &mut SubmissionController, state: &mut EditorState) -> usize {
    let deadline = Instant::now() + Duration::from_secs(10);
    let mut callbacks = 0;
    while state.submission.is_submitting() {
        assert!(Instant::now() < deadline, "submission never settled");
        controller.ingest_updates(state, |_| callbacks += 1);
        thread::sleep(Duration::from_millis(10));
    }
    callbacks
}

// ── The submission lifecycle on the wire ─────────────────────────────────────

#[test]
fn trim_submission_serializes_every_field_and_succeeds() {
    let server = MockServer::start();
    let processed: &[u8] = b"processed-wav-bytes";
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/process")
            .body_contains(text_field("action", "trim"))
            .body_contains(text_field("start", "2"))
            .body_contains(text_field("end", "8"))
            .body_contains(text_field("speed", "1"))
            .body_contains(text_field("format", "wav"))
            .body_contains("filename=\"take.mp3\"")
            .body_contains("Content-Type: audio/mpeg")
            .body_contains("raw-mp3-bytes");
        then.status(200)
            .header("Content-Type", "audio/wav")
            .body(processed);
    });

    let mut controller =
        SubmissionController::new(ServerConfig::with_base_url(&server.base_url()))
            .expect("controller");
    let selection = audio_selection("take.mp3", b"raw-mp3-bytes");
    let mut state = EditorState::default();
    state.set_action(ActionKind::Trim);
    state.adjust_trim_bound(TrimBound::Start, 2);
    state.adjust_trim_bound(TrimBound::End, 8);
    state.set_output_format(OutputFormat::Wav);

    let outcome = controller.submit(&mut state, &selection).expect("dispatch");
    assert!(matches!(outcome, SubmitOutcome::Dispatched(_)));
    assert!(state.submission.is_submitting());

    let callbacks = settle(&mut controller, &mut state);
    assert_eq!(callbacks, 1, "success callback fires exactly once");
    assert!(matches!(state.submission, SubmissionState::Succeeded { .. }));

    let result = controller.result().expect("result staged");
    let input = selection.preview().expect("input preview");
    assert_ne!(result.path(), input.path(), "result preview is a distinct resource");
    assert_eq!(std::fs::read(result.path()).expect("read staged result"), processed);

    mock.assert_hits(1);
}

#[test]
fn passthrough_submission_still_carries_every_parameter_field() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/process")
            .body_contains(text_field("action", "none"))
            .body_contains(text_field("start", "0"))
            .body_contains(text_field("end", "0"))
            .body_contains(text_field("speed", "1"))
            .body_contains(text_field("format", "mp3"));
        then.status(200)
            .header("Content-Type", "audio/mpeg")
            .body("out");
    });

    let mut controller =
        SubmissionController::new(ServerConfig::with_base_url(&server.base_url()))
            .expect("controller");
    let selection = audio_selection("loop.wav", b"pcm");
    let mut state = EditorState::default();

    controller.submit(&mut state, &selection).expect("dispatch");
    assert_eq!(settle(&mut controller, &mut state), 1);
    assert!(matches!(state.submission, SubmissionState::Succeeded { .. }));
    mock.assert_hits(1);
}

#[test]
fn http_failure_surfaces_body_verbatim_and_keeps_prior_result() {
    let server = MockServer::start();
    let mut ok = server.mock(|when, then| {
        when.method(POST).path("/process");
        then.status(200)
            .header("Content-Type", "audio/mpeg")
            .body("first-take");
    });

    let mut controller =
        SubmissionController::new(ServerConfig::with_base_url(&server.base_url()))
            .expect("controller");
    let selection = audio_selection("voice.wav", b"pcm");
    let mut state = EditorState::default();

    controller.submit(&mut state, &selection).expect("first dispatch");
    assert_eq!(settle(&mut controller, &mut state), 1);
    let kept = controller.result().expect("first result").path().to_path_buf();
    assert!(kept.exists());

    // From here on the service only fails.
    ok.delete();
    let failing = server.mock(|when, then| {
        when.method(POST).path("/process");
        then.status(500)
            .header("Content-Type", "text/plain")
            .body("decode error");
    });

    controller.submit(&mut state, &selection).expect("second dispatch");
    assert_eq!(settle(&mut controller, &mut state), 0, "no success callback on failure");
    assert_eq!(
        state.submission,
        SubmissionState::Failed { message: "decode error".into() }
    );
    assert!(kept.exists(), "prior result must stay staged after a failure");
    assert_eq!(controller.result().expect("still referenced").path(), kept);
    failing.assert_hits(1);
}

#[test]
fn second_success_releases_the_prior_result_handle() {
    let server = MockServer::start();
    let mut first_reply = server.mock(|when, then| {
        when.method(POST).path("/process");
        then.status(200)
            .header("Content-Type", "audio/mpeg")
            .body("first-take");
    });

    let mut controller =
        SubmissionController::new(ServerConfig::with_base_url(&server.base_url()))
            .expect("controller");
    let selection = audio_selection("verse.mp3", b"raw");
    let mut state = EditorState::default();

    controller.submit(&mut state, &selection).expect("first dispatch");
    assert_eq!(settle(&mut controller, &mut state), 1);
    let superseded = controller.result().expect("first result").path().to_path_buf();
    assert!(superseded.exists());

    first_reply.delete();
    let second_reply = server.mock(|when, then| {
        when.method(POST).path("/process");
        then.status(200)
            .header("Content-Type", "audio/mpeg")
            .body("second-take");
    });

    controller.submit(&mut state, &selection).expect("second dispatch");
    assert_eq!(settle(&mut controller, &mut state), 1, "each success notifies once");

    let current = controller.result().expect("second result");
    assert_ne!(current.path(), superseded.as_path());
    assert!(
        !superseded.exists(),
        "slot replacement releases the superseded staged file"
    );
    assert_eq!(
        std::fs::read(current.path()).expect("read staged result"),
        b"second-take".as_slice()
    );
    second_reply.assert_hits(1);
}

#[test]
fn transport_failure_settles_as_network_failure() {
    // Bind, note the port, and drop the listener so connects are refused.
    let addr = TcpListener::bind("127.0.0.1:0")
        .expect("bind loopback")
        .local_addr()
        .expect("local addr");
    let config = ServerConfig::with_base_url(&format!("http://{addr}"));

    let mut controller = SubmissionController::new(config).expect("controller");
    let selection = audio_selection("late.mp3", b"x");
    let mut state = EditorState::default();

    controller.submit(&mut state, &selection).expect("dispatch");
    assert_eq!(settle(&mut controller, &mut state), 0);
    assert_eq!(
        state.submission,
        SubmissionState::Failed {
            message: ProcessError::NetworkFailure.to_string()
        }
    );
}

#[test]
fn submitting_without_a_file_issues_zero_requests() {
    let server = MockServer::start();
    // No criteria: counts any request that reaches the server at all.
    let any_request = server.mock(|_when, then| {
        then.status(200);
    });

    let controller =
        SubmissionController::new(ServerConfig::with_base_url(&server.base_url()))
            .expect("controller");
    let mut state = EditorState::default();

    let err = controller
        .submit(&mut state, &Selection::default())
        .unwrap_err();
    assert_eq!(err, ProcessError::NoFileSelected);
    assert_eq!(state.submission, SubmissionState::Idle);

    thread::sleep(Duration::from_millis(200));
    assert_eq!(any_request.hits(), 0, "the precondition must stop the request");
}

#[test]
fn rapid_double_submit_issues_exactly_one_request() {
    let server = MockServer::start();
    // Held-back reply keeps the first job in flight across the second submit.
    let mock = server.mock(|when, then| {
        when.method(POST).path("/process");
        then.status(200)
            .header("Content-Type", "audio/mpeg")
            .body("slow-result")
            .delay(Duration::from_millis(400));
    });

    let mut controller =
        SubmissionController::new(ServerConfig::with_base_url(&server.base_url()))
            .expect("controller");
    let selection = audio_selection("double.mp3", b"y");
    let mut state = EditorState::default();

    let first = controller.submit(&mut state, &selection).expect("dispatch");
    let SubmitOutcome::Dispatched(job) = first else {
        panic!("first submit should dispatch");
    };
    let second = controller.submit(&mut state, &selection).expect("no-op");
    assert_eq!(second, SubmitOutcome::AlreadyInFlight);
    assert_eq!(state.submission, SubmissionState::Submitting { job_id: job });

    assert_eq!(settle(&mut controller, &mut state), 1);
    mock.assert_hits(1);
}

// ── The startup health probe ─────────────────────────────────────────────────

#[test]
fn health_probe_reports_online() {
    let server = MockServer::start();
    let probe = server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200)
            .header("Content-Type", "text/plain")
            .body("service up");
    });

    let mut controller =
        SubmissionController::new(ServerConfig::with_base_url(&server.base_url()))
            .expect("controller");
    controller.probe_server();

    let mut state = EditorState::default();
    let deadline = Instant::now() + Duration::from_secs(10);
    while controller.server_online().is_none() {
        assert!(Instant::now() < deadline, "probe never settled");
        controller.ingest_updates(&mut state, |_| {});
        thread::sleep(Duration::from_millis(10));
    }
    assert_eq!(controller.server_online(), Some(true));
    probe.assert_hits(1);
}

#[test]
fn health_probe_reports_offline_when_unreachable() {
    let addr = TcpListener::bind("127.0.0.1:0")
        .expect("bind loopback")
        .local_addr()
        .expect("local addr");
    let config = ServerConfig::with_base_url(&format!("http://{addr}"));

    let mut controller = SubmissionController::new(config).expect("controller");
    controller.probe_server();

    let mut state = EditorState::default();
    let deadline = Instant::now() + Duration::from_secs(10);
    while controller.server_online().is_none() {
        assert!(Instant::now() < deadline, "probe never settled");
        controller.ingest_updates(&mut state, |_| {});
        thread::sleep(Duration::from_millis(10));
    }
    assert_eq!(controller.server_online(), Some(false));
}
