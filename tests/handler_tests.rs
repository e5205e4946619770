use course_advisor::config::SkillConfig;
use course_advisor::driver::serve;
use course_advisor::kernel::dialog::disambiguator::ClarificationReason;
use course_advisor::kernel::telemetry::event::{RequestKind, TelemetryEvent};
use course_advisor::kernel::telemetry::recorder::TelemetryRecorder;
use course_advisor::skill::event::RequestEnvelope;
use course_advisor::skill::response::{Directive, ResponseEnvelope};
use course_advisor::SkillHandler;
use serde_json::{json, Value};
use tokio::io::BufReader;

fn slot(name: &str, value: &str, code: &str, candidates: &[&str]) -> Value {
    json!({
        "name": name,
        "value": value,
        "confirmationStatus": "NONE",
        "resolutions": { "resolutionsPerAuthority": [{
            "authority": format!("amzn1.er-authority.echo-sdk.{}", name),
            "status": { "code": code },
            "values": candidates
                .iter()
                .map(|c| json!({ "value": { "name": c, "id": c } }))
                .collect::<Vec<_>>()
        }]}
    })
}

fn envelope(request: Value) -> RequestEnvelope {
    serde_json::from_value(json!({
        "version": "1.0",
        "session": {
            "new": false,
            "sessionId": "amzn1.echo-api.session.test",
            "attributes": { "visits": 2 }
        },
        "request": request
    }))
    .unwrap()
}

fn upper_div(dialog_state: &str, slots: Value) -> RequestEnvelope {
    envelope(json!({
        "type": "IntentRequest",
        "requestId": "amzn1.echo-api.request.test",
        "locale": "en-US",
        "dialogState": dialog_state,
        "intent": { "name": "UpperDivIntent", "confirmationStatus": "NONE", "slots": slots }
    }))
}

fn simple_intent(name: &str) -> RequestEnvelope {
    envelope(json!({
        "type": "IntentRequest",
        "requestId": "amzn1.echo-api.request.test",
        "intent": { "name": name, "confirmationStatus": "NONE" }
    }))
}

fn speech(resp: &ResponseEnvelope) -> &str {
    resp.speech_text().expect("Response should speak")
}

fn handler() -> SkillHandler {
    SkillHandler::new(SkillConfig::default())
}

#[test]
fn test_launch_asks_division() {
    let out = handler().handle(&envelope(json!({ "type": "LaunchRequest", "requestId": "r1" })));

    assert!(speech(&out.response).starts_with("Welcome to Course Advisor."));
    assert_eq!(out.response.response.should_end_session, Some(false));
    assert!(out.response.response.reprompt.is_some());
    assert_eq!(out.telemetry, vec![TelemetryEvent::RequestReceived { kind: RequestKind::Launch }]);
}

#[test]
fn test_session_attributes_carried_forward() {
    let out = handler().handle(&simple_intent("AMAZON.HelpIntent"));

    assert_eq!(out.response.session_attributes.get("visits"), Some(&json!(2)));
}

#[test]
fn test_static_intents() {
    let h = handler();

    let lower = h.handle(&simple_intent("LowerDivIntent")).response;
    assert!(speech(&lower).contains("C.S. 61 A."));
    assert_eq!(lower.response.should_end_session, Some(true));

    for name in ["AMAZON.StopIntent", "AMAZON.CancelIntent"] {
        let bye = h.handle(&simple_intent(name)).response;
        assert_eq!(speech(&bye), "Bye");
    }

    let help = h.handle(&simple_intent("AMAZON.HelpIntent")).response;
    assert!(speech(&help).starts_with("This is Course Advisor."));
    assert_eq!(help.response.should_end_session, Some(false));

    let recommend = h.handle(&simple_intent("AMAZON.RecommendIntent")).response;
    assert_eq!(speech(&recommend), "Do you want a lower division or upper division course?");
}

#[test]
fn test_unknown_intent_is_unhandled() {
    let out = handler().handle(&simple_intent("AMAZON.FallbackIntent"));

    assert!(speech(&out.response).starts_with("Sorry, I didn't get that."));
}

#[test]
fn test_started_dialog_delegates() {
    let out = handler().handle(&upper_div("STARTED", json!({
        "time": { "name": "time", "confirmationStatus": "NONE" }
    })));

    let body = &out.response.response;
    assert!(body.output_speech.is_none(), "Delegation should not speak");
    assert!(matches!(body.directives.as_slice(), [Directive::Delegate { updated_intent: Some(_) }]));
    assert_eq!(body.should_end_session, Some(false));
    assert!(out.telemetry.contains(&TelemetryEvent::DialogDelegated {
        state: Some(course_advisor::skill::event::DialogState::NotStarted)
    }));
}

#[test]
fn test_ambiguous_slot_elicits_once() {
    let out = handler().handle(&upper_div("IN_PROGRESS", json!({
        "topicImportance": slot("topicImportance", "coding", "ER_SUCCESS_MATCH", &["software"]),
        "time": slot("time", "medium", "ER_SUCCESS_MATCH", &["short", "long"])
    })));

    let body = &out.response.response;
    assert_eq!(speech(&out.response), "Which would you like  short  or  long?");
    assert_eq!(body.directives.len(), 1, "Exactly one directive per turn");
    match &body.directives[0] {
        Directive::ElicitSlot { slot_to_elicit, .. } => assert_eq!(slot_to_elicit, "time"),
        other => panic!("Expected ElicitSlot, got {:?}", other),
    }
    assert!(out.telemetry.contains(&TelemetryEvent::ClarificationRequested {
        slot: "time".to_string(),
        reason: ClarificationReason::MultipleMatches,
    }));
}

#[test]
fn test_completed_dialog_recommends() {
    let out = handler().handle(&upper_div("COMPLETED", json!({
        "topicImportance": slot("topicImportance", "coding", "ER_SUCCESS_MATCH", &["software"]),
        "time": slot("time", "a lot", "ER_SUCCESS_MATCH", &["heavy"]),
        "interaction": slot("interaction", "with friends", "ER_SUCCESS_MATCH", &["groups"]),
        "internship": slot("internship", "very", "ER_SUCCESS_MATCH", &["important"])
    })));

    let text = speech(&out.response);
    assert!(text.contains("you should consider taking C.S. 162."));
    assert!(text.contains("you like working in groups"));
    assert_eq!(out.response.response.should_end_session, Some(true));
    assert!(out.response.response.directives.is_empty());
    assert!(out.telemetry.contains(&TelemetryEvent::RecommendationServed { course_index: 3 }));
}

#[test]
fn test_unvalidated_combo_falls_back() {
    // The host can complete the dialog with a synonym it never resolved.
    let out = handler().handle(&upper_div("COMPLETED", json!({
        "topicImportance": slot("topicImportance", "poetry", "ER_SUCCESS_NO_MATCH", &[]),
        "time": slot("time", "a lot", "ER_SUCCESS_MATCH", &["heavy"]),
        "interaction": slot("interaction", "with friends", "ER_SUCCESS_MATCH", &["groups"]),
        "internship": slot("internship", "very", "ER_SUCCESS_MATCH", &["important"])
    })));

    assert!(speech(&out.response).starts_with("Sorry, I don't have a course recommendation"));
    assert!(out.telemetry.contains(&TelemetryEvent::SlotUnvalidated {
        slot: "topicImportance".to_string()
    }));
    assert!(out.telemetry.contains(&TelemetryEvent::LookupMiss));
}

#[test]
fn test_session_ended_is_silent() {
    let out = handler().handle(&envelope(json!({
        "type": "SessionEndedRequest",
        "requestId": "r9",
        "reason": "USER_INITIATED"
    })));

    assert!(out.response.response.output_speech.is_none());
    assert!(out.telemetry.contains(&TelemetryEvent::SessionEnded));
}

#[test]
fn test_unknown_request_type() {
    let out = handler().handle(&envelope(json!({ "type": "Display.ElementSelected" })));

    assert!(speech(&out.response).starts_with("Sorry"));
    assert_eq!(out.telemetry, vec![TelemetryEvent::RequestReceived { kind: RequestKind::Unknown }]);
}

#[test]
fn test_telemetry_has_no_user_content() {
    let out = handler().handle(&upper_div("IN_PROGRESS", json!({
        "internship": slot("internship", "secret phrase", "ER_SUCCESS_NO_MATCH", &[])
    })));

    let encoded = serde_json::to_string(&out.telemetry).unwrap();
    assert!(!encoded.contains("secret phrase"));
}

#[tokio::test]
async fn test_driver_round_trip() {
    let h = handler();
    let launch = json!({
        "version": "1.0",
        "request": { "type": "LaunchRequest", "requestId": "r1" }
    });
    let input = format!("{}\n\nnot json\n", launch);
    let mut output = Vec::new();
    let mut recorder = TelemetryRecorder::new();

    let turns = serve(&h, BufReader::new(input.as_bytes()), &mut output, &mut recorder)
        .await
        .unwrap();

    // 1. Blank lines are skipped, bad lines still get an answer
    assert_eq!(turns, 2);
    let lines: Vec<ResponseEnvelope> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert!(speech(&lines[0]).starts_with("Welcome"));
    assert!(speech(&lines[1]).starts_with("Sorry"));

    // 2. Telemetry recorded for both
    let snap = recorder.snapshot();
    assert_eq!(snap.request_stats.launch, 1);
    assert_eq!(snap.decode_failures, 1);
}
