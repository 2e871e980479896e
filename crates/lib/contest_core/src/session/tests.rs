use super::*;
use crate::models::{EvidenceFile, EvidenceKind, TicketField};
use crate::reasons;
use crate::responder::ResponderError;

fn upload(name: &str, mime: &str, description: &str) -> Evidence {
    Evidence::from_upload(
        Some(EvidenceFile {
            name: name.into(),
            mime_type: mime.into(),
            size: 2048,
        }),
        description,
    )
}

fn last(session: &Session) -> &Message {
    session.messages().last().unwrap()
}

#[test]
fn new_session_has_only_welcome() {
    let session = Session::new();
    assert_eq!(session.current_step, Step::TicketInfo);
    assert_eq!(session.messages().len(), 1);
    assert!(session.messages()[0].is_welcome());
    assert!(session.submission_id().is_none());
}

#[test]
fn reset_restores_initial_state() {
    let mut session = Session::new();
    let _ = session.update_ticket(TicketUpdate::ticket_number("X"));
    let _ = session.add_evidence(upload("a.png", "image/png", ""));
    session.go_to_step(Step::Review);

    session.reset();

    assert_eq!(session.current_step, Step::TicketInfo);
    assert_eq!(session.messages().len(), 1);
    assert!(session.messages()[0].is_welcome());
    assert!(session.evidence.is_empty());
    assert_eq!(session.ticket, Ticket::default());
}

#[test]
fn ticket_number_echoes_and_prompts_for_date() {
    let mut session = Session::new();
    let pending = session.update_ticket(TicketUpdate::ticket_number("X"));

    assert_eq!(session.ticket.ticket_number, "X");
    assert_eq!(session.messages().len(), 3);

    let echo = &session.messages()[1];
    assert_eq!(echo.role, Role::User);
    assert!(echo.content.contains('X'));
    let meta = echo.metadata.as_ref().unwrap();
    assert_eq!(meta.field.as_deref(), Some("ticketNumber"));
    assert_eq!(meta.value.as_deref(), Some("X"));

    let prompt = &session.messages()[2];
    assert_eq!(prompt.role, Role::Assistant);
    assert_eq!(prompt.content, TicketField::IssueDate.prompt());

    assert_eq!(pending.len(), 1);
    assert_eq!(pending.requests()[0].message_id, echo.id);
}

#[test]
fn amount_is_terminal_field() {
    let mut session = Session::new();
    let _ = session.update_ticket(TicketUpdate::amount(75.0));

    assert_eq!(session.messages().len(), 2);
    assert_eq!(last(&session).role, Role::User);
    assert_eq!(last(&session).content, "75");
}

#[test]
fn blank_ticket_value_merges_silently() {
    let mut session = Session::new();
    let _ = session.update_ticket(TicketUpdate::ticket_number("X"));
    let before = session.messages().len();

    let pending = session.update_ticket(TicketUpdate::ticket_number(""));

    assert!(pending.is_empty());
    assert_eq!(session.ticket.ticket_number, "");
    assert_eq!(session.messages().len(), before);
}

#[test]
fn chat_request_snapshots_log_and_ticket() {
    let mut session = Session::new();
    let _ = session.update_ticket(TicketUpdate::ticket_number("T-9"));
    let pending = session.update_ticket(TicketUpdate::license_plate("ABC123"));

    let request = &pending.requests()[0];
    assert_eq!(request.ticket.ticket_number, "T-9");
    assert_eq!(request.ticket.license_plate, "ABC123");
    assert_eq!(request.history.last().unwrap().content, "ABC123");
    assert_eq!(request.history.len(), 4);
}

#[test]
fn selecting_reason_announces_evidence_stage() {
    let mut session = Session::new();
    let reason = reasons::find("signs-unclear").unwrap();
    let pending = session.set_selected_reason(Some(reason.clone()));

    assert_eq!(session.selected_reason.as_ref(), Some(&reason));
    assert_eq!(pending.len(), 1);
    let msgs = session.messages();
    assert_eq!(
        msgs[1].content,
        "I want to contest this ticket because: Unclear or Missing Signs"
    );
    assert_eq!(msgs[2].role, Role::Assistant);
    assert!(msgs[2].content.starts_with("Great choice."));
}

#[test]
fn clearing_reason_appends_nothing() {
    let mut session = Session::new();
    let _ = session.set_selected_reason(reasons::find("custom"));
    let before = session.messages().len();

    let pending = session.set_selected_reason(None);

    assert!(pending.is_empty());
    assert!(session.selected_reason.is_none());
    assert_eq!(session.messages().len(), before);
}

#[test]
fn custom_reason_echoes_verbatim_unless_empty() {
    let mut session = Session::new();
    let _ = session.set_custom_reason("  I was loading groceries  ");
    assert_eq!(last(&session).content, "  I was loading groceries  ");

    let before = session.messages().len();
    let pending = session.set_custom_reason("");
    assert!(pending.is_empty());
    assert_eq!(session.messages().len(), before);
    assert!(session.custom_reason.is_empty());
}

#[test]
fn add_evidence_with_description_appends_two_messages() {
    let mut session = Session::new();
    let item = upload("sign.jpg", "image/jpeg", "Sign hidden by a tree");
    let id = item.id.clone();

    let pending = session.add_evidence(item);

    assert_eq!(pending.len(), 2);
    assert_eq!(session.evidence.len(), 1);
    assert_eq!(session.evidence[0].kind, EvidenceKind::Photo);
    let msgs = session.messages();
    assert_eq!(msgs[1].content, "Uploaded evidence: sign.jpg");
    assert_eq!(msgs[2].content, "Description: Sign hidden by a tree");
    assert_eq!(
        msgs[2].metadata.as_ref().unwrap().evidence_id.as_deref(),
        Some(id.as_str())
    );
}

#[test]
fn add_then_remove_restores_length() {
    let mut session = Session::new();
    let _ = session.add_evidence(upload("keep.pdf", "application/pdf", ""));
    let before = session.evidence.len();

    let item = upload("drop.png", "image/png", "");
    let id = item.id.clone();
    let _ = session.add_evidence(item);
    assert!(session.remove_evidence(&id));

    assert_eq!(session.evidence.len(), before);
    assert_eq!(last(&session).role, Role::System);
    assert_eq!(last(&session).content, "Evidence removed.");
}

#[test]
fn removing_unknown_evidence_is_noop() {
    let mut session = Session::new();
    let _ = session.add_evidence(upload("keep.pdf", "application/pdf", ""));
    let evidence = session.evidence.clone();
    let messages = session.messages().len();

    assert!(!session.remove_evidence("evidence-missing"));

    assert_eq!(session.evidence, evidence);
    assert_eq!(session.messages().len(), messages);
}

#[test]
fn update_evidence_echoes_new_description() {
    let mut session = Session::new();
    let item = upload("meter.png", "image/png", "");
    let id = item.id.clone();
    let _ = session.add_evidence(item);

    let pending = session.update_evidence(&id, EvidenceUpdate::description("Meter display blank"));

    assert_eq!(pending.len(), 1);
    assert_eq!(session.find_evidence(&id).unwrap().description, "Meter display blank");
    assert_eq!(
        last(&session).content,
        "Updated evidence description: Meter display blank"
    );
}

#[test]
fn update_evidence_with_empty_description_is_silent() {
    let mut session = Session::new();
    let item = upload("meter.png", "image/png", "old");
    let id = item.id.clone();
    let _ = session.add_evidence(item);
    let before = session.messages().len();

    let pending = session.update_evidence(&id, EvidenceUpdate::description(""));

    assert!(pending.is_empty());
    assert_eq!(session.find_evidence(&id).unwrap().description, "");
    assert_eq!(session.messages().len(), before);
}

#[test]
fn update_unknown_evidence_is_ignored() {
    let mut session = Session::new();
    let pending = session.update_evidence("nope", EvidenceUpdate::description("text"));
    assert!(pending.is_empty());
    assert_eq!(session.messages().len(), 1);
}

#[test]
fn contact_update_appends_nothing() {
    let mut session = Session::new();
    session.update_contact(ContactUpdate {
        email: Some("jane@example.com".into()),
        ..ContactUpdate::default()
    });
    assert_eq!(session.contact_info.email, "jane@example.com");
    assert_eq!(session.messages().len(), 1);
}

#[test]
fn system_and_assistant_messages_produce_no_requests() {
    let mut session = Session::new();
    assert!(session.add_message(NewMessage::system("note")).is_empty());
    assert!(session.add_message(NewMessage::assistant("hint")).is_empty());
    assert_eq!(session.add_message(NewMessage::user("question")).len(), 1);
    assert_eq!(session.messages().len(), 4);
}

#[test]
fn reply_appends_assistant_message() {
    let mut session = Session::new();
    let pending = session.add_message(NewMessage::user("Can I contest this?"));
    let request = pending.into_requests().remove(0);

    session.apply_reply(ChatReply {
        message_id: request.message_id,
        outcome: Ok("Yes, let's start.".into()),
    });

    assert_eq!(last(&session).role, Role::Assistant);
    assert_eq!(last(&session).content, "Yes, let's start.");
}

#[test]
fn failed_reply_appends_one_apology() {
    let mut session = Session::new();
    session.apply_reply(ChatReply {
        message_id: "msg-x".into(),
        outcome: Err(ResponderError::Transport("connection refused".into())),
    });

    assert_eq!(session.messages().len(), 2);
    assert_eq!(last(&session).role, Role::System);
    assert!(last(&session).content.starts_with("Sorry, I encountered an error"));
}

#[test]
fn blank_reply_is_dropped() {
    let mut session = Session::new();
    session.apply_reply(ChatReply {
        message_id: "msg-x".into(),
        outcome: Ok("   ".into()),
    });
    assert_eq!(session.messages().len(), 1);
}

#[test]
fn completed_submission_moves_to_confirmation() {
    let mut session = Session::new();
    session.begin_submission();
    session.complete_submission("TC-42");

    assert_eq!(session.current_step, Step::Confirmation);
    assert_eq!(session.submission_id(), Some("TC-42"));
    let msgs = session.messages();
    assert_eq!(msgs[1].content, "Submitting your contest...");
    assert_eq!(
        msgs[2].content,
        "Contest submitted successfully! Your submission ID is TC-42"
    );
}

#[test]
fn failed_submission_keeps_step() {
    let mut session = Session::new();
    session.go_to_step(Step::Review);
    session.begin_submission();
    session.fail_submission(&SubmissionError::Unavailable("down".into()));

    assert_eq!(session.current_step, Step::Review);
    assert!(session.submission_id().is_none());
    assert_eq!(
        last(&session).metadata.as_ref().unwrap().field.as_deref(),
        Some("submissionFailed")
    );
}

#[test]
fn log_is_append_only() {
    let mut session = Session::new();
    let _ = session.update_ticket(TicketUpdate::ticket_number("A"));
    let snapshot: Vec<_> = session.messages().to_vec();

    let _ = session.update_ticket(TicketUpdate::ticket_number("B"));
    let item = upload("x.png", "image/png", "");
    let id = item.id.clone();
    let _ = session.add_evidence(item);
    session.remove_evidence(&id);

    assert_eq!(&session.messages()[..snapshot.len()], snapshot.as_slice());
}

#[test]
fn session_round_trips_through_json() {
    let mut session = Session::new();
    let _ = session.update_ticket(TicketUpdate::ticket_number("X"));
    session.complete_submission("TC-1");

    let json = serde_json::to_value(&session).unwrap();
    assert_eq!(json["currentStep"], "confirmation");
    assert_eq!(json["submissionId"], "TC-1");

    let back: Session = serde_json::from_value(json).unwrap();
    assert_eq!(back, session);
}
