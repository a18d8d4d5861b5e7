// tests/notify.rs
//
// Mailing loop with a recording Mailer in place of the SMTP session.
//
use std::cell::Cell;
use std::fs;
use std::path::PathBuf;

use lettre::Message;
use wsu_covid_tracker::config::options::MailOptions;
use wsu_covid_tracker::error::MailError;
use wsu_covid_tracker::notify::{notify_with, send_all, Credentials, Mailer};
use wsu_covid_tracker::progress::{NullProgress, Progress};

#[derive(Default)]
struct Recorder {
    sent: Vec<Message>,
    fail_on: Option<usize>,
}

impl Mailer for Recorder {
    fn send(&mut self, message: &Message) -> Result<(), MailError> {
        if self.fail_on == Some(self.sent.len()) {
            return Err(MailError::Session("recorder".into()));
        }
        self.sent.push(message.clone());
        Ok(())
    }
}

#[derive(Default)]
struct Seen {
    items: Vec<String>,
    lines: Vec<String>,
}
impl Progress for Seen {
    fn log(&mut self, msg: &str) { self.lines.push(msg.to_string()); }
    fn item_done(&mut self, item: &str) { self.items.push(item.to_string()); }
}

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("wsu_notify_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

/// Credentials, recipients and a fake chart under `dir`.
fn setup(dir: &PathBuf, credentials: &str, recipients: &str) -> (MailOptions, PathBuf) {
    let creds = dir.join("credentials.json");
    let rcpt = dir.join("recipients.txt");
    let chart = dir.join("plot.png");
    fs::write(&creds, credentials).unwrap();
    fs::write(&rcpt, recipients).unwrap();
    fs::write(&chart, [0x89, b'P', b'N', b'G']).unwrap();

    let opts = MailOptions { credentials: creds, recipients: rcpt, ..MailOptions::default() };
    (opts, chart)
}

const GOOD_CREDS: &str = r#"{"email": "tracker@example.edu", "password": "pw"}"#;

fn to_of(m: &Message) -> String {
    m.envelope().to()[0].to_string()
}

#[test]
fn one_message_per_recipient_in_order() {
    let dir = tmp_dir("order");
    let (opts, chart) = setup(&dir, GOOD_CREDS, "a@example.edu\nb@example.edu\n\nc@example.edu\n");

    let mut seen = Seen::default();
    let sent = notify_with(&opts, &chart, &mut seen, |_, creds| {
        assert_eq!(creds.email, "tracker@example.edu");
        Ok(Recorder::default())
    })
    .unwrap();

    assert_eq!(sent, 3);
    assert_eq!(seen.items, vec!["a@example.edu", "b@example.edu", "c@example.edu"]);
    assert_eq!(seen.lines, vec!["Mailing plot.png to 3 recipient(s) via smtp.gmail.com"]);
}

#[test]
fn zero_recipients_opens_no_session() {
    let dir = tmp_dir("empty");
    let (opts, chart) = setup(&dir, GOOD_CREDS, "\n  \n");

    let connects = Cell::new(0);
    let mut seen = Seen::default();
    let sent = notify_with(&opts, &chart, &mut seen, |_, _| {
        connects.set(connects.get() + 1);
        Ok(Recorder::default())
    })
    .unwrap();

    assert_eq!(sent, 0);
    assert_eq!(connects.get(), 0);
    assert!(seen.items.is_empty());
    assert_eq!(seen.lines.len(), 1);
    assert!(seen.lines[0].starts_with("No recipients in "));
}

#[test]
fn malformed_credentials_fail_before_any_session() {
    let dir = tmp_dir("badcreds");
    let (opts, chart) = setup(&dir, r#"{"email": "tracker@example.edu"}"#, "a@example.edu\n");

    let connects = Cell::new(0);
    let err = notify_with(&opts, &chart, &mut NullProgress, |_, _| {
        connects.set(connects.get() + 1);
        Ok(Recorder::default())
    })
    .unwrap_err();

    assert!(matches!(err, MailError::CredentialsFormat { .. }));
    assert_eq!(connects.get(), 0);
}

#[test]
fn missing_credentials_file_is_an_error() {
    let dir = tmp_dir("nocreds");
    let (mut opts, chart) = setup(&dir, GOOD_CREDS, "a@example.edu\n");
    opts.credentials = dir.join("nope.json");
    let err = notify_with(&opts, &chart, &mut NullProgress, |_, _| Ok(Recorder::default())).unwrap_err();
    assert!(matches!(err, MailError::CredentialsIo { .. }));
}

#[test]
fn failure_stops_the_remaining_sends() {
    let creds = Credentials { email: "tracker@example.edu".into(), password: "pw".into() };
    let recipients: Vec<String> = ["a@example.edu", "b@example.edu", "c@example.edu"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut rec = Recorder { fail_on: Some(1), ..Recorder::default() };
    let err = send_all(
        &mut rec,
        &creds.email,
        &recipients,
        "WSU COVID-19 Statistics",
        "plot.png",
        b"png",
        &mut NullProgress,
    )
    .unwrap_err();

    assert!(matches!(err, MailError::Session(_)));
    assert_eq!(rec.sent.len(), 1);
    assert_eq!(to_of(&rec.sent[0]), "a@example.edu");
}

#[test]
fn messages_carry_subject_and_chart() {
    let mut rec = Recorder::default();
    let recipients = vec!["a@example.edu".to_string()];
    send_all(&mut rec, "tracker@example.edu", &recipients, "WSU COVID-19 Statistics", "plot.png", b"png", &mut NullProgress)
        .unwrap();

    let raw = String::from_utf8_lossy(&rec.sent[0].formatted()).into_owned();
    assert!(raw.contains("From: tracker@example.edu"));
    assert!(raw.contains("To: a@example.edu"));
    assert!(raw.contains("Subject: WSU COVID-19 Statistics"));
    assert!(raw.contains("filename=\"plot.png\""));
}
