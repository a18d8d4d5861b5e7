// src/notify.rs
//
// Mail the chart to everyone in the recipient list over one authenticated
// implicit-TLS SMTP session. The first failed send ends the run.

use std::{fmt, fs, path::Path};

use lettre::{
    message::{header::ContentType, Attachment, Mailbox, MultiPart},
    transport::smtp::authentication::Credentials as SmtpCredentials,
    Message, SmtpTransport, Transport,
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::options::MailOptions;
use crate::error::MailError;
use crate::progress::Progress;

/// Account used to log in to the relay and as the From address.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// `{"email": "...", "password": "..."}`
    pub fn load(path: &Path) -> Result<Self, MailError> {
        let text = fs::read_to_string(path)
            .map_err(|source| MailError::CredentialsIo { path: path.to_path_buf(), source })?;
        serde_json::from_str(&text)
            .map_err(|source| MailError::CredentialsFormat { path: path.to_path_buf(), source })
    }
}

/// One address per line; surrounding whitespace and blank lines are dropped.
pub fn parse_recipients(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

pub fn load_recipients(path: &Path) -> Result<Vec<String>, MailError> {
    let text = fs::read_to_string(path)
        .map_err(|source| MailError::Recipients { path: path.to_path_buf(), source })?;
    Ok(parse_recipients(&text))
}

/// Something that can deliver a built message. The SMTP session in production,
/// a recorder in tests.
pub trait Mailer {
    fn send(&mut self, message: &Message) -> Result<(), MailError>;
}

pub struct SmtpMailer {
    transport: SmtpTransport,
}

impl SmtpMailer {
    /// Open and authenticate the session up front so bad credentials fail
    /// before the first message is built.
    pub fn connect(opts: &MailOptions, creds: &Credentials) -> Result<Self, MailError> {
        let transport = SmtpTransport::relay(&opts.host)?
            .port(opts.port)
            .credentials(SmtpCredentials::new(creds.email.clone(), creds.password.clone()))
            .build();

        if !transport.test_connection()? {
            return Err(MailError::Session(opts.host.clone()));
        }
        info!(host = %opts.host, port = opts.port, account = %creds.email, "smtp session open");
        Ok(Self { transport })
    }
}

impl Mailer for SmtpMailer {
    fn send(&mut self, message: &Message) -> Result<(), MailError> {
        self.transport.send(message)?;
        Ok(())
    }
}

/// One message: fixed subject, chart attached, no body text.
pub fn build_message(
    from: &Mailbox,
    to: &str,
    subject: &str,
    attachment_name: &str,
    attachment: Vec<u8>,
) -> Result<Message, MailError> {
    let to: Mailbox = to.parse().map_err(|_| MailError::Address(to.to_string()))?;
    let png = ContentType::parse("image/png")
        .map_err(|e| MailError::ContentType(e.to_string()))?;

    let message = Message::builder()
        .from(from.clone())
        .to(to)
        .subject(subject)
        .date_now()
        .multipart(
            MultiPart::mixed()
                .singlepart(Attachment::new(attachment_name.to_string()).body(attachment, png)),
        )?;
    Ok(message)
}

/// Send the chart to each recipient in order. Returns the number sent.
pub fn send_all<M: Mailer>(
    mailer: &mut M,
    from: &str,
    recipients: &[String],
    subject: &str,
    chart_name: &str,
    chart: &[u8],
    progress: &mut dyn Progress,
) -> Result<usize, MailError> {
    let from: Mailbox = from.parse().map_err(|_| MailError::Address(from.to_string()))?;

    progress.begin(recipients.len());
    let mut sent = 0;
    for to in recipients {
        let message = build_message(&from, to, subject, chart_name, chart.to_vec())?;
        progress.item_done(to);
        mailer.send(&message)?;
        debug!(recipient = %to, "sent");
        sent += 1;
    }
    progress.finish();

    Ok(sent)
}

/// Full notify step with the production SMTP session.
pub fn notify(opts: &MailOptions, chart: &Path, progress: &mut dyn Progress) -> Result<usize, MailError> {
    notify_with(opts, chart, progress, SmtpMailer::connect)
}

/// Notify step with an injectable session opener. Credentials are read first,
/// then recipients; no session is opened when there is nobody to mail.
pub fn notify_with<M, F>(
    opts: &MailOptions,
    chart: &Path,
    progress: &mut dyn Progress,
    connect: F,
) -> Result<usize, MailError>
where
    M: Mailer,
    F: FnOnce(&MailOptions, &Credentials) -> Result<M, MailError>,
{
    let creds = Credentials::load(&opts.credentials)?;
    let recipients = load_recipients(&opts.recipients)?;
    if recipients.is_empty() {
        info!(path = %opts.recipients.display(), "no recipients, skipping mail");
        progress.log(&format!("No recipients in {}, nothing mailed", opts.recipients.display()));
        return Ok(0);
    }

    let chart_bytes = fs::read(chart)
        .map_err(|source| MailError::Attachment { path: chart.to_path_buf(), source })?;
    let chart_name = chart
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| s!("plot.png"));

    progress.log(&format!("Mailing {} to {} recipient(s) via {}", chart_name, recipients.len(), opts.host));
    let mut mailer = connect(opts, &creds)?;
    let sent = send_all(
        &mut mailer,
        &creds.email,
        &recipients,
        &opts.subject,
        &chart_name,
        &chart_bytes,
        progress,
    )?;
    info!(sent, "mail done");
    Ok(sent)
}
