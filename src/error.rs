// src/error.rs
//
// Typed errors per pipeline stage, folded into TrackerError at the runner.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("reading saved page {path}: {source}")]
    Saved {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected at least {expected} case tables, found {found}")]
    TableCount { expected: usize, found: usize },

    #[error("table {table} has no <tbody>")]
    MissingBody { table: usize },

    #[error("table {table}, row {row}: expected date + 2 counts, got {cells:?}")]
    RowShape { table: usize, row: usize, cells: Vec<String> },

    #[error("not a count: {0:?}")]
    Count(String),

    #[error("unknown month {month:?} in date {text:?}")]
    UnknownMonth { month: String, text: String },

    #[error("unreadable date {0:?}")]
    Date(String),

    #[error("bad selector {0}")]
    Selector(String),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("history file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("history file {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("no usable font; tried {0:?}")]
    NoFont(Vec<PathBuf>),

    #[error("drawing chart: {0}")]
    Draw(String),

    #[error("writing {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

#[derive(Error, Debug)]
pub enum MailError {
    #[error("credentials file {path}: {source}")]
    CredentialsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("credentials file {path}: {source}")]
    CredentialsFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("recipients file {path}: {source}")]
    Recipients {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("reading attachment {path}: {source}")]
    Attachment {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("bad address {0:?}")]
    Address(String),

    #[error("content type: {0}")]
    ContentType(String),

    #[error("building message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("smtp: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("relay refused the session for {0}")]
    Session(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file {path}, line {line}: {message}")]
    Malformed { path: PathBuf, line: usize, message: String },
}

/// Anything that ends a run.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Chart(#[from] ChartError),

    #[error(transparent)]
    Mail(#[from] MailError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
