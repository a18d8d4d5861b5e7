// src/config/options.rs
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::consts::*;
use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub store: StoreOptions,
    pub chart: ChartOptions,
    pub mail: MailOptions,
    /// Debug log appended to alongside stderr; `None` logs to stderr only.
    pub log_file: Option<PathBuf>,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            scrape: ScrapeOptions::default(),
            store: StoreOptions::default(),
            chart: ChartOptions::default(),
            mail: MailOptions::default(),
            log_file: Some(PathBuf::from(LOG_FILE)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub url: String,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self { url: s!(DASHBOARD_URL) }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreOptions {
    pub history: PathBuf,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self { history: PathBuf::from(HISTORY_FILE) }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartOptions {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Tried in order; the first readable one is used for all text.
    pub fonts: Vec<PathBuf>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            path: PathBuf::from(CHART_FILE),
            width: CHART_WIDTH,
            height: CHART_HEIGHT,
            title: s!(CHART_TITLE),
            fonts: FONT_CANDIDATES.iter().map(PathBuf::from).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MailOptions {
    pub credentials: PathBuf,
    pub recipients: PathBuf,
    pub host: String,
    pub port: u16,
    pub subject: String,
}

impl Default for MailOptions {
    fn default() -> Self {
        Self {
            credentials: PathBuf::from(CREDENTIALS_FILE),
            recipients: PathBuf::from(RECIPIENTS_FILE),
            host: s!(SMTP_HOST),
            port: SMTP_PORT,
            subject: s!(MAIL_SUBJECT),
        }
    }
}

impl AppOptions {
    /// Defaults overlaid with `key=value` lines from `path`.
    /// A missing file is not an error; the defaults are returned as-is.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut opts = Self::default();
        match fs::read_to_string(path) {
            Ok(text) => {
                opts.apply(&text, path)?;
                debug!(path = %path.display(), "loaded config");
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
            }
            Err(source) => {
                return Err(ConfigError::Io { path: path.to_path_buf(), source });
            }
        }
        Ok(opts)
    }

    /// Apply config text on top of the current values. `origin` only labels errors.
    pub fn apply(&mut self, text: &str, origin: &Path) -> Result<(), ConfigError> {
        let malformed = |line: usize, message: String| ConfigError::Malformed {
            path: origin.to_path_buf(),
            line,
            message,
        };

        for (i, raw) in text.lines().enumerate() {
            let line_no = i + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') { continue; }

            let (key, val) = line
                .split_once('=')
                .ok_or_else(|| malformed(line_no, s!("expected key=value")))?;
            let (key, val) = (key.trim(), val.trim());

            let parse_u32 = |v: &str| {
                v.parse::<u32>()
                    .map_err(|e| malformed(line_no, format!("{key}: {e}")))
            };

            match key {
                "url" => self.scrape.url = s!(val),
                "history" => self.store.history = PathBuf::from(val),
                "chart" => self.chart.path = PathBuf::from(val),
                "chart_width" => self.chart.width = parse_u32(val)?,
                "chart_height" => self.chart.height = parse_u32(val)?,
                "font" => self.chart.fonts.insert(0, PathBuf::from(val)),
                "credentials" => self.mail.credentials = PathBuf::from(val),
                "recipients" => self.mail.recipients = PathBuf::from(val),
                "smtp_host" => self.mail.host = s!(val),
                "smtp_port" => {
                    self.mail.port = val
                        .parse()
                        .map_err(|e| malformed(line_no, format!("{key}: {e}")))?;
                }
                "subject" => self.mail.subject = s!(val),
                "log_file" => {
                    self.log_file = if val.is_empty() { None } else { Some(PathBuf::from(val)) };
                }
                other => warn!(key = other, line = line_no, "ignoring unknown config key"),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let p = std::env::temp_dir().join("wsu_tracker_no_such_config.conf");
        let _ = fs::remove_file(&p);
        let opts = AppOptions::load(&p).unwrap();
        assert_eq!(opts, AppOptions::default());
    }

    #[test]
    fn overrides_and_comments() {
        let mut opts = AppOptions::default();
        let text = "
            # local overrides
            history = data/cases.csv
            chart_width=800
            smtp_port = 2465
            font = /opt/fonts/Inter.ttf
            log_file =
        ";
        opts.apply(text, Path::new("t.conf")).unwrap();
        assert_eq!(opts.store.history, PathBuf::from("data/cases.csv"));
        assert_eq!(opts.chart.width, 800);
        assert_eq!(opts.chart.height, CHART_HEIGHT);
        assert_eq!(opts.mail.port, 2465);
        assert_eq!(opts.chart.fonts[0], PathBuf::from("/opt/fonts/Inter.ttf"));
        assert_eq!(opts.log_file, None);
    }

    #[test]
    fn malformed_line_reports_line_number() {
        let mut opts = AppOptions::default();
        let err = opts.apply("url=x\nchart_width\n", Path::new("t.conf")).unwrap_err();
        match err {
            ConfigError::Malformed { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn bad_number_is_rejected() {
        let mut opts = AppOptions::default();
        assert!(opts.apply("chart_height=tall", Path::new("t.conf")).is_err());
    }
}
