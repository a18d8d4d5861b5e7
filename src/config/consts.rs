// src/config/consts.rs

// Net config
pub const DASHBOARD_URL: &str = "https://www.wright.edu/coronavirus/covid-19-dashboard";

// Case tables carry this attribute pair and nothing else on the page does
pub const TABLE_CELLPADDING: &str = "1";
pub const TABLE_CELLSPACING: &str = "1";
pub const TABLE_COUNT: usize = 4;
pub const TOTALS_MARKER: &str = "Totals";

// Local files
pub const HISTORY_FILE: &str = "cases.csv";
pub const CHART_FILE: &str = "plot.png";
pub const CREDENTIALS_FILE: &str = "credentials.json";
pub const RECIPIENTS_FILE: &str = "recipients.txt";
pub const CONFIG_FILE: &str = "tracker.conf";
pub const LOG_FILE: &str = ".store/debug.log";

// Chart
pub const CHART_TITLE: &str = "Wright State University COVID-19 Cases";
pub const CHART_WIDTH: u32 = 640;
pub const CHART_HEIGHT: u32 = 480;
pub const ROLLING_WINDOW: usize = 3;
pub const X_TICKS: usize = 5;
pub const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

// Mail
pub const SMTP_HOST: &str = "smtp.gmail.com";
pub const SMTP_PORT: u16 = 465; // implicit TLS
pub const MAIL_SUBJECT: &str = "WSU COVID-19 Statistics";
