//! Incoming text → outgoing replies.
//!
//! Transport-agnostic version of the bot's message handler: the adapter
//! passes the raw text in and delivers the returned replies in order.

use tracing::{debug, info, warn};

use crate::{
    config::Config,
    domain::{Document, Outgoing},
    drive,
    errors::Error,
    formatting::{variations_csv, variations_text},
    variations::VariationGenerator,
};

pub const HELP_TEXT: &str = "Hi! I can:\n\
1. Generate Gmail dot variations\n\
2. Turn a Google Drive share link into a direct download link\n\n\
Send a Gmail address or a Drive link.";
pub const UNKNOWN_FORMAT: &str = "Unrecognized format. Send a Gmail address or a Drive link.";
pub const UNKNOWN_COMMAND: &str = "Unknown command. Try /help.";
pub const DRIVE_ID_NOT_FOUND: &str = "File ID not found.";
pub const NO_VARIATIONS: &str = "No valid variations for this address.";

/// What an incoming message asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request<'a> {
    Help,
    UnknownCommand(String),
    Variations(&'a str),
    DriveLink(&'a str),
    Unrecognized,
}

#[derive(Clone, Debug)]
pub struct Dispatcher {
    cfg: Config,
    generator: VariationGenerator,
}

impl Dispatcher {
    pub fn new(cfg: Config) -> Self {
        let generator = VariationGenerator::new(cfg.variation_options());
        Self { cfg, generator }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn classify<'a>(&self, text: &'a str) -> Request<'a> {
        let text = text.trim();

        if text.starts_with('/') {
            let (cmd, _args) = parse_command(text);
            return match cmd.as_str() {
                "start" | "help" => Request::Help,
                _ => Request::UnknownCommand(cmd),
            };
        }

        if self.is_recognized_address(text) {
            return Request::Variations(text);
        }

        if drive::mentions_drive(text) {
            return Request::DriveLink(text);
        }

        Request::Unrecognized
    }

    /// Build the replies for one incoming text message.
    pub fn handle_text(&self, text: &str) -> Vec<Outgoing> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        match self.classify(text) {
            Request::Help => vec![Outgoing::text(HELP_TEXT)],
            Request::UnknownCommand(cmd) => {
                debug!(command = %cmd, "unknown command");
                vec![Outgoing::text(UNKNOWN_COMMAND)]
            }
            Request::Variations(address) => self.variations_reply(address),
            Request::DriveLink(link) => match drive::extract_drive_link(link) {
                Some(direct) => vec![Outgoing::text(direct)],
                None => vec![Outgoing::text(DRIVE_ID_NOT_FOUND)],
            },
            Request::Unrecognized => vec![Outgoing::text(UNKNOWN_FORMAT)],
        }
    }

    fn variations_reply(&self, address: &str) -> Vec<Outgoing> {
        let emails = match self.generator.generate(address) {
            Ok(emails) => emails,
            Err(Error::InvalidAddress { reason, .. }) => {
                warn!(%reason, "rejected address");
                return vec![Outgoing::text(UNKNOWN_FORMAT)];
            }
            Err(e) => {
                warn!(error = %e, "variation generation failed");
                return vec![Outgoing::text(UNKNOWN_FORMAT)];
            }
        };

        if emails.is_empty() {
            return vec![Outgoing::text(NO_VARIATIONS)];
        }

        info!(count = emails.len(), "generated variations");

        vec![
            Outgoing::text(variations_text(&emails, self.cfg.reply_char_limit)),
            Outgoing::Document(Document::csv(
                self.cfg.csv_file_name.clone(),
                variations_csv(&emails),
            )),
        ]
    }

    fn is_recognized_address(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.cfg
            .recognized_domains
            .iter()
            .any(|d| lower.ends_with(&format!("@{d}")))
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// Split `/cmd@botname args` into a lowercased command name and the rest.
pub fn parse_command(text: &str) -> (String, String) {
    let mut parts = text.trim().splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let rest = parts.next().unwrap_or("").trim().to_string();

    let cmd = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase();

    (cmd, rest)
}
