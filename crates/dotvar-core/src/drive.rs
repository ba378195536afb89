//! Google Drive share link → direct download link.

use std::sync::OnceLock;

use regex::Regex;

pub const DRIVE_HOST: &str = "drive.google.com";

static FILE_ID_RE: OnceLock<Regex> = OnceLock::new();

fn file_id_re() -> &'static Regex {
    FILE_ID_RE.get_or_init(|| {
        Regex::new(r"(?:/d/|id=|/file/d/)([\w-]{10,})").expect("valid regex")
    })
}

/// Whether the text looks like it refers to a Drive share.
pub fn mentions_drive(text: &str) -> bool {
    text.contains(DRIVE_HOST)
}

/// Pull the file id out of a share URL (`/file/d/<id>/view`, `open?id=<id>`, ...).
pub fn extract_file_id(text: &str) -> Option<&str> {
    file_id_re()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Rewrite a share URL into a direct-download URL.
pub fn extract_drive_link(text: &str) -> Option<String> {
    let id = extract_file_id(text)?;
    Some(format!(
        "https://{DRIVE_HOST}/uc?export=download&id={id}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_file_view_links() {
        let link = "https://drive.google.com/file/d/1AbCdEfGhIjKlMnOp_-q/view?usp=sharing";
        assert_eq!(
            extract_drive_link(link).as_deref(),
            Some("https://drive.google.com/uc?export=download&id=1AbCdEfGhIjKlMnOp_-q")
        );
    }

    #[test]
    fn rewrites_open_id_links() {
        let link = "https://drive.google.com/open?id=0B1234567890abcdef";
        assert_eq!(extract_file_id(link), Some("0B1234567890abcdef"));
    }

    #[test]
    fn short_ids_are_ignored() {
        assert_eq!(extract_drive_link("https://drive.google.com/file/d/short/view"), None);
        assert_eq!(extract_drive_link("https://drive.google.com/drive/my-drive"), None);
    }

    #[test]
    fn detects_drive_mentions() {
        assert!(mentions_drive("see https://drive.google.com/x"));
        assert!(!mentions_drive("https://docs.example.com/d/1234567890ab"));
    }
}
