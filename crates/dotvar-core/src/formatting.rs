//! Reply formatting (plain text list, CSV attachment).

pub const CSV_HEADER: &str = "Email";
const CSV_LINE_END: &str = "\r\n";

/// Keep at most `max_chars` characters (not bytes) of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Newline-joined variation list, cut to the messenger's safe length.
pub fn variations_text(emails: &[String], max_chars: usize) -> String {
    truncate_chars(&emails.join("\n"), max_chars).to_string()
}

/// Single-column CSV with an `Email` header and one row per address.
pub fn variations_csv(emails: &[String]) -> String {
    let mut out = String::with_capacity(
        CSV_HEADER.len() + emails.iter().map(|e| e.len() + 2).sum::<usize>() + 2,
    );
    push_row(&mut out, CSV_HEADER);
    for email in emails {
        push_row(&mut out, email);
    }
    out
}

fn push_row(out: &mut String, field: &str) {
    if needs_quoting(field) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
    out.push_str(CSV_LINE_END);
}

fn needs_quoting(field: &str) -> bool {
    field.contains([',', '"', '\r', '\n'])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emails(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn text_is_newline_joined_and_cut() {
        let list = emails(&["a.b@gmail.com", "ab@gmail.com"]);
        assert_eq!(variations_text(&list, 4000), "a.b@gmail.com\nab@gmail.com");
        assert_eq!(variations_text(&list, 5), "a.b@g");
    }

    #[test]
    fn long_lists_are_cut_to_limit() {
        let list: Vec<String> = (0..1000).map(|i| format!("user{i}@gmail.com")).collect();
        let text = variations_text(&list, 4000);
        assert_eq!(text.chars().count(), 4000);
        assert!(text.starts_with("user0@gmail.com\nuser1@gmail.com"));
    }

    #[test]
    fn csv_has_header_and_rows() {
        let csv = variations_csv(&emails(&["a.b@gmail.com", "ab@gmail.com"]));
        assert_eq!(csv, "Email\r\na.b@gmail.com\r\nab@gmail.com\r\n");
    }

    #[test]
    fn csv_quotes_special_fields() {
        let csv = variations_csv(&emails(&["\"odd\",name@gmail.com"]));
        assert_eq!(csv, "Email\r\n\"\"\"odd\"\",name@gmail.com\"\r\n");
    }

    #[test]
    fn empty_csv_is_header_only() {
        assert_eq!(variations_csv(&[]), "Email\r\n");
    }
}
