/// Sanitize recognized text before extraction.
/// Strips control characters, trims lines and drops blank ones. Keeps the
/// punctuation that record markers and dates rely on (`:`, `/`, `.`, `-`).
pub fn sanitize_recognized_text(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect::<String>()
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_null_bytes() {
        let clean = sanitize_recognized_text("Chief complaint:\x00 back pain");
        assert!(!clean.contains('\x00'));
        assert!(clean.contains("back pain"));
    }

    #[test]
    fn strips_control_characters() {
        let raw = "Diagnosis: tinnitus\x01\x02\x07\nDate: 03/14/2006";
        let clean = sanitize_recognized_text(raw);
        assert!(!clean.contains('\x07'));
        assert!(clean.contains("03/14/2006"));
    }

    #[test]
    fn collapses_blank_lines() {
        let raw = "Line one\n\n\n\nLine two\r\n\r\nLine three";
        assert_eq!(sanitize_recognized_text(raw), "Line one\nLine two\nLine three");
    }

    #[test]
    fn trims_whitespace_per_line() {
        let raw = "  SF 600  \n  Chronological record of medical care  ";
        assert_eq!(
            sanitize_recognized_text(raw),
            "SF 600\nChronological record of medical care"
        );
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(sanitize_recognized_text(""), "");
        assert_eq!(sanitize_recognized_text("\n\n   \n"), "");
    }
}
