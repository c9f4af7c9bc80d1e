//! Exam header detection: `"<source> <year> Q<number>"`.

use once_cell::sync::Lazy;
use regex::Regex;

static HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<source>[A-Za-z ]+)\s+(?P<year>\d{4})\s+Q(?P<number>[A-Za-z0-9]+)")
        .unwrap()
});

/// Metadata carried by a header line such as `DSE 2012 Q25`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMetadata {
    pub source: String,
    pub year: i64,
    pub question_number: String,
}

/// Match a candidate header line. Returns `None` when the line is not a header.
pub fn extract_metadata(line: &str) -> Option<HeaderMetadata> {
    let caps = HEADER_RE.captures(line.trim())?;
    Some(HeaderMetadata {
        source: caps["source"].trim().to_string(),
        year: caps["year"].parse().ok()?,
        question_number: caps["number"].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header() {
        let meta = extract_metadata("DSE 2012 Q25").unwrap();
        assert_eq!(meta.source, "DSE");
        assert_eq!(meta.year, 2012);
        assert_eq!(meta.question_number, "25");
    }

    #[test]
    fn test_multi_word_source_and_suffix() {
        let meta = extract_metadata("  HKCEE Practice 1998 Q3b (modified)").unwrap();
        assert_eq!(meta.source, "HKCEE Practice");
        assert_eq!(meta.year, 1998);
        assert_eq!(meta.question_number, "3b");
    }

    #[test]
    fn test_not_a_header() {
        assert!(extract_metadata("What is the pH of pure water?").is_none());
        assert!(extract_metadata("2012 Q25").is_none());
        assert!(extract_metadata("DSE 12 Q25").is_none());
        assert!(extract_metadata("").is_none());
    }
}
