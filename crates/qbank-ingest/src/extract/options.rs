//! Splits content lines into the question stem and labelled answer options.

use once_cell::sync::Lazy;
use qbank_core::AnswerOption;
use regex::Regex;

/// `(A) text`, `[B] text`, `C. text`, `D: text`, `E- text`, `F) text`.
static OPTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[(\[]?([A-H])[)\].:\-]\s*(.+)$").unwrap());
/// `A  text` (label followed by two or more spaces).
static OPTION_SPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^([A-H])\s{2,}(.+)$").unwrap());

/// Result of splitting content lines.
#[derive(Debug, Clone, Default)]
pub struct SplitContent {
    /// Stem lines; blank lines are kept as empty strings.
    pub prompt_lines: Vec<String>,
    pub options: Vec<AnswerOption>,
}

impl SplitContent {
    /// Non-empty stem lines joined with newlines.
    pub fn prompt(&self) -> String {
        self.prompt_lines
            .iter()
            .filter(|line| !line.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }
}

/// Parse a single trimmed line as an answer option.
pub fn parse_option_line(line: &str) -> Option<AnswerOption> {
    let caps = OPTION_RE
        .captures(line)
        .or_else(|| OPTION_SPACE_RE.captures(line))?;
    Some(AnswerOption {
        label: caps[1].to_uppercase(),
        text: caps[2].trim().to_string(),
    })
}

/// Route every line to either the stem or the option list, preserving order.
pub fn split_prompt_and_options<S: AsRef<str>>(lines: &[S]) -> SplitContent {
    let mut split = SplitContent::default();
    for line in lines {
        let trimmed = line.as_ref().trim();
        if trimmed.is_empty() {
            split.prompt_lines.push(String::new());
            continue;
        }
        match parse_option_line(trimmed) {
            Some(option) => split.options.push(option),
            None => split.prompt_lines.push(trimmed.to_string()),
        }
    }
    split
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parenthesised_option() {
        assert_eq!(
            parse_option_line("(A) Sodium chloride"),
            Some(AnswerOption::new("A", "Sodium chloride"))
        );
    }

    #[test]
    fn test_spaced_option() {
        assert_eq!(
            parse_option_line("B.  Potassium"),
            Some(AnswerOption::new("B", "Potassium"))
        );
        assert_eq!(
            parse_option_line("c   Calcium"),
            Some(AnswerOption::new("C", "Calcium"))
        );
    }

    #[test]
    fn test_other_delimiters() {
        assert_eq!(parse_option_line("[D] 1200 cm3").unwrap().label, "D");
        assert_eq!(parse_option_line("e: none of these").unwrap().label, "E");
        assert_eq!(parse_option_line("F- both").unwrap().text, "both");
        assert_eq!(parse_option_line("H) last").unwrap().label, "H");
    }

    #[test]
    fn test_non_options() {
        assert!(parse_option_line("I. roman numeral").is_none());
        assert!(parse_option_line("A single space start").is_none());
        assert!(parse_option_line("Which of the following").is_none());
        assert!(parse_option_line("A.").is_none());
    }

    #[test]
    fn test_split_keeps_order_and_blanks() {
        let lines = [
            "What is the volume of gas?",
            "",
            "(Molar volume = 24 dm3)",
            "A. 272 cm3",
            "B. 544 cm3",
        ];
        let split = split_prompt_and_options(&lines);
        assert_eq!(split.prompt_lines.len(), 3);
        assert_eq!(split.prompt(), "What is the volume of gas?\n(Molar volume = 24 dm3)");
        assert_eq!(split.options.len(), 2);
        assert_eq!(split.options[1], AnswerOption::new("B", "544 cm3"));
    }
}
