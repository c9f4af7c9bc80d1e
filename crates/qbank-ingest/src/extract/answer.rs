//! Detection of an explicitly stated correct answer.

use once_cell::sync::Lazy;
use regex::Regex;

/// Tried in order; the first pattern that matches anywhere in the text wins.
static ANSWER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // "answer is C", "Answer: C"
        r"(?i)\banswer\s*(?:is|:)?\s*([A-H])\b",
        // "Ans: C", "ans - C"
        r"(?i)\bans(?:wer)?\s*[:\-]?\s*([A-H])\b",
        // "correct option is C", "Correct: C"
        r"(?i)\bcorrect(?:\soption)?\s*(?:is|:)?\s*([A-H])\b",
        // "C is the answer", "C is correct"
        r"(?i)\b([A-H])\s*(?:is the answer|is correct)\b",
        // a line holding only the letter
        r"(?im)^\s*([A-H])\s*$",
    ]
    .into_iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Find the answer letter stated in `text`, uppercased.
pub fn extract_answer(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }
    ANSWER_PATTERNS
        .iter()
        .find_map(|re| re.captures(text))
        .map(|caps| caps[1].to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_is() {
        assert_eq!(
            extract_answer("Which gas?\nA. H2\nB. O2\nC. N2\nAnswer is C"),
            Some("C".into())
        );
        assert_eq!(extract_answer("answer: b"), Some("B".into()));
    }

    #[test]
    fn test_ans_prefix() {
        assert_eq!(extract_answer("Ans: D"), Some("D".into()));
        assert_eq!(extract_answer("ans - a"), Some("A".into()));
    }

    #[test]
    fn test_correct_option() {
        assert_eq!(extract_answer("The correct option is B"), Some("B".into()));
        assert_eq!(extract_answer("Correct: H"), Some("H".into()));
    }

    #[test]
    fn test_letter_is_correct() {
        assert_eq!(extract_answer("I think D is correct."), Some("D".into()));
        assert_eq!(extract_answer("so B is the answer"), Some("B".into()));
    }

    #[test]
    fn test_lone_letter_line() {
        assert_eq!(extract_answer("Pick one\nA. x\nB. y\n\n  b  \n"), Some("B".into()));
    }

    #[test]
    fn test_priority_order() {
        // "answer is" outranks the lone letter line
        assert_eq!(extract_answer("C\nthe answer is A"), Some("A".into()));
    }

    #[test]
    fn test_no_answer() {
        assert_eq!(extract_answer("What is the pH of pure water?\nA. 0\nB. 7"), None);
        assert_eq!(extract_answer(""), None);
        assert_eq!(extract_answer("Answer is Z"), None);
    }
}
