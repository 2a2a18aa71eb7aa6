use regex::Regex;

/// An answer written with an explicit key, as in `B. no`.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct LabeledAnswer {
    /// The key the respondent types (`B`).
    pub response: String,
    /// The text after the key (`no`).
    pub text: String,
}

/// Extracts the keyed answers of an options block.
///
/// Returns an empty list unless every non-blank line follows the
/// `<key>. <text>` or `<key>) <text>` convention.
pub fn extract_labels(options: &str) -> Vec<LabeledAnswer> {
    let line_re = Regex::new(r"^\s*([A-Za-z]|[0-9]{1,2})[.)]\s+(\S.*?)\s*$").expect("regex");

    let mut answers: Vec<LabeledAnswer> = Vec::new();
    for line in options.lines().filter(|l| !l.trim().is_empty()) {
        match line_re.captures(line) {
            Some(cap) => answers.push(LabeledAnswer {
                response: cap[1].to_string(),
                text: cap[2].to_string(),
            }),
            None => return Vec::new(),
        }
    }
    answers
}
