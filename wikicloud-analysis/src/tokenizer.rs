//! Penn Treebank style word tokenizer
//!
//! Text is first split into sentences, then each sentence goes through an
//! ordered list of regex rewrites that pad punctuation, quotes, brackets and
//! contractions with spaces. The padded sentence is split on whitespace.
//! Rule order matters: later rules assume earlier padding has happened.

use regex::Regex;
use std::sync::LazyLock;

struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

impl Rule {
    fn new(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("tokenizer rule must be a valid regex"),
            replacement,
        }
    }

    fn apply(&self, text: &str) -> String {
        self.pattern.replace_all(text, self.replacement).into_owned()
    }
}

static SENTENCE_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[.!?]+["'”’)\]]*\s+"#).expect("sentence regex must be valid")
});

static STARTING_QUOTES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(r"([«“‘„]|`+)", " ${1} "),
        Rule::new(r#"^""#, "``"),
        Rule::new(r"(``)", " ${1} "),
        Rule::new(r#"([ (\[{<])("|'{2})"#, "${1} `` "),
    ]
});

static PUNCTUATION: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        // sentence-final period, possibly followed by closing brackets/quotes
        Rule::new(r#"([^.])(\.)([\])}>"']*)\s*$"#, "${1} ${2} ${3} "),
        Rule::new(r"([:,])([^\d])", " ${1} ${2}"),
        Rule::new(r"([:,])$", " ${1} "),
        Rule::new(r"\.{2,}", " ${0} "),
        Rule::new(r"[;@#$%&]", " ${0} "),
        Rule::new(r"[?!]", " ${0} "),
        Rule::new(r"([^'])' ", "${1} ' "),
        Rule::new(r"[*]", " ${0} "),
        Rule::new(r"[\]\[(){}<>]", " ${0} "),
        Rule::new(r"--", " -- "),
    ]
});

static ENDING_QUOTES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(r"([»”’])", " ${1} "),
        Rule::new(r"''", " '' "),
        Rule::new(r#"""#, " '' "),
        Rule::new(r"([^' ])('[sS]|'[mM]|'[dD]|') ", "${1} ${2} "),
        Rule::new(r"([^' ])('ll|'LL|'re|'RE|'ve|'VE|n't|N'T) ", "${1} ${2} "),
    ]
});

static CONTRACTIONS: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(r"(?i)\b(can)(not)\b", " ${1} ${2} "),
        Rule::new(r"(?i)\b(d)('ye)\b", " ${1} ${2} "),
        Rule::new(r"(?i)\b(gim)(me)\b", " ${1} ${2} "),
        Rule::new(r"(?i)\b(gon)(na)\b", " ${1} ${2} "),
        Rule::new(r"(?i)\b(got)(ta)\b", " ${1} ${2} "),
        Rule::new(r"(?i)\b(lem)(me)\b", " ${1} ${2} "),
        Rule::new(r"(?i)\b(more)('n)\b", " ${1} ${2} "),
        Rule::new(r"(?i)\b(wan)(na)\s", " ${1} ${2} "),
        Rule::new(r"(?i) ('t)(is)\b", " ${1} ${2} "),
        Rule::new(r"(?i) ('t)(was)\b", " ${1} ${2} "),
    ]
});

/// A single period after `u.s` or `j` is read as an abbreviation, not a
/// sentence end.
fn ends_with_abbreviation(before: &str, terminator: &str) -> bool {
    if !terminator.starts_with('.') || terminator.starts_with("..") {
        return false;
    }

    let word = before.rsplit(char::is_whitespace).next().unwrap_or("");
    let mut chars = word.chars();
    let single_letter = matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic());

    word.contains('.') || single_letter
}

/// Split text into sentences at terminal punctuation followed by whitespace
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for boundary in SENTENCE_END.find_iter(text) {
        if ends_with_abbreviation(&text[start..boundary.start()], boundary.as_str()) {
            continue;
        }

        let sentence = text[start..boundary.end()].trim();
        if !sentence.is_empty() {
            sentences.push(sentence);
        }
        start = boundary.end();
    }

    let rest = text[start..].trim();
    if !rest.is_empty() {
        sentences.push(rest);
    }

    sentences
}

fn tokenize_sentence(sentence: &str) -> Vec<String> {
    let mut text = sentence.to_string();

    for rule in STARTING_QUOTES.iter().chain(PUNCTUATION.iter()) {
        text = rule.apply(&text);
    }

    // Pad so the ending-quote and contraction rules can rely on spaces
    text = format!(" {} ", text);

    for rule in ENDING_QUOTES.iter().chain(CONTRACTIONS.iter()) {
        text = rule.apply(&text);
    }

    text.split_whitespace().map(str::to_string).collect()
}

/// Tokenize text into words, punctuation marks and contraction pieces
pub fn tokenize(text: &str) -> Vec<String> {
    split_sentences(text)
        .into_iter()
        .flat_map(tokenize_sentence)
        .collect()
}
