//! Resume scoring.
//!
//! Three independent checks (keywords, formatting, grammar) each produce a
//! 0-100 score plus the observations that drive feedback. The ATS score is
//! their weighted sum.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use super::round_score;
use super::skills::{find_skills_in, tokenize};
use crate::domain::{AnalysisReport, Feedback};

const SKILL_TARGET: usize = 10;
const VERB_TARGET: usize = 8;
const SKILL_WEIGHT: f64 = 70.0;
const VERB_WEIGHT: f64 = 30.0;

const SECTION_POINTS: f64 = 60.0;
const CONTACT_POINTS: f64 = 15.0;
const LENGTH_POINTS: f64 = 15.0;
const BULLET_POINTS: f64 = 10.0;
const MIN_WORDS: usize = 200;
const MAX_WORDS: usize = 1200;
const BULLET_TARGET: usize = 3;

const LONG_SENTENCE_WORDS: usize = 40;

const ATS_KEYWORD_WEIGHT: f64 = 0.40;
const ATS_FORMATTING_WEIGHT: f64 = 0.35;
const ATS_GRAMMAR_WEIGHT: f64 = 0.25;

const ACTION_VERBS: &[&str] = &[
    "achieved", "analyzed", "architected", "automated", "built", "collaborated",
    "coordinated", "created", "delivered", "deployed", "designed", "developed",
    "drove", "established", "implemented", "improved", "increased", "launched",
    "led", "maintained", "managed", "mentored", "migrated", "negotiated",
    "optimized", "owned", "reduced", "resolved", "spearheaded", "streamlined",
];

const FIRST_PERSON: &[&str] = &["i", "me", "my", "mine", "myself"];

/// Standard sections and the headings that introduce them.
const SECTIONS: &[(&str, &[&str])] = &[
    ("summary", &["summary", "professional summary", "profile", "objective", "about me"]),
    ("experience", &["experience", "work experience", "work history", "employment"]),
    ("education", &["education", "academic background"]),
    ("skills", &["skills", "technical skills", "core competencies", "competencies"]),
    ("projects", &["projects", "personal projects"]),
    ("certifications", &["certifications", "certificates", "licenses"]),
];

/// A heading line is short.
const MAX_HEADING_WORDS: usize = 4;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid email regex")
});
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\+?\d{1,3}[\s.-]?)?(\(\d{2,4}\)|\d{2,4})[\s.-]?\d{3,4}[\s.-]?\d{3,4}")
        .expect("valid phone regex")
});
static BULLET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([-*•▪●◦‣]|\d+[.)])\s+\S").expect("valid bullet regex"));
static REPEATED_PUNCT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[!?]{2,}|,{2,}|;{2,}|\.{4,}").expect("valid punctuation regex"));
static SENTENCE_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+(\s+|$)|\n").expect("valid sentence regex"));
static QUANTIFIED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+\s*%|[$€£]\s*\d|\b\d{2,}\b").expect("valid number regex"));

/// Score a resume's extracted text.
pub fn analyze(text: &str) -> AnalysisReport {
    let tokens = tokenize(text);
    let keywords = KeywordCheck::run(&tokens);
    let formatting = FormattingCheck::run(text);
    let grammar = GrammarCheck::run(text);

    let keyword_score = keywords.score();
    let formatting_score = formatting.score();
    let grammar_score = grammar.score();
    let ats_score = ATS_KEYWORD_WEIGHT * keyword_score
        + ATS_FORMATTING_WEIGHT * formatting_score
        + ATS_GRAMMAR_WEIGHT * grammar_score;

    let mut notes = Notes::default();
    keywords.annotate(&mut notes);
    formatting.annotate(&mut notes);
    grammar.annotate(&mut notes);

    if !QUANTIFIED_RE.is_match(text) {
        notes.suggestions.push(
            "Quantify achievements with numbers, percentages or amounts".to_string(),
        );
    }
    if notes.suggestions.is_empty() && !text.trim().is_empty() {
        notes.suggestions.push(
            "Tailor your resume to each job description by mirroring its key terms".to_string(),
        );
    }

    AnalysisReport {
        ats_score: round_score(ats_score),
        grammar_score: round_score(grammar_score),
        formatting_score: round_score(formatting_score),
        keyword_score: round_score(keyword_score),
        skills: keywords.skills,
        feedback: Feedback {
            strengths: notes.strengths,
            weaknesses: notes.weaknesses,
        },
        suggestions: notes.suggestions,
    }
}

#[derive(Default)]
struct Notes {
    strengths: Vec<String>,
    weaknesses: Vec<String>,
    suggestions: Vec<String>,
}

impl Notes {
    fn weakness(&mut self, weakness: impl Into<String>, suggestion: impl Into<String>) {
        self.weaknesses.push(weakness.into());
        self.suggestions.push(suggestion.into());
    }
}

fn ratio(found: usize, target: usize) -> f64 {
    (found as f64 / target as f64).min(1.0)
}

struct KeywordCheck {
    skills: Vec<String>,
    verbs: usize,
}

impl KeywordCheck {
    fn run(tokens: &[String]) -> Self {
        let verbs = tokens
            .iter()
            .filter(|t| ACTION_VERBS.contains(&t.as_str()))
            .collect::<HashSet<_>>()
            .len();

        Self {
            skills: find_skills_in(tokens),
            verbs,
        }
    }

    fn score(&self) -> f64 {
        SKILL_WEIGHT * ratio(self.skills.len(), SKILL_TARGET)
            + VERB_WEIGHT * ratio(self.verbs, VERB_TARGET)
    }

    fn annotate(&self, notes: &mut Notes) {
        match self.skills.len() {
            n if n >= 8 => notes
                .strengths
                .push(format!("Strong range of technical skills ({} detected)", n)),
            n if n < 5 => notes.weakness(
                format!("Few recognised technical skills ({} detected)", n),
                "Add a dedicated skills section listing the tools and technologies you use",
            ),
            _ => {}
        }

        if self.verbs >= 5 {
            notes
                .strengths
                .push("Uses strong action verbs to describe accomplishments".to_string());
        } else if self.verbs < 3 {
            notes.weakness(
                "Limited use of action verbs",
                "Start bullet points with action verbs such as led, built or improved",
            );
        }
    }
}

struct FormattingCheck {
    missing_sections: Vec<&'static str>,
    has_email: bool,
    has_phone: bool,
    word_count: usize,
    bullet_count: usize,
}

impl FormattingCheck {
    fn run(text: &str) -> Self {
        let headings: Vec<String> = text
            .lines()
            .map(|l| l.trim().trim_end_matches(':').trim().to_lowercase())
            .filter(|l| !l.is_empty() && l.split_whitespace().count() <= MAX_HEADING_WORDS)
            .collect();

        let missing_sections = SECTIONS
            .iter()
            .filter(|(_, names)| {
                !headings
                    .iter()
                    .any(|h| names.iter().any(|name| h.starts_with(name)))
            })
            .map(|(section, _)| *section)
            .collect();

        Self {
            missing_sections,
            has_email: EMAIL_RE.is_match(text),
            has_phone: PHONE_RE.is_match(text),
            word_count: text.split_whitespace().count(),
            bullet_count: text.lines().filter(|l| BULLET_RE.is_match(l)).count(),
        }
    }

    fn sections_found(&self) -> usize {
        SECTIONS.len() - self.missing_sections.len()
    }

    fn length_ok(&self) -> bool {
        (MIN_WORDS..=MAX_WORDS).contains(&self.word_count)
    }

    fn score(&self) -> f64 {
        let sections = SECTION_POINTS * ratio(self.sections_found(), SECTIONS.len());

        let contact = CONTACT_POINTS / 2.0
            * (u8::from(self.has_email) + u8::from(self.has_phone)) as f64;

        let length = if self.word_count < MIN_WORDS {
            LENGTH_POINTS * ratio(self.word_count, MIN_WORDS)
        } else if self.word_count > MAX_WORDS {
            let overshoot = (self.word_count - MAX_WORDS) as f64 / MAX_WORDS as f64;
            LENGTH_POINTS * (1.0 - overshoot).max(0.0)
        } else {
            LENGTH_POINTS
        };

        let bullets = BULLET_POINTS * ratio(self.bullet_count, BULLET_TARGET);

        sections + contact + length + bullets
    }

    fn annotate(&self, notes: &mut Notes) {
        if self.sections_found() >= 4 {
            notes
                .strengths
                .push("Clear structure with standard resume sections".to_string());
        }
        if !self.missing_sections.is_empty() {
            let missing = self.missing_sections.join(", ");
            notes.weakness(
                format!("Missing standard sections: {}", missing),
                format!("Add clearly labelled sections for: {}", missing),
            );
        }

        if self.has_email && self.has_phone {
            notes
                .strengths
                .push("Contact information is easy to find".to_string());
        }
        if !self.has_email {
            notes.weakness(
                "No email address found",
                "Include a professional email address at the top of your resume",
            );
        }
        if !self.has_phone {
            notes.weakness(
                "No phone number found",
                "Include a phone number so recruiters can reach you",
            );
        }

        if self.length_ok() {
            notes.strengths.push("Resume length is appropriate".to_string());
        } else if self.word_count < MIN_WORDS {
            notes.weakness(
                format!("Resume is short ({} words)", self.word_count),
                format!(
                    "Expand on your experience and achievements to reach at least {} words",
                    MIN_WORDS
                ),
            );
        } else {
            notes.weakness(
                format!("Resume is long ({} words)", self.word_count),
                format!(
                    "Trim older or less relevant content to stay under {} words",
                    MAX_WORDS
                ),
            );
        }

        if self.bullet_count >= BULLET_TARGET {
            notes
                .strengths
                .push("Uses bullet points for readability".to_string());
        } else {
            notes.weakness(
                "Few bullet points",
                "Use bullet points to present responsibilities and achievements",
            );
        }
    }
}

struct GrammarCheck {
    repeated_words: usize,
    lowercase_starts: usize,
    first_person: usize,
    long_sentences: usize,
    repeated_punctuation: usize,
}

impl GrammarCheck {
    fn run(text: &str) -> Self {
        let words: Vec<String> = text
            .split_whitespace()
            .map(|w| {
                w.trim_matches(|c: char| !c.is_alphanumeric())
                    .to_lowercase()
            })
            .filter(|w| !w.is_empty())
            .collect();

        let repeated_words = words
            .windows(2)
            .filter(|pair| pair[0] == pair[1] && pair[0].chars().all(char::is_alphabetic))
            .count();

        let first_person = words
            .iter()
            .filter(|w| FIRST_PERSON.contains(&w.as_str()))
            .count();

        let mut lowercase_starts = 0;
        let mut long_sentences = 0;
        for sentence in SENTENCE_SPLIT_RE.split(text) {
            let count = sentence.split_whitespace().count();
            // contact lines ("jane@x.com | ...") are not prose
            let first_word = sentence.split_whitespace().next().unwrap_or_default();
            if count >= 3 && !first_word.contains(['@', '/']) {
                let first = first_word.chars().find(|c| c.is_alphabetic());
                if first.is_some_and(char::is_lowercase) {
                    lowercase_starts += 1;
                }
            }
            if count > LONG_SENTENCE_WORDS {
                long_sentences += 1;
            }
        }

        Self {
            repeated_words,
            lowercase_starts,
            first_person,
            long_sentences,
            repeated_punctuation: REPEATED_PUNCT_RE.find_iter(text).count(),
        }
    }

    fn penalty(count: usize, each: f64, cap: f64) -> f64 {
        (count as f64 * each).min(cap)
    }

    fn score(&self) -> f64 {
        let total = Self::penalty(self.repeated_words, 5.0, 20.0)
            + Self::penalty(self.lowercase_starts, 2.0, 20.0)
            + Self::penalty(self.first_person, 2.0, 20.0)
            + Self::penalty(self.long_sentences, 5.0, 20.0)
            + Self::penalty(self.repeated_punctuation, 3.0, 15.0);
        (100.0 - total).max(0.0)
    }

    fn annotate(&self, notes: &mut Notes) {
        if self.score() >= 90.0 {
            notes
                .strengths
                .push("Writing is clean and professional".to_string());
        }
        if self.repeated_words > 0 {
            notes.weakness(
                "Contains accidentally repeated words",
                "Proofread for repeated words such as \"the the\"",
            );
        }
        if self.lowercase_starts > 0 {
            notes.weakness(
                "Some sentences start with a lowercase letter",
                "Capitalize the first word of each sentence and bullet point",
            );
        }
        if self.first_person > 0 {
            notes.weakness(
                "Uses first-person pronouns",
                "Remove first-person pronouns such as I and my",
            );
        }
        if self.long_sentences > 0 {
            notes.weakness(
                "Contains very long sentences",
                format!(
                    "Break up sentences longer than {} words",
                    LONG_SENTENCE_WORDS
                ),
            );
        }
        if self.repeated_punctuation > 0 {
            notes.weakness(
                "Repeated punctuation marks",
                "Avoid repeated punctuation such as !! or ??",
            );
        }
    }
}
