//! Resume to job description matching.

use std::collections::HashSet;

use super::round_score;
use super::skills::{find_skills_in, tokenize};
use crate::domain::MatchReport;

const SKILL_WEIGHT: f64 = 70.0;
const KEYWORD_WEIGHT: f64 = 30.0;
const MIN_TERM_LEN: usize = 3;
const MAX_SKILL_SUGGESTIONS: usize = 5;
const STRONG_MATCH: f64 = 80.0;

const STOP_WORDS: &[&str] = &[
    "about", "above", "across", "after", "all", "also", "and", "any", "are", "around", "back",
    "been", "before", "being", "both", "but", "can", "could", "did", "does", "doing", "each",
    "etc", "for", "from", "further", "had", "has", "have", "having", "her", "here", "him", "his",
    "how", "including", "into", "its", "just", "like", "more", "most", "must", "not", "now",
    "off", "once", "only", "other", "our", "ours", "out", "over", "own", "plus", "same", "she",
    "should", "some", "such", "than", "that", "the", "their", "them", "then", "there", "these",
    "they", "this", "those", "through", "too", "under", "until", "very", "was", "we", "were",
    "what", "when", "where", "which", "while", "who", "whom", "why", "will", "with", "within",
    "would", "you", "your", "yours",
    // job-ad filler
    "ability", "candidate", "company", "role", "position", "team", "work", "working", "years",
    "year", "experience", "required", "requirements", "preferred", "responsibilities",
    "looking", "join", "strong", "excellent", "good", "great",
];

/// Distinct significant terms of a text, in order of first appearance.
fn significant_terms(tokens: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    tokens
        .iter()
        .map(String::as_str)
        .filter(|t| t.chars().count() >= MIN_TERM_LEN)
        .filter(|t| t.chars().any(char::is_alphabetic))
        .filter(|t| !STOP_WORDS.contains(t))
        .filter(|t| seen.insert(*t))
        .collect()
}

/// Compare a resume with a job description.
pub fn match_resume(resume_text: &str, job_description: &str) -> MatchReport {
    let resume_tokens = tokenize(resume_text);
    let job_tokens = tokenize(job_description);

    let required = find_skills_in(&job_tokens);
    let resume_skills: HashSet<String> = find_skills_in(&resume_tokens).into_iter().collect();

    let (overlapping_skills, missing_skills): (Vec<String>, Vec<String>) = required
        .into_iter()
        .partition(|skill| resume_skills.contains(skill));

    let resume_terms: HashSet<&str> = resume_tokens.iter().map(String::as_str).collect();
    let terms = significant_terms(&job_tokens);
    let keyword_overlap = if terms.is_empty() {
        0.0
    } else {
        terms.iter().filter(|t| resume_terms.contains(*t)).count() as f64 / terms.len() as f64
    };

    let required_count = overlapping_skills.len() + missing_skills.len();
    let score = if required_count == 0 {
        100.0 * keyword_overlap
    } else {
        let coverage = overlapping_skills.len() as f64 / required_count as f64;
        SKILL_WEIGHT * coverage + KEYWORD_WEIGHT * keyword_overlap
    };
    let match_score = round_score(score);

    let mut suggestions: Vec<String> = missing_skills
        .iter()
        .take(MAX_SKILL_SUGGESTIONS)
        .map(|skill| format!("Add {} to your resume if you have experience with it", skill))
        .collect();
    if match_score < STRONG_MATCH {
        suggestions.push(
            "Mirror key terms from the job description in your summary and experience sections"
                .to_string(),
        );
    } else {
        suggestions.push("Your resume is a strong match for this role".to_string());
    }

    MatchReport {
        match_score,
        overlapping_skills,
        missing_skills,
        suggestions,
    }
}
