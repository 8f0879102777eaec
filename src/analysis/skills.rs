//! Skill catalogue and token-boundary matching.
//!
//! Text is split into lowercase tokens made of letters, digits and the
//! symbols `+`, `#` and `.`, so `C++`, `C#` and `.NET` survive tokenization
//! while `Java` never matches inside `JavaScript`. Multi-word aliases are
//! matched as contiguous token runs, and a match lying inside a longer one
//! (`Ruby` in `Ruby on Rails`) is not reported on its own.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}\p{N}+#.]+").expect("valid token regex"));

/// A canonical skill name and the spellings that identify it.
pub struct Skill {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

macro_rules! skill {
    ($name:literal $(, $alias:literal)* $(,)?) => {
        Skill { name: $name, aliases: &[$name $(, $alias)*] }
    };
}

pub static CATALOGUE: &[Skill] = &[
    // Languages
    skill!("Python"),
    skill!("Java"),
    skill!("JavaScript", "js", "ecmascript"),
    skill!("TypeScript", "ts"),
    skill!("C++", "cpp"),
    skill!("C#", "csharp", "c sharp"),
    // Bare "go", "swift", "excel" and "express" are ordinary English words
    Skill { name: "Go", aliases: &["golang"] },
    skill!("Rust"),
    skill!("Ruby"),
    skill!("PHP"),
    skill!("Kotlin"),
    Skill {
        name: "Swift",
        aliases: &["swiftui", "swift programming", "swift language", "ios swift"],
    },
    skill!("Scala"),
    skill!("SQL"),
    skill!("Bash", "shell scripting"),
    skill!("HTML", "html5"),
    skill!("CSS", "css3"),
    // Frameworks and runtimes
    skill!("React", "react.js", "reactjs"),
    skill!("Angular", "angularjs"),
    skill!("Vue.js", "vue", "vuejs"),
    skill!("Node.js", "nodejs", "node"),
    Skill { name: "Express", aliases: &["express.js", "expressjs"] },
    skill!("Django"),
    skill!("Flask"),
    skill!("FastAPI"),
    skill!("Spring Boot", "spring framework"),
    skill!(".NET", "dotnet", "asp.net"),
    skill!("Ruby on Rails", "rails"),
    skill!("Next.js", "nextjs"),
    skill!("GraphQL"),
    skill!("REST APIs", "rest api", "restful"),
    // Data and ML
    skill!("Machine Learning", "ml"),
    skill!("Deep Learning"),
    skill!("TensorFlow"),
    skill!("PyTorch"),
    skill!("scikit-learn", "sklearn", "scikit learn"),
    skill!("Pandas"),
    skill!("NumPy"),
    skill!("Data Analysis", "data analytics"),
    skill!("NLP", "natural language processing"),
    skill!("Tableau"),
    skill!("Power BI", "powerbi"),
    Skill {
        name: "Excel",
        aliases: &["microsoft excel", "ms excel", "excel spreadsheets", "advanced excel"],
    },
    skill!("Spark", "apache spark", "pyspark"),
    // Databases
    skill!("PostgreSQL", "postgres"),
    skill!("MySQL"),
    skill!("MongoDB", "mongo"),
    skill!("Redis"),
    skill!("Elasticsearch"),
    skill!("DynamoDB"),
    // Cloud and infrastructure
    skill!("AWS", "amazon web services"),
    skill!("Azure", "microsoft azure"),
    skill!("GCP", "google cloud", "google cloud platform"),
    skill!("Docker"),
    skill!("Kubernetes", "k8s"),
    skill!("Terraform"),
    skill!("Ansible"),
    skill!("Linux"),
    skill!("CI/CD", "continuous integration", "continuous delivery"),
    skill!("Jenkins"),
    skill!("GitHub Actions"),
    skill!("Git"),
    skill!("Kafka", "apache kafka"),
    skill!("Microservices", "microservice"),
    // Practices
    skill!("Agile", "scrum"),
    skill!("Unit Testing", "tdd", "test driven development"),
    skill!("Figma"),
    skill!("Project Management"),
];

/// Split text into lowercase tokens. Trailing dots are sentence punctuation,
/// not part of the token.
pub fn tokenize(text: &str) -> Vec<String> {
    TOKEN_RE
        .find_iter(text)
        .map(|m| m.as_str().trim_end_matches('.').to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

fn alias_tokens(alias: &str) -> Vec<String> {
    tokenize(alias)
}

/// Token ranges `(start, end)` where `needle` occurs.
fn spans(tokens: &[String], needle: &[String]) -> Vec<(usize, usize)> {
    if needle.is_empty() || needle.len() > tokens.len() {
        return Vec::new();
    }
    tokens
        .windows(needle.len())
        .enumerate()
        .filter(|(_, w)| *w == needle)
        .map(|(start, _)| (start, start + needle.len()))
        .collect()
}

/// Catalogue skills mentioned in `text`, deduplicated, in order of first
/// appearance.
pub fn find_skills(text: &str) -> Vec<String> {
    find_skills_in(&tokenize(text))
}

/// Same as [`find_skills`] over an already tokenized text.
pub fn find_skills_in(tokens: &[String]) -> Vec<String> {
    let matches: Vec<(&'static str, Vec<(usize, usize)>)> = CATALOGUE
        .iter()
        .map(|skill| {
            let found: Vec<(usize, usize)> = skill
                .aliases
                .iter()
                .flat_map(|alias| spans(tokens, &alias_tokens(alias)))
                .collect();
            (skill.name, found)
        })
        .filter(|(_, found)| !found.is_empty())
        .collect();

    let inside_longer = |name: &str, (start, end): (usize, usize)| {
        matches.iter().any(|(other, found)| {
            *other != name
                && found
                    .iter()
                    .any(|&(s, e)| s <= start && end <= e && e - s > end - start)
        })
    };

    let mut hits: Vec<(usize, &'static str)> = matches
        .iter()
        .filter_map(|(name, found)| {
            found
                .iter()
                .filter(|&&span| !inside_longer(*name, span))
                .map(|&(start, _)| start)
                .min()
                .map(|pos| (pos, *name))
        })
        .collect();

    hits.sort_by_key(|(pos, _)| *pos);

    let mut seen = HashSet::new();
    hits.into_iter()
        .filter(|(_, name)| seen.insert(*name))
        .map(|(_, name)| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_keeps_symbols() {
        let tokens = tokenize("Built APIs in C++, C# and .NET. Loved it.");
        assert!(tokens.contains(&"c++".to_string()));
        assert!(tokens.contains(&"c#".to_string()));
        assert!(tokens.contains(&".net".to_string()));
        assert!(tokens.contains(&"it".to_string()));
    }

    #[test]
    fn test_java_does_not_match_javascript() {
        let skills = find_skills("Five years of JavaScript development");
        assert_eq!(skills, vec!["JavaScript"]);
    }

    #[test]
    fn test_aliases_map_to_canonical_name() {
        let skills = find_skills("Backend in nodejs, frontend in js, deployed on k8s");
        assert_eq!(skills, vec!["Node.js", "JavaScript", "Kubernetes"]);
    }

    #[test]
    fn test_multi_word_alias() {
        let skills = find_skills("Applied machine learning and Natural Language Processing");
        assert_eq!(skills, vec!["Machine Learning", "NLP"]);
    }

    #[test]
    fn test_order_of_first_appearance_and_dedup() {
        let skills = find_skills("Docker, Python, docker again, python, PostgreSQL and postgres");
        assert_eq!(skills, vec!["Docker", "Python", "PostgreSQL"]);
    }

    #[test]
    fn test_case_insensitive_symbols() {
        let skills = find_skills("Experienced with CPP and c++ and C# (csharp)");
        assert_eq!(skills, vec!["C++", "C#"]);
    }

    #[test]
    fn test_everyday_words_are_not_skills() {
        let skills =
            find_skills("I excel at teamwork, am a swift learner and express ideas clearly");
        assert!(skills.is_empty(), "{:?}", skills);
    }

    #[test]
    fn test_qualified_everyday_words_match() {
        let skills =
            find_skills("Built apps with SwiftUI, reporting in Microsoft Excel and Express.js");
        assert_eq!(skills, vec!["Swift", "Excel", "Express"]);
    }

    #[test]
    fn test_nested_match_not_reported_separately() {
        let skills = find_skills("Shipped features in Ruby on Rails");
        assert_eq!(skills, vec!["Ruby on Rails"]);
    }

    #[test]
    fn test_standalone_mention_of_nested_skill_still_counts() {
        let skills = find_skills("Ruby on Rails backend, plus Ruby scripts for tooling");
        assert_eq!(skills, vec!["Ruby on Rails", "Ruby"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(find_skills("").is_empty());
    }
}
