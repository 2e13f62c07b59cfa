//! Text heuristics that label a check-in with a project and technology tags.
//!
//! Both functions are pure and deterministic.

use std::sync::LazyLock;

use regex::Regex;

/// Project label used when no pattern matches.
pub const DEFAULT_PROJECT: &str = "General Work";

/// Maximum number of tags attached to one check-in.
pub const MAX_TAGS: usize = 5;

/// Recognised technology keywords, in reporting order.
pub const TECH_KEYWORDS: &[&str] = &[
    "React",
    "Python",
    "JavaScript",
    "Node.js",
    "MongoDB",
    "SQL",
    "PostgreSQL",
    "HTML",
    "CSS",
    "Django",
    "Flask",
    "Express",
    "Vue",
    "Angular",
    "TypeScript",
    "Java",
    "C++",
    "Ruby",
    "PHP",
    "Swift",
    "Kotlin",
    "Docker",
    "AWS",
    "Git",
    "API",
    "Database",
    "Frontend",
    "Backend",
    "Tailwind",
    "Bootstrap",
    "Redux",
    "GraphQL",
    "REST",
    "MySQL",
    "Firebase",
    "Heroku",
    "Vercel",
    "Next.js",
    "Gatsby",
    "Webpack",
    "Babel",
    "Jest",
    "Cypress",
    "Testing",
    "CI/CD",
    "DevOps",
];

/// A project pattern and the capture group holding the label.
struct ProjectPattern {
    name: &'static str,
    regex: Regex,
    group: usize,
}

/// Tried in order; the first pattern yielding a non-blank label wins.
static PROJECT_PATTERNS: LazyLock<Vec<ProjectPattern>> = LazyLock::new(|| {
    [
        ("working_on", r"(?i)working on (?:my |the )?([^.!?]+)", 1),
        ("project_label", r"(?i)project:\s*([^.!?\n]+)", 1),
    ]
    .into_iter()
    .filter_map(|(name, pattern, group)| match Regex::new(pattern) {
        Ok(regex) => Some(ProjectPattern { name, regex, group }),
        Err(e) => {
            tracing::error!(pattern = name, error = %e, "invalid project pattern");
            None
        },
    })
    .collect()
});

/// Derive a short project label from a check-in message.
///
/// "I'm working on my portfolio site." yields `"portfolio site"`;
/// "project: Todo App" yields `"Todo App"`. Anything else yields
/// [`DEFAULT_PROJECT`].
#[must_use]
pub fn extract_project(message: &str) -> String {
    PROJECT_PATTERNS
        .iter()
        .find_map(|p| {
            let label = p.regex.captures(message)?.get(p.group)?.as_str().trim();
            (!label.is_empty()).then(|| {
                tracing::trace!(pattern = p.name, label, "project pattern matched");
                label.to_string()
            })
        })
        .unwrap_or_else(|| DEFAULT_PROJECT.to_string())
}

/// Collect up to [`MAX_TAGS`] keywords contained in `message`.
///
/// Matching is case-insensitive substring containment, so "javascript" also
/// tags `Java`. Order follows [`TECH_KEYWORDS`].
#[must_use]
pub fn extract_tags(message: &str) -> Vec<String> {
    let haystack = message.to_lowercase();
    TECH_KEYWORDS
        .iter()
        .filter(|kw| haystack.contains(&kw.to_lowercase()))
        .take(MAX_TAGS)
        .map(|kw| (*kw).to_string())
        .collect()
}
