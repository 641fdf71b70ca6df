//! Field extraction — best-effort pattern rules over the job description and
//! resume that feed the template letter.
//!
//! Each rule is a pure function returning `Option`; `ExtractedFields::extract`
//! applies the defaults. All matching is case-insensitive.

use once_cell::sync::Lazy;
use regex::Regex;

pub const DEFAULT_POSITION: &str = "the position";
pub const DEFAULT_COMPANY: &str = "your company";
pub const DEFAULT_NAME: &str = "Your Name";

const MAX_SKILLS: usize = 5;
const MAX_EXPERIENCE_LINES: usize = 3;

/// Phrase after a role keyword, up to " at|with|in", a parenthetical, or the
/// end of the line, sentence, or text.
static POSITION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:for|position|role|job|title)\b[:\s]+([\w \t-]+?)(?:\s+(?:at|with|in)\b|[ \t]*(?:[.,;(|\n]|$))",
    )
    .expect("position pattern is valid")
});

/// Company keywords in priority order, so "for X at Y." resolves to Y.
static COMPANY_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    ["at", "with", "for"]
        .iter()
        .map(|kw| {
            Regex::new(&format!(
                r"(?i)\b{kw}\b[:\s]+([\w \t-]+?)[ \t]*(?:\.|\n|$)"
            ))
            .expect("company pattern is valid")
        })
        .collect()
});

/// One optional qualifier word before a section keyword ("Key", "Work").
const QUALIFIER: &str = r"(?:\w+[ \t]+)?";
/// Optional trailing "& Tools" / "and Tools".
const COMPANION: &str = r"(?:[ \t]*(?:&|and)[ \t]*\w+)?";
/// Colon or spaced dash, then the inline remainder of the heading line.
const INLINE: &str = r"(?:[ \t]*:|[ \t]+[-–])[ \t]*(.*)";

static SKILLS_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)^[ \t]*{QUALIFIER}(?:skills|expertise)\b{COMPANION}(?:{INLINE}|[ \t]*$)"
    ))
    .expect("skills heading pattern is valid")
});

static EXPERIENCE_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)^[ \t]*{QUALIFIER}experience\b{COMPANION}(?:{INLINE}|[ \t]*$)"
    ))
    .expect("experience heading pattern is valid")
});

/// A line holding only a resume heading, with nothing after the colon.
static BARE_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)^[ \t]*{QUALIFIER}(?:skills|expertise|experience|education|projects|certifications|summary|objective|profile|awards|publications|languages|interests|references)\b{COMPANION}[ \t]*:?[ \t]*$"
    ))
    .expect("heading pattern is valid")
});

/// Sub-label at the start of a skills line, as in "Languages: Rust, Go".
static LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ \t]*[^:,]{1,30}:[ \t]*").expect("label pattern is valid"));

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w .'-]+$").expect("name pattern is valid"));

/// Fields recovered from free text for the template letter. Every field has
/// a usable value; failed rules leave their default in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFields {
    pub position: String,
    pub company: String,
    pub skills: Vec<String>,
    pub experience_lines: Vec<String>,
    pub name: String,
}

impl ExtractedFields {
    pub fn extract(job_description: &str, resume: &str) -> Self {
        Self {
            position: extract_position(job_description)
                .unwrap_or_else(|| DEFAULT_POSITION.to_string()),
            company: extract_company(job_description)
                .unwrap_or_else(|| DEFAULT_COMPANY.to_string()),
            skills: extract_skills(resume),
            experience_lines: extract_experience_lines(resume),
            name: extract_name(resume).unwrap_or_else(|| DEFAULT_NAME.to_string()),
        }
    }

    pub fn has_position(&self) -> bool {
        self.position != DEFAULT_POSITION
    }
}

pub fn extract_position(job_description: &str) -> Option<String> {
    POSITION_RE
        .captures(job_description)
        .and_then(|c| non_blank(c.get(1)?.as_str()))
}

pub fn extract_company(job_description: &str) -> Option<String> {
    COMPANY_RES.iter().find_map(|re| {
        re.captures_iter(job_description)
            .find_map(|c| non_blank(c.get(1)?.as_str()))
    })
}

/// First five comma- or newline-separated entries of the skills section,
/// with any leading sub-label dropped from each line.
pub fn extract_skills(resume: &str) -> Vec<String> {
    section_body(resume, &SKILLS_HEADING_RE, &EXPERIENCE_HEADING_RE)
        .into_iter()
        .map(strip_label)
        .flat_map(|line| line.split(','))
        .filter_map(non_blank)
        .take(MAX_SKILLS)
        .collect()
}

/// First three non-empty lines of the experience section.
pub fn extract_experience_lines(resume: &str) -> Vec<String> {
    section_body(resume, &EXPERIENCE_HEADING_RE, &SKILLS_HEADING_RE)
        .iter()
        .filter_map(|line| non_blank(line))
        .take(MAX_EXPERIENCE_LINES)
        .collect()
}

/// The resume's first non-blank line, when it reads like a name.
pub fn extract_name(resume: &str) -> Option<String> {
    let first = resume.lines().map(str::trim).find(|l| !l.is_empty())?;
    if BARE_HEADING_RE.is_match(first) || !NAME_RE.is_match(first) {
        return None;
    }
    Some(first.to_string())
}

/// Lines belonging to the first section whose heading matches `heading`:
/// the remainder of the heading line, then following lines up to a blank
/// line, a bare heading, or a line opening the `other` section.
fn section_body<'a>(resume: &'a str, heading: &Regex, other: &Regex) -> Vec<&'a str> {
    let mut lines = resume.lines();
    let inline = loop {
        match lines.next() {
            Some(line) => {
                if let Some(caps) = heading.captures(line) {
                    break caps.get(1).map(|m| m.as_str());
                }
            }
            None => return Vec::new(),
        }
    };

    let mut body: Vec<&str> = inline.filter(|s| !s.trim().is_empty()).into_iter().collect();
    for line in lines {
        if line.trim().is_empty() || BARE_HEADING_RE.is_match(line) || other.is_match(line) {
            break;
        }
        body.push(line);
    }
    body
}

fn strip_label(line: &str) -> &str {
    LABEL_RE.find(line).map_or(line, |m| &line[m.end()..])
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
