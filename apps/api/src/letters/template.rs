//! Template letter — the offline, always-succeeding end of the generation
//! chain. Output depends only on the inputs and the supplied date.

use chrono::NaiveDate;

use crate::letters::extract::ExtractedFields;

/// Skills and experience lines quoted in any one paragraph.
const MAX_MENTIONED: usize = 3;

const SALUTATION: &str = "Dear Hiring Manager,";

const REQUIREMENTS_SENTENCE: &str = "Based on the job description, I understand you're looking \
    for a candidate with strong skills and experience in this field.";

const GENERIC_BACKGROUND: &str = "My professional background has prepared me well for this \
    role, and I'm excited about the opportunity to contribute to your organization.";

const CLOSING_PARAGRAPH: &str = "I would welcome the opportunity to discuss how my background \
    and experiences would benefit your team. Thank you for considering my application. \
    I look forward to the possibility of working with you.";

/// Extracts fields from the raw inputs and composes the letter.
pub fn render_letter(job_description: &str, resume: &str, date: NaiveDate) -> String {
    compose(&ExtractedFields::extract(job_description, resume), date)
}

/// Long-form US date, e.g. "October 19, 2026".
pub fn format_dateline(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

pub fn compose(fields: &ExtractedFields, date: NaiveDate) -> String {
    let mentioned_skills = fields
        .skills
        .iter()
        .take(MAX_MENTIONED)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    let role = if fields.has_position() {
        format!("the {} position", fields.position)
    } else {
        fields.position.clone()
    };

    let background = if mentioned_skills.is_empty() {
        String::new()
    } else {
        format!(" in {mentioned_skills}")
    };

    let opening = format!(
        "I am writing to express my sincere interest in {role} at {}. With my background{background} \
        and relevant experience, I believe I would be a valuable addition to your team.",
        fields.company
    );

    let experience = if fields.experience_lines.is_empty() {
        format!("{REQUIREMENTS_SENTENCE} {GENERIC_BACKGROUND}")
    } else {
        let bullets = fields
            .experience_lines
            .iter()
            .take(MAX_MENTIONED)
            .map(|line| format!("- {line}"))
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "{REQUIREMENTS_SENTENCE} Throughout my career, I have:\n\n{bullets}\n\n\
            These experiences have prepared me well for this role."
        )
    };

    let expertise = if mentioned_skills.is_empty() {
        " and skills".to_string()
    } else {
        format!(", combined with my expertise in {mentioned_skills}")
    };

    let confidence = format!(
        "I am confident that my experience{expertise}, makes me an excellent candidate for this position."
    );

    [
        format_dateline(date),
        SALUTATION.to_string(),
        opening,
        experience,
        confidence,
        CLOSING_PARAGRAPH.to_string(),
        format!("Sincerely,\n{}", fields.name),
    ]
    .join("\n\n")
}
