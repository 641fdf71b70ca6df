//! Job recommendations — a fixed three-listing catalogue shaped by the
//! searcher's title, location, and skills. No external job board is queried.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub mod handlers;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListing {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub salary: Option<String>,
    pub posted_date: DateTime<Utc>,
    pub url: String,
    pub source: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationQuery {
    pub job_title: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

struct CatalogueEntry {
    id: &'static str,
    title: fn(&str) -> String,
    company: &'static str,
    default_location: &'static str,
    description: fn(&str, &str) -> String,
    default_skills: &'static str,
    salary: &'static str,
    days_ago: i64,
    source: &'static str,
}

const CATALOGUE: &[CatalogueEntry] = &[
    CatalogueEntry {
        id: "job1",
        title: |t| format!("{t} Engineer"),
        company: "TechCorp Industries",
        default_location: "Remote",
        description: |title, skills| {
            format!(
                "We're looking for a skilled {title} professional with experience in {skills}. \
                This role offers competitive compensation and growth opportunities."
            )
        },
        default_skills: "modern technologies",
        salary: "$90,000 - $120,000",
        days_ago: 6,
        source: "LinkedIn",
    },
    CatalogueEntry {
        id: "job2",
        title: |t| format!("Senior {t} Developer"),
        company: "Innovation Labs",
        default_location: "New York, NY",
        description: |_, skills| {
            format!(
                "Join our team of experts building next-generation solutions. \
                Must have experience with {skills} and a passion for innovation."
            )
        },
        default_skills: "relevant technologies",
        salary: "$110,000 - $140,000",
        days_ago: 3,
        source: "Indeed",
    },
    CatalogueEntry {
        id: "job3",
        title: |t| format!("{t} Specialist"),
        company: "Future Solutions",
        default_location: "San Francisco, CA",
        description: |_, skills| {
            format!(
                "Looking for a talented individual to join our fast-growing team. \
                You'll work on cutting-edge projects using {skills}."
            )
        },
        default_skills: "advanced technologies",
        salary: "$95,000 - $125,000",
        days_ago: 1,
        source: "Glassdoor",
    },
];

/// Builds the listings for `query`, dating postings relative to `now`.
pub fn recommend(query: &RecommendationQuery, now: DateTime<Utc>) -> Vec<JobListing> {
    let title = query.job_title.trim();
    let location = query
        .location
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty());
    let skills = query
        .skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    CATALOGUE
        .iter()
        .map(|entry| {
            let skills = if skills.is_empty() {
                entry.default_skills
            } else {
                skills.as_str()
            };
            JobListing {
                id: entry.id.to_string(),
                title: (entry.title)(title),
                company: entry.company.to_string(),
                location: location.unwrap_or(entry.default_location).to_string(),
                description: (entry.description)(title, skills),
                salary: Some(entry.salary.to_string()),
                posted_date: now - Duration::days(entry.days_ago),
                url: format!("https://example.com/{}", entry.id),
                source: entry.source.to_string(),
            }
        })
        .collect()
}
