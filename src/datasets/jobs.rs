//! Job board listings / 职位数据
//!
//! Language requirements use one canonical tag set (`english`, `russian`,
//! `both`, `other`); concrete names of "other" languages live in
//! `other_languages`.

use chrono::{DateTime, Duration, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::directory::{Constraint, Directory, Filter, Record, ResultSet, SortOrder};

/// Employment type / 职位类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    FullTime,
    PartTime,
    Temporary,
}

impl FromStr for JobType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full-time" | "full_time" | "fulltime" => Ok(JobType::FullTime),
            "part-time" | "part_time" | "parttime" => Ok(JobType::PartTime),
            "temporary" => Ok(JobType::Temporary),
            other => Err(format!("unknown job type: {}", other)),
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobType::FullTime => "full-time",
            JobType::PartTime => "part-time",
            JobType::Temporary => "temporary",
        };
        f.write_str(s)
    }
}

/// Language requirement tag / 语言要求
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageRequirement {
    English,
    Russian,
    Both,
    Other,
}

impl FromStr for LanguageRequirement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "english" => Ok(LanguageRequirement::English),
            "russian" => Ok(LanguageRequirement::Russian),
            "both" => Ok(LanguageRequirement::Both),
            "other" => Ok(LanguageRequirement::Other),
            other => Err(format!("unknown language requirement: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "type")]
    pub kind: JobType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    pub description: String,
    pub posted_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    pub requirements: Vec<String>,
    pub languages: Vec<LanguageRequirement>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub other_languages: Vec<String>,
}

impl Record for Job {
    type Id = String;

    fn id(&self) -> String {
        self.id.clone()
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.company, &self.location, &self.description]
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JobQuery {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub kind: Constraint<JobType>,
    pub language: Constraint<LanguageRequirement>,
}

struct Seed {
    id: &'static str,
    title: &'static str,
    company: &'static str,
    location: &'static str,
    kind: JobType,
    salary: &'static str,
    description: &'static str,
    days_ago: i64,
    source: Option<(&'static str, &'static str)>,
    requirements: &'static [&'static str],
    languages: &'static [LanguageRequirement],
    other_languages: &'static [&'static str],
}

impl Seed {
    fn build(self, now: DateTime<Utc>) -> Job {
        Job {
            id: self.id.to_string(),
            title: self.title.to_string(),
            company: self.company.to_string(),
            location: self.location.to_string(),
            kind: self.kind,
            salary: Some(self.salary.to_string()).filter(|s| !s.is_empty()),
            description: self.description.to_string(),
            posted_date: now - Duration::days(self.days_ago),
            source: self.source.map(|(name, _)| name.to_string()),
            source_url: self.source.map(|(_, url)| url.to_string()),
            requirements: self.requirements.iter().map(|r| r.to_string()).collect(),
            languages: self.languages.to_vec(),
            other_languages: self.other_languages.iter().map(|l| l.to_string()).collect(),
        }
    }
}

fn seeds() -> Vec<Seed> {
    use LanguageRequirement::{Both, English, Other, Russian};

    vec![
        Seed {
            id: "1",
            title: "English Teacher",
            company: "Language School Moscow",
            location: "Moscow",
            kind: JobType::FullTime,
            salary: "60,000 - 80,000 RUB/month",
            description: "We are looking for an experienced English teacher to join our team. Must have teaching certification and experience working with students.",
            days_ago: 0,
            source: Some(("HeadHunter", "https://hh.ru")),
            requirements: &["Teaching certification", "2+ years experience", "Fluent English"],
            languages: &[English],
            other_languages: &[],
        },
        Seed {
            id: "2",
            title: "Restaurant Server",
            company: "Cafe Pushkin",
            location: "St. Petersburg",
            kind: JobType::PartTime,
            salary: "25,000 - 35,000 RUB/month",
            description: "Part-time server position in a high-end restaurant. Flexible hours, evening shifts available.",
            days_ago: 1,
            source: Some(("Avito", "https://avito.ru")),
            requirements: &[],
            languages: &[Russian],
            other_languages: &[],
        },
        Seed {
            id: "3",
            title: "IT Support Specialist",
            company: "Tech Solutions Russia",
            location: "Moscow",
            kind: JobType::FullTime,
            salary: "80,000 - 120,000 RUB/month",
            description: "Looking for an IT support specialist with experience in troubleshooting and customer service.",
            days_ago: 2,
            source: Some(("SuperJob", "https://superjob.ru")),
            requirements: &["IT degree or equivalent", "2+ years experience", "Russian language"],
            languages: &[Russian],
            other_languages: &[],
        },
        Seed {
            id: "4",
            title: "Event Staff",
            company: "Event Management Co.",
            location: "Kazan",
            kind: JobType::Temporary,
            salary: "1,500 RUB/day",
            description: "Temporary event staff needed for upcoming festivals and conferences. Multiple dates available.",
            days_ago: 3,
            source: None,
            requirements: &[],
            languages: &[Both],
            other_languages: &[],
        },
        Seed {
            id: "5",
            title: "Translator (English-Russian)",
            company: "Translation Services",
            location: "Remote",
            kind: JobType::PartTime,
            salary: "500 RUB/hour",
            description: "Remote translation work. Flexible schedule, work from home. Must be bilingual.",
            days_ago: 4,
            source: Some(("Rabota.ru", "https://rabota.ru")),
            requirements: &[],
            languages: &[Both],
            other_languages: &[],
        },
        Seed {
            id: "6",
            title: "Sales Manager",
            company: "International Trading",
            location: "Moscow",
            kind: JobType::FullTime,
            salary: "70,000 - 100,000 RUB/month + commission",
            description: "Sales manager position for international trading company. Experience in B2B sales required.",
            days_ago: 5,
            source: None,
            requirements: &["Sales experience", "B2B background", "English proficiency"],
            languages: &[English],
            other_languages: &[],
        },
        Seed {
            id: "7",
            title: "French Language Tutor",
            company: "Multilingual Academy",
            location: "St. Petersburg",
            kind: JobType::PartTime,
            salary: "800 RUB/hour",
            description: "Looking for a native French speaker to teach French language classes. Flexible schedule.",
            days_ago: 6,
            source: None,
            requirements: &[],
            languages: &[Other],
            other_languages: &["French"],
        },
        Seed {
            id: "8",
            title: "Customer Service Representative",
            company: "International Call Center",
            location: "Moscow",
            kind: JobType::FullTime,
            salary: "50,000 - 70,000 RUB/month",
            description: "Customer service position requiring both English and Russian language skills for international clients.",
            days_ago: 7,
            source: None,
            requirements: &[],
            languages: &[Both],
            other_languages: &[],
        },
    ]
}

pub static JOBS: Lazy<Directory<Job>> = Lazy::new(|| {
    let now = Utc::now();
    Directory::new(
        "jobs",
        seeds().into_iter().map(|s| s.build(now)).collect(),
        SortOrder::ByName,
    )
});

/// Filter by type and language requirement, then search / 按类型和语言过滤后搜索
pub fn search(query: &JobQuery) -> ResultSet<&'static Job> {
    let filter = Filter::new()
        .when(&query.kind, |job: &Job, kind: &JobType| job.kind == *kind)
        .when(&query.language, |job: &Job, lang: &LanguageRequirement| {
            job.languages.contains(lang)
        });
    JOBS.query(&filter, super::search_text(&query.search))
}

/// Job submitted through the posting form / 职位发布表单
///
/// `type` and `languages` stay raw strings so that an unknown tag is
/// reported as an invalid field instead of failing the whole body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub salary: String,
    pub description: String,
    pub requirements: String,
    pub languages: Vec<String>,
    pub other_languages: String,
    pub contact_email: String,
    pub contact_phone: String,
}

impl JobPosting {
    /// Employment type; blank means full-time, unknown is `None` / 职位类型
    pub fn job_type(&self) -> Option<JobType> {
        if self.kind.trim().is_empty() {
            return Some(JobType::FullTime);
        }
        self.kind.parse().ok()
    }

    /// Language tags, `None` when any tag is unknown / 语言要求
    pub fn language_tags(&self) -> Option<Vec<LanguageRequirement>> {
        self.languages.iter().map(|tag| tag.parse::<LanguageRequirement>().ok()).collect()
    }

    /// Names of fields that block the submission / 校验失败的字段
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        for (name, value) in [
            ("title", &self.title),
            ("company", &self.company),
            ("location", &self.location),
            ("description", &self.description),
        ] {
            if value.trim().is_empty() {
                missing.push(name);
            }
        }
        if self.job_type().is_none() {
            missing.push("type");
        }
        match self.language_tags() {
            None => missing.push("languages"),
            Some(tags) if tags.is_empty() => missing.push("languages"),
            Some(tags) => {
                if tags.contains(&LanguageRequirement::Other) && self.other_languages.trim().is_empty() {
                    missing.push("otherLanguages");
                }
            }
        }
        missing
    }

    /// Requirements are entered one per line / 每行一条要求
    pub fn requirement_list(&self) -> Vec<String> {
        self.requirements
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn ids<'a>(r: &ResultSet<&'a Job>) -> Vec<&'a str> {
        r.data.iter().map(|j| j.id.as_str()).collect()
    }

    fn query(search: Option<&str>, kind: Option<&str>, language: Option<&str>) -> JobQuery {
        JobQuery {
            search: search.map(str::to_string),
            kind: Constraint::parse(kind),
            language: Constraint::parse(language),
        }
    }

    #[test]
    fn test_ids_unique() {
        let ids: HashSet<String> = JOBS.records().iter().map(|j| j.id.clone()).collect();
        assert_eq!(ids.len(), JOBS.total());
        assert_eq!(JOBS.total(), 8);
    }

    #[test]
    fn test_part_time_russian_is_conjunction() {
        let result = search(&query(None, Some("part-time"), Some("russian")));
        assert_eq!(ids(&result), vec!["2"]);
        for job in &result.data {
            assert_eq!(job.kind, JobType::PartTime);
            assert!(job.languages.contains(&LanguageRequirement::Russian));
        }
        assert_eq!(result.total, 8);
    }

    #[test]
    fn test_type_only() {
        let result = search(&query(None, Some("part-time"), Some("all")));
        // alphabetical by title
        assert_eq!(ids(&result), vec!["7", "2", "5"]);
    }

    #[test]
    fn test_unknown_type_is_unconstrained() {
        let result = search(&query(None, Some("freelance"), None));
        assert_eq!(result.count, 8);
    }

    #[test]
    fn test_search_description() {
        let result = search(&query(Some("flexible schedule"), None, None));
        assert_eq!(ids(&result), vec!["7", "5"]);
    }

    #[test]
    fn test_search_and_filter() {
        let result = search(&query(Some("moscow"), Some("full-time"), Some("english")));
        assert_eq!(ids(&result), vec!["1", "6"]);
    }

    #[test]
    fn test_posting_validation() {
        let mut posting = JobPosting {
            title: "Barista".to_string(),
            company: "Coffee".to_string(),
            location: "Kazan".to_string(),
            description: "Morning shifts".to_string(),
            ..Default::default()
        };
        assert_eq!(posting.missing_fields(), vec!["languages"]);

        posting.languages = vec!["other".to_string()];
        assert_eq!(posting.missing_fields(), vec!["otherLanguages"]);

        posting.other_languages = "Tatar".to_string();
        assert!(posting.missing_fields().is_empty());
        assert_eq!(posting.job_type(), Some(JobType::FullTime));
    }

    #[test]
    fn test_posting_unknown_tags_are_reported() {
        let posting = JobPosting {
            title: "Courier".to_string(),
            company: "Delivery Club".to_string(),
            location: "Moscow".to_string(),
            description: "Evening deliveries".to_string(),
            kind: "freelance".to_string(),
            languages: vec!["russian".to_string(), "klingon".to_string()],
            ..Default::default()
        };
        assert_eq!(posting.job_type(), None);
        assert_eq!(posting.language_tags(), None);
        assert_eq!(posting.missing_fields(), vec!["type", "languages"]);
    }

    #[test]
    fn test_requirement_list() {
        let posting = JobPosting { requirements: "Russian B1\n\n  Night shifts \n".to_string(), ..Default::default() };
        assert_eq!(posting.requirement_list(), vec!["Russian B1", "Night shifts"]);
    }

    #[test]
    fn test_job_type_round_trip_names() {
        assert_eq!("Part-Time".parse::<JobType>().unwrap(), JobType::PartTime);
        assert_eq!(JobType::FullTime.to_string(), "full-time");
        assert_eq!(serde_json::to_value(JobType::Temporary).unwrap(), "temporary");
    }
}
