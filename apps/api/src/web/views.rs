use askama::Template;

use crate::analysis::service::AnalysisReport;
use crate::models::analysis::AnalysisResultRow;
use crate::models::job::Job;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "notice-success",
            NoticeLevel::Info => "notice-info",
            NoticeLevel::Warning => "notice-warning",
            NoticeLevel::Error => "notice-error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Notice {
            level,
            message: message.into(),
        }
    }
}

/// Best-match panel shown after a successful analysis.
#[derive(Debug, Clone)]
pub struct OutcomeView {
    pub title: String,
    pub company: String,
    pub score: String,
    pub missing: String,
    pub skills: String,
}

impl From<&AnalysisReport> for OutcomeView {
    fn from(report: &AnalysisReport) -> Self {
        let skills = if report.extracted_skills.is_empty() {
            "none detected".to_string()
        } else {
            report
                .extracted_skills
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        };
        OutcomeView {
            title: report.best_match.title.clone(),
            company: report.best_match.company.clone(),
            score: format!("{:.2}", report.match_score),
            missing: report.missing_skills_display.clone(),
            skills,
        }
    }
}

/// One line of the recent-analyses table.
#[derive(Debug, Clone)]
pub struct RecentRow {
    pub name: String,
    pub email: String,
    pub job_id: i64,
    pub score: String,
    pub date: String,
}

impl From<&AnalysisResultRow> for RecentRow {
    fn from(row: &AnalysisResultRow) -> Self {
        RecentRow {
            name: row.user_name.clone(),
            email: row.user_email.clone(),
            job_id: row.job_id,
            score: format!("{:.2}", row.match_score),
            date: row.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub jobs: Vec<Job>,
    pub recent: Vec<RecentRow>,
    pub outcome: Option<OutcomeView>,
    pub analysis_notices: Vec<Notice>,
    pub job_notice: Option<Notice>,
}
