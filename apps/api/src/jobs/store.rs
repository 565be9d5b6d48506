use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::job::Job;

/// A job posting as submitted through either form or the JSON API.
#[derive(Debug, Clone, Deserialize)]
pub struct NewJob {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub skills_required: String,
    #[serde(default)]
    pub description: String,
}

impl NewJob {
    /// Every field must be non-blank. Values are otherwise stored as entered.
    pub fn validate(&self) -> Result<(), AppError> {
        let blank: Vec<&str> = [
            ("title", &self.title),
            ("company", &self.company),
            ("skills_required", &self.skills_required),
            ("description", &self.description),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if blank.is_empty() {
            Ok(())
        } else {
            warn!("Rejected job posting with blank fields: {}", blank.join(", "));
            Err(AppError::Validation(format!(
                "Please fill in all fields before submitting (missing: {}).",
                blank.join(", ")
            )))
        }
    }
}

/// The three postings inserted into an empty store.
pub fn sample_jobs() -> Vec<NewJob> {
    vec![
        NewJob {
            title: "Data Analyst".to_string(),
            company: "Google".to_string(),
            skills_required: "Python, SQL, Tableau, PowerBI, Excel".to_string(),
            description: "Analyze data and create reports.".to_string(),
        },
        NewJob {
            title: "Machine Learning Engineer".to_string(),
            company: "Microsoft".to_string(),
            skills_required: "Python, Machine Learning, TensorFlow, PyTorch, Deep Learning"
                .to_string(),
            description: "Build and deploy ML models.".to_string(),
        },
        NewJob {
            title: "Backend Developer".to_string(),
            company: "Amazon".to_string(),
            skills_required: "Python, Django, REST API, MySQL, Docker".to_string(),
            description: "Develop scalable backend systems.".to_string(),
        },
    ]
}

/// Validates and inserts one job posting.
pub async fn insert_job(pool: &SqlitePool, job: &NewJob) -> Result<Job, AppError> {
    job.validate()?;

    let row = sqlx::query_as::<_, Job>(
        r#"
        INSERT INTO jobs (title, company, skills_required, description)
        VALUES (?, ?, ?, ?)
        RETURNING job_id, title, company, skills_required, description
        "#,
    )
    .bind(&job.title)
    .bind(&job.company)
    .bind(&job.skills_required)
    .bind(&job.description)
    .fetch_one(pool)
    .await?;

    info!("Inserted job {} ({} @ {})", row.job_id, row.title, row.company);
    Ok(row)
}

/// Every stored job, oldest first. This order is the matcher's candidate order.
pub async fn list_jobs(pool: &SqlitePool) -> Result<Vec<Job>, AppError> {
    Ok(sqlx::query_as::<_, Job>(
        "SELECT job_id, title, company, skills_required, description FROM jobs ORDER BY job_id ASC",
    )
    .fetch_all(pool)
    .await?)
}

pub async fn get_job(pool: &SqlitePool, job_id: i64) -> Result<Job, AppError> {
    sqlx::query_as::<_, Job>(
        "SELECT job_id, title, company, skills_required, description FROM jobs WHERE job_id = ?",
    )
    .bind(job_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))
}

pub async fn count_jobs(pool: &SqlitePool) -> Result<i64, AppError> {
    Ok(sqlx::query_scalar("SELECT COUNT(*) FROM jobs")
        .fetch_one(pool)
        .await?)
}

/// Inserts the sample postings when the store is empty. Returns how many rows were added.
pub async fn seed_sample_jobs(pool: &SqlitePool) -> Result<usize, AppError> {
    if count_jobs(pool).await? > 0 {
        return Ok(0);
    }

    let samples = sample_jobs();
    for job in &samples {
        insert_job(pool, job).await?;
    }
    info!("Seeded {} sample jobs", samples.len());
    Ok(samples.len())
}
