//! Scores a resume's skills against every stored job and picks the best one.
//!
//! `AppState` holds an `Arc<dyn SimilarityScorer>`; `TfIdfScorer` is the default backend.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use crate::analysis::tfidf::{cosine_similarity, TfIdfMatrix};
use crate::models::job::Job;

/// Display value for a best match that covers every required skill.
pub const NO_MISSING_SKILLS: &str = "None";

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Scores one resume document against a list of job documents.
/// Implementations return one score in [0.0, 1.0] per job, in input order.
pub trait SimilarityScorer: Send + Sync {
    fn score(&self, resume: &str, jobs: &[&str]) -> Vec<f64>;

    /// Backend label reported alongside results.
    fn backend(&self) -> &'static str;
}

/// TF-IDF weighting over the resume plus all jobs, compared with cosine similarity.
pub struct TfIdfScorer;

impl SimilarityScorer for TfIdfScorer {
    fn score(&self, resume: &str, jobs: &[&str]) -> Vec<f64> {
        if jobs.is_empty() {
            return Vec::new();
        }

        let mut corpus = Vec::with_capacity(jobs.len() + 1);
        corpus.push(resume);
        corpus.extend_from_slice(jobs);

        let matrix = TfIdfMatrix::fit_transform(&corpus);
        debug!(
            documents = matrix.len(),
            vocabulary = matrix.vocabulary_len(),
            "fitted tf-idf matrix"
        );

        let Some(resume_row) = matrix.row(0) else {
            return vec![0.0; jobs.len()];
        };
        (1..matrix.len())
            .map(|i| {
                matrix
                    .row(i)
                    .map(|job_row| cosine_similarity(resume_row, job_row))
                    .unwrap_or(0.0)
            })
            .collect()
    }

    fn backend(&self) -> &'static str {
        "tfidf"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Selection and reporting helpers
// ────────────────────────────────────────────────────────────────────────────

/// Per-job similarity, in candidate order.
#[derive(Debug, Clone, Serialize)]
pub struct JobScore {
    pub job_id: i64,
    pub title: String,
    pub similarity: f64,
    pub match_score: f64,
}

/// Scores `skills` against every job. The resume document is the space-joined skill set.
pub fn score_jobs(
    scorer: &dyn SimilarityScorer,
    skills: &BTreeSet<String>,
    jobs: &[Job],
) -> Vec<JobScore> {
    let resume = skills.iter().map(String::as_str).collect::<Vec<_>>().join(" ");
    let job_texts: Vec<&str> = jobs.iter().map(|j| j.skills_required.as_str()).collect();
    let similarities = scorer.score(&resume, &job_texts);

    jobs.iter()
        .zip(similarities)
        .map(|(job, similarity)| JobScore {
            job_id: job.job_id,
            title: job.title.clone(),
            similarity,
            match_score: to_percentage(similarity),
        })
        .collect()
}

/// Index of the highest score; the first one wins a tie. `None` for an empty slice.
pub fn select_best_match(scores: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &score) in scores.iter().enumerate() {
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((i, score)),
        }
    }
    best.map(|(i, _)| i)
}

/// Scales a similarity to a 0–100 percentage rounded to two decimals.
pub fn to_percentage(similarity: f64) -> f64 {
    ((similarity * 100.0 * 100.0).round() / 100.0).clamp(0.0, 100.0)
}

/// The job's normalised skill tokens not present in `extracted`, in job order, without repeats.
pub fn missing_skills(job: &Job, extracted: &BTreeSet<String>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    job.skill_tokens()
        .into_iter()
        .filter(|token| !extracted.contains(token))
        .filter(|token| seen.insert(token.clone()))
        .collect()
}

/// Comma-joined missing skills, or the `None` marker when nothing is missing.
pub fn format_missing(missing: &[String]) -> String {
    if missing.is_empty() {
        NO_MISSING_SKILLS.to_string()
    } else {
        missing.join(", ")
    }
}
