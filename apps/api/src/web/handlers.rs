//! Axum route handlers for the HTML page.
//!
//! Input problems (blank resume, unreadable upload, blank job field) are shown
//! on the page as notices. Store and rendering failures propagate as `AppError`.

use askama::Template;
use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    response::Html,
    Form,
};
use tracing::warn;

use crate::analysis::document::{combine_resume_text, UploadedFile};
use crate::analysis::service::{analyze_resume, Submission};
use crate::errors::AppError;
use crate::jobs::store::{insert_job, list_jobs, NewJob};
use crate::results::store::{recent_results, RECENT_ANALYSES_LIMIT};
use crate::state::AppState;
use crate::web::views::{IndexPage, Notice, NoticeLevel, OutcomeView, RecentRow};

/// Parts of the page that depend on the action just taken.
#[derive(Default)]
struct PageExtras {
    outcome: Option<OutcomeView>,
    analysis_notices: Vec<Notice>,
    job_notice: Option<Notice>,
}

/// GET /
pub async fn handle_index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    render_page(&state, PageExtras::default()).await
}

/// POST /analyze (multipart/form-data)
pub async fn handle_analyze_form(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Html<String>, AppError> {
    let form = read_analysis_form(multipart).await?;

    let text = match combine_resume_text(form.upload.as_ref(), Some(&form.resume_text)).await {
        Ok(text) => text,
        Err(e) => return render_input_problem(&state, e).await,
    };

    let submission = Submission {
        name: form.name,
        email: form.email,
        resume_text: text,
    };
    let report = match analyze_resume(&state.db, state.scorer.as_ref(), &submission).await {
        Ok(report) => report,
        Err(e) => return render_input_problem(&state, e).await,
    };

    let extras = PageExtras {
        outcome: Some(OutcomeView::from(&report)),
        analysis_notices: vec![Notice::new(NoticeLevel::Info, "Result saved successfully!")],
        job_notice: None,
    };
    render_page(&state, extras).await
}

/// POST /jobs (application/x-www-form-urlencoded)
pub async fn handle_add_job_form(
    State(state): State<AppState>,
    Form(job): Form<NewJob>,
) -> Result<Html<String>, AppError> {
    let notice = match insert_job(&state.db, &job).await {
        Ok(created) => Notice::new(
            NoticeLevel::Success,
            format!("Job '{}' added successfully!", created.title),
        ),
        Err(AppError::Validation(_)) => Notice::new(
            NoticeLevel::Error,
            "Please fill in all fields before submitting.",
        ),
        Err(e) => return Err(e),
    };

    let extras = PageExtras {
        job_notice: Some(notice),
        ..PageExtras::default()
    };
    render_page(&state, extras).await
}

async fn render_input_problem(state: &AppState, error: AppError) -> Result<Html<String>, AppError> {
    let level = match &error {
        AppError::Validation(_) => NoticeLevel::Warning,
        _ => NoticeLevel::Error,
    };
    let message = match error.user_message() {
        Some(message) => message.to_string(),
        None => return Err(error),
    };
    let extras = PageExtras {
        analysis_notices: vec![Notice::new(level, message)],
        ..PageExtras::default()
    };
    render_page(state, extras).await
}

async fn render_page(state: &AppState, extras: PageExtras) -> Result<Html<String>, AppError> {
    let jobs = list_jobs(&state.db).await?;
    let recent = recent_results(&state.db, RECENT_ANALYSES_LIMIT)
        .await?
        .iter()
        .map(RecentRow::from)
        .collect();

    let page = IndexPage {
        jobs,
        recent,
        outcome: extras.outcome,
        analysis_notices: extras.analysis_notices,
        job_notice: extras.job_notice,
    };
    Ok(Html(page.render()?))
}

#[derive(Default)]
struct AnalysisForm {
    upload: Option<UploadedFile>,
    resume_text: String,
    name: String,
    email: String,
}

async fn read_analysis_form(mut multipart: Multipart) -> Result<AnalysisForm, AppError> {
    let mut form = AnalysisForm::default();

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "resume_file" => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(malformed)?;
                form.upload = Some(UploadedFile {
                    file_name,
                    content_type,
                    data,
                });
            }
            "resume_text" => form.resume_text = field.text().await.map_err(malformed)?,
            "name" => form.name = field.text().await.map_err(malformed)?,
            "email" => form.email = field.text().await.map_err(malformed)?,
            other => warn!("Ignoring unexpected form field '{other}'"),
        }
    }

    Ok(form)
}

fn malformed(e: MultipartError) -> AppError {
    AppError::Validation(format!("Malformed form submission: {e}"))
}
