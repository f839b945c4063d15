//! Generation pipelines: snapshot the session, issue a ticket, call the
//! gateway with the lock released, then re-lock and apply the result only if
//! the ticket is still the latest for its key.

use std::future::Future;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::{AppError, GenerationError};
use crate::generation::gateway::GenerationGateway;
use crate::generation::models::{CoverLetter, GeneratedResume, MatchResult};
use crate::profile::models::Profile;
use crate::session::status::{OperationKey, OperationKind, OperationStatus};
use crate::session::{Session, SessionStore};

const DEFAULT_SUMMARY_TITLE: &str = "Professional";
const DEFAULT_SKILLS_ROLE: &str = "General";
const ENTRY_GONE: &str = "experience entry no longer exists";

/// A generation result plus whether it was written into the session.
/// `applied` is false when a newer call for the same key was issued meanwhile.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub value: T,
    pub applied: bool,
}

async fn run_operation<I, T, Fut>(
    sessions: &SessionStore,
    sid: Uuid,
    key: OperationKey,
    prepare: impl FnOnce(&Session) -> Result<I, AppError>,
    call: impl FnOnce(I) -> Fut,
    apply: impl FnOnce(&mut Session, &T) -> Result<(), String>,
) -> Result<Outcome<T>, AppError>
where
    Fut: Future<Output = Result<T, GenerationError>>,
{
    let (ticket, input) = sessions
        .try_with_session(sid, |session| {
            let input = prepare(session)?;
            Ok((session.board.begin(key), input))
        })
        .await?;

    info!("{:?} started for session {sid}", key.kind);
    let result = call(input).await;

    sessions
        .try_with_session(sid, |session| {
            if !session.board.is_latest(&ticket) {
                debug!("{:?} for session {sid} superseded, dropping result", key.kind);
                return result
                    .map(|value| Outcome {
                        value,
                        applied: false,
                    })
                    .map_err(AppError::from);
            }

            match result {
                Ok(value) => match apply(session, &value) {
                    Ok(()) => {
                        session.board.finish(&ticket, OperationStatus::Succeeded);
                        info!("{:?} finished for session {sid}", key.kind);
                        Ok(Outcome {
                            value,
                            applied: true,
                        })
                    }
                    Err(reason) => {
                        warn!("{:?} result dropped for session {sid}: {reason}", key.kind);
                        session.board.finish(
                            &ticket,
                            OperationStatus::Failed {
                                reason: reason.clone(),
                            },
                        );
                        Err(AppError::NotFound(reason))
                    }
                },
                Err(e) => {
                    session.board.finish(
                        &ticket,
                        OperationStatus::Failed {
                            reason: e.to_string(),
                        },
                    );
                    Err(e.into())
                }
            }
        })
        .await
}

/// Summarize. The title defaults to the first experience role. The profile's
/// normalized skill list is the hint. An empty summary leaves the old one in place.
pub async fn generate_summary(
    sessions: &SessionStore,
    gateway: &GenerationGateway,
    sid: Uuid,
    job_title: Option<String>,
) -> Result<Outcome<String>, AppError> {
    run_operation(
        sessions,
        sid,
        OperationKey::of(OperationKind::Summarize),
        |session| {
            let title = non_blank(job_title)
                .or_else(|| session.profile.first_role().map(str::to_string))
                .unwrap_or_else(|| DEFAULT_SUMMARY_TITLE.to_string());
            Ok((title, session.profile.skill_list().join(", ")))
        },
        |(title, hint): (String, String)| async move { gateway.summarize(&title, &hint).await },
        |session: &mut Session, summary: &String| {
            if !summary.is_empty() {
                session.profile.summary = summary.clone();
            }
            Ok(())
        },
    )
    .await
}

/// DraftExperienceBullets for one entry. The bullets replace the entry's
/// description, one `• ` line each.
pub async fn generate_experience_bullets(
    sessions: &SessionStore,
    gateway: &GenerationGateway,
    sid: Uuid,
    entry_id: Uuid,
) -> Result<Outcome<Vec<String>>, AppError> {
    run_operation(
        sessions,
        sid,
        OperationKey::bullets_for(entry_id),
        |session| {
            let entry = session.profile.experience.get(entry_id).ok_or_else(|| {
                AppError::NotFound(format!("Experience entry {entry_id} not found"))
            })?;
            require_filled("role", &entry.role)?;
            require_filled("company", &entry.company)?;
            Ok((entry.role.clone(), entry.company.clone()))
        },
        |(role, company): (String, String)| async move {
            gateway.draft_experience_bullets(&role, &company).await
        },
        |session: &mut Session, bullets: &Vec<String>| {
            let entry = session
                .profile
                .experience
                .get_mut(entry_id)
                .ok_or_else(|| ENTRY_GONE.to_string())?;
            if !bullets.is_empty() {
                entry.description = format_bullets(bullets);
            }
            Ok(())
        },
    )
    .await
}

/// SuggestSkills. The role defaults to the first experience role. The
/// suggestions replace the skills string.
pub async fn generate_skills(
    sessions: &SessionStore,
    gateway: &GenerationGateway,
    sid: Uuid,
    role: Option<String>,
) -> Result<Outcome<Vec<String>>, AppError> {
    run_operation(
        sessions,
        sid,
        OperationKey::of(OperationKind::SuggestSkills),
        |session| {
            Ok(non_blank(role)
                .or_else(|| session.profile.first_role().map(str::to_string))
                .unwrap_or_else(|| DEFAULT_SKILLS_ROLE.to_string()))
        },
        |role: String| async move { gateway.suggest_skills(&role).await },
        |session: &mut Session, skills: &Vec<String>| {
            if !skills.is_empty() {
                session.profile.set_skill_list(skills);
            }
            Ok(())
        },
    )
    .await
}

pub async fn generate_resume(
    sessions: &SessionStore,
    gateway: &GenerationGateway,
    sid: Uuid,
) -> Result<Outcome<GeneratedResume>, AppError> {
    run_operation(
        sessions,
        sid,
        OperationKey::of(OperationKind::OptimizeResume),
        |session| Ok(session.profile.clone()),
        |profile: Profile| async move { gateway.optimize_resume(&profile).await },
        |session: &mut Session, resume: &GeneratedResume| {
            session.generated_resume = Some(resume.clone());
            Ok(())
        },
    )
    .await
}

/// AnalyzeMatch against the current generated resume.
pub async fn generate_match(
    sessions: &SessionStore,
    gateway: &GenerationGateway,
    sid: Uuid,
    job_description: String,
) -> Result<Outcome<MatchResult>, AppError> {
    require_filled("job description", &job_description)?;
    run_operation(
        sessions,
        sid,
        OperationKey::of(OperationKind::AnalyzeMatch),
        |session| {
            session
                .generated_resume
                .as_ref()
                .map(GeneratedResume::to_plain_text)
                .ok_or_else(|| {
                    AppError::Validation(
                        "Generate a resume before analyzing a job match".to_string(),
                    )
                })
        },
        |resume_text: String| async move {
            gateway
                .analyze_match(&resume_text, &job_description)
                .await
        },
        |session: &mut Session, result: &MatchResult| {
            session.match_result = Some(result.clone());
            Ok(())
        },
    )
    .await
}

pub async fn generate_cover_letter(
    sessions: &SessionStore,
    gateway: &GenerationGateway,
    sid: Uuid,
    job_description: String,
) -> Result<Outcome<CoverLetter>, AppError> {
    require_filled("job description", &job_description)?;
    run_operation(
        sessions,
        sid,
        OperationKey::of(OperationKind::DraftCoverLetter),
        |session| Ok(session.profile.clone()),
        |profile: Profile| async move {
            let today = Utc::now().date_naive();
            gateway
                .draft_cover_letter(&profile, &job_description, today)
                .await
        },
        |session: &mut Session, letter: &CoverLetter| {
            session.cover_letter = Some(letter.clone());
            Ok(())
        },
    )
    .await
}

/// Blank inputs are rejected before a ticket is issued, so they never
/// supersede a call already in flight.
fn require_filled(what: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{what} must not be empty")));
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn format_bullets(bullets: &[String]) -> String {
    bullets
        .iter()
        .map(|b| format!("• {}", b.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}
