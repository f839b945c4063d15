//! Generation Gateway: turns local intents into model requests and model
//! responses into typed results.
//!
//! Every structured response is checked against the declared `ResponseShape`
//! before it is deserialized, and nothing unchecked leaves this module.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::GenerationError;
use crate::generation::models::{
    CoverLetter, EnhancedEntry, GeneratedResume, MatchResult, RawMatchResult,
};
use crate::generation::prompts::{
    build_cover_letter_prompt, build_experience_bullets_prompt, build_match_prompt,
    build_optimize_resume_prompt, build_skills_prompt, build_summary_prompt, BULLET_COUNT,
    SKILL_COUNT,
};
use crate::llm_client::schema::{Field, ResponseShape};
use crate::llm_client::{strip_json_fences, LlmBackend, ModelRequest};
use crate::profile::models::Profile;

#[derive(Clone)]
pub struct GenerationGateway {
    backend: Arc<dyn LlmBackend>,
}

fn enhanced_entries_shape(id_description: &'static str) -> ResponseShape {
    ResponseShape::array_of(ResponseShape::Object(vec![
        Field::new("id", ResponseShape::String).described(id_description),
        Field::new("bullets", ResponseShape::string_list()),
    ]))
}

fn resume_shape() -> ResponseShape {
    ResponseShape::Object(vec![
        Field::new("professionalSummary", ResponseShape::String),
        Field::new(
            "enhancedExperience",
            enhanced_entries_shape("The same ID as the input experience"),
        ),
        Field::new(
            "enhancedProjects",
            enhanced_entries_shape("The same ID as the input project"),
        ),
        Field::new("skillsList", ResponseShape::string_list()),
    ])
}

fn match_shape() -> ResponseShape {
    ResponseShape::Object(vec![
        Field::new("score", ResponseShape::Number),
        Field::new("missingKeywords", ResponseShape::string_list()),
        Field::new("suggestions", ResponseShape::string_list()),
    ])
}

impl GenerationGateway {
    pub fn new(backend: Arc<dyn LlmBackend>) -> Self {
        Self { backend }
    }

    /// A 2-3 sentence summary. Empty model output is returned as an empty string.
    pub async fn summarize(
        &self,
        job_title: &str,
        experience_hint: &str,
    ) -> Result<String, GenerationError> {
        let job_title = require_non_blank("job title", job_title)?;
        info!("Generating summary for '{job_title}'");
        let text = self
            .call_text(build_summary_prompt(job_title, experience_hint.trim()))
            .await?;
        Ok(text.trim().to_string())
    }

    /// Four achievement bullets for one role. Both inputs must be non-blank;
    /// otherwise no request is sent.
    pub async fn draft_experience_bullets(
        &self,
        role: &str,
        company: &str,
    ) -> Result<Vec<String>, GenerationError> {
        let role = require_non_blank("role", role)?;
        let company = require_non_blank("company", company)?;
        info!("Drafting bullets for '{role}' at '{company}'");

        let bullets: Vec<String> = self
            .call_structured(
                build_experience_bullets_prompt(role, company),
                ResponseShape::string_list(),
            )
            .await?
            .unwrap_or_default();
        warn_on_count("experience bullets", BULLET_COUNT, bullets.len());
        Ok(bullets)
    }

    /// Ten skills relevant to `role`.
    pub async fn suggest_skills(&self, role: &str) -> Result<Vec<String>, GenerationError> {
        let role = require_non_blank("role", role)?;
        info!("Suggesting skills for '{role}'");

        let skills: Vec<String> = self
            .call_structured(build_skills_prompt(role), ResponseShape::string_list())
            .await?
            .unwrap_or_default();
        warn_on_count("skills", SKILL_COUNT, skills.len());
        Ok(skills)
    }

    /// Rewrites the whole profile. The response must echo every experience and
    /// project id exactly once and no other id.
    pub async fn optimize_resume(
        &self,
        profile: &Profile,
    ) -> Result<GeneratedResume, GenerationError> {
        info!(
            "Optimizing resume: {} experience, {} project entries",
            profile.experience.len(),
            profile.projects.len()
        );
        let prompt = build_optimize_resume_prompt(profile)?;
        let resume: GeneratedResume = self
            .call_structured(prompt, resume_shape())
            .await?
            .ok_or(GenerationError::EmptyResponse)?;

        check_correlation(
            "experience",
            profile.experience.ids(),
            &resume.enhanced_experience,
        )?;
        check_correlation("project", profile.projects.ids(), &resume.enhanced_projects)?;
        Ok(resume)
    }

    /// ATS-style comparison. Inputs are cut to 5000 characters each and the
    /// score is clamped into 0..=100.
    pub async fn analyze_match(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<MatchResult, GenerationError> {
        require_non_blank("resume text", resume_text)?;
        require_non_blank("job description", job_description)?;
        info!("Analyzing job match");

        let raw: RawMatchResult = self
            .call_structured(build_match_prompt(resume_text, job_description), match_shape())
            .await?
            .ok_or(GenerationError::EmptyResponse)?;
        if !(0.0..=100.0).contains(&raw.score) {
            warn!("Match score {} out of range, clamping", raw.score);
        }
        Ok(raw.into())
    }

    /// Plain-text letter. The identity block and date are requested in the
    /// prompt; their presence in the output is not verified.
    pub async fn draft_cover_letter(
        &self,
        profile: &Profile,
        job_description: &str,
        today: NaiveDate,
    ) -> Result<CoverLetter, GenerationError> {
        require_non_blank("job description", job_description)?;
        info!("Drafting cover letter");
        let prompt = build_cover_letter_prompt(profile, job_description.trim(), today)?;
        let text = self.call_text(prompt).await?;
        Ok(CoverLetter {
            text: text.trim().to_string(),
        })
    }

    async fn call_text(&self, prompt: String) -> Result<String, GenerationError> {
        Ok(self.backend.generate(&ModelRequest::text(prompt)).await?)
    }

    /// Returns `Ok(None)` when the model produced no text at all.
    async fn call_structured<T: DeserializeOwned>(
        &self,
        prompt: String,
        shape: ResponseShape,
    ) -> Result<Option<T>, GenerationError> {
        let request = ModelRequest::structured(prompt, shape.clone());
        let text = self.backend.generate(&request).await?;
        let text = strip_json_fences(&text);
        if text.is_empty() {
            debug!("Model returned empty text for a structured call");
            return Ok(None);
        }

        let value: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| GenerationError::SchemaViolation(format!("invalid JSON: {e}")))?;
        shape
            .check(&value)
            .map_err(|e| GenerationError::SchemaViolation(e.to_string()))?;
        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| GenerationError::SchemaViolation(e.to_string()))
    }
}

fn require_non_blank<'a>(what: &str, value: &'a str) -> Result<&'a str, GenerationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(GenerationError::Precondition(format!("{what} must not be empty")));
    }
    Ok(trimmed)
}

fn warn_on_count(what: &str, requested: usize, received: usize) {
    if requested != received {
        warn!("Requested {requested} {what}, model returned {received}");
    }
}

/// Each input id must come back exactly once, and only input ids may come back.
fn check_correlation(
    section: &str,
    expected: impl Iterator<Item = Uuid>,
    returned: &[EnhancedEntry],
) -> Result<(), GenerationError> {
    let expected: HashSet<Uuid> = expected.collect();
    let mut seen = HashSet::with_capacity(returned.len());

    for entry in returned {
        if !expected.contains(&entry.id) {
            return Err(GenerationError::SchemaViolation(format!(
                "unknown {section} id {}",
                entry.id
            )));
        }
        if !seen.insert(entry.id) {
            return Err(GenerationError::SchemaViolation(format!(
                "duplicate {section} id {}",
                entry.id
            )));
        }
    }

    if seen.len() != expected.len() {
        let missing = expected.len() - seen.len();
        return Err(GenerationError::SchemaViolation(format!(
            "{missing} {section} entries missing from response"
        )));
    }
    Ok(())
}
