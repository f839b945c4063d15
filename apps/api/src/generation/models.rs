//! Derived entities produced by generation calls. Each one replaces its
//! predecessor wholesale; nothing here is merged field by field.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bullets rewritten for one experience or project entry, keyed by that entry's id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancedEntry {
    pub id: Uuid,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedResume {
    pub professional_summary: String,
    pub enhanced_experience: Vec<EnhancedEntry>,
    pub enhanced_projects: Vec<EnhancedEntry>,
    pub skills_list: Vec<String>,
}

impl GeneratedResume {
    /// Flattens the resume into the plain text sent for job-match analysis.
    pub fn to_plain_text(&self) -> String {
        let join_bullets = |entries: &[EnhancedEntry]| {
            entries
                .iter()
                .map(|e| e.bullets.join(" "))
                .collect::<Vec<_>>()
                .join(" ")
        };

        let mut text = format!(
            "Summary: {}\nExperience: {}\n",
            self.professional_summary,
            join_bullets(&self.enhanced_experience)
        );
        if !self.enhanced_projects.is_empty() {
            text.push_str(&format!(
                "Projects: {}\n",
                join_bullets(&self.enhanced_projects)
            ));
        }
        text.push_str(&format!("Skills: {}", self.skills_list.join(", ")));
        text
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// Always within 0..=100, whatever the model said.
    pub score: u8,
    pub missing_keywords: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Match analysis exactly as the model returned it, before the score is coerced.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMatchResult {
    pub score: f64,
    pub missing_keywords: Vec<String>,
    pub suggestions: Vec<String>,
}

impl From<RawMatchResult> for MatchResult {
    fn from(raw: RawMatchResult) -> Self {
        MatchResult {
            score: clamp_score(raw.score),
            missing_keywords: raw.missing_keywords,
            suggestions: raw.suggestions,
        }
    }
}

/// Rounds to the nearest integer and clamps into 0..=100.
pub fn clamp_score(score: f64) -> u8 {
    if score.is_nan() {
        return 0;
    }
    score.round().clamp(0.0, 100.0) as u8
}

pub const COVER_LETTER_FALLBACK: &str = "Could not generate cover letter.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverLetter {
    pub text: String,
}

impl CoverLetter {
    /// The letter, or the fallback notice when the model wrote nothing.
    pub fn display_text(&self) -> &str {
        if self.text.trim().is_empty() {
            COVER_LETTER_FALLBACK
        } else {
            &self.text
        }
    }
}
