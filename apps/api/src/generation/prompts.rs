// All model prompt templates for the Generation module.
// Templates use `{placeholder}` markers filled in one pass by `fill_template`.

use chrono::NaiveDate;

use crate::llm_client::prompts::{fill_template, JSON_ONLY_INSTRUCTION, RESUME_WRITER_PERSONA};
use crate::profile::models::Profile;

/// Resume text and job description are each cut to this many characters.
pub const MATCH_INPUT_LIMIT: usize = 5000;

pub const BULLET_COUNT: usize = 4;
pub const SKILL_COUNT: usize = 10;

/// Replace: {job_title}, {experience}
pub const SUMMARY_PROMPT_TEMPLATE: &str = "Write a professional, 2-3 sentence resume summary for a {job_title}.
Key experience/traits: {experience}.
Keep it punchy and energetic. Do not include a header.";

/// Replace: {count}, {role}, {company}, {json_only}
pub const EXPERIENCE_BULLETS_PROMPT_TEMPLATE: &str = "Generate {count} impactful, metric-driven resume bullet points for a {role} position at {company}.
Focus on achievements. Return strictly a JSON array of strings.
{json_only}";

/// Replace: {count}, {role}, {json_only}
pub const SKILLS_PROMPT_TEMPLATE: &str = "List {count} relevant technical and soft skills for a {role}. Return strictly a JSON array of strings.
{json_only}";

/// Replace: {persona}, {profile_json}, {json_only}
pub const OPTIMIZE_RESUME_PROMPT_TEMPLATE: &str = r#"{persona}
Analyze the provided user profile and generate professional, action-oriented content.

1. Rewrite the summary to be punchy and professional.
2. For each experience entry, convert the description into 3-4 strong, quantifiable bullet points using action verbs.
3. For each project entry, convert the description into 2-3 impactful bullet points highlighting tech stack and outcome.
4. Extract and categorize key hard and soft skills into a clean list.

HARD RULES:
- `enhancedExperience` must contain exactly one item per experience entry, with `id` copied verbatim from the input.
- `enhancedProjects` must contain exactly one item per project entry, with `id` copied verbatim from the input.
- Never invent ids.

Input Data:
{profile_json}

{json_only}"#;

/// Replace: {resume_text}, {job_description}, {json_only}
pub const MATCH_PROMPT_TEMPLATE: &str = r#"You are an ATS (Applicant Tracking System) Simulator.
Compare the following Resume text against the Job Description.

Resume:
{resume_text}

Job Description:
{job_description}

Return a match score (0-100), a list of important missing keywords from the JD that are not in the resume, and 3 specific suggestions to improve the resume for this role.
{json_only}"#;

/// Replace: {identity_block}, {date}, {profile_json}, {job_description}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Write a professional, engaging cover letter for this candidate applying to the job described below.

Structure the cover letter as follows:
1. Header: Reproduce this candidate header verbatim at the very top, one item per line:
{identity_block}
2. Date: {date}
3. Salutation: Professional greeting.
4. Body: Write a confident but polite letter explaining why the candidate's specific experience and skills make them a good fit.

Candidate Profile:
{profile_json}

Job Description:
{job_description}

Format the output as plain text with line breaks."#;

pub fn build_summary_prompt(job_title: &str, experience: &str) -> String {
    fill_template(
        SUMMARY_PROMPT_TEMPLATE,
        &[("job_title", job_title), ("experience", experience)],
    )
}

pub fn build_experience_bullets_prompt(role: &str, company: &str) -> String {
    let count = BULLET_COUNT.to_string();
    fill_template(
        EXPERIENCE_BULLETS_PROMPT_TEMPLATE,
        &[
            ("count", count.as_str()),
            ("role", role),
            ("company", company),
            ("json_only", JSON_ONLY_INSTRUCTION),
        ],
    )
}

pub fn build_skills_prompt(role: &str) -> String {
    let count = SKILL_COUNT.to_string();
    fill_template(
        SKILLS_PROMPT_TEMPLATE,
        &[
            ("count", count.as_str()),
            ("role", role),
            ("json_only", JSON_ONLY_INSTRUCTION),
        ],
    )
}

pub fn build_optimize_resume_prompt(profile: &Profile) -> Result<String, serde_json::Error> {
    let profile_json = serde_json::to_string_pretty(profile)?;
    Ok(fill_template(
        OPTIMIZE_RESUME_PROMPT_TEMPLATE,
        &[
            ("persona", RESUME_WRITER_PERSONA),
            ("profile_json", profile_json.as_str()),
            ("json_only", JSON_ONLY_INSTRUCTION),
        ],
    ))
}

pub fn build_match_prompt(resume_text: &str, job_description: &str) -> String {
    fill_template(
        MATCH_PROMPT_TEMPLATE,
        &[
            ("resume_text", truncate_chars(resume_text, MATCH_INPUT_LIMIT)),
            (
                "job_description",
                truncate_chars(job_description, MATCH_INPUT_LIMIT),
            ),
            ("json_only", JSON_ONLY_INSTRUCTION),
        ],
    )
}

pub fn build_cover_letter_prompt(
    profile: &Profile,
    job_description: &str,
    today: NaiveDate,
) -> Result<String, serde_json::Error> {
    let profile_json = serde_json::to_string_pretty(profile)?;
    let identity = identity_block(profile);
    let date = today.format("%B %-d, %Y").to_string();
    Ok(fill_template(
        COVER_LETTER_PROMPT_TEMPLATE,
        &[
            ("identity_block", identity.as_str()),
            ("date", date.as_str()),
            ("profile_json", profile_json.as_str()),
            ("job_description", job_description),
        ],
    ))
}

/// Name, email and phone always; LinkedIn, website and location only when filled in.
pub fn identity_block(profile: &Profile) -> String {
    let mut lines = vec![
        profile.full_name.trim().to_string(),
        profile.email.trim().to_string(),
        profile.phone.trim().to_string(),
    ];
    lines.extend(
        [&profile.linkedin, &profile.website, &profile.location]
            .into_iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    );
    lines.join("\n")
}

/// Cuts `text` to at most `max` characters without splitting a code point.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> Profile {
        Profile {
            full_name: "Alex Morgan".to_string(),
            email: "alex@x.com".to_string(),
            phone: "555-0100".to_string(),
            location: "San Francisco, CA".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("short", 50), "short");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn test_match_prompt_truncates_both_inputs() {
        let resume = "r".repeat(MATCH_INPUT_LIMIT + 100);
        let jd = "j".repeat(MATCH_INPUT_LIMIT + 7);
        let prompt = build_match_prompt(&resume, &jd);
        assert!(prompt.contains(&"r".repeat(MATCH_INPUT_LIMIT)));
        assert!(!prompt.contains(&"r".repeat(MATCH_INPUT_LIMIT + 1)));
        assert!(prompt.contains(&"j".repeat(MATCH_INPUT_LIMIT)));
        assert!(!prompt.contains(&"j".repeat(MATCH_INPUT_LIMIT + 1)));
    }

    #[test]
    fn test_identity_block_skips_empty_optional_fields() {
        assert_eq!(
            identity_block(&profile()),
            "Alex Morgan\nalex@x.com\n555-0100\nSan Francisco, CA"
        );
    }

    #[test]
    fn test_cover_letter_prompt_carries_identity_and_date() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        let prompt = build_cover_letter_prompt(&profile(), "Rust engineer wanted", today).unwrap();
        assert!(prompt.contains("Alex Morgan\nalex@x.com\n555-0100\nSan Francisco, CA"));
        assert!(prompt.contains("Date: March 5, 2026"));
        assert!(prompt.contains("Rust engineer wanted"));
        assert!(!prompt.contains("{identity_block}"));
        assert!(!prompt.contains("{date}"));
    }

    #[test]
    fn test_bullets_prompt_fills_all_placeholders() {
        let prompt = build_experience_bullets_prompt("Engineer", "Acme");
        assert!(prompt.contains("Generate 4 impactful"));
        assert!(prompt.contains("Engineer position at Acme"));
        assert!(!prompt.contains("{"));
    }

    #[test]
    fn test_user_text_cannot_pull_in_other_inputs() {
        let mut p = profile();
        p.summary = "I love {job_description} roles".to_string();
        let today = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        let prompt = build_cover_letter_prompt(&p, "SECRET_JD", today).unwrap();
        assert_eq!(prompt.matches("SECRET_JD").count(), 1);
        assert!(prompt.contains("I love {job_description} roles"));
    }

    #[test]
    fn test_summary_prompt_keeps_braces_in_job_title() {
        let prompt = build_summary_prompt("Lead {experience} Engineer", "Rust");
        assert!(prompt.contains("for a Lead {experience} Engineer."));
        assert!(prompt.contains("Key experience/traits: Rust."));
    }

    #[test]
    fn test_optimize_prompt_embeds_profile_ids() {
        let mut p = profile();
        let id = p
            .experience
            .push_new(crate::profile::models::Experience::default())
            .id;
        let prompt = build_optimize_resume_prompt(&p).unwrap();
        assert!(prompt.contains(&id.to_string()));
        assert!(prompt.contains("\"fullName\": \"Alex Morgan\""));
    }
}
