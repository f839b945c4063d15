use serde::Serialize;

use crate::profile::models::Profile;

/// The single "next best action" shown next to the score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreHint {
    pub label: &'static str,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub section: &'static str,
    pub points: u32,
    pub met: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletenessReport {
    pub score: u32,
    pub hint: Option<ScoreHint>,
    pub checks: Vec<CheckResult>,
}

struct Check {
    section: &'static str,
    points: u32,
    hint: &'static str,
    met: fn(&Profile) -> bool,
}

const MAX_SCORE: u32 = 100;

// Order matters: the first unmet check is the one reported as the hint.
const CHECKS: &[Check] = &[
    Check {
        section: "personal",
        points: 15,
        hint: "Add personal details",
        met: |p| !p.full_name.is_empty() && !p.email.is_empty(),
    },
    Check {
        section: "experience",
        points: 25,
        hint: "Add employment history",
        met: |p| !p.experience.is_empty(),
    },
    Check {
        section: "education",
        points: 15,
        hint: "Add education",
        met: |p| !p.education.is_empty(),
    },
    Check {
        section: "skills",
        points: 10,
        hint: "Add skills",
        met: |p| p.skills.chars().count() > 5,
    },
    Check {
        section: "summary",
        points: 15,
        hint: "Add profile summary",
        met: |p| p.summary.chars().count() > 20,
    },
    Check {
        section: "extras",
        points: 20,
        hint: "Add extra sections",
        met: |p| !p.languages.is_empty() || !p.projects.is_empty(),
    },
];

pub fn compute_completeness_report(profile: &Profile) -> CompletenessReport {
    let mut score = 0;
    let mut hint = None;
    let mut checks = Vec::with_capacity(CHECKS.len());

    for check in CHECKS {
        let met = (check.met)(profile);
        if met {
            score += check.points;
        } else if hint.is_none() {
            hint = Some(ScoreHint {
                label: check.hint,
                points: check.points,
            });
        }
        checks.push(CheckResult {
            section: check.section,
            points: check.points,
            met,
        });
    }

    CompletenessReport {
        score: score.min(MAX_SCORE),
        hint,
        checks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::models::{Education, Experience, Language, Project};

    fn full_profile() -> Profile {
        let mut p = Profile {
            full_name: "Alex Morgan".to_string(),
            email: "alex@x.com".to_string(),
            skills: "Digital Marketing, SEO".to_string(),
            summary: "Results-driven marketer with 7 years of experience.".to_string(),
            ..Default::default()
        };
        p.experience.push_new(Experience::default());
        p.education.push_new(Education::default());
        p.languages.push_new(Language::default());
        p
    }

    #[test]
    fn test_empty_profile_scores_zero_with_personal_hint() {
        let report = compute_completeness_report(&Profile::default());
        assert_eq!(report.score, 0);
        assert_eq!(
            report.hint,
            Some(ScoreHint {
                label: "Add personal details",
                points: 15
            })
        );
        assert!(report.checks.iter().all(|c| !c.met));
    }

    #[test]
    fn test_full_profile_scores_100_without_hint() {
        let report = compute_completeness_report(&full_profile());
        assert_eq!(report.score, 100);
        assert_eq!(report.hint, None);
    }

    #[test]
    fn test_weights_sum_to_max() {
        assert_eq!(CHECKS.iter().map(|c| c.points).sum::<u32>(), MAX_SCORE);
    }

    #[test]
    fn test_name_without_email_is_not_personal() {
        let p = Profile {
            full_name: "Alex".to_string(),
            ..Default::default()
        };
        let report = compute_completeness_report(&p);
        assert_eq!(report.score, 0);
        assert_eq!(report.hint.unwrap().label, "Add personal details");
    }

    #[test]
    fn test_scenario_education_gap_reported_before_skills() {
        let mut p = Profile {
            full_name: "Alex Morgan".to_string(),
            email: "alex@x.com".to_string(),
            skills: "SEO".to_string(),
            ..Default::default()
        };
        p.experience.push_new(Experience::default());

        let report = compute_completeness_report(&p);
        assert_eq!(report.score, 40);
        assert_eq!(
            report.hint,
            Some(ScoreHint {
                label: "Add education",
                points: 15
            })
        );
    }

    #[test]
    fn test_skills_threshold_is_more_than_five_chars() {
        let mut p = full_profile();
        p.skills = "Rust,".to_string();
        let report = compute_completeness_report(&p);
        assert_eq!(report.score, 90);
        assert_eq!(report.hint.unwrap().label, "Add skills");

        p.skills = "Rust, ".to_string();
        assert_eq!(compute_completeness_report(&p).score, 100);
    }

    #[test]
    fn test_summary_threshold_is_more_than_twenty_chars() {
        let mut p = full_profile();
        p.summary = "a".repeat(20);
        let report = compute_completeness_report(&p);
        assert_eq!(report.score, 85);
        assert_eq!(report.hint.unwrap().label, "Add profile summary");

        p.summary.push('a');
        assert_eq!(compute_completeness_report(&p).score, 100);
    }

    #[test]
    fn test_lengths_count_characters_not_bytes() {
        let mut p = full_profile();
        // 3 chars, 9 bytes
        p.skills = "日本語".to_string();
        assert_eq!(compute_completeness_report(&p).score, 90);
    }

    #[test]
    fn test_projects_alone_satisfy_extras() {
        let mut p = full_profile();
        p.languages = Default::default();
        p.projects.push_new(Project::default());
        assert_eq!(compute_completeness_report(&p).score, 100);
    }

    #[test]
    fn test_only_first_gap_is_reported() {
        let mut p = full_profile();
        p.education = Default::default();
        p.summary.clear();
        p.languages = Default::default();
        let report = compute_completeness_report(&p);
        assert_eq!(report.score, 50);
        assert_eq!(report.hint.unwrap().label, "Add education");
        assert_eq!(report.checks.iter().filter(|c| !c.met).count(), 3);
    }

    #[test]
    fn test_meeting_any_single_check_never_lowers_score() {
        // Flip each check on, one at a time, from every profile state with that check off.
        type Setter = fn(&mut Profile);
        let setters: [Setter; 6] = [
            |p| {
                p.full_name = "A".into();
                p.email = "a@b".into();
            },
            |p| {
                p.experience.push_new(Experience::default());
            },
            |p| {
                p.education.push_new(Education::default());
            },
            |p| p.skills = "Rust, Go".into(),
            |p| p.summary = "x".repeat(30),
            |p| {
                p.projects.push_new(Project::default());
            },
        ];

        for mask in 0u32..64 {
            let mut base = Profile::default();
            for (i, set) in setters.iter().enumerate() {
                if mask & (1 << i) != 0 {
                    set(&mut base);
                }
            }
            let before = compute_completeness_report(&base).score;
            for (i, set) in setters.iter().enumerate() {
                if mask & (1 << i) == 0 {
                    let mut flipped = base.clone();
                    set(&mut flipped);
                    let after = compute_completeness_report(&flipped).score;
                    assert!(after >= before, "mask {mask:#b}, check {i}");
                    assert_eq!(after - before, CHECKS[i].points);
                }
            }
        }
    }

    #[test]
    fn test_hint_always_matches_first_unmet_check() {
        let mut p = full_profile();
        p.summary.clear();
        p.projects = Default::default();
        p.languages = Default::default();
        let report = compute_completeness_report(&p);
        let first_unmet = report.checks.iter().find(|c| !c.met).unwrap();
        assert_eq!(first_unmet.section, "summary");
        assert_eq!(report.hint.unwrap().points, first_unmet.points);
    }
}
