use crate::profile::models::{Education, EntryList, Experience, Profile};

/// The example profile offered on the wizard's start screen.
pub fn sample_profile() -> Profile {
    Profile {
        full_name: "Alex Morgan".to_string(),
        email: "alex.morgan@example.com".to_string(),
        phone: "+1 (555) 123-4567".to_string(),
        linkedin: "linkedin.com/in/alexmorgan".to_string(),
        website: "alexmorgan.dev".to_string(),
        location: "San Francisco, CA".to_string(),
        summary: "Results-driven Marketing Manager with over 7 years of experience in digital \
                  strategy and brand growth. Proven track record of increasing ROI by 40% \
                  through targeted campaigns."
            .to_string(),
        experience: EntryList::from_iter([Experience {
            company: "TechFlow Solutions".to_string(),
            role: "Senior Marketing Manager".to_string(),
            start_date: "2021".to_string(),
            end_date: "Present".to_string(),
            description: "Led a team of 10 marketers. Increased annual revenue by 25% through \
                          SEO optimization. Launched 3 major product lines."
                .to_string(),
            ..Default::default()
        }]),
        education: EntryList::from_iter([Education {
            institution: "University of California, Berkeley".to_string(),
            degree: "B.S. Business Administration".to_string(),
            year: "2017".to_string(),
            ..Default::default()
        }]),
        skills: "Digital Marketing, SEO, Google Analytics, Team Leadership".to_string(),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::completeness::compute_completeness_report;

    #[test]
    fn test_sample_has_fresh_ids_each_time() {
        let a = sample_profile();
        let b = sample_profile();
        let a_id = a.experience.first().unwrap().id;
        assert!(!a_id.is_nil());
        assert_ne!(a_id, b.experience.first().unwrap().id);
    }

    #[test]
    fn test_sample_only_lacks_extras() {
        let report = compute_completeness_report(&sample_profile());
        assert_eq!(report.score, 80);
        assert_eq!(report.hint.unwrap().label, "Add extra sections");
    }
}
