use worklink_shared::{AddProfileRequest, CreateJob, EducationEntry, ExperienceEntry};

/// Draft state for the profile setup wizard.
///
/// Steps: 0 headline + bio, 1 location + skills, 2 experience, 3 education.
/// `advance` validates the current step and refuses to move on with a
/// message; the draft survives going back and forth.
#[derive(Debug, Clone, Default)]
pub struct ProfileWizard {
    pub active_step: usize,
    pub headline: String,
    pub bio: String,
    pub location: String,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
}

pub const PROFILE_WIZARD_STEPS: usize = 4;

impl ProfileWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_last_step(&self) -> bool {
        self.active_step + 1 >= PROFILE_WIZARD_STEPS
    }

    fn validate_step(&self) -> Result<(), String> {
        match self.active_step {
            0 => {
                if self.headline.trim().is_empty() {
                    return Err("Please enter your professional headline".into());
                }
                if self.bio.trim().is_empty() {
                    return Err("Please write a short bio".into());
                }
            }
            1 => {
                if self.location.trim().is_empty() {
                    return Err("Please enter your location".into());
                }
                if self.skills.is_empty() {
                    return Err("Please add at least one skill".into());
                }
            }
            // Experience and education may be empty for new graduates.
            _ => {}
        }
        Ok(())
    }

    /// Move to the next step if the current one validates. On failure the
    /// step is unchanged and the message is returned for inline display.
    pub fn advance(&mut self) -> Result<(), String> {
        self.validate_step()?;
        if !self.is_last_step() {
            self.active_step += 1;
        }
        Ok(())
    }

    pub fn back(&mut self) {
        self.active_step = self.active_step.saturating_sub(1);
    }

    pub fn add_skill(&mut self, skill: &str) {
        let skill = skill.trim();
        if !skill.is_empty() && !self.skills.iter().any(|s| s == skill) {
            self.skills.push(skill.to_string());
        }
    }

    pub fn remove_skill(&mut self, skill: &str) {
        self.skills.retain(|s| s != skill);
    }

    /// Assemble the one-shot creation payload. The profile service expects
    /// skills comma-joined and experience/education as JSON strings.
    pub fn build_request(&self, user_id: &str) -> AddProfileRequest {
        AddProfileRequest {
            user_id: user_id.to_string(),
            headline: self.headline.trim().to_string(),
            bio: self.bio.trim().to_string(),
            location: self.location.trim().to_string(),
            skills: self.skills.join(","),
            experience: serde_json::to_string(&self.experience).unwrap_or_else(|_| "[]".into()),
            education: serde_json::to_string(&self.education).unwrap_or_else(|_| "[]".into()),
        }
    }
}

/// Draft state for the job posting wizard.
///
/// Steps: 0 title + company, 1 description + skills, 2 location + salary.
/// Salary fields are kept as raw input strings and coerced on build.
#[derive(Debug, Clone, Default)]
pub struct JobWizard {
    pub active_step: usize,
    pub job_title: String,
    pub company_name: String,
    pub description: String,
    pub skills: Vec<String>,
    pub location: String,
    pub remote: bool,
    pub salary_min: String,
    pub salary_max: String,
}

pub const JOB_WIZARD_STEPS: usize = 3;

impl JobWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_last_step(&self) -> bool {
        self.active_step + 1 >= JOB_WIZARD_STEPS
    }

    fn validate_step(&self) -> Result<(), String> {
        match self.active_step {
            0 => {
                if self.job_title.trim().is_empty() {
                    return Err("Please enter the job title".into());
                }
                if self.company_name.trim().is_empty() {
                    return Err("Please enter the company name".into());
                }
            }
            1 => {
                if self.description.trim().is_empty() {
                    return Err("Please describe the role".into());
                }
            }
            _ => {}
        }
        Ok(())
    }

    pub fn advance(&mut self) -> Result<(), String> {
        self.validate_step()?;
        if !self.is_last_step() {
            self.active_step += 1;
        }
        Ok(())
    }

    pub fn back(&mut self) {
        self.active_step = self.active_step.saturating_sub(1);
    }

    pub fn add_skill(&mut self, skill: &str) {
        let skill = skill.trim();
        if !skill.is_empty() && !self.skills.iter().any(|s| s == skill) {
            self.skills.push(skill.to_string());
        }
    }

    /// Assemble the wire payload. `skills_required` goes out as a JSON
    /// string (the jobs service stores it verbatim) and blank salary fields
    /// coerce to 0.
    pub fn build_payload(&self) -> CreateJob {
        CreateJob {
            job_title: self.job_title.trim().to_string(),
            company_name: self.company_name.trim().to_string(),
            description: self.description.trim().to_string(),
            location: self.location.trim().to_string(),
            remote: self.remote,
            skills_required: serde_json::to_string(&self.skills)
                .unwrap_or_else(|_| "[]".into()),
            salary_min: coerce_salary(&self.salary_min),
            salary_max: coerce_salary(&self.salary_max),
        }
    }
}

fn coerce_salary(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_headline_blocks_step_zero_with_exact_message() {
        let mut wiz = ProfileWizard::new();
        wiz.bio = "I build backends.".into();

        let err = wiz.advance().unwrap_err();
        assert_eq!(err, "Please enter your professional headline");
        assert_eq!(wiz.active_step, 0);
    }

    #[test]
    fn valid_steps_advance_and_back_returns() {
        let mut wiz = ProfileWizard::new();
        wiz.headline = "Backend engineer".into();
        wiz.bio = "I build backends.".into();
        assert!(wiz.advance().is_ok());
        assert_eq!(wiz.active_step, 1);

        wiz.back();
        assert_eq!(wiz.active_step, 0);
        // Draft survives the round trip.
        assert_eq!(wiz.headline, "Backend engineer");
    }

    #[test]
    fn profile_request_serializes_sub_fields_to_strings() {
        let mut wiz = ProfileWizard::new();
        wiz.headline = "Backend engineer".into();
        wiz.bio = "bio".into();
        wiz.location = "Berlin".into();
        wiz.add_skill("Go");
        wiz.add_skill("SQL");
        wiz.add_skill("Go"); // duplicate, ignored
        wiz.experience.push(ExperienceEntry {
            title: "Engineer".into(),
            company: "Acme".into(),
            start_date: "2022-01".into(),
            end_date: None,
            description: String::new(),
        });

        let req = wiz.build_request("u1");
        assert_eq!(req.skills, "Go,SQL");
        assert!(req.experience.starts_with("[{"));
        assert_eq!(req.education, "[]");
        assert_eq!(req.user_id, "u1");
    }

    #[test]
    fn job_payload_encodes_skills_as_json_string_and_coerces_salaries() {
        let mut wiz = JobWizard::new();
        wiz.job_title = "Backend Developer".into();
        wiz.company_name = "Acme".into();
        wiz.description = "Build services".into();
        wiz.add_skill("Go");
        wiz.add_skill("SQL");
        wiz.salary_min = "".into();
        wiz.salary_max = "90000".into();

        let payload = wiz.build_payload();
        assert_eq!(payload.skills_required, "[\"Go\",\"SQL\"]");
        assert_eq!(payload.salary_min, 0);
        assert_eq!(payload.salary_max, 90_000);

        let wire = serde_json::to_string(&payload).unwrap();
        assert!(wire.contains(r#""skillsRequired":"[\"Go\",\"SQL\"]""#));
        assert!(wire.contains(r#""salaryMin":0"#));
    }

    #[test]
    fn job_wizard_blocks_on_missing_title() {
        let mut wiz = JobWizard::new();
        wiz.company_name = "Acme".into();
        assert_eq!(wiz.advance().unwrap_err(), "Please enter the job title");
        assert_eq!(wiz.active_step, 0);
    }
}
