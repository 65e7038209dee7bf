use worklink_shared::{Application, Job};

/// Status of the single in-flight application submission, surfaced to the UI
/// as a blocking dialog state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Client-side filter over the flat job list. The jobs service has no query
/// support, so all filtering happens here.
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    pub query: String,
    pub location: String,
    pub remote_only: bool,
}

impl JobFilter {
    pub fn matches(&self, job: &Job) -> bool {
        let q = self.query.trim().to_lowercase();
        if !q.is_empty() {
            let hit = job.job_title.to_lowercase().contains(&q)
                || job.company_name.to_lowercase().contains(&q)
                || job.skills().iter().any(|s| s.to_lowercase().contains(&q));
            if !hit {
                return false;
            }
        }
        let loc = self.location.trim().to_lowercase();
        if !loc.is_empty() && !job.location.to_lowercase().contains(&loc) {
            return false;
        }
        if self.remote_only && !job.remote {
            return false;
        }
        true
    }
}

/// Jobs, the user's own applications, and the submission machine.
#[derive(Debug, Clone, Default)]
pub struct JobsStore {
    pub jobs: Vec<Job>,
    pub applications: Vec<Application>,
    pub submit: SubmitStatus,
    pub error: Option<String>,
}

impl JobsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_jobs(&mut self, jobs: Vec<Job>) {
        self.jobs = jobs;
    }

    pub fn set_applications(&mut self, applications: Vec<Application>) {
        self.applications = applications;
    }

    pub fn filtered(&self, filter: &JobFilter) -> Vec<Job> {
        self.jobs
            .iter()
            .filter(|j| filter.matches(j))
            .cloned()
            .collect()
    }

    pub fn has_applied(&self, job_id: &str) -> bool {
        self.applications.iter().any(|a| a.job_id == job_id)
    }

    /// Start a submission. Refuses while one is already in flight.
    pub fn begin_submit(&mut self) -> bool {
        if self.submit == SubmitStatus::Loading {
            return false;
        }
        self.submit = SubmitStatus::Loading;
        self.error = None;
        true
    }

    /// Settle the in-flight submission. On success the created application
    /// is appended to the local cache as-is; the server may mutate its
    /// status later, which is only picked up by a full reload.
    pub fn complete_submit(&mut self, outcome: Result<Application, String>) {
        match outcome {
            Ok(application) => {
                self.applications.push(application);
                self.submit = SubmitStatus::Succeeded;
            }
            Err(message) => {
                self.error = Some(message);
                self.submit = SubmitStatus::Failed;
            }
        }
    }

    /// Called on the next user action after a terminal state.
    pub fn acknowledge(&mut self) {
        self.submit = SubmitStatus::Idle;
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: &str, title: &str, location: &str, remote: bool, skills: &str) -> Job {
        Job {
            job_id: id.into(),
            job_title: title.into(),
            company_name: "Acme".into(),
            description: String::new(),
            location: location.into(),
            remote,
            skills_required: skills.into(),
            salary_min: 50_000,
            salary_max: 90_000,
            status: "open".into(),
            created_at: "2026-01-01".into(),
            recruiter_id: "r1".into(),
        }
    }

    fn application(job_id: &str) -> Application {
        Application {
            application_id: None,
            job_id: job_id.into(),
            candidate_id: "u1".into(),
            resume_url: "https://cv.example/u1.pdf".into(),
            cover_letter: String::new(),
            status: "submitted".into(),
        }
    }

    #[test]
    fn filter_matches_title_company_and_skills_case_insensitively() {
        let store = {
            let mut s = JobsStore::new();
            s.set_jobs(vec![
                job("j1", "Backend Developer", "Berlin", false, "[\"Go\",\"SQL\"]"),
                job("j2", "Designer", "Lisbon", true, "[\"Figma\"]"),
            ]);
            s
        };

        let f = JobFilter {
            query: "go".into(),
            ..Default::default()
        };
        let hits = store.filtered(&f);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].job_id, "j1");

        let f = JobFilter {
            location: "lis".into(),
            remote_only: true,
            ..Default::default()
        };
        assert_eq!(store.filtered(&f)[0].job_id, "j2");
    }

    #[test]
    fn submit_never_skips_loading_and_ends_in_one_terminal_state() {
        let mut store = JobsStore::new();
        assert_eq!(store.submit, SubmitStatus::Idle);

        assert!(store.begin_submit());
        assert_eq!(store.submit, SubmitStatus::Loading);

        store.complete_submit(Ok(application("j1")));
        assert_eq!(store.submit, SubmitStatus::Succeeded);
        assert_eq!(store.applications.len(), 1);
        assert!(store.has_applied("j1"));

        store.acknowledge();
        assert_eq!(store.submit, SubmitStatus::Idle);
    }

    #[test]
    fn failed_submit_keeps_message_until_acknowledged() {
        let mut store = JobsStore::new();
        store.begin_submit();
        store.complete_submit(Err("Resume URL is required".into()));
        assert_eq!(store.submit, SubmitStatus::Failed);
        assert_eq!(store.error.as_deref(), Some("Resume URL is required"));
        assert!(store.applications.is_empty());

        store.acknowledge();
        assert_eq!(store.submit, SubmitStatus::Idle);
        assert!(store.error.is_none());
    }

    #[test]
    fn second_submit_is_refused_while_loading() {
        let mut store = JobsStore::new();
        assert!(store.begin_submit());
        assert!(!store.begin_submit());
        assert_eq!(store.submit, SubmitStatus::Loading);
    }
}
