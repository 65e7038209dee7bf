/// Generation counter guarding overlapping autocomplete requests.
///
/// Debounce limits request volume but does not order responses: a slow
/// early response can land after a fast later one. Each request takes a
/// generation from `issue`, and only the response holding the latest
/// generation is admitted, so the applied result is always the one for the
/// most recently issued request.
#[derive(Debug, Clone, Copy, Default)]
pub struct LookupGuard {
    issued: u64,
}

impl LookupGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    pub fn admit(&self, generation: u64) -> bool {
        generation == self.issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_latest_generation_is_admitted() {
        let mut guard = LookupGuard::new();
        let first = guard.issue();
        let second = guard.issue();

        // The slow first response arrives last and is dropped.
        assert!(!guard.admit(first));
        assert!(guard.admit(second));
    }

    #[test]
    fn a_new_issue_invalidates_prior_admissions() {
        let mut guard = LookupGuard::new();
        let g = guard.issue();
        assert!(guard.admit(g));
        guard.issue();
        assert!(!guard.admit(g));
    }
}
