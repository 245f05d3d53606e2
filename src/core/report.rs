use chrono::{DateTime, Utc};
use std::fmt;

/// What happened to one seed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOutcome {
    Succeeded,
    Existing,
    Failed,
    Skipped,
}

/// Per-step counters. `attempted` is fixed up front from the dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepCounts {
    pub attempted: usize,
    pub succeeded: usize,
    pub existing: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl StepCounts {
    pub fn planned(attempted: usize) -> Self {
        Self {
            attempted,
            ..Self::default()
        }
    }

    pub fn record(&mut self, outcome: ItemOutcome) {
        match outcome {
            ItemOutcome::Succeeded => self.succeeded += 1,
            ItemOutcome::Existing => self.existing += 1,
            ItemOutcome::Failed => self.failed += 1,
            ItemOutcome::Skipped => self.skipped += 1,
        }
    }

    pub fn resolved(&self) -> usize {
        self.succeeded + self.existing + self.failed + self.skipped
    }

    /// Every planned item ended in exactly one outcome.
    pub fn is_balanced(&self) -> bool {
        self.resolved() == self.attempted
    }
}

impl fmt::Display for StepCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} attempted, {} created, {} existing, {} failed, {} skipped",
            self.attempted, self.succeeded, self.existing, self.failed, self.skipped
        )
    }
}

#[derive(Debug, Clone)]
pub struct SeedReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub doctors: StepCounts,
    pub profiles: StepCounts,
    pub specialties: StepCounts,
    pub institutions: StepCounts,
    pub jobs: StepCounts,
    pub connections: StepCounts,
    pub posts: StepCounts,
    pub likes: Option<StepCounts>,
    /// Accounts (new doctors, demo and existing) holding a session at the end of the run.
    pub sessions: usize,
    /// Institutions known by name after listing them.
    pub institutions_known: usize,
}

impl SeedReport {
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            doctors: StepCounts::default(),
            profiles: StepCounts::default(),
            specialties: StepCounts::default(),
            institutions: StepCounts::default(),
            jobs: StepCounts::default(),
            connections: StepCounts::default(),
            posts: StepCounts::default(),
            likes: None,
            sessions: 0,
            institutions_known: 0,
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn steps(&self) -> Vec<(&'static str, StepCounts)> {
        let mut steps = vec![
            ("Doctors", self.doctors),
            ("Profiles", self.profiles),
            ("Specialties", self.specialties),
            ("Institutions", self.institutions),
            ("Jobs", self.jobs),
            ("Connections", self.connections),
            ("Posts", self.posts),
        ];
        if let Some(likes) = self.likes {
            steps.push(("Likes", likes));
        }
        steps
    }

    pub fn is_balanced(&self) -> bool {
        self.steps().iter().all(|(_, counts)| counts.is_balanced())
    }

    pub fn total_failed(&self) -> usize {
        self.steps().iter().map(|(_, counts)| counts.failed).sum()
    }
}

impl fmt::Display for SeedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(60);
        writeln!(f, "{}", rule)?;
        writeln!(f, "SEED SUMMARY")?;
        writeln!(f, "{}", rule)?;
        for (name, counts) in self.steps() {
            writeln!(f, "  {:<13} {}", format!("{}:", name), counts)?;
        }
        writeln!(f, "  Accounts with session: {}", self.sessions)?;
        writeln!(f, "  Institutions known: {}", self.institutions_known)?;
        if let Some(finished_at) = self.finished_at {
            let elapsed = finished_at - self.started_at;
            writeln!(
                f,
                "  Finished at {} ({} ms)",
                finished_at.format("%Y-%m-%d %H:%M:%S UTC"),
                elapsed.num_milliseconds()
            )?;
        }
        write!(f, "{}", rule)
    }
}
