use crate::config::dataset::SeedData;
use crate::core::seeder::SeedStep;
use std::fmt;

/// What a run would send, computed from the dataset alone.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedPlan {
    pub demo_email: Option<String>,
    pub doctors: usize,
    pub existing_accounts: usize,
    pub specialty_assignments: usize,
    pub specialties: usize,
    pub institutions: usize,
    pub jobs: usize,
    pub connections: usize,
    pub posts: usize,
    pub steps: Vec<SeedStep>,
}

impl SeedPlan {
    pub fn new(data: &SeedData, like_posts: bool) -> Self {
        Self {
            demo_email: data.demo.as_ref().map(|d| d.email.clone()),
            doctors: data.doctors.len(),
            existing_accounts: data.existing_accounts.len(),
            specialty_assignments: data.specialty_assignment_count(),
            specialties: data.specialties.len(),
            institutions: data.institutions.len(),
            jobs: data.jobs.len(),
            connections: data.connections.len(),
            posts: data.posts.len(),
            steps: SeedStep::plan(like_posts),
        }
    }
}

impl fmt::Display for SeedPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "  Demo account:  {}",
            self.demo_email.as_deref().unwrap_or("none")
        )?;
        writeln!(f, "  Doctors:       {}", self.doctors)?;
        writeln!(f, "  Existing:      {}", self.existing_accounts)?;
        writeln!(
            f,
            "  Specialties:   {} assignments over {} specialties",
            self.specialty_assignments, self.specialties
        )?;
        writeln!(f, "  Institutions:  {}", self.institutions)?;
        writeln!(f, "  Jobs:          {}", self.jobs)?;
        writeln!(f, "  Connections:   {}", self.connections)?;
        write!(f, "  Posts:         {}", self.posts)?;

        let total = self.steps.len();
        for (index, step) in self.steps.iter().enumerate() {
            write!(f, "\n  [{}/{}] {}", index + 1, total, step)?;
        }
        Ok(())
    }
}
