use crate::config::dataset::SeedData;
use crate::core::context::SeedContext;
use crate::core::handshake::{self, Handshake};
use crate::core::report::{ItemOutcome, SeedReport, StepCounts};
use crate::domain::model::Session;
use crate::domain::ports::SeedApi;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use std::fmt;

/// One stage of a seeding run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedStep {
    Doctors,
    Profiles,
    Specialties,
    Institutions,
    Jobs,
    Connections,
    Posts,
    Likes,
}

impl SeedStep {
    /// Steps of a run, with the likes step only when requested.
    pub fn plan(like_posts: bool) -> Vec<SeedStep> {
        let mut steps = vec![
            SeedStep::Doctors,
            SeedStep::Profiles,
            SeedStep::Specialties,
            SeedStep::Institutions,
            SeedStep::Jobs,
            SeedStep::Connections,
            SeedStep::Posts,
        ];
        if like_posts {
            steps.push(SeedStep::Likes);
        }
        steps
    }

    pub fn label(&self) -> &'static str {
        match self {
            SeedStep::Doctors => "Registering doctors",
            SeedStep::Profiles => "Updating doctor profiles",
            SeedStep::Specialties => "Assigning specialties",
            SeedStep::Institutions => "Creating institutions",
            SeedStep::Jobs => "Creating jobs",
            SeedStep::Connections => "Creating connections",
            SeedStep::Posts => "Creating feed posts",
            SeedStep::Likes => "Liking posts",
        }
    }
}

impl fmt::Display for SeedStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Logs the outcome of one call and counts it. Returns the value on success.
fn tally<T>(counts: &mut StepCounts, item: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => {
            tracing::info!("  ✓ {}", item);
            counts.record(ItemOutcome::Succeeded);
            Some(value)
        }
        Err(e) if e.is_already_exists() => {
            tracing::info!("  ~ {} (already exists)", item);
            counts.record(ItemOutcome::Existing);
            None
        }
        Err(e) => {
            tracing::warn!("  ✗ {}: {}", item, e);
            counts.record(ItemOutcome::Failed);
            None
        }
    }
}

fn skip(counts: &mut StepCounts, item: &str, reason: &str) {
    tracing::warn!("  ✗ {} ({})", item, reason);
    counts.record(ItemOutcome::Skipped);
}

/// Runs the seeding steps against a `SeedApi`, one call at a time.
pub struct Seeder<A: SeedApi> {
    api: A,
    data: SeedData,
    like_posts: bool,
    monitor: SystemMonitor,
}

impl<A: SeedApi> Seeder<A> {
    pub fn new(api: A, data: SeedData) -> Self {
        Self {
            api,
            data,
            like_posts: false,
            monitor: SystemMonitor::default(),
        }
    }

    pub fn with_likes(mut self, like_posts: bool) -> Self {
        self.like_posts = like_posts;
        self
    }

    pub fn with_monitoring(mut self, enabled: bool) -> Self {
        self.monitor = SystemMonitor::new(enabled);
        self
    }

    pub fn data(&self) -> &SeedData {
        &self.data
    }

    pub fn plan(&self) -> Vec<SeedStep> {
        SeedStep::plan(self.like_posts)
    }

    /// Runs every step. Individual failures are logged and counted, never returned.
    pub async fn run(&self) -> SeedReport {
        let mut ctx = SeedContext::new();
        self.run_in(&mut ctx).await
    }

    pub async fn run_in(&self, ctx: &mut SeedContext) -> SeedReport {
        let mut report = SeedReport::start();
        let steps = self.plan();
        let total = steps.len();

        for (index, step) in steps.iter().enumerate() {
            println!("\n[{}/{}] {}...", index + 1, total, step);
            match step {
                SeedStep::Doctors => report.doctors = self.seed_doctors(ctx).await,
                SeedStep::Profiles => report.profiles = self.seed_profiles(ctx).await,
                SeedStep::Specialties => report.specialties = self.seed_specialties(ctx).await,
                SeedStep::Institutions => report.institutions = self.seed_institutions(ctx).await,
                SeedStep::Jobs => report.jobs = self.seed_jobs(ctx).await,
                SeedStep::Connections => report.connections = self.seed_connections(ctx).await,
                SeedStep::Posts => report.posts = self.seed_posts(ctx).await,
                SeedStep::Likes => report.likes = Some(self.seed_likes(ctx).await),
            }
            self.monitor.log_stats(step.label());
        }

        report.sessions = ctx.session_count();
        report.institutions_known = ctx.institution_count();
        report.finish();
        self.monitor.log_final_stats();
        report
    }

    fn demo_email(&self) -> Option<&str> {
        self.data.demo.as_ref().map(|d| d.email.as_str())
    }

    async fn seed_doctors(&self, ctx: &mut SeedContext) -> StepCounts {
        let mut counts = StepCounts::planned(self.data.doctors.len());

        for doctor in &self.data.doctors {
            let item = format!("{} ({})", doctor.full_name, doctor.email);
            let session = match self.api.register(&doctor.registration()).await {
                Ok(session) => Ok((session, ItemOutcome::Succeeded)),
                Err(e) if e.is_already_exists() => {
                    tracing::debug!("{} already registered, logging in", doctor.email);
                    self.api
                        .login(&doctor.account())
                        .await
                        .map(|session| (session, ItemOutcome::Existing))
                }
                Err(e) => Err(e),
            };

            match session {
                Ok((session, outcome)) => {
                    if outcome == ItemOutcome::Existing {
                        tracing::info!("  ~ {} (already registered)", item);
                    } else {
                        tracing::info!("  ✓ {}", item);
                    }
                    ctx.add_session(&doctor.email, session);
                    counts.record(outcome);
                }
                Err(e) => {
                    tracing::warn!("  ✗ Could not register/login {}: {}", doctor.email, e);
                    counts.record(ItemOutcome::Failed);
                }
            }
        }

        if let Some(demo) = &self.data.demo {
            match self.api.login(demo).await {
                Ok(session) => {
                    tracing::info!("  ✓ Demo user logged in ({})", demo.email);
                    ctx.add_session(&demo.email, session);
                }
                Err(e) => tracing::warn!("  ✗ Demo user {} could not log in: {}", demo.email, e),
            }
        }

        for account in &self.data.existing_accounts {
            match self.api.login(account).await {
                Ok(session) => ctx.add_session(&account.email, session),
                Err(e) => tracing::warn!("  ✗ Existing account {} could not log in: {}", account.email, e),
            }
        }

        counts
    }

    async fn seed_profiles(&self, ctx: &mut SeedContext) -> StepCounts {
        let mut counts = StepCounts::planned(self.data.doctors.len());

        for doctor in &self.data.doctors {
            let item = format!("{} profile", doctor.full_name);
            let Some(token) = ctx.token(&doctor.email) else {
                skip(&mut counts, &item, "no session");
                continue;
            };

            let update = doctor.profile_update();
            if update.is_empty() {
                tracing::debug!("{} has no profile fields to send", doctor.email);
                counts.record(ItemOutcome::Succeeded);
                continue;
            }

            tally(&mut counts, &item, self.api.update_profile(token, &update).await);
        }

        counts
    }

    async fn seed_specialties(&self, ctx: &mut SeedContext) -> StepCounts {
        let mut counts = StepCounts::planned(self.data.specialty_assignment_count());

        let Some(token) = ctx.first_token().map(str::to_string) else {
            for assignment in &self.data.specialties {
                for email in &assignment.emails {
                    skip(&mut counts, &format!("{} -> {}", email, assignment.specialty), "no session available");
                }
            }
            return counts;
        };

        match self.api.list_specialties(&token).await {
            Ok(specialties) => ctx.set_specialties(specialties),
            Err(e) => tracing::warn!("  ✗ Could not list specialties: {}", e),
        }
        tracing::info!("  Available specialties: {}", ctx.specialty_names().join(", "));

        for assignment in &self.data.specialties {
            let Some(specialty_id) = ctx.specialty_id(&assignment.specialty) else {
                tracing::warn!("  ✗ Specialty '{}' not found", assignment.specialty);
                for _ in &assignment.emails {
                    counts.record(ItemOutcome::Skipped);
                }
                continue;
            };

            for email in &assignment.emails {
                let item = format!("{} -> {}", email, assignment.specialty);
                match ctx.token(email) {
                    Some(token) => {
                        tally(
                            &mut counts,
                            &item,
                            self.api.add_specialty(token, specialty_id, true).await,
                        );
                    }
                    None => skip(&mut counts, &item, "no session"),
                }
            }
        }

        counts
    }

    async fn seed_institutions(&self, ctx: &mut SeedContext) -> StepCounts {
        let mut counts = StepCounts::planned(self.data.institutions.len());

        let Some(token) = ctx.admin_token(self.demo_email()).map(str::to_string) else {
            for institution in &self.data.institutions {
                skip(&mut counts, &institution.name, "no session available");
            }
            return counts;
        };

        for institution in &self.data.institutions {
            let item = format!("{} ({}/{})", institution.name, institution.city, institution.state);
            let created = tally(
                &mut counts,
                &item,
                self.api.create_institution(&token, institution).await,
            );
            if let Some(Some(id)) = created {
                ctx.add_institution(&institution.name, id);
            }
        }

        match self.api.list_institutions(&token).await {
            Ok(listing) => ctx.merge_institutions(listing),
            Err(e) => tracing::warn!("  ✗ Could not list institutions: {}", e),
        }
        tracing::info!("  Institutions known: {}", ctx.institution_count());

        counts
    }

    async fn seed_jobs(&self, ctx: &mut SeedContext) -> StepCounts {
        let mut counts = StepCounts::planned(self.data.jobs.len());

        let Some(token) = ctx.admin_token(self.demo_email()) else {
            for job in &self.data.jobs {
                skip(&mut counts, &job.title, "no session available");
            }
            return counts;
        };

        for job in &self.data.jobs {
            let specialty_id = job
                .specialty
                .as_deref()
                .and_then(|name| ctx.specialty_id(name))
                .map(str::to_string);
            if job.specialty.is_some() && specialty_id.is_none() {
                tracing::debug!("{}: specialty not resolved, sending without it", job.title);
            }

            let request = job.to_request(specialty_id);
            tally(&mut counts, &job.title, self.api.create_job(token, &request).await);
        }

        counts
    }

    async fn seed_connections(&self, ctx: &mut SeedContext) -> StepCounts {
        let mut counts = StepCounts::planned(self.data.connections.len());

        for pair in &self.data.connections {
            let item = format!("{} <-> {}", pair.sender, pair.receiver);
            let (Some(sender), Some(receiver)) = (ctx.session(&pair.sender), ctx.session(&pair.receiver)) else {
                skip(&mut counts, &item, "token/id missing");
                continue;
            };

            self.connect(&mut counts, &item, sender, receiver).await;
        }

        counts
    }

    async fn connect(&self, counts: &mut StepCounts, item: &str, sender: &Session, receiver: &Session) {
        match handshake::connect(&self.api, sender, receiver).await {
            Handshake::Accepted { request_id } => {
                tracing::debug!("Accepted request {}", request_id);
                tracing::info!("  ✓ {}", item);
                counts.record(ItemOutcome::Succeeded);
            }
            Handshake::AlreadyConnected => {
                tracing::info!("  ~ {} (already exists)", item);
                counts.record(ItemOutcome::Existing);
            }
            Handshake::NoPendingMatch => skip(counts, item, "no pending request to accept"),
            Handshake::SendFailed(e) => {
                tracing::warn!("  ✗ {}: request failed: {}", item, e);
                counts.record(ItemOutcome::Failed);
            }
            Handshake::PendingListFailed(e) => {
                tracing::warn!("  ✗ {}: could not list pending requests: {}", item, e);
                counts.record(ItemOutcome::Failed);
            }
            Handshake::AcceptFailed(e) => {
                tracing::warn!("  ✗ {}: accept failed: {}", item, e);
                counts.record(ItemOutcome::Failed);
            }
        }
    }

    async fn seed_posts(&self, ctx: &mut SeedContext) -> StepCounts {
        let mut counts = StepCounts::planned(self.data.posts.len());

        for post in &self.data.posts {
            let item = format!("Post by {}", post.email);
            let Some(token) = ctx.token(&post.email) else {
                skip(&mut counts, &item, "token not found");
                continue;
            };

            let created = tally(&mut counts, &item, self.api.create_post(token, &post.to_request()).await);
            match created {
                Some(Some(post_id)) => ctx.add_created_post(&post.email, post_id),
                Some(None) => tracing::debug!("{}: backend returned no post id", item),
                None => {}
            }
        }

        counts
    }

    async fn seed_likes(&self, ctx: &mut SeedContext) -> StepCounts {
        let mut likes = Vec::new();
        for post in ctx.created_posts() {
            for liker in self.data.connections_of(&post.author_email) {
                if liker != post.author_email {
                    likes.push((post.post_id.as_str(), post.author_email.as_str(), liker));
                }
            }
        }

        let mut counts = StepCounts::planned(likes.len());
        for (post_id, author, liker) in likes {
            let item = format!("{} likes post {} by {}", liker, post_id, author);
            match ctx.token(liker) {
                Some(token) => {
                    tally(&mut counts, &item, self.api.like_post(token, post_id).await);
                }
                None => skip(&mut counts, &item, "no session"),
            }
        }

        counts
    }
}
