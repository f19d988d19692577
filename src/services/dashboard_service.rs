// src/services/dashboard_service.rs

use chrono::{Datelike, Local};

use crate::{
    common::error::AppError,
    db::{
        AnnouncementRepository, BusinessRepository, ComplaintRepository, DashboardRepository,
        DuesRepository, EventRepository, LetterRepository, UserRepository,
    },
    models::dashboard::{merge_recent, ActivityItem, AdminStats, ACTIVITY_PER_SOURCE},
};

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
    sources: ActivitySources,
}

/// Repositórios lidos pelo feed de atividades.
#[derive(Clone)]
pub struct ActivitySources {
    pub users: UserRepository,
    pub announcements: AnnouncementRepository,
    pub complaints: ComplaintRepository,
    pub dues: DuesRepository,
    pub events: EventRepository,
    pub businesses: BusinessRepository,
    pub letters: LetterRepository,
}

fn project<T: Into<ActivityItem>>(rows: Vec<T>) -> impl Iterator<Item = ActivityItem> {
    rows.into_iter().map(Into::into)
}

impl DashboardService {
    pub fn new(repo: DashboardRepository, sources: ActivitySources) -> Self {
        Self { repo, sources }
    }

    // "Este mês" é o mês/ano do relógio local do servidor
    pub async fn stats(&self) -> Result<AdminStats, AppError> {
        let today = Local::now().date_naive();
        self.repo.stats(today.month() as i16, today.year()).await
    }

    pub async fn recent_activity(&self, limit: usize) -> Result<Vec<ActivityItem>, AppError> {
        let n = ACTIVITY_PER_SOURCE;
        let s = &self.sources;
        let (announcements, complaints, letters, dues, residents, events, businesses) = tokio::try_join!(
            s.announcements.list(Some(n)),
            s.complaints.list(None, None, Some(n)),
            s.letters.list(None, Some(n)),
            s.dues.list(None, Some(n)),
            s.users.recent_residents(n),
            s.events.recent(n),
            s.businesses.recent(n),
        )?;

        let items: Vec<ActivityItem> = project(announcements)
            .chain(project(complaints))
            .chain(project(letters))
            .chain(project(dues))
            .chain(project(residents))
            .chain(project(events))
            .chain(project(businesses))
            .collect();

        Ok(merge_recent(items, limit))
    }
}
