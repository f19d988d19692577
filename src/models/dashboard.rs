// src/models/dashboard.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{
    announcement::AnnouncementDetail, auth::User, business::BusinessDetail,
    complaint::ComplaintDetail, dues::DuesDetail, event::EventDetail, letter::LetterDetail,
};

pub const DEFAULT_ACTIVITY_LIMIT: usize = 10;
// Quantos registros recentes cada coleção contribui para o feed
pub const ACTIVITY_PER_SOURCE: i64 = 3;
const DESCRIPTION_MAX_CHARS: usize = 100;
const FALLBACK_NAME: &str = "Resident";

// Os cards do topo do painel do admin
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_users: i64,
    pub total_residents: i64,
    pub total_announcements: i64,
    pub total_complaints: i64,
    pub pending_complaints: i64,
    pub total_dues: i64,
    #[schema(example = "150000")]
    pub dues_paid_this_month: Decimal,
    pub total_events: i64,
    pub total_businesses: i64,
    pub total_letter_requests: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Announcement,
    Complaint,
    LetterRequest,
    Dues,
    Resident,
    Event,
    Business,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ActivityQuery {
    pub limit: Option<String>,
}

impl ActivityQuery {
    /// Ausente, não numérico ou <= 0 cai no padrão.
    pub fn effective_limit(&self) -> usize {
        self.limit
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .filter(|n| *n > 0)
            .map(|n| n as usize)
            .unwrap_or(DEFAULT_ACTIVITY_LIMIT)
    }
}

// Corta em 100 caracteres (não bytes) e sempre acrescenta "..."
pub fn truncate_description(text: &str) -> String {
    let cut: String = text.chars().take(DESCRIPTION_MAX_CHARS).collect();
    format!("{}...", cut)
}

/// Junta os itens de todas as fontes, mais recentes primeiro, e corta no limite.
pub fn merge_recent(mut items: Vec<ActivityItem>, limit: usize) -> Vec<ActivityItem> {
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    items.truncate(limit);
    items
}

impl ActivityItem {
    fn new(kind: ActivityKind, title: String, description: String, created_at: DateTime<Utc>) -> Self {
        Self { kind, title, description, created_at }
    }
}

impl From<AnnouncementDetail> for ActivityItem {
    fn from(d: AnnouncementDetail) -> Self {
        let a = d.announcement;
        Self::new(
            ActivityKind::Announcement,
            format!("New announcement: {}", a.title),
            truncate_description(&a.body),
            a.created_at,
        )
    }
}

impl From<ComplaintDetail> for ActivityItem {
    fn from(d: ComplaintDetail) -> Self {
        let c = d.complaint;
        Self::new(
            ActivityKind::Complaint,
            format!("New complaint: {}", c.title),
            truncate_description(&c.body),
            c.created_at,
        )
    }
}

impl From<LetterDetail> for ActivityItem {
    fn from(d: LetterDetail) -> Self {
        let l = d.letter;
        // Mesmo nome que aparece no JSON ("ID-card", "Domicile", ...)
        let letter_type = serde_json::to_value(l.letter_type)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();
        Self::new(
            ActivityKind::LetterRequest,
            format!("Letter request: {}", letter_type),
            format!("Request for {}", l.purpose),
            l.created_at,
        )
    }
}

impl From<DuesDetail> for ActivityItem {
    fn from(d: DuesDetail) -> Self {
        let label = d.dues.dues_type.clone().unwrap_or_else(|| d.dues.title.clone());
        Self::new(
            ActivityKind::Dues,
            format!("Dues: {}", label),
            format!(
                "By {} - Rp {}",
                d.resident_name.as_deref().unwrap_or(FALLBACK_NAME),
                d.dues.amount.normalize()
            ),
            d.dues.created_at,
        )
    }
}

impl From<User> for ActivityItem {
    fn from(u: User) -> Self {
        Self::new(
            ActivityKind::Resident,
            format!("New resident: {}", u.full_name),
            format!("Joined on {}", u.created_at.format("%Y-%m-%d")),
            u.created_at,
        )
    }
}

impl From<EventDetail> for ActivityItem {
    fn from(d: EventDetail) -> Self {
        let e = d.event;
        Self::new(
            ActivityKind::Event,
            format!("Event: {}", e.name),
            truncate_description(&e.description),
            e.created_at,
        )
    }
}

impl From<BusinessDetail> for ActivityItem {
    fn from(d: BusinessDetail) -> Self {
        Self::new(
            ActivityKind::Business,
            format!("New business: {}", d.business.business_name),
            format!("By {}", d.owner_name.as_deref().unwrap_or(FALLBACK_NAME)),
            d.business.created_at,
        )
    }
}
