// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    info(title = "WargaConnect API", description = "Gestão do RT/RW"),
    paths(
        // --- Users ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_profile,
        handlers::auth::update_profile,
        handlers::auth::list_users,
        handlers::auth::update_user,
        handlers::auth::delete_user,

        // --- Announcements ---
        handlers::announcements::list_announcements,
        handlers::announcements::create_announcement,
        handlers::announcements::update_announcement,
        handlers::announcements::delete_announcement,

        // --- Complaints ---
        handlers::complaints::list_complaints,
        handlers::complaints::create_complaint,
        handlers::complaints::update_complaint,
        handlers::complaints::delete_complaint,

        // --- Dues ---
        handlers::dues::list_dues,
        handlers::dues::create_dues,
        handlers::dues::create_bulk_dues,
        handlers::dues::update_dues,
        handlers::dues::upload_proof,
        handlers::dues::delete_dues,

        // --- Events ---
        handlers::events::list_events,
        handlers::events::create_event,
        handlers::events::update_event,
        handlers::events::delete_event,

        // --- Businesses ---
        handlers::businesses::list_businesses,
        handlers::businesses::create_business,
        handlers::businesses::update_business,
        handlers::businesses::delete_business,

        // --- Letters ---
        handlers::letters::list_my_letters,
        handlers::letters::list_all_letters,
        handlers::letters::get_letter,
        handlers::letters::create_letter,
        handlers::letters::update_letter,
        handlers::letters::delete_letter,

        // --- Uploads ---
        handlers::uploads::upload_files,

        // --- Admin ---
        handlers::dashboard::get_stats,
        handlers::dashboard::get_activity,
    ),
    components(
        schemas(
            handlers::MessageResponse,

            // --- Users ---
            models::auth::UserRole,
            models::auth::AccountStatus,
            models::auth::HouseholdMember,
            models::auth::User,
            models::auth::CurrentUser,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,
            models::auth::UpdateProfilePayload,
            models::auth::AdminUpdateUserPayload,

            // --- Announcements ---
            models::announcement::Announcement,
            models::announcement::AnnouncementDetail,
            models::announcement::CreateAnnouncementPayload,
            models::announcement::UpdateAnnouncementPayload,

            // --- Complaints ---
            models::complaint::ComplaintStatus,
            models::complaint::Complaint,
            models::complaint::ComplaintDetail,
            models::complaint::CreateComplaintPayload,
            models::complaint::UpdateComplaintPayload,

            // --- Dues ---
            models::dues::PaymentStatus,
            models::dues::Dues,
            models::dues::DuesDetail,
            models::dues::DuesTerms,
            models::dues::CreateDuesPayload,
            models::dues::BulkCreateDuesPayload,
            models::dues::UpdateDuesPayload,
            handlers::dues::BulkDuesResponse,
            handlers::dues::PaymentProofForm,

            // --- Events ---
            models::event::Event,
            models::event::EventDetail,
            models::event::CreateEventPayload,
            models::event::UpdateEventPayload,

            // --- Businesses ---
            models::business::BusinessCategory,
            models::business::Business,
            models::business::BusinessDetail,
            models::business::CreateBusinessPayload,
            models::business::UpdateBusinessPayload,

            // --- Letters ---
            models::letter::LetterType,
            models::letter::LetterStatus,
            models::letter::OtherDocument,
            models::letter::Attachments,
            models::letter::LetterRequest,
            models::letter::LetterDetail,
            models::letter::UpdateLetterPayload,
            handlers::letters::LetterRequestForm,

            // --- Uploads ---
            services::upload_service::StoredFile,
            handlers::uploads::UploadResponse,
            handlers::uploads::BatchUploadForm,

            // --- Admin ---
            models::dashboard::AdminStats,
            models::dashboard::ActivityKind,
            models::dashboard::ActivityItem,
        )
    ),
    tags(
        (name = "Users", description = "Registro, login e perfil dos moradores"),
        (name = "Announcements", description = "Avisos do RT"),
        (name = "Complaints", description = "Reclamações dos moradores"),
        (name = "Dues", description = "Iurans e comprovantes de pagamento"),
        (name = "Events", description = "Eventos da comunidade"),
        (name = "Businesses", description = "Diretório de UMKM"),
        (name = "Letters", description = "Pedidos de carta de apresentação"),
        (name = "Uploads", description = "Upload avulso de arquivos"),
        (name = "Admin", description = "Indicadores do painel do admin")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
