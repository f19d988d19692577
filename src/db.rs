pub mod announcement_repo;
pub use announcement_repo::AnnouncementRepository;
pub mod business_repo;
pub use business_repo::BusinessRepository;
pub mod complaint_repo;
pub use complaint_repo::ComplaintRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
pub mod dues_repo;
pub use dues_repo::DuesRepository;
pub mod event_repo;
pub use event_repo::EventRepository;
pub mod letter_repo;
pub use letter_repo::LetterRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
