pub mod announcement_service;
pub mod auth;
pub mod business_service;
pub mod complaint_service;
pub mod dashboard_service;
pub mod dues_service;
pub mod event_service;
pub mod letter_service;
pub mod upload_service;
pub mod user_service;
