pub mod announcement;
pub mod auth;
pub mod business;
pub mod complaint;
pub mod dashboard;
pub mod dues;
pub mod event;
pub mod letter;
