pub mod admin;
pub mod login;
pub mod notifications;
pub mod password;
pub mod quiz;
pub mod reports;
pub mod results;
pub mod selection;
pub mod teacher;
pub mod topics;
