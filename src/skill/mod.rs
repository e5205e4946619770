pub mod event;
pub mod handler;
pub mod response;
