//! HTTP 处理器

pub mod auth;
pub mod course;
pub mod dashboard;
pub mod event;
pub mod forum;
pub mod gamification;
pub mod profile;
