//! 业务服务层

pub mod award_service;
pub mod observer;

pub use award_service::{AwardOutcome, AwardService, DailyLoginOutcome, DAILY_LOGIN_POINTS};
pub use observer::{BadgeObserver, TracingObserver};
