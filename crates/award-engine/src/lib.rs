//! 徽章授予引擎
//!
//! 纯函数式的徽章规则评估库：给定用户活动快照和已持有徽章集合，
//! 计算应新授予的徽章列表。不依赖数据库和网络，
//! 持久化和幂等保证由调用方（community-service）负责。

pub mod catalog;
pub mod evaluator;
pub mod models;
pub mod rules;

pub use catalog::{BADGES, badges_by_category, find_badge};
pub use evaluator::{evaluate, points_for};
pub use models::{ActivitySnapshot, BadgeCategory, BadgeDefinition, Rarity};
pub use rules::{AWARD_RULES, AwardRule, early_adopter_cutoff};
