//! 徽章引擎数据模型
//!
//! 定义徽章目录条目和用户活动快照。所有评估都基于快照的一致性视图，
//! 避免评估过程中读取实时数据导致的竞态。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 徽章稀有度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
            Self::Epic => "epic",
            Self::Legendary => "legendary",
        }
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 徽章分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeCategory {
    Learning,
    Community,
    Achievement,
    Special,
}

impl BadgeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Learning => "learning",
            Self::Community => "community",
            Self::Achievement => "achievement",
            Self::Special => "special",
        }
    }
}

impl std::fmt::Display for BadgeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 徽章目录条目
///
/// 目录是编译期常量，所有字段为静态字符串，运行时零分配。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BadgeDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Bootstrap Icons 图标名，供前端展示
    pub icon: &'static str,
    pub color: &'static str,
    pub category: BadgeCategory,
    pub points: i64,
    pub requirement: &'static str,
    pub rarity: Rarity,
}

/// 用户活动快照
///
/// 评估前由调用方从数据库聚合一次，评估过程中不再读库。
/// `points` 是快照时刻的累计积分——同一轮评估中新授徽章产生的积分
/// 不会反馈到本轮的积分类规则判定，需等下一轮评估。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivitySnapshot {
    /// 所有选课记录中已完成课时的总数
    pub completed_lessons: i64,
    /// 进度达到 100% 的课程数
    pub completed_courses: i64,
    /// 用户作为讲师创建的课程数
    pub authored_courses: i64,
    /// 用户发表的论坛主贴数
    pub forum_posts: i64,
    /// 用户发表的论坛回复数（不限于自己的主贴下）
    pub forum_replies: i64,
    /// 已报名参加的活动数
    pub events_attended: i64,
    /// 快照时刻的累计积分
    pub points: i64,
    /// 账号注册时间
    pub created_at: DateTime<Utc>,
}

impl Default for ActivitySnapshot {
    fn default() -> Self {
        Self {
            completed_lessons: 0,
            completed_courses: 0,
            authored_courses: 0,
            forum_posts: 0,
            forum_replies: 0,
            events_attended: 0,
            points: 0,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_serialization() {
        assert_eq!(serde_json::to_string(&Rarity::Epic).unwrap(), "\"epic\"");
        assert_eq!(
            serde_json::to_string(&Rarity::Legendary).unwrap(),
            "\"legendary\""
        );
    }

    #[test]
    fn test_category_display() {
        assert_eq!(BadgeCategory::Learning.to_string(), "learning");
        assert_eq!(BadgeCategory::Special.to_string(), "special");
    }

    #[test]
    fn test_rarity_ordering() {
        assert!(Rarity::Common < Rarity::Uncommon);
        assert!(Rarity::Epic < Rarity::Legendary);
    }
}
