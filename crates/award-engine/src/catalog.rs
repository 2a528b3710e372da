//! 徽章目录
//!
//! 平台全部 17 枚徽章的静态定义。有自动授予规则的徽章见 `rules` 模块，
//! 其余（如 learning-streak、mentor）仅在目录中展示，
//! 由运营人员通过管理接口手动授予。

use crate::models::{BadgeCategory, BadgeDefinition, Rarity};

/// 全量徽章目录
pub static BADGES: [BadgeDefinition; 17] = [
    // ==================== 学习类 ====================
    BadgeDefinition {
        id: "first-lesson",
        name: "First Steps",
        description: "Complete your first lesson",
        icon: "bi-play-circle",
        color: "#007bff",
        category: BadgeCategory::Learning,
        points: 25,
        requirement: "Complete 1 lesson",
        rarity: Rarity::Common,
    },
    BadgeDefinition {
        id: "course-complete",
        name: "Course Graduate",
        description: "Complete your first course",
        icon: "bi-mortarboard",
        color: "#28a745",
        category: BadgeCategory::Learning,
        points: 100,
        requirement: "Complete 1 course",
        rarity: Rarity::Uncommon,
    },
    BadgeDefinition {
        id: "learning-streak",
        name: "Dedicated Learner",
        description: "Learn for 7 consecutive days",
        icon: "bi-lightning-charge",
        color: "#ffc107",
        category: BadgeCategory::Learning,
        points: 150,
        requirement: "7-day learning streak",
        rarity: Rarity::Rare,
    },
    BadgeDefinition {
        id: "course-creator",
        name: "Knowledge Sharer",
        description: "Create your first course",
        icon: "bi-book-half",
        color: "#6f42c1",
        category: BadgeCategory::Learning,
        points: 200,
        requirement: "Create 1 course",
        rarity: Rarity::Rare,
    },
    BadgeDefinition {
        id: "master-learner",
        name: "Master Learner",
        description: "Complete 5 courses",
        icon: "bi-award",
        color: "#fd7e14",
        category: BadgeCategory::Learning,
        points: 500,
        requirement: "Complete 5 courses",
        rarity: Rarity::Epic,
    },
    // ==================== 社区类 ====================
    BadgeDefinition {
        id: "first-post",
        name: "Voice Heard",
        description: "Make your first forum post",
        icon: "bi-chat-square-text",
        color: "#17a2b8",
        category: BadgeCategory::Community,
        points: 25,
        requirement: "Create 1 forum post",
        rarity: Rarity::Common,
    },
    BadgeDefinition {
        id: "helpful-member",
        name: "Helpful Hand",
        description: "Reply to 10 forum posts",
        icon: "bi-hand-thumbs-up",
        color: "#28a745",
        category: BadgeCategory::Community,
        points: 100,
        requirement: "Reply to 10 posts",
        rarity: Rarity::Uncommon,
    },
    BadgeDefinition {
        id: "event-attendee",
        name: "Active Participant",
        description: "Attend your first event",
        icon: "bi-calendar-check",
        color: "#007bff",
        category: BadgeCategory::Community,
        points: 50,
        requirement: "Attend 1 event",
        rarity: Rarity::Common,
    },
    BadgeDefinition {
        id: "mentor",
        name: "Guiding Light",
        description: "Mentor a fellow alumni",
        icon: "bi-people",
        color: "#6610f2",
        category: BadgeCategory::Community,
        points: 200,
        requirement: "Become a mentor",
        rarity: Rarity::Rare,
    },
    BadgeDefinition {
        id: "community-leader",
        name: "Community Leader",
        description: "Create 5 forum posts and reply to 25",
        icon: "bi-megaphone",
        color: "#e83e8c",
        category: BadgeCategory::Community,
        points: 300,
        requirement: "5 posts + 25 replies",
        rarity: Rarity::Epic,
    },
    // ==================== 成就类 ====================
    BadgeDefinition {
        id: "early-adopter",
        name: "Early Adopter",
        description: "One of the first 100 users",
        icon: "bi-star",
        color: "#ffd700",
        category: BadgeCategory::Achievement,
        points: 100,
        requirement: "Be in first 100 users",
        rarity: Rarity::Rare,
    },
    BadgeDefinition {
        id: "point-collector",
        name: "Point Collector",
        description: "Earn 1000 points",
        icon: "bi-gem",
        color: "#20c997",
        category: BadgeCategory::Achievement,
        points: 250,
        requirement: "Earn 1000 points",
        rarity: Rarity::Rare,
    },
    BadgeDefinition {
        id: "streak-master",
        name: "Streak Master",
        description: "Maintain a 30-day learning streak",
        icon: "bi-fire",
        color: "#dc3545",
        category: BadgeCategory::Achievement,
        points: 500,
        requirement: "30-day streak",
        rarity: Rarity::Legendary,
    },
    BadgeDefinition {
        id: "all-rounder",
        name: "Renaissance Alumni",
        description: "Complete courses in 3 different categories",
        icon: "bi-globe",
        color: "#6f42c1",
        category: BadgeCategory::Achievement,
        points: 400,
        requirement: "3 different course categories",
        rarity: Rarity::Epic,
    },
    // ==================== 特别类 ====================
    BadgeDefinition {
        id: "beta-tester",
        name: "Beta Tester",
        description: "Helped test the platform during beta",
        icon: "bi-bug",
        color: "#6c757d",
        category: BadgeCategory::Special,
        points: 150,
        requirement: "Beta participation",
        rarity: Rarity::Rare,
    },
    BadgeDefinition {
        id: "feedback-champion",
        name: "Feedback Champion",
        description: "Provided valuable feedback",
        icon: "bi-chat-heart",
        color: "#e83e8c",
        category: BadgeCategory::Special,
        points: 100,
        requirement: "Provide feedback",
        rarity: Rarity::Uncommon,
    },
    BadgeDefinition {
        id: "hackjam-participant",
        name: "HackJam Hero",
        description: "Participated in HackJam 2025",
        icon: "bi-code-slash",
        color: "#fd7e14",
        category: BadgeCategory::Special,
        points: 300,
        requirement: "HackJam 2025 participation",
        rarity: Rarity::Legendary,
    },
];

/// 按 ID 查找徽章定义
pub fn find_badge(badge_id: &str) -> Option<&'static BadgeDefinition> {
    BADGES.iter().find(|b| b.id == badge_id)
}

/// 按分类列出徽章
pub fn badges_by_category(category: BadgeCategory) -> Vec<&'static BadgeDefinition> {
    BADGES.iter().filter(|b| b.category == category).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_ids_are_unique() {
        let ids: HashSet<&str> = BADGES.iter().map(|b| b.id).collect();
        assert_eq!(ids.len(), BADGES.len());
    }

    #[test]
    fn test_find_badge() {
        let badge = find_badge("master-learner").unwrap();
        assert_eq!(badge.name, "Master Learner");
        assert_eq!(badge.points, 500);
        assert_eq!(badge.rarity, Rarity::Epic);

        assert!(find_badge("no-such-badge").is_none());
    }

    #[test]
    fn test_badges_by_category() {
        let learning = badges_by_category(BadgeCategory::Learning);
        assert_eq!(learning.len(), 5);

        let special = badges_by_category(BadgeCategory::Special);
        assert_eq!(special.len(), 3);
    }

    #[test]
    fn test_all_points_positive() {
        for badge in &BADGES {
            assert!(badge.points > 0, "badge {} has non-positive points", badge.id);
        }
    }
}
