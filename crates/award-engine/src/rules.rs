//! 自动授予规则表
//!
//! 所有自动授予的徽章共用一张数据驱动的规则表：每条规则由徽章 ID
//! 和一个针对活动快照的纯函数谓词组成。新增自动徽章只需在表中
//! 添加一行，评估逻辑无需改动。

use chrono::{DateTime, TimeZone, Utc};

use crate::models::ActivitySnapshot;

/// 自动授予规则
///
/// 谓词只依赖快照，必须是纯函数——同一快照多次评估结果一致，
/// 这是全量重评估幂等性的前提。
#[derive(Clone, Copy)]
pub struct AwardRule {
    pub badge_id: &'static str,
    pub predicate: fn(&ActivitySnapshot) -> bool,
}

impl std::fmt::Debug for AwardRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwardRule")
            .field("badge_id", &self.badge_id)
            .finish()
    }
}

/// early-adopter 的注册时间截止点：2025-07-15 00:00:00 UTC
///
/// 早于该时刻注册的账号视为早期用户。
pub fn early_adopter_cutoff() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 15, 0, 0, 0).unwrap()
}

/// 全部自动授予规则
///
/// 评估按表序进行，输出顺序稳定。community-leader 的回复数统计
/// 用户在全站发表的所有回复，不限定在自己的主贴下。
/// point-collector 只看快照积分，本轮新授徽章的积分不参与判定。
pub static AWARD_RULES: [AwardRule; 10] = [
    AwardRule {
        badge_id: "first-lesson",
        predicate: |s| s.completed_lessons >= 1,
    },
    AwardRule {
        badge_id: "course-complete",
        predicate: |s| s.completed_courses >= 1,
    },
    AwardRule {
        badge_id: "master-learner",
        predicate: |s| s.completed_courses >= 5,
    },
    AwardRule {
        badge_id: "course-creator",
        predicate: |s| s.authored_courses >= 1,
    },
    AwardRule {
        badge_id: "first-post",
        predicate: |s| s.forum_posts >= 1,
    },
    AwardRule {
        badge_id: "community-leader",
        predicate: |s| s.forum_posts >= 5 && s.forum_replies >= 25,
    },
    AwardRule {
        badge_id: "event-attendee",
        predicate: |s| s.events_attended >= 1,
    },
    AwardRule {
        badge_id: "point-collector",
        predicate: |s| s.points >= 1000,
    },
    AwardRule {
        badge_id: "early-adopter",
        predicate: |s| s.created_at < early_adopter_cutoff(),
    },
    // 欢迎徽章：无条件授予，未持有即触发
    AwardRule {
        badge_id: "hackjam-participant",
        predicate: |_| true,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find_badge;

    #[test]
    fn test_every_rule_has_catalog_entry() {
        for rule in &AWARD_RULES {
            assert!(
                find_badge(rule.badge_id).is_some(),
                "rule references unknown badge {}",
                rule.badge_id
            );
        }
    }

    #[test]
    fn test_rule_ids_are_unique() {
        let mut ids: Vec<&str> = AWARD_RULES.iter().map(|r| r.badge_id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), AWARD_RULES.len());
    }

    #[test]
    fn test_early_adopter_cutoff_value() {
        let cutoff = early_adopter_cutoff();
        assert_eq!(cutoff.to_rfc3339(), "2025-07-15T00:00:00+00:00");
    }
}
