//! 规则评估器
//!
//! 对活动快照执行一次全量规则评估：遍历规则表，谓词为真且
//! 用户尚未持有对应徽章时，将该徽章加入授予列表。
//! 评估本身不产生副作用，授予落库由调用方原子化完成。

use std::collections::HashSet;

use crate::catalog::find_badge;
use crate::models::{ActivitySnapshot, BadgeDefinition};
use crate::rules::AWARD_RULES;

/// 评估全部规则，返回应新授予的徽章定义列表
///
/// `held` 是用户已持有的徽章 ID 集合。返回列表按规则表顺序排列，
/// 且不包含重复项。对同一快照和持有集重复调用结果一致——
/// 把上次的返回并入 `held` 后再调用，必然得到空列表。
pub fn evaluate(snapshot: &ActivitySnapshot, held: &HashSet<String>) -> Vec<&'static BadgeDefinition> {
    AWARD_RULES
        .iter()
        .filter(|rule| !held.contains(rule.badge_id))
        .filter(|rule| (rule.predicate)(snapshot))
        .filter_map(|rule| find_badge(rule.badge_id))
        .collect()
}

/// 计算一组徽章的积分合计
pub fn points_for(badges: &[&BadgeDefinition]) -> i64 {
    badges.iter().map(|b| b.points).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    /// 注册时间在 early-adopter 截止点之后的空白快照
    fn fresh_snapshot() -> ActivitySnapshot {
        ActivitySnapshot {
            created_at: Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap(),
            ..Default::default()
        }
    }

    fn held(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn granted_ids(badges: &[&BadgeDefinition]) -> Vec<&'static str> {
        badges.iter().map(|b| b.id).collect()
    }

    #[test]
    fn test_blank_snapshot_grants_only_welcome_badge() {
        let snapshot = fresh_snapshot();
        let granted = evaluate(&snapshot, &HashSet::new());

        // 空白账号只触发无条件的欢迎徽章
        assert_eq!(granted_ids(&granted), vec!["hackjam-participant"]);
    }

    #[test]
    fn test_zero_lessons_no_first_lesson() {
        let snapshot = fresh_snapshot();
        let granted = evaluate(&snapshot, &held(&["hackjam-participant"]));
        assert!(granted.is_empty());
    }

    #[test]
    fn test_one_lesson_grants_first_lesson() {
        let snapshot = ActivitySnapshot {
            completed_lessons: 1,
            ..fresh_snapshot()
        };
        let granted = evaluate(&snapshot, &held(&["hackjam-participant"]));

        assert_eq!(granted_ids(&granted), vec!["first-lesson"]);
        assert_eq!(points_for(&granted), 25);
    }

    #[test]
    fn test_five_courses_grant_graduate_and_master() {
        let snapshot = ActivitySnapshot {
            completed_courses: 5,
            ..fresh_snapshot()
        };
        let granted = evaluate(&snapshot, &held(&["hackjam-participant"]));

        // 同一轮评估中两枚课程徽章一起授予
        assert_eq!(granted_ids(&granted), vec!["course-complete", "master-learner"]);
        assert_eq!(points_for(&granted), 600);
    }

    #[test]
    fn test_community_leader_threshold() {
        let mut snapshot = ActivitySnapshot {
            forum_posts: 5,
            forum_replies: 25,
            ..fresh_snapshot()
        };
        let already = held(&["hackjam-participant", "first-post"]);

        let granted = evaluate(&snapshot, &already);
        assert_eq!(granted_ids(&granted), vec!["community-leader"]);

        // 回复数差一个，不触发
        snapshot.forum_replies = 24;
        let granted = evaluate(&snapshot, &already);
        assert!(granted.is_empty());
    }

    #[test]
    fn test_early_adopter_granted_exactly_once() {
        let snapshot = ActivitySnapshot {
            created_at: Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap(),
            ..Default::default()
        };

        let first_run = evaluate(&snapshot, &held(&["hackjam-participant"]));
        assert_eq!(granted_ids(&first_run), vec!["early-adopter"]);

        // 无论欢迎流程跑多少次，已持有即不再授予
        let already = held(&["hackjam-participant", "early-adopter"]);
        for _ in 0..3 {
            assert!(evaluate(&snapshot, &already).is_empty());
        }
    }

    #[test]
    fn test_early_adopter_not_granted_at_cutoff() {
        // 恰好等于截止时刻的注册不算早期用户
        let snapshot = ActivitySnapshot {
            created_at: crate::rules::early_adopter_cutoff(),
            ..Default::default()
        };
        let granted = evaluate(&snapshot, &held(&["hackjam-participant"]));
        assert!(granted.is_empty());
    }

    #[test]
    fn test_point_collector_uses_snapshot_points_only() {
        // 快照积分 900，即使本轮授予的徽章会把积分推过 1000，
        // point-collector 也要等下一轮快照才触发
        let snapshot = ActivitySnapshot {
            completed_courses: 5,
            points: 900,
            ..fresh_snapshot()
        };
        let granted = evaluate(&snapshot, &held(&["hackjam-participant"]));
        assert!(!granted_ids(&granted).contains(&"point-collector"));

        let next = ActivitySnapshot {
            points: 1500,
            ..snapshot
        };
        let already = held(&[
            "hackjam-participant",
            "course-complete",
            "master-learner",
        ]);
        let granted = evaluate(&next, &already);
        assert_eq!(granted_ids(&granted), vec!["point-collector"]);
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let snapshot = ActivitySnapshot {
            completed_lessons: 12,
            completed_courses: 5,
            authored_courses: 1,
            forum_posts: 6,
            forum_replies: 30,
            events_attended: 2,
            points: 1200,
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
        };

        let mut all_held = HashSet::new();
        let first_run = evaluate(&snapshot, &all_held);
        assert!(!first_run.is_empty());
        let total = points_for(&first_run);

        // 把第一轮授予结果并入持有集，第二轮必须为空
        for badge in &first_run {
            all_held.insert(badge.id.to_string());
        }
        let second_run = evaluate(&snapshot, &all_held);
        assert!(second_run.is_empty());
        assert_eq!(points_for(&second_run), 0);

        // 第一轮授予全部满足条件的徽章
        assert_eq!(
            total,
            [
                "first-lesson",
                "course-complete",
                "master-learner",
                "course-creator",
                "first-post",
                "community-leader",
                "event-attendee",
                "point-collector",
                "early-adopter",
                "hackjam-participant",
            ]
            .iter()
            .map(|id| find_badge(id).unwrap().points)
            .sum::<i64>()
        );
    }

    #[test]
    fn test_held_badges_never_regranted() {
        let snapshot = ActivitySnapshot {
            completed_lessons: 3,
            forum_posts: 2,
            ..fresh_snapshot()
        };
        let already = held(&["hackjam-participant", "first-lesson", "first-post"]);

        let granted = evaluate(&snapshot, &already);
        assert!(granted.is_empty());
    }
}
