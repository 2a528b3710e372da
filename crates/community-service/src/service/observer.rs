//! 徽章授予观察者
//!
//! 授予成功后逐个通知注册的观察者。观察者失败只记录日志，
//! 不影响授予结果，也不会阻断后续观察者。

use async_trait::async_trait;
use award_engine::BadgeDefinition;
use tracing::info;
use uuid::Uuid;

/// 徽章授予观察者
///
/// 实现方在注册到 [`crate::service::AwardService`] 后，
/// 每次实际授予（条件插入成功）都会收到一次通知
#[async_trait]
pub trait BadgeObserver: Send + Sync {
    /// 观察者名称，用于日志
    fn name(&self) -> &str;

    /// 徽章授予通知
    async fn on_badge_granted(&self, user_id: Uuid, badge: &BadgeDefinition);
}

/// 日志观察者
///
/// 把每次授予写入结构化日志，作为默认注册的观察者
pub struct TracingObserver;

#[async_trait]
impl BadgeObserver for TracingObserver {
    fn name(&self) -> &str {
        "tracing"
    }

    async fn on_badge_granted(&self, user_id: Uuid, badge: &BadgeDefinition) {
        info!(
            user_id = %user_id,
            badge_id = badge.id,
            points = badge.points,
            rarity = badge.rarity.as_str(),
            "徽章授予成功"
        );
    }
}

#[cfg(test)]
mockall::mock! {
    pub Observer {}

    #[async_trait]
    impl BadgeObserver for Observer {
        fn name(&self) -> &str;
        async fn on_badge_granted(&self, user_id: Uuid, badge: &BadgeDefinition);
    }
}
