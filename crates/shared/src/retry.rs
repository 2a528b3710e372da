//! 瞬时故障重试
//!
//! 幂等写操作（如徽章授予落库）在网络抖动、连接池耗尽等瞬时故障下
//! 按指数退避补试。错误是否瞬时由调用方判定，业务错误不重试。

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::CommunityError;

/// 退避参数
///
/// 第 n 次重试前等待 base_delay * 2^(n-1)，封顶 max_delay
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// 总尝试次数（含首次执行）
    pub max_attempts: u32,
    /// 首次重试前的等待
    pub base_delay: Duration,
    /// 单次等待上限
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// 第 n 次重试前的等待时间（n 从 1 开始）
    fn backoff(&self, retry: u32) -> Duration {
        // 移位上限防溢出，实际退避早已被 max_delay 截断
        let factor = 1u32 << retry.saturating_sub(1).min(16);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }

    /// 按本策略执行异步操作
    ///
    /// 失败且错误被判定为瞬时时退避后重跑，直到成功、次数用尽
    /// 或遇到非瞬时错误。操作必须幂等，重跑可能重复执行副作用。
    pub async fn run<T, F, Fut>(
        &self,
        op_name: &str,
        is_transient: impl Fn(&CommunityError) -> bool,
        mut op: F,
    ) -> Result<T, CommunityError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, CommunityError>>,
    {
        let mut attempt = 1u32;

        loop {
            let err = match op().await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };

            if !is_transient(&err) {
                return Err(err);
            }

            if attempt >= self.max_attempts {
                warn!(
                    operation = op_name,
                    attempts = attempt,
                    error = %err,
                    "瞬时故障重试次数用尽"
                );
                return Err(err);
            }

            let delay = self.backoff(attempt);
            warn!(
                operation = op_name,
                attempt,
                delay_ms = delay.as_millis() as u64,
                error = %err,
                "瞬时故障，退避后重试"
            );

            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}
