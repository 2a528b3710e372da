//! 数据访问层
//!
//! 每个聚合一个仓储，持有连接池。需要跨表原子性的写入
//! （报名容量检查、回复计数维护）在仓储内部使用事务完成。

pub mod activity_repo;
pub mod course_repo;
pub mod event_repo;
pub mod forum_repo;
pub mod user_repo;

pub use activity_repo::ActivityRepository;
pub use course_repo::CourseRepository;
pub use event_repo::EventRepository;
pub use forum_repo::ForumRepository;
pub use user_repo::{LeaderboardRow, UserRepository};
