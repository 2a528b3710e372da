//! 数据库模型定义

pub mod course;
pub mod event;
pub mod forum;
pub mod user;

pub use course::{Course, Enrollment, Lesson};
pub use event::{Event, EventAttendee};
pub use forum::{Reply, Thread};
pub use user::{User, UserBadge};
