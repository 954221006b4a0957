//! ビューモジュール（タブごとの画面）

pub mod companies;
pub mod deal_list;
pub mod subtask_reviews;
pub mod subtasks;
pub mod team_member_reviews;

pub use companies::Companies;
pub use deal_list::DealList;
pub use subtask_reviews::SubtaskReviewsScreen;
pub use subtasks::SubtasksScreen;
pub use team_member_reviews::TeamMemberReviews;
