//! UIコンポーネントモジュール

pub mod badges;
pub mod company_tree;
pub mod deal_detail;
pub mod modal;
pub mod review_detail;
pub mod schedule_call;
pub mod session_header;
pub mod stat_card;
pub mod subtask_detail;
pub mod subtask_form;

pub use badges::{FlagBadge, StatusBadge};
pub use company_tree::CompanyTree;
pub use deal_detail::DealDetailModal;
pub use modal::{FormErrorList, Modal};
pub use review_detail::{MemberReviewModal, ReviewDetailModal};
pub use schedule_call::ScheduleCallModal;
pub use session_header::SessionHeader;
pub use stat_card::StatCard;
pub use subtask_detail::SubtaskDetailPanel;
pub use subtask_form::CreateSubtaskModal;
