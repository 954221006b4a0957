//! 画面状態モジュール
//!
//! 描画から切り離した純粋な状態遷移と集計。ネイティブでテストできる。

pub mod aggregate;
pub mod boards;
pub mod forms;
pub mod modal;
pub mod selection;
pub mod tree;

pub use aggregate::{CompanyTreeSummary, DealSummary, MemberReviewSummary, ReviewQueueSummary, SubtaskSummary};
pub use boards::{DealBoard, ReviewBoard, ReviewDecision, SubtaskBoard};
pub use forms::{CreateSubtaskForm, ReviewDecisionForm, ScheduleCallForm};
pub use modal::ModalState;
pub use selection::RowSelection;
pub use tree::{ExpandState, NodeKey, NodeLevel};
