//! データ構造体モジュール

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================
// ラベル表
// ============================================

/// 画面ごとのラベル表の切り替え
///
/// 品質フラグは画面によって表記が異なる（"Red L1" と "L1"、"No Flag" と "Not Flagged"）。
/// 列挙型は一つに統一し、表示時にここで変換する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSet {
    TeamLead,
    Review,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QualityFlag {
    #[serde(rename = "Green")]
    Green,
    #[serde(rename = "Yellow")]
    Yellow,
    #[serde(rename = "Red L1", alias = "L1")]
    RedL1,
    #[serde(rename = "Red L2", alias = "L2")]
    RedL2,
    #[serde(rename = "No Flag", alias = "Not Flagged")]
    NoFlag,
}

const TEAM_LEAD_FLAG_LABELS: &[(QualityFlag, &str)] = &[
    (QualityFlag::Green, "Green"),
    (QualityFlag::Yellow, "Yellow"),
    (QualityFlag::RedL1, "Red L1"),
    (QualityFlag::RedL2, "Red L2"),
    (QualityFlag::NoFlag, "No Flag"),
];

const REVIEW_FLAG_LABELS: &[(QualityFlag, &str)] = &[
    (QualityFlag::Green, "Green"),
    (QualityFlag::Yellow, "Yellow"),
    (QualityFlag::RedL1, "L1"),
    (QualityFlag::RedL2, "L2"),
    (QualityFlag::NoFlag, "Not Flagged"),
];

impl QualityFlag {
    pub const ALL: [QualityFlag; 5] = [
        QualityFlag::Green,
        QualityFlag::Yellow,
        QualityFlag::RedL1,
        QualityFlag::RedL2,
        QualityFlag::NoFlag,
    ];

    /// 赤フラグ（集計対象）
    pub const RED: [QualityFlag; 2] = [QualityFlag::RedL1, QualityFlag::RedL2];

    fn table(set: LabelSet) -> &'static [(QualityFlag, &'static str)] {
        match set {
            LabelSet::TeamLead => TEAM_LEAD_FLAG_LABELS,
            LabelSet::Review => REVIEW_FLAG_LABELS,
        }
    }

    pub fn label(self, set: LabelSet) -> &'static str {
        Self::table(set)
            .iter()
            .find(|(flag, _)| *flag == self)
            .map(|(_, label)| *label)
            .unwrap_or("")
    }

    /// 画面ラベルから列挙値へ変換（表にないラベルは None）
    pub fn from_label(set: LabelSet, label: &str) -> Option<QualityFlag> {
        Self::table(set)
            .iter()
            .find(|(_, l)| *l == label)
            .map(|(flag, _)| *flag)
    }

    pub fn css_class(self) -> &'static str {
        match self {
            QualityFlag::Green => "flag-green",
            QualityFlag::Yellow => "flag-yellow",
            QualityFlag::RedL1 => "flag-red-l1",
            QualityFlag::RedL2 => "flag-red-l2",
            QualityFlag::NoFlag => "flag-none",
        }
    }

    pub fn is_red(self) -> bool {
        Self::RED.contains(&self)
    }
}

impl Default for QualityFlag {
    fn default() -> Self {
        QualityFlag::NoFlag
    }
}

// ============================================
// 案件（Deal）
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DealStatus {
    #[serde(rename = "New Lead")]
    NewLead,
    #[serde(rename = "Qualified")]
    Qualified,
    #[serde(rename = "Intro Call Done")]
    IntroCallDone,
    #[serde(rename = "Proposal Sent")]
    ProposalSent,
    #[serde(rename = "Won")]
    Won,
    #[serde(rename = "Lost")]
    Lost,
}

impl DealStatus {
    pub const ALL: [DealStatus; 6] = [
        DealStatus::NewLead,
        DealStatus::Qualified,
        DealStatus::IntroCallDone,
        DealStatus::ProposalSent,
        DealStatus::Won,
        DealStatus::Lost,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DealStatus::NewLead => "New Lead",
            DealStatus::Qualified => "Qualified",
            DealStatus::IntroCallDone => "Intro Call Done",
            DealStatus::ProposalSent => "Proposal Sent",
            DealStatus::Won => "Won",
            DealStatus::Lost => "Lost",
        }
    }

    pub fn from_label(label: &str) -> Option<DealStatus> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntroCallStatus {
    Pending,
    Done,
}

impl IntroCallStatus {
    pub fn label(self) -> &'static str {
        match self {
            IntroCallStatus::Pending => "Pending",
            IntroCallStatus::Done => "Done",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

/// 初回打ち合わせ（Intro Call）の予定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntroCall {
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(default)]
    pub attendees: Vec<String>,
    #[serde(default)]
    pub agenda: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub services: Vec<String>,
    pub status: DealStatus,
    pub intro_call_status: IntroCallStatus,
    pub risk: RiskLevel,
    pub budget: u64,
    #[serde(default)]
    pub converted_to_projects: bool,
    #[serde(default)]
    pub intro_call: Option<IntroCall>,
}

impl Deal {
    /// "Convert to Projects" はIntro Call完了後のみ
    pub fn can_convert(&self) -> bool {
        self.intro_call_status == IntroCallStatus::Done && !self.converted_to_projects
    }
}

// ============================================
// 代理店 → 会社 → 案件 → プロジェクト
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    Planning,
    Active,
    #[serde(rename = "On Hold")]
    OnHold,
    Completed,
}

impl ProjectStatus {
    pub fn label(self) -> &'static str {
        match self {
            ProjectStatus::Planning => "Planning",
            ProjectStatus::Active => "Active",
            ProjectStatus::OnHold => "On Hold",
            ProjectStatus::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub status: ProjectStatus,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

/// 会社配下の案件サマリ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyDeal {
    pub id: String,
    pub name: String,
    pub status: DealStatus,
    pub value: u64,
    pub project_count: usize,
    #[serde(default)]
    pub projects: Vec<Project>,
}

/// 件数フィールド（deal_count, project_count）は表示値としてそのまま使う
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub industry: String,
    pub deal_count: usize,
    pub project_count: usize,
    #[serde(default)]
    pub deals: Vec<CompanyDeal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agency {
    pub id: String,
    pub name: String,
    pub company_count: usize,
    #[serde(default)]
    pub companies: Vec<Company>,
}

// ============================================
// タスク・サブタスク
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApprovalStatus {
    Pending,
    Approved,
    #[serde(rename = "Changes Requested")]
    ChangesRequested,
    Rejected,
}

impl ApprovalStatus {
    pub fn label(self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "Pending",
            ApprovalStatus::Approved => "Approved",
            ApprovalStatus::ChangesRequested => "Changes Requested",
            ApprovalStatus::Rejected => "Rejected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExecutionStatus {
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    Blocked,
    #[serde(rename = "In Review")]
    InReview,
    Completed,
}

impl ExecutionStatus {
    pub const ALL: [ExecutionStatus; 5] = [
        ExecutionStatus::NotStarted,
        ExecutionStatus::InProgress,
        ExecutionStatus::Blocked,
        ExecutionStatus::InReview,
        ExecutionStatus::Completed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ExecutionStatus::NotStarted => "Not Started",
            ExecutionStatus::InProgress => "In Progress",
            ExecutionStatus::Blocked => "Blocked",
            ExecutionStatus::InReview => "In Review",
            ExecutionStatus::Completed => "Completed",
        }
    }

    pub fn from_label(label: &str) -> Option<ExecutionStatus> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerStatus {
    Stopped,
    Running,
    Paused,
}

impl TimerStatus {
    pub fn label(self) -> &'static str {
        match self {
            TimerStatus::Stopped => "Stopped",
            TimerStatus::Running => "Running",
            TimerStatus::Paused => "Paused",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [Priority::Low, Priority::Medium, Priority::High, Priority::Urgent];

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Urgent => "Urgent",
        }
    }

    pub fn from_label(label: &str) -> Option<Priority> {
        Self::ALL.into_iter().find(|p| p.label() == label)
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

/// フォームの選択肢になる親タスク
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentTask {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub project_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRequirement {
    pub label: String,
    #[serde(default)]
    pub done: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamLeadSubtask {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub parent_task: TaskRef,
    pub assignee: MemberRef,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub priority: Priority,
    pub approval_status: ApprovalStatus,
    pub execution_status: ExecutionStatus,
    pub timer_status: TimerStatus,
    #[serde(default)]
    pub quality_flag: QualityFlag,
    /// 累積作業時間（秒）
    #[serde(default)]
    pub time_spent: u64,
    #[serde(default)]
    pub estimated_hours: Option<f64>,
    #[serde(default)]
    pub output_requirements: Vec<OutputRequirement>,
}

impl TeamLeadSubtask {
    pub fn requirements_done(&self) -> usize {
        self.output_requirements.iter().filter(|r| r.done).count()
    }

    /// 見積時間を超過した作業（SLA超過）
    pub fn exceeds_estimate(&self) -> bool {
        match self.estimated_hours {
            Some(hours) => self.time_spent as f64 > hours * 3600.0,
            None => false,
        }
    }
}

// ============================================
// レビュー
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReviewOutcome {
    Approved,
    #[serde(rename = "Changes Requested")]
    ChangesRequested,
    Rejected,
}

impl ReviewOutcome {
    pub const ALL: [ReviewOutcome; 3] = [
        ReviewOutcome::Approved,
        ReviewOutcome::ChangesRequested,
        ReviewOutcome::Rejected,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ReviewOutcome::Approved => "Approved",
            ReviewOutcome::ChangesRequested => "Changes Requested",
            ReviewOutcome::Rejected => "Rejected",
        }
    }
}

/// 過去のレビュー結果（変更しない履歴レコード）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub reviewer: String,
    pub outcome: ReviewOutcome,
    /// 0〜5、未評価は None
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub feedback: Vec<String>,
    pub reviewed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtaskForReview {
    pub id: String,
    pub name: String,
    pub parent_task: TaskRef,
    pub submitted_by: MemberRef,
    pub submitted_at: DateTime<Utc>,
    pub approval_status: ApprovalStatus,
    pub execution_status: ExecutionStatus,
    pub timer_status: TimerStatus,
    #[serde(default)]
    pub quality_flag: QualityFlag,
    #[serde(default)]
    pub time_spent: u64,
    #[serde(default)]
    pub output_requirements: Vec<OutputRequirement>,
    #[serde(default)]
    pub history: Vec<Review>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedTeamMemberReview {
    pub id: String,
    pub member: MemberRef,
    pub subtask_name: String,
    pub reviewer: String,
    pub outcome: ReviewOutcome,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
    #[serde(default)]
    pub comments: String,
    pub reviewed_at: DateTime<Utc>,
    #[serde(default)]
    pub sla_breached: bool,
}

// ============================================
// ログインユーザー（表示のみ）
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub email: String,
}

impl CurrentUser {
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .take(2)
            .collect::<String>()
            .to_uppercase()
    }
}

// ============================================
// モックデータ全体
// ============================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MockData {
    #[serde(default)]
    pub current_user: Option<CurrentUser>,
    #[serde(default)]
    pub agencies: Vec<Agency>,
    #[serde(default)]
    pub deals: Vec<Deal>,
    #[serde(default)]
    pub tasks: Vec<ParentTask>,
    #[serde(default)]
    pub team_members: Vec<TeamMember>,
    #[serde(default)]
    pub subtasks: Vec<TeamLeadSubtask>,
    #[serde(default)]
    pub review_queue: Vec<SubtaskForReview>,
    #[serde(default)]
    pub member_reviews: Vec<DetailedTeamMemberReview>,
}

// ============================================
// ビューモード
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Companies,
    Deals,
    Subtasks,
    SubtaskReviews,
    TeamMemberReviews,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Companies,
        Tab::Deals,
        Tab::Subtasks,
        Tab::SubtaskReviews,
        Tab::TeamMemberReviews,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Companies => "Companies",
            Tab::Deals => "Deals",
            Tab::Subtasks => "Subtasks",
            Tab::SubtaskReviews => "Subtask Reviews",
            Tab::TeamMemberReviews => "Team Reviews",
        }
    }
}

impl Default for Tab {
    fn default() -> Self {
        Tab::Companies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_labels_per_screen() {
        assert_eq!(QualityFlag::RedL1.label(LabelSet::TeamLead), "Red L1");
        assert_eq!(QualityFlag::RedL1.label(LabelSet::Review), "L1");
        assert_eq!(QualityFlag::NoFlag.label(LabelSet::TeamLead), "No Flag");
        assert_eq!(QualityFlag::NoFlag.label(LabelSet::Review), "Not Flagged");
    }

    #[test]
    fn test_only_red_levels_are_red() {
        let red: Vec<_> = QualityFlag::ALL.into_iter().filter(|f| f.is_red()).collect();
        assert_eq!(red, QualityFlag::RED.to_vec());
    }

    #[test]
    fn test_flag_from_label_uses_screen_table() {
        assert_eq!(QualityFlag::from_label(LabelSet::Review, "L2"), Some(QualityFlag::RedL2));
        assert_eq!(QualityFlag::from_label(LabelSet::TeamLead, "L2"), None);
        assert_eq!(QualityFlag::from_label(LabelSet::TeamLead, "Not Flagged"), None);
    }

    #[test]
    fn test_every_flag_has_a_label_on_both_screens() {
        for flag in QualityFlag::ALL {
            for set in [LabelSet::TeamLead, LabelSet::Review] {
                let label = flag.label(set);
                assert!(!label.is_empty());
                assert_eq!(QualityFlag::from_label(set, label), Some(flag));
            }
        }
    }

    #[test]
    fn test_flag_deserializes_either_spelling() {
        let a: QualityFlag = serde_json::from_str("\"Red L1\"").unwrap();
        let b: QualityFlag = serde_json::from_str("\"L1\"").unwrap();
        let c: QualityFlag = serde_json::from_str("\"Not Flagged\"").unwrap();
        assert_eq!(a, QualityFlag::RedL1);
        assert_eq!(b, QualityFlag::RedL1);
        assert_eq!(c, QualityFlag::NoFlag);
    }

    #[test]
    fn test_deal_status_label_roundtrip() {
        for status in DealStatus::ALL {
            assert_eq!(DealStatus::from_label(status.label()), Some(status));
        }
        let parsed: DealStatus = serde_json::from_str("\"Intro Call Done\"").unwrap();
        assert_eq!(parsed, DealStatus::IntroCallDone);
    }

    #[test]
    fn test_initials() {
        let user = CurrentUser {
            id: "u1".to_string(),
            name: "maya de la cruz".to_string(),
            role: String::new(),
            email: String::new(),
        };
        assert_eq!(user.initials(), "MD");
    }
}
