//! ダッシュボード集計
//!
//! どれも現在のスナップショットから毎回全件数え直す純粋関数。
//! 画面側では `create_memo` で包み、コレクションか共有の時計が変わるたびに再計算する。

use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::collections::HashMap;
use std::hash::Hash;

use crate::models::*;

/// 条件に一致する件数
pub fn count_where<T>(items: &[T], pred: impl Fn(&T) -> bool) -> usize {
    items.iter().filter(|item| pred(item)).count()
}

/// キーごとの件数
pub fn count_by<T, K>(items: &[T], key: impl Fn(&T) -> K) -> HashMap<K, usize>
where
    K: Eq + Hash,
{
    let mut counts = HashMap::new();
    for item in items {
        *counts.entry(key(item)).or_insert(0) += 1;
    }
    counts
}

/// フラグが指定集合に含まれる件数
pub fn count_flagged<T>(items: &[T], flag_of: impl Fn(&T) -> QualityFlag, set: &[QualityFlag]) -> usize {
    count_where(items, |item| set.contains(&flag_of(item)))
}

/// 期限日の 00:00 (UTC) が現在時刻より前で、未完了のもの
pub fn is_overdue(deadline: NaiveDate, status: ExecutionStatus, now: DateTime<Utc>) -> bool {
    let due = deadline.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    match due {
        Some(due) => due < now && status != ExecutionStatus::Completed,
        None => false,
    }
}

/// 承認待ちのまま SLA 時間を超えたか
pub fn review_sla_breached(item: &SubtaskForReview, now: DateTime<Utc>, sla_hours: i64) -> bool {
    item.approval_status == ApprovalStatus::Pending
        && now.signed_duration_since(item.submitted_at) > Duration::hours(sla_hours)
}

// ============================================
// サブタスク（チームリーダー画面）
// ============================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtaskSummary {
    pub total: usize,
    pub not_started: usize,
    pub in_progress: usize,
    pub blocked: usize,
    pub in_review: usize,
    pub completed: usize,
    pub overdue: usize,
    pub red_flags: usize,
    pub pending_approval: usize,
    pub sla_breaches: usize,
    pub running_timers: usize,
}

impl SubtaskSummary {
    pub fn from_subtasks(subtasks: &[TeamLeadSubtask], now: DateTime<Utc>) -> Self {
        let by_status = count_by(subtasks, |s| s.execution_status);
        let bucket = |status: ExecutionStatus| by_status.get(&status).copied().unwrap_or(0);

        Self {
            total: subtasks.len(),
            not_started: bucket(ExecutionStatus::NotStarted),
            in_progress: bucket(ExecutionStatus::InProgress),
            blocked: bucket(ExecutionStatus::Blocked),
            in_review: bucket(ExecutionStatus::InReview),
            completed: bucket(ExecutionStatus::Completed),
            overdue: count_where(subtasks, |s| is_overdue(s.deadline, s.execution_status, now)),
            red_flags: count_flagged(subtasks, |s| s.quality_flag, &QualityFlag::RED),
            pending_approval: count_where(subtasks, |s| s.approval_status == ApprovalStatus::Pending),
            sla_breaches: count_where(subtasks, |s| s.exceeds_estimate()),
            running_timers: count_where(subtasks, |s| s.timer_status == TimerStatus::Running),
        }
    }
}

// ============================================
// レビュー待ち（レビュー画面）
// ============================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewQueueSummary {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub changes_requested: usize,
    pub red_flags: usize,
    pub sla_breaches: usize,
}

impl ReviewQueueSummary {
    pub fn from_queue(queue: &[SubtaskForReview], now: DateTime<Utc>, sla_hours: i64) -> Self {
        Self {
            total: queue.len(),
            pending: count_where(queue, |s| s.approval_status == ApprovalStatus::Pending),
            approved: count_where(queue, |s| s.approval_status == ApprovalStatus::Approved),
            changes_requested: count_where(queue, |s| {
                s.approval_status == ApprovalStatus::ChangesRequested
            }),
            red_flags: count_flagged(queue, |s| s.quality_flag, &QualityFlag::RED),
            sla_breaches: count_where(queue, |s| review_sla_breached(s, now, sla_hours)),
        }
    }
}

// ============================================
// 案件
// ============================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DealSummary {
    pub total: usize,
    pub by_status: Vec<(DealStatus, usize)>,
    pub high_risk: usize,
    pub intro_calls_pending: usize,
    pub converted: usize,
    pub total_budget: u64,
}

impl DealSummary {
    pub fn from_deals(deals: &[Deal]) -> Self {
        let counts = count_by(deals, |d| d.status);
        let by_status = DealStatus::ALL
            .into_iter()
            .map(|status| (status, counts.get(&status).copied().unwrap_or(0)))
            .collect();

        Self {
            total: deals.len(),
            by_status,
            high_risk: count_where(deals, |d| d.risk == RiskLevel::High),
            intro_calls_pending: count_where(deals, |d| d.intro_call_status == IntroCallStatus::Pending),
            converted: count_where(deals, |d| d.converted_to_projects),
            total_budget: deals.iter().map(|d| d.budget).sum(),
        }
    }

    pub fn status_count(&self, status: DealStatus) -> usize {
        self.by_status
            .iter()
            .find(|(s, _)| *s == status)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }
}

// ============================================
// メンバー評価
// ============================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberReviewSummary {
    pub total: usize,
    /// 評価済みのみで平均（未評価は除外）
    pub average_rating: Option<f64>,
    pub pending_ratings: usize,
    pub approved: usize,
    pub changes_requested: usize,
    pub rejected: usize,
    pub sla_breaches: usize,
}

impl MemberReviewSummary {
    pub fn from_reviews(reviews: &[DetailedTeamMemberReview]) -> Self {
        let rated: Vec<u8> = reviews.iter().filter_map(|r| r.rating).collect();
        let average_rating = (!rated.is_empty())
            .then(|| rated.iter().map(|r| f64::from(*r)).sum::<f64>() / rated.len() as f64);
        let by_outcome = count_by(reviews, |r| r.outcome);
        let outcome = |o: ReviewOutcome| by_outcome.get(&o).copied().unwrap_or(0);

        Self {
            total: reviews.len(),
            average_rating,
            pending_ratings: reviews.len() - rated.len(),
            approved: outcome(ReviewOutcome::Approved),
            changes_requested: outcome(ReviewOutcome::ChangesRequested),
            rejected: outcome(ReviewOutcome::Rejected),
            sla_breaches: count_where(reviews, |r| r.sla_breached),
        }
    }
}

// ============================================
// 会社ツリー
// ============================================

/// 件数は各レコードの表示用フィールドをそのまま合計する（子配列からは数え直さない）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyTreeSummary {
    pub agencies: usize,
    pub companies: usize,
    pub deals: usize,
    pub projects: usize,
}

impl CompanyTreeSummary {
    pub fn from_agencies(agencies: &[Agency]) -> Self {
        let companies = agencies.iter().flat_map(|a| a.companies.iter());
        Self {
            agencies: agencies.len(),
            companies: agencies.iter().map(|a| a.company_count).sum(),
            deals: companies.clone().map(|c| c.deal_count).sum(),
            projects: companies.map(|c| c.project_count).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn subtask(id: &str, deadline: &str, status: ExecutionStatus) -> TeamLeadSubtask {
        TeamLeadSubtask {
            id: id.to_string(),
            name: format!("Subtask {}", id),
            description: String::new(),
            parent_task: TaskRef { id: "t-1".to_string(), name: "Launch".to_string() },
            assignee: MemberRef { id: "m-1".to_string(), name: "Ana".to_string() },
            deadline: NaiveDate::parse_from_str(deadline, "%Y-%m-%d").unwrap(),
            priority: Priority::Medium,
            approval_status: ApprovalStatus::Pending,
            execution_status: status,
            timer_status: TimerStatus::Stopped,
            quality_flag: QualityFlag::NoFlag,
            time_spent: 0,
            estimated_hours: None,
            output_requirements: Vec::new(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_overdue_past_deadline_in_progress() {
        let items = vec![subtask("1", "2020-01-01", ExecutionStatus::InProgress)];
        assert_eq!(SubtaskSummary::from_subtasks(&items, now()).overdue, 1);
    }

    #[test]
    fn test_future_deadline_not_overdue() {
        let items = vec![subtask("1", "2999-01-01", ExecutionStatus::InProgress)];
        assert_eq!(SubtaskSummary::from_subtasks(&items, now()).overdue, 0);
    }

    #[test]
    fn test_completed_never_overdue() {
        let items = vec![subtask("1", "2020-01-01", ExecutionStatus::Completed)];
        assert_eq!(SubtaskSummary::from_subtasks(&items, now()).overdue, 0);
    }

    #[test]
    fn test_overdue_is_strict_at_midnight_utc() {
        let deadline = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let midnight = Utc.with_ymd_and_hms(2026, 10, 16, 0, 0, 0).unwrap();
        assert!(!is_overdue(deadline, ExecutionStatus::InProgress, midnight));
        assert!(is_overdue(
            deadline,
            ExecutionStatus::InProgress,
            midnight + Duration::seconds(1)
        ));
    }

    #[test]
    fn test_overdue_recomputed_after_append() {
        let mut items = vec![subtask("1", "2999-01-01", ExecutionStatus::NotStarted)];
        assert_eq!(SubtaskSummary::from_subtasks(&items, now()).overdue, 0);
        items.push(subtask("2", "2020-01-01", ExecutionStatus::Blocked));
        let summary = SubtaskSummary::from_subtasks(&items, now());
        assert_eq!(summary.overdue, 1);
        assert_eq!(summary.blocked, 1);
        assert_eq!(summary.total, 2);
    }

    #[test]
    fn test_overdue_advances_with_clock_alone() {
        let items = vec![subtask("1", "2026-10-17", ExecutionStatus::InProgress)];
        assert_eq!(SubtaskSummary::from_subtasks(&items, now()).overdue, 0);
        let next_day = now() + Duration::hours(13);
        assert_eq!(SubtaskSummary::from_subtasks(&items, next_day).overdue, 1);
    }

    #[test]
    fn test_subtask_buckets_and_flags() {
        let mut items = vec![
            subtask("1", "2999-01-01", ExecutionStatus::Blocked),
            subtask("2", "2999-01-01", ExecutionStatus::Blocked),
            subtask("3", "2999-01-01", ExecutionStatus::Completed),
        ];
        items[0].quality_flag = QualityFlag::RedL1;
        items[1].quality_flag = QualityFlag::RedL2;
        items[2].quality_flag = QualityFlag::Yellow;
        items[2].approval_status = ApprovalStatus::Approved;
        items[2].estimated_hours = Some(1.0);
        items[2].time_spent = 3601;

        let summary = SubtaskSummary::from_subtasks(&items, now());
        assert_eq!(summary.blocked, 2);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.red_flags, 2);
        assert_eq!(summary.pending_approval, 2);
        assert_eq!(summary.sla_breaches, 1);
    }

    #[test]
    fn test_count_flagged_with_custom_set() {
        let flags = [QualityFlag::Green, QualityFlag::RedL2, QualityFlag::Yellow];
        assert_eq!(count_flagged(&flags, |f| *f, &[QualityFlag::Yellow, QualityFlag::Green]), 2);
    }

    #[test]
    fn test_review_sla_breach() {
        let item = SubtaskForReview {
            id: "r-1".to_string(),
            name: "Hero banner".to_string(),
            parent_task: TaskRef { id: "t-1".to_string(), name: "Launch".to_string() },
            submitted_by: MemberRef { id: "m-1".to_string(), name: "Ana".to_string() },
            submitted_at: now() - Duration::hours(30),
            approval_status: ApprovalStatus::Pending,
            execution_status: ExecutionStatus::InReview,
            timer_status: TimerStatus::Stopped,
            quality_flag: QualityFlag::RedL1,
            time_spent: 0,
            output_requirements: Vec::new(),
            history: Vec::new(),
        };
        let mut approved = item.clone();
        approved.approval_status = ApprovalStatus::Approved;

        let queue = vec![item, approved];
        let summary = ReviewQueueSummary::from_queue(&queue, now(), 24);
        assert_eq!(summary.sla_breaches, 1);
        assert_eq!(summary.pending, 1);
        assert_eq!(summary.approved, 1);
        assert_eq!(summary.red_flags, 2);
        assert_eq!(ReviewQueueSummary::from_queue(&queue, now(), 48).sla_breaches, 0);
        let later = now() + Duration::hours(19);
        assert_eq!(ReviewQueueSummary::from_queue(&queue, later, 48).sla_breaches, 1);
    }

    #[test]
    fn test_average_rating_skips_pending() {
        let review = |rating: Option<u8>, outcome: ReviewOutcome| DetailedTeamMemberReview {
            id: "x".to_string(),
            member: MemberRef { id: "m-1".to_string(), name: "Ana".to_string() },
            subtask_name: "Copy".to_string(),
            reviewer: "Lee".to_string(),
            outcome,
            rating,
            strengths: Vec::new(),
            improvements: Vec::new(),
            comments: String::new(),
            reviewed_at: now(),
            sla_breached: false,
        };
        let reviews = vec![
            review(Some(4), ReviewOutcome::Approved),
            review(Some(2), ReviewOutcome::ChangesRequested),
            review(None, ReviewOutcome::Approved),
        ];
        let summary = MemberReviewSummary::from_reviews(&reviews);
        assert_eq!(summary.average_rating, Some(3.0));
        assert_eq!(summary.pending_ratings, 1);
        assert_eq!(summary.approved, 2);
        assert_eq!(MemberReviewSummary::from_reviews(&[]).average_rating, None);
    }

    #[test]
    fn test_company_counts_are_taken_as_given() {
        let agencies = vec![Agency {
            id: "a-1".to_string(),
            name: "North".to_string(),
            company_count: 5,
            companies: vec![Company {
                id: "c-1".to_string(),
                name: "Acme".to_string(),
                industry: String::new(),
                deal_count: 3,
                project_count: 7,
                deals: Vec::new(),
            }],
        }];
        let summary = CompanyTreeSummary::from_agencies(&agencies);
        assert_eq!(summary.companies, 5);
        assert_eq!(summary.deals, 3);
        assert_eq!(summary.projects, 7);
    }
}
