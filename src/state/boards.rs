//! 画面ごとの状態コンテナ
//!
//! 各画面のコレクションはここで一元管理し、子コンポーネントは
//! 型付きのコマンド経由でのみ変更する。失敗したコマンドは状態を変えない。

use chrono::{DateTime, Utc};

use crate::error::{CommandError, FieldError, FormErrors, FormField};
use crate::models::*;
use crate::state::forms::{CreateSubtaskForm, ScheduleCallForm, MAX_RATING};
use crate::utils::log_trace::{log_info, log_warn};

/// 名前の部分一致（大文字小文字を無視）
pub fn matches_query(name: &str, query: &str) -> bool {
    let query = query.trim();
    query.is_empty() || name.to_lowercase().contains(&query.to_lowercase())
}

// ============================================
// 案件ボード
// ============================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DealBoard {
    pub deals: Vec<Deal>,
}

impl DealBoard {
    pub fn new(deals: Vec<Deal>) -> Self {
        Self { deals }
    }

    pub fn find(&self, id: &str) -> Option<&Deal> {
        self.deals.iter().find(|d| d.id == id)
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut Deal, CommandError> {
        self.deals
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| CommandError::DealNotFound(id.to_string()))
    }

    /// IDが一致する案件を置き換える
    pub fn update_deal(&mut self, deal: Deal) -> Result<(), CommandError> {
        let slot = self.find_mut(&deal.id)?;
        *slot = deal;
        Ok(())
    }

    /// Intro Callを登録し、対象案件だけを Pending から Done / "Intro Call Done" にする
    pub fn schedule_call(&mut self, id: &str, form: &ScheduleCallForm) -> Result<&Deal, CommandError> {
        // 存在確認と状態確認は入力エラーより優先
        if self.find_mut(id)?.intro_call_status != IntroCallStatus::Pending {
            log_warn("deals", &format!("Intro call already done for {}", id));
            return Err(CommandError::IntroCallAlreadyDone(id.to_string()));
        }
        let call = form.submit()?;
        let deal = self.find_mut(id)?;
        deal.intro_call_status = IntroCallStatus::Done;
        deal.status = DealStatus::IntroCallDone;
        deal.intro_call = Some(call);
        log_info("deals", &format!("Intro call scheduled for {}", deal.name));
        Ok(&*deal)
    }

    /// プロジェクト化（Intro Call完了が条件）
    pub fn convert_to_projects(&mut self, id: &str) -> Result<&Deal, CommandError> {
        let deal = self.find_mut(id)?;
        if deal.converted_to_projects {
            return Err(CommandError::AlreadyConverted(id.to_string()));
        }
        if deal.intro_call_status != IntroCallStatus::Done {
            log_warn("deals", &format!("Conversion blocked for {}: intro call pending", deal.name));
            return Err(CommandError::IntroCallPending(id.to_string()));
        }
        deal.converted_to_projects = true;
        log_info("deals", &format!("{} converted to projects", deal.name));
        Ok(&*deal)
    }

    pub fn filtered(&self, status: Option<DealStatus>, query: &str) -> Vec<Deal> {
        self.deals
            .iter()
            .filter(|d| status.map_or(true, |s| d.status == s))
            .filter(|d| matches_query(&d.name, query) || matches_query(&d.company, query))
            .cloned()
            .collect()
    }
}

// ============================================
// サブタスクボード（チームリーダー）
// ============================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubtaskBoard {
    pub subtasks: Vec<TeamLeadSubtask>,
    /// フォームの参照先
    pub tasks: Vec<ParentTask>,
    pub members: Vec<TeamMember>,
}

impl SubtaskBoard {
    pub fn new(subtasks: Vec<TeamLeadSubtask>, tasks: Vec<ParentTask>, members: Vec<TeamMember>) -> Self {
        Self { subtasks, tasks, members }
    }

    pub fn find(&self, id: &str) -> Option<&TeamLeadSubtask> {
        self.subtasks.iter().find(|s| s.id == id)
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut TeamLeadSubtask, CommandError> {
        self.subtasks
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| CommandError::SubtaskNotFound(id.to_string()))
    }

    /// フォームを検証して末尾に追加する。失敗時はコレクションを変えない
    pub fn create_subtask(
        &mut self,
        form: &CreateSubtaskForm,
        now: DateTime<Utc>,
    ) -> Result<&TeamLeadSubtask, CommandError> {
        let mut subtask = form.submit(&self.tasks, &self.members, now)?;

        // 同一ミリ秒で作られた場合の重複回避
        let base = subtask.id.clone();
        let mut n = 1;
        while self.find(&subtask.id).is_some() {
            n += 1;
            subtask.id = format!("{}-{}", base, n);
        }

        log_info("subtasks", &format!("Created subtask {} under {}", subtask.name, subtask.parent_task.name));
        self.subtasks.push(subtask);
        Ok(&self.subtasks[self.subtasks.len() - 1])
    }

    pub fn update_subtask(&mut self, subtask: TeamLeadSubtask) -> Result<(), CommandError> {
        let slot = self.find_mut(&subtask.id)?;
        *slot = subtask;
        Ok(())
    }

    /// 成果物チェックを1項目反転
    pub fn toggle_requirement(&mut self, id: &str, index: usize) -> Result<bool, CommandError> {
        let subtask = self.find_mut(id)?;
        match subtask.output_requirements.get_mut(index) {
            Some(req) => {
                req.done = !req.done;
                Ok(req.done)
            }
            None => Err(CommandError::RequirementNotFound {
                id: id.to_string(),
                index,
            }),
        }
    }

    /// タイマー状態の変更（遷移ルールは設けない）
    pub fn set_timer(&mut self, id: &str, status: TimerStatus) -> Result<(), CommandError> {
        let subtask = self.find_mut(id)?;
        subtask.timer_status = status;
        log_info("subtasks", &format!("Timer {} for {}", status.label(), subtask.name));
        Ok(())
    }

    pub fn has_running_timers(&self) -> bool {
        self.subtasks.iter().any(|s| s.timer_status == TimerStatus::Running)
    }

    /// 実行中タイマーの作業時間を加算し、加算した件数を返す
    pub fn tick_timers(&mut self, seconds: u64) -> usize {
        let mut ticked = 0;
        for subtask in self.subtasks.iter_mut().filter(|s| s.timer_status == TimerStatus::Running) {
            subtask.time_spent += seconds;
            ticked += 1;
        }
        ticked
    }

    pub fn filtered(&self, status: Option<ExecutionStatus>, query: &str) -> Vec<TeamLeadSubtask> {
        self.subtasks
            .iter()
            .filter(|s| status.map_or(true, |st| s.execution_status == st))
            .filter(|s| matches_query(&s.name, query))
            .cloned()
            .collect()
    }
}

// ============================================
// レビュー待ちボード
// ============================================

/// レビュー判定の入力
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewDecision {
    pub outcome: ReviewOutcome,
    pub reviewer: String,
    pub rating: Option<u8>,
    pub feedback: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewBoard {
    pub queue: Vec<SubtaskForReview>,
}

impl ReviewBoard {
    pub fn new(queue: Vec<SubtaskForReview>) -> Self {
        Self { queue }
    }

    pub fn find(&self, id: &str) -> Option<&SubtaskForReview> {
        self.queue.iter().find(|s| s.id == id)
    }

    /// 承認/差し戻しを反映し、履歴に1件追加する
    pub fn decide(
        &mut self,
        id: &str,
        decision: ReviewDecision,
        now: DateTime<Utc>,
    ) -> Result<&SubtaskForReview, CommandError> {
        let item = self
            .queue
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| CommandError::SubtaskNotFound(id.to_string()))?;

        if let Some(rating) = decision.rating.filter(|r| *r > MAX_RATING) {
            return Err(FormErrors(vec![FieldError::Invalid {
                field: FormField::Rating,
                value: rating.to_string(),
            }])
            .into());
        }

        item.approval_status = match decision.outcome {
            ReviewOutcome::Approved => ApprovalStatus::Approved,
            ReviewOutcome::ChangesRequested => ApprovalStatus::ChangesRequested,
            ReviewOutcome::Rejected => ApprovalStatus::Rejected,
        };
        item.history.push(Review {
            id: format!("{}-review-{}", item.id, item.history.len() + 1),
            reviewer: decision.reviewer,
            outcome: decision.outcome,
            rating: decision.rating,
            feedback: decision.feedback,
            reviewed_at: now,
        });
        log_info("reviews", &format!("{}: {}", item.name, decision.outcome.label()));
        Ok(&*item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn deal(id: &str, intro: IntroCallStatus) -> Deal {
        Deal {
            id: id.to_string(),
            name: format!("Deal {}", id),
            company: "Acme".to_string(),
            owner: "Lee".to_string(),
            services: vec!["SEO".to_string()],
            status: DealStatus::Qualified,
            intro_call_status: intro,
            risk: RiskLevel::Low,
            budget: 1000,
            converted_to_projects: false,
            intro_call: None,
        }
    }

    fn call_form() -> ScheduleCallForm {
        ScheduleCallForm {
            date: "2026-10-20".to_string(),
            time: "10:00".to_string(),
            attendees: String::new(),
            agenda: String::new(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap()
    }

    fn subtask_board() -> SubtaskBoard {
        SubtaskBoard::new(
            Vec::new(),
            vec![ParentTask {
                id: "t-1".to_string(),
                name: "Launch".to_string(),
                project_name: String::new(),
            }],
            vec![TeamMember {
                id: "m-1".to_string(),
                name: "Ana".to_string(),
                role: String::new(),
            }],
        )
    }

    fn subtask_form() -> CreateSubtaskForm {
        CreateSubtaskForm {
            name: "Copy review".to_string(),
            parent_task_id: "t-1".to_string(),
            assignee_id: "m-1".to_string(),
            deadline: "2026-10-30".to_string(),
            output_requirements: "Doc\nSlides".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_schedule_call_only_touches_target() {
        let mut board = DealBoard::new(vec![
            deal("d-1", IntroCallStatus::Pending),
            deal("d-2", IntroCallStatus::Pending),
        ]);
        let untouched = board.deals[1].clone();

        let updated = board.schedule_call("d-1", &call_form()).unwrap();
        assert_eq!(updated.intro_call_status, IntroCallStatus::Done);
        assert_eq!(updated.status, DealStatus::IntroCallDone);
        assert_eq!(
            updated.intro_call.as_ref().map(|c| c.date),
            NaiveDate::from_ymd_opt(2026, 10, 20)
        );
        assert_eq!(board.deals[1], untouched);
    }

    #[test]
    fn test_schedule_call_invalid_form_keeps_deal() {
        let mut board = DealBoard::new(vec![deal("d-1", IntroCallStatus::Pending)]);
        let before = board.clone();
        let err = board.schedule_call("d-1", &ScheduleCallForm::default()).unwrap_err();
        assert!(matches!(err, CommandError::Invalid(_)));
        assert_eq!(board, before);
    }

    #[test]
    fn test_schedule_call_rejects_done_deal() {
        let mut won = deal("d-1", IntroCallStatus::Done);
        won.status = DealStatus::Won;
        won.converted_to_projects = true;
        won.intro_call = call_form().submit().ok();
        let mut board = DealBoard::new(vec![won]);
        let before = board.clone();

        let form = ScheduleCallForm { date: "2027-01-05".to_string(), ..call_form() };
        assert_eq!(
            board.schedule_call("d-1", &form).unwrap_err(),
            CommandError::IntroCallAlreadyDone("d-1".to_string())
        );
        assert_eq!(board, before);
        assert_eq!(board.deals[0].status, DealStatus::Won);
    }

    #[test]
    fn test_schedule_call_unknown_deal() {
        let mut board = DealBoard::new(vec![deal("d-1", IntroCallStatus::Pending)]);
        let err = board.schedule_call("d-9", &call_form()).unwrap_err();
        assert_eq!(err, CommandError::DealNotFound("d-9".to_string()));
    }

    #[test]
    fn test_convert_requires_intro_call_done() {
        let mut board = DealBoard::new(vec![
            deal("d-1", IntroCallStatus::Pending),
            deal("d-2", IntroCallStatus::Done),
        ]);
        assert_eq!(
            board.convert_to_projects("d-1").unwrap_err(),
            CommandError::IntroCallPending("d-1".to_string())
        );
        assert!(!board.deals[0].converted_to_projects);

        assert!(board.convert_to_projects("d-2").unwrap().converted_to_projects);
        assert_eq!(
            board.convert_to_projects("d-2").unwrap_err(),
            CommandError::AlreadyConverted("d-2".to_string())
        );
    }

    #[test]
    fn test_update_deal_replaces_by_id() {
        let mut board = DealBoard::new(vec![deal("d-1", IntroCallStatus::Pending)]);
        let mut edited = board.deals[0].clone();
        edited.risk = RiskLevel::High;
        board.update_deal(edited).unwrap();
        assert_eq!(board.deals[0].risk, RiskLevel::High);
        assert!(board.update_deal(deal("d-x", IntroCallStatus::Done)).is_err());
    }

    #[test]
    fn test_deal_filter() {
        let mut board = DealBoard::new(vec![
            deal("d-1", IntroCallStatus::Pending),
            deal("d-2", IntroCallStatus::Done),
        ]);
        board.deals[1].status = DealStatus::Won;
        assert_eq!(board.filtered(Some(DealStatus::Won), "").len(), 1);
        assert_eq!(board.filtered(None, "deal D-1").len(), 1);
        assert_eq!(board.filtered(None, "acme").len(), 2);
    }

    #[test]
    fn test_create_subtask_appends_one() {
        let mut board = subtask_board();
        let created = board.create_subtask(&subtask_form(), now()).unwrap().clone();
        assert_eq!(board.subtasks.len(), 1);
        assert_eq!(created.parent_task.name, "Launch");
        assert_eq!(created.execution_status, ExecutionStatus::NotStarted);
    }

    #[test]
    fn test_create_subtask_empty_name_leaves_collection() {
        let mut board = subtask_board();
        board.create_subtask(&subtask_form(), now()).unwrap();
        let form = CreateSubtaskForm { name: String::new(), ..subtask_form() };
        assert!(board.create_subtask(&form, now()).is_err());
        assert_eq!(board.subtasks.len(), 1);
    }

    #[test]
    fn test_create_subtask_same_instant_gets_unique_id() {
        let mut board = subtask_board();
        board.create_subtask(&subtask_form(), now()).unwrap();
        board.create_subtask(&subtask_form(), now()).unwrap();
        assert_ne!(board.subtasks[0].id, board.subtasks[1].id);
    }

    #[test]
    fn test_timers_and_requirements() {
        let mut board = subtask_board();
        let id = board.create_subtask(&subtask_form(), now()).unwrap().id.clone();
        assert_eq!(board.tick_timers(1), 0);

        board.set_timer(&id, TimerStatus::Running).unwrap();
        assert!(board.has_running_timers());
        board.tick_timers(1);
        board.tick_timers(1);
        assert_eq!(board.find(&id).map(|s| s.time_spent), Some(2));

        board.set_timer(&id, TimerStatus::Paused).unwrap();
        board.tick_timers(1);
        assert_eq!(board.find(&id).map(|s| s.time_spent), Some(2));

        assert_eq!(board.toggle_requirement(&id, 1), Ok(true));
        assert_eq!(board.find(&id).map(|s| s.requirements_done()), Some(1));
        assert!(board.toggle_requirement(&id, 5).is_err());
    }

    #[test]
    fn test_tick_changes_only_time_spent() {
        let mut board = subtask_board();
        let id = board.create_subtask(&subtask_form(), now()).unwrap().id.clone();
        board.set_timer(&id, TimerStatus::Running).unwrap();
        board.toggle_requirement(&id, 0).unwrap();
        let before = board.find(&id).cloned().unwrap();

        board.tick_timers(1);
        let mut after = board.find(&id).cloned().unwrap();
        assert_eq!(after.time_spent, before.time_spent + 1);
        after.time_spent = before.time_spent;
        assert_eq!(after, before);

        // 最新の内容から編集すれば作業時間は巻き戻らない
        board.tick_timers(1);
        let mut edited = board.find(&id).cloned().unwrap();
        edited.execution_status = ExecutionStatus::Blocked;
        board.update_subtask(edited).unwrap();
        assert_eq!(board.find(&id).map(|s| s.time_spent), Some(2));
    }

    #[test]
    fn test_update_subtask_allows_any_axis_combination() {
        let mut board = subtask_board();
        let mut edited = board.create_subtask(&subtask_form(), now()).unwrap().clone();
        edited.execution_status = ExecutionStatus::Completed;
        edited.approval_status = ApprovalStatus::Rejected;
        board.update_subtask(edited.clone()).unwrap();
        assert_eq!(board.subtasks[0], edited);

        edited.id = "missing".to_string();
        assert_eq!(
            board.update_subtask(edited),
            Err(CommandError::SubtaskNotFound("missing".to_string()))
        );
    }

    #[test]
    fn test_subtask_filter() {
        let mut board = subtask_board();
        board.create_subtask(&subtask_form(), now()).unwrap();
        let form = CreateSubtaskForm { name: "Landing page QA".to_string(), ..subtask_form() };
        board.create_subtask(&form, now()).unwrap();
        board.subtasks[1].execution_status = ExecutionStatus::Blocked;

        assert_eq!(board.filtered(None, "").len(), 2);
        assert_eq!(board.filtered(None, "   ").len(), 2);

        let blocked = board.filtered(Some(ExecutionStatus::Blocked), "");
        assert_eq!(blocked.len(), 1);
        assert_eq!(blocked[0].name, "Landing page QA");

        let found = board.filtered(None, "COPY rev");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Copy review");

        assert!(board.filtered(Some(ExecutionStatus::Blocked), "copy").is_empty());
        assert!(board.filtered(Some(ExecutionStatus::Completed), "").is_empty());
    }

    fn review_board() -> ReviewBoard {
        ReviewBoard::new(vec![SubtaskForReview {
            id: "r-1".to_string(),
            name: "Banner".to_string(),
            parent_task: TaskRef { id: "t-1".to_string(), name: "Launch".to_string() },
            submitted_by: MemberRef { id: "m-1".to_string(), name: "Ana".to_string() },
            submitted_at: now(),
            approval_status: ApprovalStatus::Pending,
            execution_status: ExecutionStatus::InReview,
            timer_status: TimerStatus::Stopped,
            quality_flag: QualityFlag::NoFlag,
            time_spent: 0,
            output_requirements: Vec::new(),
            history: Vec::new(),
        }])
    }

    #[test]
    fn test_review_decision_appends_history() {
        let mut board = review_board();
        let decision = ReviewDecision {
            outcome: ReviewOutcome::ChangesRequested,
            reviewer: "Lee".to_string(),
            rating: Some(3),
            feedback: vec!["Tighten copy".to_string()],
        };
        let item = board.decide("r-1", decision, now()).unwrap();
        assert_eq!(item.approval_status, ApprovalStatus::ChangesRequested);
        assert_eq!(item.history.len(), 1);
        assert_eq!(item.history[0].rating, Some(3));
        assert_eq!(item.history[0].id, "r-1-review-1");
    }

    #[test]
    fn test_review_decision_rejects_rating_above_five() {
        let mut board = review_board();
        let before = board.clone();
        let decision = ReviewDecision {
            outcome: ReviewOutcome::Approved,
            reviewer: "Lee".to_string(),
            rating: Some(9),
            feedback: Vec::new(),
        };
        let err = board.decide("r-1", decision, now()).unwrap_err();
        assert_eq!(
            err,
            CommandError::Invalid(FormErrors(vec![FieldError::Invalid {
                field: FormField::Rating,
                value: "9".to_string(),
            }]))
        );
        assert_eq!(board, before);
    }
}
