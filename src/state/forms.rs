//! 入力フォームの状態と検証

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::{FieldError, FormErrors, FormField};
use crate::models::*;
use crate::state::boards::ReviewDecision;

/// 評価の上限（0〜5）
pub const MAX_RATING: u8 = 5;

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

fn parse_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

fn require(errors: &mut FormErrors, field: FormField, value: &str) -> bool {
    if value.trim().is_empty() {
        errors.push(FieldError::Required(field));
        false
    } else {
        true
    }
}

/// カンマ区切り・改行区切りの入力を分割
fn split_list(value: &str, sep: char) -> Vec<String> {
    value
        .split(sep)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// ============================================
// サブタスク作成
// ============================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateSubtaskForm {
    pub name: String,
    pub description: String,
    pub parent_task_id: String,
    pub assignee_id: String,
    pub deadline: String,
    pub priority: String,
    pub estimated_hours: String,
    /// 1行1項目
    pub output_requirements: String,
}

impl CreateSubtaskForm {
    /// 入力を検証して新しいサブタスクを組み立てる
    ///
    /// 承認 `Pending`、実行 `Not Started`、タイマー停止、作業時間 0 で作られる。
    /// IDは時刻ベースの文字列で、重複回避は呼び出し側で行う。
    pub fn submit(
        &self,
        tasks: &[ParentTask],
        members: &[TeamMember],
        now: DateTime<Utc>,
    ) -> Result<TeamLeadSubtask, FormErrors> {
        let mut errors = FormErrors::default();

        require(&mut errors, FormField::Name, &self.name);

        let parent_task = if require(&mut errors, FormField::ParentTask, &self.parent_task_id) {
            let found = tasks.iter().find(|t| t.id == self.parent_task_id.trim());
            if found.is_none() {
                errors.push(FieldError::UnknownReference {
                    field: FormField::ParentTask,
                    id: self.parent_task_id.clone(),
                });
            }
            found
        } else {
            None
        };

        let assignee = if require(&mut errors, FormField::Assignee, &self.assignee_id) {
            let found = members.iter().find(|m| m.id == self.assignee_id.trim());
            if found.is_none() {
                errors.push(FieldError::UnknownReference {
                    field: FormField::Assignee,
                    id: self.assignee_id.clone(),
                });
            }
            found
        } else {
            None
        };

        let deadline = if require(&mut errors, FormField::Deadline, &self.deadline) {
            let parsed = parse_date(&self.deadline);
            if parsed.is_none() {
                errors.push(FieldError::Invalid {
                    field: FormField::Deadline,
                    value: self.deadline.clone(),
                });
            }
            parsed
        } else {
            None
        };

        let priority = if self.priority.trim().is_empty() {
            Some(Priority::default())
        } else {
            let parsed = Priority::from_label(self.priority.trim());
            if parsed.is_none() {
                errors.push(FieldError::Invalid {
                    field: FormField::Priority,
                    value: self.priority.clone(),
                });
            }
            parsed
        };

        let estimated_hours = match self.estimated_hours.trim() {
            "" => None,
            raw => match raw.parse::<f64>() {
                Ok(h) if h.is_finite() && h >= 0.0 => Some(h),
                _ => {
                    errors.push(FieldError::Invalid {
                        field: FormField::EstimatedHours,
                        value: self.estimated_hours.clone(),
                    });
                    None
                }
            },
        };

        // ここまででエラーがあれば何も作らない
        let (Some(parent_task), Some(assignee), Some(deadline), Some(priority)) =
            (parent_task, assignee, deadline, priority)
        else {
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(TeamLeadSubtask {
            id: format!("subtask-{}", now.timestamp_millis()),
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            parent_task: TaskRef {
                id: parent_task.id.clone(),
                name: parent_task.name.clone(),
            },
            assignee: MemberRef {
                id: assignee.id.clone(),
                name: assignee.name.clone(),
            },
            deadline,
            priority,
            approval_status: ApprovalStatus::Pending,
            execution_status: ExecutionStatus::NotStarted,
            timer_status: TimerStatus::Stopped,
            quality_flag: QualityFlag::NoFlag,
            time_spent: 0,
            estimated_hours,
            output_requirements: split_list(&self.output_requirements, '\n')
                .into_iter()
                .map(|label| OutputRequirement { label, done: false })
                .collect(),
        })
    }
}

// ============================================
// Intro Call 予約
// ============================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleCallForm {
    pub date: String,
    pub time: String,
    /// カンマ区切り
    pub attendees: String,
    pub agenda: String,
}

impl ScheduleCallForm {
    pub fn submit(&self) -> Result<IntroCall, FormErrors> {
        let mut errors = FormErrors::default();

        let date = if require(&mut errors, FormField::CallDate, &self.date) {
            let parsed = parse_date(&self.date);
            if parsed.is_none() {
                errors.push(FieldError::Invalid {
                    field: FormField::CallDate,
                    value: self.date.clone(),
                });
            }
            parsed
        } else {
            None
        };

        let time = if require(&mut errors, FormField::CallTime, &self.time) {
            let parsed = parse_time(&self.time);
            if parsed.is_none() {
                errors.push(FieldError::Invalid {
                    field: FormField::CallTime,
                    value: self.time.clone(),
                });
            }
            parsed
        } else {
            None
        };

        match (date, time) {
            (Some(date), Some(time)) => errors.into_result(IntroCall {
                date,
                time,
                attendees: split_list(&self.attendees, ','),
                agenda: self.agenda.trim().to_string(),
            }),
            _ => Err(errors),
        }
    }
}

// ============================================
// レビュー判定
// ============================================

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewDecisionForm {
    pub outcome: ReviewOutcome,
    /// 空欄は評価保留
    pub rating: String,
    /// 1行1項目
    pub feedback: String,
}

impl ReviewDecisionForm {
    pub fn new(outcome: ReviewOutcome) -> Self {
        Self {
            outcome,
            rating: String::new(),
            feedback: String::new(),
        }
    }

    /// 評価は空欄か 0〜5 の整数
    pub fn submit(&self, reviewer: &str) -> Result<ReviewDecision, FormErrors> {
        let mut errors = FormErrors::default();

        let rating = match self.rating.trim() {
            "" => None,
            raw => match raw.parse::<u8>() {
                Ok(r) if r <= MAX_RATING => Some(r),
                _ => {
                    errors.push(FieldError::Invalid {
                        field: FormField::Rating,
                        value: self.rating.clone(),
                    });
                    None
                }
            },
        };

        errors.into_result(ReviewDecision {
            outcome: self.outcome,
            reviewer: reviewer.to_string(),
            rating,
            feedback: split_list(&self.feedback, '\n'),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn lookups() -> (Vec<ParentTask>, Vec<TeamMember>) {
        (
            vec![ParentTask {
                id: "t-1".to_string(),
                name: "Website relaunch".to_string(),
                project_name: "Acme".to_string(),
            }],
            vec![TeamMember {
                id: "m-1".to_string(),
                name: "Ana Ruiz".to_string(),
                role: "Designer".to_string(),
            }],
        )
    }

    fn valid_form() -> CreateSubtaskForm {
        CreateSubtaskForm {
            name: "Hero banner".to_string(),
            description: "Above the fold".to_string(),
            parent_task_id: "t-1".to_string(),
            assignee_id: "m-1".to_string(),
            deadline: "2026-11-01".to_string(),
            priority: "High".to_string(),
            estimated_hours: "4".to_string(),
            output_requirements: "Figma file\n\n  PNG export \n".to_string(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_valid_submit_builds_defaulted_subtask() {
        let (tasks, members) = lookups();
        let subtask = valid_form().submit(&tasks, &members, now()).unwrap();
        assert_eq!(subtask.approval_status, ApprovalStatus::Pending);
        assert_eq!(subtask.execution_status, ExecutionStatus::NotStarted);
        assert_eq!(subtask.timer_status, TimerStatus::Stopped);
        assert_eq!(subtask.time_spent, 0);
        assert_eq!(subtask.parent_task.id, "t-1");
        assert_eq!(subtask.parent_task.name, "Website relaunch");
        assert_eq!(subtask.assignee.name, "Ana Ruiz");
        assert_eq!(subtask.priority, Priority::High);
        assert_eq!(subtask.estimated_hours, Some(4.0));
        assert_eq!(subtask.id, format!("subtask-{}", now().timestamp_millis()));
        let labels: Vec<_> = subtask.output_requirements.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Figma file", "PNG export"]);
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let (tasks, members) = lookups();
        let form = CreateSubtaskForm { name: "   ".to_string(), ..valid_form() };
        let errors = form.submit(&tasks, &members, now()).unwrap_err();
        assert_eq!(errors.0, vec![FieldError::Required(FormField::Name)]);
    }

    #[test]
    fn test_unknown_parent_task_is_rejected() {
        let (tasks, members) = lookups();
        let form = CreateSubtaskForm { parent_task_id: "t-404".to_string(), ..valid_form() };
        let errors = form.submit(&tasks, &members, now()).unwrap_err();
        assert!(errors.has(FormField::ParentTask));
        assert!(!errors.has(FormField::Name));
    }

    #[test]
    fn test_all_missing_fields_reported_together() {
        let (tasks, members) = lookups();
        let errors = CreateSubtaskForm::default()
            .submit(&tasks, &members, now())
            .unwrap_err();
        for field in [FormField::Name, FormField::ParentTask, FormField::Assignee, FormField::Deadline] {
            assert!(errors.has(field), "missing {:?}", field);
        }
    }

    #[test]
    fn test_bad_deadline_and_hours() {
        let (tasks, members) = lookups();
        let form = CreateSubtaskForm {
            deadline: "next week".to_string(),
            estimated_hours: "-2".to_string(),
            ..valid_form()
        };
        let errors = form.submit(&tasks, &members, now()).unwrap_err();
        assert!(errors.has(FormField::Deadline));
        assert!(errors.has(FormField::EstimatedHours));
    }

    #[test]
    fn test_empty_priority_defaults_to_medium() {
        let (tasks, members) = lookups();
        let form = CreateSubtaskForm { priority: String::new(), ..valid_form() };
        assert_eq!(form.submit(&tasks, &members, now()).unwrap().priority, Priority::Medium);
    }

    #[test]
    fn test_padded_ids_resolve_like_required_check() {
        let (tasks, members) = lookups();
        let form = CreateSubtaskForm {
            parent_task_id: " t-1".to_string(),
            assignee_id: "m-1 ".to_string(),
            ..valid_form()
        };
        let subtask = form.submit(&tasks, &members, now()).unwrap();
        assert_eq!(subtask.parent_task.id, "t-1");
        assert_eq!(subtask.assignee.id, "m-1");
    }

    #[test]
    fn test_review_decision_form() {
        let form = ReviewDecisionForm {
            rating: " 4 ".to_string(),
            feedback: "Good contrast\n\n Fix alt text ".to_string(),
            ..ReviewDecisionForm::new(ReviewOutcome::Approved)
        };
        let decision = form.submit("Lee").unwrap();
        assert_eq!(decision.rating, Some(4));
        assert_eq!(decision.reviewer, "Lee");
        assert_eq!(decision.feedback, vec!["Good contrast".to_string(), "Fix alt text".to_string()]);

        let pending = ReviewDecisionForm::new(ReviewOutcome::ChangesRequested).submit("Lee").unwrap();
        assert_eq!(pending.rating, None);
        assert_eq!(pending.outcome, ReviewOutcome::ChangesRequested);
    }

    #[test]
    fn test_review_rating_out_of_range_is_reported() {
        for raw in ["4.5", "abc", "-1", "6", "9"] {
            let form = ReviewDecisionForm {
                rating: raw.to_string(),
                ..ReviewDecisionForm::new(ReviewOutcome::Approved)
            };
            let errors = form.submit("Lee").unwrap_err();
            assert_eq!(
                errors.0,
                vec![FieldError::Invalid { field: FormField::Rating, value: raw.to_string() }],
                "rating {:?}",
                raw
            );
        }
        let zero = ReviewDecisionForm {
            rating: "0".to_string(),
            ..ReviewDecisionForm::new(ReviewOutcome::Rejected)
        };
        assert_eq!(zero.submit("Lee").unwrap().rating, Some(0));
    }

    #[test]
    fn test_schedule_call_form() {
        let form = ScheduleCallForm {
            date: "2026-10-20".to_string(),
            time: "14:30".to_string(),
            attendees: "Ana, Lee ,".to_string(),
            agenda: " Scope ".to_string(),
        };
        let call = form.submit().unwrap();
        assert_eq!(call.date, NaiveDate::from_ymd_opt(2026, 10, 20).unwrap());
        assert_eq!(call.time, NaiveTime::from_hms_opt(14, 30, 0).unwrap());
        assert_eq!(call.attendees, vec!["Ana".to_string(), "Lee".to_string()]);
        assert_eq!(call.agenda, "Scope");
    }

    #[test]
    fn test_schedule_call_requires_date_and_time() {
        let errors = ScheduleCallForm::default().submit().unwrap_err();
        assert!(errors.has(FormField::CallDate));
        assert!(errors.has(FormField::CallTime));

        let form = ScheduleCallForm {
            date: "2026-10-20".to_string(),
            time: "25:00".to_string(),
            ..Default::default()
        };
        let errors = form.submit().unwrap_err();
        assert_eq!(errors.0.len(), 1);
        assert!(errors.has(FormField::CallTime));
    }
}
