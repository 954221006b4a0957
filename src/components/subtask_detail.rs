//! サブタスク詳細パネル

use leptos::*;
use crate::models::{ExecutionStatus, LabelSet, TeamLeadSubtask, TimerStatus};
use crate::utils::format_duration;
use super::badges::{approval_tone, execution_tone};
use super::{FlagBadge, Modal, StatusBadge};

/// サブタスク詳細（成果物チェック・タイマー操作）
///
/// `subtask` は開いた時点の内容。タイマーなど変化する部分は `live` から個別に読むので、
/// 毎秒のタイマー更新でもパネル全体は作り直さない。
#[component]
pub fn SubtaskDetailPanel(
    subtask: TeamLeadSubtask,
    #[prop(into)] live: Signal<Option<TeamLeadSubtask>>,
    on_update: Callback<TeamLeadSubtask>,
    on_toggle_requirement: Callback<usize>,
    on_set_timer: Callback<TimerStatus>,
    on_close: Callback<()>,
) -> impl IntoView {
    let estimate = subtask
        .estimated_hours
        .map(|h| format!("{:.1} h", h))
        .unwrap_or_else(|| "-".to_string());

    // 削除された場合は開いた時点の値を表示し続ける
    let snapshot = subtask.clone();
    let time_spent = create_memo(move |_| {
        live.with(|s| s.as_ref().map(|s| s.time_spent)).unwrap_or(snapshot.time_spent)
    });
    let snapshot = subtask.clone();
    let over_estimate = create_memo(move |_| {
        live.with(|s| s.as_ref().map(|s| s.exceeds_estimate()))
            .unwrap_or_else(|| snapshot.exceeds_estimate())
    });
    let initial_timer = subtask.timer_status;
    let timer = create_memo(move |_| {
        live.with(|s| s.as_ref().map(|s| s.timer_status)).unwrap_or(initial_timer)
    });
    let initial_execution = subtask.execution_status;
    let execution = create_memo(move |_| {
        live.with(|s| s.as_ref().map(|s| s.execution_status)).unwrap_or(initial_execution)
    });
    let initial_requirements = subtask.output_requirements.clone();
    let requirements = create_memo(move |_| {
        live.with(|s| s.as_ref().map(|s| s.output_requirements.clone()))
            .unwrap_or_else(|| initial_requirements.clone())
    });

    // 状態の組み合わせに制約はない
    let fallback = subtask.clone();
    let on_execution_change = move |ev: web_sys::Event| {
        if let Some(status) = ExecutionStatus::from_label(&event_target_value(&ev)) {
            let mut updated = live.get_untracked().unwrap_or_else(|| fallback.clone());
            updated.execution_status = status;
            on_update.call(updated);
        }
    };

    view! {
        <Modal title=subtask.name.clone() on_close=on_close wide=true>
            <p class="modal-subtitle">
                {subtask.parent_task.name.clone()}" / "{subtask.assignee.name.clone()}
            </p>
            {(!subtask.description.is_empty()).then(|| view! {
                <p class="description">{subtask.description.clone()}</p>
            })}

            <div class="detail-grid">
                <div class="detail-item">
                    <span class="detail-label">"Approval"</span>
                    <StatusBadge label=subtask.approval_status.label() tone=approval_tone(subtask.approval_status) />
                </div>
                <div class="detail-item">
                    <span class="detail-label">"Execution"</span>
                    {move || {
                        let status = execution.get();
                        view! { <StatusBadge label=status.label() tone=execution_tone(status) /> }
                    }}
                    <select class="inline-select" on:change=on_execution_change>
                        {ExecutionStatus::ALL.into_iter().map(|s| view! {
                            <option value=s.label() selected=move || execution.get() == s>{s.label()}</option>
                        }).collect_view()}
                    </select>
                </div>
                <div class="detail-item">
                    <span class="detail-label">"Quality"</span>
                    <FlagBadge flag=subtask.quality_flag labels=LabelSet::TeamLead />
                </div>
                <div class="detail-item">
                    <span class="detail-label">"Deadline"</span>
                    <span class="detail-value">{subtask.deadline.format("%Y-%m-%d").to_string()}</span>
                </div>
                <div class="detail-item">
                    <span class="detail-label">"Priority"</span>
                    <span class="detail-value">{subtask.priority.label()}</span>
                </div>
                <div class="detail-item">
                    <span class="detail-label">"Estimate"</span>
                    <span class="detail-value">{estimate}</span>
                </div>
            </div>

            // タイマー
            <div class="detail-section timer-section">
                <h4>"Time spent"</h4>
                <span class=move || format!("timer-value {}", if over_estimate.get() { "over" } else { "" })>
                    {move || format_duration(time_spent.get())}
                </span>
                {move || {
                    let status = timer.get();
                    view! {
                        <StatusBadge label=status.label() />
                        {match status {
                            TimerStatus::Running => view! {
                                <button class="secondary-btn" on:click=move |_| on_set_timer.call(TimerStatus::Paused)>
                                    "Pause"
                                </button>
                            }.into_view(),
                            _ => view! {
                                <button class="primary-btn" on:click=move |_| on_set_timer.call(TimerStatus::Running)>
                                    "Start"
                                </button>
                            }.into_view(),
                        }}
                        {(status != TimerStatus::Stopped).then(|| view! {
                            <button class="secondary-btn" on:click=move |_| on_set_timer.call(TimerStatus::Stopped)>
                                "Stop"
                            </button>
                        })}
                    }
                }}
            </div>

            // 成果物チェック
            <div class="detail-section">
                {move || requirements.with(|reqs| {
                    let done = reqs.iter().filter(|r| r.done).count();
                    let total = reqs.len();
                    view! {
                        <h4>"Output requirements ("{done}"/"{total}")"</h4>
                        {if reqs.is_empty() {
                            view! { <p class="muted">"No output requirements"</p> }.into_view()
                        } else {
                            view! {
                                <ul class="requirement-list">
                                    {reqs.iter().enumerate().map(|(idx, req)| view! {
                                        <li>
                                            <label class="checkbox-label">
                                                <input type="checkbox"
                                                    prop:checked=req.done
                                                    on:change=move |_| on_toggle_requirement.call(idx)
                                                />
                                                <span>{req.label.clone()}</span>
                                            </label>
                                        </li>
                                    }).collect_view()}
                                </ul>
                            }.into_view()
                        }}
                    }
                })}
            </div>
        </Modal>
    }
}
