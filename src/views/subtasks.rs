//! サブタスク画面（チームリーダー）
//!
//! 期限超過の判定は共有の時計（1分ごとに更新）を基準にする。

use chrono::Utc;
use leptos::*;
use crate::components::badges::{approval_tone, execution_tone};
use crate::components::{CreateSubtaskModal, FlagBadge, StatCard, StatusBadge, SubtaskDetailPanel};
use crate::error::CommandError;
use crate::models::{ExecutionStatus, LabelSet, TeamLeadSubtask, TimerStatus};
use crate::state::aggregate::is_overdue;
use crate::state::{CreateSubtaskForm, ModalState, RowSelection, SubtaskSummary};
use crate::utils::format_duration;
use crate::utils::log_trace::{log_info_with_data, log_warn};
use crate::{show_toast, DashboardContext};

#[component]
pub fn SubtasksScreen() -> impl IntoView {
    let ctx = use_context::<DashboardContext>().expect("DashboardContext not found");
    let subtasks = ctx.subtasks;
    let clock = ctx.clock;

    let (status_filter, set_status_filter) = create_signal(None::<ExecutionStatus>);
    let (query, set_query) = create_signal(String::new());
    let selection = create_rw_signal(RowSelection::default());
    let create = create_rw_signal(ModalState::<()>::default());
    let detail = create_rw_signal(ModalState::<String>::default());

    let summary = create_memo(move |_| subtasks.with(|b| SubtaskSummary::from_subtasks(&b.subtasks, clock.get())));
    let rows = move || subtasks.with(|b| b.filtered(status_filter.get(), &query.get()));
    let visible_ids = move || rows().into_iter().map(|s| s.id).collect::<Vec<_>>();

    let all_checked = move || {
        let ids = visible_ids();
        selection.with(|s| s.covers(ids.iter().map(String::as_str)))
    };

    let on_create_subtask = Callback::new(move |form: CreateSubtaskForm| -> Result<(), CommandError> {
        let now = Utc::now();
        let mut modal = create.get_untracked();
        let result = modal.confirm(|_| {
            subtasks
                .try_update(|b| b.create_subtask(&form, now).map(|s| s.name.clone()))
                .transpose()
        });
        if !modal.is_open() {
            create.set(modal);
        }
        match result {
            Some(Ok(Some(name))) => {
                show_toast(ctx, format!("Subtask \"{}\" created", name));
                Ok(())
            }
            Some(Err(e)) => Err(e),
            _ => Ok(()),
        }
    });

    let bulk_action = move |action: &'static str| {
        let ids = selection.with_untracked(|s| s.ids());
        // 一括操作はまだ記録のみ
        log_info_with_data(
            "ui-action",
            &format!("Bulk {} requested", action),
            serde_json::json!({ "ids": ids, "count": ids.len() }),
        );
    };

    view! {
        <div class="screen subtasks">
            <div class="screen-header">
                <h2>"Subtasks"</h2>
                <button class="primary-btn" on:click=move |_| create.update(|m| m.open(()))>"+ Create Subtask"</button>
            </div>

            <div class="stat-grid">
                <StatCard label="Total" value=Signal::derive(move || summary.get().total.to_string()) />
                <StatCard label="In progress" value=Signal::derive(move || summary.get().in_progress.to_string()) tone="tone-info" />
                <StatCard label="Blocked" value=Signal::derive(move || summary.get().blocked.to_string()) tone="tone-error" />
                <StatCard label="In review" value=Signal::derive(move || summary.get().in_review.to_string()) tone="tone-warning" />
                <StatCard label="Completed" value=Signal::derive(move || summary.get().completed.to_string()) tone="tone-ok" />
                <StatCard label="Overdue" value=Signal::derive(move || summary.get().overdue.to_string()) tone="tone-error" />
                <StatCard label="Red flags" value=Signal::derive(move || summary.get().red_flags.to_string()) tone="tone-error" />
                <StatCard label="Pending approval" value=Signal::derive(move || summary.get().pending_approval.to_string()) />
                <StatCard label="Timers running" value=Signal::derive(move || summary.get().running_timers.to_string()) />
            </div>

            <div class="toolbar">
                <select on:change=move |ev| set_status_filter.set(ExecutionStatus::from_label(&event_target_value(&ev)))>
                    <option value="">"All statuses"</option>
                    {ExecutionStatus::ALL.into_iter().map(|s| view! {
                        <option value=s.label()>{s.label()}</option>
                    }).collect_view()}
                </select>
                <input type="search" placeholder="Search subtasks"
                    prop:value=move || query.get()
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                />
                <div class="bulk-actions">
                    <span class="muted">{move || format!("{} selected", selection.with(|s| s.len()))}</span>
                    <button class="secondary-btn"
                        disabled=move || selection.with(|s| s.is_empty())
                        on:click=move |_| bulk_action("approve")
                    >"Bulk Approve"</button>
                    <button class="secondary-btn"
                        disabled=move || selection.with(|s| s.is_empty())
                        on:click=move |_| bulk_action("reassign")
                    >"Reassign"</button>
                </div>
            </div>

            <table class="data-table">
                <thead>
                    <tr>
                        <th>
                            <input type="checkbox"
                                prop:checked=all_checked
                                on:change=move |ev| {
                                    let checked = event_target_checked(&ev);
                                    let ids = visible_ids();
                                    selection.update(|s| s.select_all(ids, checked));
                                }
                            />
                        </th>
                        <th>"Subtask"</th>
                        <th>"Assignee"</th>
                        <th>"Deadline"</th>
                        <th>"Priority"</th>
                        <th>"Approval"</th>
                        <th>"Execution"</th>
                        <th>"Flag"</th>
                        <th>"Time"</th>
                        <th>"Outputs"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let now = clock.get();
                        let rows = rows();
                        if rows.is_empty() {
                            return view! {
                                <tr><td colspan="10" class="empty">"No subtasks match the current filter"</td></tr>
                            }.into_view();
                        }
                        rows.into_iter().map(|s| {
                            let id = s.id.clone();
                            let check_id = s.id.clone();
                            let selected_id = s.id.clone();
                            let overdue = is_overdue(s.deadline, s.execution_status, now);
                            let running = s.timer_status == TimerStatus::Running;
                            let row_class = if s.quality_flag.is_red() { "clickable flagged" } else { "clickable" };
                            view! {
                                <tr class=row_class on:click=move |_| detail.update(|m| m.open(id.clone()))>
                                    <td on:click=move |ev: web_sys::MouseEvent| ev.stop_propagation()>
                                        <input type="checkbox"
                                            prop:checked=move || selection.with(|sel| sel.is_selected(&selected_id))
                                            on:change=move |_| selection.update(|sel| sel.toggle(&check_id))
                                        />
                                    </td>
                                    <td>
                                        <div class="cell-title">{s.name.clone()}</div>
                                        <div class="muted">{s.parent_task.name.clone()}</div>
                                    </td>
                                    <td>{s.assignee.name.clone()}</td>
                                    <td class={if overdue { "overdue" } else { "" }}>
                                        {s.deadline.format("%Y-%m-%d").to_string()}
                                    </td>
                                    <td>{s.priority.label()}</td>
                                    <td><StatusBadge label=s.approval_status.label() tone=approval_tone(s.approval_status) /></td>
                                    <td><StatusBadge label=s.execution_status.label() tone=execution_tone(s.execution_status) /></td>
                                    <td><FlagBadge flag=s.quality_flag labels=LabelSet::TeamLead /></td>
                                    <td class={if running { "timer running" } else { "timer" }}>{format_duration(s.time_spent)}</td>
                                    <td>{format!("{}/{}", s.requirements_done(), s.output_requirements.len())}</td>
                                </tr>
                            }
                        }).collect_view()
                    }}
                </tbody>
            </table>

            {move || create.with(|m| m.is_open()).then(|| {
                let (tasks, members) = subtasks.with_untracked(|b| (b.tasks.clone(), b.members.clone()));
                view! {
                    <CreateSubtaskModal
                        tasks=tasks
                        members=members
                        on_submit=on_create_subtask
                        on_close=Callback::new(move |_| create.update(|m| m.close()))
                    />
                }
            })}

            {move || {
                // 選択の変化でのみ作り直す。内容の変化はパネル内のメモで反映
                let id = detail.with(|m| m.selected().cloned())?;
                let live_id = id.clone();
                let live = create_memo(move |_| subtasks.with(|b| b.find(&live_id).cloned()));
                let subtask = live.get_untracked()?;
                let toggle_id = id.clone();
                let timer_id = id;
                Some(view! {
                    <SubtaskDetailPanel
                        subtask=subtask
                        live=live
                        on_update=Callback::new(move |updated: TeamLeadSubtask| {
                            if let Some(Err(e)) = subtasks.try_update(|b| b.update_subtask(updated)) {
                                log_warn("subtasks", &e.to_string());
                            }
                        })
                        on_toggle_requirement=Callback::new(move |index: usize| {
                            if let Some(Err(e)) = subtasks.try_update(|b| b.toggle_requirement(&toggle_id, index)) {
                                log_warn("subtasks", &e.to_string());
                            }
                        })
                        on_set_timer=Callback::new(move |status: TimerStatus| {
                            if let Some(Err(e)) = subtasks.try_update(|b| b.set_timer(&timer_id, status)) {
                                log_warn("subtasks", &e.to_string());
                            }
                        })
                        on_close=Callback::new(move |_| detail.update(|m| m.close()))
                    />
                })
            }}
        </div>
    }
}
