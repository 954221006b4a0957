//! レビュー待ちサブタスク画面
//!
//! SLA超過の判定は共有の時計（1分ごとに更新）を基準にする。

use chrono::Utc;
use leptos::*;
use crate::components::badges::approval_tone;
use crate::components::{FlagBadge, ReviewDetailModal, StatCard, StatusBadge};
use crate::models::{LabelSet, QualityFlag};
use crate::state::aggregate::review_sla_breached;
use crate::error::CommandError;
use crate::state::{ModalState, ReviewDecisionForm, ReviewQueueSummary};
use crate::utils::format_duration;
use crate::utils::log_trace::log_warn;
use crate::{show_toast, DashboardContext};

#[component]
pub fn SubtaskReviewsScreen() -> impl IntoView {
    let ctx = use_context::<DashboardContext>().expect("DashboardContext not found");
    let reviews = ctx.reviews;
    let sla_hours = ctx.config.review_sla_hours;
    let clock = ctx.clock;

    let (flag_filter, set_flag_filter) = create_signal(None::<QualityFlag>);
    let detail = create_rw_signal(ModalState::<String>::default());

    let summary = create_memo(move |_| {
        reviews.with(|b| ReviewQueueSummary::from_queue(&b.queue, clock.get(), sla_hours))
    });
    let rows = move || {
        let flag = flag_filter.get();
        reviews.with(|b| {
            b.queue
                .iter()
                .filter(|item| flag.map_or(true, |f| item.quality_flag == f))
                .cloned()
                .collect::<Vec<_>>()
        })
    };

    let reviewer = move || {
        ctx.current_user
            .get_untracked()
            .map(|u| u.name)
            .unwrap_or_else(|| "Team Lead".to_string())
    };

    let on_decide = Callback::new(move |form: ReviewDecisionForm| -> Result<(), CommandError> {
        let decision = form.submit(&reviewer())?;
        let outcome = decision.outcome;
        let mut modal = detail.get_untracked();
        let result = modal.confirm(|id| {
            reviews
                .try_update(|b| b.decide(id, decision, Utc::now()).map(|item| item.name.clone()))
                .transpose()
        });
        if !modal.is_open() {
            detail.set(modal);
        }
        match result {
            Some(Ok(Some(name))) => {
                show_toast(ctx, format!("{}: {}", name, outcome.label()));
                Ok(())
            }
            Some(Err(e)) => {
                log_warn("reviews", &e.to_string());
                Err(e)
            }
            _ => Ok(()),
        }
    });

    view! {
        <div class="screen subtask-reviews">
            <h2>"Subtask Reviews"</h2>

            <div class="stat-grid">
                <StatCard label="In queue" value=Signal::derive(move || summary.get().total.to_string()) />
                <StatCard label="Pending" value=Signal::derive(move || summary.get().pending.to_string()) tone="tone-warning" />
                <StatCard label="Approved" value=Signal::derive(move || summary.get().approved.to_string()) tone="tone-ok" />
                <StatCard label="Changes requested" value=Signal::derive(move || summary.get().changes_requested.to_string()) tone="tone-info" />
                <StatCard label="Red flags" value=Signal::derive(move || summary.get().red_flags.to_string()) tone="tone-error" />
                <StatCard label="SLA breaches" value=Signal::derive(move || summary.get().sla_breaches.to_string()) tone="tone-error" />
            </div>

            <div class="toolbar">
                <select on:change=move |ev| set_flag_filter.set(QualityFlag::from_label(LabelSet::Review, &event_target_value(&ev)))>
                    <option value="">"All flags"</option>
                    {QualityFlag::ALL.into_iter().map(|f| view! {
                        <option value=f.label(LabelSet::Review)>{f.label(LabelSet::Review)}</option>
                    }).collect_view()}
                </select>
                <span class="muted">{format!("SLA: {} h", sla_hours)}</span>
            </div>

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Subtask"</th>
                        <th>"Submitted by"</th>
                        <th>"Submitted"</th>
                        <th>"Approval"</th>
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
                                <tr><td colspan="7" class="empty">"Nothing waiting for review"</td></tr>
                            }.into_view();
                        }
                        rows.into_iter().map(|item| {
                            let id = item.id.clone();
                            let breached = review_sla_breached(&item, now, sla_hours);
                            let done = item.output_requirements.iter().filter(|r| r.done).count();
                            view! {
                                <tr class="clickable" on:click=move |_| detail.update(|m| m.open(id.clone()))>
                                    <td>
                                        <div class="cell-title">{item.name.clone()}</div>
                                        <div class="muted">{item.parent_task.name.clone()}</div>
                                    </td>
                                    <td>{item.submitted_by.name.clone()}</td>
                                    <td class={if breached { "overdue" } else { "" }}>
                                        {item.submitted_at.format("%Y-%m-%d %H:%M").to_string()}
                                        {breached.then(|| view! { <span class="sla-tag">"SLA"</span> })}
                                    </td>
                                    <td><StatusBadge label=item.approval_status.label() tone=approval_tone(item.approval_status) /></td>
                                    <td><FlagBadge flag=item.quality_flag labels=LabelSet::Review /></td>
                                    <td>{format_duration(item.time_spent)}</td>
                                    <td>{format!("{}/{}", done, item.output_requirements.len())}</td>
                                </tr>
                            }
                        }).collect_view()
                    }}
                </tbody>
            </table>

            {move || {
                let id = detail.with(|m| m.selected().cloned())?;
                let item = reviews.with(|b| b.find(&id).cloned())?;
                Some(view! {
                    <ReviewDetailModal
                        item=item
                        on_decide=on_decide
                        on_close=Callback::new(move |_| detail.update(|m| m.close()))
                    />
                })
            }}
        </div>
    }
}
