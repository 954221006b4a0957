//! メンバー評価一覧

use leptos::*;
use crate::components::badges::outcome_tone;
use crate::components::{MemberReviewModal, StatCard, StatusBadge};
use crate::models::ReviewOutcome;
use crate::state::{MemberReviewSummary, ModalState};
use crate::utils::format_rating;
use crate::DashboardContext;

#[component]
pub fn TeamMemberReviews() -> impl IntoView {
    let ctx = use_context::<DashboardContext>().expect("DashboardContext not found");
    let member_reviews = ctx.member_reviews;

    let (outcome_filter, set_outcome_filter) = create_signal(None::<ReviewOutcome>);
    let detail = create_rw_signal(ModalState::<String>::default());

    let summary = create_memo(move |_| member_reviews.with(|r| MemberReviewSummary::from_reviews(r)));
    let rows = move || {
        let outcome = outcome_filter.get();
        member_reviews.with(|r| {
            r.iter()
                .filter(|review| outcome.map_or(true, |o| review.outcome == o))
                .cloned()
                .collect::<Vec<_>>()
        })
    };

    let on_outcome_change = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        set_outcome_filter.set(ReviewOutcome::ALL.into_iter().find(|o| o.label() == value));
    };

    view! {
        <div class="screen team-member-reviews">
            <h2>"Team Member Reviews"</h2>

            <div class="stat-grid">
                <StatCard label="Reviews" value=Signal::derive(move || summary.get().total.to_string()) />
                <StatCard
                    label="Average rating"
                    value=Signal::derive(move || summary.get().average_rating.map(|r| format!("{:.1}", r)).unwrap_or_else(|| "-".to_string()))
                />
                <StatCard label="Rating pending" value=Signal::derive(move || summary.get().pending_ratings.to_string()) />
                <StatCard label="Approved" value=Signal::derive(move || summary.get().approved.to_string()) tone="tone-ok" />
                <StatCard label="Changes requested" value=Signal::derive(move || summary.get().changes_requested.to_string()) tone="tone-info" />
                <StatCard label="Rejected" value=Signal::derive(move || summary.get().rejected.to_string()) tone="tone-error" />
                <StatCard label="SLA breaches" value=Signal::derive(move || summary.get().sla_breaches.to_string()) tone="tone-error" />
            </div>

            <div class="toolbar">
                <select on:change=on_outcome_change>
                    <option value="">"All outcomes"</option>
                    {ReviewOutcome::ALL.into_iter().map(|o| view! {
                        <option value=o.label()>{o.label()}</option>
                    }).collect_view()}
                </select>
            </div>

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Member"</th>
                        <th>"Subtask"</th>
                        <th>"Reviewer"</th>
                        <th>"Outcome"</th>
                        <th>"Rating"</th>
                        <th>"Reviewed"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || rows().into_iter().map(|review| {
                        let id = review.id.clone();
                        view! {
                            <tr class="clickable" on:click=move |_| detail.update(|m| m.open(id.clone()))>
                                <td>{review.member.name.clone()}</td>
                                <td>{review.subtask_name.clone()}</td>
                                <td>{review.reviewer.clone()}</td>
                                <td><StatusBadge label=review.outcome.label() tone=outcome_tone(review.outcome) /></td>
                                <td class="rating">{format_rating(review.rating)}</td>
                                <td class={if review.sla_breached { "overdue" } else { "" }}>
                                    {review.reviewed_at.format("%Y-%m-%d").to_string()}
                                </td>
                            </tr>
                        }
                    }).collect_view()}
                </tbody>
            </table>

            {move || {
                let id = detail.with(|m| m.selected().cloned())?;
                let review = member_reviews.with(|r| r.iter().find(|x| x.id == id).cloned())?;
                Some(view! {
                    <MemberReviewModal
                        review=review
                        on_close=Callback::new(move |_| detail.update(|m| m.close()))
                    />
                })
            }}
        </div>
    }
}
