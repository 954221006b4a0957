//! レビュー詳細モーダル

use leptos::*;
use crate::models::{ApprovalStatus, DetailedTeamMemberReview, LabelSet, ReviewOutcome, SubtaskForReview};
use crate::error::CommandError;
use crate::state::ReviewDecisionForm;
use crate::utils::{format_duration, format_rating};
use super::badges::{approval_tone, outcome_tone};
use super::{FlagBadge, FormErrorList, Modal, StatusBadge};

/// レビュー待ちサブタスクの詳細と判定
///
/// 入力エラーは一覧表示し、モーダルは開いたままにする。
#[component]
pub fn ReviewDetailModal(
    item: SubtaskForReview,
    on_decide: Callback<ReviewDecisionForm, Result<(), CommandError>>,
    on_close: Callback<()>,
) -> impl IntoView {
    let (rating, set_rating) = create_signal(String::new());
    let (feedback, set_feedback) = create_signal(String::new());
    let (errors, set_errors) = create_signal(Vec::<String>::new());
    let pending = item.approval_status == ApprovalStatus::Pending;

    let decide = move |outcome: ReviewOutcome| {
        move |_: web_sys::MouseEvent| {
            let form = ReviewDecisionForm {
                rating: rating.get_untracked(),
                feedback: feedback.get_untracked(),
                ..ReviewDecisionForm::new(outcome)
            };
            // 成功時はモーダルごと閉じる
            if let Err(e) = on_decide.call(form) {
                set_errors.set(e.messages());
            }
        }
    };
    let approve = decide(ReviewOutcome::Approved);
    let request_changes = decide(ReviewOutcome::ChangesRequested);

    view! {
        <Modal title=item.name.clone() on_close=on_close wide=true>
            <p class="modal-subtitle">
                {item.parent_task.name.clone()}" / submitted by "{item.submitted_by.name.clone()}
                " at "{item.submitted_at.format("%Y-%m-%d %H:%M UTC").to_string()}
            </p>

            <div class="detail-grid">
                <div class="detail-item">
                    <span class="detail-label">"Approval"</span>
                    <StatusBadge label=item.approval_status.label() tone=approval_tone(item.approval_status) />
                </div>
                <div class="detail-item">
                    <span class="detail-label">"Execution"</span>
                    <StatusBadge label=item.execution_status.label() />
                </div>
                <div class="detail-item">
                    <span class="detail-label">"Flag"</span>
                    <FlagBadge flag=item.quality_flag labels=LabelSet::Review />
                </div>
                <div class="detail-item">
                    <span class="detail-label">"Time spent"</span>
                    <span class="detail-value">{format_duration(item.time_spent)}</span>
                </div>
            </div>

            <div class="detail-section">
                <h4>"Output requirements"</h4>
                <ul class="requirement-list readonly">
                    {item.output_requirements.iter().map(|req| view! {
                        <li class={if req.done { "done" } else { "missing" }}>
                            {if req.done { "✓ " } else { "✗ " }}{req.label.clone()}
                        </li>
                    }).collect_view()}
                </ul>
            </div>

            // 過去のレビュー
            <div class="detail-section">
                <h4>"Review history"</h4>
                {if item.history.is_empty() {
                    view! { <p class="muted">"No previous reviews"</p> }.into_view()
                } else {
                    item.history.iter().rev().map(|r| view! {
                        <div class="history-item">
                            <div class="history-header">
                                <StatusBadge label=r.outcome.label() tone=outcome_tone(r.outcome) />
                                <span class="rating">{format_rating(r.rating)}</span>
                                <span class="muted">{r.reviewer.clone()}" · "{r.reviewed_at.format("%Y-%m-%d").to_string()}</span>
                            </div>
                            <ul>
                                {r.feedback.iter().map(|f| view! { <li>{f.clone()}</li> }).collect_view()}
                            </ul>
                        </div>
                    }).collect_view()
                }}
            </div>

            {pending.then(|| view! {
                <div class="detail-section">
                    <h4>"Decision"</h4>
                    <FormErrorList errors=errors />
                    <div class="form-row">
                        <div class="form-group">
                            <label>"Rating (0-5)"</label>
                            <input type="text" inputmode="numeric" placeholder="blank = pending"
                                prop:value=move || rating.get()
                                on:input=move |ev| set_rating.set(event_target_value(&ev))
                            />
                        </div>
                    </div>
                    <div class="form-group">
                        <label>"Feedback (one per line)"</label>
                        <textarea
                            prop:value=move || feedback.get()
                            on:input=move |ev| set_feedback.set(event_target_value(&ev))
                        ></textarea>
                    </div>
                    <div class="modal-actions">
                        <button class="secondary-btn" on:click=request_changes>"Request Changes"</button>
                        <button class="primary-btn" on:click=approve>"Approve"</button>
                    </div>
                </div>
            })}
        </Modal>
    }
}

/// メンバー評価の詳細
#[component]
pub fn MemberReviewModal(review: DetailedTeamMemberReview, on_close: Callback<()>) -> impl IntoView {
    view! {
        <Modal title=format!("{} · {}", review.member.name, review.subtask_name) on_close=on_close>
            <div class="detail-grid">
                <div class="detail-item">
                    <span class="detail-label">"Outcome"</span>
                    <StatusBadge label=review.outcome.label() tone=outcome_tone(review.outcome) />
                </div>
                <div class="detail-item">
                    <span class="detail-label">"Rating"</span>
                    <span class="detail-value rating">{format_rating(review.rating)}</span>
                </div>
                <div class="detail-item">
                    <span class="detail-label">"Reviewer"</span>
                    <span class="detail-value">{review.reviewer.clone()}</span>
                </div>
                <div class="detail-item">
                    <span class="detail-label">"Reviewed"</span>
                    <span class="detail-value">{review.reviewed_at.format("%Y-%m-%d %H:%M").to_string()}</span>
                </div>
            </div>

            <div class="detail-section">
                <h4>"Strengths"</h4>
                <ul>{review.strengths.iter().map(|s| view! { <li>{s.clone()}</li> }).collect_view()}</ul>
            </div>
            <div class="detail-section">
                <h4>"Improvements"</h4>
                <ul>{review.improvements.iter().map(|s| view! { <li>{s.clone()}</li> }).collect_view()}</ul>
            </div>
            {(!review.comments.is_empty()).then(|| view! {
                <div class="detail-section">
                    <h4>"Comments"</h4>
                    <p>{review.comments.clone()}</p>
                </div>
            })}
            {review.sla_breached.then(|| view! {
                <p class="sla-warning">"Review was completed after the SLA window"</p>
            })}
        </Modal>
    }
}
