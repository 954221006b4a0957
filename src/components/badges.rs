//! ステータス・フラグのバッジ

use leptos::*;
use crate::models::*;

#[component]
pub fn StatusBadge(#[prop(into)] label: String, #[prop(optional)] tone: &'static str) -> impl IntoView {
    view! {
        <span class=format!("status-badge {}", tone)>{label}</span>
    }
}

/// 品質フラグ（画面ごとのラベル表で表示）
#[component]
pub fn FlagBadge(flag: QualityFlag, labels: LabelSet) -> impl IntoView {
    view! {
        <span class=format!("flag-badge {}", flag.css_class())>{flag.label(labels)}</span>
    }
}

pub fn execution_tone(status: ExecutionStatus) -> &'static str {
    match status {
        ExecutionStatus::NotStarted => "tone-muted",
        ExecutionStatus::InProgress => "tone-info",
        ExecutionStatus::Blocked => "tone-error",
        ExecutionStatus::InReview => "tone-warning",
        ExecutionStatus::Completed => "tone-ok",
    }
}

pub fn approval_tone(status: ApprovalStatus) -> &'static str {
    match status {
        ApprovalStatus::Pending => "tone-warning",
        ApprovalStatus::Approved => "tone-ok",
        ApprovalStatus::ChangesRequested => "tone-info",
        ApprovalStatus::Rejected => "tone-error",
    }
}

pub fn outcome_tone(outcome: ReviewOutcome) -> &'static str {
    match outcome {
        ReviewOutcome::Approved => "tone-ok",
        ReviewOutcome::ChangesRequested => "tone-warning",
        ReviewOutcome::Rejected => "tone-error",
    }
}

pub fn deal_status_tone(status: DealStatus) -> &'static str {
    match status {
        DealStatus::NewLead => "tone-muted",
        DealStatus::Qualified | DealStatus::ProposalSent => "tone-info",
        DealStatus::IntroCallDone => "tone-warning",
        DealStatus::Won => "tone-ok",
        DealStatus::Lost => "tone-error",
    }
}

pub fn risk_tone(risk: RiskLevel) -> &'static str {
    match risk {
        RiskLevel::Low => "tone-ok",
        RiskLevel::Medium => "tone-warning",
        RiskLevel::High => "tone-error",
    }
}
