//! 案件詳細モーダル

use leptos::*;
use crate::models::{Deal, DealStatus, IntroCallStatus};
use crate::utils::format_money;
use super::badges::{deal_status_tone, risk_tone};
use super::{Modal, StatusBadge};

#[component]
pub fn DealDetailModal(
    deal: Deal,
    on_update: Callback<Deal>,
    on_schedule: Callback<()>,
    on_convert: Callback<()>,
    on_close: Callback<()>,
) -> impl IntoView {
    let can_convert = deal.can_convert();
    let call_pending = deal.intro_call_status == IntroCallStatus::Pending;
    let converted = deal.converted_to_projects;
    let current = deal.status;
    let editable = deal.clone();

    let on_status_change = move |ev: web_sys::Event| {
        if let Some(status) = DealStatus::from_label(&event_target_value(&ev)) {
            let mut updated = editable.clone();
            updated.status = status;
            on_update.call(updated);
        }
    };

    view! {
        <Modal title=deal.name.clone() on_close=on_close wide=true>
            <div class="detail-grid">
                <div class="detail-item">
                    <span class="detail-label">"Company"</span>
                    <span class="detail-value">{deal.company.clone()}</span>
                </div>
                <div class="detail-item">
                    <span class="detail-label">"Owner"</span>
                    <span class="detail-value">{deal.owner.clone()}</span>
                </div>
                <div class="detail-item">
                    <span class="detail-label">"Status"</span>
                    <StatusBadge label=deal.status.label() tone=deal_status_tone(deal.status) />
                    <select class="inline-select" on:change=on_status_change>
                        {DealStatus::ALL.into_iter().map(|s| view! {
                            <option value=s.label() selected={s == current}>{s.label()}</option>
                        }).collect_view()}
                    </select>
                </div>
                <div class="detail-item">
                    <span class="detail-label">"Intro call"</span>
                    <StatusBadge
                        label=deal.intro_call_status.label()
                        tone={if call_pending { "tone-warning" } else { "tone-ok" }}
                    />
                </div>
                <div class="detail-item">
                    <span class="detail-label">"Risk"</span>
                    <StatusBadge label=deal.risk.label() tone=risk_tone(deal.risk) />
                </div>
                <div class="detail-item">
                    <span class="detail-label">"Budget"</span>
                    <span class="detail-value">{format_money(deal.budget)}</span>
                </div>
            </div>

            <div class="detail-section">
                <h4>"Services"</h4>
                <ul class="service-list">
                    {deal.services.iter().map(|s| view! { <li>{s.clone()}</li> }).collect_view()}
                </ul>
            </div>

            {deal.intro_call.clone().map(|call| view! {
                <div class="detail-section">
                    <h4>"Intro call"</h4>
                    <p>{call.date.format("%Y-%m-%d").to_string()}" "{call.time.format("%H:%M").to_string()}</p>
                    {(!call.attendees.is_empty()).then(|| view! {
                        <p class="muted">"Attendees: "{call.attendees.join(", ")}</p>
                    })}
                    {(!call.agenda.is_empty()).then(|| view! {
                        <p class="muted">{call.agenda.clone()}</p>
                    })}
                </div>
            })}

            <div class="modal-actions">
                {call_pending.then(|| view! {
                    <button class="secondary-btn" on:click=move |_| on_schedule.call(())>
                        "Schedule Intro Call"
                    </button>
                })}
                {if converted {
                    view! { <span class="converted-note">"Converted to projects"</span> }.into_view()
                } else {
                    view! {
                        <button
                            class="primary-btn"
                            disabled={!can_convert}
                            title={if can_convert { "" } else { "Intro call must be done first" }}
                            on:click=move |_| on_convert.call(())
                        >
                            "Convert to Projects"
                        </button>
                    }.into_view()
                }}
            </div>
        </Modal>
    }
}
