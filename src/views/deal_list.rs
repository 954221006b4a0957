//! 案件一覧

use leptos::*;
use crate::components::badges::{deal_status_tone, risk_tone};
use crate::components::{DealDetailModal, ScheduleCallModal, StatCard, StatusBadge};
use crate::error::CommandError;
use crate::models::{Deal, DealStatus, IntroCallStatus};
use crate::state::{DealSummary, ModalState, ScheduleCallForm};
use crate::utils::format_money;
use crate::utils::log_trace::log_warn;
use crate::{show_toast, DashboardContext};

#[component]
pub fn DealList() -> impl IntoView {
    let ctx = use_context::<DashboardContext>().expect("DashboardContext not found");
    let deals = ctx.deals;

    let (status_filter, set_status_filter) = create_signal(None::<DealStatus>);
    let (query, set_query) = create_signal(String::new());
    let detail = create_rw_signal(ModalState::<String>::default());
    let schedule = create_rw_signal(ModalState::<String>::default());

    // 集計は常に全件、表はフィルタ後
    let summary = create_memo(move |_| deals.with(|b| DealSummary::from_deals(&b.deals)));
    let rows = move || deals.with(|b| b.filtered(status_filter.get(), &query.get()));

    let on_update_deal = Callback::new(move |deal: Deal| {
        let name = deal.name.clone();
        match deals.try_update(|b| b.update_deal(deal)) {
            Some(Ok(())) => show_toast(ctx, format!("{} saved", name)),
            Some(Err(e)) => log_warn("deals", &e.to_string()),
            None => {}
        }
    });

    let on_convert_to_project = Callback::new(move |id: String| {
        match deals.try_update(|b| b.convert_to_projects(&id).map(|d| d.name.clone())) {
            Some(Ok(name)) => show_toast(ctx, format!("{} converted to projects", name)),
            Some(Err(e)) => show_toast(ctx, e.to_string()),
            None => {}
        }
    });

    let on_schedule_submit = Callback::new(move |form: ScheduleCallForm| -> Result<(), CommandError> {
        let mut modal = schedule.get_untracked();
        let result = modal.confirm(|id| {
            deals
                .try_update(|b| b.schedule_call(id, &form).map(|d| d.name.clone()))
                .transpose()
        });
        // 失敗時は開いたまま（入力内容を保持する）
        if !modal.is_open() {
            schedule.set(modal);
        }
        match result {
            Some(Ok(Some(name))) => {
                show_toast(ctx, format!("Intro call scheduled for {}", name));
                Ok(())
            }
            Some(Err(e)) => Err(e),
            _ => Ok(()),
        }
    });

    let on_status_change = move |ev: web_sys::Event| {
        set_status_filter.set(DealStatus::from_label(&event_target_value(&ev)));
    };

    view! {
        <div class="screen deal-list">
            <h2>"Deals"</h2>

            <div class="stat-grid">
                <StatCard label="Total deals" value=Signal::derive(move || summary.get().total.to_string()) />
                <StatCard label="Pipeline budget" value=Signal::derive(move || format_money(summary.get().total_budget)) />
                <StatCard label="Intro calls pending" value=Signal::derive(move || summary.get().intro_calls_pending.to_string()) tone="tone-warning" />
                <StatCard label="High risk" value=Signal::derive(move || summary.get().high_risk.to_string()) tone="tone-error" />
                <StatCard label="Won" value=Signal::derive(move || summary.get().status_count(DealStatus::Won).to_string()) tone="tone-ok" />
                <StatCard label="Converted" value=Signal::derive(move || summary.get().converted.to_string()) />
            </div>

            <div class="toolbar">
                <select on:change=on_status_change>
                    <option value="">"All statuses"</option>
                    {DealStatus::ALL.into_iter().map(|s| view! {
                        <option value=s.label()>{move || format!("{} ({})", s.label(), summary.get().status_count(s))}</option>
                    }).collect_view()}
                </select>
                <input type="search" placeholder="Search deals or companies"
                    prop:value=move || query.get()
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                />
            </div>

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Deal"</th>
                        <th>"Company"</th>
                        <th>"Owner"</th>
                        <th>"Status"</th>
                        <th>"Intro call"</th>
                        <th>"Risk"</th>
                        <th>"Budget"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let rows = rows();
                        if rows.is_empty() {
                            return view! {
                                <tr><td colspan="8" class="empty">"No deals match the current filter"</td></tr>
                            }.into_view();
                        }
                        rows.into_iter().map(|deal| {
                            let id = deal.id.clone();
                            let convert_id = deal.id.clone();
                            let can_convert = deal.can_convert();
                            view! {
                                <tr class="clickable" on:click=move |_| detail.update(|m| m.open(id.clone()))>
                                    <td>{deal.name.clone()}</td>
                                    <td>{deal.company.clone()}</td>
                                    <td>{deal.owner.clone()}</td>
                                    <td><StatusBadge label=deal.status.label() tone=deal_status_tone(deal.status) /></td>
                                    <td>
                                        <StatusBadge
                                            label=deal.intro_call_status.label()
                                            tone={if deal.intro_call_status == IntroCallStatus::Done { "tone-ok" } else { "tone-warning" }}
                                        />
                                    </td>
                                    <td><StatusBadge label=deal.risk.label() tone=risk_tone(deal.risk) /></td>
                                    <td class="num">{format_money(deal.budget)}</td>
                                    <td>
                                        {if deal.converted_to_projects {
                                            view! { <span class="converted-note">"Converted"</span> }.into_view()
                                        } else {
                                            view! {
                                                <button
                                                    class="small-btn"
                                                    disabled={!can_convert}
                                                    on:click=move |ev: web_sys::MouseEvent| {
                                                        ev.stop_propagation();
                                                        on_convert_to_project.call(convert_id.clone());
                                                    }
                                                >
                                                    "Convert"
                                                </button>
                                            }.into_view()
                                        }}
                                    </td>
                                </tr>
                            }
                        }).collect_view()
                    }}
                </tbody>
            </table>

            {move || {
                let id = detail.with(|m| m.selected().cloned())?;
                let deal = deals.with(|b| b.find(&id).cloned())?;
                let schedule_id = id.clone();
                Some(view! {
                    <DealDetailModal
                        deal=deal
                        on_update=on_update_deal
                        on_schedule=Callback::new(move |_| {
                            detail.update(|m| m.close());
                            schedule.update(|m| m.open(schedule_id.clone()));
                        })
                        on_convert=Callback::new(move |_| on_convert_to_project.call(id.clone()))
                        on_close=Callback::new(move |_| detail.update(|m| m.close()))
                    />
                })
            }}

            {move || {
                let id = schedule.with(|m| m.selected().cloned())?;
                let deal = deals.with_untracked(|b| b.find(&id).cloned())?;
                Some(view! {
                    <ScheduleCallModal
                        deal=deal
                        on_submit=on_schedule_submit
                        on_close=Callback::new(move |_| schedule.update(|m| m.close()))
                    />
                })
            }}
        </div>
    }
}
