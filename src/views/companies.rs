//! 会社ツリー画面

use leptos::*;
use crate::components::{CompanyTree, StatCard};
use crate::state::{CompanyTreeSummary, ExpandState, NodeKey};
use crate::utils::log_trace::log_debug;
use crate::DashboardContext;

/// 全ノードのキー（代理店・会社・案件）
fn all_keys(agencies: &[crate::models::Agency]) -> Vec<NodeKey> {
    let mut keys = Vec::new();
    for agency in agencies {
        keys.push(NodeKey::agency(agency.id.clone()));
        for company in &agency.companies {
            keys.push(NodeKey::company(company.id.clone()));
            for deal in &company.deals {
                keys.push(NodeKey::deal(deal.id.clone()));
            }
        }
    }
    keys
}

#[component]
pub fn Companies() -> impl IntoView {
    let ctx = use_context::<DashboardContext>().expect("DashboardContext not found");
    let agencies = ctx.agencies;

    // 先頭の代理店だけ開いた状態で表示
    let expand = create_rw_signal(ExpandState::with_open(
        agencies.with_untracked(|a| a.first().map(|ag| NodeKey::agency(ag.id.clone()))),
    ));
    let summary = create_memo(move |_| agencies.with(|a| CompanyTreeSummary::from_agencies(a)));

    let set_all = move |open: bool| {
        let keys = agencies.with_untracked(|a| all_keys(a));
        expand.update(|s| {
            for key in keys {
                s.set(key, open);
            }
        });
        log_debug("companies", &format!("{} nodes open", expand.with_untracked(|s| s.open_count())));
    };

    view! {
        <div class="screen companies">
            <h2>"Companies"</h2>

            <div class="stat-grid">
                <StatCard label="Agencies" value=Signal::derive(move || summary.get().agencies.to_string()) />
                <StatCard label="Companies" value=Signal::derive(move || summary.get().companies.to_string()) />
                <StatCard label="Deals" value=Signal::derive(move || summary.get().deals.to_string()) />
                <StatCard label="Projects" value=Signal::derive(move || summary.get().projects.to_string()) />
            </div>

            <div class="toolbar">
                <button class="secondary-btn" on:click=move |_| set_all(true)>"Expand all"</button>
                <button class="secondary-btn" on:click=move |_| set_all(false)>"Collapse all"</button>
                <span class="muted">{move || format!("{} open", expand.with(|s| s.open_count()))}</span>
            </div>

            {move || if agencies.with(|a| a.is_empty()) {
                view! { <p class="empty">"No agencies loaded"</p> }.into_view()
            } else {
                view! { <CompanyTree agencies=agencies expand=expand /> }.into_view()
            }}
        </div>
    }
}
