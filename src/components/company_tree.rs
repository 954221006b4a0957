//! 代理店 → 会社 → 案件 → プロジェクト のツリー表示

use leptos::*;
use crate::models::{Agency, Company, CompanyDeal};
use crate::state::{ExpandState, NodeKey};
use crate::utils::format_money;
use super::badges::deal_status_tone;
use super::StatusBadge;

fn chevron(open: bool) -> &'static str {
    if open { "▼" } else { "▶" }
}

/// 開閉できるツリー行
#[component]
fn TreeRow(
    node: NodeKey,
    expand: RwSignal<ExpandState>,
    #[prop(into)] title: String,
    #[prop(into)] meta: String,
    #[prop(optional)] depth: usize,
    children: ChildrenFn,
) -> impl IntoView {
    let key = node.clone();
    let is_open = create_memo(move |_| expand.with(|s| s.is_open(&key)));
    let toggle = move |_| expand.update(|s| {
        s.toggle(node.clone());
    });

    view! {
        <div class=format!("tree-node depth-{}", depth)>
            <div class="tree-row" on:click=toggle>
                <span class="tree-chevron">{move || chevron(is_open.get())}</span>
                <span class="tree-title">{title}</span>
                <span class="tree-meta">{meta}</span>
            </div>
            <Show when=move || is_open.get()>
                <div class="tree-children">{children()}</div>
            </Show>
        </div>
    }
}

fn deal_node(deal: CompanyDeal, expand: RwSignal<ExpandState>) -> impl IntoView {
    let projects = deal.projects.clone();
    view! {
        <TreeRow
            node=NodeKey::deal(deal.id.clone())
            expand=expand
            title=deal.name.clone()
            meta=format!("{} · {} projects", format_money(deal.value), deal.project_count)
            depth=2
        >
            <StatusBadge label=deal.status.label() tone=deal_status_tone(deal.status) />
            <ul class="project-list">
                {projects.iter().map(|p| view! {
                    <li class="project-item">
                        <span>{p.name.clone()}</span>
                        <span class="muted">{p.status.label()}</span>
                        {p.due_date.map(|d| view! {
                            <span class="muted">" due "{d.format("%Y-%m-%d").to_string()}</span>
                        })}
                    </li>
                }).collect_view()}
            </ul>
        </TreeRow>
    }
}

fn company_node(company: Company, expand: RwSignal<ExpandState>) -> impl IntoView {
    let deals = company.deals.clone();
    view! {
        <TreeRow
            node=NodeKey::company(company.id.clone())
            expand=expand
            title=company.name.clone()
            meta=format!("{} · {} deals · {} projects", company.industry, company.deal_count, company.project_count)
            depth=1
        >
            {deals.iter().cloned().map(|d| deal_node(d, expand)).collect_view()}
        </TreeRow>
    }
}

/// 会社ツリー
#[component]
pub fn CompanyTree(
    #[prop(into)] agencies: Signal<Vec<Agency>>,
    expand: RwSignal<ExpandState>,
) -> impl IntoView {
    view! {
        <div class="company-tree">
            <For
                each=move || agencies.get()
                key=|a| a.id.clone()
                children=move |agency: Agency| {
                    let companies = agency.companies.clone();
                    view! {
                        <TreeRow
                            node=NodeKey::agency(agency.id.clone())
                            expand=expand
                            title=agency.name.clone()
                            meta=format!("{} companies", agency.company_count)
                        >
                            {companies.iter().cloned().map(|c| company_node(c, expand)).collect_view()}
                        </TreeRow>
                    }
                }
            />
        </div>
    }
}
