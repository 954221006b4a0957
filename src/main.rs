use chrono::{DateTime, Utc};
use leptos::*;
use gloo::timers::callback::Interval;
use wasm_bindgen_futures::spawn_local;

mod components;
mod error;
mod models;
mod state;
mod utils;
mod views;

use components::SessionHeader;
use models::{Agency, CurrentUser, DetailedTeamMemberReview, Tab};
use state::{DealBoard, ReviewBoard, SubtaskBoard};
use utils::config::{load_config, AppConfig};
use utils::log_trace::{clear_logs, download_logs, log_count, log_info, set_debug_logging};
use utils::mock::{format_mock_data_modified, load_mock_data};
use views::{Companies, DealList, SubtaskReviewsScreen, SubtasksScreen, TeamMemberReviews};

// ============================================
// 画面共有の状態
// ============================================

/// 各画面の状態コンテナ
///
/// タブを切り替えても状態（実行中タイマーなど）が残るようにApp側で保持する。
#[derive(Clone, Copy)]
pub struct DashboardContext {
    pub config: AppConfig,
    pub current_user: ReadSignal<Option<CurrentUser>>,
    /// 期限・SLA判定の基準時刻（1分ごとに更新）
    pub clock: ReadSignal<DateTime<Utc>>,
    pub toast: ReadSignal<Option<(u32, String)>>,
    pub set_toast: WriteSignal<Option<(u32, String)>>,
    pub agencies: RwSignal<Vec<Agency>>,
    pub deals: RwSignal<DealBoard>,
    pub subtasks: RwSignal<SubtaskBoard>,
    pub reviews: RwSignal<ReviewBoard>,
    pub member_reviews: RwSignal<Vec<DetailedTeamMemberReview>>,
}

/// 保存完了などの一時メッセージ（設定時間後に消える）
pub fn show_toast(ctx: DashboardContext, message: impl Into<String>) {
    let seq = ctx.toast.get_untracked().map(|(n, _)| n + 1).unwrap_or(0);
    ctx.set_toast.set(Some((seq, message.into())));
    let duration = ctx.config.toast_duration_ms;
    let toast = ctx.toast;
    let set_toast = ctx.set_toast;
    spawn_local(async move {
        gloo::timers::future::TimeoutFuture::new(duration).await;
        // 後から出たトーストは消さない
        if toast.get_untracked().map(|(n, _)| n) == Some(seq) {
            set_toast.set(None);
        }
    });
}

// ============================================
// メインアプリ（タブ切り替え）
// ============================================

#[component]
fn App() -> impl IntoView {
    let config = load_config();
    set_debug_logging(config.debug_logging);
    let data = load_mock_data();

    let mock_user = data.current_user.clone();
    let (current_user, set_current_user) = create_signal(data.current_user);
    let (toast, set_toast) = create_signal(None::<(u32, String)>);
    let (current_tab, set_current_tab) = create_signal(Tab::default());
    let (clock, set_clock) = create_signal(Utc::now());

    let ctx = DashboardContext {
        config,
        current_user,
        clock,
        toast,
        set_toast,
        agencies: create_rw_signal(data.agencies),
        deals: create_rw_signal(DealBoard::new(data.deals)),
        subtasks: create_rw_signal(SubtaskBoard::new(data.subtasks, data.tasks, data.team_members)),
        reviews: create_rw_signal(ReviewBoard::new(data.review_queue)),
        member_reviews: create_rw_signal(data.member_reviews),
    };
    provide_context(ctx);

    // 作業タイマー（1秒ごと）
    let subtasks = ctx.subtasks;
    let ticker = Interval::new(1_000, move || {
        if subtasks.with_untracked(|b| b.has_running_timers()) {
            subtasks.update(|b| {
                b.tick_timers(1);
            });
        }
    });
    on_cleanup(move || drop(ticker));

    // 集計の基準時刻。データが変わらなくても期限超過の件数が進むように
    let minute = Interval::new(60_000, move || set_clock.set(Utc::now()));
    on_cleanup(move || drop(minute));

    let on_logout = Callback::new(move |_: ()| {
        log_info("session", "Logged out");
        set_current_user.set(None);
    });
    let on_sign_in = Callback::new(move |_: ()| {
        log_info("session", "Signed in with mock user");
        set_current_user.set(mock_user.clone());
    });

    let (log_entries, set_log_entries) = create_signal(log_count());
    let on_download_logs = move |_| {
        download_logs();
        set_log_entries.set(log_count());
    };
    let on_clear_logs = move |_| {
        clear_logs();
        set_log_entries.set(log_count());
    };

    view! {
        <div class="app">
            <header class="app-header">
                <h1>"Agency Dashboard"</h1>
                <SessionHeader user=current_user on_logout=on_logout on_sign_in=on_sign_in />
            </header>

            <nav class="tabs">
                {Tab::ALL.into_iter().map(|tab| view! {
                    <button
                        class=move || if current_tab.get() == tab { "active" } else { "" }
                        on:click=move |_| {
                            log_info("ui-action", &format!("Tab: {}", tab.label()));
                            set_current_tab.set(tab);
                        }
                    >
                        {tab.label()}
                    </button>
                }).collect_view()}
            </nav>

            <main class="container">
                {move || match current_tab.get() {
                    Tab::Companies => view! { <Companies /> }.into_view(),
                    Tab::Deals => view! { <DealList /> }.into_view(),
                    Tab::Subtasks => view! { <SubtasksScreen /> }.into_view(),
                    Tab::SubtaskReviews => view! { <SubtaskReviewsScreen /> }.into_view(),
                    Tab::TeamMemberReviews => view! { <TeamMemberReviews /> }.into_view(),
                }}
            </main>

            {move || toast.get().map(|(_, message)| view! {
                <div class="toast">{message}</div>
            })}

            <footer class="app-footer">
                <span class="muted">{format_mock_data_modified()}</span>
                <button class="link-btn" on:click=on_download_logs>
                    {move || format!("Download log ({})", log_entries.get())}
                </button>
                <button class="link-btn" on:click=on_clear_logs>"Clear log"</button>
            </footer>
        </div>
    }
}

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
