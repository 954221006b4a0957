//! モーダル共通枠
//!
//! 背景クリックと×ボタンで閉じる

use leptos::*;

#[component]
pub fn Modal(
    #[prop(into)] title: String,
    on_close: Callback<()>,
    #[prop(optional)] wide: bool,
    children: Children,
) -> impl IntoView {
    view! {
        // オーバーレイ（モーダル外クリックで閉じる）
        <div class="modal-backdrop" on:click=move |_| on_close.call(())>
            <div
                class=format!("modal {}", if wide { "modal-wide" } else { "" })
                on:click=move |ev: web_sys::MouseEvent| ev.stop_propagation()
            >
                <div class="modal-header">
                    <h3>{title}</h3>
                    <button class="close-btn" on:click=move |_| on_close.call(())>"×"</button>
                </div>
                <div class="modal-body">
                    {children()}
                </div>
            </div>
        </div>
    }
}

/// 入力エラー一覧（空なら何も表示しない）
#[component]
pub fn FormErrorList(errors: ReadSignal<Vec<String>>) -> impl IntoView {
    view! {
        {move || {
            let list = errors.get();
            (!list.is_empty()).then(|| view! {
                <ul class="form-errors">
                    {list.into_iter().map(|e| view! { <li>{e}</li> }).collect_view()}
                </ul>
            })
        }}
    }
}
