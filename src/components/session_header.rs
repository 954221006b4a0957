//! ヘッダーのユーザー表示

use leptos::*;
use crate::models::CurrentUser;

#[component]
pub fn SessionHeader(
    #[prop(into)] user: Signal<Option<CurrentUser>>,
    on_logout: Callback<()>,
    on_sign_in: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="session">
            {move || match user.get() {
                Some(u) => view! {
                    <span class="avatar" title=u.email.clone()>{u.initials()}</span>
                    <span class="user-name">{u.name.clone()}</span>
                    <span class="user-role">{u.role.clone()}</span>
                    <button class="secondary-btn" on:click=move |_| on_logout.call(())>"Logout"</button>
                }.into_view(),
                None => view! {
                    <span class="muted">"Signed out"</span>
                    <button class="primary-btn" on:click=move |_| on_sign_in.call(())>"Sign in again"</button>
                }.into_view(),
            }}
        </div>
    }
}
