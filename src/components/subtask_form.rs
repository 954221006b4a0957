//! サブタスク作成フォーム

use leptos::*;
use crate::error::CommandError;
use crate::models::{ParentTask, Priority, TeamMember};
use crate::state::CreateSubtaskForm;
use super::{FormErrorList, Modal};

/// サブタスク作成モーダル
///
/// 送信は `on_submit` に渡し、失敗時はエラー一覧を表示したまま開いておく。
#[component]
pub fn CreateSubtaskModal(
    tasks: Vec<ParentTask>,
    members: Vec<TeamMember>,
    on_submit: Callback<CreateSubtaskForm, Result<(), CommandError>>,
    on_close: Callback<()>,
) -> impl IntoView {
    let (form, set_form) = create_signal(CreateSubtaskForm::default());
    let (errors, set_errors) = create_signal(Vec::<String>::new());

    let submit = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        match on_submit.call(form.get_untracked()) {
            Ok(()) => set_errors.set(Vec::new()),
            Err(e) => set_errors.set(e.messages()),
        }
    };

    view! {
        <Modal title="Create Subtask" on_close=on_close>
            <FormErrorList errors=errors />

            <div class="form-group">
                <label>"Name *"</label>
                <input type="text"
                    prop:value=move || form.get().name
                    on:input=move |ev| set_form.update(|f| f.name = event_target_value(&ev))
                />
            </div>
            <div class="form-group">
                <label>"Description"</label>
                <textarea
                    prop:value=move || form.get().description
                    on:input=move |ev| set_form.update(|f| f.description = event_target_value(&ev))
                ></textarea>
            </div>

            <div class="form-row">
                <div class="form-group">
                    <label>"Parent task *"</label>
                    <select on:change=move |ev| set_form.update(|f| f.parent_task_id = event_target_value(&ev))>
                        <option value="">"Select a task"</option>
                        {tasks.into_iter().map(|t| view! {
                            <option value=t.id.clone()>{format!("{} ({})", t.name, t.project_name)}</option>
                        }).collect_view()}
                    </select>
                </div>
                <div class="form-group">
                    <label>"Assignee *"</label>
                    <select on:change=move |ev| set_form.update(|f| f.assignee_id = event_target_value(&ev))>
                        <option value="">"Select a member"</option>
                        {members.into_iter().map(|m| view! {
                            <option value=m.id.clone()>{format!("{} - {}", m.name, m.role)}</option>
                        }).collect_view()}
                    </select>
                </div>
            </div>

            <div class="form-row">
                <div class="form-group">
                    <label>"Deadline *"</label>
                    <input type="date"
                        prop:value=move || form.get().deadline
                        on:input=move |ev| set_form.update(|f| f.deadline = event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label>"Priority"</label>
                    <select on:change=move |ev| set_form.update(|f| f.priority = event_target_value(&ev))>
                        {Priority::ALL.into_iter().map(|p| view! {
                            <option value=p.label() selected={p == Priority::default()}>{p.label()}</option>
                        }).collect_view()}
                    </select>
                </div>
                <div class="form-group">
                    <label>"Estimated hours"</label>
                    <input type="text" placeholder="e.g. 4.5"
                        prop:value=move || form.get().estimated_hours
                        on:input=move |ev| set_form.update(|f| f.estimated_hours = event_target_value(&ev))
                    />
                </div>
            </div>

            <div class="form-group">
                <label>"Output requirements (one per line)"</label>
                <textarea
                    prop:value=move || form.get().output_requirements
                    on:input=move |ev| set_form.update(|f| f.output_requirements = event_target_value(&ev))
                ></textarea>
            </div>

            <div class="modal-actions">
                <button class="secondary-btn" on:click=move |_| on_close.call(())>"Cancel"</button>
                <button class="primary-btn" on:click=submit>"Create Subtask"</button>
            </div>
        </Modal>
    }
}
