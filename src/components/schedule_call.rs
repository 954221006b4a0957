//! Intro Call 予約フォーム

use leptos::*;
use crate::error::CommandError;
use crate::models::Deal;
use crate::state::ScheduleCallForm;
use super::{FormErrorList, Modal};

#[component]
pub fn ScheduleCallModal(
    deal: Deal,
    on_submit: Callback<ScheduleCallForm, Result<(), CommandError>>,
    on_close: Callback<()>,
) -> impl IntoView {
    let (form, set_form) = create_signal(ScheduleCallForm::default());
    let (errors, set_errors) = create_signal(Vec::<String>::new());

    let submit = move |_| match on_submit.call(form.get_untracked()) {
        Ok(()) => set_errors.set(Vec::new()),
        Err(e) => set_errors.set(e.messages()),
    };

    view! {
        <Modal title=format!("Schedule Intro Call: {}", deal.name) on_close=on_close>
            <p class="modal-subtitle">{deal.company.clone()}" / "{deal.owner.clone()}</p>
            <FormErrorList errors=errors />

            <div class="form-row">
                <div class="form-group">
                    <label>"Date *"</label>
                    <input type="date"
                        prop:value=move || form.get().date
                        on:input=move |ev| set_form.update(|f| f.date = event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label>"Time *"</label>
                    <input type="time"
                        prop:value=move || form.get().time
                        on:input=move |ev| set_form.update(|f| f.time = event_target_value(&ev))
                    />
                </div>
            </div>
            <div class="form-group">
                <label>"Attendees (comma separated)"</label>
                <input type="text"
                    prop:value=move || form.get().attendees
                    on:input=move |ev| set_form.update(|f| f.attendees = event_target_value(&ev))
                />
            </div>
            <div class="form-group">
                <label>"Agenda"</label>
                <textarea
                    prop:value=move || form.get().agenda
                    on:input=move |ev| set_form.update(|f| f.agenda = event_target_value(&ev))
                ></textarea>
            </div>

            <div class="modal-actions">
                <button class="secondary-btn" on:click=move |_| on_close.call(())>"Cancel"</button>
                <button class="primary-btn" on:click=submit>"Schedule Call"</button>
            </div>
        </Modal>
    }
}
