use crate::i18n::t;
use crate::scoreboard::ScoreAction;
use web_sys::HtmlInputElement;
use yazboz_core::{EditSession, EditTarget};
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct EditPanelProps {
    pub edit: EditSession,
    pub on_action: Callback<ScoreAction>,
}

#[function_component(EditPanel)]
pub fn edit_panel(props: &EditPanelProps) -> Html {
    let numeric = !matches!(props.edit.target, EditTarget::Name { .. });
    let oninput = {
        let cb = props.on_action.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            cb.emit(ScoreAction::EditText(input.value()));
        })
    };
    let on_save = {
        let cb = props.on_action.clone();
        Callback::from(move |_| cb.emit(ScoreAction::CommitEdit))
    };
    let on_cancel = {
        let cb = props.on_action.clone();
        Callback::from(move |_| cb.emit(ScoreAction::CancelEdit))
    };

    html! {
        <div class="edit-panel" role="dialog" aria-modal="true">
            <h3>{ t("edit.title") }</h3>
            <input type="text" inputmode={if numeric { "numeric" } else { "text" }}
                value={props.edit.text.clone()} {oninput} />
            <div class="edit-actions">
                <button type="button" class="primary" onclick={on_save}>{ t("edit.save") }</button>
                <button type="button" onclick={on_cancel}>{ t("edit.cancel") }</button>
            </div>
        </div>
    }
}
