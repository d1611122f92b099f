/// Options page for Save Tabs

use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use patternfly_yew::prelude::*;
use crate::browser::{self, BrowserStorage};
use crate::options::{GroupAction, Options, Toggle};
use crate::settings::Settings;
use crate::ui::components::RadioSet;

fn options() -> Options<BrowserStorage> {
    Options::new(BrowserStorage)
}

#[function_component(OptionsApp)]
pub fn options_app() -> Html {
    let settings = use_state(|| None::<Settings>);
    let selected_group = use_state(|| None::<String>);
    let new_group = use_state(String::new);
    let group_error = use_state(|| None::<String>);
    let show_expert = use_state(|| false);

    // Restore settings on mount
    {
        let settings = settings.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let restored = options().restore().await;
                settings.set(Some(restored.unwrap_or_default()));
            });
            || ()
        });
    }

    let on_toggle = {
        let settings = settings.clone();
        move |toggle: Toggle| {
            let settings = settings.clone();
            Callback::from(move |value: bool| {
                if let Some(current) = (*settings).clone() {
                    let updated = toggle.apply(current, value);
                    settings.set(Some(updated.clone()));
                    spawn_local(async move {
                        options().update(&updated).await;
                    });
                }
            })
        }
    };

    let on_group_action = {
        let settings = settings.clone();
        let selected_group = selected_group.clone();
        let new_group = new_group.clone();
        let group_error = group_error.clone();
        Callback::from(move |action: GroupAction| {
            let Some(current) = (*settings).clone() else {
                return;
            };
            let settings = settings.clone();
            let selected_group = selected_group.clone();
            let new_group = new_group.clone();
            let group_error = group_error.clone();
            spawn_local(async move {
                match options().apply(current, action).await {
                    Ok(updated) => {
                        group_error.set(None);
                        new_group.set(String::new());
                        let still_listed = (*selected_group)
                            .as_ref()
                            .is_some_and(|group| updated.tab_groups.contains(group));
                        if !still_listed {
                            selected_group.set(None);
                        }
                        settings.set(Some(updated));
                    }
                    Err(e) => group_error.set(Some(browser::message(e.message_key()))),
                }
            });
        })
    };

    let on_group_select = {
        let selected_group = selected_group.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<HtmlSelectElement>() {
                let value = select.value();
                selected_group.set(if value.is_empty() { None } else { Some(value) });
            }
        })
    };

    let on_new_group_input = {
        let new_group = new_group.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                new_group.set(input.value());
            }
        })
    };

    let on_add = {
        let on_group_action = on_group_action.clone();
        let new_group = new_group.clone();
        Callback::from(move |_: MouseEvent| {
            on_group_action.emit(GroupAction::Add((*new_group).clone()));
        })
    };

    // Actions on the group picked in the list
    let on_selected_group = {
        let selected_group = selected_group.clone();
        let group_error = group_error.clone();
        move |make_action: fn(String) -> GroupAction| {
            let on_group_action = on_group_action.clone();
            let selected_group = selected_group.clone();
            let group_error = group_error.clone();
            Callback::from(move |_: MouseEvent| match (*selected_group).clone() {
                Some(group) => on_group_action.emit(make_action(group)),
                None => group_error.set(Some(browser::message("noGroupSelected"))),
            })
        }
    };

    let on_show_expert = {
        let show_expert = show_expert.clone();
        Callback::from(move |_: MouseEvent| show_expert.set(true))
    };

    let Some(current) = (*settings).clone() else {
        return html! {
            <div class="loading-text-center">
                <Spinner />
            </div>
        };
    };

    html! {
        <div class="options">
            <form class="options-form" onsubmit={Callback::from(|e: SubmitEvent| e.prevent_default())}>
                <RadioSet
                    name="single-tab"
                    legend={browser::message("singleTabSetting")}
                    true_label={browser::message("overwrite")}
                    false_label={browser::message("append")}
                    value={Toggle::SingleTabOverwrite.get(&current)}
                    onchange={on_toggle(Toggle::SingleTabOverwrite)}
                />
                <RadioSet
                    name="multi-tab"
                    legend={browser::message("multiTabSetting")}
                    true_label={browser::message("overwrite")}
                    false_label={browser::message("append")}
                    value={Toggle::MultiTabOverwrite.get(&current)}
                    onchange={on_toggle(Toggle::MultiTabOverwrite)}
                />

                if *show_expert {
                    <RadioSet
                        name="unknown-protocols"
                        legend={browser::message("unknownProtocolSetting")}
                        true_label={browser::message("skip")}
                        false_label={browser::message("store")}
                        value={Toggle::SkipUnknownProtocols.get(&current)}
                        onchange={on_toggle(Toggle::SkipUnknownProtocols)}
                    />
                } else {
                    <Button onclick={on_show_expert} variant={ButtonVariant::Secondary}>
                        {browser::message("showExpertSettings")}
                    </Button>
                }
            </form>

            <fieldset class="tab-groups">
                <legend>{browser::message("tabGroups")}</legend>
                <select class="tab-groups-list" size="5" onchange={on_group_select}>
                    {for current.tab_groups.iter().map(|group| {
                        let label = if *group == current.tab_groups_default {
                            format!("{} ({})", group, browser::message("default"))
                        } else {
                            group.clone()
                        };
                        html! {
                            <option
                                value={group.clone()}
                                selected={(*selected_group).as_deref() == Some(group.as_str())}
                            >
                                {label}
                            </option>
                        }
                    })}
                </select>

                <div class="tab-groups-actions">
                    <Button onclick={on_selected_group(GroupAction::SetDefault)} variant={ButtonVariant::Secondary}>
                        {browser::message("setDefaultTabGroup")}
                    </Button>
                    <Button onclick={on_selected_group(GroupAction::Remove)} variant={ButtonVariant::Danger}>
                        {browser::message("removeTabGroup")}
                    </Button>
                </div>

                <div class="tab-groups-add">
                    <input
                        type="text"
                        class="tab-groups-name"
                        placeholder={browser::message("tabGroupName")}
                        value={(*new_group).clone()}
                        oninput={on_new_group_input}
                    />
                    <Button onclick={on_add}>
                        {browser::message("addTabGroup")}
                    </Button>
                </div>

                if let Some(err) = (*group_error).clone() {
                    <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                        {err}
                    </Alert>
                }
            </fieldset>
        </div>
    }
}
