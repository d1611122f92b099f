/// Popup UI for Save Tabs

use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlSelectElement;
use patternfly_yew::prelude::*;
use log::error;
use crate::browser::{self, BrowserStorage, BrowserTabs};
use crate::commands::{PopupCommand, dispatch};
use crate::engine::SaveTabs;
use crate::ui::components::{ListItem, Separator};

fn engine() -> SaveTabs<BrowserStorage, BrowserTabs> {
    SaveTabs::new(BrowserStorage, BrowserTabs, browser::installation_id())
}

#[derive(Clone, PartialEq)]
enum PopupState {
    Idle,
    Running(PopupCommand),
}

#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(|| PopupState::Idle);
    let groups = use_state(Vec::<String>::new);
    let selected = use_state(|| None::<String>);

    // Load tab groups on mount
    {
        let groups = groups.clone();
        let selected = selected.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let engine = engine();
                match engine.get_tab_groups().await {
                    Ok(names) => groups.set(names),
                    Err(e) => error!("Failed to load tab groups: {}", e),
                }
                match engine.get_selected_tab_group().await {
                    Ok(group) => selected.set(group),
                    Err(e) => error!("Failed to load selected tab group: {}", e),
                }
            });
            || ()
        });
    }

    // Every command closes the popup when done, whatever the outcome
    let on_command = {
        let state = state.clone();
        move |command: PopupCommand| {
            let state = state.clone();
            Callback::from(move |_: MouseEvent| {
                state.set(PopupState::Running(command));
                spawn_local(async move {
                    dispatch(command, &engine()).await;
                    browser::close_window();
                });
            })
        }
    };

    let on_group_change = {
        let selected = selected.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<HtmlSelectElement>() {
                let group = select.value();
                selected.set(Some(group.clone()));
                spawn_local(async move {
                    if let Err(e) = engine().set_selected_tab_group(&group).await {
                        error!("Failed to select tab group {}: {}", group, e);
                    }
                });
            }
        })
    };

    let on_options = Callback::from(|_: MouseEvent| {
        browser::open_options();
        browser::close_window();
    });

    let is_busy = !matches!(*state, PopupState::Idle);

    html! {
        <div id="popup-content" class="panel">
            if groups.len() > 1 {
                <>
                <div class="panel-section tab-groups">
                    <span class="tab-groups-label">{browser::message("tabGroup")}</span>
                    <select class="tab-groups-select" onchange={on_group_change} disabled={is_busy}>
                        {for groups.iter().map(|group| html! {
                            <option
                                value={group.clone()}
                                selected={(*selected).as_deref() == Some(group.as_str())}
                            >
                                {group}
                            </option>
                        })}
                    </select>
                </div>
                <Separator />
                </>
            }

            <div class="panel-section panel-section-list">
                {for PopupCommand::ALL.iter().map(|command| html! {
                    <ListItem
                        id={command.id()}
                        icon={command.icon()}
                        text={browser::message(command.id())}
                        onclick={on_command(*command)}
                        disabled={is_busy}
                    />
                })}
            </div>

            if let PopupState::Running(command) = &*state {
                <div class="loading-text-center">
                    <Spinner />
                    <p class="loading-text">{format!("{:?}...", command)}</p>
                </div>
            }

            <Separator />
            <div class="panel-section panel-section-list">
                <ListItem
                    id="openOptions"
                    icon="options.svg"
                    text={browser::message("openOptions")}
                    onclick={on_options}
                />
            </div>
        </div>
    }
}
