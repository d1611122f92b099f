/// Reusable UI components

use yew::prelude::*;

#[function_component(Separator)]
pub fn separator() -> Html {
    html! {
        <div class="panel-section-separator"></div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ListItemProps {
    pub id: AttrValue,
    pub icon: AttrValue,
    pub text: AttrValue,
    pub onclick: Callback<MouseEvent>,
    #[prop_or(false)]
    pub disabled: bool,
}

/// Clickable entry of the popup panel list.
#[function_component(ListItem)]
pub fn list_item(props: &ListItemProps) -> Html {
    let onclick = {
        let onclick = props.onclick.clone();
        let disabled = props.disabled;
        Callback::from(move |e: MouseEvent| {
            if !disabled {
                onclick.emit(e);
            }
        })
    };

    let class = if props.disabled {
        "panel-list-item disabled"
    } else {
        "panel-list-item"
    };

    html! {
        <div id={props.id.clone()} class={class} onclick={onclick}>
            <div class="icon"><img src={format!("icons/{}", props.icon)} /></div>
            <div class="text">{props.text.clone()}</div>
            <div class="text-shortcut"></div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct RadioSetProps {
    pub name: AttrValue,
    pub legend: AttrValue,
    pub true_label: AttrValue,
    pub false_label: AttrValue,
    pub value: bool,
    pub onchange: Callback<bool>,
}

/// A yes/no setting as two radio buttons.
#[function_component(RadioSet)]
pub fn radio_set(props: &RadioSetProps) -> Html {
    html! {
        <fieldset class="radio-set">
            <legend>{props.legend.clone()}</legend>
            <label class="radio-label">
                <input
                    type="radio"
                    name={props.name.clone()}
                    checked={props.value}
                    onchange={props.onchange.reform(|_: Event| true)}
                />
                {props.true_label.clone()}
            </label>
            <label class="radio-label">
                <input
                    type="radio"
                    name={props.name.clone()}
                    checked={!props.value}
                    onchange={props.onchange.reform(|_: Event| false)}
                />
                {props.false_label.clone()}
            </label>
        </fieldset>
    }
}
