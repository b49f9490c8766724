use serde_json::Value;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_hooks::use_mount;
use yew_router::prelude::{use_navigator, Link};

use super::describe;
use crate::{
    dashboard::Navigate,
    error::Result,
    request::{ApiClient, Reply},
    utils, Route,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountField {
    Email,
    Password,
    Phone,
}

impl AccountField {
    fn label(self) -> &'static str {
        match self {
            AccountField::Email => "email",
            AccountField::Password => "password",
            AccountField::Phone => "phone number",
        }
    }

    fn input_type(self) -> &'static str {
        match self {
            AccountField::Email => "email",
            AccountField::Password => "password",
            AccountField::Phone => "tel",
        }
    }

    async fn submit(self, api: &ApiClient, value: &str) -> Result<Reply> {
        match self {
            AccountField::Email => api.update_email(value).await,
            AccountField::Password => api.update_password(value).await,
            AccountField::Phone => api.update_phone(value).await,
        }
    }
}

#[function_component(Account)]
pub fn account_page() -> Html {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::from_config);
    let navigator = use_navigator();
    let profile = use_state(|| None::<Value>);
    let device_status = use_state(|| None::<Value>);

    {
        let profile = profile.clone();
        let device_status = device_status.clone();
        use_mount(move || {
            spawn_local(async move {
                match api.profile().await {
                    Ok(reply) if reply.is_success() => profile.set(Some(reply.body)),
                    _ => {
                        navigator.to_login();
                        return;
                    }
                }
                match api.device_status().await {
                    Ok(reply) => device_status.set(Some(reply.body)),
                    Err(err) => log::warn!("device status unavailable: {err}"),
                }
            });
        });
    }

    html! {
        <div class="container">
            <h1 class="page-header">{"Account"}</h1>
            <p><Link<Route> to={Route::Dashboard}>{"← Dashboard"}</Link<Route>></p>
            <div class="row">
                <div class="col-md-6">
                    <div class="panel panel-default">
                        <div class="panel-heading"><h3 class="panel-title">{"Profile"}</h3></div>
                        <div class="panel-body">{field_table((*profile).as_ref())}</div>
                    </div>
                    <UpdateForm field={AccountField::Email} />
                    <UpdateForm field={AccountField::Password} />
                    <UpdateForm field={AccountField::Phone} />
                </div>
                <div class="col-md-6">
                    <div class="panel panel-default">
                        <div class="panel-heading"><h3 class="panel-title">{"Device Status"}</h3></div>
                        <div class="panel-body">{field_table((*device_status).as_ref())}</div>
                    </div>
                </div>
            </div>
        </div>
    }
}

fn field_table(value: Option<&Value>) -> Html {
    let Some(value) = value else {
        return html! { <p>{"Loading..."}</p> };
    };
    let rows = utils::fields(value)
        .into_iter()
        .map(|(name, value)| html! { <tr><td>{name}</td><td>{value}</td></tr> })
        .collect::<Html>();

    html! {
        <table class="table table-hover">
            <tbody>{rows}</tbody>
        </table>
    }
}

#[derive(Properties, PartialEq)]
pub struct UpdateProps {
    pub field: AccountField,
}

#[function_component(UpdateForm)]
pub fn update_form(props: &UpdateProps) -> Html {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::from_config);
    let value = use_state(String::new);
    let message = use_state(|| None::<String>);
    let field = props.field;

    let onsubmit = {
        let value = value.clone();
        let message = message.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let api = api.clone();
            let value = (*value).clone();
            let message = message.clone();
            spawn_local(async move {
                let result = field.submit(&api, &value).await;
                message.set(Some(describe(result, "Saved.")));
            });
        })
    };

    html! {
        <form class="form-inline update-form" {onsubmit}>
            <div class="form-group">
                <label>{format!("New {}", field.label())}</label>{" "}
                <input class="form-control" type={field.input_type()} required=true
                    value={(*value).clone()} oninput={utils::bind_input(&value)} />
            </div>{" "}
            <button class="btn btn-default" type="submit">{"Update"}</button>
            if let Some(text) = (*message).clone() {
                <span class="help-block">{text}</span>
            }
        </form>
    }
}
