use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::{use_navigator, Link};

use super::describe;
use crate::{request::ApiClient, utils, Route};

#[function_component(Login)]
pub fn login_form() -> Html {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::from_config);
    let navigator = use_navigator();
    let email = use_state(String::new);
    let password = use_state(String::new);
    let device_id = use_state(String::new);
    let message = use_state(|| None::<String>);

    let onsubmit = {
        let email = email.clone();
        let password = password.clone();
        let device_id = device_id.clone();
        let message = message.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let api = api.clone();
            let navigator = navigator.clone();
            let message = message.clone();
            let email = (*email).clone();
            let password = (*password).clone();
            let device_id = Some(device_id.trim().to_owned()).filter(|id| !id.is_empty());

            spawn_local(async move {
                match api.login(&email, &password, device_id.as_deref()).await {
                    Ok(reply) if reply.is_success() => {
                        log::info!("signed in");
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Dashboard);
                        }
                    }
                    result => message.set(Some(describe(result, "Sign in failed."))),
                }
            });
        })
    };

    html! {
        <div class="container login">
            <h1 class="page-header">{"Sign In"}</h1>
            <form {onsubmit}>
                <div class="form-group">
                    <label for="email">{"Email"}</label>
                    <input id="email" class="form-control" type="email" required=true
                        value={(*email).clone()} oninput={utils::bind_input(&email)} />
                </div>
                <div class="form-group">
                    <label for="password">{"Password"}</label>
                    <input id="password" class="form-control" type="password" required=true
                        value={(*password).clone()} oninput={utils::bind_input(&password)} />
                </div>
                <div class="form-group">
                    <label for="device-id">{"Device ID (optional)"}</label>
                    <input id="device-id" class="form-control" type="text"
                        value={(*device_id).clone()} oninput={utils::bind_input(&device_id)} />
                </div>
                <button class="btn btn-primary" type="submit">{"Sign In"}</button>
                if let Some(text) = (*message).clone() {
                    <div class="alert alert-danger">{text}</div>
                }
            </form>
            <p>
                <Link<Route> to={Route::ForgotPassword}>{"Forgot your password?"}</Link<Route>>
            </p>
        </div>
    }
}
