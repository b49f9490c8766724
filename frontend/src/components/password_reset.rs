use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::Link;

use super::describe;
use crate::{request::ApiClient, utils, Route};

#[function_component(ForgotPassword)]
pub fn request_reset() -> Html {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::from_config);
    let email = use_state(String::new);
    let message = use_state(|| None::<String>);

    let onsubmit = {
        let email = email.clone();
        let message = message.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let api = api.clone();
            let email = (*email).clone();
            let message = message.clone();
            spawn_local(async move {
                let result = api.request_password_reset(&email).await;
                message.set(Some(describe(
                    result,
                    "If the address is registered, a reset link is on its way.",
                )));
            });
        })
    };

    html! {
        <div class="container">
            <h1 class="page-header">{"Reset Password"}</h1>
            <form {onsubmit}>
                <div class="form-group">
                    <label for="email">{"Email"}</label>
                    <input id="email" class="form-control" type="email" required=true
                        value={(*email).clone()} oninput={utils::bind_input(&email)} />
                </div>
                <button class="btn btn-primary" type="submit">{"Send reset link"}</button>
                if let Some(text) = (*message).clone() {
                    <div class="alert alert-info">{text}</div>
                }
            </form>
            <Link<Route> to={Route::Login}>{"Back to sign in"}</Link<Route>>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ResetProps {
    pub token: String,
}

#[function_component(ResetPassword)]
pub fn reset_password(props: &ResetProps) -> Html {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::from_config);
    let new_password = use_state(String::new);
    let message = use_state(|| None::<String>);

    let onsubmit = {
        let token = props.token.clone();
        let new_password = new_password.clone();
        let message = message.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let api = api.clone();
            let token = token.clone();
            let new_password = (*new_password).clone();
            let message = message.clone();
            spawn_local(async move {
                let result = api.reset_password(&token, &new_password).await;
                message.set(Some(describe(result, "Password changed, you can sign in now.")));
            });
        })
    };

    html! {
        <div class="container">
            <h1 class="page-header">{"Choose a New Password"}</h1>
            <form {onsubmit}>
                <div class="form-group">
                    <label for="new-password">{"New password"}</label>
                    <input id="new-password" class="form-control" type="password" required=true
                        value={(*new_password).clone()} oninput={utils::bind_input(&new_password)} />
                </div>
                <button class="btn btn-primary" type="submit">{"Reset password"}</button>
                if let Some(text) = (*message).clone() {
                    <div class="alert alert-info">{text}</div>
                }
            </form>
            <Link<Route> to={Route::Login}>{"Back to sign in"}</Link<Route>>
        </div>
    }
}
