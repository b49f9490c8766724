use yew::prelude::*;
use yew_hooks::{use_effect_once, use_mount};
use yew_router::prelude::{use_navigator, Link};
use wasm_bindgen_futures::spawn_local;

use super::{alerts::Alerts, devices::Devices};
use crate::{
    dashboard::{self, DashboardAction, DashboardState, Phase},
    request::ApiClient,
    sse::AlertStream,
    utils, Route,
};

#[function_component(Dashboard)]
pub fn dashboard_page() -> Html {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::from_config);
    let state = use_reducer(DashboardState::default);
    let navigator = use_navigator();

    // session check, then devices
    {
        let api = api.clone();
        let dispatcher = state.dispatcher();
        let navigator = navigator.clone();
        use_mount(move || {
            spawn_local(async move {
                if let Some(devices) = dashboard::load(&api, &navigator).await {
                    dispatcher.dispatch(DashboardAction::Loaded(devices));
                }
            });
        });
    }

    // alert stream, owned by this mount
    {
        let api = api.clone();
        let dispatcher = state.dispatcher();
        use_effect_once(move || {
            let stream = open_alert_stream(api, dispatcher);
            move || drop(stream)
        });
    }

    let on_toggle = {
        let api = api.clone();
        let dispatcher = state.dispatcher();
        Callback::from(move |device_id: String| {
            let api = api.clone();
            let dispatcher = dispatcher.clone();
            spawn_local(async move {
                if let Some(devices) = dashboard::toggle(&api, &device_id).await {
                    dispatcher.dispatch(DashboardAction::DevicesRefreshed(devices));
                }
            });
        })
    };

    let on_sign_out = Callback::from(move |_: MouseEvent| {
        let api = api.clone();
        let navigator = navigator.clone();
        spawn_local(async move {
            dashboard::sign_out(&api, &navigator).await;
        });
    });

    if state.phase == Phase::Loading {
        return html! { <div class="loading text-center">{"Loading..."}</div> };
    }

    html! {
        <div class="dashboard">
            <nav class="navbar navbar-inverse">
                <div class="container-fluid">
                    <span class="navbar-brand">{"Smart Security Dashboard"}</span>
                    <div class="navbar-right">
                        <Link<Route> classes={classes!("btn", "btn-default", "navbar-btn")} to={Route::Account}>
                            {"Account"}
                        </Link<Route>>
                        <button class="btn btn-danger navbar-btn" onclick={on_sign_out}>{"Sign Out"}</button>
                    </div>
                </div>
            </nav>
            <div class="container-fluid">
                <div class="row">
                    <div class="col-md-6">
                        <Devices devices={state.devices.clone()} {on_toggle} />
                    </div>
                    <div class="col-md-6">
                        <Alerts alerts={state.alerts.clone()} />
                    </div>
                </div>
            </div>
            <footer class="footer text-center">
                {utils::footer_text(utils::current_year())}
            </footer>
        </div>
    }
}

fn open_alert_stream(
    api: ApiClient,
    dispatcher: UseReducerDispatcher<DashboardState>,
) -> Option<AlertStream> {
    let on_alert = dispatcher.clone();
    match api.alerts_sse(move |alert| on_alert.dispatch(DashboardAction::AlertReceived(alert))) {
        Ok(stream) => Some(stream),
        Err(err) => {
            log::warn!("{err}, polling alerts once instead");
            spawn_local(async move {
                let alerts = dashboard::poll_alerts(&api).await;
                dispatcher.dispatch(DashboardAction::AlertsPolled(alerts));
            });
            None
        }
    }
}
