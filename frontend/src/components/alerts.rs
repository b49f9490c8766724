use std::collections::VecDeque;

use common::req::Alert;
use yew::prelude::*;

use crate::utils;

#[derive(Properties, PartialEq)]
pub struct Props {
    /// newest first
    pub alerts: VecDeque<Alert>,
}

#[function_component(Alerts)]
pub fn alert_list(props: &Props) -> Html {
    let alert_list = props
        .alerts
        .iter()
        .map(|alert| {
            html! {
                <li class="list-group-item">
                    <span class="alert-message">{alert.message.clone()}</span>
                    <small class="text-muted alert-time">{utils::local_time(&alert.timestamp)}</small>
                </li>
            }
        })
        .collect::<Html>();

    html! {
        <div class="panel panel-default">
            <div class="panel-heading"><h3 class="panel-title">{"Real-Time Alerts"}</h3></div>
            <div class="panel-body">
                if props.alerts.is_empty() {
                    <p>{"No alerts yet."}</p>
                } else {
                    <ul class="list-group alert-feed">{alert_list}</ul>
                }
            </div>
        </div>
    }
}
