use common::req::Device;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub devices: Vec<Device>,
    /// emits the device id
    pub on_toggle: Callback<String>,
}

#[function_component(Devices)]
pub fn device_list(props: &Props) -> Html {
    let device_list = props
        .devices
        .iter()
        .map(|dev| {
            let onclick = {
                let on_toggle = props.on_toggle.clone();
                let device_id = dev.id.clone();
                Callback::from(move |_: MouseEvent| on_toggle.emit(device_id.clone()))
            };
            let status_class = if dev.is_active() {
                "text-success"
            } else {
                "text-danger"
            };

            html! {
                <li key={dev.id.clone()} class="list-group-item device-row">
                    <span>
                        <strong>{dev.name.clone()}</strong>{" - "}
                        <span class={status_class}>{dev.status.clone()}</span>
                    </span>
                    <button class="btn btn-primary btn-xs pull-right" {onclick}>{"Toggle"}</button>
                </li>
            }
        })
        .collect::<Html>();

    html! {
        <div class="panel panel-default">
            <div class="panel-heading"><h3 class="panel-title">{"Devices"}</h3></div>
            <div class="panel-body">
                if props.devices.is_empty() {
                    <p>{"No devices found."}</p>
                } else {
                    <ul class="list-group">{device_list}</ul>
                }
            </div>
        </div>
    }
}
