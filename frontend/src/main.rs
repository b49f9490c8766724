mod components;
mod config;
mod dashboard;
mod error;
mod request;
mod sse;
mod utils;

use log::info;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::request::ApiClient;

#[derive(Debug, Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/dashboard")]
    Dashboard,
    #[at("/account")]
    Account,
    #[at("/password-reset")]
    ForgotPassword,
    #[at("/password-reset/:token")]
    ResetPassword { token: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

struct Model {
    api: ApiClient,
}

impl Component for Model {
    type Message = ();
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        let api = ApiClient::from_config();
        info!("backend at {}", api.api_url(""));
        Self { api }
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <ContextProvider<ApiClient> context={self.api.clone()}>
                <BrowserRouter>
                    <Switch<Route> render={switch} />
                </BrowserRouter>
            </ContextProvider<ApiClient>>
        }
    }
}

#[function_component(PageLogin)]
pub fn page_login() -> Html {
    html! {
        <div class="container-fluid">
            <div class="row">
                <div class="col-sm-6 col-sm-offset-3 col-md-4 col-md-offset-4 main">
                    <components::login::Login />
                </div>
            </div>
        </div>
    }
}

#[function_component(PageNotFound)]
pub fn page_not_found() -> Html {
    html! {
        <div class="container">
            <h1 class="page-header">{"404"}</h1>
            <Link<Route> to={Route::Dashboard}>{"Go to the dashboard"}</Link<Route>>
        </div>
    }
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <Redirect<Route> to={Route::Dashboard} /> },
        Route::Login => html! { <PageLogin/> },
        Route::Dashboard => html! { <components::dashboard::Dashboard/> },
        Route::Account => html! { <components::account::Account/> },
        Route::ForgotPassword => html! { <components::password_reset::ForgotPassword/> },
        Route::ResetPassword { token } => {
            html! { <components::password_reset::ResetPassword {token} /> }
        }
        Route::NotFound => html! { <PageNotFound/> },
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<Model>::new().render();
}
