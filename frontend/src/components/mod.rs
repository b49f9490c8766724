pub mod account;
pub mod alerts;
pub mod dashboard;
pub mod devices;
pub mod login;
pub mod password_reset;

use yew_router::prelude::Navigator;

use crate::{dashboard::Navigate, error::Result, request::Reply, Route};

impl Navigate for Option<Navigator> {
    fn to_login(&self) {
        match self {
            Some(navigator) => navigator.push(&Route::Login),
            None => log::warn!("no router in scope, cannot redirect to login"),
        }
    }
}

/// Text shown under a form after the backend answered.
pub(crate) fn describe(result: Result<Reply>, success: &str) -> String {
    match result {
        Ok(reply) => match reply.message() {
            Some(message) => message.to_owned(),
            None if reply.is_success() => success.to_owned(),
            None => format!("Request failed ({}).", reply.status),
        },
        Err(err) => {
            log::warn!("request failed: {err}");
            "Cannot reach the server.".to_owned()
        }
    }
}
