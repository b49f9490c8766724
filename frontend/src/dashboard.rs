//! Data flow behind the dashboard page.
//!
//! The page component only wires these functions to hooks; everything that
//! decides which request fires when lives here so it can run against a fake
//! backend.

use std::{collections::VecDeque, rc::Rc};

use anyhow::Result;
use async_trait::async_trait;
use common::req::{Alert, Device, DeviceAction};
use yew::functional::Reducible;

use crate::request::ApiClient;

/// What the dashboard needs from the backend.
#[async_trait(?Send)]
pub trait Backend {
    /// `Ok(true)` while the session cookie still identifies a user.
    async fn session_valid(&self) -> Result<bool>;
    async fn devices(&self) -> Result<Vec<Device>>;
    async fn toggle_device(&self, device_id: &str) -> Result<()>;
    async fn alerts(&self) -> Result<Vec<Alert>>;
    async fn logout(&self) -> Result<()>;
}

#[async_trait(?Send)]
impl Backend for ApiClient {
    async fn session_valid(&self) -> Result<bool> {
        Ok(self.session_status().await?.is_success())
    }

    async fn devices(&self) -> Result<Vec<Device>> {
        Ok(self.device_info().await?.parse()?)
    }

    async fn toggle_device(&self, device_id: &str) -> Result<()> {
        self.set_device_status(device_id, DeviceAction::Toggle)
            .await?;
        Ok(())
    }

    async fn alerts(&self) -> Result<Vec<Alert>> {
        Ok(ApiClient::alerts(self).await?.parse()?)
    }

    async fn logout(&self) -> Result<()> {
        ApiClient::logout(self).await?;
        Ok(())
    }
}

/// Sends the user back to the login page.
pub trait Navigate {
    fn to_login(&self);
}

/// Session check, then device list. `None` means the user was redirected and
/// the device list was never requested.
pub async fn load(backend: &impl Backend, nav: &impl Navigate) -> Option<Vec<Device>> {
    match backend.session_valid().await {
        Ok(true) => {}
        Ok(false) => {
            log::info!("session rejected, redirecting to login");
            nav.to_login();
            return None;
        }
        Err(err) => {
            log::warn!("session check failed: {err:#}");
            nav.to_login();
            return None;
        }
    }

    match backend.devices().await {
        Ok(devices) => Some(devices),
        Err(err) => {
            log::warn!("device list unavailable: {err:#}");
            Some(Vec::new())
        }
    }
}

/// Fires the toggle, then refetches the list whatever the toggle returned.
/// `None` keeps the list on screen when the refetch fails.
pub async fn toggle(backend: &impl Backend, device_id: &str) -> Option<Vec<Device>> {
    if let Err(err) = backend.toggle_device(device_id).await {
        log::warn!("toggle of {device_id} failed: {err:#}");
    }
    match backend.devices().await {
        Ok(devices) => Some(devices),
        Err(err) => {
            log::warn!("device refresh failed: {err:#}");
            None
        }
    }
}

pub async fn sign_out(backend: &impl Backend, nav: &impl Navigate) {
    if let Err(err) = backend.logout().await {
        log::warn!("logout failed: {err:#}");
    }
    nav.to_login();
}

/// One-shot alert fetch, used when the push stream cannot be opened.
pub async fn poll_alerts(backend: &impl Backend) -> Vec<Alert> {
    backend.alerts().await.unwrap_or_else(|err| {
        log::warn!("alert poll failed: {err:#}");
        Vec::new()
    })
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Loading,
    Ready,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct DashboardState {
    pub phase: Phase,
    pub devices: Vec<Device>,
    /// newest first
    pub alerts: VecDeque<Alert>,
}

#[derive(Debug)]
pub enum DashboardAction {
    Loaded(Vec<Device>),
    DevicesRefreshed(Vec<Device>),
    AlertReceived(Alert),
    AlertsPolled(Vec<Alert>),
}

impl DashboardState {
    pub fn apply(&mut self, action: DashboardAction) {
        match action {
            DashboardAction::Loaded(devices) => {
                self.devices = devices;
                self.phase = Phase::Ready;
            }
            DashboardAction::DevicesRefreshed(devices) => self.devices = devices,
            DashboardAction::AlertReceived(alert) => self.alerts.push_front(alert),
            DashboardAction::AlertsPolled(alerts) => self.alerts.extend(alerts),
        }
    }
}

impl Reducible for DashboardState {
    type Action = DashboardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        next.into()
    }
}
