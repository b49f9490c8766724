// keep in sync with the backend's JSON contract

/// Status string the dashboard treats as "armed / online".
pub const STATUS_ACTIVE: &str = "active";

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Device {
    pub id: String, // unique, key
    pub name: String,
    pub status: String, // opaque, see STATUS_ACTIVE
}

impl Device {
    pub fn is_active(&self) -> bool {
        self.status == STATUS_ACTIVE
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Alert {
    pub id: String,
    pub message: String,
    pub timestamp: String, // RFC 3339 as sent by the backend
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct EmailUpdate {
    pub email: String,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct PasswordUpdate {
    pub password: String,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct PhoneUpdate {
    pub phone: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceAction {
    Toggle,
}

#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceStatusChange {
    pub device_id: String,
    pub action: DeviceAction,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordReset {
    pub token: String,
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn login_omits_missing_device_id() {
        let body = LoginRequest {
            email: "a@b.c".to_owned(),
            password: "hunter2".to_owned(),
            device_id: None,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "email": "a@b.c", "password": "hunter2" })
        );

        let body = LoginRequest {
            device_id: Some("panel-1".to_owned()),
            ..body
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap()["device_id"],
            json!("panel-1")
        );
    }

    #[test]
    fn status_change_uses_camel_case() {
        let body = DeviceStatusChange {
            device_id: "42".to_owned(),
            action: DeviceAction::Toggle,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "deviceId": "42", "action": "toggle" })
        );
    }

    #[test]
    fn reset_uses_new_password_key() {
        let body = PasswordReset {
            token: "t0k".to_owned(),
            new_password: "s3cret".to_owned(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "token": "t0k", "newPassword": "s3cret" })
        );
    }

    #[test]
    fn only_literal_active_is_active() {
        let mut dev: Device =
            serde_json::from_value(json!({ "id": "1", "name": "Door", "status": "active" }))
                .unwrap();
        assert!(dev.is_active());
        dev.status = "Active".to_owned();
        assert!(!dev.is_active());
        dev.status = "inactive".to_owned();
        assert!(!dev.is_active());
    }

    #[test]
    fn alert_rejects_missing_fields() {
        assert!(serde_json::from_value::<Alert>(json!({ "id": "1", "message": "x" })).is_err());
    }
}
