use crate::validation::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything on the settings screen
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Settings {
    pub profile: Profile,
    pub notifications: NotificationSettings,
    pub system: SystemSettings,
    pub security: SecuritySettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub role: String,
    pub phone: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Administrator".to_string(),
            email: "admin@quasartstyle.com".to_string(),
            role: "Founder".to_string(),
            phone: "+34 666 777 888".to_string(),
        }
    }
}

/// Which channels and topics the shop wants to hear about
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub email_notifications: bool,
    pub push_notifications: bool,
    pub stock_alerts: bool,
    pub sales_notifications: bool,
    pub weekly_reports: bool,
    pub system_updates: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_notifications: true,
            push_notifications: true,
            stock_alerts: true,
            sales_notifications: true,
            weekly_reports: true,
            system_updates: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SystemSettings {
    pub currency: String,
    pub language: String,
    pub timezone: String,
    pub date_format: String,
    pub dark_mode: bool,
    pub compact_view: bool,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            currency: "EUR".to_string(),
            language: "es".to_string(),
            timezone: "Europe/Madrid".to_string(),
            date_format: "DD/MM/YYYY".to_string(),
            dark_mode: false,
            compact_view: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SecuritySettings {
    pub two_factor_enabled: bool,
    /// Minutes
    pub session_timeout: u32,
    pub login_alerts: bool,
    pub data_export_enabled: bool,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            two_factor_enabled: false,
            session_timeout: 30,
            login_alerts: true,
            data_export_enabled: true,
        }
    }
}

/// Backup file layout: `{exportDate, profile, settings: {...}}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SettingsSnapshot {
    #[serde(with = "iso_millis")]
    pub export_date: DateTime<Utc>,
    pub profile: Profile,
    pub settings: SettingsGroups,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SettingsGroups {
    pub notifications: NotificationSettings,
    pub system: SystemSettings,
    pub security: SecuritySettings,
}

impl Settings {
    pub fn snapshot(&self, at: DateTime<Utc>) -> SettingsSnapshot {
        SettingsSnapshot {
            export_date: at,
            profile: self.profile.clone(),
            settings: SettingsGroups {
                notifications: self.notifications.clone(),
                system: self.system.clone(),
                security: self.security.clone(),
            },
        }
    }
}

/// `2024-01-25T10:00:00.000Z`: RFC 3339 with milliseconds, always UTC `Z`
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|at| at.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

/// Password change request. Never serialized.
#[derive(Debug, Clone, Default)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordChange {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.current_password.is_empty() {
            return Err(ValidationError::MissingField("current password"));
        }
        if self.new_password.is_empty() {
            return Err(ValidationError::MissingField("new password"));
        }
        if self.new_password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.system.currency, "EUR");
        assert_eq!(settings.security.session_timeout, 30);
        assert!(!settings.notifications.system_updates);
    }

    #[test]
    fn test_snapshot_shape() {
        let at = Utc.with_ymd_and_hms(2024, 1, 25, 10, 0, 0).unwrap();
        let json = serde_json::to_value(Settings::default().snapshot(at)).unwrap();

        assert_eq!(json["exportDate"], "2024-01-25T10:00:00.000Z");
        assert_eq!(json["profile"]["email"], "admin@quasartstyle.com");
        assert_eq!(json["settings"]["notifications"]["stockAlerts"], true);
        assert_eq!(json["settings"]["system"]["dateFormat"], "DD/MM/YYYY");
        assert_eq!(json["settings"]["security"]["twoFactorEnabled"], false);
        assert!(json["profile"].get("newPassword").is_none());
    }

    #[test]
    fn test_snapshot_reads_back_millisecond_dates() {
        let raw = r#"{
            "exportDate": "2024-01-25T10:00:00.123Z",
            "profile": {"name": "Administrator", "email": "admin@quasartstyle.com",
                        "role": "Founder", "phone": "+34 666 777 888"},
            "settings": {
                "notifications": {"emailNotifications": true, "pushNotifications": true,
                                  "stockAlerts": true, "salesNotifications": true,
                                  "weeklyReports": true, "systemUpdates": false},
                "system": {"currency": "EUR", "language": "es", "timezone": "Europe/Madrid",
                           "dateFormat": "DD/MM/YYYY", "darkMode": false, "compactView": false},
                "security": {"twoFactorEnabled": false, "sessionTimeout": 30,
                             "loginAlerts": true, "dataExportEnabled": true}
            }
        }"#;

        let snapshot: SettingsSnapshot = serde_json::from_str(raw).unwrap();
        assert_eq!(snapshot.export_date.timestamp_subsec_millis(), 123);
        assert_eq!(snapshot.settings.system.timezone, "Europe/Madrid");
    }

    #[test]
    fn test_password_change() {
        let mut change = PasswordChange {
            current_password: "old".to_string(),
            new_password: "new-secret".to_string(),
            confirm_password: "new-secret".to_string(),
        };
        assert!(change.validate().is_ok());

        change.confirm_password = "typo".to_string();
        assert_eq!(change.validate(), Err(ValidationError::PasswordMismatch));

        change.current_password.clear();
        assert_eq!(
            change.validate(),
            Err(ValidationError::MissingField("current password"))
        );
    }
}
