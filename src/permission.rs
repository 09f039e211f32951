use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PermissionStatus {
    Authorized,
    NotDetermined,
    Denied,
    Restricted,
}

impl PermissionStatus {
    pub fn is_authorized(self) -> bool {
        self == PermissionStatus::Authorized
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PermissionStatus::Authorized => "authorized",
            PermissionStatus::NotDetermined => "not-determined",
            PermissionStatus::Denied => "denied",
            PermissionStatus::Restricted => "restricted",
        }
    }
}

/// Platform camera-permission prompt. May block while the dialog is shown.
pub trait PermissionProvider: Send + Sync + 'static {
    fn request_camera_permission(&self) -> PermissionStatus;
}

/// Always answers with the same status. Headless runs and tests use this.
#[derive(Debug, Clone, Copy)]
pub struct FixedPermission(pub PermissionStatus);

impl PermissionProvider for FixedPermission {
    fn request_camera_permission(&self) -> PermissionStatus {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_authorized_opens_the_camera() {
        assert!(PermissionStatus::Authorized.is_authorized());
        assert!(!PermissionStatus::NotDetermined.is_authorized());
        assert!(!PermissionStatus::Denied.is_authorized());
        assert!(!PermissionStatus::Restricted.is_authorized());
    }

    #[test]
    fn serialises_with_platform_names() {
        let json = serde_json::to_string(&PermissionStatus::NotDetermined).unwrap();
        assert_eq!(json, "\"not-determined\"");
        assert_eq!(PermissionStatus::Denied.as_str(), "denied");
    }
}
