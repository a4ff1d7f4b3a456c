// SPDX-License-Identifier: GPL-3.0-only

//! XDG desktop portal camera access
//!
//! Uses `org.freedesktop.portal.Camera` over the session bus. `AccessCamera`
//! answers asynchronously through a `Request` object, so the `Response` signal
//! is subscribed before the call is made.

use super::types::PermissionStatus;
use crate::errors::PermissionError;
use futures::StreamExt;
use std::collections::HashMap;
use tracing::{debug, info, warn};
use zbus::zvariant::{OwnedValue, Value};

const PORTAL_DESTINATION: &str = "org.freedesktop.portal.Desktop";
const PORTAL_PATH: &str = "/org/freedesktop/portal/desktop";
const CAMERA_INTERFACE: &str = "org.freedesktop.portal.Camera";
const REQUEST_INTERFACE: &str = "org.freedesktop.portal.Request";

/// Map a portal `Response` code to a permission status
///
/// 0 is success; 1 (cancelled by the user) and 2 (other failure) both mean no access.
pub fn permission_from_response(code: u32) -> PermissionStatus {
    match code {
        0 => PermissionStatus::Granted,
        _ => PermissionStatus::Denied,
    }
}

/// Object path of the request the portal creates for `token`
pub fn request_path(unique_name: &str, token: &str) -> String {
    let sender = unique_name.trim_start_matches(':').replace('.', "_");
    format!("{}/request/{}/{}", PORTAL_PATH, sender, token)
}

/// Wrap a D-Bus failure as an unreachable portal
fn unavailable<E: std::fmt::Display>(
    context: &'static str,
) -> impl FnOnce(E) -> PermissionError {
    move |e| PermissionError::PortalUnavailable(format!("{}: {}", context, e))
}

async fn session_bus() -> Result<zbus::Connection, PermissionError> {
    zbus::Connection::session()
        .await
        .map_err(unavailable("Failed to connect to session D-Bus"))
}

async fn camera_proxy(
    connection: &zbus::Connection,
) -> Result<zbus::Proxy<'static>, PermissionError> {
    zbus::Proxy::new(
        connection,
        PORTAL_DESTINATION,
        PORTAL_PATH,
        CAMERA_INTERFACE,
    )
    .await
    .map_err(unavailable("Failed to create camera portal proxy"))
}

/// Whether the portal reports any camera at all
pub async fn is_camera_present() -> Result<bool, PermissionError> {
    let connection = session_bus().await?;
    let proxy = camera_proxy(&connection).await?;
    proxy
        .get_property::<bool>("IsCameraPresent")
        .await
        .map_err(unavailable("Failed to read IsCameraPresent"))
}

/// Ask the portal for camera access and wait for the user's answer
pub async fn request_camera_access() -> Result<PermissionStatus, PermissionError> {
    let connection = session_bus().await?;
    let proxy = camera_proxy(&connection).await?;

    let unique_name = connection
        .unique_name()
        .map(|name| name.to_string())
        .ok_or_else(|| {
            PermissionError::PortalUnavailable("D-Bus connection has no unique name".to_string())
        })?;
    let token = format!("snapcam_{}", uuid::Uuid::new_v4().simple());
    let path = request_path(&unique_name, &token);

    let request = zbus::Proxy::new(
        &connection,
        PORTAL_DESTINATION,
        path.clone(),
        REQUEST_INTERFACE,
    )
    .await
    .map_err(unavailable("Failed to create request proxy"))?;
    let mut responses = request
        .receive_signal("Response")
        .await
        .map_err(unavailable("Failed to subscribe to portal response"))?;

    let mut options: HashMap<&str, Value> = HashMap::new();
    options.insert("handle_token", Value::new(token.as_str()));

    info!(request = %path, "Requesting camera access from portal");
    let handle: zbus::zvariant::OwnedObjectPath = proxy
        .call("AccessCamera", &(options,))
        .await
        .map_err(unavailable("AccessCamera failed"))?;
    if handle.as_str() != path {
        // Older portals return a different handle; the signal still arrives on ours
        debug!(handle = %handle, expected = %path, "Portal returned unexpected request path");
    }

    let Some(message) = responses.next().await else {
        return Err(PermissionError::PortalUnavailable(
            "Portal closed the request without a response".to_string(),
        ));
    };
    let (code, _results) = message
        .body()
        .deserialize::<(u32, HashMap<String, OwnedValue>)>()
        .map_err(unavailable("Malformed portal response"))?;

    let status = permission_from_response(code);
    if status.is_granted() {
        info!("Camera access granted by portal");
    } else {
        warn!(code, "Camera access denied by portal");
    }
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_codes() {
        assert_eq!(permission_from_response(0), PermissionStatus::Granted);
        assert_eq!(permission_from_response(1), PermissionStatus::Denied);
        assert_eq!(permission_from_response(2), PermissionStatus::Denied);
    }

    #[test]
    fn test_unavailable_keeps_context() {
        let err = unavailable("AccessCamera failed")("no such interface");
        assert!(matches!(
            &err,
            PermissionError::PortalUnavailable(msg) if msg == "AccessCamera failed: no such interface"
        ));
    }

    #[test]
    fn test_request_path_escapes_unique_name() {
        assert_eq!(
            request_path(":1.42", "snapcam_abc"),
            "/org/freedesktop/portal/desktop/request/1_42/snapcam_abc"
        );
    }
}
