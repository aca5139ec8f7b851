//! Persisted session in localStorage

use shared::{AuthError, Session};
use web_sys::Storage;

fn local_storage() -> Result<Storage, AuthError> {
    web_sys::window()
        .ok_or_else(|| AuthError::Storage("no global window".to_string()))?
        .local_storage()
        .map_err(|e| AuthError::Storage(format!("{:?}", e)))?
        .ok_or_else(|| AuthError::Storage("localStorage disabled".to_string()))
}

/// Log a storage failure that has no caller to report to
fn warn_on_failure<E: std::fmt::Debug>(action: &str, result: Result<(), E>) {
    if let Err(e) = result {
        log::warn!("Failed to {}: {:?}", action, e);
    }
}

/// Parse a stored session, ignoring anything that is not one
pub fn decode_session(raw: &str) -> Option<Session> {
    match serde_json::from_str(raw) {
        Ok(session) => Some(session),
        Err(e) => {
            log::warn!("Ignoring unreadable stored session: {}", e);
            None
        }
    }
}

/// Load the stored session. A corrupt entry is removed and treated as absent.
pub fn load_session(key: &str) -> Result<Option<Session>, AuthError> {
    let storage = local_storage()?;
    let Some(raw) = storage
        .get_item(key)
        .map_err(|e| AuthError::Storage(format!("{:?}", e)))?
    else {
        return Ok(None);
    };

    let session = decode_session(&raw);
    if session.is_none() {
        warn_on_failure("remove unreadable stored session", storage.remove_item(key));
    }
    Ok(session)
}

pub fn save_session(key: &str, session: &Session) -> Result<(), AuthError> {
    let json = serde_json::to_string(session)?;
    local_storage()?
        .set_item(key, &json)
        .map_err(|e| AuthError::Storage(format!("{:?}", e)))
}

pub fn clear_session(key: &str) -> Result<(), AuthError> {
    local_storage()?
        .remove_item(key)
        .map_err(|e| AuthError::Storage(format!("{:?}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_log;
    use log::Level;

    #[test]
    fn test_decode_session() {
        let raw = r#"{"access_token":"t","user":{"id":"u1","email":"a@b.com"}}"#;
        let session = decode_session(raw).unwrap();
        assert_eq!(session.user.id, "u1");
        assert_eq!(session.expires_at, None);

        assert!(decode_session("not json").is_none());
        assert!(decode_session(r#"{"access_token":"t"}"#).is_none());
    }

    #[test]
    fn test_storage_failure_is_logged() {
        test_log::start();

        warn_on_failure("remove unreadable stored session", Err("QuotaExceededError"));
        warn_on_failure::<&str>("remove unreadable stored session", Ok(()));

        assert_eq!(
            test_log::messages(Level::Warn),
            vec!["Failed to remove unreadable stored session: \"QuotaExceededError\"".to_string()]
        );
    }
}
