use crate::modules::error::TourResult;
use crate::modules::storage::PersistentStore;
use crate::modules::utils::logging::log_auth_event;

/// Who is at the keyboard. Passed into and returned from every menu turn.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Anonymous,
    /// Always names a record that exists in the store
    Authenticated(String),
}

impl Session {
    pub fn username(&self) -> Option<&str> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated(username) => Some(username),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }

    /// Anonymous -> Authenticated on valid credentials; any failure leaves
    /// the caller's session untouched
    pub fn login(db: &PersistentStore, username: &str, password: &str) -> TourResult<Session> {
        let record = db.authenticate(username, password)?;
        Ok(Session::Authenticated(record.username.clone()))
    }

    /// Authenticated -> Anonymous
    pub fn logout(self) -> Session {
        if let Session::Authenticated(username) = &self {
            log_auth_event("logout", username, true, None);
        }
        Session::Anonymous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::store::UserStore;
    use crate::modules::error::TourError;

    fn db_with_alice() -> PersistentStore {
        let mut store = UserStore::new();
        store.register("alice", "pw1").unwrap();
        // Never saved in these tests, the path is never written
        PersistentStore::new(store, "unused.jsonl")
    }

    #[test]
    fn test_initial_state() {
        let session = Session::default();
        assert_eq!(session, Session::Anonymous);
        assert!(!session.is_authenticated());
        assert_eq!(session.username(), None);
    }

    #[test]
    fn test_login_and_logout() {
        let db = db_with_alice();
        let session = Session::login(&db, "alice", "pw1").unwrap();
        assert_eq!(session, Session::Authenticated("alice".to_string()));
        assert_eq!(session.username(), Some("alice"));

        assert_eq!(session.logout(), Session::Anonymous);
        assert_eq!(Session::Anonymous.logout(), Session::Anonymous);
    }

    #[test]
    fn test_failed_logins_are_distinct() {
        let db = db_with_alice();
        assert!(matches!(
            Session::login(&db, "alice", "nope"),
            Err(TourError::WrongPassword)
        ));
        assert!(matches!(
            Session::login(&db, "mallory", "pw1"),
            Err(TourError::UserNotFound(_))
        ));
    }
}
