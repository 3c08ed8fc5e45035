use super::store::UserRecord;
use crate::modules::error::{TourError, TourResult};

/// Usernames are the record key and the first field of every line, so they
/// must be present and free of whitespace
pub fn validate_username(username: &str) -> TourResult<()> {
    if username.is_empty() || username.chars().any(char::is_whitespace) {
        return Err(TourError::InvalidUsername);
    }
    Ok(())
}

/// Function to validate a password; only presence is required
pub fn validate_password(password: &str) -> TourResult<()> {
    if password.is_empty() {
        return Err(TourError::EmptyPassword);
    }
    Ok(())
}

impl UserRecord {
    /// Replace the password once the current one has been confirmed
    pub fn change_password(&mut self, current: &str, new_password: &str) -> TourResult<()> {
        if self.password != current {
            return Err(TourError::WrongPassword);
        }
        validate_password(new_password)?;
        self.password = new_password.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_validation() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("a.l-i_c3").is_ok());
        assert!(matches!(validate_username(""), Err(TourError::InvalidUsername)));
        assert!(matches!(validate_username("al ice"), Err(TourError::InvalidUsername)));
        assert!(matches!(validate_username("alice\t"), Err(TourError::InvalidUsername)));
    }

    #[test]
    fn test_password_validation() {
        // Spaces are allowed, the legacy program read passwords as whole lines
        assert!(validate_password("open sesame").is_ok());
        assert!(matches!(validate_password(""), Err(TourError::EmptyPassword)));
    }

    #[test]
    fn test_password_change() {
        let mut record = UserRecord::new("alice", "pw1");

        assert!(matches!(
            record.change_password("wrong", "pw2"),
            Err(TourError::WrongPassword)
        ));
        assert_eq!(record.password, "pw1");

        assert!(matches!(
            record.change_password("pw1", ""),
            Err(TourError::EmptyPassword)
        ));
        assert_eq!(record.password, "pw1");

        record.change_password("pw1", "pw2").unwrap();
        assert_eq!(record.password, "pw2");
    }
}
