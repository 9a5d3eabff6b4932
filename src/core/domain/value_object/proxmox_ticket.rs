use crate::core::domain::error::ValidationError;
use std::time::{Duration, SystemTime};

/// A Proxmox authentication ticket, sent as the `PVEAuthCookie` cookie.
#[derive(Debug, Clone)]
pub struct ProxmoxTicket {
    value: String,
    issued_at: SystemTime,
}

impl ProxmoxTicket {
    /// Creates a new ticket without validation, stamped with the current time.
    pub(crate) fn new_unchecked(value: String) -> Self {
        Self {
            value,
            issued_at: SystemTime::now(),
        }
    }

    /// Returns the ticket value as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Checks if the ticket is older than `lifetime`.
    #[must_use]
    pub fn is_expired(&self, lifetime: Duration) -> bool {
        self.issued_at
            .elapsed()
            .map(|age| age > lifetime)
            .unwrap_or(true)
    }

    /// Formats the ticket as a cookie header value.
    #[must_use]
    pub fn as_cookie_header(&self) -> String {
        format!("PVEAuthCookie={}", self.value)
    }
}

/// Validates the format of a ticket string (`PVE:<user>@<realm>:<time>::<signature>`).
pub(crate) fn validate_ticket(ticket: &str) -> Result<(), ValidationError> {
    if ticket.is_empty() {
        return Err(ValidationError::Field {
            field: "ticket".to_string(),
            message: "Ticket cannot be empty".to_string(),
        });
    }
    let parts: Vec<&str> = ticket.split(':').collect();
    if parts.len() < 5 || parts[0] != "PVE" {
        return Err(ValidationError::Format(
            "Invalid ticket format: must start with 'PVE:' and have at least 5 parts".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_ticket() {
        assert!(validate_ticket("PVE:root@pam:4EEC61E2::sig").is_ok());
        assert!(validate_ticket("").is_err());
        assert!(validate_ticket("XYZ:root@pam:4EEC61E2::sig").is_err());
        assert!(validate_ticket("PVE:root@pam").is_err());
    }

    #[test]
    fn test_ticket_expiry_and_cookie() {
        let ticket = ProxmoxTicket::new_unchecked("PVE:root@pam:4EEC61E2::sig".to_string());
        assert!(!ticket.is_expired(Duration::from_secs(60)));
        assert_eq!(
            ticket.as_cookie_header(),
            "PVEAuthCookie=PVE:root@pam:4EEC61E2::sig"
        );
    }
}
