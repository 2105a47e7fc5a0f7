use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Rejects identifiers that are empty or made only of whitespace.
    /// Whitespace-only ids are refused too, not just empty ones, since they
    /// cannot name a renter.
    pub fn parse(id: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(Report::new(KernelError::Validation)
                .attach_printable("The userId is required"));
        }
        Ok(Self(id))
    }
}

#[cfg(test)]
mod test {
    use crate::entity::UserId;
    use crate::KernelError;

    #[test]
    fn blank_user_id_is_rejected() {
        for raw in ["", "   ", "\t"] {
            let error = UserId::parse(raw).unwrap_err();
            assert_eq!(error.current_context(), &KernelError::Validation);
        }
        assert_eq!(UserId::parse("alice").unwrap(), UserId::new("alice"));
    }
}
