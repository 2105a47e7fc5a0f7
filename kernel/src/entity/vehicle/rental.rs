use error_stack::Report;

use crate::entity::UserId;
use crate::KernelError;

/// Whether a vehicle is in the fleet or out with a renter. A renter exists
/// exactly when the vehicle is rented.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub enum RentalStatus {
    #[default]
    Available,
    Rented(UserId),
}

impl RentalStatus {
    /// Rebuilds the status from the persisted `is_rented`/`rented_by` pair.
    pub fn from_parts(
        is_rented: bool,
        rented_by: Option<String>,
    ) -> error_stack::Result<Self, KernelError> {
        match (is_rented, rented_by) {
            (false, None) => Ok(Self::Available),
            (true, Some(user)) => Ok(Self::Rented(UserId::new(user))),
            (is_rented, rented_by) => Err(Report::new(KernelError::Internal).attach_printable(
                format!("Inconsistent rental state: is_rented={is_rented}, rented_by={rented_by:?}"),
            )),
        }
    }

    pub fn is_rented(&self) -> bool {
        matches!(self, Self::Rented(_))
    }

    pub fn rented_by(&self) -> Option<&UserId> {
        match self {
            Self::Available => None,
            Self::Rented(user) => Some(user),
        }
    }
}
