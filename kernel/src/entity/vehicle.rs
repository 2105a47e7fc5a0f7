mod draft;
mod id;
mod model;
mod rental;
mod year;

pub use self::{draft::*, id::*, model::*, rental::*, year::*};

use destructure::Destructure;
use error_stack::Report;
use vodca::References;

use crate::entity::{UserId, Version};
use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Vehicle {
    id: VehicleId,
    model: VehicleModel,
    year_of_manufacture: YearOfManufacture,
    rental: RentalStatus,
    version: Version<Vehicle>,
}

impl Vehicle {
    pub fn new(
        id: VehicleId,
        model: VehicleModel,
        year_of_manufacture: YearOfManufacture,
        rental: RentalStatus,
        version: Version<Vehicle>,
    ) -> Self {
        Self {
            id,
            model,
            year_of_manufacture,
            rental,
            version,
        }
    }

    /// Hands the vehicle to `user`. Whether the user already holds another
    /// vehicle is a fleet-wide question and is answered by the caller.
    pub fn rent_to(self, user: UserId) -> error_stack::Result<Self, KernelError> {
        if let RentalStatus::Rented(current) = &self.rental {
            return Err(Report::new(KernelError::AlreadyRented).attach_printable(format!(
                "vehicle {} is rented by {}",
                self.id.as_ref(),
                current.as_ref()
            )));
        }
        Ok(self.reconstruct(|v| v.rental = RentalStatus::Rented(user)))
    }

    pub fn return_from(self, user: &UserId) -> error_stack::Result<Self, KernelError> {
        match &self.rental {
            RentalStatus::Available => Err(Report::new(KernelError::NotRented)
                .attach_printable(format!("vehicle {} is not rented", self.id.as_ref()))),
            RentalStatus::Rented(current) if current != user => {
                Err(Report::new(KernelError::NotRenter).attach_printable(format!(
                    "vehicle {} is rented by {}, not {}",
                    self.id.as_ref(),
                    current.as_ref(),
                    user.as_ref()
                )))
            }
            RentalStatus::Rented(_) => {
                Ok(self.reconstruct(|v| v.rental = RentalStatus::Available))
            }
        }
    }
}
