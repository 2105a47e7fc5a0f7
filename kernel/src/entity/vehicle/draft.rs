use destructure::Destructure;
use vodca::References;

use crate::entity::{VehicleModel, YearOfManufacture};

/// A vehicle that has not been stored yet and so has no id.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct NewVehicle {
    model: VehicleModel,
    year_of_manufacture: YearOfManufacture,
}

impl NewVehicle {
    pub fn new(model: VehicleModel, year_of_manufacture: YearOfManufacture) -> Self {
        Self {
            model,
            year_of_manufacture,
        }
    }
}
