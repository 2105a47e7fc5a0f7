use kernel::prelude::entity::{DestructVehicle, Vehicle};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct VehicleDto {
    pub id: i32,
    pub model: String,
    pub year_of_manufacture: i32,
    pub is_rented: bool,
    pub rented_by: Option<String>,
}

impl From<Vehicle> for VehicleDto {
    fn from(value: Vehicle) -> Self {
        let DestructVehicle {
            id,
            model,
            year_of_manufacture,
            rental,
            ..
        } = value.into_destruct();
        Self {
            id: id.into(),
            model: model.into(),
            year_of_manufacture: year_of_manufacture.into(),
            is_rented: rental.is_rented(),
            rented_by: rental.rented_by().cloned().map(String::from),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateVehicleDto {
    pub model: String,
    pub year_of_manufacture: i32,
}

#[derive(Debug, Clone)]
pub struct RentVehicleDto {
    pub vehicle_id: i32,
    pub user_id: String,
}

#[derive(Debug, Clone)]
pub struct ReturnVehicleDto {
    pub vehicle_id: i32,
    pub user_id: String,
}
