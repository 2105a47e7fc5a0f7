use application::transfer::{CreateVehicleDto, RentVehicleDto, ReturnVehicleDto};
use serde::Deserialize;

use crate::controller::Intake;

/// `id`, `isRented` and `rentedBy` may be sent but are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    #[serde(default)]
    model: String,
    year_of_manufacture: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenterQuery {
    user_id: Option<String>,
}

#[derive(Debug)]
pub struct RentRequest {
    vehicle_id: i32,
    query: RenterQuery,
}

impl RentRequest {
    pub fn new(vehicle_id: i32, query: RenterQuery) -> Self {
        Self { vehicle_id, query }
    }
}

#[derive(Debug)]
pub struct ReturnRequest {
    vehicle_id: i32,
    query: RenterQuery,
}

impl ReturnRequest {
    pub fn new(vehicle_id: i32, query: RenterQuery) -> Self {
        Self { vehicle_id, query }
    }
}

pub struct Transformer;

impl Intake<CreateRequest> for Transformer {
    type To = CreateVehicleDto;
    fn emit(&self, input: CreateRequest) -> Self::To {
        CreateVehicleDto {
            model: input.model,
            year_of_manufacture: input.year_of_manufacture,
        }
    }
}

// A missing userId becomes blank and is rejected by the service like any blank id.
impl Intake<RentRequest> for Transformer {
    type To = RentVehicleDto;
    fn emit(&self, RentRequest { vehicle_id, query }: RentRequest) -> Self::To {
        RentVehicleDto {
            vehicle_id,
            user_id: query.user_id.unwrap_or_default(),
        }
    }
}

impl Intake<ReturnRequest> for Transformer {
    type To = ReturnVehicleDto;
    fn emit(&self, ReturnRequest { vehicle_id, query }: ReturnRequest) -> Self::To {
        ReturnVehicleDto {
            vehicle_id,
            user_id: query.user_id.unwrap_or_default(),
        }
    }
}
