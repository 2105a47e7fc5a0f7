use application::transfer::VehicleDto;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::prelude::entity::VehicleId;
use serde::Serialize;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    message: &'static str,
    id: VehicleId,
}

impl IntoResponse for CreatedResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, axum::Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    message: &'static str,
}

impl IntoResponse for MessageResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, axum::Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleResponse {
    id: i32,
    model: String,
    year_of_manufacture: i32,
    is_rented: bool,
    rented_by: Option<String>,
}

impl From<VehicleDto> for VehicleResponse {
    fn from(value: VehicleDto) -> Self {
        let VehicleDto {
            id,
            model,
            year_of_manufacture,
            is_rented,
            rented_by,
        } = value;
        Self {
            id,
            model,
            year_of_manufacture,
            is_rented,
            rented_by,
        }
    }
}

pub struct Presenter;

impl Exhaust<VehicleId> for Presenter {
    type To = CreatedResponse;
    fn emit(&self, input: VehicleId) -> Self::To {
        CreatedResponse {
            message: "Vehicle created",
            id: input,
        }
    }
}

impl Exhaust<Vec<VehicleDto>> for Presenter {
    type To = axum::Json<Vec<VehicleResponse>>;
    fn emit(&self, input: Vec<VehicleDto>) -> Self::To {
        axum::Json::from(
            input
                .into_iter()
                .map(VehicleResponse::from)
                .collect::<Vec<_>>(),
        )
    }
}

pub struct RentPresenter;

impl Exhaust<()> for RentPresenter {
    type To = MessageResponse;
    fn emit(&self, _: ()) -> Self::To {
        MessageResponse {
            message: "Vehicle rented",
        }
    }
}

pub struct ReturnPresenter;

impl Exhaust<()> for ReturnPresenter {
    type To = MessageResponse;
    fn emit(&self, _: ()) -> Self::To {
        MessageResponse {
            message: "Vehicle returned",
        }
    }
}
