mod request;
mod response;

use application::service::{
    CreateVehicleService, GetAvailableVehicleService, RentVehicleService, ReturnVehicleService,
};
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::WithRejection;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::{AppModule, Handler};
use crate::route::vehicle::request::{
    CreateRequest, RenterQuery, RentRequest, ReturnRequest, Transformer,
};
use crate::route::vehicle::response::{Presenter, RentPresenter, ReturnPresenter};

pub trait VehicleRouter {
    fn route_vehicle(self) -> Self;
}

impl<Db> VehicleRouter for Router<AppModule<Db>>
where
    Db: 'static + Sync + Send,
    Handler<Db>: CreateVehicleService
        + GetAvailableVehicleService
        + RentVehicleService
        + ReturnVehicleService,
{
    fn route_vehicle(self) -> Self {
        self.route(
            "/vehicles",
            post(
                |State(module): State<AppModule<Db>>,
                 WithRejection(Json(req), _): WithRejection<Json<CreateRequest>, ErrorStatus>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| async move { module.create_vehicle(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/vehicles/available",
            get(|State(module): State<AppModule<Db>>| async move {
                Controller::new((), Presenter)
                    .bypass(|| async move { module.get_available_vehicles().await })
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
        .route(
            "/vehicles/:vehicle_id/rent",
            post(
                |State(module): State<AppModule<Db>>,
                 WithRejection(Path(vehicle_id), _): WithRejection<Path<i32>, ErrorStatus>,
                 WithRejection(Query(query), _): WithRejection<Query<RenterQuery>, ErrorStatus>| async move {
                    Controller::new(Transformer, RentPresenter)
                        .intake(RentRequest::new(vehicle_id, query))
                        .handle(|dto| async move { module.rent_vehicle(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/vehicles/:vehicle_id/return",
            post(
                |State(module): State<AppModule<Db>>,
                 WithRejection(Path(vehicle_id), _): WithRejection<Path<i32>, ErrorStatus>,
                 WithRejection(Query(query), _): WithRejection<Query<RenterQuery>, ErrorStatus>| async move {
                    Controller::new(Transformer, ReturnPresenter)
                        .intake(ReturnRequest::new(vehicle_id, query))
                        .handle(|dto| async move { module.return_vehicle(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
