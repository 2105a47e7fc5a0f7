mod vehicle;

pub use self::vehicle::*;

use application::service::{
    CreateVehicleService, GetAvailableVehicleService, RentVehicleService, ReturnVehicleService,
};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handler::{AppModule, Handler};

pub fn app<Db>(module: AppModule<Db>) -> Router
where
    Db: 'static + Sync + Send,
    Handler<Db>: CreateVehicleService
        + GetAvailableVehicleService
        + RentVehicleService
        + ReturnVehicleService,
{
    Router::new()
        .route_vehicle()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(module)
}
