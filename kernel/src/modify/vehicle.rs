use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{NewVehicle, Vehicle, VehicleId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait VehicleModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        vehicle: &NewVehicle,
    ) -> error_stack::Result<VehicleId, KernelError>;

    /// Replaces the stored record only if it is still at `vehicle.version()`,
    /// bumping the stored version. A missing id is `Internal`, a stale version
    /// or a second active rental for the same user is `Concurrency`.
    async fn update(
        &self,
        con: &mut Self::Transaction,
        vehicle: &Vehicle,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnVehicleModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type VehicleModifier: VehicleModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn vehicle_modifier(&self) -> &Self::VehicleModifier;
}
