use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{UserId, Vehicle, VehicleId, YearOfManufacture};
use crate::KernelError;

#[async_trait::async_trait]
pub trait VehicleQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &VehicleId,
    ) -> error_stack::Result<Option<Vehicle>, KernelError>;

    /// Vehicles that are not rented and were built in `oldest` or later, by id.
    async fn find_available(
        &self,
        con: &mut Self::Transaction,
        oldest: &YearOfManufacture,
    ) -> error_stack::Result<Vec<Vehicle>, KernelError>;

    async fn has_active_rental(
        &self,
        con: &mut Self::Transaction,
        user_id: &UserId,
    ) -> error_stack::Result<bool, KernelError>;
}

pub trait DependOnVehicleQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type VehicleQuery: VehicleQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn vehicle_query(&self) -> &Self::VehicleQuery;
}
