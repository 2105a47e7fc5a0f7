use error_stack::Report;

use kernel::interface::query::VehicleQuery;
use kernel::interface::update::VehicleModifier;
use kernel::prelude::entity::{
    DestructNewVehicle, NewVehicle, RentalStatus, UserId, Vehicle, VehicleId, Version,
    YearOfManufacture,
};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;

pub struct InMemoryVehicleRepository;

#[async_trait::async_trait]
impl VehicleQuery for InMemoryVehicleRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &VehicleId,
    ) -> error_stack::Result<Option<Vehicle>, KernelError> {
        Ok(con.staged.vehicles.get(id).cloned())
    }

    async fn find_available(
        &self,
        con: &mut InMemoryTransaction,
        oldest: &YearOfManufacture,
    ) -> error_stack::Result<Vec<Vehicle>, KernelError> {
        Ok(con
            .staged
            .vehicles
            .values()
            .filter(|v| !v.rental().is_rented() && v.year_of_manufacture() >= oldest)
            .cloned()
            .collect())
    }

    async fn has_active_rental(
        &self,
        con: &mut InMemoryTransaction,
        user_id: &UserId,
    ) -> error_stack::Result<bool, KernelError> {
        Ok(con
            .staged
            .vehicles
            .values()
            .any(|v| v.rental().rented_by() == Some(user_id)))
    }
}

#[async_trait::async_trait]
impl VehicleModifier for InMemoryVehicleRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        vehicle: &NewVehicle,
    ) -> error_stack::Result<VehicleId, KernelError> {
        let DestructNewVehicle {
            model,
            year_of_manufacture,
        } = vehicle.clone().into_destruct();
        con.staged.last_id += 1;
        let id = VehicleId::new(con.staged.last_id);
        let vehicle = Vehicle::new(
            id,
            model,
            year_of_manufacture,
            RentalStatus::Available,
            Version::initial(),
        );
        con.staged.vehicles.insert(id, vehicle);
        Ok(id)
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        vehicle: &Vehicle,
    ) -> error_stack::Result<(), KernelError> {
        let vehicles = &mut con.staged.vehicles;
        let Some(stored) = vehicles.get(vehicle.id()) else {
            return Err(Report::new(KernelError::Internal)
                .attach_printable(format!("No vehicle {}", vehicle.id().as_ref())));
        };
        if stored.version() != vehicle.version() {
            return Err(Report::new(KernelError::Concurrency).attach_printable(format!(
                "Vehicle {} is at version {}, not {}",
                vehicle.id().as_ref(),
                stored.version().as_ref(),
                vehicle.version().as_ref()
            )));
        }
        if let Some(user) = vehicle.rental().rented_by() {
            let taken = vehicles
                .values()
                .any(|other| other.id() != vehicle.id() && other.rental().rented_by() == Some(user));
            if taken {
                return Err(Report::new(KernelError::Concurrency)
                    .attach_printable("The user already has an active rental"));
            }
        }
        let updated = vehicle
            .clone()
            .reconstruct(|v| v.version = v.version.next());
        vehicles.insert(*vehicle.id(), updated);
        tracing::debug!("Updated vehicle {}", vehicle.id().as_ref());
        Ok(())
    }
}
