use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::DependOnVehicleQuery;
use kernel::interface::update::DependOnVehicleModifier;
use kernel::prelude::entity::{Vehicle, VehicleId};
use kernel::KernelError;

pub use self::vehicle::*;

mod vehicle;

/// Process-local store. Transactions are serialised: each one holds the
/// store lock until it is committed or dropped, and works on a staged copy.
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Default)]
pub(in crate::database) struct MemoryState {
    last_id: i32,
    vehicles: BTreeMap<VehicleId, Vehicle>,
}

#[async_trait::async_trait]
impl DatabaseConnection for InMemoryDatabase {
    type Transaction = InMemoryTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let guard = self.state.clone().lock_owned().await;
        let staged = guard.clone();
        Ok(InMemoryTransaction { guard, staged })
    }
}

impl DependOnVehicleQuery for InMemoryDatabase {
    type VehicleQuery = InMemoryVehicleRepository;
    fn vehicle_query(&self) -> &Self::VehicleQuery {
        &InMemoryVehicleRepository
    }
}

impl DependOnVehicleModifier for InMemoryDatabase {
    type VehicleModifier = InMemoryVehicleRepository;
    fn vehicle_modifier(&self) -> &Self::VehicleModifier {
        &InMemoryVehicleRepository
    }
}

pub struct InMemoryTransaction {
    guard: OwnedMutexGuard<MemoryState>,
    staged: MemoryState,
}

#[async_trait::async_trait]
impl Transaction for InMemoryTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        let Self { mut guard, staged } = self;
        *guard = staged;
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}
