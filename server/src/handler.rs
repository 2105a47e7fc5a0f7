use std::ops::Deref;
use std::sync::Arc;

use driver::database::{InMemoryDatabase, PostgresDatabase};
use kernel::interface::clock::{DependOnClock, SystemClock};
use kernel::interface::database::DatabaseConnection;
use kernel::interface::query::DependOnVehicleQuery;
use kernel::interface::update::DependOnVehicleModifier;
use kernel::KernelError;

pub struct AppModule<Db>(Arc<Handler<Db>>);

impl<Db> AppModule<Db> {
    pub fn new(handler: Handler<Db>) -> Self {
        Self(Arc::new(handler))
    }
}

impl AppModule<PostgresDatabase> {
    pub async fn postgres() -> error_stack::Result<Self, KernelError> {
        Ok(Self::new(Handler::init(PostgresDatabase::new().await?)))
    }
}

impl AppModule<InMemoryDatabase> {
    pub fn in_memory() -> Self {
        Self::new(Handler::init(InMemoryDatabase::new()))
    }
}

impl<Db> Clone for AppModule<Db> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<Db> Deref for AppModule<Db> {
    type Target = Handler<Db>;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

pub struct Handler<Db> {
    database: Db,
    clock: SystemClock,
}

impl<Db> Handler<Db> {
    pub fn init(database: Db) -> Self {
        Self {
            database,
            clock: SystemClock,
        }
    }
}

#[async_trait::async_trait]
impl<Db: DatabaseConnection> DatabaseConnection for Handler<Db> {
    type Transaction = Db::Transaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        self.database.transact().await
    }
}

impl<Db> DependOnVehicleQuery for Handler<Db>
where
    Db: DatabaseConnection + DependOnVehicleQuery<DatabaseConnection = Db>,
{
    type VehicleQuery = <Db as DependOnVehicleQuery>::VehicleQuery;
    fn vehicle_query(&self) -> &Self::VehicleQuery {
        self.database.vehicle_query()
    }
}

impl<Db> DependOnVehicleModifier for Handler<Db>
where
    Db: DatabaseConnection + DependOnVehicleModifier<DatabaseConnection = Db>,
{
    type VehicleModifier = <Db as DependOnVehicleModifier>::VehicleModifier;
    fn vehicle_modifier(&self) -> &Self::VehicleModifier {
        self.database.vehicle_modifier()
    }
}

impl<Db: 'static + Sync + Send> DependOnClock for Handler<Db> {
    type Clock = SystemClock;
    fn clock(&self) -> &Self::Clock {
        &self.clock
    }
}
