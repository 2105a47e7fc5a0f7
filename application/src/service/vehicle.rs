use error_stack::Report;

use kernel::interface::clock::{Clock, DependOnClock};
use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{DependOnVehicleQuery, VehicleQuery};
use kernel::interface::update::{DependOnVehicleModifier, VehicleModifier};
use kernel::prelude::entity::{NewVehicle, UserId, VehicleId, VehicleModel, YearOfManufacture};
use kernel::KernelError;

use crate::transfer::{CreateVehicleDto, RentVehicleDto, ReturnVehicleDto, VehicleDto};

#[async_trait::async_trait]
pub trait CreateVehicleService:
    'static + Sync + Send + DependOnClock + DependOnVehicleModifier
{
    async fn create_vehicle(
        &self,
        dto: CreateVehicleDto,
    ) -> error_stack::Result<VehicleId, KernelError> {
        let current_year = self.clock().current_year();
        let year = YearOfManufacture::new(dto.year_of_manufacture);
        if !year.is_within_age_limit(current_year) {
            tracing::debug!(
                "Rejected vehicle built in {} ({} years old)",
                dto.year_of_manufacture,
                year.age(current_year)
            );
            return Err(Report::new(KernelError::AgeLimitExceeded).attach_printable(format!(
                "year of manufacture {} in {current_year}",
                dto.year_of_manufacture
            )));
        }

        let mut connection = self.database_connection().transact().await?;

        let vehicle = NewVehicle::new(VehicleModel::new(dto.model), year);
        let id = self
            .vehicle_modifier()
            .create(&mut connection, &vehicle)
            .await?;

        connection.commit().await?;

        tracing::info!("Vehicle {} created", id.as_ref());
        Ok(id)
    }
}

impl<T> CreateVehicleService for T where T: DependOnClock + DependOnVehicleModifier {}

#[async_trait::async_trait]
pub trait GetAvailableVehicleService:
    'static + Sync + Send + DependOnClock + DependOnVehicleQuery
{
    async fn get_available_vehicles(&self) -> error_stack::Result<Vec<VehicleDto>, KernelError> {
        let oldest = YearOfManufacture::oldest_allowed(self.clock().current_year());

        let mut connection = self.database_connection().transact().await?;

        let vehicles = self
            .vehicle_query()
            .find_available(&mut connection, &oldest)
            .await?;

        connection.commit().await?;

        Ok(vehicles.into_iter().map(VehicleDto::from).collect())
    }
}

impl<T> GetAvailableVehicleService for T where T: DependOnClock + DependOnVehicleQuery {}

#[async_trait::async_trait]
pub trait RentVehicleService:
    'static + Sync + Send + DependOnVehicleQuery + DependOnVehicleModifier
{
    /// Checks run in a fixed order and the first failure wins: the vehicle
    /// must exist, must not be rented, and the user must not hold another one.
    async fn rent_vehicle(&self, dto: RentVehicleDto) -> error_stack::Result<(), KernelError> {
        let user_id = UserId::parse(dto.user_id)?;
        let id = VehicleId::new(dto.vehicle_id);

        let mut connection = self.database_connection().transact().await?;

        let vehicle = self
            .vehicle_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("vehicle id: {}", dto.vehicle_id))
            })?;

        let rented = vehicle.rent_to(user_id.clone())?;

        if self
            .vehicle_query()
            .has_active_rental(&mut connection, &user_id)
            .await?
        {
            return Err(Report::new(KernelError::UserAlreadyRenting)
                .attach_printable(format!("user id: {}", user_id.as_ref())));
        }

        self.vehicle_modifier()
            .update(&mut connection, &rented)
            .await?;

        connection.commit().await?;

        tracing::info!("Vehicle {} rented by {}", dto.vehicle_id, user_id.as_ref());
        Ok(())
    }
}

impl<T> RentVehicleService for T where T: DependOnVehicleQuery + DependOnVehicleModifier {}

#[async_trait::async_trait]
pub trait ReturnVehicleService:
    'static + Sync + Send + DependOnVehicleQuery + DependOnVehicleModifier
{
    async fn return_vehicle(&self, dto: ReturnVehicleDto) -> error_stack::Result<(), KernelError> {
        let user_id = UserId::parse(dto.user_id)?;
        let id = VehicleId::new(dto.vehicle_id);

        let mut connection = self.database_connection().transact().await?;

        let vehicle = self
            .vehicle_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("vehicle id: {}", dto.vehicle_id))
            })?;

        let returned = vehicle.return_from(&user_id)?;

        self.vehicle_modifier()
            .update(&mut connection, &returned)
            .await?;

        connection.commit().await?;

        tracing::info!("Vehicle {} returned by {}", dto.vehicle_id, user_id.as_ref());
        Ok(())
    }
}

impl<T> ReturnVehicleService for T where T: DependOnVehicleQuery + DependOnVehicleModifier {}

#[cfg(test)]
mod test {
    use driver::database::{InMemoryDatabase, InMemoryTransaction, InMemoryVehicleRepository};
    use kernel::interface::clock::{DependOnClock, FixedClock};
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::DependOnVehicleQuery;
    use kernel::interface::update::DependOnVehicleModifier;
    use kernel::KernelError;

    use crate::service::{
        CreateVehicleService, GetAvailableVehicleService, RentVehicleService,
        ReturnVehicleService,
    };
    use crate::transfer::{CreateVehicleDto, RentVehicleDto, ReturnVehicleDto, VehicleDto};

    const CURRENT_YEAR: i32 = 2026;

    struct Module {
        db: InMemoryDatabase,
        clock: FixedClock,
    }

    impl Module {
        fn new() -> Self {
            Self {
                db: InMemoryDatabase::new(),
                clock: FixedClock::new(CURRENT_YEAR),
            }
        }
    }

    #[async_trait::async_trait]
    impl DatabaseConnection for Module {
        type Transaction = InMemoryTransaction;
        async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
            self.db.transact().await
        }
    }

    impl DependOnVehicleQuery for Module {
        type VehicleQuery = InMemoryVehicleRepository;
        fn vehicle_query(&self) -> &Self::VehicleQuery {
            self.db.vehicle_query()
        }
    }

    impl DependOnVehicleModifier for Module {
        type VehicleModifier = InMemoryVehicleRepository;
        fn vehicle_modifier(&self) -> &Self::VehicleModifier {
            self.db.vehicle_modifier()
        }
    }

    impl DependOnClock for Module {
        type Clock = FixedClock;
        fn clock(&self) -> &Self::Clock {
            &self.clock
        }
    }

    async fn create(module: &Module, age: i32) -> error_stack::Result<i32, KernelError> {
        let dto = CreateVehicleDto {
            model: format!("model-{age}"),
            year_of_manufacture: CURRENT_YEAR - age,
        };
        Ok(module.create_vehicle(dto).await?.into())
    }

    fn rent(vehicle_id: i32, user_id: &str) -> RentVehicleDto {
        RentVehicleDto {
            vehicle_id,
            user_id: user_id.to_string(),
        }
    }

    fn give_back(vehicle_id: i32, user_id: &str) -> ReturnVehicleDto {
        ReturnVehicleDto {
            vehicle_id,
            user_id: user_id.to_string(),
        }
    }

    fn context<T: std::fmt::Debug>(result: error_stack::Result<T, KernelError>) -> KernelError {
        *result.unwrap_err().current_context()
    }

    #[tokio::test]
    async fn creation_respects_age_limit() -> error_stack::Result<(), KernelError> {
        let module = Module::new();
        for age in [-1, 0, 3, 5] {
            create(&module, age).await?;
        }
        for age in [6, 20] {
            assert_eq!(
                context(create(&module, age).await),
                KernelError::AgeLimitExceeded
            );
        }
        let ancient = CreateVehicleDto {
            model: "ancient".to_string(),
            year_of_manufacture: i32::MIN,
        };
        assert_eq!(
            context(module.create_vehicle(ancient).await),
            KernelError::AgeLimitExceeded
        );
        assert_eq!(module.get_available_vehicles().await?.len(), 4);
        Ok(())
    }

    #[tokio::test]
    async fn available_lists_only_free_vehicles() -> error_stack::Result<(), KernelError> {
        let module = Module::new();
        let first = create(&module, 1).await?;
        let second = create(&module, 2).await?;

        module.rent_vehicle(rent(first, "alice")).await?;

        let available = module.get_available_vehicles().await?;
        assert_eq!(
            available,
            vec![VehicleDto {
                id: second,
                model: "model-2".to_string(),
                year_of_manufacture: CURRENT_YEAR - 2,
                is_rented: false,
                rented_by: None,
            }]
        );
        Ok(())
    }

    #[tokio::test]
    async fn vehicles_age_out_of_availability() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let module = Module {
            db: db.clone(),
            clock: FixedClock::new(CURRENT_YEAR),
        };
        create(&module, 5).await?;

        let next_year = Module {
            db,
            clock: FixedClock::new(CURRENT_YEAR + 1),
        };
        assert!(next_year.get_available_vehicles().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn rent_return_scenario() -> error_stack::Result<(), KernelError> {
        let module = Module::new();
        let id = create(&module, 3).await?;

        module.rent_vehicle(rent(id, "alice")).await?;
        assert_eq!(
            context(module.rent_vehicle(rent(id, "bob")).await),
            KernelError::AlreadyRented
        );
        assert_eq!(
            context(module.return_vehicle(give_back(id, "bob")).await),
            KernelError::NotRenter
        );
        module.return_vehicle(give_back(id, "alice")).await?;

        let available = module.get_available_vehicles().await?;
        assert_eq!(available.len(), 1);
        assert!(!available[0].is_rented);
        assert_eq!(available[0].rented_by, None);
        Ok(())
    }

    #[tokio::test]
    async fn user_may_hold_one_vehicle() -> error_stack::Result<(), KernelError> {
        let module = Module::new();
        let first = create(&module, 1).await?;
        let second = create(&module, 1).await?;

        module.rent_vehicle(rent(first, "alice")).await?;
        assert_eq!(
            context(module.rent_vehicle(rent(second, "alice")).await),
            KernelError::UserAlreadyRenting
        );

        module.return_vehicle(give_back(first, "alice")).await?;
        module.rent_vehicle(rent(second, "alice")).await?;
        Ok(())
    }

    #[tokio::test]
    async fn rent_checks_run_in_order() -> error_stack::Result<(), KernelError> {
        let module = Module::new();
        let first = create(&module, 1).await?;
        let second = create(&module, 1).await?;
        module.rent_vehicle(rent(first, "alice")).await?;
        module.rent_vehicle(rent(second, "bob")).await?;

        // Vehicle rented and user busy at once: the vehicle state wins.
        assert_eq!(
            context(module.rent_vehicle(rent(second, "alice")).await),
            KernelError::AlreadyRented
        );
        assert_eq!(
            context(module.rent_vehicle(rent(99, "alice")).await),
            KernelError::NotFound
        );
        Ok(())
    }

    #[tokio::test]
    async fn return_checks_run_in_order() -> error_stack::Result<(), KernelError> {
        let module = Module::new();
        let id = create(&module, 1).await?;

        assert_eq!(
            context(module.return_vehicle(give_back(99, "alice")).await),
            KernelError::NotFound
        );
        assert_eq!(
            context(module.return_vehicle(give_back(id, "alice")).await),
            KernelError::NotRented
        );
        Ok(())
    }

    #[tokio::test]
    async fn blank_user_is_rejected() -> error_stack::Result<(), KernelError> {
        let module = Module::new();
        let id = create(&module, 1).await?;
        assert_eq!(
            context(module.rent_vehicle(rent(id, " ")).await),
            KernelError::Validation
        );
        assert_eq!(
            context(module.return_vehicle(give_back(id, "")).await),
            KernelError::Validation
        );
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_rents_admit_one_renter() -> error_stack::Result<(), KernelError> {
        let module = Module::new();
        let id = create(&module, 1).await?;

        let (alice, bob) = tokio::join!(
            module.rent_vehicle(rent(id, "alice")),
            module.rent_vehicle(rent(id, "bob"))
        );
        let failures = [&alice, &bob]
            .into_iter()
            .filter_map(|result| result.as_ref().err())
            .map(|report| *report.current_context())
            .collect::<Vec<_>>();
        assert_eq!(failures, vec![KernelError::AlreadyRented]);
        assert!(module.get_available_vehicles().await?.is_empty());
        Ok(())
    }
}
