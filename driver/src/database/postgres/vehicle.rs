use error_stack::Report;
use sqlx::PgConnection;

use kernel::interface::query::VehicleQuery;
use kernel::interface::update::VehicleModifier;
use kernel::prelude::entity::{
    NewVehicle, RentalStatus, UserId, Vehicle, VehicleId, VehicleModel, Version,
    YearOfManufacture,
};
use kernel::KernelError;

use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

pub struct PostgresVehicleRepository;

#[async_trait::async_trait]
impl VehicleQuery for PostgresVehicleRepository {
    type Transaction = PostgresConnection;

    async fn find_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &VehicleId,
    ) -> error_stack::Result<Option<Vehicle>, KernelError> {
        PgVehicleInternal::find_by_id(con, id).await
    }

    async fn find_available(
        &self,
        con: &mut PostgresConnection,
        oldest: &YearOfManufacture,
    ) -> error_stack::Result<Vec<Vehicle>, KernelError> {
        PgVehicleInternal::find_available(con, oldest).await
    }

    async fn has_active_rental(
        &self,
        con: &mut PostgresConnection,
        user_id: &UserId,
    ) -> error_stack::Result<bool, KernelError> {
        PgVehicleInternal::has_active_rental(con, user_id).await
    }
}

#[async_trait::async_trait]
impl VehicleModifier for PostgresVehicleRepository {
    type Transaction = PostgresConnection;

    async fn create(
        &self,
        con: &mut PostgresConnection,
        vehicle: &NewVehicle,
    ) -> error_stack::Result<VehicleId, KernelError> {
        PgVehicleInternal::create(con, vehicle).await
    }

    async fn update(
        &self,
        con: &mut PostgresConnection,
        vehicle: &Vehicle,
    ) -> error_stack::Result<(), KernelError> {
        PgVehicleInternal::update(con, vehicle).await
    }
}

#[derive(sqlx::FromRow)]
struct VehicleRow {
    id: i32,
    model: String,
    year_of_manufacture: i32,
    is_rented: bool,
    rented_by: Option<String>,
    version: i64,
}

impl TryFrom<VehicleRow> for Vehicle {
    type Error = Report<KernelError>;
    fn try_from(value: VehicleRow) -> Result<Self, Self::Error> {
        let rental = RentalStatus::from_parts(value.is_rented, value.rented_by)
            .map_err(|report| report.attach_printable(format!("vehicle id: {}", value.id)))?;
        Ok(Vehicle::new(
            VehicleId::new(value.id),
            VehicleModel::new(value.model),
            YearOfManufacture::new(value.year_of_manufacture),
            rental,
            Version::new(value.version),
        ))
    }
}

pub(in crate::database) struct PgVehicleInternal;

impl PgVehicleInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &VehicleId,
    ) -> error_stack::Result<Option<Vehicle>, KernelError> {
        let row = sqlx::query_as::<_, VehicleRow>(
            // language=postgresql
            r#"
            SELECT id, model, year_of_manufacture, is_rented, rented_by, version
            FROM vehicles
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Vehicle::try_from).transpose()
    }

    async fn find_available(
        con: &mut PgConnection,
        oldest: &YearOfManufacture,
    ) -> error_stack::Result<Vec<Vehicle>, KernelError> {
        let rows = sqlx::query_as::<_, VehicleRow>(
            // language=postgresql
            r#"
            SELECT id, model, year_of_manufacture, is_rented, rented_by, version
            FROM vehicles
            WHERE is_rented = FALSE AND year_of_manufacture >= $1
            ORDER BY id
            "#,
        )
        .bind(oldest.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter().map(Vehicle::try_from).collect()
    }

    async fn has_active_rental(
        con: &mut PgConnection,
        user_id: &UserId,
    ) -> error_stack::Result<bool, KernelError> {
        sqlx::query_scalar::<_, bool>(
            // language=postgresql
            r#"
            SELECT EXISTS(SELECT 1 FROM vehicles WHERE rented_by = $1)
            "#,
        )
        .bind(user_id.as_ref())
        .fetch_one(con)
        .await
        .convert_error()
    }

    async fn create(
        con: &mut PgConnection,
        vehicle: &NewVehicle,
    ) -> error_stack::Result<VehicleId, KernelError> {
        let id = sqlx::query_scalar::<_, i32>(
            // language=postgresql
            r#"
            INSERT INTO vehicles (model, year_of_manufacture)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(vehicle.model().as_ref())
        .bind(vehicle.year_of_manufacture().as_ref())
        .fetch_one(con)
        .await
        .convert_error()?;
        tracing::debug!("Inserted vehicle {id}");
        Ok(VehicleId::new(id))
    }

    async fn update(con: &mut PgConnection, vehicle: &Vehicle) -> error_stack::Result<(), KernelError> {
        let rental = vehicle.rental();
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE vehicles
            SET model = $2, year_of_manufacture = $3, is_rented = $4, rented_by = $5, version = version + 1
            WHERE id = $1 AND version = $6
            "#,
        )
        .bind(vehicle.id().as_ref())
        .bind(vehicle.model().as_ref())
        .bind(vehicle.year_of_manufacture().as_ref())
        .bind(rental.is_rented())
        .bind(rental.rented_by().map(|user| user.as_ref().as_str()))
        .bind(vehicle.version().as_ref())
        .execute(&mut *con)
        .await
        .convert_error()?;

        if result.rows_affected() == 0 {
            let exists = sqlx::query_scalar::<_, bool>(
                // language=postgresql
                r#"
                SELECT EXISTS(SELECT 1 FROM vehicles WHERE id = $1)
                "#,
            )
            .bind(vehicle.id().as_ref())
            .fetch_one(&mut *con)
            .await
            .convert_error()?;
            let context = if exists {
                KernelError::Concurrency
            } else {
                KernelError::Internal
            };
            return Err(Report::new(context).attach_printable(format!(
                "No vehicle {} at version {}",
                vehicle.id().as_ref(),
                vehicle.version().as_ref()
            )));
        }
        tracing::debug!(
            "Updated vehicle {} (rented: {})",
            vehicle.id().as_ref(),
            rental.is_rented()
        );
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::VehicleQuery;
    use kernel::interface::update::VehicleModifier;
    use kernel::prelude::entity::{
        NewVehicle, RentalStatus, UserId, VehicleModel, Version, YearOfManufacture,
    };
    use kernel::KernelError;

    use crate::database::postgres::vehicle::PostgresVehicleRepository;
    use crate::database::postgres::PostgresDatabase;

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn create_rent_and_return() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        // Never committed, so nothing leaks into the database.
        let mut con = db.transact().await?;

        let draft = NewVehicle::new(VehicleModel::new("Golf"), YearOfManufacture::new(2024));
        let id = PostgresVehicleRepository.create(&mut con, &draft).await?;

        let found = PostgresVehicleRepository
            .find_by_id(&mut con, &id)
            .await?
            .expect("vehicle was just created");
        assert_eq!(found.model(), &VehicleModel::new("Golf"));
        assert_eq!(found.rental(), &RentalStatus::Available);
        assert_eq!(found.version(), &Version::initial());

        let user = UserId::new(format!("pg-test-{}", id.as_ref()));
        let rented = found.rent_to(user.clone()).unwrap();
        PostgresVehicleRepository.update(&mut con, &rented).await?;
        assert!(PostgresVehicleRepository
            .has_active_rental(&mut con, &user)
            .await?);

        let available = PostgresVehicleRepository
            .find_available(&mut con, &YearOfManufacture::new(2020))
            .await?;
        assert!(available.iter().all(|v| v.id() != &id));

        // `rented` still carries the version it was read at.
        let stale = PostgresVehicleRepository
            .update(&mut con, &rented)
            .await
            .unwrap_err();
        assert_eq!(stale.current_context(), &KernelError::Concurrency);

        let current = PostgresVehicleRepository
            .find_by_id(&mut con, &id)
            .await?
            .expect("vehicle exists");
        assert_eq!(current.version(), &Version::new(1));
        let returned = current.return_from(&user).unwrap();
        PostgresVehicleRepository.update(&mut con, &returned).await?;
        assert!(!PostgresVehicleRepository
            .has_active_rental(&mut con, &user)
            .await?);

        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn second_active_rental_violates_index() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;

        let draft = NewVehicle::new(VehicleModel::new("Clio"), YearOfManufacture::new(2023));
        let first = PostgresVehicleRepository.create(&mut con, &draft).await?;
        let second = PostgresVehicleRepository.create(&mut con, &draft).await?;
        let user = UserId::new(format!("pg-index-{}", first.as_ref()));

        for (id, expect_ok) in [(first, true), (second, false)] {
            let vehicle = PostgresVehicleRepository
                .find_by_id(&mut con, &id)
                .await?
                .expect("vehicle exists")
                .rent_to(user.clone())
                .unwrap();
            let result = PostgresVehicleRepository.update(&mut con, &vehicle).await;
            match expect_ok {
                true => result?,
                false => assert_eq!(
                    result.unwrap_err().current_context(),
                    &KernelError::Concurrency
                ),
            }
        }
        Ok(())
    }
}
