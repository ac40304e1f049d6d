//! Initial database migration.
//!
//! Creates the user, car, service catalog, service record and payment
//! tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(CARS_SQL).await?;
        db.execute_unprepared(SERVICES_SQL).await?;
        db.execute_unprepared(SERVICE_RECORDS_SQL).await?;
        db.execute_unprepared(PAYMENTS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

const USERS_SQL: &str = r"
CREATE TABLE users (
    user_id SERIAL PRIMARY KEY,
    username VARCHAR(50) NOT NULL UNIQUE,
    password_hash VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const CARS_SQL: &str = r"
CREATE TABLE cars (
    plate_number VARCHAR(20) PRIMARY KEY,
    car_type VARCHAR(50),
    car_model VARCHAR(50),
    manufacturing_year INTEGER,
    driver_phone VARCHAR(20),
    mechanic_name VARCHAR(100),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_cars_created ON cars(created_at DESC);
";

const SERVICES_SQL: &str = r"
CREATE TABLE services (
    service_code SERIAL PRIMARY KEY,
    service_name VARCHAR(100) NOT NULL,
    service_price NUMERIC(12, 2) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_service_price_non_negative CHECK (service_price >= 0)
);
";

const SERVICE_RECORDS_SQL: &str = r"
CREATE TABLE service_records (
    record_number SERIAL PRIMARY KEY,
    service_date DATE NOT NULL,
    plate_number VARCHAR(20) NOT NULL
        REFERENCES cars(plate_number) ON UPDATE CASCADE ON DELETE CASCADE,
    service_code INTEGER NOT NULL
        REFERENCES services(service_code) ON UPDATE CASCADE ON DELETE RESTRICT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Daily report lookup
CREATE INDEX idx_service_records_date ON service_records(service_date, plate_number, record_number);

-- Invoice lookup
CREATE INDEX idx_service_records_car ON service_records(plate_number, service_date DESC);
";

const PAYMENTS_SQL: &str = r"
CREATE TABLE payments (
    payment_number SERIAL PRIMARY KEY,
    amount_paid NUMERIC(12, 2) NOT NULL,
    payment_date DATE NOT NULL,
    plate_number VARCHAR(20) NOT NULL
        REFERENCES cars(plate_number) ON UPDATE CASCADE ON DELETE CASCADE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_amount_paid_non_negative CHECK (amount_paid >= 0)
);

CREATE INDEX idx_payments_date ON payments(payment_date, plate_number, payment_number);
CREATE INDEX idx_payments_car ON payments(plate_number, payment_date DESC);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS payments CASCADE;
DROP TABLE IF EXISTS service_records CASCADE;
DROP TABLE IF EXISTS services CASCADE;
DROP TABLE IF EXISTS cars CASCADE;
DROP TABLE IF EXISTS users CASCADE;
";
