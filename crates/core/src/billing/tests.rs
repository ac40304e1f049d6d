//! Tests for billing aggregation.

use chrono::NaiveDate;
use crpms_shared::types::{PaymentNumber, RecordNumber, ServiceCode};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::BillingError;
use super::service::BillingService;
use super::types::{CarRecord, InvoicePayment, PaymentRow, ServiceRecordRow};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn service_row(record: i32, day: NaiveDate, plate: &str, price: Decimal) -> ServiceRecordRow {
    ServiceRecordRow {
        record_number: RecordNumber(record),
        service_date: day,
        plate_number: plate.to_string(),
        car_type: Some("Sedan".to_string()),
        car_model: Some(format!("Model-{plate}")),
        driver_phone: Some("0788000000".to_string()),
        mechanic_name: Some("Jean".to_string()),
        service_code: ServiceCode(1),
        service_name: "Engine repair".to_string(),
        service_price: price,
    }
}

fn payment_row(number: i32, day: NaiveDate, plate: &str, amount: Decimal) -> PaymentRow {
    PaymentRow {
        payment_number: PaymentNumber(number),
        amount_paid: amount,
        payment_date: day,
        plate_number: plate.to_string(),
        car_type: Some("Pickup".to_string()),
        car_model: Some(format!("Model-{plate}")),
        driver_phone: Some("0722000000".to_string()),
        mechanic_name: Some("Aline".to_string()),
    }
}

fn car(plate: &str) -> CarRecord {
    CarRecord {
        plate_number: plate.to_string(),
        car_type: Some("Sedan".to_string()),
        car_model: Some("Corolla".to_string()),
        manufacturing_year: Some(2015),
        driver_phone: Some("0788000000".to_string()),
        mechanic_name: Some("Jean".to_string()),
    }
}

#[test]
fn test_daily_report_worked_example() {
    let day = date(2024, 3, 1);
    let services = vec![
        service_row(1, day, "RAA111A", dec!(20000)),
        service_row(2, day, "RAA111A", dec!(15000)),
        service_row(3, day, "RAB222B", dec!(5000)),
    ];
    let payments = vec![payment_row(1, day, "RAA111A", dec!(30000))];

    let report = BillingService::build_daily_report(day, services, payments);

    assert_eq!(report.date, day);
    assert_eq!(report.cars.len(), 2);

    let raa = &report.cars[0];
    assert_eq!(raa.plate_number, "RAA111A");
    assert_eq!(raa.services.len(), 2);
    assert_eq!(raa.payments.len(), 1);
    assert_eq!(raa.total_service_amount, dec!(35000));
    assert_eq!(raa.total_payment_amount, dec!(30000));

    let rab = &report.cars[1];
    assert_eq!(rab.plate_number, "RAB222B");
    assert!(rab.payments.is_empty());
    assert_eq!(rab.total_service_amount, dec!(5000));
    assert_eq!(rab.total_payment_amount, Decimal::ZERO);

    assert_eq!(report.summary.total_services, 3);
    assert_eq!(report.summary.total_payments, 1);
    assert_eq!(report.summary.total_service_amount, dec!(40000));
    assert_eq!(report.summary.total_payment_amount, dec!(30000));
    assert_eq!(report.summary.net_amount, dec!(10000));
}

#[test]
fn test_daily_report_empty_day() {
    let report = BillingService::build_daily_report(date(2024, 3, 2), vec![], vec![]);

    assert!(report.cars.is_empty());
    assert_eq!(report.summary.total_services, 0);
    assert_eq!(report.summary.total_payments, 0);
    assert_eq!(report.summary.total_service_amount, Decimal::ZERO);
    assert_eq!(report.summary.total_payment_amount, Decimal::ZERO);
    assert_eq!(report.summary.net_amount, Decimal::ZERO);
}

#[test]
fn test_daily_report_payment_only_car_seeds_from_payment_row() {
    let day = date(2024, 3, 1);
    let report = BillingService::build_daily_report(
        day,
        vec![service_row(1, day, "RAA111A", dec!(100))],
        vec![payment_row(9, day, "RAC333C", dec!(250))],
    );

    assert_eq!(report.cars.len(), 2);
    let rac = &report.cars[1];
    assert_eq!(rac.plate_number, "RAC333C");
    assert!(rac.services.is_empty());
    assert_eq!(rac.car_type.as_deref(), Some("Pickup"));
    assert_eq!(rac.mechanic_name.as_deref(), Some("Aline"));
    assert_eq!(report.summary.net_amount, dec!(-150));
}

#[test]
fn test_daily_report_car_fields_come_from_first_row_seen() {
    let day = date(2024, 3, 1);
    let report = BillingService::build_daily_report(
        day,
        vec![service_row(1, day, "RAA111A", dec!(100))],
        vec![payment_row(1, day, "RAA111A", dec!(100))],
    );

    assert_eq!(report.cars.len(), 1);
    assert_eq!(report.cars[0].car_type.as_deref(), Some("Sedan"));
    assert_eq!(report.cars[0].mechanic_name.as_deref(), Some("Jean"));
}

#[test]
fn test_daily_report_keeps_first_seen_order_not_plate_order() {
    let day = date(2024, 3, 1);
    let report = BillingService::build_daily_report(
        day,
        vec![
            service_row(1, day, "RZZ999Z", dec!(1)),
            service_row(2, day, "RAA111A", dec!(1)),
            service_row(3, day, "RZZ999Z", dec!(1)),
        ],
        vec![payment_row(1, day, "RMM555M", dec!(1))],
    );

    let plates: Vec<&str> = report
        .cars
        .iter()
        .map(|c| c.plate_number.as_str())
        .collect();
    assert_eq!(plates, vec!["RZZ999Z", "RAA111A", "RMM555M"]);
    let records: Vec<i32> = report.cars[0]
        .services
        .iter()
        .map(|s| s.record_number.into_inner())
        .collect();
    assert_eq!(records, vec![1, 3]);
}

#[test]
fn test_daily_report_decimal_sums_are_exact() {
    let day = date(2024, 3, 1);
    let services = (0..10)
        .map(|i| service_row(i, day, "RAA111A", dec!(0.1)))
        .collect();

    let report = BillingService::build_daily_report(day, services, vec![]);

    assert_eq!(report.summary.total_service_amount, dec!(1.0));
    assert_eq!(report.cars[0].total_service_amount, dec!(1.0));
}

#[test]
fn test_daily_report_json_shape() {
    let day = date(2024, 3, 1);
    let report = BillingService::build_daily_report(
        day,
        vec![service_row(1, day, "RAA111A", dec!(20000))],
        vec![],
    );

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["date"], "2024-03-01");
    assert_eq!(json["cars"][0]["plateNumber"], "RAA111A");
    assert_eq!(json["cars"][0]["totalServiceAmount"], 20000.0);
    assert_eq!(json["cars"][0]["services"][0]["serviceDate"], "2024-03-01");
    assert_eq!(json["summary"]["netAmount"], 20000.0);
    assert_eq!(json["summary"]["totalServices"], 1);
}

#[test]
fn test_invoice_totals_and_order() {
    let services = vec![
        service_row(7, date(2024, 3, 5), "RAA111A", dec!(15000)),
        service_row(4, date(2024, 3, 1), "RAA111A", dec!(20000)),
    ];
    let payments = vec![
        InvoicePayment {
            payment_number: PaymentNumber(3),
            amount_paid: dec!(10000),
            payment_date: date(2024, 3, 6),
        },
        InvoicePayment {
            payment_number: PaymentNumber(1),
            amount_paid: dec!(30000),
            payment_date: date(2024, 3, 1),
        },
    ];

    let invoice = BillingService::build_invoice_on(
        date(2024, 3, 10),
        "RAA111A",
        Some(car("RAA111A")),
        services,
        payments,
        "admin",
    )
    .unwrap();

    assert_eq!(invoice.bill_date, date(2024, 3, 10));
    assert_eq!(invoice.receiver_identity, "admin");
    assert_eq!(invoice.car.plate_number, "RAA111A");
    assert_eq!(invoice.services[0].record_number, RecordNumber(7));
    assert_eq!(invoice.services[1].record_number, RecordNumber(4));
    assert_eq!(invoice.payments[0].payment_number, PaymentNumber(3));
    assert_eq!(invoice.totals.total_service_amount, dec!(35000));
    assert_eq!(invoice.totals.total_paid, dec!(40000));
    assert_eq!(invoice.totals.balance, dec!(-5000));
}

#[test]
fn test_invoice_for_car_without_history() {
    let invoice = BillingService::build_invoice_on(
        date(2024, 3, 10),
        "RAB222B",
        Some(car("RAB222B")),
        vec![],
        vec![],
        "admin",
    )
    .unwrap();

    assert!(invoice.services.is_empty());
    assert!(invoice.payments.is_empty());
    assert_eq!(invoice.totals.total_service_amount, Decimal::ZERO);
    assert_eq!(invoice.totals.total_paid, Decimal::ZERO);
    assert_eq!(invoice.totals.balance, Decimal::ZERO);
}

#[test]
fn test_invoice_unknown_plate_is_not_found() {
    let result = BillingService::build_invoice(
        "RXX000X",
        None,
        vec![service_row(1, date(2024, 3, 1), "RXX000X", dec!(10))],
        vec![],
        "admin",
    );

    assert_eq!(result, Err(BillingError::CarNotFound("RXX000X".to_string())));
}

#[test]
fn test_invoice_defaults_to_today() {
    let invoice =
        BillingService::build_invoice("RAA111A", Some(car("RAA111A")), vec![], vec![], "admin")
            .unwrap();
    let today = chrono::Utc::now().date_naive();

    // Allow for the test straddling midnight UTC.
    assert!(invoice.bill_date == today || invoice.bill_date.succ_opt() == Some(today));
}

#[test]
fn test_invoice_json_shape() {
    let invoice = BillingService::build_invoice_on(
        date(2024, 3, 10),
        "RAA111A",
        Some(car("RAA111A")),
        vec![],
        vec![],
        "admin",
    )
    .unwrap();

    let json = serde_json::to_value(&invoice).unwrap();
    assert_eq!(json["billDate"], "2024-03-10");
    assert_eq!(json["receiverIdentity"], "admin");
    assert_eq!(json["car"]["type"], "Sedan");
    assert_eq!(json["car"]["model"], "Corolla");
    assert_eq!(json["car"]["manufacturingYear"], 2015);
    assert_eq!(json["totals"]["balance"], 0.0);
}

// ============================================================================
// Properties
// ============================================================================

/// Strategy for a price in whole francs with up to two decimals.
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for a plate drawn from a small pool so cars repeat.
fn plate() -> impl Strategy<Value = String> {
    (0u8..5).prop_map(|i| format!("RA{}00{}A", char::from(b'A' + i), i))
}

fn day_rows() -> impl Strategy<Value = (Vec<ServiceRecordRow>, Vec<PaymentRow>)> {
    let day = date(2024, 3, 1);
    (
        prop::collection::vec((plate(), amount()), 0..30),
        prop::collection::vec((plate(), amount()), 0..30),
    )
        .prop_map(move |(services, payments)| {
            let services = services
                .into_iter()
                .enumerate()
                .map(|(i, (p, a))| service_row(i32::try_from(i).unwrap(), day, &p, a))
                .collect();
            let payments = payments
                .into_iter()
                .enumerate()
                .map(|(i, (p, a))| payment_row(i32::try_from(i).unwrap(), day, &p, a))
                .collect();
            (services, payments)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every input row lands in exactly one car, under its own plate.
    #[test]
    fn prop_rows_are_partitioned_by_plate((services, payments) in day_rows()) {
        let report = BillingService::build_daily_report(
            date(2024, 3, 1),
            services.clone(),
            payments.clone(),
        );

        let mut grouped_services: Vec<ServiceRecordRow> = Vec::new();
        let mut grouped_payments: Vec<PaymentRow> = Vec::new();
        for car in &report.cars {
            prop_assert!(car.services.iter().all(|s| s.plate_number == car.plate_number));
            prop_assert!(car.payments.iter().all(|p| p.plate_number == car.plate_number));
            grouped_services.extend(car.services.iter().cloned());
            grouped_payments.extend(car.payments.iter().cloned());
        }

        let mut expected_services = services;
        let mut expected_payments = payments;
        grouped_services.sort_by_key(|s| s.record_number);
        expected_services.sort_by_key(|s| s.record_number);
        grouped_payments.sort_by_key(|p| p.payment_number);
        expected_payments.sort_by_key(|p| p.payment_number);
        prop_assert_eq!(grouped_services, expected_services);
        prop_assert_eq!(grouped_payments, expected_payments);

        let mut plates: Vec<&str> = report.cars.iter().map(|c| c.plate_number.as_str()).collect();
        let car_count = plates.len();
        plates.sort_unstable();
        plates.dedup();
        prop_assert_eq!(plates.len(), car_count, "each plate appears once");
    }

    /// Per-car totals match their own rows; the summary nets correctly.
    #[test]
    fn prop_totals_are_exact_sums((services, payments) in day_rows()) {
        let report = BillingService::build_daily_report(date(2024, 3, 1), services, payments);

        let mut service_total = Decimal::ZERO;
        let mut payment_total = Decimal::ZERO;
        for car in &report.cars {
            let s: Decimal = car.services.iter().map(|r| r.service_price).sum();
            let p: Decimal = car.payments.iter().map(|r| r.amount_paid).sum();
            prop_assert_eq!(car.total_service_amount, s);
            prop_assert_eq!(car.total_payment_amount, p);
            service_total += s;
            payment_total += p;
        }

        prop_assert_eq!(report.summary.total_service_amount, service_total);
        prop_assert_eq!(report.summary.total_payment_amount, payment_total);
        prop_assert_eq!(
            report.summary.net_amount,
            report.summary.total_service_amount - report.summary.total_payment_amount
        );
    }

    /// Same input, same output.
    #[test]
    fn prop_daily_report_is_idempotent((services, payments) in day_rows()) {
        let day = date(2024, 3, 1);
        let first = BillingService::build_daily_report(day, services.clone(), payments.clone());
        let second = BillingService::build_daily_report(day, services, payments);
        prop_assert_eq!(first, second);
    }

    /// Balance is charges minus payments, sign preserved.
    #[test]
    fn prop_invoice_balance(
        prices in prop::collection::vec(amount(), 0..20),
        paid in prop::collection::vec(amount(), 0..20),
    ) {
        let day = date(2024, 3, 1);
        let services: Vec<ServiceRecordRow> = prices
            .iter()
            .enumerate()
            .map(|(i, p)| service_row(i32::try_from(i).unwrap(), day, "RAA111A", *p))
            .collect();
        let payments: Vec<InvoicePayment> = paid
            .iter()
            .enumerate()
            .map(|(i, a)| InvoicePayment {
                payment_number: PaymentNumber(i32::try_from(i).unwrap()),
                amount_paid: *a,
                payment_date: day,
            })
            .collect();

        let invoice = BillingService::build_invoice_on(
            day,
            "RAA111A",
            Some(car("RAA111A")),
            services,
            payments,
            "admin",
        )
        .unwrap();

        let charged: Decimal = prices.iter().copied().sum();
        let received: Decimal = paid.iter().copied().sum();
        prop_assert_eq!(invoice.totals.total_service_amount, charged);
        prop_assert_eq!(invoice.totals.total_paid, received);
        prop_assert_eq!(invoice.totals.balance, charged - received);
    }
}
