//! Fixture records written on first run.
//!
//! Dates are relative to the instant passed in, so a fresh install always
//! shows one loan due today, one overdue, one repaid and so on. The records
//! are consistent with each other: every client comes from an approved
//! application, has its loan entry, and its amount paid equals its payments.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use shared::{ApplicationStatus, ClientStatus, TransactionStatus, TransactionType};

use super::ledger::{Ledger, DISBURSEMENT_METHOD, LOAN_TERM_DAYS};
use super::models::{Application, Client, GalleryListing, Transaction};

struct SeedLoan {
    name: &'static str,
    phone: &'static str,
    id_number: &'static str,
    location: &'static str,
    borrowed: i64,
    /// Days before `now` the loan was approved
    approved_days_ago: i64,
    livestock_type: &'static str,
    livestock_count: u32,
    livestock_value: i64,
    /// Payment already received: amount, method, hours before `now`
    payment: Option<(i64, &'static str, i64)>,
}

const SEED_LOANS: [SeedLoan; 5] = [
    SeedLoan {
        name: "Mary Mugo",
        phone: "0712345678",
        id_number: "12345678",
        location: "Isinya",
        borrowed: 50_000,
        approved_days_ago: 2,
        livestock_type: "goats",
        livestock_count: 5,
        livestock_value: 60_000,
        payment: None,
    },
    SeedLoan {
        name: "Joseph Ngugi",
        phone: "0723456789",
        id_number: "23456789",
        location: "Kitengela",
        borrowed: 30_000,
        approved_days_ago: 7,
        livestock_type: "cattle",
        livestock_count: 2,
        livestock_value: 40_000,
        payment: Some((20_000, "mpesa", 24)),
    },
    SeedLoan {
        name: "Samuel Parmale",
        phone: "0734567890",
        id_number: "34567890",
        location: "Kajiado",
        borrowed: 25_000,
        approved_days_ago: 9,
        livestock_type: "sheep",
        livestock_count: 8,
        livestock_value: 32_000,
        payment: None,
    },
    SeedLoan {
        name: "John Doe",
        phone: "0745678901",
        id_number: "45678901",
        location: "Isinya",
        borrowed: 40_000,
        approved_days_ago: 6,
        livestock_type: "goats",
        livestock_count: 4,
        livestock_value: 48_000,
        payment: Some((52_000, "cash", 24)),
    },
    SeedLoan {
        name: "Leah Mugo",
        phone: "0756789012",
        id_number: "56789012",
        location: "Kiserian",
        borrowed: 35_000,
        approved_days_ago: 1,
        livestock_type: "cattle",
        livestock_count: 3,
        livestock_value: 45_000,
        payment: Some((15_000, "mpesa", 6)),
    },
];

pub fn sample_applications(now: DateTime<Utc>) -> Vec<Application> {
    let mut applications = vec![Application {
        id: 1,
        name: "Peter Kamau".to_string(),
        phone: "0767890123".to_string(),
        id_number: "67890123".to_string(),
        loan_amount: Decimal::from(45_000),
        livestock_type: "cattle".to_string(),
        livestock_count: 3,
        estimated_value: Decimal::from(50_000),
        location: "Isinya Town, near the market".to_string(),
        additional_info: Some("Urgent loan needed for school fees".to_string()),
        status: ApplicationStatus::Pending,
        date: now - Duration::days(1),
        photos: vec![],
    }];

    for (index, loan) in SEED_LOANS.iter().enumerate() {
        applications.push(Application {
            id: index as u64 + 2,
            name: loan.name.to_string(),
            phone: loan.phone.to_string(),
            id_number: loan.id_number.to_string(),
            loan_amount: Decimal::from(loan.borrowed),
            livestock_type: loan.livestock_type.to_string(),
            livestock_count: loan.livestock_count,
            estimated_value: Decimal::from(loan.livestock_value),
            location: loan.location.to_string(),
            additional_info: None,
            status: ApplicationStatus::Approved,
            date: now - Duration::days(loan.approved_days_ago + 1),
            photos: vec![],
        });
    }

    applications
}

pub fn sample_clients(now: DateTime<Utc>) -> Vec<Client> {
    SEED_LOANS
        .iter()
        .enumerate()
        .map(|(index, loan)| {
            let borrowed_date = now - Duration::days(loan.approved_days_ago);
            let client = Client {
                id: index as u64 + 1,
                application_id: Some(index as u64 + 2),
                name: loan.name.to_string(),
                phone: loan.phone.to_string(),
                id_number: loan.id_number.to_string(),
                borrowed_amount: Decimal::from(loan.borrowed),
                borrowed_date,
                expected_return_date: borrowed_date + Duration::days(LOAN_TERM_DAYS),
                amount_paid: loan
                    .payment
                    .map_or(Decimal::ZERO, |(amount, _, _)| Decimal::from(amount)),
                status: ClientStatus::Active,
                livestock_type: loan.livestock_type.to_string(),
                livestock_count: loan.livestock_count,
                livestock_value: Decimal::from(loan.livestock_value),
            };
            let status = if client.is_fully_paid() {
                ClientStatus::Completed
            } else {
                ClientStatus::Active
            };
            Client { status, ..client }
        })
        .collect()
}

/// One loan entry per client, then the payments, ids in that order.
pub fn sample_transactions(now: DateTime<Utc>) -> Vec<Transaction> {
    let loans = SEED_LOANS.iter().enumerate().map(|(index, loan)| Transaction {
        id: 0,
        client_id: index as u64 + 1,
        client_name: loan.name.to_string(),
        transaction_type: TransactionType::Loan,
        amount: Decimal::from(loan.borrowed),
        method: DISBURSEMENT_METHOD.to_string(),
        date: now - Duration::days(loan.approved_days_ago),
        status: TransactionStatus::Completed,
    });

    let payments = SEED_LOANS.iter().enumerate().filter_map(|(index, loan)| {
        loan.payment.map(|(amount, method, hours_ago)| Transaction {
            id: 0,
            client_id: index as u64 + 1,
            client_name: loan.name.to_string(),
            transaction_type: TransactionType::Payment,
            amount: Decimal::from(amount),
            method: method.to_string(),
            date: now - Duration::hours(hours_ago),
            status: TransactionStatus::Completed,
        })
    });

    loans
        .chain(payments)
        .enumerate()
        .map(|(index, transaction)| Transaction {
            id: index as u64 + 1,
            ..transaction
        })
        .collect()
}

pub fn sample_gallery(now: DateTime<Utc>) -> Vec<GalleryListing> {
    vec![
        GalleryListing {
            id: 1,
            title: "Premium Dairy Cattle".to_string(),
            livestock_type: "cattle".to_string(),
            price: Decimal::from(45_000),
            available_date: now + Duration::days(3),
            description: "High-quality dairy cattle from defaulted loan. Excellent milk production."
                .to_string(),
            images: vec![
                "public/dairy-cattle-close-up.jpg".to_string(),
                "public/dairy-cattle-in-grazing.jpg".to_string(),
            ],
        },
        GalleryListing {
            id: 2,
            title: "Healthy Goat Herd".to_string(),
            livestock_type: "goats".to_string(),
            price: Decimal::from(25_000),
            available_date: now + Duration::days(1),
            description: "5 healthy goats suitable for breeding or meat production.".to_string(),
            images: vec![
                "public/goat-herd-grazing.jpg".to_string(),
                "public/goats-in-farm-setting.jpg".to_string(),
            ],
        },
    ]
}

pub fn sample_ledger(now: DateTime<Utc>) -> Ledger {
    Ledger::from_parts(
        sample_applications(now),
        sample_clients(now),
        sample_transactions(now),
        sample_gallery(now),
    )
}
