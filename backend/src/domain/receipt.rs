//! Plain-text receipts for download.
//!
//! Rendering only: nothing here touches the ledger. Dates are printed in the
//! business calendar so a receipt shows the day the operator saw.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::calendar::BusinessCalendar;
use super::models::money::round_money;
use super::models::{Client, Transaction};

const LETTERHEAD: &str = "NAGOLIE ENTERPRISES LTD";

/// A rendered receipt and the file name it should be downloaded as.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub file_name: String,
    pub content: String,
}

/// `KSh 12,345`, or `KSh 12,345.50` when there are cents.
pub fn format_currency(amount: Decimal) -> String {
    let amount = round_money(amount);
    let text = format!("{:.2}", amount.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < Decimal::ZERO { "-" } else { "" };
    if cents == "00" {
        format!("{}KSh {}", sign, grouped)
    } else {
        format!("{}KSh {}.{}", sign, grouped, cents)
    }
}

pub fn format_date(instant: DateTime<Utc>, calendar: &BusinessCalendar) -> String {
    calendar.date_of(instant).format("%-d %b %Y").to_string()
}

/// Statement for one client: loan terms, what has been paid and every entry
/// recorded against the loan.
pub fn client_receipt(
    client: &Client,
    transactions: &[&Transaction],
    now: DateTime<Utc>,
    calendar: &BusinessCalendar,
) -> Receipt {
    let mut content = format!(
        "{LETTERHEAD}\n\
         Livestock-Backed Lending Solutions\n\
         Isinya, Kajiado County\n\
         \n\
         PAYMENT RECEIPT\n\
         ================\n\
         \n\
         Client: {}\n\
         Phone: {}\n\
         ID Number: {}\n\
         \n\
         Loan Details:\n\
         - Amount Borrowed: {}\n\
         - Interest Rate: 30%\n\
         - Expected Amount: {}\n\
         - Amount Paid: {}\n\
         - Balance: {}\n\
         - Due Date: {}\n\
         \n\
         Transaction History:\n",
        or_na(&client.name),
        or_na(&client.phone),
        or_na(&client.id_number),
        format_currency(client.borrowed_amount),
        format_currency(client.expected_amount()),
        format_currency(client.amount_paid),
        format_currency(client.balance()),
        format_date(client.expected_return_date, calendar),
    );

    for transaction in transactions {
        content.push_str(&format!(
            "- {}: {} - {} ({})\n",
            format_date(transaction.date, calendar),
            transaction.transaction_type.to_string().to_uppercase(),
            format_currency(transaction.amount),
            transaction.method.to_uppercase()
        ));
    }

    content.push_str(&format!(
        "\nGenerated on: {}\nThank you for choosing Nagolie Enterprises!\n",
        format_date(now, calendar)
    ));

    let name = client.name.split_whitespace().collect::<Vec<_>>().join("_");
    let name = if name.is_empty() { "client".to_string() } else { name };

    Receipt {
        file_name: format!("receipt_{}_{}.txt", name, now.timestamp_millis()),
        content,
    }
}

pub fn transaction_receipt(
    transaction: &Transaction,
    now: DateTime<Utc>,
    calendar: &BusinessCalendar,
) -> Receipt {
    let content = format!(
        "{LETTERHEAD}\n\
         Transaction Receipt\n\
         ==================\n\
         \n\
         Transaction ID: {}\n\
         Date: {}\n\
         Client: {}\n\
         Type: {}\n\
         Amount: {}\n\
         Method: {}\n\
         Status: {}\n\
         \n\
         Generated on: {}\n",
        transaction.id,
        format_date(transaction.date, calendar),
        transaction.client_name,
        transaction.transaction_type.to_string().to_uppercase(),
        format_currency(transaction.amount),
        transaction.method.to_uppercase(),
        transaction.status.to_string().to_uppercase(),
        format_date(now, calendar),
    );

    Receipt {
        file_name: format!("transaction_{}_{}.txt", transaction.id, now.timestamp_millis()),
        content,
    }
}

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        "N/A"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use shared::{ClientStatus, TransactionStatus, TransactionType};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 22, 15, 0).unwrap()
    }

    fn joseph() -> Client {
        Client {
            id: 2,
            application_id: Some(3),
            name: "Joseph  Ngugi".to_string(),
            phone: "0723456789".to_string(),
            id_number: "23456789".to_string(),
            borrowed_amount: Decimal::from(40_000),
            borrowed_date: now() - Duration::days(5),
            expected_return_date: now() + Duration::days(2),
            amount_paid: Decimal::from(20_000),
            status: ClientStatus::Active,
            livestock_type: "goats".to_string(),
            livestock_count: 10,
            livestock_value: Decimal::from(50_000),
        }
    }

    fn payment() -> Transaction {
        Transaction {
            id: 6,
            client_id: 2,
            client_name: "Joseph Ngugi".to_string(),
            transaction_type: TransactionType::Payment,
            amount: Decimal::from(20_000),
            method: "mpesa".to_string(),
            date: now() - Duration::days(1),
            status: TransactionStatus::Completed,
        }
    }

    #[test]
    fn test_format_currency_groups_thousands() {
        assert_eq!(format_currency(Decimal::from(0)), "KSh 0");
        assert_eq!(format_currency(Decimal::from(950)), "KSh 950");
        assert_eq!(format_currency(Decimal::from(12_345)), "KSh 12,345");
        assert_eq!(format_currency(Decimal::from(1_234_567)), "KSh 1,234,567");
        assert_eq!(format_currency(Decimal::new(1_234_550, 2)), "KSh 12,345.50");
        assert_eq!(format_currency(Decimal::from(-3_000)), "-KSh 3,000");
    }

    #[test]
    fn test_format_date_uses_business_day() {
        let calendar = BusinessCalendar::default();
        // 22:15 UTC is already the 19th at +03:00
        assert_eq!(format_date(now(), &calendar), "19 Oct 2026");
        let utc = BusinessCalendar::from_hours(0).unwrap();
        assert_eq!(format_date(now(), &utc), "18 Oct 2026");
    }

    #[test]
    fn test_client_receipt_lists_terms_and_history() {
        let calendar = BusinessCalendar::default();
        let entry = payment();

        let receipt = client_receipt(&joseph(), &[&entry], now(), &calendar);

        assert!(receipt.content.starts_with("NAGOLIE ENTERPRISES LTD\n"));
        assert!(receipt.content.contains("Client: Joseph  Ngugi\n"));
        assert!(receipt.content.contains("- Amount Borrowed: KSh 40,000\n"));
        assert!(receipt.content.contains("- Expected Amount: KSh 52,000\n"));
        assert!(receipt.content.contains("- Balance: KSh 32,000\n"));
        assert!(receipt.content.contains("- 18 Oct 2026: PAYMENT - KSh 20,000 (MPESA)\n"));
        assert!(receipt.content.contains("Generated on: 19 Oct 2026\n"));
        assert_eq!(
            receipt.file_name,
            format!("receipt_Joseph_Ngugi_{}.txt", now().timestamp_millis())
        );
    }

    #[test]
    fn test_client_receipt_blank_fields() {
        let mut client = joseph();
        client.name = " ".to_string();
        client.id_number = String::new();

        let receipt = client_receipt(&client, &[], now(), &BusinessCalendar::default());

        assert!(receipt.content.contains("ID Number: N/A\n"));
        assert!(receipt.file_name.starts_with("receipt_client_"));
    }

    #[test]
    fn test_transaction_receipt() {
        let receipt = transaction_receipt(&payment(), now(), &BusinessCalendar::default());

        assert!(receipt.content.contains("Transaction ID: 6\n"));
        assert!(receipt.content.contains("Type: PAYMENT\n"));
        assert!(receipt.content.contains("Method: MPESA\n"));
        assert!(receipt.content.contains("Status: COMPLETED\n"));
        assert_eq!(
            receipt.file_name,
            format!("transaction_6_{}.txt", now().timestamp_millis())
        );
    }
}
