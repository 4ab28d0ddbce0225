//! CSV format handling for operation scripts and transaction output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to domain types
//! - Transaction table serialization
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{
    Address, Amount, Operation, OperationRecord, OperationType, Transaction, TransactionId,
    TransactionKind,
};
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// CSV record structure for deserialization
///
/// Matches the script format with columns: op, caller, tx, amount, address.
/// Only `op` and `caller` are required on every row; which of the other
/// fields must be present depends on the operation.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    pub op: String,
    pub caller: String,
    pub tx: Option<TransactionId>,
    pub amount: Option<String>,
    pub address: Option<String>,
}

/// Parse a comma or whitespace separated list of identities
///
/// Used for the `--owners`/`--reject` flags and for owner files. Empty
/// entries are skipped.
pub fn parse_address_list(text: &str) -> Result<Vec<Address>, String> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|entry| !entry.is_empty())
        .map(|entry| Address::from_str(entry).map_err(|e| e.to_string()))
        .collect()
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.trim().is_empty())
}

/// Convert a CsvRecord to an OperationRecord
///
/// This function:
/// - Parses the op string into an OperationType (case-insensitive)
/// - Parses the caller and any address field as identities
/// - Parses the amount string as an integer amount (if present)
/// - Validates that each operation carries the fields it needs
///
/// Fields an operation does not use are ignored.
///
/// # Arguments
///
/// * `csv_record` - The deserialized CSV record
///
/// # Returns
///
/// Result containing either:
/// - Ok(OperationRecord) - Successfully converted record
/// - Err(String) - Error message describing the conversion failure
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<OperationRecord, String> {
    let op_type = match csv_record.op.to_lowercase().as_str() {
        "deposit" => OperationType::Deposit,
        "send" => OperationType::Send,
        "withdraw" => OperationType::Withdraw,
        "approve" => OperationType::Approve,
        "revoke" => OperationType::Revoke,
        "execute" => OperationType::Execute,
        "replace" => OperationType::Replace,
        _ => return Err(format!("Invalid operation: '{}'", csv_record.op)),
    };

    let caller = Address::from_str(&csv_record.caller)
        .map_err(|e| format!("Invalid caller for {}: {}", op_type, e))?;

    let amount = match non_empty(csv_record.amount) {
        Some(amount_str) => match Amount::from_str(amount_str.trim()) {
            Ok(amount) => Some(amount),
            Err(_) => {
                return Err(format!(
                    "Invalid amount '{}' for {}",
                    amount_str, op_type
                ))
            }
        },
        None => None,
    };

    let address = match non_empty(csv_record.address) {
        Some(address_str) => Some(
            Address::from_str(&address_str)
                .map_err(|e| format!("Invalid address for {}: {}", op_type, e))?,
        ),
        None => None,
    };

    let require_amount = || amount.ok_or_else(|| format!("{} requires an amount", op_type));
    let require_address = || address.ok_or_else(|| format!("{} requires an address", op_type));
    let require_tx = || {
        csv_record
            .tx
            .ok_or_else(|| format!("{} requires a tx", op_type))
    };

    let operation = match op_type {
        OperationType::Deposit => Operation::Deposit {
            amount: require_amount()?,
        },
        OperationType::Send => Operation::Send {
            amount: require_amount()?,
            recipient: require_address()?,
        },
        OperationType::Withdraw => Operation::Withdraw,
        OperationType::Approve => Operation::Approve { tx: require_tx()? },
        OperationType::Revoke => Operation::Revoke { tx: require_tx()? },
        OperationType::Execute => Operation::Execute { tx: require_tx()? },
        OperationType::Replace => Operation::Replace {
            new_owner: require_address()?,
        },
    };

    Ok(OperationRecord { caller, operation })
}

/// Write the transaction table to CSV format
///
/// Writes transactions in id order with columns:
/// id, kind, amount, recipient, approvals, executed.
/// Withdraw rows leave amount and recipient empty.
///
/// # Arguments
///
/// * `transactions` - Stored transactions, in id order
/// * `output` - Mutable reference to a writer for outputting CSV
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_transactions_csv(
    transactions: &[Transaction],
    output: &mut dyn Write,
) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["id", "kind", "amount", "recipient", "approvals", "executed"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for tx in transactions {
        let (amount, recipient) = match tx.kind {
            TransactionKind::Send { amount, recipient } => {
                (amount.to_string(), recipient.to_string())
            }
            TransactionKind::Withdraw => (String::new(), String::new()),
        };

        writer
            .write_record(&[
                tx.id.to_string(),
                tx.kind.name().to_string(),
                amount,
                recipient,
                tx.approval_count.to_string(),
                tx.executed.to_string(),
            ])
            .map_err(|e| format!("Failed to write transaction record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
