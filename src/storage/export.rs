use crate::models::{Direction, TransactionRecord, TransactionStatus};
use crate::storage::StorageError;
use csv::WriterBuilder;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct TransactionRow<'a> {
    id: &'a str,
    date: String,
    time: String,
    #[serde(rename = "type")]
    direction: Direction,
    status: TransactionStatus,
    amount: String,
    merchant: &'a str,
    description: &'a str
}

/// Writes the transaction history as CSV, newest first, with a header row.
pub fn write_transactions<W: Write>(writer: W, records: &[TransactionRecord]) -> Result<(), StorageError> {
    let mut output = WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    output.write_record(["id", "date", "time", "type", "status", "amount", "merchant", "description"])?;

    for record in records {
        output.serialize(TransactionRow {
            id: &record.id,
            date: record.date(),
            time: record.time(),
            direction: record.direction,
            status: record.status,
            amount: record.amount.to_string(),
            merchant: &record.counterparty,
            description: record.description()
        })?;
    }

    output.flush()?;

    Ok(())
}
