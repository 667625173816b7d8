//! # Ledger Table
//!
//! In-memory inventory table with load/query/append/save.
//!
//! ## Storage Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  records: Vec<InventoryRecord>      index: HashMap<barcode, position>   │
//! │  ┌───┬──────────────┬─────┐          ┌──────────────┬───┐               │
//! │  │ 0 │ 5449000000996│ ... │ ◄─────── │ 5449000000996│ 0 │               │
//! │  │ 1 │ 123          │ ... │ ◄─────── │ 123          │ 1 │               │
//! │  └───┴──────────────┴─────┘          └──────────────┴───┘               │
//! │                                                                         │
//! │  Insertion order is the file order; the index gives O(1) lookups and    │
//! │  enforces barcode uniqueness.                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use stockscan_core::{InventoryRecord, Money};
use tracing::{debug, info, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::row::{LedgerRow, LEDGER_HEADER};

/// The inventory table.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    records: Vec<InventoryRecord>,
    index: HashMap<String, usize>,
}

/// Totals across the whole ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LedgerSummary {
    /// Number of distinct items.
    pub items: usize,
    /// Sum of remaining balances.
    pub units_on_hand: i64,
    /// Remaining stock valued at purchase price.
    pub stock_value: Money,
    /// Sum of recorded income.
    pub income: Money,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Ledger::default()
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Loads the ledger file at `path`.
    ///
    /// ## Returns
    /// * `Ok(Ledger)` - the file's records, or an empty table when the file
    ///   does not exist yet (first run)
    /// * `Err(LedgerError::Persistence)` - the file exists but can't be read
    /// * `Err(LedgerError::Corrupt)` - a row is malformed or repeats a barcode
    pub fn load(path: impl AsRef<Path>) -> LedgerResult<Ledger> {
        let path = path.as_ref();

        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(?path, "Ledger file not found, starting with an empty ledger");
                return Ok(Ledger::new());
            }
            Err(err) => return Err(LedgerError::from(err).at_path(path, "read")),
        };

        let ledger =
            Ledger::read_from(BufReader::new(file)).map_err(|err| err.at_path(path, "read"))?;
        info!(?path, records = ledger.len(), "Ledger loaded");
        Ok(ledger)
    }

    /// Reads a ledger from any CSV source.
    ///
    /// Column order does not matter and unknown columns are ignored, but
    /// every column of [`LEDGER_HEADER`] must be present.
    pub fn read_from<R: Read>(reader: R) -> LedgerResult<Ledger> {
        let mut csv = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv.headers()?.clone();
        if headers.is_empty() {
            warn!("Ledger source is empty, treating it as an empty ledger");
            return Ok(Ledger::new());
        }
        if let Some(missing) = LEDGER_HEADER
            .iter()
            .find(|column| !headers.iter().any(|h| h == **column))
        {
            return Err(LedgerError::Corrupt {
                row: 1,
                reason: format!("missing column '{}'", missing),
            });
        }

        let mut ledger = Ledger::new();
        for (i, result) in csv.deserialize::<LedgerRow>().enumerate() {
            let row = i + 2;
            let parsed = result.map_err(|err| LedgerError::Corrupt {
                row,
                reason: err.to_string(),
            })?;
            let record = parsed
                .into_record()
                .map_err(|reason| LedgerError::Corrupt { row, reason })?;
            ledger.append(record).map_err(|err| LedgerError::Corrupt {
                row,
                reason: err.to_string(),
            })?;
        }

        Ok(ledger)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Exact-match lookup by barcode.
    ///
    /// The barcode is trimmed first so that a stray newline from a wedge
    /// reader still finds the record.
    pub fn query(&self, barcode: &str) -> Option<&InventoryRecord> {
        self.index
            .get(barcode.trim())
            .map(|&position| &self.records[position])
    }

    /// Whether a record with this barcode exists.
    pub fn contains(&self, barcode: &str) -> bool {
        self.index.contains_key(barcode.trim())
    }

    /// Records in insertion (file) order.
    pub fn records(&self) -> impl Iterator<Item = &InventoryRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Totals across all records.
    pub fn summary(&self) -> LedgerSummary {
        self.records.iter().fold(
            LedgerSummary {
                items: 0,
                units_on_hand: 0,
                stock_value: Money::zero(),
                income: Money::zero(),
            },
            |mut acc, record| {
                acc.items += 1;
                acc.units_on_hand = acc.units_on_hand.saturating_add(record.remaining_balance);
                acc.stock_value = acc.stock_value.saturating_add(record.stock_value());
                acc.income = acc.income.saturating_add(record.income);
                acc
            },
        )
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Adds a record to the in-memory table.
    ///
    /// ## Returns
    /// * `Ok(())` - record appended (not yet on disk)
    /// * `Err(LedgerError::DuplicateKey)` - barcode already present; the
    ///   table is unchanged
    ///
    /// The barcode is stored trimmed, the same way [`Ledger::query`] reads it.
    pub fn append(&mut self, mut record: InventoryRecord) -> LedgerResult<()> {
        let trimmed = record.barcode.trim();
        if trimmed.len() != record.barcode.len() {
            record.barcode = trimmed.to_string();
        }

        if self.index.contains_key(&record.barcode) {
            return Err(LedgerError::duplicate(record.barcode));
        }

        debug!(barcode = %record.barcode, "Appending record");
        self.index.insert(record.barcode.clone(), self.records.len());
        self.records.push(record);
        Ok(())
    }

    // =========================================================================
    // Saving
    // =========================================================================

    /// Writes the whole table to `path`, replacing what was there.
    ///
    /// ## Write Strategy
    /// ```text
    /// write  .inventory.csv.tmp  ──► fsync ──► rename over inventory.csv
    /// ```
    /// A failure at any step leaves the previous file intact and the
    /// in-memory table untouched, so the operator can simply save again.
    pub fn save(&self, path: impl AsRef<Path>) -> LedgerResult<()> {
        let path = path.as_ref();
        let tmp = temp_path(path);

        self.save_via(path, &tmp).map_err(|err| {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                debug!(?tmp, error = %cleanup, "Temp ledger file not removed");
            }
            err.at_path(path, "saved")
        })?;

        info!(?path, records = self.len(), "Ledger saved");
        Ok(())
    }

    fn save_via(&self, path: &Path, tmp: &Path) -> LedgerResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(tmp)?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        let file = writer.into_inner().map_err(|err| err.into_error())?;
        file.sync_all()?;
        fs::rename(tmp, path)?;
        Ok(())
    }

    /// Writes the header and every record as CSV.
    pub fn write_to<W: Write>(&self, writer: W) -> LedgerResult<()> {
        let mut csv = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        csv.write_record(LEDGER_HEADER)?;
        for record in &self.records {
            csv.serialize(LedgerRow::from(record))?;
        }
        csv.flush()?;
        Ok(())
    }
}

/// `dir/inventory.csv` → `dir/.inventory.csv.tmp`
fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "ledger".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}

// =============================================================================
// Unit Tests
// =============================================================================
