//! CSV import service
//!
//! Bulk-imports transactions from a CSV file with the columns
//! `title, type, value, category` (first row is a header). Rows are parsed
//! fully before anything is written; categories are resolved in one batch and
//! all transactions are stored with a single insert.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, Transaction, TransactionType};
use crate::storage::{CategoryStore, Storage, TransactionStore};

use super::category::CategoryResolver;

const TITLE_COLUMN: usize = 0;
const TYPE_COLUMN: usize = 1;
const VALUE_COLUMN: usize = 2;
const CATEGORY_COLUMN: usize = 3;

/// A valid row from the CSV before import
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRow {
    pub title: String,
    pub kind: TransactionType,
    pub value: Money,
    /// `None` when the category cell is missing or blank
    pub category: Option<String>,
    /// Data row number, 1-based, header excluded
    pub row_number: usize,
}

/// Output of the parse step
#[derive(Debug, Clone, Default)]
pub struct ParsedImport {
    pub rows: Vec<ParsedRow>,
    /// Every non-empty category title, in order of first appearance
    pub categories: Vec<String>,
    /// Rows dropped for undecodable text or a missing or unusable title,
    /// type or value
    pub skipped_rows: usize,
}

/// Result of a completed import
#[derive(Debug, Clone)]
pub struct ImportResult {
    /// Stored transactions, in file order
    pub transactions: Vec<Transaction>,
    pub skipped_rows: usize,
    /// Whether the source file was removed after processing
    pub source_released: bool,
}

/// Service for CSV import
pub struct ImportService<'a> {
    transactions: &'a dyn TransactionStore,
    categories: &'a dyn CategoryStore,
    audit: Option<&'a AuditLogger>,
    delimiter: u8,
}

impl<'a> ImportService<'a> {
    pub fn new(
        transactions: &'a dyn TransactionStore,
        categories: &'a dyn CategoryStore,
    ) -> Self {
        Self {
            transactions,
            categories,
            audit: None,
            delimiter: b',',
        }
    }

    /// Record imported rows and created categories in the audit log
    pub fn with_audit(mut self, audit: &'a AuditLogger) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Service over the default file-backed storage
    pub fn from_storage(storage: &'a Storage) -> Self {
        Self::new(&storage.transactions, &storage.categories).with_audit(storage.audit())
    }

    /// Import a CSV file and remove it afterwards
    ///
    /// The file is removed only once its rows are stored; a failed import
    /// leaves it in place so it can be retried. A failed removal after a
    /// successful import is reported through [`ImportResult::source_released`]
    /// instead of failing the import.
    pub fn import_file(&self, path: &Path) -> LedgerResult<ImportResult> {
        let (transactions, skipped_rows) = self.import_from_path(path)?;
        let released = std::fs::remove_file(path).is_ok();

        Ok(ImportResult {
            transactions,
            skipped_rows,
            source_released: released,
        })
    }

    fn import_from_path(&self, path: &Path) -> LedgerResult<(Vec<Transaction>, usize)> {
        let file = File::open(path).map_err(|e| {
            LedgerError::Import(format!("Cannot open {}: {}", path.display(), e))
        })?;
        let parsed = self.parse_csv_from_reader(file)?;
        let skipped = parsed.skipped_rows;
        Ok((self.store(parsed)?, skipped))
    }

    /// Parse CSV data into valid rows
    ///
    /// Rows missing a title, type or value are skipped, as are rows whose
    /// type or value cannot be understood and rows that are not valid UTF-8.
    /// A missing category is allowed.
    pub fn parse_csv_from_reader<R: Read>(&self, reader: R) -> LedgerResult<ParsedImport> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .delimiter(self.delimiter)
            .from_reader(reader);

        let mut parsed = ParsedImport::default();
        let mut seen = HashSet::new();
        for (idx, record) in reader.byte_records().enumerate() {
            let row = StringRecord::from_byte_record(record?)
                .ok()
                .and_then(|record| parse_record(&record, idx + 1));

            match row {
                Some(row) => {
                    if let Some(category) = &row.category {
                        if seen.insert(category.clone()) {
                            parsed.categories.push(category.clone());
                        }
                    }
                    parsed.rows.push(row);
                }
                None => parsed.skipped_rows += 1,
            }
        }

        Ok(parsed)
    }

    /// Resolve categories and store every row in one batch
    fn store(&self, parsed: ParsedImport) -> LedgerResult<Vec<Transaction>> {
        if parsed.rows.is_empty() {
            return Ok(Vec::new());
        }

        let mut resolver = CategoryResolver::new(self.categories);
        if let Some(audit) = self.audit {
            resolver = resolver.with_audit(audit);
        }
        let categories = resolver.resolve(&parsed.categories)?;

        let batch: Vec<Transaction> = parsed
            .rows
            .into_iter()
            .map(|row| {
                let category_id = row
                    .category
                    .as_ref()
                    .and_then(|title| categories.get(title))
                    .map(|c| c.id);
                Transaction::new(row.title, row.kind, row.value, category_id)
            })
            .collect();

        let stored = self.transactions.insert_many(batch)?;

        if let Some(audit) = self.audit {
            let entries: Vec<_> = stored
                .iter()
                .map(|t| {
                    AuditEntry::create(
                        EntityType::Transaction,
                        t.id.to_string(),
                        Some(t.title.clone()),
                        t,
                    )
                })
                .collect();
            audit.log_committed(&entries);
        }

        Ok(stored)
    }
}

fn field(record: &StringRecord, column: usize) -> Option<&str> {
    record.get(column).filter(|s| !s.is_empty())
}

fn parse_record(record: &StringRecord, row_number: usize) -> Option<ParsedRow> {
    let title = field(record, TITLE_COLUMN)?;
    let kind = field(record, TYPE_COLUMN)?.parse().ok()?;
    let value = Money::parse(field(record, VALUE_COLUMN)?).ok()?;
    if value.is_negative() {
        return None;
    }

    Some(ParsedRow {
        title: title.to_string(),
        kind,
        value,
        category: field(record, CATEGORY_COLUMN).map(str::to_string),
        row_number,
    })
}
