use std::fmt;

/// Statistics from a completed write
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriterStats {
    /// Features written
    pub features_written: usize,
    /// Rows dropped because they referenced missing entities
    pub rows_skipped: usize,
    /// Parquet row groups written (0 for other formats)
    pub row_groups_written: usize,
    /// Size of the output in bytes
    pub file_size_bytes: u64,
}

impl fmt::Display for WriterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Wrote {} features", self.features_written)?;
        if self.row_groups_written > 0 {
            write!(f, " in {} row groups", self.row_groups_written)?;
        }
        if self.rows_skipped > 0 {
            write!(f, " ({} rows skipped)", self.rows_skipped)?;
        }
        Ok(())
    }
}
