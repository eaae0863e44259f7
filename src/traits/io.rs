//! RON I/O
use crate::error::GridError;
use std::fs;

pub trait ConvertToSerializable {
    //! Convert to a serializable description

    /// Serializable type
    type SerializableType: serde::Serialize;
    /// Convert to the serializable type
    fn to_serializable(&self) -> Self::SerializableType;
}

/// File holding the data of one process: `name.ext` becomes `name.<rank>.ext`
pub(crate) fn rank_filename(filename: &str, rank: usize) -> String {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}.{rank}.{ext}"),
        _ => format!("{filename}.{rank}"),
    }
}

pub trait RONExport: ConvertToSerializable {
    //! Export for RON

    /// Rank of the current process
    fn export_rank(&self) -> usize;

    /// Number of processes that export together
    fn export_size(&self) -> usize;

    /// Generate the RON string for the data on this process
    fn to_ron_string(&self) -> Result<String, GridError> {
        Ok(ron::to_string(&self.to_serializable())?)
    }

    /// Export as RON
    ///
    /// Each process writes its own file next to `filename`; the first process
    /// also writes `filename` itself, recording the number of processes.
    fn export_as_ron(&self, filename: &str) -> Result<(), GridError> {
        fs::write(rank_filename(filename, self.export_rank()), self.to_ron_string()?)?;
        if self.export_rank() == 0 {
            let summary = ParallelSummaryData {
                mpi_ranks: self.export_size(),
            };
            fs::write(filename, ron::to_string(&summary)?)?;
        }
        Ok(())
    }
}

pub trait RONImport: Sized + for<'de> serde::Deserialize<'de> {
    //! Import for RON

    /// Parse a RON string
    fn from_ron_string(s: &str) -> Result<Self, GridError> {
        Ok(ron::from_str(s)?)
    }

    /// Import the data written by process `rank` of a collective of `size` processes
    fn import_from_ron(filename: &str, rank: usize, size: usize) -> Result<Self, GridError> {
        let content = fs::read_to_string(filename)?;
        let summary: ParallelSummaryData = ron::from_str(&content)?;
        if summary.mpi_ranks != size {
            return Err(GridError::RankCountMismatch {
                expected: size,
                found: summary.mpi_ranks,
            });
        }
        Self::from_ron_string(&fs::read_to_string(rank_filename(filename, rank))?)
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
/// Summary data written next to the per-process files
pub struct ParallelSummaryData {
    mpi_ranks: usize,
}
