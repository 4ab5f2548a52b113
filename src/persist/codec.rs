//! History blob encoding.
//!
//! Layout (little endian):
//!
//! | Offset | Size | Field                       |
//! |--------|------|-----------------------------|
//! | 0      | 4    | magic `RKSH`                |
//! | 4      | 4    | format version (`u32`)      |
//! | 8      | 8    | payload length (`u64`)      |
//! | 16     | n    | rkyv archive of the history |
//!
//! Snapshots store `(width, height, elevations)` only. Triangulation is
//! recomputed from the dimensions when a snapshot is loaded into a grid.

use rkyv::util::AlignedVec;
use rkyv::{Archive, Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::Result;
use crate::history::{EditHistory, TerrainHistory};
use crate::terrain::TerrainSnapshot;

const MAGIC: &[u8; 4] = b"RKSH";
const VERSION: u32 = 1;
const HEADER_LEN: usize = 16;

/// Serializable snapshot
#[derive(Archive, Deserialize, Serialize)]
struct SnapshotRecord {
    width: u32,
    height: u32,
    elevations: Vec<f32>,
}

/// Serializable history: every snapshot in chain order plus the cursor
#[derive(Archive, Deserialize, Serialize)]
struct HistoryRecord {
    snapshots: Vec<SnapshotRecord>,
    state_index: u32,
}

/// Encode the whole history, including states ahead of the cursor.
pub fn encode_history(history: &TerrainHistory) -> Result<Vec<u8>> {
    let state_index = history.current_index().ok_or(Error::EmptyHistory)?;

    let record = HistoryRecord {
        snapshots: history
            .iter()
            .map(|snapshot| SnapshotRecord {
                width: snapshot.width(),
                height: snapshot.height(),
                elevations: snapshot.elevations().to_vec(),
            })
            .collect(),
        state_index: state_index as u32,
    };

    let payload = rkyv::to_bytes::<rkyv::rancor::Error>(&record)
        .map_err(|e| Error::Encode(e.to_string()))?;

    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.extend_from_slice(MAGIC);
    bytes.extend_from_slice(&VERSION.to_le_bytes());
    bytes.extend_from_slice(&(payload.len() as u64).to_le_bytes());
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

/// Decode and validate a history blob.
///
/// Either the complete history is returned or an error; nothing is
/// partially reconstructed.
pub fn decode_history(bytes: &[u8]) -> Result<TerrainHistory> {
    if bytes.len() < HEADER_LEN {
        return Err(Error::Corrupt(format!(
            "{} bytes is shorter than the {} byte header",
            bytes.len(),
            HEADER_LEN
        )));
    }

    let (header, payload) = bytes.split_at(HEADER_LEN);
    if &header[0..4] != MAGIC {
        return Err(Error::Corrupt("invalid magic bytes".to_string()));
    }

    let version = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);
    if version != VERSION {
        return Err(Error::Corrupt(format!("unsupported version: {}", version)));
    }

    let mut len_bytes = [0u8; 8];
    len_bytes.copy_from_slice(&header[8..16]);
    let len = u64::from_le_bytes(len_bytes);
    if payload.len() as u64 != len {
        return Err(Error::Corrupt(format!(
            "payload is {} bytes, header says {}",
            payload.len(),
            len
        )));
    }

    // Archived fields need their natural alignment.
    let mut aligned = AlignedVec::<16>::with_capacity(payload.len());
    aligned.extend_from_slice(payload);

    let record = rkyv::from_bytes::<HistoryRecord, rkyv::rancor::Error>(&aligned)
        .map_err(|e| Error::Corrupt(e.to_string()))?;

    into_history(record)
}

/// Check the record's contents and build the history.
fn into_history(record: HistoryRecord) -> Result<TerrainHistory> {
    let Some(first) = record.snapshots.first() else {
        return Err(Error::Corrupt("history has no snapshots".to_string()));
    };
    let (width, height) = (first.width, first.height);

    let mut snapshots = Vec::with_capacity(record.snapshots.len());
    for (i, snapshot) in record.snapshots.into_iter().enumerate() {
        if snapshot.width != width || snapshot.height != height {
            return Err(Error::Corrupt(format!(
                "snapshot {} is {}x{}, expected {}x{}",
                i, snapshot.width, snapshot.height, width, height
            )));
        }
        if snapshot.elevations.iter().any(|e| !e.is_finite()) {
            return Err(Error::Corrupt(format!("snapshot {} has non-finite elevations", i)));
        }

        let snapshot = TerrainSnapshot::new(snapshot.width, snapshot.height, snapshot.elevations)
            .map_err(|e| Error::Corrupt(format!("snapshot {}: {}", i, e)))?;
        snapshots.push(snapshot);
    }

    EditHistory::from_vec(snapshots, record.state_index as usize)
        .map_err(|e| Error::Corrupt(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::HeightGrid;

    fn sample_history() -> TerrainHistory {
        let mut grid = HeightGrid::new(3, 2, -10.0, 10.0);
        let mut history = TerrainHistory::new();
        history.add(grid.snapshot());
        for step in 1..=3 {
            grid.set(step, 1, step as f32 * 1.5).unwrap();
            history.add(grid.snapshot());
        }
        history.enter_prev().unwrap();
        history
    }

    #[test]
    fn test_round_trip_keeps_branch_and_cursor() {
        let history = sample_history();
        let bytes = encode_history(&history).unwrap();
        assert_eq!(&bytes[0..4], MAGIC);

        let decoded = decode_history(&bytes).unwrap();
        assert_eq!(decoded.len(), 4);
        assert_eq!(decoded.current_index(), Some(2));
        assert!(decoded.can_go_to_next());
        assert_eq!(decoded.to_vec(), history.to_vec());
    }

    #[test]
    fn test_encode_empty_fails() {
        assert!(matches!(encode_history(&TerrainHistory::new()), Err(Error::EmptyHistory)));
    }

    #[test]
    fn test_rejects_bad_magic() {
        let mut bytes = encode_history(&sample_history()).unwrap();
        bytes[0] = b'X';
        assert!(matches!(decode_history(&bytes), Err(Error::Corrupt(_))));
    }

    #[test]
    fn test_rejects_unknown_version() {
        let mut bytes = encode_history(&sample_history()).unwrap();
        bytes[4..8].copy_from_slice(&99u32.to_le_bytes());
        assert!(matches!(decode_history(&bytes), Err(Error::Corrupt(_))));
    }

    #[test]
    fn test_rejects_truncation() {
        let bytes = encode_history(&sample_history()).unwrap();
        for len in [0, 8, HEADER_LEN, bytes.len() - 1] {
            assert!(decode_history(&bytes[..len]).is_err(), "accepted {} bytes", len);
        }
    }

    #[test]
    fn test_rejects_garbage_payload() {
        let mut bytes = encode_history(&sample_history()).unwrap();
        for b in &mut bytes[HEADER_LEN..] {
            *b = 0xFF;
        }
        assert!(matches!(decode_history(&bytes), Err(Error::Corrupt(_))));
    }

    #[test]
    fn test_rejects_inconsistent_record() {
        let mismatched = HistoryRecord {
            snapshots: vec![
                SnapshotRecord { width: 1, height: 1, elevations: vec![0.0; 4] },
                SnapshotRecord { width: 2, height: 1, elevations: vec![0.0; 6] },
            ],
            state_index: 0,
        };
        assert!(matches!(into_history(mismatched), Err(Error::Corrupt(_))));

        let short = HistoryRecord {
            snapshots: vec![SnapshotRecord { width: 1, height: 1, elevations: vec![0.0; 3] }],
            state_index: 0,
        };
        assert!(into_history(short).is_err());

        let bad_cursor = HistoryRecord {
            snapshots: vec![SnapshotRecord { width: 1, height: 1, elevations: vec![0.0; 4] }],
            state_index: 1,
        };
        assert!(into_history(bad_cursor).is_err());

        let empty = HistoryRecord { snapshots: Vec::new(), state_index: 0 };
        assert!(into_history(empty).is_err());
    }

    #[test]
    fn test_rejects_unindexable_dimensions() {
        let record = HistoryRecord {
            snapshots: vec![SnapshotRecord { width: u32::MAX, height: u32::MAX, elevations: Vec::new() }],
            state_index: 0,
        };
        let payload = rkyv::to_bytes::<rkyv::rancor::Error>(&record).unwrap();

        let mut bytes = Vec::new();
        bytes.extend_from_slice(MAGIC);
        bytes.extend_from_slice(&VERSION.to_le_bytes());
        bytes.extend_from_slice(&(payload.len() as u64).to_le_bytes());
        bytes.extend_from_slice(&payload);

        assert!(matches!(decode_history(&bytes), Err(Error::Corrupt(_))));
    }
}
