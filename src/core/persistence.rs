//! CSV persistence for the session log.
//!
//! The whole log is written once, at session end. Writes go to a sibling
//! `.partial` file that is renamed over the target, so the target either
//! holds a complete log or is left as it was.

use crate::error::SessionError;
use crate::participant::SessionTimestamp;
use crate::trial_log::{TrialLog, TrialRecord};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

pub const COLUMNS: [&str; 9] = [
    "timestamp",
    "ID",
    "age",
    "gender",
    "condition",
    "trial",
    "choice",
    "reward",
    "cum_reward",
];

/// `logfile_<id>_<timestamp>.csv`, with characters that cannot appear in a
/// file name replaced by `_`.
pub fn log_file_name(participant_id: &str, timestamp: &SessionTimestamp) -> String {
    let id: String = participant_id
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("logfile_{}_{}.csv", id, timestamp.as_str())
}

/// Write the full log into `dir`, replacing any file of the same name.
pub fn save_log(
    log: &TrialLog,
    dir: &Path,
    participant_id: &str,
    timestamp: &SessionTimestamp,
) -> Result<PathBuf, SessionError> {
    fs::create_dir_all(dir).map_err(|e| SessionError::io(dir, e))?;

    let target = dir.join(log_file_name(participant_id, timestamp));
    let mut partial = target.clone().into_os_string();
    partial.push(".partial");
    let partial = PathBuf::from(partial);

    if let Err(e) = write_csv(log, &partial) {
        if fs::remove_file(&partial).is_err() && partial.exists() {
            tracing::warn!("Could not remove partial log {:?}", partial);
        }
        return Err(e);
    }

    fs::rename(&partial, &target).map_err(|e| {
        let _ = fs::remove_file(&partial);
        SessionError::io(&target, e)
    })?;

    tracing::info!("Trial log written ({} rows) to {:?}", log.len(), target);
    Ok(target)
}

fn write_csv(log: &TrialLog, path: &Path) -> Result<(), SessionError> {
    let file = File::create(path).map_err(|e| SessionError::io(path, e))?;
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(BufWriter::new(file));

    // Header goes out explicitly so an empty log still gets one.
    wtr.write_record(COLUMNS)?;
    for record in log.records() {
        wtr.serialize(record)?;
    }

    let buf = wtr
        .into_inner()
        .map_err(|e| SessionError::io(path, e.into_error()))?;
    let file = buf
        .into_inner()
        .map_err(|e| SessionError::io(path, e.into_error()))?;
    file.sync_all().map_err(|e| SessionError::io(path, e))?;
    Ok(())
}

/// Read a session log back in file order.
pub fn load_log(path: &Path) -> Result<Vec<TrialRecord>, SessionError> {
    let mut rdr = csv::Reader::from_path(path)?;

    let headers = rdr.headers()?.clone();
    if headers.iter().ne(COLUMNS.iter().copied()) {
        return Err(SessionError::InvalidInput {
            what: "log header",
            got: headers.iter().collect::<Vec<_>>().join(","),
            expected: "timestamp,ID,age,gender,condition,trial,choice,reward,cum_reward",
        });
    }

    rdr.deserialize::<TrialRecord>()
        .map(|row| row.map_err(SessionError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::{Choice, Condition};
    use crate::participant::{Gender, Participant};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("slotlab-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn stamp() -> SessionTimestamp {
        SessionTimestamp::from_string("2026-10-19_14h03.27.512")
    }

    fn sample_log() -> TrialLog {
        let p = Participant {
            id: "p7".to_string(),
            age: "24".to_string(),
            gender: Gender::Unlisted("non-binary".to_string()),
        };
        let ts = stamp();
        let mut log = TrialLog::new();
        log.append(TrialRecord::new(&ts, &p, Condition::Loss, 0, Choice::Right, -4, -4));
        log.append(TrialRecord::new(&ts, &p, Condition::Loss, 1, Choice::Left, 0, -4));
        log.append(TrialRecord::new(&ts, &p, Condition::Gain, 0, Choice::Left, 4, 4));
        log
    }

    #[test]
    fn file_name_follows_pattern() {
        assert_eq!(
            log_file_name("p01", &stamp()),
            "logfile_p01_2026-10-19_14h03.27.512.csv"
        );
        assert_eq!(
            log_file_name("a/b:c", &stamp()),
            "logfile_a_b_c_2026-10-19_14h03.27.512.csv"
        );
    }

    #[test]
    fn writes_header_then_rows_in_column_order() {
        let dir = scratch_dir("columns");
        let path = save_log(&sample_log(), &dir, "p7", &stamp()).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("timestamp,ID,age,gender,condition,trial,choice,reward,cum_reward")
        );
        assert_eq!(
            lines.next(),
            Some("2026-10-19_14h03.27.512,p7,24,non-binary,loss,0,right,-4,-4")
        );
        assert_eq!(lines.count(), 2);
        assert!(!dir.join(format!("{}.partial", log_file_name("p7", &stamp()))).exists());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn round_trip_matches_records() {
        let dir = scratch_dir("roundtrip");
        let log = sample_log();
        let path = save_log(&log, &dir, "p7", &stamp()).unwrap();
        let back = load_log(&path).unwrap();
        assert_eq!(back.as_slice(), log.records());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn free_text_matching_a_choice_reads_back_equal() {
        let dir = scratch_dir("gender-text");
        let p = Participant {
            id: "p8".to_string(),
            age: "31".to_string(),
            gender: Gender::Unlisted("female".to_string()),
        };
        let mut log = TrialLog::new();
        log.append(TrialRecord::new(&stamp(), &p, Condition::Gain, 0, Choice::Right, 1, 1));
        let path = save_log(&log, &dir, "p8", &stamp()).unwrap();
        let back = load_log(&path).unwrap();
        assert_eq!(back[0].gender, Gender::Female);
        assert_eq!(back.as_slice(), log.records());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn same_name_is_overwritten() {
        let dir = scratch_dir("overwrite");
        let log = sample_log();
        save_log(&log, &dir, "p7", &stamp()).unwrap();
        let path = save_log(&TrialLog::new(), &dir, "p7", &stamp()).unwrap();
        assert!(load_log(&path).unwrap().is_empty());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn unwritable_target_is_an_error_and_leaves_nothing() {
        let dir = scratch_dir("blocked");
        fs::create_dir_all(&dir).unwrap();
        // A directory squatting on the target name makes the rename fail.
        let target = dir.join(log_file_name("p7", &stamp()));
        fs::create_dir_all(target.join("occupied")).unwrap();

        let err = save_log(&sample_log(), &dir, "p7", &stamp()).unwrap_err();
        assert!(matches!(err, SessionError::Io { .. }));
        assert!(!dir.join(format!("{}.partial", log_file_name("p7", &stamp()))).exists());
        assert!(target.join("occupied").is_dir());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn foreign_header_is_rejected() {
        let dir = scratch_dir("header");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("other.csv");
        fs::write(&path, "a,b\n1,2\n").unwrap();
        assert!(matches!(
            load_log(&path),
            Err(SessionError::InvalidInput { what: "log header", .. })
        ));
        let _ = fs::remove_dir_all(&dir);
    }
}
