//! Persistence for generated schedules, keyed by user id

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::Result;
use crate::schedule::Schedule;

/// Where schedules are saved once generated
pub trait ScheduleStore {
    fn save_schedule(&self, user_id: &str, schedule: &Schedule) -> Result<()>;

    fn load_schedule(&self, user_id: &str) -> Result<Option<Schedule>>;
}

/// Store that keeps schedules in memory
#[derive(Debug, Default)]
pub struct MemoryScheduleStore {
    schedules: Mutex<HashMap<String, Schedule>>,
}

impl MemoryScheduleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScheduleStore for MemoryScheduleStore {
    fn save_schedule(&self, user_id: &str, schedule: &Schedule) -> Result<()> {
        let mut schedules = self.schedules.lock().unwrap_or_else(|e| e.into_inner());
        schedules.insert(user_id.to_string(), schedule.clone());
        Ok(())
    }

    fn load_schedule(&self, user_id: &str) -> Result<Option<Schedule>> {
        let schedules = self.schedules.lock().unwrap_or_else(|e| e.into_inner());
        Ok(schedules.get(user_id).cloned())
    }
}

/// Store that writes one `<user id>.json` file per user into a directory
#[derive(Debug, Clone)]
pub struct JsonScheduleStore {
    dir: PathBuf,
}

impl JsonScheduleStore {
    /// Create the store, creating the directory if needed
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        std::fs::create_dir_all(dir.as_ref())?;
        Ok(Self {
            dir: dir.as_ref().to_path_buf(),
        })
    }

    fn path_for(&self, user_id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", user_id))
    }
}

impl ScheduleStore for JsonScheduleStore {
    fn save_schedule(&self, user_id: &str, schedule: &Schedule) -> Result<()> {
        let path = self.path_for(user_id);
        let writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(writer, schedule)?;
        log::debug!("Saved schedule for {} to {}", user_id, path.display());
        Ok(())
    }

    fn load_schedule(&self, user_id: &str) -> Result<Option<Schedule>> {
        let file = match File::open(self.path_for(user_id)) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_reader(BufReader::new(file))?))
    }
}
