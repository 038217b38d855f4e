//! JSON file storage.
//!
//! Each store keeps its whole content in a single JSON file which is read on
//! every call and rewritten on every write. Writes go to a temporary file
//! that is then renamed over the previous one, so readers always see a
//! complete file, and are serialized by a mutex so that concurrent
//! read-modify-write cycles do not lose updates.
//!
//! A missing file is an empty store. A file that cannot be parsed is an
//! error: the stores never start over silently, which would lose a league.

use std::{collections::BTreeMap, io::ErrorKind};

use anyhow::{Context, anyhow};
use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use serde::{Serialize, de::DeserializeOwned};
use tokio::{fs, sync::Mutex};

use crate::{
    league::{Installation, Match, Member, NewMatch},
    store::{InstallationStore, MatchStore},
};

/// Installations stored in a JSON file, indexed by OAuth client id.
pub struct JsonInstallationStore {
    /// Path to the JSON file
    path: String,
    /// Serializes writes
    write_lock: Mutex<()>,
}

impl JsonInstallationStore {
    /// Creates a store backed by the file at `path`. The file is created on
    /// the first write.
    pub fn new(path: String) -> Self {
        JsonInstallationStore {
            path,
            write_lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> anyhow::Result<BTreeMap<String, Installation>> {
        read_json(&self.path).await
    }
}

#[async_trait]
impl InstallationStore for JsonInstallationStore {
    async fn get_installation(&self, oauth_id: &str) -> anyhow::Result<Option<Installation>> {
        let mut installations = self.load().await?;
        Ok(installations.remove(oauth_id))
    }

    async fn put_installation(&self, oauth_id: &str, oauth_secret: &str) -> anyhow::Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut installations = self.load().await?;

        installations
            .entry(oauth_id.to_owned())
            .and_modify(|installation| installation.oauth_secret = oauth_secret.to_owned())
            .or_insert_with(|| Installation::new(oauth_id, oauth_secret));

        write_json(&self.path, &installations).await?;
        info!("stored installation {}", oauth_id);

        Ok(())
    }

    async fn add_members(
        &self,
        oauth_id: &str,
        room_id: &str,
        members: &[Member],
    ) -> anyhow::Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut installations = self.load().await?;

        let installation = installations
            .get_mut(oauth_id)
            .ok_or_else(|| anyhow!("unknown installation {}", oauth_id))?;
        let room = installation.rooms.entry(room_id.to_owned()).or_default();
        for member in members {
            room.members.insert(member.key.clone(), member.name.clone());
        }

        write_json(&self.path, &installations).await?;
        info!("added {} member(s) to room {}", members.len(), room_id);

        Ok(())
    }
}

/// Match history stored in a JSON file, indexed by room id.
pub struct JsonMatchStore {
    /// Path to the JSON file
    path: String,
    /// Serializes writes
    write_lock: Mutex<()>,
}

impl JsonMatchStore {
    /// Creates a store backed by the file at `path`. The file is created on
    /// the first write.
    pub fn new(path: String) -> Self {
        JsonMatchStore {
            path,
            write_lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> anyhow::Result<BTreeMap<String, Vec<Match>>> {
        read_json(&self.path).await
    }
}

#[async_trait]
impl MatchStore for JsonMatchStore {
    async fn get_matches(&self, room_id: &str) -> anyhow::Result<Vec<Match>> {
        let mut history = self.load().await?;
        Ok(history.remove(room_id).unwrap_or_default())
    }

    async fn save_match(&self, room_id: &str, new_match: NewMatch) -> anyhow::Result<Match> {
        let _guard = self.write_lock.lock().await;
        let mut history = self.load().await?;

        let recorded = Match::create(room_id, new_match, Utc::now());
        history
            .entry(room_id.to_owned())
            .or_default()
            .push(recorded.clone());

        write_json(&self.path, &history).await?;
        info!("saved match {} in room {}", recorded.id, room_id);

        Ok(recorded)
    }
}

/// Reads and deserializes a JSON file, a missing file giving the default value.
async fn read_json<T>(path: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned + Default,
{
    let serialized = match fs::read_to_string(path).await {
        Ok(serialized) => serialized,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("{} does not exist yet, starting empty", path);
            return Ok(T::default());
        }
        Err(e) => return Err(e).with_context(|| format!("failed to read {}", path)),
    };

    serde_json::from_str(&serialized).with_context(|| format!("failed to parse {}", path))
}

/// Serializes a value to a JSON file, replacing it atomically.
async fn write_json<T: Serialize>(path: &str, value: &T) -> anyhow::Result<()> {
    let serialized = serde_json::to_string_pretty(value)
        .with_context(|| format!("failed to serialize {}", path))?;

    let temp_path = format!("{}.tmp", path);
    fs::write(&temp_path, serialized)
        .await
        .with_context(|| format!("failed to write {}", temp_path))?;
    fs::rename(&temp_path, path)
        .await
        .with_context(|| format!("failed to replace {}", path))?;

    Ok(())
}
