use std::fs;
use std::path::{Path, PathBuf};

use blake3::Hasher;
use serde::{Deserialize, Serialize};

use crate::domain::ticket::{Priority, TicketForm};
use crate::error::{AppError, AppResult};

const CACHE_FILE_NAME: &str = "draft_cache.json";
const CACHE_LIMIT: usize = 32;

#[derive(Default, Serialize, Deserialize)]
struct CacheFile {
    entries: Vec<CacheEntry>,
}

#[derive(Serialize, Deserialize, Clone)]
struct CacheEntry {
    key: String,
    title: String,
    description: String,
    category: String,
    location_details: String,
    department_id: String,
    priority: String,
}

/// Unsent create-ticket forms, one per backend, user and scope.
pub struct TicketDraftCache {
    file_path: PathBuf,
    file: CacheFile,
}

impl TicketDraftCache {
    pub fn load(dir: &Path) -> AppResult<Self> {
        let path = dir.join(CACHE_FILE_NAME);
        let file = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str::<CacheFile>(&contents)
                .map_err(|err| AppError::Configuration(format!("invalid draft cache: {err}")))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => CacheFile::default(),
            Err(err) => return Err(AppError::Io(err)),
        };

        Ok(Self {
            file_path: path,
            file,
        })
    }

    pub fn get(&self, key: &str) -> Option<TicketForm> {
        self.file
            .entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| TicketForm {
                title: entry.title.clone(),
                description: entry.description.clone(),
                category: entry.category.clone(),
                location_details: entry.location_details.clone(),
                department_id: entry.department_id.clone(),
                priority: Priority::from_str(&entry.priority).unwrap_or_default(),
            })
    }

    pub fn insert(&mut self, key: String, form: &TicketForm) {
        self.file.entries.retain(|entry| entry.key != key);
        self.file.entries.push(CacheEntry {
            key,
            title: form.title.clone(),
            description: form.description.clone(),
            category: form.category.clone(),
            location_details: form.location_details.clone(),
            department_id: form.department_id.clone(),
            priority: form.priority.as_str().to_string(),
        });

        if self.file.entries.len() > CACHE_LIMIT {
            let overflow = self.file.entries.len() - CACHE_LIMIT;
            self.file.entries.drain(0..overflow);
        }
    }

    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.file.entries.len();
        self.file.entries.retain(|entry| entry.key != key);
        before != self.file.entries.len()
    }

    pub fn save(&self) -> AppResult<()> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(&self.file)
            .map_err(|err| AppError::Configuration(format!("failed to write drafts: {err}")))?;
        fs::write(&self.file_path, data)?;
        Ok(())
    }

    pub fn compute_key(base_url: &str, username: &str, scope: &str) -> String {
        let mut hasher = Hasher::new();
        hasher.update(base_url.as_bytes());
        hasher.update(b"\0");
        hasher.update(username.trim().to_lowercase().as_bytes());
        hasher.update(b"\0");
        hasher.update(scope.as_bytes());
        hasher.finalize().to_hex().to_string()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    fn form(title: &str) -> TicketForm {
        TicketForm {
            title: title.to_string(),
            description: "Sparking outlet".to_string(),
            location_details: "Ward 3A".to_string(),
            priority: Priority::Critical,
            ..TicketForm::default()
        }
    }

    #[test]
    fn keys_depend_on_user_and_scope() {
        let base = TicketDraftCache::compute_key("http://localhost:5000", "Nurse", "department");
        assert_eq!(
            base,
            TicketDraftCache::compute_key("http://localhost:5000", " nurse ", "department")
        );
        assert_ne!(
            base,
            TicketDraftCache::compute_key("http://localhost:5000", "nurse", "own")
        );
    }

    #[test]
    fn persists_and_restores_drafts() {
        let dir = tempdir().unwrap();
        let mut cache = TicketDraftCache::load(dir.path()).unwrap();
        cache.insert("k1".to_string(), &form("Outlet"));
        cache.save().unwrap();

        let mut reloaded = TicketDraftCache::load(dir.path()).unwrap();
        assert_eq!(reloaded.get("k1"), Some(form("Outlet")));
        assert!(reloaded.remove("k1"));
        assert_eq!(reloaded.get("k1"), None);
        assert!(!reloaded.remove("k1"));
    }

    #[test]
    fn evicts_oldest_entries_past_limit() {
        let dir = tempdir().unwrap();
        let mut cache = TicketDraftCache::load(dir.path()).unwrap();
        for index in 0..=CACHE_LIMIT {
            cache.insert(format!("key-{index}"), &form("Outlet"));
        }
        assert!(cache.get("key-0").is_none());
        assert!(cache.get(&format!("key-{CACHE_LIMIT}")).is_some());
    }
}
