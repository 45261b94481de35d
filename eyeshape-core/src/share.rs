//! Shareable result links backed by browser-local storage.
//!
//! A saved entry holds only the composed result and its save time; the
//! analyzed image is never persisted. Loading is best-effort: missing,
//! corrupt or expired entries read as `None`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::analyzer::AnalysisResult;
use crate::error::{EyeShapeError, Result};

/// Query parameter carrying the share identifier.
pub const SHARE_QUERY_PARAM: &str = "share";

const KEY_PREFIX: &str = "eyeshape:share:";
const MAX_TTL_HOURS: i64 = 24 * 365;
const MAX_ID_LEN: usize = 64;

/// String key/value storage (e.g. `window.localStorage`).
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> std::result::Result<(), String>;
    fn remove_item(&self, key: &str);
    /// Every key currently stored.
    fn keys(&self) -> Vec<String>;
}

/// In-process storage for tests and for browsers without local storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> std::result::Result<(), String> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.items.borrow().keys().cloned().collect()
    }
}

/// Persisted form of a shared result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedEntry {
    pub result: AnalysisResult,
    pub saved_at: DateTime<Utc>,
}

pub struct ShareStore<S> {
    storage: S,
    ttl: Duration,
}

impl<S: KeyValueStorage> ShareStore<S> {
    pub fn new(storage: S, ttl_hours: i64) -> Self {
        Self {
            storage,
            ttl: Duration::hours(ttl_hours.clamp(0, MAX_TTL_HOURS)),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Persist `result` and return its share identifier.
    pub fn save(&self, result: &AnalysisResult) -> Result<String> {
        self.save_at(result, Utc::now())
    }

    pub fn save_at(&self, result: &AnalysisResult, now: DateTime<Utc>) -> Result<String> {
        self.purge_expired_at(now);
        let id = share_id_for(result, now);
        let entry = SharedEntry {
            result: result.clone(),
            saved_at: now,
        };
        let json = serde_json::to_string(&entry)
            .map_err(|e| EyeShapeError::Storage(format!("Failed to serialize result: {}", e)))?;

        self.storage
            .set_item(&storage_key(&id), &json)
            .map_err(|e| {
                warn!("Failed to save shared result: {}", e);
                EyeShapeError::Storage(e)
            })?;

        info!("Saved shared result {} ({})", id, result.shape);
        Ok(id)
    }

    /// Look up a previously shared result.
    pub fn load(&self, id: &str) -> Option<AnalysisResult> {
        self.load_at(id, Utc::now())
    }

    pub fn load_at(&self, id: &str, now: DateTime<Utc>) -> Option<AnalysisResult> {
        if !is_valid_id(id) {
            debug!("Ignoring malformed share id '{}'", id);
            return None;
        }
        let key = storage_key(id);
        let raw = match self.storage.get_item(&key) {
            Some(raw) => raw,
            None => {
                debug!("No shared result stored for {}", id);
                return None;
            }
        };

        let entry: SharedEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Discarding corrupt shared result {}: {}", id, e);
                self.storage.remove_item(&key);
                return None;
            }
        };

        if !self.is_live(&entry, now) {
            info!("Shared result {} expired or misdated (saved {})", id, entry.saved_at);
            self.storage.remove_item(&key);
            return None;
        }

        Some(entry.result)
    }

    /// Remove every share entry that is expired, misdated or unreadable.
    /// Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Utc::now())
    }

    pub fn purge_expired_at(&self, now: DateTime<Utc>) -> usize {
        let mut removed = 0;
        for key in self.storage.keys() {
            if !key.starts_with(KEY_PREFIX) {
                continue;
            }
            let live = self
                .storage
                .get_item(&key)
                .and_then(|raw| serde_json::from_str::<SharedEntry>(&raw).ok())
                .is_some_and(|entry| self.is_live(&entry, now));
            if !live {
                self.storage.remove_item(&key);
                removed += 1;
            }
        }
        if removed > 0 {
            debug!("Purged {} stale shared result(s)", removed);
        }
        removed
    }

    // A save time in the future can only come from a bad clock or tampering.
    fn is_live(&self, entry: &SharedEntry, now: DateTime<Utc>) -> bool {
        entry.saved_at <= now && now - entry.saved_at <= self.ttl
    }
}

fn storage_key(id: &str) -> String {
    format!("{}{}", KEY_PREFIX, id)
}

/// Identifier derived from the result content and save time.
pub fn share_id_for(result: &AnalysisResult, saved_at: DateTime<Utc>) -> String {
    let mut hasher = DefaultHasher::new();
    result.shape.hash(&mut hasher);
    result.description.hash(&mut hasher);
    result.features.hash(&mut hasher);
    result.confidence.to_bits().hash(&mut hasher);
    saved_at.timestamp_micros().hash(&mut hasher);
    URL_SAFE_NO_PAD.encode(hasher.finish().to_be_bytes())
}

fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_ID_LEN
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Extract the share identifier from a query string (with or without `?`).
pub fn share_id_from_query(query: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == SHARE_QUERY_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|id| is_valid_id(id))
}

/// `current_url` with its share parameter set to `id`.
pub fn share_link(current_url: &str, id: &str) -> Result<String> {
    let mut url = parse_url(current_url)?;
    let kept = other_query_pairs(&url);
    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (key, value) in &kept {
            pairs.append_pair(key, value);
        }
        pairs.append_pair(SHARE_QUERY_PARAM, id);
    }
    Ok(url.to_string())
}

/// `current_url` with the share parameter removed.
pub fn strip_share_param(current_url: &str) -> Result<String> {
    let mut url = parse_url(current_url)?;
    let kept = other_query_pairs(&url);
    if kept.is_empty() {
        url.set_query(None);
    } else {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (key, value) in &kept {
            pairs.append_pair(key, value);
        }
    }
    Ok(url.to_string())
}

fn parse_url(value: &str) -> Result<Url> {
    Url::parse(value).map_err(|e| EyeShapeError::Storage(format!("Invalid URL '{}': {}", value, e)))
}

fn other_query_pairs(url: &Url) -> Vec<(String, String)> {
    url.query_pairs()
        .filter(|(key, _)| key != SHARE_QUERY_PARAM)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn result() -> AnalysisResult {
        AnalysisResult {
            shape: "Almond".to_string(),
            confidence: 0.91,
            description: "Tapered ends".to_string(),
            features: vec!["Visible crease".to_string()],
            makeup_tips: vec!["Winged liner".to_string()],
            eyewear_recommendations: vec!["Aviator".to_string()],
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_save_then_load() {
        let store = ShareStore::new(MemoryStorage::new(), 24);
        let id = store.save_at(&result(), t0()).unwrap();
        assert!(is_valid_id(&id));
        assert_eq!(store.load_at(&id, t0() + Duration::hours(1)), Some(result()));
    }

    #[test]
    fn test_missing_entry_is_none() {
        let store = ShareStore::new(MemoryStorage::new(), 24);
        assert_eq!(store.load_at("abc", t0()), None);
    }

    #[test]
    fn test_corrupt_entry_is_none_and_removed() {
        let store = ShareStore::new(MemoryStorage::new(), 24);
        store
            .storage()
            .set_item("eyeshape:share:bad", "{not json")
            .unwrap();
        assert_eq!(store.load_at("bad", t0()), None);
        assert!(store.storage().is_empty());
    }

    #[test]
    fn test_entry_without_result_is_none() {
        let store = ShareStore::new(MemoryStorage::new(), 24);
        store
            .storage()
            .set_item("eyeshape:share:x1", r#"{"savedAt":"2026-03-01T12:00:00Z"}"#)
            .unwrap();
        assert_eq!(store.load_at("x1", t0()), None);
    }

    #[test]
    fn test_expired_entry_is_none_and_removed() {
        let store = ShareStore::new(MemoryStorage::new(), 24);
        let id = store.save_at(&result(), t0()).unwrap();
        assert_eq!(store.load_at(&id, t0() + Duration::hours(25)), None);
        assert!(store.storage().is_empty());
    }

    #[test]
    fn test_future_dated_entry_is_none_and_removed() {
        let store = ShareStore::new(MemoryStorage::new(), 24);
        let id = store
            .save_at(&result(), t0() + Duration::days(3650))
            .unwrap();
        assert_eq!(store.load_at(&id, t0()), None);
        assert!(store.storage().is_empty());
    }

    fn put(store: &ShareStore<MemoryStorage>, id: &str, saved_at: DateTime<Utc>) {
        let entry = SharedEntry {
            result: result(),
            saved_at,
        };
        store
            .storage()
            .set_item(&storage_key(id), &serde_json::to_string(&entry).unwrap())
            .unwrap();
    }

    #[test]
    fn test_save_purges_stale_entries_only() {
        let store = ShareStore::new(MemoryStorage::new(), 24);
        put(&store, "old", t0() - Duration::hours(25));
        put(&store, "future", t0() + Duration::days(30));
        put(&store, "recent", t0() - Duration::hours(2));
        store
            .storage()
            .set_item("eyeshape:share:junk", "{not json")
            .unwrap();
        store.storage().set_item("other:key", "kept").unwrap();

        let fresh = store.save_at(&result(), t0()).unwrap();

        assert_eq!(store.storage().get_item("eyeshape:share:old"), None);
        assert_eq!(store.storage().get_item("eyeshape:share:future"), None);
        assert_eq!(store.storage().get_item("eyeshape:share:junk"), None);
        assert_eq!(store.storage().get_item("other:key").as_deref(), Some("kept"));
        assert_eq!(store.load_at("recent", t0()), Some(result()));
        assert_eq!(store.load_at(&fresh, t0()), Some(result()));
        assert_eq!(store.storage().len(), 3);
    }

    #[test]
    fn test_purge_expired_keeps_live_entries() {
        let store = ShareStore::new(MemoryStorage::new(), 24);
        put(&store, "live", t0());
        put(&store, "stale", t0() - Duration::hours(48));
        assert_eq!(store.purge_expired_at(t0() + Duration::hours(1)), 1);
        assert!(store.storage().get_item("eyeshape:share:live").is_some());
        assert!(store.storage().get_item("eyeshape:share:stale").is_none());
        assert_eq!(store.purge_expired_at(t0() + Duration::hours(1)), 0);
    }

    #[test]
    fn test_storage_holds_only_share_entries() {
        let store = ShareStore::new(MemoryStorage::new(), 24);
        store.save_at(&result(), t0()).unwrap();
        store.save_at(&result(), t0() + Duration::minutes(5)).unwrap();
        let keys = store.storage().keys();
        assert_eq!(keys.len(), 2);
        assert!(keys.iter().all(|k| k.starts_with(KEY_PREFIX)));
    }

    #[test]
    fn test_malformed_id_never_touches_storage() {
        let store = ShareStore::new(MemoryStorage::new(), 24);
        assert_eq!(store.load_at("../etc", t0()), None);
        assert_eq!(store.load_at("", t0()), None);
    }

    #[test]
    fn test_stored_payload_has_no_image() {
        let store = ShareStore::new(MemoryStorage::new(), 24);
        let id = store.save_at(&result(), t0()).unwrap();
        let raw = store.storage().get_item(&storage_key(&id)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(json.get("result").is_some());
        assert!(json.get("image").is_none());
        assert_eq!(json["result"]["shape"], "Almond");
    }

    #[test]
    fn test_ids_differ_by_time() {
        let a = share_id_for(&result(), t0());
        let b = share_id_for(&result(), t0() + Duration::seconds(1));
        assert_ne!(a, b);
    }

    #[test]
    fn test_share_id_from_query() {
        assert_eq!(share_id_from_query("?share=abc-1_Z"), Some("abc-1_Z".to_string()));
        assert_eq!(share_id_from_query("lang=th&share=xyz"), Some("xyz".to_string()));
        assert_eq!(share_id_from_query("?lang=th"), None);
        assert_eq!(share_id_from_query(""), None);
        assert_eq!(share_id_from_query("?share="), None);
        assert_eq!(share_id_from_query("?share=%3Cscript%3E"), None);
    }

    #[test]
    fn test_share_link_replaces_existing_param() {
        let link = share_link("https://eyeshape.ai/?lang=th&share=old", "new1").unwrap();
        assert_eq!(link, "https://eyeshape.ai/?lang=th&share=new1");
    }

    #[test]
    fn test_strip_share_param() {
        assert_eq!(
            strip_share_param("https://eyeshape.ai/?share=abc").unwrap(),
            "https://eyeshape.ai/"
        );
        assert_eq!(
            strip_share_param("https://eyeshape.ai/?lang=th&share=abc").unwrap(),
            "https://eyeshape.ai/?lang=th"
        );
    }

    #[test]
    fn test_invalid_url_is_error() {
        assert!(matches!(
            share_link("not a url", "id"),
            Err(EyeShapeError::Storage(_))
        ));
    }
}
