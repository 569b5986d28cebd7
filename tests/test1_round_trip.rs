use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use s3_roundtrip::consistency::ConsistencyConfig;
use s3_roundtrip::interfaces::{MockObjectStore, ObjectStore};
use s3_roundtrip::storage::{ObjectLocation, UploadResult};
use s3_roundtrip::utils::log_utils::Logger;
use s3_roundtrip::{Result, RoundTripConfig, StorageError, run_round_trip};
use tempfile::{TempDir, tempdir};

/// In-memory bucket store. Objects only become visible after `hidden_probes`
/// existence checks, to imitate an eventually consistent backend.
#[derive(Default)]
struct MemoryStore {
    objects: RefCell<HashMap<(String, String), Vec<u8>>>,
    hidden_probes: RefCell<u32>,
    probes: RefCell<u32>,
}

impl MemoryStore {
    fn with_hidden_probes(hidden: u32) -> Self {
        let store = Self::default();
        *store.hidden_probes.borrow_mut() = hidden;
        store
    }

    fn object(&self, location: &ObjectLocation) -> Option<Vec<u8>> {
        self.objects
            .borrow()
            .get(&(location.bucket.clone(), location.key.clone()))
            .cloned()
    }

    fn get(&self, location: &ObjectLocation) -> Result<Vec<u8>> {
        self.object(location)
            .ok_or_else(|| StorageError::service("GetObject", "NoSuchKey"))
    }
}

impl ObjectStore for MemoryStore {
    fn upload_file(&self, location: &ObjectLocation, source: &Path) -> Result<UploadResult> {
        let bytes = fs::read(source).map_err(|e| StorageError::local_io(source, e))?;
        let bytes_sent = bytes.len() as u64;
        self.objects
            .borrow_mut()
            .insert((location.bucket.clone(), location.key.clone()), bytes);
        Ok(UploadResult {
            location: location.clone(),
            e_tag: None,
            bytes_sent,
        })
    }

    fn object_exists(&self, location: &ObjectLocation) -> Result<bool> {
        *self.probes.borrow_mut() += 1;
        let mut hidden = self.hidden_probes.borrow_mut();
        if *hidden > 0 {
            *hidden -= 1;
            return Ok(false);
        }
        Ok(self.object(location).is_some())
    }

    fn download_to_file(&self, location: &ObjectLocation, dest: &Path) -> Result<u64> {
        let bytes = self.get(location)?;
        fs::write(dest, &bytes).map_err(|e| StorageError::local_io(dest, e))?;
        Ok(bytes.len() as u64)
    }

    fn read_prefix(&self, location: &ObjectLocation, len: usize) -> Result<Vec<u8>> {
        let mut bytes = self.get(location)?;
        bytes.truncate(len);
        Ok(bytes)
    }
}

fn config_in(dir: &TempDir, content: &[u8]) -> RoundTripConfig {
    let source = dir.path().join("sample.txt");
    fs::write(&source, content).unwrap();
    RoundTripConfig {
        local_source_path: source,
        local_dest_path: dir.path().join("downloadInput.txt"),
        consistency: ConsistencyConfig {
            initial_backoff: Duration::from_millis(1),
            max_backoff: Duration::from_millis(5),
            max_wait: Duration::from_millis(500),
        },
        ..RoundTripConfig::default()
    }
}

#[test]
fn round_trip_reproduces_source_bytes() {
    let dir = tempdir().unwrap();
    let content = b"Hello, world!!!!!!!! and some trailing text\n";
    let config = config_in(&dir, content);
    let store = MemoryStore::default();

    let report = run_round_trip(&store, &config, &Logger::new(0)).unwrap();

    assert_eq!(fs::read(&config.local_dest_path).unwrap(), content.to_vec());
    assert_eq!(report.bytes_downloaded, content.len() as u64);
    assert_eq!(report.bytes_uploaded, report.bytes_downloaded);
    assert_eq!(report.prefix_text(), "Hello, world!!!!!!!!");
    assert!(report.source_md5.is_some());
}

#[test]
fn short_object_reads_without_error() {
    let dir = tempdir().unwrap();
    let config = config_in(&dir, b"tiny");
    let store = MemoryStore::default();

    let report = run_round_trip(&store, &config, &Logger::new(0)).unwrap();
    assert_eq!(report.prefix, b"tiny".to_vec());
}

#[test]
fn waits_until_object_is_visible() {
    let dir = tempdir().unwrap();
    let config = config_in(&dir, b"Hello, world!!!!!!!!");
    let store = MemoryStore::with_hidden_probes(2);

    let report = run_round_trip(&store, &config, &Logger::new(0)).unwrap();
    assert_eq!(report.visibility_probes, 3);
    assert_eq!(*store.probes.borrow(), 3);
}

#[test]
fn second_run_overwrites_object() {
    let dir = tempdir().unwrap();
    let mut config = config_in(&dir, b"first version of the sample file");
    let store = MemoryStore::default();
    run_round_trip(&store, &config, &Logger::new(0)).unwrap();

    let second = dir.path().join("sample2.txt");
    fs::write(&second, b"second version").unwrap();
    config.local_source_path = second;
    let report = run_round_trip(&store, &config, &Logger::new(0)).unwrap();

    assert_eq!(
        store.object(&config.location).unwrap(),
        b"second version".to_vec()
    );
    assert_eq!(report.bytes_downloaded, 14);
    assert_eq!(
        fs::read(&config.local_dest_path).unwrap(),
        b"second version".to_vec()
    );
}

#[test]
fn missing_source_fails_before_touching_the_store() {
    let dir = tempdir().unwrap();
    let config = RoundTripConfig {
        local_source_path: dir.path().join("does-not-exist.txt"),
        local_dest_path: dir.path().join("downloadInput.txt"),
        ..RoundTripConfig::default()
    };
    let store = MemoryStore::default();

    let err = run_round_trip(&store, &config, &Logger::new(0)).unwrap_err();
    assert!(err.is_local());
    assert!(store.objects.borrow().is_empty());
    assert!(!config.local_dest_path.exists());
}

#[test]
fn upload_failure_stops_the_sequence() {
    let dir = tempdir().unwrap();
    let config = config_in(&dir, b"Hello, world!!!!!!!!");

    let mut store = MockObjectStore::new();
    store
        .expect_upload_file()
        .times(1)
        .returning(|_, _| Err(StorageError::service("PutObject", "NoSuchBucket")));
    store.expect_object_exists().never();
    store.expect_download_to_file().never();
    store.expect_read_prefix().never();

    let err = run_round_trip(&store, &config, &Logger::new(0)).unwrap_err();
    assert_eq!(err.to_string(), "S3 PutObject failed: NoSuchBucket");
    assert!(!config.local_dest_path.exists());
}

#[test]
fn every_step_uses_the_same_location() {
    let dir = tempdir().unwrap();
    let config = config_in(&dir, b"Hello, world!!!!!!!!");
    let expected = config.location.clone();
    let dest = config.local_dest_path.clone();

    let mut store = MockObjectStore::new();
    let loc = expected.clone();
    store
        .expect_upload_file()
        .withf(move |location, _| *location == loc)
        .times(1)
        .returning(|location, _| {
            Ok(UploadResult {
                location: location.clone(),
                e_tag: Some("abc".to_string()),
                bytes_sent: 20,
            })
        });
    let loc = expected.clone();
    store
        .expect_object_exists()
        .withf(move |location| *location == loc)
        .times(1)
        .returning(|_| Ok(true));
    let loc = expected.clone();
    store
        .expect_download_to_file()
        .withf(move |location, path| *location == loc && path == dest.as_path())
        .times(1)
        .returning(|_, path| {
            fs::write(path, b"Hello, world!!!!!!!!").unwrap();
            Ok(20)
        });
    let loc = expected;
    store
        .expect_read_prefix()
        .withf(move |location, len| *location == loc && *len == 20)
        .times(1)
        .returning(|_, _| Ok(b"Hello, world!!!!!!!!".to_vec()));

    let report = run_round_trip(&store, &config, &Logger::new(0)).unwrap();
    assert_eq!(report.e_tag.as_deref(), Some("abc"));
}

#[test]
fn byte_count_mismatch_is_reported() {
    let dir = tempdir().unwrap();
    let config = config_in(&dir, b"Hello, world!!!!!!!!");

    let mut store = MockObjectStore::new();
    store.expect_upload_file().returning(|location, _| {
        Ok(UploadResult {
            location: location.clone(),
            e_tag: None,
            bytes_sent: 20,
        })
    });
    store.expect_object_exists().returning(|_| Ok(true));
    store.expect_download_to_file().returning(|_, _| Ok(7));
    store.expect_read_prefix().never();

    let err = run_round_trip(&store, &config, &Logger::new(0)).unwrap_err();
    assert!(matches!(err, StorageError::Mismatch(_)));
}

#[test]
fn corrupted_download_fails_verification() {
    let dir = tempdir().unwrap();
    let config = config_in(&dir, b"Hello, world!!!!!!!!");

    let mut store = MockObjectStore::new();
    store.expect_upload_file().returning(|location, _| {
        Ok(UploadResult {
            location: location.clone(),
            e_tag: None,
            bytes_sent: 20,
        })
    });
    store.expect_object_exists().returning(|_| Ok(true));
    store.expect_download_to_file().returning(|_, path| {
        fs::write(path, b"Hello, world!!!!!!!?").unwrap();
        Ok(20)
    });
    store
        .expect_read_prefix()
        .returning(|_, _| Ok(b"Hello, world!!!!!!!?".to_vec()));

    let err = run_round_trip(&store, &config, &Logger::new(0)).unwrap_err();
    assert!(matches!(err, StorageError::Mismatch(_)));

    // Same store behaviour with verification disabled succeeds
    let config = RoundTripConfig {
        verify: false,
        ..config
    };
    let mut store = MockObjectStore::new();
    store.expect_upload_file().returning(|location, _| {
        Ok(UploadResult {
            location: location.clone(),
            e_tag: None,
            bytes_sent: 20,
        })
    });
    store.expect_object_exists().returning(|_| Ok(true));
    store.expect_download_to_file().returning(|_, _| Ok(20));
    store.expect_read_prefix().returning(|_, _| Ok(Vec::new()));
    let report = run_round_trip(&store, &config, &Logger::new(0)).unwrap();
    assert!(report.source_md5.is_none());
}

#[test]
fn invisible_object_times_out() {
    let dir = tempdir().unwrap();
    let mut config = config_in(&dir, b"Hello, world!!!!!!!!");
    config.consistency.max_wait = Duration::from_millis(20);

    let mut store = MockObjectStore::new();
    store.expect_upload_file().returning(|location, _| {
        Ok(UploadResult {
            location: location.clone(),
            e_tag: None,
            bytes_sent: 20,
        })
    });
    store.expect_object_exists().returning(|_| Ok(false));
    store.expect_download_to_file().never();

    let err = run_round_trip(&store, &config, &Logger::new(0)).unwrap_err();
    assert!(matches!(err, StorageError::NotVisible { .. }));
}
