//! Integration tests for the VFS over a canned transport.
//!
//! These drive the public surface the way a frontend would: resolve paths,
//! list entries, invoke an action, persist the cache, and reopen it
//! offline. No network access is involved.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use redfish_vfs::{
    ClientError, EntryKind, Scalar, Target, Transport, Vfs, VfsError, REDFISH_ROOT,
};

const SERVICE_ROOT: &[u8] = br##"{
    "@odata.id": "/redfish/v1",
    "@odata.type": "#ServiceRoot.v1_0_0.ServiceRoot",
    "Id": "RootService",
    "Name": "Root Service",
    "RedfishVersion": "1.6.0",
    "Systems": {"@odata.id": "/redfish/v1/Systems"},
    "Chassis": {"@odata.id": "/redfish/v1/Chassis"}
}"##;

const SYSTEMS: &[u8] = br##"{
    "@odata.id": "/redfish/v1/Systems",
    "@odata.type": "#ComputerSystemCollection.ComputerSystemCollection",
    "Name": "Computer System Collection",
    "Members": [
        {"@odata.id": "/redfish/v1/Systems/1"}
    ],
    "Members@odata.count": 1
}"##;

const SYSTEM_1: &[u8] = br##"{
    "@odata.id": "/redfish/v1/Systems/1",
    "@odata.type": "#ComputerSystem.v1_0_0.ComputerSystem",
    "Id": "1",
    "Name": "System 1",
    "Status": {"State": "Enabled", "Health": "OK"},
    "Boot": {"BootOrder": ["Pxe", "Hdd", "Usb"]},
    "Links": {
        "Chassis": [
            {"@odata.id": "/redfish/v1/Chassis/1"}
        ]
    },
    "Actions": {
        "#ComputerSystem.Reset": {
            "target": "/redfish/v1/Systems/1/Actions/ComputerSystem.Reset",
            "ResetType@Redfish.AllowableValues": ["On", "ForceOff"]
        }
    },
    "BiosVersion": "2.1.0"
}"##;

const CHASSIS_1: &[u8] = br##"{
    "@odata.id": "/redfish/v1/Chassis/1",
    "@odata.type": "#Chassis.v1_0_0.Chassis",
    "Id": "1",
    "Manufacturer": "Contoso",
    "ChassisType": "RackMount"
}"##;

/// Serves the fixture tree; counts GETs and records POSTs. The counters
/// are shared handles so tests keep observing after the transport moves
/// into the VFS.
struct FixtureTransport {
    bodies: HashMap<String, Vec<u8>>,
    fetches: Arc<AtomicUsize>,
    posts: Arc<parking_lot::Mutex<Vec<(String, Vec<u8>)>>>,
}

impl FixtureTransport {
    fn new() -> Self {
        let mut bodies: HashMap<String, Vec<u8>> = HashMap::new();
        bodies.insert("/redfish/v1".into(), SERVICE_ROOT.to_vec());
        bodies.insert("/redfish/v1/Systems".into(), SYSTEMS.to_vec());
        bodies.insert("/redfish/v1/Systems/1".into(), SYSTEM_1.to_vec());
        bodies.insert("/redfish/v1/Chassis/1".into(), CHASSIS_1.to_vec());

        Self {
            bodies,
            fetches: Arc::new(AtomicUsize::new(0)),
            posts: Arc::new(parking_lot::Mutex::new(Vec::new())),
        }
    }
}

impl Transport for FixtureTransport {
    fn fetch(&self, path: &str) -> Result<Vec<u8>, ClientError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.bodies
            .get(path)
            .cloned()
            .ok_or_else(|| ClientError::Http {
                path: path.to_string(),
                status: 404,
            })
    }

    fn post(&self, path: &str, body: &[u8]) -> Result<(Vec<u8>, u16), ClientError> {
        self.posts.lock().push((path.to_string(), body.to_vec()));
        Ok((Vec::new(), 204))
    }
}

#[test]
fn browse_resolve_and_read_values() {
    let transport = FixtureTransport::new();
    let fetches = transport.fetches.clone();
    let vfs = Vfs::with_transport(Box::new(transport), None);

    // Walk down from the root one resource at a time.
    let root = vfs.resolve_target("", "").unwrap();
    assert_eq!(root.resource_path(), Some(REDFISH_ROOT));

    let entries = vfs.list_all(REDFISH_ROOT).unwrap();
    assert!(entries
        .iter()
        .any(|e| e.name == "Systems" && e.kind == EntryKind::Child));

    // One deep path that crosses children, objects, an array index, and a
    // followed link.
    let target = vfs
        .resolve_target(REDFISH_ROOT, "Systems/1/Links/Chassis[0]/Manufacturer")
        .unwrap();
    match target {
        Target::Property { property, .. } => {
            assert_eq!(property.value(), Some(&Scalar::String("Contoso".into())));
        }
        other => panic!("expected property, got {other:?}"),
    }

    // Root, Systems, Systems/1, Chassis/1, each fetched exactly once.
    assert_eq!(fetches.load(Ordering::SeqCst), 4);
}

#[test]
fn action_post_bypasses_cache() {
    let transport = FixtureTransport::new();
    let posts = transport.posts.clone();
    let vfs = Vfs::with_transport(Box::new(transport), None);

    let action = vfs
        .resolve_target("/redfish/v1/Systems/1", "Actions/#ComputerSystem.Reset/target")
        .unwrap();
    let action_path = action.resource_path().expect("action target is a link");

    let (_, status) = vfs
        .post(action_path, br#"{"ResetType": "On"}"#)
        .unwrap();
    assert_eq!(status, 204);

    let recorded = posts.lock();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].0, "/redfish/v1/Systems/1/Actions/ComputerSystem.Reset");

    // The POST neither cached anything new nor dropped what was there.
    assert_eq!(vfs.known_paths(), vec!["/redfish/v1/Systems/1".to_string()]);
}

#[test]
fn sync_then_reopen_offline() {
    let dir = tempfile::tempdir().unwrap();
    let cache_file: PathBuf = dir.path().join("cache.json");

    let transport = FixtureTransport::new();
    let vfs = Vfs::with_transport(Box::new(transport), Some(cache_file.clone()));

    let live = vfs
        .resolve_target(REDFISH_ROOT, "Systems/1/Status/Health")
        .unwrap();
    vfs.sync().unwrap();
    drop(vfs);

    let offline = Vfs::offline(&cache_file).unwrap();

    // Everything cached before the sync resolves without a transport...
    let target = offline
        .resolve_target(REDFISH_ROOT, "Systems/1/Status/Health")
        .unwrap();
    assert_eq!(target.property(), live.property());

    // ...and anything else reports the offline miss.
    assert!(matches!(
        offline.resolve_target(REDFISH_ROOT, "Chassis/1"),
        Err(VfsError::NotCached { .. })
    ));
    assert!(matches!(
        offline.post("/redfish/v1/Systems/1/Actions/ComputerSystem.Reset", b"{}"),
        Err(VfsError::NotCached { .. })
    ));
}

#[test]
fn invalidate_produces_a_fresh_resource() {
    let transport = FixtureTransport::new();
    let fetches = transport.fetches.clone();
    let vfs = Vfs::with_transport(Box::new(transport), None);

    let before = vfs.get("/redfish/v1/Systems/1").unwrap();
    vfs.invalidate("/redfish/v1/Systems/1");
    let after = vfs.get("/redfish/v1/Systems/1").unwrap();

    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(before.properties, after.properties);
    assert_eq!(fetches.load(Ordering::SeqCst), 2);
}

#[test]
fn concurrent_gets_publish_one_resource_per_path() {
    let transport = FixtureTransport::new();
    let vfs = Arc::new(Vfs::with_transport(Box::new(transport), None));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let vfs = vfs.clone();
            std::thread::spawn(move || vfs.get("/redfish/v1/Systems/1").unwrap())
        })
        .collect();

    let resources: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    // All callers see the same published instance regardless of how many
    // fetches raced.
    let canonical = vfs.get("/redfish/v1/Systems/1").unwrap();
    for resource in resources {
        assert_eq!(resource.path, canonical.path);
    }
    assert_eq!(vfs.known_paths(), vec!["/redfish/v1/Systems/1".to_string()]);
}
