//! Canned transport and fixtures for in-crate tests.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use redfish_vfs_client::{ClientError, Transport};

/// Fixture bodies for a small Redfish tree: service root, a systems
/// collection with one member, that member, and the chassis it links to.
pub mod fixtures {
    pub const SERVICE_ROOT: &[u8] = br##"{
        "@odata.id": "/redfish/v1",
        "@odata.type": "#ServiceRoot.v1_0_0.ServiceRoot",
        "Id": "RootService",
        "Name": "Root Service",
        "RedfishVersion": "1.6.0",
        "Systems": {"@odata.id": "/redfish/v1/Systems"},
        "Chassis": {"@odata.id": "/redfish/v1/Chassis"}
    }"##;

    pub const SYSTEMS_COLLECTION: &[u8] = br##"{
        "@odata.id": "/redfish/v1/Systems",
        "@odata.type": "#ComputerSystemCollection.ComputerSystemCollection",
        "Name": "Computer System Collection",
        "Members": [
            {"@odata.id": "/redfish/v1/Systems/1"}
        ],
        "Members@odata.count": 1
    }"##;

    pub const SYSTEM_1: &[u8] = br##"{
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
        "BiosVersion": "2.1.0",
        "Assembly": {"@odata.id": "/redfish/v1/Systems/1/Assembly"},
        "FirmwareInventoryUri": "/redfish/v1/UpdateService/FirmwareInventory/BMC"
    }"##;

    pub const CHASSIS_1: &[u8] = br##"{
        "@odata.id": "/redfish/v1/Chassis/1",
        "@odata.type": "#Chassis.v1_0_0.Chassis",
        "Id": "1",
        "Manufacturer": "Contoso",
        "ChassisType": "RackMount"
    }"##;
}

/// In-memory transport serving the fixture tree and counting fetches.
pub struct MockTransport {
    bodies: HashMap<String, Vec<u8>>,
    pub fetch_count: Arc<Mutex<usize>>,
}

impl MockTransport {
    pub fn with_fixtures() -> Self {
        let mut bodies: HashMap<String, Vec<u8>> = HashMap::new();
        bodies.insert("/redfish/v1".to_string(), fixtures::SERVICE_ROOT.to_vec());
        bodies.insert(
            "/redfish/v1/Systems".to_string(),
            fixtures::SYSTEMS_COLLECTION.to_vec(),
        );
        bodies.insert(
            "/redfish/v1/Systems/1".to_string(),
            fixtures::SYSTEM_1.to_vec(),
        );
        bodies.insert(
            "/redfish/v1/Chassis/1".to_string(),
            fixtures::CHASSIS_1.to_vec(),
        );

        Self {
            bodies,
            fetch_count: Arc::new(Mutex::new(0)),
        }
    }
}

impl Transport for MockTransport {
    fn fetch(&self, path: &str) -> Result<Vec<u8>, ClientError> {
        *self.fetch_count.lock() += 1;
        self.bodies
            .get(path)
            .cloned()
            .ok_or_else(|| ClientError::Http {
                path: path.to_string(),
                status: 404,
            })
    }

    fn post(&self, _path: &str, _body: &[u8]) -> Result<(Vec<u8>, u16), ClientError> {
        Ok((br#"{"status": "done"}"#.to_vec(), 200))
    }
}
