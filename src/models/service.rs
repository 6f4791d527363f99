use serde::Serialize;

/// Identity of this service, served from `GET /`.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub short: &'static str,
    pub long: &'static str,
    pub version: &'static str,
}

pub const SERVICE_INFO: ServiceInfo = ServiceInfo {
    name: "dapi",
    short: "dauth API gateway",
    long: "Provides a JSON interface to the dauth authorization service.",
    version: env!("CARGO_PKG_VERSION"),
};
