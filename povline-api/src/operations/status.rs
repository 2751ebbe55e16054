use crate::define_simple_operation;
use crate::types::DeviceStatus;

define_simple_operation! {
    operation: GetStatusOperation,
    method: Get,
    path: "/api/status",
    response: DeviceStatus,
}
