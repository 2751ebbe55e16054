//! Declarative macros for device operation definitions
//!
//! Most of the device surface is parameterless: reads, and the pause/stop
//! commands. This macro generates the request type and the trait
//! implementation for those so each one is a few declarative lines.

/// Define an operation whose request carries no parameters
///
/// # Example
/// ```rust,ignore
/// define_simple_operation! {
///     operation: PauseOperation,
///     method: Post,
///     path: "/api/pause",
///     response: WriteAck,
/// }
/// ```
///
/// This generates `PauseOperation`, an empty `PauseOperationRequest`, and a
/// `pause_operation()` convenience constructor for the request.
#[macro_export]
macro_rules! define_simple_operation {
    (
        operation: $op_struct:ident,
        method: $method:ident,
        path: $path:literal,
        response: $response_type:ty $(,)?
    ) => {
        paste::paste! {
            #[doc = concat!("Parameterless request for `", $path, "`")]
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
            pub struct [<$op_struct Request>];

            impl $crate::operation::Validate for [<$op_struct Request>] {}

            #[doc = concat!("`", stringify!($method), " ", $path, "`")]
            pub struct $op_struct;

            impl $crate::operation::DeviceOperation for $op_struct {
                type Request = [<$op_struct Request>];
                type Response = $response_type;

                const METHOD: $crate::operation::Method = $crate::operation::Method::$method;
                const PATH: &'static str = $path;

                fn encode(_request: Self::Request) -> $crate::operation::RequestBody {
                    $crate::operation::RequestBody::Empty
                }
            }

            pub fn [<$op_struct:snake>]() -> [<$op_struct Request>] {
                [<$op_struct Request>]
            }
        }
    };
}
