use crate::define_simple_operation;
use crate::operation::{DeviceOperation, FormFields, Method, RequestBody, Validate, ValidationError};
use crate::types::WriteAck;

/// Start playing a stored image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayRequest {
    pub image: String,
}

impl PlayRequest {
    pub fn new(image: impl Into<String>) -> Self {
        Self { image: image.into() }
    }
}

impl Validate for PlayRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.image.is_empty() {
            return Err(ValidationError::missing("image"));
        }
        Ok(())
    }
}

/// `POST /api/play`
pub struct PlayOperation;

impl DeviceOperation for PlayOperation {
    type Request = PlayRequest;
    type Response = WriteAck;

    const METHOD: Method = Method::Post;
    const PATH: &'static str = "/api/play";

    fn encode(request: Self::Request) -> RequestBody {
        RequestBody::Form(FormFields::new().field("image", request.image))
    }
}

define_simple_operation! {
    operation: PauseOperation,
    method: Post,
    path: "/api/pause",
    response: WriteAck,
}

define_simple_operation! {
    operation: StopOperation,
    method: Post,
    path: "/api/stop",
    response: WriteAck,
}
