use http_client::FilePart;

use crate::define_simple_operation;
use crate::operation::{DeviceOperation, FormFields, Method, RequestBody, Validate, ValidationError};
use crate::types::{ImageCatalog, ImageFormat, WriteAck, ALLOWED_EXTENSIONS, MAX_UPLOAD_BYTES};

define_simple_operation! {
    operation: ListImagesOperation,
    method: Get,
    path: "/api/images",
    response: ImageCatalog,
}

/// Check a candidate upload against the device's limits
///
/// The size rule is checked first, then the extension rule; the returned
/// error names the rule that failed (`file size` or `file name`).
pub fn validate_upload(file_name: &str, size: usize) -> Result<ImageFormat, ValidationError> {
    if size > MAX_UPLOAD_BYTES {
        return Err(ValidationError::range_error("file size", 0, MAX_UPLOAD_BYTES, size));
    }

    ImageFormat::from_file_name(file_name).ok_or_else(|| {
        ValidationError::invalid_value(
            "file name",
            file_name,
            format!("extension must be one of {}", ALLOWED_EXTENSIONS.join(", ")),
        )
    })
}

/// Upload one image file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadImageRequest {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadImageRequest {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

impl Validate for UploadImageRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_upload(&self.file_name, self.bytes.len()).map(|_| ())
    }
}

/// `POST /api/upload` (multipart field `file`)
pub struct UploadImageOperation;

impl DeviceOperation for UploadImageOperation {
    type Request = UploadImageRequest;
    type Response = WriteAck;

    const METHOD: Method = Method::Post;
    const PATH: &'static str = "/api/upload";

    fn encode(request: Self::Request) -> RequestBody {
        RequestBody::File(FilePart {
            field: "file",
            file_name: request.file_name,
            bytes: request.bytes,
        })
    }
}

/// Delete one stored image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteImageRequest {
    pub image: String,
}

impl DeleteImageRequest {
    pub fn new(image: impl Into<String>) -> Self {
        Self { image: image.into() }
    }
}

impl Validate for DeleteImageRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.image.is_empty() {
            return Err(ValidationError::missing("image"));
        }
        Ok(())
    }
}

/// `POST /api/image/delete`
pub struct DeleteImageOperation;

impl DeviceOperation for DeleteImageOperation {
    type Request = DeleteImageRequest;
    type Response = WriteAck;

    const METHOD: Method = Method::Post;
    const PATH: &'static str = "/api/image/delete";

    fn encode(request: Self::Request) -> RequestBody {
        RequestBody::Form(FormFields::new().field("image", request.image))
    }
}
