//! Effect selection
//!
//! `solid` and `chase` must carry an `r,g,b` triple and every other effect
//! must not; the device treats either mistake as a protocol violation.

use crate::define_simple_operation;
use crate::effect::{Effect, Rgb};
use crate::operation::{DeviceOperation, FormFields, Method, RequestBody, Validate, ValidationError};
use crate::types::{EffectList, WriteAck};

define_simple_operation! {
    operation: ListEffectsOperation,
    method: Get,
    path: "/api/effects",
    response: EffectList,
}

/// One effect command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectRequest {
    effect: Effect,
    color: Option<Rgb>,
}

impl EffectRequest {
    /// An effect sent without color fields
    pub fn plain(effect: Effect) -> Self {
        Self { effect, color: None }
    }

    /// An effect sent with `r,g,b`
    pub fn colored(effect: Effect, color: Rgb) -> Self {
        Self {
            effect,
            color: Some(color),
        }
    }

    pub fn effect(&self) -> &Effect {
        &self.effect
    }

    pub fn color(&self) -> Option<Rgb> {
        self.color
    }
}

impl Validate for EffectRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.effect.as_str().is_empty() {
            return Err(ValidationError::missing("effect"));
        }
        match (self.effect.takes_color(), self.color) {
            (true, None) => Err(ValidationError::Custom {
                parameter: "color".to_string(),
                message: format!("effect '{}' requires a color", self.effect),
            }),
            (false, Some(_)) => Err(ValidationError::Custom {
                parameter: "color".to_string(),
                message: format!("effect '{}' does not take a color", self.effect),
            }),
            _ => Ok(()),
        }
    }
}

/// `POST /api/effect`
pub struct ApplyEffectOperation;

impl DeviceOperation for ApplyEffectOperation {
    type Request = EffectRequest;
    type Response = WriteAck;

    const METHOD: Method = Method::Post;
    const PATH: &'static str = "/api/effect";

    fn encode(request: Self::Request) -> RequestBody {
        let mut fields = FormFields::new().field("effect", request.effect.as_str());
        if let Some(color) = request.color {
            fields = fields.field("r", color.r).field("g", color.g).field("b", color.b);
        }
        RequestBody::Form(fields)
    }
}
