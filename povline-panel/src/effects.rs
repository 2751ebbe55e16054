//! Effect dispatch
//!
//! Holds the operator's chosen color as `#RRGGBB` text and converts it only
//! when an effect that uses it is applied.

use povline_api::{Effect, EffectRequest, PovClient, Rgb};
use tracing::{info, warn};

use crate::error::PanelError;

#[derive(Debug)]
pub struct EffectDispatcher {
    client: PovClient,
    current: Effect,
    color_hex: String,
}

impl EffectDispatcher {
    pub fn new(client: PovClient, color_hex: impl Into<String>) -> Self {
        Self {
            client,
            current: Effect::None,
            color_hex: color_hex.into(),
        }
    }

    /// Last effect the operator applied
    pub fn current(&self) -> &Effect {
        &self.current
    }

    pub fn color_hex(&self) -> &str {
        &self.color_hex
    }

    /// Whether the color input is relevant for the current effect
    pub fn uses_color(&self) -> bool {
        self.current.takes_color()
    }

    /// Change the color; rejected text leaves the current color in place
    pub fn set_color(&mut self, hex: &str) -> Result<Rgb, PanelError> {
        let rgb = Rgb::from_hex(hex)?;
        self.color_hex = hex.to_string();
        Ok(rgb)
    }

    /// Build the request for `effect`, attaching the color when it takes one
    pub fn request_for(&self, effect: Effect) -> Result<EffectRequest, PanelError> {
        if effect.takes_color() {
            let rgb = Rgb::from_hex(&self.color_hex)?;
            Ok(EffectRequest::colored(effect, rgb))
        } else {
            Ok(EffectRequest::plain(effect))
        }
    }

    /// Apply an effect; `Effect::None` returns the device to image mode
    pub async fn apply(&mut self, effect: impl Into<Effect>) -> Result<(), PanelError> {
        let effect = effect.into();
        let request = self.request_for(effect.clone())?;

        self.client.apply_effect(request).await.map_err(|e| {
            warn!(effect = %effect, error = %e, "effect not applied");
            e
        })?;

        info!(effect = %effect, "effect applied");
        self.current = effect;
        Ok(())
    }

    /// Effect names the device advertises
    pub async fn available_effects(&self) -> Result<Vec<Effect>, PanelError> {
        Ok(self.client.effects().await?)
    }
}
