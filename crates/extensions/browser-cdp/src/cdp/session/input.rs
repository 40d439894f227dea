//! Input (mouse and keyboard) operations for CDP page session.

use easyapply_protocols::Key;
use serde_json::{Value, json};
use tracing::debug;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::{KeyEventType, MouseButton, MouseEventType};

use super::core::PageSession;

impl PageSession {
    /// Click at coordinates.
    pub async fn click(&self, x: f64, y: f64) -> Result<(), CdpError> {
        self.mouse_move(x, y).await?;

        for event_type in [MouseEventType::MousePressed, MouseEventType::MouseReleased] {
            self.call(
                "Input.dispatchMouseEvent",
                Some(json!({
                    "type": event_type,
                    "x": x,
                    "y": y,
                    "button": MouseButton::Left,
                    "clickCount": 1,
                })),
            )
            .await?;
        }

        debug!("Clicked at ({}, {})", x, y);
        Ok(())
    }

    /// Move mouse to coordinates.
    pub async fn mouse_move(&self, x: f64, y: f64) -> Result<(), CdpError> {
        self.call(
            "Input.dispatchMouseEvent",
            Some(json!({
                "type": MouseEventType::MouseMoved,
                "x": x,
                "y": y,
                "button": MouseButton::None,
            })),
        )
        .await?;
        Ok(())
    }

    /// Dispatch a wheel event at coordinates.
    pub async fn scroll(&self, x: f64, y: f64, delta_x: f64, delta_y: f64) -> Result<(), CdpError> {
        self.call(
            "Input.dispatchMouseEvent",
            Some(json!({
                "type": MouseEventType::MouseWheel,
                "x": x,
                "y": y,
                "deltaX": delta_x,
                "deltaY": delta_y,
            })),
        )
        .await?;
        Ok(())
    }

    /// Insert text into the focused element.
    pub async fn type_text(&self, text: &str) -> Result<(), CdpError> {
        self.call("Input.insertText", Some(json!({"text": text})))
            .await?;
        debug!("Typed {} characters", text.chars().count());
        Ok(())
    }

    /// Press and release a key on whatever currently has focus.
    pub async fn press_key(&self, key: Key) -> Result<(), CdpError> {
        self.call("Input.dispatchKeyEvent", Some(Self::key_event(key, true)))
            .await?;
        self.call("Input.dispatchKeyEvent", Some(Self::key_event(key, false)))
            .await?;
        Ok(())
    }

    /// Key event parameters. Keys that produce text go down as `keyDown`
    /// with that text so Chrome runs the default action; others as
    /// `rawKeyDown`.
    pub(super) fn key_event(key: Key, down: bool) -> Value {
        let event_type = match (down, key.text()) {
            (false, _) => KeyEventType::KeyUp,
            (true, Some(_)) => KeyEventType::KeyDown,
            (true, None) => KeyEventType::RawKeyDown,
        };
        let mut params = json!({
            "type": event_type,
            "key": key.name(),
            "code": key.name(),
            "windowsVirtualKeyCode": key.virtual_key_code(),
            "nativeVirtualKeyCode": key.virtual_key_code(),
        });
        if let (true, Some(text)) = (down, key.text()) {
            params["text"] = json!(text);
            params["unmodifiedText"] = json!(text);
        }
        params
    }
}
