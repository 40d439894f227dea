//! DOM operations for CDP page session.
//!
//! Nodes are addressed by Runtime object id so the same handle works for
//! the top document, iframe documents and shadow roots.

use serde_json::json;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::BoxModel;

use super::core::PageSession;

impl PageSession {
    /// Get box model for node, `None` when it has no layout box.
    pub async fn get_box_model(&self, object_id: &str) -> Result<Option<BoxModel>, CdpError> {
        let result = self
            .call("DOM.getBoxModel", Some(json!({"objectId": object_id})))
            .await;

        match result {
            Ok(r) => {
                let model: BoxModel = serde_json::from_value(r["model"].clone())?;
                Ok(Some(model))
            }
            Err(CdpError::Protocol { code: -32000, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Focus element.
    pub async fn focus(&self, object_id: &str) -> Result<(), CdpError> {
        self.call("DOM.focus", Some(json!({"objectId": object_id})))
            .await?;
        Ok(())
    }

    /// Scroll the element into the viewport if it is not already visible.
    pub async fn scroll_into_view(&self, object_id: &str) -> Result<(), CdpError> {
        self.call(
            "DOM.scrollIntoViewIfNeeded",
            Some(json!({"objectId": object_id})),
        )
        .await?;
        Ok(())
    }

    /// Viewport coordinates of the element's content-box center.
    pub async fn element_center(&self, object_id: &str) -> Result<Option<(f64, f64)>, CdpError> {
        Ok(self
            .get_box_model(object_id)
            .await?
            .filter(|model| model.width > 0 && model.height > 0)
            .map(|model| Self::quad_center(&model.content)))
    }

    /// Calculate center point of a quad.
    pub(super) fn quad_center(quad: &[f64]) -> (f64, f64) {
        if quad.len() >= 8 {
            let x = (quad[0] + quad[2] + quad[4] + quad[6]) / 4.0;
            let y = (quad[1] + quad[3] + quad[5] + quad[7]) / 4.0;
            (x, y)
        } else {
            (0.0, 0.0)
        }
    }
}
