//! JavaScript execution operations for CDP page session.

use serde_json::{Value, json};

use crate::cdp::error::CdpError;
use crate::cdp::protocol::{PropertyDescriptor, RemoteObject};

use super::core::PageSession;

impl PageSession {
    /// Evaluate JavaScript expression.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, CdpError> {
        let result = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": true,
                    "awaitPromise": true,
                })),
            )
            .await?;

        check_exception(&result)?;
        Ok(result["result"]["value"].clone())
    }

    /// Evaluate JavaScript and return remote object.
    pub async fn evaluate_handle(&self, expression: &str) -> Result<RemoteObject, CdpError> {
        let result = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": false,
                })),
            )
            .await?;

        check_exception(&result)?;
        let remote_obj: RemoteObject = serde_json::from_value(result["result"].clone())?;
        Ok(remote_obj)
    }

    /// Call `function` with `this` bound to the remote object and return the
    /// result by value.
    pub async fn call_function_on(
        &self,
        object_id: &str,
        function: &str,
        args: Vec<Value>,
    ) -> Result<Value, CdpError> {
        let result = self
            .call(
                "Runtime.callFunctionOn",
                Some(call_params(object_id, function, args, true)),
            )
            .await?;

        check_exception(&result)?;
        Ok(result["result"]["value"].clone())
    }

    /// Like [`PageSession::call_function_on`], but keep the result remote.
    pub async fn call_function_handle(
        &self,
        object_id: &str,
        function: &str,
        args: Vec<Value>,
    ) -> Result<RemoteObject, CdpError> {
        let result = self
            .call(
                "Runtime.callFunctionOn",
                Some(call_params(object_id, function, args, false)),
            )
            .await?;

        check_exception(&result)?;
        let remote_obj: RemoteObject = serde_json::from_value(result["result"].clone())?;
        Ok(remote_obj)
    }

    /// Own properties of a remote object (array items are named by index).
    pub async fn get_properties(&self, object_id: &str) -> Result<Vec<PropertyDescriptor>, CdpError> {
        let result = self
            .call(
                "Runtime.getProperties",
                Some(json!({"objectId": object_id, "ownProperties": true})),
            )
            .await?;

        let props: Vec<PropertyDescriptor> = serde_json::from_value(result["result"].clone())?;
        Ok(props)
    }

    /// Call a function returning an array of nodes and collect their object
    /// ids in array order.
    pub async fn call_function_nodes(
        &self,
        object_id: &str,
        function: &str,
        args: Vec<Value>,
    ) -> Result<Vec<String>, CdpError> {
        let array = self.call_function_handle(object_id, function, args).await?;
        let Some(array_id) = array.object_id else {
            return Ok(Vec::new());
        };
        let props = self.get_properties(&array_id).await?;
        let _ = self.release_object(&array_id).await;
        Ok(array_items(props)
            .into_iter()
            .filter_map(|(_, obj)| obj.object_id)
            .collect())
    }

    /// Release a remote object so the page can collect it.
    pub async fn release_object(&self, object_id: &str) -> Result<(), CdpError> {
        self.call("Runtime.releaseObject", Some(json!({"objectId": object_id})))
            .await?;
        Ok(())
    }
}

pub(super) fn call_params(object_id: &str, function: &str, args: Vec<Value>, by_value: bool) -> Value {
    json!({
        "objectId": object_id,
        "functionDeclaration": function,
        "arguments": args.into_iter().map(|v| json!({"value": v})).collect::<Vec<_>>(),
        "returnByValue": by_value,
        "awaitPromise": true,
    })
}

fn check_exception(result: &Value) -> Result<(), CdpError> {
    match result.get("exceptionDetails") {
        Some(exception) => {
            let text = exception["exception"]["description"]
                .as_str()
                .or_else(|| exception["text"].as_str())
                .unwrap_or("Unknown error");
            Err(CdpError::JavaScript(text.to_string()))
        }
        None => Ok(()),
    }
}

/// Array items in index order; non-index properties and non-node values are
/// skipped.
pub(super) fn array_items(props: Vec<PropertyDescriptor>) -> Vec<(usize, RemoteObject)> {
    let mut items: Vec<(usize, RemoteObject)> = props
        .into_iter()
        .filter_map(|p| {
            let index = p.name.parse::<usize>().ok()?;
            let value = p.value?;
            value.node_id()?;
            Some((index, value))
        })
        .collect();
    items.sort_by_key(|(index, _)| *index);
    items
}
