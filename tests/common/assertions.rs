//! Response assertions

use serde_json::Value;

/// Fields named in a 400 response's `details`
pub fn violated_fields(body: &Value) -> Vec<String> {
    body["details"]
        .as_array()
        .map(|details| {
            details
                .iter()
                .filter_map(|d| d["field"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Assert the uniform generation envelope
pub fn assert_envelope(body: &Value, artifact_field: &str) {
    assert_eq!(body["success"], Value::Bool(true), "success flag in {}", body);
    assert!(body.get(artifact_field).is_some(), "missing {} in {}", artifact_field, body);
    assert!(body.get("generation_id").is_some(), "missing generation_id in {}", body);

    let metadata = &body["metadata"];
    assert!(metadata["settings"].is_object(), "missing settings in {}", body);
    assert!(metadata["generated_at"].is_string(), "missing generated_at in {}", body);
    assert!(metadata["user_id"].is_string(), "missing user_id in {}", body);
    assert!(metadata["provider"].is_string(), "missing provider in {}", body);
}
