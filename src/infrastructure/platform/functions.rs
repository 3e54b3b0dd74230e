//! Callable functions for the in-memory platform
//!
//! Mirrors the server-side callables the client invokes, operating directly
//! on a [`MemoryDocumentStore`].

use super::memory::{MemoryDocumentStore, MemoryFunctions};
use super::{
    DocumentStore, Fields, PlatformError, PlatformResult, FN_GET_PROFILE_BY_ID,
    FN_REGISTER_BUSINESS_OWNER, FN_UPDATE_USER_ROLE,
};
use crate::domain::user::UserRole;
use serde_json::{json, Value};
use std::sync::Arc;

const USERS: &str = "users";

fn required_str<'a>(payload: &'a Value, field: &str) -> PlatformResult<&'a str> {
    payload
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| PlatformError::new("invalid-argument", format!("Missing {}", field)))
}

async fn load_profile(store: &MemoryDocumentStore, user_id: &str) -> PlatformResult<Value> {
    let document = store
        .get(USERS, user_id)
        .await?
        .ok_or_else(|| PlatformError::new("not-found", format!("Profile {} not found", user_id)))?;
    let mut data = document.data;
    data.insert("id".to_string(), Value::String(document.id));
    Ok(Value::Object(data))
}

async fn get_profile_by_id(store: Arc<MemoryDocumentStore>, payload: Value) -> PlatformResult<Value> {
    let user_id = required_str(&payload, "userId")?;
    load_profile(&store, user_id).await
}

async fn update_user_role(store: Arc<MemoryDocumentStore>, payload: Value) -> PlatformResult<Value> {
    let user_id = required_str(&payload, "userId")?;
    let role = required_str(&payload, "role")?;
    if UserRole::parse(role).is_none() {
        return Err(PlatformError::new("invalid-argument", format!("Unknown role {}", role)));
    }

    let mut partial = Fields::new();
    partial.insert("role".to_string(), json!(role));
    store.update(USERS, user_id, partial).await?;
    Ok(json!({ "success": true }))
}

async fn register_business_owner(store: Arc<MemoryDocumentStore>, payload: Value) -> PlatformResult<Value> {
    let user_id = required_str(&payload, "userId")?;
    let business_name = required_str(&payload, "businessName")?;

    let mut partial = Fields::new();
    partial.insert("role".to_string(), json!(UserRole::BusinessOwner.as_str()));
    partial.insert("business_name".to_string(), json!(business_name));
    if let Some(phone) = payload.get("phone").filter(|p| !p.is_null()) {
        partial.insert("phone".to_string(), phone.clone());
    }
    store.update(USERS, user_id, partial).await?;
    load_profile(&store, user_id).await
}

/// Register the user callables on `functions`
pub async fn deploy_user_functions(functions: &MemoryFunctions, store: Arc<MemoryDocumentStore>) {
    let s = store.clone();
    functions
        .register(FN_GET_PROFILE_BY_ID, move |payload| get_profile_by_id(s.clone(), payload))
        .await;

    let s = store.clone();
    functions
        .register(FN_UPDATE_USER_ROLE, move |payload| update_user_role(s.clone(), payload))
        .await;

    functions
        .register(FN_REGISTER_BUSINESS_OWNER, move |payload| {
            register_business_owner(store.clone(), payload)
        })
        .await;
}
