//! In-memory platform adapters
//!
//! Process-local stand-ins for the hosted platform, used by the demo binary
//! and the test suites. Each adapter can be switched into a failing state to
//! simulate outages and counts the calls it receives.

use super::{
    AuthProvider, AuthRecord, Direction, Document, DocumentStore, Fields, Filter, FunctionsClient,
    PlatformError, PlatformResult, Query, RemoteConfig,
};
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use serde_json::{json, Value};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

fn not_found(collection: &str, id: &str) -> PlatformError {
    PlatformError::new("not-found", format!("No document {}/{}", collection, id))
}

fn matches(data: &Fields, filter: &Filter) -> bool {
    match filter {
        Filter::Eq(field, value) => data.get(field) == Some(value),
        Filter::ArrayContains(field, value) => data
            .get(field)
            .and_then(Value::as_array)
            .map(|items| items.contains(value))
            .unwrap_or(false),
        Filter::Prefix(field, prefix) => data
            .get(field)
            .and_then(Value::as_str)
            .map(|s| s.starts_with(prefix.as_str()))
            .unwrap_or(false),
    }
}

// Timestamps are stored as {seconds, nanoseconds} objects.
fn timestamp_key(fields: &Fields) -> (i64, i64) {
    (
        fields.get("seconds").and_then(Value::as_i64).unwrap_or(0),
        fields.get("nanoseconds").and_then(Value::as_i64).unwrap_or(0),
    )
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match (a, b) {
            (Value::Number(x), Value::Number(y)) => {
                x.as_f64().partial_cmp(&y.as_f64()).unwrap_or(Ordering::Equal)
            }
            (Value::String(x), Value::String(y)) => x.cmp(y),
            (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
            (Value::Object(x), Value::Object(y)) => timestamp_key(x).cmp(&timestamp_key(y)),
            _ => Ordering::Equal,
        },
    }
}

/// In-memory document database
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Fields>>>,
    failure: RwLock<Option<PlatformError>>,
    calls: AtomicUsize,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every subsequent call with `error` (or recover with `None`)
    pub async fn fail_with(&self, error: Option<PlatformError>) {
        *self.failure.write().await = error;
    }

    /// Number of calls received so far, failed ones included
    pub fn call_count(&self) -> usize {
        self.calls.load(AtomicOrdering::SeqCst)
    }

    /// Number of documents in a collection
    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map(BTreeMap::len)
            .unwrap_or(0)
    }

    async fn enter(&self) -> PlatformResult<()> {
        self.calls.fetch_add(1, AtomicOrdering::SeqCst);
        match self.failure.read().await.clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    async fn modify<F>(&self, collection: &str, id: &str, f: F) -> PlatformResult<()>
    where
        F: FnOnce(&mut Fields),
    {
        self.enter().await?;
        let mut collections = self.collections.write().await;
        let data = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| not_found(collection, id))?;
        f(data);
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> PlatformResult<Option<Document>> {
        self.enter().await?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|data| Document {
                id: id.to_string(),
                data: data.clone(),
            }))
    }

    async fn add(&self, collection: &str, data: Fields) -> PlatformResult<String> {
        self.enter().await?;
        let id = Uuid::new_v4().simple().to_string();
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), data);
        debug!("Added document {}/{}", collection, id);
        Ok(id)
    }

    async fn set(&self, collection: &str, id: &str, data: Fields) -> PlatformResult<()> {
        self.enter().await?;
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), data);
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, partial: Fields) -> PlatformResult<()> {
        self.modify(collection, id, |data| {
            for (key, value) in partial {
                data.insert(key, value);
            }
        })
        .await
    }

    async fn delete(&self, collection: &str, id: &str) -> PlatformResult<()> {
        self.enter().await?;
        if let Some(docs) = self.collections.write().await.get_mut(collection) {
            docs.remove(id);
        }
        Ok(())
    }

    async fn query(&self, collection: &str, query: &Query) -> PlatformResult<Vec<Document>> {
        self.enter().await?;
        let collections = self.collections.read().await;
        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        let mut matched: Vec<Document> = docs
            .iter()
            .filter(|(_, data)| query.filters.iter().all(|filter| matches(data, filter)))
            .map(|(id, data)| Document {
                id: id.clone(),
                data: data.clone(),
            })
            .collect();

        if let Some((field, direction)) = &query.order_by {
            matched.sort_by(|a, b| {
                let ordering = compare_values(a.data.get(field), b.data.get(field))
                    .then_with(|| a.id.cmp(&b.id));
                match direction {
                    Direction::Ascending => ordering,
                    Direction::Descending => ordering.reverse(),
                }
            });
        }

        if let Some(after) = &query.start_after {
            match matched.iter().position(|doc| &doc.id == after) {
                Some(pos) => {
                    matched.drain(..=pos);
                }
                // The cursor document is gone; nothing follows it.
                None => matched.clear(),
            }
        }

        if let Some(limit) = query.limit {
            matched.truncate(limit);
        }

        Ok(matched)
    }

    async fn increment(&self, collection: &str, id: &str, field: &str, by: i64) -> PlatformResult<()> {
        self.modify(collection, id, |data| {
            let current = data.get(field).and_then(Value::as_i64).unwrap_or(0);
            data.insert(field.to_string(), json!(current + by));
        })
        .await
    }

    async fn array_union(&self, collection: &str, id: &str, field: &str, value: Value) -> PlatformResult<()> {
        self.modify(collection, id, |data| match data.get_mut(field) {
            Some(Value::Array(items)) => {
                if !items.contains(&value) {
                    items.push(value);
                }
            }
            _ => {
                data.insert(field.to_string(), Value::Array(vec![value]));
            }
        })
        .await
    }

    async fn array_remove(&self, collection: &str, id: &str, field: &str, value: Value) -> PlatformResult<()> {
        self.modify(collection, id, |data| {
            if let Some(Value::Array(items)) = data.get_mut(field) {
                items.retain(|item| item != &value);
            }
        })
        .await
    }
}

struct Account {
    uid: String,
    email: String,
    password: String,
    display_name: Option<String>,
    email_verified: bool,
}

impl Account {
    fn record(&self) -> AuthRecord {
        AuthRecord {
            uid: self.uid.clone(),
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            email_verified: self.email_verified,
        }
    }
}

#[derive(Default)]
struct AuthState {
    accounts: HashMap<String, Account>,
    current: Option<String>,
    reset_requests: Vec<String>,
}

impl AuthState {
    fn find_by_email(&self, email: &str) -> Option<&Account> {
        self.accounts.values().find(|a| a.email.eq_ignore_ascii_case(email))
    }

    fn current_account(&mut self, password: &str) -> PlatformResult<&mut Account> {
        let uid = self
            .current
            .clone()
            .ok_or_else(|| PlatformError::new("auth/no-current-user", "No user is signed in"))?;
        let account = self
            .accounts
            .get_mut(&uid)
            .ok_or_else(|| PlatformError::new("auth/user-not-found", "The account no longer exists"))?;
        if account.password != password {
            return Err(PlatformError::new("auth/wrong-password", "The password is invalid"));
        }
        Ok(account)
    }
}

fn check_email(email: &str) -> PlatformResult<()> {
    if email.contains('@') {
        Ok(())
    } else {
        Err(PlatformError::new("auth/invalid-email", "The email address is badly formatted"))
    }
}

fn check_password(password: &str) -> PlatformResult<()> {
    if password.len() >= 6 {
        Ok(())
    } else {
        Err(PlatformError::new("auth/weak-password", "Password should be at least 6 characters"))
    }
}

/// In-memory email/password authentication
#[derive(Default)]
pub struct MemoryAuthProvider {
    state: RwLock<AuthState>,
    failure: RwLock<Option<PlatformError>>,
    calls: AtomicUsize,
}

impl MemoryAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every subsequent call with `error` (or recover with `None`)
    pub async fn fail_with(&self, error: Option<PlatformError>) {
        *self.failure.write().await = error;
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(AtomicOrdering::SeqCst)
    }

    /// Emails that requested a password reset
    pub async fn reset_requests(&self) -> Vec<String> {
        self.state.read().await.reset_requests.clone()
    }

    async fn enter(&self) -> PlatformResult<()> {
        self.calls.fetch_add(1, AtomicOrdering::SeqCst);
        match self.failure.read().await.clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AuthProvider for MemoryAuthProvider {
    async fn sign_in(&self, email: &str, password: &str) -> PlatformResult<AuthRecord> {
        self.enter().await?;
        check_email(email)?;
        let mut state = self.state.write().await;
        let account = state
            .find_by_email(email)
            .ok_or_else(|| PlatformError::new("auth/user-not-found", "There is no user record for this email"))?;
        if account.password != password {
            return Err(PlatformError::new("auth/wrong-password", "The password is invalid"));
        }
        let record = account.record();
        state.current = Some(record.uid.clone());
        Ok(record)
    }

    async fn create_user(&self, email: &str, password: &str, display_name: &str) -> PlatformResult<AuthRecord> {
        self.enter().await?;
        check_email(email)?;
        check_password(password)?;
        let mut state = self.state.write().await;
        if state.find_by_email(email).is_some() {
            return Err(PlatformError::new(
                "auth/email-already-in-use",
                "The email address is already in use by another account",
            ));
        }
        let account = Account {
            uid: Uuid::new_v4().simple().to_string(),
            email: email.to_string(),
            password: password.to_string(),
            display_name: Some(display_name.to_string()),
            email_verified: false,
        };
        let record = account.record();
        state.accounts.insert(account.uid.clone(), account);
        state.current = Some(record.uid.clone());
        Ok(record)
    }

    async fn sign_out(&self) -> PlatformResult<()> {
        self.enter().await?;
        self.state.write().await.current = None;
        Ok(())
    }

    async fn current_user(&self) -> PlatformResult<Option<AuthRecord>> {
        self.enter().await?;
        let state = self.state.read().await;
        Ok(state
            .current
            .as_ref()
            .and_then(|uid| state.accounts.get(uid))
            .map(Account::record))
    }

    async fn send_password_reset(&self, email: &str) -> PlatformResult<()> {
        self.enter().await?;
        check_email(email)?;
        let mut state = self.state.write().await;
        if state.find_by_email(email).is_none() {
            return Err(PlatformError::new("auth/user-not-found", "There is no user record for this email"));
        }
        state.reset_requests.push(email.to_string());
        Ok(())
    }

    async fn update_email(&self, current_password: &str, new_email: &str) -> PlatformResult<AuthRecord> {
        self.enter().await?;
        check_email(new_email)?;
        let mut state = self.state.write().await;
        if state.find_by_email(new_email).is_some() {
            return Err(PlatformError::new(
                "auth/email-already-in-use",
                "The email address is already in use by another account",
            ));
        }
        let account = state.current_account(current_password)?;
        account.email = new_email.to_string();
        account.email_verified = false;
        Ok(account.record())
    }

    async fn update_password(&self, current_password: &str, new_password: &str) -> PlatformResult<()> {
        self.enter().await?;
        check_password(new_password)?;
        let mut state = self.state.write().await;
        let account = state.current_account(current_password)?;
        account.password = new_password.to_string();
        Ok(())
    }
}

/// Handler backing one callable function
pub type FunctionHandler = Arc<dyn Fn(Value) -> BoxFuture<'static, PlatformResult<Value>> + Send + Sync>;

/// In-memory callable functions
#[derive(Default)]
pub struct MemoryFunctions {
    handlers: RwLock<HashMap<String, FunctionHandler>>,
    calls: RwLock<Vec<(String, Value)>>,
}

impl MemoryFunctions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deploy `handler` under `name`
    pub async fn register<F, Fut>(&self, name: &str, handler: F)
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = PlatformResult<Value>> + Send + 'static,
    {
        let handler: FunctionHandler = Arc::new(move |payload| handler(payload).boxed());
        self.handlers.write().await.insert(name.to_string(), handler);
    }

    /// Every invocation received, in order
    pub async fn calls(&self) -> Vec<(String, Value)> {
        self.calls.read().await.clone()
    }
}

#[async_trait]
impl FunctionsClient for MemoryFunctions {
    async fn call(&self, name: &str, payload: Value) -> PlatformResult<Value> {
        self.calls
            .write()
            .await
            .push((name.to_string(), payload.clone()));
        let handler = self.handlers.read().await.get(name).cloned();
        match handler {
            Some(handler) => handler(payload).await,
            None => Err(PlatformError::new(
                "not-found",
                format!("Function {} is not deployed", name),
            )),
        }
    }
}

/// Remote config with fixed parameter values
#[derive(Default)]
pub struct StaticRemoteConfig {
    values: RwLock<BTreeMap<String, Value>>,
    failure: RwLock<Option<PlatformError>>,
}

impl StaticRemoteConfig {
    pub fn new(values: BTreeMap<String, Value>) -> Self {
        Self {
            values: RwLock::new(values),
            failure: RwLock::new(None),
        }
    }

    pub async fn set(&self, key: &str, value: Value) {
        self.values.write().await.insert(key.to_string(), value);
    }

    pub async fn fail_with(&self, error: Option<PlatformError>) {
        *self.failure.write().await = error;
    }
}

#[async_trait]
impl RemoteConfig for StaticRemoteConfig {
    async fn fetch_all(&self) -> PlatformResult<BTreeMap<String, Value>> {
        if let Some(error) = self.failure.read().await.clone() {
            return Err(error);
        }
        Ok(self.values.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(value: Value) -> Fields {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_add_get_update_delete() {
        let store = MemoryDocumentStore::new();
        let id = store.add("businesses", fields(json!({ "name": "Cafe" }))).await.unwrap();

        store
            .update("businesses", &id, fields(json!({ "category": "food" })))
            .await
            .unwrap();
        let doc = store.get("businesses", &id).await.unwrap().unwrap();
        assert_eq!(doc.data["name"], "Cafe");
        assert_eq!(doc.data["category"], "food");

        store.delete("businesses", &id).await.unwrap();
        assert!(store.get("businesses", &id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_missing_document() {
        let store = MemoryDocumentStore::new();
        let err = store
            .update("posts", "missing", fields(json!({ "x": 1 })))
            .await
            .unwrap_err();
        assert_eq!(err.code, "not-found");
    }

    #[tokio::test]
    async fn test_query_orders_and_paginates() {
        let store = MemoryDocumentStore::new();
        for i in 0..5 {
            store
                .set(
                    "posts",
                    &format!("p{}", i),
                    fields(json!({ "created_at": { "seconds": i, "nanoseconds": 0 }, "kind": "post" })),
                )
                .await
                .unwrap();
        }

        let first = store
            .query(
                "posts",
                &Query::new()
                    .where_eq("kind", "post")
                    .order_by("created_at", Direction::Descending)
                    .limit(2),
            )
            .await
            .unwrap();
        let ids: Vec<_> = first.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["p4", "p3"]);

        let second = store
            .query(
                "posts",
                &Query::new()
                    .order_by("created_at", Direction::Descending)
                    .start_after(Some("p3"))
                    .limit(2),
            )
            .await
            .unwrap();
        let ids: Vec<_> = second.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["p2", "p1"]);
    }

    #[tokio::test]
    async fn test_array_and_counter_ops() {
        let store = MemoryDocumentStore::new();
        store.set("posts", "p1", fields(json!({ "likes_count": 0 }))).await.unwrap();

        store.array_union("posts", "p1", "liked_by", json!("u1")).await.unwrap();
        store.array_union("posts", "p1", "liked_by", json!("u1")).await.unwrap();
        store.increment("posts", "p1", "likes_count", 1).await.unwrap();
        let doc = store.get("posts", "p1").await.unwrap().unwrap();
        assert_eq!(doc.data["liked_by"], json!(["u1"]));
        assert_eq!(doc.data["likes_count"], 1);

        store.array_remove("posts", "p1", "liked_by", json!("u1")).await.unwrap();
        let doc = store.get("posts", "p1").await.unwrap().unwrap();
        assert_eq!(doc.data["liked_by"], json!([]));
    }

    #[tokio::test]
    async fn test_failure_injection_counts_calls() {
        let store = MemoryDocumentStore::new();
        store.fail_with(Some(PlatformError::new("unavailable", "down"))).await;
        assert!(store.get("posts", "p1").await.is_err());
        assert_eq!(store.call_count(), 1);

        store.fail_with(None).await;
        assert!(store.get("posts", "p1").await.is_ok());
    }

    #[tokio::test]
    async fn test_auth_flow() {
        let auth = MemoryAuthProvider::new();
        let created = auth.create_user("ada@example.com", "secret1", "Ada").await.unwrap();
        assert_eq!(auth.current_user().await.unwrap(), Some(created.clone()));

        auth.sign_out().await.unwrap();
        assert_eq!(auth.current_user().await.unwrap(), None);

        let err = auth.sign_in("ada@example.com", "wrong").await.unwrap_err();
        assert_eq!(err.code, "auth/wrong-password");

        let err = auth.create_user("ada@example.com", "secret1", "Ada").await.unwrap_err();
        assert_eq!(err.code, "auth/email-already-in-use");

        auth.sign_in("ADA@example.com", "secret1").await.unwrap();
        auth.update_password("secret1", "secret2").await.unwrap();
        let err = auth.update_email("secret1", "new@example.com").await.unwrap_err();
        assert_eq!(err.code, "auth/wrong-password");
        let updated = auth.update_email("secret2", "new@example.com").await.unwrap();
        assert_eq!(updated.email, "new@example.com");
    }

    #[tokio::test]
    async fn test_functions_dispatch() {
        let functions = MemoryFunctions::new();
        functions
            .register("echo", |payload| async move { Ok(json!({ "echo": payload })) })
            .await;

        let out = functions.call("echo", json!(1)).await.unwrap();
        assert_eq!(out, json!({ "echo": 1 }));

        let err = functions.call("missing", json!(null)).await.unwrap_err();
        assert_eq!(err.code, "not-found");
        assert_eq!(functions.calls().await.len(), 2);
    }
}
