//! GraphQL operation model and injected policies.
//!
//! The transport does not understand GraphQL documents; it carries an opaque
//! operation and delegates request-body shaping and id assignment to two
//! small policy traits, each with a default implementation.

use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;

/// Kind of a GraphQL operation. Only subscriptions are replayed after a
/// reconnect; queries and mutations are one-shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// Read operation, one result expected.
    Query,
    /// Write operation, one result expected.
    Mutation,
    /// Long-lived operation, unbounded results.
    Subscription,
}

/// A GraphQL operation submitted over the transport.
#[derive(Debug, Clone)]
pub struct GraphQLOperation {
    /// Operation kind.
    pub kind: OperationKind,
    /// Optional operation name from the document.
    pub operation_name: Option<String>,
    /// The GraphQL document text.
    pub query: String,
    /// Optional variables object.
    pub variables: Option<Value>,
}

impl GraphQLOperation {
    /// A query operation for `document`.
    #[must_use]
    pub fn query(document: impl Into<String>) -> Self {
        Self::new(OperationKind::Query, document)
    }

    /// A mutation operation for `document`.
    #[must_use]
    pub fn mutation(document: impl Into<String>) -> Self {
        Self::new(OperationKind::Mutation, document)
    }

    /// A subscription operation for `document`.
    #[must_use]
    pub fn subscription(document: impl Into<String>) -> Self {
        Self::new(OperationKind::Subscription, document)
    }

    fn new(kind: OperationKind, document: impl Into<String>) -> Self {
        Self {
            kind,
            operation_name: None,
            query: document.into(),
            variables: None,
        }
    }

    /// Whether this operation is a subscription.
    #[must_use]
    pub fn is_subscription(&self) -> bool {
        self.kind == OperationKind::Subscription
    }
}

/// Shapes the GraphQL request JSON for an operation.
pub trait RequestBodyCreator: Send + Sync {
    /// Build the `payload` object for the operation-start frame.
    fn request_body(&self, operation: &GraphQLOperation) -> Value;
}

/// Default body creator: always sends the full query document and never
/// negotiates persisted queries over this transport.
#[derive(Debug, Default)]
pub struct DefaultRequestBodyCreator;

impl RequestBodyCreator for DefaultRequestBodyCreator {
    fn request_body(&self, operation: &GraphQLOperation) -> Value {
        let mut body = serde_json::Map::new();
        body.insert("query".to_string(), Value::String(operation.query.clone()));
        if let Some(name) = &operation.operation_name {
            body.insert("operationName".to_string(), Value::String(name.clone()));
        }
        if let Some(variables) = &operation.variables {
            body.insert("variables".to_string(), variables.clone());
        }
        Value::Object(body)
    }
}

/// Produces a unique id per outbound operation.
pub trait OperationIdGenerator: Send + Sync {
    /// Next unique operation id.
    fn next_id(&self) -> String;
}

/// Default id generator: a monotonic sequence starting at `"1"`.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    /// Create a generator whose first id is `"1"`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl OperationIdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        self.next.fetch_add(1, Ordering::SeqCst).to_string()
    }
}
