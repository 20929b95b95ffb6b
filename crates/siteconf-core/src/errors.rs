use siteconf_core_types::{RequestId, TraceId};
use thiserror::Error;

/// Result type alias using the structured error
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers (and the query layer
/// sitting above this crate) can match on without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Lookup
    NotFound,

    // Identity
    /// An opaque id could not be decoded or carried the wrong kind tag
    MalformedId,

    // Diff
    /// The diff fell back to a raw-text comparison (non-fatal, never returned as Err)
    DiffDegraded,
    /// Sensitive values could not be confidently removed; no diff is emitted
    RedactionFailed,

    // Request lifecycle
    Cancelled,

    // Validation
    InvalidInput,
    InvalidConfig,

    // Integration/IO
    Io,
    Serialization,
    Persistence,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::MalformedId => "ERR_MALFORMED_ID",
            ExErrorKind::DiffDegraded => "ERR_DIFF_DEGRADED",
            ExErrorKind::RedactionFailed => "ERR_REDACTION_FAILED",
            ExErrorKind::Cancelled => "ERR_CANCELLED",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Classification fields support programmatic handling; the remaining
/// context is for debugging and log correlation.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add trace ID context
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }

    /// True for the lookup-miss classification callers may choose to degrade
    pub fn is_not_found(&self) -> bool {
        self.kind == ExErrorKind::NotFound
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain error taxonomy for revision history operations
///
/// Messages never include configuration contents or user secrets; they
/// name ids, kinds and key paths only.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SiteConfigError {
    /// Snapshot not found in the store
    #[error("Site configuration snapshot not found: {snapshot_id}")]
    SnapshotNotFound { snapshot_id: i64 },

    /// Author references a user that no longer resolves
    #[error("User not found: {user_id}")]
    UserNotFound { user_id: i32 },

    /// Opaque id could not be decoded
    #[error("Malformed id {id:?}: {reason}")]
    MalformedId { id: String, reason: String },

    /// Opaque id decoded but belongs to another entity kind
    #[error("Id {id:?} has kind {found:?}, expected {expected:?}")]
    KindMismatch {
        id: String,
        expected: String,
        found: String,
    },

    /// A sensitive value survived the redaction pass
    #[error("Redaction could not be applied: {location}")]
    RedactionFailed { location: String },

    /// Redaction pattern failed to compile
    #[error("Invalid redaction pattern {pattern:?}: {reason}")]
    InvalidRedactionPattern { pattern: String, reason: String },

    /// `updated_at` earlier than `created_at`
    #[error("Snapshot {snapshot_id} has updated_at before created_at")]
    TimestampOrder { snapshot_id: i64 },

    /// Pagination arguments that cannot be combined or are out of range
    #[error("Invalid pagination arguments: {reason}")]
    InvalidPagination { reason: String },

    /// The caller's context was cancelled mid-resolution
    #[error("Operation cancelled: {op}")]
    Cancelled { op: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<SiteConfigError> for ExError {
    fn from(err: SiteConfigError) -> Self {
        match err {
            SiteConfigError::SnapshotNotFound { snapshot_id } => {
                ExError::new(ExErrorKind::NotFound)
                    .with_entity_id(snapshot_id.to_string())
                    .with_message("site configuration snapshot not found")
            }

            SiteConfigError::UserNotFound { user_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(user_id.to_string())
                .with_message("user not found"),

            SiteConfigError::MalformedId { id, reason } => ExError::new(ExErrorKind::MalformedId)
                .with_entity_id(id)
                .with_message(reason),

            SiteConfigError::KindMismatch {
                id,
                expected,
                found,
            } => ExError::new(ExErrorKind::MalformedId)
                .with_entity_id(id)
                .with_message(format!("expected kind {}, found {}", expected, found)),

            SiteConfigError::RedactionFailed { location } => {
                ExError::new(ExErrorKind::RedactionFailed)
                    .with_message(format!("sensitive value not redacted at {}", location))
            }

            SiteConfigError::InvalidRedactionPattern { pattern, reason } => {
                ExError::new(ExErrorKind::InvalidConfig)
                    .with_message(format!("invalid redaction pattern {:?}: {}", pattern, reason))
            }

            SiteConfigError::TimestampOrder { snapshot_id } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_entity_id(snapshot_id.to_string())
                    .with_message("updated_at must not precede created_at")
            }

            SiteConfigError::InvalidPagination { reason } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(reason)
            }

            SiteConfigError::Cancelled { op } => ExError::new(ExErrorKind::Cancelled)
                .with_op(op)
                .with_message("request context cancelled"),

            SiteConfigError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            SiteConfigError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to SiteConfigError
impl From<serde_json::Error> for SiteConfigError {
    fn from(err: serde_json::Error) -> Self {
        SiteConfigError::Serialization {
            message: err.to_string(),
        }
    }
}
