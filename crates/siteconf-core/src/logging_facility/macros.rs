//! Canonical operation logging macros
//!
//! Every event carries `component`, `op` and `event`; callers append their
//! own fields (`request_id`, `snapshot_id`, ...). Crates using these macros
//! must depend on `siteconf-core-types` for the schema constants.

#[doc(hidden)]
#[macro_export]
macro_rules! __log_op_event {
    ($level:ident, $op:expr, $event:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = $event,
            $($($field)*)?
        )
    };
}

/// Log the start of an operation
///
/// ```
/// # use siteconf_core::log_op_start;
/// log_op_start!("revision_history");
/// log_op_start!("revision_get", snapshot_id = 3);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(
            info,
            $op,
            siteconf_core_types::schema::EVENT_START
            $(, $($field)*)?
        )
    };
}

/// Log the successful end of an operation; `duration_ms` is required
///
/// ```
/// # use siteconf_core::log_op_end;
/// log_op_end!("revision_history", duration_ms = 42, page_len = 20);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(
            info,
            $op,
            siteconf_core_types::schema::EVENT_END,
            duration_ms = $duration
            $(, $($field)*)?
        )
    };
}

/// Log a failed operation with its error kind and stable code
///
/// Accepts anything convertible into `ExError`.
///
/// ```
/// # use siteconf_core::{log_op_error, errors::SiteConfigError};
/// let err = SiteConfigError::SnapshotNotFound { snapshot_id: 9 };
/// log_op_error!("revision_get", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::__log_op_event!(
            error,
            $op,
            siteconf_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code()
            $(, $($field)*)?
        )
    }};
}

/// Log a fallback that let the operation continue (`ERR_DIFF_DEGRADED`)
///
/// ```
/// # use siteconf_core::log_op_degraded;
/// log_op_degraded!("diff", snapshot_id = 4);
/// ```
#[macro_export]
macro_rules! log_op_degraded {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__log_op_event!(
            warn,
            $op,
            siteconf_core_types::schema::EVENT_DEGRADED,
            err.code = $crate::errors::ExErrorKind::DiffDegraded.code()
            $(, $($field)*)?
        )
    };
}
