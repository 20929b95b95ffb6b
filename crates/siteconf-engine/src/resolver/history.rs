//! Relay-style paging over history, newest first
//!
//! `first`/`after` walk toward older revisions, `last`/`before` toward newer
//! ones. Cursors are ordinary opaque snapshot ids.

use serde::Serialize;
use siteconf_core::errors::{Result, SiteConfigError};
use siteconf_core::identity::OpaqueId;
use siteconf_core::SnapshotId;

use crate::config::HistoryConfig;
use crate::resolver::revision::RevisionView;

/// Connection arguments as received from the caller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryArgs {
    pub first: Option<usize>,
    pub after: Option<String>,
    pub last: Option<usize>,
    pub before: Option<String>,
}

impl HistoryArgs {
    pub fn first(n: usize) -> Self {
        Self {
            first: Some(n),
            ..Self::default()
        }
    }

    pub fn last(n: usize) -> Self {
        Self {
            last: Some(n),
            ..Self::default()
        }
    }

    pub fn after(mut self, cursor: impl Into<String>) -> Self {
        self.after = Some(cursor.into());
        self
    }

    pub fn before(mut self, cursor: impl Into<String>) -> Self {
        self.before = Some(cursor.into());
        self
    }
}

/// Page boundaries and whether more revisions exist on either side
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// More (older) revisions follow the end of this page
    pub has_next_page: bool,
    /// More (newer) revisions precede the start of this page
    pub has_previous_page: bool,
    pub start_cursor: Option<OpaqueId>,
    pub end_cursor: Option<OpaqueId>,
}

/// One page of history, newest first
#[derive(Debug, Clone)]
pub struct HistoryPage {
    pub items: Vec<RevisionView>,
    pub page_info: PageInfo,
    pub total_count: u64,
}

/// Validated arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PageRequest {
    /// `size` revisions older than `after` (or from the newest)
    Forward {
        size: usize,
        after: Option<SnapshotId>,
    },
    /// `size` revisions newer than `before` (or up to the oldest)
    Backward {
        size: usize,
        before: Option<SnapshotId>,
    },
}

impl PageRequest {
    /// Validate and normalize connection arguments
    ///
    /// Sizes above the configured maximum are clamped rather than rejected.
    pub(crate) fn from_args(args: &HistoryArgs, config: &HistoryConfig) -> Result<Self> {
        let invalid = |reason: &str| -> siteconf_core::ExError {
            SiteConfigError::InvalidPagination {
                reason: reason.to_string(),
            }
            .into()
        };

        if args.first.is_some() && args.last.is_some() {
            return Err(invalid("first and last cannot be combined"));
        }
        if args.after.is_some() && args.before.is_some() {
            return Err(invalid("after and before cannot be combined"));
        }
        if args.after.is_some() && args.last.is_some() {
            return Err(invalid("after must be paired with first"));
        }
        if args.before.is_some() && args.first.is_some() {
            return Err(invalid("before must be paired with last"));
        }

        let requested = args.first.or(args.last);
        if requested == Some(0) {
            return Err(invalid("page size must be greater than zero"));
        }
        let size = requested
            .unwrap_or(config.default_page_size)
            .min(config.max_page_size);

        let decode = |cursor: &Option<String>| -> Result<Option<SnapshotId>> {
            cursor
                .as_deref()
                .map(SnapshotId::from_opaque)
                .transpose()
        };

        if args.last.is_some() || args.before.is_some() {
            Ok(PageRequest::Backward {
                size,
                before: decode(&args.before)?,
            })
        } else {
            Ok(PageRequest::Forward {
                size,
                after: decode(&args.after)?,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siteconf_core::errors::ExErrorKind;

    fn config() -> HistoryConfig {
        HistoryConfig {
            default_page_size: 20,
            max_page_size: 50,
        }
    }

    #[test]
    fn test_no_args_is_default_forward_page() {
        let request = PageRequest::from_args(&HistoryArgs::default(), &config()).unwrap();
        assert_eq!(
            request,
            PageRequest::Forward {
                size: 20,
                after: None
            }
        );
    }

    #[test]
    fn test_oversized_page_is_clamped() {
        let request = PageRequest::from_args(&HistoryArgs::first(500), &config()).unwrap();
        assert_eq!(
            request,
            PageRequest::Forward {
                size: 50,
                after: None
            }
        );
    }

    #[test]
    fn test_before_alone_pages_backward() {
        let cursor = SnapshotId::new(8).to_opaque().into_string();
        let args = HistoryArgs {
            before: Some(cursor),
            ..HistoryArgs::default()
        };
        assert_eq!(
            PageRequest::from_args(&args, &config()).unwrap(),
            PageRequest::Backward {
                size: 20,
                before: Some(SnapshotId::new(8))
            }
        );
    }

    #[test]
    fn test_invalid_combinations() {
        let cursor = SnapshotId::new(3).to_opaque().into_string();
        let cases = vec![
            HistoryArgs {
                first: Some(1),
                last: Some(1),
                ..HistoryArgs::default()
            },
            HistoryArgs::last(2).after(cursor.clone()),
            HistoryArgs::first(2).before(cursor.clone()),
            HistoryArgs {
                after: Some(cursor.clone()),
                before: Some(cursor),
                ..HistoryArgs::default()
            },
            HistoryArgs::first(0),
            HistoryArgs::last(0),
        ];
        for args in cases {
            let err = PageRequest::from_args(&args, &config()).unwrap_err();
            assert_eq!(err.kind(), ExErrorKind::InvalidInput, "{:?}", args);
        }
    }

    #[test]
    fn test_cursor_of_other_kind_is_malformed() {
        let user_cursor = siteconf_core::identity::encode("User", 3).into_string();
        let err = PageRequest::from_args(&HistoryArgs::first(2).after(user_cursor), &config())
            .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::MalformedId);
    }
}
