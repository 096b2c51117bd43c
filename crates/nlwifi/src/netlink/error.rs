//! Error types for netlink and nl80211 operations.

use std::io;

/// Result type for netlink operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during netlink operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error from socket operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Kernel returned an error code.
    #[error("kernel error: {message} (errno {errno})")]
    Kernel {
        /// The errno value from the kernel.
        errno: i32,
        /// Human-readable error message.
        message: String,
    },

    /// Kernel error with operation context.
    #[error("{operation}: {message} (errno {errno})")]
    KernelWithContext {
        /// The operation that failed.
        operation: String,
        /// The errno value from the kernel.
        errno: i32,
        /// Human-readable error message.
        message: String,
    },

    /// Generic netlink family is not registered with the kernel.
    #[error("generic netlink family not found: {name}")]
    FamilyNotFound {
        /// The family name that was looked up.
        name: String,
    },

    /// The connection was closed.
    #[error("connection closed")]
    Closed,

    /// Message was truncated.
    #[error("message truncated: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Expected message length.
        expected: usize,
        /// Actual bytes received.
        actual: usize,
    },

    /// Invalid message format.
    #[error("invalid message: {0}")]
    InvalidMessage(String),

    /// Invalid attribute format.
    #[error("invalid attribute: {0}")]
    InvalidAttribute(String),

    /// Malformed 802.11 information element.
    #[error("invalid 802.11 information element: {0}")]
    InvalidElement(String),

    /// A required attribute was absent.
    #[error("missing attribute: {attr}")]
    MissingAttribute {
        /// Name of the missing attribute.
        attr: &'static str,
    },

    /// Decoding failed during a named parse step.
    #[error("{step}: {source}")]
    Decode {
        /// The parse step that failed.
        step: &'static str,
        /// The underlying decode error.
        #[source]
        source: Box<Error>,
    },

    /// Interface not found.
    #[error("interface not found: {name}")]
    InterfaceNotFound {
        /// The interface name (or index) that was not found.
        name: String,
    },

    /// No associated BSS on the interface.
    #[error("no associated BSS on {interface}")]
    BssNotFound {
        /// The interface that was queried.
        interface: String,
    },

    /// No station entries on the interface.
    #[error("no station info on {interface}")]
    StationNotFound {
        /// The interface that was queried.
        interface: String,
    },

    /// Channel number outside the supported channel table.
    #[error("invalid channel: {channel}")]
    InvalidChannel {
        /// The rejected channel number.
        channel: u32,
    },
}

impl Error {
    /// Create a kernel error from an errno value.
    pub fn from_errno(errno: i32) -> Self {
        let errno = errno.saturating_neg();
        let message = io::Error::from_raw_os_error(errno).to_string();
        Self::Kernel {
            errno,
            message,
        }
    }

    /// Create a kernel error with operation context.
    pub fn from_errno_with_context(errno: i32, operation: impl Into<String>) -> Self {
        let errno = errno.saturating_neg();
        let message = io::Error::from_raw_os_error(errno).to_string();
        Self::KernelWithContext {
            operation: operation.into(),
            errno,
            message,
        }
    }

    /// Add context to this error.
    ///
    /// Wraps kernel errors with operation context. Other errors are returned unchanged.
    pub fn with_context(self, operation: impl Into<String>) -> Self {
        match self {
            Self::Kernel { errno, message } => Self::KernelWithContext {
                operation: operation.into(),
                errno,
                message,
            },
            other => other,
        }
    }

    /// Tag a decode failure with the parse step it happened in.
    pub(crate) fn during(self, step: &'static str) -> Self {
        Self::Decode {
            step,
            source: Box::new(self),
        }
    }

    /// Check if this is a "not found" error (ENOENT, ENODEV, absent BSS, etc.).
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Kernel { errno, .. } | Self::KernelWithContext { errno, .. } => {
                matches!(*errno, libc::ENOENT | libc::ENODEV)
            }
            Self::InterfaceNotFound { .. }
            | Self::BssNotFound { .. }
            | Self::StationNotFound { .. } => true,
            _ => false,
        }
    }

    /// Check if this error came from decoding a kernel reply.
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            Self::Truncated { .. }
                | Self::InvalidMessage(_)
                | Self::InvalidAttribute(_)
                | Self::InvalidElement(_)
                | Self::MissingAttribute { .. }
                | Self::Decode { .. }
        )
    }

    /// Check if the request was rejected before reaching the kernel.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidChannel { .. })
    }

    /// Check if this is a permission error (EPERM, EACCES).
    pub fn is_permission_denied(&self) -> bool {
        match self {
            Self::Kernel { errno, .. } | Self::KernelWithContext { errno, .. } => {
                matches!(*errno, libc::EPERM | libc::EACCES)
            }
            _ => false,
        }
    }

    /// Check if this is a "device busy" error (EBUSY).
    pub fn is_busy(&self) -> bool {
        match self {
            Self::Kernel { errno, .. } | Self::KernelWithContext { errno, .. } => {
                *errno == libc::EBUSY
            }
            _ => false,
        }
    }

    /// Get the errno value if this is a kernel error.
    pub fn errno(&self) -> Option<i32> {
        match self {
            Self::Kernel { errno, .. } | Self::KernelWithContext { errno, .. } => Some(*errno),
            _ => None,
        }
    }
}
