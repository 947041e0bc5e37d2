//! Error types for the netclust core library.
//!
//! Every failure is terminal for the run that raised it. Variants are grouped
//! into the coarse [`ErrorCategory`] buckets so callers can decide how to
//! report them, and each variant carries a stable [`NetclustErrorCode`].

use std::{fmt, io, sync::Arc};

use thiserror::Error;

use crate::filter::WeightType;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr, $category:ident
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }

            /// Return the broad category the code belongs to.
            #[must_use]
            pub const fn category(self) -> ErrorCategory {
                match self {
                    $(Self::$CodeVariant => ErrorCategory::$category,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }

            /// Return the broad category of this error.
            #[must_use]
            pub const fn category(&self) -> ErrorCategory {
                self.code().category()
            }
        }
    };
}

/// Broad classes of failure.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorCategory {
    /// Invalid cutoff, weight type, or sizing arguments. No files are touched.
    Configuration,
    /// Missing files, short reads or writes, full disks.
    Io,
    /// Malformed input lines, out-of-range weights, corrupt index files.
    Format,
    /// Memory could not be reserved for a table.
    Allocation,
}

/// Position of the offending item inside an input.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Location {
    /// One-based line number in a text edge list.
    Line(u64),
    /// Zero-based record in a node index file.
    NodeRecord(u32),
    /// Zero-based record in an edge index file.
    EdgeRecord(u32),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Line(line) => write!(f, "line {line}"),
            Self::NodeRecord(record) => write!(f, "node record {record}"),
            Self::EdgeRecord(record) => write!(f, "edge record {record}"),
        }
    }
}

/// Reasons a node label cannot be stored in a fixed-width record.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum LabelError {
    /// The label does not fit the configured label width.
    #[error("label `{label}` is {len} bytes but the label width is {width}")]
    TooLong {
        /// The rejected label.
        label: String,
        /// Length of the label in bytes.
        len: usize,
        /// Configured record width in bytes.
        width: u32,
    },
    /// The label contains a NUL byte, which is reserved for padding.
    #[error("label contains a NUL byte")]
    ContainsNul,
    /// A stored record is not valid UTF-8.
    #[error("label bytes are not valid UTF-8")]
    NotUtf8,
}

/// Error type produced by indexing and clustering.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum NetclustError {
    /// The node interner was asked for zero capacity.
    #[error("node interner capacity must be at least 1")]
    ZeroInternerCapacity,
    /// The cutoff lies outside the valid range for its weight type.
    #[error("cutoff {cutoff} is not valid for {weight_type} weights")]
    InvalidCutoff {
        /// Weight semantic the cutoff was checked against.
        weight_type: WeightType,
        /// The rejected cutoff.
        cutoff: f32,
    },
    /// Label records must be at least one byte wide.
    #[error("label width must be at least 1 (got {width})")]
    InvalidLabelWidth {
        /// The rejected width.
        width: u32,
    },
    /// An I/O operation failed.
    #[error("i/o failure on `{resource}`: {source}")]
    Io {
        /// File path or stream name the operation targeted.
        resource: Arc<str>,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// An index file ended before the records its header announced.
    #[error("`{resource}` ended early while reading {section}")]
    Truncated {
        /// File path or stream name that was short.
        resource: Arc<str>,
        /// Section being read when the input ran out.
        section: &'static str,
    },
    /// An index file header holds values no writer produces.
    #[error("`{resource}` has a corrupt header: {reason}")]
    CorruptHeader {
        /// File path or stream name with the bad header.
        resource: Arc<str>,
        /// What was wrong.
        reason: &'static str,
    },
    /// An edge-list line did not hold exactly three tokens.
    #[error("line {line}: expected `nodeA nodeB weight` but found {tokens} token(s)")]
    MalformedLine {
        /// One-based line number.
        line: u64,
        /// Number of whitespace-separated tokens found.
        tokens: usize,
    },
    /// The weight token is not a number.
    #[error("line {line}: weight `{raw}` is not a number")]
    UnparsableWeight {
        /// One-based line number.
        line: u64,
        /// The raw token.
        raw: String,
    },
    /// The weight lies outside the valid range of its weight type.
    #[error("{location}: weight {weight} is outside the valid range for {weight_type} weights")]
    InvalidWeight {
        /// Where the weight was found.
        location: Location,
        /// The offending weight.
        weight: f32,
        /// Weight semantic in force.
        weight_type: WeightType,
    },
    /// A node label cannot be stored or decoded.
    #[error("{location}: {source}")]
    InvalidLabel {
        /// Where the label was found.
        location: Location,
        /// Why the label was rejected.
        #[source]
        source: LabelError,
    },
    /// An edge record points past the end of the node table.
    #[error("{location}: node index {index} is out of range for {node_count} node(s)")]
    NodeIndexOutOfRange {
        /// Which edge record was bad.
        location: Location,
        /// The out-of-range node index.
        index: u32,
        /// Number of nodes in the node table.
        node_count: u32,
    },
    /// A counter no longer fits the 32-bit on-disk representation.
    #[error("{what} exceeds the 32-bit limit of the index format")]
    CountOverflow {
        /// Which counter overflowed.
        what: &'static str,
    },
    /// Memory for a table could not be reserved.
    #[error("failed to reserve memory for {requested} {what}")]
    Allocation {
        /// Which table was being sized.
        what: &'static str,
        /// Number of elements requested.
        requested: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`NetclustError`] variants.
    enum NetclustErrorCode for NetclustError {
        /// The node interner was asked for zero capacity.
        ZeroInternerCapacity => ZeroInternerCapacity => "NETCLUST_ZERO_INTERNER_CAPACITY", Configuration,
        /// The cutoff lies outside the valid range for its weight type.
        InvalidCutoff => InvalidCutoff { .. } => "NETCLUST_INVALID_CUTOFF", Configuration,
        /// Label records must be at least one byte wide.
        InvalidLabelWidth => InvalidLabelWidth { .. } => "NETCLUST_INVALID_LABEL_WIDTH", Configuration,
        /// An I/O operation failed.
        Io => Io { .. } => "NETCLUST_IO", Io,
        /// An index file ended early.
        Truncated => Truncated { .. } => "NETCLUST_TRUNCATED", Io,
        /// An index file header is corrupt.
        CorruptHeader => CorruptHeader { .. } => "NETCLUST_CORRUPT_HEADER", Format,
        /// An edge-list line did not hold exactly three tokens.
        MalformedLine => MalformedLine { .. } => "NETCLUST_MALFORMED_LINE", Format,
        /// The weight token is not a number.
        UnparsableWeight => UnparsableWeight { .. } => "NETCLUST_UNPARSABLE_WEIGHT", Format,
        /// The weight lies outside the valid range of its weight type.
        InvalidWeight => InvalidWeight { .. } => "NETCLUST_INVALID_WEIGHT", Format,
        /// A node label cannot be stored or decoded.
        InvalidLabel => InvalidLabel { .. } => "NETCLUST_INVALID_LABEL", Format,
        /// An edge record points past the end of the node table.
        NodeIndexOutOfRange => NodeIndexOutOfRange { .. } => "NETCLUST_NODE_INDEX_OUT_OF_RANGE", Format,
        /// A counter overflowed the on-disk representation.
        CountOverflow => CountOverflow { .. } => "NETCLUST_COUNT_OVERFLOW", Format,
        /// Memory for a table could not be reserved.
        Allocation => Allocation { .. } => "NETCLUST_ALLOCATION", Allocation,
    }
}

impl NetclustError {
    pub(crate) fn io(resource: &Arc<str>) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| Self::Io {
            resource: Arc::clone(resource),
            source,
        }
    }

    /// Map a read failure, turning an unexpected end of file into
    /// [`NetclustError::Truncated`].
    pub(crate) fn read<'a>(
        resource: &'a Arc<str>,
        section: &'static str,
    ) -> impl FnOnce(io::Error) -> Self + 'a {
        move |source| {
            if source.kind() == io::ErrorKind::UnexpectedEof {
                Self::Truncated {
                    resource: Arc::clone(resource),
                    section,
                }
            } else {
                Self::Io {
                    resource: Arc::clone(resource),
                    source,
                }
            }
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, NetclustError>;
