//! Error codes, categories and messages surfaced by the public API.

use std::sync::Arc;

use netclust_core::{
    ClustererBuilder, ErrorCategory, IndexerBuilder, LabelError, Location, NetclustError,
    NetclustErrorCode, WeightType,
    format::{EdgeTable, NodeTable},
};
use rstest::rstest;

#[rstest]
#[case(
    NetclustError::InvalidCutoff { weight_type: WeightType::Distance, cutoff: 2.0 },
    NetclustErrorCode::InvalidCutoff,
    ErrorCategory::Configuration,
)]
#[case(
    NetclustError::InvalidLabelWidth { width: 0 },
    NetclustErrorCode::InvalidLabelWidth,
    ErrorCategory::Configuration,
)]
#[case(
    NetclustError::Truncated { resource: Arc::from("g.eidx"), section: "edge header" },
    NetclustErrorCode::Truncated,
    ErrorCategory::Io,
)]
#[case(
    NetclustError::CorruptHeader { resource: Arc::from("g.nidx"), reason: "label width is zero" },
    NetclustErrorCode::CorruptHeader,
    ErrorCategory::Format,
)]
#[case(
    NetclustError::UnparsableWeight { line: 4, raw: "x".to_owned() },
    NetclustErrorCode::UnparsableWeight,
    ErrorCategory::Format,
)]
#[case(
    NetclustError::InvalidLabel { location: Location::Line(2), source: LabelError::ContainsNul },
    NetclustErrorCode::InvalidLabel,
    ErrorCategory::Format,
)]
#[case(
    NetclustError::NodeIndexOutOfRange { location: Location::EdgeRecord(0), index: 3, node_count: 2 },
    NetclustErrorCode::NodeIndexOutOfRange,
    ErrorCategory::Format,
)]
#[case(
    NetclustError::CountOverflow { what: "edge count" },
    NetclustErrorCode::CountOverflow,
    ErrorCategory::Format,
)]
fn variants_map_to_codes_and_categories(
    #[case] error: NetclustError,
    #[case] code: NetclustErrorCode,
    #[case] category: ErrorCategory,
) {
    assert_eq!(error.code(), code);
    assert_eq!(error.category(), category);
    assert!(error.code().as_str().starts_with("NETCLUST_"));
}

#[rstest]
fn configuration_errors_surface_before_any_io() {
    let err = ClustererBuilder::new()
        .with_weight_type(WeightType::Distance)
        .with_cutoff(1.01)
        .build()
        .expect_err("cutoff is out of range");
    assert_eq!(err.category(), ErrorCategory::Configuration);
    assert_eq!(err.to_string(), "cutoff 1.01 is not valid for distance weights");

    let err = IndexerBuilder::new()
        .with_interner_capacity(0)
        .build()
        .expect_err("capacity is zero");
    assert_eq!(err.code(), NetclustErrorCode::ZeroInternerCapacity);
}

#[rstest]
fn messages_name_their_location() {
    let err = NetclustError::NodeIndexOutOfRange {
        location: Location::EdgeRecord(12),
        index: 40,
        node_count: 39,
    };
    assert_eq!(
        err.to_string(),
        "edge record 12: node index 40 is out of range for 39 node(s)"
    );

    let err = NetclustError::InvalidLabel {
        location: Location::Line(3),
        source: LabelError::TooLong {
            label: "ABCDEFGH".to_owned(),
            len: 8,
            width: 4,
        },
    };
    assert_eq!(
        err.to_string(),
        "line 3: label `ABCDEFGH` is 8 bytes but the label width is 4"
    );
}

#[rstest]
fn missing_index_files_are_io_errors() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = NodeTable::open(&dir.path().join("graph.nidx")).expect_err("file is absent");
    assert_eq!(err.code(), NetclustErrorCode::Io);
    assert!(err.to_string().contains("graph.nidx"));
    let err = EdgeTable::open(&dir.path().join("graph.eidx")).expect_err("file is absent");
    assert_eq!(err.category(), ErrorCategory::Io);
}

#[rstest]
fn truncated_edge_files_report_their_section() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("graph.eidx");
    // Header announces three records, the file holds one and a half.
    let mut bytes = 3_u32.to_le_bytes().to_vec();
    bytes.extend_from_slice(&[0; 18]);
    std::fs::write(&path, bytes).expect("edge file writes");

    let err = EdgeTable::open(&path).expect_err("file is short");
    assert!(matches!(
        err,
        NetclustError::Truncated {
            section: "edge records",
            ..
        }
    ));
}
