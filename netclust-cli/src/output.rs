//! Cluster listings.
//!
//! Only clusters with at least two members are listed, largest first. The id
//! printed for a cluster is its 1-based rank in that order.

use std::io::{self, Write};

use clap::ValueEnum;
use netclust_core::{Cluster, Partition};

/// Where clusters go and how they are laid out.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, ValueEnum)]
pub enum OutputMode {
    /// Standard output, one member per line.
    S1,
    /// Standard output, one cluster per line.
    S2,
    /// Cluster file, one member per line.
    #[default]
    F1,
    /// Cluster file, one cluster per line.
    F2,
}

/// Line layout of a cluster listing.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Layout {
    /// `id<TAB>member` for every member.
    MemberPerLine,
    /// `id<TAB>size<TAB>member member ...` for every cluster.
    ClusterPerLine,
}

impl OutputMode {
    /// Line layout of this mode.
    #[must_use]
    pub const fn layout(self) -> Layout {
        match self {
            Self::S1 | Self::F1 => Layout::MemberPerLine,
            Self::S2 | Self::F2 => Layout::ClusterPerLine,
        }
    }

    /// Whether clusters go to the `.clst` file rather than standard output.
    #[must_use]
    pub const fn writes_file(self) -> bool {
        matches!(self, Self::F1 | Self::F2)
    }
}

/// Counts of what a listing contained.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Listing {
    /// Clusters written.
    pub clusters: usize,
    /// Members written across all clusters.
    pub members: u64,
}

fn write_cluster(
    rank: u32,
    cluster: &Cluster,
    layout: Layout,
    writer: &mut impl Write,
) -> io::Result<()> {
    match layout {
        Layout::MemberPerLine => {
            for member in cluster.members() {
                writeln!(writer, "{rank}\t{member}")?;
            }
        }
        Layout::ClusterPerLine => {
            writeln!(
                writer,
                "{rank}\t{}\t{}",
                cluster.size(),
                cluster.members().join(" ")
            )?;
        }
    }
    Ok(())
}

/// Writes every non-singleton cluster of `partition` in `layout`.
///
/// # Errors
/// Returns any error raised by `writer`.
///
/// # Examples
/// ```
/// use std::io::Cursor;
/// use netclust_cli::output::{Layout, write_clusters};
/// use netclust_core::{ClustererBuilder, format::NodeTable};
///
/// let nodes = NodeTable::read_from(
///     [3_u8, 0, 0, 0, 1, 0, 0, 0, b'a', b'b', b'c'].as_slice(),
///     "nodes",
/// )
/// .expect("table decodes");
/// let outcome = ClustererBuilder::new()
///     .build()
///     .expect("defaults are valid")
///     .cluster(nodes, [Ok(netclust_core::format::IndexedEdge::new(0, 2, 1.0))])
///     .expect("index is consistent");
///
/// let mut buffer = Cursor::new(Vec::new());
/// let listing = write_clusters(outcome.partition(), Layout::ClusterPerLine, &mut buffer)
///     .expect("buffer accepts writes");
/// assert_eq!(listing.clusters, 1);
/// assert_eq!(String::from_utf8(buffer.into_inner()).expect("utf-8"), "1\t2\ta c\n");
/// ```
pub fn write_clusters(
    partition: &Partition,
    layout: Layout,
    mut writer: impl Write,
) -> io::Result<Listing> {
    let mut listing = Listing::default();
    for (rank, cluster) in (1_u32..).zip(partition.non_singletons()) {
        write_cluster(rank, cluster, layout, &mut writer)?;
        listing.clusters += 1;
        listing.members += u64::from(cluster.size());
    }
    writer.flush()?;
    Ok(listing)
}

#[cfg(test)]
mod tests {
    use super::*;

    use netclust_core::{ClustererBuilder, format::IndexedEdge, format::NodeTable};
    use rstest::{fixture, rstest};

    /// Nodes `a..e` with clusters `{a, c}` and `{b, d, e}`. The larger one was
    /// encountered second.
    #[fixture]
    fn partition() -> Partition {
        let mut bytes = vec![5, 0, 0, 0, 1, 0, 0, 0];
        bytes.extend_from_slice(b"abcde");
        let nodes = NodeTable::read_from(bytes.as_slice(), "nodes").expect("table decodes");
        let edges = [
            IndexedEdge::new(0, 2, 1.0),
            IndexedEdge::new(1, 3, 1.0),
            IndexedEdge::new(3, 4, 1.0),
        ];
        ClustererBuilder::new()
            .build()
            .expect("defaults are valid")
            .cluster(nodes, edges.map(Ok))
            .expect("index is consistent")
            .into_partition()
    }

    fn render(partition: &Partition, layout: Layout) -> String {
        let mut buffer = Vec::new();
        write_clusters(partition, layout, &mut buffer).expect("buffer accepts writes");
        String::from_utf8(buffer).expect("listing is text")
    }

    #[rstest]
    fn member_per_line_lists_largest_cluster_first(partition: Partition) {
        assert_eq!(
            render(&partition, Layout::MemberPerLine),
            "1\tb\n1\td\n1\te\n2\ta\n2\tc\n"
        );
    }

    #[rstest]
    fn cluster_per_line_joins_members(partition: Partition) {
        assert_eq!(
            render(&partition, Layout::ClusterPerLine),
            "1\t3\tb d e\n2\t2\ta c\n"
        );
    }

    #[rstest]
    fn singletons_are_not_listed() {
        let nodes = NodeTable::read_from([2_u8, 0, 0, 0, 1, 0, 0, 0, b'x', b'y'].as_slice(), "n")
            .expect("table decodes");
        let partition = ClustererBuilder::new()
            .build()
            .expect("defaults are valid")
            .cluster(nodes, std::iter::empty())
            .expect("index is consistent")
            .into_partition();
        let mut buffer = Vec::new();
        let listing = write_clusters(&partition, Layout::MemberPerLine, &mut buffer)
            .expect("buffer accepts writes");
        assert_eq!(listing, Listing::default());
        assert!(buffer.is_empty());
    }

    #[rstest]
    #[case(OutputMode::S1, Layout::MemberPerLine, false)]
    #[case(OutputMode::S2, Layout::ClusterPerLine, false)]
    #[case(OutputMode::F1, Layout::MemberPerLine, true)]
    #[case(OutputMode::F2, Layout::ClusterPerLine, true)]
    fn modes_select_layout_and_destination(
        #[case] mode: OutputMode,
        #[case] layout: Layout,
        #[case] writes_file: bool,
    ) {
        assert_eq!(mode.layout(), layout);
        assert_eq!(mode.writes_file(), writes_file);
    }
}
