//! Edge-list fixtures for indexing and clustering tests.

use std::fmt::Write as _;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// The three-line graph used throughout the test suites: `A-B` and `B-C` at
/// weight 0.9, `D-E` at 0.1. With a similarity cutoff of 0.5 it indexes five
/// nodes and two edges and clusters into `{A, B, C}` plus two singletons.
pub const FIVE_NODE_GRAPH: &str = "A B 0.9\nB C 0.9\nD E 0.1\n";

/// A text edge list written to a file inside its own temporary directory.
///
/// The directory, and every index file written next to the edge list, is
/// removed when the fixture is dropped.
///
/// # Examples
/// ```
/// use netclust_test_support::fixtures::{EdgeListFixture, FIVE_NODE_GRAPH};
///
/// let fixture = EdgeListFixture::new(FIVE_NODE_GRAPH).expect("fixture writes");
/// assert!(fixture.path().ends_with("graph.tsv"));
/// assert_eq!(std::fs::read_to_string(fixture.path()).expect("reads"), FIVE_NODE_GRAPH);
/// ```
#[derive(Debug)]
pub struct EdgeListFixture {
    dir: TempDir,
    path: PathBuf,
}

impl EdgeListFixture {
    /// Writes `contents` to `graph.tsv` in a fresh temporary directory.
    ///
    /// # Errors
    /// Returns any error raised while creating the directory or file.
    pub fn new(contents: &str) -> io::Result<Self> {
        Self::named("graph.tsv", contents)
    }

    /// Writes `contents` to `file_name` in a fresh temporary directory.
    ///
    /// # Errors
    /// Returns any error raised while creating the directory or file.
    pub fn named(file_name: &str, contents: &str) -> io::Result<Self> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(file_name);
        std::fs::write(&path, contents)?;
        Ok(Self { dir, path })
    }

    /// Path of the edge list.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the edge list and its derived files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Sorted names of every file currently in the fixture directory.
    ///
    /// # Errors
    /// Returns any error raised while listing the directory.
    pub fn file_names(&self) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(self.dir.path())? {
            names.push(entry?.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }
}

/// Text for a star: `hub` joined to `leaves` nodes named `{hub}-{i}`, every
/// edge at `weight`.
#[must_use]
pub fn star_graph(hub: &str, leaves: usize, weight: f32) -> String {
    let mut text = String::new();
    for leaf in 0..leaves {
        let _ = writeln!(text, "{hub}\t{hub}-{leaf}\t{weight}");
    }
    text
}

/// Text for a chain `n0 - n1 - ... - n{len - 1}`, every edge at `weight`.
#[must_use]
pub fn chain_graph(len: usize, weight: f32) -> String {
    let mut text = String::new();
    for node in 1..len {
        let _ = writeln!(text, "n{} n{node} {weight}", node - 1);
    }
    text
}

/// Text for `components` disjoint chains of `len` nodes each, labelled
/// `c{component}n{node}`.
#[must_use]
pub fn disjoint_chains(components: usize, len: usize, weight: f32) -> String {
    let mut text = String::new();
    for component in 0..components {
        for node in 1..len {
            let _ = writeln!(
                text,
                "c{component}n{} c{component}n{node} {weight}",
                node - 1
            );
        }
    }
    text
}
