//! Test helpers for writing instance files into scratch workspaces.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

/// Four customers whose combined demand fits one vehicle and whose windows
/// stay open long enough for any visiting order.
pub(super) const SMALL_INSTANCE: &str = "\
R1X

VEHICLE
NUMBER     CAPACITY
  3          50

CUSTOMER
CUST NO.  XCOORD.   YCOORD.    DEMAND   READY TIME   DUE DATE   SERVICE TIME

    0      35         35          0          0       1000          0
    1      41         49         10          0        500         10
    2      35         17          7          0        500         10
    3      55         45         13          0        500         10
    4      55         20         19          0        500         10
";

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directory");
    }
    fs::write(path, contents).expect("write file");
}

/// A temporary directory holding `solomon/R1X.txt`.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn instance_path(&self) -> Utf8PathBuf {
        self.root.join("solomon/R1X.txt")
    }

    pub(super) fn with_instance() -> Self {
        let workspace = Self::new();
        write_utf8(&workspace.instance_path(), SMALL_INSTANCE.as_bytes());
        workspace
    }
}
