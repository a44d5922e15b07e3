// Shared fixtures for untangle-eval integration tests
#![allow(dead_code)]

use indoc::indoc;
use std::fs;
use std::path::{Path, PathBuf};

pub const GRAPH_NAME: &str = "merged_output_wl_1.dot";

/// Two groups, already marked: A (lines 1-2, added) and B (line 3, removed).
pub const MARKED_TWO_GROUPS: &str = indoc! {r#"
    digraph "merged" {
        subgraph "cluster_src/Foo.java" {
            label="src/Foo.java";
            a; b;
        }
        a [label="0:foo();", span="1-2", color=green, community=0, cluster="src/Foo.java"];
        b [label="1:bar();", span="3-3", color=red, community=1, cluster="src/Foo.java"];
        a -> b [style=dotted];
    }
"#};

/// Unmarked graph of one method as produced by the untangling tool.
pub const UNMARKED_METHOD: &str = indoc! {r#"
    digraph "merged" {
        entry [label="Entry", cluster="src/Foo.java"];
        s1 [label="0:int x = a();", span="10-10", community=0, cluster="src/Foo.java"];
        s2 [label="0:x += 1;", span="11-12", community=0, cluster="src/Foo.java"];
        s3 [label="1:log(x);", span="13-13", community=1, cluster="src/Foo.java"];
        s4 [label="1:return x;", span="14-14", cluster="src/Foo.java"];
        exit [label="Exit", cluster="src/Foo.java"];
        entry -> s1 -> s2 -> s3 -> s4 -> exit [type=ctrl];
    }
"#};

/// Diff touching lines of [`UNMARKED_METHOD`] from both sides.
pub const METHOD_DIFF: &str = indoc! {"
    --- a/src/Foo.java
    +++ b/src/Foo.java
    @@ -10,4 +10,5 @@
    -int x = b();
    +int x = a();
     x += 1;
     x += 1;
    +log(x);
     return x;
"};

/// Write `dot` as the graph of change folder `name` below `root`.
pub fn create_change(root: &Path, name: &str, dot: &str) -> PathBuf {
    let dir = root.join(name);
    fs::create_dir_all(&dir).expect("Failed to create change directory");
    let graph = dir.join(GRAPH_NAME);
    fs::write(&graph, dot).expect("Failed to write graph");
    graph
}
