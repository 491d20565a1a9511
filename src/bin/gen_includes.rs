use std::io::Write;

use flowvis::{SourceFile, include_graph_gen};

fn main() {
    let files = std::env::args()
        .skip(1)
        .map(SourceFile::from_path)
        .collect::<anyhow::Result<Vec<_>>>()
        .expect("unable to read source files");
    if files.is_empty() {
        eprintln!("usage: gen_includes <source-file>...");
        std::process::exit(1);
    }

    let graph = include_graph_gen(&files);
    let mut file = std::fs::File::create_new("includes.mmd").expect("unable to create file");
    file.write_all(graph.as_bytes()).expect("unable to write");
    file.flush().expect("unable to flush");
}
