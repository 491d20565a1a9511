use std::io::Write;

use flowvis::flowchart_gen;

fn main() {
    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        eprintln!("usage: gen_flow <source-file>...");
        std::process::exit(1);
    }

    for (i, path) in paths.iter().enumerate() {
        let source = std::fs::read_to_string(path).expect("unable to read source file");
        let graph = flowchart_gen(&source);
        let mut file =
            std::fs::File::create_new(format!("flow_{}.mmd", i)).expect("unable to create file");
        file.write_all(graph.as_bytes()).expect("unable to write");
        file.flush().expect("unable to flush");
    }
}
