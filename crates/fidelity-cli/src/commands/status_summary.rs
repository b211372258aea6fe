use crate::support::{exit_with, init_tracing, print_json};
use fidelity_store::{summarize_liveness, write_liveness_buckets};
use serde_json::json;
use std::path::Path;

pub fn run(index: String, out_dir: Option<String>, json_output: bool) {
    init_tracing(false);

    let table = summarize_liveness(&index)
        .unwrap_or_else(|e| exit_with(format!("failed to read {index}: {e}")));
    let summary = table.summary();

    let written: Vec<String> = match &out_dir {
        Some(dir) => {
            let stem = Path::new(&index)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("index");
            write_liveness_buckets(&table, dir, stem)
                .unwrap_or_else(|e| exit_with(format!("failed to write buckets: {e}")))
                .into_iter()
                .map(|p| p.display().to_string())
                .collect()
        }
        None => Vec::new(),
    };

    if json_output {
        print_json(&json!({
            "index": index,
            "summary": summary,
            "written": written,
        }));
    } else {
        println!("fidelity status-summary {index}");
        println!("  Seeds: {}", summary.total);
        for bucket in &summary.buckets {
            println!(
                "  {:<14} {:>6}  {:>6.2}%",
                bucket.bucket, bucket.count, bucket.percent
            );
        }
        for path in &written {
            println!("  Wrote {path}");
        }
    }
}
