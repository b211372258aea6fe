use crate::support::{exit_with, init_tracing, print_json};
use fidelity_store::{read_archived_urls, select_archived, write_archived_urls};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::json;

pub fn run(listing: String, out: String, seed: Option<u64>, json_output: bool) {
    init_tracing(false);

    let rows = read_archived_urls(&listing)
        .unwrap_or_else(|e| exit_with(format!("failed to read archive listing: {e}")));
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let selected = select_archived(&rows, &mut rng);
    write_archived_urls(&out, &selected)
        .unwrap_or_else(|e| exit_with(format!("failed to write selection: {e}")));

    if json_output {
        print_json(&json!({
            "listing": listing,
            "out": out,
            "seed": seed,
            "snapshots": rows.len(),
            "selected": selected.len(),
        }));
    } else {
        println!("fidelity select-archive {listing}");
        println!("  Snapshots: {}", rows.len());
        println!("  Seeds selected: {} -> {out}", selected.len());
    }
}
