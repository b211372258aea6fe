use crate::support::{exit_with, init_tracing, load_config_or_exit, print_json};
use fidelity_core::Side;
use fidelity_store::{pair_indexes, read_extraction_index, write_identity_index};
use serde_json::json;

pub fn run(
    curr_index: String,
    arch_index: String,
    out: String,
    config: Option<String>,
    json_output: bool,
) {
    init_tracing(false);
    let config = load_config_or_exit(config.as_deref());

    let current = read_extraction_index(&curr_index, Side::Current)
        .unwrap_or_else(|e| exit_with(format!("failed to read current index: {e}")));
    let archive = read_extraction_index(&arch_index, Side::Archive)
        .unwrap_or_else(|e| exit_with(format!("failed to read archive index: {e}")));

    let entries = pair_indexes(&current, &archive, config.success_status());
    write_identity_index(&out, &entries)
        .unwrap_or_else(|e| exit_with(format!("failed to write identity index: {e}")));

    if json_output {
        print_json(&json!({
            "currentIndex": curr_index,
            "archiveIndex": arch_index,
            "out": out,
            "currentRows": current.len(),
            "archiveRows": archive.len(),
            "pairs": entries.len(),
        }));
    } else {
        println!("fidelity pair-index");
        println!("  Current rows: {} ({curr_index})", current.len());
        println!("  Archive rows: {} ({arch_index})", archive.len());
        println!("  Pairs written: {} -> {out}", entries.len());
    }
}
