use crate::support::{exit_with, init_tracing, load_config_or_exit, print_json, print_sample_block};
use fidelity_core::BatchDriver;
use fidelity_store::{CsvCaptureStore, ReportWriter, read_identity_index};
use serde_json::json;
use tracing::info;

pub struct Args {
    pub index: String,
    pub curr_requests: String,
    pub arch_requests: String,
    pub out: String,
    pub config: Option<String>,
    pub json: bool,
    pub verbose: bool,
}

pub fn run(args: Args) {
    init_tracing(args.verbose);
    let config = load_config_or_exit(args.config.as_deref());

    let entries = read_identity_index(&args.index, config.success_status())
        .unwrap_or_else(|e| exit_with(format!("failed to read index: {e}")));
    let mut source = CsvCaptureStore::new(&args.curr_requests, &args.arch_requests);
    let mut sink = ReportWriter::create(&args.out)
        .unwrap_or_else(|e| exit_with(format!("failed to open report: {e}")));

    let summary = BatchDriver::new(&config)
        .run_index(&entries, &mut source, &mut sink)
        .unwrap_or_else(|e| exit_with(e));
    let mean = summary.mean_correspondence();
    info!(report = %args.out, compared = summary.compared, "report written");

    if args.json {
        print_json(&json!({
            "generatedAt": chrono::Utc::now().to_rfc3339(),
            "index": args.index,
            "report": args.out,
            "threshold": config.threshold(),
            "entriesRead": summary.entries_read,
            "ineligible": summary.ineligible,
            "compared": summary.compared,
            "failures": summary.failures,
            "meanCorrespondence": mean,
        }));
    } else {
        println!("fidelity compare {}", args.index);
        println!("  Report: {}", args.out);
        println!("  Pairs read: {}", summary.entries_read);
        println!("  Ineligible: {}", summary.ineligible);
        println!("  Compared: {}", summary.compared);
        println!("  Unreadable: {}", summary.failures.len());
        match mean {
            Some(mean) => println!("  Mean correspondence: {mean:.4}"),
            None => println!("  Mean correspondence: n/a"),
        }
        let failures: Vec<String> = summary.failures.iter().map(ToString::to_string).collect();
        print_sample_block("Unreadable pairs", &failures);
    }
}
