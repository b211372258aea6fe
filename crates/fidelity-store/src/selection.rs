//! Snapshot selection: one archived capture per seed.
//!
//! The archive listing names every snapshot found for every seed:
//!
//! ```text
//! archive_id,url_id,date,archive_url
//! ```
//!
//! Selection keeps exactly one row per `url_id`, drawn uniformly from that
//! seed's snapshots. Seeds come out in order of first appearance, so a seeded
//! RNG gives a reproducible listing.

use crate::error::StoreError;
use crate::table::{read_rows, write_atomically};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Archive listing columns, in file order.
pub const ARCHIVED_URL_HEADER: [&str; 4] = ["archive_id", "url_id", "date", "archive_url"];

/// One archived snapshot of a seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivedUrl {
    pub archive_id: String,
    pub url_id: String,
    pub date: String,
    pub archive_url: String,
}

pub fn read_archived_urls(path: impl AsRef<Path>) -> Result<Vec<ArchivedUrl>, StoreError> {
    read_rows(path.as_ref())
}

pub fn write_archived_urls(
    path: impl AsRef<Path>,
    rows: &[ArchivedUrl],
) -> Result<(), StoreError> {
    write_atomically(path.as_ref(), |writer| {
        writer.write_record(ARCHIVED_URL_HEADER)?;
        for row in rows {
            writer.write_record([
                row.archive_id.as_str(),
                row.url_id.as_str(),
                row.date.as_str(),
                row.archive_url.as_str(),
            ])?;
        }
        Ok(())
    })
}

/// Pick one snapshot per `url_id`.
pub fn select_archived<R: Rng + ?Sized>(rows: &[ArchivedUrl], rng: &mut R) -> Vec<ArchivedUrl> {
    let mut seeds: Vec<&str> = Vec::new();
    let mut snapshots: HashMap<&str, Vec<&ArchivedUrl>> = HashMap::new();
    for row in rows {
        let entry = snapshots.entry(row.url_id.as_str()).or_default();
        if entry.is_empty() {
            seeds.push(row.url_id.as_str());
        }
        entry.push(row);
    }

    let mut selected = Vec::with_capacity(seeds.len());
    for seed in seeds {
        let Some(candidates) = snapshots.get(seed) else {
            continue;
        };
        if let Some(chosen) = candidates.choose(&mut *rng) {
            debug!(url_id = seed, snapshots = candidates.len(), date = %chosen.date, "snapshot selected");
            selected.push((*chosen).clone());
        }
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::testing::TempDir;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn snapshot(url_id: &str, date: &str) -> ArchivedUrl {
        ArchivedUrl {
            archive_id: "9".to_string(),
            url_id: url_id.to_string(),
            date: date.to_string(),
            archive_url: format!("https://web.archive.org/web/{date}/http://x.com/{url_id}"),
        }
    }

    fn listing() -> Vec<ArchivedUrl> {
        vec![
            snapshot("2", "2019"),
            snapshot("1", "2018"),
            snapshot("2", "2020"),
            snapshot("1", "2021"),
            snapshot("2", "2021"),
            snapshot("3", "2022"),
        ]
    }

    #[test]
    fn one_snapshot_per_seed_in_first_seen_order() {
        let rows = listing();
        let selected = select_archived(&rows, &mut StdRng::seed_from_u64(7));

        let seeds: Vec<&str> = selected.iter().map(|r| r.url_id.as_str()).collect();
        assert_eq!(seeds, vec!["2", "1", "3"]);
        for chosen in &selected {
            assert!(rows.contains(chosen));
        }
        assert_eq!(selected[2], snapshot("3", "2022"));
    }

    #[test]
    fn same_seed_same_selection() {
        let rows = listing();
        let first = select_archived(&rows, &mut StdRng::seed_from_u64(42));
        let second = select_archived(&rows, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn every_snapshot_is_reachable() {
        let rows = listing();
        let mut dates: Vec<String> = (0..200)
            .map(|seed| select_archived(&rows, &mut StdRng::seed_from_u64(seed)))
            .map(|selected| selected[0].date.clone())
            .collect();
        dates.sort();
        dates.dedup();
        assert_eq!(dates, vec!["2019", "2020", "2021"]);
    }

    #[test]
    fn empty_listing_selects_nothing() {
        assert!(select_archived(&[], &mut StdRng::seed_from_u64(1)).is_empty());
    }

    #[test]
    fn selection_file_keeps_header_and_one_row_per_seed() {
        let dir = TempDir::new("selection-file");
        let input = dir.write(
            "archived_urls.csv",
            "archive_id,url_id,date,archive_url\n\
             9,1,2018,https://web.archive.org/web/2018/http://x.com/1\n\
             9,1,2021,https://web.archive.org/web/2021/http://x.com/1\n\
             9,2,2020,https://web.archive.org/web/2020/http://x.com/2\n",
        );
        let out = dir.path().join("selected.csv");

        let rows = read_archived_urls(&input).expect("listing parses");
        let selected = select_archived(&rows, &mut StdRng::seed_from_u64(3));
        write_archived_urls(&out, &selected).expect("selection writes");

        let text = std::fs::read_to_string(&out).expect("selection exists");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "\"archive_id\",\"url_id\",\"date\",\"archive_url\"");
        assert_eq!(lines.len(), 3);
        assert_eq!(read_archived_urls(&out).expect("selection parses"), selected);
    }
}
