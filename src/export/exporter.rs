use crate::affiliation::{parse_history, resolve, Affiliations};
use crate::config::Config;
use crate::error::ExportError;
use crate::openreview::{Note, ReviewSource};
use crate::output::{CsvSink, ReportRow};
use futures::stream::{self, StreamExt};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct ExportSummary {
    pub submissions: usize,
    pub saved: usize,
    pub skipped: usize,
    pub author_lookups: usize,
    pub author_failures: usize,
    pub path: PathBuf,
    pub duration: Duration,
}

/// Fetches every submission of a venue and writes one row per submission
pub struct Exporter<S> {
    source: S,
    config: Config,
}

impl<S: ReviewSource> Exporter<S> {
    pub fn new(source: S, config: Config) -> Self {
        Self { source, config }
    }

    pub async fn run(&self) -> Result<ExportSummary, ExportError> {
        let start = Instant::now();
        let venue = &self.config.venue;

        info!(
            "Fetching submissions for {} ({})",
            venue.venue_id, venue.invitation
        );
        let submissions = self
            .source
            .list_submissions(venue, self.config.page_size)
            .await?;
        info!("Found {} submissions", submissions.len());

        let mut sink = CsvSink::open(&self.config.output, self.config.batch_size)?;
        let mut skipped = 0usize;
        let mut author_lookups = 0usize;
        let mut author_failures = 0usize;
        let total = submissions.len();

        for (idx, listed) in submissions.iter().enumerate() {
            let forum_id = listed.forum_id();
            let note = match self.source.get_note(forum_id).await {
                Ok(Some(note)) => note,
                Ok(None) => {
                    warn!("Submission {} not found, skipping", forum_id);
                    skipped += 1;
                    continue;
                }
                Err(e) => {
                    warn!("Failed to fetch submission {}: {}", forum_id, e);
                    skipped += 1;
                    continue;
                }
            };

            let lookups = self.resolve_authors(&note).await;
            author_lookups += lookups.len();
            let authors: Vec<Affiliations> = lookups
                .into_iter()
                .map(|lookup| {
                    lookup.unwrap_or_else(|e| {
                        debug!("Author lookup failed for {}: {}", forum_id, e);
                        author_failures += 1;
                        Affiliations::unknown()
                    })
                })
                .collect();

            sink.push(ReportRow::from_note(&note, &authors))?;

            let done = idx + 1;
            if done % self.config.progress_every.max(1) == 0 || done == total {
                info!("Processed {}/{} submissions", done, total);
            }
        }

        let saved = sink.finish()?;
        info!("Saved {} records to {}", saved, self.config.output.display());

        Ok(ExportSummary {
            submissions: total,
            saved,
            skipped,
            author_lookups,
            author_failures,
            path: self.config.output.clone(),
            duration: start.elapsed(),
        })
    }

    /// Resolve every author of `note`, in author-id order
    async fn resolve_authors(&self, note: &Note) -> Vec<Result<Affiliations, ExportError>> {
        stream::iter(note.author_ids())
            .map(|id| self.resolve_author(id))
            .buffered(self.config.concurrency.max(1))
            .collect()
            .await
    }

    async fn resolve_author(&self, id: &str) -> Result<Affiliations, ExportError> {
        let profile = self.source.get_profile(id).await?;
        let history = parse_history(profile.history())?;
        debug!("Profile {} has {} history entries", profile.id, history.len());
        Ok(resolve(&history, self.config.window))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affiliation::YearWindow;
    use crate::config::VenueConfig;
    use crate::error::ClientError;
    use crate::openreview::Profile;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct MemorySource {
        listed: Vec<Note>,
        notes: HashMap<String, Note>,
        profiles: HashMap<String, Value>,
        profile_calls: AtomicUsize,
    }

    impl MemorySource {
        fn with_submission(mut self, note: Value) -> Self {
            let note: Note = serde_json::from_value(note).unwrap();
            self.listed.push(note.clone());
            self.notes.insert(note.forum_id().to_string(), note);
            self
        }

        fn with_listed_only(mut self, id: &str) -> Self {
            self.listed
                .push(serde_json::from_value(json!({"id": id, "forum": id})).unwrap());
            self
        }

        fn with_profile(mut self, id: &str, profile: Value) -> Self {
            self.profiles.insert(id.to_string(), profile);
            self
        }
    }

    #[async_trait]
    impl ReviewSource for MemorySource {
        async fn list_submissions(
            &self,
            _venue: &VenueConfig,
            _page_size: usize,
        ) -> Result<Vec<Note>, ClientError> {
            Ok(self.listed.clone())
        }

        async fn get_note(&self, id: &str) -> Result<Option<Note>, ClientError> {
            Ok(self.notes.get(id).cloned())
        }

        async fn get_profile(&self, id: &str) -> Result<Profile, ClientError> {
            self.profile_calls.fetch_add(1, Ordering::SeqCst);
            let raw = self
                .profiles
                .get(id)
                .ok_or_else(|| ClientError::ProfileNotFound(id.to_string()))?;
            serde_json::from_value(raw.clone()).map_err(|e| ClientError::Parse(e.to_string()))
        }
    }

    fn submission(id: &str, author_ids: &[&str]) -> Value {
        json!({
            "id": id,
            "forum": id,
            "content": {
                "title": {"value": format!("Paper {}", id)},
                "authors": {"value": author_ids.iter().map(|a| format!("Name {}", a)).collect::<Vec<_>>()},
                "authorids": {"value": author_ids},
                "keywords": {"value": ["ml"]},
                "venue": {"value": "NeurIPS 2025 poster"}
            }
        })
    }

    fn config(output: &Path) -> Config {
        Config {
            output: output.to_path_buf(),
            batch_size: 2,
            concurrency: 2,
            ..Config::default()
        }
    }

    fn read_rows(path: &Path) -> Vec<csv::StringRecord> {
        csv::Reader::from_path(path)
            .unwrap()
            .records()
            .map(|r| r.unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_export_writes_resolved_rows() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.csv");

        let source = MemorySource::default()
            .with_submission(submission("p1", &["~Ada1", "~Bob1"]))
            .with_profile(
                "~Ada1",
                json!({"id": "~Ada1", "content": {"history": [
                    {"position": "Intern", "start": 2010, "end": 2015, "institution": {"name": "A, B"}},
                    {"position": "Researcher", "start": 2023, "end": null, "institution": {"name": "C"}}
                ]}}),
            )
            .with_profile(
                "~Bob1",
                json!({"id": "~Bob1", "content": {"history": [
                    {"position": "Professor", "start": 2018, "institution": {"name": "Tech, Inc."}}
                ]}}),
            );

        let summary = Exporter::new(source, config(&output)).run().await.unwrap();
        assert_eq!(summary.submissions, 1);
        assert_eq!(summary.saved, 1);
        assert_eq!(summary.author_failures, 0);

        let rows = read_rows(&output);
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "p1");
        assert_eq!(&rows[0][2], "Name ~Ada1; Name ~Bob1");
        assert_eq!(&rows[0][3], "C; Tech ||  Inc.");
        assert_eq!(&rows[0][4], "Researcher; Professor");
        assert_eq!(&rows[0][6], "poster");
    }

    #[tokio::test]
    async fn test_failed_profile_lookup_becomes_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.csv");

        let source = MemorySource::default()
            .with_submission(submission("p1", &["~Missing1", "~Bad1"]))
            .with_profile("~Bad1", json!({"id": "~Bad1", "content": {"history": "oops"}}));

        let summary = Exporter::new(source, config(&output)).run().await.unwrap();
        assert_eq!(summary.author_lookups, 2);
        assert_eq!(summary.author_failures, 2);

        let rows = read_rows(&output);
        assert_eq!(&rows[0][3], "N/A; N/A");
        assert_eq!(&rows[0][4], "N/A; N/A");
    }

    #[tokio::test]
    async fn test_missing_submission_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.csv");

        let source = MemorySource::default()
            .with_listed_only("gone")
            .with_submission(submission("p2", &[]))
            .with_submission(submission("p3", &[]))
            .with_submission(submission("p4", &[]));

        let summary = Exporter::new(source, config(&output)).run().await.unwrap();
        assert_eq!(summary.submissions, 4);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.saved, 3);

        let ids: Vec<String> = read_rows(&output).iter().map(|r| r[0].to_string()).collect();
        assert_eq!(ids, ["p2", "p3", "p4"]);
    }

    #[tokio::test]
    async fn test_bounded_window_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.csv");

        let source = MemorySource::default()
            .with_submission(submission("p1", &["~Ada1"]))
            .with_profile(
                "~Ada1",
                json!({"id": "~Ada1", "content": {"history": [
                    {"position": "PhD", "start": 2015, "end": 2018, "institution": {"name": "CMU"}},
                    {"position": "Scientist", "start": 2019, "institution": {"name": "Lab"}}
                ]}}),
            );

        let mut cfg = config(&output);
        cfg.window = YearWindow::between(2016, 2017);
        Exporter::new(source, cfg).run().await.unwrap();

        let rows = read_rows(&output);
        assert_eq!(&rows[0][3], "CMU");
        assert_eq!(&rows[0][4], "PhD");
    }

    #[tokio::test]
    async fn test_author_order_preserved_with_concurrency() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.csv");

        let ids = ["~A1", "~B1", "~C1", "~D1"];
        let mut source = MemorySource::default().with_submission(submission("p1", &ids));
        for id in ids {
            source = source.with_profile(
                id,
                json!({"id": id, "content": {"history": [
                    {"position": "Staff", "start": 2024, "institution": {"name": format!("Inst {}", id)}}
                ]}}),
            );
        }

        let mut cfg = config(&output);
        cfg.concurrency = 4;
        let exporter = Exporter::new(source, cfg);
        exporter.run().await.unwrap();
        assert_eq!(exporter.source.profile_calls.load(Ordering::SeqCst), 4);

        let rows = read_rows(&output);
        assert_eq!(&rows[0][3], "Inst ~A1; Inst ~B1; Inst ~C1; Inst ~D1");
    }
}
