//! Bulk writes of ads through any [`Store`].

use memstore::{Store, StoreError};
use serde::Serialize;
use tracing::{debug, info};

use crate::ad::Ad;

/// An ad the store refused to write.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub id: String,
    pub reason: String,
}

/// Outcome of an [`ingest`] run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Number of ads in the batch.
    pub processed: usize,
    /// Distinct IDs written, in order of first write.
    pub accepted: Vec<String>,
    /// IDs whose write replaced a value already in the store, once per
    /// replacement. Includes repeats within the batch.
    pub replaced: Vec<String>,
    /// Ads refused, in input order.
    pub rejected: Vec<Rejection>,
}

impl IngestReport {
    /// Total number of ads processed.
    pub fn total(&self) -> usize {
        self.processed
    }

    /// Returns `true` if every ad was written.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Write each ad under its ID, assigning IDs to ads that have none.
///
/// Rejections are collected rather than returned as errors so one bad ad
/// does not stop the rest of the batch. When several ads share an ID the
/// last accepted one wins; every overwrite is listed in
/// [`IngestReport::replaced`].
pub fn ingest<S>(store: &S, ads: Vec<Ad>) -> IngestReport
where
    S: Store<String, Ad> + ?Sized,
{
    let mut report = IngestReport::default();

    for mut ad in ads {
        report.processed += 1;
        let id = ad.ensure_id().to_string();
        let existed = store.contains(&id);
        match store.store(id.clone(), ad) {
            Ok(_) => {
                debug!(%id, replaced = existed, "ad stored");
                if existed {
                    report.replaced.push(id.clone());
                }
                if !report.accepted.contains(&id) {
                    report.accepted.push(id);
                }
            }
            Err(StoreError::Validation { reason }) => {
                debug!(%id, %reason, "ad rejected");
                report.rejected.push(Rejection { id, reason });
            }
        }
    }

    info!(
        accepted = report.accepted.len(),
        replaced = report.replaced.len(),
        rejected = report.rejected.len(),
        "ingest complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::AdPolicy;
    use memstore::InMemoryStore;

    fn ad(id: &str, description: &str) -> Ad {
        Ad::new("title", description, 10).with_id(id)
    }

    #[test]
    fn mixed_batch_reports_each_ad() {
        let store = AdPolicy::default().build_store();
        let report = ingest(
            &store,
            vec![
                ad("a", "short"),
                ad("b", "a description well over the limit"),
                ad("c", "also short"),
            ],
        );

        assert_eq!(report.accepted, vec!["a", "c"]);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].id, "b");
        assert!(report.rejected[0].reason.contains("20 characters"));
        assert_eq!(report.total(), 3);
        assert!(!report.is_clean());

        assert!(store.contains(&"a".into()));
        assert!(!store.contains(&"b".into()));
    }

    #[test]
    fn duplicate_ids_are_reported_as_replacements() {
        let store = AdPolicy::default().build_store();
        let report = ingest(
            &store,
            vec![
                ad("a", "first"),
                ad("b", "only"),
                ad("a", "second"),
                ad("a", "a description well over the limit"),
            ],
        );

        assert_eq!(report.total(), 4);
        assert_eq!(report.accepted, vec!["a", "b"]);
        assert_eq!(report.replaced, vec!["a"]);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(store.find(&"a".into()).unwrap().description, "second");
        assert_eq!(store.inner().len(), 2);
    }

    #[test]
    fn overwriting_existing_entries_is_reported() {
        let store = InMemoryStore::<String, Ad>::new();
        store.store("a".into(), ad("a", "old")).unwrap();

        let report = ingest(&store, vec![ad("a", "new")]);
        assert_eq!(report.accepted, vec!["a"]);
        assert_eq!(report.replaced, vec!["a"]);
        assert!(report.is_clean());
    }

    #[test]
    fn ads_without_id_get_one() {
        let store = InMemoryStore::<String, Ad>::new();
        let report = ingest(&store, vec![Ad::default()]);

        assert!(report.is_clean());
        let id = &report.accepted[0];
        let stored = store.find(id).expect("should exist");
        assert_eq!(&stored.id, id);
    }

    #[test]
    fn works_through_trait_objects() {
        let store: Box<dyn Store<String, Ad>> = Box::new(AdPolicy::default().build_store());
        let report = ingest(&*store, vec![ad("x", "fine")]);
        assert_eq!(report.accepted, vec!["x"]);
    }

    #[test]
    fn report_serializes_to_json() {
        let report = IngestReport {
            processed: 2,
            accepted: vec!["a".into()],
            replaced: Vec::new(),
            rejected: vec![Rejection {
                id: "b".into(),
                reason: "too long".into(),
            }],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["accepted"][0], "a");
        assert_eq!(json["rejected"][0]["reason"], "too long");
    }
}
