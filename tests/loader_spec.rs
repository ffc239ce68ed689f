use std::sync::Mutex;

use catalog_core::*;
use speculate2::speculate;
use tokio_test::block_on;

/// Collects every reported failure as `(path, message)`.
#[derive(Default)]
struct RecordingSink {
    failures: Mutex<Vec<(String, String)>>,
}

impl RecordingSink {
    fn paths(&self) -> Vec<String> {
        self.failures
            .lock()
            .expect("sink lock poisoned")
            .iter()
            .map(|(path, _)| path.clone())
            .collect()
    }
}

impl ErrorSink for RecordingSink {
    fn report(&self, path: &str, error: &FetchError) {
        self.failures
            .lock()
            .expect("sink lock poisoned")
            .push((path.to_string(), error.to_string()));
    }
}

fn group(key: &str, owner: &str, files: &[&str]) -> Group {
    Group {
        key: key.to_string(),
        category: key.to_string(),
        path: Some(key.to_string()),
        owner: Some(owner.to_string()),
        naming: NamingRule::new(CaseStyle::Sentence).with_extension(".html"),
        files: files.iter().copied().map(FileSpec::from).collect(),
    }
}

/// groupA/card.html (alice, ok), groupA/cardContainer.html (alice, missing),
/// groupB/hero.html (bob, ok).
fn scenario() -> (Manifest, MemorySource) {
    let manifest = Manifest::new(
        vec![
            group("groupA", "alice", &["card.html", "cardContainer.html"]),
            group("groupB", "bob", &["hero.html"]),
        ],
        "alice",
    )
    .expect("Failed to build manifest");

    let source = MemorySource::new()
        .with("groupA/card.html", "<div class=\"card\">Card</div>")
        .with("groupB/hero.html", "<section>Hero banner</section>");

    (manifest, source)
}

speculate! {
    before {
        let (manifest, source) = scenario();
        let sink = RecordingSink::default();
    }

    describe "partial failure" {
        it "drops the failed row and keeps the rest in manifest order" {
            let outcome = block_on(Loader::default().load(&manifest, &source, &sink));

            let ids: Vec<&str> = outcome.catalog.iter().map(|e| e.id.as_str()).collect();
            assert_eq!(ids, vec!["groupA-card.html", "groupB-hero.html"]);
            assert_eq!(outcome.catalog.len(), manifest.len() - 1);
        }

        it "reports the failed path to the sink" {
            let outcome = block_on(Loader::default().load(&manifest, &source, &sink));

            assert_eq!(sink.paths(), vec!["groupA/cardContainer.html"]);
            assert_eq!(outcome.report.failed, vec!["groupA/cardContainer.html"]);
            assert_eq!(outcome.report.loaded, 2);
        }

        it "keeps the failed row as a placeholder when asked to" {
            let outcome = block_on(Loader::new(FailurePolicy::Placeholder).load(&manifest, &source, &sink));

            assert_eq!(outcome.catalog.len(), 3);
            let placeholder = outcome.catalog.get("groupA-cardContainer.html").expect("Placeholder missing");
            assert!(placeholder.content.starts_with("Error loading template: groupA/cardContainer.html - "));
            assert_eq!(placeholder.name, "Card Container");
            assert_eq!(sink.paths().len(), 1);
        }

        it "loads nothing when every fetch fails" {
            let outcome = block_on(Loader::default().load(&manifest, &MemorySource::new(), &sink));

            assert!(outcome.catalog.is_empty());
            assert_eq!(sink.paths().len(), 3);
        }
    }

    describe "entries" {
        it "carry derived name, category, owner and content" {
            let catalog = block_on(load_catalog(&manifest, &source));
            let hero = catalog.get("groupB-hero.html").expect("Hero missing");

            assert_eq!(hero.name, "Hero");
            assert_eq!(hero.category, "groupB");
            assert_eq!(hero.owner, "bob");
            assert_eq!(hero.content, "<section>Hero banner</section>");
        }

        it "skip rows whose content is empty" {
            let source = source.clone().with("groupA/cardContainer.html", "");
            let outcome = block_on(Loader::default().load(&manifest, &source, &sink));

            assert_eq!(outcome.catalog.len(), 2);
            assert_eq!(outcome.report.skipped_empty, vec!["groupA/cardContainer.html"]);
            assert!(sink.paths().is_empty());
        }

        it "have the live-preview script removed" {
            let source = source.clone().with(
                "groupA/cardContainer.html",
                "<div>row</div>\n<script type=\"text/javascript\" src=\"/___vscode_livepreview_injected_script\"></script>\n",
            );
            let catalog = block_on(load_catalog(&manifest, &source));

            assert_eq!(
                catalog.get("groupA-cardContainer.html").expect("Entry missing").content,
                "<div>row</div>\n"
            );
        }
    }

    describe "determinism" {
        it "produces identical catalogs on repeated loads" {
            let first = block_on(load_catalog(&manifest, &source));
            let second = block_on(load_catalog(&manifest, &source));
            assert_eq!(first, second);
        }
    }

    describe "end to end" {
        it "answers owner and search queries over the loaded catalog" {
            let catalog = block_on(load_catalog(&manifest, &source));

            let alice = catalog.filter("alice", "");
            assert_eq!(alice.len(), 1);
            assert_eq!(alice[0].id, "groupA-card.html");

            let bob_hero = catalog.filter("bob", "hero");
            assert_eq!(bob_hero.len(), 1);
            assert_eq!(bob_hero[0].id, "groupB-hero.html");

            assert!(catalog.filter("alice", "hero").is_empty());
        }
    }

    describe "builtin manifest" {
        it "loads every shipped template with its display name" {
            let manifest = Manifest::builtin();
            let mut source = MemorySource::new();
            for row in manifest.rows() {
                source.insert(row.content_path.clone(), format!("<!-- {} -->", row.filename));
            }

            let catalog = block_on(load_catalog(&manifest, &source));
            assert_eq!(catalog.len(), 25);

            let name = |id: &str| catalog.get(id).map(|e| e.name.clone()).expect("Entry missing");
            assert_eq!(name("digital-india-card.html"), "Card Initiatives");
            assert_eq!(name("hiroshima-card.html"), "card master minds");
            assert_eq!(name("hiroshima-heroSectionFullImg.html"), "Full Hero Section with Image");
            assert_eq!(name("root-notes.md"), "Notes");
            assert_eq!(name("utk-hero-section-half-image.html"), "Hero Section Half Image");

            assert_eq!(catalog.filter("utk", "").len(), 6);
            assert_eq!(catalog.filter("sameer", "").len(), 19);
        }
    }
}
