use crate::support::{movie, FakeServer, MediaLayout};
use genre_linker::catalog::Catalog;
use genre_linker::library::{LibraryManager, LibraryOutcome};
use genre_linker::reconcile::ensure_genre_folders;
use genre_linker::server::VirtualLibrary;

#[tokio::test]
async fn existing_libraries_are_updated_or_extended() {
    let layout = MediaLayout::new();
    let config = layout.config();
    let catalog = Catalog::new(vec![movie(
        "1",
        "Heat",
        Some(1995),
        &["Action", "Crime", "Drama"],
    )]);
    ensure_genre_folders(&config.genres, &catalog).unwrap();
    let crime_path = config.genres.container.join("Crime").display().to_string();
    let server = FakeServer::with_libraries(vec![
        VirtualLibrary {
            name: "Crime".to_string(),
            locations: vec![crime_path.clone()],
            collection_type: Some("movies".to_string()),
        },
        VirtualLibrary {
            name: "Drama".to_string(),
            locations: Vec::new(),
            collection_type: Some("movies".to_string()),
        },
    ]);

    let report = LibraryManager::new(&server, &config.genres, config.collection_type())
        .sync(&catalog)
        .await;

    let outcomes: Vec<(&str, &LibraryOutcome)> = report
        .results
        .iter()
        .map(|r| (r.library.as_str(), &r.outcome))
        .collect();
    assert_eq!(
        outcomes,
        vec![
            ("Action", &LibraryOutcome::Created),
            ("Crime", &LibraryOutcome::Updated),
            ("Drama", &LibraryOutcome::PathAdded),
        ]
    );
    assert_eq!(server.calls()[1], format!("update Crime {}", crime_path));
    assert!(report.refreshed);
}

#[tokio::test]
async fn genres_without_folders_are_not_registered() {
    let layout = MediaLayout::new();
    let config = layout.config();
    let catalog = Catalog::new(vec![movie("1", "Heat", Some(1995), &["Crime"])]);
    let server = FakeServer::default();

    let report = LibraryManager::new(&server, &config.genres, "movies")
        .sync(&catalog)
        .await;

    assert_eq!(report.results[0].outcome, LibraryOutcome::MissingFolder);
    assert_eq!(server.calls(), vec!["refresh"]);
}
