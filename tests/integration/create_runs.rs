use crate::support::{movie, series, symlink_set, FakeServer, MediaLayout};
use genre_linker::config::PathMapping;
use genre_linker::pipeline::run_create;
use genre_linker::reconcile::LinkOutcome;
use std::path::PathBuf;

fn heat_and_alien() -> FakeServer {
    FakeServer::with_items(vec![
        movie("1", "Heat", Some(1995), &["Crime", "Drama"]),
        movie("2", "Alien", Some(1979), &["Horror", "Science Fiction"]),
    ])
}

#[tokio::test]
async fn two_runs_produce_the_same_symlinks() {
    let layout = MediaLayout::new();
    layout.add_movie_folder("Heat (1995)");
    layout.add_movie_folder("Alien (1979)");
    let config = layout.config();
    let server = heat_and_alien();

    run_create(&config, &server, false).await.unwrap();
    let first = symlink_set(&layout.genres());
    let summary = run_create(&config, &server, false).await.unwrap();
    let second = symlink_set(&layout.genres());

    assert_eq!(first.len(), 4);
    assert_eq!(first, second);
    assert_eq!(summary.clear.removed, 4);
    assert!(first.contains(&(
        PathBuf::from("Crime/Heat (1995)"),
        PathBuf::from("../../Movies/Heat (1995)")
    )));
}

#[tokio::test]
async fn links_resolve_to_the_title_folder() {
    let layout = MediaLayout::new();
    layout.add_movie_folder("Alien (1979)");
    std::fs::write(layout.movies().join("Alien (1979)").join("alien.mkv"), b"x").unwrap();

    run_create(&layout.config(), &heat_and_alien(), false)
        .await
        .unwrap();

    let through_link = layout
        .genres()
        .join("Horror")
        .join("Alien (1979)")
        .join("alien.mkv");
    assert_eq!(std::fs::read(through_link).unwrap(), b"x");
}

#[tokio::test]
async fn unmatched_folders_get_no_links() {
    let layout = MediaLayout::new();
    layout.add_movie_folder("Heat (1995)");
    layout.add_movie_folder("Completely Unrelated Footage");

    let summary = run_create(&layout.config(), &heat_and_alien(), false)
        .await
        .unwrap();

    let movies = &summary.media[0];
    let unmatched: Vec<&str> = movies.unmatched().map(|e| e.name.as_str()).collect();
    assert_eq!(unmatched, vec!["Completely Unrelated Footage"]);
    assert!(symlink_set(&layout.genres())
        .iter()
        .all(|(path, _)| !path.ends_with("Completely Unrelated Footage")));
}

#[tokio::test]
async fn folders_follow_catalog_genres_and_are_never_removed() {
    let layout = MediaLayout::new();
    layout.add_movie_folder("Heat (1995)");
    std::fs::create_dir_all(layout.genres().join("Western")).unwrap();

    let summary = run_create(&layout.config(), &heat_and_alien(), false)
        .await
        .unwrap();

    let mut folders: Vec<String> = std::fs::read_dir(layout.genres())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    folders.sort();
    assert_eq!(
        folders,
        vec!["Crime", "Drama", "Horror", "Science Fiction", "Western"]
    );
    assert_eq!(summary.folders.created.len(), 4);
}

#[tokio::test]
async fn regular_file_in_genre_folder_is_left_alone() {
    let layout = MediaLayout::new();
    layout.add_movie_folder("Heat (1995)");
    let crime = layout.genres().join("Crime");
    std::fs::create_dir_all(&crime).unwrap();
    std::fs::write(crime.join("Heat (1995)"), b"notes").unwrap();

    let summary = run_create(&layout.config(), &heat_and_alien(), false)
        .await
        .unwrap();

    assert_eq!(std::fs::read(crime.join("Heat (1995)")).unwrap(), b"notes");
    let heat = &summary.media[0].entries[0];
    let crime_link = heat.links.iter().find(|l| l.genre == "Crime").unwrap();
    assert_eq!(crime_link.outcome, LinkOutcome::ConflictSkipped);
    let drama_link = heat.links.iter().find(|l| l.genre == "Drama").unwrap();
    assert_eq!(drama_link.outcome, LinkOutcome::Linked);
}

#[tokio::test]
async fn year_breaks_ties_between_sequels() {
    let layout = MediaLayout::new();
    layout.add_movie_folder("Inception (2010)");
    let server = FakeServer::with_items(vec![
        movie("1", "Inception", Some(2010), &["Action"]),
        movie("2", "Inception 2", Some(2012), &["Comedy"]),
    ]);

    let summary = run_create(&layout.config(), &server, false).await.unwrap();

    let matched = summary.media[0].entries[0].matched.as_ref().unwrap();
    assert_eq!(matched.name, "Inception");
    assert_eq!(matched.score, 120.0);
    assert!(layout.genres().join("Action").join("Inception (2010)").symlink_metadata().is_ok());
    assert!(symlink_set(&layout.genres().join("Comedy")).is_empty());
}

#[tokio::test]
async fn container_paths_shape_link_targets_and_libraries() {
    let layout = MediaLayout::new();
    layout.add_movie_folder("Heat (1995)");
    let mut config = layout.config();
    config.movies = PathMapping::new(layout.movies(), "/media/library/Movies");
    config.genres = PathMapping::new(layout.genres(), "/media/Genres");
    let server = FakeServer::with_items(vec![movie("1", "Heat", Some(1995), &["Crime"])]);

    let summary = run_create(&config, &server, true).await.unwrap();

    assert_eq!(
        symlink_set(&layout.genres()),
        vec![(
            PathBuf::from("Crime/Heat (1995)"),
            PathBuf::from("../../library/Movies/Heat (1995)")
        )]
    );
    assert_eq!(
        server.calls(),
        vec![
            "fetch Movie",
            "create Crime movies /media/Genres/Crime",
            "refresh",
        ]
    );
    assert_eq!(summary.libraries.unwrap().created(), 1);
}

#[tokio::test]
async fn shows_are_linked_when_enabled() {
    let layout = MediaLayout::new();
    layout.add_movie_folder("Heat (1995)");
    layout.add_show_folder("The Wire");
    let server = FakeServer::with_items(vec![
        movie("1", "Heat", Some(1995), &["Crime"]),
        series("2", "The Wire", Some(2002), &["Crime", "Drama"]),
    ]);

    let summary = run_create(&layout.config_with_shows(), &server, true)
        .await
        .unwrap();

    assert_eq!(summary.media.len(), 2);
    assert_eq!(summary.linked_items(), 2);
    assert_eq!(
        symlink_set(&layout.genres().join("Drama")),
        vec![(PathBuf::from("The Wire"), PathBuf::from("../../Shows/The Wire"))]
    );
    assert!(server
        .calls()
        .iter()
        .any(|c| c.starts_with("create Crime mixed ")));
}

#[tokio::test]
async fn genre_cap_limits_links_per_title() {
    let layout = MediaLayout::new();
    layout.add_movie_folder("Heat (1995)");
    let mut config = layout.config();
    config.matching.max_genres = 1;
    let server = FakeServer::with_items(vec![movie("1", "Heat", Some(1995), &["Crime", "Drama"])]);

    run_create(&config, &server, false).await.unwrap();

    assert_eq!(
        symlink_set(&layout.genres()),
        vec![(
            PathBuf::from("Crime/Heat (1995)"),
            PathBuf::from("../../Movies/Heat (1995)")
        )]
    );
}

#[tokio::test]
async fn dot_genres_are_linked_inside_the_genre_root() {
    let layout = MediaLayout::new();
    layout.add_movie_folder("Heat");
    let server = FakeServer::with_items(vec![movie("1", "Heat", None, &["..", "."])]);

    run_create(&layout.config(), &server, true).await.unwrap();

    assert!(layout.dir.path().join("Heat").symlink_metadata().is_err());
    assert!(layout.genres().join("Heat").symlink_metadata().is_err());
    assert_eq!(
        symlink_set(&layout.genres()),
        vec![
            (PathBuf::from("_/Heat"), PathBuf::from("../../Movies/Heat")),
            (PathBuf::from("__/Heat"), PathBuf::from("../../Movies/Heat")),
        ]
    );
    assert!(server.calls().iter().all(|c| !c.contains("/..")));
}
