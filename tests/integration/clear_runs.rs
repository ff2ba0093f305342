use crate::support::{movie, symlink_set, FakeServer, MediaLayout};
use genre_linker::cli::{CliContext, Commands};
use genre_linker::config::PathMapping;
use genre_linker::pipeline::{run_clear, run_create};
use std::os::unix::fs::symlink;

#[test]
fn clear_removes_only_symlinks() {
    let layout = MediaLayout::new();
    let action = layout.genres().join("Action");
    std::fs::create_dir_all(action.join("Extras")).unwrap();
    std::fs::write(action.join("README.txt"), b"keep").unwrap();
    symlink("../../Movies/Heat (1995)", action.join("Heat (1995)")).unwrap();

    let report = run_clear(&PathMapping::identity(layout.genres()));

    assert_eq!(report.removed, 1);
    assert!(report.failures.is_empty());
    assert!(action.join("Extras").is_dir());
    assert_eq!(std::fs::read(action.join("README.txt")).unwrap(), b"keep");
    assert!(action.join("Heat (1995)").symlink_metadata().is_err());
}

#[test]
fn clear_does_not_follow_directory_links() {
    let layout = MediaLayout::new();
    layout.add_movie_folder("Heat (1995)");
    let inner = layout.movies().join("Heat (1995)").join("poster-link");
    symlink("/nowhere", &inner).unwrap();
    let action = layout.genres().join("Action");
    std::fs::create_dir_all(&action).unwrap();
    symlink(layout.movies().join("Heat (1995)"), action.join("Heat (1995)")).unwrap();

    let report = run_clear(&PathMapping::identity(layout.genres()));

    assert_eq!(report.found, 1);
    assert!(inner.symlink_metadata().is_ok());
}

#[tokio::test]
async fn clear_after_create_leaves_empty_genre_folders() {
    let layout = MediaLayout::new();
    layout.add_movie_folder("Heat (1995)");
    let server = FakeServer::with_items(vec![movie("1", "Heat", Some(1995), &["Crime", "Drama"])]);
    run_create(&layout.config(), &server, false).await.unwrap();
    assert_eq!(symlink_set(&layout.genres()).len(), 2);

    let report = run_clear(&layout.config().genres);

    assert_eq!(report.removed, 2);
    assert_eq!(report.per_folder.get("Crime"), Some(&1));
    assert!(symlink_set(&layout.genres()).is_empty());
    assert!(layout.genres().join("Crime").is_dir());
    assert!(layout.movies().join("Heat (1995)").is_dir());
}

#[test]
fn clear_command_reads_genre_root_from_env_file() {
    let layout = MediaLayout::new();
    let drama = layout.genres().join("Drama");
    std::fs::create_dir_all(&drama).unwrap();
    symlink("../../Movies/Heat (1995)", drama.join("Heat (1995)")).unwrap();
    let env_file = layout.dir.path().join(".env");
    std::fs::write(
        &env_file,
        format!(
            "SERVER_URL=http://localhost:8096\nGENRES_DIR={}\n",
            layout.genres().display()
        ),
    )
    .unwrap();

    let context = CliContext::new(Some(env_file)).unwrap();
    let output = context
        .execute(&Commands::Clear {
            yes: true,
            format: "text".to_string(),
        })
        .unwrap();

    assert!(output.contains("Removed 1 of 1 symlinks"));
    assert!(symlink_set(&layout.genres()).is_empty());
}
