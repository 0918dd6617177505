use filmguess::{
    is_similar, Catalog, JsonFileStore, Outcome, ProgressStore, Quiz, QuizConfig, QuizError,
};
use std::fs;

const MOVIES: &str = include_str!("../demos/movies.txt");

#[test]
fn test_matching_scenarios() {
    assert!(is_similar("Matrix", &["Matrix"], 0.8));
    assert!(is_similar("Matric", &["Matrix"], 0.8));
    assert!(!is_similar("Matric", &["Matrix"], 0.9));
    assert!(!is_similar("Mat", &["Matrix"], 0.8));
    assert!(is_similar("Anything", &["Completely Different"], 0.0));
    assert!(!is_similar("Avatar", &["Matrix", "Inception"], 0.8));
    assert!(is_similar("  MATRIX  ", &["matrix"], 0.8));
    assert!(is_similar("", &[""], 1.0));
}

#[test]
fn test_progress_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let progress = dir.path().join("progress.json");
    let config = QuizConfig::default();

    {
        let catalog = Catalog::parse(MOVIES).unwrap();
        let mut quiz = Quiz::new(catalog, JsonFileStore::new(&progress), &config).unwrap();
        assert_eq!(quiz.submit(7, "The Dark Knigt").unwrap(), Outcome::Correct);
        assert_eq!(quiz.submit(5, "amelie").unwrap(), Outcome::Correct);
        assert_eq!(quiz.submit(8, "Interstellar").unwrap(), Outcome::Incorrect);
        assert!(matches!(quiz.submit(99, "Heat"), Err(QuizError::UnknownMovie(99))));
    }

    let catalog = Catalog::parse(MOVIES).unwrap();
    let mut quiz = Quiz::new(catalog, JsonFileStore::new(&progress), &config).unwrap();
    assert_eq!(quiz.found(), &[7, 5]);
    assert_eq!(quiz.submit(7, "whatever").unwrap(), Outcome::AlreadyFound);
    assert_eq!(quiz.progress(), (2, 8));

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&progress).unwrap()).unwrap();
    assert_eq!(raw, serde_json::json!({ "movies": [7, 5] }));
}

#[test]
fn test_catalog_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("movies.txt");
    fs::write(&path, MOVIES).unwrap();

    let catalog = Catalog::load(&path).unwrap();
    assert_eq!(catalog.len(), 8);
    assert_eq!(catalog.get(3).unwrap().titles, vec!["Star Wars", "Star Wars: A New Hope"]);

    let json: Vec<serde_json::Value> = serde_json::from_str(&catalog.to_json().unwrap()).unwrap();
    assert_eq!(json[1]["number"], 2);
    assert_eq!(json[1]["year"], 1994);

    assert!(Catalog::load(dir.path().join("missing.txt")).is_err());
}

#[test]
fn test_config_drives_session() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("quiz.json");
    fs::write(&config_path, r#"{ "threshold": 0.95, "storage_key": "films" }"#).unwrap();
    let config = QuizConfig::load(&config_path).unwrap();

    let store = JsonFileStore::new(dir.path().join("progress.json"));
    let mut quiz = Quiz::new(Catalog::parse(MOVIES).unwrap(), store, &config).unwrap();

    // 1/12 off is fine at 0.8 but not at 0.95
    assert_eq!(quiz.submit(2, "Pulp Ficton").unwrap(), Outcome::Incorrect);
    assert_eq!(quiz.submit(2, "pulp fiction").unwrap(), Outcome::Correct);

    let reopened = JsonFileStore::new(dir.path().join("progress.json"));
    assert_eq!(reopened.load("films").unwrap(), vec![2]);
    assert!(reopened.load("movies").unwrap().is_empty());
}
