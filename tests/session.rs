use std::fs;
use std::io::Cursor;

use faculty_registry::{load_seed, AppConfig, Console, Registry, Style};
use tempfile::TempDir;

const SEED: &str = r#"
[[faculty]]
id = 30
name = "Carol Diaz"
qualification = "PhD"
experience = 12

[[faculty]]
id = 20
name = "Bob Stone"
qualification = "MSc"
experience = 5

[[faculty]]
id = 40
name = "Dan Wu"
qualification = "PhD"
experience = 20

[[faculty]]
id = 20
name = "Bob Again"
qualification = "BSc"
experience = 50
"#;

fn seeded_registry(dir: &TempDir) -> Registry {
    fs::write(dir.path().join("faculty.toml"), SEED).unwrap();
    fs::write(
        dir.path().join("registry.toml"),
        "color = false\nseed_file = \"faculty.toml\"\n",
    )
    .unwrap();

    let config = AppConfig::load(&dir.path().join("registry.toml")).unwrap();
    assert!(!config.color);

    let mut registry = Registry::new();
    let summary = registry.seed(load_seed(config.seed_file.as_deref().unwrap()).unwrap());
    assert_eq!(summary.added, 3);
    assert_eq!(summary.duplicates, 1);
    registry
}

fn run(registry: &mut Registry, input: &str) -> String {
    let mut out = Vec::new();
    Console::new(registry, Cursor::new(input), &mut out, Style::plain())
        .run()
        .unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn seeded_session_reports_both_orders() {
    let dir = TempDir::new().unwrap();
    let mut registry = seeded_registry(&dir);

    let output = run(&mut registry, "1\n10\nAlice Ray\nPhD\n8\n2\n3\n4\n");

    assert!(output.contains(
        "Faculty sorted by ID (AVL Tree):\n\
         ID: 10, Name: Alice Ray\n\
         ID: 20, Name: Bob Stone\n\
         ID: 30, Name: Carol Diaz\n\
         ID: 40, Name: Dan Wu\n"
    ));
    assert!(output.contains(
        "Recruitment priority:\n\
         Name: Dan Wu, Experience: 20 years\n\
         Name: Carol Diaz, Experience: 12 years\n\
         Name: Alice Ray, Experience: 8 years\n\
         Name: Bob Stone, Experience: 5 years\n"
    ));
}

#[test]
fn repeated_reports_are_identical() {
    let dir = TempDir::new().unwrap();
    let mut registry = seeded_registry(&dir);

    let output = run(&mut registry, "3\n3\n2\n2\n4\n");
    let rankings: Vec<_> = output.split("Recruitment priority:").skip(1).collect();
    let first = rankings[0].split("\n\n").next().unwrap();
    let second = rankings[1].split("\n\n").next().unwrap();
    assert_eq!(first, second);
    assert_eq!(registry.len(), 3);
}

#[test]
fn ascending_ids_keep_index_shallow() {
    let mut registry = Registry::new();
    let input: String = (1..=5)
        .map(|id| format!("1\n{id}\nFaculty {id}\nPhD\n{id}\n"))
        .chain(std::iter::once("4\n".to_string()))
        .collect();

    run(&mut registry, &input);

    assert_eq!(registry.len(), 5);
    assert!(registry.index().height() <= 3);
    assert!(registry.index().check_invariants().is_ok());
}
