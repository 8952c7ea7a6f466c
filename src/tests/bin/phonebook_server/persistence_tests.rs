use super::*;

fn person(id: &str, name: &str, number: &str) -> Person {
    Person {
        id: PersonId(id.to_string()),
        name: name.to_string(),
        number: number.to_string(),
    }
}

#[test]
fn missing_file_loads_as_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let persons = load_persons(&dir.path().join(PERSONS_FILE)).expect("load");
    assert!(persons.is_empty());
}

#[test]
fn persisted_persons_reload_in_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(PERSONS_FILE);
    let persons = vec![
        person("a1", "Ada", "040-1"),
        person("b2", "Grace", "040-2"),
    ];

    persist_persons(&path, &persons).expect("persist");
    let loaded = load_persons(&path).expect("load");
    assert_eq!(loaded, persons);

    persist_persons(&path, &persons[1..]).expect("overwrite");
    let loaded = load_persons(&path).expect("reload");
    assert_eq!(loaded, vec![person("b2", "Grace", "040-2")]);
}

#[test]
fn corrupt_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(PERSONS_FILE);
    std::fs::write(&path, b"{not json").expect("write");
    let err = load_persons(&path).expect_err("corrupt file must fail");
    assert!(format!("{:#}", err).contains("parse"));
}

#[test]
fn generated_ids_are_hex_and_unused() {
    let taken = vec![person("00000000", "Ada", "1")];
    for _ in 0..32 {
        let id = generate_id(&taken).expect("id");
        assert_eq!(id.0.len(), 8);
        assert!(id.0.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(id.0, "00000000");
    }
}
