use super::*;

fn person(id: &str, name: &str, number: &str) -> Person {
    Person {
        id: PersonId::new(id),
        name: name.to_string(),
        number: number.to_string(),
    }
}

fn names(cache: &PersonCache) -> Vec<&str> {
    cache.iter().map(|p| p.name.as_str()).collect()
}

#[test]
fn replace_all_keeps_first_occurrence_of_each_id() {
    let mut cache = PersonCache::new();
    cache.replace_all(vec![
        person("1", "Ada", "1"),
        person("2", "Alan", "2"),
        person("1", "Ada again", "3"),
    ]);
    assert_eq!(names(&cache), vec!["Ada", "Alan"]);
}

#[test]
fn replace_keeps_position() {
    let mut cache = PersonCache::new();
    cache.replace_all(vec![
        person("1", "Ada", "1"),
        person("2", "Alan", "2"),
        person("3", "Grace", "3"),
    ]);

    assert!(cache.replace(person("2", "Alan", "99")));
    assert_eq!(names(&cache), vec!["Ada", "Alan", "Grace"]);
    assert_eq!(cache.as_slice()[1].number, "99");
    assert_eq!(cache.len(), 3);

    assert!(!cache.replace(person("9", "Nobody", "0")));
    assert_eq!(cache.len(), 3);
}

#[test]
fn remove_leaves_other_entries_in_order() {
    let mut cache = PersonCache::new();
    cache.replace_all(vec![
        person("1", "Ada", "1"),
        person("3", "Ada", "3"),
        person("4", "Grace", "4"),
    ]);

    let removed = cache.remove(&PersonId::new("3")).expect("removed");
    assert_eq!(removed.id.as_str(), "3");
    assert_eq!(
        cache.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
        vec!["1", "4"]
    );
    assert!(cache.remove(&PersonId::new("3")).is_none());
}

#[test]
fn append_with_known_id_does_not_duplicate() {
    let mut cache = PersonCache::new();
    cache.append(person("1", "Ada", "1"));
    cache.append(person("2", "Bob", "2"));
    cache.append(person("1", "Ada", "7"));
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.get(&PersonId::new("1")).map(|p| p.number.as_str()), Some("7"));
}

#[test]
fn find_by_name_is_case_insensitive_and_exact() {
    let mut cache = PersonCache::new();
    cache.replace_all(vec![person("1", "Ada Lovelace", "1")]);
    assert!(cache.find_by_name("ada lovelace").is_some());
    assert!(cache.find_by_name("ADA LOVELACE").is_some());
    assert!(cache.find_by_name("Ada").is_none());
}
