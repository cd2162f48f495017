//! Integration tests for CLDR plural category resolution.

use std::thread;

use phrasebook::PluralRulesCache;

#[test]
fn english_categories() {
    let mut cache = PluralRulesCache::new();
    assert_eq!(cache.category("en", 0), "other");
    assert_eq!(cache.category("en", 1), "one");
    assert_eq!(cache.category("en", 2), "other");
}

#[test]
fn russian_categories() {
    let mut cache = PluralRulesCache::new();
    assert_eq!(cache.category("ru", 1), "one");
    assert_eq!(cache.category("ru", 2), "few");
    assert_eq!(cache.category("ru", 5), "many");
    assert_eq!(cache.category("ru", 11), "many");
    assert_eq!(cache.category("ru", 22), "few");
}

#[test]
fn arabic_uses_all_categories() {
    let mut cache = PluralRulesCache::new();
    assert_eq!(cache.category("ar", 0), "zero");
    assert_eq!(cache.category("ar", 1), "one");
    assert_eq!(cache.category("ar", 2), "two");
    assert_eq!(cache.category("ar", 3), "few");
    assert_eq!(cache.category("ar", 11), "many");
    assert_eq!(cache.category("ar", 100), "other");
}

#[test]
fn region_subtags_and_underscores() {
    let mut cache = PluralRulesCache::new();
    assert_eq!(cache.category("pt-BR", 1), "one");
    assert_eq!(cache.category("ru_RU", 3), "few");
}

#[test]
fn languages_without_plurals_are_other() {
    let mut cache = PluralRulesCache::new();
    assert_eq!(cache.category("ja", 1), "other");
    assert_eq!(cache.category("zh", 5), "other");
}

#[test]
fn unparseable_locale_uses_root_rules() {
    let mut cache = PluralRulesCache::new();
    assert_eq!(cache.category("not a locale!", 1), "other");
}

#[test]
fn cache_is_keyed_by_locale_code() {
    let mut cache = PluralRulesCache::new();
    assert!(cache.is_empty());
    cache.category("en", 1);
    cache.category("en", 2);
    cache.category("de", 1);
    assert_eq!(cache.len(), 2);
    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn cached_rules_move_across_threads() {
    let mut cache = PluralRulesCache::new();
    assert_eq!(cache.category("pl", 2), "few");
    let moved = thread::spawn(move || {
        let category = cache.category("pl", 5);
        (category, cache.len())
    })
    .join()
    .unwrap();
    assert_eq!(moved, ("many", 1));
}
