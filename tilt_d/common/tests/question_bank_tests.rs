use std::fs;
use std::path::{Path, PathBuf};

use api::QuestionBank;
use common::question_bank::JsonQuestionBank;

fn get_test_dir(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("tilt_test_question_bank_{}", name));
    cleanup_test_dir(&path);
    let _ = fs::create_dir_all(&path);
    path
}

fn cleanup_test_dir(path: &Path) {
    let _ = fs::remove_dir_all(path);
}

fn seeded_bank(dir: &Path) -> JsonQuestionBank {
    let mut bank = JsonQuestionBank::new(dir.join("questions.json"));
    let animals = bank.add_unit("Animals");
    let capitals = bank.add_unit("Capitals");
    for i in 0..6 {
        bank.add_question(animals, &format!("Animal {}", i), "cat", "car")
            .expect("unit exists");
    }
    for i in 0..4 {
        bank.add_question(capitals, &format!("Capital {}", i), "Paris", "Lyon")
            .expect("unit exists");
    }
    bank
}

#[test]
fn missing_file_opens_empty() {
    let dir = get_test_dir("missing");
    let bank = JsonQuestionBank::open(&dir.join("nope.json")).expect("open should succeed");
    assert!(bank.questions().is_empty());
    assert!(bank.game_questions(true, None, None).unwrap().is_empty());
    cleanup_test_dir(&dir);
}

#[test]
fn save_and_reopen_keeps_content() {
    let dir = get_test_dir("reopen");
    let mut bank = seeded_bank(&dir);
    bank.set_disabled(2, true).unwrap();
    bank.save().expect("save should succeed");

    let reopened = JsonQuestionBank::open(bank.path()).expect("open should succeed");
    assert_eq!(reopened.data, bank.data);
    assert!(reopened.questions().iter().any(|q| q.disabled));
    cleanup_test_dir(&dir);
}

#[test]
fn disabled_questions_are_excluded() {
    let dir = get_test_dir("disabled");
    let mut bank = seeded_bank(&dir);
    bank.set_disabled(1, true).unwrap();
    bank.set_disabled(7, true).unwrap();

    let questions = bank.game_questions(false, None, None).unwrap();

    assert_eq!(questions.len(), 8);
    assert!(questions.iter().all(|q| !q.disabled));
    cleanup_test_dir(&dir);
}

#[test]
fn unit_filter_and_limit_apply() {
    let dir = get_test_dir("filter");
    let bank = seeded_bank(&dir);

    let capitals = bank.game_questions(false, None, Some(&[2])).unwrap();
    assert_eq!(capitals.len(), 4);
    assert!(capitals.iter().all(|q| q.unit_id == 2));

    let limited = bank.game_questions(true, Some(3), Some(&[1, 2])).unwrap();
    assert_eq!(limited.len(), 3);

    let unshuffled = bank.game_questions(false, Some(2), None).unwrap();
    assert_eq!(unshuffled.iter().map(|q| q.id).collect::<Vec<_>>(), vec![1, 2]);
    cleanup_test_dir(&dir);
}

#[test]
fn shuffle_keeps_the_same_questions() {
    let dir = get_test_dir("shuffle");
    let bank = seeded_bank(&dir);

    let mut ids: Vec<u64> = bank
        .game_questions(true, None, None)
        .unwrap()
        .iter()
        .map(|q| q.id)
        .collect();
    ids.sort_unstable();

    assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    cleanup_test_dir(&dir);
}

#[test]
fn unknown_ids_are_errors() {
    let dir = get_test_dir("unknown");
    let mut bank = seeded_bank(&dir);
    assert!(bank.add_question(99, "?", "a", "b").is_err());
    assert!(bank.set_disabled(999, true).is_err());
    cleanup_test_dir(&dir);
}
