//! A schema built once is shared by concurrent builds.

use quizdb::patch::{self, BuildOutcome};
use quizdb::quiz::update_schema;
use quizdb::PatchDocument;

#[test]
fn concurrent_builds_agree() {
    let doc = PatchDocument::from_json_str(
        r#"{"answers": ["B"], "options": ["A", "B"], "question": "Which?", "id": 3}"#,
    )
    .unwrap();
    let expected = patch::build(&doc, update_schema(), 1).unwrap();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| patch::build(&doc, update_schema(), 1).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });

    let BuildOutcome::Assignments(set) = expected else {
        panic!("expected assignments");
    };
    assert_eq!(
        set.set_clause(),
        "question = $1, options = $2, answers = $3"
    );
    assert_eq!(set.next_index(), 4);
}
