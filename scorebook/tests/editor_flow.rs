//! End-to-end coverage of the annotation state machine: keystrokes in,
//! committed notation out, with write-through persistence observed from the
//! outside through a memory-backed persister.

use std::cell::RefCell;
use std::rc::Rc;

use scorebook::{
    encode, CodecError, Cursor, DetailStage, Editor, EditorError, EventStore, InputEvent, Mode,
    Outcome, Persister,
};

const FIXTURE: &str = "\
id,ANA201904040
version,2
info,visteam,TEX
play,1,0,aaa001,??,,
play,1,0,bbb002,??,,
play,1,0,ccc003,??,,
id,ANA201904050
version,2
play,1,0,ddd004,??,,
";

#[derive(Default)]
struct MemState {
    saves: usize,
    last: String,
    fail_next: bool,
}

#[derive(Default, Clone)]
struct MemPersister {
    state: Rc<RefCell<MemState>>,
}

impl MemPersister {
    fn saves(&self) -> usize {
        self.state.borrow().saves
    }

    fn last(&self) -> String {
        self.state.borrow().last.clone()
    }

    fn fail_next(&self) {
        self.state.borrow_mut().fail_next = true;
    }
}

impl Persister for MemPersister {
    fn persist(&mut self, store: &EventStore) -> Result<(), CodecError> {
        let mut state = self.state.borrow_mut();
        if state.fail_next {
            state.fail_next = false;
            return Err(CodecError::Write {
                path: "out".into(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
            });
        }
        state.saves += 1;
        state.last = encode(store);
        Ok(())
    }
}

fn editor() -> (Editor<MemPersister>, MemPersister) {
    editor_with(FIXTURE)
}

fn editor_with(text: &str) -> (Editor<MemPersister>, MemPersister) {
    let store = scorebook::decode(text, "test.EVN").unwrap();
    let persister = MemPersister::default();
    (Editor::new(store, persister.clone()), persister)
}

fn feed(editor: &mut Editor<MemPersister>, events: &[InputEvent]) -> Outcome {
    let mut outcome = Outcome::Continue;
    for &event in events {
        outcome = editor.handle(event).unwrap();
    }
    outcome
}

#[test]
fn four_balls_auto_commit_a_walk() {
    let (mut editor, persister) = editor();
    let outcome = feed(
        &mut editor,
        &[
            InputEvent::PitchKey('b'),
            InputEvent::PitchKey('b'),
            InputEvent::PitchKey('b'),
            InputEvent::PitchKey('b'),
        ],
    );
    assert_eq!(outcome, Outcome::Committed);
    assert_eq!(editor.mode(), Mode::Pitch);
    assert_eq!(editor.cursor(), Cursor { game: 0, play: 1 });

    let play = editor.store().game(0).unwrap().play(0).unwrap();
    assert_eq!(play.pitches, "BBBB");
    assert_eq!(play.descriptor, "W");
    assert_eq!(persister.saves(), 1);
    assert!(persister.last().contains("play,1,0,aaa001,30,BBBB,W\n"));
}

#[test]
fn three_strikes_auto_commit_a_strikeout() {
    let (mut editor, _persister) = editor();
    let outcome = feed(
        &mut editor,
        &[
            InputEvent::PitchKey('c'),
            InputEvent::PitchKey('c'),
            InputEvent::PitchKey('s'),
        ],
    );
    assert_eq!(outcome, Outcome::Committed);

    let play = editor.store().game(0).unwrap().play(0).unwrap();
    assert_eq!(play.pitches, "CCS");
    assert_eq!(play.descriptor, "K");
}

#[test]
fn a_full_count_stays_pending_and_untouched_on_disk() {
    let (mut editor, persister) = editor();
    let outcome = feed(
        &mut editor,
        &[
            InputEvent::PitchKey('b'),
            InputEvent::PitchKey('s'),
            InputEvent::PitchKey('f'),
            InputEvent::PitchKey('b'),
        ],
    );
    assert_eq!(outcome, Outcome::Continue);

    let snapshot = editor.snapshot();
    assert_eq!(snapshot.pitches, "BSFB");
    assert_eq!(snapshot.count.balls, 2);
    assert_eq!(snapshot.count.strikes, 2);

    // nothing committed, nothing stored, nothing saved
    let play = editor.store().game(0).unwrap().play(0).unwrap();
    assert_eq!(play.pitches, "");
    assert_eq!(persister.saves(), 0);
}

#[test]
fn a_hit_batter_commits_hit_by_pitch_immediately() {
    let (mut editor, _persister) = editor();
    let outcome = feed(&mut editor, &[InputEvent::PitchKey('h')]);
    assert_eq!(outcome, Outcome::Committed);

    let play = editor.store().game(0).unwrap().play(0).unwrap();
    assert_eq!(play.pitches, "H");
    assert_eq!(play.descriptor, "HP");
}

#[test]
fn single_grounder_to_short_auto_commits_on_the_fielder() {
    let (mut editor, _persister) = editor();

    feed(&mut editor, &[InputEvent::Tab]);
    assert_eq!(editor.mode(), Mode::Play);

    feed(&mut editor, &[InputEvent::PlayResultKey('1')]);
    assert_eq!(editor.mode(), Mode::Detail(DetailStage::HitOrOutType));

    feed(&mut editor, &[InputEvent::DetailKey('g')]);
    assert_eq!(editor.mode(), Mode::Detail(DetailStage::Fielders));

    let outcome = feed(&mut editor, &[InputEvent::DetailKey('6')]);
    assert_eq!(outcome, Outcome::Committed);
    assert_eq!(editor.mode(), Mode::Pitch);
    assert_eq!(editor.cursor(), Cursor { game: 0, play: 1 });
    assert_eq!(
        editor.store().game(0).unwrap().play(0).unwrap().descriptor,
        "S6/G6"
    );
}

#[test]
fn out_chains_wait_for_an_explicit_commit() {
    let (mut editor, _persister) = editor();
    let outcome = feed(
        &mut editor,
        &[
            InputEvent::Tab,
            InputEvent::PlayResultKey('o'),
            InputEvent::DetailKey('g'),
            InputEvent::DetailKey('6'),
            InputEvent::DetailKey('4'),
            InputEvent::DetailKey('3'),
        ],
    );
    // however many fielders arrive, the machine keeps waiting
    assert_eq!(outcome, Outcome::Continue);
    assert_eq!(editor.mode(), Mode::Detail(DetailStage::Fielders));
    assert_eq!(editor.snapshot().descriptor, "643/G");

    let outcome = feed(&mut editor, &[InputEvent::Commit]);
    assert_eq!(outcome, Outcome::Committed);
    assert_eq!(
        editor.store().game(0).unwrap().play(0).unwrap().descriptor,
        "643/G"
    );
}

#[test]
fn double_play_modifier_rides_along() {
    let (mut editor, _persister) = editor();
    let outcome = feed(
        &mut editor,
        &[
            InputEvent::Tab,
            InputEvent::PlayResultKey('w'),
            InputEvent::DetailKey('g'),
            InputEvent::DetailKey('6'),
            InputEvent::DetailKey('4'),
            InputEvent::DetailKey('3'),
            InputEvent::Commit,
        ],
    );
    assert_eq!(outcome, Outcome::Committed);
    assert_eq!(
        editor.store().game(0).unwrap().play(0).unwrap().descriptor,
        "643/G/GDP"
    );
}

#[test]
fn bare_results_commit_straight_from_play_mode() {
    let (mut editor, _persister) = editor();
    let outcome = feed(
        &mut editor,
        &[
            InputEvent::PitchKey('b'),
            InputEvent::PitchKey('b'),
            InputEvent::Tab,
            InputEvent::PlayResultKey('l'),
        ],
    );
    assert_eq!(outcome, Outcome::Committed);

    let play = editor.store().game(0).unwrap().play(0).unwrap();
    assert_eq!(play.pitches, "BB");
    assert_eq!(play.descriptor, "W");
}

#[test]
fn undo_restores_the_exact_pre_commit_state() {
    let (mut editor, persister) = editor();
    feed(
        &mut editor,
        &[
            InputEvent::PitchKey('b'),
            InputEvent::PitchKey('b'),
            InputEvent::PitchKey('b'),
            InputEvent::PitchKey('b'),
        ],
    );
    assert!(editor.snapshot().undo_available);
    let saves_before = persister.saves();

    editor.handle(InputEvent::Undo).unwrap();
    assert_eq!(editor.cursor(), Cursor { game: 0, play: 0 });
    assert_eq!(editor.mode(), Mode::Pitch);
    assert!(!editor.snapshot().undo_available);

    let game = editor.store().game(0).unwrap();
    let play = game.play(0).unwrap();
    assert_eq!(play.pitches, "");
    assert_eq!(play.descriptor, "");
    // neighbors untouched
    assert_eq!(game.play(1).unwrap().pitches, "");
    assert_eq!(game.play(2).unwrap().pitches, "");
    // the restore wrote through
    assert_eq!(persister.saves(), saves_before + 1);

    // empty stack undo is a quiet no-op
    assert_eq!(editor.handle(InputEvent::Undo).unwrap(), Outcome::Continue);
}

#[test]
fn navigation_discards_a_pending_detail_without_committing() {
    let (mut editor, persister) = editor();
    feed(
        &mut editor,
        &[
            InputEvent::Tab,
            InputEvent::PlayResultKey('o'),
            InputEvent::DetailKey('g'),
            InputEvent::DetailKey('6'),
        ],
    );
    assert_eq!(editor.mode(), Mode::Detail(DetailStage::Fielders));

    editor.handle(InputEvent::NavNextPlay).unwrap();
    assert_eq!(editor.cursor(), Cursor { game: 0, play: 1 });
    assert_eq!(editor.mode(), Mode::Pitch);

    let play = editor.store().game(0).unwrap().play(0).unwrap();
    assert_eq!(play.pitches, "");
    assert_eq!(play.descriptor, "");
    assert_eq!(persister.saves(), 0);
}

#[test]
fn tab_out_of_detail_keeps_the_pitch_sequence() {
    let (mut editor, _persister) = editor();
    feed(
        &mut editor,
        &[
            InputEvent::PitchKey('b'),
            InputEvent::Tab,
            InputEvent::PlayResultKey('o'),
            InputEvent::DetailKey('g'),
            InputEvent::Tab,
        ],
    );
    assert_eq!(editor.mode(), Mode::Pitch);
    let snapshot = editor.snapshot();
    assert_eq!(snapshot.pitches, "B");
    assert_eq!(snapshot.descriptor, "");
}

#[test]
fn tab_cycles_back_to_pitch_when_nothing_is_pending() {
    let (mut editor, _persister) = editor();
    feed(&mut editor, &[InputEvent::Tab]);
    assert_eq!(editor.mode(), Mode::Play);
    feed(&mut editor, &[InputEvent::Tab]);
    assert_eq!(editor.mode(), Mode::Pitch);
}

#[test]
fn clear_discards_pending_pitches_without_an_undo_entry() {
    let (mut editor, _persister) = editor();
    feed(
        &mut editor,
        &[
            InputEvent::PitchKey('b'),
            InputEvent::PitchKey('c'),
            InputEvent::Clear,
        ],
    );
    let snapshot = editor.snapshot();
    assert_eq!(snapshot.pitches, "");
    assert!(!snapshot.undo_available);
}

#[test]
fn unbound_keys_are_ignored_and_change_nothing() {
    let (mut editor, _persister) = editor();
    assert!(matches!(
        editor.handle(InputEvent::PitchKey('z')),
        Err(EditorError::IgnoredKey { key: 'z', .. })
    ));
    // a result key cannot land while in PITCH mode
    assert!(matches!(
        editor.handle(InputEvent::PlayResultKey('1')),
        Err(EditorError::IgnoredKey { .. })
    ));
    assert_eq!(editor.mode(), Mode::Pitch);
    assert_eq!(editor.snapshot().pitches, "");
}

#[test]
fn committing_before_the_detail_is_complete_is_refused() {
    let (mut editor, _persister) = editor();
    feed(&mut editor, &[InputEvent::Tab, InputEvent::PlayResultKey('o')]);

    assert!(matches!(
        editor.handle(InputEvent::Commit),
        Err(EditorError::IncompleteDetail {
            missing: "batted-ball type"
        })
    ));

    feed(&mut editor, &[InputEvent::DetailKey('g')]);
    assert!(matches!(
        editor.handle(InputEvent::Commit),
        Err(EditorError::IncompleteDetail {
            missing: "fielder sequence"
        })
    ));
    assert_eq!(editor.mode(), Mode::Detail(DetailStage::Fielders));
}

#[test]
fn navigation_clamps_at_file_boundaries() {
    let (mut editor, _persister) = editor();
    assert!(matches!(
        editor.handle(InputEvent::NavPrevPlay),
        Err(EditorError::CursorAtBoundary { .. })
    ));
    assert!(matches!(
        editor.handle(InputEvent::NavPrevGame),
        Err(EditorError::CursorAtBoundary { .. })
    ));

    editor.handle(InputEvent::NavNextGame).unwrap();
    assert_eq!(editor.cursor(), Cursor { game: 1, play: 0 });
    assert!(matches!(
        editor.handle(InputEvent::NavNextGame),
        Err(EditorError::CursorAtBoundary { .. })
    ));
    assert!(matches!(
        editor.handle(InputEvent::NavNextPlay),
        Err(EditorError::CursorAtBoundary { .. })
    ));
}

#[test]
fn a_failed_save_keeps_the_commit_and_can_be_retried() {
    let (mut editor, persister) = editor();
    persister.fail_next();

    let result = feed(
        &mut editor,
        &[
            InputEvent::PitchKey('b'),
            InputEvent::PitchKey('b'),
            InputEvent::PitchKey('b'),
        ],
    );
    assert_eq!(result, Outcome::Continue);
    assert!(matches!(
        editor.handle(InputEvent::PitchKey('b')),
        Err(EditorError::Persistence { .. })
    ));

    // the in-memory commit survived the failed write
    let play = editor.store().game(0).unwrap().play(0).unwrap();
    assert_eq!(play.descriptor, "W");
    assert_eq!(persister.saves(), 0);

    // a bare commit retries the same save without re-entering anything
    assert_eq!(editor.handle(InputEvent::Commit).unwrap(), Outcome::Committed);
    assert_eq!(persister.saves(), 1);
    assert!(persister.last().contains(",BBBB,W\n"));

    // and once clean, commit is a no-op again
    assert_eq!(editor.handle(InputEvent::Commit).unwrap(), Outcome::Continue);
    assert_eq!(persister.saves(), 1);
}

#[test]
fn annotation_resumes_from_a_partially_recorded_play() {
    let text = "\
id,ANA201904040
play,1,0,aaa001,??,BB,
play,1,0,bbb002,??,,
";
    let (mut editor, _persister) = editor_with(text);
    assert_eq!(editor.snapshot().pitches, "BB");

    let outcome = feed(
        &mut editor,
        &[InputEvent::PitchKey('b'), InputEvent::PitchKey('b')],
    );
    assert_eq!(outcome, Outcome::Committed);

    let play = editor.store().game(0).unwrap().play(0).unwrap();
    assert_eq!(play.pitches, "BBBB");
    assert_eq!(play.descriptor, "W");
}

#[test]
fn snapshot_reports_the_active_mode_alphabet() {
    let (mut editor, _persister) = editor();
    assert_eq!(editor.snapshot().game_id, "ANA201904040");
    assert_eq!(editor.snapshot().keys.len(), 17);

    feed(&mut editor, &[InputEvent::Tab]);
    assert_eq!(editor.snapshot().keys.len(), 22);

    feed(&mut editor, &[InputEvent::PlayResultKey('o')]);
    assert_eq!(editor.snapshot().keys.len(), 5);

    feed(&mut editor, &[InputEvent::DetailKey('g')]);
    assert_eq!(editor.snapshot().keys.len(), 9);
}

#[test]
fn quit_passes_through() {
    let (mut editor, _persister) = editor();
    assert_eq!(editor.handle(InputEvent::Quit).unwrap(), Outcome::Quit);
}
