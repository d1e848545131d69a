//! The process boundary end to end: open a real file, annotate, and find the
//! write-through output in the output directory under the original filename.

use std::fs;
use std::path::PathBuf;

use scorebook::{Editor, InputEvent, Outcome};

const FIXTURE: &str = "\
id,BOS202105010
version,2
info,visteam,NYA
play,1,0,judga001,??,,
play,1,0,stanm004,??,,
";

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir()
        .join("scorebook-tests")
        .join(format!("{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn committed_edits_land_in_the_output_directory() {
    let dir = scratch_dir("boundary");
    let input_dir = dir.join("in");
    fs::create_dir_all(&input_dir).unwrap();
    let input = input_dir.join("2021BOS.EVA");
    fs::write(&input, FIXTURE).unwrap();

    // the output directory is only created once something is written
    let out_dir = dir.join("out");
    let mut editor = Editor::open(&input, &out_dir).unwrap();
    assert!(!out_dir.exists());

    let mut outcome = Outcome::Continue;
    for key in ['c', 'c', 's'] {
        outcome = editor.handle(InputEvent::PitchKey(key)).unwrap();
    }
    assert_eq!(outcome, Outcome::Committed);

    let written = fs::read_to_string(out_dir.join("2021BOS.EVA")).unwrap();
    assert!(written.contains("play,1,0,judga001,02,CCS,K\n"));
    // the untouched play is byte-identical
    assert!(written.contains("play,1,0,stanm004,??,,\n"));
    // and the source file was never modified
    assert_eq!(fs::read_to_string(&input).unwrap(), FIXTURE);
}

#[test]
fn opening_a_missing_file_fails() {
    let dir = scratch_dir("missing");
    assert!(Editor::open(&dir.join("nope.EVN"), &dir.join("out")).is_err());
}
