//! Builds a corpus from real files on disk and loads it back.

use std::collections::HashMap;
use std::path::Path;

use pretty_assertions::assert_eq;

use songpair_corpus::{find_pairs, CorpusBuilder, CsvNoteEncoder, Lexicon, LexiconLyricsEncoder};
use songpair_spec::{read_records, Config};

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

#[test]
fn builds_train_and_valid_files() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let table = "track,delta,duration,pitch,volume,tempo\n0,0,1,60,100,60\n0,1,1,62,100,60\n0,1,1,64,100,60\n";
    for name in ["alpha", "beta", "gamma", "delta"] {
        write(&root.join(format!("seg/{}.txt", name)), "星 night\nsky");
        write(&root.join(format!("csv/{}.csv", name)), table);
    }

    let mut config = Config::default();
    config.music.length = 2;
    let lexicon = Lexicon::new(HashMap::from([
        ("星".to_string(), 1),
        ("night".to_string(), 2),
    ]));
    let builder = CorpusBuilder::new(LexiconLyricsEncoder::new(lexicon), CsvNoteEncoder::new(&config));

    let pairs = find_pairs(
        &format!("{}/seg/*.txt", root.display()),
        &format!("{}/csv/*.csv", root.display()),
        None,
    )
    .unwrap();
    assert_eq!(pairs.len(), 4);

    let train = root.join("train.jsonl");
    let valid = root.join("valid.jsonl");
    let stats = builder.build(pairs, &train, &valid).unwrap();
    assert_eq!(stats.valid_files, 1);
    assert_eq!(stats.train_files, 3);
    assert_eq!(stats.train_records, 6);
    assert_eq!(stats.valid_records, 2);

    let text = std::fs::read_to_string(&valid).unwrap();
    assert!(text.contains("\"name\""));
    let first_line = text.lines().next().unwrap();
    assert!(first_line.starts_with("{\"id\":"));

    let records = read_records(&valid).unwrap();
    assert_eq!(records[0].lyrics, vec![1, 2, 3]);
    assert_eq!(records[0].tempo, 0.5);
    assert!(records[0].id.ends_with("-0"));
    assert!(records[1].id.ends_with("-1"));
    assert_eq!(records[1].note, vec![vec![vec![1.0, 1.0, 64.0, 100.0]]]);
}
