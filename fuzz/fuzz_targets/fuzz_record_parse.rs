#![no_main]

use libfuzzer_sys::fuzz_target;
use songpair_dataset::{from_records, DatasetError};
use songpair_spec::{parse_records, Config};

fuzz_target!(|data: &[u8]| {
    let Ok(records) = parse_records(data) else {
        return;
    };

    // Every parsed record set must batch without panicking.
    let mut config = Config::default();
    config.music.length = 4;
    config.lyrics.length = 8;
    config.translator.batch_size = 3;
    config.autoencoder.batch_size = 2;
    if let Ok(datasets) = from_records(&records, &config) {
        let batches = datasets
            .translator
            .batches()
            .chain(datasets.autoencoder.batches());
        for batch in batches {
            if let Err(err) = batch {
                assert!(
                    matches!(err, DatasetError::EmbeddingWidth { .. }),
                    "unexpected batch error: {}",
                    err
                );
            }
        }
    }
});
