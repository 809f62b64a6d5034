#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use txview::{ParserError, QueryOptions, TokenizedJson, TxViewer};

#[derive(Debug, Arbitrary)]
struct Input {
    max_level: u8,
    max_depth: u8,
    key_cap: u8,
    value_cap: u8,
    source: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let Ok(doc) = TokenizedJson::parse(&input.source) else {
        return;
    };
    let options = QueryOptions {
        max_level: input.max_level % 8,
        max_depth: input.max_depth % 16,
    };
    let viewer = TxViewer::new(&doc, options);

    let mut key = vec![0u8; usize::from(input.key_cap)];
    let mut value = vec![0u8; usize::from(input.value_cap)];
    let items = viewer.num_items();

    for item in 0..items {
        let page_count = match viewer.item(item, &mut key, &mut value, 0) {
            Ok(page) => page.page_count,
            Err(ParserError::DisplayPageOutOfRange { page_count, .. }) => page_count,
            Err(err) => panic!("item {item} of {items} failed: {err}"),
        };
        for page in 0..page_count {
            viewer
                .item(item, &mut key, &mut value, page)
                .expect("page below page_count");
            assert!(key.last().is_none_or(|&b| b == 0));
            assert!(value.last().is_none_or(|&b| b == 0));
        }
    }

    assert_eq!(
        viewer.item(items, &mut key, &mut value, 0),
        Err(ParserError::QueryNoResults)
    );
});
