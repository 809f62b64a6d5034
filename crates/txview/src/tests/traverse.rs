use alloc::{string::String, vec::Vec};

use crate::{
    Budget, Document, GroupingFlags, JsonTokens, ParserError, QueryContext, Token, TokenKind,
    TokenizedJson,
};

const UNLIMITED: Budget = Budget {
    level: u8::MAX,
    depth: u8::MAX,
};

/// Every field of `src` in order, as `key=value` with the raw value text.
fn sweep(src: &str, budget: Budget) -> Vec<String> {
    let doc = TokenizedJson::parse(src.as_bytes()).unwrap();
    let mut key = [0u8; 64];
    let mut ctx = QueryContext::new(&mut key, 0, GroupingFlags::default());
    let mut fields = Vec::new();
    for item in 0.. {
        ctx.reset(item);
        match ctx.find(&doc, 0, budget) {
            Ok(token) => {
                let value = core::str::from_utf8(doc.span(token).unwrap()).unwrap();
                fields.push(alloc::format!("{}={value}", ctx.key()));
            }
            Err(ParserError::QueryNoResults) => break,
            Err(err) => panic!("unexpected {err}"),
        }
    }
    fields
}

#[test]
fn fields_in_document_order() {
    let fields = sweep(
        r#"{"account":"7","fee":{"amount":[{"denom":"uatom","amount":"5"}],"gas":"200"},"memo":""}"#,
        UNLIMITED,
    );
    assert_eq!(
        fields,
        [
            "account=7",
            "fee/amount/denom=uatom",
            "fee/amount/amount=5",
            "fee/gas=200",
            "memo=",
        ]
    );
}

#[test]
fn depth_budget_renders_nested_objects_raw() {
    let fields = sweep(
        r#"{"a":{"b":{"c":1}},"d":2}"#,
        Budget {
            level: 8,
            depth: 1,
        },
    );
    assert_eq!(fields, [r#"a={"b":{"c":1}}"#, "d=2"]);
}

#[test]
fn level_budget_ignores_arrays() {
    let fields = sweep(
        r#"{"a":[1,[2]],"b":{"c":{"d":3}}}"#,
        Budget {
            level: 2,
            depth: 10,
        },
    );
    assert_eq!(fields, ["a=1", "a=2", r#"b/c={"d":3}"#]);
}

#[test]
fn depth_budget_counts_arrays() {
    let fields = sweep(
        "[[[1]],2]",
        Budget {
            level: 8,
            depth: 2,
        },
    );
    assert_eq!(fields, ["=[1]", "=2"]);
}

#[test]
fn siblings_share_the_same_budget() {
    let fields = sweep(
        r#"{"a":{"x":1},"b":{"y":2},"c":{"z":3}}"#,
        Budget {
            level: 2,
            depth: 2,
        },
    );
    assert_eq!(fields, ["a/x=1", "b/y=2", "c/z=3"]);
}

#[test]
fn exhausted_budget_makes_root_a_field() {
    let fields = sweep(r#"{"a":1}"#, Budget { level: 0, depth: 4 });
    assert_eq!(fields, [r#"={"a":1}"#]);
}

#[test]
fn empty_containers_hold_no_fields() {
    let fields = sweep(r#"{"a":{},"b":[],"c":[{}],"d":0}"#, UNLIMITED);
    assert_eq!(fields, ["d=0"]);
}

#[test]
fn missing_document_is_no_data() {
    let mut key = [0u8; 8];
    let mut ctx = QueryContext::new(&mut key, 0, GroupingFlags::default());
    assert_eq!(
        ctx.find(&Document::new(b"", &[]), 0, UNLIMITED),
        Err(ParserError::NoData)
    );

    let doc = TokenizedJson::parse(b"[1]").unwrap();
    assert_eq!(ctx.find(&doc, 2, UNLIMITED), Err(ParserError::NoData));
}

#[test]
fn not_found_rolls_back_key_path() {
    let doc = TokenizedJson::parse(br#"{"a":{"b":{"c":1}},"d":[{"e":2}]}"#).unwrap();
    let mut key = [0u8; 32];
    let mut ctx = QueryContext::new(&mut key, 10, GroupingFlags::default());
    assert_eq!(ctx.find(&doc, 0, UNLIMITED), Err(ParserError::QueryNoResults));
    assert!(ctx.key().is_empty());
    assert_eq!(ctx.visited(), 2);
    assert_eq!(ctx.item_index(), 10);
}

#[test]
fn repeated_lookup_is_stable() {
    let doc = TokenizedJson::parse(br#"{"a":[1,2,{"b":3}],"c":4}"#).unwrap();
    let mut key = [0u8; 32];
    let mut ctx = QueryContext::new(&mut key, 2, GroupingFlags::default());
    let first = ctx.find(&doc, 0, UNLIMITED).unwrap();
    ctx.reset(2);
    let second = ctx.find(&doc, 0, UNLIMITED).unwrap();
    assert_eq!(first, second);
    assert_eq!(ctx.key().as_bytes(), b"a/b");
    assert_eq!(doc.span(second), Some(&b"3"[..]));
}

#[test]
fn search_from_inner_root() {
    let doc = TokenizedJson::parse(br#"{"fee":{"gas":"9","payer":"p"}}"#).unwrap();
    let mut key = [0u8; 32];
    let mut ctx = QueryContext::new(&mut key, 1, GroupingFlags::default());
    let token = ctx.find(&doc, 2, UNLIMITED).unwrap();
    assert_eq!(doc.span(token), Some(&b"p"[..]));
    assert_eq!(ctx.key().as_bytes(), b"payer");
}

#[test]
fn long_keys_are_cut_to_the_buffer() {
    let doc = TokenizedJson::parse(br#"{"abcdef":{"ghijkl":1}}"#).unwrap();
    let mut key = [0u8; 10];
    let mut ctx = QueryContext::new(&mut key, 0, GroupingFlags::default());
    ctx.find(&doc, 0, UNLIMITED).unwrap();
    assert_eq!(ctx.key().as_bytes(), b"abcdef/gh");
    drop(ctx);
    assert_eq!(key[9], 0);
}

#[test]
fn corrupt_key_span_adds_nothing() {
    let tokens = [
        Token {
            start: 0,
            end: 9,
            kind: TokenKind::Object,
            size: 1,
        },
        Token {
            start: 4,
            end: 2,
            kind: TokenKind::String,
            size: 0,
        },
        Token {
            start: 7,
            end: 8,
            kind: TokenKind::Primitive,
            size: 0,
        },
    ];
    let doc = Document::new(br#"{"ab": 1}"#, &tokens);
    let mut key = [0u8; 8];
    let mut ctx = QueryContext::new(&mut key, 0, GroupingFlags::default());
    assert_eq!(ctx.find(&doc, 0, UNLIMITED), Ok(2));
    assert!(ctx.key().is_empty());
}

#[test]
fn position_of_key_in_one_sweep() {
    let doc = TokenizedJson::parse(
        br#"{"fee":{"amount":"1","gas":"2"},"msgs":[{"type":"a"},{"type":"b"}]}"#,
    )
    .unwrap();
    let mut key = [0u8; 32];
    let mut ctx = QueryContext::new(&mut key, 0, GroupingFlags::default());
    assert_eq!(ctx.position_of_key(&doc, 0, UNLIMITED, b"msgs/type"), Ok(2));
    assert_eq!(ctx.key().as_bytes(), b"msgs/type");
    assert_eq!(ctx.position_of_key(&doc, 0, UNLIMITED, b"fee/gas"), Ok(1));
    assert_eq!(
        ctx.position_of_key(&doc, 0, UNLIMITED, b"msgs"),
        Err(ParserError::QueryNoResults)
    );

    // the target does not outlive the lookup
    ctx.reset(3);
    assert_eq!(ctx.find(&doc, 0, UNLIMITED), Ok(14));
}
