#![allow(dead_code)]

use core::fmt::Write;

use txview::{JsonTokens, QueryOptions, TxViewer};

pub const DELEGATE_TX: &str = r#"{"account_number":"108","chain_id":"cosmoshub-4","fee":{"amount":[{"amount":"5000","denom":"uatom"}],"gas":"200000"},"memo":"Delegation to my favourite validator","msgs":[{"type":"cosmos-sdk/MsgDelegate","value":{"amount":{"amount":"1000000","denom":"uatom"},"delegator_address":"cosmos1abc","validator_address":"cosmosvaloper1xyz"}}],"sequence":"7"}"#;

pub const TWO_SENDS_TX: &str = r#"{"chain_id":"c","msgs":[{"type":"cosmos-sdk/MsgSend","value":{"amount":"5","to":"a"}},{"type":"cosmos-sdk/MsgSend","value":{"amount":"3","to":"b"}}]}"#;

/// Bytes up to the first terminator.
pub fn terminated(buf: &[u8]) -> &str {
    let len = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    core::str::from_utf8(&buf[..len]).expect("ascii fixture")
}

/// Every page of every item, one `key [page/count] value` line each, the
/// way a device with `KEY_CAP`/`VALUE_CAP` byte buffers would show them.
pub fn render_items<D: JsonTokens + ?Sized, const KEY_CAP: usize, const VALUE_CAP: usize>(
    doc: &D,
    options: QueryOptions,
) -> String {
    let viewer = TxViewer::new(doc, options);
    let mut out = String::new();
    for item in 0..viewer.num_items() {
        let mut key = [0u8; KEY_CAP];
        let mut value = [0u8; VALUE_CAP];
        let page_count = viewer
            .item(item, &mut key, &mut value, 0)
            .expect("item in range")
            .page_count;
        for page in 0..page_count {
            viewer
                .item(item, &mut key, &mut value, page)
                .expect("page in range");
            writeln!(
                out,
                "{} [{}/{}] {}",
                terminated(&key),
                page + 1,
                page_count,
                terminated(&value)
            )
            .unwrap();
        }
    }
    out
}
