#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(response) = rxmlrpc::decode_response_bytes(data) {
        let _ = rxmlrpc::json::response_to_json(&response);
    }
});
