//! Field adapters for the JSON encodings used by the Beacon Node API and the execution JSON-RPC.

pub mod decimal_u256;
pub mod prefixed_hex_bytes;
pub mod prefixed_hex_quantity;
pub mod string_or_native;

fn strip_hex_prefix<E: serde::de::Error>(string: &str) -> Result<&str, E> {
    string
        .strip_prefix("0x")
        .ok_or_else(|| E::custom(format!("{string:?} is missing the 0x prefix")))
}
