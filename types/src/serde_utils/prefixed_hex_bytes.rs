use core::fmt::{Formatter, Result as FmtResult};

use serde::{
    de::{Error, Visitor},
    Deserializer,
    Serializer,
};

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    struct HexVisitor;

    impl Visitor<'_> for HexVisitor {
        type Value = Vec<u8>;

        fn expecting(&self, formatter: &mut Formatter) -> FmtResult {
            formatter.write_str("a 0x-prefixed hexadecimal string")
        }

        fn visit_str<E: Error>(self, string: &str) -> Result<Self::Value, E> {
            let digits = super::strip_hex_prefix(string)?;
            hex::decode(digits).map_err(E::custom)
        }
    }

    deserializer.deserialize_str(HexVisitor)
}

pub fn serialize<S: Serializer>(bytes: impl AsRef<[u8]>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&format_args!("0x{}", hex::encode(bytes)))
}

pub mod sequence {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Deserialize, Serialize)]
    #[serde(transparent)]
    struct Wrapped(#[serde(with = "super")] Vec<u8>);

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Vec<u8>>, D::Error> {
        Vec::<Wrapped>::deserialize(deserializer)
            .map(|wrapped| wrapped.into_iter().map(|Wrapped(bytes)| bytes).collect())
    }

    pub fn serialize<S: Serializer>(
        sequence: &[Vec<u8>],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(sequence.iter().cloned().map(Wrapped))
    }
}
