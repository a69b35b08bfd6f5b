use core::fmt::{Formatter, Result as FmtResult};

use serde::{
    de::{Error, Visitor},
    Deserializer,
    Serializer,
};

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    struct QuantityVisitor;

    impl Visitor<'_> for QuantityVisitor {
        type Value = u64;

        fn expecting(&self, formatter: &mut Formatter) -> FmtResult {
            formatter.write_str("a 0x-prefixed hexadecimal quantity")
        }

        fn visit_str<E: Error>(self, string: &str) -> Result<Self::Value, E> {
            let digits = super::strip_hex_prefix(string)?;

            if digits.is_empty() {
                return Err(E::custom("quantity contains no hexadecimal digits"));
            }

            u64::from_str_radix(digits, 16).map_err(E::custom)
        }
    }

    deserializer.deserialize_str(QuantityVisitor)
}

pub fn serialize<S: Serializer>(quantity: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&format_args!("{quantity:#x}"))
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use serde_json::json;
    use test_case::test_case;

    #[derive(PartialEq, Eq, Debug, Deserialize, Serialize)]
    #[serde(transparent)]
    struct Quantity(#[serde(with = "super")] u64);

    #[test_case("0x0" => Some(0))]
    #[test_case("0x1d243" => Some(119_363))]
    #[test_case("0x" => None)]
    #[test_case("1d243" => None)]
    fn quantity_parsing(string: &str) -> Option<u64> {
        serde_json::from_value::<Quantity>(json!(string))
            .ok()
            .map(|Quantity(quantity)| quantity)
    }
}
