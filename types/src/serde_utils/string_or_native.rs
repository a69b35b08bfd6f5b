// The Beacon Node API quotes all unsigned integers, but some nodes and most fixtures use plain
// JSON numbers. Both are accepted and numbers are always written back quoted.

use core::{
    fmt::{Display, Formatter, Result as FmtResult},
    marker::PhantomData,
    str::FromStr,
};

use serde::{
    de::{Error, Visitor},
    Deserializer,
    Serializer,
};

pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: FromStr<Err: Display> + TryFrom<u64, Error: Display>,
    D: Deserializer<'de>,
{
    struct AnyVisitor<T>(PhantomData<T>);

    impl<T> Visitor<'_> for AnyVisitor<T>
    where
        T: FromStr<Err: Display> + TryFrom<u64, Error: Display>,
    {
        type Value = T;

        fn expecting(&self, formatter: &mut Formatter) -> FmtResult {
            formatter.write_str("a string or integer")
        }

        fn visit_str<E: Error>(self, string: &str) -> Result<Self::Value, E> {
            string.parse().map_err(E::custom)
        }

        fn visit_u64<E: Error>(self, value: u64) -> Result<Self::Value, E> {
            T::try_from(value).map_err(E::custom)
        }
    }

    deserializer.deserialize_any(AnyVisitor(PhantomData))
}

pub fn serialize<S: Serializer>(value: impl Display, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&value)
}
