use parse_display::{Display, FromStr};
use types::primitives::Slot;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Display, FromStr)]
#[display(style = "lowercase")]
pub enum BlockId {
    Head,
    Genesis,
    Finalized,
    #[display("{0}")]
    Slot(Slot),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Display, FromStr)]
#[display(style = "lowercase")]
pub enum StateId {
    Head,
    Genesis,
    Finalized,
    Justified,
    #[display("{0}")]
    Slot(Slot),
}
