use core::{num::NonZeroU64, time::Duration};

use nonzero_ext::nonzero;
use strum::{AsRefStr, Display, EnumString};

use crate::primitives::{Epoch, Slot};

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Holesky,
    Sepolia,
    Hoodi,
    Gnosis,
    Minimal,
}

/// Chain parameters needed to translate between slots, epochs and wall-clock time.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ChainSpec {
    pub slots_per_epoch: NonZeroU64,
    pub seconds_per_slot: NonZeroU64,
}

impl Default for ChainSpec {
    fn default() -> Self {
        Self::mainnet()
    }
}

impl From<Network> for ChainSpec {
    fn from(network: Network) -> Self {
        match network {
            Network::Mainnet | Network::Holesky | Network::Sepolia | Network::Hoodi => {
                Self::mainnet()
            }
            Network::Gnosis => Self::gnosis(),
            Network::Minimal => Self::minimal(),
        }
    }
}

impl ChainSpec {
    #[must_use]
    pub const fn mainnet() -> Self {
        Self::new(nonzero!(32_u64), nonzero!(12_u64))
    }

    #[must_use]
    pub const fn gnosis() -> Self {
        Self::new(nonzero!(16_u64), nonzero!(5_u64))
    }

    #[must_use]
    pub const fn minimal() -> Self {
        Self::new(nonzero!(8_u64), nonzero!(6_u64))
    }

    #[must_use]
    pub const fn new(slots_per_epoch: NonZeroU64, seconds_per_slot: NonZeroU64) -> Self {
        Self {
            slots_per_epoch,
            seconds_per_slot,
        }
    }

    /// Integer division; a slot belongs to the epoch that contains it.
    #[must_use]
    pub const fn compute_epoch_at_slot(self, slot: Slot) -> Epoch {
        slot / self.slots_per_epoch.get()
    }

    #[must_use]
    pub const fn compute_start_slot_at_epoch(self, epoch: Epoch) -> Slot {
        epoch.saturating_mul(self.slots_per_epoch.get())
    }

    #[must_use]
    pub const fn slot_duration(self) -> Duration {
        Duration::from_secs(self.seconds_per_slot.get())
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(Network::Mainnet, 0 => 0)]
    #[test_case(Network::Mainnet, 31 => 0)]
    #[test_case(Network::Mainnet, 32 => 1)]
    #[test_case(Network::Mainnet, 100 => 3)]
    #[test_case(Network::Gnosis, 100 => 6)]
    #[test_case(Network::Minimal, 17 => 2)]
    fn compute_epoch_at_slot(network: Network, slot: Slot) -> Epoch {
        ChainSpec::from(network).compute_epoch_at_slot(slot)
    }

    #[test]
    fn start_slot_of_epoch_is_in_that_epoch() {
        let chain_spec = ChainSpec::gnosis();

        for epoch in [0, 1, 7, 1_000_000] {
            let start_slot = chain_spec.compute_start_slot_at_epoch(epoch);

            assert_eq!(chain_spec.compute_epoch_at_slot(start_slot), epoch);
            assert_eq!(
                chain_spec.compute_epoch_at_slot(start_slot.saturating_sub(1)),
                epoch.saturating_sub(1),
            );
        }
    }

    #[test]
    fn network_names_parse() -> Result<(), strum::ParseError> {
        assert_eq!("gnosis".parse::<Network>()?, Network::Gnosis);
        assert_eq!(Network::Hoodi.to_string(), "hoodi");
        assert_eq!(ChainSpec::from(Network::Gnosis).slot_duration(), Duration::from_secs(5));
        Ok(())
    }
}
