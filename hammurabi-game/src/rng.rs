//! Deterministic RNG streams segregated by simulation domain.
//!
//! The simulator itself never touches a generator: it consumes an explicit
//! [`YearDraws`] record, so tests can replay fixed sequences. The bundle here
//! exists to produce those draws reproducibly from a single user seed.
use hmac::{Hmac, Mac};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha2::Sha256;
use std::cell::{RefCell, RefMut};

use crate::config::GameConfig;

/// Deterministic bundle of RNG streams segregated by simulation domain.
#[derive(Debug, Clone)]
pub struct RngBundle {
    plague: RefCell<CountingRng<ChaCha20Rng>>,
    harvest: RefCell<CountingRng<ChaCha20Rng>>,
    rats: RefCell<CountingRng<ChaCha20Rng>>,
    babies: RefCell<CountingRng<ChaCha20Rng>>,
    price: RefCell<CountingRng<ChaCha20Rng>>,
}

impl RngBundle {
    /// Construct the bundle from a user-visible seed.
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        let plague = CountingRng::new(derive_stream_seed(seed, b"plague"));
        let harvest = CountingRng::new(derive_stream_seed(seed, b"harvest"));
        let rats = CountingRng::new(derive_stream_seed(seed, b"rats"));
        let babies = CountingRng::new(derive_stream_seed(seed, b"babies"));
        let price = CountingRng::new(derive_stream_seed(seed, b"price"));
        Self {
            plague: RefCell::new(plague),
            harvest: RefCell::new(harvest),
            rats: RefCell::new(rats),
            babies: RefCell::new(babies),
            price: RefCell::new(price),
        }
    }

    /// Access the plague RNG stream.
    #[must_use]
    pub fn plague(&self) -> RefMut<'_, CountingRng<ChaCha20Rng>> {
        self.plague.borrow_mut()
    }

    /// Access the harvest-yield RNG stream.
    #[must_use]
    pub fn harvest(&self) -> RefMut<'_, CountingRng<ChaCha20Rng>> {
        self.harvest.borrow_mut()
    }

    /// Access the rat-count RNG stream.
    #[must_use]
    pub fn rats(&self) -> RefMut<'_, CountingRng<ChaCha20Rng>> {
        self.rats.borrow_mut()
    }

    /// Access the immigration RNG stream.
    #[must_use]
    pub fn babies(&self) -> RefMut<'_, CountingRng<ChaCha20Rng>> {
        self.babies.borrow_mut()
    }

    /// Access the land-price RNG stream.
    #[must_use]
    pub fn price(&self) -> RefMut<'_, CountingRng<ChaCha20Rng>> {
        self.price.borrow_mut()
    }
}

/// Counting wrapper for RNG streams providing instrumentation.
#[derive(Debug, Clone)]
pub struct CountingRng<R> {
    rng: R,
    draws: u64,
}

impl CountingRng<ChaCha20Rng> {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
            draws: 0,
        }
    }
}

impl<R: rand::RngCore> CountingRng<R> {
    /// Number of draw calls performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl<R: rand::RngCore> rand::RngCore for CountingRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.rng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.draws = self.draws.saturating_add(1);
        self.rng.try_fill_bytes(dest)
    }
}

fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()).expect("64-bit seed is valid key");
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let seed_bytes: [u8; 8] = digest[..8].try_into().expect("digest slice length");
    u64::from_le_bytes(seed_bytes)
}

/// Explicit uniform draws consumed by one simulated year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearDraws {
    /// Uniform in `[0, 100)`; plague strikes when below the configured chance.
    pub plague_roll: u32,
    /// Bushels per acre, uniform in `[1, max_yield]`.
    pub yield_roll: u32,
    /// Rat count, uniform in `[1, max_rats]`; rats feast only on odd counts.
    pub rat_roll: u32,
    /// Immigration factor, uniform in `[1, max_babies]`.
    pub babies_roll: u32,
}

impl YearDraws {
    /// Roll one year's draws from the bundle.
    #[must_use]
    pub fn roll(rng: &RngBundle, cfg: &GameConfig) -> Self {
        Self {
            plague_roll: rng.plague().gen_range(0..crate::constants::PLAGUE_ROLL_SPAN),
            yield_roll: rng.harvest().gen_range(1..=cfg.max_yield),
            rat_roll: rng.rats().gen_range(1..=cfg.max_rats),
            babies_roll: rng.babies().gen_range(1..=cfg.max_babies),
        }
    }
}

/// Roll the land price for one year's trading.
#[must_use]
pub fn roll_land_price(rng: &RngBundle, cfg: &GameConfig) -> u32 {
    cfg.land_price_base + rng.price().gen_range(0..cfg.land_price_spread)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streams_are_deterministic_per_seed() {
        let cfg = GameConfig::default();
        let a = RngBundle::from_user_seed(1337);
        let b = RngBundle::from_user_seed(1337);
        for _ in 0..16 {
            assert_eq!(YearDraws::roll(&a, &cfg), YearDraws::roll(&b, &cfg));
            assert_eq!(roll_land_price(&a, &cfg), roll_land_price(&b, &cfg));
        }
    }

    #[test]
    fn streams_diverge_across_seeds() {
        let cfg = GameConfig::default();
        let a = RngBundle::from_user_seed(1);
        let b = RngBundle::from_user_seed(2);
        let draws_a: Vec<YearDraws> = (0..8).map(|_| YearDraws::roll(&a, &cfg)).collect();
        let draws_b: Vec<YearDraws> = (0..8).map(|_| YearDraws::roll(&b, &cfg)).collect();
        assert_ne!(draws_a, draws_b);
    }

    #[test]
    fn draws_respect_configured_bounds() {
        let cfg = GameConfig::default();
        let rng = RngBundle::from_user_seed(0xC0FFEE);
        for _ in 0..200 {
            let draws = YearDraws::roll(&rng, &cfg);
            assert!(draws.plague_roll < 100);
            assert!((1..=cfg.max_yield).contains(&draws.yield_roll));
            assert!((1..=cfg.max_rats).contains(&draws.rat_roll));
            assert!((1..=cfg.max_babies).contains(&draws.babies_roll));
            let price = roll_land_price(&rng, &cfg);
            assert!((cfg.land_price_base..cfg.land_price_base + cfg.land_price_spread)
                .contains(&price));
        }
    }

    #[test]
    fn counting_wrapper_tracks_draws() {
        let rng = RngBundle::from_user_seed(7);
        assert_eq!(rng.plague().draws(), 0);
        let _ = YearDraws::roll(&rng, &GameConfig::default());
        assert!(rng.plague().draws() >= 1);
        assert!(rng.harvest().draws() >= 1);
    }
}
