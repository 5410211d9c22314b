//! Seedable randomness, and the probability table consulted by the evolution operators.
//!
//! Nothing in this crate reaches for an ambient generator: every operation that draws takes an
//! explicit handle, so a fixed seed replays a run exactly.

use crate::constants::THESEUS_MUTATION_PROB;
use core::cmp::min;
use rand::RngCore;
use std::{
    fs::File,
    io::{self, Read},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvolutionEvent {
    /// shuffle an interior window of an offspring's genome
    MutateGenome,
}

pub const fn percent(x: u64) -> u64 {
    x * (u64::MAX / 100)
}

pub trait Probabilities {
    type Update;
    fn probability(&self, evt: EvolutionEvent) -> u64;
    fn update(&mut self, stats: Self::Update);
}

pub trait Happens: RngCore + Probabilities {
    fn happens(&mut self, evt: EvolutionEvent) -> bool;
}

impl<T: RngCore + Probabilities> Happens for T {
    fn happens(&mut self, evt: EvolutionEvent) -> bool {
        self.probability(evt) > self.next_u64()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ProbStatic {
    mutate_genome: u64,
}

impl ProbStatic {
    pub fn with_overrides(mut self, updates: &[(EvolutionEvent, u64)]) -> Self {
        for update in updates {
            self.update(*update);
        }
        self
    }
}

impl Default for ProbStatic {
    fn default() -> Self {
        Self {
            mutate_genome: THESEUS_MUTATION_PROB,
        }
    }
}

impl Probabilities for ProbStatic {
    type Update = (EvolutionEvent, u64);
    fn probability(&self, evt: EvolutionEvent) -> u64 {
        match evt {
            EvolutionEvent::MutateGenome => self.mutate_genome,
        }
    }

    fn update(&mut self, (evt, v): Self::Update) {
        match evt {
            EvolutionEvent::MutateGenome => self.mutate_genome = v,
        }
    }
}

/// wyrand; small, fast, and fully determined by its seed
#[derive(Debug, Clone)]
pub struct WyRng {
    state: u64,
}

impl WyRng {
    pub fn seeded(state: u64) -> Self {
        Self { state }
    }
}

impl RngCore for WyRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        const WY_CONST_0: u64 = 0x2d35_8dcc_aa6c_78a5;
        const WY_CONST_1: u64 = 0x8bb8_4b93_962e_acc9;
        self.state = self.state.wrapping_add(WY_CONST_0);
        let t = u128::from(self.state) * u128::from(self.state ^ WY_CONST_1);
        (t as u64) ^ (t >> 64) as u64
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        let mut idx = 0;
        while idx < dst.len() {
            let lim = min(8, dst.len() - idx);
            dst[idx..idx + lim].copy_from_slice(&self.next_u64().to_le_bytes()[..lim]);
            idx += lim;
        }
    }
}

/// A probability table bound to the generator that rolls against it. This is the handle a
/// [Generation](crate::Generation) owns and threads through every draw.
#[derive(Debug, Clone)]
pub struct ProbBinding<P: Probabilities, R: RngCore> {
    p: P,
    r: R,
}

impl<P: Probabilities, R: RngCore> ProbBinding<P, R> {
    pub fn new(p: P, r: R) -> Self {
        Self { p, r }
    }
}

impl ProbBinding<ProbStatic, WyRng> {
    /// default probabilities over a [WyRng] seeded with `seed`
    pub fn seeded(seed: u64) -> Self {
        Self::new(ProbStatic::default(), WyRng::seeded(seed))
    }
}

impl<P: Probabilities, R: RngCore> Probabilities for ProbBinding<P, R> {
    type Update = P::Update;
    fn probability(&self, evt: EvolutionEvent) -> u64 {
        self.p.probability(evt)
    }

    fn update(&mut self, stats: Self::Update) {
        self.p.update(stats);
    }
}

impl<P: Probabilities, R: RngCore> RngCore for ProbBinding<P, R> {
    fn next_u32(&mut self) -> u32 {
        self.r.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.r.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.r.fill_bytes(dest)
    }
}

pub fn seed_urandom() -> io::Result<u64> {
    let mut file = File::open("/dev/urandom")?;
    let mut buffer = [0u8; 8];
    file.read_exact(&mut buffer)?;
    Ok(u64::from_le_bytes(buffer))
}

#[cfg(test)]
mod test {
    use super::*;
    use core::iter::once;
    use rand::rngs::ThreadRng;

    const CHANCE_MUTATE_GENOME: f64 = 0.6;

    fn assert_within_deviation(
        evt: EvolutionEvent,
        chance: f64,
        range: f64,
        happens: &mut impl Happens,
    ) {
        let samples = 10_000.;
        let expected = chance * samples;
        let max_deviation = expected * range;
        for _ in 0..100 {
            let incidence = once(())
                .cycle()
                .take(samples as usize)
                .filter(|()| happens.happens(evt))
                .count() as f64;
            assert!(
                (expected - incidence).abs() < max_deviation,
                "{evt:?}: {incidence} != {expected} ± {max_deviation}"
            );
        }
    }

    // control test - we are confident that rand generates good random numbers
    #[test]
    fn test_deviation_rand() {
        let mut p_bind = ProbBinding::new(ProbStatic::default(), ThreadRng::default());
        assert_within_deviation(
            EvolutionEvent::MutateGenome,
            CHANCE_MUTATE_GENOME,
            0.1,
            &mut p_bind,
        );
    }

    #[test]
    fn test_deviation_wyrand() {
        let mut p_bind = ProbBinding::seeded(0xdead_beef);
        assert_within_deviation(
            EvolutionEvent::MutateGenome,
            CHANCE_MUTATE_GENOME,
            0.1,
            &mut p_bind,
        );
    }

    #[test]
    fn test_overrides() {
        let mut never = ProbBinding::new(
            ProbStatic::default().with_overrides(&[(EvolutionEvent::MutateGenome, percent(0))]),
            WyRng::seeded(1),
        );
        assert!((0..1000).all(|_| !never.happens(EvolutionEvent::MutateGenome)));
        assert_eq!(never.probability(EvolutionEvent::MutateGenome), 0);
    }

    #[test]
    fn test_wyrng_replays_seed() {
        let mut l = WyRng::seeded(42);
        let mut r = WyRng::seeded(42);
        for _ in 0..100 {
            assert_eq!(l.next_u64(), r.next_u64());
        }
        assert_ne!(WyRng::seeded(1).next_u64(), WyRng::seeded(2).next_u64());
    }

    #[test]
    fn test_fill_bytes() {
        let mut expected = WyRng::seeded(7);
        let head = expected.next_u64().to_le_bytes();
        let tail = expected.next_u64().to_le_bytes();

        let mut buf = [0u8; 11];
        WyRng::seeded(7).fill_bytes(&mut buf);
        assert_eq!(&buf[..8], &head);
        assert_eq!(&buf[8..], &tail[..3]);

        WyRng::seeded(7).fill_bytes(&mut []);
    }
}
